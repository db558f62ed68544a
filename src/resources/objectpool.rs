//! Tagged pools of reusable entities.
//!
//! The [`ObjectPool`] resource owns one FIFO collection per tag. Members are
//! clones of the tag's template entity and are never despawned: they are
//! lent out by [`ObjectPool::spawn`] and handed back by
//! [`ObjectPool::release`].
//!
//! # Ordering
//!
//! Every inactive member sits ahead of every active one. `spawn` takes the
//! head: if the head is active, the whole collection is busy and a fresh
//! clone is appended instead, so the pool only ever grows. `release` moves
//! the handle back to the head, which makes it the next one handed out.
//!
//! # Activation
//!
//! Inactive members carry the ECS [`Disabled`] marker and are invisible to
//! ordinary queries. A spawned member gets its position, orientation and
//! [`Pooled`] tag written, loses `Disabled`, and then an [`ObjectSpawned`]
//! event is triggered so per-entity behaviors can reset themselves.
//!
//! # Errors
//!
//! Unknown tags and missing templates are logged and turn the call into a
//! no-op.
//!
//! # Related
//!
//! - [`crate::systems::pool`] – startup and world-level helpers
//! - [`crate::resources::templatestore::TemplateStore`] – where templates are registered
//! - [`crate::events::pool::ObjectSpawned`] – the spawn hook

use std::collections::VecDeque;

use bevy_ecs::entity_disabling::Disabled;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};
use nalgebra::{UnitQuaternion, Vector3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::mapposition::MapPosition;
use crate::components::pooled::Pooled;
use crate::components::rotation::Rotation;
use crate::events::pool::ObjectSpawned;

/// Startup description of one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDefinition {
    pub tag: String,
    pub template: Entity,
    pub initial_count: usize,
}

impl PoolDefinition {
    pub fn new(tag: impl Into<String>, template: Entity, initial_count: usize) -> Self {
        Self {
            tag: tag.into(),
            template,
            initial_count,
        }
    }
}

#[derive(Debug)]
struct TagPool {
    template: Entity,
    members: VecDeque<Entity>,
    active: FxHashSet<Entity>,
}

#[derive(Resource, Debug, Default)]
pub struct ObjectPool {
    pools: FxHashMap<String, TagPool>,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every definition and pre-create its members, inactive.
    ///
    /// A definition whose template does not exist, or whose tag is already
    /// registered, is logged and skipped.
    pub fn initialize(&mut self, commands: &mut Commands, definitions: &[PoolDefinition]) {
        for def in definitions {
            if commands.get_entity(def.template).is_err() {
                error!(
                    "Pool '{}': template {:?} does not exist, skipping",
                    def.tag, def.template
                );
                continue;
            }
            if self.pools.contains_key(&def.tag) {
                warn!("Pool '{}' already registered, skipping duplicate", def.tag);
                continue;
            }

            let mut members = VecDeque::with_capacity(def.initial_count);
            for _ in 0..def.initial_count {
                members.push_back(create_member(commands, &def.tag, def.template));
            }
            info!("Pool '{}' created with {} members", def.tag, members.len());
            self.pools.insert(
                def.tag.clone(),
                TagPool {
                    template: def.template,
                    members,
                    active: FxHashSet::default(),
                },
            );
        }
    }

    /// Lend out a member of `tag` at `position` facing `orientation`.
    ///
    /// Returns `None` (and logs) for an unknown tag, or when the collection
    /// has to grow but its template no longer exists.
    pub fn spawn(
        &mut self,
        commands: &mut Commands,
        tag: &str,
        position: Vector3<f32>,
        orientation: UnitQuaternion<f32>,
    ) -> Option<Entity> {
        let Some(pool) = self.pools.get_mut(tag) else {
            warn!("Pool with tag '{}' doesn't exist", tag);
            return None;
        };

        let entity = match pool.members.pop_front() {
            Some(head) if !pool.active.contains(&head) => head,
            busy_head => {
                if commands.get_entity(pool.template).is_err() {
                    if let Some(head) = busy_head {
                        pool.members.push_front(head);
                    }
                    warn!("Pool '{}': template is gone, cannot grow", tag);
                    return None;
                }
                if let Some(head) = busy_head {
                    pool.members.push_back(head);
                }
                let fresh = create_member(commands, tag, pool.template);
                debug!(
                    "Pool '{}' exhausted, grew to {} members",
                    tag,
                    pool.members.len() + 1
                );
                fresh
            }
        };

        pool.members.push_back(entity);
        pool.active.insert(entity);

        commands
            .entity(entity)
            .remove::<Disabled>()
            .insert((
                MapPosition::from_vec(position),
                Rotation::new(orientation),
                Pooled::new(tag),
            ));
        commands.trigger(ObjectSpawned {
            entity,
            tag: tag.to_string(),
        });

        Some(entity)
    }

    /// Deactivate `entity` and make it the next member `spawn` hands out.
    pub fn release(&mut self, commands: &mut Commands, tag: &str, entity: Entity) {
        let Some(pool) = self.pools.get_mut(tag) else {
            warn!("Pool with tag '{}' doesn't exist", tag);
            return;
        };

        if let Some(index) = pool.members.iter().position(|&e| e == entity) {
            pool.members.remove(index);
            pool.members.push_front(entity);
            pool.active.remove(&entity);
        } else {
            debug!("Entity {:?} is not a member of pool '{}'", entity, tag);
        }

        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.insert(Disabled);
        }
    }

    pub fn has_pool(&self, tag: &str) -> bool {
        self.pools.contains_key(tag)
    }

    /// Number of members of `tag`, active or not. Zero for unknown tags.
    pub fn size(&self, tag: &str) -> usize {
        self.pools.get(tag).map_or(0, |p| p.members.len())
    }

    pub fn active_count(&self, tag: &str) -> usize {
        self.pools.get(tag).map_or(0, |p| p.active.len())
    }

    pub fn is_active(&self, tag: &str, entity: Entity) -> bool {
        self.pools
            .get(tag)
            .is_some_and(|p| p.active.contains(&entity))
    }

    pub fn contains(&self, tag: &str, entity: Entity) -> bool {
        self.pools
            .get(tag)
            .is_some_and(|p| p.members.contains(&entity))
    }

    /// Members of `tag` in hand-out order.
    pub fn members(&self, tag: &str) -> Vec<Entity> {
        self.pools
            .get(tag)
            .map(|p| p.members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }
}

fn create_member(commands: &mut Commands, tag: &str, template: Entity) -> Entity {
    let mut source_commands = commands.entity(template);
    source_commands
        .clone_and_spawn()
        .insert((Disabled, Pooled::new(tag)))
        .id()
}
