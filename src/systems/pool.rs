//! Pool bootstrap and world-level helpers.
//!
//! [`init_object_pools`] turns the configured pool list into live pools once
//! templates are registered. [`pool_spawn`] and [`pool_release`] wrap the
//! [`ObjectPool`] resource for drivers and tests that hold a `&mut World`
//! rather than system parameters.
use bevy_ecs::prelude::*;
use log::warn;
use nalgebra::{UnitQuaternion, Vector3};

use crate::resources::combatconfig::CombatConfig;
use crate::resources::objectpool::ObjectPool;
use crate::resources::templatestore::TemplateStore;

/// Create every configured pool from the registered templates.
pub fn init_object_pools(
    mut commands: Commands,
    mut pool: ResMut<ObjectPool>,
    config: Res<CombatConfig>,
    templates: Res<TemplateStore>,
) {
    let definitions = config.pool_definitions(&templates);
    if definitions.is_empty() {
        warn!("No object pools could be created");
    }
    pool.initialize(&mut commands, &definitions);
}

/// Spawn from the pool and apply the resulting commands immediately.
pub fn pool_spawn(
    world: &mut World,
    tag: &str,
    position: Vector3<f32>,
    orientation: UnitQuaternion<f32>,
) -> Option<Entity> {
    let spawned = world.resource_scope(|world, mut pool: Mut<ObjectPool>| {
        let mut commands = world.commands();
        pool.spawn(&mut commands, tag, position, orientation)
    });
    world.flush();
    spawned
}

/// Release to the pool and apply the resulting commands immediately.
pub fn pool_release(world: &mut World, tag: &str, entity: Entity) {
    world.resource_scope(|world, mut pool: Mut<ObjectPool>| {
        let mut commands = world.commands();
        pool.release(&mut commands, tag, entity);
    });
    world.flush();
}
