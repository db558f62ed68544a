//! Pool spawn hook.
//!
//! [`ObjectPool::spawn`](crate::resources::objectpool::ObjectPool::spawn)
//! triggers [`ObjectSpawned`] after it has activated and placed a member.
//! Behaviors that must reset per-use state (a projectile's spawn time, for
//! instance) observe it and check whether the entity carries their
//! component.
use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ObjectSpawned {
    /// The member that was just lent out.
    pub entity: Entity,
    /// Pool tag it belongs to.
    pub tag: String,
}
