//! Projectile hit event and the stock damage observer.
//!
//! The projectile system triggers [`ProjectileHit`] when a projectile's swept
//! path enters a collider on one of its mask layers, before the projectile is
//! returned to its pool. Observers can subscribe to this event to react in a
//! decoupled manner (damage, impact effects, score, etc.).
//!
//! [`observe_projectile_damage`] subtracts the projectile's damage from the
//! target's [`Health`], if it has one. Replace or complement it with
//! game-specific observers.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;
use nalgebra::Vector3;

use crate::components::health::Health;

/// Event fired when a projectile hits a collider.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    /// Entry point on the target's collider, in world space.
    pub point: Vector3<f32>,
    /// Distance travelled this tick before the hit.
    pub distance: f32,
    pub damage: i32,
}

/// Apply the hit's damage to the target's [`Health`].
pub fn observe_projectile_damage(trigger: On<ProjectileHit>, mut targets: Query<&mut Health>) {
    let hit = trigger.event();
    let Ok(mut health) = targets.get_mut(hit.target) else {
        return;
    };
    if health.apply_damage(hit.damage) {
        debug!("{:?} destroyed by {:?}", hit.target, hit.projectile);
    }
}
