//! Projectile component.
//!
//! A [`Projectile`] flies along a fixed direction at a fixed speed until it
//! either outlives its `lifetime` or its swept path crosses a collider on one
//! of the layers in `collision_mask`. Either way it goes back to the pool that
//! lent it out, named by `owner_tag`.
//!
//! The per-tick behavior lives in [`crate::systems::projectile`].

use bevy_ecs::prelude::Component;
use nalgebra::Vector3;

use crate::components::collisionlayer::Layers;

/// Lifecycle of a projectile.
///
/// `Inactive → Active → (Expired | Collided) → Inactive`. `Expired` and
/// `Collided` only exist between the terminal check and the return to the
/// pool within a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    Expired,
    Collided,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Pool tag to return to. `None` means the projectile was built outside
    /// a pool and disables itself instead.
    pub owner_tag: Option<String>,
    /// Unit travel direction.
    pub forward: Vector3<f32>,
    /// Units per second.
    pub speed: f32,
    /// Simulation time of the last (re)spawn.
    pub spawn_time: f32,
    /// Seconds before the projectile expires.
    pub lifetime: f32,
    pub collision_mask: u32,
    /// Damage carried into the hit event.
    pub damage: i32,
    pub state: ProjectileState,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            owner_tag: None,
            forward: Vector3::z(),
            speed: 30.0,
            spawn_time: 0.0,
            lifetime: 3.0,
            collision_mask: Layers::ALL,
            damage: 1,
            state: ProjectileState::Inactive,
        }
    }
}

impl Projectile {
    pub fn new(speed: f32, lifetime: f32) -> Self {
        Self {
            speed,
            lifetime,
            ..Default::default()
        }
    }

    pub fn with_owner(mut self, tag: impl Into<String>) -> Self {
        self.owner_tag = Some(tag.into());
        self
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Normalizes `forward`; a zero vector keeps the previous direction.
    pub fn with_forward(mut self, forward: Vector3<f32>) -> Self {
        if let Some(f) = forward.try_normalize(f32::EPSILON) {
            self.forward = f;
        }
        self
    }

    /// Arm the projectile: stamp the spawn time and go `Active`.
    pub fn launch(&mut self, now: f32) {
        self.spawn_time = now;
        self.state = ProjectileState::Active;
    }

    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    /// Whether the projectile has lived at least `lifetime` seconds at `now`.
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawn_time >= self.lifetime
    }

    /// Distance covered in a tick of length `dt`.
    pub fn step_distance(&self, dt: f32) -> f32 {
        self.speed * dt
    }
}
