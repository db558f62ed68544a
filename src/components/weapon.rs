//! Semi-automatic weapon state.
//!
//! A [`Weapon`] fires one pooled projectile per fresh trigger press, at most
//! once per `fire_rate` seconds, and only while held. Each shot widens the
//! aim cone ("spread") up to `max_spread`; after `spread_recovery_delay`
//! seconds without firing the cone narrows back to `base_spread`. Shots also
//! kick the weapon's visual offset back (see [`crate::components::recoil`]).
//!
//! The pure state transitions live here so they can be tested without a
//! world. The ECS plumbing is in [`crate::systems::weapon`].
//!
//! Invariant: `base_spread ≤ current_spread ≤ max_spread`.

use bevy_ecs::prelude::Component;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::collisionlayer::Layers;
use crate::components::mapposition::MapPosition;
use crate::components::recoil::{RecoilCurve, RecoilRestart, RecoilTask, RecoilTasks};
use crate::components::rotation::{Rotation, yaw_pitch};

pub const MIN_FIRE_RATE: f32 = 0.1;
pub const MIN_BULLET_SPEED: f32 = 1.0;

/// Static weapon parameters, as read from configuration.
#[derive(Debug, Clone)]
pub struct WeaponSettings {
    pub bullet_tag: String,
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_damage: i32,
    pub collision_mask: u32,
    pub base_spread: f32,
    pub max_spread: f32,
    pub spread_increase_per_shot: f32,
    pub spread_recovery_rate: f32,
    pub spread_recovery_delay: f32,
    pub recoil_force: f32,
    pub recoil_recovery_speed: f32,
    pub recoil_curve: RecoilCurve,
    pub recoil_restart: RecoilRestart,
}

impl Default for WeaponSettings {
    fn default() -> Self {
        Self {
            bullet_tag: "Bullet".to_string(),
            fire_rate: 0.2,
            bullet_speed: 30.0,
            bullet_lifetime: 3.0,
            bullet_damage: 1,
            collision_mask: Layers::ALL,
            base_spread: 1.0,
            max_spread: 5.0,
            spread_increase_per_shot: 0.5,
            spread_recovery_rate: 2.0,
            spread_recovery_delay: 0.5,
            recoil_force: 2.0,
            recoil_recovery_speed: 5.0,
            recoil_curve: RecoilCurve::default(),
            recoil_restart: RecoilRestart::default(),
        }
    }
}

#[derive(Component, Debug, Clone)]
#[require(MapPosition, Rotation, RecoilTasks)]
pub struct Weapon {
    pub bullet_tag: String,
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_damage: i32,
    pub collision_mask: u32,
    /// Fire point relative to the weapon, in local space.
    pub muzzle_offset: Vector3<f32>,

    pub base_spread: f32,
    pub max_spread: f32,
    pub spread_increase_per_shot: f32,
    pub spread_recovery_rate: f32,
    pub spread_recovery_delay: f32,
    pub current_spread: f32,
    pub last_shot_time: f32,
    pub next_fire_time: f32,

    pub recoil_force: f32,
    pub recoil_recovery_speed: f32,
    pub recoil_curve: RecoilCurve,
    pub recoil_restart: RecoilRestart,
    pub current_recoil: f32,
    pub is_held: bool,
    pub is_recoiling: bool,
    /// Offset the newest recoil task started from.
    pub recoil_origin: Vector3<f32>,
    /// Recoil displacement in local space; zero is the rest position.
    pub visual_offset: Vector3<f32>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::from_settings(&WeaponSettings::default())
    }
}

impl Weapon {
    pub fn from_settings(s: &WeaponSettings) -> Self {
        let mut weapon = Self {
            bullet_tag: s.bullet_tag.clone(),
            fire_rate: MIN_FIRE_RATE,
            bullet_speed: MIN_BULLET_SPEED,
            bullet_lifetime: s.bullet_lifetime,
            bullet_damage: s.bullet_damage,
            collision_mask: s.collision_mask,
            muzzle_offset: Vector3::zeros(),
            base_spread: 0.0,
            max_spread: 0.0,
            spread_increase_per_shot: 0.0,
            spread_recovery_rate: s.spread_recovery_rate.max(0.0),
            spread_recovery_delay: s.spread_recovery_delay.max(0.0),
            current_spread: 0.0,
            last_shot_time: 0.0,
            next_fire_time: 0.0,
            recoil_force: s.recoil_force,
            recoil_recovery_speed: s.recoil_recovery_speed.max(0.0),
            recoil_curve: s.recoil_curve.clone(),
            recoil_restart: s.recoil_restart,
            current_recoil: 0.0,
            is_held: false,
            is_recoiling: false,
            recoil_origin: Vector3::zeros(),
            visual_offset: Vector3::zeros(),
        };
        weapon.set_fire_rate(s.fire_rate);
        weapon.set_bullet_speed(s.bullet_speed);
        weapon.set_spread_settings(s.base_spread, s.max_spread, s.spread_increase_per_shot);
        weapon.current_spread = weapon.base_spread;
        weapon
    }

    pub fn with_muzzle_offset(mut self, offset: Vector3<f32>) -> Self {
        self.muzzle_offset = offset;
        self
    }

    pub fn held(mut self) -> Self {
        self.is_held = true;
        self
    }

    pub fn set_held(&mut self, held: bool) {
        self.is_held = held;
    }

    pub fn on_hold(&mut self) {
        self.set_held(true);
    }

    pub fn on_release(&mut self) {
        self.set_held(false);
    }

    /// Seconds between shots, never below [`MIN_FIRE_RATE`].
    pub fn set_fire_rate(&mut self, rate: f32) {
        self.fire_rate = rate.max(MIN_FIRE_RATE);
    }

    /// Projectile speed, never below [`MIN_BULLET_SPEED`].
    pub fn set_bullet_speed(&mut self, speed: f32) {
        self.bullet_speed = speed.max(MIN_BULLET_SPEED);
    }

    /// Replace the spread range. Negative values clamp to zero, `max` is
    /// raised to at least `base`, and the current spread is pulled into the
    /// new range.
    pub fn set_spread_settings(&mut self, base: f32, max: f32, increase: f32) {
        self.base_spread = base.max(0.0);
        self.max_spread = max.max(self.base_spread);
        self.spread_increase_per_shot = increase.max(0.0);
        self.current_spread = self.current_spread.clamp(self.base_spread, self.max_spread);
    }

    /// Held, freshly pressed, and off cooldown.
    pub fn can_fire(&self, now: f32, trigger_pressed: bool) -> bool {
        self.is_held && trigger_pressed && now >= self.next_fire_time
    }

    /// Start the cooldown for a shot taken at `now`.
    pub fn register_shot(&mut self, now: f32) {
        self.next_fire_time = now + self.fire_rate;
        self.last_shot_time = now;
    }

    /// Random rotation within the current cone. Pitch and yaw are drawn
    /// independently from `[-current_spread, current_spread]` degrees.
    pub fn sample_spread(&self, rng: &mut fastrand::Rng) -> UnitQuaternion<f32> {
        let s = self.current_spread;
        let pitch = (rng.f32() * 2.0 - 1.0) * s;
        let yaw = (rng.f32() * 2.0 - 1.0) * s;
        yaw_pitch(yaw, pitch)
    }

    pub fn grow_spread(&mut self) {
        self.current_spread = (self.current_spread + self.spread_increase_per_shot).min(self.max_spread);
    }

    /// Narrow the cone toward `base_spread` once the recovery delay has passed.
    pub fn recover_spread(&mut self, now: f32, dt: f32) {
        if now - self.last_shot_time > self.spread_recovery_delay {
            self.current_spread = move_towards(
                self.current_spread,
                self.base_spread,
                self.spread_recovery_rate * dt,
            );
        }
    }

    /// Reset the kick and hand back a task running for one fire interval.
    pub fn start_recoil(&mut self) -> RecoilTask {
        self.current_recoil = self.recoil_force;
        self.is_recoiling = true;
        self.recoil_origin = self.visual_offset;
        RecoilTask::new(self.fire_rate, self.recoil_origin)
    }

    /// Ease the visual offset back to rest while no task is recoiling.
    pub fn recover_recoil(&mut self, dt: f32) {
        if self.is_recoiling {
            return;
        }
        let t = (self.recoil_recovery_speed * dt).clamp(0.0, 1.0);
        self.visual_offset = self.visual_offset.lerp(&Vector3::zeros(), t);
    }

    /// World-space fire point and orientation for a weapon at `position`
    /// facing `orientation`.
    pub fn muzzle(
        &self,
        position: Vector3<f32>,
        orientation: UnitQuaternion<f32>,
    ) -> (Vector3<f32>, UnitQuaternion<f32>) {
        (position + orientation * self.muzzle_offset, orientation)
    }
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}
