//! Weapon events.
//!
//! - [`WeaponGrip`] is an observer event carrying the external hold/release
//!   signal; [`weapon_grip_observer`] applies it to the weapon.
//! - [`WeaponFired`] is a buffered message written once per shot for effect
//!   collaborators (muzzle flash, sound). Nothing reads back into the weapon.
use bevy_ecs::message::Message;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;
use nalgebra::Vector3;

use crate::components::weapon::Weapon;

/// Pick up (`held = true`) or put down a weapon.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponGrip {
    pub weapon: Entity,
    pub held: bool,
}

/// A shot left the weapon.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub weapon: Entity,
    pub projectile: Entity,
    /// World-space fire point.
    pub position: Vector3<f32>,
    /// Unit direction of the shot after spread.
    pub direction: Vector3<f32>,
}

pub fn weapon_grip_observer(trigger: On<WeaponGrip>, mut weapons: Query<&mut Weapon>) {
    let grip = trigger.event();
    if let Ok(mut weapon) = weapons.get_mut(grip.weapon) {
        if grip.held {
            weapon.on_hold();
        } else {
            weapon.on_release();
        }
        debug!("Weapon {:?} held: {}", grip.weapon, grip.held);
    }
}
