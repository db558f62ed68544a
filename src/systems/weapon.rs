//! Weapon systems.
//!
//! Run once per tick, in this order:
//! 1. [`weapon_fire_system`] – gate the trigger, spawn a projectile from the
//!    pool, start recoil, widen the spread.
//! 2. [`spread_recovery_system`] – narrow the spread after the recovery delay.
//! 3. [`recoil_recovery_system`] – ease the visual offset back to rest while
//!    no recoil task is driving it.
//!
//! Recoil tasks themselves are stepped afterwards by
//! [`crate::systems::recoil::recoil_task_system`].
use bevy_ecs::prelude::*;
use log::{error, warn};
use nalgebra::Vector3;

use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::components::recoil::RecoilTasks;
use crate::components::rotation::Rotation;
use crate::components::weapon::Weapon;
use crate::events::weapon::WeaponFired;
use crate::resources::combatrng::CombatRng;
use crate::resources::input::InputState;
use crate::resources::objectpool::ObjectPool;
use crate::resources::worldtime::WorldTime;

/// Fire every held weapon whose trigger was just pressed and whose cooldown
/// has run out.
#[allow(clippy::too_many_arguments)]
pub fn weapon_fire_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut pool: ResMut<ObjectPool>,
    mut rng: ResMut<CombatRng>,
    mut commands: Commands,
    mut fired: MessageWriter<WeaponFired>,
    mut weapons: Query<(Entity, &MapPosition, &Rotation, &mut Weapon, &mut RecoilTasks)>,
) {
    let now = time.elapsed;
    let pressed = input.trigger_pressed();

    for (entity, position, rotation, mut weapon, mut recoil) in weapons.iter_mut() {
        if !weapon.can_fire(now, pressed) {
            continue;
        }
        if !pool.has_pool(&weapon.bullet_tag) {
            error!("No pool found for bullet tag: {}", weapon.bullet_tag);
            continue;
        }

        weapon.register_shot(now);

        let spread = weapon.sample_spread(&mut rng.rng);
        let (muzzle_position, muzzle_rotation) = weapon.muzzle(position.pos, rotation.quat);
        let shot_rotation = muzzle_rotation * spread;
        let direction = shot_rotation * Vector3::z();

        let Some(projectile) =
            pool.spawn(&mut commands, &weapon.bullet_tag, muzzle_position, shot_rotation)
        else {
            warn!("Weapon {:?}: pool '{}' gave no projectile", entity, weapon.bullet_tag);
            continue;
        };

        let mut bullet = Projectile::new(weapon.bullet_speed, weapon.bullet_lifetime)
            .with_owner(weapon.bullet_tag.clone())
            .with_forward(direction)
            .with_mask(weapon.collision_mask)
            .with_damage(weapon.bullet_damage);
        bullet.launch(now);
        commands.entity(projectile).insert(bullet);

        let task = weapon.start_recoil();
        recoil.start(task, weapon.recoil_restart);

        fired.write(WeaponFired {
            weapon: entity,
            projectile,
            position: muzzle_position,
            direction,
        });

        weapon.grow_spread();
    }
}

pub fn spread_recovery_system(time: Res<WorldTime>, mut weapons: Query<&mut Weapon>) {
    for mut weapon in weapons.iter_mut() {
        weapon.recover_spread(time.elapsed, time.delta);
    }
}

pub fn recoil_recovery_system(time: Res<WorldTime>, mut weapons: Query<&mut Weapon>) {
    for mut weapon in weapons.iter_mut() {
        weapon.recover_recoil(time.delta);
    }
}

/// Advance the `WeaponFired` message buffer. Run once per tick.
pub fn update_weapon_fired_messages(mut msgs: ResMut<Messages<WeaponFired>>) {
    msgs.update();
}
