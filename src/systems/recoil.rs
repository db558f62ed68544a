//! Recoil task driver.
//!
//! Steps every in-flight [`RecoilTask`](crate::components::recoil::RecoilTask)
//! once per tick, oldest first, so the newest task writes the visual offset
//! last. A task that runs out clears the weapon's recoiling flag and is
//! dropped.
use bevy_ecs::prelude::*;

use crate::components::recoil::{RecoilStep, RecoilTasks};
use crate::components::weapon::Weapon;
use crate::resources::worldtime::WorldTime;

pub fn recoil_task_system(
    time: Res<WorldTime>,
    mut weapons: Query<(&mut Weapon, &mut RecoilTasks)>,
) {
    let dt = time.delta;
    for (mut weapon, mut recoil) in weapons.iter_mut() {
        if recoil.is_empty() {
            continue;
        }
        let weapon = &mut *weapon;
        recoil.tasks.retain(|task| {
            match task.step(dt, weapon.current_recoil, &weapon.recoil_curve) {
                RecoilStep::Offset(offset) => {
                    weapon.visual_offset = offset;
                    true
                }
                RecoilStep::Finished => {
                    weapon.is_recoiling = false;
                    false
                }
            }
        });
    }
}
