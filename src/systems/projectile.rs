//! Projectile systems.
//!
//! - [`projectile_update_system`] moves every active projectile, expires the
//!   ones that outlived their lifetime, and sweeps the rest against
//!   colliders. Finished projectiles go back to their pool.
//! - [`projectile_spawn_observer`] rearms a pooled projectile whenever the
//!   pool lends it out and points it along its new [`Rotation`].
//!
//! Expiry is checked before collision, so a projectile that would both
//! expire and hit on the same tick counts as expired.
use bevy_ecs::entity_disabling::Disabled;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use nalgebra::Vector3;

use crate::components::boxcollider::{BoxCollider, SegmentHit};
use crate::components::collisionlayer::CollisionLayer;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::{Projectile, ProjectileState};
use crate::components::rotation::Rotation;
use crate::events::pool::ObjectSpawned;
use crate::events::projectile::ProjectileHit;
use crate::resources::objectpool::ObjectPool;
use crate::resources::worldtime::WorldTime;

type ColliderQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static MapPosition, &'static BoxCollider, &'static CollisionLayer),
    Without<Projectile>,
>;

/// Advance, expire, and collide every active projectile.
pub fn projectile_update_system(
    time: Res<WorldTime>,
    mut pool: ResMut<ObjectPool>,
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut MapPosition, &mut Projectile)>,
    colliders: ColliderQuery,
) {
    let now = time.elapsed;
    let dt = time.delta;

    for (entity, mut position, mut projectile) in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }

        let start = position.pos;
        let distance = projectile.step_distance(dt);
        position.pos += projectile.forward * distance;

        if projectile.is_expired(now) {
            projectile.state = ProjectileState::Expired;
            return_to_pool(entity, &mut projectile, &mut pool, &mut commands);
            continue;
        }

        let Some((target, hit)) = sweep(
            start,
            projectile.forward,
            distance,
            projectile.collision_mask,
            &colliders,
        ) else {
            continue;
        };

        projectile.state = ProjectileState::Collided;
        commands.trigger(ProjectileHit {
            projectile: entity,
            target,
            point: hit.point,
            distance: hit.distance,
            damage: projectile.damage,
        });
        return_to_pool(entity, &mut projectile, &mut pool, &mut commands);
    }
}

/// Nearest collider on `mask` crossed by the segment.
fn sweep(
    origin: Vector3<f32>,
    direction: Vector3<f32>,
    distance: f32,
    mask: u32,
    colliders: &ColliderQuery,
) -> Option<(Entity, SegmentHit)> {
    colliders
        .iter()
        .filter(|(_, _, _, layer)| layer.matches(mask))
        .filter_map(|(entity, position, collider, _)| {
            collider
                .intersect_segment(position.pos, origin, direction, distance)
                .map(|hit| (entity, hit))
        })
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

fn return_to_pool(
    entity: Entity,
    projectile: &mut Projectile,
    pool: &mut ObjectPool,
    commands: &mut Commands,
) {
    match projectile.owner_tag.as_deref() {
        Some(tag) => pool.release(commands, tag, entity),
        None => {
            commands.entity(entity).insert(Disabled);
        }
    }
    projectile.state = ProjectileState::Inactive;
}

/// Restamp and arm a projectile the pool just lent out, aimed along the
/// orientation it was spawned with.
pub fn projectile_spawn_observer(
    trigger: On<ObjectSpawned>,
    time: Res<WorldTime>,
    mut projectiles: Query<(&mut Projectile, Option<&Rotation>)>,
) {
    let spawned = trigger.event();
    if let Ok((mut projectile, rotation)) = projectiles.get_mut(spawned.entity) {
        if let Some(rotation) = rotation {
            projectile.forward = rotation.forward();
        }
        projectile.owner_tag = Some(spawned.tag.clone());
        projectile.launch(time.elapsed);
    }
}
