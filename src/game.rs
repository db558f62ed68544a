//! Simulation setup and the per-tick driver.
//!
//! [`build_world`] inserts every resource and observer the combat systems
//! need, registers the stock templates, and creates the configured pools.
//! [`build_schedule`] chains the per-tick systems in their fixed order, and
//! [`tick`] advances time, feeds the trigger level, and runs the schedule.
//!
//! The `spawn_*` helpers and [`range_report`] exist for the headless firing
//! range in `main.rs` and for integration tests.

use std::collections::BTreeMap;

use bevy_ecs::entity_disabling::Disabled;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;
use nalgebra::{UnitQuaternion, Vector3};
use serde::Serialize;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::{CollisionLayer, Layers};
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::components::rotation::Rotation;
use crate::components::weapon::{Weapon, WeaponSettings};
use crate::events::projectile::{ProjectileHit, observe_projectile_damage};
use crate::events::weapon::{WeaponFired, WeaponGrip, weapon_grip_observer};
use crate::resources::combatconfig::CombatConfig;
use crate::resources::combatrng::CombatRng;
use crate::resources::input::InputState;
use crate::resources::objectpool::ObjectPool;
use crate::resources::templatestore::TemplateStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::pool::init_object_pools;
use crate::systems::projectile::{projectile_spawn_observer, projectile_update_system};
use crate::systems::recoil::recoil_task_system;
use crate::systems::time::update_world_time;
use crate::systems::weapon::{
    recoil_recovery_system, spread_recovery_system, update_weapon_fired_messages,
    weapon_fire_system,
};

/// Template key of the stock projectile.
pub const BULLET_TEMPLATE: &str = "bullet";

/// Running totals for the firing range.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeStats {
    pub shots: u32,
    pub hits: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolReport {
    pub size: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub ticks: u64,
    pub elapsed: f32,
    pub shots: u32,
    pub hits: u32,
    pub targets_destroyed: usize,
    pub final_spread: f32,
    pub pools: BTreeMap<String, PoolReport>,
}

/// Build a world ready to tick: resources, observers, templates, pools.
pub fn build_world(config: CombatConfig, seed: Option<u64>) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(ObjectPool::new());
    world.insert_resource(TemplateStore::new());
    world.insert_resource(RangeStats::default());
    world.insert_resource(seed.map_or_else(CombatRng::default, CombatRng::with_seed));
    world.init_resource::<Messages<WeaponFired>>();
    world.insert_resource(config);

    world.spawn(Observer::new(projectile_spawn_observer));
    world.spawn(Observer::new(observe_projectile_damage));
    world.spawn(Observer::new(weapon_grip_observer));
    world.spawn(Observer::new(count_hits_observer));
    // Ensure observers are registered before anything can trigger events.
    world.flush();

    register_template(
        &mut world,
        BULLET_TEMPLATE,
        (Projectile::default(), MapPosition::default(), Rotation::default()),
    );
    init_pools(&mut world);
    world
}

/// Spawn `bundle` as an inert template and register it under `key`.
pub fn register_template<B: Bundle>(world: &mut World, key: &str, bundle: B) -> Entity {
    let entity = world.spawn((bundle, Disabled)).id();
    world.resource_mut::<TemplateStore>().insert(key, entity);
    entity
}

/// Create every configured pool. Call again after registering templates a
/// custom config refers to; already created pools are left alone.
pub fn init_pools(world: &mut World) {
    let mut startup = Schedule::default();
    startup.add_systems(init_object_pools);
    startup.run(world);
}

/// Per-tick systems in their fixed order.
///
/// Projectiles update before weapons fire, so a projectile first moves on
/// the tick after it was launched.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_weapon_fired_messages,
            projectile_update_system,
            weapon_fire_system,
            count_shots_system,
            spread_recovery_system,
            recoil_recovery_system,
            recoil_task_system,
        )
            .chain(),
    );
    update
}

/// Advance one tick of `dt` seconds with the trigger at `trigger_down`.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32, trigger_down: bool) {
    update_world_time(world, dt);
    world.resource_mut::<InputState>().set_trigger(trigger_down);
    schedule.run(world);
}

pub fn spawn_weapon(
    world: &mut World,
    settings: &WeaponSettings,
    position: Vector3<f32>,
    orientation: UnitQuaternion<f32>,
) -> Entity {
    world
        .spawn((
            Weapon::from_settings(settings),
            MapPosition::from_vec(position),
            Rotation::new(orientation),
        ))
        .id()
}

pub fn set_weapon_held(world: &mut World, weapon: Entity, held: bool) {
    world.trigger(WeaponGrip { weapon, held });
}

/// Damageable box centered on `position`.
pub fn spawn_target(
    world: &mut World,
    position: Vector3<f32>,
    size: Vector3<f32>,
    layer: u32,
    hp: i32,
) -> Entity {
    world
        .spawn((
            MapPosition::from_vec(position),
            BoxCollider::centered(size.x, size.y, size.z),
            CollisionLayer::new(layer),
            Health::new(hp),
        ))
        .id()
}

/// A row of enemy targets down range with a wall behind them.
pub fn spawn_firing_range(world: &mut World) -> Vec<Entity> {
    let mut targets: Vec<Entity> = (-2..=2)
        .map(|i| {
            spawn_target(
                world,
                Vector3::new(i as f32 * 3.0, 0.0, 20.0),
                Vector3::new(2.0, 2.0, 1.0),
                Layers::ENEMY,
                3,
            )
        })
        .collect();
    let wall = world
        .spawn((
            MapPosition::new(0.0, 0.0, 40.0),
            BoxCollider::centered(60.0, 30.0, 2.0),
            CollisionLayer::new(Layers::ENVIRONMENT),
        ))
        .id();
    targets.push(wall);
    info!("Firing range ready with {} colliders", targets.len());
    targets
}

pub fn range_report(world: &mut World, weapon: Entity) -> RangeReport {
    let targets_destroyed = world
        .query::<&Health>()
        .iter(world)
        .filter(|h| !h.is_alive())
        .count();
    let time = *world.resource::<WorldTime>();
    let stats = world.resource::<RangeStats>().clone();
    let pool = world.resource::<ObjectPool>();
    let pools = pool
        .tags()
        .map(|tag| {
            (
                tag.to_string(),
                PoolReport {
                    size: pool.size(tag),
                    active: pool.active_count(tag),
                },
            )
        })
        .collect();
    let final_spread = world
        .get::<Weapon>(weapon)
        .map_or(0.0, |w| w.current_spread);

    RangeReport {
        ticks: time.frame_count,
        elapsed: time.elapsed,
        shots: stats.shots,
        hits: stats.hits,
        targets_destroyed,
        final_spread,
        pools,
    }
}

fn count_shots_system(mut fired: MessageReader<WeaponFired>, mut stats: ResMut<RangeStats>) {
    stats.shots += fired.read().count() as u32;
}

fn count_hits_observer(_trigger: On<ProjectileHit>, mut stats: ResMut<RangeStats>) {
    stats.hits += 1;
}
