//! Projectile integration tests: flight, expiry, swept hits, pool return.

use bevy_ecs::entity_disabling::Disabled;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use gunline::components::boxcollider::BoxCollider;
use gunline::components::collisionlayer::{CollisionLayer, Layers};
use gunline::components::health::Health;
use gunline::components::mapposition::MapPosition;
use gunline::components::projectile::{Projectile, ProjectileState};
use gunline::components::rotation::{Rotation, yaw_pitch};
use gunline::events::projectile::{ProjectileHit, observe_projectile_damage};
use gunline::resources::objectpool::{ObjectPool, PoolDefinition};
use gunline::resources::worldtime::WorldTime;
use gunline::systems::pool::pool_spawn;
use gunline::systems::projectile::{projectile_spawn_observer, projectile_update_system};
use gunline::systems::time::update_world_time;

const EPSILON: f32 = 1e-5;
const DT: f32 = 0.25;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct Hits(Vec<ProjectileHit>);

/// World with a "Bullet" pool of two projectiles flying +Z at 10 units/s.
fn make_world(lifetime: f32, mask: u32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ObjectPool::new());
    world.init_resource::<Hits>();
    world.spawn(Observer::new(projectile_spawn_observer));
    world.spawn(Observer::new(observe_projectile_damage));
    world.add_observer(|hit: On<ProjectileHit>, mut hits: ResMut<Hits>| {
        hits.0.push(*hit.event());
    });
    world.flush();

    let template = world
        .spawn((
            Projectile::new(10.0, lifetime).with_mask(mask).with_damage(2),
            MapPosition::default(),
            Rotation::default(),
            Disabled,
        ))
        .id();
    world.resource_scope(|world, mut pool: Mut<ObjectPool>| {
        let mut commands = world.commands();
        pool.initialize(&mut commands, &[PoolDefinition::new("Bullet", template, 2)]);
    });
    world.flush();
    world
}

fn fire(world: &mut World) -> Entity {
    pool_spawn(world, "Bullet", Vector3::zeros(), UnitQuaternion::identity()).unwrap()
}

fn tick(world: &mut World) {
    update_world_time(world, DT);
    let mut schedule = Schedule::default();
    schedule.add_systems(projectile_update_system);
    schedule.run(world);
}

fn target(world: &mut World, z: f32, layer: u32, hp: i32) -> Entity {
    world
        .spawn((
            MapPosition::new(0.0, 0.0, z),
            BoxCollider::centered(2.0, 2.0, 2.0),
            CollisionLayer::new(layer),
            Health::new(hp),
        ))
        .id()
}

fn state(world: &World, e: Entity) -> ProjectileState {
    world.get::<Projectile>(e).unwrap().state
}

fn z(world: &World, e: Entity) -> f32 {
    world.get::<MapPosition>(e).unwrap().pos.z
}

#[test]
fn spawn_hook_arms_projectile() {
    let mut world = make_world(1.0, Layers::ALL);
    update_world_time(&mut world, 0.5);
    let p = fire(&mut world);

    let projectile = world.get::<Projectile>(p).unwrap();
    assert_eq!(projectile.state, ProjectileState::Active);
    assert_eq!(projectile.owner_tag.as_deref(), Some("Bullet"));
    assert!(approx_eq(projectile.spawn_time, 0.5));
}

#[test]
fn moves_forward_each_tick() {
    let mut world = make_world(1.0, Layers::ALL);
    let p = fire(&mut world);
    tick(&mut world);
    assert!(approx_eq(z(&world, p), 2.5));
    tick(&mut world);
    assert!(approx_eq(z(&world, p), 5.0));
}

#[test]
fn flies_along_spawn_orientation() {
    let mut world = make_world(0.5, Layers::ALL);
    let p = pool_spawn(&mut world, "Bullet", Vector3::zeros(), yaw_pitch(90.0, 0.0)).unwrap();
    tick(&mut world);
    let pos = world.get::<MapPosition>(p).unwrap().pos;
    assert!((pos - Vector3::new(2.5, 0.0, 0.0)).norm() < 1e-4);

    // Reused member takes the heading of its new spawn, not the last one.
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Inactive);
    let again = fire(&mut world);
    assert_eq!(again, p);
    tick(&mut world);
    let pos = world.get::<MapPosition>(p).unwrap().pos;
    assert!((pos - Vector3::new(0.0, 0.0, 2.5)).norm() < 1e-4);
}

#[test]
fn expires_exactly_when_lifetime_elapses() {
    let mut world = make_world(1.0, Layers::ALL);
    let p = fire(&mut world);

    for _ in 0..3 {
        tick(&mut world);
        assert_eq!(state(&world, p), ProjectileState::Active);
        assert!(!world.entity(p).contains::<Disabled>());
    }
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Inactive);
    assert!(world.entity(p).contains::<Disabled>());

    let pool = world.resource::<ObjectPool>();
    assert_eq!(pool.active_count("Bullet"), 0);
    assert!(world.resource::<Hits>().0.is_empty());
}

#[test]
fn hit_returns_to_pool_before_lifetime() {
    let mut world = make_world(3.0, Layers::ALL);
    let wall = target(&mut world, 5.0, Layers::ENEMY, 5);
    let p = fire(&mut world);

    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Active);
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Inactive);
    assert!(world.entity(p).contains::<Disabled>());

    let hits = &world.resource::<Hits>().0;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].projectile, p);
    assert_eq!(hits[0].target, wall);
    assert!(approx_eq(hits[0].distance, 1.5));
    assert!(approx_eq(hits[0].point.z, 4.0));
    assert_eq!(world.get::<Health>(wall).unwrap().hp, 3);
}

#[test]
fn expiry_wins_over_collision_on_same_tick() {
    let mut world = make_world(0.5, Layers::ALL);
    let wall = target(&mut world, 5.0, Layers::ENEMY, 5);
    let p = fire(&mut world);

    tick(&mut world);
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Inactive);
    assert!(world.resource::<Hits>().0.is_empty());
    assert_eq!(world.get::<Health>(wall).unwrap().hp, 5);
}

#[test]
fn mask_filters_colliders() {
    let mut world = make_world(3.0, Layers::ENEMY);
    target(&mut world, 5.0, Layers::ENVIRONMENT, 5);
    let p = fire(&mut world);

    for _ in 0..4 {
        tick(&mut world);
    }
    assert_eq!(state(&world, p), ProjectileState::Active);
    assert!(approx_eq(z(&world, p), 10.0));
    assert!(world.resource::<Hits>().0.is_empty());
}

#[test]
fn nearest_collider_wins() {
    let mut world = make_world(3.0, Layers::ALL);
    let far = target(&mut world, 5.5, Layers::ENEMY, 5);
    let near = target(&mut world, 3.5, Layers::ENEMY, 5);
    fire(&mut world);

    tick(&mut world);
    tick(&mut world);
    let hits = &world.resource::<Hits>().0;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, near);
    assert_ne!(hits[0].target, far);
}

#[test]
fn disabled_colliders_are_ignored() {
    let mut world = make_world(3.0, Layers::ALL);
    let wall = target(&mut world, 5.0, Layers::ENEMY, 5);
    world.entity_mut(wall).insert(Disabled);
    let p = fire(&mut world);

    tick(&mut world);
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Active);
}

#[test]
fn projectile_without_pool_disables_itself() {
    let mut world = make_world(0.5, Layers::ALL);
    let mut projectile = Projectile::new(10.0, 0.5);
    projectile.launch(0.0);
    let p = world.spawn((projectile, MapPosition::default())).id();

    tick(&mut world);
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Inactive);
    assert!(world.entity(p).contains::<Disabled>());
    assert_eq!(world.resource::<ObjectPool>().size("Bullet"), 2);
}

#[test]
fn inactive_projectile_stays_put() {
    let mut world = make_world(3.0, Layers::ALL);
    let p = world
        .spawn((Projectile::new(10.0, 3.0), MapPosition::default()))
        .id();
    tick(&mut world);
    assert!(approx_eq(z(&world, p), 0.0));
    assert_eq!(state(&world, p), ProjectileState::Inactive);
}

#[test]
fn respawn_restamps_spawn_time() {
    let mut world = make_world(0.5, Layers::ALL);
    let p = fire(&mut world);
    tick(&mut world);
    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Inactive);

    tick(&mut world);
    let again = pool_spawn(
        &mut world,
        "Bullet",
        Vector3::new(0.0, 0.0, -1.0),
        UnitQuaternion::identity(),
    )
    .unwrap();
    assert_eq!(again, p);

    let projectile = world.get::<Projectile>(p).unwrap();
    assert_eq!(projectile.state, ProjectileState::Active);
    assert!(approx_eq(projectile.spawn_time, 0.75));
    assert!(approx_eq(z(&world, p), -1.0));

    tick(&mut world);
    assert_eq!(state(&world, p), ProjectileState::Active);
}
