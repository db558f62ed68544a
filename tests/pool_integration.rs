//! Object pool integration tests: growth, reuse order, activation, hooks.

use bevy_ecs::entity_disabling::Disabled;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use gunline::components::mapposition::MapPosition;
use gunline::components::pooled::Pooled;
use gunline::components::rotation::{Rotation, yaw_pitch};
use gunline::events::pool::ObjectSpawned;
use gunline::resources::objectpool::{ObjectPool, PoolDefinition};
use gunline::resources::worldtime::WorldTime;
use gunline::systems::pool::{pool_release, pool_spawn};

#[derive(Component, Clone, Debug, PartialEq)]
struct Crate(u32);

#[derive(Resource, Default)]
struct SpawnLog(Vec<(Entity, String)>);

fn make_world(initial: usize) -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ObjectPool::new());
    world.init_resource::<SpawnLog>();
    world.add_observer(|spawned: On<ObjectSpawned>, mut log: ResMut<SpawnLog>| {
        let ev = spawned.event();
        log.0.push((ev.entity, ev.tag.clone()));
    });
    world.flush();

    let template = world
        .spawn((Crate(7), MapPosition::default(), Rotation::default(), Disabled))
        .id();
    init(&mut world, &[PoolDefinition::new("Bullet", template, initial)]);
    (world, template)
}

fn init(world: &mut World, definitions: &[PoolDefinition]) {
    world.resource_scope(|world, mut pool: Mut<ObjectPool>| {
        let mut commands = world.commands();
        pool.initialize(&mut commands, definitions);
    });
    world.flush();
}

fn spawn(world: &mut World, tag: &str) -> Option<Entity> {
    pool_spawn(world, tag, Vector3::zeros(), UnitQuaternion::identity())
}

fn pool(world: &World) -> &ObjectPool {
    world.resource::<ObjectPool>()
}

fn is_disabled(world: &World, entity: Entity) -> bool {
    world.entity(entity).contains::<Disabled>()
}

#[test]
fn initialize_precreates_inactive_clones() {
    let (mut world, template) = make_world(3);

    assert!(pool(&world).has_pool("Bullet"));
    assert_eq!(pool(&world).size("Bullet"), 3);
    assert_eq!(pool(&world).active_count("Bullet"), 0);

    for member in pool(&world).members("Bullet") {
        assert_ne!(member, template);
        assert!(is_disabled(&world, member));
        assert_eq!(world.get::<Crate>(member), Some(&Crate(7)));
        assert_eq!(world.get::<Pooled>(member).map(|p| p.tag.as_str()), Some("Bullet"));
    }

    // Disabled members and the template are invisible to ordinary queries.
    assert_eq!(world.query::<&Crate>().iter(&world).count(), 0);
}

#[test]
fn spawn_hands_out_members_in_order() {
    let (mut world, _) = make_world(3);
    let members = pool(&world).members("Bullet");

    let a = spawn(&mut world, "Bullet").unwrap();
    let b = spawn(&mut world, "Bullet").unwrap();
    let c = spawn(&mut world, "Bullet").unwrap();
    assert_eq!(vec![a, b, c], members);
    assert_eq!(pool(&world).size("Bullet"), 3);
}

#[test]
fn spawn_past_initial_count_grows_by_one() {
    let (mut world, _) = make_world(3);
    let first: Vec<Entity> = (0..3).map(|_| spawn(&mut world, "Bullet").unwrap()).collect();
    assert_eq!(pool(&world).size("Bullet"), 3);

    let extra = spawn(&mut world, "Bullet").unwrap();
    assert!(!first.contains(&extra));
    assert_eq!(pool(&world).size("Bullet"), 4);
    assert_eq!(world.get::<Crate>(extra), Some(&Crate(7)));
    assert!(!is_disabled(&world, extra));
}

#[test]
fn three_spawns_in_one_tick_from_pool_of_two() {
    let (mut world, _) = make_world(2);

    let spawned = world.resource_scope(|world, mut pool: Mut<ObjectPool>| {
        let mut commands = world.commands();
        (0..3)
            .map(|_| {
                pool.spawn(&mut commands, "Bullet", Vector3::zeros(), UnitQuaternion::identity())
                    .unwrap()
            })
            .collect::<Vec<_>>()
    });
    world.flush();

    assert_eq!(pool(&world).size("Bullet"), 3);
    assert_ne!(spawned[0], spawned[1]);
    assert_ne!(spawned[1], spawned[2]);
    assert_ne!(spawned[0], spawned[2]);
    for e in &spawned {
        assert!(pool(&world).is_active("Bullet", *e));
        assert!(!is_disabled(&world, *e));
    }
}

#[test]
fn release_then_spawn_returns_released_entity() {
    let (mut world, _) = make_world(2);
    let a = spawn(&mut world, "Bullet").unwrap();
    let b = spawn(&mut world, "Bullet").unwrap();

    pool_release(&mut world, "Bullet", b);
    assert!(is_disabled(&world, b));
    assert!(!pool(&world).is_active("Bullet", b));

    let again = spawn(&mut world, "Bullet").unwrap();
    assert_eq!(again, b);
    assert_eq!(pool(&world).size("Bullet"), 2);

    pool_release(&mut world, "Bullet", a);
    assert_eq!(spawn(&mut world, "Bullet"), Some(a));
    assert_eq!(pool(&world).size("Bullet"), 2);
}

#[test]
fn most_recent_release_comes_back_first() {
    let (mut world, _) = make_world(3);
    let a = spawn(&mut world, "Bullet").unwrap();
    let b = spawn(&mut world, "Bullet").unwrap();
    pool_release(&mut world, "Bullet", a);
    pool_release(&mut world, "Bullet", b);
    assert_eq!(spawn(&mut world, "Bullet"), Some(b));
    assert_eq!(spawn(&mut world, "Bullet"), Some(a));
}

#[test]
fn pool_never_shrinks() {
    let (mut world, _) = make_world(1);
    let spawned: Vec<Entity> = (0..4).map(|_| spawn(&mut world, "Bullet").unwrap()).collect();
    for e in spawned {
        pool_release(&mut world, "Bullet", e);
    }
    assert_eq!(pool(&world).size("Bullet"), 4);
    assert_eq!(pool(&world).active_count("Bullet"), 0);
}

#[test]
fn spawn_places_and_orients_member() {
    let (mut world, _) = make_world(1);
    let q = yaw_pitch(45.0, 10.0);
    let e = pool_spawn(&mut world, "Bullet", Vector3::new(1.0, 2.0, 3.0), q).unwrap();

    assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(world.get::<Rotation>(e).unwrap().quat, q);
    assert_eq!(world.query::<&Crate>().iter(&world).count(), 1);
}

#[test]
fn spawn_triggers_hook_with_tag() {
    let (mut world, _) = make_world(1);
    let e = spawn(&mut world, "Bullet").unwrap();
    let log = &world.resource::<SpawnLog>().0;
    assert_eq!(log.as_slice(), &[(e, "Bullet".to_string())]);
}

#[test]
fn unknown_tag_is_a_logged_no_op() {
    let (mut world, _) = make_world(2);

    assert!(!pool(&world).has_pool("Rocket"));
    assert_eq!(pool(&world).size("Rocket"), 0);
    assert_eq!(spawn(&mut world, "Rocket"), None);

    let a = spawn(&mut world, "Bullet").unwrap();
    pool_release(&mut world, "Rocket", a);
    assert!(pool(&world).is_active("Bullet", a));
    assert!(!is_disabled(&world, a));
    assert_eq!(world.resource::<SpawnLog>().0.len(), 1);
}

#[test]
fn missing_template_skips_definition() {
    let (mut world, _) = make_world(1);
    let gone = world.spawn(Crate(1)).id();
    world.despawn(gone);

    init(
        &mut world,
        &[PoolDefinition::new("Ghost", gone, 3)],
    );
    assert!(!pool(&world).has_pool("Ghost"));
    assert_eq!(spawn(&mut world, "Ghost"), None);
}

#[test]
fn duplicate_tag_keeps_first_definition() {
    let (mut world, _) = make_world(2);
    let other = world.spawn((Crate(9), Disabled)).id();
    init(&mut world, &[PoolDefinition::new("Bullet", other, 5)]);
    assert_eq!(pool(&world).size("Bullet"), 2);
}

#[test]
fn releasing_a_stranger_only_disables_it() {
    let (mut world, _) = make_world(2);
    let stranger = world.spawn(Crate(3)).id();
    pool_release(&mut world, "Bullet", stranger);

    assert!(is_disabled(&world, stranger));
    assert!(!pool(&world).contains("Bullet", stranger));
    assert_eq!(pool(&world).size("Bullet"), 2);
}

#[test]
fn empty_pool_grows_on_first_spawn() {
    let (mut world, _) = make_world(0);
    assert_eq!(pool(&world).size("Bullet"), 0);
    let e = spawn(&mut world, "Bullet").unwrap();
    assert_eq!(pool(&world).size("Bullet"), 1);
    assert!(pool(&world).is_active("Bullet", e));
}
