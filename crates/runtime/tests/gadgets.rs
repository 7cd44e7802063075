//! End-to-end item scenarios on the sandbox world, driven synchronously.

use std::sync::Arc;

use gadget_core::{
    BlockKind, BlockPos, Catalog, ItemRegistry, Location, Resolution, StatusKind, Tick, Vec3,
    World,
};
use gadget_runtime::{
    ActivationOutcome, GadgetServer, InteractAction, NO_TARGET_MESSAGE, SandboxWorld,
};

fn registry() -> Arc<ItemRegistry> {
    Arc::new(Catalog::default().build_registry("gadgets").expect("default catalog"))
}

fn server_with(world: SandboxWorld) -> GadgetServer<SandboxWorld> {
    GadgetServer::new(registry(), world)
}

fn count(server: &GadgetServer<SandboxWorld>, actor: gadget_core::ActorId, id: &str) -> u32 {
    let registry = Arc::clone(server.registry());
    server
        .world()
        .count_items(actor, |stack| registry.read_tag(stack).is_some_and(|tag| tag.as_str() == id))
}

/// Ticks until a tracker resolves, returning the tick and how.
fn run_until_resolved(
    server: &mut GadgetServer<SandboxWorld>,
    limit: u32,
) -> Option<(Tick, Resolution)> {
    for _ in 0..limit {
        let report = server.tick();
        if let Some((_, resolution)) = report.resolved.first() {
            return Some((report.tick, *resolution));
        }
    }
    None
}

#[test]
fn molotov_burns_on_landing_and_burns_out() {
    let mut world = SandboxWorld::new();
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    world.look_at(alex, BlockPos::new(0, 63, 8).center());
    let mut server = server_with(world);

    server.give(None, &["give", "alex", "molotov", "2"]).unwrap();
    let outcome = server.interact(alex, InteractAction::RightClickAir);
    assert!(matches!(outcome, ActivationOutcome::Thrown { .. }), "{outcome:?}");
    assert_eq!(count(&server, alex, "molotov"), 1);
    assert_eq!(server.world().live_objects(), 1);
    assert!(server.world().messages_for(alex).contains(&"Molotov thrown!"));

    let (landed_at, resolution) = run_until_resolved(&mut server, 100).expect("tracker resolves");
    assert!(matches!(resolution, Resolution::Landed(_)), "{resolution:?}");
    assert!(landed_at >= Tick(11));
    assert_eq!(server.world().live_objects(), 0);

    let burning = server.world().burning_cells();
    assert_eq!(burning.len(), 25);
    assert_eq!(server.scheduler().pending_tasks(), 1);

    server.advance(59);
    assert_eq!(server.world().burning_cells(), burning);
    server.advance(1);
    assert!(server.world().burning_cells().is_empty());
    assert_eq!(server.scheduler().pending_tasks(), 0);
}

#[test]
fn no_target_leaves_the_stack_alone() {
    let mut world = SandboxWorld::new();
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    world.set_facing(alex, Vec3::new(0.0, 1.0, 0.0));
    let mut server = server_with(world);

    server.give(None, &["give", "alex", "teargas", "3"]).unwrap();
    let outcome = server.interact(alex, InteractAction::RightClickBlock);

    assert!(matches!(outcome, ActivationOutcome::NoValidTarget { .. }));
    assert_eq!(count(&server, alex, "teargas"), 3);
    assert_eq!(server.world().messages_for(alex).last(), Some(&NO_TARGET_MESSAGE));
    assert_eq!(server.world().live_objects(), 0);
    assert_eq!(server.scheduler().live_trackers(), 0);
}

#[test]
fn tear_gas_cloud_doses_bystanders() {
    let mut world = SandboxWorld::new();
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    let sam = world.add_actor("sam", Location::new(30.5, 64.0, 30.5));
    world.look_at(alex, BlockPos::new(0, 63, 6).center());
    let mut server = server_with(world);

    server.give(None, &["give", "alex", "teargas"]).unwrap();
    server.interact(alex, InteractAction::RightClickAir);

    let (_, resolution) = run_until_resolved(&mut server, 100).expect("tracker resolves");
    let Resolution::Landed(at) = resolution else {
        panic!("canister should settle, got {resolution:?}");
    };
    assert_eq!(server.world().clouds().len(), 1);
    assert_eq!(server.world().clouds()[0].source, Some(alex));

    server.world_mut().teleport(sam, at);
    server.advance(10);
    let kinds: Vec<_> = server
        .world()
        .statuses_for(sam)
        .into_iter()
        .map(|effect| effect.kind)
        .collect();
    assert_eq!(kinds, vec![StatusKind::Poison, StatusKind::Nausea]);
}

#[test]
fn grenade_detonates_immediately() {
    let mut world = SandboxWorld::new();
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    world.look_at(alex, BlockPos::new(0, 63, 12).center());
    let mut server = server_with(world);

    server.give(None, &["give", "alex", "grenade", "5"]).unwrap();
    let outcome = server.interact(alex, InteractAction::RightClickAir);

    let ActivationOutcome::Thrown { target, .. } = outcome else {
        panic!("grenade should be thrown, got {outcome:?}");
    };
    assert_eq!(server.world().explosions().len(), 1);
    assert_eq!(server.world().explosions()[0].0, target);
    assert_eq!(count(&server, alex, "grenade"), 4);
    assert_eq!(server.scheduler().live_trackers(), 0);
}

#[test]
fn failsafe_fires_for_an_object_that_never_lands() {
    // A lone block to aim at; once it is gone there is nothing to land on.
    let aim = BlockPos::new(0, 90, 10);
    let mut world = SandboxWorld::empty();
    world.set_block(aim, BlockKind::Solid);
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    world.look_at(alex, aim.center());
    let mut server = server_with(world);

    server.give(None, &["give", "alex", "molotov"]).unwrap();
    assert!(matches!(
        server.interact(alex, InteractAction::RightClickAir),
        ActivationOutcome::Thrown { .. }
    ));
    server.world_mut().set_block(aim, BlockKind::Air);

    let (tick, resolution) = run_until_resolved(&mut server, 100).expect("failsafe fires");
    assert_eq!(tick, Tick(61));
    assert!(matches!(resolution, Resolution::Failsafe(_)));
    assert!(server.world().burning_cells().is_empty());
    assert_eq!(server.world().live_objects(), 0);
}

#[test]
fn removed_object_cancels_the_effect() {
    let mut world = SandboxWorld::new();
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    world.look_at(alex, BlockPos::new(0, 63, 8).center());
    let mut server = server_with(world);

    server.give(None, &["give", "alex", "molotov"]).unwrap();
    server.interact(alex, InteractAction::RightClickAir);
    server.advance(3);
    server.world_mut().remove_object(gadget_core::ObjectHandle(0));

    let (_, resolution) = run_until_resolved(&mut server, 100).expect("tracker resolves");
    assert_eq!(resolution, Resolution::Invalidated);
    assert!(server.world().burning_cells().is_empty());
    assert_eq!(server.scheduler().pending_tasks(), 0);
}

#[test]
fn give_clamps_and_defaults_amounts() {
    let mut world = SandboxWorld::new();
    let alex = world.add_actor("alex", Location::new(0.5, 64.0, 0.5));
    let sam = world.add_actor("sam", Location::new(2.5, 64.0, 0.5));
    let mut server = server_with(world);

    let report = server.give(Some(alex), &["give", "Sam", "GRENADE", "abc"]).unwrap();
    assert_eq!(report.amount, 1);
    assert!(report.amount_defaulted);

    let report = server.give(Some(alex), &["give", "sam", "molotov", "100"]).unwrap();
    assert_eq!(report.amount, 64);
    assert_eq!(count(&server, sam, "grenade"), 1);
    assert_eq!(count(&server, sam, "molotov"), 64);
}

#[test]
fn shipped_content_matches_the_built_in_catalog() {
    let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../gadget/content/data");
    let content = gadget_content::ContentFactory::new(data_dir);

    assert_eq!(content.load_catalog().expect("items.ron loads"), Catalog::default());
    let (config, registry) = content.load_registry().expect("content loads");
    assert_eq!(config.namespace, "gadgets");

    let ids: Vec<&str> = registry.ids().into_iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["grenade", "molotov", "riot_shield", "teargas"]);
}
