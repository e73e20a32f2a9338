mod common;

use bevy::prelude::*;
use flyer_trim::components::{
    AircraftControlSurfaces, FullAircraftConfig, NeedsTrim, PropulsionState, SpatialComponent,
    TrimMode, TrimOutcome, TrimRequest, TrimSolverConfig,
};
use flyer_trim::plugins::TrimPlugin;
use pretty_assertions::assert_eq;

use common::{assert_spatial_valid, cruise_conditions, CRUISE_ALTITUDE};

fn app(max_iterations: usize) -> App {
    let mut app = App::new();
    app.insert_resource(TrimSolverConfig {
        max_iterations,
        ..Default::default()
    });
    app.add_plugins(TrimPlugin);
    app
}

fn spawn_aircraft(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            FullAircraftConfig::cessna_172(),
            AircraftControlSurfaces::default(),
            PropulsionState::new(1),
            SpatialComponent::default(),
            cruise_conditions(),
        ))
        .id()
}

#[test]
fn test_request_trims_entity_in_one_update() {
    let mut app = app(2500);
    let entity = spawn_aircraft(&mut app);

    app.world_mut().send_event(TrimRequest {
        entity,
        mode: TrimMode::Longitudinal,
    });
    app.update();

    let world = app.world();
    assert!(world.get::<NeedsTrim>(entity).is_none());
    let outcome = world.get::<TrimOutcome>(entity).expect("trim outcome");
    assert_eq!(outcome.mode, TrimMode::Longitudinal);
    assert!(outcome.result.success, "cost {:e}", outcome.result.cost);

    let spatial = world.get::<SpatialComponent>(entity).expect("spatial");
    assert_spatial_valid(spatial);
    assert!((spatial.altitude() - CRUISE_ALTITUDE).abs() < 0.1);

    let controls = world.get::<AircraftControlSurfaces>(entity).expect("controls");
    assert_eq!(controls.elevator, outcome.result.commands.elevator);
    assert!(world
        .get::<PropulsionState>(entity)
        .expect("propulsion")
        .all_running());
}

#[test]
fn test_configured_budget_is_used() {
    let mut app = app(30);
    let entity = spawn_aircraft(&mut app);

    app.world_mut().send_event(TrimRequest {
        entity,
        mode: TrimMode::Longitudinal,
    });
    app.update();

    let outcome = app
        .world()
        .get::<TrimOutcome>(entity)
        .expect("trim outcome");
    assert_eq!(outcome.result.evaluations, 30);
    assert!(!outcome.result.success);
}

#[test]
fn test_failed_trim_still_clears_marker() {
    let mut app = app(100);
    let entity = spawn_aircraft(&mut app);

    // Custom mode has no controls, so the solver refuses to run
    app.world_mut().send_event(TrimRequest {
        entity,
        mode: TrimMode::Custom,
    });
    app.update();

    let world = app.world();
    assert!(world.get::<NeedsTrim>(entity).is_none());
    assert!(world.get::<TrimOutcome>(entity).is_none());
}

#[test]
fn test_entities_without_request_are_left_alone() {
    let mut app = app(100);
    let entity = spawn_aircraft(&mut app);

    app.update();

    assert!(app.world().get::<TrimOutcome>(entity).is_none());
    assert_eq!(app.world().resource::<TrimSolverConfig>().max_iterations, 100);
}
