use flyer_trim::components::{
    AircraftModel, FullAircraftConfig, InitialConditions, TrimMode, TrimSolverConfig,
};
use flyer_trim::systems::TrimSolver;
use std::path::PathBuf;

/// 150 ft/s true airspeed
pub const CRUISE_AIRSPEED: f64 = 45.72;
/// 5000 ft
pub const CRUISE_ALTITUDE: f64 = 1524.0;

pub fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(relative)
}

pub fn cessna() -> AircraftModel {
    AircraftModel::cessna_172()
}

/// Wings level cruise with zero wind
pub fn cruise_conditions() -> InitialConditions {
    InitialConditions::level_flight(CRUISE_AIRSPEED, CRUISE_ALTITUDE)
}

pub fn solver_with_budget(max_iterations: usize) -> TrimSolver {
    TrimSolver::new(TrimSolverConfig {
        max_iterations,
        ..Default::default()
    })
}

/// A solver with `mode` selected for `aircraft` at `conditions`
pub fn solver_for(
    mode: TrimMode,
    aircraft: &FullAircraftConfig,
    conditions: &InitialConditions,
    max_iterations: usize,
) -> TrimSolver {
    let mut solver = solver_with_budget(max_iterations);
    solver.select_mode(mode, aircraft, conditions);
    solver
}
