use bevy::prelude::*;

use crate::components::{TrimRequest, TrimSolverConfig};
use crate::resources::{AtmosphereConfig, PhysicsConfig};
use crate::systems::{handle_trim_requests, trim_aircraft_system};

/// Trim stages, requests are turned into markers before the solver runs
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum TrimSet {
    Requests,
    Solve,
}

/// Trims aircraft on request.
///
/// Solver settings come from the [`TrimSolverConfig`] resource; insert one before
/// adding the plugin to override the defaults.
pub struct TrimPlugin;

impl Plugin for TrimPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TrimRequest>();

        app.init_resource::<TrimSolverConfig>()
            .init_resource::<PhysicsConfig>()
            .init_resource::<AtmosphereConfig>();

        app.configure_sets(Update, (TrimSet::Requests, TrimSet::Solve).chain());

        app.add_systems(
            Update,
            (
                handle_trim_requests.in_set(TrimSet::Requests),
                trim_aircraft_system.in_set(TrimSet::Solve),
            ),
        );
    }
}
