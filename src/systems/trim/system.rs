use bevy::prelude::*;

use crate::{
    components::{
        AircraftControlSurfaces, AircraftModel, FullAircraftConfig, InitialConditions, NeedsTrim,
        PropulsionState, SpatialComponent, TrimOutcome, TrimSolverConfig,
    },
    resources::{AtmosphereConfig, PhysicsConfig},
    systems::TrimSolver,
};

/// Trims every aircraft marked with [`NeedsTrim`], blocking until each solve ends.
pub fn trim_aircraft_system(
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &FullAircraftConfig,
        &mut AircraftControlSurfaces,
        &mut PropulsionState,
        &mut SpatialComponent,
        &mut InitialConditions,
        &NeedsTrim,
    )>,
    physics_config: Res<PhysicsConfig>,
    atmosphere: Res<AtmosphereConfig>,
    settings: Res<TrimSolverConfig>,
) {
    for (entity, config, mut controls, mut propulsion, mut spatial, mut conditions, needs_trim) in
        query.iter_mut()
    {
        let mut model = AircraftModel {
            config: config.clone(),
            controls: *controls,
            propulsion: propulsion.clone(),
            spatial: spatial.clone(),
        };

        let mut solver = TrimSolver::new(settings.clone())
            .with_physics(physics_config.clone())
            .with_atmosphere(atmosphere.clone());
        solver.select_mode(needs_trim.mode, config, &conditions);

        match solver.do_trim(&mut model, &mut conditions) {
            Ok(result) => {
                *controls = model.controls;
                *propulsion = model.propulsion;
                *spatial = model.spatial;

                if let Some(report) = solver.report() {
                    debug!("{}", report);
                }
                info!(
                    "Aircraft {:?} trim finished: elevator={:.3}, throttle={:.3}, \
                    alpha={:.1}°, theta={:.1}°, cost={:e}, evaluations={}",
                    config.name,
                    result.commands.elevator,
                    result.commands.throttle,
                    result.state.alpha.to_degrees(),
                    result.state.theta.to_degrees(),
                    result.cost,
                    result.evaluations
                );

                commands.entity(entity).insert(TrimOutcome {
                    mode: needs_trim.mode,
                    result,
                });
            }
            Err(e) => {
                error!("Trim solver error for {:?}: {}", config.name, e);
            }
        }
        commands.entity(entity).remove::<NeedsTrim>();
    }
}
