use nalgebra::Vector3;

use crate::components::{
    AircraftControlSurfaces, FullAircraftConfig, PropulsionState, SpatialComponent,
};
use crate::systems::{
    calculate_aerodynamic_forces_moments, calculate_air_data, calculate_engine_outputs,
    calculate_ground_reactions, AirDataValues,
};

/// External loads on the airframe, body frame, gravity excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftLoads {
    pub force: Vector3<f64>,
    pub moment: Vector3<f64>,
    pub air_data: AirDataValues,
    /// Thrust of each engine (N)
    pub thrust: Vec<f64>,
    pub weight_on_wheels: bool,
}

/// Sums aerodynamic, propulsive and ground loads for the given state.
///
/// Engine states are used as they are; callers advance them first.
pub fn calculate_loads(
    config: &FullAircraftConfig,
    controls: &AircraftControlSurfaces,
    propulsion: &PropulsionState,
    spatial: &SpatialComponent,
    wind_ned: &Vector3<f64>,
    density: f64,
    terrain_elevation: f64,
) -> AircraftLoads {
    let air_data = calculate_air_data(&spatial.velocity, &spatial.attitude, wind_ned, density);

    let (mut force, mut moment) = calculate_aerodynamic_forces_moments(
        &config.geometry,
        &config.aero_coef,
        &air_data,
        &spatial.angular_velocity,
        controls,
    );

    let mut thrust = Vec::with_capacity(config.propulsion.engines.len());
    for (engine, state) in config
        .propulsion
        .engines
        .iter()
        .zip(propulsion.engine_states.iter())
    {
        let outputs = calculate_engine_outputs(engine, state, density, air_data.true_airspeed);
        force += outputs.force;
        moment += outputs.moment;
        thrust.push(outputs.thrust);
    }

    let ground = calculate_ground_reactions(
        &config.gear,
        &spatial.position,
        &spatial.attitude,
        &spatial.velocity_body(),
        &spatial.angular_velocity,
        terrain_elevation,
    );
    force += ground.force;
    moment += ground.moment;

    AircraftLoads {
        force,
        moment,
        air_data,
        thrust,
        weight_on_wheels: ground.weight_on_wheels,
    }
}
