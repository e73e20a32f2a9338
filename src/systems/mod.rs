pub mod aerodynamics;
pub mod ground;
pub mod physics;
pub mod propulsion;
pub mod trim;

pub use aerodynamics::{calculate_aerodynamic_forces_moments, calculate_air_data, AirDataValues};
pub use ground::{calculate_ground_reactions, GroundReactions};
pub use physics::{
    apply_velocity_limits, calculate_loads, integrate_rk4, newton_euler, AircraftLoads,
    BodyAccelerations, StateDerivatives,
};
pub use propulsion::{
    calculate_engine_outputs, steady_state, update_powerplant_state, EngineOutputs,
};
pub use trim::*;
