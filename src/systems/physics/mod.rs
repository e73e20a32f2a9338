mod dynamics;
mod integrator;
mod loads;

pub use dynamics::{newton_euler, BodyAccelerations};
pub use integrator::{apply_velocity_limits, integrate_rk4, StateDerivatives};
pub use loads::{calculate_loads, AircraftLoads};
