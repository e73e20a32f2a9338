mod aero_coef;
mod aircraft;
mod gear;
mod geometry;
mod loader;
mod mass;
mod propulsion;

pub use aero_coef::{
    AircraftAeroCoefficients, DragCoefficients, LiftCoefficients, PitchCoefficients,
    RollCoefficients, SideForceCoefficients, StallEnvelope, YawCoefficients,
};
pub use aircraft::{AircraftSource, AircraftType, FullAircraftConfig};
pub use gear::{GearContact, LandingGearConfig};
pub use geometry::AircraftGeometry;
pub use loader::{ConfigError, RawAircraftConfig};
pub use mass::MassModel;
pub use propulsion::{PowerplantConfig, PropulsionConfig};
