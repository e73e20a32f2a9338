pub mod aircraft;
pub mod propulsion;
pub mod spatial;
pub mod trim;

pub use aircraft::{
    AircraftAeroCoefficients, AircraftControlSurfaces, AircraftGeometry, AircraftModel,
    AircraftSource, AircraftType, ConfigError, FullAircraftConfig, GearContact,
    LandingGearConfig, MassModel, PowerplantConfig, PropulsionConfig, RawAircraftConfig,
    StallEnvelope,
};
pub use propulsion::{EngineKind, PowerplantState, PropulsionState};
pub use spatial::SpatialComponent;
pub use trim::*;
