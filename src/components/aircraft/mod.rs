pub mod config;
mod controls;
mod model;

pub use config::{
    AircraftAeroCoefficients, AircraftGeometry, AircraftSource, AircraftType, ConfigError,
    FullAircraftConfig, GearContact, LandingGearConfig, MassModel, PowerplantConfig,
    PropulsionConfig, RawAircraftConfig, StallEnvelope,
};
pub use controls::AircraftControlSurfaces;
pub use model::AircraftModel;
