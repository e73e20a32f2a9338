use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::components::aircraft::config::{
    AircraftAeroCoefficients, AircraftGeometry, ConfigError, LandingGearConfig, MassModel,
    PropulsionConfig, RawAircraftConfig,
};

/// The full aircraft configuration, including mass, geometry, aerodynamic
/// coefficients, engines and landing gear.
#[derive(Component, Debug, Clone, Deserialize)]
pub struct FullAircraftConfig {
    /// Name of the aircraft, defaults to type name.
    pub name: String,
    /// Type of aircraft represented as an enum e.g. Cessna172 or a custom file-based type.
    pub ac_type: AircraftType,
    /// Mass model of the aircraft, including weight and inertia properties.
    pub mass: MassModel,
    /// The geometric properties of the aircraft, such as wing span and chord.
    pub geometry: AircraftGeometry,
    /// Aerodynamic coefficients for calculating forces and moments on the aircraft.
    pub aero_coef: AircraftAeroCoefficients,
    /// Engines mounted on the aircraft.
    pub propulsion: PropulsionConfig,
    /// Ground contact points.
    pub gear: LandingGearConfig,
}

impl Default for FullAircraftConfig {
    /// The `Cessna172` configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::from_programmed(AircraftType::Cessna172)
    }
}

impl FullAircraftConfig {
    /// Creates a new aircraft configuration from a given source.
    ///
    /// # Arguments
    /// * `source` - An `AircraftSource` enum specifying if the configuration is hardcoded
    ///              (`Programmed`) or loaded from a file (`File`).
    ///
    /// # Returns
    /// A `Result` containing the new configuration or an error if the file fails to load.
    pub fn new(source: AircraftSource) -> Result<Self, ConfigError> {
        match source {
            AircraftSource::Programmed(aircraft_type) => Ok(Self::from_programmed(aircraft_type)),
            AircraftSource::File(path) => Self::from_file(path),
        }
    }

    /// Creates an aircraft configuration for predefined (programmed) types.
    fn from_programmed(aircraft_type: AircraftType) -> Self {
        match aircraft_type {
            AircraftType::Cessna172 => Self {
                name: "Cessna172".to_string(),
                ac_type: AircraftType::Cessna172,
                mass: MassModel::cessna_172(),
                geometry: AircraftGeometry::cessna_172(),
                aero_coef: AircraftAeroCoefficients::cessna_172(),
                propulsion: PropulsionConfig::cessna_172(),
                gear: LandingGearConfig::cessna_172(),
            },
            AircraftType::Custom(name) => Self {
                name: name.clone(),
                ac_type: AircraftType::Custom(name),
                ..Self::from_programmed(AircraftType::Cessna172)
            },
        }
    }

    /// Creates an aircraft configuration by reading from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to the YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&file_contents)
    }

    /// Parses an aircraft configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let raw_config: RawAircraftConfig = serde_yaml::from_str(contents)?;
        Self::from_raw_config(raw_config)
    }

    /// Converts a raw configuration into a structured aircraft configuration.
    fn from_raw_config(raw: RawAircraftConfig) -> Result<Self, ConfigError> {
        raw.validate()?;
        let aero_coef = AircraftAeroCoefficients::from_raw(&raw)?;
        Ok(Self {
            name: raw.name.clone(),
            ac_type: AircraftType::Custom(raw.name.clone()),
            mass: MassModel::new(raw.mass, raw.ixx, raw.iyy, raw.izz, raw.ixz),
            geometry: AircraftGeometry::new(raw.wing_area, raw.wing_span, raw.mac),
            aero_coef,
            propulsion: PropulsionConfig {
                engines: raw.engines,
            },
            gear: LandingGearConfig { contacts: raw.gear },
        })
    }

    pub fn cessna_172() -> Self {
        Self::from_programmed(AircraftType::Cessna172)
    }
}

/// Source for aircraft configuration.
/// Can either be a hardcoded configuration (`Programmed`) or loaded from a file.
#[derive(Debug, Clone)]
pub enum AircraftSource {
    Programmed(AircraftType),
    File(PathBuf),
}

/// Enumeration of available aircraft types.
#[derive(Component, Debug, Clone, Deserialize, Hash, PartialEq, Eq)]
pub enum AircraftType {
    Cessna172,
    Custom(String),
}
