use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Temperature lapse rate in the troposphere (K/m).
const LAPSE_RATE: f64 = 0.0065;
/// Specific gas constant for dry air (J/(kg·K)).
const GAS_CONSTANT: f64 = 287.05287;
/// Exponent g / (R·L) of the barometric formula.
const PRESSURE_EXPONENT: f64 = 5.25588;
const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
/// Top of the troposphere (m).
const TROPOPAUSE: f64 = 11_000.0;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    pub model_type: AtmosphereType,
    pub sea_level_density: f64,
    pub sea_level_temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtmosphereType {
    Constant,
    Standard,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            model_type: AtmosphereType::Standard,
            sea_level_density: 1.225,
            sea_level_temperature: 288.15,
        }
    }
}

impl AtmosphereConfig {
    /// Air density (kg/m³) at a geometric altitude above mean sea level (m).
    ///
    /// The standard model follows the ISA troposphere and holds the tropopause
    /// values above 11 km.
    pub fn density(&self, altitude: f64) -> f64 {
        match self.model_type {
            AtmosphereType::Constant => self.sea_level_density,
            AtmosphereType::Standard => {
                let temperature = self.temperature(altitude);
                let pressure = SEA_LEVEL_PRESSURE
                    * (temperature / self.sea_level_temperature).powf(PRESSURE_EXPONENT);
                pressure / (GAS_CONSTANT * temperature)
            }
        }
    }

    /// Static air temperature (K) at altitude.
    pub fn temperature(&self, altitude: f64) -> f64 {
        match self.model_type {
            AtmosphereType::Constant => self.sea_level_temperature,
            AtmosphereType::Standard => {
                self.sea_level_temperature - LAPSE_RATE * altitude.clamp(-1_000.0, TROPOPAUSE)
            }
        }
    }
}
