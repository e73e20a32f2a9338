use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::EngineKind;

/// Configuration for an aircraft engine
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PowerplantConfig {
    /// Name of the powerplant
    pub name: String,
    /// Engine family, selects the start-up procedure
    #[serde(default)]
    pub kind: EngineKind,
    /// Maximum thrust at sea level static conditions (N)
    pub max_thrust: f64,
    /// Minimum thrust (typically idle) at sea level (N)
    pub min_thrust: f64,
    /// Engine position relative to aircraft CG (m)
    pub position: Vector3<f64>,
    /// Thrust line orientation in body frame (rad)
    pub orientation: Vector3<f64>,
    /// Thrust specific fuel consumption at cruise (kg/N/s)
    pub tsfc: f64,
    /// Time constant for engine spool-up (s)
    pub spool_up_time: f64,
    /// Time constant for engine spool-down (s)
    pub spool_down_time: f64,
    /// Power lever position commanded by a normalized throttle of zero
    #[serde(default)]
    pub throttle_min: f64,
    /// Power lever position commanded by a normalized throttle of one
    #[serde(default = "default_throttle_max")]
    pub throttle_max: f64,
}

fn default_throttle_max() -> f64 {
    1.0
}

#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PropulsionConfig {
    /// Configurations for each engine
    pub engines: Vec<PowerplantConfig>,
}

impl Default for PowerplantConfig {
    fn default() -> Self {
        Self {
            name: "Generic Engine".to_string(),
            kind: EngineKind::Other,
            max_thrust: 20000.0,
            min_thrust: 1000.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            orientation: Vector3::zeros(), // Thrust along the body x axis
            tsfc: 0.4 / 3600.0,            // Convert from kg/N/hr to kg/N/s
            spool_up_time: 3.0,
            spool_down_time: 2.0,
            throttle_min: 0.0,
            throttle_max: 1.0,
        }
    }
}

impl PowerplantConfig {
    /// Maps a normalized throttle in [0, 1] onto this engine's power lever range.
    pub fn power_lever_for(&self, throttle: f64) -> f64 {
        self.throttle_min + throttle * (self.throttle_max - self.throttle_min)
    }

    /// Inverse of [`PowerplantConfig::power_lever_for`].
    pub fn throttle_for(&self, power_lever: f64) -> f64 {
        let span = self.throttle_max - self.throttle_min;
        if span.abs() < f64::EPSILON {
            0.0
        } else {
            (power_lever - self.throttle_min) / span
        }
    }
}

impl PropulsionConfig {
    /// Creates a new single-engine configuration
    pub fn single_engine(engine: PowerplantConfig) -> Self {
        Self {
            engines: vec![engine],
        }
    }

    /// Creates a twin-engine configuration with symmetric placement
    pub fn twin_engine(
        engine: PowerplantConfig,
        y_offset: f64,
        x_offset: f64,
        z_offset: f64,
    ) -> Self {
        let left_engine = PowerplantConfig {
            position: Vector3::new(x_offset, -y_offset, z_offset),
            name: "Left Engine".to_string(),
            ..engine.clone()
        };
        let right_engine = PowerplantConfig {
            position: Vector3::new(x_offset, y_offset, z_offset),
            name: "Right Engine".to_string(),
            ..engine
        };
        Self {
            engines: vec![left_engine, right_engine],
        }
    }

    pub fn cessna_172() -> Self {
        let engine = PowerplantConfig {
            name: "Lycoming O-320".to_string(),
            kind: EngineKind::Piston,
            max_thrust: 2400.0,
            min_thrust: 0.0,
            position: Vector3::new(1.5, 0.0, 0.0),
            tsfc: 0.3 / 3600.0,
            spool_up_time: 1.0,
            spool_down_time: 1.0,
            ..Default::default()
        };
        Self::single_engine(engine)
    }
}
