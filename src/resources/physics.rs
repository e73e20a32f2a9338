use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Configuration for the physics system
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    // Integration parameters
    pub max_velocity: f64,
    pub max_angular_velocity: f64,
    pub timestep: f64,

    /// Gravitational acceleration in the NED frame (m/s²), positive down.
    pub gravity: Vector3<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_velocity: 200.0,        // m/s
            max_angular_velocity: 10.0, // rad/s
            timestep: 1.0 / 120.0,      // 120 Hz
            gravity: Vector3::new(0.0, 0.0, 9.80665),
        }
    }
}

impl PhysicsConfig {
    /// Magnitude of the gravitational acceleration (m/s²).
    pub fn gravity_magnitude(&self) -> f64 {
        self.gravity.norm()
    }
}
