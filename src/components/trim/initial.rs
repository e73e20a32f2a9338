use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Flight condition a trim starts from, updated in place with the trimmed values.
///
/// Angles are in radians, distances in metres and speeds in m/s. Altitude is
/// measured above mean sea level, with the terrain elevation given separately.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// True airspeed (m/s).
    pub true_airspeed: f64,
    /// Altitude above mean sea level (m).
    pub altitude: f64,
    /// Terrain elevation below the aircraft (m).
    pub terrain_elevation: f64,
    /// North and east position in the local frame (m).
    pub north: f64,
    pub east: f64,
    /// Flight-path angle (rad).
    pub gamma: f64,
    /// Euler angles (rad).
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
    /// Aerodynamic angles (rad).
    pub alpha: f64,
    pub beta: f64,
    /// Body rates p, q, r (rad/s).
    pub angular_rates: Vector3<f64>,
    /// Wind velocity in the NED frame (m/s).
    pub wind_ned: Vector3<f64>,
    /// Target load factor for turns and pull-ups.
    pub target_nlf: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            true_airspeed: 0.0,
            altitude: 0.0,
            terrain_elevation: 0.0,
            north: 0.0,
            east: 0.0,
            gamma: 0.0,
            phi: 0.0,
            theta: 0.0,
            psi: 0.0,
            alpha: 0.0,
            beta: 0.0,
            angular_rates: Vector3::zeros(),
            wind_ned: Vector3::zeros(),
            target_nlf: 1.0,
        }
    }
}

impl InitialConditions {
    /// Level flight at the given true airspeed (m/s) and altitude (m MSL).
    pub fn level_flight(true_airspeed: f64, altitude: f64) -> Self {
        Self {
            true_airspeed,
            altitude,
            ..Default::default()
        }
    }

    pub fn altitude_agl(&self) -> f64 {
        self.altitude - self.terrain_elevation
    }

    pub fn set_altitude_agl(&mut self, altitude_agl: f64) {
        self.altitude = self.terrain_elevation + altitude_agl;
    }

    /// Euler angles as (phi, theta, psi).
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        (self.phi, self.theta, self.psi)
    }

    /// Velocity relative to the air mass in the NED frame, from airspeed,
    /// flight-path angle and heading.
    pub fn air_velocity_ned(&self) -> Vector3<f64> {
        let (sin_gamma, cos_gamma) = self.gamma.sin_cos();
        let (sin_psi, cos_psi) = self.psi.sin_cos();
        Vector3::new(
            self.true_airspeed * cos_gamma * cos_psi,
            self.true_airspeed * cos_gamma * sin_psi,
            -self.true_airspeed * sin_gamma,
        )
    }
}
