use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Normalized control surface commands, each in [-1, 1].
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AircraftControlSurfaces {
    /// Elevator command, positive trailing edge down.
    pub elevator: f64,
    /// Aileron command, positive right wing down.
    pub aileron: f64,
    /// Rudder command.
    pub rudder: f64,
    pub pitch_trim: f64,
    pub roll_trim: f64,
    pub yaw_trim: f64,
}

impl AircraftControlSurfaces {
    /// Elevator deflection seen by the aerodynamics: command plus trim, saturated.
    pub fn effective_elevator(&self) -> f64 {
        (self.elevator + self.pitch_trim).clamp(-1.0, 1.0)
    }

    pub fn effective_aileron(&self) -> f64 {
        (self.aileron + self.roll_trim).clamp(-1.0, 1.0)
    }

    pub fn effective_rudder(&self) -> f64 {
        (self.rudder + self.yaw_trim).clamp(-1.0, 1.0)
    }
}
