use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A single ground contact point modelled as a spring-damper with rolling friction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearContact {
    pub name: String,
    /// Contact point relative to the CG in the body frame (m).
    pub position: Vector3<f64>,
    /// Strut stiffness (N/m).
    pub stiffness: f64,
    /// Strut damping (N·s/m).
    pub damping: f64,
    /// Rolling friction coefficient.
    pub rolling_friction: f64,
}

/// Landing gear layout of an aircraft.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandingGearConfig {
    pub contacts: Vec<GearContact>,
}

impl LandingGearConfig {
    /// Fixed tricycle gear.
    pub fn cessna_172() -> Self {
        let main = |name: &str, y: f64| GearContact {
            name: name.to_string(),
            position: Vector3::new(-0.3, y, 1.3),
            stiffness: 60_000.0,
            damping: 3_000.0,
            rolling_friction: 0.02,
        };
        Self {
            contacts: vec![
                GearContact {
                    name: "Nose".to_string(),
                    position: Vector3::new(1.2, 0.0, 1.3),
                    stiffness: 40_000.0,
                    damping: 2_000.0,
                    rolling_friction: 0.02,
                },
                main("Left Main", -1.2),
                main("Right Main", 1.2),
            ],
        }
    }
}
