use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AircraftAeroCoefficients {
    pub drag: DragCoefficients,
    pub lift: LiftCoefficients,
    pub side_force: SideForceCoefficients,
    pub roll: RollCoefficients,
    pub pitch: PitchCoefficients,
    pub yaw: YawCoefficients,
    /// Angle of attack range between the minimum and maximum lift coefficient, when known.
    #[serde(default)]
    pub stall: Option<StallEnvelope>,
}

/// Angle of attack at the minimum and maximum lift coefficient (rad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StallEnvelope {
    pub alpha_min: f64,
    pub alpha_max: f64,
}

impl StallEnvelope {
    /// An envelope is usable only when it spans a non-empty range.
    pub fn is_valid(&self) -> bool {
        self.alpha_min.is_finite() && self.alpha_max.is_finite() && self.alpha_max > self.alpha_min
    }
}

/// Drag coefficients for full aerodynamic model
#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragCoefficients {
    /// Base drag coefficient (zero angle of attack).
    pub c_d_0: f64,
    /// Linear drag coefficient with respect to angle of attack (α).
    pub c_d_alpha: f64,
    /// Drag coefficient due to angle of attack and pitch rate (q).
    pub c_d_alpha_q: f64,
    /// Drag coefficient due to angle of attack and elevator deflection.
    pub c_d_alpha_deltae: f64,
    /// Quadratic drag coefficient with respect to angle of attack squared (α²).
    pub c_d_alpha2: f64,
    /// Quadratic drag coefficient with respect to α² and pitch rate.
    pub c_d_alpha2_q: f64,
    /// Quadratic drag coefficient with respect to α² and elevator deflection.
    pub c_d_alpha2_deltae: f64,
    /// Cubic drag coefficient with respect to α³.
    pub c_d_alpha3: f64,
    /// Cubic drag coefficient with respect to α³ and pitch rate.
    pub c_d_alpha3_q: f64,
    /// Quartic drag coefficient with respect to α⁴.
    pub c_d_alpha4: f64,
}

/// Lift coefficients for full aerodynamic model
#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LiftCoefficients {
    /// Base lift coefficient (zero angle of attack).
    pub c_l_0: f64,
    /// Linear lift coefficient with respect to angle of attack (α).
    pub c_l_alpha: f64,
    /// Lift coefficient due to pitch rate (q).
    pub c_l_q: f64,
    /// Lift coefficient due to elevator deflection.
    pub c_l_deltae: f64,
    /// Combined lift coefficient due to angle of attack and pitch rate.
    pub c_l_alpha_q: f64,
    /// Quadratic lift coefficient with respect to α².
    pub c_l_alpha2: f64,
    /// Cubic lift coefficient with respect to α³.
    pub c_l_alpha3: f64,
    /// Quartic lift coefficient with respect to α⁴.
    pub c_l_alpha4: f64,
}

/// Side force coefficients for full aerodynamic model
#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SideForceCoefficients {
    /// Side-force coefficient due to sideslip angle (β).
    pub c_y_beta: f64,
    /// Side-force coefficient due to roll rate (p).
    pub c_y_p: f64,
    /// Side-force coefficient due to yaw rate (r).
    pub c_y_r: f64,
    /// Side-force coefficient due to aileron deflection.
    pub c_y_deltaa: f64,
    /// Side-force coefficient due to rudder deflection.
    pub c_y_deltar: f64,
}

/// Roll coefficients for full aerodynamic model
#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RollCoefficients {
    /// Roll moment coefficient due to sideslip angle (β).
    pub c_l_beta: f64,
    /// Roll moment coefficient due to roll rate (p).
    pub c_l_p: f64,
    /// Roll moment coefficient due to yaw rate (r).
    pub c_l_r: f64,
    /// Roll moment coefficient due to aileron deflection.
    pub c_l_deltaa: f64,
    /// Roll moment coefficient due to rudder deflection.
    pub c_l_deltar: f64,
}

/// Pitch coefficients for full aerodynamic model
#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PitchCoefficients {
    /// Base pitch moment coefficient (zero angle of attack).
    pub c_m_0: f64,
    /// Linear pitch moment coefficient with respect to angle of attack (α).
    pub c_m_alpha: f64,
    /// Pitch moment coefficient due to pitch rate (q).
    pub c_m_q: f64,
    /// Pitch moment coefficient due to elevator deflection.
    pub c_m_deltae: f64,
    /// Combined pitch moment coefficient due to α and q.
    pub c_m_alpha_q: f64,
    /// Quadratic pitch moment coefficient due to α² and q.
    pub c_m_alpha2_q: f64,
    /// Quadratic pitch moment coefficient due to α² and elevator deflection.
    pub c_m_alpha2_deltae: f64,
    /// Cubic pitch moment coefficient due to α³ and q.
    pub c_m_alpha3_q: f64,
    /// Cubic pitch moment coefficient due to α³ and elevator deflection.
    pub c_m_alpha3_deltae: f64,
    /// Quartic pitch moment coefficient with respect to α⁴.
    pub c_m_alpha4: f64,
}

/// Yaw coefficients for full aerodynamic model
#[derive(Component, Default, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YawCoefficients {
    /// Yaw moment coefficient due to sideslip angle (β).
    pub c_n_beta: f64,
    /// Yaw moment coefficient due to roll rate (p).
    pub c_n_p: f64,
    /// Yaw moment coefficient due to yaw rate (r).
    pub c_n_r: f64,
    /// Yaw moment coefficient due to aileron deflection.
    pub c_n_deltaa: f64,
    /// Yaw moment coefficient due to rudder deflection.
    pub c_n_deltar: f64,
    /// Quadratic yaw moment coefficient due to β².
    pub c_n_beta2: f64,
    /// Cubic yaw moment coefficient due to β³.
    pub c_n_beta3: f64,
}

impl AircraftAeroCoefficients {
    pub fn new(
        drag: DragCoefficients,
        lift: LiftCoefficients,
        side_force: SideForceCoefficients,
        roll: RollCoefficients,
        pitch: PitchCoefficients,
        yaw: YawCoefficients,
    ) -> Self {
        AircraftAeroCoefficients {
            drag,
            lift,
            side_force,
            roll,
            pitch,
            yaw,
            stall: None,
        }
    }

    pub fn with_stall(mut self, alpha_min: f64, alpha_max: f64) -> Self {
        self.stall = Some(StallEnvelope {
            alpha_min,
            alpha_max,
        });
        self
    }

    /// Linearised light single-engine model, stalls at about 16° angle of attack.
    pub fn cessna_172() -> AircraftAeroCoefficients {
        AircraftAeroCoefficients::new(
            DragCoefficients::cessna_172(),
            LiftCoefficients::cessna_172(),
            SideForceCoefficients::cessna_172(),
            RollCoefficients::cessna_172(),
            PitchCoefficients::cessna_172(),
            YawCoefficients::cessna_172(),
        )
        .with_stall((-5.0_f64).to_radians(), 16.0_f64.to_radians())
    }
}

impl DragCoefficients {
    pub fn cessna_172() -> DragCoefficients {
        DragCoefficients {
            c_d_0: 0.031,
            c_d_alpha: 0.13,
            c_d_alpha2: 0.8,
            ..Default::default()
        }
    }
}

impl LiftCoefficients {
    pub fn cessna_172() -> LiftCoefficients {
        LiftCoefficients {
            c_l_0: 0.31,
            c_l_alpha: 5.14,
            c_l_q: 3.9,
            c_l_deltae: 0.19,
            ..Default::default()
        }
    }
}

impl SideForceCoefficients {
    pub fn cessna_172() -> SideForceCoefficients {
        SideForceCoefficients {
            c_y_beta: -0.31,
            c_y_p: -0.037,
            c_y_r: 0.21,
            c_y_deltaa: 0.0,
            c_y_deltar: 0.052,
        }
    }
}

impl RollCoefficients {
    pub fn cessna_172() -> RollCoefficients {
        RollCoefficients {
            c_l_beta: -0.089,
            c_l_p: -0.47,
            c_l_r: 0.096,
            c_l_deltaa: 0.047,
            c_l_deltar: 0.004,
        }
    }
}

impl PitchCoefficients {
    pub fn cessna_172() -> PitchCoefficients {
        PitchCoefficients {
            c_m_0: -0.015,
            c_m_alpha: -0.89,
            c_m_q: -12.4,
            c_m_deltae: -0.56,
            ..Default::default()
        }
    }
}

impl YawCoefficients {
    pub fn cessna_172() -> YawCoefficients {
        YawCoefficients {
            c_n_beta: 0.065,
            c_n_p: -0.03,
            c_n_r: -0.099,
            c_n_deltaa: -0.014,
            c_n_deltar: -0.0184,
            ..Default::default()
        }
    }
}
