use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{AircraftModel, ControlVector, InitialConditions};
use crate::systems::{nlf_from_phi_w, phi_w_from_nlf};

/// Pilot commands applied during an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrimCommands {
    pub throttle: f64,
    pub elevator: f64,
    pub aileron: f64,
    pub rudder: f64,
    pub pitch_trim: f64,
    pub roll_trim: f64,
    pub yaw_trim: f64,
}

impl TrimCommands {
    /// Commands currently held by the aircraft.
    pub fn from_model(model: &AircraftModel) -> Self {
        Self {
            throttle: model.throttle(),
            elevator: model.controls.elevator,
            aileron: model.controls.aileron,
            rudder: model.controls.rudder,
            pitch_trim: model.controls.pitch_trim,
            roll_trim: model.controls.roll_trim,
            yaw_trim: model.controls.yaw_trim,
        }
    }

    pub fn apply(&self, model: &mut AircraftModel) {
        model.set_throttle(self.throttle);
        model.controls.elevator = self.elevator;
        model.controls.aileron = self.aileron;
        model.controls.rudder = self.rudder;
        model.controls.pitch_trim = self.pitch_trim;
        model.controls.roll_trim = self.roll_trim;
        model.controls.yaw_trim = self.yaw_trim;
    }
}

/// Flight state reconstructed for one candidate, with the resulting accelerations.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimPoint {
    pub commands: TrimCommands,
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
    /// Altitude MSL used for the evaluation (m)
    pub altitude: f64,
    /// Body velocity u, v, w (m/s)
    pub velocity_body: Vector3<f64>,
    /// Body rates p, q, r (rad/s)
    pub rates_body: Vector3<f64>,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Wind-axis bank angle, zero outside turns
    pub phi_w: f64,
    /// udot, vdot, wdot (m/s^2)
    pub linear_accel: Vector3<f64>,
    /// pdot, qdot, rdot (rad/s^2)
    pub angular_accel: Vector3<f64>,
    pub alpha_dot: f64,
    pub beta_dot: f64,
    /// Thrust of the first engine (N)
    pub thrust: f64,
}

/// Outcome of one cost evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub controls: ControlVector,
    pub cost: f64,
    /// `None` when the candidate was rejected before any physics was evaluated.
    pub point: Option<TrimPoint>,
}

impl Evaluation {
    pub fn out_of_bounds(controls: ControlVector) -> Self {
        Self {
            controls,
            cost: f64::INFINITY,
            point: None,
        }
    }
}

/// Best cost seen during a solve and the vector that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CostRecord {
    pub best_cost: f64,
    pub best: Option<ControlVector>,
    pub improvements: usize,
}

impl Default for CostRecord {
    fn default() -> Self {
        Self {
            best_cost: f64::INFINITY,
            best: None,
            improvements: 0,
        }
    }
}

impl CostRecord {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records `cost` if it improves on the best so far. NaN never improves.
    pub fn offer(&mut self, cost: f64, controls: &ControlVector) -> bool {
        if cost < self.best_cost {
            self.best_cost = cost;
            self.best = Some(controls.clone());
            self.improvements += 1;
            true
        } else {
            false
        }
    }
}

/// Kinematic state of the trimmed aircraft.
///
/// The load factor and the wind-axis bank angle are tied through the flight-path
/// angle; setting either recomputes the other.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrimState {
    pub velocity_body: Vector3<f64>,
    pub rates_body: Vector3<f64>,
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    phi_w: f64,
    nlf: f64,
}

impl TrimState {
    pub fn from_conditions(conditions: &InitialConditions) -> Self {
        let mut state = Self {
            velocity_body: Vector3::new(conditions.true_airspeed, 0.0, 0.0),
            rates_body: conditions.angular_rates,
            phi: conditions.phi,
            theta: conditions.theta,
            psi: conditions.psi,
            alpha: conditions.alpha,
            beta: conditions.beta,
            gamma: conditions.gamma,
            ..Default::default()
        };
        state.set_nlf(conditions.target_nlf);
        state
    }

    pub fn nlf(&self) -> f64 {
        self.nlf
    }

    pub fn phi_w(&self) -> f64 {
        self.phi_w
    }

    pub fn set_nlf(&mut self, nlf: f64) {
        self.nlf = nlf;
        self.phi_w = phi_w_from_nlf(nlf, self.gamma);
    }

    pub fn set_phi_w(&mut self, phi_w: f64) {
        self.phi_w = phi_w;
        self.nlf = nlf_from_phi_w(phi_w, self.gamma);
    }

    /// Takes over the kinematics of an evaluated point.
    pub fn update_from_point(&mut self, point: &TrimPoint) {
        self.velocity_body = point.velocity_body;
        self.rates_body = point.rates_body;
        self.phi = point.phi;
        self.theta = point.theta;
        self.psi = point.psi;
        self.alpha = point.alpha;
        self.beta = point.beta;
        if self.gamma != point.gamma {
            self.gamma = point.gamma;
            self.set_nlf(self.nlf);
        }
    }
}

/// Summary of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimResult {
    pub success: bool,
    pub cost: f64,
    pub evaluations: usize,
    pub improvements: usize,
    pub state: TrimState,
    pub commands: TrimCommands,
    /// Accelerations after the settling step
    pub settling_linear_accel: Vector3<f64>,
    pub settling_angular_accel: Vector3<f64>,
}

/// Counters kept over the lifetime of a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimStats {
    pub total_evaluations: usize,
    pub solves: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_factor_and_bank_stay_consistent() {
        let mut ic = InitialConditions::level_flight(50.0, 1000.0);
        ic.target_nlf = 2.0;
        let mut state = TrimState::from_conditions(&ic);
        assert_relative_eq!(state.phi_w(), 60.0_f64.to_radians(), epsilon = 1e-12);

        state.set_phi_w(45.0_f64.to_radians());
        assert_relative_eq!(state.nlf(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_cost_record_only_tightens() {
        let mut record = CostRecord::default();
        let vector = ControlVector::new();
        assert!(record.offer(1.0, &vector));
        assert!(!record.offer(2.0, &vector));
        assert!(!record.offer(f64::NAN, &vector));
        assert!(record.offer(0.5, &vector));
        assert_eq!(record.improvements, 2);
        assert_eq!(record.best_cost, 0.5);

        record.reset();
        assert!(record.best_cost.is_infinite());
    }
}
