use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::components::{
    AircraftControlSurfaces, AircraftModel, ControlDescriptor, ControlKind, ControlVector,
    Evaluation, InitialConditions, SpatialComponent, TrimCommands, TrimMode, TrimPoint,
};
use crate::resources::{AtmosphereConfig, PhysicsConfig};
use crate::systems::{
    calculate_loads, coordinated_pitch, newton_euler, phi_w_from_nlf, pullup_pitch_rate,
    steady_state, trim_cost, turn_body_rates, turn_geometry, turn_rate, TrimError, TurnGeometry,
};

/// Attitude, altitude and commands of one candidate before any physics.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub commands: TrimCommands,
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
    pub gamma: f64,
    pub altitude: f64,
    pub phi_w: f64,
    pub turn: Option<TurnGeometry>,
}

/// Everything needed to score a control vector, borrowed for one solve.
///
/// Evaluation never mutates the aircraft: engines are advanced on a copy of
/// the baseline propulsion state.
pub struct TrimEvaluator<'a> {
    pub model: &'a AircraftModel,
    pub conditions: &'a InitialConditions,
    pub mode: TrimMode,
    pub descriptors: &'a [ControlDescriptor],
    pub physics: &'a PhysicsConfig,
    pub atmosphere: &'a AtmosphereConfig,
}

impl TrimEvaluator<'_> {
    /// Scores `controls`, which must name exactly the active descriptors.
    pub fn evaluate(&self, controls: &ControlVector) -> Result<Evaluation, TrimError> {
        self.check_dimensions(controls)?;

        for descriptor in self.descriptors {
            let in_bounds = controls
                .get(descriptor.kind())
                .is_some_and(|value| descriptor.in_bounds(value));
            if !in_bounds {
                return Ok(Evaluation::out_of_bounds(controls.clone()));
            }
        }

        let candidate = self.unpack(controls);
        if !angles_in_domain(&candidate) {
            return Ok(Evaluation::out_of_bounds(controls.clone()));
        }

        let point = self.evaluate_candidate(&candidate);
        let cost = trim_cost(self.mode, &point.linear_accel, &point.angular_accel);
        debug!(
            "Trim evaluation: cost {:e}, udot {:.4e}, wdot {:.4e}, qdot {:.4e}",
            cost, point.linear_accel.x, point.linear_accel.z, point.angular_accel.y
        );

        Ok(Evaluation {
            controls: controls.clone(),
            cost,
            point: Some(point),
        })
    }

    fn check_dimensions(&self, controls: &ControlVector) -> Result<(), TrimError> {
        if self.descriptors.is_empty() {
            return Err(TrimError::Configuration(
                "no trim controls are selected".to_string(),
            ));
        }
        let matches = controls.len() == self.descriptors.len()
            && self.descriptors.iter().all(|d| controls.contains(d.kind()));
        if !matches {
            return Err(TrimError::Configuration(format!(
                "control vector has {} entries, {} mode expects {:?}",
                controls.len(),
                self.mode,
                self.descriptors.iter().map(|d| d.kind()).collect::<Vec<_>>()
            )));
        }
        Ok(())
    }

    /// Resolves a control vector into a full candidate.
    ///
    /// Commands absent from the vector keep the aircraft's current values and
    /// angles keep the initial conditions, before the mode pins are applied.
    pub(crate) fn unpack(&self, controls: &ControlVector) -> Candidate {
        let ic = self.conditions;
        let mut commands = TrimCommands::from_model(self.model);
        let mut phi = ic.phi;
        let mut theta = ic.theta;
        let mut psi = ic.psi;
        let mut gamma = ic.gamma;
        let mut altitude = ic.altitude;

        for (&kind, &value) in controls.iter() {
            match kind {
                ControlKind::Throttle => commands.throttle = value,
                ControlKind::Elevator => commands.elevator = value,
                ControlKind::Aileron => commands.aileron = value,
                ControlKind::Rudder => commands.rudder = value,
                ControlKind::PitchTrim => commands.pitch_trim = value,
                ControlKind::RollTrim => commands.roll_trim = value,
                ControlKind::YawTrim => commands.yaw_trim = value,
                ControlKind::Roll => phi = value,
                ControlKind::Pitch => theta = value,
                ControlKind::Heading => psi = value,
                ControlKind::FlightPathAngle => gamma = value,
                ControlKind::Altitude => altitude = ic.terrain_elevation + value,
                ControlKind::Alpha | ControlKind::Beta => {}
            }
        }

        // Aerodynamic angles stand in for the attitude they imply
        if let Some(alpha) = controls.get(ControlKind::Alpha) {
            if !controls.contains(ControlKind::Pitch) {
                theta = gamma + alpha;
            }
        }
        if let Some(beta) = controls.get(ControlKind::Beta) {
            if !controls.contains(ControlKind::Heading) {
                psi = ic.psi - beta;
            }
        }

        let mut phi_w = 0.0;
        let mut turn = None;
        match self.mode {
            TrimMode::Longitudinal | TrimMode::Pullup | TrimMode::Ground => {
                phi = 0.0;
                psi = ic.psi;
            }
            TrimMode::FullWingsLevel => phi = 0.0,
            TrimMode::Turn | TrimMode::TurnFull => {
                if self.mode == TrimMode::Turn {
                    theta = coordinated_pitch(gamma, psi);
                }
                phi_w = phi_w_from_nlf(ic.target_nlf, gamma);
                let geometry = turn_geometry(phi_w, gamma, theta, psi);
                phi = geometry.phi;
                turn = Some(geometry);
            }
            TrimMode::Full | TrimMode::Custom | TrimMode::None => {}
        }

        Candidate {
            commands,
            phi,
            theta,
            psi,
            gamma,
            altitude,
            phi_w,
            turn,
        }
    }

    fn body_rates(&self, candidate: &Candidate, airspeed: f64) -> Vector3<f64> {
        let gravity = self.physics.gravity_magnitude();
        match (self.mode, &candidate.turn) {
            (TrimMode::Turn | TrimMode::TurnFull, Some(geometry)) => turn_body_rates(
                turn_rate(candidate.phi_w, airspeed, gravity),
                candidate.phi_w,
                candidate.gamma,
                candidate.theta,
                candidate.psi,
                geometry,
            ),
            (TrimMode::Pullup, _) => Vector3::new(
                0.0,
                pullup_pitch_rate(
                    self.conditions.target_nlf,
                    candidate.gamma,
                    airspeed,
                    gravity,
                ),
                0.0,
            ),
            _ => Vector3::zeros(),
        }
    }

    fn evaluate_candidate(&self, candidate: &Candidate) -> TrimPoint {
        let ic = self.conditions;
        let config = &self.model.config;
        let attitude =
            UnitQuaternion::from_euler_angles(candidate.phi, candidate.theta, candidate.psi);

        // Flight path follows the initial heading whatever the candidate's psi
        let (sin_gamma, cos_gamma) = candidate.gamma.sin_cos();
        let (sin_psi, cos_psi) = ic.psi.sin_cos();
        let velocity_ned = ic.true_airspeed
            * Vector3::new(cos_gamma * cos_psi, cos_gamma * sin_psi, -sin_gamma)
            + ic.wind_ned;
        let mut velocity_body = attitude.inverse() * velocity_ned;
        if matches!(self.mode, TrimMode::Turn | TrimMode::Pullup) {
            velocity_body.y = 0.0;
        }
        let rates_body = self.body_rates(candidate, ic.true_airspeed);

        let mut propulsion = self.model.propulsion.clone();
        for (engine, state) in config
            .propulsion
            .engines
            .iter()
            .zip(propulsion.engine_states.iter_mut())
        {
            state.power_lever = engine.power_lever_for(candidate.commands.throttle);
            steady_state(state, engine);
        }

        let controls = AircraftControlSurfaces {
            elevator: candidate.commands.elevator,
            aileron: candidate.commands.aileron,
            rudder: candidate.commands.rudder,
            pitch_trim: candidate.commands.pitch_trim,
            roll_trim: candidate.commands.roll_trim,
            yaw_trim: candidate.commands.yaw_trim,
        };

        let spatial = SpatialComponent::new(
            Vector3::new(ic.north, ic.east, -candidate.altitude),
            attitude * velocity_body,
            attitude,
            rates_body,
        );
        let density = self.atmosphere.density(candidate.altitude);
        let loads = calculate_loads(
            config,
            &controls,
            &propulsion,
            &spatial,
            &ic.wind_ned,
            density,
            ic.terrain_elevation,
        );

        let gravity_body = attitude.inverse() * self.physics.gravity;
        let accelerations = newton_euler(
            &velocity_body,
            &rates_body,
            &loads.force,
            &loads.moment,
            &gravity_body,
            &config.mass,
        );

        let (alpha_dot, beta_dot) =
            aero_angle_rates(&loads.air_data.relative_velocity_body, &accelerations.linear);

        TrimPoint {
            commands: candidate.commands,
            phi: candidate.phi,
            theta: candidate.theta,
            psi: candidate.psi,
            altitude: candidate.altitude,
            velocity_body,
            rates_body,
            alpha: loads.air_data.alpha,
            beta: loads.air_data.beta,
            gamma: candidate.gamma,
            phi_w: candidate.phi_w,
            linear_accel: accelerations.linear,
            angular_accel: accelerations.angular,
            alpha_dot,
            beta_dot,
            thrust: loads.thrust.first().copied().unwrap_or(0.0),
        }
    }
}

/// Derived angles must stay in range. NaN passes so that it reaches the cost.
fn angles_in_domain(candidate: &Candidate) -> bool {
    let outside = |value: f64, min: f64, max: f64| value < min || value > max;
    !(outside(candidate.psi, 0.0, TAU)
        || outside(candidate.theta, -FRAC_PI_2, FRAC_PI_2)
        || outside(candidate.phi, -PI, PI))
}

/// Rates of change of alpha and beta for a constant wind.
fn aero_angle_rates(velocity: &Vector3<f64>, acceleration: &Vector3<f64>) -> (f64, f64) {
    let (u, v, w) = (velocity.x, velocity.y, velocity.z);
    let (udot, vdot, wdot) = (acceleration.x, acceleration.y, acceleration.z);
    let uw2 = u * u + w * w;
    if uw2 < 1e-12 {
        return (0.0, 0.0);
    }
    let alpha_dot = (u * wdot - w * udot) / uw2;
    let v2 = uw2 + v * v;
    let beta_dot = (vdot * uw2 - v * (u * udot + w * wdot)) / (v2 * uw2.sqrt());
    (alpha_dot, beta_dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ModeConfiguration;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    struct Fixture {
        model: AircraftModel,
        ic: InitialConditions,
        physics: PhysicsConfig,
        atmosphere: AtmosphereConfig,
        modes: ModeConfiguration,
    }

    impl Fixture {
        fn new(mode: TrimMode) -> Self {
            let model = AircraftModel::cessna_172();
            let ic = InitialConditions::level_flight(45.72, 1524.0);
            let mut modes = ModeConfiguration::default();
            modes.select_mode(mode, &model.config, &ic, &BTreeMap::new());
            Self {
                model,
                ic,
                physics: PhysicsConfig::default(),
                atmosphere: AtmosphereConfig::default(),
                modes,
            }
        }

        fn evaluator(&self) -> TrimEvaluator<'_> {
            TrimEvaluator {
                model: &self.model,
                conditions: &self.ic,
                mode: self.modes.mode(),
                descriptors: self.modes.descriptors(),
                physics: &self.physics,
                atmosphere: &self.atmosphere,
            }
        }

        fn initial_vector(&self) -> ControlVector {
            self.modes
                .descriptors()
                .iter()
                .map(|d| (d.kind(), d.initial))
                .collect()
        }
    }

    #[test]
    fn test_longitudinal_pins_roll_and_heading() {
        let mut fixture = Fixture::new(TrimMode::Longitudinal);
        fixture.ic.phi = 0.3;
        fixture.ic.psi = 1.0;
        let candidate = fixture.evaluator().unpack(&fixture.initial_vector());
        assert_eq!(candidate.phi, 0.0);
        assert_eq!(candidate.psi, 1.0);
        assert_eq!(candidate.commands.throttle, 0.5);
    }

    #[test]
    fn test_alpha_control_sets_pitch() {
        let mut fixture = Fixture::new(TrimMode::Longitudinal);
        fixture.modes.remove_control(ControlKind::Pitch);
        fixture.ic.gamma = 0.05;
        let evaluator = fixture.evaluator();
        let mut controls = ControlVector::new();
        controls.insert(ControlKind::Alpha, 0.02);
        let candidate = evaluator.unpack(&controls);
        assert_relative_eq!(candidate.theta, 0.07, epsilon = 1e-12);
    }

    #[test]
    fn test_ground_altitude_is_above_terrain() {
        let mut fixture = Fixture::new(TrimMode::Ground);
        fixture.ic.terrain_elevation = 300.0;
        let mut controls = fixture.initial_vector();
        controls.insert(ControlKind::Altitude, 1.5);
        let candidate = fixture.evaluator().unpack(&controls);
        assert_eq!(candidate.altitude, 301.5);
    }

    #[test]
    fn test_out_of_bounds_is_infinite() {
        let fixture = Fixture::new(TrimMode::Longitudinal);
        let mut controls = fixture.initial_vector();
        controls.insert(ControlKind::Throttle, 1.5);
        let evaluation = fixture.evaluator().evaluate(&controls).expect("valid vector");
        assert!(evaluation.cost.is_infinite());
        assert!(evaluation.point.is_none());
    }

    #[test]
    fn test_wrong_dimension_is_configuration_error() {
        let fixture = Fixture::new(TrimMode::Longitudinal);
        let mut controls = ControlVector::new();
        controls.insert(ControlKind::Throttle, 0.5);
        let result = fixture.evaluator().evaluate(&controls);
        assert!(matches!(result, Err(TrimError::Configuration(_))));
    }

    #[test]
    fn test_pullup_rates() {
        let mut fixture = Fixture::new(TrimMode::Pullup);
        fixture.ic.target_nlf = 2.0;
        let evaluation = fixture
            .evaluator()
            .evaluate(&fixture.initial_vector())
            .expect("valid vector");
        let point = evaluation.point.expect("in bounds");
        assert_eq!(point.rates_body.x, 0.0);
        assert_eq!(point.rates_body.z, 0.0);
        assert_relative_eq!(point.rates_body.y, 9.80665 / 45.72, epsilon = 1e-12);
    }

    #[test]
    fn test_initial_cost_is_finite() {
        let fixture = Fixture::new(TrimMode::Longitudinal);
        let evaluation = fixture
            .evaluator()
            .evaluate(&fixture.initial_vector())
            .expect("valid vector");
        assert!(evaluation.cost.is_finite());
        assert!(evaluation.cost > 0.0);
    }

    #[test]
    fn test_aero_angle_rates() {
        let (alpha_dot, beta_dot) =
            aero_angle_rates(&Vector3::new(50.0, 0.0, 0.0), &Vector3::new(0.0, 1.0, 2.0));
        assert_relative_eq!(alpha_dot, 2.0 / 50.0, epsilon = 1e-12);
        assert_relative_eq!(beta_dot, 1.0 / 50.0, epsilon = 1e-12);
    }
}
