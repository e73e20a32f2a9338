use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{
    AircraftControlSurfaces, AircraftModel, ControlDescriptor, ControlKind, ControlVector,
    CostRecord, Evaluation, FullAircraftConfig, InitialConditions, ModeConfiguration,
    PropulsionState, SpatialComponent, TrimCommands, TrimMode, TrimPoint, TrimResult,
    TrimSolverConfig, TrimState, TrimStats,
};
use crate::resources::{AtmosphereConfig, PhysicsConfig};
use crate::systems::{
    apply_velocity_limits, calculate_loads, integrate_rk4, newton_euler, pullup_pitch_rate,
    steady_state, turn_body_rates, turn_geometry, turn_rate, BodyAccelerations,
    ControlSummary, ResultsWriter, SimplexSearch, StateDerivatives, TrimError, TrimEvaluator,
    TrimReport,
};

/// Finds the control settings and attitude that null the aircraft's accelerations.
///
/// A solver owns the search setup (mode and free variables) and the record of
/// the best point found. The aircraft itself is only borrowed for a solve.
pub struct TrimSolver {
    config: TrimSolverConfig,
    physics: PhysicsConfig,
    atmosphere: AtmosphereConfig,
    modes: ModeConfiguration,
    record: CostRecord,
    success: bool,
    best_point: Option<TrimPoint>,
    state: TrimState,
    results: Option<ResultsWriter>,
    report: Option<TrimReport>,
    stats: TrimStats,
}

impl TrimSolver {
    pub fn new(config: TrimSolverConfig) -> Self {
        Self {
            config,
            physics: PhysicsConfig::default(),
            atmosphere: AtmosphereConfig::default(),
            modes: ModeConfiguration::default(),
            record: CostRecord::default(),
            success: false,
            best_point: None,
            state: TrimState::default(),
            results: None,
            report: None,
            stats: TrimStats::default(),
        }
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: AtmosphereConfig) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn config(&self) -> &TrimSolverConfig {
        &self.config
    }

    pub fn mode(&self) -> TrimMode {
        self.modes.mode()
    }

    pub fn controls(&self) -> &[ControlDescriptor] {
        self.modes.descriptors()
    }

    pub fn select_mode(
        &mut self,
        mode: TrimMode,
        aircraft: &FullAircraftConfig,
        conditions: &InitialConditions,
    ) {
        self.modes
            .select_mode(mode, aircraft, conditions, &self.config.control_overrides);
    }

    pub fn add_control(
        &mut self,
        kind: ControlKind,
        aircraft: &FullAircraftConfig,
        conditions: &InitialConditions,
    ) -> bool {
        let added = self.modes.add_control(kind, aircraft, conditions);
        if !added {
            warn!("Trim control {} is already selected", kind);
        }
        added
    }

    pub fn remove_control(&mut self, kind: ControlKind) -> bool {
        self.modes.remove_control(kind)
    }

    pub fn edit_control(
        &mut self,
        kind: ControlKind,
        initial: f64,
        step: f64,
        min: f64,
        max: f64,
    ) -> bool {
        self.modes.edit_control(kind, initial, step, min, max)
    }

    pub fn clear_controls(&mut self) {
        self.modes.clear_controls();
    }

    /// Sends one row per improving evaluation to `writer` from the next solve on.
    pub fn set_results_writer(&mut self, writer: ResultsWriter) {
        self.results = Some(writer);
    }

    pub fn report(&self) -> Option<&TrimReport> {
        self.report.as_ref()
    }

    pub fn stats(&self) -> TrimStats {
        self.stats
    }

    pub fn trim_state(&self) -> &TrimState {
        &self.state
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn best_cost(&self) -> f64 {
        self.record.best_cost
    }

    fn evaluator<'a>(
        &'a self,
        model: &'a AircraftModel,
        conditions: &'a InitialConditions,
    ) -> TrimEvaluator<'a> {
        TrimEvaluator {
            model,
            conditions,
            mode: self.modes.mode(),
            descriptors: self.modes.descriptors(),
            physics: &self.physics,
            atmosphere: &self.atmosphere,
        }
    }

    /// Scores `controls` against the current mode without touching the aircraft.
    pub fn evaluate(
        &self,
        model: &AircraftModel,
        conditions: &InitialConditions,
        controls: &ControlVector,
    ) -> Result<Evaluation, TrimError> {
        self.evaluator(model, conditions).evaluate(controls)
    }

    pub fn cost(
        &self,
        model: &AircraftModel,
        conditions: &InitialConditions,
        controls: &ControlVector,
    ) -> Result<f64, TrimError> {
        Ok(self.evaluate(model, conditions, controls)?.cost)
    }

    /// Offers an evaluation to the best-point record.
    ///
    /// Returns true when it improved on the record, in which case the descriptors,
    /// the trim state and the results stream are updated from it.
    pub fn consider(
        &mut self,
        iteration: usize,
        evaluation: &Evaluation,
    ) -> Result<bool, TrimError> {
        if !self.record.offer(evaluation.cost, &evaluation.controls) {
            return Ok(false);
        }

        for descriptor in self.modes.descriptors_mut() {
            if let Some(value) = evaluation.controls.get(descriptor.kind()) {
                descriptor.value = value;
            }
        }
        if let Some(point) = &evaluation.point {
            self.state.update_from_point(point);
            if let Some(writer) = &mut self.results {
                writer.write_row(iteration, evaluation.cost, point)?;
            }
            self.best_point = Some(point.clone());
        }
        if evaluation.cost <= self.config.tolerance {
            self.success = true;
        }
        Ok(true)
    }

    /// Trims `model` at the condition in `conditions`.
    ///
    /// The best point found is committed to both even when the search does not
    /// converge; the result tells whether it did.
    pub fn do_trim(
        &mut self,
        model: &mut AircraftModel,
        conditions: &mut InitialConditions,
    ) -> Result<TrimResult, TrimError> {
        self.config.validate()?;
        if self.modes.is_empty() {
            return Err(TrimError::Configuration(
                "no trim controls are selected".to_string(),
            ));
        }

        self.record.reset();
        self.success = false;
        self.best_point = None;
        let initial_conditions = conditions.clone();

        start_engines(model);

        conditions.angular_rates = Vector3::zeros();
        self.state = TrimState::from_conditions(conditions);
        self.set_up_kinematics(conditions);

        if self.results.is_none() {
            if let Some(path) = &self.config.output_file {
                self.results = Some(ResultsWriter::create(path)?);
            }
        }
        if let Some(writer) = &mut self.results {
            writer.write_header()?;
        }

        let outcome = {
            let kinds = self.modes.kinds();
            let initial: Vec<f64> = self.controls().iter().map(|d| d.initial).collect();
            let steps: Vec<f64> = self
                .controls()
                .iter()
                .map(|d| if d.step > 0.0 { d.step } else { self.config.initial_step })
                .collect();
            let search = SimplexSearch {
                coefficients: self.config.coefficients,
                tolerance: self.config.tolerance,
                budget: self.config.max_iterations,
                stop: self.config.stop_criterion,
                trace: self.config.trace_search,
            };

            let evaluator = self.evaluator(model, conditions);
            let objective = |params: &[f64]| -> Result<Evaluation, TrimError> {
                let controls = ControlVector::from_parts(&kinds, params).ok_or_else(|| {
                    TrimError::Configuration(format!(
                        "{} parameters for {} controls",
                        params.len(),
                        kinds.len()
                    ))
                })?;
                evaluator.evaluate(&controls)
            };
            search.minimize(&initial, &steps, &objective)?
        };

        for (i, evaluation) in outcome.evaluations.iter().enumerate() {
            self.consider(i + 1, evaluation)?;
        }
        if let Some(writer) = &mut self.results {
            writer.flush()?;
        }

        match self.best_point.clone() {
            Some(point) => self.commit(&point, model, conditions),
            None => warn!("Trim found no admissible point, aircraft state left unchanged"),
        }

        let settling = self.settle(model, conditions);

        let evaluations = outcome.evaluations.len();
        self.stats.total_evaluations += evaluations;
        self.stats.solves += 1;

        self.report = Some(TrimReport {
            aircraft: model.config.name.clone(),
            mode: self.modes.mode(),
            success: self.success,
            cost: self.record.best_cost,
            evaluations,
            improvements: self.record.improvements,
            state: self.state,
            controls: self.controls().iter().map(ControlSummary::from).collect(),
            initial: initial_conditions,
            trimmed: conditions.clone(),
        });

        if self.success {
            info!(
                "{} trimmed in {} mode: cost {:e} after {} evaluations ({} simplex phases)",
                model.config.name,
                self.modes.mode(),
                self.record.best_cost,
                evaluations,
                outcome.phases
            );
        } else {
            warn!(
                "{} trim in {} mode did not converge: best cost {:e} after {} evaluations",
                model.config.name,
                self.modes.mode(),
                self.record.best_cost,
                evaluations
            );
        }

        Ok(TrimResult {
            success: self.success,
            cost: self.record.best_cost,
            evaluations,
            improvements: self.record.improvements,
            state: self.state,
            commands: TrimCommands::from_model(model),
            settling_linear_accel: settling.linear,
            settling_angular_accel: settling.angular,
        })
    }

    /// Writes the prescribed rates of turns and pull-ups into the conditions.
    fn set_up_kinematics(&mut self, conditions: &mut InitialConditions) {
        let gravity = self.physics.gravity_magnitude();
        match self.modes.mode() {
            TrimMode::Turn | TrimMode::TurnFull => {
                let phi_w = self.state.phi_w();
                let geometry =
                    turn_geometry(phi_w, conditions.gamma, conditions.theta, conditions.psi);
                conditions.angular_rates = turn_body_rates(
                    turn_rate(phi_w, conditions.true_airspeed, gravity),
                    phi_w,
                    conditions.gamma,
                    conditions.theta,
                    conditions.psi,
                    &geometry,
                );
            }
            TrimMode::Pullup => {
                conditions.angular_rates.y = pullup_pitch_rate(
                    conditions.target_nlf,
                    conditions.gamma,
                    conditions.true_airspeed,
                    gravity,
                );
            }
            _ => {}
        }
        self.state.rates_body = conditions.angular_rates;
    }

    fn commit(
        &self,
        point: &TrimPoint,
        model: &mut AircraftModel,
        conditions: &mut InitialConditions,
    ) {
        for descriptor in self.controls() {
            descriptor.write(descriptor.value, model, conditions);
        }
        conditions.phi = point.phi;
        conditions.theta = point.theta;
        conditions.psi = point.psi;
        conditions.alpha = point.alpha;
        conditions.beta = point.beta;
        conditions.gamma = point.gamma;
        conditions.altitude = point.altitude;
        conditions.angular_rates = point.rates_body;

        point.commands.apply(model);
        for (engine, state) in model
            .config
            .propulsion
            .engines
            .iter()
            .zip(model.propulsion.engine_states.iter_mut())
        {
            steady_state(state, engine);
        }

        let attitude = UnitQuaternion::from_euler_angles(point.phi, point.theta, point.psi);
        model.spatial = SpatialComponent::new(
            Vector3::new(conditions.north, conditions.east, -point.altitude),
            attitude * point.velocity_body,
            attitude,
            point.rates_body,
        );
    }

    /// Advances the full model by one time step and returns the accelerations
    /// it is left with.
    fn settle(
        &self,
        model: &mut AircraftModel,
        conditions: &InitialConditions,
    ) -> BodyAccelerations {
        let AircraftModel {
            config,
            controls,
            propulsion,
            spatial,
        } = model;
        let environment = Environment {
            physics: &self.physics,
            atmosphere: &self.atmosphere,
            wind_ned: conditions.wind_ned,
            terrain_elevation: conditions.terrain_elevation,
        };

        integrate_rk4(spatial, self.physics.timestep, |s| {
            let accelerations = environment.accelerations(config, controls, propulsion, s);
            let velocity_body = s.velocity_body();
            StateDerivatives {
                velocity: s.velocity,
                acceleration: s.attitude
                    * (accelerations.linear + s.angular_velocity.cross(&velocity_body)),
                angular_acceleration: accelerations.angular,
            }
        });
        apply_velocity_limits(
            spatial,
            self.physics.max_velocity,
            self.physics.max_angular_velocity,
        );

        environment.accelerations(config, controls, propulsion, spatial)
    }
}

/// Surroundings of a settling step.
struct Environment<'a> {
    physics: &'a PhysicsConfig,
    atmosphere: &'a AtmosphereConfig,
    wind_ned: Vector3<f64>,
    terrain_elevation: f64,
}

impl Environment<'_> {
    fn accelerations(
        &self,
        config: &FullAircraftConfig,
        controls: &AircraftControlSurfaces,
        propulsion: &PropulsionState,
        spatial: &SpatialComponent,
    ) -> BodyAccelerations {
        let loads = calculate_loads(
            config,
            controls,
            propulsion,
            spatial,
            &self.wind_ned,
            self.atmosphere.density(spatial.altitude()),
            self.terrain_elevation,
        );
        newton_euler(
            &spatial.velocity_body(),
            &spatial.angular_velocity,
            &loads.force,
            &loads.moment,
            &(spatial.attitude.inverse() * self.physics.gravity),
            &config.mass,
        )
    }
}

/// Starts every engine at full throttle, then restores the pilot's levers.
fn start_engines(model: &mut AircraftModel) {
    let levers = model.propulsion.power_levers();
    model.set_throttle(1.0);

    for (engine, state) in model
        .config
        .propulsion
        .engines
        .iter()
        .zip(model.propulsion.engine_states.iter_mut())
    {
        engine.kind.prepare(state);
        steady_state(state, engine);
        if !engine.kind.start_up(state, engine) {
            warn!(
                "Engine {} did not start after {} attempts, trimming anyway",
                engine.name,
                engine.kind.start_attempts()
            );
        }
        steady_state(state, engine);
    }

    model.propulsion.restore_power_levers(&levers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EngineKind;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn cruise() -> (AircraftModel, InitialConditions) {
        (
            AircraftModel::cessna_172(),
            InitialConditions::level_flight(45.72, 1524.0),
        )
    }

    #[test]
    fn test_trim_without_controls_is_rejected() {
        let (mut model, mut ic) = cruise();
        let mut solver = TrimSolver::new(TrimSolverConfig::default());
        let result = solver.do_trim(&mut model, &mut ic);
        assert!(matches!(result, Err(TrimError::Configuration(_))));
    }

    #[test]
    fn test_invalid_coefficients_are_rejected() {
        let (mut model, mut ic) = cruise();
        let mut config = TrimSolverConfig::default();
        config.coefficients.gamma = 0.5;
        let mut solver = TrimSolver::new(config);
        solver.select_mode(TrimMode::Longitudinal, &model.config, &ic);
        assert!(matches!(
            solver.do_trim(&mut model, &mut ic),
            Err(TrimError::Config(_))
        ));
    }

    #[test]
    fn test_engines_start_and_levers_are_restored() {
        let mut model = AircraftModel::cessna_172();
        assert_eq!(model.config.propulsion.engines[0].kind, EngineKind::Piston);
        model.set_throttle(0.3);
        start_engines(&mut model);
        assert!(model.propulsion.all_running());
        assert_eq!(model.propulsion.power_levers(), vec![0.3]);
        assert!(!model.propulsion.engine_states[0].starter);
    }

    #[test]
    fn test_consider_keeps_best() {
        let (model, ic) = cruise();
        let mut solver = TrimSolver::new(TrimSolverConfig::default());
        solver.select_mode(TrimMode::Longitudinal, &model.config, &ic);

        let mut controls: ControlVector = solver
            .controls()
            .iter()
            .map(|d| (d.kind(), d.initial))
            .collect();
        let first = solver.evaluate(&model, &ic, &controls).unwrap();
        controls.insert(ControlKind::Throttle, 2.0);
        let rejected = solver.evaluate(&model, &ic, &controls).unwrap();

        assert!(solver.consider(1, &first).unwrap());
        assert!(!solver.consider(2, &rejected).unwrap());
        assert_eq!(solver.best_cost(), first.cost);
        assert_eq!(solver.controls()[0].value, 0.5);
    }

    #[test]
    fn test_pullup_sets_pitch_rate() {
        let (_, mut ic) = cruise();
        let model = AircraftModel::cessna_172();
        ic.target_nlf = 2.0;
        let mut solver = TrimSolver::new(TrimSolverConfig::default());
        solver.select_mode(TrimMode::Pullup, &model.config, &ic);
        solver.state = TrimState::from_conditions(&ic);
        solver.set_up_kinematics(&mut ic);
        assert_relative_eq!(ic.angular_rates.y, 9.80665 / 45.72, epsilon = 1e-12);
        assert_eq!(solver.trim_state().rates_body, ic.angular_rates);
    }
}
