use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::components::{
    ConfigError, ControlKind, ControlOverride, InitialConditions, SearchAlgorithm,
    SimplexCoefficients, StopCriterion, TrimMode, TrimSolverConfig,
};

/// Bank angles at or beyond this magnitude (deg) leave the load factor untouched.
const MAX_TURN_BANK_DEG: f64 = 89.5;

/// Search block of a trim file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    #[serde(rename = "type")]
    pub algorithm: SearchAlgorithm,
    pub sigma: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub initial_step: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub stop_criterion: StopCriterion,
}

impl Default for SearchSection {
    fn default() -> Self {
        let solver = TrimSolverConfig::default();
        let coefficients = solver.coefficients;
        Self {
            algorithm: solver.search,
            sigma: coefficients.sigma,
            alpha: coefficients.alpha,
            beta: coefficients.beta,
            gamma: coefficients.gamma,
            initial_step: solver.initial_step,
            tolerance: solver.tolerance,
            max_iterations: solver.max_iterations,
            stop_criterion: solver.stop_criterion,
        }
    }
}

/// Target condition of a trim file. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimSection {
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
    pub gamma: f64,
    /// Target load factor, overrides the one implied by a turn's bank angle
    pub nlf: Option<f64>,
    /// True airspeed (m/s), keeps the current value when absent
    pub airspeed: Option<f64>,
    /// Altitude MSL (m), keeps the current value when absent
    pub altitude: Option<f64>,
}

impl Default for TrimSection {
    fn default() -> Self {
        Self {
            phi: 0.0,
            theta: 0.0,
            psi: 0.0,
            gamma: 0.0,
            nlf: None,
            airspeed: None,
            altitude: None,
        }
    }
}

/// A complete trim case as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfigFile {
    pub name: String,
    pub mode: TrimMode,
    pub search: SearchSection,
    pub trim: TrimSection,
    pub controls: BTreeMap<ControlKind, ControlOverride>,
    pub output_file: Option<PathBuf>,
}

impl TrimConfigFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&file_contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let file: TrimConfigFile = serde_yaml::from_str(contents)?;
        file.solver_config().validate()?;
        Ok(file)
    }

    /// Solver settings described by this file.
    pub fn solver_config(&self) -> TrimSolverConfig {
        TrimSolverConfig {
            search: self.search.algorithm,
            coefficients: SimplexCoefficients {
                sigma: self.search.sigma,
                alpha: self.search.alpha,
                beta: self.search.beta,
                gamma: self.search.gamma,
            },
            initial_step: self.search.initial_step,
            tolerance: self.search.tolerance,
            max_iterations: self.search.max_iterations,
            stop_criterion: self.search.stop_criterion,
            control_overrides: self.controls.clone(),
            output_file: self.output_file.clone(),
            trace_search: false,
        }
    }

    /// Writes the target condition into `conditions`.
    ///
    /// For coordinated turns banked less than 89.5 degrees the load factor
    /// follows from the bank angle as `1 / cos(phi)`. An explicit `nlf` wins
    /// over it; without either the current target is kept.
    pub fn apply(&self, conditions: &mut InitialConditions) {
        conditions.phi = self.trim.phi.to_radians();
        conditions.theta = self.trim.theta.to_radians();
        conditions.psi = self.trim.psi.to_radians();
        conditions.gamma = self.trim.gamma.to_radians();
        if let Some(airspeed) = self.trim.airspeed {
            conditions.true_airspeed = airspeed;
        }
        if let Some(altitude) = self.trim.altitude {
            conditions.altitude = altitude;
        }

        if self.mode == TrimMode::Turn && self.trim.phi.abs() < MAX_TURN_BANK_DEG {
            conditions.target_nlf = 1.0 / conditions.phi.cos();
        }
        if let Some(nlf) = self.trim.nlf {
            conditions.target_nlf = nlf;
        }
    }
}
