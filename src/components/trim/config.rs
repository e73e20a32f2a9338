use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::components::{ConfigError, ControlKind};

/// Search algorithm used to minimise the trim cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    #[default]
    #[serde(alias = "nelder-mead", alias = "Nelder-Mead")]
    NelderMead,
}

/// When a simplex search is considered finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopCriterion {
    /// Stop once the spread of vertex costs drops below the tolerance.
    #[serde(alias = "Stop-On-Std")]
    StopOnStd,
    /// Restart around the best vertex until it stops moving.
    #[default]
    #[serde(alias = "Stop-On-Delta")]
    StopOnDelta,
}

/// Simplex coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplexCoefficients {
    /// Shrink.
    pub sigma: f64,
    /// Reflection.
    pub alpha: f64,
    /// Contraction.
    pub beta: f64,
    /// Expansion.
    pub gamma: f64,
}

impl Default for SimplexCoefficients {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            alpha: 1.0,
            beta: 0.5,
            gamma: 2.0,
        }
    }
}

/// Per-control replacement for the default initial value and step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOverride {
    pub initial_value: Option<f64>,
    pub step_size: Option<f64>,
}

/// Configuration for the trim solver
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimSolverConfig {
    pub search: SearchAlgorithm,
    pub coefficients: SimplexCoefficients,
    /// Simplex step used when a control has no positive step of its own
    pub initial_step: f64,
    /// Convergence tolerance on the cost
    pub tolerance: f64,
    /// Maximum number of cost evaluations
    pub max_iterations: usize,
    pub stop_criterion: StopCriterion,
    pub control_overrides: BTreeMap<ControlKind, ControlOverride>,
    /// Optional CSV file receiving one row per improving evaluation
    pub output_file: Option<PathBuf>,
    /// Log every simplex iteration through the argmin observer
    pub trace_search: bool,
}

impl Default for TrimSolverConfig {
    fn default() -> Self {
        Self {
            search: SearchAlgorithm::NelderMead,
            coefficients: SimplexCoefficients::default(),
            initial_step: 0.01,
            tolerance: 1e-10,
            max_iterations: 2500,
            stop_criterion: StopCriterion::StopOnDelta,
            control_overrides: BTreeMap::new(),
            output_file: None,
            trace_search: false,
        }
    }
}

impl TrimSolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.coefficients;
        if c.alpha <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Reflection coefficient must be positive".into(),
            ));
        }
        if c.gamma <= 1.0 {
            return Err(ConfigError::ValidationError(
                "Expansion coefficient must be greater than one".into(),
            ));
        }
        if c.beta <= 0.0 || c.beta > 0.5 {
            return Err(ConfigError::ValidationError(
                "Contraction coefficient must be in (0, 0.5]".into(),
            ));
        }
        if c.sigma <= 0.0 || c.sigma > 1.0 {
            return Err(ConfigError::ValidationError(
                "Shrink coefficient must be in (0, 1]".into(),
            ));
        }
        if self.tolerance < 0.0 {
            return Err(ConfigError::ValidationError(
                "Tolerance must be non-negative".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "Evaluation budget must be positive".into(),
            ));
        }
        Ok(())
    }
}
