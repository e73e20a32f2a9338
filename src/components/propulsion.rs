use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Engine families, each with its own start-up procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Piston,
    Turbine,
    #[default]
    Other,
}

/// Represents the current state of an engine
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PowerplantState {
    /// Current power lever setting (0.0 to 1.0)
    pub power_lever: f64,
    /// Current thrust as a fraction of maximum thrust (0.0 to 1.0)
    pub thrust_fraction: f64,
    /// Current fuel flow rate (kg/s)
    pub fuel_flow: f64,
    /// Engine running status
    pub running: bool,
    /// Fuel is available to the engine
    pub has_fuel: bool,
    /// Starter engaged
    pub starter: bool,
    /// Magneto switch position, 0 off to 3 both (piston)
    pub magnetos: u8,
    /// Mixture lever (piston)
    pub mixture: f64,
    /// Fuel cutoff engaged (turbine)
    pub cutoff: bool,
    /// High pressure spool speed in percent (turbine)
    pub n2: f64,
}

/// Component to track the state of all engines
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PropulsionState {
    /// State of each engine
    pub engine_states: Vec<PowerplantState>,
}

impl Default for PowerplantState {
    fn default() -> Self {
        Self {
            power_lever: 0.0,
            thrust_fraction: 0.0,
            fuel_flow: 0.0,
            running: false,
            has_fuel: true,
            starter: false,
            magnetos: 0,
            mixture: 0.0,
            cutoff: true,
            n2: 0.0,
        }
    }
}

impl Default for PropulsionState {
    fn default() -> Self {
        Self {
            engine_states: vec![PowerplantState::default()],
        }
    }
}

impl PropulsionState {
    /// Creates a new PropulsionState with the specified number of engines
    pub fn new(num_engines: usize) -> Self {
        Self {
            engine_states: vec![PowerplantState::default(); num_engines],
        }
    }

    /// Power lever of every engine, in engine order.
    pub fn power_levers(&self) -> Vec<f64> {
        self.engine_states.iter().map(|s| s.power_lever).collect()
    }

    /// Restores power levers captured with [`PropulsionState::power_levers`].
    pub fn restore_power_levers(&mut self, levers: &[f64]) {
        for (state, lever) in self.engine_states.iter_mut().zip(levers) {
            state.power_lever = *lever;
        }
    }

    pub fn all_running(&self) -> bool {
        self.engine_states.iter().all(|s| s.running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_lever_snapshot() {
        let mut propulsion = PropulsionState::new(2);
        propulsion.engine_states[0].power_lever = 0.3;
        propulsion.engine_states[1].power_lever = 0.6;
        let snapshot = propulsion.power_levers();

        for state in &mut propulsion.engine_states {
            state.power_lever = 1.0;
        }
        propulsion.restore_power_levers(&snapshot);

        assert_eq!(propulsion.power_levers(), vec![0.3, 0.6]);
    }

    #[test]
    fn test_engines_start_stopped() {
        let propulsion = PropulsionState::new(3);
        assert!(!propulsion.all_running());
        assert!(propulsion.engine_states.iter().all(|s| s.has_fuel));
    }
}
