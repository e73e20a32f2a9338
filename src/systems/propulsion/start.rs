use crate::components::{EngineKind, PowerplantConfig, PowerplantState};
use crate::systems::update_powerplant_state;

/// Time step of one start attempt (s).
const START_ATTEMPT_DT: f64 = 0.1;
const PISTON_START_ATTEMPTS: usize = 100;
const TURBINE_START_ATTEMPTS: usize = 5000;
const PISTON_START_MIXTURE: f64 = 0.87;

impl EngineKind {
    /// Puts the engine controls in their start configuration.
    pub fn prepare(&self, state: &mut PowerplantState) {
        match self {
            EngineKind::Piston => {
                state.mixture = PISTON_START_MIXTURE;
                state.magnetos = 3;
                state.starter = true;
            }
            EngineKind::Turbine => {
                state.cutoff = false;
                state.starter = true;
            }
            EngineKind::Other => {}
        }
    }

    pub fn start_attempts(&self) -> usize {
        match self {
            EngineKind::Piston => PISTON_START_ATTEMPTS,
            EngineKind::Turbine => TURBINE_START_ATTEMPTS,
            EngineKind::Other => 1,
        }
    }

    /// Cranks the engine until it runs or the attempt budget is spent.
    ///
    /// Returns whether the engine is running. The starter is released either way.
    pub fn start_up(&self, state: &mut PowerplantState, config: &PowerplantConfig) -> bool {
        if state.running {
            state.starter = false;
            return true;
        }

        if *self == EngineKind::Other {
            state.running = state.has_fuel;
            return state.running;
        }

        for _ in 0..self.start_attempts() {
            state.starter = true;
            if *self == EngineKind::Piston {
                state.magnetos = 3;
            }
            update_powerplant_state(state, config, START_ATTEMPT_DT);
            if state.running {
                break;
            }
        }

        state.starter = false;
        state.running
    }
}
