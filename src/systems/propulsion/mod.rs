mod powerplant;
mod start;

pub use powerplant::{
    calculate_engine_outputs, steady_state, update_powerplant_state, EngineOutputs,
    TURBINE_LIGHT_OFF_N2, TURBINE_STARTER_N2,
};
