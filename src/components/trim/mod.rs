mod config;
mod control;
mod event;
mod file;
mod initial;
mod mode;
mod state;

pub use config::{
    ControlOverride, SearchAlgorithm, SimplexCoefficients, StopCriterion, TrimSolverConfig,
};
pub use control::{
    ControlDescriptor, ControlKind, ControlUnit, ControlVector, DEFAULT_CONTROL_TOLERANCE,
};
pub use event::{NeedsTrim, TrimOutcome, TrimRequest};
pub use file::{SearchSection, TrimConfigFile, TrimSection};
pub use initial::InitialConditions;
pub use mode::{ModeConfiguration, TrimMode};
pub use state::{
    CostRecord, Evaluation, TrimCommands, TrimPoint, TrimResult, TrimState, TrimStats,
};
