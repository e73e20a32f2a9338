use thiserror::Error;

use crate::components::ConfigError;

#[derive(Error, Debug)]
pub enum TrimError {
    /// The solver was asked to do something its current setup cannot support.
    #[error("Invalid trim configuration: {0}")]
    Configuration(String),
    /// Raised inside the objective to stop the search once the budget is spent.
    #[error("Evaluation budget of {0} exhausted")]
    BudgetExhausted(usize),
    #[error("Minimizer failure: {0}")]
    Minimizer(String),
    #[error("Failed to write trim results: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<argmin::core::Error> for TrimError {
    fn from(error: argmin::core::Error) -> Self {
        match error.downcast::<TrimError>() {
            Ok(trim_error) => trim_error,
            Err(other) => TrimError::Minimizer(other.to_string()),
        }
    }
}
