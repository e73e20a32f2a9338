mod cost;
mod error;
mod evaluator;
mod handle_events;
mod minimizer;
mod report;
mod results;
mod solver;
mod system;
mod turn;

pub use cost::trim_cost;
pub use error::TrimError;
pub use evaluator::TrimEvaluator;
pub use handle_events::handle_trim_requests;
pub use minimizer::{initial_simplex, SearchOutcome, SimplexSearch};
pub use report::{ControlSummary, TrimReport};
pub use results::{ResultsWriter, RESULTS_HEADER};
pub use solver::TrimSolver;
pub use system::trim_aircraft_system;
pub use turn::{
    coordinated_pitch, nlf_from_phi_w, phi_w_from_nlf, pullup_pitch_rate, turn_body_rates,
    turn_geometry, turn_rate, TurnGeometry,
};
