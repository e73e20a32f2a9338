use argmin::core::{observers::ObserverMode, CostFunction, Error as ArgminError, Executor, State};
use argmin::solver::neldermead::NelderMead;
use argmin_math::{ArgminMul, ArgminSub};
use argmin_observer_slog::SlogLogger;
use bevy::prelude::*;
use std::sync::Mutex;

use crate::components::{Evaluation, SimplexCoefficients, StopCriterion};
use crate::systems::TrimError;

/// Parameters of one evaluation in simplex order, with its result.
type SearchLog = Mutex<Vec<(Vec<f64>, Evaluation)>>;

/// Cost function handed to argmin.
///
/// Every evaluation is logged so the orchestrator can replay them in order;
/// the log length doubles as the evaluation counter.
struct TrimProblem<'a, F> {
    objective: &'a F,
    log: &'a SearchLog,
    budget: usize,
}

impl<F> CostFunction for TrimProblem<'_, F>
where
    F: Fn(&[f64]) -> Result<Evaluation, TrimError> + Sync,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, ArgminError> {
        {
            let log = self.log.lock().unwrap_or_else(|e| e.into_inner());
            if log.len() >= self.budget {
                return Err(ArgminError::new(TrimError::BudgetExhausted(self.budget)));
            }
        }

        let evaluation = (self.objective)(param).map_err(ArgminError::new)?;
        let cost = evaluation.cost;
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((param.clone(), evaluation));

        // The simplex ordering cannot rank NaN
        Ok(if cost.is_nan() { f64::INFINITY } else { cost })
    }
}

/// Every evaluation of a search, in order, with the best one found.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub evaluations: Vec<Evaluation>,
    pub best: Vec<f64>,
    pub best_cost: f64,
    pub phases: usize,
}

/// Nelder-Mead search under an evaluation budget, with optional restarts.
#[derive(Debug, Clone)]
pub struct SimplexSearch {
    pub coefficients: SimplexCoefficients,
    pub tolerance: f64,
    pub budget: usize,
    pub stop: StopCriterion,
    pub trace: bool,
}

impl SimplexSearch {
    /// Minimises `objective` from `initial`, perturbing each dimension by its step.
    pub fn minimize<F>(
        &self,
        initial: &[f64],
        steps: &[f64],
        objective: &F,
    ) -> Result<SearchOutcome, TrimError>
    where
        F: Fn(&[f64]) -> Result<Evaluation, TrimError> + Sync,
    {
        if initial.is_empty() || initial.len() != steps.len() {
            return Err(TrimError::Configuration(format!(
                "simplex needs one step per dimension, got {} values and {} steps",
                initial.len(),
                steps.len()
            )));
        }

        let log: SearchLog = Mutex::new(Vec::new());
        let steps = steps.to_vec();
        let mut start = initial.to_vec();
        let mut phases = 0;

        loop {
            let scale = self.coefficients.sigma.powi(phases as i32);
            let sd_tolerance = self.tolerance * 10f64.powi(-(phases as i32));
            let scaled: Vec<f64> = steps.mul(&scale);

            let exhausted = self.run_phase(&start, &scaled, sd_tolerance, objective, &log)?;
            phases += 1;

            let (best, best_cost) = {
                let entries = log.lock().unwrap_or_else(|e| e.into_inner());
                best_of(&entries, &start)
            };
            debug!(
                "Simplex phase {} finished with cost {:e} after {} evaluations",
                phases,
                best_cost,
                log.lock().unwrap_or_else(|e| e.into_inner()).len()
            );

            if exhausted || self.stop == StopCriterion::StopOnStd {
                break;
            }
            let moved: Vec<f64> = best.sub(&start);
            let displacement = moved.iter().fold(0.0, |max, d| f64::max(max, d.abs()));
            start = best;
            if phases > 1 && displacement <= self.tolerance {
                break;
            }
        }

        let entries = log.into_inner().unwrap_or_else(|e| e.into_inner());
        let (best, best_cost) = best_of(&entries, &start);
        let evaluations = entries.into_iter().map(|(_, e)| e).collect();
        Ok(SearchOutcome {
            evaluations,
            best,
            best_cost,
            phases,
        })
    }

    /// Runs one simplex to convergence. Returns true when the budget ran out.
    fn run_phase<F>(
        &self,
        start: &[f64],
        steps: &[f64],
        sd_tolerance: f64,
        objective: &F,
        log: &SearchLog,
    ) -> Result<bool, TrimError>
    where
        F: Fn(&[f64]) -> Result<Evaluation, TrimError> + Sync,
    {
        let problem = TrimProblem {
            objective,
            log,
            budget: self.budget,
        };
        let c = &self.coefficients;
        let solver = NelderMead::new(initial_simplex(start, steps))
            .with_sd_tolerance(sd_tolerance)?
            .with_alpha(c.alpha)?
            .with_gamma(c.gamma)?
            .with_rho(c.beta)?
            .with_sigma(c.sigma)?;

        let mut executor = Executor::new(problem, solver)
            .configure(|state| state.max_iters(self.budget as u64));
        if self.trace {
            executor = executor.add_observer(SlogLogger::term(), ObserverMode::Always);
        }

        match executor.run() {
            Ok(result) => {
                debug!(
                    "Simplex terminated: {}",
                    result.state.get_termination_status()
                );
                Ok(false)
            }
            Err(error) => match TrimError::from(error) {
                TrimError::BudgetExhausted(_) => Ok(true),
                other => Err(other),
            },
        }
    }
}

/// Vertex 0 holds the start, vertex i moves dimension i - 1 by its step.
pub fn initial_simplex(start: &[f64], steps: &[f64]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(start.len() + 1);
    simplex.push(start.to_vec());
    for (i, step) in steps.iter().enumerate() {
        let mut vertex = start.to_vec();
        vertex[i] += step;
        simplex.push(vertex);
    }
    simplex
}

/// Lowest finite cost in the log, or `fallback` when nothing finite was seen.
fn best_of(entries: &[(Vec<f64>, Evaluation)], fallback: &[f64]) -> (Vec<f64>, f64) {
    entries
        .iter()
        .filter(|(_, e)| e.cost.is_finite())
        .min_by(|(_, a), (_, b)| a.cost.total_cmp(&b.cost))
        .map(|(params, e)| (params.clone(), e.cost))
        .unwrap_or_else(|| (fallback.to_vec(), f64::INFINITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ControlVector;
    use argmin_testfunctions::sphere;

    fn search(stop: StopCriterion, budget: usize) -> SimplexSearch {
        SimplexSearch {
            coefficients: SimplexCoefficients::default(),
            tolerance: 1e-10,
            budget,
            stop,
            trace: false,
        }
    }

    fn scored(cost: f64) -> Result<Evaluation, TrimError> {
        Ok(Evaluation {
            controls: ControlVector::new(),
            cost,
            point: None,
        })
    }

    #[test]
    fn test_initial_simplex_layout() {
        let simplex = initial_simplex(&[1.0, 2.0], &[0.5, -0.25]);
        assert_eq!(simplex, vec![vec![1.0, 2.0], vec![1.5, 2.0], vec![1.0, 1.75]]);
    }

    #[test]
    fn test_sphere_converges() {
        let objective = |x: &[f64]| scored(sphere(x));
        let outcome = search(StopCriterion::StopOnDelta, 2500)
            .minimize(&[1.0, -0.5], &[0.1, 0.1], &objective)
            .expect("search runs");
        assert!(outcome.best_cost < 1e-8, "cost {}", outcome.best_cost);
        assert!(outcome.best.iter().all(|x| x.abs() < 1e-3));
        assert!(outcome.phases >= 2);
    }

    #[test]
    fn test_budget_ends_search_normally() {
        let objective = |x: &[f64]| scored(sphere(x));
        let outcome = search(StopCriterion::StopOnStd, 10)
            .minimize(&[1.0, -0.5, 2.0], &[0.1, 0.1, 0.1], &objective)
            .expect("budget is not an error");
        assert_eq!(outcome.evaluations.len(), 10);
        assert_eq!(outcome.phases, 1);
    }

    #[test]
    fn test_objective_errors_propagate() {
        let objective = |_: &[f64]| -> Result<Evaluation, TrimError> {
            Err(TrimError::Configuration("broken model".into()))
        };
        let result = search(StopCriterion::StopOnStd, 100).minimize(&[0.0], &[1.0], &objective);
        assert!(matches!(result, Err(TrimError::Configuration(_))));
    }

    #[test]
    fn test_nan_costs_do_not_abort() {
        let objective = |_: &[f64]| scored(f64::NAN);
        let outcome = search(StopCriterion::StopOnDelta, 50)
            .minimize(&[0.0, 0.0], &[1.0, 1.0], &objective)
            .expect("search runs");
        assert!(outcome.best_cost.is_infinite());
        assert_eq!(outcome.best, vec![0.0, 0.0]);
    }

    #[test]
    fn test_mismatched_steps_rejected() {
        let objective = |x: &[f64]| scored(sphere(x));
        let result = search(StopCriterion::StopOnStd, 10).minimize(&[0.0, 1.0], &[1.0], &objective);
        assert!(matches!(result, Err(TrimError::Configuration(_))));
    }
}
