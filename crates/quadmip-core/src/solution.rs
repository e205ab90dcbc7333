use quadmip_expr::{Expr, VariableId};
use quadmip_solver::{SolutionView, SolverStatus};
use std::collections::BTreeMap;

/// Result of `Model::optimize`, keyed by the model's own variable ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolverStatus,
    /// Objective value including any constant offset of the objective.
    pub objective_value: f64,
    /// Value of every user variable; empty when the engine returned none.
    pub values: BTreeMap<VariableId, f64>,
    pub solve_time_seconds: f64,
}

impl Solution {
    pub fn value(&self, id: VariableId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// Evaluate an expression at this solution.
    ///
    /// Returns `None` if any variable of the expression has no value.
    pub fn evaluate(&self, expr: &Expr) -> Option<f64> {
        expr.terms().iter().try_fold(0.0, |acc, (key, coeff)| {
            key.variables()
                .iter()
                .try_fold(*coeff, |product, var| Some(product * self.value(*var)?))
                .map(|term| acc + term)
        })
    }
}

impl SolutionView for Solution {
    fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn status(&self) -> SolverStatus {
        self.status
    }

    fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }
}
