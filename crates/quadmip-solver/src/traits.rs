//! Engine and solution traits.

use crate::{
    ConstraintHandle, EngineSolution, Sense, SolverConfig, SolverError, SolverStatus,
    VariableHandle, VariableKind,
};

/// Trait for accessing solution data from a solver.
pub trait SolutionView {
    /// Get the objective value of the solution.
    fn objective_value(&self) -> f64;

    /// Get the solver status.
    fn status(&self) -> SolverStatus;

    /// Get the solve time in seconds.
    fn solve_time_seconds(&self) -> f64;

    /// Check if the solution is optimal.
    fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    /// Check if the solution is feasible.
    fn is_feasible(&self) -> bool {
        self.status().is_feasible()
    }

    /// Check if the solution is infeasible.
    fn is_infeasible(&self) -> bool {
        self.status().is_infeasible()
    }

    /// Check if the solution is unbounded.
    fn is_unbounded(&self) -> bool {
        self.status().is_unbounded()
    }

    /// False only when the solve proved infeasibility or unboundedness.
    fn succeeded(&self) -> bool {
        !self.status().is_failure()
    }
}

/// The primitives a MIP backend exposes to the modeling layer.
///
/// Handles are dense and assigned in registration order starting at zero.
/// Constraints are written `lower <= terms <= upper` with `None` meaning
/// unbounded on that side.
pub trait Engine {
    /// Register a column. Infinite bounds mean free on that side.
    fn register_variable(
        &mut self,
        kind: VariableKind,
        lower: f64,
        upper: f64,
        objective_coefficient: f64,
    ) -> Result<VariableHandle, SolverError>;

    fn register_linear_constraint(
        &mut self,
        terms: &[(VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError>;

    /// Register a row with degree-2 terms `coefficient * a * b` (`a` may equal `b`).
    fn register_bilinear_constraint(
        &mut self,
        linear: &[(VariableHandle, f64)],
        bilinear: &[(VariableHandle, VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError>;

    /// Remove a previously registered row. Unknown or removed handles fail.
    fn unregister_constraint(&mut self, handle: ConstraintHandle) -> Result<(), SolverError>;

    /// Branching priority hint. Engines without priorities ignore it.
    fn set_branching_priority(
        &mut self,
        handle: VariableHandle,
        priority: i32,
    ) -> Result<(), SolverError> {
        let _ = (handle, priority);
        Ok(())
    }

    /// Primal point the next optimize should start from.
    ///
    /// Columns not listed take [`default_primal_value`](crate::default_primal_value)
    /// of their bounds. An empty slice clears the hint. Engines that check the
    /// hint report a violated one from `optimize` as
    /// [`SolverError::InfeasibleHint`]; engines without warm starts ignore it.
    fn set_solution_hint(&mut self, values: &[(VariableHandle, f64)]) -> Result<(), SolverError> {
        let _ = values;
        Ok(())
    }

    /// Solve the current model.
    ///
    /// `objective` replaces the registered objective coefficients for this
    /// call when given; variables it does not mention get coefficient zero.
    ///
    /// # Errors
    ///
    /// Returns a `SolverError` if:
    /// - No variables are registered
    /// - A solution hint is set and infeasible
    /// - The backend fails internally
    fn optimize(
        &mut self,
        sense: Sense,
        objective: Option<&[(VariableHandle, f64)]>,
        config: &SolverConfig,
    ) -> Result<EngineSolution, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixtureSolution {
        status: SolverStatus,
    }

    impl SolutionView for FixtureSolution {
        fn objective_value(&self) -> f64 {
            0.0
        }

        fn status(&self) -> SolverStatus {
            self.status
        }

        fn solve_time_seconds(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_solution_view_default_is_optimal() {
        let solution = FixtureSolution {
            status: SolverStatus::Optimal,
        };
        assert!(solution.is_optimal());
        assert!(solution.is_feasible());
        assert!(!solution.is_infeasible());
        assert!(!solution.is_unbounded());
        assert!(solution.succeeded());
    }

    #[test]
    fn test_solution_view_default_is_infeasible() {
        let solution = FixtureSolution {
            status: SolverStatus::Infeasible,
        };
        assert!(!solution.is_optimal());
        assert!(!solution.is_feasible());
        assert!(solution.is_infeasible());
        assert!(!solution.succeeded());
    }

    #[test]
    fn test_solution_view_infeasible_or_unbounded_fails() {
        let solution = FixtureSolution {
            status: SolverStatus::InfeasibleOrUnbounded,
        };
        assert!(!solution.is_infeasible());
        assert!(!solution.is_unbounded());
        assert!(!solution.succeeded());
    }

    #[test]
    fn test_solution_view_time_limit_succeeds() {
        let solution = FixtureSolution {
            status: SolverStatus::ReachedTimeLimit,
        };
        assert!(!solution.is_optimal());
        assert!(solution.is_feasible());
        assert!(solution.succeeded());
    }
}
