//! Outcome of one [`Engine::optimize`](crate::Engine::optimize) call.
//!
//! Every engine maps its native status onto [`SolverStatus`] and returns it in
//! [`EngineSolution::status`](crate::EngineSolution::status). Engines fill
//! primal values only when [`SolverStatus::is_feasible`] holds. The model
//! layer passes the status through and logs a warning when
//! [`SolverStatus::is_failure`] holds. A failed status is still a successful
//! call; engine errors travel as [`SolverError`](crate::SolverError) instead.

/// Engine-independent status of a finished optimize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Solver proved one of the two without telling which.
    InfeasibleOrUnbounded,
    /// Solver reached time limit (may have feasible solution).
    ReachedTimeLimit,
    /// Solver reached iteration limit (may have feasible solution).
    ReachedIterationLimit,
    /// Status is unknown or solver did not complete.
    Unknown,
}

impl SolverStatus {
    /// Check if the status indicates an optimal solution.
    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Check if the status indicates a feasible solution (optimal or limit-reached with solution).
    pub fn is_feasible(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal
                | SolverStatus::ReachedTimeLimit
                | SolverStatus::ReachedIterationLimit
        )
    }

    /// Check if the status indicates infeasibility.
    pub fn is_infeasible(self) -> bool {
        matches!(self, SolverStatus::Infeasible)
    }

    /// Check if the status indicates unboundedness.
    pub fn is_unbounded(self) -> bool {
        matches!(self, SolverStatus::Unbounded)
    }

    /// True when the solve ended in a proof that no usable solution exists.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            SolverStatus::Infeasible
                | SolverStatus::Unbounded
                | SolverStatus::InfeasibleOrUnbounded
        )
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::InfeasibleOrUnbounded => "infeasible_or_unbounded",
            SolverStatus::ReachedTimeLimit => "time_limit",
            SolverStatus::ReachedIterationLimit => "iteration_limit",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
