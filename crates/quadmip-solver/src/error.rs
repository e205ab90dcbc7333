//! Engine error types.

use crate::SolverStatus;

/// Error type for engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Optimize was called with no registered variables.
    EmptyModel,
    /// Variable or constraint handle unknown to this engine, or already removed.
    InvalidHandle(u32),
    /// The engine cannot represent this constraint shape.
    UnsupportedConstraint(String),
    /// The solution hint violates a bound, an integrality requirement or a row.
    InfeasibleHint(String),
    /// Internal solver error.
    InternalError(String),
    /// Solver failed to find a usable solution.
    SolveFailure {
        /// The solver status that caused the failure.
        status: SolverStatus,
    },
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyModel => "MODEL_EMPTY",
            SolverError::InvalidHandle(_) => "ENGINE_INVALID_HANDLE",
            SolverError::UnsupportedConstraint(_) => "ENGINE_UNSUPPORTED_CONSTRAINT",
            SolverError::InfeasibleHint(_) => "ENGINE_INFEASIBLE_HINT",
            SolverError::InternalError(_) => "SOLVER_INTERNAL",
            SolverError::SolveFailure { status } => match status {
                SolverStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolverStatus::Unbounded => "SOLVER_UNBOUNDED",
                SolverStatus::InfeasibleOrUnbounded => "SOLVER_INFEASIBLE_OR_UNBOUNDED",
                SolverStatus::ReachedTimeLimit => "SOLVER_TIME_LIMIT",
                SolverStatus::ReachedIterationLimit => "SOLVER_ITERATION_LIMIT",
                _ => "SOLVER_INTERNAL",
            },
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyModel => write!(f, "[{}] Model has no variables", self.code()),
            SolverError::InvalidHandle(index) => {
                write!(f, "[{}] Handle {} is not registered", self.code(), index)
            }
            SolverError::UnsupportedConstraint(reason) => {
                write!(f, "[{}] {}", self.code(), reason)
            }
            SolverError::InfeasibleHint(reason) => {
                write!(f, "[{}] Solution hint is infeasible: {}", self.code(), reason)
            }
            SolverError::InternalError(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] {}", self.code(), status_message(*status))
            }
        }
    }
}

fn status_message(status: SolverStatus) -> &'static str {
    match status {
        SolverStatus::Infeasible => "Problem is infeasible",
        SolverStatus::Unbounded => "Problem is unbounded",
        SolverStatus::InfeasibleOrUnbounded => "Problem is infeasible or unbounded",
        SolverStatus::ReachedTimeLimit => "Solver reached time limit",
        SolverStatus::ReachedIterationLimit => "Solver reached iteration limit",
        SolverStatus::Unknown => "Solver status unknown",
        SolverStatus::Optimal => "Solver returned optimal",
    }
}

impl std::error::Error for SolverError {}
