//! Model error types.

use quadmip_expr::{ConstraintError, ConstraintId, ExprError, VariableId};
use quadmip_solver::SolverError;

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Expression could not be built
    Expr(ExprError),
    /// Bounded expression could not be canonicalized
    Constraint(ConstraintError),
    /// Engine rejected a call
    Solver(SolverError),
    /// Expression references a variable that was not added to this model
    UnknownVariable(VariableId),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Invalid constraint ID
    InvalidConstraintId(ConstraintId),
    /// Objective expression still carries comparison links
    BoundedObjective,
    /// Optimize option out of range
    InvalidOption { name: &'static str, value: f64 },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::Expr(err) => err.code(),
            ModelError::Constraint(err) => err.code(),
            ModelError::Solver(err) => err.code(),
            ModelError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::BoundedObjective => "OBJECTIVE_BOUNDED",
            ModelError::InvalidOption { .. } => "OPTION_INVALID",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Expr(err) => write!(f, "{err}"),
            ModelError::Constraint(err) => write!(f, "{err}"),
            ModelError::Solver(err) => write!(f, "{err}"),
            ModelError::UnknownVariable(id) => write!(
                f,
                "[{}] Variable {} does not belong to this model",
                self.code(),
                id
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::BoundedObjective => write!(
                f,
                "[{}] Objective expressions cannot carry bounds",
                self.code()
            ),
            ModelError::InvalidOption { name, value } => write!(
                f,
                "[{}] Option {} must be finite and non-negative (got {})",
                self.code(),
                name,
                value
            ),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Expr(err) => Some(err),
            ModelError::Constraint(err) => Some(err),
            ModelError::Solver(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExprError> for ModelError {
    fn from(err: ExprError) -> Self {
        ModelError::Expr(err)
    }
}

impl From<ConstraintError> for ModelError {
    fn from(err: ConstraintError) -> Self {
        ModelError::Constraint(err)
    }
}

impl From<SolverError> for ModelError {
    fn from(err: SolverError) -> Self {
        ModelError::Solver(err)
    }
}
