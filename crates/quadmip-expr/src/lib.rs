pub mod expr;
pub mod ids;

pub use expr::{Constraint, ConstraintError, Expr, ExprError, Operand, TermKey};
pub use ids::{ConstraintId, VariableId};
