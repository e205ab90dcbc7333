//! Expression types for optimization modeling.
//!
//! - `term`     : TermKey: a monomial as a sorted variable sequence
//! - `core`     : Expr: shared term map plus bound links
//! - `ops`      : operator overloads and `Sum`
//! - `bounds`   : comparison builders (the bound chain)
//! - `canonical`: Constraint: bounded expression lowered for an engine
//! - `error`    : expression and constraint errors

pub mod bounds;
pub mod builders;
pub mod canonical;
pub mod core;
pub mod error;
pub mod ops;
pub mod term;

pub use builders::{bilinear_terms, linear_terms, sum};
pub use canonical::Constraint;
pub use self::core::{Expr, Operand};
pub use error::{ConstraintError, ExprError};
pub use term::TermKey;
