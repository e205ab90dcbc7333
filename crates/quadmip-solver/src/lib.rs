//! Engine contract for quadmip backends.
//!
//! This crate provides the types and traits a MIP backend (like
//! `quadmip-highs`) implements so the modeling layer can drive it.
//!
//! # Overview
//!
//! - [`Engine`]: registration and optimize primitives
//! - [`VariableHandle`], [`ConstraintHandle`]: engine-side identities
//! - [`VariableKind`], [`Sense`]: column class and objective direction
//! - [`SolverConfig`]: optimize options
//! - [`SolverStatus`]: common status values across engines
//! - [`SolverError`]: error types for engine operations
//! - [`dense_hint`], [`default_primal_value`]: primal solution hints
//! - [`EngineSolution`], [`SolutionView`]: solution data

mod config;
mod engine;
mod error;
mod hint;
mod status;
mod traits;

pub use config::SolverConfig;
pub use engine::{ConstraintHandle, EngineSolution, Sense, VariableHandle, VariableKind};
pub use error::SolverError;
pub use hint::{column_violation, default_primal_value, dense_hint};
pub use status::SolverStatus;
pub use traits::{Engine, SolutionView};
