//! Model facade that lowers bounded expressions onto a MIP engine.

pub mod logging;
pub mod model;
pub mod solution;
pub mod types;

pub use logging::{LoggingError, init_logging};
pub use model::{Model, ModelError};
pub use solution::Solution;
pub use types::{Bounds, Variable};

pub use quadmip_solver::{Sense, SolutionView, SolverConfig, SolverStatus, VariableKind};
