//! HiGHS-backed [`Engine`](quadmip_solver::Engine).
//!
//! Columns and rows are kept on the Rust side and rebuilt into a fresh HiGHS
//! problem on every optimize, so rows can be removed between solves.

mod engine;
mod status;

pub use engine::HighsEngine;
