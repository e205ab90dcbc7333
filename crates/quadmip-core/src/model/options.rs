//! Optimize option setters.

use crate::model::Model;
use crate::model::error::ModelError;
use quadmip_solver::{Engine, SolverConfig};

fn non_negative(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidOption { name, value })
    }
}

impl<E: Engine> Model<E> {
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace every option at once.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Wall-clock limit in seconds.
    pub fn set_time_limit(&mut self, seconds: f64) -> Result<(), ModelError> {
        self.config.time_limit = Some(non_negative("time_limit", seconds)?);
        self.log_option("time_limit");
        Ok(())
    }

    /// Relative gap between primal and dual bound.
    pub fn set_mip_gap(&mut self, gap: f64) -> Result<(), ModelError> {
        self.config.mip_gap = Some(non_negative("mip_gap", gap)?);
        self.log_option("mip_gap");
        Ok(())
    }

    /// Absolute gap between primal and dual bound.
    pub fn set_absolute_gap(&mut self, gap: f64) -> Result<(), ModelError> {
        self.config.absolute_gap = Some(non_negative("absolute_gap", gap)?);
        self.log_option("absolute_gap");
        Ok(())
    }

    /// Stop after `count` improving solutions.
    pub fn set_solution_limit(&mut self, count: u32) {
        self.config.solution_limit = Some(count);
        self.log_option("solution_limit");
    }

    pub fn set_threads(&mut self, count: u32) {
        self.config.threads = Some(count);
        self.log_option("threads");
    }

    pub fn set_verbosity(&mut self, level: u32) {
        self.config.verbosity = Some(level);
        self.log_option("verbosity");
    }

    fn log_option(&self, option: &'static str) {
        tracing::debug!(
            component = "model",
            operation = "set_option",
            status = "success",
            option,
            config = ?self.config,
            "Updated optimize option"
        );
    }
}
