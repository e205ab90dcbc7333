//! Model facade over a solver engine.
//!
//! A [`Model`] owns an [`Engine`] and translates between the expression
//! world (variable ids, bounded expressions) and the engine world (dense
//! handles, canonical rows).
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Adding variables and constraints, constrain/unconstrain
//! - [`objective`]: Objective lowering, solution hints and optimize
//! - [`options`]: Optimize option setters
//! - [`metadata`]: Variable and constraint naming and metadata

mod builder;
mod error;
mod metadata;
mod objective;
mod options;

use crate::types::Variable;
use quadmip_expr::{Constraint, ConstraintId, VariableId};
use quadmip_solver::{ConstraintHandle, Engine, SolverConfig, VariableHandle};
use std::collections::BTreeMap;

pub use error::ModelError;

#[derive(Debug, Clone)]
pub(crate) struct VariableEntry {
    pub(crate) variable: Variable,
    pub(crate) handle: VariableHandle,
}

#[derive(Debug, Clone)]
pub(crate) struct ConstraintEntry {
    pub(crate) constraint: Constraint,
    /// `None` while the constraint is stored but not registered.
    pub(crate) handle: Option<ConstraintHandle>,
}

/// Auxiliary column carrying a quadratic objective.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ObjectiveColumn {
    pub(crate) id: VariableId,
    pub(crate) handle: VariableHandle,
    pub(crate) row: Option<ConstraintHandle>,
}

/// An optimization model bound to one engine instance.
///
/// Variables get process-wide unique ids, so an expression built from another
/// model's variables is detected and rejected instead of silently aliasing.
#[derive(Debug)]
pub struct Model<E: Engine> {
    pub(crate) engine: E,
    pub(crate) config: SolverConfig,
    pub(crate) variables: BTreeMap<VariableId, VariableEntry>,
    pub(crate) constraints: BTreeMap<ConstraintId, ConstraintEntry>,
    pub(crate) next_constraint_id: u32,
    pub(crate) objective_column: Option<ObjectiveColumn>,
    pub(crate) solution_hint: Option<BTreeMap<VariableId, f64>>,
    // Lazy-allocated metadata storage
    pub(crate) variable_names: Option<BTreeMap<VariableId, String>>,
    pub(crate) constraint_names: Option<BTreeMap<ConstraintId, String>>,
    pub(crate) variable_metadata: Option<BTreeMap<VariableId, serde_json::Value>>,
    pub(crate) constraint_metadata: Option<BTreeMap<ConstraintId, serde_json::Value>>,
}

impl<E: Engine> Model<E> {
    /// Create an empty model driving `engine`.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, SolverConfig::default())
    }

    pub fn with_config(engine: E, config: SolverConfig) -> Self {
        Self {
            engine,
            config,
            variables: BTreeMap::new(),
            constraints: BTreeMap::new(),
            next_constraint_id: 0,
            objective_column: None,
            solution_hint: None,
            variable_names: None,
            constraint_names: None,
            variable_metadata: None,
            constraint_metadata: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consume the model and hand back its engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Stored constraints, registered or not.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints currently registered with the engine.
    pub fn num_active_constraints(&self) -> usize {
        self.constraints
            .values()
            .filter(|entry| entry.handle.is_some())
            .count()
    }

    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(&id)
            .map(|entry| &entry.variable)
            .ok_or(ModelError::UnknownVariable(id))
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(&id)
            .map(|entry| &entry.constraint)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Variable ids in creation order.
    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variables.keys().copied()
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if self.variables.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::UnknownVariable(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if self.constraints.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    /// Engine handle for a user variable or the objective column.
    pub(crate) fn handle_of(&self, id: VariableId) -> Result<VariableHandle, ModelError> {
        if let Some(entry) = self.variables.get(&id) {
            return Ok(entry.handle);
        }
        match self.objective_column {
            Some(column) if column.id == id => Ok(column.handle),
            _ => Err(ModelError::UnknownVariable(id)),
        }
    }
}
