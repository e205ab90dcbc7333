//! Model builder methods for adding variables and constraints.

use crate::model::error::ModelError;
use crate::model::{ConstraintEntry, Model, VariableEntry};
use crate::types::Variable;
use quadmip_expr::{Constraint, ConstraintId, Expr, VariableId};
use quadmip_solver::{ConstraintHandle, Engine, VariableHandle};

impl<E: Engine> Model<E> {
    /// Add a variable to the model and register its column.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if !variable.bounds.is_valid() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }

        let handle = self.engine.register_variable(
            variable.kind,
            variable.bounds.lower,
            variable.bounds.upper,
            variable.objective_coefficient,
        )?;
        if variable.priority != 0 {
            self.engine
                .set_branching_priority(handle, variable.priority)?;
        }

        let id = VariableId::fresh();
        self.variables
            .insert(id, VariableEntry { variable, handle });
        tracing::debug!(
            component = "model",
            operation = "add_variable",
            status = "success",
            variable = %id,
            kind = variable.kind.as_str(),
            lower = variable.bounds.lower,
            upper = variable.bounds.upper,
            "Added variable"
        );
        Ok(id)
    }

    /// Canonicalize a bounded expression and register it.
    ///
    /// Nothing reaches the engine unless canonicalization succeeds and every
    /// referenced variable belongs to this model. The bound links of `expr`
    /// are cleared only once the constraint is registered.
    pub fn add_constraint(&mut self, expr: &Expr) -> Result<ConstraintId, ModelError> {
        let constraint = Constraint::peek(expr)?;
        let id = self.insert_constraint(constraint)?;
        expr.release_chain();
        Ok(id)
    }

    /// Register `lower <= expr <= upper` for an expression without bound links.
    pub fn add_bounded_constraint(
        &mut self,
        expr: &Expr,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintId, ModelError> {
        let constraint = Constraint::from_parts(expr, lower, upper)?;
        self.insert_constraint(constraint)
    }

    /// Re-register a stored constraint. No-op if it is already registered.
    pub fn constrain(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        let entry = self
            .constraints
            .get(&id)
            .ok_or(ModelError::InvalidConstraintId(id))?;
        if entry.handle.is_some() {
            return Ok(());
        }
        let constraint = entry.constraint.clone();
        let handle = self.register(&constraint)?;
        if let Some(entry) = self.constraints.get_mut(&id) {
            entry.handle = Some(handle);
        }
        tracing::debug!(
            component = "model",
            operation = "constrain",
            status = "success",
            constraint = %id,
            "Registered stored constraint"
        );
        Ok(())
    }

    /// Remove a constraint from the engine while keeping it stored.
    /// No-op if it is not registered.
    pub fn unconstrain(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        let entry = self
            .constraints
            .get_mut(&id)
            .ok_or(ModelError::InvalidConstraintId(id))?;
        if let Some(handle) = entry.handle {
            self.engine.unregister_constraint(handle)?;
            entry.handle = None;
            tracing::debug!(
                component = "model",
                operation = "unconstrain",
                status = "success",
                constraint = %id,
                "Unregistered constraint"
            );
        }
        Ok(())
    }

    /// Whether the constraint is currently registered with the engine.
    pub fn is_constrained(&self, id: ConstraintId) -> Result<bool, ModelError> {
        self.constraints
            .get(&id)
            .map(|entry| entry.handle.is_some())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    fn insert_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        for var in constraint.variables() {
            self.ensure_variable_exists(var)?;
        }
        let handle = self.register(&constraint)?;

        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        tracing::debug!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            constraint = %id,
            linear_terms = constraint.linear_terms().len(),
            bilinear_terms = constraint.bilinear_terms().len(),
            lower = ?constraint.lower(),
            upper = ?constraint.upper(),
            "Added constraint"
        );
        self.constraints.insert(
            id,
            ConstraintEntry {
                constraint,
                handle: Some(handle),
            },
        );
        Ok(id)
    }

    /// Translate ids to handles and pick the engine call by shape.
    pub(crate) fn register(
        &mut self,
        constraint: &Constraint,
    ) -> Result<ConstraintHandle, ModelError> {
        let linear = constraint
            .linear_terms()
            .iter()
            .map(|(var, coeff)| Ok((self.handle_of(*var)?, *coeff)))
            .collect::<Result<Vec<(VariableHandle, f64)>, ModelError>>()?;

        let handle = if constraint.is_linear() {
            self.engine.register_linear_constraint(
                &linear,
                constraint.lower(),
                constraint.upper(),
            )?
        } else {
            let bilinear = constraint
                .bilinear_terms()
                .iter()
                .map(|(a, b, coeff)| Ok((self.handle_of(*a)?, self.handle_of(*b)?, *coeff)))
                .collect::<Result<Vec<(VariableHandle, VariableHandle, f64)>, ModelError>>()?;
            self.engine.register_bilinear_constraint(
                &linear,
                &bilinear,
                constraint.lower(),
                constraint.upper(),
            )?
        };

        tracing::trace!(
            component = "model",
            operation = "register_row",
            status = "success",
            handle = handle.inner(),
            "Registered row with engine"
        );
        Ok(handle)
    }
}
