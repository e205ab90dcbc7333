//! Objective lowering, solution hints and optimize.

use crate::model::error::ModelError;
use crate::model::{Model, ObjectiveColumn};
use crate::solution::Solution;
use quadmip_expr::{Constraint, ConstraintError, Expr, VariableId};
use quadmip_solver::{Engine, Sense, VariableHandle, VariableKind, default_primal_value};
use std::collections::BTreeMap;
use std::time::Instant;

/// What the engine is asked to optimize, plus the constant it cannot see.
struct LoweredObjective {
    terms: Option<Vec<(VariableHandle, f64)>>,
    offset: f64,
}

impl<E: Engine> Model<E> {
    /// Maximize `objective`, or the registered objective coefficients when `None`.
    pub fn maximize(&mut self, objective: Option<&Expr>) -> Result<Solution, ModelError> {
        self.optimize(Sense::Maximize, objective)
    }

    /// Minimize `objective`, or the registered objective coefficients when `None`.
    pub fn minimize(&mut self, objective: Option<&Expr>) -> Result<Solution, ModelError> {
        self.optimize(Sense::Minimize, objective)
    }

    /// Primal point handed to the engine on every optimize until cleared.
    ///
    /// Variables left out start at zero, or at their bound nearest zero. An
    /// infeasible hint makes optimize fail with
    /// [`SolverError::InfeasibleHint`](quadmip_solver::SolverError::InfeasibleHint)
    /// on engines that check it.
    pub fn set_solution_hint(
        &mut self,
        hint: &BTreeMap<VariableId, f64>,
    ) -> Result<(), ModelError> {
        for var in hint.keys() {
            self.ensure_variable_exists(*var)?;
        }
        self.solution_hint = Some(hint.clone());
        tracing::debug!(
            component = "model",
            operation = "set_solution_hint",
            status = "success",
            num_hints = hint.len(),
            "Stored solution hint"
        );
        Ok(())
    }

    pub fn clear_solution_hint(&mut self) {
        self.solution_hint = None;
    }

    pub fn solution_hint(&self) -> Option<&BTreeMap<VariableId, f64>> {
        self.solution_hint.as_ref()
    }

    /// Solve the model in the given direction.
    ///
    /// A constant in the objective is added to the reported objective value.
    /// A quadratic objective is moved into a row on an auxiliary free column
    /// `z` (`z <= objective` when maximizing, `z >= objective` when
    /// minimizing) and `z` is optimized instead.
    pub fn optimize(
        &mut self,
        sense: Sense,
        objective: Option<&Expr>,
    ) -> Result<Solution, ModelError> {
        let started = Instant::now();
        self.release_objective_row()?;

        let lowered = match objective {
            Some(expr) => self.lower_objective(sense, expr)?,
            None => LoweredObjective {
                terms: None,
                offset: 0.0,
            },
        };

        self.forward_solution_hint(objective)?;
        let result = self
            .engine
            .optimize(sense, lowered.terms.as_deref(), &self.config)?;

        let values: BTreeMap<VariableId, f64> = self
            .variables
            .iter()
            .filter_map(|(id, entry)| result.value(entry.handle).map(|value| (*id, value)))
            .collect();

        let solution = Solution {
            status: result.status,
            objective_value: result.objective_value + lowered.offset,
            values,
            solve_time_seconds: result.solve_time_seconds,
        };

        tracing::debug!(
            component = "model",
            operation = "optimize",
            status = solution.status.as_str(),
            sense = sense.as_str(),
            objective_value = solution.objective_value,
            variables = self.variables.len(),
            constraints = self.num_active_constraints(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Optimized model"
        );
        if solution.status.is_failure() {
            tracing::warn!(
                component = "model",
                operation = "optimize",
                status = solution.status.as_str(),
                "Engine reported no usable solution"
            );
        }
        Ok(solution)
    }

    fn lower_objective(&mut self, sense: Sense, expr: &Expr) -> Result<LoweredObjective, ModelError> {
        if expr.has_bounds() {
            return Err(ModelError::BoundedObjective);
        }
        for var in expr.variables() {
            self.ensure_variable_exists(var)?;
        }

        let degree = expr.degree();
        if degree <= 1 {
            let mut terms = Vec::with_capacity(expr.len());
            for (key, coeff) in expr.terms() {
                if let [var] = *key.variables() {
                    terms.push((self.handle_of(var)?, *coeff));
                }
            }
            return Ok(LoweredObjective {
                terms: Some(terms),
                offset: expr.constant_value(),
            });
        }
        if degree > 2 {
            return Err(ConstraintError::UnsupportedDegree { degree }.into());
        }

        let column = self.objective_column()?;
        let gap = Expr::var(column.id).sub(expr);
        let row = match sense {
            Sense::Maximize => Constraint::from_parts(&gap, None, Some(0.0))?,
            Sense::Minimize => Constraint::from_parts(&gap, Some(0.0), None)?,
        };
        let handle = self.register(&row)?;
        if let Some(column) = self.objective_column.as_mut() {
            column.row = Some(handle);
        }

        tracing::debug!(
            component = "model",
            operation = "lower_objective",
            status = "success",
            sense = sense.as_str(),
            degree,
            terms = expr.len(),
            "Moved quadratic objective into auxiliary row"
        );
        Ok(LoweredObjective {
            terms: Some(vec![(column.handle, 1.0)]),
            offset: 0.0,
        })
    }

    /// Translate the stored hint to handles. A quadratic objective's
    /// auxiliary column is hinted at the objective value of the hint.
    fn forward_solution_hint(&mut self, objective: Option<&Expr>) -> Result<(), ModelError> {
        let Some(hint) = &self.solution_hint else {
            return Ok(());
        };
        let mut values = hint
            .iter()
            .map(|(id, value)| Ok((self.handle_of(*id)?, *value)))
            .collect::<Result<Vec<(VariableHandle, f64)>, ModelError>>()?;
        let auxiliary = self.objective_column.filter(|column| column.row.is_some());
        if let (Some(expr), Some(column)) = (objective, auxiliary) {
            values.push((column.handle, self.value_at_hint(expr, hint)));
        }
        self.engine.set_solution_hint(&values)?;
        tracing::trace!(
            component = "model",
            operation = "forward_solution_hint",
            status = "success",
            num_hints = values.len(),
            "Forwarded solution hint to engine"
        );
        Ok(())
    }

    fn value_at_hint(&self, expr: &Expr, hint: &BTreeMap<VariableId, f64>) -> f64 {
        let start = |var: &VariableId| {
            hint.get(var).copied().unwrap_or_else(|| {
                self.variables.get(var).map_or(0.0, |entry| {
                    default_primal_value(entry.variable.bounds.lower, entry.variable.bounds.upper)
                })
            })
        };
        expr.terms()
            .iter()
            .map(|(key, coeff)| coeff * key.variables().iter().map(&start).product::<f64>())
            .sum()
    }

    /// The auxiliary objective column, registered on first use.
    fn objective_column(&mut self) -> Result<ObjectiveColumn, ModelError> {
        if let Some(column) = self.objective_column {
            return Ok(column);
        }
        let handle = self.engine.register_variable(
            VariableKind::Continuous,
            f64::NEG_INFINITY,
            f64::INFINITY,
            0.0,
        )?;
        let column = ObjectiveColumn {
            id: VariableId::fresh(),
            handle,
            row: None,
        };
        self.objective_column = Some(column);
        Ok(column)
    }

    /// Drop the row left behind by a previous quadratic objective.
    fn release_objective_row(&mut self) -> Result<(), ModelError> {
        if let Some(row) = self.objective_column.as_mut().and_then(|column| column.row.take()) {
            self.engine.unregister_constraint(row)?;
        }
        Ok(())
    }
}
