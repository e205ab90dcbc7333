//! HiGHS engine.

use crate::status::{has_solution, highs_to_status};
use highs::{RowProblem, Sense as HighsSense};
use quadmip_solver::{
    ConstraintHandle, Engine, EngineSolution, Sense, SolverConfig, SolverError, VariableHandle,
    VariableKind, column_violation, dense_hint,
};
use std::time::Instant;
use tracing::{debug, trace, warn};

// HiGHS default `primal_feasibility_tolerance`.
const DEFAULT_HINT_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Clone, Copy)]
struct ColumnSpec {
    integral: bool,
    lower: f64,
    upper: f64,
    objective: f64,
}

#[derive(Debug, Clone)]
struct RowSpec {
    terms: Vec<(usize, f64)>,
    lower: f64,
    upper: f64,
}

/// Linear MIP engine backed by HiGHS.
///
/// Bilinear rows are rejected with [`SolverError::UnsupportedConstraint`].
/// Branching priorities are accepted and ignored. A solution hint is checked
/// against bounds, integrality and rows, then passed to HiGHS as a start.
#[derive(Debug, Default)]
pub struct HighsEngine {
    columns: Vec<ColumnSpec>,
    // Unregistered rows leave a `None` so handles stay stable.
    rows: Vec<Option<RowSpec>>,
    hint: Option<Vec<(VariableHandle, f64)>>,
}

impl HighsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Rows currently registered.
    pub fn num_rows(&self) -> usize {
        self.rows.iter().flatten().count()
    }

    fn column_index(&self, handle: VariableHandle) -> Result<usize, SolverError> {
        if handle.index() < self.columns.len() {
            Ok(handle.index())
        } else {
            Err(SolverError::InvalidHandle(handle.inner()))
        }
    }

    fn build_problem(&self, costs: &[f64]) -> RowProblem {
        let mut problem = RowProblem::default();
        let cols: Vec<_> = self
            .columns
            .iter()
            .zip(costs)
            .map(|(column, cost)| {
                if column.integral {
                    problem.add_integer_column(*cost, column.lower..=column.upper)
                } else {
                    problem.add_column(*cost, column.lower..=column.upper)
                }
            })
            .collect();
        for row in self.rows.iter().flatten() {
            problem.add_row(
                row.lower..=row.upper,
                row.terms.iter().map(|(idx, coeff)| (cols[*idx], *coeff)),
            );
        }
        problem
    }

    /// Dense start point, or the first bound, integrality or row it violates.
    fn feasible_hint(
        &self,
        values: &[(VariableHandle, f64)],
        tolerance: f64,
    ) -> Result<Vec<f64>, SolverError> {
        let point = dense_hint(
            self.columns.iter().map(|column| (column.lower, column.upper)),
            values,
        )?;
        for (idx, (column, value)) in self.columns.iter().zip(&point).enumerate() {
            if let Some(reason) = column_violation(
                idx,
                *value,
                column.lower,
                column.upper,
                column.integral,
                tolerance,
            ) {
                return Err(SolverError::InfeasibleHint(reason));
            }
        }
        for (idx, row) in self.rows.iter().enumerate() {
            let Some(row) = row else { continue };
            let activity: f64 = row.terms.iter().map(|(col, coeff)| coeff * point[*col]).sum();
            if activity < row.lower - tolerance || activity > row.upper + tolerance {
                return Err(SolverError::InfeasibleHint(format!(
                    "row {idx} activity {activity} outside [{}, {}]",
                    row.lower, row.upper
                )));
            }
        }
        Ok(point)
    }

    fn objective_costs(
        &self,
        objective: Option<&[(VariableHandle, f64)]>,
    ) -> Result<Vec<f64>, SolverError> {
        match objective {
            Some(terms) => {
                let mut costs = vec![0.0; self.columns.len()];
                for (handle, coeff) in terms {
                    costs[self.column_index(*handle)?] += coeff;
                }
                Ok(costs)
            }
            None => Ok(self.columns.iter().map(|column| column.objective).collect()),
        }
    }
}

impl Engine for HighsEngine {
    fn register_variable(
        &mut self,
        kind: VariableKind,
        lower: f64,
        upper: f64,
        objective_coefficient: f64,
    ) -> Result<VariableHandle, SolverError> {
        let (lower, upper) = match kind {
            VariableKind::Binary => (lower.max(0.0), upper.min(1.0)),
            _ => (lower, upper),
        };
        let handle = VariableHandle::new(self.columns.len() as u32);
        self.columns.push(ColumnSpec {
            integral: kind.is_integral(),
            lower,
            upper,
            objective: objective_coefficient,
        });
        trace!(
            component = "highs",
            operation = "add_column",
            status = "success",
            handle = handle.inner(),
            kind = kind.as_str(),
            lower,
            upper,
            "Registered column"
        );
        Ok(handle)
    }

    fn register_linear_constraint(
        &mut self,
        terms: &[(VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError> {
        let terms = terms
            .iter()
            .map(|(handle, coeff)| Ok((self.column_index(*handle)?, *coeff)))
            .collect::<Result<Vec<_>, SolverError>>()?;
        let handle = ConstraintHandle::new(self.rows.len() as u32);
        self.rows.push(Some(RowSpec {
            terms,
            lower: lower.unwrap_or(f64::NEG_INFINITY),
            upper: upper.unwrap_or(f64::INFINITY),
        }));
        trace!(
            component = "highs",
            operation = "add_row",
            status = "success",
            handle = handle.inner(),
            lower = ?lower,
            upper = ?upper,
            "Registered row"
        );
        Ok(handle)
    }

    fn register_bilinear_constraint(
        &mut self,
        _linear: &[(VariableHandle, f64)],
        bilinear: &[(VariableHandle, VariableHandle, f64)],
        _lower: Option<f64>,
        _upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError> {
        warn!(
            component = "highs",
            operation = "add_row",
            status = "error",
            bilinear_terms = bilinear.len(),
            "HiGHS cannot hold bilinear rows"
        );
        Err(SolverError::UnsupportedConstraint(format!(
            "bilinear row with {} product terms",
            bilinear.len()
        )))
    }

    fn unregister_constraint(&mut self, handle: ConstraintHandle) -> Result<(), SolverError> {
        let slot = self
            .rows
            .get_mut(handle.index())
            .filter(|slot| slot.is_some())
            .ok_or(SolverError::InvalidHandle(handle.inner()))?;
        *slot = None;
        trace!(
            component = "highs",
            operation = "remove_row",
            status = "success",
            handle = handle.inner(),
            "Unregistered row"
        );
        Ok(())
    }

    fn set_solution_hint(&mut self, values: &[(VariableHandle, f64)]) -> Result<(), SolverError> {
        self.hint = (!values.is_empty()).then(|| values.to_vec());
        debug!(
            component = "highs",
            operation = "set_solution_hint",
            status = "success",
            num_hints = values.len(),
            "Stored solution hint"
        );
        Ok(())
    }

    fn optimize(
        &mut self,
        sense: Sense,
        objective: Option<&[(VariableHandle, f64)]>,
        config: &SolverConfig,
    ) -> Result<EngineSolution, SolverError> {
        if self.columns.is_empty() {
            return Err(SolverError::EmptyModel);
        }
        let started = Instant::now();
        let start = match self.hint.take() {
            Some(values) => {
                let tolerance = config.tolerance.unwrap_or(DEFAULT_HINT_TOLERANCE);
                match self.feasible_hint(&values, tolerance) {
                    Ok(point) => Some(point),
                    Err(err) => {
                        warn!(
                            component = "highs",
                            operation = "set_solution_hint",
                            status = "error",
                            code = err.code(),
                            "Solution hint rejected"
                        );
                        return Err(err);
                    }
                }
            }
            None => None,
        };
        let costs = self.objective_costs(objective)?;
        let problem = self.build_problem(&costs);

        let highs_sense = match sense {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };
        let mut model = problem.optimise(highs_sense);
        let log_to_console = config.log_to_console.unwrap_or(false);
        if config.verbosity.unwrap_or(0) == 0 && !log_to_console {
            model.make_quiet();
        }
        if let Some(level) = config.verbosity {
            model.set_option("output_flag", level > 0);
        }
        if log_to_console {
            model.set_option("log_to_console", true);
            model.set_option("output_flag", true);
        }
        if let Some(limit) = config.time_limit {
            model.set_option("time_limit", limit);
        }
        if let Some(gap) = config.mip_gap {
            model.set_option("mip_rel_gap", gap);
        }
        if let Some(gap) = config.absolute_gap {
            model.set_option("mip_abs_gap", gap);
        }
        if let Some(presolve) = config.presolve {
            model.set_option("presolve", if presolve { "on" } else { "off" });
        }
        if let Some(threads) = config.threads {
            model.set_option("threads", threads as i32);
        }
        if let Some(tolerance) = config.tolerance {
            model.set_option("primal_feasibility_tolerance", tolerance);
        }
        if let Some(limit) = config.solution_limit {
            warn!(
                component = "highs",
                operation = "optimize",
                status = "warn",
                solution_limit = limit,
                "Solution limit is not supported by HiGHS; ignoring"
            );
        }

        if let Some(point) = start.as_ref() {
            if let Err(err) = model.try_set_solution(Some(point.as_slice()), None, None, None) {
                warn!(
                    component = "highs",
                    operation = "set_solution_hint",
                    status = "warn",
                    ?err,
                    "Failed to set solution hint; continuing without it"
                );
            }
        }

        let solved = model.solve();
        let status = highs_to_status(solved.status());
        let (values, objective_value) = if has_solution(status) {
            let values = solved.get_solution().columns().to_vec();
            let objective_value = costs.iter().zip(&values).map(|(c, v)| c * v).sum();
            (values, objective_value)
        } else {
            (Vec::new(), f64::NAN)
        };
        let solve_time_seconds = started.elapsed().as_secs_f64();

        debug!(
            component = "highs",
            operation = "optimize",
            status = status.as_str(),
            sense = sense.as_str(),
            columns = self.columns.len(),
            rows = self.num_rows(),
            objective_value,
            duration_ms = solve_time_seconds * 1000.0,
            "HiGHS solve completed"
        );

        Ok(EngineSolution {
            status,
            objective_value,
            values,
            solve_time_seconds,
        })
    }
}
