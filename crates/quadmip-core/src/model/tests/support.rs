use quadmip_solver::{
    ConstraintHandle, Engine, EngineSolution, Sense, SolverConfig, SolverError, SolverStatus,
    VariableHandle, VariableKind, column_violation, dense_hint,
};
use std::collections::{BTreeMap, BTreeSet};

const FEASIBILITY_TOLERANCE: f64 = 1e-9;
// Unbounded integer columns are searched up to this magnitude.
const SEARCH_LIMIT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Call {
    Variable {
        kind: VariableKind,
        lower: f64,
        upper: f64,
        objective: f64,
    },
    Priority {
        handle: u32,
        priority: i32,
    },
    Linear {
        terms: Vec<(u32, f64)>,
        lower: Option<f64>,
        upper: Option<f64>,
    },
    Bilinear {
        linear: Vec<(u32, f64)>,
        bilinear: Vec<(u32, u32, f64)>,
        lower: Option<f64>,
        upper: Option<f64>,
    },
    Unregister {
        handle: u32,
    },
    Hint {
        values: Vec<(u32, f64)>,
    },
    Optimize {
        sense: Sense,
        objective: Option<Vec<(u32, f64)>>,
    },
}

fn raw(terms: &[(VariableHandle, f64)]) -> Vec<(u32, f64)> {
    terms
        .iter()
        .map(|(handle, coeff)| (handle.inner(), *coeff))
        .collect()
}

/// Records every engine call and answers optimize with a canned solution.
#[derive(Debug, Default)]
pub(super) struct RecordingEngine {
    pub(super) calls: Vec<Call>,
    pub(super) status: Option<SolverStatus>,
    pub(super) objective_value: f64,
    next_variable: u32,
    next_constraint: u32,
    active: BTreeSet<u32>,
}

impl RecordingEngine {
    pub(super) fn answering(status: SolverStatus, objective_value: f64) -> Self {
        Self {
            status: Some(status),
            objective_value,
            ..Self::default()
        }
    }

    fn next_row(&mut self) -> ConstraintHandle {
        let handle = ConstraintHandle::new(self.next_constraint);
        self.next_constraint += 1;
        self.active.insert(handle.inner());
        handle
    }
}

impl Engine for RecordingEngine {
    fn register_variable(
        &mut self,
        kind: VariableKind,
        lower: f64,
        upper: f64,
        objective_coefficient: f64,
    ) -> Result<VariableHandle, SolverError> {
        self.calls.push(Call::Variable {
            kind,
            lower,
            upper,
            objective: objective_coefficient,
        });
        let handle = VariableHandle::new(self.next_variable);
        self.next_variable += 1;
        Ok(handle)
    }

    fn register_linear_constraint(
        &mut self,
        terms: &[(VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError> {
        self.calls.push(Call::Linear {
            terms: raw(terms),
            lower,
            upper,
        });
        Ok(self.next_row())
    }

    fn register_bilinear_constraint(
        &mut self,
        linear: &[(VariableHandle, f64)],
        bilinear: &[(VariableHandle, VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError> {
        self.calls.push(Call::Bilinear {
            linear: raw(linear),
            bilinear: bilinear
                .iter()
                .map(|(a, b, coeff)| (a.inner(), b.inner(), *coeff))
                .collect(),
            lower,
            upper,
        });
        Ok(self.next_row())
    }

    fn unregister_constraint(&mut self, handle: ConstraintHandle) -> Result<(), SolverError> {
        if !self.active.remove(&handle.inner()) {
            return Err(SolverError::InvalidHandle(handle.inner()));
        }
        self.calls.push(Call::Unregister {
            handle: handle.inner(),
        });
        Ok(())
    }

    fn set_branching_priority(
        &mut self,
        handle: VariableHandle,
        priority: i32,
    ) -> Result<(), SolverError> {
        self.calls.push(Call::Priority {
            handle: handle.inner(),
            priority,
        });
        Ok(())
    }

    fn set_solution_hint(&mut self, values: &[(VariableHandle, f64)]) -> Result<(), SolverError> {
        self.calls.push(Call::Hint {
            values: raw(values),
        });
        Ok(())
    }

    fn optimize(
        &mut self,
        sense: Sense,
        objective: Option<&[(VariableHandle, f64)]>,
        _config: &SolverConfig,
    ) -> Result<EngineSolution, SolverError> {
        self.calls.push(Call::Optimize {
            sense,
            objective: objective.map(raw),
        });
        Ok(EngineSolution {
            status: self.status.unwrap_or(SolverStatus::Optimal),
            objective_value: self.objective_value,
            values: vec![0.0; self.next_variable as usize],
            solve_time_seconds: 0.0,
        })
    }
}

#[derive(Debug, Clone)]
struct Column {
    lower: f64,
    upper: f64,
    objective: f64,
}

#[derive(Debug, Clone)]
struct Row {
    linear: Vec<(usize, f64)>,
    bilinear: Vec<(usize, usize, f64)>,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Row {
    fn is_satisfied(&self, point: &[f64]) -> bool {
        let activity = self
            .linear
            .iter()
            .map(|(idx, coeff)| coeff * point[*idx])
            .sum::<f64>()
            + self
                .bilinear
                .iter()
                .map(|(a, b, coeff)| coeff * point[*a] * point[*b])
                .sum::<f64>();
        self.lower
            .is_none_or(|lower| activity >= lower - FEASIBILITY_TOLERANCE)
            && self
                .upper
                .is_none_or(|upper| activity <= upper + FEASIBILITY_TOLERANCE)
    }
}

/// Exhaustive search over the integer grid of small integral models.
#[derive(Debug, Default)]
pub(super) struct EnumerationEngine {
    columns: Vec<Column>,
    rows: BTreeMap<u32, Row>,
    next_row: u32,
    hint: Option<Vec<(VariableHandle, f64)>>,
}

impl EnumerationEngine {
    fn column(&self, handle: VariableHandle) -> Result<usize, SolverError> {
        if handle.index() < self.columns.len() {
            Ok(handle.index())
        } else {
            Err(SolverError::InvalidHandle(handle.inner()))
        }
    }

    /// Every column is integral, so the hint must sit on the grid.
    fn check_hint(&self, values: &[(VariableHandle, f64)]) -> Result<(), SolverError> {
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
                true,
                FEASIBILITY_TOLERANCE,
            ) {
                return Err(SolverError::InfeasibleHint(reason));
            }
        }
        match self.rows.iter().find(|(_, row)| !row.is_satisfied(&point)) {
            Some((handle, _)) => Err(SolverError::InfeasibleHint(format!(
                "row {handle} is violated"
            ))),
            None => Ok(()),
        }
    }

    fn insert_row(&mut self, row: Row) -> ConstraintHandle {
        let handle = ConstraintHandle::new(self.next_row);
        self.next_row += 1;
        self.rows.insert(handle.inner(), row);
        handle
    }
}

impl Engine for EnumerationEngine {
    fn register_variable(
        &mut self,
        kind: VariableKind,
        lower: f64,
        upper: f64,
        objective_coefficient: f64,
    ) -> Result<VariableHandle, SolverError> {
        if kind == VariableKind::Continuous {
            return Err(SolverError::UnsupportedConstraint(
                "enumeration needs integral columns".to_string(),
            ));
        }
        self.columns.push(Column {
            lower,
            upper,
            objective: objective_coefficient,
        });
        Ok(VariableHandle::new((self.columns.len() - 1) as u32))
    }

    fn register_linear_constraint(
        &mut self,
        terms: &[(VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError> {
        self.register_bilinear_constraint(terms, &[], lower, upper)
    }

    fn register_bilinear_constraint(
        &mut self,
        linear: &[(VariableHandle, f64)],
        bilinear: &[(VariableHandle, VariableHandle, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<ConstraintHandle, SolverError> {
        let linear = linear
            .iter()
            .map(|(handle, coeff)| Ok((self.column(*handle)?, *coeff)))
            .collect::<Result<Vec<_>, SolverError>>()?;
        let bilinear = bilinear
            .iter()
            .map(|(a, b, coeff)| Ok((self.column(*a)?, self.column(*b)?, *coeff)))
            .collect::<Result<Vec<_>, SolverError>>()?;
        Ok(self.insert_row(Row {
            linear,
            bilinear,
            lower,
            upper,
        }))
    }

    fn unregister_constraint(&mut self, handle: ConstraintHandle) -> Result<(), SolverError> {
        self.rows
            .remove(&handle.inner())
            .map(|_| ())
            .ok_or(SolverError::InvalidHandle(handle.inner()))
    }

    fn set_solution_hint(&mut self, values: &[(VariableHandle, f64)]) -> Result<(), SolverError> {
        self.hint = (!values.is_empty()).then(|| values.to_vec());
        Ok(())
    }

    fn optimize(
        &mut self,
        sense: Sense,
        objective: Option<&[(VariableHandle, f64)]>,
        _config: &SolverConfig,
    ) -> Result<EngineSolution, SolverError> {
        if self.columns.is_empty() {
            return Err(SolverError::EmptyModel);
        }
        if let Some(values) = self.hint.take() {
            self.check_hint(&values)?;
        }

        let costs = match objective {
            Some(terms) => {
                let mut costs = vec![0.0; self.columns.len()];
                for (handle, coeff) in terms {
                    costs[self.column(*handle)?] += coeff;
                }
                costs
            }
            None => self.columns.iter().map(|column| column.objective).collect(),
        };

        let domains: Vec<(f64, f64)> = self
            .columns
            .iter()
            .map(|column| {
                (
                    column.lower.max(-SEARCH_LIMIT).ceil(),
                    column.upper.min(SEARCH_LIMIT).floor(),
                )
            })
            .collect();
        let infeasible = EngineSolution {
            status: SolverStatus::Infeasible,
            objective_value: 0.0,
            values: Vec::new(),
            solve_time_seconds: 0.0,
        };
        if domains.iter().any(|(lo, hi)| lo > hi) {
            return Ok(infeasible);
        }

        let mut point: Vec<f64> = domains.iter().map(|(lo, _)| *lo).collect();
        let mut best: Option<(f64, Vec<f64>)> = None;
        'search: loop {
            if self.rows.values().all(|row| row.is_satisfied(&point)) {
                let value: f64 = costs.iter().zip(&point).map(|(c, v)| c * v).sum();
                let improves = match (&best, sense) {
                    (None, _) => true,
                    (Some((incumbent, _)), Sense::Maximize) => value > *incumbent,
                    (Some((incumbent, _)), Sense::Minimize) => value < *incumbent,
                };
                if improves {
                    best = Some((value, point.clone()));
                }
            }

            let mut idx = 0;
            loop {
                if idx == point.len() {
                    break 'search;
                }
                if point[idx] < domains[idx].1 {
                    point[idx] += 1.0;
                    break;
                }
                point[idx] = domains[idx].0;
                idx += 1;
            }
        }

        Ok(match best {
            Some((objective_value, values)) => EngineSolution {
                status: SolverStatus::Optimal,
                objective_value,
                values,
                solve_time_seconds: 0.0,
            },
            None => infeasible,
        })
    }
}
