//! Value types exchanged across the engine boundary.

use crate::{SolutionView, SolverStatus};

macro_rules! define_handle_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create a handle from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }

            /// Position in dense per-handle storage.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_handle_type!(VariableHandle);
define_handle_type!(ConstraintHandle);

/// Integrality class of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Binary,
    Integer,
    /// Continuous in the model but known to take integral values at optimum.
    ImplicitInteger,
    Continuous,
}

impl VariableKind {
    /// Whether the engine must branch on this variable.
    pub fn is_integral(self) -> bool {
        matches!(self, VariableKind::Binary | VariableKind::Integer)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Binary => "binary",
            VariableKind::Integer => "integer",
            VariableKind::ImplicitInteger => "implicit_integer",
            VariableKind::Continuous => "continuous",
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Raw result of one optimize call, indexed by variable handle.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSolution {
    pub status: SolverStatus,
    pub objective_value: f64,
    /// Primal values; `values[h.index()]` belongs to handle `h`.
    pub values: Vec<f64>,
    pub solve_time_seconds: f64,
}

impl EngineSolution {
    pub fn value(&self, handle: VariableHandle) -> Option<f64> {
        self.values.get(handle.index()).copied()
    }
}

impl SolutionView for EngineSolution {
    fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn status(&self) -> SolverStatus {
        self.status
    }

    fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }
}
