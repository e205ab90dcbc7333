use quadmip_solver::VariableKind;

/// Bounds for a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `[0, +inf)`, the default domain of a new variable.
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    /// `(-inf, +inf)`.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Neither side is NaN and lower does not exceed upper.
    pub fn is_valid(self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan() && self.lower <= self.upper
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::non_negative()
    }
}

/// A decision variable as registered with a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub kind: VariableKind,
    pub bounds: Bounds,
    /// Coefficient used when optimizing without an explicit objective.
    pub objective_coefficient: f64,
    /// Branching priority hint; higher branches first.
    pub priority: i32,
}

impl Variable {
    fn with_kind(kind: VariableKind, bounds: Bounds) -> Self {
        Self {
            kind,
            bounds,
            objective_coefficient: 0.0,
            priority: 0,
        }
    }

    /// Create a binary variable with bounds [0, 1].
    pub fn binary() -> Self {
        Self::with_kind(VariableKind::Binary, Bounds::new(0.0, 1.0))
    }

    /// Create an integer variable with specified bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self::with_kind(VariableKind::Integer, bounds)
    }

    /// Create a continuous variable that the engine may treat as integral.
    pub fn implicit_integer(bounds: Bounds) -> Self {
        Self::with_kind(VariableKind::ImplicitInteger, bounds)
    }

    /// Create a continuous variable with specified bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self::with_kind(VariableKind::Continuous, bounds)
    }

    pub fn with_objective(mut self, coefficient: f64) -> Self {
        self.objective_coefficient = coefficient;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_lower(mut self, lower: f64) -> Self {
        self.bounds.lower = lower;
        self
    }

    pub fn with_upper(mut self, upper: f64) -> Self {
        self.bounds.upper = upper;
        self
    }
}

impl Default for Variable {
    /// Continuous on `[0, +inf)`.
    fn default() -> Self {
        Self::continuous(Bounds::default())
    }
}
