//! Expression and constraint errors.

/// Invalid operand combinations in arithmetic or comparison builders.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Divisor is a variable or an expression rather than a scalar.
    DivisionByExpression,
    /// Scalar divisor is zero.
    DivisionByZero,
    /// Exponent is negative or the base shape cannot be raised to it.
    UnsupportedPower { exponent: i32 },
    /// Comparison would overwrite an existing bound link.
    InvalidBoundChain,
    /// Variable and coefficient slices differ in length.
    MismatchedLengths { variables: usize, coefficients: usize },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::DivisionByExpression => "EXPR_DIVISION_BY_EXPRESSION",
            ExprError::DivisionByZero => "EXPR_DIVISION_BY_ZERO",
            ExprError::UnsupportedPower { .. } => "EXPR_UNSUPPORTED_POWER",
            ExprError::InvalidBoundChain => "EXPR_INVALID_BOUND_CHAIN",
            ExprError::MismatchedLengths { .. } => "EXPR_MISMATCHED_LENGTHS",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::DivisionByExpression => write!(
                f,
                "[{}] Expressions can only be divided by a number",
                self.code()
            ),
            ExprError::DivisionByZero => write!(f, "[{}] Division by zero", self.code()),
            ExprError::UnsupportedPower { exponent } => write!(
                f,
                "[{}] Cannot raise expression to power {}; only non-negative powers of \
                 single-variable expressions are supported",
                self.code(),
                exponent
            ),
            ExprError::InvalidBoundChain => write!(
                f,
                "[{}] Comparison conflicts with existing bounds on the expression",
                self.code()
            ),
            ExprError::MismatchedLengths {
                variables,
                coefficients,
            } => write!(
                f,
                "[{}] Got {} variables but {} coefficients",
                self.code(),
                variables,
                coefficients
            ),
        }
    }
}

impl std::error::Error for ExprError {}

/// Failures while lowering a bounded expression into a constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// Neither a lower nor an upper bound was attached.
    MissingBound,
    /// Literal bounds with upper below lower.
    InvertedBounds { lower: f64, upper: f64 },
    /// A bound evaluated to NaN.
    InvalidBound,
    /// Two distinct bounds where at least one still carries variables.
    MixedBounds,
    /// A term of degree three or higher.
    UnsupportedDegree { degree: usize },
    /// Coefficient is NaN or infinite.
    NonFiniteCoefficient { coefficient: f64 },
}

impl ConstraintError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintError::MissingBound => "CONSTRAINT_MISSING_BOUND",
            ConstraintError::InvertedBounds { .. } => "CONSTRAINT_INVERTED_BOUNDS",
            ConstraintError::InvalidBound => "CONSTRAINT_INVALID_BOUND",
            ConstraintError::MixedBounds => "CONSTRAINT_MIXED_BOUNDS",
            ConstraintError::UnsupportedDegree { .. } => "CONSTRAINT_UNSUPPORTED_DEGREE",
            ConstraintError::NonFiniteCoefficient { .. } => "CONSTRAINT_NON_FINITE_COEFFICIENT",
        }
    }
}

impl std::fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintError::MissingBound => {
                write!(f, "[{}] At least one bound is required", self.code())
            }
            ConstraintError::InvertedBounds { lower, upper } => write!(
                f,
                "[{}] Invalid constraint: upper ({}) < lower ({})",
                self.code(),
                upper,
                lower
            ),
            ConstraintError::InvalidBound => {
                write!(f, "[{}] Constraint bound is NaN", self.code())
            }
            ConstraintError::MixedBounds => write!(
                f,
                "[{}] Two-sided constraints need constant bounds on both sides",
                self.code()
            ),
            ConstraintError::UnsupportedDegree { degree } => write!(
                f,
                "[{}] Unsupported term of degree {} in constraint (at most 2)",
                self.code(),
                degree
            ),
            ConstraintError::NonFiniteCoefficient { coefficient } => write!(
                f,
                "[{}] Constraint coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
        }
    }
}

impl std::error::Error for ConstraintError {}
