//! Lowering bounded expressions into canonical constraints.

use crate::expr::core::Expr;
use crate::expr::error::ConstraintError;
use crate::expr::term::TermKey;
use crate::ids::VariableId;
use std::collections::BTreeMap;
use tracing::trace;

/// A constraint in engine-ready form: `lower <= linear + bilinear <= upper`.
///
/// Constants have been moved to the bounds. At least one bound is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    linear: Vec<(VariableId, f64)>,
    bilinear: Vec<(VariableId, VariableId, f64)>,
    lower: Option<f64>,
    upper: Option<f64>,
    coefficients: BTreeMap<TermKey, f64>,
}

impl Constraint {
    /// Canonicalize an expression carrying bound links.
    ///
    /// On success every link touched is cleared so the expressions involved
    /// can be compared again. On failure the links are left as they were.
    pub fn from_expr(expr: &Expr) -> Result<Self, ConstraintError> {
        let constraint = Self::peek(expr)?;
        expr.release_chain();
        Ok(constraint)
    }

    /// Canonicalize without clearing any link.
    ///
    /// Pair with [`Expr::release_chain`] once the constraint has been
    /// accepted downstream.
    pub fn peek(expr: &Expr) -> Result<Self, ConstraintError> {
        let pivot = middle_of_chain(expr);
        let lower_side = pivot.lower();
        let upper_side = pivot.upper();

        let (terms, lower, upper) = match (&lower_side, &upper_side) {
            (None, None) => return Err(ConstraintError::MissingBound),
            (Some(lo), Some(hi)) if lo.ptr_eq(hi) => {
                let (terms, bound) = split_constant(pivot.sub(lo));
                (terms, Some(bound), Some(bound))
            }
            (Some(lo), Some(hi)) => {
                if lo.degree() > 0 || hi.degree() > 0 {
                    return Err(ConstraintError::MixedBounds);
                }
                let (terms, offset) = split_constant(pivot.pos());
                (
                    terms,
                    Some(lo.constant_value() + offset),
                    Some(hi.constant_value() + offset),
                )
            }
            (Some(lo), None) => {
                let (terms, bound) = split_constant(pivot.sub(lo));
                (terms, Some(bound), None)
            }
            (None, Some(hi)) => {
                let (terms, bound) = split_constant(pivot.sub(hi));
                (terms, None, Some(bound))
            }
        };

        let constraint = Self::build(terms, lower, upper)?;

        trace!(
            component = "expr",
            operation = "canonicalize",
            status = "success",
            linear_terms = constraint.linear.len(),
            bilinear_terms = constraint.bilinear.len(),
            lower = ?constraint.lower,
            upper = ?constraint.upper,
            "Canonicalized bounded expression"
        );
        Ok(constraint)
    }

    /// Canonicalize an unbound expression against explicit scalar bounds.
    pub fn from_parts(
        expr: &Expr,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<Self, ConstraintError> {
        let (terms, offset) = split_constant(expr.pos());
        Self::build(
            terms,
            lower.map(|bound| bound + offset),
            upper.map(|bound| bound + offset),
        )
    }

    fn build(
        coefficients: BTreeMap<TermKey, f64>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<Self, ConstraintError> {
        match (lower, upper) {
            (None, None) => return Err(ConstraintError::MissingBound),
            (Some(lo), _) if lo.is_nan() => return Err(ConstraintError::InvalidBound),
            (_, Some(hi)) if hi.is_nan() => return Err(ConstraintError::InvalidBound),
            (Some(lo), Some(hi)) if hi < lo => {
                return Err(ConstraintError::InvertedBounds {
                    lower: lo,
                    upper: hi,
                });
            }
            _ => {}
        }

        let mut linear = Vec::new();
        let mut bilinear = Vec::new();
        for (key, &coefficient) in &coefficients {
            if !coefficient.is_finite() {
                return Err(ConstraintError::NonFiniteCoefficient { coefficient });
            }
            match *key.variables() {
                [] => {}
                [var] => linear.push((var, coefficient)),
                [a, b] => bilinear.push((a, b, coefficient)),
                _ => {
                    return Err(ConstraintError::UnsupportedDegree {
                        degree: key.degree(),
                    });
                }
            }
        }

        Ok(Self {
            linear,
            bilinear,
            lower,
            upper,
            coefficients,
        })
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn linear_terms(&self) -> &[(VariableId, f64)] {
        &self.linear
    }

    /// Degree-2 terms; the first id is never greater than the second.
    pub fn bilinear_terms(&self) -> &[(VariableId, VariableId, f64)] {
        &self.bilinear
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Full term map after constant extraction, zero coefficients included.
    pub fn coefficients(&self) -> &BTreeMap<TermKey, f64> {
        &self.coefficients
    }

    pub fn coefficient(&self, key: &TermKey) -> Option<f64> {
        self.coefficients.get(key).copied()
    }

    pub fn is_linear(&self) -> bool {
        self.bilinear.is_empty()
    }

    pub fn is_equality(&self) -> bool {
        matches!((self.lower, self.upper), (Some(lo), Some(hi)) if lo == hi)
    }

    /// Every variable referenced, deduplicated and sorted.
    pub fn variables(&self) -> Vec<VariableId> {
        let mut vars: Vec<VariableId> = self
            .coefficients
            .keys()
            .flat_map(|key| key.variables().iter().copied())
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    pub fn into_parts(
        self,
    ) -> (
        Vec<(VariableId, f64)>,
        Vec<(VariableId, VariableId, f64)>,
        Option<f64>,
        Option<f64>,
    ) {
        (self.linear, self.bilinear, self.lower, self.upper)
    }
}

impl Expr {
    /// Shorthand for [`Constraint::from_expr`].
    pub fn canonicalize(&self) -> Result<Constraint, ConstraintError> {
        Constraint::from_expr(self)
    }

    /// Clear the links of the chain this expression belongs to, middle
    /// node included.
    pub fn release_chain(&self) {
        middle_of_chain(self).clear_bounds();
        self.clear_bounds();
    }
}

/// Node the constraint is written around.
///
/// `lo <= mid <= hi` built left to right returns `lo`, and a constant
/// receiver such as `c <= e` returns `c`; both hop to the middle expression.
fn middle_of_chain(expr: &Expr) -> Expr {
    let constant = expr.degree() == 0;
    match (expr.lower(), expr.upper()) {
        (None, Some(hi)) if hi.upper().is_some() || (constant && hi.degree() > 0) => hi,
        (Some(lo), None) if lo.lower().is_some() || (constant && lo.degree() > 0) => lo,
        (Some(lo), Some(hi)) if constant && lo.ptr_eq(&hi) && lo.degree() > 0 => lo,
        _ => expr.clone(),
    }
}

/// Remove the constant key and return it negated, i.e. the bound it implies.
fn split_constant(expr: Expr) -> (BTreeMap<TermKey, f64>, f64) {
    let mut terms = expr.into_terms();
    let constant = terms.remove(&TermKey::constant()).unwrap_or(0.0);
    (terms, -constant)
}
