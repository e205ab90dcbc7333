//! Core expression type: a map from term keys to coefficients.
//!
//! An `Expr` is a cheap shared handle. The term map is immutable once built;
//! every arithmetic operation allocates a fresh node. Only the bound links
//! (see `bounds`) are mutated in place, so two clones of one handle observe
//! the same comparison state.

use crate::expr::bounds::BoundLinks;
use crate::expr::error::ExprError;
use crate::expr::term::TermKey;
use crate::ids::VariableId;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub(crate) struct ExprNode {
    pub(crate) terms: BTreeMap<TermKey, f64>,
    pub(crate) bounds: RefCell<BoundLinks>,
}

/// Polynomial expression over decision variables.
#[derive(Clone)]
pub struct Expr(pub(crate) Rc<ExprNode>);

/// Right-hand side of an arithmetic or comparison operation.
#[derive(Debug, Clone)]
pub enum Operand {
    Scalar(f64),
    Expr(Expr),
}

impl Operand {
    /// Wrap scalars into a constant expression.
    pub fn into_expr(self) -> Expr {
        match self {
            Operand::Scalar(value) => Expr::constant(value),
            Operand::Expr(expr) => expr,
        }
    }

    fn negated(self) -> Operand {
        match self {
            Operand::Scalar(value) => Operand::Scalar(-value),
            Operand::Expr(expr) => Operand::Expr(expr.scale(-1.0)),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Scalar(f64::from(value))
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Operand::Expr(expr)
    }
}

impl From<&Expr> for Operand {
    fn from(expr: &Expr) -> Self {
        Operand::Expr(expr.clone())
    }
}

impl From<VariableId> for Operand {
    fn from(var: VariableId) -> Self {
        Operand::Expr(Expr::var(var))
    }
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (no terms at all, not even a constant key).
    pub fn new() -> Self {
        Self::from_map(BTreeMap::new())
    }

    pub(crate) fn from_map(terms: BTreeMap<TermKey, f64>) -> Self {
        Self(Rc::new(ExprNode {
            terms,
            bounds: RefCell::new(BoundLinks::default()),
        }))
    }

    /// Just a constant, stored under the constant key.
    pub fn constant(value: f64) -> Self {
        Self::from_map(BTreeMap::from([(TermKey::constant(), value)]))
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var: VariableId) -> Self {
        Self::term(var, 1.0)
    }

    /// Single linear term: coeff * var.
    pub fn term(var: VariableId, coeff: f64) -> Self {
        Self::from_map(BTreeMap::from([(TermKey::linear(var), coeff)]))
    }

    /// From raw (key, coefficient) pairs; duplicate keys accumulate.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (TermKey, f64)>,
    {
        let mut map = BTreeMap::new();
        for (key, coeff) in terms {
            *map.entry(key).or_insert(0.0) += coeff;
        }
        Self::from_map(map)
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn terms(&self) -> &BTreeMap<TermKey, f64> {
        &self.0.terms
    }

    pub fn coefficient(&self, key: &TermKey) -> Option<f64> {
        self.0.terms.get(key).copied()
    }

    /// Number of stored keys, zero coefficients included.
    pub fn len(&self) -> usize {
        self.0.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.terms.is_empty()
    }

    /// Max degree of any stored key (0 for constants and the empty expression).
    pub fn degree(&self) -> usize {
        self.0.terms.keys().map(TermKey::degree).max().unwrap_or(0)
    }

    /// Coefficient of the constant key, or 0.0 when absent.
    pub fn constant_value(&self) -> f64 {
        self.coefficient(&TermKey::constant()).unwrap_or(0.0)
    }

    /// True when the only stored key is the constant key.
    pub fn is_constant(&self) -> bool {
        self.0.terms.len() == 1 && self.0.terms.contains_key(&TermKey::constant())
    }

    /// Every variable referenced by a stored key, deduplicated and sorted.
    pub fn variables(&self) -> Vec<VariableId> {
        let mut vars: Vec<VariableId> = self
            .0
            .terms
            .keys()
            .flat_map(|key| key.variables().iter().copied())
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Term map, moved out when this is the last handle.
    pub fn into_terms(self) -> BTreeMap<TermKey, f64> {
        match Rc::try_unwrap(self.0) {
            Ok(node) => node.terms,
            Err(shared) => shared.terms.clone(),
        }
    }

    // ── Algebra ─────────────────────────────────────────────

    /// Scale every coefficient by a factor.
    pub fn scale(&self, by: f64) -> Self {
        Self::from_map(
            self.0
                .terms
                .iter()
                .map(|(key, coeff)| (key.clone(), coeff * by))
                .collect(),
        )
    }

    /// Union of keys with summed coefficients. A scalar lands on the constant key.
    pub fn add(&self, rhs: impl Into<Operand>) -> Self {
        let mut terms = self.0.terms.clone();
        match rhs.into() {
            Operand::Scalar(value) => {
                *terms.entry(TermKey::constant()).or_insert(0.0) += value;
            }
            Operand::Expr(other) => {
                for (key, coeff) in &other.0.terms {
                    *terms.entry(key.clone()).or_insert(0.0) += coeff;
                }
            }
        }
        Self::from_map(terms)
    }

    pub fn sub(&self, rhs: impl Into<Operand>) -> Self {
        self.add(rhs.into().negated())
    }

    /// Cartesian product of terms; keys concatenate, coefficients multiply.
    pub fn mul(&self, rhs: impl Into<Operand>) -> Self {
        match rhs.into() {
            Operand::Scalar(value) => self.scale(value),
            Operand::Expr(other) => {
                let mut terms = BTreeMap::new();
                for (lhs_key, lhs_coeff) in &self.0.terms {
                    for (rhs_key, rhs_coeff) in &other.0.terms {
                        *terms.entry(lhs_key.concat(rhs_key)).or_insert(0.0) +=
                            lhs_coeff * rhs_coeff;
                    }
                }
                Self::from_map(terms)
            }
        }
    }

    /// Division by a nonzero scalar. Variables and expressions are rejected.
    pub fn checked_div(&self, rhs: impl Into<Operand>) -> Result<Self, ExprError> {
        match rhs.into() {
            Operand::Scalar(value) if value == 0.0 => Err(ExprError::DivisionByZero),
            Operand::Scalar(value) => Ok(self.scale(value.recip())),
            Operand::Expr(_) => Err(ExprError::DivisionByExpression),
        }
    }

    pub fn neg(&self) -> Self {
        self.scale(-1.0)
    }

    /// Fresh, unbound copy with identical terms.
    pub fn pos(&self) -> Self {
        Self::from_map(self.0.terms.clone())
    }

    /// Raise to a non-negative integer power.
    ///
    /// Supported bases: a single single-variable term (`3 x^2`), a constant,
    /// the empty expression, and a constant plus one single-variable term
    /// (`4 - 5 x^3`), which is expanded by repeated multiplication. Any base
    /// is accepted for exponents 0 and 1.
    pub fn pow(&self, exponent: i32) -> Result<Self, ExprError> {
        let unsupported = ExprError::UnsupportedPower { exponent };
        let times = usize::try_from(exponent).map_err(|_| unsupported.clone())?;
        if times == 0 {
            return Ok(Self::constant(1.0));
        }
        if times == 1 {
            return Ok(self.pos());
        }

        let terms = &self.0.terms;
        let all_simple = terms
            .keys()
            .all(|key| key.is_constant() || key.is_single_variable());
        match terms.len() {
            0 => Ok(Self::new()),
            1 => match terms.iter().next() {
                Some((key, coeff)) if all_simple => Ok(Self::from_map(BTreeMap::from([(
                    key.repeat(times),
                    coeff.powi(exponent),
                )]))),
                _ => Err(unsupported),
            },
            2 if all_simple && terms.contains_key(&TermKey::constant()) => {
                let mut result = Self::constant(1.0);
                for _ in 0..times {
                    result = result.mul(self);
                }
                Ok(result)
            }
            _ => Err(unsupported),
        }
    }
}

impl VariableId {
    /// `self^exponent` as an expression.
    pub fn pow(self, exponent: i32) -> Result<Expr, ExprError> {
        Expr::var(self).pow(exponent)
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::new()
    }
}

impl From<VariableId> for Expr {
    fn from(var: VariableId) -> Self {
        Expr::var(var)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let links = self.0.bounds.borrow();
        f.debug_struct("Expr")
            .field("terms", &self.0.terms)
            .field("has_lower", &links.lower.is_some())
            .field("has_upper", &links.upper.is_some())
            .finish()
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Variable terms first, constant last.
        let constant = self.0.terms.get_key_value(&TermKey::constant());
        let ordered = self
            .0
            .terms
            .iter()
            .filter(|(key, _)| !key.is_constant())
            .chain(constant);

        let mut first = true;
        for (key, coeff) in ordered {
            let negative = coeff.is_sign_negative() && *coeff != 0.0;
            match (first, negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            let magnitude = coeff.abs();
            if key.is_constant() {
                write!(f, "{magnitude}")?;
            } else if magnitude == 1.0 {
                write!(f, "{key}")?;
            } else {
                write!(f, "{magnitude} {key}")?;
            }
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
