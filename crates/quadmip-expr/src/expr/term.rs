//! Term keys: monomials as sorted variable sequences with multiplicity.

use crate::ids::VariableId;

/// A monomial identified by the sorted sequence of variables multiplied together.
///
/// Multiplicity matters: `{x, x}` is `x^2` and differs from `{x}`. The empty key
/// is the constant term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TermKey(Vec<VariableId>);

impl TermKey {
    /// Build a key from variables in any order.
    pub fn new(mut variables: Vec<VariableId>) -> Self {
        variables.sort_unstable();
        Self(variables)
    }

    /// The constant (degree 0) key.
    pub fn constant() -> Self {
        Self(Vec::new())
    }

    pub fn linear(var: VariableId) -> Self {
        Self(vec![var])
    }

    /// Degree-2 key; `a == b` gives a quadratic term.
    pub fn pair(a: VariableId, b: VariableId) -> Self {
        Self::new(vec![a, b])
    }

    /// `var` repeated `times` times, i.e. `var^times`.
    pub fn repeated(var: VariableId, times: usize) -> Self {
        Self(vec![var; times])
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.0
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn is_constant(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty and made of one variable only (`x`, `x^2`, `x^3`, ...).
    pub fn is_single_variable(&self) -> bool {
        match self.0.split_first() {
            Some((first, rest)) => rest.iter().all(|v| v == first),
            None => false,
        }
    }

    /// Key of the product of two monomials.
    pub fn concat(&self, other: &TermKey) -> TermKey {
        let mut variables = Vec::with_capacity(self.0.len() + other.0.len());
        variables.extend_from_slice(&self.0);
        variables.extend_from_slice(&other.0);
        TermKey::new(variables)
    }

    /// Key of this monomial raised to the `times`-th power.
    pub fn repeat(&self, times: usize) -> TermKey {
        TermKey::new(self.0.repeat(times))
    }
}

impl From<VariableId> for TermKey {
    fn from(var: VariableId) -> Self {
        TermKey::linear(var)
    }
}

impl<const N: usize> From<[VariableId; N]> for TermKey {
    fn from(variables: [VariableId; N]) -> Self {
        TermKey::new(variables.to_vec())
    }
}

impl std::fmt::Display for TermKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        for (idx, var) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, "*")?;
            }
            write!(f, "{var}")?;
        }
        Ok(())
    }
}
