//! Builder functions for common expression shapes.

use crate::expr::core::Expr;
use crate::expr::error::ExprError;
use crate::expr::term::TermKey;
use crate::ids::VariableId;

/// Sum of expressions, starting from the empty expression.
pub fn sum<I, T>(items: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    items
        .into_iter()
        .fold(Expr::new(), |acc, item| acc.add(item.into()))
}

/// `sum(coefficients[i] * variables[i])`; duplicate variables accumulate.
pub fn linear_terms(variables: &[VariableId], coefficients: &[f64]) -> Result<Expr, ExprError> {
    if variables.len() != coefficients.len() {
        return Err(ExprError::MismatchedLengths {
            variables: variables.len(),
            coefficients: coefficients.len(),
        });
    }
    Ok(Expr::from_terms(
        variables
            .iter()
            .zip(coefficients)
            .map(|(var, coeff)| (TermKey::linear(*var), *coeff)),
    ))
}

/// `sum(a[i] * b[i])` over pairs of variables, as a bilinear expression.
pub fn bilinear_terms(
    pairs: &[(VariableId, VariableId)],
    coefficients: &[f64],
) -> Result<Expr, ExprError> {
    if pairs.len() != coefficients.len() {
        return Err(ExprError::MismatchedLengths {
            variables: pairs.len(),
            coefficients: coefficients.len(),
        });
    }
    Ok(Expr::from_terms(
        pairs
            .iter()
            .zip(coefficients)
            .map(|((a, b), coeff)| (TermKey::pair(*a, *b), *coeff)),
    ))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{bilinear_terms, linear_terms, sum};
    use crate::VariableId;
    use crate::expr::{ExprError, TermKey};

    #[test]
    fn linear_terms_rejects_mismatched_lengths() {
        let result = linear_terms(&[VariableId::new(1), VariableId::new(2)], &[1.0]);
        assert_eq!(
            result.unwrap_err(),
            ExprError::MismatchedLengths {
                variables: 2,
                coefficients: 1
            }
        );
    }

    #[test]
    fn linear_terms_merges_duplicates() {
        let expr = linear_terms(
            &[VariableId::new(1), VariableId::new(2), VariableId::new(1)],
            &[1.0, 3.5, 2.0],
        )
        .expect("linear_terms should succeed");
        assert_eq!(expr.len(), 2);
        assert_eq!(
            expr.coefficient(&TermKey::linear(VariableId::new(1))),
            Some(3.0)
        );
    }

    #[test]
    fn bilinear_terms_sorts_pairs() {
        let a = VariableId::new(1);
        let b = VariableId::new(2);
        let expr = bilinear_terms(&[(b, a), (a, b)], &[1.0, 2.0]).expect("should succeed");
        assert_eq!(expr.len(), 1);
        assert_eq!(expr.coefficient(&TermKey::pair(a, b)), Some(3.0));
    }

    #[test]
    fn sum_accepts_variables_and_constants() {
        let total = sum([VariableId::new(1), VariableId::new(2)]);
        assert_eq!(total.len(), 2);
        assert_eq!(total.coefficient(&TermKey::constant()), None);
        let shifted = sum([1.0, 2.5]);
        assert_eq!(shifted.constant_value(), 3.5);
    }
}
