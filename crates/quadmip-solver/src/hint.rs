//! Primal solution hints.
//!
//! A hint lists `(handle, value)` pairs for some columns. Engines fill the
//! remaining columns with [`default_primal_value`] before checking the point
//! against their rows.

use crate::{SolverError, VariableHandle};

/// Start value for a column the hint does not mention: zero if the bounds
/// allow it, otherwise the finite bound nearest to zero.
pub fn default_primal_value(lower: f64, upper: f64) -> f64 {
    if lower > 0.0 {
        lower
    } else if upper < 0.0 {
        upper
    } else {
        0.0
    }
}

/// Expand a sparse hint to one value per column.
///
/// `bounds` yields `(lower, upper)` in handle order. Later entries for the
/// same handle overwrite earlier ones.
pub fn dense_hint<I>(
    bounds: I,
    values: &[(VariableHandle, f64)],
) -> Result<Vec<f64>, SolverError>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut point: Vec<f64> = bounds
        .into_iter()
        .map(|(lower, upper)| default_primal_value(lower, upper))
        .collect();
    for (handle, value) in values {
        let slot = point
            .get_mut(handle.index())
            .ok_or(SolverError::InvalidHandle(handle.inner()))?;
        *slot = *value;
    }
    Ok(point)
}

/// Reason a hinted value violates its column, if it does.
pub fn column_violation(
    handle: usize,
    value: f64,
    lower: f64,
    upper: f64,
    integral: bool,
    tolerance: f64,
) -> Option<String> {
    if !value.is_finite() {
        return Some(format!("column {handle} has non-finite value {value}"));
    }
    if value < lower - tolerance || value > upper + tolerance {
        return Some(format!(
            "column {handle} value {value} outside [{lower}, {upper}]"
        ));
    }
    if integral && (value - value.round()).abs() > tolerance {
        return Some(format!("column {handle} value {value} is not integral"));
    }
    None
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_primal_value() {
        assert_eq!(default_primal_value(-10.0, 10.0), 0.0);
        assert_eq!(default_primal_value(0.0, 10.0), 0.0);
        assert_eq!(default_primal_value(2.0, 10.0), 2.0);
        assert_eq!(default_primal_value(-10.0, -3.0), -3.0);
        assert_eq!(default_primal_value(f64::NEG_INFINITY, f64::INFINITY), 0.0);
        assert_eq!(default_primal_value(4.0, f64::INFINITY), 4.0);
        assert_eq!(default_primal_value(f64::NEG_INFINITY, -1.5), -1.5);
    }

    #[test]
    fn test_dense_hint_fills_unlisted_columns() {
        let bounds = [(0.0, 1.0), (2.0, 5.0), (-4.0, -1.0)];
        let point = dense_hint(bounds, &[(VariableHandle::new(0), 1.0)]).unwrap();
        assert_eq!(point, vec![1.0, 2.0, -1.0]);
    }

    #[test]
    fn test_dense_hint_rejects_unknown_handle() {
        let result = dense_hint([(0.0, 1.0)], &[(VariableHandle::new(7), 1.0)]);
        assert_eq!(result, Err(SolverError::InvalidHandle(7)));
    }

    #[test]
    fn test_column_violation() {
        assert_eq!(column_violation(0, 0.5, 0.0, 1.0, false, 1e-9), None);
        assert!(
            column_violation(0, 0.5, 0.0, 1.0, true, 1e-9).is_some_and(|r| r.contains("integral"))
        );
        assert!(
            column_violation(1, 3.0, 0.0, 1.0, false, 1e-9).is_some_and(|r| r.contains("outside"))
        );
        assert!(column_violation(2, f64::NAN, 0.0, 1.0, false, 1e-9).is_some());
    }
}
