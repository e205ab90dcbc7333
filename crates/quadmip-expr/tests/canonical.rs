#![allow(clippy::float_cmp)]

use quadmip_expr::{Constraint, ConstraintError, Expr, ExprError, TermKey, VariableId};

fn vars() -> (VariableId, VariableId) {
    (VariableId::fresh(), VariableId::fresh())
}

fn sorted(a: VariableId, b: VariableId) -> (VariableId, VariableId) {
    if a <= b { (a, b) } else { (b, a) }
}

#[test]
fn quadratic_expansion_has_three_terms() {
    let (x1, x2) = vars();
    let e = (x1 + x2) * (2 * x1 + x2);
    assert_eq!(e.len(), 3);
    assert_eq!(e.coefficient(&TermKey::pair(x1, x1)), Some(2.0));
    assert_eq!(e.coefficient(&TermKey::pair(x1, x2)), Some(3.0));
    assert_eq!(e.coefficient(&TermKey::pair(x2, x2)), Some(1.0));
}

#[test]
fn bilinear_cancellation_leaves_zero() {
    let (x1, x2) = vars();
    let e = x1 * x2 - x2 * x1;
    assert_eq!(e.coefficient(&TermKey::pair(x1, x2)), Some(0.0));
}

#[test]
fn scalar_round_trip() {
    let (x1, _) = vars();
    let e = (4 * x1) / 4;
    assert_eq!(e.coefficient(&TermKey::linear(x1)), Some(1.0));
}

#[test]
fn division_by_expression_is_rejected() {
    let (x1, x2) = vars();
    let one = Expr::constant(1.0);
    assert_eq!(
        one.checked_div(x1).unwrap_err(),
        ExprError::DivisionByExpression
    );
    assert_eq!(
        one.checked_div(x1 + x2).unwrap_err(),
        ExprError::DivisionByExpression
    );
}

#[test]
fn upper_bound_extraction() {
    let (x1, x2) = vars();
    let lhs = x1 + x2 - 1;
    lhs.leq(x1 * x2 + 2).expect("leq should link");

    let c = Constraint::from_expr(&lhs).expect("canonicalize should succeed");
    assert_eq!(c.upper(), Some(3.0));
    assert_eq!(c.lower(), None);
    let mut linear = c.linear_terms().to_vec();
    linear.sort_by_key(|(var, _)| *var);
    assert_eq!(linear, vec![(x1, 1.0), (x2, 1.0)]);
    let (a, b) = sorted(x1, x2);
    assert_eq!(c.bilinear_terms(), &[(a, b, -1.0)]);
}

#[test]
fn equality_extraction() {
    let (x1, x2) = vars();
    let lhs = x1 + x2 - 1;
    lhs.equals(x1 * x2 + 2).expect("equals should link");

    let c = Constraint::from_expr(&lhs).expect("canonicalize should succeed");
    assert_eq!(c.lower(), Some(3.0));
    assert_eq!(c.upper(), Some(3.0));
    assert_eq!(c.linear_terms().len(), 2);
    assert_eq!(c.bilinear_terms().len(), 1);
}

#[test]
fn chained_scalar_bounds_are_linked() {
    let (x1, _) = vars();
    let e = 5 * x1;
    Expr::between(1.0, &e, 10.0).expect("between should link");
    assert_eq!(e.lower().map(|b| b.constant_value()), Some(1.0));
    assert_eq!(e.upper().map(|b| b.constant_value()), Some(10.0));

    let c = Constraint::from_expr(&e).expect("canonicalize should succeed");
    assert_eq!((c.lower(), c.upper()), (Some(1.0), Some(10.0)));
    assert_eq!(c.linear_terms(), &[(x1, 5.0)]);
}

#[test]
fn infeasible_literal_bounds_are_rejected() {
    let (x1, _) = vars();
    let e = Expr::var(x1);
    Expr::between(5, &e, 2).expect("between should link");
    assert!(matches!(
        Constraint::from_expr(&e),
        Err(ConstraintError::InvertedBounds { .. })
    ));
}

#[test]
fn mixed_two_sided_bounds_are_rejected() {
    let (x1, x2) = vars();
    let lo = Expr::var(x2);
    let mid = Expr::var(x1);
    mid.geq(&lo).expect("geq should link");
    mid.leq(4.0).expect("constant may close the chain");
    assert_eq!(
        Constraint::from_expr(&mid).unwrap_err(),
        ConstraintError::MixedBounds
    );
}
