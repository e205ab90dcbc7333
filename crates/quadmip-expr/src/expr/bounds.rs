//! Bound chain: comparison builders that link expressions in place.
//!
//! `a.leq(b)` records `a.upper = b` and `b.lower = a` and hands back `a`, so
//! `lo <= mid <= hi` is written `mid.geq(lo)?.leq(hi)?`. The canonicalizer
//! later walks these links to recover the constraint.
//!
//! Each link is strong in one direction and weak in the other. The receiver of
//! the comparison, which is also the node handed back, owns its partner. A
//! link that would close a strong cycle is stored weak on both ends.

use crate::expr::core::{Expr, ExprNode, Operand};
use crate::expr::error::ExprError;
use crate::ids::VariableId;
use std::rc::{Rc, Weak};

pub(crate) enum Link {
    Owned(Expr),
    Back(Weak<ExprNode>),
}

impl Link {
    fn resolve(&self) -> Option<Expr> {
        match self {
            Link::Owned(expr) => Some(expr.clone()),
            Link::Back(weak) => weak.upgrade().map(Expr),
        }
    }

    fn owned(&self) -> Option<&Expr> {
        match self {
            Link::Owned(expr) => Some(expr),
            Link::Back(_) => None,
        }
    }
}

#[derive(Default)]
pub(crate) struct BoundLinks {
    pub(crate) lower: Option<Link>,
    pub(crate) upper: Option<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lower,
    Upper,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Lower => Side::Upper,
            Side::Upper => Side::Lower,
        }
    }
}

impl BoundLinks {
    fn slot(&mut self, side: Side) -> &mut Option<Link> {
        match side {
            Side::Lower => &mut self.lower,
            Side::Upper => &mut self.upper,
        }
    }
}

impl Expr {
    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Expression linked as this node's lower bound, if still alive.
    pub fn lower(&self) -> Option<Expr> {
        self.0.bounds.borrow().lower.as_ref().and_then(Link::resolve)
    }

    /// Expression linked as this node's upper bound, if still alive.
    pub fn upper(&self) -> Option<Expr> {
        self.0.bounds.borrow().upper.as_ref().and_then(Link::resolve)
    }

    pub fn has_bounds(&self) -> bool {
        self.lower().is_some() || self.upper().is_some()
    }

    fn bound(&self, side: Side) -> Option<Expr> {
        match side {
            Side::Lower => self.lower(),
            Side::Upper => self.upper(),
        }
    }

    /// `self <= rhs`. Returns `self` so chains can continue.
    pub fn leq(&self, rhs: impl Into<Operand>) -> Result<Expr, ExprError> {
        self.attach(&rhs.into().into_expr(), Side::Upper)
    }

    /// `self >= rhs`. Returns `self` so chains can continue.
    pub fn geq(&self, rhs: impl Into<Operand>) -> Result<Expr, ExprError> {
        self.attach(&rhs.into().into_expr(), Side::Lower)
    }

    /// `self == rhs`; both sides must be unbound.
    pub fn equals(&self, rhs: impl Into<Operand>) -> Result<Expr, ExprError> {
        let other = rhs.into().into_expr();
        if self.ptr_eq(&other) || self.has_bounds() || other.has_bounds() {
            return Err(ExprError::InvalidBoundChain);
        }
        self.link(&other, Side::Lower);
        self.link(&other, Side::Upper);
        Ok(self.clone())
    }

    /// `lower <= middle <= upper` as one call.
    pub fn between(
        lower: impl Into<Operand>,
        middle: &Expr,
        upper: impl Into<Operand>,
    ) -> Result<Expr, ExprError> {
        middle.geq(lower)?.leq(upper)
    }

    /// Drop every link of this node and of the nodes it is directly linked to.
    pub fn clear_bounds(&self) {
        let neighbours = [self.lower(), self.upper()];
        *self.0.bounds.borrow_mut() = BoundLinks::default();
        for neighbour in neighbours.into_iter().flatten() {
            *neighbour.0.bounds.borrow_mut() = BoundLinks::default();
        }
    }

    fn attach(&self, other: &Expr, side: Side) -> Result<Expr, ExprError> {
        if self.ptr_eq(other) {
            return Err(ExprError::InvalidBoundChain);
        }
        let unbound = !self.has_bounds() && !other.has_bounds();
        let extends_chain = self.bound(side).is_none() && other.is_constant();
        if !(unbound || extends_chain) {
            return Err(ExprError::InvalidBoundChain);
        }
        self.link(other, side);
        Ok(self.clone())
    }

    /// Set `self.side = other` and `other.opposite = self`.
    ///
    /// `self` holds the strong link so a temporary partner survives as long
    /// as the returned receiver does. If `other` already reaches `self`
    /// through strong links, both directions stay weak.
    fn link(&self, other: &Expr, side: Side) {
        let (self_link, other_link) = if other.reaches(self) {
            (
                Link::Back(Rc::downgrade(&other.0)),
                Link::Back(Rc::downgrade(&self.0)),
            )
        } else {
            (
                Link::Owned(other.clone()),
                Link::Back(Rc::downgrade(&self.0)),
            )
        };
        *self.0.bounds.borrow_mut().slot(side) = Some(self_link);
        *other.0.bounds.borrow_mut().slot(side.opposite()) = Some(other_link);
    }

    /// Whether `target` is reachable from `self` through strong links.
    fn reaches(&self, target: &Expr) -> bool {
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if node.ptr_eq(target) {
                return true;
            }
            let links = node.0.bounds.borrow();
            stack.extend(
                [links.lower.as_ref(), links.upper.as_ref()]
                    .into_iter()
                    .flatten()
                    .filter_map(Link::owned)
                    .cloned(),
            );
        }
        false
    }
}

impl VariableId {
    /// `self <= rhs` on a fresh single-variable expression.
    pub fn leq(self, rhs: impl Into<Operand>) -> Result<Expr, ExprError> {
        Expr::var(self).leq(rhs)
    }

    /// `self >= rhs` on a fresh single-variable expression.
    pub fn geq(self, rhs: impl Into<Operand>) -> Result<Expr, ExprError> {
        Expr::var(self).geq(rhs)
    }

    /// `self == rhs` on a fresh single-variable expression.
    pub fn equals(self, rhs: impl Into<Operand>) -> Result<Expr, ExprError> {
        Expr::var(self).equals(rhs)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::VariableId;
    use crate::expr::{Expr, ExprError};

    fn x() -> VariableId {
        VariableId::new(1)
    }

    fn y() -> VariableId {
        VariableId::new(2)
    }

    #[test]
    fn leq_links_both_directions() {
        let e = Expr::var(x());
        let bound = Expr::constant(5.0);
        let chained = e.leq(&bound).expect("leq should link");

        assert!(chained.ptr_eq(&e));
        assert!(e.upper().is_some_and(|u| u.ptr_eq(&bound)));
        assert!(bound.lower().is_some_and(|l| l.ptr_eq(&e)));
        assert!(e.lower().is_none());
    }

    #[test]
    fn scalar_rhs_stays_alive_through_owned_link() {
        let e = Expr::var(x());
        e.leq(4.0).expect("leq should link");
        let upper = e.upper().expect("upper bound should be alive");
        assert_eq!(upper.constant_value(), 4.0);
        assert!(upper.lower().is_some_and(|l| l.ptr_eq(&e)));
    }

    #[test]
    fn constant_receiver_keeps_temporary_partner_alive() {
        let lo = Expr::constant(1.0);
        lo.leq(Expr::var(x()).add(y())).expect("leq should link");
        let upper = lo.upper().expect("upper bound should be alive");
        assert_eq!(upper.len(), 2);
        assert!(upper.lower().is_some_and(|l| l.ptr_eq(&lo)));
    }

    #[test]
    fn constant_receiver_keeps_temporary_lower_alive() {
        let hi = Expr::constant(3.0)
            .geq(Expr::term(x(), 2.0))
            .expect("geq should link");
        let lower = hi.lower().expect("lower bound should be alive");
        assert_eq!(lower.degree(), 1);
        assert!(lower.upper().is_some_and(|u| u.ptr_eq(&hi)));
    }

    #[test]
    fn constant_receiver_keeps_temporary_equality_alive() {
        let lhs = Expr::constant(4.0)
            .equals(Expr::term(x(), 2.0))
            .expect("equals should link");
        let lower = lhs.lower().expect("lower bound should be alive");
        let upper = lhs.upper().expect("upper bound should be alive");
        assert!(lower.ptr_eq(&upper));
        assert_eq!(lower.degree(), 1);
    }

    #[test]
    fn dropped_receiver_releases_partner_links() {
        let e = Expr::var(x()).add(y());
        let lo = Expr::constant(1.0);
        lo.leq(&e).expect("leq should link");
        drop(lo);
        assert!(!e.has_bounds());
    }

    #[test]
    fn chained_scalar_bounds() {
        let mid = Expr::var(x()).add(y());
        let result = mid
            .geq(1.0)
            .and_then(|e| e.leq(3.0))
            .expect("chain should link");
        assert!(result.ptr_eq(&mid));
        assert_eq!(mid.lower().map(|e| e.constant_value()), Some(1.0));
        assert_eq!(mid.upper().map(|e| e.constant_value()), Some(3.0));
    }

    #[test]
    fn between_links_both_sides() {
        let mid = Expr::var(x());
        Expr::between(-2.0, &mid, 2).expect("between should link");
        assert_eq!(mid.lower().map(|e| e.constant_value()), Some(-2.0));
        assert_eq!(mid.upper().map(|e| e.constant_value()), Some(2.0));
    }

    #[test]
    fn second_upper_bound_is_rejected() {
        let e = Expr::var(x());
        e.leq(1.0).expect("first bound should link");
        assert_eq!(e.leq(2.0).unwrap_err(), ExprError::InvalidBoundChain);
    }

    #[test]
    fn bound_variable_side_cannot_be_extended_by_expression() {
        let e = Expr::var(x());
        e.leq(1.0).expect("first bound should link");
        assert_eq!(
            e.geq(Expr::var(y())).unwrap_err(),
            ExprError::InvalidBoundChain
        );
    }

    #[test]
    fn self_comparison_is_rejected() {
        let e = Expr::var(x());
        assert_eq!(e.leq(&e).unwrap_err(), ExprError::InvalidBoundChain);
        assert_eq!(e.equals(&e).unwrap_err(), ExprError::InvalidBoundChain);
    }

    #[test]
    fn equals_sets_all_links() {
        let lhs = Expr::var(x());
        let rhs = Expr::var(y()).add(1.0);
        lhs.equals(&rhs).expect("equals should link");
        assert!(lhs.lower().is_some_and(|e| e.ptr_eq(&rhs)));
        assert!(lhs.upper().is_some_and(|e| e.ptr_eq(&rhs)));
        assert!(rhs.lower().is_some_and(|e| e.ptr_eq(&lhs)));
        assert!(rhs.upper().is_some_and(|e| e.ptr_eq(&lhs)));
    }

    #[test]
    fn equals_requires_unbound_sides() {
        let lhs = Expr::var(x());
        lhs.leq(3.0).expect("leq should link");
        assert_eq!(lhs.equals(1.0).unwrap_err(), ExprError::InvalidBoundChain);
    }

    #[test]
    fn mutual_constant_links_do_not_leak_or_panic() {
        let a = Expr::constant(1.0);
        let b = Expr::constant(2.0);
        a.leq(&b).expect("leq should link");
        b.leq(&a).expect("constant may extend an open side");
        assert!(b.upper().is_some_and(|e| e.ptr_eq(&a)));
    }

    #[test]
    fn clear_bounds_resets_neighbours() {
        let e = Expr::var(x());
        let hi = Expr::constant(3.0);
        e.leq(&hi).expect("leq should link");
        e.clear_bounds();
        assert!(!e.has_bounds());
        assert!(!hi.has_bounds());
        e.leq(5.0).expect("cleared expression can be bound again");
    }

    #[test]
    fn variable_helpers_wrap_fresh_expression() {
        let e = x().geq(0.0).expect("geq should link");
        assert_eq!(e.lower().map(|b| b.constant_value()), Some(0.0));
        let again = x().leq(1.0).expect("variables are reusable");
        assert!(!again.ptr_eq(&e));
    }
}
