//! Operator overloads. Every operator allocates a fresh, unbound node.

use crate::expr::core::{Expr, Operand};
use crate::ids::VariableId;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_arith {
    ($lhs:ty => $($rhs:ty),+) => {
        $(
            impl Add<$rhs> for $lhs {
                type Output = Expr;

                fn add(self, rhs: $rhs) -> Expr {
                    Expr::add(&Operand::from(self).into_expr(), rhs)
                }
            }

            impl Sub<$rhs> for $lhs {
                type Output = Expr;

                fn sub(self, rhs: $rhs) -> Expr {
                    Expr::sub(&Operand::from(self).into_expr(), rhs)
                }
            }

            impl Mul<$rhs> for $lhs {
                type Output = Expr;

                fn mul(self, rhs: $rhs) -> Expr {
                    Expr::mul(&Operand::from(self).into_expr(), rhs)
                }
            }
        )+
    };
}

impl_arith!(Expr => Expr, &Expr, VariableId, f64, i32);
impl_arith!(&Expr => Expr, &Expr, VariableId, f64, i32);
impl_arith!(VariableId => Expr, &Expr, VariableId, f64, i32);
impl_arith!(f64 => Expr, &Expr, VariableId);
impl_arith!(i32 => Expr, &Expr, VariableId);

macro_rules! impl_scalar_div {
    ($($lhs:ty),+) => {
        $(
            impl Div<f64> for $lhs {
                type Output = Expr;

                fn div(self, rhs: f64) -> Expr {
                    Expr::scale(&Operand::from(self).into_expr(), rhs.recip())
                }
            }

            impl Div<i32> for $lhs {
                type Output = Expr;

                fn div(self, rhs: i32) -> Expr {
                    Expr::scale(&Operand::from(self).into_expr(), f64::from(rhs).recip())
                }
            }
        )+
    };
}

impl_scalar_div!(Expr, &Expr, VariableId);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::scale(&self, -1.0)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::scale(self, -1.0)
    }
}

impl Neg for VariableId {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::term(self, -1.0)
    }
}

impl std::iter::Sum<Expr> for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Self {
        iter.fold(Expr::new(), |acc, expr| Expr::add(&acc, expr))
    }
}

impl<'a> std::iter::Sum<&'a Expr> for Expr {
    fn sum<I: Iterator<Item = &'a Expr>>(iter: I) -> Self {
        iter.fold(Expr::new(), |acc, expr| Expr::add(&acc, expr))
    }
}

impl std::iter::Sum<VariableId> for Expr {
    fn sum<I: Iterator<Item = VariableId>>(iter: I) -> Self {
        iter.fold(Expr::new(), |acc, var| Expr::add(&acc, var))
    }
}
