//! Relation descriptors: two operands joined by a comparison sign.
//!
//! Comparing two expressions does not evaluate anything; it produces a
//! [`Relation`] that the model registry turns into a constraint.

use crate::expr::core::{check_models, Expr};
use crate::expr::error::ExprError;
use crate::ids::ModelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl Sign {
    pub fn as_str(self) -> &'static str {
        match self {
            Sign::LessEqual => "<=",
            Sign::Equal => "==",
            Sign::GreaterEqual => ">=",
        }
    }

    /// Parse a sign from its string form.
    ///
    /// `!=` is rejected with a dedicated error: exclusion has no meaning as a
    /// linear relation, and silently mapping it to anything else would build
    /// the wrong constraint.
    pub fn parse(value: &str) -> Result<Self, ExprError> {
        match value {
            "<=" => Ok(Sign::LessEqual),
            "==" => Ok(Sign::Equal),
            ">=" => Ok(Sign::GreaterEqual),
            "!=" => Err(ExprError::UnsupportedComparison(value.to_string())),
            other => Err(ExprError::InvalidSign(other.to_string())),
        }
    }

    pub fn is_inequality(self) -> bool {
        !matches!(self, Sign::Equal)
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One side of a relation: a bare scalar or an expression.
#[derive(Debug, Clone)]
pub enum Operand {
    Scalar(f64),
    Expr(Expr),
}

impl Operand {
    pub fn model_id(&self) -> Option<ModelId> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Expr(expr) => Some(expr.model_id()),
        }
    }

    /// View as an expression over `model`; scalars become constant-only
    /// expressions.
    pub fn to_expr(&self, model: ModelId) -> Expr {
        match self {
            Operand::Scalar(value) => Expr::from_constant(model, *value),
            Operand::Expr(expr) => expr.clone(),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
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

/// The `{left, sign, right}` value produced by expression comparisons and
/// consumed by constraint construction.
#[derive(Debug, Clone)]
pub struct Relation {
    model: ModelId,
    left: Operand,
    sign: Sign,
    right: Operand,
}

impl Relation {
    /// Build a relation, validating that every expression operand agrees on
    /// the model and that at least one operand is an expression.
    pub fn new(left: Operand, sign: Sign, right: Operand) -> Result<Self, ExprError> {
        let model = match (left.model_id(), right.model_id()) {
            (Some(l), Some(r)) => {
                check_models(l, r)?;
                l
            }
            (Some(l), None) => l,
            (None, Some(r)) => r,
            (None, None) => return Err(ExprError::ScalarRelation),
        };
        Ok(Self {
            model,
            left,
            sign,
            right,
        })
    }

    /// Internal constructor used by [`Expr`] comparisons, which have already
    /// established the shared model.
    pub(crate) fn from_parts(model: ModelId, left: Operand, sign: Sign, right: Operand) -> Self {
        Self {
            model,
            left,
            sign,
            right,
        }
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    /// `left - right` as a single expression.
    pub fn difference(&self) -> Result<Expr, ExprError> {
        self.left.to_expr(self.model).sub(&self.right.to_expr(self.model))
    }

    /// `right - left`, used when the stored sign had to be flipped to match a
    /// canonical inequality direction.
    pub fn reversed_difference(&self) -> Result<Expr, ExprError> {
        self.right.to_expr(self.model).sub(&self.left.to_expr(self.model))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn model() -> ModelId {
        ModelId::fresh()
    }

    #[test]
    fn sign_string_roundtrip() {
        for sign in [Sign::LessEqual, Sign::Equal, Sign::GreaterEqual] {
            assert_eq!(Sign::parse(sign.as_str()).unwrap(), sign);
        }
    }

    #[test]
    fn sign_rejects_not_equal() {
        let err = Sign::parse("!=").unwrap_err();
        assert_eq!(err.code(), "EXPR_UNSUPPORTED_COMPARISON");
    }

    #[test]
    fn sign_rejects_garbage() {
        let err = Sign::parse("<").unwrap_err();
        assert_eq!(err.code(), "EXPR_INVALID_SIGN");
    }

    #[test]
    fn relation_needs_an_expression_side() {
        let err = Relation::new(Operand::Scalar(1.0), Sign::Equal, Operand::Scalar(2.0))
            .unwrap_err();
        assert_eq!(err, ExprError::ScalarRelation);
    }

    #[test]
    fn relation_rejects_mixed_models() {
        let a = Expr::var(model(), "x");
        let b = Expr::var(model(), "y");
        let err = Relation::new(a.into(), Sign::LessEqual, b.into()).unwrap_err();
        assert!(matches!(err, ExprError::ModelMismatch { .. }));
    }

    #[test]
    fn difference_folds_scalar_side() {
        let m = model();
        let e = Expr::term(m, "x", 2.0);
        let rel = Relation::new(e.into(), Sign::LessEqual, Operand::Scalar(4.0)).unwrap();
        let diff = rel.difference().unwrap();
        assert_eq!(diff.coefficient("x"), 2.0);
        assert_eq!(diff.constant(), -4.0);

        let rev = rel.reversed_difference().unwrap();
        assert_eq!(rev.coefficient("x"), -2.0);
        assert_eq!(rev.constant(), 4.0);
    }
}
