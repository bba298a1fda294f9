//! Constraints: a relation normalized against the model's canonical
//! inequality direction.

use std::collections::BTreeMap;

use linmod_expr::{check_models, Expr, ExprError, ModelId, Relation, Sign};

use crate::model::ModelError;
use crate::types::InequalitySign;

/// Result of evaluating a constraint at the current variable values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintActivity {
    /// The left-hand side `coefficients · x` at the current values.
    pub value: f64,
    /// The stored (normalized) comparison sign.
    pub sign: Sign,
    /// The right-hand-side constant.
    pub rhs: f64,
    /// Whether `value (sign) rhs` holds.
    pub satisfied: bool,
}

/// An immutable normalized constraint.
///
/// The stored sign is always either `==` or exactly the model's canonical
/// inequality sign; constructing from the opposite inequality flips the sign
/// and reverses the subtraction order, which preserves the relation.
#[derive(Debug, Clone)]
pub struct Constraint {
    name: String,
    model: ModelId,
    sign: Sign,
    expr: Expr,
    rhs: f64,
}

impl Constraint {
    pub(crate) fn new(
        name: String,
        model: ModelId,
        canonical: InequalitySign,
        relation: &Relation,
    ) -> Result<Self, ModelError> {
        check_models(model, relation.model_id())?;
        let (sign, diff) = match relation.sign() {
            Sign::Equal => (Sign::Equal, relation.difference()?),
            sign if sign == canonical.as_sign() => (sign, relation.difference()?),
            _ => (canonical.as_sign(), relation.reversed_difference()?),
        };
        let rhs = -diff.constant();
        let expr = diff.without_constant();
        Ok(Self {
            name,
            model,
            sign,
            expr,
            rhs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The right-hand-side constant the expression is compared against.
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Term map of the normalized left-hand side (constant already peeled).
    pub fn terms(&self) -> &BTreeMap<String, f64> {
        self.expr.terms()
    }

    /// Variable names in term-map order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.expr.variables()
    }

    /// Coefficients aligned with [`Constraint::variables`].
    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.expr.terms().values().copied()
    }

    /// Drop terms with near-zero coefficients.
    pub fn remove_explicit_zeros(&mut self, rel_tol: f64, abs_tol: f64) {
        self.expr.remove_explicit_zeros(rel_tol, abs_tol);
    }

    /// Substitute variable values and report whether the relation holds.
    /// Diagnostic only; compilation never calls this.
    pub fn evaluate<F>(&self, lookup: F) -> Result<ConstraintActivity, ExprError>
    where
        F: Fn(&str) -> Result<f64, ExprError>,
    {
        let value = self.expr.evaluate(lookup)?;
        let satisfied = match self.sign {
            Sign::Equal => value == self.rhs,
            Sign::LessEqual => value <= self.rhs,
            Sign::GreaterEqual => value >= self.rhs,
        };
        Ok(ConstraintActivity {
            value,
            sign: self.sign,
            rhs: self.rhs,
            satisfied,
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn canonical_le() -> InequalitySign {
        InequalitySign::LessEqual
    }

    fn coeff(ct: &Constraint, name: &str) -> f64 {
        ct.terms().get(name).copied().unwrap_or(0.0)
    }

    #[test]
    fn equality_keeps_subtraction_order() {
        let m = ModelId::fresh();
        let lhs = Expr::term(m, "x", 3.0).add_scalar(1.0);
        let rel = lhs.eq_scalar(5.0);
        let ct = Constraint::new("c".into(), m, canonical_le(), &rel).unwrap();
        assert_eq!(ct.sign(), Sign::Equal);
        assert_eq!(coeff(&ct, "x"), 3.0);
        // 3x + 1 == 5  →  3x == 4
        assert_eq!(ct.rhs(), 4.0);
    }

    #[test]
    fn matching_inequality_is_stored_unchanged() {
        let m = ModelId::fresh();
        let rel = Expr::term(m, "x", 2.0).le_scalar(6.0);
        let ct = Constraint::new("c".into(), m, canonical_le(), &rel).unwrap();
        assert_eq!(ct.sign(), Sign::LessEqual);
        assert_eq!(coeff(&ct, "x"), 2.0);
        assert_eq!(ct.rhs(), 6.0);
    }

    #[test]
    fn opposite_inequality_flips_sign_and_order() {
        let m = ModelId::fresh();
        // x >= 2 under canonical <=  →  -x <= -2
        let rel = Expr::var(m, "x").ge_scalar(2.0);
        let ct = Constraint::new("c".into(), m, canonical_le(), &rel).unwrap();
        assert_eq!(ct.sign(), Sign::LessEqual);
        assert_eq!(coeff(&ct, "x"), -1.0);
        assert_eq!(ct.rhs(), -2.0);
    }

    #[test]
    fn cross_model_relation_rejected() {
        let m = ModelId::fresh();
        let rel = Expr::var(ModelId::fresh(), "x").le_scalar(1.0);
        let err = Constraint::new("c".into(), m, canonical_le(), &rel).unwrap_err();
        assert_eq!(err.code(), "EXPR_MODEL_MISMATCH");
    }

    #[test]
    fn evaluate_reports_satisfaction() {
        let m = ModelId::fresh();
        let rel = Expr::term(m, "x", 2.0).le_scalar(6.0);
        let ct = Constraint::new("c".into(), m, canonical_le(), &rel).unwrap();

        let activity = ct.evaluate(|_| Ok(2.0)).unwrap();
        assert_eq!(activity.value, 4.0);
        assert!(activity.satisfied);

        let activity = ct.evaluate(|_| Ok(4.0)).unwrap();
        assert_eq!(activity.value, 8.0);
        assert!(!activity.satisfied);
    }

    #[test]
    fn zero_cleanup_preserves_evaluation() {
        let m = ModelId::fresh();
        let lhs = Expr::term(m, "x", 2.0)
            .add(&Expr::term(m, "y", 0.0))
            .unwrap();
        let rel = lhs.le_scalar(10.0);
        let mut ct = Constraint::new("c".into(), m, canonical_le(), &rel).unwrap();

        let before = ct.evaluate(|_| Ok(1.5)).unwrap();
        ct.remove_explicit_zeros(1e-9, 0.0);
        let after = ct.evaluate(|_| Ok(1.5)).unwrap();
        assert_eq!(before.value, after.value);
        assert_eq!(ct.terms().len(), 1);
    }

}
