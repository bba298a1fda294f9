//! Objectives: an expression normalized against the model's optimization
//! sense, with a scalar weight.

use std::collections::BTreeMap;

use linmod_expr::{check_models, Expr, ExprError, ModelId};

use crate::model::ModelError;
use crate::types::Sense;

/// A weighted objective, directionally consistent with its model.
///
/// Supplying the opposite sense negates the expression and stores the
/// model's sense, so every objective registered on a model points the same
/// way. Multiple objectives combine additively through their weights.
#[derive(Debug, Clone)]
pub struct Objective {
    name: String,
    model: ModelId,
    sense: Sense,
    expr: Expr,
    constant: f64,
    weight: f64,
}

impl Objective {
    pub(crate) fn new(
        name: String,
        model: ModelId,
        model_sense: Sense,
        sense: Sense,
        expression: Expr,
        weight: f64,
    ) -> Result<Self, ModelError> {
        check_models(model, expression.model_id())?;
        let oriented = if sense == model_sense {
            expression
        } else {
            expression.negated()
        };
        let constant = oriented.constant();
        let expr = oriented.without_constant();
        Ok(Self {
            name,
            model,
            sense: model_sense,
            expr,
            constant,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Term map with the constant already peeled.
    pub fn terms(&self) -> &BTreeMap<String, f64> {
        self.expr.terms()
    }

    /// Variable names in term-map order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.expr.variables()
    }

    /// Coefficients aligned with [`Objective::variables`].
    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.expr.terms().values().copied()
    }

    /// Drop terms with near-zero coefficients.
    pub fn remove_explicit_zeros(&mut self, rel_tol: f64, abs_tol: f64) {
        self.expr.remove_explicit_zeros(rel_tol, abs_tol);
    }

    /// Substitute variable values; returns the objective value and its sense.
    pub fn evaluate<F>(&self, lookup: F) -> Result<(f64, Sense), ExprError>
    where
        F: Fn(&str) -> Result<f64, ExprError>,
    {
        Ok((self.expr.evaluate(lookup)? + self.constant, self.sense))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn matching_sense_keeps_expression() {
        let m = ModelId::fresh();
        let expr = Expr::term(m, "x", 2.0).add_scalar(1.0);
        let obj = Objective::new("o".into(), m, Sense::Min, Sense::Min, expr, 1.0).unwrap();
        assert_eq!(obj.sense(), Sense::Min);
        assert_eq!(obj.terms().get("x"), Some(&2.0));
        assert_eq!(obj.constant(), 1.0);
    }

    #[test]
    fn opposite_sense_negates_expression() {
        let m = ModelId::fresh();
        let expr = Expr::term(m, "x", 2.0).add_scalar(1.0);
        let obj = Objective::new("o".into(), m, Sense::Min, Sense::Max, expr, 1.0).unwrap();
        assert_eq!(obj.sense(), Sense::Min);
        assert_eq!(obj.terms().get("x"), Some(&-2.0));
        assert_eq!(obj.constant(), -1.0);
    }

    #[test]
    fn evaluate_adds_constant_back() {
        let m = ModelId::fresh();
        let expr = Expr::term(m, "x", 2.0).add_scalar(1.5);
        let obj = Objective::new("o".into(), m, Sense::Max, Sense::Max, expr, 1.0).unwrap();
        let (value, sense) = obj.evaluate(|_| Ok(3.0)).unwrap();
        assert_eq!(value, 7.5);
        assert_eq!(sense, Sense::Max);
    }

    #[test]
    fn cross_model_expression_rejected() {
        let m = ModelId::fresh();
        let expr = Expr::term(ModelId::fresh(), "x", 1.0);
        let err = Objective::new("o".into(), m, Sense::Min, Sense::Min, expr, 1.0).unwrap_err();
        assert_eq!(err.code(), "EXPR_MODEL_MISMATCH");
    }

    #[test]
    fn zero_cleanup_preserves_evaluation() {
        let m = ModelId::fresh();
        let expr = Expr::term(m, "x", 1.0)
            .add(&Expr::term(m, "y", 1e-30))
            .unwrap();
        let mut obj = Objective::new("o".into(), m, Sense::Min, Sense::Min, expr, 2.0).unwrap();
        let (before, _) = obj.evaluate(|_| Ok(4.0)).unwrap();
        obj.remove_explicit_zeros(1e-9, 1e-12);
        let (after, _) = obj.evaluate(|_| Ok(4.0)).unwrap();
        assert!((before - after).abs() < 1e-12);
        assert_eq!(obj.terms().len(), 1);
    }
}
