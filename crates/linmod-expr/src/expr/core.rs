//! Core expression type: named linear terms plus a constant.
//!
//! An [`Expr`] is a sparse linear combination over variable *names* with a
//! separate constant slot, tagged with the [`ModelId`] of the model it is
//! defined over. Binary operations between two expressions require matching
//! tags; composing expressions from different models is a hard error.

use std::collections::BTreeMap;

use crate::expr::error::ExprError;
use crate::expr::relation::{Operand, Relation, Sign};
use crate::ids::ModelId;
use crate::tol::approx_zero;

/// Fail unless both identity tags name the same model instance.
pub fn check_models(left: ModelId, right: ModelId) -> Result<(), ExprError> {
    if left == right {
        Ok(())
    } else {
        Err(ExprError::ModelMismatch { left, right })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    model: ModelId,
    terms: BTreeMap<String, f64>,
    constant: f64,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (no terms, zero constant).
    pub fn empty(model: ModelId) -> Self {
        Self {
            model,
            terms: BTreeMap::new(),
            constant: 0.0,
        }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(model: ModelId, constant: f64) -> Self {
        Self {
            model,
            terms: BTreeMap::new(),
            constant,
        }
    }

    /// Single term: coeff * variable.
    pub fn term(model: ModelId, name: impl Into<String>, coeff: f64) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(name.into(), coeff);
        Self {
            model,
            terms,
            constant: 0.0,
        }
    }

    /// Single variable with coefficient 1.0 (the leaf form handed out by the
    /// model registry).
    pub fn var(model: ModelId, name: impl Into<String>) -> Self {
        Self::term(model, name, 1.0)
    }

    /// Expression from pre-paired terms and a constant.
    pub fn from_terms(model: ModelId, terms: BTreeMap<String, f64>, constant: f64) -> Self {
        Self {
            model,
            terms,
            constant,
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn terms(&self) -> &BTreeMap<String, f64> {
        &self.terms
    }

    /// Coefficient on `name`, 0.0 if absent.
    pub fn coefficient(&self, name: &str) -> f64 {
        self.terms.get(name).copied().unwrap_or(0.0)
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Variable names in term-map order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Copy with constant set to zero.
    pub fn without_constant(&self) -> Self {
        Self {
            model: self.model,
            terms: self.terms.clone(),
            constant: 0.0,
        }
    }

    /// Consume and return (terms, constant).
    pub fn into_parts(self) -> (BTreeMap<String, f64>, f64) {
        (self.terms, self.constant)
    }

    // ── Copy-producing algebra ──────────────────────────────

    /// Copy with every coefficient and the constant negated.
    pub fn negated(&self) -> Self {
        let mut out = self.clone();
        out.scale_in_place(-1.0);
        out
    }

    /// Copy scaled by a factor. Zero coefficients are kept; an explicit
    /// [`Expr::remove_explicit_zeros`] pass drops them.
    pub fn scaled(&self, by: f64) -> Self {
        let mut out = self.clone();
        out.scale_in_place(by);
        out
    }

    /// Copy divided by a scalar. Division by zero follows IEEE semantics.
    pub fn div_scalar(&self, by: f64) -> Self {
        self.scaled(1.0 / by)
    }

    /// Copy with a constant offset added.
    pub fn add_scalar(&self, value: f64) -> Self {
        let mut out = self.clone();
        out.add_assign_scalar(value);
        out
    }

    /// Copy with a constant offset subtracted.
    pub fn sub_scalar(&self, value: f64) -> Self {
        self.add_scalar(-value)
    }

    /// Sum of two expressions over the same model; coefficients on shared
    /// names merge additively.
    pub fn add(&self, other: &Expr) -> Result<Expr, ExprError> {
        let mut out = self.clone();
        out.add_assign_expr(other)?;
        Ok(out)
    }

    /// Difference of two expressions over the same model.
    pub fn sub(&self, other: &Expr) -> Result<Expr, ExprError> {
        let mut out = self.clone();
        out.sub_assign_expr(other)?;
        Ok(out)
    }

    // ── In-place accumulators ───────────────────────────────

    pub fn add_assign_expr(&mut self, other: &Expr) -> Result<(), ExprError> {
        check_models(self.model, other.model)?;
        for (name, coeff) in &other.terms {
            *self.terms.entry(name.clone()).or_insert(0.0) += coeff;
        }
        self.constant += other.constant;
        Ok(())
    }

    pub fn sub_assign_expr(&mut self, other: &Expr) -> Result<(), ExprError> {
        check_models(self.model, other.model)?;
        for (name, coeff) in &other.terms {
            *self.terms.entry(name.clone()).or_insert(0.0) -= coeff;
        }
        self.constant -= other.constant;
        Ok(())
    }

    pub fn add_assign_scalar(&mut self, value: f64) {
        self.constant += value;
    }

    pub fn scale_in_place(&mut self, by: f64) {
        for coeff in self.terms.values_mut() {
            *coeff *= by;
        }
        self.constant *= by;
    }

    // ── Cleanup ─────────────────────────────────────────────

    /// Drop every term whose coefficient is within tolerance of zero.
    /// The constant is never touched.
    pub fn remove_explicit_zeros(&mut self, rel_tol: f64, abs_tol: f64) {
        self.terms
            .retain(|_, coeff| !approx_zero(*coeff, rel_tol, abs_tol));
    }

    // ── Evaluation ──────────────────────────────────────────

    /// Substitute variable values and sum `Σ coeff·value + constant`.
    ///
    /// The lookup decides what an unknown or unset name means; errors
    /// propagate untouched.
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, ExprError>
    where
        F: Fn(&str) -> Result<f64, ExprError>,
    {
        let mut total = self.constant;
        for (name, coeff) in &self.terms {
            total += coeff * lookup(name)?;
        }
        Ok(total)
    }

    // ── Comparison methods (produce Relation) ───────────────

    pub fn compare_scalar(&self, rhs: f64, sign: Sign) -> Relation {
        Relation::from_parts(self.model, Operand::Expr(self.clone()), sign, Operand::Scalar(rhs))
    }

    pub fn compare_expr(&self, rhs: &Expr, sign: Sign) -> Result<Relation, ExprError> {
        check_models(self.model, rhs.model)?;
        Ok(Relation::from_parts(
            self.model,
            Operand::Expr(self.clone()),
            sign,
            Operand::Expr(rhs.clone()),
        ))
    }

    pub fn le_scalar(&self, rhs: f64) -> Relation {
        self.compare_scalar(rhs, Sign::LessEqual)
    }

    pub fn ge_scalar(&self, rhs: f64) -> Relation {
        self.compare_scalar(rhs, Sign::GreaterEqual)
    }

    pub fn eq_scalar(&self, rhs: f64) -> Relation {
        self.compare_scalar(rhs, Sign::Equal)
    }

    pub fn le_expr(&self, rhs: &Expr) -> Result<Relation, ExprError> {
        self.compare_expr(rhs, Sign::LessEqual)
    }

    pub fn ge_expr(&self, rhs: &Expr) -> Result<Relation, ExprError> {
        self.compare_expr(rhs, Sign::GreaterEqual)
    }

    pub fn eq_expr(&self, rhs: &Expr) -> Result<Relation, ExprError> {
        self.compare_expr(rhs, Sign::Equal)
    }
}

// ── Operator overloads ──────────────────────────────────────
//
// Only the infallible scalar forms get `std::ops` impls; expression-to-
// expression composition stays on the fallible methods because it must
// surface a model mismatch. There is deliberately no `Div<Expr> for f64`.

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs)
    }
}

impl std::ops::Div<f64> for Expr {
    type Output = Expr;

    fn div(self, rhs: f64) -> Self::Output {
        self.div_scalar(rhs)
    }
}

impl std::ops::Add<f64> for Expr {
    type Output = Expr;

    fn add(self, rhs: f64) -> Self::Output {
        self.add_scalar(rhs)
    }
}

impl std::ops::Sub<f64> for Expr {
    type Output = Expr;

    fn sub(self, rhs: f64) -> Self::Output {
        self.sub_scalar(rhs)
    }
}
