//! Model registry for linear programs.
//!
//! This module provides the core [`Model`] type: an insertion-ordered,
//! name-keyed registry owning variables, constraints, and objectives, plus
//! the model-wide configuration every registered entity is normalized
//! against.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding and removing variables, constraints,
//!   and objectives
//! - [`inspect`]: Read-only snapshots and evaluation accessors

mod builder;
mod error;
mod inspect;

pub use error::{ModelError, RegistryKind};
pub use inspect::{
    ConstraintView, ModelSnapshot, ObjectiveView, TermView, VariableView,
};

use indexmap::IndexMap;

use crate::constraint::Constraint;
use crate::objective::Objective;
use crate::types::{InequalitySign, Sense};
use crate::variable::Variable;
use linmod_expr::{check_models, Expr, ExprError, ModelId};

/// An ordered, name-keyed registry of variables, constraints, and
/// objectives.
///
/// Every inequality constraint registered here is normalized to the model's
/// canonical `inequality_sign`, and every objective to the model's `sense`.
/// Identity is carried by a [`ModelId`] tag: expressions and relations built
/// from this model's variables are only accepted back by the same instance.
#[derive(Debug, Clone)]
pub struct Model {
    id: ModelId,
    name: String,
    inequality_sign: InequalitySign,
    sense: Sense,
    variables: IndexMap<String, Variable>,
    constraints: IndexMap<String, Constraint>,
    objectives: IndexMap<String, Objective>,
}

impl Model {
    /// Create an empty model with the default configuration
    /// (`<=` canonical inequality, `min` sense).
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, InequalitySign::LessEqual, Sense::Min)
    }

    /// Create an empty model with an explicit canonical inequality direction
    /// and optimization sense.
    pub fn with_config(
        name: impl Into<String>,
        inequality_sign: InequalitySign,
        sense: Sense,
    ) -> Self {
        Self {
            id: ModelId::fresh(),
            name: name.into(),
            inequality_sign,
            sense,
            variables: IndexMap::new(),
            constraints: IndexMap::new(),
            objectives: IndexMap::new(),
        }
    }

    /// The identity tag expressions built over this model carry.
    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical direction all stored inequality constraints use.
    pub fn inequality_sign(&self) -> InequalitySign {
        self.inequality_sign
    }

    /// The optimization sense all stored objectives use.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Fail unless `other` is this model's identity tag. This is the
    /// cross-cutting guard behind every operation that accepts an
    /// expression, relation, or entity built elsewhere.
    pub fn check_models(&self, other: ModelId) -> Result<(), ModelError> {
        check_models(self.id, other)?;
        Ok(())
    }

    /// The leaf expression for a registered variable.
    pub fn var(&self, name: &str) -> Result<Expr, ModelError> {
        self.variables
            .get(name)
            .map(Variable::expr)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))
    }

    pub(crate) fn variable_value(&self, name: &str) -> Result<f64, ExprError> {
        let variable = self
            .variables
            .get(name)
            .ok_or_else(|| ExprError::UnknownVariable(name.to_string()))?;
        variable
            .value()
            .ok_or_else(|| ExprError::UndefinedValue(name.to_string()))
    }

    /// Value lookup handed to entity evaluation.
    pub(crate) fn lookup(&self) -> impl Fn(&str) -> Result<f64, ExprError> + '_ {
        move |name: &str| self.variable_value(name)
    }

    pub(crate) fn variables_map(&self) -> &IndexMap<String, Variable> {
        &self.variables
    }

    pub(crate) fn variables_map_mut(&mut self) -> &mut IndexMap<String, Variable> {
        &mut self.variables
    }

    pub(crate) fn constraints_map(&self) -> &IndexMap<String, Constraint> {
        &self.constraints
    }

    pub(crate) fn constraints_map_mut(&mut self) -> &mut IndexMap<String, Constraint> {
        &mut self.constraints
    }

    pub(crate) fn objectives_map(&self) -> &IndexMap<String, Objective> {
        &self.objectives
    }

    pub(crate) fn objectives_map_mut(&mut self) -> &mut IndexMap<String, Objective> {
        &mut self.objectives
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("")
    }
}
