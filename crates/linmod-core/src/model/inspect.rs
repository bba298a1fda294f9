//! Read-only snapshots and evaluation accessors.
//!
//! Everything here reflects current registry order and hands out copies or
//! borrowed views, never the live internal containers.

use serde::Serialize;

use crate::constraint::{Constraint, ConstraintActivity};
use crate::model::error::ModelError;
use crate::model::Model;
use crate::objective::Objective;
use crate::types::{Category, InequalitySign, Sense};
use crate::variable::Variable;

impl Model {
    /// Variable names in insertion order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables_map().keys().map(String::as_str).collect()
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables_map().values()
    }

    /// Current variable values in insertion order (`None` where unsolved).
    pub fn variable_values(&self) -> Vec<Option<f64>> {
        self.variables_map().values().map(Variable::value).collect()
    }

    /// Constraint names in insertion order.
    pub fn constraint_names(&self) -> Vec<&str> {
        self.constraints_map().keys().map(String::as_str).collect()
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints_map().values()
    }

    /// Evaluate every constraint at the current variable values.
    pub fn constraint_values(&self) -> Result<Vec<ConstraintActivity>, ModelError> {
        self.constraints()
            .map(|constraint| constraint.evaluate(self.lookup()).map_err(ModelError::from))
            .collect()
    }

    /// Objective names in insertion order.
    pub fn objective_names(&self) -> Vec<&str> {
        self.objectives_map().keys().map(String::as_str).collect()
    }

    /// Objectives in insertion order.
    pub fn objectives(&self) -> impl Iterator<Item = &Objective> {
        self.objectives_map().values()
    }

    /// Evaluate every objective at the current variable values.
    pub fn objective_values(&self) -> Result<Vec<(f64, Sense)>, ModelError> {
        self.objectives()
            .map(|objective| objective.evaluate(self.lookup()).map_err(ModelError::from))
            .collect()
    }

    /// The model's scalar objective: `Σ weight · objective value` over every
    /// registered objective.
    pub fn objective_value(&self) -> Result<f64, ModelError> {
        let mut total = 0.0;
        for objective in self.objectives() {
            let (value, _) = objective.evaluate(self.lookup())?;
            total += value * objective.weight();
        }
        Ok(total)
    }

    /// A serializable description of the whole model in registry order.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            name: self.name().to_string(),
            inequality_sign: self.inequality_sign(),
            sense: self.sense(),
            variables: self.variables().map(VariableView::from).collect(),
            constraints: self.constraints().map(ConstraintView::from).collect(),
            objectives: self.objectives().map(ObjectiveView::from).collect(),
        }
    }
}

/// One named term of a constraint or objective view.
#[derive(Debug, Clone, Serialize)]
pub struct TermView {
    pub variable: String,
    pub coefficient: f64,
}

/// Read-only view of a registered variable.
#[derive(Debug, Clone, Serialize)]
pub struct VariableView {
    pub name: String,
    pub category: Category,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub value: Option<f64>,
}

impl From<&Variable> for VariableView {
    fn from(variable: &Variable) -> Self {
        Self {
            name: variable.name().to_string(),
            category: variable.category(),
            lower: variable.lower_bound(),
            upper: variable.upper_bound(),
            value: variable.value(),
        }
    }
}

/// Read-only view of a registered constraint.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintView {
    pub name: String,
    pub sign: String,
    pub rhs: f64,
    pub terms: Vec<TermView>,
}

impl From<&Constraint> for ConstraintView {
    fn from(constraint: &Constraint) -> Self {
        Self {
            name: constraint.name().to_string(),
            sign: constraint.sign().as_str().to_string(),
            rhs: constraint.rhs(),
            terms: term_views(constraint.terms()),
        }
    }
}

/// Read-only view of a registered objective.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveView {
    pub name: String,
    pub sense: Sense,
    pub weight: f64,
    pub constant: f64,
    pub terms: Vec<TermView>,
}

impl From<&Objective> for ObjectiveView {
    fn from(objective: &Objective) -> Self {
        Self {
            name: objective.name().to_string(),
            sense: objective.sense(),
            weight: objective.weight(),
            constant: objective.constant(),
            terms: term_views(objective.terms()),
        }
    }
}

/// Serializable description of a model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSnapshot {
    pub name: String,
    pub inequality_sign: InequalitySign,
    pub sense: Sense,
    pub variables: Vec<VariableView>,
    pub constraints: Vec<ConstraintView>,
    pub objectives: Vec<ObjectiveView>,
}

fn term_views(terms: &std::collections::BTreeMap<String, f64>) -> Vec<TermView> {
    terms
        .iter()
        .map(|(variable, coefficient)| TermView {
            variable: variable.clone(),
            coefficient: *coefficient,
        })
        .collect()
}
