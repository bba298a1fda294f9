//! Builder methods for registering variables, constraints, and objectives.

use crate::constraint::Constraint;
use crate::model::error::{ModelError, RegistryKind};
use crate::model::Model;
use crate::objective::Objective;
use crate::types::{Bounds, Category, Sense};
use crate::variable::Variable;
use linmod_expr::{Expr, Operand, Relation, Sign};

impl Model {
    fn ensure_vacant(&self, kind: RegistryKind, name: &str) -> Result<(), ModelError> {
        let occupied = match kind {
            RegistryKind::Variable => self.variables_map().contains_key(name),
            RegistryKind::Constraint => self.constraints_map().contains_key(name),
            RegistryKind::Objective => self.objectives_map().contains_key(name),
        };
        if occupied {
            return Err(ModelError::NameExists {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Register a variable and return its leaf expression.
    ///
    /// The name must be unused within the variable registry. `Bin` forces
    /// bounds to `[0, 1]`; otherwise the bounds are validated as supplied.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        category: Category,
        bounds: Bounds,
    ) -> Result<Expr, ModelError> {
        let name = name.into();
        self.ensure_vacant(RegistryKind::Variable, &name)?;
        let variable = Variable::new(self.id(), name.clone(), category, bounds)?;
        let expr = variable.expr();
        tracing::debug!(
            component = "model",
            operation = "add_variable",
            status = "success",
            name = %name,
            category = category.as_str(),
            "Registered decision variable"
        );
        self.variables_map_mut().insert(name, variable);
        Ok(expr)
    }

    /// Continuous variable with the given bounds.
    pub fn add_continuous(
        &mut self,
        name: impl Into<String>,
        bounds: Bounds,
    ) -> Result<Expr, ModelError> {
        self.add_variable(name, Category::Con, bounds)
    }

    /// Integer variable with the given bounds.
    pub fn add_integer(
        &mut self,
        name: impl Into<String>,
        bounds: Bounds,
    ) -> Result<Expr, ModelError> {
        self.add_variable(name, Category::Int, bounds)
    }

    /// Binary variable; bounds are always `[0, 1]`.
    pub fn add_binary(&mut self, name: impl Into<String>) -> Result<Expr, ModelError> {
        self.add_variable(name, Category::Bin, Bounds::binary())
    }

    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.variables_map().get(name)
    }

    /// Remove and return a variable, preserving the insertion order of the
    /// rest of the registry.
    pub fn remove_variable(&mut self, name: &str) -> Result<Variable, ModelError> {
        let removed = self
            .variables_map_mut()
            .shift_remove(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))?;
        tracing::debug!(
            component = "model",
            operation = "remove_variable",
            status = "success",
            name = %name,
            "Removed decision variable"
        );
        Ok(removed)
    }

    /// Write a solved value into a variable.
    pub fn set_value(&mut self, name: &str, value: f64) -> Result<(), ModelError> {
        let variable = self
            .variables_map_mut()
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))?;
        variable.set_value(value);
        Ok(())
    }

    /// Register a constraint from its three-part form.
    pub fn add_row(
        &mut self,
        name: impl Into<String>,
        left: impl Into<Operand>,
        sign: Sign,
        right: impl Into<Operand>,
    ) -> Result<&Constraint, ModelError> {
        let relation = Relation::new(left.into(), sign, right.into())?;
        self.add_constraint(name, &relation)
    }

    /// Register a constraint from the relation descriptor produced by
    /// expression comparisons.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        relation: &Relation,
    ) -> Result<&Constraint, ModelError> {
        let name = name.into();
        self.ensure_vacant(RegistryKind::Constraint, &name)?;
        let constraint = Constraint::new(name.clone(), self.id(), self.inequality_sign(), relation)?;
        tracing::debug!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            name = %name,
            sign = constraint.sign().as_str(),
            terms = constraint.terms().len(),
            "Registered constraint"
        );
        Ok(self.constraints_map_mut().entry(name).or_insert(constraint))
    }

    pub fn get_constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints_map().get(name)
    }

    /// Remove and return a constraint.
    pub fn remove_constraint(&mut self, name: &str) -> Result<Constraint, ModelError> {
        self.constraints_map_mut()
            .shift_remove(name)
            .ok_or_else(|| ModelError::UnknownConstraint(name.to_string()))
    }

    /// Register a weighted objective.
    ///
    /// A `sense` opposite to the model's negates the expression so every
    /// stored objective is directionally consistent with the model.
    pub fn add_objective(
        &mut self,
        name: impl Into<String>,
        sense: Sense,
        expression: Expr,
        weight: f64,
    ) -> Result<&Objective, ModelError> {
        let name = name.into();
        self.ensure_vacant(RegistryKind::Objective, &name)?;
        let objective =
            Objective::new(name.clone(), self.id(), self.sense(), sense, expression, weight)?;
        tracing::debug!(
            component = "model",
            operation = "add_objective",
            status = "success",
            name = %name,
            sense = objective.sense().as_str(),
            weight = objective.weight(),
            "Registered objective"
        );
        Ok(self.objectives_map_mut().entry(name).or_insert(objective))
    }

    pub fn get_objective(&self, name: &str) -> Option<&Objective> {
        self.objectives_map().get(name)
    }

    /// Remove and return an objective.
    pub fn remove_objective(&mut self, name: &str) -> Result<Objective, ModelError> {
        self.objectives_map_mut()
            .shift_remove(name)
            .ok_or_else(|| ModelError::UnknownObjective(name.to_string()))
    }

    /// Cascade zero cleanup to every constraint and objective.
    pub fn remove_explicit_zeros(&mut self, rel_tol: f64, abs_tol: f64) {
        for constraint in self.constraints_map_mut().values_mut() {
            constraint.remove_explicit_zeros(rel_tol, abs_tol);
        }
        for objective in self.objectives_map_mut().values_mut() {
            objective.remove_explicit_zeros(rel_tol, abs_tol);
        }
        tracing::debug!(
            component = "model",
            operation = "remove_explicit_zeros",
            status = "success",
            constraints = self.num_constraints(),
            objectives = self.num_objectives(),
            "Cleaned near-zero coefficients"
        );
    }

    /// Drop all constraints and objectives. With `keep_variables` the
    /// variables survive with their values reset to unset; without it the
    /// variable registry is dropped too.
    pub fn clear(&mut self, keep_variables: bool) {
        if keep_variables {
            for variable in self.variables_map_mut().values_mut() {
                variable.clear_value();
            }
        } else {
            self.variables_map_mut().clear();
        }
        self.constraints_map_mut().clear();
        self.objectives_map_mut().clear();
        tracing::debug!(
            component = "model",
            operation = "clear",
            status = "success",
            keep_variables,
            "Cleared model registries"
        );
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::InequalitySign;
    use linmod_expr::Sign;

    #[test]
    fn duplicate_variable_name_rejected() {
        let mut model = Model::new("m");
        model.add_continuous("x0", Bounds::default()).unwrap();
        let err = model.add_continuous("x0", Bounds::default()).unwrap_err();
        assert_eq!(err.code(), "MODEL_NAME_EXISTS");
        assert_eq!(model.num_variables(), 1);
    }

    #[test]
    fn duplicate_names_allowed_across_registries() {
        let mut model = Model::new("m");
        let x = model.add_continuous("x", Bounds::default()).unwrap();
        model.add_constraint("x", &x.le_scalar(1.0)).unwrap();
        model.add_objective("x", Sense::Min, x, 1.0).unwrap();
        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.num_constraints(), 1);
        assert_eq!(model.num_objectives(), 1);
    }

    #[test]
    fn binary_bounds_forced() {
        let mut model = Model::new("m");
        model
            .add_variable("b", Category::Bin, Bounds::new(Some(-5.0), None))
            .unwrap();
        let variable = model.get_variable("b").unwrap();
        assert_eq!(variable.bounds(), Bounds::binary());
    }

    #[test]
    fn failed_add_leaves_registry_unchanged() {
        let mut model = Model::new("m");
        let err = model
            .add_continuous("x", Bounds::new(Some(3.0), Some(1.0)))
            .unwrap_err();
        assert_eq!(err.code(), "MODEL_INVALID_BOUNDS");
        assert_eq!(model.num_variables(), 0);
    }

    #[test]
    fn add_row_three_part_form() {
        let mut model = Model::new("m");
        let x = model.add_continuous("x", Bounds::default()).unwrap();
        let ct = model.add_row("r0", x.scaled(3.0), Sign::Equal, 6.0).unwrap();
        assert_eq!(ct.sign(), Sign::Equal);
        assert_eq!(ct.rhs(), 6.0);
    }

    #[test]
    fn add_row_rejects_scalar_only_relation() {
        let mut model = Model::new("m");
        let err = model.add_row("r0", 1.0, Sign::LessEqual, 2.0).unwrap_err();
        assert_eq!(err.code(), "EXPR_SCALAR_RELATION");
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn constraints_normalize_to_canonical_sign() {
        let mut model = Model::with_config("m", InequalitySign::LessEqual, Sense::Min);
        let x = model.add_continuous("x", Bounds::default()).unwrap();
        model.add_constraint("c_le", &x.le_scalar(1.0)).unwrap();
        model.add_constraint("c_ge", &x.ge_scalar(2.0)).unwrap();
        model.add_constraint("c_eq", &x.eq_scalar(3.0)).unwrap();
        for constraint in model.constraints() {
            assert!(
                constraint.sign() == Sign::Equal
                    || constraint.sign() == model.inequality_sign().as_sign()
            );
        }
    }

    #[test]
    fn canonical_ge_flips_le_constraints() {
        let mut model = Model::with_config("m", InequalitySign::GreaterEqual, Sense::Min);
        let x = model.add_continuous("x", Bounds::default()).unwrap();
        let ct = model.add_constraint("c", &x.scaled(2.0).le_scalar(4.0)).unwrap();
        // 2x <= 4 under canonical >=  →  -2x >= -4
        assert_eq!(ct.sign(), Sign::GreaterEqual);
        assert_eq!(ct.terms().get("x"), Some(&-2.0));
        assert_eq!(ct.rhs(), -4.0);
    }

    #[test]
    fn cross_model_constraint_rejected() {
        let mut a = Model::new("a");
        let mut b = Model::new("b");
        let xa = a.add_continuous("x", Bounds::default()).unwrap();
        let xb = b.add_continuous("x", Bounds::default()).unwrap();
        let err = xa.le_expr(&xb).unwrap_err();
        assert_eq!(err.code(), "EXPR_MODEL_MISMATCH");

        // A relation legitimately built on `b` is rejected by `a`.
        let rel = xb.le_scalar(1.0);
        let err = a.add_constraint("c", &rel).unwrap_err();
        assert_eq!(err.code(), "EXPR_MODEL_MISMATCH");
        assert_eq!(a.num_constraints(), 0);
    }

    #[test]
    fn objective_sense_flipped_to_model_sense() {
        let mut model = Model::with_config("m", InequalitySign::LessEqual, Sense::Min);
        let x = model.add_continuous("x", Bounds::default()).unwrap();
        let obj = model
            .add_objective("profit", Sense::Max, x.scaled(3.0), 1.0)
            .unwrap();
        assert_eq!(obj.sense(), Sense::Min);
        assert_eq!(obj.terms().get("x"), Some(&-3.0));
    }

    #[test]
    fn remove_returns_entity_and_preserves_order() {
        let mut model = Model::new("m");
        model.add_continuous("x0", Bounds::default()).unwrap();
        model.add_continuous("x1", Bounds::default()).unwrap();
        model.add_continuous("x2", Bounds::default()).unwrap();

        let removed = model.remove_variable("x1").unwrap();
        assert_eq!(removed.name(), "x1");
        assert_eq!(model.variable_names(), vec!["x0", "x2"]);

        let err = model.remove_variable("x1").unwrap_err();
        assert_eq!(err.code(), "MODEL_UNKNOWN_VARIABLE");
    }

    #[test]
    fn clear_keeping_variables_resets_values() {
        let mut model = Model::new("m");
        let x = model.add_continuous("x", Bounds::default()).unwrap();
        model.add_constraint("c", &x.le_scalar(1.0)).unwrap();
        model.add_objective("o", Sense::Min, x, 1.0).unwrap();
        model.set_value("x", 2.5).unwrap();

        model.clear(true);
        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.get_variable("x").unwrap().value(), None);
        assert_eq!(model.num_constraints(), 0);
        assert_eq!(model.num_objectives(), 0);
    }

    #[test]
    fn clear_dropping_variables_empties_everything() {
        let mut model = Model::new("m");
        model.add_continuous("x", Bounds::default()).unwrap();
        model.clear(false);
        assert_eq!(model.num_variables(), 0);
    }
}
