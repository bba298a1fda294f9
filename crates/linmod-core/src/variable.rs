//! Decision variables.

use linmod_expr::{Expr, ModelId};

use crate::model::ModelError;
use crate::types::{Bounds, Category};

/// A named decision variable.
///
/// A variable is a leaf expression: its [`Variable::expr`] form carries
/// exactly `{own-name: 1.0}`. The solved `value` is the only mutable slot;
/// everything else is fixed at construction.
#[derive(Debug, Clone)]
pub struct Variable {
    model: ModelId,
    name: String,
    category: Category,
    bounds: Bounds,
    value: Option<f64>,
}

impl Variable {
    /// Validate and build. `Bin` forces bounds to exactly `[0, 1]` no matter
    /// what was supplied; other categories reject NaN bounds and
    /// `lower > upper`.
    pub(crate) fn new(
        model: ModelId,
        name: String,
        category: Category,
        bounds: Bounds,
    ) -> Result<Self, ModelError> {
        let bounds = match category {
            Category::Bin => Bounds::binary(),
            Category::Int | Category::Con => {
                bounds.validate()?;
                bounds
            }
        };
        Ok(Self {
            model,
            name,
            category,
            bounds,
            value: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn lower_bound(&self) -> Option<f64> {
        self.bounds.lower
    }

    pub fn upper_bound(&self) -> Option<f64> {
        self.bounds.upper
    }

    /// The solved value; `None` until a solution has been written back.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// The leaf expression `{name: 1.0}` over the owning model.
    pub fn expr(&self) -> Expr {
        Expr::var(self.model, self.name.as_str())
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    pub(crate) fn clear_value(&mut self) {
        self.value = None;
    }
}
