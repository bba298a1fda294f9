//! Solution types and write-back glue.

use crate::error::SolverError;
use crate::status::SolverStatus;
use linmod_core::Model;

/// Read access to a solve result, independent of the backend that produced
/// it.
pub trait SolutionView {
    fn status(&self) -> SolverStatus;

    fn objective_value(&self) -> f64;

    /// Primal values aligned with the compiled variable order.
    fn values(&self) -> &[f64];

    fn get(&self, index: usize) -> Option<f64> {
        self.values().get(index).copied()
    }

    fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    fn is_feasible(&self) -> bool {
        self.status().is_feasible()
    }
}

/// A plain owned solution, the simplest [`SolutionView`] carrier.
#[derive(Debug, Clone)]
pub struct Solution {
    pub values: Vec<f64>,
    pub objective_value: f64,
    pub status: SolverStatus,
}

impl SolutionView for Solution {
    fn status(&self) -> SolverStatus {
        self.status
    }

    fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Write a solution vector back into the model's variables.
///
/// `values[i]` goes to the variable at column `i` — the same insertion order
/// the compiled `objective` and `bounds` use.
pub fn store_solution(model: &mut Model, values: &[f64]) -> Result<(), SolverError> {
    if values.len() != model.num_variables() {
        return Err(SolverError::LengthMismatch {
            expected: model.num_variables(),
            actual: values.len(),
        });
    }
    let names: Vec<String> = model
        .variable_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    for (name, value) in names.iter().zip(values) {
        model.set_value(name, *value)?;
    }
    tracing::debug!(
        component = "solver",
        operation = "store_solution",
        status = "success",
        variables = values.len(),
        "Stored solution values on the model"
    );
    Ok(())
}
