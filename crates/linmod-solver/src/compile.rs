//! Compilation of a model into flat matrix/vector form.
//!
//! This is a pure function of the model: a stable column index is taken from
//! variable insertion order, constraints are partitioned into the canonical
//! inequality bucket and the equality bucket, and each bucket scatters into
//! one coefficient matrix plus right-hand-side vector. The constraint
//! normalization invariant (stored sign is `==` or the canonical direction)
//! is what makes a two-bucket partition sufficient.

use std::collections::HashMap;

use nalgebra::DMatrix;

use crate::error::CompileError;
use crate::matrix::CoefficientMatrix;
use linmod_core::{Constraint, Model};
use linmod_expr::Sign;

/// One bucket of constraints: coefficient matrix and right-hand side, rows
/// in registry order within the bucket.
#[derive(Debug, Clone)]
pub struct ConstraintBlock {
    pub matrix: CoefficientMatrix,
    pub rhs: Vec<f64>,
}

/// The flat form handed to an external numeric solver.
///
/// `objective` and `bounds` are aligned with the model's variable insertion
/// order; `inequality` rows read `coefficients · x ⟨canonical sign⟩ rhs`.
/// Empty buckets are `None`, never zero-sized matrices.
#[derive(Debug, Clone)]
pub struct CompiledProblem {
    pub objective: Vec<f64>,
    pub inequality: Option<ConstraintBlock>,
    pub equality: Option<ConstraintBlock>,
    pub bounds: Vec<(Option<f64>, Option<f64>)>,
}

impl CompiledProblem {
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }
}

/// Compile a model into matrix/vector form.
///
/// Fails fast if any constraint or objective references a variable name that
/// is no longer on the model (possible after `remove_variable`).
pub fn compile(model: &Model, is_sparse: bool) -> Result<CompiledProblem, CompileError> {
    let names = model.variable_names();
    let columns: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();
    let num_variables = names.len();

    let inequality_rows: Vec<&Constraint> = model
        .constraints()
        .filter(|constraint| constraint.sign().is_inequality())
        .collect();
    let equality_rows: Vec<&Constraint> = model
        .constraints()
        .filter(|constraint| constraint.sign() == Sign::Equal)
        .collect();

    let inequality = build_block(&inequality_rows, &columns, num_variables, is_sparse)?;
    let equality = build_block(&equality_rows, &columns, num_variables, is_sparse)?;

    let mut objective = vec![0.0; num_variables];
    for entry in model.objectives() {
        for (name, coefficient) in entry.terms() {
            let column = *columns.get(name.as_str()).ok_or_else(|| {
                CompileError::UnknownVariable {
                    owner: entry.name().to_string(),
                    variable: name.clone(),
                }
            })?;
            // Accumulate, never overwrite: objectives combine additively
            // through their weights.
            objective[column] += coefficient * entry.weight();
        }
    }

    let bounds = model
        .variables()
        .map(|variable| (variable.lower_bound(), variable.upper_bound()))
        .collect();

    tracing::debug!(
        component = "compiler",
        operation = "compile",
        status = "success",
        variables = num_variables,
        inequality_rows = inequality_rows.len(),
        equality_rows = equality_rows.len(),
        sparse = is_sparse,
        "Compiled model into matrix form"
    );

    Ok(CompiledProblem {
        objective,
        inequality,
        equality,
        bounds,
    })
}

fn build_block(
    rows: &[&Constraint],
    columns: &HashMap<&str, usize>,
    num_variables: usize,
    is_sparse: bool,
) -> Result<Option<ConstraintBlock>, CompileError> {
    if rows.is_empty() {
        return Ok(None);
    }
    let mut triplets = Vec::new();
    let mut rhs = Vec::with_capacity(rows.len());
    for (row, constraint) in rows.iter().enumerate() {
        for (name, coefficient) in constraint.terms() {
            let column = *columns.get(name.as_str()).ok_or_else(|| {
                CompileError::UnknownVariable {
                    owner: constraint.name().to_string(),
                    variable: name.clone(),
                }
            })?;
            triplets.push((row, column, *coefficient));
        }
        rhs.push(constraint.rhs());
    }
    let matrix = CoefficientMatrix::from_triplets(rows.len(), num_variables, &triplets, is_sparse);
    Ok(Some(ConstraintBlock { matrix, rhs }))
}

/// The dense `A_eq · x = b_eq` pair for a plain linear-system routine.
///
/// This is the feeder for an equality-only quick solve. It refuses to build
/// when the model also holds inequality constraints — dropping them silently
/// would hand the routine a different problem than the model describes.
pub fn equality_system(model: &Model) -> Result<(DMatrix<f64>, Vec<f64>), CompileError> {
    let inequalities = model
        .constraints()
        .filter(|constraint| constraint.sign().is_inequality())
        .count();
    if inequalities > 0 {
        return Err(CompileError::InequalitiesPresent {
            count: inequalities,
        });
    }
    let compiled = compile(model, false)?;
    match compiled.equality {
        Some(block) => Ok((block.matrix.to_dense(), block.rhs)),
        None => Err(CompileError::NoEqualities),
    }
}
