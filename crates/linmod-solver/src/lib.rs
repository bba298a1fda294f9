//! Matrix compilation and the numeric-solver boundary.
//!
//! This crate turns a [`linmod_core::Model`] into the flat
//! `(objective, inequality matrix + rhs, equality matrix + rhs, bounds)`
//! form a numeric linear-programming routine consumes, and defines the
//! [`Solve`] trait such routines implement. No solving algorithm lives here.

pub mod compile;
pub mod error;
pub mod matrix;
pub mod solution;
pub mod status;
pub mod traits;

pub use compile::{compile, equality_system, CompiledProblem, ConstraintBlock};
pub use error::{CompileError, SolverError};
pub use matrix::CoefficientMatrix;
pub use solution::{store_solution, Solution, SolutionView};
pub use status::SolverStatus;
pub use traits::Solve;
