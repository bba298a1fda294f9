//! The trait external numeric backends implement.

use crate::compile::CompiledProblem;
use crate::error::SolverError;
use crate::solution::SolutionView;

/// A numeric routine that consumes a compiled problem and produces a
/// solution aligned with its variable order.
///
/// The call is blocking and atomic: it either returns a full solution or an
/// error, with no partial-result contract.
pub trait Solve {
    /// The solution type returned by this backend.
    type Output: SolutionView;

    /// # Errors
    ///
    /// Returns a `SolverError` if the backend is unavailable or finishes
    /// without a usable solution.
    fn solve(&mut self, problem: &CompiledProblem) -> Result<Self::Output, SolverError>;
}
