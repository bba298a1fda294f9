//! Compilation and solve-boundary errors.

use crate::status::SolverStatus;
use linmod_core::ModelError;

/// Errors raised while turning a model into matrix form.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A constraint or objective term names a variable the registry does not
    /// hold (e.g. the variable was removed after the constraint was built).
    UnknownVariable { owner: String, variable: String },
    /// The equality-only system was requested on a model that also holds
    /// inequality constraints.
    InequalitiesPresent { count: usize },
    /// The equality-only system was requested on a model without equality
    /// constraints.
    NoEqualities,
}

impl CompileError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::UnknownVariable { .. } => "COMPILE_UNKNOWN_VARIABLE",
            CompileError::InequalitiesPresent { .. } => "COMPILE_INEQUALITIES_PRESENT",
            CompileError::NoEqualities => "COMPILE_NO_EQUALITIES",
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::UnknownVariable { owner, variable } => write!(
                f,
                "[{}] '{}' references variable '{}' which is not on the model",
                self.code(),
                owner,
                variable
            ),
            CompileError::InequalitiesPresent { count } => write!(
                f,
                "[{}] Equality-only system requested but the model holds {} inequality constraint(s)",
                self.code(),
                count
            ),
            CompileError::NoEqualities => write!(
                f,
                "[{}] Equality-only system requested but the model holds no equality constraints",
                self.code()
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors crossing the external-solver boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Compilation failed before the backend was reached.
    Compile(CompileError),
    /// A model operation failed while writing a solution back.
    Model(ModelError),
    /// A solution vector does not match the model's variable count.
    LengthMismatch { expected: usize, actual: usize },
    /// The backend is not usable (missing library, unsupported problem
    /// class, ...).
    NotAvailable(String),
    /// The backend finished without a usable solution.
    SolveFailure { status: SolverStatus },
    /// Backend-specific failure not covered by other variants.
    Backend(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::Compile(inner) => inner.code(),
            SolverError::Model(inner) => inner.code(),
            SolverError::LengthMismatch { .. } => "SOLVER_LENGTH_MISMATCH",
            SolverError::NotAvailable(_) => "SOLVER_NOT_AVAILABLE",
            SolverError::SolveFailure { .. } => "SOLVER_SOLVE_FAILURE",
            SolverError::Backend(_) => "SOLVER_BACKEND",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Compile(inner) => write!(f, "{}", inner),
            SolverError::Model(inner) => write!(f, "{}", inner),
            SolverError::LengthMismatch { expected, actual } => write!(
                f,
                "[{}] Solution vector has {} entries but the model has {} variables",
                self.code(),
                actual,
                expected
            ),
            SolverError::NotAvailable(message) => {
                write!(f, "[{}] Solver not available: {}", self.code(), message)
            }
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] Solve failed with status: {}", self.code(), status)
            }
            SolverError::Backend(message) => {
                write!(f, "[{}] Solver error: {}", self.code(), message)
            }
        }
    }
}

impl std::error::Error for SolverError {}

impl From<CompileError> for SolverError {
    fn from(inner: CompileError) -> Self {
        SolverError::Compile(inner)
    }
}

impl From<ModelError> for SolverError {
    fn from(inner: ModelError) -> Self {
        SolverError::Model(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_stable() {
        let err = CompileError::UnknownVariable {
            owner: "c0".into(),
            variable: "x9".into(),
        };
        assert_eq!(err.code(), "COMPILE_UNKNOWN_VARIABLE");
        assert_eq!(CompileError::NoEqualities.code(), "COMPILE_NO_EQUALITIES");
    }

    #[test]
    fn wrapped_errors_keep_their_code() {
        let err = SolverError::from(CompileError::InequalitiesPresent { count: 2 });
        assert_eq!(err.code(), "COMPILE_INEQUALITIES_PRESENT");
        assert!(err.to_string().contains("2 inequality"));
    }

    #[test]
    fn solve_failure_names_status() {
        let err = SolverError::SolveFailure {
            status: crate::status::SolverStatus::Infeasible,
        };
        assert!(err.to_string().contains("infeasible"));
    }
}
