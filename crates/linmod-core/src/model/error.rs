//! Model error types.

use linmod_expr::ExprError;

/// Which registry a name collision or lookup failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Variable,
    Constraint,
    Objective,
}

impl RegistryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistryKind::Variable => "variable",
            RegistryKind::Constraint => "constraint",
            RegistryKind::Objective => "objective",
        }
    }
}

/// Errors that can occur during model operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A name was already added to the same registry.
    NameExists { kind: RegistryKind, name: String },
    /// Variable name not present in the registry.
    UnknownVariable(String),
    /// Constraint name not present in the registry.
    UnknownConstraint(String),
    /// Objective name not present in the registry.
    UnknownObjective(String),
    /// Lower bound above upper bound, or a NaN bound.
    InvalidBounds { lower: f64, upper: f64 },
    /// A category string outside {bin, int, con}.
    InvalidCategory(String),
    /// A sense string outside {min, max}.
    InvalidSense(String),
    /// An inequality-sign string outside {<=, >=}.
    InvalidInequalitySign(String),
    /// Expression-level failure (model mismatch, unsupported comparison,
    /// undefined value) surfaced through a model operation.
    Expr(ExprError),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::NameExists { .. } => "MODEL_NAME_EXISTS",
            ModelError::UnknownVariable(_) => "MODEL_UNKNOWN_VARIABLE",
            ModelError::UnknownConstraint(_) => "MODEL_UNKNOWN_CONSTRAINT",
            ModelError::UnknownObjective(_) => "MODEL_UNKNOWN_OBJECTIVE",
            ModelError::InvalidBounds { .. } => "MODEL_INVALID_BOUNDS",
            ModelError::InvalidCategory(_) => "MODEL_INVALID_CATEGORY",
            ModelError::InvalidSense(_) => "MODEL_INVALID_SENSE",
            ModelError::InvalidInequalitySign(_) => "MODEL_INVALID_INEQUALITY_SIGN",
            ModelError::Expr(inner) => inner.code(),
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::NameExists { kind, name } => write!(
                f,
                "[{}] A {} named '{}' already exists on the model",
                self.code(),
                kind.as_str(),
                name
            ),
            ModelError::UnknownVariable(name) => write!(
                f,
                "[{}] Variable '{}' does not exist",
                self.code(),
                name
            ),
            ModelError::UnknownConstraint(name) => write!(
                f,
                "[{}] Constraint '{}' does not exist",
                self.code(),
                name
            ),
            ModelError::UnknownObjective(name) => write!(
                f,
                "[{}] Objective '{}' does not exist",
                self.code(),
                name
            ),
            ModelError::InvalidBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidCategory(value) => write!(
                f,
                "[{}] Category must be 'bin', 'int' or 'con' (got '{}')",
                self.code(),
                value
            ),
            ModelError::InvalidSense(value) => write!(
                f,
                "[{}] Sense must be 'min' or 'max' (got '{}')",
                self.code(),
                value
            ),
            ModelError::InvalidInequalitySign(value) => write!(
                f,
                "[{}] Inequality sign must be '<=' or '>=' (got '{}')",
                self.code(),
                value
            ),
            ModelError::Expr(inner) => write!(f, "{}", inner),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ExprError> for ModelError {
    fn from(inner: ExprError) -> Self {
        ModelError::Expr(inner)
    }
}
