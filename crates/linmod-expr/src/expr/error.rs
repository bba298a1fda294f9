//! Expression and relation errors.

use crate::ids::ModelId;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Two operands reference different model instances.
    ModelMismatch { left: ModelId, right: ModelId },
    /// A comparison sign string that is not `<=`, `==` or `>=`.
    InvalidSign(String),
    /// The `!=` comparison, which has no linear-constraint meaning.
    UnsupportedComparison(String),
    /// Neither side of a relation carries an expression.
    ScalarRelation,
    /// A term references a variable name the registry does not know.
    UnknownVariable(String),
    /// A referenced variable has no assigned value.
    UndefinedValue(String),
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::ModelMismatch { .. } => "EXPR_MODEL_MISMATCH",
            ExprError::InvalidSign(_) => "EXPR_INVALID_SIGN",
            ExprError::UnsupportedComparison(_) => "EXPR_UNSUPPORTED_COMPARISON",
            ExprError::ScalarRelation => "EXPR_SCALAR_RELATION",
            ExprError::UnknownVariable(_) => "EXPR_UNKNOWN_VARIABLE",
            ExprError::UndefinedValue(_) => "EXPR_UNDEFINED_VALUE",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::ModelMismatch { left, right } => write!(
                f,
                "[{}] Operands belong to different models ({} vs {})",
                self.code(),
                left.inner(),
                right.inner()
            ),
            ExprError::InvalidSign(sign) => write!(
                f,
                "[{}] Comparison sign must be '<=', '==' or '>=' (got '{}')",
                self.code(),
                sign
            ),
            ExprError::UnsupportedComparison(sign) => write!(
                f,
                "[{}] Comparison '{}' does not describe a linear relation",
                self.code(),
                sign
            ),
            ExprError::ScalarRelation => write!(
                f,
                "[{}] At least one side of a relation must be an expression",
                self.code()
            ),
            ExprError::UnknownVariable(name) => write!(
                f,
                "[{}] Variable '{}' is not registered on the model",
                self.code(),
                name
            ),
            ExprError::UndefinedValue(name) => write!(
                f,
                "[{}] Variable '{}' has no assigned value",
                self.code(),
                name
            ),
        }
    }
}

impl std::error::Error for ExprError {}
