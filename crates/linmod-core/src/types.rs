use serde::{Deserialize, Serialize};

use crate::model::ModelError;
use linmod_expr::Sign;

/// Optimization sense, fixed per model and propagated to every objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Min,
    Max,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Min => "min",
            Sense::Max => "max",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "min" => Ok(Sense::Min),
            "max" => Ok(Sense::Max),
            other => Err(ModelError::InvalidSense(other.to_string())),
        }
    }
}

/// The single inequality direction a model normalizes its inequality
/// constraints to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InequalitySign {
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">=")]
    GreaterEqual,
}

impl InequalitySign {
    pub fn as_str(self) -> &'static str {
        match self {
            InequalitySign::LessEqual => "<=",
            InequalitySign::GreaterEqual => ">=",
        }
    }

    pub fn as_sign(self) -> Sign {
        match self {
            InequalitySign::LessEqual => Sign::LessEqual,
            InequalitySign::GreaterEqual => Sign::GreaterEqual,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "<=" => Ok(InequalitySign::LessEqual),
            ">=" => Ok(InequalitySign::GreaterEqual),
            other => Err(ModelError::InvalidInequalitySign(other.to_string())),
        }
    }
}

/// Variable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Binary, bounds forced to [0, 1].
    Bin,
    /// Integer-valued.
    Int,
    /// Continuous.
    Con,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bin => "bin",
            Category::Int => "int",
            Category::Con => "con",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "bin" => Ok(Category::Bin),
            "int" => Ok(Category::Int),
            "con" => Ok(Category::Con),
            other => Err(ModelError::InvalidCategory(other.to_string())),
        }
    }
}

/// Bounds for a variable; `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bounds {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// Unbounded on both sides.
    pub fn free() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// `[0, +inf)`, the default for new variables.
    pub fn non_negative() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }

    /// Exactly `[0, 1]`.
    pub fn binary() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(1.0),
        }
    }

    /// Reject NaN sides and a lower bound above the upper bound.
    pub fn validate(&self) -> Result<(), ModelError> {
        let lower = self.lower.unwrap_or(f64::NEG_INFINITY);
        let upper = self.upper.unwrap_or(f64::INFINITY);
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(ModelError::InvalidBounds { lower, upper });
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::non_negative()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn sense_string_roundtrip() {
        assert_eq!(Sense::parse("min").unwrap(), Sense::Min);
        assert_eq!(Sense::parse("max").unwrap(), Sense::Max);
        assert_eq!(Sense::Min.as_str(), "min");
        assert!(Sense::parse("maximize").is_err());
    }

    #[test]
    fn inequality_sign_maps_to_sign() {
        assert_eq!(InequalitySign::LessEqual.as_sign(), Sign::LessEqual);
        assert_eq!(InequalitySign::GreaterEqual.as_sign(), Sign::GreaterEqual);
        assert!(InequalitySign::parse("==").is_err());
    }

    #[test]
    fn category_parse_rejects_unknown() {
        assert_eq!(Category::parse("bin").unwrap(), Category::Bin);
        let err = Category::parse("semicontinuous").unwrap_err();
        assert_eq!(err.code(), "MODEL_INVALID_CATEGORY");
    }

    #[test]
    fn bounds_validation() {
        assert!(Bounds::new(Some(0.0), Some(1.0)).validate().is_ok());
        assert!(Bounds::free().validate().is_ok());
        assert!(Bounds::new(Some(5.0), Some(1.0)).validate().is_err());
        assert!(Bounds::new(Some(f64::NAN), None).validate().is_err());
    }

    #[test]
    fn default_bounds_are_non_negative() {
        let bounds = Bounds::default();
        assert_eq!(bounds.lower, Some(0.0));
        assert_eq!(bounds.upper, None);
    }
}
