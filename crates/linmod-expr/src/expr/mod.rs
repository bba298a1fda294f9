//! Linear expression algebra and relation descriptors.

mod core;
mod error;
mod relation;

pub use core::{check_models, Expr};
pub use error::ExprError;
pub use relation::{Operand, Relation, Sign};
