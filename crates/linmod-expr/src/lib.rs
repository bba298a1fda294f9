pub mod expr;
pub mod ids;
pub mod tol;

pub use expr::{check_models, Expr, ExprError, Operand, Relation, Sign};
pub use ids::ModelId;
