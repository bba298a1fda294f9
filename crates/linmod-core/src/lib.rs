//! Model registry for linear programs: named variables, normalized
//! constraints and objectives, ready for matrix compilation.

pub mod constraint;
pub mod model;
pub mod objective;
pub mod types;
pub mod variable;

pub use constraint::{Constraint, ConstraintActivity};
pub use model::{
    ConstraintView, Model, ModelError, ModelSnapshot, ObjectiveView, RegistryKind, TermView,
    VariableView,
};
pub use objective::Objective;
pub use types::{Bounds, Category, InequalitySign, Sense};
pub use variable::Variable;

pub use linmod_expr::{Expr, ExprError, ModelId, Operand, Relation, Sign};
