//! Query condition model for keyplan
//!
//! Conditions arrive from the query builder as field + operator pairs.
//! Operator-suffixed keys such as `"age.gt"` are parsed exactly once, at the
//! boundary, into [`Condition`] values. Everything downstream works on the
//! typed form and never splits strings.
//!
//! # Equality vs. presence
//!
//! Only an equality condition can drive a hash-key lookup. Any operator is
//! enough to constrain a range key. [`PredicateSet`] answers both questions.

mod condition;
mod errors;
mod set;

pub use condition::{Condition, ConditionOp, OPERATOR_SEPARATOR};
pub use errors::{PredicateError, PredicateResult};
pub use set::PredicateSet;
