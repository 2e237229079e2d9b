//! Index-selection planner for keyplan
//!
//! Decides which key schema (the table's primary key, a local secondary
//! index or a global secondary index) a query should read through.
//!
//! # Design Principles
//!
//! - Deterministic: same conditions + same schema → same path
//! - Total: never fails; "no path" means fall back to a full scan
//! - Safe: a global index that does not project every attribute is never chosen
//! - Pure: no I/O, no logging, no shared state
//!
//! # Strategy Priority (strict order)
//!
//! 1. Table hash key + table range key
//! 2. Table hash key + local index range key
//! 3. Global index hash key + its range key
//! 4. Table hash key only
//! 5. Global index hash key only
//!
//! Ties among indexes are broken by declaration order.

mod explain;
mod path;
mod planner;

pub use explain::ExplainPlan;
pub use path::{AccessPath, Strategy};
pub use planner::{resolve, KeyPlanner, QueryPlan};
