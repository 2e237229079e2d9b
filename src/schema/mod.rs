//! Table schema metadata for keyplan
//!
//! Describes what the planner needs to know about a table: its primary key
//! and its secondary indexes with their keys and projections.
//!
//! # Design Principles
//!
//! - Read-only snapshot: finalized at startup, passed explicitly to the planner
//! - Declaration order of indexes is preserved and significant
//! - Structural validation happens at load time, never during planning

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult, Severity};
pub use loader::SchemaLoader;
pub use types::{GlobalIndex, IndexDefinition, IndexKind, LocalIndex, Projection, TableSchema};
