//! keyplan - access-path planner for hash/range keyed tables
//!
//! Given a query's conditions and a table's key layout (primary key, local
//! and global secondary indexes), decides which key schema the query can
//! read through, or that it must fall back to a full scan.
//!
//! ```
//! use keyplan::planner::{resolve, Strategy};
//! use keyplan::predicate::PredicateSet;
//! use keyplan::schema::TableSchema;
//!
//! let table = TableSchema::new("users", "user_id").with_range_key("created_at");
//! let predicates = PredicateSet::from_keys(["user_id", "created_at.gt"]).unwrap();
//!
//! let path = resolve(&predicates, &table).unwrap();
//! assert_eq!(path.range_key(), Some("created_at"));
//! assert_eq!(path.strategy(), Strategy::TableHashAndRange);
//! ```

pub mod cli;
pub mod observability;
pub mod planner;
pub mod predicate;
pub mod schema;
