//! Key planner
//!
//! Picks the access path a query should read through.
//!
//! Strategy priority (strict order, first match wins):
//! 1. Table hash key equality + table range key constrained
//! 2. Table hash key equality + local index range key constrained
//! 3. Global index hash key equality + its range key constrained (ALL projection)
//! 4. Table hash key equality
//! 5. Global index hash key equality (ALL projection)
//!
//! Ties among indexes are broken by declaration order.

use crate::predicate::{Condition, PredicateSet};
use crate::schema::{GlobalIndex, IndexDefinition, TableSchema};

use super::path::{AccessPath, Strategy};

/// Read plan for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Keyed read through the resolved path
    Query {
        /// Keys and index to read through
        path: AccessPath,
        /// Conditions expressed as key conditions
        key_conditions: Vec<Condition>,
        /// Conditions applied after the keyed read
        filter_conditions: Vec<Condition>,
    },
    /// No key-based path: full scan, every condition is a filter
    Scan {
        /// Conditions applied to every scanned item
        filter_conditions: Vec<Condition>,
    },
}

impl QueryPlan {
    /// Returns the access path of a keyed read
    pub fn access_path(&self) -> Option<&AccessPath> {
        match self {
            QueryPlan::Query { path, .. } => Some(path),
            QueryPlan::Scan { .. } => None,
        }
    }

    /// Returns true if this plan falls back to a full scan
    pub fn is_scan(&self) -> bool {
        matches!(self, QueryPlan::Scan { .. })
    }

    /// Conditions that become key conditions (empty for a scan)
    pub fn key_conditions(&self) -> &[Condition] {
        match self {
            QueryPlan::Query { key_conditions, .. } => key_conditions,
            QueryPlan::Scan { .. } => &[],
        }
    }

    /// Conditions evaluated against returned items
    pub fn filter_conditions(&self) -> &[Condition] {
        match self {
            QueryPlan::Query {
                filter_conditions, ..
            }
            | QueryPlan::Scan { filter_conditions } => filter_conditions,
        }
    }
}

/// Resolves the access path for `predicates` against `schema`.
///
/// `None` means no key-based path exists and the caller must scan.
pub fn resolve(predicates: &PredicateSet, schema: &TableSchema) -> Option<AccessPath> {
    KeyPlanner::new(schema).resolve(predicates)
}

/// Planner bound to one table schema snapshot.
///
/// Pure: no I/O, no interior state, safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct KeyPlanner<'a> {
    schema: &'a TableSchema,
}

impl<'a> KeyPlanner<'a> {
    /// Creates a planner over the given schema
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    /// Resolves the access path using the strict strategy priority.
    ///
    /// This method is deterministic: same inputs produce the same path.
    pub fn resolve(&self, predicates: &PredicateSet) -> Option<AccessPath> {
        self.match_table_and_range_key(predicates)
            .or_else(|| self.match_local_index(predicates))
            .or_else(|| self.match_global_index_and_range_key(predicates))
            .or_else(|| self.match_table(predicates))
            .or_else(|| self.match_global_index(predicates))
    }

    /// Resolves the access path and splits conditions into key conditions
    /// and filters.
    ///
    /// Key conditions are the first equality on the path's hash key and the
    /// first condition on its range key whose operator a key condition
    /// allows. Everything else is a filter, in input order.
    pub fn plan(&self, predicates: &PredicateSet) -> QueryPlan {
        let Some(path) = self.resolve(predicates) else {
            return QueryPlan::Scan {
                filter_conditions: predicates.conditions().to_vec(),
            };
        };

        let mut key_conditions = Vec::new();
        let mut filter_conditions = Vec::new();
        let mut hash_bound = false;
        let mut range_bound = false;

        for cond in predicates.conditions() {
            if !hash_bound && cond.field == path.hash_key && cond.is_equality() {
                hash_bound = true;
                key_conditions.push(cond.clone());
            } else if !range_bound
                && path.range_key() == Some(cond.field.as_str())
                && cond.op.is_key_condition()
            {
                range_bound = true;
                key_conditions.push(cond.clone());
            } else {
                filter_conditions.push(cond.clone());
            }
        }

        QueryPlan::Query {
            path,
            key_conditions,
            filter_conditions,
        }
    }

    fn has_table_hash_key(&self, predicates: &PredicateSet) -> bool {
        predicates.contains_field_with_equality(&self.schema.hash_key)
    }

    /// Strategy 1: table hash + range key
    fn match_table_and_range_key(&self, predicates: &PredicateSet) -> Option<AccessPath> {
        if !self.has_table_hash_key(predicates) {
            return None;
        }
        let range_key = self.schema.range_key.as_deref()?;

        if !predicates.contains_field(range_key) {
            return None;
        }

        Some(AccessPath::table(
            &self.schema.hash_key,
            Some(range_key.to_string()),
            Strategy::TableHashAndRange,
        ))
    }

    /// Strategy 2: first local index whose range key is constrained.
    ///
    /// Projection is not checked for local indexes.
    fn match_local_index(&self, predicates: &PredicateSet) -> Option<AccessPath> {
        if !self.has_table_hash_key(predicates) {
            return None;
        }

        let lsi = self
            .schema
            .local_indexes
            .iter()
            .find(|lsi| predicates.contains_field(&lsi.range_key))?;

        Some(AccessPath::index(
            &lsi.name,
            &self.schema.hash_key,
            Some(lsi.range_key.clone()),
            Strategy::LocalIndex,
        ))
    }

    /// Strategy 3: first fully projected global index with both keys
    /// constrained
    fn match_global_index_and_range_key(&self, predicates: &PredicateSet) -> Option<AccessPath> {
        let gsi = self.schema.global_indexes.iter().find(|gsi| {
            Self::global_hash_key_usable(gsi, predicates)
                && gsi
                    .range_key()
                    .map_or(false, |range_key| predicates.contains_field(range_key))
        })?;

        Some(Self::global_path(gsi, Strategy::GlobalIndexHashAndRange))
    }

    /// Strategy 4: table hash key only
    fn match_table(&self, predicates: &PredicateSet) -> Option<AccessPath> {
        if !self.has_table_hash_key(predicates) {
            return None;
        }

        Some(AccessPath::table(
            &self.schema.hash_key,
            None,
            Strategy::TableHash,
        ))
    }

    /// Strategy 5: first fully projected global index with its hash key
    /// matched. The index range key is reported but left unconstrained.
    fn match_global_index(&self, predicates: &PredicateSet) -> Option<AccessPath> {
        let gsi = self
            .schema
            .global_indexes
            .iter()
            .find(|gsi| Self::global_hash_key_usable(gsi, predicates))?;

        Some(Self::global_path(gsi, Strategy::GlobalIndexHash))
    }

    /// A partial projection would return truncated items, so only ALL
    /// qualifies.
    fn global_hash_key_usable(gsi: &GlobalIndex, predicates: &PredicateSet) -> bool {
        predicates.contains_field_with_equality(&gsi.hash_key) && gsi.projects_all()
    }

    fn global_path(gsi: &GlobalIndex, strategy: Strategy) -> AccessPath {
        AccessPath::index(&gsi.name, &gsi.hash_key, gsi.range_key.clone(), strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ConditionOp;
    use crate::schema::{GlobalIndex, LocalIndex, Projection};

    fn users_table() -> TableSchema {
        TableSchema::new("users", "user_id").with_range_key("created_at")
    }

    fn keys(raw: &[&str]) -> PredicateSet {
        PredicateSet::from_keys(raw.iter().copied()).unwrap()
    }

    #[test]
    fn test_table_hash_and_range() {
        let table = users_table();
        let path = resolve(&keys(&["user_id", "created_at.gt"]), &table).unwrap();

        assert_eq!(path.hash_key(), "user_id");
        assert_eq!(path.range_key(), Some("created_at"));
        assert_eq!(path.index_name(), None);
        assert_eq!(path.strategy(), Strategy::TableHashAndRange);
    }

    #[test]
    fn test_hash_key_needs_equality() {
        let table = users_table();
        assert!(resolve(&keys(&["user_id.gt", "created_at"]), &table).is_none());
    }

    #[test]
    fn test_local_index_selected_when_table_range_absent() {
        let table = users_table()
            .with_local_index(LocalIndex::new("by_email", "email"))
            .with_local_index(LocalIndex::new("by_age", "age"));

        let path = resolve(&keys(&["user_id", "age.between"]), &table).unwrap();
        assert_eq!(path.index_name(), Some("by_age"));
        assert_eq!(path.hash_key(), "user_id");
        assert_eq!(path.range_key(), Some("age"));
        assert_eq!(path.strategy(), Strategy::LocalIndex);
    }

    #[test]
    fn test_local_index_ignores_projection() {
        let table = users_table().with_local_index(
            LocalIndex::new("by_email", "email").with_projection(Projection::KeysOnly),
        );

        let path = resolve(&keys(&["user_id", "email.begins_with"]), &table).unwrap();
        assert_eq!(path.index_name(), Some("by_email"));
    }

    #[test]
    fn test_global_index_with_range_key() {
        let table = users_table().with_global_index(
            GlobalIndex::new("by_status", "status")
                .with_range_key("score")
                .with_projection(Projection::All),
        );

        let path = resolve(&keys(&["status", "score.gte"]), &table).unwrap();
        assert_eq!(path.index_name(), Some("by_status"));
        assert_eq!(path.hash_key(), "status");
        assert_eq!(path.range_key(), Some("score"));
        assert_eq!(path.strategy(), Strategy::GlobalIndexHashAndRange);
    }

    #[test]
    fn test_global_range_match_beats_table_hash_only() {
        let table = users_table().with_global_index(
            GlobalIndex::new("by_status", "status")
                .with_range_key("score")
                .with_projection(Projection::All),
        );

        let path = resolve(&keys(&["user_id", "status", "score.lt"]), &table).unwrap();
        assert_eq!(path.strategy(), Strategy::GlobalIndexHashAndRange);
    }

    #[test]
    fn test_table_hash_only() {
        let table = users_table();
        let path = resolve(&keys(&["user_id", "name.contains"]), &table).unwrap();

        assert_eq!(path.hash_key(), "user_id");
        assert_eq!(path.range_key(), None);
        assert_eq!(path.index_name(), None);
        assert_eq!(path.strategy(), Strategy::TableHash);
    }

    #[test]
    fn test_global_hash_only_reports_range_key() {
        let table = TableSchema::new("users", "user_id").with_global_index(
            GlobalIndex::new("by_status", "status")
                .with_range_key("score")
                .with_projection(Projection::All),
        );

        let path = resolve(&keys(&["status"]), &table).unwrap();
        assert_eq!(path.range_key(), Some("score"));
        assert_eq!(path.strategy(), Strategy::GlobalIndexHash);
    }

    #[test]
    fn test_global_range_key_absent_skips_strategy_three() {
        let table = TableSchema::new("users", "user_id").with_global_index(
            GlobalIndex::new("by_status", "status").with_projection(Projection::All),
        );

        let path = resolve(&keys(&["status", "score.gt"]), &table).unwrap();
        assert_eq!(path.strategy(), Strategy::GlobalIndexHash);
        assert_eq!(path.range_key(), None);
    }

    #[test]
    fn test_partial_projection_never_selected() {
        let table = TableSchema::new("users", "user_id")
            .with_global_index(
                GlobalIndex::new("by_status", "status")
                    .with_range_key("score")
                    .with_projection(Projection::KeysOnly),
            )
            .with_global_index(
                GlobalIndex::new("by_team", "team")
                    .with_range_key("score")
                    .with_projection(Projection::Include(vec!["name".into()])),
            );

        assert!(resolve(&keys(&["status", "score"]), &table).is_none());
        assert!(resolve(&keys(&["team", "score.gt"]), &table).is_none());
        assert!(resolve(&keys(&["team"]), &table).is_none());
    }

    #[test]
    fn test_first_declared_global_index_wins() {
        let table = TableSchema::new("users", "user_id")
            .with_global_index(GlobalIndex::new("status_a", "status").with_projection(Projection::All))
            .with_global_index(GlobalIndex::new("status_b", "status").with_projection(Projection::All));

        let path = resolve(&keys(&["status"]), &table).unwrap();
        assert_eq!(path.index_name(), Some("status_a"));
    }

    #[test]
    fn test_plan_splits_key_and_filter_conditions() {
        let table = users_table();
        let predicates = PredicateSet::new([
            Condition::gt("created_at"),
            Condition::eq("name"),
            Condition::eq("user_id"),
            Condition::lt("created_at"),
        ]);

        let plan = KeyPlanner::new(&table).plan(&predicates);
        assert!(!plan.is_scan());
        assert_eq!(
            plan.key_conditions(),
            &[Condition::gt("created_at"), Condition::eq("user_id")]
        );
        assert_eq!(
            plan.filter_conditions(),
            &[Condition::eq("name"), Condition::lt("created_at")]
        );
    }

    #[test]
    fn test_plan_non_key_operator_on_range_is_filter() {
        let table = users_table();
        let predicates = PredicateSet::new([
            Condition::eq("user_id"),
            Condition::new("created_at", ConditionOp::Ne),
        ]);

        let plan = KeyPlanner::new(&table).plan(&predicates);
        assert_eq!(
            plan.access_path().map(|p| p.strategy()),
            Some(Strategy::TableHashAndRange)
        );
        assert_eq!(plan.key_conditions(), &[Condition::eq("user_id")]);
        assert_eq!(
            plan.filter_conditions(),
            &[Condition::new("created_at", ConditionOp::Ne)]
        );
    }

    #[test]
    fn test_plan_scan_keeps_every_condition_as_filter() {
        let table = users_table();
        let predicates = keys(&["name", "age.gt"]);

        let plan = KeyPlanner::new(&table).plan(&predicates);
        assert!(plan.is_scan());
        assert!(plan.access_path().is_none());
        assert!(plan.key_conditions().is_empty());
        assert_eq!(plan.filter_conditions().len(), 2);
    }
}
