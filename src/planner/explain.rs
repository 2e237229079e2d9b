//! Explain plan output
//!
//! Produces deterministic, human-readable explain output.

use std::fmt;

use serde::Serialize;

use super::planner::QueryPlan;

/// Explain plan output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainPlan {
    /// TABLE, INDEX or SCAN
    pub access: String,
    /// Strategy code (absent for a scan)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Hash key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_key: Option<String>,
    /// Range key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    /// Index name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    /// Key conditions as `field op`
    pub key_conditions: Vec<String>,
    /// Filter conditions as `field op`
    pub filter_conditions: Vec<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let key_conditions = plan.key_conditions().iter().map(|c| c.to_string()).collect();
        let filter_conditions = plan
            .filter_conditions()
            .iter()
            .map(|c| c.to_string())
            .collect();

        match plan.access_path() {
            Some(path) => Self {
                access: if path.uses_index() { "INDEX" } else { "TABLE" }.to_string(),
                strategy: Some(path.strategy().as_str().to_string()),
                hash_key: Some(path.hash_key.clone()),
                range_key: path.range_key.clone(),
                index_name: path.index_name.clone(),
                key_conditions,
                filter_conditions,
            },
            None => Self {
                access: "SCAN".to_string(),
                strategy: None,
                hash_key: None,
                range_key: None,
                index_name: None,
                key_conditions,
                filter_conditions,
            },
        }
    }

    /// Returns true if the plan reads through keys
    pub fn is_keyed(&self) -> bool {
        self.access != "SCAN"
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        writeln!(f, "Access: {}", self.access)?;

        if let Some(strategy) = &self.strategy {
            writeln!(f, "Strategy: {}", strategy)?;
        }
        if let Some(index) = &self.index_name {
            writeln!(f, "Index: {}", index)?;
        }
        if let Some(hash) = &self.hash_key {
            writeln!(f, "Hash Key: {}", hash)?;
        }
        if let Some(range) = &self.range_key {
            writeln!(f, "Range Key: {}", range)?;
        }
        if !self.key_conditions.is_empty() {
            writeln!(f, "Key Conditions:")?;
            for cond in &self.key_conditions {
                writeln!(f, "  - {}", cond)?;
            }
        }
        if !self.filter_conditions.is_empty() {
            writeln!(f, "Filters:")?;
            for cond in &self.filter_conditions {
                writeln!(f, "  - {}", cond)?;
            }
        }

        Ok(())
    }
}
