//! Resolved access path: which keys and which index to read through

use std::fmt;

use serde::Serialize;

/// Rule that produced an access path, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Strategy {
    /// Table hash key equality + table range key constrained
    #[serde(rename = "TABLE_HASH_RANGE")]
    TableHashAndRange,
    /// Table hash key equality + local index range key constrained
    #[serde(rename = "LOCAL_INDEX")]
    LocalIndex,
    /// Global index hash key equality + its range key constrained
    #[serde(rename = "GLOBAL_INDEX_HASH_RANGE")]
    GlobalIndexHashAndRange,
    /// Table hash key equality only
    #[serde(rename = "TABLE_HASH")]
    TableHash,
    /// Global index hash key equality only
    #[serde(rename = "GLOBAL_INDEX_HASH")]
    GlobalIndexHash,
}

impl Strategy {
    /// Every strategy, in the order the planner tries them
    pub const PRIORITY: [Strategy; 5] = [
        Strategy::TableHashAndRange,
        Strategy::LocalIndex,
        Strategy::GlobalIndexHashAndRange,
        Strategy::TableHash,
        Strategy::GlobalIndexHash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::TableHashAndRange => "TABLE_HASH_RANGE",
            Strategy::LocalIndex => "LOCAL_INDEX",
            Strategy::GlobalIndexHashAndRange => "GLOBAL_INDEX_HASH_RANGE",
            Strategy::TableHash => "TABLE_HASH",
            Strategy::GlobalIndexHash => "GLOBAL_INDEX_HASH",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keys (and optional index) a keyed read should use.
///
/// `index_name == None` means the table's own primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccessPath {
    /// Hash key to match exactly
    pub hash_key: String,
    /// Range key of the chosen key schema, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    /// Secondary index to read through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    /// Rule that selected this path
    pub strategy: Strategy,
}

impl AccessPath {
    /// Path over the table's primary key
    pub fn table(
        hash_key: impl Into<String>,
        range_key: Option<String>,
        strategy: Strategy,
    ) -> Self {
        Self {
            hash_key: hash_key.into(),
            range_key,
            index_name: None,
            strategy,
        }
    }

    /// Path through a named secondary index
    pub fn index(
        index_name: impl Into<String>,
        hash_key: impl Into<String>,
        range_key: Option<String>,
        strategy: Strategy,
    ) -> Self {
        Self {
            hash_key: hash_key.into(),
            range_key,
            index_name: Some(index_name.into()),
            strategy,
        }
    }

    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    pub fn range_key(&self) -> Option<&str> {
        self.range_key.as_deref()
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns true if the read goes through a secondary index
    pub fn uses_index(&self) -> bool {
        self.index_name.is_some()
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.index_name {
            Some(name) => write!(f, "index {} (hash: {}", name, self.hash_key)?,
            None => write!(f, "table (hash: {}", self.hash_key)?,
        }
        if let Some(range) = &self.range_key {
            write!(f, ", range: {}", range)?;
        }
        write!(f, ")")
    }
}
