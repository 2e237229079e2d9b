//! Table and secondary index metadata
//!
//! A table has a hash key, an optional range key and two ordered
//! collections of secondary indexes. Declaration order of the indexes is
//! significant: when several indexes could serve a query, the planner picks
//! the one declared first.

use serde::{Deserialize, Serialize};

/// Attribute projection policy of a secondary index
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Every table attribute is copied into the index
    All,
    /// Only table and index key attributes
    #[default]
    KeysOnly,
    /// Key attributes plus the listed non-key attributes
    Include(Vec<String>),
}

impl Projection {
    /// Returns true only for a full projection
    pub fn is_all(&self) -> bool {
        matches!(self, Projection::All)
    }

    /// Returns the projection name for explain and error output
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::All => "ALL",
            Projection::KeysOnly => "KEYS_ONLY",
            Projection::Include(_) => "INCLUDE",
        }
    }
}

/// Local or global secondary index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Shares the table's hash key
    Local,
    /// Declares its own hash key
    Global,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Local => "LSI",
            IndexKind::Global => "GSI",
        }
    }
}

/// Capability shared by local and global secondary indexes
pub trait IndexDefinition {
    /// Declared index name
    fn name(&self) -> &str;

    /// Index hash key. `None` for local indexes, which use the table's.
    fn hash_key(&self) -> Option<&str>;

    /// Index range key, if declared
    fn range_key(&self) -> Option<&str>;

    /// Attribute projection policy
    fn projection(&self) -> &Projection;

    /// Local or global
    fn kind(&self) -> IndexKind;

    /// Returns true if the index carries every table attribute
    fn projects_all(&self) -> bool {
        self.projection().is_all()
    }
}

/// Local secondary index: table hash key + alternate range key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIndex {
    /// Index name
    pub name: String,
    /// Alternate range key
    pub range_key: String,
    /// Projection policy
    #[serde(default)]
    pub projection: Projection,
}

impl LocalIndex {
    /// Creates a keys-only local index
    pub fn new(name: impl Into<String>, range_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range_key: range_key.into(),
            projection: Projection::default(),
        }
    }

    /// Sets the projection policy
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

impl IndexDefinition for LocalIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn hash_key(&self) -> Option<&str> {
        None
    }

    fn range_key(&self) -> Option<&str> {
        Some(&self.range_key)
    }

    fn projection(&self) -> &Projection {
        &self.projection
    }

    fn kind(&self) -> IndexKind {
        IndexKind::Local
    }
}

/// Global secondary index: own hash key, optional range key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalIndex {
    /// Index name
    pub name: String,
    /// Index hash key
    pub hash_key: String,
    /// Index range key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    /// Projection policy
    #[serde(default)]
    pub projection: Projection,
}

impl GlobalIndex {
    /// Creates a keys-only global index without a range key
    pub fn new(name: impl Into<String>, hash_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash_key: hash_key.into(),
            range_key: None,
            projection: Projection::default(),
        }
    }

    /// Sets the range key
    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }

    /// Sets the projection policy
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

impl IndexDefinition for GlobalIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn hash_key(&self) -> Option<&str> {
        Some(&self.hash_key)
    }

    fn range_key(&self) -> Option<&str> {
        self.range_key.as_deref()
    }

    fn projection(&self) -> &Projection {
        &self.projection
    }

    fn kind(&self) -> IndexKind {
        IndexKind::Global
    }
}

/// Key layout of one table, as consumed by the planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Primary hash key
    pub hash_key: String,
    /// Primary range key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    /// Local secondary indexes in declaration order
    #[serde(default)]
    pub local_indexes: Vec<LocalIndex>,
    /// Global secondary indexes in declaration order
    #[serde(default)]
    pub global_indexes: Vec<GlobalIndex>,
}

impl TableSchema {
    /// Creates a hash-key-only table with no indexes
    pub fn new(name: impl Into<String>, hash_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash_key: hash_key.into(),
            range_key: None,
            local_indexes: Vec::new(),
            global_indexes: Vec::new(),
        }
    }

    /// Sets the table range key
    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }

    /// Appends a local index after those already declared
    pub fn with_local_index(mut self, index: LocalIndex) -> Self {
        self.local_indexes.push(index);
        self
    }

    /// Appends a global index after those already declared
    pub fn with_global_index(mut self, index: GlobalIndex) -> Self {
        self.global_indexes.push(index);
        self
    }

    /// Looks up a local index by name
    pub fn local_index(&self, name: &str) -> Option<&LocalIndex> {
        self.local_indexes.iter().find(|i| i.name == name)
    }

    /// Looks up a global index by name
    pub fn global_index(&self, name: &str) -> Option<&GlobalIndex> {
        self.global_indexes.iter().find(|i| i.name == name)
    }

    /// Looks up any secondary index by name
    pub fn index(&self, name: &str) -> Option<&dyn IndexDefinition> {
        self.local_index(name)
            .map(|i| i as &dyn IndexDefinition)
            .or_else(|| self.global_index(name).map(|i| i as &dyn IndexDefinition))
    }

    /// Iterates all secondary indexes, local first, each in declaration order
    pub fn indexes(&self) -> impl Iterator<Item = &dyn IndexDefinition> {
        self.local_indexes
            .iter()
            .map(|i| i as &dyn IndexDefinition)
            .chain(self.global_indexes.iter().map(|i| i as &dyn IndexDefinition))
    }

    /// Validates the key layout itself (not a query).
    ///
    /// The planner assumes a structurally valid schema; this runs when a
    /// schema is loaded or registered.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Table name must not be empty".into());
        }
        if self.hash_key.is_empty() {
            return Err(format!("Table '{}' must declare a hash key", self.name));
        }
        if self.range_key.as_deref() == Some("") {
            return Err(format!("Table '{}' has an empty range key", self.name));
        }

        if !self.local_indexes.is_empty() && self.range_key.is_none() {
            return Err(format!(
                "Table '{}' declares local indexes but has no range key",
                self.name
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        for index in self.indexes() {
            let name = index.name();
            if name.is_empty() {
                return Err(format!(
                    "Table '{}' has an unnamed {}",
                    self.name,
                    index.kind().as_str()
                ));
            }
            if seen.contains(&name) {
                return Err(format!(
                    "Table '{}' declares index '{}' more than once",
                    self.name, name
                ));
            }
            seen.push(name);

            if index.hash_key() == Some("") {
                return Err(format!("Index '{}' has an empty hash key", name));
            }
            if index.range_key() == Some("") {
                return Err(format!("Index '{}' has an empty range key", name));
            }
        }

        Ok(())
    }
}
