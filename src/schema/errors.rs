//! Schema error types
//!
//! Error codes:
//! - KEYPLAN_SCHEMA_MALFORMED (FATAL)
//! - KEYPLAN_SCHEMA_INVALID (FATAL)
//! - KEYPLAN_SCHEMA_DUPLICATE (REJECT)
//! - KEYPLAN_UNKNOWN_TABLE (REJECT)

use std::fmt;

use thiserror::Error;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, process keeps running
    Reject,
    /// Startup cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading or looking up table schemas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema file could not be read or parsed
    #[error("Malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Schema parsed but its key layout is inconsistent
    #[error("Invalid schema for table '{table}': {reason}")]
    Invalid { table: String, reason: String },

    /// A table with this name is already registered
    #[error("Table '{0}' is already registered")]
    Duplicate(String),

    /// No table with this name is registered
    #[error("Table '{0}' not found")]
    UnknownTable(String),
}

impl SchemaError {
    /// Create an error for an unreadable or unparsable schema file
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a structurally invalid schema
    pub fn invalid(table: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Invalid {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Malformed { .. } => "KEYPLAN_SCHEMA_MALFORMED",
            SchemaError::Invalid { .. } => "KEYPLAN_SCHEMA_INVALID",
            SchemaError::Duplicate(_) => "KEYPLAN_SCHEMA_DUPLICATE",
            SchemaError::UnknownTable(_) => "KEYPLAN_UNKNOWN_TABLE",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            SchemaError::Malformed { .. } | SchemaError::Invalid { .. } => Severity::Fatal,
            SchemaError::Duplicate(_) | SchemaError::UnknownTable(_) => Severity::Reject,
        }
    }

    /// Returns whether startup must stop
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
