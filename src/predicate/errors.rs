//! Predicate parsing errors
//!
//! Error codes:
//! - KEYPLAN_PREDICATE_EMPTY_FIELD
//! - KEYPLAN_PREDICATE_UNKNOWN_OPERATOR
//! - KEYPLAN_PREDICATE_INVALID_REQUEST

use thiserror::Error;

/// Result type for predicate parsing
pub type PredicateResult<T> = Result<T, PredicateError>;

/// Errors raised while turning raw condition keys into [`super::Condition`]s.
///
/// These belong to the query-building boundary. Planning itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    /// Key has no field name before the separator
    #[error("Condition key '{0}' has an empty field name")]
    EmptyField(String),

    /// Operator suffix is not a known token
    #[error("Condition key '{key}' uses unknown operator '{operator}'")]
    UnknownOperator { key: String, operator: String },

    /// Condition container is not a JSON object
    #[error("Conditions must be a JSON object, got {0}")]
    InvalidRequest(String),
}

impl PredicateError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PredicateError::EmptyField(_) => "KEYPLAN_PREDICATE_EMPTY_FIELD",
            PredicateError::UnknownOperator { .. } => "KEYPLAN_PREDICATE_UNKNOWN_OPERATOR",
            PredicateError::InvalidRequest(_) => "KEYPLAN_PREDICATE_INVALID_REQUEST",
        }
    }
}
