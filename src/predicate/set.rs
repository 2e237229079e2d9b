//! Normalized, immutable view over a query's conditions

use std::collections::HashSet;

use serde_json::Value;

use super::condition::Condition;
use super::errors::{PredicateError, PredicateResult};

/// The set of conditions a single query carries.
///
/// Built once per planning call and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    /// Conditions in the order they were supplied
    conditions: Vec<Condition>,
    /// Fields constrained by any operator
    fields: HashSet<String>,
    /// Fields constrained by a bare-key equality
    equality_fields: HashSet<String>,
}

impl PredicateSet {
    /// Creates a predicate set from typed conditions
    pub fn new(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let conditions: Vec<Condition> = conditions.into_iter().collect();

        let fields = conditions.iter().map(|c| c.field.clone()).collect();
        let equality_fields = conditions
            .iter()
            .filter(|c| c.is_equality())
            .map(|c| c.field.clone())
            .collect();

        Self {
            conditions,
            fields,
            equality_fields,
        }
    }

    /// Creates an empty predicate set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses raw condition keys (`"user_id"`, `"age.gt"`, ...)
    pub fn from_keys<I, S>(keys: I) -> PredicateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let conditions = keys
            .into_iter()
            .map(|key| Condition::parse_key(key.as_ref()))
            .collect::<PredicateResult<Vec<_>>>()?;
        Ok(Self::new(conditions))
    }

    /// Parses the keys of a JSON object. Values are comparison operands
    /// and play no part in planning.
    pub fn from_json_object(value: &Value) -> PredicateResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            PredicateError::InvalidRequest(json_kind(value).to_string())
        })?;
        Self::from_keys(object.keys())
    }

    /// Returns true if `field` is constrained by any operator
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Returns true if `field` is constrained by a plain equality
    pub fn contains_field_with_equality(&self, field: &str) -> bool {
        self.equality_fields.contains(field)
    }

    /// Returns the conditions in input order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the number of conditions
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if there are no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl FromIterator<Condition> for PredicateSet {
    fn from_iter<T: IntoIterator<Item = Condition>>(iter: T) -> Self {
        Self::new(iter)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
