//! Typed conditions and boundary parsing of operator-suffixed keys

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{PredicateError, PredicateResult};

/// Separator between a field name and its operator token (`"age.gt"`)
pub const OPERATOR_SEPARATOR: char = '.';

/// Comparison operator of a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOp {
    /// field = value (the default when a key carries no suffix)
    Eq,
    /// field <> value
    Ne,
    /// field > value
    Gt,
    /// field >= value
    Gte,
    /// field < value
    Lt,
    /// field <= value
    Lte,
    /// low <= field <= high
    Between,
    /// string prefix match
    BeginsWith,
    /// field is one of a list
    In,
    /// set or substring membership
    Contains,
    /// negated membership
    NotContains,
    /// attribute absent
    Null,
    /// attribute present
    NotNull,
}

impl ConditionOp {
    /// Every operator, in token order
    pub const ALL: [ConditionOp; 13] = [
        ConditionOp::Eq,
        ConditionOp::Ne,
        ConditionOp::Gt,
        ConditionOp::Gte,
        ConditionOp::Lt,
        ConditionOp::Lte,
        ConditionOp::Between,
        ConditionOp::BeginsWith,
        ConditionOp::In,
        ConditionOp::Contains,
        ConditionOp::NotContains,
        ConditionOp::Null,
        ConditionOp::NotNull,
    ];

    /// Returns the operator token used in suffixed keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOp::Eq => "eq",
            ConditionOp::Ne => "ne",
            ConditionOp::Gt => "gt",
            ConditionOp::Gte => "gte",
            ConditionOp::Lt => "lt",
            ConditionOp::Lte => "lte",
            ConditionOp::Between => "between",
            ConditionOp::BeginsWith => "begins_with",
            ConditionOp::In => "in",
            ConditionOp::Contains => "contains",
            ConditionOp::NotContains => "not_contains",
            ConditionOp::Null => "null",
            ConditionOp::NotNull => "not_null",
        }
    }

    /// Returns true if this operator can drive an exact hash-key match
    pub fn is_equality(&self) -> bool {
        matches!(self, ConditionOp::Eq)
    }

    /// Returns true if a range key may be constrained with this operator
    /// in a key condition (anything else must be applied as a filter)
    pub fn is_key_condition(&self) -> bool {
        matches!(
            self,
            ConditionOp::Eq
                | ConditionOp::Gt
                | ConditionOp::Gte
                | ConditionOp::Lt
                | ConditionOp::Lte
                | ConditionOp::Between
                | ConditionOp::BeginsWith
        )
    }
}

impl fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConditionOp {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        ConditionOp::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == token)
            .ok_or(())
    }
}

/// A single query condition: field + operator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Attribute name
    pub field: String,
    /// Comparison operator
    pub op: ConditionOp,
    /// True when the raw key carried an operator suffix
    #[serde(default)]
    pub suffixed: bool,
}

impl Condition {
    /// Create a condition with the given operator.
    ///
    /// `Eq` is the bare-key form; every other operator is suffixed.
    pub fn new(field: impl Into<String>, op: ConditionOp) -> Self {
        Self {
            field: field.into(),
            op,
            suffixed: op != ConditionOp::Eq,
        }
    }

    /// Create a plain equality condition (bare key)
    pub fn eq(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Eq)
    }

    /// Create an equality condition written with the `.eq` suffix
    pub fn suffixed_eq(field: impl Into<String>) -> Self {
        Self {
            suffixed: true,
            ..Self::eq(field)
        }
    }

    /// Create a not-equal condition
    pub fn ne(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Ne)
    }

    /// Create a greater-than condition
    pub fn gt(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Gt)
    }

    /// Create a greater-or-equal condition
    pub fn gte(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Gte)
    }

    /// Create a less-than condition
    pub fn lt(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Lt)
    }

    /// Create a less-or-equal condition
    pub fn lte(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Lte)
    }

    /// Create a between condition
    pub fn between(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Between)
    }

    /// Create a prefix condition
    pub fn begins_with(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::BeginsWith)
    }

    /// Create a contains condition
    pub fn contains(field: impl Into<String>) -> Self {
        Self::new(field, ConditionOp::Contains)
    }

    /// Parses a raw condition key.
    ///
    /// The key is split on the first separator: `"age"` is a plain
    /// equality on `age`, `"age.gt"` is a greater-than condition. Anything
    /// after the first separator must be a known operator token.
    ///
    /// `"age.eq"` keeps its suffix: it compares for equality but is not a
    /// plain equality and cannot drive a hash key.
    pub fn parse_key(key: &str) -> PredicateResult<Self> {
        let condition = match key.split_once(OPERATOR_SEPARATOR) {
            None => Self::eq(key),
            Some((field, token)) => {
                let op = token
                    .parse::<ConditionOp>()
                    .map_err(|_| PredicateError::UnknownOperator {
                        key: key.to_string(),
                        operator: token.to_string(),
                    })?;
                Self {
                    field: field.to_string(),
                    op,
                    suffixed: true,
                }
            }
        };

        if condition.field.is_empty() {
            return Err(PredicateError::EmptyField(key.to_string()));
        }

        Ok(condition)
    }

    /// Returns the key form of this condition (`"age"` or `"age.gt"`)
    pub fn to_key(&self) -> String {
        if self.suffixed {
            format!("{}{}{}", self.field, OPERATOR_SEPARATOR, self.op.as_str())
        } else {
            self.field.clone()
        }
    }

    /// Returns true if this is a plain (bare-key) equality condition
    pub fn is_equality(&self) -> bool {
        self.op.is_equality() && !self.suffixed
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.op)
    }
}
