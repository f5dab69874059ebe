pub mod coerce;

pub use coerce::{CoercionError, coerce};

use crate::{
    json::Json,
    types::Timestamp,
};
use rosterdb_schema::types::Arg;
use std::fmt;

///
/// Value
///
/// Field projection entities expose to the engine. One variant per field
/// kind, plus `Null`. A set reference projects as an entity-supplied display
/// label; an unset one is `Ref(None)`, which counts as null.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    Float(f64),
    Text(String),
    Enum(String),
    Timestamp(Timestamp),
    List(Vec<Value>),
    Ref(Option<String>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Ref(None))
    }

    /// Whether the value is still its kind's zero/empty sentinel. Derived
    /// fields must read as a sentinel until the entity fills them in.
    #[must_use]
    pub fn is_zero_sentinel(&self) -> bool {
        match self {
            Self::Null | Self::Ref(None) => true,
            Self::Bool(b) => !b,
            Self::Char(c) => *c == '\0',
            Self::Int(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            Self::Text(s) | Self::Enum(s) => s.is_empty(),
            Self::Timestamp(ts) => *ts == Timestamp::EPOCH,
            Self::List(items) => items.is_empty(),
            Self::Ref(Some(_)) => false,
        }
    }

    /// Numeric view used by range checks.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Int(n) => {
                #[allow(clippy::cast_precision_loss)]
                Some(*n as f64)
            }
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Natural text form, shared by the coercion matrix and diagnostics.
    /// Null-like values have none.
    #[must_use]
    pub fn canonical_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Ref(None) | Self::List(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Char(c) => Some(c.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(format!("{f:?}")),
            Self::Text(s) | Self::Enum(s) | Self::Ref(Some(s)) => Some(s.clone()),
            Self::Timestamp(ts) => Some(ts.to_rfc3339()),
        }
    }

    /// Trimmed, lowercased text form used by uniqueness scans.
    #[must_use]
    pub fn folded_text(&self) -> Option<String> {
        self.canonical_text().map(|s| s.trim().to_lowercase())
    }

    /// Snapshot rendering. Flat by design: a set reference renders as its
    /// label, never as a nested body.
    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null | Self::Ref(None) => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Char(c) => Json::Str(c.to_string()),
            Self::Int(n) => Json::Int(*n),
            Self::Float(f) => Json::Float(*f),
            Self::Text(s) | Self::Enum(s) | Self::Ref(Some(s)) => Json::Str(s.clone()),
            Self::Timestamp(ts) => Json::Str(ts.to_rfc3339()),
            Self::List(items) => Json::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    /// Seed a value from a schema default literal.
    #[must_use]
    pub fn from_arg(arg: Arg) -> Self {
        match arg {
            Arg::Bool(b) => Self::Bool(b),
            Arg::Char(c) => Self::Char(c),
            Arg::Float(f) => Self::Float(f),
            Arg::Int(n) => Self::Int(n),
            Arg::Str(s) => Self::Text(s.to_string()),
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Enum(_) => "enum",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
            Self::Ref(_) => "ref",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "{}", self.kind_name()),
        }
    }
}

impl From<Option<String>> for Value {
    fn from(opt: Option<String>) -> Self {
        opt.map_or(Self::Null, Self::Text)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_includes_unset_ref() {
        assert!(Value::Null.is_null());
        assert!(Value::Ref(None).is_null());
        assert!(!Value::Ref(Some("x".into())).is_null());
        assert!(!Value::Text(String::new()).is_null());
    }

    #[test]
    fn zero_sentinels() {
        assert!(Value::Null.is_zero_sentinel());
        assert!(Value::Int(0).is_zero_sentinel());
        assert!(Value::Float(0.0).is_zero_sentinel());
        assert!(Value::Text(String::new()).is_zero_sentinel());
        assert!(Value::Bool(false).is_zero_sentinel());
        assert!(Value::Char('\0').is_zero_sentinel());
        assert!(Value::Timestamp(Timestamp::EPOCH).is_zero_sentinel());
        assert!(Value::List(vec![]).is_zero_sentinel());

        assert!(!Value::Int(3).is_zero_sentinel());
        assert!(!Value::Text("x".into()).is_zero_sentinel());
        assert!(!Value::Ref(Some("x".into())).is_zero_sentinel());
    }

    #[test]
    fn folded_text_trims_and_lowercases() {
        assert_eq!(Value::Text("  Alice ".into()).folded_text().unwrap(), "alice");
        assert_eq!(Value::Int(42).folded_text().unwrap(), "42");
        assert!(Value::Null.folded_text().is_none());
    }

    #[test]
    fn numeric_views() {
        assert_eq!(Value::Int(5).as_numeric(), Some(5.0));
        assert_eq!(Value::Float(2.5).as_numeric(), Some(2.5));
        assert_eq!(Value::Text("5".into()).as_numeric(), None);
        assert_eq!(Value::Null.as_numeric(), None);
    }

    #[test]
    fn json_rendering_is_flat() {
        assert_eq!(Value::Ref(Some("shop-1".into())).to_json(), Json::Str("shop-1".into()));
        assert_eq!(Value::Ref(None).to_json(), Json::Null);
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Null]).to_json(),
            Json::Array(vec![Json::Int(1), Json::Null])
        );
        assert_eq!(
            Value::Timestamp(Timestamp::from_seconds(0)).to_json(),
            Json::Str("1970-01-01T00:00:00Z".into())
        );
    }

    #[test]
    fn from_arg_seeds() {
        assert_eq!(Value::from_arg(Arg::Float(30.0)), Value::Float(30.0));
        assert_eq!(Value::from_arg(Arg::Str("open")), Value::Text("open".into()));
    }
}
