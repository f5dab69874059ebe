use crate::{types::Timestamp, value::Value};
use rosterdb_schema::node::EntityModel;
use thiserror::Error as ThisError;

///
/// Path
///

pub trait Path {
    const PATH: &'static str;
}

///
/// FieldValues
///
/// Projects instance-scope fields by schema name. Shared fields live in the
/// store, not on the instance.
///

pub trait FieldValues {
    fn field_value(&self, name: &str) -> Option<Value>;
}

///
/// EntityKind
///
/// A schema-registered entity: its model, its designated constructor, and
/// the derived-field pass that runs after validation succeeds.
///

pub trait EntityKind: Path + FieldValues + PartialEq + Sized + 'static {
    const MODEL: &'static EntityModel;

    /// Build a candidate from positional coerced values matching
    /// `MODEL.ctor` order. The candidate is not yet validated.
    fn construct(args: &Args) -> Result<Self, ArgsError>;

    /// Fill in derived fields. Runs only on a validated instance.
    fn init_derived(&mut self) {}
}

///
/// ArgsError
///

#[derive(Debug, ThisError, PartialEq)]
#[remain::sorted]
pub enum ArgsError {
    #[error("argument {index} is missing")]
    Missing { index: usize },

    #[error("argument {index} is null")]
    Null { index: usize },

    #[error("argument {index}: expected {expected}, found {found}")]
    WrongKind {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

///
/// Args
///
/// Positional constructor arguments, already coerced to the bound fields'
/// kinds. Takers enforce the kind a constructor expects; the `opt_` forms
/// pass null through as `None`.
///

#[derive(Clone, Debug, Default)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, index: usize) -> Result<&Value, ArgsError> {
        self.values.get(index).ok_or(ArgsError::Missing { index })
    }

    fn non_null(&self, index: usize) -> Result<&Value, ArgsError> {
        let value = self.get(index)?;
        if value.is_null() {
            return Err(ArgsError::Null { index });
        }

        Ok(value)
    }

    const fn wrong(index: usize, expected: &'static str, found: &Value) -> ArgsError {
        ArgsError::WrongKind {
            index,
            expected,
            found: found.kind_name(),
        }
    }

    pub fn text(&self, index: usize) -> Result<String, ArgsError> {
        match self.non_null(index)? {
            Value::Text(s) => Ok(s.clone()),
            other => Err(Self::wrong(index, "text", other)),
        }
    }

    pub fn opt_text(&self, index: usize) -> Result<Option<String>, ArgsError> {
        match self.get(index)? {
            value if value.is_null() => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(Self::wrong(index, "text", other)),
        }
    }

    pub fn int(&self, index: usize) -> Result<i32, ArgsError> {
        match self.non_null(index)? {
            Value::Int(n) => {
                i32::try_from(*n).map_err(|_| Self::wrong(index, "int32", &Value::Int(*n)))
            }
            other => Err(Self::wrong(index, "int32", other)),
        }
    }

    pub fn long(&self, index: usize) -> Result<i64, ArgsError> {
        match self.non_null(index)? {
            Value::Int(n) => Ok(*n),
            other => Err(Self::wrong(index, "int64", other)),
        }
    }

    pub fn opt_long(&self, index: usize) -> Result<Option<i64>, ArgsError> {
        match self.get(index)? {
            value if value.is_null() => Ok(None),
            Value::Int(n) => Ok(Some(*n)),
            other => Err(Self::wrong(index, "int64", other)),
        }
    }

    pub fn float(&self, index: usize) -> Result<f64, ArgsError> {
        match self.non_null(index)? {
            Value::Float(f) => Ok(*f),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(n) => Ok(*n as f64),
            other => Err(Self::wrong(index, "float", other)),
        }
    }

    pub fn opt_float(&self, index: usize) -> Result<Option<f64>, ArgsError> {
        match self.get(index)? {
            value if value.is_null() => Ok(None),
            _ => self.float(index).map(Some),
        }
    }

    pub fn boolean(&self, index: usize) -> Result<bool, ArgsError> {
        match self.non_null(index)? {
            Value::Bool(b) => Ok(*b),
            other => Err(Self::wrong(index, "bool", other)),
        }
    }

    pub fn character(&self, index: usize) -> Result<char, ArgsError> {
        match self.non_null(index)? {
            Value::Char(c) => Ok(*c),
            other => Err(Self::wrong(index, "char", other)),
        }
    }

    pub fn variant(&self, index: usize) -> Result<String, ArgsError> {
        match self.non_null(index)? {
            Value::Enum(s) => Ok(s.clone()),
            other => Err(Self::wrong(index, "enum", other)),
        }
    }

    pub fn timestamp(&self, index: usize) -> Result<Timestamp, ArgsError> {
        match self.non_null(index)? {
            Value::Timestamp(ts) => Ok(*ts),
            other => Err(Self::wrong(index, "timestamp", other)),
        }
    }

    pub fn opt_timestamp(&self, index: usize) -> Result<Option<Timestamp>, ArgsError> {
        match self.get(index)? {
            value if value.is_null() => Ok(None),
            Value::Timestamp(ts) => Ok(Some(*ts)),
            other => Err(Self::wrong(index, "timestamp", other)),
        }
    }

    pub fn list(&self, index: usize) -> Result<Vec<Value>, ArgsError> {
        match self.non_null(index)? {
            Value::List(items) => Ok(items.clone()),
            other => Err(Self::wrong(index, "list", other)),
        }
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args::new(vec![
            Value::Text("alice".into()),
            Value::Int(42),
            Value::Null,
            Value::Timestamp(Timestamp::from_seconds(10)),
        ])
    }

    #[test]
    fn typed_takers() {
        let args = args();

        assert_eq!(args.text(0).unwrap(), "alice");
        assert_eq!(args.long(1).unwrap(), 42);
        assert_eq!(args.int(1).unwrap(), 42);
        assert_eq!(args.float(1).unwrap(), 42.0);
        assert_eq!(args.timestamp(3).unwrap().get(), 10);
    }

    #[test]
    fn null_and_missing_are_distinct() {
        let args = args();

        assert_eq!(args.text(2), Err(ArgsError::Null { index: 2 }));
        assert_eq!(args.opt_text(2).unwrap(), None);
        assert_eq!(args.text(9), Err(ArgsError::Missing { index: 9 }));
    }

    #[test]
    fn kind_mismatch_reports_both_sides() {
        let args = args();

        assert_eq!(
            args.long(0),
            Err(ArgsError::WrongKind {
                index: 0,
                expected: "int64",
                found: "text",
            })
        );
    }

    #[test]
    fn opt_takers_pass_values_through() {
        let args = args();

        assert_eq!(args.opt_text(0).unwrap(), Some("alice".into()));
        assert_eq!(args.opt_long(1).unwrap(), Some(42));
        assert_eq!(args.opt_timestamp(2).unwrap(), None);
    }
}
