use std::fmt;

///
/// FieldKind
///
/// Value shape a field carries at runtime.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum FieldKind {
    Bool,
    Char,
    Enum { variants: &'static [&'static str] },
    Float32,
    Float64,
    Int32,
    Int64,
    List(&'static FieldKind),
    Ref { target: &'static str },
    Text,
    Timestamp,
}

impl FieldKind {
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Enum { .. } => "enum",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::List(_) => "list",
            Self::Ref { .. } => "ref",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

///
/// FieldScope
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldScope {
    /// One value per instance.
    Instance,
    /// One value per type, held by the store.
    Shared,
}

///
/// Arg
///
/// Const-friendly literal used for shared-field defaults.
///

#[derive(Clone, Copy, Debug, PartialEq)]
#[remain::sorted]
pub enum Arg {
    Bool(bool),
    Char(char),
    Float(f64),
    Int(i64),
    Str(&'static str),
}

impl Arg {
    /// Whether this literal can seed a field of the given kind. Integer
    /// literals seed floats and timestamps, strings seed enums.
    #[must_use]
    pub const fn fits(self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Bool(_), FieldKind::Bool)
                | (Self::Char(_), FieldKind::Char)
                | (Self::Float(_), FieldKind::Float32 | FieldKind::Float64)
                | (
                    Self::Int(_),
                    FieldKind::Int32
                        | FieldKind::Int64
                        | FieldKind::Float32
                        | FieldKind::Float64
                        | FieldKind::Timestamp
                )
                | (Self::Str(_), FieldKind::Text | FieldKind::Enum { .. })
        )
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates() {
        assert!(FieldKind::Int32.is_integer());
        assert!(FieldKind::Int64.is_numeric());
        assert!(FieldKind::Float32.is_float());
        assert!(!FieldKind::Text.is_numeric());
        assert!(!FieldKind::Timestamp.is_numeric());
    }

    #[test]
    fn arg_fit() {
        assert!(Arg::Int(5).fits(FieldKind::Int32));
        assert!(Arg::Int(5).fits(FieldKind::Float64));
        assert!(Arg::Int(5).fits(FieldKind::Timestamp));
        assert!(Arg::Str("a").fits(FieldKind::Enum { variants: &["a"] }));
        assert!(!Arg::Str("a").fits(FieldKind::Int32));
        assert!(!Arg::Float(1.0).fits(FieldKind::Int64));
    }
}
