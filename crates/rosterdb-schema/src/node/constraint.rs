use std::fmt;

///
/// Constraint
///
/// Declarative rule attached to a field model. Rules on a field are
/// evaluated in declared order and the first violation stops the check.
///

#[derive(Clone, Copy, Debug, PartialEq)]
#[remain::sorted]
pub enum Constraint {
    /// Value must still be the kind's zero sentinel when the instance is
    /// checked. Derived fields are filled in afterwards.
    Derived,

    /// Fails only when this field and the named counterpart are both null.
    EitherOr { other: &'static str },

    /// Text must contain at least one non-whitespace character.
    NonBlank,

    /// Collection must hold at least one element.
    NonEmpty,

    /// Timestamp must not be later than the store's current reading.
    NotFuture,

    /// Numeric value must lie inside the inclusive bounds. An open end
    /// is unbounded.
    Range { min: Option<f64>, max: Option<f64> },

    /// Value must not be null.
    Required,

    /// Trimmed, case-insensitive text form must not collide with any live
    /// peer of the same type.
    Unique,
}

impl Constraint {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::EitherOr { .. } => "either_or",
            Self::NonBlank => "non_blank",
            Self::NonEmpty => "non_empty",
            Self::NotFuture => "not_future",
            Self::Range { .. } => "range",
            Self::Required => "required",
            Self::Unique => "unique",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
