///
/// CtorParam
///
/// One designated-constructor argument: the key looked up in a snapshot
/// object and the field whose kind drives coercion. A null value for a
/// non-nullable param rejects the whole record.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CtorParam {
    pub param: &'static str,
    pub field: &'static str,
    pub nullable: bool,
}

impl CtorParam {
    /// Param keyed and bound by the same name, rejecting null.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            param: name,
            field: name,
            nullable: false,
        }
    }

    /// Param keyed and bound by the same name, accepting null.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            param: name,
            field: name,
            nullable: true,
        }
    }

    #[must_use]
    pub const fn bound(param: &'static str, field: &'static str, nullable: bool) -> Self {
        Self {
            param,
            field,
            nullable,
        }
    }
}
