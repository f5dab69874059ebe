use crate::{
    node::Constraint,
    types::{Arg, FieldKind, FieldScope},
};

///
/// FieldList
///

#[derive(Clone, Copy, Debug)]
pub struct FieldList {
    pub fields: &'static [FieldModel],
}

impl FieldList {
    #[must_use]
    pub const fn new(fields: &'static [FieldModel]) -> Self {
        Self { fields }
    }

    // get
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields.iter()
    }

    /// Fields carried by each instance.
    pub fn instance(&self) -> impl Iterator<Item = &FieldModel> {
        self.iter().filter(|f| f.is_instance())
    }

    /// Fields shared across the whole type.
    pub fn shared(&self) -> impl Iterator<Item = &FieldModel> {
        self.iter().filter(|f| f.is_shared())
    }
}

///
/// FieldModel
///

#[derive(Clone, Copy, Debug)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
    pub scope: FieldScope,
    pub registry: bool,
    pub transient: bool,
    pub constraints: &'static [Constraint],
    pub default: Option<Arg>,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            scope: FieldScope::Instance,
            registry: false,
            transient: false,
            constraints: &[],
            default: None,
        }
    }

    /// Attach the ordered rule list.
    #[must_use]
    pub const fn rules(mut self, constraints: &'static [Constraint]) -> Self {
        self.constraints = constraints;
        self
    }

    /// Move the field to type scope.
    #[must_use]
    pub const fn shared(mut self) -> Self {
        self.scope = FieldScope::Shared;
        self
    }

    /// Mark the field as the type's identity registry. Registry fields are
    /// always type-scoped and never written to snapshots.
    #[must_use]
    pub const fn registry_list(mut self) -> Self {
        self.registry = true;
        self.scope = FieldScope::Shared;
        self
    }

    /// Exclude the field from snapshot output.
    #[must_use]
    pub const fn skip_output(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Seed value applied to a shared field at registration.
    #[must_use]
    pub const fn default_value(mut self, arg: Arg) -> Self {
        self.default = Some(arg);
        self
    }

    #[must_use]
    pub const fn is_instance(&self) -> bool {
        matches!(self.scope, FieldScope::Instance)
    }

    #[must_use]
    pub const fn is_shared(&self) -> bool {
        matches!(self.scope, FieldScope::Shared)
    }

    /// Included in a snapshot's static or object blocks.
    #[must_use]
    pub const fn in_snapshot(&self) -> bool {
        !self.registry && !self.transient
    }
}

///
/// TESTS
///
