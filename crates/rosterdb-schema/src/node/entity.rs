use crate::node::{CtorParam, FieldList, FieldModel};

///
/// EntityModel
///
/// Static description of one entity type: snapshot identity, the ordered
/// field list (own fields first, ancestor fields after), and the designated
/// constructor binding used when records are rebuilt from a snapshot.
///

#[derive(Clone, Copy, Debug)]
pub struct EntityModel {
    pub path: &'static str,
    pub snapshot: bool,
    pub fields: FieldList,
    pub ctor: &'static [CtorParam],
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.get(name)
    }

    /// The field marking this type's identity registry, if any.
    #[must_use]
    pub fn registry_field(&self) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.registry)
    }

    /// Last segment of the path.
    #[must_use]
    pub fn entity_name(&self) -> &'static str {
        self.path.rsplit(['.', ':']).next().unwrap_or(self.path)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    const MODEL: EntityModel = EntityModel {
        path: "demo.club.Member",
        snapshot: true,
        fields: FieldList::new(&[
            FieldModel::new("name", FieldKind::Text),
            FieldModel::new("all", FieldKind::List(&FieldKind::Ref {
                target: "demo.club.Member",
            }))
            .registry_list(),
        ]),
        ctor: &[CtorParam::required("name")],
    };

    #[test]
    fn name_is_last_path_segment() {
        assert_eq!(MODEL.entity_name(), "Member");
    }

    #[test]
    fn registry_field_found() {
        assert_eq!(MODEL.registry_field().unwrap().name, "all");
        assert!(MODEL.field("name").is_some());
    }
}
