//! Hand-registered fixture entities exercising every field kind and
//! constraint the engine knows about.

use crate::{
    traits::{Args, ArgsError, EntityKind, FieldValues, Path},
    types::Timestamp,
    value::Value,
};
use rosterdb_schema::prelude::*;

///
/// Member
///
/// The kitchen-sink fixture: text, numeric, derived, temporal, either-or,
/// transient, and shared fields.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: String,
    pub score: i64,
    pub rank: f64,
    pub joined: Option<Timestamp>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub token: String,
}

impl Member {
    /// A valid candidate with sensible defaults.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 50,
            rank: 0.0,
            joined: None,
            email: Some("member@example.com".to_string()),
            phone: None,
            token: String::new(),
        }
    }

    /// `named`, with the derived pass already applied. Matches what the
    /// store holds after a successful create.
    pub fn named_derived(name: &str) -> Self {
        let mut member = Self::named(name);
        member.init_derived();

        member
    }

    /// Constructor args in `MODEL.ctor` order.
    pub fn args(name: &str, score: i64) -> Args {
        Args::new(vec![
            Value::Text(name.to_string()),
            Value::Int(score),
            Value::Null,
            Value::Text("member@example.com".to_string()),
            Value::Null,
        ])
    }
}

impl Path for Member {
    const PATH: &'static str = "demo.club.Member";
}

impl FieldValues for Member {
    fn field_value(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::Text(self.name.clone())),
            "score" => Some(Value::Int(self.score)),
            "rank" => Some(Value::Float(self.rank)),
            "joined" => Some(self.joined.map_or(Value::Null, Value::Timestamp)),
            "email" => Some(Value::from(self.email.clone())),
            "phone" => Some(Value::from(self.phone.clone())),
            "token" => Some(Value::Text(self.token.clone())),
            _ => None,
        }
    }
}

impl EntityKind for Member {
    const MODEL: &'static EntityModel = &EntityModel {
        path: Self::PATH,
        snapshot: true,
        fields: FieldList::new(&[
            FieldModel::new("name", FieldKind::Text).rules(&[
                Constraint::Required,
                Constraint::NonBlank,
                Constraint::Unique,
            ]),
            FieldModel::new("score", FieldKind::Int64).rules(&[Constraint::Range {
                min: Some(0.0),
                max: Some(100.0),
            }]),
            FieldModel::new("rank", FieldKind::Float64).rules(&[Constraint::Derived]),
            FieldModel::new("joined", FieldKind::Timestamp).rules(&[Constraint::NotFuture]),
            FieldModel::new("email", FieldKind::Text)
                .rules(&[Constraint::EitherOr { other: "phone" }]),
            FieldModel::new("phone", FieldKind::Text)
                .rules(&[Constraint::EitherOr { other: "email" }]),
            FieldModel::new("token", FieldKind::Text).skip_output(),
            FieldModel::new("fee", FieldKind::Float64)
                .shared()
                .default_value(Arg::Float(30.0)),
            FieldModel::new("all", FieldKind::List(&FieldKind::Ref {
                target: "demo.club.Member",
            }))
            .registry_list(),
        ]),
        ctor: &[
            CtorParam::required("name"),
            CtorParam::required("score"),
            CtorParam::optional("joined"),
            CtorParam::optional("email"),
            CtorParam::optional("phone"),
        ],
    };

    fn construct(args: &Args) -> Result<Self, ArgsError> {
        Ok(Self {
            name: args.text(0)?,
            score: args.long(1)?,
            rank: 0.0,
            joined: args.opt_timestamp(2)?,
            email: args.opt_text(3)?,
            phone: args.opt_text(4)?,
            token: String::new(),
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn init_derived(&mut self) {
        self.rank = self.score as f64 / 10.0;
    }
}

///
/// Gear
///
/// Enum, char, and bool coverage.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Gear {
    pub label: Option<String>,
    pub slot: String,
    pub grade: char,
    pub active: bool,
}

impl Gear {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            slot: "head".to_string(),
            grade: 'a',
            active: false,
        }
    }
}

impl Path for Gear {
    const PATH: &'static str = "demo.club.Gear";
}

impl FieldValues for Gear {
    fn field_value(&self, name: &str) -> Option<Value> {
        match name {
            "label" => Some(Value::from(self.label.clone())),
            "slot" => Some(Value::Enum(self.slot.clone())),
            "grade" => Some(Value::Char(self.grade)),
            "active" => Some(Value::Bool(self.active)),
            _ => None,
        }
    }
}

impl EntityKind for Gear {
    const MODEL: &'static EntityModel = &EntityModel {
        path: Self::PATH,
        snapshot: true,
        fields: FieldList::new(&[
            FieldModel::new("label", FieldKind::Text)
                .rules(&[Constraint::Required, Constraint::NonBlank]),
            FieldModel::new("slot", FieldKind::Enum {
                variants: &["head", "body"],
            })
            .rules(&[Constraint::Required]),
            FieldModel::new("grade", FieldKind::Char),
            FieldModel::new("active", FieldKind::Bool),
            FieldModel::new("all", FieldKind::List(&FieldKind::Ref {
                target: "demo.club.Gear",
            }))
            .registry_list(),
        ]),
        ctor: &[
            CtorParam::required("label"),
            CtorParam::required("slot"),
            CtorParam::required("grade"),
            CtorParam::required("active"),
        ],
    };

    fn construct(args: &Args) -> Result<Self, ArgsError> {
        Ok(Self {
            label: Some(args.text(0)?),
            slot: args.variant(1)?,
            grade: args.character(2)?,
            active: args.boolean(3)?,
        })
    }
}

///
/// Unmarked
///
/// Valid schema, but not marked for snapshots.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Unmarked {
    pub tag: String,
}

impl Unmarked {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
        }
    }
}

impl Path for Unmarked {
    const PATH: &'static str = "demo.club.Unmarked";
}

impl FieldValues for Unmarked {
    fn field_value(&self, name: &str) -> Option<Value> {
        match name {
            "tag" => Some(Value::Text(self.tag.clone())),
            _ => None,
        }
    }
}

impl EntityKind for Unmarked {
    const MODEL: &'static EntityModel = &EntityModel {
        path: Self::PATH,
        snapshot: false,
        fields: FieldList::new(&[
            FieldModel::new("tag", FieldKind::Text).rules(&[Constraint::Required]),
            FieldModel::new("all", FieldKind::List(&FieldKind::Ref {
                target: "demo.club.Unmarked",
            }))
            .registry_list(),
        ]),
        ctor: &[CtorParam::required("tag")],
    };

    fn construct(args: &Args) -> Result<Self, ArgsError> {
        Ok(Self { tag: args.text(0)? })
    }
}

///
/// Glitch
///
/// Structurally broken on purpose: the registry field is not a list of
/// self-references, so registration must refuse it.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Glitch;

impl Path for Glitch {
    const PATH: &'static str = "demo.club.Glitch";
}

impl FieldValues for Glitch {
    fn field_value(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl EntityKind for Glitch {
    const MODEL: &'static EntityModel = &EntityModel {
        path: Self::PATH,
        snapshot: true,
        fields: FieldList::new(&[
            FieldModel::new("all", FieldKind::List(&FieldKind::Text)).registry_list(),
        ]),
        ctor: &[],
    };

    fn construct(_args: &Args) -> Result<Self, ArgsError> {
        Ok(Self)
    }
}
