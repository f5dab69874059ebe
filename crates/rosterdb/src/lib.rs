//! RosterDB: a schema-driven validation and flat-JSON persistence runtime
//! for in-memory entity rosters.
//!
//! ## Crate layout
//! - `core`: value model, JSON codec, validation engine, store, snapshot
//!   save/load, and file I/O.
//! - `schema`: static entity/field/constraint models and schema validation.
//!
//! The `prelude` module carries the vocabulary a domain crate needs to
//! declare entities and drive the store.

pub use rosterdb_core as core;
pub use rosterdb_schema as schema;

pub use rosterdb_core::Error;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            db::{Catalog, Roster, Store, WriteOptions, load, load_str, save, save_to_string},
            fileio::{read_json, write_json},
            traits::{Args, ArgsError, EntityKind, FieldValues, Path},
            types::Timestamp,
            value::Value,
        },
        schema::{
            node::{Constraint, CtorParam, EntityModel, FieldList, FieldModel},
            types::{Arg, FieldKind, FieldScope},
        },
    };
}
