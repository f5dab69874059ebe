//! Core runtime for RosterDB: the value model, the hand-written JSON codec,
//! the fail-fast validation engine, per-type rosters behind an explicit
//! store, and flat snapshot save/load with per-record failure isolation.

pub mod db;
pub mod error;
pub mod fileio;
pub mod json;
pub mod traits;
pub mod types;
pub mod validate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// Prelude
///
/// Domain vocabulary only; errors and helpers stay one level down.
///

pub mod prelude {
    pub use crate::{
        db::{Catalog, Roster, Store, WriteOptions},
        traits::{Args, EntityKind, FieldValues, Path},
        types::Timestamp,
        value::Value,
    };
}
