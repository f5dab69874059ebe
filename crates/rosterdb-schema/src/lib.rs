pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for entity model paths.
pub const MAX_ENTITY_PATH_LEN: usize = 192;

/// Maximum length for field model identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::validate::SchemaError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        node::{Constraint, CtorParam, EntityModel, FieldList, FieldModel},
        types::{Arg, FieldKind, FieldScope},
        validate::validate_model,
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    SchemaError(#[from] SchemaError),
}
