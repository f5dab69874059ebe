use crate::{
    db::{SerializeError, StoreError},
    fileio::FileError,
    json::ParseError,
    traits::ArgsError,
    validate::ValidationError,
    value::CoercionError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level convergence point. Each concern keeps its own enum; this is
/// what crosses the public boundary.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
