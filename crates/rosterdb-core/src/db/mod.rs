pub mod catalog;
pub mod load;
pub mod roster;
pub mod save;
pub mod store;

pub use catalog::{Catalog, TypeHandle};
pub use load::{LoadIssue, LoadReport, load, load_str};
pub use roster::Roster;
pub use save::{SerializeError, WriteOptions, save, save_to_string};
pub use store::{Store, StoreError};
