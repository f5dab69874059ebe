mod constraint;
mod ctor;
mod entity;
mod field;

pub use constraint::*;
pub use ctor::*;
pub use entity::*;
pub use field::*;
