pub mod driver;
pub use driver::Connection;

mod entity;
pub use entity::{entity_eq, Entity, EntityRef, Mapped};

mod error;
pub use error::Error;

pub mod schema;
pub use schema::EntityDef;

pub mod stmt;

/// A Result type alias that uses rowmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
