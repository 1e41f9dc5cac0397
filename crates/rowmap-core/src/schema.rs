mod entity;
pub use entity::{EntityDef, EntityDefBuilder};

mod field;
pub use field::{FieldDef, FieldTy, FkPair, FkTarget, ForeignKeyDef};

pub mod key;
