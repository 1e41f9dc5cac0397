pub mod mapper;
pub use mapper::{DeleteMapper, InsertionMapper, QueryMapper, UpdateMapper};

mod materialize;

pub use rowmap_core::{
    driver::{self, Capability, Connection, IsolationLevel, Row, Rows, Statement},
    entity_eq, schema, stmt, Entity, EntityDef, EntityRef, Error, Mapped, Result,
};
