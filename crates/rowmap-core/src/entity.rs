use crate::{schema::EntityDef, stmt::Value, Result};

use std::any::Any;
use std::fmt;

/// Object-safe surface of a mapped type.
///
/// Key resolution and materialization walk runtime values through this
/// trait; there is no reflection. `get` returns `Value::Null` for an unset
/// field, `set` rejects unknown field names with a materialization error.
pub trait Entity: fmt::Debug + Send + 'static {
    /// The entity's declarative schema, built once per type.
    fn def(&self) -> &'static EntityDef;

    /// Reads a field by its declared (not column) name.
    fn get(&self, field: &str) -> Value;

    /// Assigns a field by its declared name.
    fn set(&mut self, field: &str, value: Value) -> Result<()>;

    fn clone_box(&self) -> Box<dyn Entity>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Static half of the entity contract.
///
/// `Default` is the zero-argument construction capability required of any
/// type the materializer can instantiate.
pub trait Mapped: Entity + Default + Clone + Sized {
    fn entity_def() -> &'static EntityDef;
}

impl Clone for Box<dyn Entity> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A link from a field declaration to another mapped type: its schema plus
/// its zero-argument constructor.
#[derive(Clone, Copy)]
pub struct EntityRef {
    def: fn() -> &'static EntityDef,
    new_instance: fn() -> Box<dyn Entity>,
}

impl EntityRef {
    pub fn of<T: Mapped>() -> Self {
        Self {
            def: T::entity_def,
            new_instance: new_boxed::<T>,
        }
    }

    pub fn def(&self) -> &'static EntityDef {
        (self.def)()
    }

    /// Constructs a fresh, empty instance of the referenced type.
    pub fn new_instance(&self) -> Box<dyn Entity> {
        (self.new_instance)()
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({})", self.def().name())
    }
}

fn new_boxed<T: Mapped>() -> Box<dyn Entity> {
    Box::new(T::default())
}

/// Field-for-field equality over two runtime entities.
///
/// Entities of different declared types are never equal.
pub fn entity_eq(a: &dyn Entity, b: &dyn Entity) -> bool {
    let def = a.def();
    if !std::ptr::eq(def, b.def()) {
        return false;
    }
    def.fields()
        .iter()
        .all(|field| a.get(field.name()) == b.get(field.name()))
}
