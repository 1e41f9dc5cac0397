use super::{fmt::ToSql, Formatter};

use rowmap_core::stmt::Value;

/// Sink that receives statement parameters as the serializer emits
/// placeholders for them.
pub trait Params {
    /// Stores `param` and returns the placeholder standing in for it.
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// A bound-parameter slot in the serialized statement, numbered from zero in
/// bind order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, param: &Value) -> Placeholder {
        let placeholder = Placeholder(self.len());
        self.push(param.clone());
        placeholder
    }
}

impl ToSql for Placeholder {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str("?");
    }
}
