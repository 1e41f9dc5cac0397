mod serializer;
pub use serializer::{delete, insert, select_by_key, update, Params, Placeholder};
