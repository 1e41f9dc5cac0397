mod capability;
pub use capability::{Capability, IsolationLevel};

mod connection;
pub use connection::{Connection, Statement};

mod rows;
pub use rows::{Row, Rows};
