use super::{Capability, IsolationLevel, Rows};
use crate::{async_trait, stmt::Value, Result};

use std::fmt::Debug;

/// The external database connection the mappers ride on.
///
/// The core never opens or closes connections; it prepares statements,
/// binds parameters, and executes them strictly sequentially on whatever it
/// is handed. Failures surface as statement errors wrapping the driver's
/// message.
#[async_trait]
pub trait Connection: Debug + Send + Sync {
    /// Describes the connected database's capability, including which
    /// isolation levels it supports.
    fn capability(&self) -> &Capability;

    /// The currently configured isolation level.
    fn isolation(&self) -> IsolationLevel;

    /// Configures the transaction isolation level.
    ///
    /// Callers are expected to have checked [`Capability::supports_isolation`]
    /// first; mappers apply levels best-effort and never call this with an
    /// unsupported one.
    async fn set_isolation(&self, level: IsolationLevel) -> Result<()>;

    /// Prepares a parameterized statement.
    async fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>>;
}

/// A prepared statement: bind, then execute or query.
#[async_trait]
pub trait Statement: Send {
    /// Binds positional parameters, in placeholder order.
    fn bind(&mut self, params: &[Value]) -> Result<()>;

    /// Executes a write, returning the number of affected rows.
    async fn execute(&mut self) -> Result<u64>;

    /// Executes a read, returning the result set.
    async fn query(&mut self) -> Result<Rows>;
}
