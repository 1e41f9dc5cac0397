//! The CRUD mapper family.
//!
//! Every mapper is a builder over a borrowed [`Connection`] and is consumed
//! by the call that executes it. Write mappers accumulate instances in a
//! pending pool and run one statement per instance, in pool order; a failure
//! aborts the remainder of the pool and already-executed statements stand.

mod delete;
pub use delete::DeleteMapper;

mod insertion;
pub use insertion::InsertionMapper;

mod query;
pub use query::QueryMapper;

mod update;
pub use update::UpdateMapper;

use rowmap_core::driver::{Connection, IsolationLevel, Rows};
use rowmap_core::{stmt::Value, Result};

/// Per-mapper connection state: the borrowed connection plus the requested
/// isolation level.
#[derive(Debug)]
struct Session<'a> {
    conn: &'a dyn Connection,
    isolation: Option<IsolationLevel>,
}

impl<'a> Session<'a> {
    fn new(conn: &'a dyn Connection) -> Self {
        Self {
            conn,
            isolation: None,
        }
    }

    /// Requests an isolation level for this mapper's statements.
    ///
    /// Applied best-effort: a level the connected database does not support
    /// is ignored and the previous choice stays in place.
    fn isolation_level(&mut self, level: IsolationLevel) {
        if self.conn.capability().supports_isolation(level) {
            self.isolation = Some(level);
        }
    }

    /// Applies the stored isolation level, if any, before the first
    /// statement runs.
    async fn configure(&self) -> Result<()> {
        if let Some(level) = self.isolation {
            if self.conn.isolation() != level {
                self.conn.set_isolation(level).await?;
            }
        }
        Ok(())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let mut statement = self.conn.prepare(sql).await?;
        statement.bind(params)?;
        statement.execute().await
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        let mut statement = self.conn.prepare(sql).await?;
        statement.bind(params)?;
        statement.query().await
    }
}
