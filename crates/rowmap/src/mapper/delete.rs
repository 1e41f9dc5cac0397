use super::Session;

use rowmap_core::driver::{Connection, IsolationLevel};
use rowmap_core::schema::key;
use rowmap_core::{bail, stmt::Value, Error, Mapped, Result};

/// Deletes pooled instances, one DELETE statement per instance, keyed by
/// each instance's flattened primary key.
#[derive(Debug)]
pub struct DeleteMapper<'a, T> {
    session: Session<'a>,
    pool: Vec<T>,
    raw: Option<String>,
    params: Vec<Value>,
}

impl<'a, T: Mapped> DeleteMapper<'a, T> {
    pub fn new(conn: &'a dyn Connection) -> Self {
        Self {
            session: Session::new(conn),
            pool: vec![],
            raw: None,
            params: vec![],
        }
    }

    /// Requests an isolation level, best-effort: an unsupported level is
    /// ignored and the previous choice stays.
    pub fn isolation_level(mut self, level: IsolationLevel) -> Self {
        self.session.isolation_level(level);
        self
    }

    /// Adds an instance to the pending pool.
    pub fn add(mut self, instance: T) -> Self {
        self.pool.push(instance);
        self
    }

    /// Adds multiple instances to the pending pool, in order.
    pub fn add_all(mut self, instances: impl IntoIterator<Item = T>) -> Self {
        self.pool.extend(instances);
        self
    }

    /// Deletes every pooled instance sequentially.
    pub async fn delete(self) -> Result<()> {
        let def = T::entity_def();
        let table = def
            .table()
            .ok_or_else(|| Error::missing_table(def.name()))?;

        self.session.configure().await?;

        for instance in &self.pool {
            let keys = key::atomic_primary_key(instance)?;
            let mut params = vec![];
            let sql = rowmap_sql::delete(table, &keys, &mut params)?;
            self.session.execute(&sql, &params).await?;
        }
        Ok(())
    }

    /// Registers a hand-written statement to run instead of a generated one.
    pub fn create_update(mut self, sql: impl Into<String>) -> Self {
        self.raw = Some(sql.into());
        self
    }

    /// Sets the parameters bound to a [`create_update`] statement.
    ///
    /// [`create_update`]: DeleteMapper::create_update
    pub fn params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    /// Executes the registered hand-written statement.
    pub async fn execute_update(self) -> Result<u64> {
        let Some(sql) = self.raw else {
            bail!("no statement defined");
        };
        self.session.configure().await?;
        self.session.execute(&sql, &self.params).await
    }
}
