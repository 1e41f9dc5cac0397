use super::Session;
use crate::materialize;

use rowmap_core::driver::{Connection, IsolationLevel};
use rowmap_core::schema::key;
use rowmap_core::{bail, stmt::Value, Error, Mapped, Result};

use indexmap::IndexMap;
use std::marker::PhantomData;

/// Executes SELECT statements and maps their result sets onto `T`.
///
/// ```ignore
/// let users: Vec<User> = QueryMapper::new(&conn)
///     .query("SELECT * FROM Person WHERE name = ?")
///     .params(vec!["Juan".into()])
///     .list(true)
///     .await?;
/// ```
#[derive(Debug)]
pub struct QueryMapper<'a, T> {
    session: Session<'a>,
    sql: Option<String>,
    params: Vec<Value>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T> QueryMapper<'a, T> {
    pub fn new(conn: &'a dyn Connection) -> Self {
        Self {
            session: Session::new(conn),
            sql: None,
            params: vec![],
            _entity: PhantomData,
        }
    }

    /// Sets the statement to be queried.
    pub fn query(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Sets the positional parameters bound to the statement's placeholders.
    pub fn params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    /// Requests an isolation level, best-effort: an unsupported level is
    /// ignored and the previous choice stays.
    pub fn isolation_level(mut self, level: IsolationLevel) -> Self {
        self.session.isolation_level(level);
        self
    }

    /// Runs the query and returns the raw rows as column-to-value mappings,
    /// skipping typed materialization.
    pub async fn rows(self) -> Result<Vec<IndexMap<String, Value>>> {
        let Self {
            session,
            sql,
            params,
            ..
        } = self;
        let Some(sql) = sql else {
            bail!("no query defined");
        };

        session.configure().await?;
        let mut rows = session.query(&sql, &params).await?;

        let mut out = vec![];
        while let Some(row) = rows.next_row() {
            out.push(row.into_map());
        }
        Ok(out)
    }
}

impl<'a, T: Mapped> QueryMapper<'a, T> {
    /// Fetches the full row behind an instance holding only its primary key.
    pub async fn get(self, instance: &T) -> Result<Option<T>> {
        let def = T::entity_def();
        let table = def
            .table()
            .ok_or_else(|| Error::missing_table(def.name()))?;

        let keys = key::atomic_primary_key(instance)?;
        let mut params = vec![];
        let sql = rowmap_sql::select_by_key(table, &keys, &mut params)?;

        self.query(sql).params(params).find_first(true).await
    }

    /// Runs the query and materializes every result row.
    pub async fn list(self, use_foreign_keys: bool) -> Result<Vec<T>> {
        let Self {
            session,
            sql,
            params,
            ..
        } = self;
        let Some(sql) = sql else {
            bail!("no query defined");
        };

        session.configure().await?;
        let rows = session.query(&sql, &params).await?;

        materialize::rows(session.conn, rows, use_foreign_keys).await
    }

    /// Runs the query and materializes only the first result row.
    pub async fn find_first(self, use_foreign_keys: bool) -> Result<Option<T>> {
        Ok(self.list(use_foreign_keys).await?.into_iter().next())
    }
}
