use super::Session;

use rowmap_core::driver::{Connection, IsolationLevel};
use rowmap_core::schema::{key, FieldTy};
use rowmap_core::{bail, stmt::Value, Entity, Error, Mapped, Result};

use indexmap::IndexMap;

/// Inserts pooled instances, one INSERT statement per instance.
///
/// Columns with a declared database-side default whose value is null are
/// emitted as the `default` keyword rather than bound as a parameter. Null
/// relations contribute no columns.
#[derive(Debug)]
pub struct InsertionMapper<'a, T> {
    session: Session<'a>,
    pool: Vec<T>,
    raw: Option<String>,
    params: Vec<Value>,
}

impl<'a, T: Mapped> InsertionMapper<'a, T> {
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

    /// Inserts every pooled instance sequentially.
    pub async fn insert(self) -> Result<()> {
        let def = T::entity_def();
        let table = def
            .table()
            .ok_or_else(|| Error::missing_table(def.name()))?;

        self.session.configure().await?;

        for instance in &self.pool {
            let columns = insertion_columns(instance)?;
            let mut params = vec![];
            let sql = rowmap_sql::insert(table, &columns, &mut params);
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
    /// [`create_update`]: InsertionMapper::create_update
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

/// The column map for one instance: scalar columns (value, or the default
/// marker when the column has a default and the value is null) merged with
/// the instance's flattened foreign-key columns.
fn insertion_columns(instance: &dyn Entity) -> Result<IndexMap<String, Value>> {
    let def = instance.def();
    let mut columns = IndexMap::new();

    for field in def.fields() {
        let FieldTy::Scalar(_) = field.ty() else {
            continue;
        };

        let value = instance.get(field.name());
        let value = if field.is_has_default() && value.is_null() {
            Value::DbDefault
        } else {
            value
        };
        columns.insert(field.column_name().to_string(), value);
    }

    columns.extend(key::foreign_key_columns(instance)?);
    Ok(columns)
}
