use super::Session;

use rowmap_core::driver::{Connection, IsolationLevel};
use rowmap_core::schema::{key, FieldTy};
use rowmap_core::{bail, stmt::Value, Entity, Error, Mapped, Result};

use indexmap::IndexMap;

/// Updates pooled instances, one UPDATE statement per instance, keyed by
/// each instance's flattened primary key.
#[derive(Debug)]
pub struct UpdateMapper<'a, T> {
    session: Session<'a>,
    pool: Vec<T>,
    raw: Option<String>,
    params: Vec<Value>,
}

impl<'a, T: Mapped> UpdateMapper<'a, T> {
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

    /// Updates every pooled instance sequentially.
    ///
    /// Null scalar values are skipped unless `allow_null_values` is set, in
    /// which case they are written as NULL. A null relation is skipped, or
    /// nulls each of its local columns when nulls are allowed.
    pub async fn update(self, allow_null_values: bool) -> Result<()> {
        let def = T::entity_def();
        let table = def
            .table()
            .ok_or_else(|| Error::missing_table(def.name()))?;

        self.session.configure().await?;

        for instance in &self.pool {
            let assignments = update_assignments(instance, allow_null_values)?;
            let keys = key::atomic_primary_key(instance)?;

            let mut params = vec![];
            let sql = rowmap_sql::update(table, &assignments, &keys, &mut params)?;
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
    /// [`create_update`]: UpdateMapper::create_update
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

/// The SET column map for one instance: non-primary-key scalar columns plus
/// flattened foreign-key columns.
fn update_assignments(
    instance: &dyn Entity,
    allow_null_values: bool,
) -> Result<IndexMap<String, Value>> {
    let def = instance.def();
    let mut assignments = IndexMap::new();

    for field in def.fields() {
        if field.is_primary_key() {
            continue;
        }

        let value = instance.get(field.name());
        match field.ty() {
            FieldTy::Scalar(_) => {
                if value.is_null() && !allow_null_values {
                    continue;
                }
                assignments.insert(field.column_name().to_string(), value);
            }
            FieldTy::ForeignKey(fk) => {
                // Non-null relations are flattened by the key resolver below.
                if !value.is_null() || !allow_null_values {
                    continue;
                }
                if fk.has_spec() {
                    for pair in fk.pairs(field.name())? {
                        assignments.insert(pair.local.to_string(), Value::Null);
                    }
                } else {
                    assignments.insert(field.column_name().to_string(), Value::Null);
                }
            }
        }
    }

    assignments.extend(key::foreign_key_columns(instance)?);

    // Primary-key relations bind in the WHERE clause, never the SET list.
    for field in def.fields() {
        if !field.is_primary_key() {
            continue;
        }
        let Some(fk) = field.as_foreign_key() else {
            continue;
        };
        if fk.has_spec() {
            for pair in fk.pairs(field.name())? {
                assignments.shift_remove(pair.local);
            }
        } else {
            assignments.shift_remove(field.column_name());
        }
    }

    Ok(assignments)
}
