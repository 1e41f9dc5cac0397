//! Result-set materialization.
//!
//! Scalar fields are assigned with coercion when their column is present in
//! the result set; a missing column leaves the field unset rather than
//! failing the row. Foreign-key dereferencing chases exactly one level: the
//! looked-up entity is itself materialized with dereferencing disabled.

use rowmap_core::driver::{Connection, Row, Rows};
use rowmap_core::schema::{EntityDef, FieldTy, FkTarget};
use rowmap_core::{stmt::Value, Entity, EntityRef, Error, Mapped, Result};

use indexmap::IndexMap;

/// Maps every row of a result set onto fresh instances of `T`.
pub(crate) async fn rows<T: Mapped>(
    conn: &dyn Connection,
    mut rows: Rows,
    use_foreign_keys: bool,
) -> Result<Vec<T>> {
    let def = T::entity_def();
    let mut out = vec![];

    while let Some(row) = rows.next_row() {
        let mut instance = T::default();
        assign_scalars(&mut instance, def, &row)?;
        if use_foreign_keys {
            assign_foreign_keys(conn, &mut instance, def, &row).await?;
        }
        out.push(instance);
    }

    Ok(out)
}

/// Assigns every column-backed field present in the row: plain scalars, and
/// foreign-key fields whose referenced key is itself a scalar.
fn assign_scalars(instance: &mut dyn Entity, def: &EntityDef, row: &Row) -> Result<()> {
    for field in def.fields() {
        let ty = match field.ty() {
            FieldTy::Scalar(ty) => *ty,
            FieldTy::ForeignKey(fk) => match fk.target() {
                FkTarget::Scalar(ty) => *ty,
                FkTarget::Entity(_) => continue,
            },
        };

        if let Some(value) = row.get(field.column_name()) {
            instance.set(field.name(), value.clone().coerce(ty)?)?;
        }
    }
    Ok(())
}

/// Dereferences entity-target foreign-key fields, one level deep.
///
/// A target without a table declaration stays absent. With a spec, the
/// relation is looked up by the spec's target columns; if any local column
/// is missing from the result set the field is skipped silently, and if any
/// collected value is null the relation stays unset. Without a spec, the
/// field's own column value keys a primary-key lookup on the target.
async fn assign_foreign_keys(
    conn: &dyn Connection,
    instance: &mut dyn Entity,
    def: &EntityDef,
    row: &Row,
) -> Result<()> {
    for field in def.fields() {
        let Some(fk) = field.as_foreign_key() else {
            continue;
        };
        let FkTarget::Entity(target) = fk.target() else {
            continue;
        };
        if target.def().table().is_none() {
            continue;
        }

        let keys = if fk.has_spec() {
            let pairs = fk.pairs(field.name())?;
            let mut keys = IndexMap::new();
            let mut missing = false;

            for pair in &pairs {
                match row.get(pair.local) {
                    Some(value) => {
                        keys.insert(pair.target.to_string(), value.clone());
                    }
                    None => missing = true,
                }
            }

            if missing {
                continue;
            }
            keys
        } else {
            let Some(value) = row.get(field.column_name()) else {
                continue;
            };
            let pk_field = target
                .def()
                .primary_key_fields()
                .next()
                .ok_or_else(|| Error::missing_primary_key(target.def().name()))?;

            IndexMap::from([(pk_field.column_name().to_string(), value.clone())])
        };

        // A null key component means the row references nothing.
        if keys.values().any(Value::is_null) {
            continue;
        }

        if let Some(entity) = fetch_by_key(conn, target, &keys).await? {
            instance.set(field.name(), Value::Entity(entity))?;
        }
    }
    Ok(())
}

/// Selects the referenced entity by key columns and materializes it without
/// dereferencing its own relations.
async fn fetch_by_key(
    conn: &dyn Connection,
    target: &EntityRef,
    keys: &IndexMap<String, Value>,
) -> Result<Option<Box<dyn Entity>>> {
    let def = target.def();
    let Some(table) = def.table() else {
        return Ok(None);
    };

    let mut params = vec![];
    let sql = rowmap_sql::select_by_key(table, keys, &mut params)?;

    let mut statement = conn.prepare(&sql).await?;
    statement.bind(&params)?;
    let mut rows = statement.query().await?;

    match rows.next_row() {
        Some(row) => {
            let mut instance = target.new_instance();
            assign_scalars(instance.as_mut(), def, &row)?;
            Ok(Some(instance))
        }
        None => Ok(None),
    }
}
