//! Primary- and foreign-key resolution.
//!
//! Both resolvers reduce key-shaped runtime values to flat column-to-value
//! mappings ready for parameter binding. Recursion is bounded: primary-key
//! flattening walks only primary-key links and rejects definition cycles;
//! foreign-key resolution chases exactly one level of indirection (the
//! referenced entity's primary key, never its own foreign keys).

use crate::{entity::Entity, schema::EntityDef, schema::FkTarget, stmt::Value, Error, Result};

use indexmap::IndexMap;

/// Flattens an instance's primary key down to atomic column values.
///
/// A primary-key field holding a nested entity contributes that entity's own
/// atomic primary key, re-keyed under the outer field's column name. A cycle
/// between entity definitions is a configuration error.
pub fn atomic_primary_key(instance: &dyn Entity) -> Result<IndexMap<String, Value>> {
    let mut visited = vec![];
    atomic_primary_key_inner(instance, &mut visited)
}

fn atomic_primary_key_inner(
    instance: &dyn Entity,
    visited: &mut Vec<*const EntityDef>,
) -> Result<IndexMap<String, Value>> {
    let def = instance.def();

    if visited.iter().any(|seen| std::ptr::eq(*seen, def)) {
        return Err(Error::cyclic_key_reference(def.name()));
    }
    visited.push(def);

    let mut keys = IndexMap::new();

    for field in def.primary_key_fields() {
        match instance.get(field.name()) {
            Value::Entity(nested) => {
                let leaves = atomic_primary_key_inner(nested.as_ref(), visited)?;
                for (_, leaf) in leaves {
                    keys.insert(field.column_name().to_string(), leaf);
                }
            }
            value => {
                keys.insert(field.column_name().to_string(), value);
            }
        }
    }

    visited.pop();
    Ok(keys)
}

/// Collects an instance's foreign-key columns as atomic values.
///
/// Null relations contribute nothing; whether an absent relation violates a
/// NOT NULL constraint is the database's call. A scalar target binds the raw
/// value under the spec's local column; an entity target is flattened via
/// [`atomic_primary_key`] and re-keyed from the spec's target columns to its
/// local columns.
pub fn foreign_key_columns(instance: &dyn Entity) -> Result<IndexMap<String, Value>> {
    let def = instance.def();
    let mut columns = IndexMap::new();

    for field in def.fields() {
        let Some(fk) = field.as_foreign_key() else {
            continue;
        };

        let value = instance.get(field.name());
        if value.is_null() {
            continue;
        }

        let pairs = fk.pairs(field.name())?;

        match fk.target() {
            FkTarget::Scalar(_) => {
                columns.insert(pairs[0].local.to_string(), value);
            }
            FkTarget::Entity(_) => {
                let Value::Entity(nested) = value else {
                    return Err(Error::type_conversion(value.ty_name(), "Entity"));
                };

                let leaves = atomic_primary_key(nested.as_ref())?;
                for pair in &pairs {
                    if let Some(leaf) = leaves.get(pair.target) {
                        columns.insert(pair.local.to_string(), leaf.clone());
                    }
                }
            }
        }
    }

    Ok(columns)
}
