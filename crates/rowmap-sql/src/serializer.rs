//! Parameterized SQL text generation.
//!
//! Every statement is assembled from clause fragments joined by explicit
//! separators; parameters are collected through a [`Params`] sink in
//! placeholder order. Clause lists are never trimmed after the fact.

#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{And, Comma};

mod params;
pub use params::{Params, Placeholder};

use indexmap::IndexMap;
use rowmap_core::{stmt::Value, Error, Result};

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

/// `col = ?` predicate/assignment fragment.
struct Eq<'a> {
    column: &'a str,
    value: &'a Value,
}

impl ToSql for Eq<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.value);
        fmt!(f, self.column, " = ", placeholder);
    }
}

/// A single slot of an INSERT VALUES list: a placeholder, or the literal
/// `default` keyword when the value is the default marker (which then binds
/// no parameter and shifts later placeholder indices).
struct InsertValue<'a>(&'a Value);

impl ToSql for InsertValue<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.0.is_db_default() {
            fmt!(f, "default");
        } else {
            let placeholder = f.params.push(self.0);
            fmt!(f, placeholder);
        }
    }
}

/// `SELECT * FROM <table> WHERE <k1> = ? AND <k2> = ?`, in key order.
pub fn select_by_key(
    table: &str,
    keys: &IndexMap<String, Value>,
    params: &mut impl Params,
) -> Result<String> {
    if keys.is_empty() {
        return Err(Error::missing_primary_key(table));
    }

    let mut ret = String::new();
    let mut f = Formatter {
        dst: &mut ret,
        params,
    };

    fmt!(
        &mut f,
        "SELECT * FROM ",
        table,
        " WHERE ",
        And(keys.iter().map(|(column, value)| Eq {
            column: column.as_str(),
            value,
        }))
    );

    Ok(ret)
}

/// `INSERT INTO <table> (c1, c2, ...) VALUES (?, default, ...)`.
pub fn insert(
    table: &str,
    columns: &IndexMap<String, Value>,
    params: &mut impl Params,
) -> String {
    let mut ret = String::new();
    let mut f = Formatter {
        dst: &mut ret,
        params,
    };

    fmt!(
        &mut f,
        "INSERT INTO ",
        table,
        " (",
        Comma(columns.keys().map(|column| column.as_str())),
        ") VALUES (",
        Comma(columns.values().map(InsertValue)),
        ")"
    );

    ret
}

/// `UPDATE <table> SET a = ?, b = ? WHERE k1 = ? AND k2 = ?`.
///
/// Parameters are pushed in SET-list order followed by WHERE-list order. An
/// empty SET or WHERE list is a configuration error, never a malformed
/// statement.
pub fn update(
    table: &str,
    assignments: &IndexMap<String, Value>,
    keys: &IndexMap<String, Value>,
    params: &mut impl Params,
) -> Result<String> {
    if assignments.is_empty() {
        return Err(Error::empty_set_list(table));
    }
    if keys.is_empty() {
        return Err(Error::missing_primary_key(table));
    }

    let mut ret = String::new();
    let mut f = Formatter {
        dst: &mut ret,
        params,
    };

    fmt!(
        &mut f,
        "UPDATE ",
        table,
        " SET ",
        Comma(assignments.iter().map(|(column, value)| Eq {
            column: column.as_str(),
            value,
        })),
        " WHERE ",
        And(keys.iter().map(|(column, value)| Eq {
            column: column.as_str(),
            value,
        }))
    );

    Ok(ret)
}

/// `DELETE FROM <table> WHERE k1 = ? AND k2 = ?`.
///
/// An empty WHERE list is a configuration error.
pub fn delete(
    table: &str,
    keys: &IndexMap<String, Value>,
    params: &mut impl Params,
) -> Result<String> {
    if keys.is_empty() {
        return Err(Error::missing_primary_key(table));
    }

    let mut ret = String::new();
    let mut f = Formatter {
        dst: &mut ret,
        params,
    };

    fmt!(
        &mut f,
        "DELETE FROM ",
        table,
        " WHERE ",
        And(keys.iter().map(|(column, value)| Eq {
            column: column.as_str(),
            value,
        }))
    );

    Ok(ret)
}
