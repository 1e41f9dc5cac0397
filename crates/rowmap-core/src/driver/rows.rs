use crate::stmt::Value;

use indexmap::IndexMap;
use std::collections::VecDeque;
use std::sync::Arc;

/// A materializable result set: column metadata plus value rows.
#[derive(Debug, Clone, Default)]
pub struct Rows {
    columns: Arc<[String]>,
    rows: VecDeque<Vec<Value>>,
}

/// One row of a result set, sharing its parent's column metadata.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Rows {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.into(),
            rows: rows.into(),
        }
    }

    /// The result set's column names, in select order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Takes the next row, front to back.
    pub fn next_row(&mut self) -> Option<Row> {
        let values = self.rows.pop_front()?;
        Some(Row {
            columns: self.columns.clone(),
            values,
        })
    }
}

impl Row {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Looks a value up by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index)
    }

    /// Consumes the row into a column-name-to-value mapping.
    pub fn into_map(self) -> IndexMap<String, Value> {
        self.columns
            .iter()
            .cloned()
            .zip(self.values)
            .collect()
    }
}
