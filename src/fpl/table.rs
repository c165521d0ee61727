//! Tabular view over FPL JSON records.
//!
//! Most FPL endpoints return arrays of flat objects (elements, fixtures,
//! standings rows, live stats). [`Table`] keeps those rows in the order the
//! API returned them and tracks the union of their keys as columns, so the
//! data can be inspected, typed, or written out as CSV.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FplError, Result};


pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a JSON array of objects.
    ///
    /// `resource` only labels the error when the value has another shape.
    pub fn from_records(resource: &str, value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(FplError::shape(
                    resource,
                    format!("expected an array of records, got {}", kind_of(&other)),
                ))
            }
        };

        let mut table = Table::new();
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(record) => table.push(record),
                other => {
                    return Err(FplError::shape(
                        resource,
                        format!("row {} is {}, expected an object", idx, kind_of(&other)),
                    ))
                }
            }
        }
        Ok(table)
    }

    /// Build a one-row table from a single JSON object.
    pub fn from_record(resource: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(record) => {
                let mut table = Table::new();
                table.push(record);
                Ok(table)
            }
            other => Err(FplError::shape(
                resource,
                format!("expected an object, got {}", kind_of(&other)),
            )),
        }
    }

    pub fn push(&mut self, record: Record) {
        for key in record.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(record);
    }

    /// Append every row of `other` after the rows already present.
    pub fn extend(&mut self, other: Table) {
        for record in other.rows {
            self.push(record);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, `None` where a row lacks the key.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }

    /// Deserialize every row into `T`, keeping row order.
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows
            .iter()
            .map(|row| Ok(serde_json::from_value(Value::Object(row.clone()))?))
            .collect()
    }

    /// Write the table as CSV with a header row.
    ///
    /// Nulls and missing keys become empty cells; arrays and objects are
    /// written as compact JSON.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.columns)?;
        for row in &self.rows {
            csv.write_record(self.columns.iter().map(|c| cell(row.get(c))))?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Turn every array-valued key of a JSON object into its own table.
///
/// Element summaries and manager histories are shaped like this
/// (`{"history": [...], "fixtures": [...]}`). Non-array keys carry no rows
/// and are skipped.
pub fn tables_by_key(resource: &str, value: Value) -> Result<BTreeMap<String, Table>> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(FplError::shape(
                resource,
                format!("expected an object, got {}", kind_of(&other)),
            ))
        }
    };

    let mut tables = BTreeMap::new();
    for (key, value) in object {
        if value.is_array() {
            let table = Table::from_records(&format!("{resource}.{key}"), value)?;
            tables.insert(key, table);
        } else {
            tracing::debug!(resource, key = %key, "skipping non-tabular key");
        }
    }
    Ok(tables)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
