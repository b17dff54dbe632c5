use crate::{Attributes, Value};

/// One result row, keyed by column name in select order.
pub type Row = Attributes;

#[derive(Debug, Default)]
pub struct Response {
    /// Rows returned by the statement; empty for DDL and writes.
    pub rows: Vec<Row>,

    /// Number of rows impacted by the operation
    pub affected_rows: u64,

    /// Auto-increment id generated by an insert, if any.
    pub insert_id: Option<u64>,
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            affected_rows: count,
            ..Self::default()
        }
    }

    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, if any.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Column `name` of the first row.
    pub fn first_value(&self, name: &str) -> Option<&Value> {
        self.first()?.get(name)
    }
}
