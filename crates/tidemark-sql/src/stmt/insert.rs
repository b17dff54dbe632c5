use super::{Name, Statement, Value};

/// Single-row `INSERT INTO <table> (<columns>) VALUES (<values>)`.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: Name,
    pub columns: Vec<Name>,
    pub values: Vec<Value>,
}

impl Statement {
    pub fn insert(table: &str, row: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        let (columns, values) = row
            .into_iter()
            .map(|(column, value)| (Name::from(column), value))
            .unzip();

        Insert {
            table: Name::from(table),
            columns,
            values,
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
