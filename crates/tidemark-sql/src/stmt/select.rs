use super::{Name, Statement, Value};

/// `SELECT <columns> FROM <table> WHERE <column> = <value>`.
#[derive(Debug, Clone)]
pub struct Select {
    pub table: Name,
    pub columns: Vec<Name>,
    pub filter: Filter,
}

/// Equality filter on a single column.
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: Name,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<Value>) -> Filter {
        Filter {
            column: Name::from(column),
            value: value.into(),
        }
    }
}

impl Statement {
    pub fn select(table: &str, columns: &[&str], filter: Filter) -> Self {
        Select {
            table: Name::from(table),
            columns: columns.iter().map(|column| Name::from(*column)).collect(),
            filter,
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
