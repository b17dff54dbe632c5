use super::{ColumnDef, Name, Statement};

use tidemark_core::Fieldspec;

/// `CREATE TABLE IF NOT EXISTS`.
#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: Name,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Key clauses, rendered after every column.
    pub keys: Vec<String>,

    /// Storage engine, when one is named.
    pub engine: Option<String>,
}

impl Statement {
    /// Creates the table for a compiled schema.
    ///
    /// Columns and keys both keep the fieldspec's declaration order.
    pub fn create_table(table: &str, fieldspec: &Fieldspec, engine: Option<&str>) -> Self {
        CreateTable {
            name: Name::from(table),
            columns: fieldspec
                .iter()
                .map(|(name, record)| ColumnDef::from_record(name, record))
                .collect(),
            keys: fieldspec
                .iter()
                .filter_map(|(_, record)| record.keysql.clone())
                .collect(),
            engine: engine.map(str::to_string),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
