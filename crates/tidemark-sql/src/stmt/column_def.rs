use super::Name;

use tidemark_core::schema::FieldRecord;

/// A column name and its definition.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: Name,

    /// Column definition SQL, e.g. `VARCHAR(255) NOT NULL`.
    pub sql: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<Name>, sql: impl Into<String>) -> ColumnDef {
        ColumnDef {
            name: name.into(),
            sql: sql.into(),
        }
    }

    pub fn from_record(name: &str, record: &FieldRecord) -> ColumnDef {
        ColumnDef::new(name, record.sql.clone())
    }
}
