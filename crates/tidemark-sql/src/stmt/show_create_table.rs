use super::{Name, Statement};

/// `SHOW CREATE TABLE <table>`; the live definition comes back in the
/// `Create Table` column.
#[derive(Debug, Clone)]
pub struct ShowCreateTable {
    pub name: Name,
}

impl ShowCreateTable {
    /// Result column holding the table definition.
    pub const COLUMN: &'static str = "Create Table";
}

impl Statement {
    pub fn show_create_table(table: &str) -> Self {
        ShowCreateTable {
            name: Name::from(table),
        }
        .into()
    }
}

impl From<ShowCreateTable> for Statement {
    fn from(value: ShowCreateTable) -> Self {
        Self::ShowCreateTable(value)
    }
}
