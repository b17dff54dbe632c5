mod alter_table;
pub use alter_table::{AlterMethod, AlterTable, AlterTableAction};

mod column_def;
pub use column_def::ColumnDef;

mod create_table;
pub use create_table::CreateTable;

mod insert;
pub use insert::Insert;

mod key;
pub use key::Key;

mod name;
pub use name::Name;

mod select;
pub use select::{Filter, Select};

mod show_create_table;
pub use show_create_table::ShowCreateTable;

mod update;
pub use update::Update;

pub use tidemark_core::Value;

#[derive(Debug, Clone)]
pub enum Statement {
    AlterTable(AlterTable),
    CreateTable(CreateTable),
    Insert(Insert),
    /// SQL passed through verbatim.
    Raw(String),
    Select(Select),
    ShowCreateTable(ShowCreateTable),
    Update(Update),
}

impl Statement {
    pub fn raw(sql: impl Into<String>) -> Self {
        Statement::Raw(sql.into())
    }
}
