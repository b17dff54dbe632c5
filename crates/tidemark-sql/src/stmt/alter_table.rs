use super::{ColumnDef, Key, Name, Statement};

use tidemark_core::schema::FieldRecord;

/// A statement to alter a SQL table.
#[derive(Debug, Clone)]
pub struct AlterTable {
    /// Name of the table.
    pub name: Name,

    /// The alteration to apply.
    pub action: AlterTableAction,
}

/// The action to perform in an ALTER TABLE statement.
#[derive(Debug, Clone)]
pub enum AlterTableAction {
    /// `ADD <column> <sql>`
    AddColumn(ColumnDef),

    /// `CHANGE <column> <column> <sql>`, redefining a column in place.
    ChangeColumn(ColumnDef),

    /// `CHANGE COLUMN <from> <definition>`, with a full column definition
    /// (name included) taken from the live table.
    RenameColumn { from: Name, definition: String },

    /// `DROP COLUMN <column>`
    DropColumn(Name),

    /// `ADD <keysql>` with a prebuilt key clause.
    AddKeySql(String),

    /// `ADD <key>`
    AddKey(Key),

    /// `ENGINE = <engine>`
    Engine(String),
}

/// How a field is applied to an existing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterMethod {
    Add,
    Change,
}

impl Statement {
    /// Statements applying one compiled field to `table`.
    ///
    /// The column statement comes first; a second statement adds the
    /// field's key when it has one.
    pub fn alter_field(
        table: &str,
        method: AlterMethod,
        name: &str,
        record: &FieldRecord,
    ) -> Vec<Statement> {
        let column = ColumnDef::from_record(name, record);
        let action = match method {
            AlterMethod::Add => AlterTableAction::AddColumn(column),
            AlterMethod::Change => AlterTableAction::ChangeColumn(column),
        };

        let mut statements = vec![Statement::alter_table(table, action)];

        if let Some(keysql) = &record.keysql {
            statements.push(Statement::alter_table(
                table,
                AlterTableAction::AddKeySql(keysql.clone()),
            ));
        }

        statements
    }

    pub fn drop_column(table: &str, column: &str) -> Self {
        Statement::alter_table(table, AlterTableAction::DropColumn(Name::from(column)))
    }

    pub fn engine(table: &str, engine: &str) -> Self {
        Statement::alter_table(table, AlterTableAction::Engine(engine.to_string()))
    }

    pub fn add_key(table: &str, key: Key) -> Self {
        Statement::alter_table(table, AlterTableAction::AddKey(key))
    }

    /// Renames `from` to whatever name `definition` starts with.
    pub fn rename_column(table: &str, from: &str, definition: String) -> Self {
        Statement::alter_table(
            table,
            AlterTableAction::RenameColumn {
                from: Name::from(from),
                definition,
            },
        )
    }

    fn alter_table(table: &str, action: AlterTableAction) -> Self {
        AlterTable {
            name: Name::from(table),
            action,
        }
        .into()
    }
}

impl From<AlterTable> for Statement {
    fn from(value: AlterTable) -> Self {
        Self::AlterTable(value)
    }
}
