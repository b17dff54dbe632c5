use super::{Comma, Params, ToSql};

use crate::stmt::{self, AlterTableAction, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::AlterTable(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Raw(sql) => sql.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::ShowCreateTable(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let sql = &self.sql;

        fmt!(f, &self.name " " sql)
    }
}

struct ColumnsWithKeys<'a>(&'a stmt::CreateTable);

impl ToSql for ColumnsWithKeys<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Comma(&self.0.columns));

        for key in &self.0.keys {
            fmt!(f, ", " key);
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = &self.name;
        let columns = ColumnsWithKeys(self);

        fmt!(f, "CREATE TABLE IF NOT EXISTS " name " (" columns ")");

        if let Some(engine) = &self.engine {
            fmt!(f, " ENGINE = " engine);
        }
    }
}

impl ToSql for &stmt::AlterTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = &self.name;

        fmt!(f, "ALTER TABLE " name " ");

        match &self.action {
            AlterTableAction::AddColumn(column) => fmt!(f, "ADD " column),
            AlterTableAction::ChangeColumn(column) => {
                let current = &column.name;
                fmt!(f, "CHANGE " current " " column)
            }
            AlterTableAction::RenameColumn { from, definition } => {
                fmt!(f, "CHANGE COLUMN " from " " definition)
            }
            AlterTableAction::DropColumn(column) => fmt!(f, "DROP COLUMN " column),
            AlterTableAction::AddKeySql(keysql) => fmt!(f, "ADD " keysql),
            AlterTableAction::AddKey(key) => fmt!(f, "ADD " key),
            AlterTableAction::Engine(engine) => fmt!(f, "ENGINE = " engine),
        }
    }
}

impl ToSql for &stmt::ShowCreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = &self.name;

        fmt!(f, "SHOW CREATE TABLE " name)
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        let columns = Comma(&self.columns);
        let values = Comma(&self.values);

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")")
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        let columns = Comma(&self.columns);
        let filter = &self.filter;

        fmt!(f, "SELECT " columns " FROM " table " WHERE " filter)
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        let assignments = Comma(self.assignments.iter().map(Assignment));
        let filter = &self.filter;

        fmt!(f, "UPDATE " table " SET " assignments " WHERE " filter)
    }
}

impl ToSql for &stmt::Filter {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let value = &self.value;

        fmt!(f, &self.column " = " value)
    }
}

struct Assignment<'a>(&'a (stmt::Name, stmt::Value));

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, column " = " value)
    }
}
