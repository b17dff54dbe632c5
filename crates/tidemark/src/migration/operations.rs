use super::{plan::Planner, KeySpec, QueueingSink};
use crate::Result;

use tidemark_core::schema::FieldDeclaration;
use tidemark_sql::AlterMethod;

/// The operations available to a migration body.
///
/// Nothing runs while the body executes: each call appends its steps to the
/// migration's queue, which is drained once the body returns. Compiling a
/// field declaration can fail, so `add_column` and `change_column` return
/// the error right away.
///
/// ```
/// # use tidemark::{Field, Migration};
/// let migration = Migration::new(|t| {
///     t.add_column("nickname", Field::varchar(32))?;
///     t.drop_column("handle");
///     Ok(())
/// })
/// .down(|t| {
///     t.drop_column("nickname");
///     t.add_column("handle", Field::varchar(32))?;
///     Ok(())
/// });
/// # let _ = migration;
/// ```
#[derive(Debug)]
pub struct Operations<'a> {
    planner: Planner<'a>,
    queue: &'a mut QueueingSink,
}

impl<'a> Operations<'a> {
    pub(super) fn new(planner: Planner<'a>, queue: &'a mut QueueingSink) -> Operations<'a> {
        Operations { planner, queue }
    }

    /// Table being migrated.
    pub fn table(&self) -> &str {
        self.planner.table()
    }

    /// Adds a column, plus its key when the field has one.
    pub fn add_column(
        &mut self,
        name: &str,
        declaration: impl Into<FieldDeclaration>,
    ) -> Result<&mut Self> {
        self.field(AlterMethod::Add, name, declaration.into())
    }

    /// Redefines an existing column from a field declaration.
    pub fn change_column(
        &mut self,
        name: &str,
        declaration: impl Into<FieldDeclaration>,
    ) -> Result<&mut Self> {
        self.field(AlterMethod::Change, name, declaration.into())
    }

    pub fn drop_column(&mut self, name: &str) -> &mut Self {
        let step = self.planner.drop_column(name);
        self.queue.push(step);
        self
    }

    /// Renames a column, keeping its live definition.
    pub fn rename_column(&mut self, from: &str, to: &str) -> &mut Self {
        let step = self.planner.rename_column(from, to);
        self.queue.push(step);
        self
    }

    /// Queues `sql` verbatim.
    pub fn execute_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        let step = self.planner.execute_sql(sql.into());
        self.queue.push(step);
        self
    }

    pub fn add_key(&mut self, column: &str, spec: KeySpec) -> &mut Self {
        let step = self.planner.add_key(column, spec);
        self.queue.push(step);
        self
    }

    /// Switches the table's storage engine.
    pub fn engine(&mut self, engine: &str) -> &mut Self {
        let step = self.planner.engine(engine);
        self.queue.push(step);
        self
    }

    fn field(
        &mut self,
        method: AlterMethod,
        name: &str,
        declaration: FieldDeclaration,
    ) -> Result<&mut Self> {
        for step in self.planner.field(method, name, &declaration)? {
            self.queue.push(step);
        }
        Ok(self)
    }
}
