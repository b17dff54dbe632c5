use super::{plan::Planner, DirectSink, KeySpec, StatementSink, Step};
use crate::{ledger, Db, Result};

use tidemark_core::{schema::FieldDeclaration, ModelRef};
use tidemark_sql::AlterMethod;

/// Ad hoc changes to a model's table, outside any versioned migration.
///
/// Each call runs its statements immediately and leaves the version ledger
/// alone.
#[derive(Debug, Clone)]
pub struct Alteration {
    db: Db,
    model: ModelRef,
}

impl Alteration {
    pub(crate) fn new(db: Db, model: ModelRef) -> Alteration {
        Alteration { db, model }
    }

    pub async fn add_column(
        &self,
        name: &str,
        declaration: impl Into<FieldDeclaration>,
    ) -> Result<()> {
        let steps = self.planner().field(AlterMethod::Add, name, &declaration.into())?;
        self.apply(steps).await
    }

    pub async fn change_column(
        &self,
        name: &str,
        declaration: impl Into<FieldDeclaration>,
    ) -> Result<()> {
        let steps = self.planner().field(AlterMethod::Change, name, &declaration.into())?;
        self.apply(steps).await
    }

    pub async fn drop_column(&self, name: &str) -> Result<()> {
        let step = self.planner().drop_column(name);
        self.apply(vec![step]).await
    }

    pub async fn rename_column(&self, from: &str, to: &str) -> Result<()> {
        let step = self.planner().rename_column(from, to);
        self.apply(vec![step]).await
    }

    pub async fn execute_sql(&self, sql: impl Into<String>) -> Result<()> {
        let step = self.planner().execute_sql(sql.into());
        self.apply(vec![step]).await
    }

    pub async fn add_key(&self, column: &str, spec: KeySpec) -> Result<()> {
        let step = self.planner().add_key(column, spec);
        self.apply(vec![step]).await
    }

    pub async fn engine(&self, engine: &str) -> Result<()> {
        let step = self.planner().engine(engine);
        self.apply(vec![step]).await
    }

    fn planner(&self) -> Planner<'_> {
        Planner::new(&self.db, &self.model)
    }

    async fn apply(&self, steps: Vec<Step>) -> Result<()> {
        ledger::check_table(self.model.table())?;
        let mut conn = self.db.connection().await;
        let mut sink = DirectSink::new(&mut **conn);

        for step in steps {
            sink.submit(step).await?;
        }
        Ok(())
    }
}
