mod builder;
pub use builder::Builder;

mod provision;
pub(crate) use provision::creation_order;

use crate::{
    ledger,
    migration::{Alteration, MigrationSet, Migrator},
    Result,
};

use tidemark_core::{
    driver::{Connection, Response},
    Fieldspec, ModelRef, Registry, Value,
};
use tidemark_sql::{Serializer, Statement};

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Defaults applied to every model.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Storage engine for tables whose model names none.
    pub(crate) engine: String,

    /// Version of a table with no ledger row.
    pub(crate) baseline: String,
}

pub(crate) struct Shared {
    pub(crate) registry: Registry,
    pub(crate) config: Config,

    /// The single connection. Holding the lock serializes every statement
    /// sent through this handle.
    connection: Mutex<Box<dyn Connection>>,
}

/// A database handle.
///
/// Cloning is cheap; clones share the registry and the connection.
#[derive(Clone)]
pub struct Db {
    pub(crate) shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    /// Version assumed for tables without a ledger row.
    pub fn baseline(&self) -> &str {
        &self.shared.config.baseline
    }

    /// Storage engine used for `model`'s table.
    pub fn engine_for<'a>(&'a self, model: &'a ModelRef) -> &'a str {
        model.engine().unwrap_or(&self.shared.config.engine)
    }

    /// The compiled schema of `model`.
    pub fn fieldspec(&self, model: &ModelRef) -> Result<Arc<Fieldspec>> {
        self.shared.registry.fieldspec(model)
    }

    /// The `CREATE TABLE` statement for `model`.
    pub fn create_table_sql(&self, model: &ModelRef) -> Result<String> {
        let fieldspec = self.fieldspec(model)?;
        let stmt = Statement::create_table(model.table(), &fieldspec, Some(self.engine_for(model)));
        Ok(render(&stmt).0)
    }

    /// Creates `model`'s table, and the tables it depends on, if missing.
    ///
    /// Each newly seen table gets a ledger row holding the model's declared
    /// version (or the baseline). An existing row is left untouched.
    pub async fn make_table(&self, model: &ModelRef) -> Result<()> {
        // Dependency cycles are reported before anything is sent
        let order = creation_order(&self.shared.registry, model)?;

        let mut conn = self.connection().await;

        for (model, fieldspec) in &order {
            let stmt =
                Statement::create_table(model.table(), fieldspec, Some(self.engine_for(model)));
            exec(&mut **conn, &stmt).await?;

            if ledger::get_version(&mut **conn, model.table()).await?.is_none() {
                let version = model.version().unwrap_or(self.baseline());
                ledger::set_version(&mut **conn, model.table(), version).await?;
            }

            tracing::info!(table = model.table(), "table ready");
        }

        Ok(())
    }

    /// Ad hoc alterations to `model`'s table, applied immediately.
    pub fn alter(&self, model: &ModelRef) -> Alteration {
        Alteration::new(self.clone(), model.clone())
    }

    /// Runs versioned migrations for `model`.
    pub fn migrator(&self, model: &ModelRef, set: MigrationSet) -> Migrator {
        Migrator::new(self.clone(), model.clone(), set)
    }

    /// The ledger version of `model`'s table; `None` when it has no row.
    pub async fn version(&self, model: &ModelRef) -> Result<Option<String>> {
        let mut conn = self.connection().await;
        ledger::get_version(&mut **conn, model.table()).await
    }

    /// Records `version` for `model`'s table.
    pub async fn set_version(&self, model: &ModelRef, version: &str) -> Result<()> {
        let mut conn = self.connection().await;
        ledger::set_version(&mut **conn, model.table(), version).await
    }

    /// Executes raw SQL on the connection.
    pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<Response> {
        let mut conn = self.connection().await;
        tracing::debug!(sql, "execute");
        conn.exec(sql, params).await
    }

    pub(crate) async fn connection(&self) -> MutexGuard<'_, Box<dyn Connection>> {
        self.shared.connection.lock().await
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

/// Renders a statement to SQL and its bound parameters.
pub(crate) fn render(stmt: &Statement) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = Serializer::mysql().serialize(stmt, &mut params);
    (sql, params)
}

/// Renders and executes a single statement.
pub(crate) async fn exec(conn: &mut dyn Connection, stmt: &Statement) -> Result<Response> {
    let (sql, params) = render(stmt);
    tracing::debug!(sql = %sql, params = params.len(), "exec");
    conn.exec(&sql, params).await
}
