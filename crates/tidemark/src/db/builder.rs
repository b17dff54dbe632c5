use super::{Config, Db, Shared};
use crate::{ledger, Result};

use tidemark_core::{driver::Driver, Connection, ModelRef, Registry};

use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct Builder {
    /// Models to register, in registration order
    models: Vec<ModelRef>,

    engine: Option<String>,

    baseline: Option<String>,
}

impl Builder {
    pub fn register(&mut self, model: ModelRef) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Storage engine for models that do not name one. Defaults to `InnoDB`.
    pub fn engine(&mut self, engine: impl Into<String>) -> &mut Self {
        self.engine = Some(engine.into());
        self
    }

    /// Version of tables with no ledger row. Defaults to `0000`.
    pub fn baseline(&mut self, baseline: impl Into<String>) -> &mut Self {
        self.baseline = Some(baseline.into());
        self
    }

    #[cfg(feature = "mysql")]
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(tidemark_driver_mysql::MySQL::new(url)?).await
    }

    /// Opens a connection with `driver` and builds the handle.
    ///
    /// Every registered model's schema is compiled here, so declaration
    /// errors surface before any statement runs.
    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let registry = self.build_registry()?;
        let connection = driver.connect().await?;
        Ok(self.finish(registry, connection))
    }

    fn build_registry(&self) -> Result<Registry> {
        let registry = Registry::new();

        for model in &self.models {
            ledger::check_table(model.table())?;
            registry.fieldspec(model)?;
        }

        Ok(registry)
    }

    fn finish(&self, registry: Registry, connection: Box<dyn Connection>) -> Db {
        let config = Config {
            engine: self.engine.clone().unwrap_or_else(|| "InnoDB".to_string()),
            baseline: self.baseline.clone().unwrap_or_else(|| "0000".to_string()),
        };

        tracing::debug!(models = self.models.len(), engine = %config.engine, "database handle ready");

        Db {
            shared: Arc::new(Shared {
                registry,
                config,
                connection: Mutex::new(connection),
            }),
        }
    }
}
