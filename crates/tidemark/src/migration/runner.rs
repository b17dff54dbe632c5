use super::{plan::Planner, MigrationSet, Operations, QueueingSink};
use crate::{ledger, Db, Result};

use tidemark_core::{driver::Connection, err, Error, ModelRef};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// Outcome of [`Migrator::run_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Keys of the migrations applied, in order.
    pub applied: Vec<String>,

    /// Ledger version after the batch.
    pub version: String,
}

/// Applies a model's migrations and keeps its ledger row current.
///
/// The connection is held for the whole of each call, so nothing else
/// sent through the same [`Db`] interleaves with a migration.
#[derive(Debug)]
pub struct Migrator {
    db: Db,
    model: ModelRef,
    set: MigrationSet,
}

impl Migrator {
    pub(crate) fn new(db: Db, model: ModelRef, set: MigrationSet) -> Migrator {
        Migrator { db, model, set }
    }

    pub fn migrations(&self) -> &MigrationSet {
        &self.set
    }

    /// Applies the migration matching `version` and records its token.
    /// Returns the new ledger version.
    pub async fn up(&self, version: &str) -> Result<String> {
        let mut conn = self.db.connection().await;
        self.run(&mut **conn, Direction::Up, version).await
    }

    /// Reverts the migration matching `version` and records the version
    /// before it. Returns the new ledger version.
    pub async fn down(&self, version: &str) -> Result<String> {
        let mut conn = self.db.connection().await;
        self.run(&mut **conn, Direction::Down, version).await
    }

    /// The version a `down` of `version` lands on.
    pub fn previous(&self, version: &str) -> Result<String> {
        self.set.previous(version, self.db.baseline())
    }

    /// Applies, in order, every migration newer than the ledger version.
    ///
    /// Stops at the first failure; migrations applied before it stay
    /// applied and recorded.
    pub async fn run_batch(&self) -> Result<BatchReport> {
        let table = self.model.table();
        let mut conn = self.db.connection().await;

        let current = ledger::get_version(&mut **conn, table)
            .await?
            .unwrap_or_else(|| self.db.baseline().to_string());

        let pending = self.set.pending(&current)?;
        let mut report = BatchReport {
            applied: Vec::with_capacity(pending.len()),
            version: current,
        };

        for (key, _) in pending {
            report.version = self.run(&mut **conn, Direction::Up, key.token()).await?;
            report.applied.push(key.key().to_string());
        }

        tracing::info!(
            table,
            applied = report.applied.len(),
            version = %report.version,
            "migration batch finished"
        );

        Ok(report)
    }

    async fn run(
        &self,
        conn: &mut dyn Connection,
        direction: Direction,
        version: &str,
    ) -> Result<String> {
        let table = self.model.table();
        ledger::check_table(table)?;
        let (key, migration) = self.set.find(version)?;

        let body = match direction {
            Direction::Up => &migration.up,
            Direction::Down => migration.down.as_ref().ok_or_else(|| {
                Error::invalid_migration(format!("migration `{key}` cannot be reverted"))
            })?,
        };

        let failed = |err: Error| err.context(err!("migration `{key}` ({direction}) failed"));

        let mut queue = QueueingSink::new();
        {
            let mut ops = Operations::new(Planner::new(&self.db, &self.model), &mut queue);
            body(&mut ops).map_err(failed)?;
        }

        let steps = queue.drain(conn).await.map_err(failed)?;

        let next = match direction {
            Direction::Up => key.token().to_string(),
            Direction::Down => self.set.previous(version, self.db.baseline())?,
        };

        ledger::set_version(conn, table, &next).await.map_err(failed)?;

        tracing::info!(table, migration = %key, %direction, steps, version = %next, "migration applied");
        Ok(next)
    }
}
