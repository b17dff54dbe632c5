use crate::{db, Result};

use tidemark_core::{async_trait, driver::Connection, err, Value};
use tidemark_sql::{column_definition, ShowCreateTable, Statement};

use std::{collections::VecDeque, fmt};

/// One unit of work sent to the connection.
#[derive(Debug, Clone)]
pub enum Step {
    /// A single statement with its bound parameters.
    Execute { sql: String, params: Vec<Value> },

    /// Reads the live table definition, then issues a `CHANGE COLUMN` that
    /// keeps the column's definition under the new name.
    RenameColumn {
        table: String,
        from: String,
        to: String,
    },
}

impl Step {
    pub fn statement(stmt: &Statement) -> Step {
        let (sql, params) = db::render(stmt);
        Step::Execute { sql, params }
    }

    pub fn rename_column(table: &str, from: &str, to: &str) -> Step {
        Step::RenameColumn {
            table: table.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub(crate) async fn run(&self, conn: &mut dyn Connection) -> Result<()> {
        match self {
            Step::Execute { sql, params } => {
                tracing::debug!(sql = %sql, params = params.len(), "exec");
                conn.exec(sql, params.clone()).await?;
            }
            Step::RenameColumn { table, from, to } => {
                let response = db::exec(conn, &Statement::show_create_table(table)).await?;

                let Some(Value::String(create_table)) = response.first_value(ShowCreateTable::COLUMN)
                else {
                    return Err(err!("no table definition returned for `{table}`"));
                };

                let definition = column_definition(create_table, table, from, to)?;
                db::exec(conn, &Statement::rename_column(table, from, definition)).await?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Execute { sql, .. } => f.write_str(sql),
            Step::RenameColumn { table, from, to } => {
                write!(f, "rename `{from}` to `{to}` in `{table}`")
            }
        }
    }
}

/// Where operations send their steps.
#[async_trait]
pub trait StatementSink: Send {
    async fn submit(&mut self, step: Step) -> Result<()>;
}

/// Runs each step as soon as it is submitted.
#[derive(Debug)]
pub struct DirectSink<'a> {
    conn: &'a mut dyn Connection,
}

impl<'a> DirectSink<'a> {
    pub fn new(conn: &'a mut dyn Connection) -> DirectSink<'a> {
        DirectSink { conn }
    }
}

#[async_trait]
impl StatementSink for DirectSink<'_> {
    async fn submit(&mut self, step: Step) -> Result<()> {
        step.run(&mut *self.conn).await
    }
}

/// Buffers steps until [`drain`](QueueingSink::drain) is called.
#[derive(Debug, Default)]
pub struct QueueingSink {
    queue: VecDeque<Step>,
}

impl QueueingSink {
    pub fn new() -> QueueingSink {
        QueueingSink::default()
    }

    pub fn push(&mut self, step: Step) {
        self.queue.push_back(step);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.queue.iter()
    }

    /// Runs the queued steps in order, each one finishing before the next
    /// is sent. Returns how many ran.
    ///
    /// The first failure stops the drain: the remaining steps are discarded
    /// and the error is returned.
    pub async fn drain(&mut self, conn: &mut dyn Connection) -> Result<usize> {
        let mut ran = 0;

        while let Some(step) = self.queue.pop_front() {
            if let Err(err) = step.run(conn).await {
                let abandoned = self.queue.len();
                self.queue.clear();

                if abandoned > 0 {
                    tracing::warn!(step = %step, abandoned, "drain stopped, remaining steps abandoned");
                }
                return Err(err);
            }
            ran += 1;
        }

        Ok(ran)
    }
}

#[async_trait]
impl StatementSink for QueueingSink {
    async fn submit(&mut self, step: Step) -> Result<()> {
        self.push(step);
        Ok(())
    }
}
