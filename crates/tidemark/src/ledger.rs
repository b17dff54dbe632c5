//! The version ledger: one row per migrated table recording the version its
//! schema is at.
//!
//! MySQL has no upsert that reports whether a row existed, so writes try an
//! insert first and fall back to an update on a duplicate key.

use crate::{db::exec, Result};

use tidemark_core::{driver::Connection, schema::FieldRecord, Error, Fieldspec, SchemaErrorKind, Value};
use tidemark_sql::{Filter, Key, Serializer, Statement};

/// Name of the ledger table.
pub const LEDGER_TABLE: &str = "_schema_version";

const TABLE: &str = "table";
const VERSION: &str = "version";

/// Rejects user tables named after the ledger.
pub(crate) fn check_table(table: &str) -> Result<()> {
    if table == LEDGER_TABLE {
        return Err(Error::invalid_schema(
            SchemaErrorKind::InvalidOption,
            format!("table name `{LEDGER_TABLE}` is reserved for the version ledger"),
        ));
    }
    Ok(())
}

fn create_ledger() -> Statement {
    let primary_key = Serializer::mysql().serialize_key(&Key::primary(TABLE));

    let fieldspec: Fieldspec = [
        (
            TABLE.to_string(),
            FieldRecord::new("VARCHAR(255) NOT NULL").keysql(primary_key),
        ),
        (VERSION.to_string(), FieldRecord::new("VARCHAR(255) NOT NULL")),
    ]
    .into_iter()
    .collect();

    Statement::create_table(LEDGER_TABLE, &fieldspec, None)
}

/// Creates the ledger table if it does not exist yet.
pub(crate) async fn ensure_table(conn: &mut dyn Connection) -> Result<()> {
    exec(conn, &create_ledger()).await?;
    Ok(())
}

/// Records `version` for `table`, inserting or updating its row.
pub(crate) async fn set_version(conn: &mut dyn Connection, table: &str, version: &str) -> Result<()> {
    ensure_table(conn).await?;

    let insert = Statement::insert(
        LEDGER_TABLE,
        [
            (TABLE, Value::from(table)),
            (VERSION, Value::from(version)),
        ],
    );

    match exec(conn, &insert).await {
        Ok(_) => {}
        Err(err) if err.is_duplicate_key() => {
            let update = Statement::update(
                LEDGER_TABLE,
                [(VERSION, Value::from(version))],
                Filter::eq(TABLE, table),
            );
            exec(conn, &update).await?;
        }
        Err(err) => return Err(err),
    }

    tracing::debug!(table, version, "ledger updated");
    Ok(())
}

/// The version recorded for `table`, or `None` when it has no row.
pub(crate) async fn get_version(conn: &mut dyn Connection, table: &str) -> Result<Option<String>> {
    ensure_table(conn).await?;

    let select = Statement::select(LEDGER_TABLE, &[VERSION], Filter::eq(TABLE, table));
    let response = exec(conn, &select).await?;

    let version = match response.first_value(VERSION) {
        None | Some(Value::Null) => None,
        Some(Value::String(version)) => Some(version.clone()),
        Some(other) => Some(other.to_string()),
    };

    tracing::debug!(table, version = ?version, "ledger read");
    Ok(version)
}
