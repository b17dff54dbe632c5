//! An in-memory stand-in for a MySQL server.
//!
//! It understands exactly the statements Tidemark sends: `CREATE TABLE IF
//! NOT EXISTS`, the `ALTER TABLE` forms, `SHOW CREATE TABLE`, and the
//! ledger's insert, update and select. Everything else is logged and
//! accepted.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    io,
    sync::{Arc, Mutex, MutexGuard},
};
use tidemark::{
    async_trait,
    driver::{Response, Row},
    Connection, Db, Driver, Error, ModelRef, Result, Value, LEDGER_TABLE,
};

#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<(String, String)>,
    pub keys: Vec<String>,
    pub engine: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<String, Table>,

    /// `None` until the ledger table is created.
    ledger: Option<BTreeMap<String, String>>,

    log: Vec<String>,

    fail_on: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeMySql {
    state: Arc<Mutex<State>>,
}

#[derive(Debug)]
struct FakeConnection {
    state: Arc<Mutex<State>>,
}

impl FakeMySql {
    pub fn new() -> FakeMySql {
        FakeMySql::default()
    }

    /// A handle with `models` registered, connected to this server.
    pub async fn db(&self, models: &[&ModelRef]) -> Db {
        let mut builder = Db::builder();
        for model in models {
            builder.register((*model).clone());
        }
        builder.build(self.clone()).await.unwrap()
    }

    /// Every statement received so far.
    pub fn log(&self) -> Vec<String> {
        self.lock().log.clone()
    }

    /// Received statements, skipping the ledger's bookkeeping.
    pub fn ddl(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter(|sql| !sql.contains(&format!("`{LEDGER_TABLE}`")))
            .collect()
    }

    pub fn clear_log(&self) {
        self.lock().log.clear();
    }

    /// Fails every statement containing `needle`.
    pub fn fail_on(&self, needle: &str) {
        self.lock().fail_on = Some(needle.to_string());
    }

    pub fn table(&self, name: &str) -> Option<Table> {
        self.lock().tables.get(name).cloned()
    }

    pub fn columns(&self, table: &str) -> Vec<String> {
        self.table(table)
            .map(|table| table.columns.into_iter().map(|(name, _)| name).collect())
            .unwrap_or_default()
    }

    pub fn column(&self, table: &str, column: &str) -> Option<String> {
        self.table(table)?
            .columns
            .into_iter()
            .find(|(name, _)| name == column)
            .map(|(_, definition)| definition)
    }

    pub fn ledger(&self, table: &str) -> Option<String> {
        self.lock().ledger.as_ref()?.get(table).cloned()
    }

    pub fn set_ledger(&self, table: &str, version: &str) {
        self.lock()
            .ledger
            .get_or_insert_with(BTreeMap::new)
            .insert(table.to_string(), version.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl Driver for FakeMySql {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(FakeConnection {
            state: self.state.clone(),
        }))
    }
}

#[async_trait]
impl Connection for FakeConnection {
    async fn exec(&mut self, sql: &str, params: Vec<Value>) -> Result<Response> {
        self.state.lock().unwrap().exec(sql, params)
    }
}

fn failure(message: impl Into<String>) -> Error {
    Error::driver(io::Error::new(io::ErrorKind::Other, message.into()))
}

impl State {
    fn exec(&mut self, sql: &str, params: Vec<Value>) -> Result<Response> {
        self.log.push(sql.to_string());

        if let Some(needle) = &self.fail_on {
            if sql.contains(needle.as_str()) {
                return Err(failure(format!("injected failure: {sql}")));
            }
        }

        if let Some(rest) = sql.strip_prefix("CREATE TABLE IF NOT EXISTS ") {
            return self.create_table(rest);
        }
        if let Some(rest) = sql.strip_prefix("ALTER TABLE ") {
            return self.alter_table(rest);
        }
        if let Some(rest) = sql.strip_prefix("SHOW CREATE TABLE ") {
            return self.show_create_table(rest);
        }
        if sql.starts_with(&format!("INSERT INTO `{LEDGER_TABLE}`")) {
            return self.ledger_insert(&params);
        }
        if sql.starts_with(&format!("UPDATE `{LEDGER_TABLE}`")) {
            return self.ledger_update(&params);
        }
        if sql.starts_with(&format!("SELECT `version` FROM `{LEDGER_TABLE}`")) {
            return self.ledger_select(&params);
        }

        Ok(Response::count(0))
    }

    fn create_table(&mut self, rest: &str) -> Result<Response> {
        let (name, rest) = ident(rest);

        if name == LEDGER_TABLE {
            self.ledger.get_or_insert_with(BTreeMap::new);
            return Ok(Response::count(0));
        }
        if self.tables.contains_key(&name) {
            return Ok(Response::count(0));
        }

        let rest = rest.trim_start();
        let close = matching_paren(rest);
        let body = &rest[1..close];
        let engine = rest[close + 1..]
            .trim()
            .strip_prefix("ENGINE = ")
            .map(str::to_string);

        let mut table = Table {
            columns: vec![],
            keys: vec![],
            engine,
        };

        for part in split_top_level(body) {
            if part.starts_with('`') {
                let (column, definition) = ident(&part);
                table.columns.push((column, definition.trim().to_string()));
            } else {
                table.keys.push(part);
            }
        }

        self.tables.insert(name, table);
        Ok(Response::count(0))
    }

    fn alter_table(&mut self, rest: &str) -> Result<Response> {
        let (name, rest) = ident(rest);
        let rest = rest.trim_start();

        let Some(table) = self.tables.get_mut(&name) else {
            return Err(failure(format!("Table '{name}' doesn't exist")));
        };

        if let Some(engine) = rest.strip_prefix("ENGINE = ") {
            table.engine = Some(engine.to_string());
        } else if let Some(column) = rest.strip_prefix("DROP COLUMN ") {
            let (column, _) = ident(column);
            let before = table.columns.len();
            table.columns.retain(|(name, _)| *name != column);
            if table.columns.len() == before {
                return Err(failure(format!("Can't DROP '{column}'; check that column/key exists")));
            }
        } else if let Some(change) = rest
            .strip_prefix("CHANGE COLUMN ")
            .or_else(|| rest.strip_prefix("CHANGE "))
        {
            let (from, change) = ident(change);
            let (to, definition) = ident(change.trim_start());
            let Some(column) = table.columns.iter_mut().find(|(name, _)| *name == from) else {
                return Err(failure(format!("Unknown column '{from}' in '{name}'")));
            };
            *column = (to, definition.trim().to_string());
        } else if let Some(added) = rest.strip_prefix("ADD ") {
            if added.starts_with('`') {
                let (column, definition) = ident(added);
                if table.columns.iter().any(|(name, _)| *name == column) {
                    return Err(failure(format!("Duplicate column name '{column}'")));
                }
                table.columns.push((column, definition.trim().to_string()));
            } else {
                table.keys.push(added.to_string());
            }
        }

        Ok(Response::count(0))
    }

    fn show_create_table(&self, rest: &str) -> Result<Response> {
        let (name, _) = ident(rest);
        let Some(table) = self.tables.get(&name) else {
            return Err(failure(format!("Table '{name}' doesn't exist")));
        };

        let lines = table
            .columns
            .iter()
            .map(|(column, definition)| format!("  `{column}` {definition}"))
            .chain(table.keys.iter().map(|key| format!("  {key}")))
            .collect::<Vec<_>>()
            .join(",\n");
        let engine = table.engine.as_deref().unwrap_or("InnoDB");
        let ddl = format!("CREATE TABLE `{name}` (\n{lines}\n) ENGINE={engine}");

        let mut row = Row::new();
        row.insert("Table".into(), Value::from(name));
        row.insert("Create Table".into(), Value::from(ddl));
        Ok(Response::rows(vec![row]))
    }

    fn ledger_insert(&mut self, params: &[Value]) -> Result<Response> {
        let ledger = self.ledger_rows()?;
        let table = text(&params[0]);
        if ledger.contains_key(&table) {
            return Err(Error::duplicate_key(format!(
                "Duplicate entry '{table}' for key 'PRIMARY'"
            )));
        }
        ledger.insert(table, text(&params[1]));
        Ok(Response::count(1))
    }

    fn ledger_update(&mut self, params: &[Value]) -> Result<Response> {
        let ledger = self.ledger_rows()?;
        let table = text(&params[1]);
        match ledger.get_mut(&table) {
            Some(version) => {
                *version = text(&params[0]);
                Ok(Response::count(1))
            }
            None => Ok(Response::count(0)),
        }
    }

    fn ledger_select(&mut self, params: &[Value]) -> Result<Response> {
        let ledger = self.ledger_rows()?;
        let rows = ledger
            .get(&text(&params[0]))
            .map(|version| {
                let mut row = Row::new();
                row.insert("version".into(), Value::from(version.clone()));
                row
            })
            .into_iter()
            .collect();
        Ok(Response::rows(rows))
    }

    fn ledger_rows(&mut self) -> Result<&mut BTreeMap<String, String>> {
        self.ledger
            .as_mut()
            .ok_or_else(|| failure(format!("Table '{LEDGER_TABLE}' doesn't exist")))
    }
}

fn text(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

/// Splits a leading backtick-quoted identifier from the rest of `sql`.
fn ident(sql: &str) -> (String, &str) {
    let sql = sql.trim_start();
    let inner = &sql[1..];
    let end = inner.find('`').unwrap();
    (inner[..end].to_string(), &inner[end + 1..])
}

/// Index of the parenthesis closing the one `sql` starts with.
fn matching_paren(sql: &str) -> usize {
    let mut depth = 0;
    let mut quoted = None;

    for (i, c) in sql.char_indices() {
        match (quoted, c) {
            (Some(q), c) if c == q => quoted = None,
            (Some(_), _) => {}
            (None, '"' | '\'' | '`') => quoted = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }

    panic!("unbalanced parentheses in `{sql}`");
}

/// Splits on commas outside parentheses and quotes.
fn split_top_level(body: &str) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut depth = 0;
    let mut quoted = None;

    for c in body.chars() {
        match (quoted, c) {
            (Some(q), c) if c == q => quoted = None,
            (Some(_), _) => {}
            (None, '"' | '\'' | '`') => quoted = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth -= 1,
            (None, ',') if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}
