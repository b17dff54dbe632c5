use super::Step;
use crate::{db::creation_order, Db, Result};

use tidemark_core::{
    schema::{FieldContext, FieldDeclaration},
    ModelRef,
};
use tidemark_sql::{AlterMethod, Key, Name, Statement};

/// Options for [`add_key`](super::Operations::add_key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpec {
    /// `UNIQUE`, `FULLTEXT`, ...; a plain `KEY` when absent.
    pub kind: Option<String>,

    /// Column the key covers, when it differs from the key's name.
    pub name: Option<String>,

    /// Prefix length.
    pub length: Option<u32>,
}

impl KeySpec {
    pub fn unique() -> KeySpec {
        KeySpec::kind("unique")
    }

    pub fn kind(kind: impl Into<String>) -> KeySpec {
        KeySpec {
            kind: Some(kind.into()),
            ..KeySpec::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> KeySpec {
        self.name = Some(name.into());
        self
    }

    pub fn length(mut self, length: u32) -> KeySpec {
        self.length = Some(length);
        self
    }

    fn into_key(self, column: &str) -> Key {
        let covered = self.name.as_deref().unwrap_or(column);
        Key::Index {
            kind: self.kind,
            name: Name::from(column),
            column: Name::from(covered),
            length: self.length,
        }
    }
}

/// Turns operations on one model's table into steps.
#[derive(Debug, Clone, Copy)]
pub(super) struct Planner<'a> {
    db: &'a Db,
    model: &'a ModelRef,
}

impl<'a> Planner<'a> {
    pub(super) fn new(db: &'a Db, model: &'a ModelRef) -> Planner<'a> {
        Planner { db, model }
    }

    pub(super) fn table(&self) -> &'a str {
        self.model.table()
    }

    /// Compiles one field and returns the steps adding or changing it.
    ///
    /// Tables the field depends on are created first.
    pub(super) fn field(
        &self,
        method: AlterMethod,
        name: &str,
        declaration: &FieldDeclaration,
    ) -> Result<Vec<Step>> {
        let registry = self.db.registry();
        let record = declaration.compile(&FieldContext::new(name, registry))?;

        let mut steps = vec![];

        if let Some(dependency) = &record.depends_on {
            for (model, fieldspec) in creation_order(registry, dependency)? {
                let engine = self.db.engine_for(&model);
                steps.push(Step::statement(&Statement::create_table(
                    model.table(),
                    &fieldspec,
                    Some(engine),
                )));
            }
        }

        steps.extend(
            Statement::alter_field(self.table(), method, name, &record)
                .iter()
                .map(Step::statement),
        );

        Ok(steps)
    }

    pub(super) fn drop_column(&self, name: &str) -> Step {
        Step::statement(&Statement::drop_column(self.table(), name))
    }

    pub(super) fn rename_column(&self, from: &str, to: &str) -> Step {
        Step::rename_column(self.table(), from, to)
    }

    pub(super) fn execute_sql(&self, sql: String) -> Step {
        Step::statement(&Statement::raw(sql))
    }

    pub(super) fn add_key(&self, column: &str, spec: KeySpec) -> Step {
        Step::statement(&Statement::add_key(self.table(), spec.into_key(column)))
    }

    pub(super) fn engine(&self, engine: &str) -> Step {
        Step::statement(&Statement::engine(self.table(), engine))
    }
}
