//! Declarative MySQL schemas with versioned, reversible migrations.
//!
//! Models declare their fields once. From that declaration Tidemark derives
//! the `CREATE TABLE` statement, per-field validation, and value conversion
//! between memory and storage. Migrations change a model's table one
//! column at a time, and a ledger table remembers which version each table
//! is at.

pub mod db;
pub use db::Db;

pub mod field;
pub use field::{Field, FieldBuilder, FieldOptions, Unique};

pub mod ledger;
pub use ledger::LEDGER_TABLE;

pub mod migration;
pub use migration::{
    Alteration, BatchReport, Direction, KeySpec, Migration, MigrationSet, Migrator, Operations,
    VersionKey,
};

pub use tidemark_core::{
    async_trait, bail, driver, err,
    schema::{self, FieldDeclaration, FieldFactory, FieldRecord},
    validate, Attributes, Connection, Driver, Error, Fieldspec, ModelDescriptor, ModelRef,
    Registry, Result, SchemaErrorKind, Validator, Value,
};
