//! Schema changes: ad hoc alterations and versioned migrations.
//!
//! A migration body is a plain synchronous function. Each operation it
//! calls only records the statements it needs; once the body returns the
//! recorded statements are drained over the connection one at a time, in
//! call order, and the version ledger is updated only if all of them
//! succeeded.

mod alteration;
pub use alteration::Alteration;

mod operations;
pub use operations::Operations;

mod plan;
pub use plan::KeySpec;

mod runner;
pub use runner::{BatchReport, Direction, Migrator};

mod set;
pub use set::{Migration, MigrationFn, MigrationSet, MigrationSetBuilder, VersionKey};

mod sink;
pub use sink::{DirectSink, QueueingSink, StatementSink, Step};
