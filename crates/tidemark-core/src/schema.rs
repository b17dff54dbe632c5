//! Model declarations and their compiled form.
//!
//! A model declares its schema as an ordered set of field declarations.
//! The [`Registry`] compiles each declaration into a [`FieldRecord`] and
//! caches the resulting [`Fieldspec`] per model.

mod declaration;
pub use declaration::{FieldContext, FieldDeclaration, FieldFactory};

mod fieldspec;
pub use fieldspec::Fieldspec;

mod model;
pub use model::{ModelBuilder, ModelDescriptor, ModelRef, SchemaDeclaration};

mod record;
pub use record::{FieldRecord, Mutator, Mutators};

mod registry;
pub use registry::Registry;
