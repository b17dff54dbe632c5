pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError, SchemaErrorKind};

pub mod schema;
pub use schema::{Fieldspec, ModelDescriptor, ModelRef, Registry};

pub mod validate;
pub use validate::Validator;

pub mod value;
pub use value::{Attributes, Value};

/// A Result type alias that uses Tidemark's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
