mod response;
pub use response::{Response, Row};

use crate::{async_trait, Result, Value};

use std::fmt::Debug;

/// Opens connections to a database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single live database connection.
///
/// Statements are executed one at a time; callers serialize access.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Executes one SQL statement with positional `?` parameters.
    ///
    /// Drivers report a primary-key collision as [`Error::duplicate_key`]
    /// and every other failure as [`Error::driver`].
    ///
    /// [`Error::duplicate_key`]: crate::Error::duplicate_key
    /// [`Error::driver`]: crate::Error::driver
    async fn exec(&mut self, sql: &str, params: Vec<Value>) -> Result<Response>;
}
