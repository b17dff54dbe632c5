pub mod rename;
pub use rename::column_definition;

pub mod serializer;
pub use serializer::{Params, Serializer};

pub mod stmt;
pub use stmt::{AlterMethod, Filter, Key, Name, ShowCreateTable, Statement};
