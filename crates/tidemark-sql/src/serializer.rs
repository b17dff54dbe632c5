#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod key;
mod statement;

use crate::stmt::{Key, Statement};

/// Serialize a statement to a SQL string
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// The MySQL dialect: backtick identifiers, `?` placeholders.
    pub fn mysql() -> Serializer {
        Serializer { _priv: () }
    }

    /// Renders `stmt`, pushing its values onto `params`.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);
        ret
    }

    /// Renders a key clause on its own, as stored in a field's `keysql`.
    pub fn serialize_key(&self, key: &Key) -> String {
        let mut ret = String::new();
        let mut params = NoParams;

        let mut fmt = Formatter {
            dst: &mut ret,
            params: &mut params,
        };

        key.to_sql(&mut fmt);
        ret
    }

    /// Quotes an identifier.
    pub fn ident(&self, name: &str) -> String {
        let mut ret = String::new();
        let mut params = NoParams;

        let mut fmt = Formatter {
            dst: &mut ret,
            params: &mut params,
        };

        Ident(name).to_sql(&mut fmt);
        ret
    }
}

struct NoParams;

impl Params for NoParams {
    fn push(&mut self, _: &crate::stmt::Value) -> Placeholder {
        Placeholder(0)
    }
}
