use super::{Formatter, Params, ToSql};

use crate::stmt::Key;

impl ToSql for &Key {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Key::Primary { column } => fmt!(f, "PRIMARY KEY (" column ")"),
            Key::Index {
                kind,
                name,
                column,
                length,
            } => {
                if let Some(kind) = kind {
                    fmt!(f, kind.to_uppercase().as_str() " ");
                }
                fmt!(f, "KEY " name " (" column);
                if let Some(length) = length {
                    fmt!(f, "(" length.to_string().as_str() ")");
                }
                fmt!(f, ")");
            }
            Key::Foreign {
                name,
                column,
                table,
                references,
            } => fmt!(
                f, "FOREIGN KEY " name " (" column ") REFERENCES " table " (" references ")"
            ),
        }
    }
}
