use super::{Formatter, Params, ToSql};

use crate::stmt::Name;

/// A backtick-quoted identifier.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('`');
        for c in self.0.as_ref().chars() {
            // Backticks inside an identifier are doubled
            if c == '`' {
                f.dst.push('`');
            }
            f.dst.push(c);
        }
        f.dst.push('`');
    }
}

impl ToSql for &Name {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        Ident(self.as_str()).to_sql(f);
    }
}
