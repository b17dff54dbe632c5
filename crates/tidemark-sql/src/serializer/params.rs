use super::{Formatter, ToSql};

use crate::stmt::Value;

pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// Position of a bound parameter, starting at 1.
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f);
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // MySQL placeholders are positional and unnumbered
        f.dst.push('?');
    }
}
