use crate::Result;

use tidemark_core::{schema::FieldRecord, value, Error, Validator, Value};
use tidemark_sql::{Key, Serializer};

use regex::Regex;
use std::sync::LazyLock;

/// Types whose `DEFAULT` literal must be quoted.
static QUOTED_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)blob|text|char|enum|binary").expect("valid pattern"));

/// Types that cannot be keyed without a prefix length.
static UNSIZED_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(text|blob)$").expect("valid pattern"));

/// Options shared by every helper.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// `Some(false)` makes the field required.
    pub null: Option<bool>,

    pub required: bool,

    pub unique: Option<Unique>,

    /// Column default, rendered as a SQL literal.
    pub default: Option<Value>,
}

/// A unique key on the field's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unique {
    /// Key the whole column. Rejected on unsized types.
    Key,

    /// Key the first `n` characters or bytes of the column. `n` must be
    /// non-zero.
    Prefix(u32),
}

impl FieldOptions {
    /// Applies the options to a helper's base record. `ty` is the helper's
    /// type name, used to decide how the default is written.
    pub(super) fn finish(&self, mut record: FieldRecord, ty: &str, field: &str) -> Result<FieldRecord> {
        if let Some(unique) = self.unique {
            let length = match unique {
                Unique::Key if UNSIZED_TYPE.is_match(record.base_type()) => {
                    return Err(Error::invalid_unique_constraint(field, record.base_type()));
                }
                Unique::Key => None,
                Unique::Prefix(0) => {
                    return Err(super::invalid_option(field, "unique key prefix must be at least 1"));
                }
                Unique::Prefix(length) => Some(length),
            };
            record.keysql = Some(Serializer::mysql().serialize_key(&Key::unique(field, length)));
        }

        if self.null == Some(false) || self.required {
            record.sql.push_str(" NOT NULL");
            record.validators.insert(0, Validator::Require);
        }

        if let Some(default) = &self.default {
            let literal = value::display(default);
            let literal = if QUOTED_TYPE.is_match(ty) {
                quote(&literal)
            } else {
                literal
            };
            record.sql.push_str(" DEFAULT ");
            record.sql.push_str(&literal);
        }

        Ok(record)
    }
}

/// Double-quotes a string literal.
pub(super) fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
