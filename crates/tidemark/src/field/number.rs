use tidemark_core::{schema::FieldRecord, validate::TypeCheck, Validator};

use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    /// Integer width prefix, e.g. `Big` for `BIGINT`.
    pub length: Option<IntSize>,

    pub ty: NumberType,

    pub unsigned: bool,

    /// `Some(true)` adds `SIGNED`; `Some(false)` is the same as `unsigned`.
    pub signed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntSize {
    Tiny,
    Small,
    Medium,
    Big,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberType {
    #[default]
    Int,
    Double,
    Float,
    Boolean,
}

impl NumberOptions {
    pub fn of(ty: NumberType) -> NumberOptions {
        NumberOptions {
            ty,
            ..Default::default()
        }
    }

    pub(super) fn record(&self) -> FieldRecord {
        let mut sql = String::new();

        if let Some(length) = self.length {
            sql.push_str(&length.to_string());
        }
        sql.push_str(&self.ty.to_string());

        if self.unsigned || self.signed == Some(false) {
            sql.push_str(" unsigned");
        }
        if self.signed == Some(true) {
            sql.push_str(" signed");
        }

        FieldRecord::new(sql).validator(Validator::Type(TypeCheck::Number))
    }
}

impl fmt::Display for IntSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntSize::Tiny => "tiny",
            IntSize::Small => "small",
            IntSize::Medium => "medium",
            IntSize::Big => "big",
        })
    }
}

impl fmt::Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberType::Int => "int",
            NumberType::Double => "double",
            NumberType::Float => "float",
            NumberType::Boolean => "boolean",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{tests::compile, Field};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_int() {
        let record = compile(&Field::int(), "age").unwrap();
        assert_eq!(record.sql, "INT");
        assert_eq!(record.validators[0].name(), "type.number");
    }

    #[test]
    fn sized_unsigned() {
        let options = NumberOptions {
            length: Some(IntSize::Tiny),
            unsigned: true,
            ..Default::default()
        };
        let record = compile(&Field::number(options), "rank").unwrap();
        assert_eq!(record.sql, "TINYINT UNSIGNED");
    }

    #[test]
    fn signed_flag() {
        let signed = NumberOptions {
            length: Some(IntSize::Big),
            signed: Some(true),
            ..Default::default()
        };
        assert_eq!(compile(&Field::number(signed), "n").unwrap().sql, "BIGINT SIGNED");

        let unsigned = NumberOptions {
            signed: Some(false),
            ..NumberOptions::of(NumberType::Double)
        };
        assert_eq!(compile(&Field::number(unsigned), "n").unwrap().sql, "DOUBLE UNSIGNED");
    }

    #[test]
    fn aliases() {
        assert_eq!(compile(&Field::float(), "n").unwrap().sql, "FLOAT");
        assert_eq!(compile(&Field::double(), "n").unwrap().sql, "DOUBLE");
        assert_eq!(compile(&Field::boolean(), "n").unwrap().sql, "BOOLEAN");
    }

    #[test]
    fn options_are_upper_cased_too() {
        let record = compile(&Field::boolean().required().default(false), "active").unwrap();
        assert_eq!(record.sql, "BOOLEAN NOT NULL DEFAULT FALSE");
        assert!(matches!(record.validators[0], Validator::Require));
    }
}
