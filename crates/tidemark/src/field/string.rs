use crate::Result;

use super::invalid_option;

use tidemark_core::{schema::FieldRecord, validate::TypeCheck, Validator};

use std::fmt;

const NAMED_SIZES: [&str; 3] = ["tiny", "medium", "long"];

#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    pub size: Option<Size>,

    /// Defaults to `varchar` for a numeric size and `text` otherwise.
    pub ty: Option<StringType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Size {
    /// A length in characters (or bytes for binary types).
    Length(u32),

    /// A size prefix for `text` and `blob`: `tiny`, `medium` or `long`,
    /// e.g. `medium` for `MEDIUMTEXT`.
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringType {
    Text,
    Varchar,
    Char,
    Blob,
    Binary,
    Varbinary,
}

impl StringOptions {
    pub fn sized(ty: StringType, length: u32) -> StringOptions {
        StringOptions {
            size: Some(Size::Length(length)),
            ty: Some(ty),
        }
    }

    pub(super) fn ty(&self) -> StringType {
        match (self.ty, &self.size) {
            (Some(ty), _) => ty,
            (None, Some(Size::Length(_))) => StringType::Varchar,
            (None, _) => StringType::Text,
        }
    }

    pub(super) fn record(&self, field: &str) -> Result<FieldRecord> {
        let ty = self.ty();

        let mut record = match &self.size {
            Some(Size::Length(length)) => FieldRecord::new(format!("{ty}({length})"))
                .validator(Validator::max_length(*length as usize)),
            Some(Size::Named(size)) => {
                if !matches!(ty, StringType::Text | StringType::Blob) {
                    return Err(invalid_option(
                        field,
                        format!("type mismatch: {ty} cannot take a named size"),
                    ));
                }
                if !NAMED_SIZES.contains(&size.to_lowercase().as_str()) {
                    return Err(invalid_option(
                        field,
                        format!("unknown size `{size}`, expected one of {}", NAMED_SIZES.join(", ")),
                    ));
                }
                FieldRecord::new(format!("{size}{ty}"))
            }
            None if matches!(ty, StringType::Char | StringType::Varchar) => {
                return Err(invalid_option(
                    field,
                    format!("type mismatch: {ty} must be set with a size"),
                ));
            }
            None => FieldRecord::new(ty.to_string()),
        };

        if !matches!(ty, StringType::Binary | StringType::Varbinary) {
            record.validators.insert(0, Validator::Type(TypeCheck::String));
        }

        record.sql = record.sql.to_uppercase();
        Ok(record)
    }
}

impl fmt::Display for StringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StringType::Text => "text",
            StringType::Varchar => "varchar",
            StringType::Char => "char",
            StringType::Blob => "blob",
            StringType::Binary => "binary",
            StringType::Varbinary => "varbinary",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{tests::compile, Field, Unique};
    use tidemark_core::SchemaErrorKind;
    use pretty_assertions::assert_eq;

    fn names(record: &FieldRecord) -> Vec<&str> {
        record.validators.iter().map(Validator::name).collect()
    }

    #[test]
    fn text_by_default() {
        let record = compile(&Field::text(), "bio").unwrap();
        assert_eq!(record.sql, "TEXT");
        assert_eq!(names(&record), ["type.string"]);
    }

    #[test]
    fn numeric_size_is_varchar() {
        let options = StringOptions {
            size: Some(Size::Length(128)),
            ty: None,
        };
        let record = compile(&Field::string(options), "name").unwrap();
        assert_eq!(record.sql, "VARCHAR(128)");
        assert_eq!(names(&record), ["type.string", "length"]);
        assert!(matches!(
            record.validators[1],
            Validator::Length { min: None, max: Some(128) }
        ));
    }

    #[test]
    fn named_size() {
        let options = StringOptions {
            size: Some(Size::Named("medium".into())),
            ty: None,
        };
        assert_eq!(compile(&Field::string(options), "body").unwrap().sql, "MEDIUMTEXT");

        let options = StringOptions {
            size: Some(Size::Named("long".into())),
            ty: Some(StringType::Blob),
        };
        assert_eq!(compile(&Field::string(options), "body").unwrap().sql, "LONGBLOB");
    }

    #[test]
    fn named_size_only_on_text_and_blob() {
        let options = StringOptions {
            size: Some(Size::Named("medium".into())),
            ty: Some(StringType::Varchar),
        };
        let err = compile(&Field::string(options), "body").unwrap_err();
        assert_eq!(err.schema_error_kind(), Some(SchemaErrorKind::InvalidOption));
        assert!(err.to_string().contains("varchar cannot take a named size"), "{err}");

        let options = StringOptions {
            size: Some(Size::Named("huge".into())),
            ty: None,
        };
        let err = compile(&Field::string(options), "body").unwrap_err();
        assert_eq!(err.schema_error_kind(), Some(SchemaErrorKind::InvalidOption));
        assert!(err.to_string().contains("unknown size `huge`"), "{err}");

        let options = StringOptions {
            size: Some(Size::Named("Tiny".into())),
            ty: None,
        };
        assert_eq!(compile(&Field::string(options), "body").unwrap().sql, "TINYTEXT");
    }

    #[test]
    fn char_requires_size() {
        let options = StringOptions {
            size: None,
            ty: Some(StringType::Char),
        };
        let err = compile(&Field::string(options), "code").unwrap_err();
        assert_eq!(err.schema_error_kind(), Some(SchemaErrorKind::InvalidOption));
        assert!(err.to_string().contains("type mismatch: char must be set with a size"));
    }

    #[test]
    fn binary_skips_string_check() {
        let record = compile(&Field::varbinary(16), "hash").unwrap();
        assert_eq!(record.sql, "VARBINARY(16)");
        assert_eq!(names(&record), ["length"]);

        let record = compile(&Field::binary(16), "hash").unwrap();
        assert_eq!(record.sql, "BINARY(16)");
    }

    #[test]
    fn blob_alias() {
        let record = compile(&Field::blob(), "data").unwrap();
        assert_eq!(record.sql, "BLOB");
        assert_eq!(names(&record), ["type.string"]);
    }

    #[test]
    fn unique_text_needs_a_prefix() {
        let err = compile(&Field::text().unique(Unique::Key), "bio").unwrap_err();
        assert!(err.is_invalid_unique_constraint());

        let record = compile(&Field::text().unique(Unique::Prefix(128)), "bio").unwrap();
        assert_eq!(record.keysql.as_deref(), Some("UNIQUE KEY `bio` (`bio`(128))"));
    }

    #[test]
    fn required_with_default() {
        let record = compile(&Field::char(2).required().default("us"), "country").unwrap();
        assert_eq!(record.sql, r#"CHAR(2) NOT NULL DEFAULT "us""#);
        assert_eq!(names(&record), ["required", "type.string", "length"]);
    }
}
