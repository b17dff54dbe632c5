use super::Name;

/// A key clause, as used in `CREATE TABLE` and `ALTER TABLE ... ADD`.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// `PRIMARY KEY (<column>)`
    Primary { column: Name },

    /// `[<kind>] KEY <name> (<column>[(<length>)])`
    Index {
        /// Key kind such as `UNIQUE` or `FULLTEXT`; plain `KEY` when absent.
        kind: Option<String>,
        name: Name,
        column: Name,
        /// Prefix length, required by unsized column types.
        length: Option<u32>,
    },

    /// `FOREIGN KEY <name> (<column>) REFERENCES <table> (<references>)`
    Foreign {
        name: Name,
        column: Name,
        table: Name,
        references: Name,
    },
}

impl Key {
    pub fn primary(column: &str) -> Key {
        Key::Primary {
            column: Name::from(column),
        }
    }

    /// A unique key named after its column.
    pub fn unique(column: &str, length: Option<u32>) -> Key {
        Key::Index {
            kind: Some("unique".to_string()),
            name: Name::from(column),
            column: Name::from(column),
            length,
        }
    }

    /// A foreign key from `column` to `references` in `table`, named
    /// `<table>_fkey`.
    pub fn foreign(column: &str, table: &str, references: &str) -> Key {
        Key::Foreign {
            name: Name::from(format!("{table}_fkey")),
            column: Name::from(column),
            table: Name::from(table),
            references: Name::from(references),
        }
    }
}
