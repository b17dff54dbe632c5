//! Column renames against the live table definition.
//!
//! MySQL's `CHANGE COLUMN` needs the full column definition, which the
//! declared schema does not retain once a column has been altered. The
//! definition is instead read back from `SHOW CREATE TABLE` output.

use crate::serializer::Serializer;

use regex::Regex;
use tidemark_core::{Error, Result};

/// Finds the definition of column `from` in `create_table` (the output of
/// `SHOW CREATE TABLE`) and returns it under the name `to`.
///
/// ```
/// let ddl = "CREATE TABLE `user` (\n  `id` bigint NOT NULL AUTO_INCREMENT,\n  `nick` text,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB";
/// let def = tidemark_sql::column_definition(ddl, "user", "nick", "handle").unwrap();
/// assert_eq!(def, "`handle` text");
/// ```
pub fn column_definition(create_table: &str, table: &str, from: &str, to: &str) -> Result<String> {
    let serializer = Serializer::mysql();
    let quoted_from = serializer.ident(from);
    let quoted_to = serializer.ident(to);

    let pattern = format!(r"(?m)^\s*({}\s.*?),?\s*$", regex::escape(&quoted_from));
    let re = Regex::new(&pattern)
        .map_err(|err| tidemark_core::err!("invalid column pattern: {err}"))?;

    let Some(captures) = re.captures(create_table) else {
        return Err(Error::column_not_found(table, from));
    };

    let definition = &captures[1];
    Ok(format!("{quoted_to}{}", &definition[quoted_from.len()..]))
}
