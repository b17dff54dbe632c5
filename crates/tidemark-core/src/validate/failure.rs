use crate::Value;

use indexmap::IndexMap;
use std::fmt;

/// Failures keyed by field name, one per field.
pub type ValidationErrors = IndexMap<String, Failure>;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Name of the rule that failed, e.g. `required` or `type.enum`.
    pub rule: String,

    /// The offending value (`null` when missing).
    pub value: Value,

    /// Field the failure belongs to, set when reported through a document
    /// or a fieldspec.
    pub field: Option<String>,

    /// Bounds of a failed `length` rule.
    pub min: Option<usize>,
    pub max: Option<usize>,

    /// Condition of a failed `required-when` rule.
    pub when: Option<(String, Value)>,

    /// Per-field failures of a nested document.
    pub nested: Vec<Failure>,
}

impl Failure {
    pub fn new(rule: impl Into<String>, value: Value) -> Failure {
        Failure {
            rule: rule.into(),
            value,
            field: None,
            min: None,
            max: None,
            when: None,
            nested: vec![],
        }
    }

    /// Nested failure for `field`, if this is a document failure.
    pub fn nested(&self, field: &str) -> Option<&Failure> {
        self.nested
            .iter()
            .find(|failure| failure.field.as_deref() == Some(field))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{field}: ")?;
        }
        f.write_str(&self.rule)?;

        if !self.nested.is_empty() {
            f.write_str(" [")?;
            for (i, nested) in self.nested.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{nested}")?;
            }
            f.write_str("]")?;
        }

        Ok(())
    }
}
