//! Field validators.
//!
//! Validators run in declaration order and the first failure wins for a
//! field. Every predicate except the `Require` family passes on a missing
//! value, so `Require` is what makes a field mandatory.

mod codec;
pub use codec::Codec;

mod failure;
pub use failure::{Failure, ValidationErrors};

use crate::{value, Attributes, Value};

use indexmap::IndexMap;
use regex::Regex;
use std::{
    fmt,
    sync::{Arc, LazyLock},
};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?",
    )
    .expect("email pattern is valid")
});

/// Validators for a set of named fields, in declaration order.
pub type FieldValidators = IndexMap<String, Vec<Validator>>;

#[derive(Clone)]
pub enum Validator {
    /// Fails when the value is missing.
    Require,

    /// Fails when the value is missing and `field` in the same record equals
    /// `is`.
    RequireWhen { field: String, is: Value },

    /// Bounds the length of a string (in characters) or an array.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Fails when the value's text does not match.
    Regexp(Regex),

    /// Fails when the value's text contains no email address.
    Email,

    /// Fails when the codec cannot serialize the value.
    Serializable(Codec),

    /// Validates a nested document field by field.
    Document(FieldValidators),

    /// Checks the dynamic type of the value.
    Type(TypeCheck),

    /// A user-supplied predicate.
    Custom(Custom),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeCheck {
    Number,
    String,
    Object,
    Array,
    Enum(Vec<Value>),
}

/// A named user predicate. Returning `false` records a failure under `name`.
#[derive(Clone)]
pub struct Custom {
    name: Arc<str>,
    check: Arc<dyn Fn(&Value, &Attributes) -> bool + Send + Sync>,
}

impl Validator {
    /// `Length { max }`, the common case.
    pub fn max_length(max: usize) -> Validator {
        Validator::Length {
            min: None,
            max: Some(max),
        }
    }

    /// Builds a `Regexp` validator, rejecting invalid patterns.
    pub fn regexp(pattern: &str) -> crate::Result<Validator> {
        Regex::new(pattern)
            .map(Validator::Regexp)
            .map_err(|err| crate::err!("Regexp validator given an invalid regexp: {err}"))
    }

    pub fn require_when(field: impl Into<String>, is: impl Into<Value>) -> Validator {
        Validator::RequireWhen {
            field: field.into(),
            is: is.into(),
        }
    }

    pub fn custom(
        name: impl Into<Arc<str>>,
        check: impl Fn(&Value, &Attributes) -> bool + Send + Sync + 'static,
    ) -> Validator {
        Validator::Custom(Custom {
            name: name.into(),
            check: Arc::new(check),
        })
    }

    /// Makes every field in `validators` required.
    ///
    /// `Require` is prepended to each list that does not already start with
    /// it. Lists holding a `Document` validator are left alone.
    pub fn require_all(mut validators: FieldValidators) -> FieldValidators {
        for list in validators.values_mut() {
            if list.iter().any(|v| matches!(v, Validator::Document(_))) {
                continue;
            }

            if !matches!(list.first(), Some(Validator::Require)) {
                list.insert(0, Validator::Require);
            }
        }

        validators
    }

    /// The rule name recorded in failures.
    pub fn name(&self) -> &str {
        match self {
            Validator::Require => "required",
            Validator::RequireWhen { .. } => "required-when",
            Validator::Length { .. } => "length",
            Validator::Regexp(_) => "regexp",
            Validator::Email => "email",
            Validator::Serializable(_) => "serializable",
            Validator::Document(_) => "doc",
            Validator::Type(check) => check.name(),
            Validator::Custom(custom) => custom.name.as_ref(),
        }
    }

    /// Checks `value`, the current value of a field in `attrs`.
    pub fn check(&self, value: Option<&Value>, attrs: &Attributes) -> Option<Failure> {
        let missing = value::is_missing(value);

        let passed = match self {
            Validator::Require => !missing,
            Validator::RequireWhen { field, is } => {
                !(missing && attrs.get(field).is_some_and(|other| other == is))
            }
            _ if missing => true,
            Validator::Document(fields) => {
                let doc = value.and_then(Value::as_object);
                let empty = Attributes::new();
                let nested = check_fields(fields, doc.unwrap_or(&empty), attrs);

                if nested.is_empty() {
                    return None;
                }

                let mut failure = self.failure(value);
                failure.nested = nested;
                return Some(failure);
            }
            _ => {
                let value = value.unwrap_or(&Value::Null);
                self.check_present(value, attrs)
            }
        };

        if passed {
            None
        } else {
            Some(self.failure(value))
        }
    }

    fn check_present(&self, value: &Value, attrs: &Attributes) -> bool {
        match self {
            Validator::Length { min, max } => {
                let len = match value {
                    Value::String(s) => s.chars().count(),
                    Value::Array(items) => items.len(),
                    _ => return true,
                };
                max.is_none_or(|max| len <= max) && min.is_none_or(|min| len >= min)
            }
            Validator::Regexp(re) => is_falsy(value) || re.is_match(&value::display(value)),
            Validator::Email => is_falsy(value) || EMAIL.is_match(&value::display(value)),
            Validator::Serializable(codec) => codec
                .serialize(value)
                .is_some_and(|serialized| !serialized.is_empty()),
            Validator::Type(check) => check.matches(value),
            Validator::Custom(custom) => (custom.check)(value, attrs),
            Validator::Require | Validator::RequireWhen { .. } | Validator::Document(_) => true,
        }
    }

    fn failure(&self, value: Option<&Value>) -> Failure {
        let mut failure = Failure::new(self.name(), value.cloned().unwrap_or(Value::Null));
        match self {
            Validator::Length { min, max } => {
                failure.min = *min;
                failure.max = *max;
            }
            Validator::RequireWhen { field, is } => {
                failure.when = Some((field.clone(), is.clone()));
            }
            _ => {}
        }
        failure
    }
}

/// Runs each field's validators against `doc`, stopping at the first
/// failure per field. `attrs` is the enclosing record.
pub fn check_fields(
    fields: &FieldValidators,
    doc: &Attributes,
    attrs: &Attributes,
) -> Vec<Failure> {
    let mut failures = vec![];

    for (field, validators) in fields {
        let value = doc.get(field);

        if let Some(mut failure) = validators.iter().find_map(|v| v.check(value, attrs)) {
            failure.field = Some(field.clone());
            failures.push(failure);
        }
    }

    failures
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

impl TypeCheck {
    fn name(&self) -> &'static str {
        match self {
            TypeCheck::Number => "type.number",
            TypeCheck::String => "type.string",
            TypeCheck::Object => "type.object",
            TypeCheck::Array => "type.array",
            TypeCheck::Enum(_) => "type.enum",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            // Numeric strings and booleans coerce to numbers
            TypeCheck::Number => match value {
                Value::Number(_) | Value::Bool(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            TypeCheck::String => value.is_string(),
            TypeCheck::Object => value.is_object(),
            TypeCheck::Array => value.is_array(),
            TypeCheck::Enum(valid) => valid.contains(value),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Require => f.write_str("Require"),
            Validator::RequireWhen { field, is } => f
                .debug_struct("RequireWhen")
                .field("field", field)
                .field("is", is)
                .finish(),
            Validator::Length { min, max } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .finish(),
            Validator::Regexp(re) => f.debug_tuple("Regexp").field(&re.as_str()).finish(),
            Validator::Email => f.write_str("Email"),
            Validator::Serializable(codec) => f.debug_tuple("Serializable").field(codec).finish(),
            Validator::Document(fields) => f.debug_tuple("Document").field(fields).finish(),
            Validator::Type(check) => f.debug_tuple("Type").field(check).finish(),
            Validator::Custom(custom) => f.debug_tuple("Custom").field(&custom.name).finish(),
        }
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Validator) -> bool {
        match (self, other) {
            (Validator::Require, Validator::Require) => true,
            (Validator::Email, Validator::Email) => true,
            (
                Validator::RequireWhen { field: a, is: x },
                Validator::RequireWhen { field: b, is: y },
            ) => a == b && x == y,
            (
                Validator::Length { min: a, max: x },
                Validator::Length { min: b, max: y },
            ) => a == b && x == y,
            (Validator::Regexp(a), Validator::Regexp(b)) => a.as_str() == b.as_str(),
            (Validator::Serializable(a), Validator::Serializable(b)) => a == b,
            (Validator::Document(a), Validator::Document(b)) => a == b,
            (Validator::Type(a), Validator::Type(b)) => a == b,
            (Validator::Custom(a), Validator::Custom(b)) => Arc::ptr_eq(&a.check, &b.check),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
