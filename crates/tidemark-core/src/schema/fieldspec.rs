use super::{
    FieldContext, FieldDeclaration, FieldRecord, ModelDescriptor, ModelRef, Registry,
    SchemaDeclaration,
};
use crate::{
    validate::{self, FieldValidators, ValidationErrors},
    Attributes, Error, Result, SchemaErrorKind, Value,
};

use indexmap::IndexMap;

/// A model's compiled schema: field name to record, in column order.
#[derive(Debug, Clone, Default)]
pub struct Fieldspec {
    fields: IndexMap<String, FieldRecord>,

    /// Model-level validators, checked after the fields' own.
    validators: FieldValidators,
}

impl Fieldspec {
    pub(super) fn compile(
        model: &ModelDescriptor,
        registry: &Registry,
        compiling: &[&ModelDescriptor],
    ) -> Result<Fieldspec> {
        let Some(schema) = model.schema() else {
            return Err(Error::invalid_schema(
                SchemaErrorKind::MissingSchema,
                format!("model `{}`", model.table()),
            ));
        };

        let declarations = match schema {
            SchemaDeclaration::Fields(fields) => fields.clone(),
            SchemaDeclaration::Json(Value::Object(object)) => object
                .iter()
                .map(|(name, value)| Ok((name.clone(), FieldDeclaration::from_json(name, value)?)))
                .collect::<Result<IndexMap<_, _>>>()?,
            SchemaDeclaration::Json(_) => {
                return Err(Error::invalid_schema(
                    SchemaErrorKind::InvalidSchemaType,
                    format!("model `{}`", model.table()),
                ))
            }
        };

        let mut fields = IndexMap::with_capacity(declarations.len());

        for (name, declaration) in &declarations {
            let cx = FieldContext {
                name,
                registry,
                compiling,
            };
            fields.insert(name.clone(), declaration.compile(&cx)?);
        }

        Ok(Fieldspec {
            fields,
            validators: model.validators().clone(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRecord)> {
        self.fields.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Models this one's columns depend on, in column order.
    pub fn dependencies(&self) -> impl Iterator<Item = &ModelRef> {
        self.fields.values().filter_map(|record| record.depends_on.as_ref())
    }

    /// Validates `attrs`, collecting at most one failure per field.
    pub fn validate(&self, attrs: &Attributes) -> Result<()> {
        let mut errors = ValidationErrors::new();

        for (name, record) in &self.fields {
            let value = attrs.get(name);
            if let Some(failure) = record.validators.iter().find_map(|v| v.check(value, attrs)) {
                errors.insert(name.clone(), failure);
            }
        }

        for mut failure in validate::check_fields(&self.validators, attrs, attrs) {
            let Some(field) = failure.field.take() else {
                continue;
            };
            if !errors.contains_key(&field) {
                errors.insert(field, failure);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors))
        }
    }

    /// Converts attributes to their stored form.
    ///
    /// Only declared fields with a non-null value are kept.
    pub fn mutate(&self, attrs: &Attributes) -> Result<Attributes> {
        self.map_present(attrs, |record, value| record.mutators.store(value))
    }

    /// Converts stored attributes back to their in-memory form.
    pub fn demutate(&self, attrs: &Attributes) -> Result<Attributes> {
        self.map_present(attrs, |record, value| record.mutators.retrieve(value))
    }

    fn map_present(
        &self,
        attrs: &Attributes,
        f: impl Fn(&FieldRecord, &Value) -> Result<Value>,
    ) -> Result<Attributes> {
        let mut out = Attributes::new();

        for (name, record) in &self.fields {
            match attrs.get(name) {
                None | Some(Value::Null) => {}
                Some(value) => {
                    out.insert(name.clone(), f(record, value)?);
                }
            }
        }

        Ok(out)
    }
}

impl<'a> IntoIterator for &'a Fieldspec {
    type Item = (&'a String, &'a FieldRecord);
    type IntoIter = indexmap::map::Iter<'a, String, FieldRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldRecord)> for Fieldspec {
    fn from_iter<T: IntoIterator<Item = (String, FieldRecord)>>(iter: T) -> Fieldspec {
        Fieldspec {
            fields: iter.into_iter().collect(),
            validators: FieldValidators::new(),
        }
    }
}
