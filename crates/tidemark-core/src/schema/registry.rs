use super::{Fieldspec, ModelDescriptor, ModelRef};
use crate::{Error, Result, SchemaErrorKind};

use by_address::ByAddress;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// Owns the compiled schema of every model it has seen.
///
/// Models are keyed by identity: two descriptors with the same table name
/// are still two models.
#[derive(Debug, Default)]
pub struct Registry {
    cache: Mutex<HashMap<ByAddress<ModelRef>, Arc<Fieldspec>>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// The compiled schema of `model`, compiling it on first use.
    pub fn fieldspec(&self, model: &ModelRef) -> Result<Arc<Fieldspec>> {
        self.resolve(model, &[])
    }

    pub(super) fn resolve(
        &self,
        model: &ModelRef,
        compiling: &[&ModelDescriptor],
    ) -> Result<Arc<Fieldspec>> {
        let key = ByAddress(model.clone());

        if let Some(fieldspec) = self.lock_cache().get(&key) {
            return Ok(fieldspec.clone());
        }

        if compiling.iter().any(|m| std::ptr::eq(*m, &**model)) {
            let path = compiling
                .iter()
                .map(|m| m.table())
                .chain([model.table()])
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::invalid_schema(SchemaErrorKind::DependencyCycle, path));
        }

        let mut path = compiling.to_vec();
        path.push(&**model);

        // The lock is not held while compiling: factories resolve other
        // models through this registry.
        let fieldspec = Arc::new(Fieldspec::compile(model, self, &path)?);

        tracing::debug!(table = model.table(), fields = fieldspec.len(), "compiled schema");

        Ok(self.lock_cache().entry(key).or_insert(fieldspec).clone())
    }

    /// Drops every cached fieldspec.
    pub fn clear(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<ByAddress<ModelRef>, Arc<Fieldspec>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
