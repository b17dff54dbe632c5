use crate::{ledger, Result};

use tidemark_core::{Error, Fieldspec, ModelRef, Registry, SchemaErrorKind};

use std::sync::Arc;

/// `model` and every model it transitively depends on, dependencies first.
///
/// Each model appears once. A cycle is an error.
pub(crate) fn creation_order(
    registry: &Registry,
    model: &ModelRef,
) -> Result<Vec<(ModelRef, Arc<Fieldspec>)>> {
    let mut order = vec![];
    let mut visiting = vec![];
    visit(registry, model, &mut visiting, &mut order)?;
    Ok(order)
}

fn visit(
    registry: &Registry,
    model: &ModelRef,
    visiting: &mut Vec<ModelRef>,
    order: &mut Vec<(ModelRef, Arc<Fieldspec>)>,
) -> Result<()> {
    if order.iter().any(|(done, _)| Arc::ptr_eq(done, model)) {
        return Ok(());
    }

    if let Some(start) = visiting.iter().position(|m| Arc::ptr_eq(m, model)) {
        let path = visiting[start..]
            .iter()
            .chain([model])
            .map(|m| m.table())
            .collect::<Vec<_>>()
            .join(" -> ");
        return Err(Error::invalid_schema(SchemaErrorKind::DependencyCycle, path));
    }

    ledger::check_table(model.table())?;
    let fieldspec = registry.fieldspec(model)?;

    visiting.push(model.clone());
    for dependency in fieldspec.dependencies() {
        visit(registry, dependency, visiting, order)?;
    }
    visiting.pop();

    order.push((model.clone(), fieldspec));
    Ok(())
}
