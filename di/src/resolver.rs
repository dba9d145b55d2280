//! Finding and selecting implementations for a request.

use crate::container::Container;
use crate::core::Implementation;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::key::TypeKey;
use std::sync::Arc;

impl Container {
  pub(crate) fn resolve_request(&self, requested: &TypeKey, name: Option<&str>) -> Result<Instance> {
    match requested.sequence_element() {
      Some(element) => {
        let items = self.resolve_every(element)?;
        Ok(Instance::sequence(requested.clone(), items))
      }
      None => self.resolve_one(requested, name),
    }
  }

  /// Scalar mode: the first record, or the first one carrying `name`.
  pub(crate) fn resolve_one(&self, requested: &TypeKey, name: Option<&str>) -> Result<Instance> {
    let records = self
      .candidates(requested)
      .ok_or_else(|| Error::unresolved(requested, "no implementations are registered"))?;

    let selected = match name {
      None => records.first(),
      Some(name) => records.iter().find(|record| record.name() == Some(name)),
    }
    .ok_or_else(|| {
      Error::unresolved(
        requested,
        format!("no implementation with the requested name '{}'", name.unwrap_or_default()),
      )
    })?;

    tracing::trace!(%requested, ?name, selected = %selected.target(), "selected implementation");
    self.activate(selected, requested)
  }

  /// Collection mode: one instance per record, in registration order.
  pub(crate) fn resolve_every(&self, element: &TypeKey) -> Result<Vec<Instance>> {
    let records = self
      .candidates(element)
      .ok_or_else(|| Error::unresolved(element, "no implementations are registered"))?;

    tracing::trace!(%element, count = records.len(), "resolving every implementation");
    records
      .iter()
      .map(|record| self.activate(record, element))
      .collect()
  }

  /// The records under `key`, falling back to its open template for closed keys.
  pub(crate) fn candidates(&self, key: &TypeKey) -> Option<Vec<Arc<Implementation>>> {
    self.registry().lookup(key).or_else(|| {
      let template = key.open_template()?;
      tracing::trace!(%key, %template, "falling back to open template");
      self.registry().lookup(&template)
    })
  }

  /// True if resolving `ty` would find at least one record.
  pub(crate) fn is_provided(&self, ty: &TypeKey) -> bool {
    match ty.sequence_element() {
      Some(element) => self.is_provided(element),
      None => {
        self.registry().contains(ty)
          || ty
            .open_template()
            .is_some_and(|template| self.registry().contains(&template))
      }
    }
  }

  /// Runs a record through its lifetime strategy.
  fn activate(&self, record: &Implementation, requested: &TypeKey) -> Result<Instance> {
    let type_args = self.closing_arguments(record.target(), requested)?;
    record.instance(|| self.instantiate(record, &type_args))
  }

  /// The arguments that close an open `target` into a type assignable to `requested`.
  ///
  /// Empty when the target is not a template or the request carries no arguments; the
  /// activator reports the latter.
  fn closing_arguments(&self, target: &TypeKey, requested: &TypeKey) -> Result<Vec<TypeKey>> {
    if !target.is_open_template() || requested.type_args().is_empty() {
      return Ok(Vec::new());
    }
    let args = self
      .types()
      .closing_arguments(target, requested)
      .ok_or_else(|| {
        Error::unresolved(
          requested,
          format!("{} does not declare a supertype matching the request", target),
        )
      })?;
    tracing::trace!(%requested, %target, ?args, "closing open implementation");
    Ok(args)
  }
}
