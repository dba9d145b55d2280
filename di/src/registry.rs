//! The registry of implementation records and its registration rules.

use crate::core::{Implementation, Lifetime};
use crate::error::{Error, Result};
use crate::key::TypeKey;
use crate::types::TypeCatalog;
use dashmap::DashMap;
use std::sync::Arc;

/// Maps dependency types to their implementation records, in registration order.
///
/// A key is only ever created together with its first record, so no key maps to an empty list.
/// Records are never removed.
#[derive(Default)]
pub struct Registry {
  entries: DashMap<TypeKey, Vec<Arc<Implementation>>>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// A snapshot of the records registered under exactly `key`.
  pub fn lookup(&self, key: &TypeKey) -> Option<Vec<Arc<Implementation>>> {
    self.entries.get(key).map(|entry| entry.value().clone())
  }

  pub fn contains(&self, key: &TypeKey) -> bool {
    self.entries.contains_key(key)
  }

  /// The number of dependency types with at least one record.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Validates and adds a record. Returns `false` if the same `(name, implementation)` pair was
  /// already registered under `dependency`.
  pub(crate) fn register(
    &self,
    types: &TypeCatalog,
    dependency: &TypeKey,
    implementation: &TypeKey,
    lifetime: Lifetime,
    name: Option<&str>,
  ) -> Result<bool> {
    validate(types, dependency, implementation, lifetime)?;

    let mut records = self.entries.entry(dependency.clone()).or_default();
    if records
      .iter()
      .any(|record| record.same_binding(name, implementation))
    {
      tracing::debug!(%dependency, %implementation, ?name, "ignoring duplicate registration");
      return Ok(false);
    }
    records.push(Arc::new(Implementation::new(
      name,
      implementation.clone(),
      lifetime,
    )));
    tracing::debug!(%dependency, %implementation, ?lifetime, ?name, "registered implementation");
    Ok(true)
  }
}

fn validate(
  types: &TypeCatalog,
  dependency: &TypeKey,
  implementation: &TypeKey,
  lifetime: Lifetime,
) -> Result<()> {
  let invalid = |reason: &str| Error::invalid_registration(dependency, implementation, reason);

  // Open templates are the only keys allowed to leave arguments unbound.
  let has_parameters = |key: &TypeKey| !key.is_open_template() && !key.is_concrete();
  if has_parameters(dependency) || has_parameters(implementation) {
    return Err(invalid("keys containing template parameters cannot be registered"));
  }
  if dependency.sequence_element().is_some() {
    return Err(invalid(
      "collections are resolved from the registrations of their element type",
    ));
  }

  let descriptor = types
    .descriptor_for(implementation)
    .ok_or_else(|| invalid("implementation type is not declared"))?;
  if !descriptor.is_instantiable() {
    return Err(invalid("implementation type can't be an interface or abstract"));
  }
  if descriptor.constructors().is_empty() {
    return Err(invalid("implementation type must have a public constructor"));
  }
  if implementation.arity() != descriptor.key().arity() {
    return Err(invalid("implementation type has the wrong number of type arguments"));
  }

  if dependency.is_open_template() != implementation.is_open_template() {
    return Err(invalid(
      "dependency and implementation types must both be open templates or both not be",
    ));
  }

  if dependency.is_open_template() {
    if lifetime == Lifetime::Singleton {
      return Err(invalid("open generic types can't be singletons"));
    }
    if dependency.arity() != implementation.arity() {
      return Err(invalid(
        "dependency and implementation templates take a different number of type arguments",
      ));
    }
    if !types.is_assignable_to_generic_template(implementation, dependency) {
      return Err(invalid("implementation type is not assignable to dependency type"));
    }
  } else if !types.is_assignable(implementation, dependency) {
    return Err(invalid("implementation type is not assignable to dependency type"));
  }

  Ok(())
}
