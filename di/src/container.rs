//! The main `Container` struct and its associated methods.

use crate::config::ContainerOptions;
use crate::core::{Implementation, Lifetime};
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::key::TypeKey;
use crate::registry::Registry;
use crate::types::{TypeCatalog, TypeDescriptor};
use std::any::Any;
use std::sync::Arc;

/// The dependency-injection container.
///
/// A container owns a [`TypeCatalog`] describing the types it can build and a [`Registry`]
/// binding dependency types to implementations. It is `Send + Sync`, and any number of threads
/// may resolve from it at once.
///
/// Registration takes `&self` and is safe to call at any time, but resolutions running while
/// registrations are still being added may or may not observe them. Finish registering before
/// relying on resolution results, or synchronize externally.
///
/// Cycles in the dependency graph are not detected. Resolving a type that depends on itself
/// never terminates.
#[derive(Default)]
pub struct Container {
  types: TypeCatalog,
  registry: Registry,
  options: ContainerOptions,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_options(options: ContainerOptions) -> Self {
    Self {
      options,
      ..Self::default()
    }
  }

  pub fn options(&self) -> &ContainerOptions {
    &self.options
  }

  pub fn types(&self) -> &TypeCatalog {
    &self.types
  }

  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  // --- Type Declaration ---

  pub fn declare(&self, descriptor: TypeDescriptor) -> &Self {
    self.types.declare(descriptor);
    self
  }

  // --- Registration ---

  /// Binds `implementation` to `dependency`.
  ///
  /// Fails with [`Error::InvalidRegistration`] if the implementation is not declared, can't be
  /// instantiated, has no constructor, or is not assignable to the dependency. Open templates
  /// must be registered against open templates and can't be singletons. Registering the same
  /// `(name, implementation)` pair twice under one dependency keeps the first record.
  pub fn register(
    &self,
    dependency: TypeKey,
    implementation: TypeKey,
    lifetime: Lifetime,
    name: Option<&str>,
  ) -> Result<()> {
    self
      .registry
      .register(&self.types, &dependency, &implementation, lifetime, name)
      .map(|_| ())
  }

  pub fn add_per_call(&self, dependency: TypeKey, implementation: TypeKey) -> Result<()> {
    self.register(dependency, implementation, Lifetime::PerCall, None)
  }

  pub fn add_per_call_with_name(
    &self,
    name: &str,
    dependency: TypeKey,
    implementation: TypeKey,
  ) -> Result<()> {
    self.register(dependency, implementation, Lifetime::PerCall, Some(name))
  }

  pub fn add_singleton(&self, dependency: TypeKey, implementation: TypeKey) -> Result<()> {
    self.register(dependency, implementation, Lifetime::Singleton, None)
  }

  pub fn add_singleton_with_name(
    &self,
    name: &str,
    dependency: TypeKey,
    implementation: TypeKey,
  ) -> Result<()> {
    self.register(dependency, implementation, Lifetime::Singleton, Some(name))
  }

  /// The records registered under exactly `key`, in registration order.
  pub fn lookup(&self, key: &TypeKey) -> Vec<Arc<Implementation>> {
    self.registry.lookup(key).unwrap_or_default()
  }

  // --- Resolution ---

  /// Resolves `requested`, picking the implementation registered under `name` if one is given.
  ///
  /// A [`TypeKey::sequence`] request resolves every implementation of its element type and
  /// ignores `name`.
  pub fn resolve(&self, requested: &TypeKey, name: Option<&str>) -> Result<Instance> {
    self.resolve_request(requested, name)
  }

  /// Resolves one instance of every implementation registered for `element`.
  pub fn resolve_all(&self, element: &TypeKey) -> Result<Vec<Instance>> {
    self.resolve_every(element)
  }

  /// Resolves the concrete type `T`, keyed by [`TypeKey::of::<T>()`](TypeKey::of).
  pub fn get<T: Any + Send + Sync>(&self, name: Option<&str>) -> Result<Arc<T>> {
    let instance = self.resolve(&TypeKey::of::<T>(), name)?;
    instance
      .get::<T>()
      .ok_or_else(|| Error::mismatch::<T>(instance.type_key()))
  }

  /// Resolves the trait object `I`, keyed by [`TypeKey::of::<I>()`](TypeKey::of).
  pub fn get_trait<I: ?Sized + Any + Send + Sync>(&self, name: Option<&str>) -> Result<Arc<I>> {
    let instance = self.resolve(&TypeKey::of::<I>(), name)?;
    instance
      .view::<I>()
      .ok_or_else(|| Error::mismatch::<I>(instance.type_key()))
  }

  pub fn get_all<T: Any + Send + Sync>(&self) -> Result<Vec<Arc<T>>> {
    self
      .resolve_all(&TypeKey::of::<T>())?
      .iter()
      .map(|instance| {
        instance
          .get::<T>()
          .ok_or_else(|| Error::mismatch::<T>(instance.type_key()))
      })
      .collect()
  }

  pub fn get_all_trait<I: ?Sized + Any + Send + Sync>(&self) -> Result<Vec<Arc<I>>> {
    self
      .resolve_all(&TypeKey::of::<I>())?
      .iter()
      .map(|instance| {
        instance
          .view::<I>()
          .ok_or_else(|| Error::mismatch::<I>(instance.type_key()))
      })
      .collect()
  }
}
