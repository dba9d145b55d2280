//! Implementation records and their lifetime strategies.

use crate::error::Result;
use crate::instance::Instance;
use crate::key::TypeKey;
use once_cell::sync::OnceCell;
use std::fmt;

/// How often an implementation is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Lifetime {
  /// Every resolution builds a new instance.
  #[default]
  PerCall,
  /// The first resolution builds the instance; every later one shares it.
  Singleton,
}

// The singleton cell is the per-record lock: `get_or_try_init` only blocks callers racing on
// this record while it is first being built.
enum Strategy {
  PerCall,
  Singleton { cell: OnceCell<Instance> },
}

/// One registered binding: an optional name, the concrete target type and its lifetime.
pub struct Implementation {
  name: Option<String>,
  target: TypeKey,
  lifetime: Lifetime,
  strategy: Strategy,
}

impl Implementation {
  pub(crate) fn new(name: Option<&str>, target: TypeKey, lifetime: Lifetime) -> Self {
    let strategy = match lifetime {
      Lifetime::PerCall => Strategy::PerCall,
      Lifetime::Singleton => Strategy::Singleton {
        cell: OnceCell::new(),
      },
    };
    Self {
      name: name.map(str::to_owned),
      target,
      lifetime,
      strategy,
    }
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn target(&self) -> &TypeKey {
    &self.target
  }

  pub fn lifetime(&self) -> Lifetime {
    self.lifetime
  }

  /// True if this record binds the same `(name, target)` pair.
  pub(crate) fn same_binding(&self, name: Option<&str>, target: &TypeKey) -> bool {
    self.name.as_deref() == name && &self.target == target
  }

  /// Produces an instance according to the lifetime, calling `build` when one is needed.
  pub(crate) fn instance(&self, build: impl FnOnce() -> Result<Instance>) -> Result<Instance> {
    match &self.strategy {
      Strategy::PerCall => build(),
      Strategy::Singleton { cell } => cell
        .get_or_try_init(|| {
          tracing::debug!(target_type = %self.target, name = ?self.name, "constructing singleton");
          build()
        })
        .cloned(),
    }
  }

  pub(crate) fn is_cached(&self) -> bool {
    match &self.strategy {
      Strategy::PerCall => false,
      Strategy::Singleton { cell } => cell.get().is_some(),
    }
  }
}

impl fmt::Debug for Implementation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Implementation")
      .field("name", &self.name)
      .field("target", &self.target)
      .field("lifetime", &self.lifetime)
      .field("cached", &self.is_cached())
      .finish()
  }
}
