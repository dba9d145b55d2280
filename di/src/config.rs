//! Container options.

/// What the container does with a constructor parameter whose type has no registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissingDependency {
  /// Pass an absent value. The factory reads it with [`Arguments::optional`](crate::Arguments::optional).
  #[default]
  UseDefault,
  /// Fail the whole resolution with [`Error::UnresolvedDependency`](crate::Error::UnresolvedDependency).
  Fail,
}

/// Options controlling how a [`Container`](crate::Container) builds object graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerOptions {
  pub missing_dependency: MissingDependency,
}

impl ContainerOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn missing_dependency(mut self, policy: MissingDependency) -> Self {
    self.missing_dependency = policy;
    self
  }

  /// Shorthand for failing on every unregistered constructor parameter.
  pub fn strict() -> Self {
    Self::default().missing_dependency(MissingDependency::Fail)
  }
}
