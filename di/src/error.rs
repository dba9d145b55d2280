use crate::key::TypeKey;
use thiserror::Error;

/// The error type for registration and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A registration broke one of the registry's rules. Nothing was added.
  #[error("cannot register {implementation} for {dependency}: {reason}")]
  InvalidRegistration {
    dependency: TypeKey,
    implementation: TypeKey,
    reason: String,
  },

  /// No implementation, no matching name or no usable constructor was found
  /// somewhere in the requested object graph.
  #[error("unresolved dependency {ty}: {reason}")]
  UnresolvedDependency { ty: TypeKey, reason: String },

  /// An open template was asked to build an instance without the type arguments that close it.
  #[error("invalid operation on {ty}: {reason}")]
  InvalidOperation { ty: TypeKey, reason: String },

  /// A resolved instance could not be downcast or viewed as the requested Rust type.
  #[error("instance of {actual} cannot be used as {expected}")]
  TypeMismatch {
    expected: &'static str,
    actual: TypeKey,
  },
}

impl Error {
  pub(crate) fn invalid_registration(
    dependency: &TypeKey,
    implementation: &TypeKey,
    reason: impl Into<String>,
  ) -> Self {
    Error::InvalidRegistration {
      dependency: dependency.clone(),
      implementation: implementation.clone(),
      reason: reason.into(),
    }
  }

  pub(crate) fn unresolved(ty: &TypeKey, reason: impl Into<String>) -> Self {
    Error::UnresolvedDependency {
      ty: ty.clone(),
      reason: reason.into(),
    }
  }

  pub(crate) fn invalid_operation(ty: &TypeKey, reason: impl Into<String>) -> Self {
    Error::InvalidOperation {
      ty: ty.clone(),
      reason: reason.into(),
    }
  }

  pub(crate) fn mismatch<T: ?Sized>(actual: &TypeKey) -> Self {
    Error::TypeMismatch {
      expected: std::any::type_name::<T>(),
      actual: actual.clone(),
    }
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
