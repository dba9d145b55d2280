//! Public macros for ergonomic service resolution.

/// Resolves a service from the global container.
///
/// # Panics
///
/// Panics if the service cannot be resolved, with the resolution error in the message. For a
/// non-panicking version, use [`maybe_resolve!`] or `global().get(...)` directly.
///
/// # Examples
///
/// ```
/// use fibre_di::{global, resolve, Constructor, TypeDescriptor, TypeKey};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// global().declare(
///   TypeDescriptor::class(TypeKey::of::<EnglishGreeter>())
///     .implements(TypeKey::of::<dyn Greeter>())
///     .constructor(Constructor::new(|_| Ok(EnglishGreeter)))
///     .view::<dyn Greeter, EnglishGreeter>(|g| -> Arc<dyn Greeter> { g }),
/// );
/// global()
///   .add_singleton(TypeKey::of::<dyn Greeter>(), TypeKey::of::<EnglishGreeter>())
///   .unwrap();
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  (trait $trait_ident:ident) => {
    $crate::resolve_from!($crate::global(), trait $trait_ident)
  };
  (trait $trait_ident:ident, $name:expr) => {
    $crate::resolve_from!($crate::global(), trait $trait_ident, $name)
  };
  ($type:ty) => {
    $crate::resolve_from!($crate::global(), $type)
  };
  ($type:ty, $name:expr) => {
    $crate::resolve_from!($crate::global(), $type, $name)
  };
}

/// Resolves a service from the given container, panicking on failure.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, trait $trait_ident:ident) => {
    $container
      .get_trait::<dyn $trait_ident>(None)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service {}: {}",
          std::any::type_name::<dyn $trait_ident>(),
          err
        )
      })
  };
  ($container:expr, trait $trait_ident:ident, $name:expr) => {
    $container
      .get_trait::<dyn $trait_ident>(Some($name))
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service with name '{}' {}: {}",
          $name,
          std::any::type_name::<dyn $trait_ident>(),
          err
        )
      })
  };
  ($container:expr, $type:ty) => {
    $container.get::<$type>(None).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {}: {}",
        std::any::type_name::<$type>(),
        err
      )
    })
  };
  ($container:expr, $type:ty, $name:expr) => {
    $container.get::<$type>(Some($name)).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service with name '{}' {}: {}",
        $name,
        std::any::type_name::<$type>(),
        err
      )
    })
  };
}

/// Resolves a service from the global container, returning `None` on failure.
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident) => {
    $crate::global().get_trait::<dyn $trait_ident>(None).ok()
  };
  (trait $trait_ident:ident, $name:expr) => {
    $crate::global().get_trait::<dyn $trait_ident>(Some($name)).ok()
  };
  ($type:ty) => {
    $crate::global().get::<$type>(None).ok()
  };
  ($type:ty, $name:expr) => {
    $crate::global().get::<$type>(Some($name)).ok()
  };
}
