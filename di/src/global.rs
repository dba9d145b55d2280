//! The global container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access. Uses the default options.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the process-wide container.
///
/// Types and registrations added here are visible to every caller of `global()` and to the
/// [`resolve!`](crate::resolve) family of macros.
///
/// # Examples
///
/// ```
/// use fibre_di::{global, Constructor, TypeDescriptor, TypeKey};
///
/// struct Settings {
///   retries: u32,
/// }
///
/// fn register_services() {
///   global().declare(
///     TypeDescriptor::class(TypeKey::of::<Settings>())
///       .constructor(Constructor::new(|_| Ok(Settings { retries: 3 }))),
///   );
///   global()
///     .add_singleton(TypeKey::of::<Settings>(), TypeKey::of::<Settings>())
///     .unwrap();
/// }
///
/// register_services();
/// assert_eq!(global().get::<Settings>(None).unwrap().retries, 3);
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
