//! Values handed out by the container.

use crate::key::TypeKey;
use crate::types::TypeDescriptor;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A resolved object, or an ordered list of them for collection requests.
///
/// The concrete value is type-erased. Use [`Instance::downcast`] to get it back as the Rust type
/// that built it, or [`Instance::view`] to get it as one of the trait objects its descriptor
/// declares. Cloning an `Instance` is cheap and shares the underlying value.
#[derive(Clone)]
pub struct Instance {
  ty: TypeKey,
  value: Arc<dyn Any + Send + Sync>,
  descriptor: Option<Arc<TypeDescriptor>>,
}

impl Instance {
  pub(crate) fn new(
    ty: TypeKey,
    value: Arc<dyn Any + Send + Sync>,
    descriptor: Arc<TypeDescriptor>,
  ) -> Self {
    Self {
      ty,
      value,
      descriptor: Some(descriptor),
    }
  }

  pub(crate) fn sequence(ty: TypeKey, items: Vec<Instance>) -> Self {
    Self {
      ty,
      value: Arc::new(items),
      descriptor: None,
    }
  }

  /// The runtime type of the value. Generic implementations report their closed key.
  pub fn type_key(&self) -> &TypeKey {
    &self.ty
  }

  /// Returns the value as the concrete type its factory produced.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.clone().downcast::<T>().ok()
  }

  /// Returns the value through one of the views declared on its type descriptor.
  pub fn view<I: ?Sized + 'static>(&self) -> Option<Arc<I>> {
    let cast = self.descriptor.as_ref()?.view_for(TypeId::of::<I>())?;
    let boxed = cast(self.value.clone())?;
    boxed.downcast::<Arc<I>>().ok().map(|arc_in_a_box| *arc_in_a_box)
  }

  /// Tries [`Instance::downcast`] first and falls back to [`Instance::view`].
  pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.downcast::<T>().or_else(|| self.view::<T>())
  }

  /// The elements of a collection result, in declaration order.
  pub fn items(&self) -> Option<&[Instance]> {
    if self.descriptor.is_some() {
      return None;
    }
    self.value.downcast_ref::<Vec<Instance>>().map(Vec::as_slice)
  }

  /// True if both instances share the same underlying value.
  pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
    Arc::ptr_eq(&a.value, &b.value)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.items() {
      Some(items) => f.debug_tuple("Instance").field(&self.ty).field(&items).finish(),
      None => f.debug_tuple("Instance").field(&self.ty).finish(),
    }
  }
}
