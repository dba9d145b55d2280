//! Type descriptors and the catalog that answers assignability questions.
//!
//! Rust has no runtime reflection, so everything the container needs to know about a type is
//! declared up front in a [`TypeDescriptor`]: whether it can be instantiated, which interfaces
//! and base type it has, its constructors, and how to view a built value as a trait object.

use crate::constructor::Constructor;
use crate::key::TypeKey;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type Cast = Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
  Interface,
  Abstract,
  Class,
}

/// Everything the container knows about one plain type or one generic template.
///
/// ```
/// use fibre_di::{Constructor, TypeDescriptor, TypeKey};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// let descriptor = TypeDescriptor::class(TypeKey::of::<EnglishGreeter>())
///   .implements(TypeKey::of::<dyn Greeter>())
///   .constructor(Constructor::new(|_| Ok(EnglishGreeter)))
///   .view::<dyn Greeter, EnglishGreeter>(|greeter| -> Arc<dyn Greeter> { greeter });
///
/// assert!(descriptor.is_instantiable());
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
  key: TypeKey,
  kind: TypeKind,
  base: Option<TypeKey>,
  interfaces: Vec<TypeKey>,
  constructors: Vec<Constructor>,
  views: Vec<(TypeId, Cast)>,
}

impl TypeDescriptor {
  fn new(key: TypeKey, kind: TypeKind) -> Self {
    Self {
      key,
      kind,
      base: None,
      interfaces: Vec::new(),
      constructors: Vec::new(),
      views: Vec::new(),
    }
  }

  pub fn interface(key: TypeKey) -> Self {
    Self::new(key, TypeKind::Interface)
  }

  pub fn abstract_class(key: TypeKey) -> Self {
    Self::new(key, TypeKind::Abstract)
  }

  pub fn class(key: TypeKey) -> Self {
    Self::new(key, TypeKind::Class)
  }

  pub fn extends(mut self, base: TypeKey) -> Self {
    self.base = Some(base);
    self
  }

  pub fn implements(mut self, interface: TypeKey) -> Self {
    self.interfaces.push(interface);
    self
  }

  pub fn constructor(mut self, constructor: Constructor) -> Self {
    self.constructors.push(constructor);
    self
  }

  /// Declares how a value built as `C` is served as `Arc<I>`.
  pub fn view<I, C>(mut self, convert: impl Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static) -> Self
  where
    I: ?Sized + Send + Sync + 'static,
    C: Any + Send + Sync,
  {
    let cast: Cast = Arc::new(move |value: Arc<dyn Any + Send + Sync>| {
      let concrete = value.downcast::<C>().ok()?;
      Some(Box::new(convert(concrete)) as Box<dyn Any + Send + Sync>)
    });
    self.views.push((TypeId::of::<I>(), cast));
    self
  }

  pub fn key(&self) -> &TypeKey {
    &self.key
  }

  pub fn kind(&self) -> TypeKind {
    self.kind
  }

  pub fn base(&self) -> Option<&TypeKey> {
    self.base.as_ref()
  }

  pub fn interfaces(&self) -> &[TypeKey] {
    &self.interfaces
  }

  pub fn constructors(&self) -> &[Constructor] {
    &self.constructors
  }

  pub fn is_instantiable(&self) -> bool {
    self.kind == TypeKind::Class
  }

  pub(crate) fn view_for(&self, id: TypeId) -> Option<&Cast> {
    self
      .views
      .iter()
      .find(|(view_id, _)| *view_id == id)
      .map(|(_, cast)| cast)
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeDescriptor")
      .field("key", &self.key)
      .field("kind", &self.kind)
      .field("base", &self.base)
      .field("interfaces", &self.interfaces)
      .field("constructors", &self.constructors)
      .field("views", &self.views.len())
      .finish()
  }
}

/// The set of declared types.
#[derive(Default)]
pub struct TypeCatalog {
  descriptors: DashMap<TypeKey, Arc<TypeDescriptor>>,
}

impl TypeCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a descriptor, replacing any earlier one with the same key.
  pub fn declare(&self, descriptor: TypeDescriptor) {
    tracing::debug!(ty = %descriptor.key, kind = ?descriptor.kind, "declared type");
    self
      .descriptors
      .insert(descriptor.key.clone(), Arc::new(descriptor));
  }

  pub fn get(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
    self.descriptors.get(key).map(|entry| entry.value().clone())
  }

  /// The descriptor of a plain key or template, or of the template a closed key instantiates.
  pub fn descriptor_for(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
    match key.open_template() {
      Some(template) => self.get(&template),
      None => self.get(key),
    }
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  /// True if a value of `candidate` can be used where `target` is expected.
  ///
  /// Walks the candidate's interfaces and base chain transitively, substituting template
  /// parameters with the candidate's type arguments at every step.
  pub fn is_assignable(&self, candidate: &TypeKey, target: &TypeKey) -> bool {
    self.supertypes(candidate).iter().any(|ty| ty == target)
  }

  /// True if `candidate` or one of its supertypes is `template` or a closed instantiation of
  /// it.
  pub fn is_assignable_to_generic_template(&self, candidate: &TypeKey, template: &TypeKey) -> bool {
    self
      .supertypes(candidate)
      .iter()
      .any(|ty| ty.instantiates(template))
  }

  /// The arguments that close the open `template` into a type assignable to the closed key
  /// `requested`.
  ///
  /// Each supertype the template declares, written in terms of its own parameters, is matched
  /// against `requested` in walk order. The first one that binds every parameter wins. `None`
  /// if no declared supertype fits.
  pub fn closing_arguments(&self, template: &TypeKey, requested: &TypeKey) -> Option<Vec<TypeKey>> {
    let arity = template.arity();
    let parameters: Vec<TypeKey> = (0..arity).map(TypeKey::param).collect();
    let shape = template.close(&parameters)?;

    self.supertypes(&shape).iter().find_map(|supertype| {
      let mut bindings: Vec<Option<TypeKey>> = vec![None; arity];
      if supertype.bind(requested, &mut bindings) {
        bindings.into_iter().collect()
      } else {
        None
      }
    })
  }

  /// `ty` followed by every type reachable through interfaces and base types.
  fn supertypes(&self, ty: &TypeKey) -> Vec<TypeKey> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut pending = vec![ty.clone()];

    while let Some(current) = pending.pop() {
      if !seen.insert(current.clone()) {
        continue;
      }
      if let Some(descriptor) = self.descriptor_for(&current) {
        let args = current.type_args();
        pending.extend(descriptor.base.iter().map(|base| base.substitute(args)));
        pending.extend(
          descriptor
            .interfaces
            .iter()
            .rev()
            .map(|interface| interface.substitute(args)),
        );
      }
      found.push(current);
    }
    found
  }
}
