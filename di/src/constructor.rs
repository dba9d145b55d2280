//! Statically declared constructors and the arguments they receive.

use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::key::TypeKey;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub(crate) type Factory =
  Arc<dyn Fn(&Arguments) -> Result<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// One constructor parameter: the type it depends on and an optional registration name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
  ty: TypeKey,
  key: Option<String>,
}

impl Parameter {
  pub fn new(ty: TypeKey) -> Self {
    Self { ty, key: None }
  }

  /// A parameter that only accepts the implementation registered under `name`.
  pub fn named(ty: TypeKey, name: &str) -> Self {
    Self {
      ty,
      key: Some(name.to_owned()),
    }
  }

  pub fn ty(&self) -> &TypeKey {
    &self.ty
  }

  pub fn key(&self) -> Option<&str> {
    self.key.as_deref()
  }
}

/// A public constructor of a class: its parameter list and the factory that builds the value.
///
/// Parameters of a template's constructor may refer to the template's type parameters with
/// [`TypeKey::Param`]; they are substituted with the closing arguments before resolution.
///
/// ```
/// use fibre_di::{Constructor, TypeKey};
///
/// struct Clock;
/// struct Scheduler {
///   clock: Option<std::sync::Arc<Clock>>,
/// }
///
/// let ctor = Constructor::new(|args| {
///   Ok(Scheduler {
///     clock: args.optional::<Clock>(0),
///   })
/// })
/// .param(TypeKey::of::<Clock>());
///
/// assert_eq!(ctor.params().len(), 1);
/// ```
#[derive(Clone)]
pub struct Constructor {
  params: Vec<Parameter>,
  factory: Factory,
}

impl Constructor {
  pub fn new<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      params: Vec::new(),
      factory: Arc::new(move |args: &Arguments| {
        factory(args).map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>)
      }),
    }
  }

  pub fn param(mut self, ty: TypeKey) -> Self {
    self.params.push(Parameter::new(ty));
    self
  }

  pub fn named_param(mut self, ty: TypeKey, name: &str) -> Self {
    self.params.push(Parameter::named(ty, name));
    self
  }

  pub fn params(&self) -> &[Parameter] {
    &self.params
  }

  pub(crate) fn invoke(&self, args: &Arguments) -> Result<Arc<dyn Any + Send + Sync>> {
    (self.factory)(args)
  }
}

impl fmt::Debug for Constructor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Constructor")
      .field("params", &self.params)
      .finish_non_exhaustive()
  }
}

/// The resolved arguments passed to a constructor's factory.
///
/// Values are positional and match the constructor's parameter list. A parameter whose type has
/// no registration is `None` under the default missing-dependency policy.
pub struct Arguments {
  ty: TypeKey,
  type_args: Vec<TypeKey>,
  params: Vec<TypeKey>,
  values: Vec<Option<Instance>>,
}

impl Arguments {
  /// `params` holds each parameter's type with the closing arguments substituted, parallel to
  /// `values`.
  pub(crate) fn new(
    ty: TypeKey,
    type_args: Vec<TypeKey>,
    params: Vec<TypeKey>,
    values: Vec<Option<Instance>>,
  ) -> Self {
    Self {
      ty,
      type_args,
      params,
      values,
    }
  }

  /// The key of the type being constructed.
  pub fn target(&self) -> &TypeKey {
    &self.ty
  }

  /// The arguments that closed the template being constructed. Empty for plain types.
  pub fn type_args(&self) -> &[TypeKey] {
    &self.type_args
  }

  pub fn type_arg(&self, index: usize) -> Result<&TypeKey> {
    self.type_args.get(index).ok_or_else(|| {
      Error::invalid_operation(&self.ty, format!("no type argument at position {}", index))
    })
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The type the parameter at `index` was resolved as.
  pub fn param_type(&self, index: usize) -> Option<&TypeKey> {
    self.params.get(index)
  }

  pub fn instance(&self, index: usize) -> Option<&Instance> {
    self.values.get(index).and_then(Option::as_ref)
  }

  /// The argument at `index` as `T`. Fails if it was not supplied or has another type.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let instance = self.required(index)?;
    instance
      .get::<T>()
      .ok_or_else(|| Error::mismatch::<T>(instance.type_key()))
  }

  /// The argument at `index` viewed as the trait object `I`.
  pub fn get_trait<I: ?Sized + 'static>(&self, index: usize) -> Result<Arc<I>> {
    let instance = self.required(index)?;
    instance
      .view::<I>()
      .ok_or_else(|| Error::mismatch::<I>(instance.type_key()))
  }

  pub fn optional<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
    self.instance(index).and_then(Instance::get::<T>)
  }

  pub fn optional_trait<I: ?Sized + 'static>(&self, index: usize) -> Option<Arc<I>> {
    self.instance(index).and_then(Instance::view::<I>)
  }

  /// The elements of a collection argument, each viewed as `I`.
  pub fn all_trait<I: ?Sized + 'static>(&self, index: usize) -> Result<Vec<Arc<I>>> {
    let instance = self.required(index)?;
    let items = instance
      .items()
      .ok_or_else(|| Error::mismatch::<Vec<Arc<I>>>(instance.type_key()))?;
    items
      .iter()
      .map(|item| {
        item
          .view::<I>()
          .ok_or_else(|| Error::mismatch::<I>(item.type_key()))
      })
      .collect()
  }

  fn required(&self, index: usize) -> Result<&Instance> {
    if let Some(instance) = self.instance(index) {
      return Ok(instance);
    }
    match self.param_type(index) {
      Some(param) => Err(Error::unresolved(
        param,
        format!("argument {} of {} was not supplied", index, self.ty),
      )),
      None => Err(Error::invalid_operation(
        &self.ty,
        format!("constructor has no argument at position {}", index),
      )),
    }
  }
}
