//! Type identities used as registry keys.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

/// Name of the built-in template used for collection requests.
pub const SEQUENCE: &str = "Sequence";

/// A language-neutral identity for a type the container knows about.
///
/// Keys come in five shapes:
///
/// - [`TypeKey::Native`]: a Rust type, built by `TypeKey::of::<MyService>()`.
/// - [`TypeKey::Plain`]: a non-generic type known only by name.
/// - [`TypeKey::Template`]: an open generic template, such as `Repository<_>`.
/// - [`TypeKey::Closed`]: a template closed over concrete arguments, such as `Repository<User>`.
/// - [`TypeKey::Param`]: the n-th type parameter of the template being described. It only
///   appears inside the descriptors of templates.
///
/// Two keys are equal iff they name the same type and carry the same (or no) arguments.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
  /// Compared by `TypeId`. The name is only used for display.
  Native { id: TypeId, name: &'static str },
  Plain(Cow<'static, str>),
  Template { name: Cow<'static, str>, arity: usize },
  Closed { name: Cow<'static, str>, args: Vec<TypeKey> },
  Param(usize),
}

impl TypeKey {
  /// The key of the Rust type `T`.
  ///
  /// Identity comes from `TypeId`, so two distinct types whose names happen to print the same
  /// still get different keys. Such a key never equals a [`TypeKey::plain`] key.
  pub fn of<T: ?Sized + 'static>() -> Self {
    TypeKey::Native {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn plain(name: impl Into<Cow<'static, str>>) -> Self {
    TypeKey::Plain(name.into())
  }

  pub fn template(name: impl Into<Cow<'static, str>>, arity: usize) -> Self {
    TypeKey::Template {
      name: name.into(),
      arity,
    }
  }

  pub fn closed(name: impl Into<Cow<'static, str>>, args: Vec<TypeKey>) -> Self {
    TypeKey::Closed {
      name: name.into(),
      args,
    }
  }

  pub fn param(index: usize) -> Self {
    TypeKey::Param(index)
  }

  /// The collection request for every implementation registered under `element`.
  pub fn sequence(element: TypeKey) -> Self {
    TypeKey::closed(SEQUENCE, vec![element])
  }

  /// Returns the element type if this key is a collection request.
  pub fn sequence_element(&self) -> Option<&TypeKey> {
    match self {
      TypeKey::Closed { name, args } if name == SEQUENCE && args.len() == 1 => args.first(),
      _ => None,
    }
  }

  /// The type or template name. `None` for template parameters.
  pub fn name(&self) -> Option<&str> {
    match self {
      TypeKey::Native { name, .. } => Some(*name),
      TypeKey::Plain(name) | TypeKey::Template { name, .. } | TypeKey::Closed { name, .. } => {
        Some(&**name)
      }
      TypeKey::Param(_) => None,
    }
  }

  /// The arguments of a closed key; empty for every other shape.
  pub fn type_args(&self) -> &[TypeKey] {
    match self {
      TypeKey::Closed { args, .. } => args,
      _ => &[],
    }
  }

  pub fn is_open_template(&self) -> bool {
    matches!(self, TypeKey::Template { .. })
  }

  /// True for templates and closed instantiations alike.
  pub fn is_generic(&self) -> bool {
    matches!(self, TypeKey::Template { .. } | TypeKey::Closed { .. })
  }

  /// The number of type parameters a template takes, or the number of arguments a closed key
  /// carries.
  pub fn arity(&self) -> usize {
    match self {
      TypeKey::Template { arity, .. } => *arity,
      TypeKey::Closed { args, .. } => args.len(),
      _ => 0,
    }
  }

  /// The open template a closed key instantiates.
  pub fn open_template(&self) -> Option<TypeKey> {
    match self {
      TypeKey::Closed { name, args } => Some(TypeKey::Template {
        name: name.clone(),
        arity: args.len(),
      }),
      _ => None,
    }
  }

  /// True if this key is `template` itself or a closed instantiation of it.
  pub fn instantiates(&self, template: &TypeKey) -> bool {
    match (self, template) {
      (TypeKey::Template { .. }, _) => self == template,
      (TypeKey::Closed { name, args }, TypeKey::Template { name: t, arity }) => {
        name == t && args.len() == *arity
      }
      _ => false,
    }
  }

  /// Closes a template over `args`. Returns `None` if this is not a template or the argument
  /// count does not match its arity.
  pub fn close(&self, args: &[TypeKey]) -> Option<TypeKey> {
    match self {
      TypeKey::Template { name, arity } if *arity == args.len() => Some(TypeKey::Closed {
        name: name.clone(),
        args: args.to_vec(),
      }),
      _ => None,
    }
  }

  /// Matches this shape against the concrete key `other`, recording what each
  /// [`TypeKey::Param`] stands for in `bindings`.
  ///
  /// Returns `false` if the shapes differ, a parameter index is out of range, or one parameter
  /// would have to stand for two different types.
  pub fn bind(&self, other: &TypeKey, bindings: &mut [Option<TypeKey>]) -> bool {
    match (self, other) {
      (TypeKey::Param(index), _) => match bindings.get_mut(*index) {
        Some(Some(bound)) => bound == other,
        Some(slot) => {
          *slot = Some(other.clone());
          true
        }
        None => false,
      },
      (TypeKey::Closed { name, args }, TypeKey::Closed { name: other_name, args: other_args }) => {
        name == other_name
          && args.len() == other_args.len()
          && args
            .iter()
            .zip(other_args)
            .all(|(arg, other_arg)| arg.bind(other_arg, bindings))
      }
      _ => self == other,
    }
  }

  /// Replaces every [`TypeKey::Param`] with the matching entry of `args`.
  ///
  /// Parameters without a matching argument are left in place.
  pub fn substitute(&self, args: &[TypeKey]) -> TypeKey {
    match self {
      TypeKey::Param(index) => args.get(*index).cloned().unwrap_or_else(|| self.clone()),
      TypeKey::Closed { name, args: inner } => TypeKey::Closed {
        name: name.clone(),
        args: inner.iter().map(|arg| arg.substitute(args)).collect(),
      },
      _ => self.clone(),
    }
  }

  /// True if no template parameter appears anywhere in this key.
  pub fn is_concrete(&self) -> bool {
    match self {
      TypeKey::Param(_) | TypeKey::Template { .. } => false,
      TypeKey::Closed { args, .. } => args.iter().all(TypeKey::is_concrete),
      TypeKey::Native { .. } | TypeKey::Plain(_) => true,
    }
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TypeKey::Native { name, .. } => write!(f, "{}", name),
      TypeKey::Plain(name) => write!(f, "{}", name),
      TypeKey::Template { name, arity } => {
        write!(f, "{}<", name)?;
        for i in 0..*arity {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "_")?;
        }
        write!(f, ">")
      }
      TypeKey::Closed { name, args } => {
        write!(f, "{}<", name)?;
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{}", arg)?;
        }
        write!(f, ">")
      }
      TypeKey::Param(index) => write!(f, "${}", index),
    }
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self)
  }
}
