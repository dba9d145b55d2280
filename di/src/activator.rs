//! Building an instance of a selected implementation.

use crate::config::MissingDependency;
use crate::constructor::{Arguments, Constructor};
use crate::container::Container;
use crate::core::Implementation;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::key::TypeKey;

impl Container {
  /// Closes the record's target if it is a template, picks a constructor, resolves its
  /// parameters depth-first from left to right and invokes it.
  pub(crate) fn instantiate(
    &self,
    record: &Implementation,
    type_args: &[TypeKey],
  ) -> Result<Instance> {
    let target = record.target();
    let concrete = if target.is_open_template() {
      if type_args.is_empty() {
        return Err(Error::invalid_operation(
          target,
          "an open generic implementation needs type arguments to be constructed",
        ));
      }
      target.close(type_args).ok_or_else(|| {
        Error::unresolved(
          target,
          format!(
            "expected {} type argument(s) but the request supplied {}",
            target.arity(),
            type_args.len()
          ),
        )
      })?
    } else {
      target.clone()
    };

    let descriptor = self
      .types()
      .descriptor_for(&concrete)
      .ok_or_else(|| Error::unresolved(&concrete, "type is not declared"))?;
    let closing = concrete.type_args().to_vec();
    let constructor = self.select_constructor(descriptor.constructors(), &closing, &concrete)?;

    let mut params = Vec::with_capacity(constructor.params().len());
    let mut values = Vec::with_capacity(constructor.params().len());
    for param in constructor.params() {
      let ty = param.ty().substitute(&closing);
      values.push(self.resolve_parameter(&ty, param.key(), &concrete)?);
      params.push(ty);
    }

    let args = Arguments::new(concrete.clone(), closing, params, values);
    let value = constructor.invoke(&args)?;
    Ok(Instance::new(concrete, value, descriptor))
  }

  /// The constructor with the most parameters the registry can provide. The first one wins a
  /// tie.
  fn select_constructor<'a>(
    &self,
    constructors: &'a [Constructor],
    closing: &[TypeKey],
    concrete: &TypeKey,
  ) -> Result<&'a Constructor> {
    let mut best: Option<(&Constructor, usize)> = None;
    for constructor in constructors {
      let provided = constructor
        .params()
        .iter()
        .filter(|param| self.is_provided(&param.ty().substitute(closing)))
        .count();
      if best.map_or(true, |(_, count)| provided > count) {
        best = Some((constructor, provided));
      }
    }

    let (constructor, provided) =
      best.ok_or_else(|| Error::unresolved(concrete, "type has no public constructor"))?;
    tracing::trace!(
      ty = %concrete,
      params = constructor.params().len(),
      provided,
      "selected constructor"
    );
    Ok(constructor)
  }

  fn resolve_parameter(
    &self,
    ty: &TypeKey,
    name: Option<&str>,
    owner: &TypeKey,
  ) -> Result<Option<Instance>> {
    if !self.is_provided(ty) {
      return match self.options().missing_dependency {
        MissingDependency::UseDefault => {
          tracing::trace!(%owner, parameter = %ty, "no registration, passing default");
          Ok(None)
        }
        MissingDependency::Fail => Err(Error::unresolved(
          ty,
          format!("required by {} but no implementations are registered", owner),
        )),
      };
    }

    match ty.sequence_element() {
      Some(element) => {
        let items = self.resolve_every(element)?;
        Ok(Some(Instance::sequence(ty.clone(), items)))
      }
      None => self.resolve_one(ty, name).map(Some),
    }
  }
}
