mod common;

use common::*;
use fibre_di::{Constructor, Error, Instance, TypeDescriptor, TypeKey};
use std::sync::Arc;

fn assert_unresolved<T: std::fmt::Debug>(result: Result<T, Error>) {
  match result {
    Err(Error::UnresolvedDependency { .. }) => {}
    other => panic!("expected UnresolvedDependency, got {:?}", other),
  }
}

// --- Missing Implementations ---

#[test]
fn test_resolve_without_implementations_fails() {
  let container = test_container();

  assert_unresolved(container.resolve(&test_interface(), None));
  assert_unresolved(container.get_trait::<dyn TestInterface>(None));
}

#[test]
fn test_resolve_generic_without_implementations_fails() {
  let container = test_container();

  assert_unresolved(container.resolve(&generic_collection_of(TypeKey::of::<i32>()), None));
}

#[test]
fn test_resolve_collection_without_implementations_fails() {
  let container = test_container();

  assert_unresolved(container.resolve(&TypeKey::sequence(test_interface()), None));
  assert_unresolved(container.resolve_all(&test_interface()));
}

#[test]
fn test_resolve_unknown_name_fails_even_with_unnamed_implementations() {
  let container = test_container();
  register_test_classes(&container);

  assert_unresolved(container.resolve(&test_interface(), Some("12")));
}

// --- Selection ---

#[test]
fn test_resolve_picks_first_registered_implementation() {
  let container = test_container();
  register_test_classes(&container);

  let instance = container.resolve(&test_interface(), None).unwrap();

  assert_eq!(instance.type_key(), &TypeKey::of::<TestClass2>());
  assert!(instance.downcast::<TestClass2>().is_some());
  assert_eq!(instance.view::<dyn TestInterface>().unwrap().id(), "TestClass2");
}

#[test]
fn test_resolve_first_registered_wins_over_later_unnamed() {
  let container = test_container();
  container
    .add_per_call(test_interface(), TypeKey::of::<TestClass3>())
    .unwrap();
  container
    .add_per_call(test_interface(), TypeKey::of::<TestClass2>())
    .unwrap();

  let service = container.get_trait::<dyn TestInterface>(None).unwrap();

  assert_eq!(service.id(), "TestClass3");
}

#[test]
fn test_resolve_named_implementation() {
  let container = test_container();
  register_test_classes(&container);

  let service = container.get_trait::<dyn TestInterface>(Some("name")).unwrap();

  assert_eq!(service.id(), "TestClass3");
}

#[test]
fn test_unnamed_then_named_scenario() {
  let container = test_container();
  container
    .add_per_call(test_interface(), TypeKey::of::<TestClass2>())
    .unwrap();
  container
    .add_per_call_with_name("x", test_interface(), TypeKey::of::<TestClass3>())
    .unwrap();

  assert_eq!(
    container.resolve(&test_interface(), None).unwrap().type_key(),
    &TypeKey::of::<TestClass2>()
  );
  assert_eq!(
    container.resolve(&test_interface(), Some("x")).unwrap().type_key(),
    &TypeKey::of::<TestClass3>()
  );
  assert_unresolved(container.resolve(&test_interface(), Some("missing")));
}

#[test]
fn test_typed_get_reports_type_mismatch() {
  // Assignable to the interface but declares no trait-object view.
  struct Silent;

  let container = test_container();
  container.declare(
    TypeDescriptor::class(TypeKey::of::<Silent>())
      .implements(test_interface())
      .constructor(Constructor::new(|_| Ok(Silent))),
  );
  container
    .add_per_call(test_interface(), TypeKey::of::<Silent>())
    .unwrap();

  match container.get_trait::<dyn TestInterface>(None) {
    Err(Error::TypeMismatch { actual, .. }) => assert_eq!(actual, TypeKey::of::<Silent>()),
    Err(other) => panic!("unexpected error {:?}", other),
    Ok(_) => panic!("Silent has no view as dyn TestInterface"),
  }
  let instance = container.resolve(&test_interface(), None).unwrap();
  assert!(instance.downcast::<Silent>().is_some());
  assert!(instance.view::<dyn GenericCollection>().is_none());
}

// --- Generics ---

#[test]
fn test_resolve_closed_generic_registration() {
  let container = test_container();
  let int = TypeKey::of::<i32>();
  container
    .add_per_call(generic_collection_of(int.clone()), collection1_of(int.clone()))
    .unwrap();
  container
    .add_per_call_with_name(
      "name",
      generic_collection_of(int.clone()),
      collection2_of(int.clone()),
    )
    .unwrap();

  let first = container.resolve(&generic_collection_of(int.clone()), None).unwrap();
  let named = container
    .resolve(&generic_collection_of(int.clone()), Some("name"))
    .unwrap();

  assert_eq!(first.type_key(), &collection1_of(int.clone()));
  assert_eq!(named.type_key(), &collection2_of(int.clone()));
  assert_eq!(named.view::<dyn GenericCollection>().unwrap().element(), &int);
}

#[test]
fn test_resolve_closed_request_falls_back_to_open_registration() {
  let container = test_container();
  container
    .add_per_call(generic_collection(), collection1())
    .unwrap();
  container
    .add_per_call_with_name("name", generic_collection(), collection2())
    .unwrap();

  let request = generic_collection_of(TypeKey::of::<i32>());
  let first = container.resolve(&request, None).unwrap();
  let named = container.resolve(&request, Some("name")).unwrap();

  assert_eq!(first.type_key(), &collection1_of(TypeKey::of::<i32>()));
  assert_eq!(named.type_key(), &collection2_of(TypeKey::of::<i32>()));
  let named = named.view::<dyn GenericCollection>().unwrap();
  assert_eq!(named.id(), "TestGenericCollection2");
  assert_eq!(named.element(), &TypeKey::of::<i32>());
}

#[test]
fn test_exact_closed_registration_wins_over_open_template() {
  let container = test_container();
  let int = TypeKey::of::<i32>();
  container
    .add_per_call(generic_collection(), collection1())
    .unwrap();
  container
    .add_per_call(generic_collection_of(int.clone()), collection2_of(int.clone()))
    .unwrap();

  let exact = container.resolve(&generic_collection_of(int.clone()), None).unwrap();
  let fallback = container
    .resolve(&generic_collection_of(TypeKey::of::<String>()), None)
    .unwrap();

  assert_eq!(exact.type_key(), &collection2_of(int));
  assert_eq!(fallback.type_key(), &collection1_of(TypeKey::of::<String>()));
}

#[test]
fn test_open_generic_collection_closes_over_requested_argument() {
  struct ListImpl {
    element: TypeKey,
  }

  let container = test_container();
  container
    .declare(TypeDescriptor::interface(TypeKey::template("ICollection", 1)))
    .declare(
      TypeDescriptor::class(TypeKey::template("ListImpl", 1))
        .implements(TypeKey::closed("ICollection", vec![TypeKey::param(0)]))
        .constructor(Constructor::new(|args| {
          Ok(ListImpl {
            element: args.type_arg(0)?.clone(),
          })
        })),
    );
  container
    .add_per_call(
      TypeKey::template("ICollection", 1),
      TypeKey::template("ListImpl", 1),
    )
    .unwrap();

  let instance = container
    .resolve(
      &TypeKey::closed("ICollection", vec![TypeKey::of::<i32>()]),
      None,
    )
    .unwrap();

  assert_eq!(
    instance.type_key(),
    &TypeKey::closed("ListImpl", vec![TypeKey::of::<i32>()])
  );
  assert_eq!(instance.type_key().type_args(), &[TypeKey::of::<i32>()]);
  assert_eq!(instance.downcast::<ListImpl>().unwrap().element, TypeKey::of::<i32>());
}

#[test]
fn test_open_implementation_with_swapped_arguments_is_closed_to_match() {
  struct Swap;

  let container = test_container();
  container
    .declare(TypeDescriptor::interface(TypeKey::template("Pair", 2)))
    .declare(
      TypeDescriptor::class(TypeKey::template("Swap", 2))
        .implements(TypeKey::closed(
          "Pair",
          vec![TypeKey::param(1), TypeKey::param(0)],
        ))
        .constructor(Constructor::new(|_| Ok(Swap))),
    );
  container
    .add_per_call(TypeKey::template("Pair", 2), TypeKey::template("Swap", 2))
    .unwrap();
  let a = TypeKey::plain("A");
  let b = TypeKey::plain("B");
  let requested = TypeKey::closed("Pair", vec![a.clone(), b.clone()]);

  let instance = container.resolve(&requested, None).unwrap();

  // Swap<B, A> implements Pair<A, B>.
  assert_eq!(instance.type_key(), &TypeKey::closed("Swap", vec![b, a]));
  assert!(container.types().is_assignable(instance.type_key(), &requested));
}

#[test]
fn test_open_implementation_with_nested_argument_must_match_request() {
  struct Wrap {
    element: TypeKey,
  }

  let container = test_container();
  container
    .declare(TypeDescriptor::interface(TypeKey::template("IFace", 1)))
    .declare(
      TypeDescriptor::class(TypeKey::template("Wrap", 1))
        .implements(TypeKey::closed(
          "IFace",
          vec![TypeKey::closed("List", vec![TypeKey::param(0)])],
        ))
        .constructor(Constructor::new(|args| {
          Ok(Wrap {
            element: args.type_arg(0)?.clone(),
          })
        })),
    );
  container
    .add_per_call(TypeKey::template("IFace", 1), TypeKey::template("Wrap", 1))
    .unwrap();
  let int = TypeKey::of::<i32>();

  // Wrap<T> only implements IFace<List<T>>, so IFace<i32> has no implementation.
  assert_unresolved(container.resolve(&TypeKey::closed("IFace", vec![int.clone()]), None));

  let instance = container
    .resolve(
      &TypeKey::closed("IFace", vec![TypeKey::closed("List", vec![int.clone()])]),
      None,
    )
    .unwrap();
  assert_eq!(instance.type_key(), &TypeKey::closed("Wrap", vec![int.clone()]));
  assert_eq!(instance.downcast::<Wrap>().unwrap().element, int);
}

#[test]
fn test_resolve_open_template_directly_is_invalid_operation() {
  let container = test_container();
  container
    .add_per_call(generic_collection(), collection1())
    .unwrap();

  match container.resolve(&generic_collection(), None) {
    Err(Error::InvalidOperation { ty, .. }) => assert_eq!(ty, collection1()),
    other => panic!("expected InvalidOperation, got {:?}", other),
  }
}

#[test]
fn test_named_constructor_parameter_selects_named_implementation() {
  let container = test_container();
  register_test_classes(&container);
  container
    .add_per_call(abstract_generic(), abstract_generic_impl1())
    .unwrap();

  let instance = container
    .resolve(&abstract_generic_of(TypeKey::of::<i32>()), None)
    .unwrap();

  let service = instance.view::<dyn AbstractGeneric>().unwrap();
  assert_eq!(service.id(), "TestAbstractGenericClassImpl1");
  assert_eq!(service.value().id(), "TestClass3");
  assert_eq!(service.element(), &TypeKey::of::<i32>());
}

// --- Collections ---

#[test]
fn test_resolve_collection_builds_every_implementation_in_order() {
  let container = test_container();
  register_test_classes(&container);
  container
    .add_per_call(abstract_generic(), abstract_generic_impl1())
    .unwrap();
  container
    .add_per_call(abstract_generic(), abstract_generic_impl2())
    .unwrap();

  let instance = container
    .resolve(
      &TypeKey::sequence(abstract_generic_of(TypeKey::of::<i32>())),
      None,
    )
    .unwrap();

  let items = instance.items().unwrap();
  assert_eq!(items.len(), 2);
  let ids: Vec<&'static str> = items
    .iter()
    .map(|item| item.view::<dyn AbstractGeneric>().unwrap().id())
    .collect();
  assert_eq!(
    ids,
    vec!["TestAbstractGenericClassImpl1", "TestAbstractGenericClassImpl2"]
  );
}

#[test]
fn test_collection_ignores_name_and_counts_every_registration() {
  let container = test_container();
  register_test_classes(&container);

  let by_sequence = container
    .resolve(&TypeKey::sequence(test_interface()), Some("ignored"))
    .unwrap();
  let services = container.get_all_trait::<dyn TestInterface>().unwrap();

  assert_eq!(by_sequence.items().map(<[Instance]>::len), Some(2));
  let ids: Vec<&str> = services.iter().map(|service| service.id()).collect();
  assert_eq!(ids, vec!["TestClass2", "TestClass3"]);
}

#[test]
fn test_get_all_concrete() {
  let container = test_container();
  container
    .add_per_call(TypeKey::of::<TestClass2>(), TypeKey::of::<TestClass2>())
    .unwrap();
  container
    .add_per_call_with_name("other", TypeKey::of::<TestClass2>(), TypeKey::of::<TestClass2>())
    .unwrap();

  let all: Vec<Arc<TestClass2>> = container.get_all::<TestClass2>().unwrap();

  assert_eq!(all.len(), 2);
  assert!(!Arc::ptr_eq(&all[0], &all[1]));
}
