#![allow(dead_code)]

use fibre_di::{Constructor, Container, ContainerOptions, TypeDescriptor, TypeKey};
use std::sync::Arc;

// --- Traits ---

pub trait TestInterface: Send + Sync {
  fn id(&self) -> &'static str;
}

impl std::fmt::Debug for dyn TestInterface {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.id())
  }
}

pub trait GenericCollection: Send + Sync {
  fn id(&self) -> &'static str;
  fn element(&self) -> &TypeKey;
}

pub trait AbstractGeneric: Send + Sync {
  fn id(&self) -> &'static str;
  fn element(&self) -> &TypeKey;
  fn value(&self) -> &Arc<dyn TestInterface>;
}

// --- Concrete Types ---

// Declared without a public constructor.
pub struct TestClass1;

pub struct TestClass2;
impl TestInterface for TestClass2 {
  fn id(&self) -> &'static str {
    "TestClass2"
  }
}

pub struct TestClass3;
impl TestInterface for TestClass3 {
  fn id(&self) -> &'static str {
    "TestClass3"
  }
}

pub struct TestAbstractClassImpl1;

pub struct TestGenericCollection1 {
  pub element: TypeKey,
}
impl GenericCollection for TestGenericCollection1 {
  fn id(&self) -> &'static str {
    "TestGenericCollection1"
  }
  fn element(&self) -> &TypeKey {
    &self.element
  }
}

pub struct TestGenericCollection2 {
  pub element: TypeKey,
}
impl GenericCollection for TestGenericCollection2 {
  fn id(&self) -> &'static str {
    "TestGenericCollection2"
  }
  fn element(&self) -> &TypeKey {
    &self.element
  }
}

pub struct TestAbstractGenericClassImpl1 {
  pub element: TypeKey,
  pub value: Arc<dyn TestInterface>,
}
impl AbstractGeneric for TestAbstractGenericClassImpl1 {
  fn id(&self) -> &'static str {
    "TestAbstractGenericClassImpl1"
  }
  fn element(&self) -> &TypeKey {
    &self.element
  }
  fn value(&self) -> &Arc<dyn TestInterface> {
    &self.value
  }
}

pub struct TestAbstractGenericClassImpl2 {
  pub element: TypeKey,
  pub value: Arc<dyn TestInterface>,
}
impl AbstractGeneric for TestAbstractGenericClassImpl2 {
  fn id(&self) -> &'static str {
    "TestAbstractGenericClassImpl2"
  }
  fn element(&self) -> &TypeKey {
    &self.element
  }
  fn value(&self) -> &Arc<dyn TestInterface> {
    &self.value
  }
}

// --- Keys ---

pub fn test_interface() -> TypeKey {
  TypeKey::of::<dyn TestInterface>()
}

pub fn test_abstract_class() -> TypeKey {
  TypeKey::plain("TestAbstractClass")
}

pub fn generic_collection() -> TypeKey {
  TypeKey::template("ITestGenericCollection", 1)
}

pub fn generic_collection_of(arg: TypeKey) -> TypeKey {
  TypeKey::closed("ITestGenericCollection", vec![arg])
}

pub fn collection1() -> TypeKey {
  TypeKey::template("TestGenericCollection1", 1)
}

pub fn collection1_of(arg: TypeKey) -> TypeKey {
  TypeKey::closed("TestGenericCollection1", vec![arg])
}

pub fn collection2() -> TypeKey {
  TypeKey::template("TestGenericCollection2", 1)
}

pub fn collection2_of(arg: TypeKey) -> TypeKey {
  TypeKey::closed("TestGenericCollection2", vec![arg])
}

pub fn abstract_generic() -> TypeKey {
  TypeKey::template("TestAbstractGenericClass", 1)
}

pub fn abstract_generic_of(arg: TypeKey) -> TypeKey {
  TypeKey::closed("TestAbstractGenericClass", vec![arg])
}

pub fn abstract_generic_impl1() -> TypeKey {
  TypeKey::template("TestAbstractGenericClassImpl1", 1)
}

pub fn abstract_generic_impl1_of(arg: TypeKey) -> TypeKey {
  TypeKey::closed("TestAbstractGenericClassImpl1", vec![arg])
}

pub fn abstract_generic_impl2() -> TypeKey {
  TypeKey::template("TestAbstractGenericClassImpl2", 1)
}

// --- Containers ---

/// A container with every fixture type declared and nothing registered.
pub fn test_container() -> Container {
  let container = Container::new();
  declare_fixtures(&container);
  container
}

pub fn strict_test_container() -> Container {
  let container = Container::with_options(ContainerOptions::strict());
  declare_fixtures(&container);
  container
}

pub fn declare_fixtures(container: &Container) {
  container
    .declare(TypeDescriptor::interface(test_interface()))
    .declare(
      TypeDescriptor::class(TypeKey::of::<TestClass1>()).implements(test_interface()),
    )
    .declare(
      TypeDescriptor::class(TypeKey::of::<TestClass2>())
        .implements(test_interface())
        .constructor(Constructor::new(|_| Ok(TestClass2)))
        .view::<dyn TestInterface, TestClass2>(|c| -> Arc<dyn TestInterface> { c }),
    )
    .declare(
      TypeDescriptor::class(TypeKey::of::<TestClass3>())
        .implements(test_interface())
        .constructor(Constructor::new(|_| Ok(TestClass3)))
        .view::<dyn TestInterface, TestClass3>(|c| -> Arc<dyn TestInterface> { c }),
    )
    .declare(TypeDescriptor::abstract_class(test_abstract_class()))
    .declare(
      TypeDescriptor::class(TypeKey::of::<TestAbstractClassImpl1>())
        .extends(test_abstract_class())
        .constructor(Constructor::new(|_| Ok(TestAbstractClassImpl1))),
    )
    .declare(TypeDescriptor::interface(generic_collection()))
    .declare(
      TypeDescriptor::class(collection1())
        .implements(generic_collection_of(TypeKey::param(0)))
        .constructor(Constructor::new(|args| {
          Ok(TestGenericCollection1 {
            element: args.type_arg(0)?.clone(),
          })
        }))
        .view::<dyn GenericCollection, TestGenericCollection1>(
          |c| -> Arc<dyn GenericCollection> { c },
        ),
    )
    .declare(
      TypeDescriptor::class(collection2())
        .implements(generic_collection_of(TypeKey::param(0)))
        .constructor(Constructor::new(|args| {
          Ok(TestGenericCollection2 {
            element: args.type_arg(0)?.clone(),
          })
        }))
        .view::<dyn GenericCollection, TestGenericCollection2>(
          |c| -> Arc<dyn GenericCollection> { c },
        ),
    )
    .declare(TypeDescriptor::abstract_class(abstract_generic()))
    .declare(
      TypeDescriptor::class(abstract_generic_impl1())
        .extends(abstract_generic_of(TypeKey::param(0)))
        .constructor(
          Constructor::new(|args| {
            Ok(TestAbstractGenericClassImpl1 {
              element: args.type_arg(0)?.clone(),
              value: args.get_trait::<dyn TestInterface>(0)?,
            })
          })
          .named_param(test_interface(), "name"),
        )
        .view::<dyn AbstractGeneric, TestAbstractGenericClassImpl1>(
          |c| -> Arc<dyn AbstractGeneric> { c },
        ),
    )
    .declare(
      TypeDescriptor::class(abstract_generic_impl2())
        .extends(abstract_generic_of(TypeKey::param(0)))
        .constructor(
          Constructor::new(|args| {
            Ok(TestAbstractGenericClassImpl2 {
              element: args.type_arg(0)?.clone(),
              value: args.get_trait::<dyn TestInterface>(0)?,
            })
          })
          .named_param(test_interface(), "name"),
        )
        .view::<dyn AbstractGeneric, TestAbstractGenericClassImpl2>(
          |c| -> Arc<dyn AbstractGeneric> { c },
        ),
    );
}

/// Registers `TestClass2` unnamed and `TestClass3` as "name" under the test interface.
pub fn register_test_classes(container: &Container) {
  container
    .add_per_call(test_interface(), TypeKey::of::<TestClass2>())
    .unwrap();
  container
    .add_per_call_with_name("name", test_interface(), TypeKey::of::<TestClass3>())
    .unwrap();
}
