use fibre_di::{Constructor, Container, TypeDescriptor, TypeKey};
use std::sync::Arc;

// A generic storage abstraction, declared once as an open template.
trait Store: Send + Sync {
  fn describe(&self) -> String;
}

struct MemoryStore {
  element: TypeKey,
}

impl Store for MemoryStore {
  fn describe(&self) -> String {
    format!("in-memory store of {}", self.element)
  }
}

fn main() {
  let store = TypeKey::template("Store", 1);
  let memory = TypeKey::template("MemoryStore", 1);

  let container = Container::new();
  container
    .declare(TypeDescriptor::interface(store.clone()))
    .declare(
      TypeDescriptor::class(memory.clone())
        .implements(TypeKey::closed("Store", vec![TypeKey::param(0)]))
        .constructor(Constructor::new(|args| {
          Ok(MemoryStore {
            element: args.type_arg(0)?.clone(),
          })
        }))
        .view::<dyn Store, MemoryStore>(|s| -> Arc<dyn Store> { s }),
    );

  // One open registration serves every closed request.
  container.add_per_call(store, memory).unwrap();

  for element in [TypeKey::of::<String>(), TypeKey::of::<u64>()] {
    let requested = TypeKey::closed("Store", vec![element]);
    let instance = container.resolve(&requested, None).unwrap();
    let resolved = instance.view::<dyn Store>().unwrap();
    println!("{} -> {} ({})", requested, instance.type_key(), resolved.describe());
  }
}
