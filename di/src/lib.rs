//! # Fibre DI
//!
//! A runtime dependency-injection container for Rust.
//!
//! Fibre DI binds abstract dependency types to concrete implementations and builds fully-wired
//! object graphs on demand, resolving constructor parameters recursively.
//!
//! ## Core Concepts
//!
//! - **TypeKey**: the identity of a type: plain, an open generic template, a closed
//!   instantiation or a template parameter.
//! - **TypeDescriptor**: what the container knows about a type (its kind, interfaces, base type,
//!   constructors and trait-object views). Rust has no reflection, so descriptors are declared.
//! - **Registration**: binds an implementation to a dependency with a lifetime and an optional
//!   name. Registrations are validated against the descriptors.
//! - **Resolution**: picks the first implementation (or the one with the requested name),
//!   selects the constructor with the most registered parameters and builds it depth-first.
//!   Open templates are closed over the requested type's arguments, and a
//!   [`TypeKey::sequence`] request builds every implementation of its element.
//! - **Lifetimes**: per-call implementations are built on every resolution; singletons are built
//!   once per registration and shared.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_di::{Constructor, Container, Instance, TypeDescriptor, TypeKey};
//! use std::sync::Arc;
//!
//! trait MessageStore: Send + Sync {
//!   fn name(&self) -> &'static str;
//! }
//!
//! struct MemoryStore;
//! impl MessageStore for MemoryStore {
//!   fn name(&self) -> &'static str {
//!     "memory"
//!   }
//! }
//!
//! struct Mailer {
//!   store: Arc<dyn MessageStore>,
//! }
//!
//! let container = Container::new();
//!
//! // Describe the types the container may build.
//! container
//!   .declare(TypeDescriptor::interface(TypeKey::of::<dyn MessageStore>()))
//!   .declare(
//!     TypeDescriptor::class(TypeKey::of::<MemoryStore>())
//!       .implements(TypeKey::of::<dyn MessageStore>())
//!       .constructor(Constructor::new(|_| Ok(MemoryStore)))
//!       .view::<dyn MessageStore, MemoryStore>(|s| -> Arc<dyn MessageStore> { s }),
//!   )
//!   .declare(
//!     TypeDescriptor::class(TypeKey::of::<Mailer>()).constructor(
//!       Constructor::new(|args| Ok(Mailer { store: args.get_trait::<dyn MessageStore>(0)? }))
//!         .param(TypeKey::of::<dyn MessageStore>()),
//!     ),
//!   );
//!
//! // Bind implementations to dependencies.
//! container
//!   .add_singleton(TypeKey::of::<dyn MessageStore>(), TypeKey::of::<MemoryStore>())
//!   .unwrap();
//! container
//!   .add_per_call(TypeKey::of::<Mailer>(), TypeKey::of::<Mailer>())
//!   .unwrap();
//!
//! // Resolve. The mailer's store is injected from the singleton registration.
//! let mailer = container.get::<Mailer>(None).unwrap();
//! assert_eq!(mailer.store.name(), "memory");
//!
//! let first = container.resolve(&TypeKey::of::<dyn MessageStore>(), None).unwrap();
//! let second = container.resolve(&TypeKey::of::<dyn MessageStore>(), None).unwrap();
//! assert!(Instance::ptr_eq(&first, &second));
//! ```

mod activator;
mod config;
mod constructor;
mod container;
mod core;
mod error;
mod global;
mod instance;
mod key;
mod macros;
mod registry;
mod resolver;
mod types;

pub use config::{ContainerOptions, MissingDependency};
pub use constructor::{Arguments, Constructor, Parameter};
pub use container::Container;
pub use crate::core::{Implementation, Lifetime};
pub use error::{Error, Result};
pub use global::global;
pub use instance::Instance;
pub use key::{TypeKey, SEQUENCE};
pub use registry::Registry;
pub use types::{TypeCatalog, TypeDescriptor, TypeKind};
