//! Mira Reflection
//!
//! Property introspection over the Mira object model.
//!
//! This crate provides:
//! - Per-type property metadata with accessor conflict resolution
//!   ([`TypeIntrospector`])
//! - Opaque get/set capability handles ([`Invoker`])
//! - Property path tokenization ([`PropertyTokenizer`])
//! - A concurrency-safe memoizing cache ([`IntrospectorCache`])
//! - Object construction and same-type property copying
//!
//! # Usage
//!
//! ```ignore
//! use mira_model::TypeRegistry;
//! use mira_reflect::IntrospectorCache;
//!
//! let cache = IntrospectorCache::new();
//! let meta = cache.introspect(&registry, user_ty)?;
//!
//! let name = meta.get_invoker("name")?.invoke(&mut instance, &[])?;
//! meta.set_invoker("name")?.invoke(&mut instance, &[new_name])?;
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod copier;
pub mod error;
pub mod factory;
pub mod introspector;
pub mod invoker;
pub mod naming;
pub mod path;
pub mod policy;

pub use cache::IntrospectorCache;
pub use copier::copy_properties;
pub use error::ReflectError;
pub use factory::{DefaultObjectFactory, ObjectFactory};
pub use introspector::TypeIntrospector;
pub use invoker::Invoker;
pub use path::{PropertyTokenizer, Segments};
pub use policy::ReflectionPolicy;
