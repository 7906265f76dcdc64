//! Memoizing introspector cache
//!
//! Introspection is expensive; a process normally keys a shared table by type
//! and computes each [`TypeIntrospector`] at most once. The entry API holds
//! the key's shard for the duration of a miss, so concurrent first lookups of
//! one type observe a single canonical instance. Construction failures
//! propagate to the caller and are not cached.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use mira_model::{TypeId, TypeRegistry};

use crate::error::ReflectError;
use crate::introspector::TypeIntrospector;
use crate::policy::ReflectionPolicy;

/// Concurrency-safe map from type to its cached introspector
#[derive(Debug, Default)]
pub struct IntrospectorCache {
    policy: ReflectionPolicy,
    cache: DashMap<TypeId, Arc<TypeIntrospector>>,
}

impl IntrospectorCache {
    /// Create a cache with the default (permissive) policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache introspecting under a specific policy
    pub fn with_policy(policy: ReflectionPolicy) -> Self {
        Self {
            policy,
            cache: DashMap::new(),
        }
    }

    /// Look up or build the introspector for a type
    pub fn introspect(
        &self,
        registry: &TypeRegistry,
        owner: TypeId,
    ) -> Result<Arc<TypeIntrospector>, ReflectError> {
        if let Some(found) = self.cache.get(&owner) {
            return Ok(Arc::clone(&found));
        }
        match self.cache.entry(owner) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let built = Arc::new(TypeIntrospector::new(registry, owner, self.policy)?);
                entry.insert(Arc::clone(&built));
                Ok(built)
            }
        }
    }

    /// Number of cached introspectors
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
