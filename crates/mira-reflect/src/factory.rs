//! Object construction strategy
//!
//! Instantiates reflected types. The default strategy goes through the
//! zero-argument constructor: instance slots are pre-filled from field
//! initial values down the superclass chain, then the constructor body runs
//! if the class has one.

use mira_model::{ClassId, Instance, Type, TypeId, TypeRegistry, Value};

use crate::error::ReflectError;
use crate::policy::ReflectionPolicy;

/// Pluggable construction strategy for reflected types
pub trait ObjectFactory {
    /// Create a value of the given type
    fn create(&self, registry: &TypeRegistry, ty: TypeId) -> Result<Value, ReflectError>;
}

/// Default-constructor based factory
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectFactory {
    policy: ReflectionPolicy,
}

impl DefaultObjectFactory {
    /// Create a factory with the default (permissive) policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory constructing under a specific policy
    pub fn with_policy(policy: ReflectionPolicy) -> Self {
        Self { policy }
    }

    fn create_instance(
        &self,
        registry: &TypeRegistry,
        class_id: ClassId,
    ) -> Result<Value, ReflectError> {
        let def = registry
            .class(class_id)
            .ok_or(ReflectError::Model(mira_model::ModelError::UnknownClass {
                id: class_id,
            }))?;

        let ctor = def
            .constructors
            .iter()
            .find(|c| c.params.is_empty() && self.policy.member_accessible(c.visibility))
            .ok_or_else(|| ReflectError::NoDefaultConstructor {
                class: def.name.clone(),
            })?;

        let mut instance = Instance::new(class_id);
        fill_default_slots(registry, class_id, &mut instance);
        if let Some(body) = &ctor.body {
            body(&mut instance, &[])?;
        }
        Ok(Value::object(instance))
    }
}

impl ObjectFactory for DefaultObjectFactory {
    fn create(&self, registry: &TypeRegistry, ty: TypeId) -> Result<Value, ReflectError> {
        match registry.get(ty) {
            Some(Type::Array(_)) => Ok(Value::Array(Vec::new())),
            Some(other) => match other.class_id() {
                Some(class_id) => self.create_instance(registry, class_id),
                None => Err(ReflectError::NotAClass {
                    ty: registry.display(ty),
                }),
            },
            None => Err(ReflectError::NotAClass {
                ty: registry.display(ty),
            }),
        }
    }
}

/// Pre-fill instance slots from field initial values, most-derived class
/// first so shadowing fields win
fn fill_default_slots(registry: &TypeRegistry, class_id: ClassId, instance: &mut Instance) {
    let mut current = Some(class_id);
    while let Some(id) = current {
        let Some(def) = registry.class(id) else {
            break;
        };
        for field in &def.fields {
            if field.is_static || instance.has(&field.name) {
                continue;
            }
            let value = field.initial.clone().unwrap_or(Value::Null);
            instance.set(field.name.clone(), value);
        }
        current = registry.superclass_of(id);
    }
}
