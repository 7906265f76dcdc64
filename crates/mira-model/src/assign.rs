//! Nominal assignability
//!
//! Implements the relation "a value of type `source` can stand where `target`
//! is expected". Classes relate nominally through their `extends` and
//! `implements` edges; generic instantiations are invariant in their
//! arguments; arrays are covariant.

use crate::generics::TypeResolver;
use crate::registry::TypeRegistry;
use crate::ty::{Type, TypeId};

/// Context for assignability checks
#[derive(Debug, Clone, Copy)]
pub struct AssignContext<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> AssignContext<'a> {
    /// Create a new assignability context
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Check whether `source` is assignable to `target`
    pub fn is_assignable(&self, target: TypeId, source: TypeId) -> bool {
        // Reflexivity; interning makes this structural equality
        if target == source {
            return true;
        }

        let target_ty = match self.registry.get(target) {
            Some(ty) => ty,
            None => return false,
        };
        let source_ty = match self.registry.get(source) {
            Some(ty) => ty,
            None => return false,
        };

        match (&target_ty, &source_ty) {
            // Everything is assignable to the top type
            (Type::Unknown, _) => true,

            // Arrays are covariant in their element type
            (Type::Array(t), Type::Array(s)) => self.is_assignable(t.element, s.element),

            // Class-shaped types relate nominally
            (Type::Class(_) | Type::Generic(_), Type::Class(_) | Type::Generic(_)) => {
                self.class_assignable(target, &target_ty, source, &source_ty)
            }

            // Primitives only relate reflexively, handled by the identity
            // check above
            _ => false,
        }
    }

    fn class_assignable(
        &self,
        target: TypeId,
        target_ty: &Type,
        source: TypeId,
        source_ty: &Type,
    ) -> bool {
        let target_class = match target_ty.class_id() {
            Some(id) => id,
            None => return false,
        };
        let source_class = match source_ty.class_id() {
            Some(id) => id,
            None => return false,
        };

        if target_class == source_class {
            return match (target_ty, source_ty) {
                // A raw class reference accepts any instantiation of itself
                (Type::Class(_), _) => true,
                // Arguments are invariant
                (Type::Generic(t), Type::Generic(s)) => t.args == s.args,
                // A raw source does not satisfy an instantiated target
                (Type::Generic(_), Type::Class(_)) => false,
                _ => false,
            };
        }

        // Walk the source's supertypes, substituting its bindings so that
        // `Sub extends Base<int>` is seen as `Base<int>`, not `Base<T>`.
        let resolver = TypeResolver::new(self.registry);
        let bindings = resolver.bindings_of(source);
        let def = match self.registry.class(source_class) {
            Some(def) => def,
            None => return false,
        };

        let supers = def.extends.iter().chain(def.implements.iter());
        for &sup in supers {
            let sup = resolver.substitute(sup, &bindings);
            if self.is_assignable(target, sup) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassDef;

    #[test]
    fn test_reflexivity_and_top() {
        let registry = TypeRegistry::new();
        let ctx = AssignContext::new(&registry);
        let int = registry.int_type();

        assert!(ctx.is_assignable(int, int));
        assert!(ctx.is_assignable(registry.unknown_type(), int));
        assert!(!ctx.is_assignable(int, registry.unknown_type()));
        assert!(!ctx.is_assignable(int, registry.string_type()));
    }

    #[test]
    fn test_array_covariance() {
        let mut registry = TypeRegistry::new();
        let animal = registry.define_class(ClassDef::new("Animal")).unwrap();
        let animal_ty = registry.class_type(animal);
        let dog = registry
            .define_class(ClassDef::new("Dog").with_extends(animal_ty))
            .unwrap();
        let dog_ty = registry.class_type(dog);

        let animal_arr = registry.array_type(animal_ty);
        let dog_arr = registry.array_type(dog_ty);
        let int_arr = registry.array_type(registry.int_type());

        let ctx = AssignContext::new(&registry);
        assert!(ctx.is_assignable(animal_arr, dog_arr));
        assert!(!ctx.is_assignable(dog_arr, animal_arr));
        assert!(!ctx.is_assignable(animal_arr, int_arr));
    }

    #[test]
    fn test_class_chain() {
        let mut registry = TypeRegistry::new();
        let animal = registry.define_class(ClassDef::new("Animal")).unwrap();
        let animal_ty = registry.class_type(animal);
        let dog = registry
            .define_class(ClassDef::new("Dog").with_extends(animal_ty))
            .unwrap();
        let dog_ty = registry.class_type(dog);
        let labrador = registry
            .define_class(ClassDef::new("Labrador").with_extends(dog_ty))
            .unwrap();
        let labrador_ty = registry.class_type(labrador);

        let ctx = AssignContext::new(&registry);
        assert!(ctx.is_assignable(animal_ty, labrador_ty));
        assert!(ctx.is_assignable(dog_ty, labrador_ty));
        assert!(!ctx.is_assignable(labrador_ty, animal_ty));
    }

    #[test]
    fn test_interface_implementation() {
        let mut registry = TypeRegistry::new();
        let named = registry.define_class(ClassDef::interface("Named")).unwrap();
        let named_ty = registry.class_type(named);
        let tagged = registry
            .define_class(ClassDef::interface("Tagged").with_extends(named_ty))
            .unwrap();
        let tagged_ty = registry.class_type(tagged);
        let user = registry
            .define_class(ClassDef::new("User").implement(tagged_ty))
            .unwrap();
        let user_ty = registry.class_type(user);

        let ctx = AssignContext::new(&registry);
        assert!(ctx.is_assignable(tagged_ty, user_ty));
        // Transitive through the interface's own extends edge
        assert!(ctx.is_assignable(named_ty, user_ty));
        assert!(!ctx.is_assignable(user_ty, named_ty));
    }

    #[test]
    fn test_generic_invariance() {
        let mut registry = TypeRegistry::new();
        let animal = registry.define_class(ClassDef::new("Animal")).unwrap();
        let animal_ty = registry.class_type(animal);
        let dog = registry
            .define_class(ClassDef::new("Dog").with_extends(animal_ty))
            .unwrap();
        let dog_ty = registry.class_type(dog);
        let boxed = registry
            .define_class(ClassDef::new("Box").with_type_params(["T"]))
            .unwrap();

        let box_animal = registry.generic_type(boxed, vec![animal_ty]);
        let box_dog = registry.generic_type(boxed, vec![dog_ty]);
        let box_raw = registry.class_type(boxed);

        let ctx = AssignContext::new(&registry);
        assert!(ctx.is_assignable(box_animal, box_animal));
        assert!(!ctx.is_assignable(box_animal, box_dog));
        // Raw target accepts instantiations; not the other way around
        assert!(ctx.is_assignable(box_raw, box_dog));
        assert!(!ctx.is_assignable(box_dog, box_raw));
    }

    #[test]
    fn test_generic_supertype_substitution() {
        let mut registry = TypeRegistry::new();
        let base = registry
            .define_class(ClassDef::new("Base").with_type_params(["T"]))
            .unwrap();
        let base_int = registry.generic_type(base, vec![registry.int_type()]);
        let base_str = registry.generic_type(base, vec![registry.string_type()]);
        let sub = registry
            .define_class(ClassDef::new("Sub").with_extends(base_int))
            .unwrap();
        let sub_ty = registry.class_type(sub);

        let ctx = AssignContext::new(&registry);
        assert!(ctx.is_assignable(base_int, sub_ty));
        assert!(!ctx.is_assignable(base_str, sub_ty));
    }
}
