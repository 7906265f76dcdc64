//! Type variable substitution
//!
//! Resolves a member's declared type against the concrete owning context it
//! is viewed through. A member declared as `T` on `Box<T>` resolves to `int`
//! when seen through `Box<int>`, and erases to the top type when seen through
//! the raw `Box`. Bindings propagate down the inheritance chain, so a member
//! inherited from `Base<T>` by `Sub extends Base<int>` resolves the same way.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::class::ClassId;
use crate::registry::TypeRegistry;
use crate::ty::{Type, TypeId};

/// Substitution map from type parameter names to concrete types
pub type Bindings = FxHashMap<String, TypeId>;

/// Resolves member types in the context of a concrete owning type
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver over a registry
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Bindings a class-shaped type provides for its own type parameters
    ///
    /// A generic instantiation binds each declared parameter to the matching
    /// argument; a raw class reference binds nothing (parameters erase).
    pub fn bindings_of(&self, ty: TypeId) -> Bindings {
        let mut bindings = Bindings::default();
        if let Some(Type::Generic(g)) = self.registry.get(ty) {
            if let Some(def) = self.registry.class(g.class) {
                for (param, &arg) in def.type_params.iter().zip(g.args.iter()) {
                    bindings.insert(param.clone(), arg);
                }
            }
        }
        bindings
    }

    /// Apply a substitution map to a type, interning any derived types
    ///
    /// Unbound type variables resolve to the top type.
    pub fn substitute(&self, ty: TypeId, bindings: &Bindings) -> TypeId {
        match self.registry.get(ty) {
            Some(Type::Var(v)) => bindings
                .get(&v.name)
                .copied()
                .unwrap_or_else(|| self.registry.unknown_type()),
            Some(Type::Array(a)) => {
                let element = self.substitute(a.element, bindings);
                if element == a.element {
                    ty
                } else {
                    self.registry.array_type(element)
                }
            }
            Some(Type::Generic(g)) => {
                let args: Vec<TypeId> =
                    g.args.iter().map(|&a| self.substitute(a, bindings)).collect();
                if args == g.args {
                    ty
                } else {
                    self.registry.generic_type(g.class, args)
                }
            }
            _ => ty,
        }
    }

    /// Bindings in effect at `declaring` when the hierarchy is entered from
    /// `owner`
    ///
    /// Walks `extends` and `implements` edges breadth-first, substituting
    /// each supertype reference with the bindings of the level below it.
    /// `None` when `declaring` is not an ancestor of `owner`.
    pub fn bindings_to(&self, owner: TypeId, declaring: ClassId) -> Option<Bindings> {
        let mut queue = VecDeque::new();
        let mut seen = FxHashSet::default();
        queue.push_back(owner);

        while let Some(current) = queue.pop_front() {
            let Some(class_id) = self.registry.get(current).and_then(|t| t.class_id()) else {
                continue;
            };
            if !seen.insert(class_id) {
                continue;
            }
            if class_id == declaring {
                return Some(self.bindings_of(current));
            }
            let bindings = self.bindings_of(current);
            let Some(def) = self.registry.class(class_id) else {
                continue;
            };
            if let Some(extends) = def.extends {
                queue.push_back(self.substitute(extends, &bindings));
            }
            for &iface in &def.implements {
                queue.push_back(self.substitute(iface, &bindings));
            }
        }
        None
    }

    /// Resolve a member's declared type as seen through `owner`
    ///
    /// `declaring` is the class the member was declared on. Members declared
    /// outside the owner's hierarchy (or viewed through a raw owner) have
    /// their variables erased to the top type.
    pub fn resolve_member_type(
        &self,
        member_ty: TypeId,
        owner: TypeId,
        declaring: ClassId,
    ) -> TypeId {
        let bindings = self.bindings_to(owner, declaring).unwrap_or_default();
        self.substitute(member_ty, &bindings)
    }
}
