//! Type interning context and class table
//!
//! The registry owns every [`Type`] and [`ClassDef`] in a program's model.
//! Types are interned behind an internal lock so resolution helpers can mint
//! derived types (substituted generics, array element rewrites) through a
//! shared reference; class definition is an explicitly mutable setup phase,
//! after which the registry is only read.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::class::{ClassDef, ClassId};
use crate::error::ModelError;
use crate::ty::{ArrayType, GenericType, PrimitiveType, Type, TypeId, TypeVar};

#[derive(Debug, Default)]
struct InternTable {
    types: Vec<Type>,
    ids: FxHashMap<Type, TypeId>,
}

impl InternTable {
    fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.ids.get(&ty) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.ids.insert(ty, id);
        id
    }
}

/// Type interning context and class table
#[derive(Debug)]
pub struct TypeRegistry {
    interner: RwLock<InternTable>,
    classes: Vec<ClassDef>,
    classes_by_name: FxHashMap<String, ClassId>,

    // Pre-interned well-known types
    unknown: TypeId,
    bool_ty: TypeId,
    int_ty: TypeId,
    float_ty: TypeId,
    string_ty: TypeId,
    void_ty: TypeId,
}

impl TypeRegistry {
    /// Create a registry with the well-known types pre-interned
    pub fn new() -> Self {
        let mut table = InternTable::default();
        let unknown = table.intern(Type::Unknown);
        let bool_ty = table.intern(Type::Primitive(PrimitiveType::Bool));
        let int_ty = table.intern(Type::Primitive(PrimitiveType::Int));
        let float_ty = table.intern(Type::Primitive(PrimitiveType::Float));
        let string_ty = table.intern(Type::Primitive(PrimitiveType::String));
        let void_ty = table.intern(Type::Primitive(PrimitiveType::Void));
        Self {
            interner: RwLock::new(table),
            classes: Vec::new(),
            classes_by_name: FxHashMap::default(),
            unknown,
            bool_ty,
            int_ty,
            float_ty,
            string_ty,
            void_ty,
        }
    }

    /// The top type
    pub fn unknown_type(&self) -> TypeId {
        self.unknown
    }

    /// The `bool` type
    pub fn bool_type(&self) -> TypeId {
        self.bool_ty
    }

    /// The `int` type
    pub fn int_type(&self) -> TypeId {
        self.int_ty
    }

    /// The `float` type
    pub fn float_type(&self) -> TypeId {
        self.float_ty
    }

    /// The `string` type
    pub fn string_type(&self) -> TypeId {
        self.string_ty
    }

    /// The `void` type
    pub fn void_type(&self) -> TypeId {
        self.void_ty
    }

    /// Intern an array type
    pub fn array_type(&self, element: TypeId) -> TypeId {
        self.intern(Type::Array(ArrayType { element }))
    }

    /// Intern a raw class reference
    pub fn class_type(&self, class: ClassId) -> TypeId {
        self.intern(Type::Class(class))
    }

    /// Intern a generic instantiation
    pub fn generic_type(&self, class: ClassId, args: Vec<TypeId>) -> TypeId {
        self.intern(Type::Generic(GenericType { class, args }))
    }

    /// Intern a type variable
    pub fn var_type(&self, name: impl Into<String>) -> TypeId {
        self.intern(Type::Var(TypeVar { name: name.into() }))
    }

    /// Intern an arbitrary type value
    pub fn intern(&self, ty: Type) -> TypeId {
        self.interner.write().intern(ty)
    }

    /// Resolve a type id to its type
    ///
    /// Types are small; the value is cloned out of the intern table.
    pub fn get(&self, id: TypeId) -> Option<Type> {
        self.interner.read().types.get(id.0 as usize).cloned()
    }

    /// Register a class definition, assigning its id
    ///
    /// Fails if a class with the same name is already registered.
    pub fn define_class(&mut self, mut def: ClassDef) -> Result<ClassId, ModelError> {
        if self.classes_by_name.contains_key(&def.name) {
            return Err(ModelError::DuplicateClass {
                name: def.name.clone(),
            });
        }
        let id = ClassId(self.classes.len() as u32);
        def.id = id;
        self.classes_by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        Ok(id)
    }

    /// Resolve a class id to its definition
    pub fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.0 as usize)
    }

    /// Resolve a class by name
    pub fn class_by_name(&self, name: &str) -> Option<&ClassDef> {
        self.classes_by_name.get(name).and_then(|&id| self.class(id))
    }

    /// Direct superclass of a class, ignoring type arguments
    pub fn superclass_of(&self, id: ClassId) -> Option<ClassId> {
        let def = self.class(id)?;
        let extends = def.extends?;
        self.get(extends)?.class_id()
    }

    /// Human-readable rendering of a type, for error messages
    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            None => format!("<{}>", id),
            Some(Type::Primitive(p)) => p.to_string(),
            Some(Type::Unknown) => "unknown".to_string(),
            Some(Type::Var(v)) => v.name,
            Some(Type::Array(a)) => format!("{}[]", self.display(a.element)),
            Some(Type::Class(c)) => self
                .class(c)
                .map(|def| def.name.clone())
                .unwrap_or_else(|| c.to_string()),
            Some(Type::Generic(g)) => {
                let base = self
                    .class(g.class)
                    .map(|def| def.name.clone())
                    .unwrap_or_else(|| g.class.to_string());
                let args: Vec<String> = g.args.iter().map(|&a| self.display(a)).collect();
                format!("{}<{}>", base, args.join(", "))
            }
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
