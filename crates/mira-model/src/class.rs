//! Class and interface descriptors
//!
//! Descriptors are the raw member lists reflection works from: fields,
//! accessor methods and constructors, each with declared types, visibility
//! and the flags the introspection rules depend on. Descriptors are built
//! with chaining constructors and registered in a
//! [`TypeRegistry`](crate::TypeRegistry), which assigns the [`ClassId`].

use std::fmt;
use std::sync::Arc;

use crate::error::ModelError;
use crate::ty::TypeId;
use crate::value::{Instance, Value};

/// Unique identifier for a class registered in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Whether a descriptor describes a class or an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Concrete or abstract class; may carry fields and constructors
    Class,
    /// Interface; methods only, extended rather than implemented
    Interface,
}

/// Declared visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Accessible from anywhere
    Public,
    /// Accessible from the class and its subclasses
    Protected,
    /// Accessible from the declaring class only
    Private,
}

impl Visibility {
    /// Check whether this is `Public`
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Native implementation of a method or constructor body
///
/// The handler receives the receiver instance and the call arguments, and
/// returns the result value. Constructors return [`Value::Null`].
pub type NativeBody = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<Value, ModelError> + Send + Sync>;

/// Field descriptor
#[derive(Clone)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Declared type
    pub ty: TypeId,
    /// Declared visibility
    pub visibility: Visibility,
    /// Whether the field is class-level (shared) rather than per-instance
    pub is_static: bool,
    /// Whether the field is declared immutable
    pub is_readonly: bool,
    /// Initial value; for static fields this is the value reads observe
    pub initial: Option<Value>,
}

impl FieldDef {
    /// Create a public instance field
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
            initial: None,
        }
    }

    /// Set the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static (class-level)
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as readonly
    pub fn as_readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    /// Set the initial value
    pub fn with_initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("is_readonly", &self.is_readonly)
            .finish()
    }
}

/// Method descriptor
#[derive(Clone)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Ordered parameter types
    pub params: Vec<TypeId>,
    /// Return type
    pub return_type: TypeId,
    /// Declared visibility
    pub visibility: Visibility,
    /// Compiler-generated bridge marker; synthetic methods are invisible to
    /// accessor discovery
    pub is_synthetic: bool,
    /// Native implementation, if the method is callable in this process
    pub body: Option<NativeBody>,
}

impl MethodDef {
    /// Create a public method with no parameters
    pub fn new(name: impl Into<String>, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type,
            visibility: Visibility::Public,
            is_synthetic: false,
            body: None,
        }
    }

    /// Append a parameter type
    pub fn with_param(mut self, ty: TypeId) -> Self {
        self.params.push(ty);
        self
    }

    /// Set the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as a compiler-generated bridge method
    pub fn as_synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    /// Attach a native body
    pub fn with_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, ModelError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("visibility", &self.visibility)
            .field("is_synthetic", &self.is_synthetic)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Constructor descriptor
#[derive(Clone)]
pub struct ConstructorDef {
    /// Ordered parameter types
    pub params: Vec<TypeId>,
    /// Declared visibility
    pub visibility: Visibility,
    /// Native implementation, run after slot pre-fill
    pub body: Option<NativeBody>,
}

impl ConstructorDef {
    /// Create a public zero-argument constructor
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            visibility: Visibility::Public,
            body: None,
        }
    }

    /// Append a parameter type
    pub fn with_param(mut self, ty: TypeId) -> Self {
        self.params.push(ty);
        self
    }

    /// Set the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Attach a native body
    pub fn with_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, ModelError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }
}

impl Default for ConstructorDef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConstructorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDef")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Class or interface descriptor
///
/// A descriptor is inert data until registered;
/// [`define_class`](crate::TypeRegistry::define_class) assigns its id and
/// makes it reachable from types.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Id assigned at registration
    pub(crate) id: ClassId,
    /// Class name, unique within a registry
    pub name: String,
    /// Class or interface
    pub kind: ClassKind,
    /// Ordered type parameter names for generic classes
    pub type_params: Vec<String>,
    /// Superclass (or superinterface) reference, possibly a generic
    /// instantiation
    pub extends: Option<TypeId>,
    /// Implemented interfaces
    pub implements: Vec<TypeId>,
    /// Declared fields
    pub fields: Vec<FieldDef>,
    /// Declared methods
    pub methods: Vec<MethodDef>,
    /// Declared constructors
    pub constructors: Vec<ConstructorDef>,
}

impl ClassDef {
    /// Create an empty class descriptor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClassId(u32::MAX),
            name: name.into(),
            kind: ClassKind::Class,
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Create an empty interface descriptor
    pub fn interface(name: impl Into<String>) -> Self {
        let mut def = Self::new(name);
        def.kind = ClassKind::Interface;
        def
    }

    /// Declare type parameters
    pub fn with_type_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Set the superclass reference
    pub fn with_extends(mut self, ty: TypeId) -> Self {
        self.extends = Some(ty);
        self
    }

    /// Add an implemented interface
    pub fn implement(mut self, ty: TypeId) -> Self {
        self.implements.push(ty);
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a constructor
    pub fn with_constructor(mut self, ctor: ConstructorDef) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Id assigned at registration
    pub fn id(&self) -> ClassId {
        self.id
    }
}
