//! Capability handles for property access
//!
//! An [`Invoker`] performs one get or set operation against an instance.
//! Whether the property is backed by an accessor method or a raw field is
//! hidden behind the same call surface; the introspector decides which
//! member backs a property, the invoker carries that member.

use mira_model::{FieldDef, Instance, MethodDef, TypeId, Value};

use crate::error::ReflectError;

/// Opaque get/set capability for one property
#[derive(Debug, Clone)]
pub enum Invoker {
    /// Accessor method call
    Method {
        /// The backing method descriptor
        method: MethodDef,
    },
    /// Raw field read
    GetField {
        /// The backing field descriptor
        field: FieldDef,
    },
    /// Raw field write
    SetField {
        /// The backing field descriptor
        field: FieldDef,
    },
}

impl Invoker {
    /// Perform the access against `target`
    ///
    /// Getters take no arguments and return the property value; setters take
    /// exactly one argument and return [`Value::Null`]. Static field reads
    /// observe the field's declared initial value.
    pub fn invoke(&self, target: &mut Instance, args: &[Value]) -> Result<Value, ReflectError> {
        match self {
            Invoker::Method { method } => {
                if args.len() != method.params.len() {
                    return Err(ReflectError::BadArgumentCount {
                        expected: method.params.len(),
                        actual: args.len(),
                    });
                }
                let body = method.body.as_ref().ok_or_else(|| ReflectError::MissingBody {
                    method: method.name.clone(),
                })?;
                Ok(body(target, args)?)
            }
            Invoker::GetField { field } => {
                if !args.is_empty() {
                    return Err(ReflectError::BadArgumentCount {
                        expected: 0,
                        actual: args.len(),
                    });
                }
                if field.is_static {
                    Ok(field.initial.clone().unwrap_or(Value::Null))
                } else {
                    Ok(target.get(&field.name))
                }
            }
            Invoker::SetField { field } => {
                if args.len() != 1 {
                    return Err(ReflectError::BadArgumentCount {
                        expected: 1,
                        actual: args.len(),
                    });
                }
                target.set(field.name.clone(), args[0].clone());
                Ok(Value::Null)
            }
        }
    }

    /// Declared type of the backing member
    ///
    /// For a single-parameter method this is the parameter type, otherwise
    /// the return type; for fields it is the field's declared type.
    pub fn declared_type(&self) -> TypeId {
        match self {
            Invoker::Method { method } => {
                if method.params.len() == 1 {
                    method.params[0]
                } else {
                    method.return_type
                }
            }
            Invoker::GetField { field } | Invoker::SetField { field } => field.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mira_model::{ClassDef, TypeRegistry};

    fn test_class(registry: &mut TypeRegistry) -> mira_model::ClassId {
        registry.define_class(ClassDef::new("Probe")).unwrap()
    }

    #[test]
    fn test_field_read_write() {
        let mut registry = TypeRegistry::new();
        let class = test_class(&mut registry);
        let field = FieldDef::new("count", registry.int_type());
        let mut obj = Instance::new(class);

        let set = Invoker::SetField { field: field.clone() };
        let get = Invoker::GetField { field };

        assert_eq!(get.invoke(&mut obj, &[]).unwrap(), Value::Null);
        set.invoke(&mut obj, &[Value::Int(3)]).unwrap();
        assert_eq!(get.invoke(&mut obj, &[]).unwrap(), Value::Int(3));
    }

    #[test]
    fn test_static_field_reads_initial() {
        let mut registry = TypeRegistry::new();
        let class = test_class(&mut registry);
        let field = FieldDef::new("MAX", registry.int_type())
            .as_static()
            .as_readonly()
            .with_initial(Value::Int(100));
        let mut obj = Instance::new(class);

        let get = Invoker::GetField { field };
        assert_eq!(get.invoke(&mut obj, &[]).unwrap(), Value::Int(100));
    }

    #[test]
    fn test_method_invocation() {
        let mut registry = TypeRegistry::new();
        let class = test_class(&mut registry);
        let method = MethodDef::new("getCount", registry.int_type())
            .with_body(|obj, _| Ok(obj.get("count")));
        let mut obj = Instance::new(class);
        obj.set("count", Value::Int(9));

        let get = Invoker::Method { method };
        assert_eq!(get.invoke(&mut obj, &[]).unwrap(), Value::Int(9));
        assert_eq!(get.declared_type(), registry.int_type());
    }

    #[test]
    fn test_method_without_body() {
        let mut registry = TypeRegistry::new();
        let class = test_class(&mut registry);
        let method = MethodDef::new("getCount", registry.int_type());
        let mut obj = Instance::new(class);
        let get = Invoker::Method { method };
        let err = get.invoke(&mut obj, &[]).unwrap_err();
        assert!(matches!(err, ReflectError::MissingBody { .. }));
    }

    #[test]
    fn test_argument_count_checked() {
        let mut registry = TypeRegistry::new();
        let class = test_class(&mut registry);
        let field = FieldDef::new("x", registry.int_type());
        let mut obj = Instance::new(class);

        let set = Invoker::SetField { field: field.clone() };
        let err = set.invoke(&mut obj, &[]).unwrap_err();
        assert_eq!(
            err,
            ReflectError::BadArgumentCount {
                expected: 1,
                actual: 0
            }
        );

        let get = Invoker::GetField { field };
        let err = get.invoke(&mut obj, &[Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            ReflectError::BadArgumentCount {
                expected: 0,
                actual: 1
            }
        );
    }

    #[test]
    fn test_declared_type_of_setter_method() {
        let registry = TypeRegistry::new();
        let method = MethodDef::new("setName", registry.void_type())
            .with_param(registry.string_type());
        let set = Invoker::Method { method };
        assert_eq!(set.declared_type(), registry.string_type());
    }
}
