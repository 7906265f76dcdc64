//! Dynamic values and object instances
//!
//! Runtime representation of the values reflected properties hold. Instances
//! are named-slot records tagged with their class id; they are shared through
//! [`ObjectRef`] handles, and handle identity is object identity.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::class::ClassId;

/// Shared handle to a heap instance
pub type ObjectRef = Arc<RwLock<Instance>>;

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// Null / absent
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// IEEE 754 double
    Float(f64),
    /// String
    Str(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object instance handle
    Object(ObjectRef),
}

impl Value {
    /// Wrap an instance in a fresh shared handle
    pub fn object(instance: Instance) -> Self {
        Value::Object(Arc::new(RwLock::new(instance)))
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the object handle if this is an object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => write!(f, "[object {}]", obj.read().class),
        }
    }
}

/// Object instance: a class tag plus named slots
///
/// Slot reads default to [`Value::Null`] for names that have never been
/// written, mirroring field access on a freshly allocated object.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Class this instance belongs to
    pub class: ClassId,
    slots: FxHashMap<String, Value>,
}

impl Instance {
    /// Create an instance with all slots unset
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            slots: FxHashMap::default(),
        }
    }

    /// Read a slot; unset slots read as null
    pub fn get(&self, name: &str) -> Value {
        self.slots.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Check whether a slot has been written
    pub fn has(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Write a slot
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.slots.insert(name.into(), value);
    }

    /// Number of written slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
