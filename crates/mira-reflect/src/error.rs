//! Reflection errors

use thiserror::Error;

use mira_model::ModelError;

/// Errors raised during introspection and reflective access
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectError {
    /// Competing accessor candidates for one property could not be ordered
    #[error("Ambiguous accessor for property '{property}' in class '{class}'")]
    AmbiguousAccessor {
        /// The contested property name
        property: String,
        /// Class being introspected
        class: String,
    },

    /// A queried property name is not in the relevant property set
    #[error("No property named '{property}' in class '{class}'")]
    NoSuchProperty {
        /// The missing property name
        property: String,
        /// Class the query ran against
        class: String,
    },

    /// The type exposes no reachable zero-argument constructor
    #[error("No default constructor for class '{class}'")]
    NoDefaultConstructor {
        /// Class the query ran against
        class: String,
    },

    /// The operation has no meaning on a read-only view
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: String,
    },

    /// Introspection was requested for a type that is not class-shaped
    #[error("Type '{ty}' is not a class or interface")]
    NotAClass {
        /// Rendering of the offending type
        ty: String,
    },

    /// A method-backed capability has no native body to run
    #[error("Method '{method}' has no body to invoke")]
    MissingBody {
        /// Method name
        method: String,
    },

    /// An invoker was called with the wrong number of arguments
    #[error("Invalid argument count: expected {expected}, got {actual}")]
    BadArgumentCount {
        /// Expected argument count
        expected: usize,
        /// Actual argument count
        actual: usize,
    },

    /// Underlying object-model failure
    #[error(transparent)]
    Model(#[from] ModelError),
}
