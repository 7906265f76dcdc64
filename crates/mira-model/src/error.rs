//! Object model errors

use thiserror::Error;

use crate::class::ClassId;

/// Errors raised by the type registry and the dynamic object model
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// A class with the same name is already registered
    #[error("Duplicate class definition: {name}")]
    DuplicateClass {
        /// Name of the conflicting class
        name: String,
    },

    /// A class id does not resolve in this registry
    #[error("Unknown class: {id}")]
    UnknownClass {
        /// The unresolvable id
        id: ClassId,
    },

    /// A native method or constructor body failed
    #[error("Native body error: {message}")]
    Native {
        /// Failure description from the handler
        message: String,
    },
}
