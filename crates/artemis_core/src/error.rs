//! # World Error Types
//!
//! Errors raised while building or merging world objects.

use artemis_shared::ObjectType;
use thiserror::Error;

/// Errors that can occur in the world model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A builder was applied to an object that already holds values.
    #[error("object {id} is already populated")]
    AlreadyPopulated {
        /// The object that was targeted.
        id: i32,
    },

    /// Two objects of different identity were merged.
    #[error("cannot merge {found} object into {expected} object {id}")]
    TypeMismatch {
        /// Object id of the destination.
        id: i32,
        /// Type of the destination.
        expected: ObjectType,
        /// Type of the source.
        found: ObjectType,
    },
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
