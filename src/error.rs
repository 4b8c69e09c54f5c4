//! Error types for the `vecdb` crate.

use thiserror::Error;

/// Errors raised by vector database operations.
///
/// Every backend-native failure is caught at the adapter boundary and
/// translated into one of these variants, preserving the original
/// diagnostic message. Nothing is suppressed or retried.
#[derive(Debug, Error)]
pub enum DbError {
    /// A configuration or construction error. Raised before any network
    /// activity, e.g. for an unknown backend selector or an unsupported
    /// distance metric name.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend is unreachable, authentication failed, or an operation
    /// was invoked before `connect()` succeeded.
    #[error("Connection error ({backend}): {message}")]
    Connection {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The backend rejected collection parameters or reported a conflict.
    #[error("Collection creation error ({backend}): {message}")]
    CollectionCreation {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The backend rejected a collection delete.
    #[error("Collection deletion error ({backend}): {message}")]
    CollectionDeletion {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The backend rejected a vector insert (dimension mismatch, missing
    /// collection).
    #[error("Vector insertion error ({backend}): {message}")]
    Insertion {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The backend rejected a search (malformed query vector, missing
    /// collection).
    #[error("Vector search error ({backend}): {message}")]
    Search {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for vector database operations.
pub type Result<T> = std::result::Result<T, DbError>;
