//! Unified error type for Waymark
//!
//! Most navigation failures are not errors at all: popping the root, popping
//! past the bottom of the stack, or targeting a destination that is not on the
//! stack are silent no-ops in the reducer. The variants here cover the few
//! places where something really went wrong.

use serde::{Deserialize, Serialize};

/// Error type for all Waymark operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum NavError {
    /// Persisted state could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Invalid navigator configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message describing the invalid setting
        message: String,
    },

    /// No registered graph can resolve the destination
    #[error("No navigation graph resolves destination '{destination_id}'")]
    UnresolvedDestination {
        /// Destination id that was dispatched but never registered
        destination_id: String,
    },

    /// A scope key already holds an instance of a different type
    #[error("Scope key '{key}' holds a value that is not a {expected}")]
    ScopeTypeMismatch {
        /// Instance key inside the scope
        key: String,
        /// Type name requested by the caller
        expected: String,
    },

    /// The navigation event channel has no receiver left
    #[error("Navigation event channel closed")]
    ChannelClosed,
}

impl NavError {
    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unresolved destination error
    pub fn unresolved(destination_id: impl Into<String>) -> Self {
        Self::UnresolvedDestination {
            destination_id: destination_id.into(),
        }
    }

    /// Create a scope type mismatch error
    pub fn scope_type_mismatch(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::ScopeTypeMismatch {
            key: key.into(),
            expected: expected.into(),
        }
    }
}

/// Standard Result type for Waymark operations
pub type Result<T> = std::result::Result<T, NavError>;

impl From<serde_json::Error> for NavError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
