// ABOUTME: Unified error handling for the skywatch workspace
// ABOUTME: Defines AppError with constructor helpers and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Unified error handling.
//!
//! The scoring and window-detection paths are total and never surface errors;
//! `AppError` exists for configuration validation and the storage layer. The
//! alert tracker absorbs storage errors internally (fail open) rather than
//! propagating them to callers.

use thiserror::Error;

/// Result alias used throughout the workspace
pub type AppResult<T> = Result<T, AppError>;

/// Common error type for configuration and storage operations
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the validation failure
        message: String,
    },

    /// Configuration is malformed (bad weights, non-monotonic tables, ...)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// The backing record store failed or was unreachable
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// The requested record does not exist
    #[error("Not found: {resource}")]
    NotFound {
        /// Identifier of the missing record
        resource: String,
    },

    /// Record serialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        /// Context where serialization failed
        context: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// True when the error denotes an absent record rather than a failure.
    ///
    /// The alert tracker treats both identically (fail open), but callers
    /// embedding a real store driver may want to distinguish them for logging.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_helpers_produce_matching_variants() {
        assert!(matches!(
            AppError::invalid_input("x"),
            AppError::InvalidInput { .. }
        ));
        assert!(matches!(AppError::config("x"), AppError::Config { .. }));
        assert!(matches!(AppError::storage("x"), AppError::Storage { .. }));
        assert!(AppError::not_found("row").is_not_found());
        assert!(!AppError::storage("down").is_not_found());
    }

    #[test]
    fn display_includes_message() {
        let err = AppError::config("weights sum to 120");
        assert_eq!(err.to_string(), "Configuration error: weights sum to 120");
    }
}
