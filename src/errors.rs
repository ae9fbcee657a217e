//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Kura.
//! The Kura project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Kura Error Module
//!
//! This module defines the error types and utilities used throughout Kura
//! for consistent error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors outside a specific storage operation
//! - **Storage**: Failures of a named storage operation (write, delete,
//!   rename) against a chunk or manifest file
//! - **Source**: Failures while pulling records from a record source
//! - **Validation**: Input validation failures
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! Storage errors are never retried by Kura; they propagate to the caller
//! and abort the run. A delete failure after an oversize detection is the
//! one path that can leave an over-budget chunk file on disk, which is why
//! callers should treat every `Storage` error as fatal.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Kura.
///
/// This is a type alias for `std::result::Result<T, KuraError>` that
/// provides a more concise way to write function signatures that return
/// Kura errors.
pub type Result<T> = std::result::Result<T, KuraError>;

/// Canonical error enumeration for Kura.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum KuraError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Failure of a specific storage operation against a named path.
    #[error("storage {operation} failed for '{path}': {message}")]
    Storage {
        operation: String,
        path: String,
        message: String,
    },

    /// Failures raised while pulling records from a record source.
    #[error("source error: {message}")]
    Source { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for KuraError {
    fn from(err: io::Error) -> Self {
        KuraError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KuraError {
    fn from(err: serde_json::Error) -> Self {
        KuraError::Serde(err.to_string())
    }
}

impl KuraError {
    /// Helper to construct storage errors for a named operation and path.
    pub fn storage(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        KuraError::Storage {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Helper to construct record source errors.
    pub fn source<T: Into<String>>(message: T) -> Self {
        KuraError::Source {
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        KuraError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        KuraError::Internal(message.into())
    }
}
