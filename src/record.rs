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

//! # Kura Record Module
//!
//! This module provides the core data structure for representing individual
//! dataset records. KuraRecord is the fundamental unit of data that flows
//! from a record source through the chunk packer onto disk.
//!
//! ## Design Principles
//!
//! - **Flexibility**: Records are ordered JSON objects (field name to
//!   serde_json::Value), enabling storage of structured and semi-structured
//!   data without strict schemas
//! - **Order preservation**: Field order is retained from input to output,
//!   so persisted chunks reproduce source records faithfully
//! - **Transparency**: Records serialize as the bare JSON object with no
//!   wrapper, so chunk files contain exactly the source data
//!
//! ## Usage Example
//!
//! ```rust
//! use kura::record::KuraRecord;
//! use serde_json::json;
//!
//! let record = KuraRecord::from_value(json!({
//!     "question": "two sum",
//!     "difficulty": "easy",
//! })).unwrap();
//!
//! let size = record.encoded_size().unwrap();
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{KuraError, Result};

/// Ordered field map backing a record.
///
/// Uses serde_json's Map, which preserves insertion order under the
/// `preserve_order` feature enabled by this crate.
pub type KuraFields = Map<String, Value>;

/// Fundamental data unit processed by the Kura chunker.
///
/// A record is a flat, ordered mapping from field name to JSON-compatible
/// value (string, number, boolean, null, nested mapping or sequence). It
/// carries no identity of its own until persisted; the optional enrichment
/// step may stamp a generated identifier field before serialization.
///
/// The struct is `#[serde(transparent)]`: a record serializes as its bare
/// field object, so a chunk file is a plain JSON array of source objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KuraRecord {
    /// Field name to value mapping, in insertion order.
    pub fields: KuraFields,
}

impl KuraRecord {
    /// Constructs an empty record.
    pub fn new() -> Self {
        KuraRecord {
            fields: KuraFields::new(),
        }
    }

    /// Constructs a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(KuraRecord { fields }),
            other => Err(KuraError::validation(format!(
                "record must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Adds a field, consuming and returning the record (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Byte length of the record's standalone compact JSON encoding (UTF-8).
    ///
    /// This is the quantity the packer accumulates into its running size
    /// estimate. It deliberately excludes the array brackets, separators,
    /// and indentation added by the chunk writer, which is why persisted
    /// chunks need a post-write size check.
    pub fn encoded_size(&self) -> Result<usize> {
        Ok(serde_json::to_string(&self.fields)?.len())
    }

    /// Consumes the record and returns it as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for KuraRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience alias for working on batches of records.
pub type KuraRecordBatch = Vec<KuraRecord>;

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
