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

//! # Kura Core Library
//!
//! Kura is a streaming, size-bounded chunker for JSON record datasets. It
//! consumes an ordered sequence of records from a source, packs them into
//! chunk files each capped at a target byte budget, corrects chunks that
//! land over budget after the fact, and emits an index manifest describing
//! the finished dataset.
//!
//! ## Module Overview
//!
//! - **record**: KuraRecord, the ordered JSON object records are made of
//! - **source**: record source trait plus in-memory and JSONL sources
//! - **enrich**: optional per-record identifier enrichment
//! - **chunk**: the packer, chunk writer, index manifest, and dataset
//!   validation
//! - **errors**: KuraError and the crate-wide Result alias
//!
//! ## Quick Start
//!
//! ```rust
//! use kura::{chunk_dataset, KuraMemorySource, KuraPackerConfig, KuraRecord};
//! use serde_json::json;
//!
//! let records = vec![
//!     KuraRecord::from_value(json!({"question": "two sum"})).unwrap(),
//!     KuraRecord::from_value(json!({"question": "3sum"})).unwrap(),
//! ];
//!
//! let config = KuraPackerConfig {
//!     output_dir: "out/data".into(),
//!     ..Default::default()
//! };
//! let stats = chunk_dataset(KuraMemorySource::new(records), None, config, "leetcode").unwrap();
//! assert_eq!(stats.records_packed, 2);
//! ```
//!
//! ## Guarantees
//!
//! - Records are persisted in source order, none dropped or duplicated
//!   (aside from rolled-back oversized singleton chunks, which are counted
//!   and logged)
//! - After a run, every surviving chunk file is within the byte budget
//! - Chunk filenames are dense zero-padded indices starting at 0
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, KuraError>`. Storage failures
//! are propagated without retry; only the oversized-chunk rollback is
//! handled automatically.

pub mod chunk;
pub mod enrich;
pub mod errors;
pub mod record;
pub mod source;

pub use errors::{KuraError, Result};
pub use record::{KuraFields, KuraRecord, KuraRecordBatch};
pub use source::{KuraJsonlSource, KuraMemorySource, KuraRecordSource};
pub use enrich::{KuraEnrichConfig, KuraEnrichedSource, KuraEnricher};
pub use chunk::{
    chunk_dataset, index_path, validate_dataset, write_index, KuraChunkPacker, KuraChunkWriter,
    KuraIndex, KuraIndexEntry, KuraPackStats, KuraPackerConfig, KuraValidationReport,
    KuraWriterConfig,
};
