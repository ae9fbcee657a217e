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

//! # Chunking Module
//!
//! This module contains the core of Kura: turning a record stream into
//! size-bounded chunk files plus an index manifest.
//!
//! ## Module Components
//!
//! - **Packer** ([packer]): batching, flush decisions, oversize rollback
//! - **Writer** ([writer]): chunk file serialization and size reporting
//! - **Manifest** ([manifest]): index emission after a finished run
//! - **Validate** ([validate]): structural consistency checks of a
//!   finished dataset against its index
//!
//! ## Usage
//!
//! ```rust
//! use kura::chunk::{chunk_dataset, KuraPackerConfig};
//! use kura::source::KuraMemorySource;
//!
//! let source = KuraMemorySource::new(records);
//! let config = KuraPackerConfig {
//!     output_dir: "out/data".into(),
//!     ..Default::default()
//! };
//! let stats = chunk_dataset(source, None, config, "leetcode")?;
//! ```

pub mod manifest;
pub mod packer;
pub mod validate;
pub mod writer;

pub use manifest::{index_path, write_index, KuraIndex, KuraIndexEntry};
pub use packer::{KuraChunkPacker, KuraPackStats, KuraPackerConfig};
pub use validate::{validate_dataset, KuraValidationReport};
pub use writer::{KuraChunkWriter, KuraWriterConfig};

use std::fs;

use crate::enrich::{KuraEnrichedSource, KuraEnricher};
use crate::errors::Result;
use crate::source::KuraRecordSource;

/// Runs a full chunking pass: source, optional enrichment, packing, and
/// index emission.
///
/// Creates the output directory, drains the source through the packer, and
/// writes the index manifest mapping the output directory's base name to
/// the final chunk count and the given dataset type label. Returns the
/// packer's statistics.
pub fn chunk_dataset<S: KuraRecordSource>(
    mut source: S,
    enricher: Option<KuraEnricher>,
    config: KuraPackerConfig,
    dataset_type: &str,
) -> Result<KuraPackStats> {
    fs::create_dir_all(&config.output_dir)?;
    log::info!(
        "chunking {} records into '{}'",
        source.total_records(),
        config.output_dir.display()
    );

    let output_dir = config.output_dir.clone();
    let mut packer = KuraChunkPacker::new(config);

    let stats = match enricher {
        Some(enricher) => {
            let mut enriched = KuraEnrichedSource::new(source, enricher);
            packer.pack(&mut enriched)?
        }
        None => packer.pack(&mut source)?,
    };

    let index = write_index(&output_dir, stats.chunks_written, dataset_type)?;
    log::info!(
        "wrote {} chunks ({} bytes) and index '{}'",
        stats.chunks_written,
        stats.bytes_written,
        index.display()
    );
    Ok(stats)
}
