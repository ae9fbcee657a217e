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

//! # Chunk Packer Module
//!
//! This module transforms an input sequence of records into a sequence of
//! chunk files, each within a byte budget on a best-effort basis.
//!
//! ## Size accounting
//!
//! The packer keeps a running estimate: the sum of each batched record's
//! standalone compact JSON encoding length. The estimate never exactly
//! equals the persisted batch's size (array brackets, separators, and
//! pretty indentation add overhead), so every flush is followed by an
//! on-disk size check. A chunk that lands over budget is deleted and its
//! index slot is reused by the next flush, keeping the surviving filenames
//! dense with no renumbering pass.
//!
//! ## Numbering policy
//!
//! Chunk indices start at 0 and advance only after a successful flush.
//! The final chunk count equals the last successful index plus one, and the
//! output directory never contains gaps.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chunk::writer::{KuraChunkWriter, KuraWriterConfig};
use crate::errors::Result;
use crate::record::KuraRecordBatch;
use crate::source::KuraRecordSource;

/// Configuration for the chunk packer.
///
/// All run-wide tunables live here explicitly; there are no module-level
/// default constants.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KuraPackerConfig {
    /// Target maximum byte size of one chunk's on-disk encoding.
    pub budget_bytes: usize,
    /// Directory the chunk files are written into.
    pub output_dir: PathBuf,
    /// Zero-padding width of chunk indices in filenames.
    pub pad_width: usize,
    /// Use atomic writes (write to temp then rename) for chunk files.
    pub atomic_write: bool,
}

impl Default for KuraPackerConfig {
    fn default() -> Self {
        Self {
            budget_bytes: 4 * 1024 * 1024,
            output_dir: PathBuf::from("data"),
            pad_width: 4,
            atomic_write: true,
        }
    }
}

/// Statistics about a completed packing run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KuraPackStats {
    /// Number of chunk files that survived on disk.
    pub chunks_written: usize,
    /// Number of oversized chunks that were written and rolled back.
    pub chunks_deleted: usize,
    /// Total number of records pulled from the source.
    pub records_packed: usize,
    /// Total bytes of surviving chunk files.
    pub bytes_written: u64,
}

/// Accumulates records into batches and flushes them as chunk files.
#[derive(Debug)]
pub struct KuraChunkPacker {
    config: KuraPackerConfig,
    writer: KuraChunkWriter,
}

impl KuraChunkPacker {
    /// Creates a packer for the given configuration.
    pub fn new(config: KuraPackerConfig) -> Self {
        let writer = KuraChunkWriter::new(config.output_dir.clone()).with_config(KuraWriterConfig {
            pad_width: config.pad_width,
            atomic_write: config.atomic_write,
        });
        Self { config, writer }
    }

    /// Drains the source into size-bounded chunk files.
    ///
    /// Records are pulled strictly in order. A flush happens whenever the
    /// next record would push the running estimate over budget and the
    /// current batch is non-empty, plus once more for the trailing batch
    /// after the source is exhausted.
    ///
    /// A record whose own encoding exceeds the budget still makes forward
    /// progress: it is flushed alone, detected oversized, rolled back, and
    /// counted in `chunks_deleted`. Each record is attempted exactly once.
    pub fn pack<S: KuraRecordSource + ?Sized>(&mut self, source: &mut S) -> Result<KuraPackStats> {
        let mut stats = KuraPackStats::default();
        let mut batch = KuraRecordBatch::new();
        let mut estimate = 0usize;
        let mut index = 0usize;

        while let Some(record) = source.pull()? {
            let record_size = record.encoded_size()?;

            if estimate + record_size > self.config.budget_bytes && !batch.is_empty() {
                if self.flush(&batch, index, &mut stats)? {
                    index += 1;
                }
                batch.clear();
                estimate = 0;
            }

            batch.push(record);
            estimate += record_size;
            stats.records_packed += 1;
        }

        if !batch.is_empty() && self.flush(&batch, index, &mut stats)? {
            index += 1;
        }

        stats.chunks_written = index;
        Ok(stats)
    }

    /// Persists a batch at the given index and applies the post-write
    /// budget check. Returns whether the chunk survived (and the index
    /// should advance).
    fn flush(
        &self,
        batch: &KuraRecordBatch,
        index: usize,
        stats: &mut KuraPackStats,
    ) -> Result<bool> {
        let actual_size = self.writer.write_chunk(batch, index)?;

        if actual_size as usize > self.config.budget_bytes {
            self.writer.delete_chunk(index)?;
            log::warn!(
                "deleted oversized chunk {}: {} bytes exceeds budget of {} bytes",
                self.writer.chunk_path(index).display(),
                actual_size,
                self.config.budget_bytes
            );
            stats.chunks_deleted += 1;
            return Ok(false);
        }

        stats.bytes_written += actual_size;
        Ok(true)
    }
}
