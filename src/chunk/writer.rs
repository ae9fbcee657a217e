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

//! # Chunk Writer Module
//!
//! This module persists one batch of records as a chunk file and reports
//! its on-disk size. The size is read back through a filesystem metadata
//! query rather than the in-memory encoded length, so it reflects the real
//! stored size the packer's budget check cares about.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{KuraError, Result};
use crate::record::KuraRecordBatch;

/// Configuration for the chunk writer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KuraWriterConfig {
    /// Zero-padding width of the decimal chunk index in filenames.
    pub pad_width: usize,
    /// Use atomic write (write to temp then rename).
    pub atomic_write: bool,
}

impl Default for KuraWriterConfig {
    fn default() -> Self {
        Self {
            pad_width: 4,
            atomic_write: true,
        }
    }
}

/// Writes record batches to zero-padded `<NNNN>.json` chunk files.
///
/// Chunks are pretty-printed JSON arrays with 2-space indentation, UTF-8
/// encoded with non-ASCII characters preserved literally, for human
/// auditability of the output dataset.
#[derive(Debug)]
pub struct KuraChunkWriter {
    dir: PathBuf,
    config: KuraWriterConfig,
}

impl KuraChunkWriter {
    /// Creates a writer targeting the given output directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: KuraWriterConfig::default(),
        }
    }

    /// Replaces the writer configuration.
    pub fn with_config(mut self, config: KuraWriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Path of the chunk file for the given index.
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{:0>width$}.json", index, width = self.config.pad_width))
    }

    /// Serializes and persists a batch at the given chunk index.
    ///
    /// Returns the byte size of the file as stored on disk. Write failures
    /// surface as storage errors and are never retried.
    pub fn write_chunk(&self, batch: &KuraRecordBatch, index: usize) -> Result<u64> {
        fs::create_dir_all(&self.dir)?;

        let path = self.chunk_path(index);
        let final_path = if self.config.atomic_write {
            let temp_path = self.temp_path(index);
            self.write_to_path(batch, &temp_path)?;
            fs::rename(&temp_path, &path).map_err(|e| {
                KuraError::storage("rename", path.display().to_string(), e.to_string())
            })?;
            path
        } else {
            self.write_to_path(batch, &path)?;
            path
        };

        let size = fs::metadata(&final_path)
            .map_err(|e| {
                KuraError::storage("stat", final_path.display().to_string(), e.to_string())
            })?
            .len();

        log::debug!(
            "wrote chunk {} ({} records, {} bytes)",
            final_path.display(),
            batch.len(),
            size
        );
        Ok(size)
    }

    /// Deletes the chunk file at the given index.
    ///
    /// Used by the packer to roll back a chunk that turned out oversized.
    /// A failure here is fatal for the run: the over-budget file would
    /// otherwise remain on disk while the chunk index stands still.
    pub fn delete_chunk(&self, index: usize) -> Result<()> {
        let path = self.chunk_path(index);
        fs::remove_file(&path).map_err(|e| {
            KuraError::storage("delete", path.display().to_string(), e.to_string())
        })
    }

    fn write_to_path(&self, batch: &KuraRecordBatch, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            KuraError::storage("write", path.display().to_string(), e.to_string())
        })?;
        let mut writer = BufWriter::new(file);

        // serde_json pretty-prints with 2-space indentation and leaves
        // non-ASCII characters unescaped.
        let json = serde_json::to_string_pretty(batch)?;
        writer.write_all(json.as_bytes()).map_err(|e| {
            KuraError::storage("write", path.display().to_string(), e.to_string())
        })?;
        writer.flush().map_err(|e| {
            KuraError::storage("write", path.display().to_string(), e.to_string())
        })?;
        Ok(())
    }

    fn temp_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!(
            ".{:0>width$}.json.tmp",
            index,
            width = self.config.pad_width
        ))
    }
}
