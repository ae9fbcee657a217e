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

//! # Dataset Validation Module
//!
//! This module checks the structural consistency of a finished chunked
//! dataset: the index manifest parses and carries an entry for the dataset
//! directory, the recorded length matches the chunk files actually present,
//! and every expected chunk file parses as a JSON array of records.
//! Validation is structural only; what fields the records carry is the
//! record producer's contract, not the chunker's.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chunk::manifest::{index_path, KuraIndex};
use crate::errors::{KuraError, Result};
use crate::record::KuraRecordBatch;

/// Summary of a successful dataset validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KuraValidationReport {
    /// Dataset directory base name, as recorded in the index manifest.
    pub dataset: String,
    /// Number of chunk files checked.
    pub chunk_count: usize,
    /// Total number of records across all chunks.
    pub record_count: usize,
}

/// Validates a chunked dataset directory against its index manifest.
///
/// `pad_width` must match the filename policy the dataset was written
/// with. The first violation surfaces as a validation error naming the
/// offending file; a consistent dataset yields a summary report.
pub fn validate_dataset(output_dir: &Path, pad_width: usize) -> Result<KuraValidationReport> {
    let dataset = output_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            KuraError::validation(format!(
                "dataset directory '{}' has no usable base name",
                output_dir.display()
            ))
        })?;

    let manifest_path = index_path(output_dir);
    let index = KuraIndex::read(&manifest_path)?;
    let entry = index.entries.get(dataset).ok_or_else(|| {
        KuraError::validation(format!(
            "index '{}' has no entry for dataset '{}'",
            manifest_path.display(),
            dataset
        ))
    })?;

    let present = count_chunk_files(output_dir)?;
    if present != entry.length {
        return Err(KuraError::validation(format!(
            "dataset '{}' has {} chunk files but the index records {}",
            dataset, present, entry.length
        )));
    }

    let mut record_count = 0;
    for chunk_no in 0..entry.length {
        let path = output_dir.join(format!("{:0>width$}.json", chunk_no, width = pad_width));
        let content = fs::read_to_string(&path).map_err(|e| {
            KuraError::validation(format!(
                "missing or unreadable chunk '{}': {}",
                path.display(),
                e
            ))
        })?;
        let batch: KuraRecordBatch = serde_json::from_str(&content).map_err(|e| {
            KuraError::validation(format!(
                "chunk '{}' is not a valid record array: {}",
                path.display(),
                e
            ))
        })?;
        record_count += batch.len();
    }

    Ok(KuraValidationReport {
        dataset: dataset.to_string(),
        chunk_count: entry.length,
        record_count,
    })
}

/// Counts the `.json` chunk files in a dataset directory, ignoring hidden
/// files such as leftover atomic-write temps.
fn count_chunk_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".json") && !name.starts_with('.') {
            count += 1;
        }
    }
    Ok(count)
}
