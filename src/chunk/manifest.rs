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

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{KuraError, Result};

/// One dataset entry in the index manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KuraIndexEntry {
    /// Number of chunk files in the dataset directory (not record count).
    pub length: usize,
    /// Caller-supplied dataset type label.
    #[serde(rename = "type")]
    pub dataset_type: String,
}

/// Index manifest mapping dataset directory names to their summaries.
///
/// Serializes transparently as the bare mapping, e.g.
/// `{ "data": { "length": 12, "type": "leetcode" } }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KuraIndex {
    pub entries: BTreeMap<String, KuraIndexEntry>,
}

impl KuraIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for a dataset directory.
    pub fn insert(
        &mut self,
        dataset: impl Into<String>,
        length: usize,
        dataset_type: impl Into<String>,
    ) {
        self.entries.insert(
            dataset.into(),
            KuraIndexEntry {
                length,
                dataset_type: dataset_type.into(),
            },
        );
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KuraError::internal(format!("failed to serialize index: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| KuraError::validation(format!("invalid index JSON: {}", e)))
    }

    /// Writes the index to the given path, replacing any prior content
    /// wholesale. The manifest is never merged with what was there before.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|e| {
            KuraError::storage("write", path.display().to_string(), e.to_string())
        })
    }

    /// Loads an existing index manifest.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Path of the index manifest for a chunked dataset directory: `index.json`
/// in the directory's parent.
pub fn index_path(output_dir: &Path) -> PathBuf {
    match output_dir.parent() {
        Some(parent) => parent.join("index.json"),
        None => PathBuf::from("index.json"),
    }
}

/// Emits the index manifest for a finished packing run.
///
/// Maps the output directory's base name to the final chunk count and the
/// supplied type label, and returns the manifest path. Overwrites any prior
/// manifest entirely.
pub fn write_index(output_dir: &Path, chunk_count: usize, dataset_type: &str) -> Result<PathBuf> {
    let dataset = output_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            KuraError::validation(format!(
                "output directory '{}' has no usable base name",
                output_dir.display()
            ))
        })?;

    let mut index = KuraIndex::new();
    index.insert(dataset, chunk_count, dataset_type);

    let path = index_path(output_dir);
    index.write(&path)?;
    Ok(path)
}
