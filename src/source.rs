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

//! # Record Source Module
//!
//! This module defines the record source abstraction the chunk packer pulls
//! from, plus two concrete sources: an in-memory vector source and a JSONL
//! file source. How records were originally acquired (dataset catalogs,
//! network downloads) is outside Kura's contract; anything that can produce
//! an ordered, single-pass sequence of records and report a total count can
//! feed the packer.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::vec;

use serde_json::Value;

use crate::errors::{KuraError, Result};
use crate::record::{KuraRecord, KuraRecordBatch};

/// Ordered, single-pass producer of records.
///
/// `pull` returns `Ok(None)` on exhaustion, which is normal termination for
/// the packer (triggering its final flush), never an error.
pub trait KuraRecordSource {
    /// Total number of records this source will produce.
    fn total_records(&self) -> usize;

    /// Produces the next record, or `None` when the source is exhausted.
    fn pull(&mut self) -> Result<Option<KuraRecord>>;
}

/// In-memory record source backed by a vector.
///
/// Supports an optional record limit, mirroring the common "take the first
/// N examples of a dataset" invocation.
pub struct KuraMemorySource {
    remaining: vec::IntoIter<KuraRecord>,
    total: usize,
}

impl KuraMemorySource {
    /// Creates a source over the given batch.
    pub fn new(records: KuraRecordBatch) -> Self {
        let total = records.len();
        Self {
            remaining: records.into_iter(),
            total,
        }
    }

    /// Creates a source over at most `limit` leading records of the batch.
    pub fn with_limit(mut records: KuraRecordBatch, limit: usize) -> Self {
        records.truncate(limit);
        Self::new(records)
    }

    /// Creates a source from raw JSON values, each of which must be an object.
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let records = values
            .into_iter()
            .map(KuraRecord::from_value)
            .collect::<Result<KuraRecordBatch>>()?;
        Ok(Self::new(records))
    }
}

impl KuraRecordSource for KuraMemorySource {
    fn total_records(&self) -> usize {
        self.total
    }

    fn pull(&mut self) -> Result<Option<KuraRecord>> {
        Ok(self.remaining.next())
    }
}

/// Streaming record source over a line-delimited JSON file.
///
/// Blank lines are skipped; a malformed line is an error rather than a
/// skip, because the chunker must not silently drop input. The total count
/// is established by a pre-scan pass at open time.
pub struct KuraJsonlSource {
    lines: Lines<BufReader<File>>,
    path: String,
    line_no: usize,
    total: usize,
}

impl KuraJsonlSource {
    /// Opens a JSONL file, counting its records up front.
    pub fn open(path: &Path) -> Result<Self> {
        let total = Self::count_records(path)?;
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            path: path.display().to_string(),
            line_no: 0,
            total,
        })
    }

    fn count_records(path: &Path) -> Result<usize> {
        let file = File::open(path)?;
        let mut count = 0;
        for line in BufReader::new(file).lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl KuraRecordSource for KuraJsonlSource {
    fn total_records(&self) -> usize {
        self.total
    }

    fn pull(&mut self) -> Result<Option<KuraRecord>> {
        for line in self.lines.by_ref() {
            let text = line?;
            self.line_no += 1;
            if text.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&text).map_err(|e| {
                KuraError::source(format!(
                    "invalid JSON at {}:{}: {}",
                    self.path, self.line_no, e
                ))
            })?;
            return KuraRecord::from_value(value).map(Some);
        }
        Ok(None)
    }
}
