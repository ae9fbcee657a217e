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

//! # Identifier Enrichment Module
//!
//! This module provides the optional enrichment step that stamps each
//! record with a freshly generated unique identifier before it reaches the
//! packer. Enrichment is a whole-run decision applied between the record
//! source and the packer; the packer's batching logic never depends on it.

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::record::{KuraRecord, KuraRecordBatch};
use crate::source::KuraRecordSource;

/// Configuration for identifier enrichment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KuraEnrichConfig {
    /// Reserved field name the identifier is inserted under.
    pub id_field: String,
    /// Optional RNG seed for reproducible identifiers in tests.
    pub seed: Option<u64>,
}

impl Default for KuraEnrichConfig {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            seed: None,
        }
    }
}

/// Stamps records with generated unique identifiers.
///
/// Identifiers are 128 random bits rendered as a hyphenated lowercase hex
/// string. An existing field under the reserved name is overwritten.
#[derive(Debug)]
pub struct KuraEnricher {
    config: KuraEnrichConfig,
    rng: rand::rngs::StdRng,
}

impl KuraEnricher {
    /// Creates an enricher with the given configuration.
    pub fn new(config: KuraEnrichConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Returns a copy of the record carrying a fresh identifier.
    pub fn enrich(&mut self, record: KuraRecord) -> KuraRecord {
        let id = format_identifier(self.rng.gen::<u128>());
        record.with_field(self.config.id_field.clone(), Value::String(id))
    }

    /// Enriches every record in a batch.
    pub fn enrich_batch(&mut self, batch: KuraRecordBatch) -> KuraRecordBatch {
        batch.into_iter().map(|record| self.enrich(record)).collect()
    }
}

impl Default for KuraEnricher {
    fn default() -> Self {
        Self::new(KuraEnrichConfig::default())
    }
}

/// Record source adapter that enriches every pulled record.
///
/// Keeps enrichment as a step between the source and the packer, so the
/// packer's batching logic stays independent of enrichment policy.
pub struct KuraEnrichedSource<S: KuraRecordSource> {
    inner: S,
    enricher: KuraEnricher,
}

impl<S: KuraRecordSource> KuraEnrichedSource<S> {
    pub fn new(inner: S, enricher: KuraEnricher) -> Self {
        Self { inner, enricher }
    }
}

impl<S: KuraRecordSource> KuraRecordSource for KuraEnrichedSource<S> {
    fn total_records(&self) -> usize {
        self.inner.total_records()
    }

    fn pull(&mut self) -> Result<Option<KuraRecord>> {
        Ok(self.inner.pull()?.map(|record| self.enricher.enrich(record)))
    }
}

/// Renders 128 random bits in the canonical 8-4-4-4-12 hex grouping.
fn format_identifier(bits: u128) -> String {
    let hex = format!("{:032x}", bits);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
