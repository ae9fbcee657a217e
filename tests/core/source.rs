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

//! # Kura Core Tests - Source
//!
//! This module contains tests for the record sources feeding the packer:
//! the in-memory source and the JSONL file source.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test source
//! ```

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use kura::{KuraJsonlSource, KuraMemorySource, KuraRecord, KuraRecordSource};

fn drain(source: &mut dyn KuraRecordSource) -> Vec<KuraRecord> {
    let mut out = Vec::new();
    while let Some(record) = source.pull().expect("pull") {
        out.push(record);
    }
    out
}

#[test]
fn memory_source_yields_records_in_order() {
    let records = vec![
        KuraRecord::from_value(json!({"n": 1})).expect("record"),
        KuraRecord::from_value(json!({"n": 2})).expect("record"),
        KuraRecord::from_value(json!({"n": 3})).expect("record"),
    ];

    let mut source = KuraMemorySource::new(records.clone());
    assert_eq!(source.total_records(), 3);
    assert_eq!(drain(&mut source), records);
    assert!(source.pull().expect("pull").is_none());
}

#[test]
fn memory_source_honors_record_limit() {
    let records: Vec<KuraRecord> = (0..10)
        .map(|n| KuraRecord::from_value(json!({"n": n})).expect("record"))
        .collect();

    let mut source = KuraMemorySource::with_limit(records.clone(), 4);
    assert_eq!(source.total_records(), 4);
    assert_eq!(drain(&mut source), records[0..4].to_vec());
}

#[test]
fn memory_source_from_values_rejects_non_objects() {
    assert!(KuraMemorySource::from_values(vec![json!({"ok": true}), json!(42)]).is_err());
}

#[test]
fn jsonl_source_streams_records_and_skips_blank_lines() {
    let mut file = NamedTempFile::new().expect("tmp");
    write!(
        file,
        "{{\"n\": 1}}\n\n{{\"n\": 2, \"text\": \"héllo\"}}\n   \n{{\"n\": 3}}\n"
    )
    .expect("write");

    let mut source = KuraJsonlSource::open(file.path()).expect("open");
    assert_eq!(source.total_records(), 3);

    let records = drain(&mut source);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("n"), Some(&json!(1)));
    assert_eq!(records[1].get("text"), Some(&json!("héllo")));
    assert_eq!(records[2].get("n"), Some(&json!(3)));
}

/// A malformed line is an error, not a silent skip: the chunker must not
/// drop input records.
#[test]
fn jsonl_source_errors_on_malformed_line() {
    let mut file = NamedTempFile::new().expect("tmp");
    write!(file, "{{\"n\": 1}}\nnot json\n{{\"n\": 2}}\n").expect("write");

    let mut source = KuraJsonlSource::open(file.path()).expect("open");
    assert!(source.pull().expect("first pull").is_some());
    let err = source.pull().expect_err("second pull should fail");
    assert!(err.to_string().contains("invalid JSON"));
}

#[test]
fn jsonl_source_rejects_non_object_records() {
    let mut file = NamedTempFile::new().expect("tmp");
    write!(file, "[1, 2, 3]\n").expect("write");

    let mut source = KuraJsonlSource::open(file.path()).expect("open");
    assert!(source.pull().is_err());
}
