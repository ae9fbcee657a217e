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

//! # Kura Chunk Tests - Manifest
//!
//! This module contains tests for index manifest emission: placement,
//! exact wire shape, overwrite semantics, and round-trips.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test manifest
//! ```

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::tempdir;

use kura::{index_path, write_index, KuraIndex};

#[test]
fn index_path_is_in_parent_of_output_dir() {
    assert_eq!(
        index_path(Path::new("datasets/data")),
        Path::new("datasets/index.json")
    );
    assert_eq!(index_path(Path::new("data")), Path::new("index.json"));
}

/// The manifest maps the output directory's base name to the chunk count
/// and the supplied label, exactly.
#[test]
fn write_index_emits_expected_shape() {
    let root = tempdir().expect("tmp");
    let output_dir = root.path().join("data");
    fs::create_dir_all(&output_dir).expect("mkdir");

    let path = write_index(&output_dir, 12, "leetcode").expect("write index");
    assert_eq!(path, root.path().join("index.json"));

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(parsed, json!({ "data": { "length": 12, "type": "leetcode" } }));
}

/// Rewriting the manifest replaces prior content wholesale; entries from
/// earlier runs do not survive.
#[test]
fn write_index_overwrites_not_merges() {
    let root = tempdir().expect("tmp");
    let first = root.path().join("first");
    let second = root.path().join("second");
    fs::create_dir_all(&first).expect("mkdir");
    fs::create_dir_all(&second).expect("mkdir");

    write_index(&first, 3, "leetcode").expect("write first");
    let path = write_index(&second, 7, "euler").expect("write second");

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(parsed, json!({ "second": { "length": 7, "type": "euler" } }));
}

/// Emitting the same index twice produces identical bytes.
#[test]
fn write_index_is_idempotent() {
    let root = tempdir().expect("tmp");
    let output_dir = root.path().join("data");
    fs::create_dir_all(&output_dir).expect("mkdir");

    let path = write_index(&output_dir, 5, "leetcode").expect("write");
    let before = fs::read(&path).expect("read");
    write_index(&output_dir, 5, "leetcode").expect("rewrite");
    let after = fs::read(&path).expect("reread");

    assert_eq!(before, after);
}

#[test]
fn index_round_trips_through_json() {
    let mut index = KuraIndex::new();
    index.insert("data", 4, "leetcode");
    index.insert("extra", 9, "euler");

    let json = index.to_json().expect("serialize");
    let reloaded = KuraIndex::from_json(&json).expect("parse");
    assert_eq!(reloaded, index);
    assert_eq!(reloaded.entries["data"].length, 4);
    assert_eq!(reloaded.entries["extra"].dataset_type, "euler");
}

#[test]
fn index_read_loads_written_file() {
    let root = tempdir().expect("tmp");
    let path = root.path().join("index.json");

    let mut index = KuraIndex::new();
    index.insert("data", 2, "leetcode");
    index.write(&path).expect("write");

    let reloaded = KuraIndex::read(&path).expect("read");
    assert_eq!(reloaded, index);
}

#[test]
fn index_rejects_malformed_json() {
    assert!(KuraIndex::from_json("{\"data\": 3}").is_err());
    assert!(KuraIndex::from_json("not json").is_err());
}
