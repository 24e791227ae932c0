//! JSON rendering of extracted documents

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ExtractError, Result};
use crate::schema::Document;

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| ExtractError::Serialization {
        message: format!("JSON serialization failed: {}", e),
    })
}

/// Render one document
pub fn encode_json(document: &Document, pretty: bool) -> Result<String> {
    encode(document, pretty)
}

/// Render several documents as one JSON array, in the given order
pub fn encode_json_batch(documents: &[Document], pretty: bool) -> Result<String> {
    encode(documents, pretty)
}

fn stem_of(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Where each document goes when writing into `dir`: `<stem>.json`, with
/// `-2`, `-3`, ... appended when an earlier input already took the name.
pub fn output_paths_in(dir: &Path, inputs: &[&Path]) -> Vec<PathBuf> {
    let mut taken = HashSet::new();

    inputs
        .iter()
        .map(|input| {
            let stem = stem_of(input);
            let mut name = format!("{}.json", stem);
            let mut suffix = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}-{}.json", stem, suffix);
                suffix += 1;
            }
            dir.join(name)
        })
        .collect()
}
