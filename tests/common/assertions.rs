//! Custom assertions for integration tests
//!
//! Helpers for validating extractor JSON: document shape, type lookup and
//! member name lists.

use serde_json::Value;

/// Top-level keys of every document, in emission order
pub const DOCUMENT_KEYS: &[&str] = &[
    "filePath",
    "analyzedAt",
    "language",
    "languageVersion",
    "namespaces",
    "imports",
    "classes",
    "delegates",
    "enums",
    "dotNetFeatures",
];

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that a value is a document with exactly the expected keys
pub fn assert_document_shape(doc: &Value) {
    let obj = doc
        .as_object()
        .unwrap_or_else(|| panic!("Expected a JSON object, got:\n{}", doc));
    let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, DOCUMENT_KEYS, "unexpected document keys");
    assert_eq!(doc["language"], "C#");
}

/// Find a type by name among `classes`, searching nested types too
pub fn find_type<'a>(doc: &'a Value, name: &str) -> Option<&'a Value> {
    fn search<'a>(types: &'a Value, name: &str) -> Option<&'a Value> {
        types.as_array()?.iter().find_map(|t| {
            if t["name"] == name {
                Some(t)
            } else {
                search(&t["nestedTypes"], name)
            }
        })
    }
    search(&doc["classes"], name)
}

/// Find a type or panic with the document for context
pub fn expect_type<'a>(doc: &'a Value, name: &str) -> &'a Value {
    find_type(doc, name).unwrap_or_else(|| {
        panic!(
            "Expected type '{}' in output:\n{}",
            name,
            serde_json::to_string_pretty(doc).unwrap()
        )
    })
}

/// `name` of every entry in `list`
pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// String entries of a JSON array
pub fn strings(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Every method name in the document, across all types and nesting levels
pub fn all_method_names(doc: &Value) -> Vec<String> {
    fn collect(types: &Value, out: &mut Vec<String>) {
        if let Some(types) = types.as_array() {
            for t in types {
                out.extend(names(&t["methods"]));
                collect(&t["nestedTypes"], out);
            }
        }
    }
    let mut out = Vec::new();
    collect(&doc["classes"], &mut out);
    out
}

/// Assert that output contains a substring
pub fn assert_contains(output: &str, needle: &str, context: &str) {
    assert!(
        output.contains(needle),
        "Expected output to contain '{}' ({})\nOutput:\n{}",
        needle,
        context,
        output
    );
}
