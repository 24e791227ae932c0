//! Tests for the `dotnet-extract` binary
//!
//! - one input prints one document
//! - several inputs print an array of the documents that succeeded
//! - `--output` writes files instead of printing
//! - failures produce one `error: <path>: <kind>: <message>` line and an exit code

use std::fs;

use crate::common::{
    assert_contains, assert_document_shape, assert_valid_json, expect_type, names, TestRepo,
};

// ============================================================================
// SINGLE FILE
// ============================================================================

#[test]
fn test_single_file_prints_document() {
    let repo = TestRepo::new();
    repo.add_cs_class("src/UserService.cs", "App.Services", "UserService");

    let output = repo.run_cli_success(&["src/UserService.cs"]);
    let doc = assert_valid_json(&output, "single file");

    assert_document_shape(&doc);
    assert_eq!(doc["namespaces"][0], "App.Services");
    assert_eq!(doc["languageVersion"], "latest");

    let class = expect_type(&doc, "UserService");
    assert_eq!(class["kind"], "ClassDeclaration");
    assert_eq!(names(&class["properties"]), vec!["Id"]);
    assert_eq!(names(&class["methods"]), vec!["Describe"]);
    assert_eq!(
        class["documentation"],
        "/// <summary>UserService service.</summary>"
    );
}

#[test]
fn test_compact_output_is_one_line() {
    let repo = TestRepo::new();
    repo.add_cs_class("A.cs", "N", "A");

    let output = repo.run_cli_success(&["--compact", "A.cs"]);
    assert_eq!(output.trim_end().lines().count(), 1);
    assert_valid_json(&output, "compact");
}

#[test]
fn test_language_version_flag() {
    let repo = TestRepo::new();
    repo.add_cs_class("A.cs", "N", "A");

    let output = repo.run_cli_success(&["--language-version", "12.0", "A.cs"]);
    let doc = assert_valid_json(&output, "language version");
    assert_eq!(doc["languageVersion"], "12.0");
}

#[test]
fn test_config_file_extends_fluent_catalog() {
    let repo = TestRepo::new();
    repo.add_file(
        "Q.cs",
        "class Q { bool M(int[] xs) { return xs.Any(x => x > 1); } }",
    );
    repo.add_file(
        "extract.toml",
        "language_version = \"11.0\"\n\n[fluent]\nextra_methods = [\"Any\"]\n",
    );

    let output = repo.run_cli_success(&["--config", "extract.toml", "Q.cs"]);
    let doc = assert_valid_json(&output, "config");
    assert_eq!(doc["languageVersion"], "11.0");
    assert_eq!(
        doc["dotNetFeatures"]["linqMethodCalls"][0],
        "xs.Any(x => x > 1)"
    );
}

// ============================================================================
// BATCHES
// ============================================================================

#[test]
fn test_multiple_files_print_array_in_input_order() {
    let repo = TestRepo::new();
    repo.add_cs_class("B.cs", "N", "Beta");
    repo.add_cs_class("A.cs", "N", "Alpha");

    let output = repo.run_cli_success(&["B.cs", "A.cs"]);
    let json = assert_valid_json(&output, "batch");
    let docs = json.as_array().expect("batch output is an array");

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["classes"][0]["name"], "Beta");
    assert_eq!(docs[1]["classes"][0]["name"], "Alpha");
}

#[test]
fn test_failed_file_does_not_affect_others() {
    let repo = TestRepo::new();
    repo.add_cs_class("Good.cs", "N", "Good");

    let (code, stdout, stderr) = repo.run_cli_failure(&["Missing.cs", "Good.cs"]);
    assert_eq!(code, Some(1));
    assert_contains(
        &stderr,
        "error: Missing.cs: file-not-found: File not found: Missing.cs",
        "diagnostic line",
    );

    let json = assert_valid_json(&stdout, "partial batch");
    let docs = json.as_array().expect("batch output is an array");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["classes"][0]["name"], "Good");
}

#[test]
fn test_unsupported_extension() {
    let repo = TestRepo::new();
    repo.add_file("notes.txt", "class FromText { }");

    let (code, stdout, stderr) = repo.run_cli_failure(&["notes.txt"]);
    assert_eq!(code, Some(2));
    assert!(stdout.is_empty());
    assert_contains(&stderr, "notes.txt", "diagnostic names the file");

    let forced = repo.run_cli_success(&["--force", "notes.txt"]);
    let doc = assert_valid_json(&forced, "forced");
    expect_type(&doc, "FromText");
}

// ============================================================================
// OUTPUT FILES
// ============================================================================

#[test]
fn test_output_file_for_single_input() {
    let repo = TestRepo::new();
    repo.add_cs_class("A.cs", "N", "A");

    let stdout = repo.run_cli_success(&["-o", "out/a.json", "A.cs"]);
    assert!(stdout.is_empty());

    let written = fs::read_to_string(repo.file("out/a.json")).unwrap();
    let doc = assert_valid_json(&written, "written document");
    expect_type(&doc, "A");
}

#[test]
fn test_output_directory_for_batch() {
    let repo = TestRepo::new();
    repo.add_cs_class("src/One.cs", "N", "One");
    repo.add_cs_class("src/Two.cs", "N", "Two");

    repo.run_cli_success(&["--output", "docs", "src/One.cs", "src/Two.cs"]);

    for (file, class) in [("docs/One.json", "One"), ("docs/Two.json", "Two")] {
        let written = fs::read_to_string(repo.file(file)).unwrap();
        let doc = assert_valid_json(&written, file);
        expect_type(&doc, class);
    }
}

#[test]
fn test_output_directory_keeps_colliding_stems_apart() {
    let repo = TestRepo::new();
    repo.add_cs_class("a/User.cs", "N", "First");
    repo.add_cs_class("b/User.cs", "N", "Second");

    repo.run_cli_success(&["-o", "out", "a/User.cs", "b/User.cs"]);

    for (file, class) in [("out/User.json", "First"), ("out/User-2.json", "Second")] {
        let written = fs::read_to_string(repo.file(file)).unwrap();
        let doc = assert_valid_json(&written, file);
        expect_type(&doc, class);
    }
}

#[test]
fn test_invalid_config_exit_code() {
    let repo = TestRepo::new();
    repo.add_cs_class("A.cs", "N", "A");
    repo.add_file("bad.toml", "max_nesting_depth = \"deep\"");

    let (code, _, stderr) = repo.run_cli_failure(&["--config", "bad.toml", "A.cs"]);
    assert_eq!(code, Some(6));
    assert_contains(&stderr, "Config error", "config failure");
}
