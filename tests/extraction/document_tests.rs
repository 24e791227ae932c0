//! Document-level behavior: shape, ordering, nesting, degradation

use std::path::Path;

use chrono::{TimeZone, Utc};
use dotnet_extract::{
    encode_json, extract_source, CancelToken, Document, ExtractOptions, Lang,
    DEFAULT_MAX_NESTING_DEPTH,
};

use crate::common::{
    all_method_names, assert_document_shape, assert_valid_json, expect_type, find_type, names,
    strings, TestRepo,
};

fn pinned() -> ExtractOptions {
    ExtractOptions {
        analyzed_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()),
        ..Default::default()
    }
}

fn document(source: &str) -> Document {
    extract_source(
        Path::new("Fixture.cs"),
        source,
        Lang::CSharp,
        &pinned(),
        &CancelToken::new(),
    )
    .expect("extraction failed")
}

fn json(source: &str) -> serde_json::Value {
    let encoded = encode_json(&document(source), false).expect("encoding failed");
    assert_valid_json(&encoded, "document")
}

const INVENTORY: &str = r#"
using System;
using System.Collections.Generic;
using static System.Math;
using Clock = System.DateTime;

namespace Shop.Inventory
{
    public delegate void StockChanged(string sku, int delta);

    /// <summary>Warehouse stock levels.</summary>
    public sealed class Warehouse<TItem> : StoreBase, IWarehouse, IDisposable
        where TItem : class
    {
        private readonly Dictionary<string, int> _stock = new();
        public event StockChanged Changed;

        /// <summary>Name of the warehouse.</summary>
        public string Name { get; init; }

        public int this[string sku] => _stock[sku];

        public Warehouse(string name) { Name = name; }

        public async Task<int> CountAsync(string sku, bool includeReserved = false)
        {
            await Task.Delay(1);
            return _stock.Where(kv => kv.Key == sku).Select(kv => kv.Value).FirstOrDefault();
        }

        public void Dispose() { }

        public enum Zone { Cold, Dry }

        private struct Slot
        {
            public int Row;
            public int Column;
        }
    }

    public interface IWarehouse
    {
        Task<int> CountAsync(string sku, bool includeReserved = false);
    }

    public record Sku(string Code);
}
"#;

#[test]
fn test_document_shape() {
    let doc = json(INVENTORY);
    assert_document_shape(&doc);
    assert_eq!(doc["filePath"], "Fixture.cs");
    assert_eq!(doc["analyzedAt"], "2025-06-01T12:00:00Z");
    assert_eq!(strings(&doc["namespaces"]), vec!["Shop.Inventory"]);
}

#[test]
fn test_imports() {
    let doc = json(INVENTORY);
    let imports = doc["imports"].as_array().unwrap();
    assert_eq!(imports.len(), 4);
    assert_eq!(imports[0]["name"], "System");
    assert!(imports[0].get("alias").is_none());
    assert_eq!(imports[2]["isStatic"], true);
    assert_eq!(imports[3]["alias"], "Clock");
    assert_eq!(imports[3]["name"], "System.DateTime");
}

#[test]
fn test_top_level_types_in_source_order() {
    let doc = json(INVENTORY);
    assert_eq!(names(&doc["classes"]), vec!["Warehouse", "IWarehouse", "Sku"]);
    assert_eq!(doc["classes"][1]["kind"], "InterfaceDeclaration");
    assert_eq!(doc["classes"][2]["kind"], "RecordDeclaration");
}

#[test]
fn test_type_header() {
    let doc = json(INVENTORY);
    let warehouse = expect_type(&doc, "Warehouse");

    assert_eq!(strings(&warehouse["modifiers"]), vec!["public", "sealed"]);
    assert_eq!(warehouse["baseType"], "StoreBase");
    assert_eq!(
        strings(&warehouse["interfaces"]),
        vec!["IWarehouse", "IDisposable"]
    );
    assert_eq!(strings(&warehouse["genericParameters"]), vec!["TItem"]);
    assert_eq!(
        warehouse["documentation"],
        "/// <summary>Warehouse stock levels.</summary>"
    );
}

#[test]
fn test_members() {
    let doc = json(INVENTORY);
    let warehouse = expect_type(&doc, "Warehouse");

    assert_eq!(names(&warehouse["fields"]), vec!["_stock"]);
    assert_eq!(warehouse["fields"][0]["hasInitializer"], true);
    assert_eq!(names(&warehouse["events"]), vec!["Changed"]);
    assert_eq!(warehouse["events"][0]["type"], "StockChanged");

    let name = &warehouse["properties"][0];
    assert_eq!(name["name"], "Name");
    assert_eq!(name["hasGet"], true);
    assert_eq!(name["hasSet"], true);
    assert_eq!(
        name["documentation"],
        "/// <summary>Name of the warehouse.</summary>"
    );

    let indexer = &warehouse["indexers"][0];
    assert_eq!(indexer["type"], "int");
    assert_eq!(indexer["isExpressionBodied"], true);
    assert_eq!(names(&indexer["parameters"]), vec!["sku"]);

    // Constructors are not methods
    assert_eq!(names(&warehouse["methods"]), vec!["CountAsync", "Dispose"]);
    let count = &warehouse["methods"][0];
    assert_eq!(count["isAsync"], true);
    assert_eq!(count["returnType"], "Task<int>");
    assert_eq!(count["parameters"][1]["hasDefaultValue"], true);
    assert!(count.get("documentation").is_none());
}

#[test]
fn test_nested_types_and_file_level_enums() {
    let doc = json(INVENTORY);
    let warehouse = expect_type(&doc, "Warehouse");

    assert_eq!(names(&warehouse["nestedTypes"]), vec!["Slot"]);
    let slot = find_type(&doc, "Slot").unwrap();
    assert_eq!(slot["kind"], "StructDeclaration");
    assert_eq!(names(&slot["fields"]), vec!["Row", "Column"]);

    // Nested enum is reported once, at file level
    assert_eq!(names(&doc["enums"]), vec!["Zone"]);
    assert_eq!(strings(&doc["enums"][0]["members"]), vec!["Cold", "Dry"]);
    assert_eq!(names(&doc["delegates"]), vec!["StockChanged"]);
}

#[test]
fn test_no_duplication_across_nesting() {
    let source = r#"
class Outer
{
    void A() { }
    class Middle
    {
        void B() { }
        class Inner { void C() { } }
    }
    void D() { }
}
"#;
    let doc = json(source);
    let mut methods = all_method_names(&doc);
    methods.sort();
    assert_eq!(methods, vec!["A", "B", "C", "D"]);
    assert_eq!(names(&expect_type(&doc, "Outer")["methods"]), vec!["A", "D"]);
}

#[test]
fn test_determinism_with_pinned_timestamp() {
    let first = encode_json(&document(INVENTORY), true).unwrap();
    let second = encode_json(&document(INVENTORY), true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_graceful_degradation_keeps_siblings() {
    let source = r#"
namespace Broken
{
    public class Good { public int X { get; set; } }

    public class Damaged
    {
        public void Run() { int = ; }
    }

    public class AlsoGood { }
}
"#;
    let doc = json(source);
    assert!(find_type(&doc, "Good").is_some());
    assert!(find_type(&doc, "AlsoGood").is_some());

    let all = doc["classes"].as_array().unwrap();
    assert!(all.iter().all(|t| !t["name"].as_str().unwrap().is_empty()));
}

#[test]
fn test_empty_named_type_is_omitted() {
    let source = "namespace N { public class { public int X { get; set; } } public class Good { } }";
    let doc = json(source);

    assert_eq!(names(&doc["classes"]), vec!["Good"]);
    let all = doc["classes"].as_array().unwrap();
    assert!(all.iter().all(|t| !t["name"].as_str().unwrap().is_empty()));
}

#[test]
fn test_default_depth_output_parses_back() {
    let levels = 50;
    let mut source = String::new();
    for i in 0..levels {
        source.push_str(&format!("class L{} {{ ", i));
    }
    source.push_str("public int X { get; set; } ");
    for _ in 0..levels {
        source.push_str("} ");
    }

    let doc = document(&source);
    let encoded = encode_json(&doc, false).expect("encoding failed");
    let parsed: Document = serde_json::from_str(&encoded).expect("deep document parses back");
    assert_eq!(parsed, doc);

    let mut kept = 1;
    let mut current = &parsed.classes[0];
    while let Some(inner) = current.nested_types.first() {
        kept += 1;
        current = inner;
    }
    assert_eq!(kept, DEFAULT_MAX_NESTING_DEPTH + 1);
}

#[test]
fn test_empty_file() {
    let doc = json("");
    assert_document_shape(&doc);
    assert!(doc["classes"].as_array().unwrap().is_empty());
    assert!(doc["namespaces"].as_array().unwrap().is_empty());
}

#[test]
fn test_files_on_disk() {
    let repo = TestRepo::new();
    repo.add_cs_class("Models/Order.cs", "Shop.Models", "Order");

    let doc = repo.extract("Models/Order.cs");
    assert_eq!(doc.namespaces, vec!["Shop.Models"]);
    assert_eq!(doc.classes[0].name, "Order");
    assert!(doc.file_path.ends_with("Order.cs"));
}
