//! dotnet-extract: structural extractor for C# sources
//!
//! Parses C# with tree-sitter and produces a `Document` describing the
//! file's declarations: namespaces, imports, types with their members and
//! documentation comments, enums, delegates, and a catalog of .NET idioms
//! (attributes, query syntax, fluent query calls, async methods, lambdas,
//! generic constraints, local functions). Documents serialize to camelCase
//! JSON for downstream documentation tooling.
//!
//! Extraction is synchronous, single-threaded per file and side-effect free;
//! files can be processed in parallel.
//!
//! # Example
//!
//! ```ignore
//! use dotnet_extract::{extract_source, encode_json, CancelToken, ExtractOptions, Lang};
//! use std::path::Path;
//!
//! let source = "namespace N { public class C { public int X { get; set; } } }";
//! let document = extract_source(
//!     Path::new("C.cs"),
//!     source,
//!     Lang::CSharp,
//!     &ExtractOptions::default(),
//!     &CancelToken::new(),
//! )?;
//! println!("{}", encode_json(&document, true)?);
//! ```

pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod extract;
pub mod lang;
pub mod output;
pub mod schema;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{ExtractorConfig, FluentConfig};
pub use detectors::{FluentCatalog, DEFAULT_MAX_NESTING_DEPTH, FLUENT_CATALOG_VERSION};
pub use error::{ExtractError, Result};
pub use extract::{
    extract, extract_file, extract_source, extract_with_cancel, parse_source, CancelToken,
    ExtractOptions, DEFAULT_LANGUAGE_VERSION,
};
pub use lang::Lang;
pub use output::{encode_json, encode_json_batch};
pub use schema::{
    DelegateSignature, Document, EnumDeclaration, EventDeclaration, FieldDeclaration,
    IdiomCatalog, Import, IndexerDeclaration, MethodDeclaration, ParameterDeclaration,
    PropertyDeclaration, TypeDeclaration, TypeKind,
};
