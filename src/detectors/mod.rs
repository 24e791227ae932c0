//! C# declaration detectors
//!
//! Each detector reads one concern out of a tree-sitter-c-sharp syntax tree.
//!
//! # Architecture
//!
//! 1. **Grammar mapping** (`grammar.rs`): node kind strings mapped once into
//!    the closed `SyntaxKind` enum.
//!
//! 2. **Shared helpers** (`common.rs`): text extraction, child lookup and the
//!    iterative pre-order traversal.
//!
//! 3. **Extractors**: `docs.rs` (structured comments), `members.rs` (member
//!    records), `types.rs` (type declarations with nested types) and
//!    `idioms.rs` (the whole-file idiom scan).
//!
//! The document assembler in `extract.rs` drives them.

pub mod common;
pub mod docs;
pub mod grammar;
pub mod idioms;
pub mod members;
pub mod types;

pub use grammar::SyntaxKind;
pub use idioms::{detect_idioms, FluentCatalog, DEFAULT_FLUENT_METHODS, FLUENT_CATALOG_VERSION};
pub use types::{extract_type, split_inheritance, DEFAULT_MAX_NESTING_DEPTH};
