//! Document assembly
//!
//! Coordinates the detectors over one parsed file and assembles the
//! `Document`: namespaces, imports, enums and delegates from a whole-file
//! pass, top-level types from a worklist over scope containers, and the
//! idiom catalog from its own scan.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, SecondsFormat, Utc};
use tree_sitter::{Node, Tree};

use crate::detectors::common::{
    declared_name, field_text, first_child_of_kind, get_node_text, named_children_of_kind,
    visit_all,
};
use crate::detectors::grammar::SyntaxKind;
use crate::detectors::idioms::{detect_idioms, FluentCatalog};
use crate::detectors::members::{parameters, return_type};
use crate::detectors::types::{extract_type, inheritance_list, DEFAULT_MAX_NESTING_DEPTH};
use crate::error::{ExtractError, Result};
use crate::lang::Lang;
use crate::schema::{DelegateSignature, Document, EnumDeclaration, Import, TypeDeclaration};

/// Value written to `languageVersion` when nothing else is configured
pub const DEFAULT_LANGUAGE_VERSION: &str = "latest";

/// Knobs for one extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub language_version: String,
    pub fluent: FluentCatalog,
    pub max_nesting_depth: usize,
    /// Pinned extraction time; `None` uses the current time
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            language_version: DEFAULT_LANGUAGE_VERSION.to_string(),
            fluent: FluentCatalog::default(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            analyzed_at: None,
        }
    }
}

/// Cooperative cancellation shared between a driver and an extraction.
///
/// Trips when `cancel` is called on any clone, or once the deadline passes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that trips by itself after `timeout`
    pub fn with_deadline(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ExtractError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Parse C# source into a tree
pub fn parse_source(source: &str, lang: Lang) -> Result<Tree> {
    let mut parser = lang.parser()?;
    parser
        .parse(source, None)
        .ok_or_else(|| ExtractError::UnparseableFile {
            message: "parser returned no tree".to_string(),
        })
}

/// Extract a document from an already parsed file
pub fn extract(
    file_path: &Path,
    source: &str,
    tree: &Tree,
    lang: Lang,
    options: &ExtractOptions,
) -> Result<Document> {
    extract_with_cancel(file_path, source, tree, lang, options, &CancelToken::new())
}

/// Extract a document, giving up with `ExtractError::Cancelled` once
/// `cancel` trips. No partial document is returned.
pub fn extract_with_cancel(
    file_path: &Path,
    source: &str,
    tree: &Tree,
    lang: Lang,
    options: &ExtractOptions,
    cancel: &CancelToken,
) -> Result<Document> {
    cancel.check()?;
    let root = tree.root_node();

    let mut document = Document {
        file_path: file_path.display().to_string(),
        analyzed_at: options
            .analyzed_at
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        language: lang.name().to_string(),
        language_version: options.language_version.clone(),
        ..Default::default()
    };

    collect_file_level(&root, source, &mut document);
    document.classes = top_level_types(&root, source, options.max_nesting_depth, cancel)?;
    document.dot_net_features = detect_idioms(&root, source, &options.fluent);

    tracing::debug!(
        "{}: {} types, {} enums, {} delegates",
        document.file_path,
        document.classes.len(),
        document.enums.len(),
        document.delegates.len()
    );

    Ok(document)
}

/// Parse and extract in one step
pub fn extract_source(
    file_path: &Path,
    source: &str,
    lang: Lang,
    options: &ExtractOptions,
    cancel: &CancelToken,
) -> Result<Document> {
    let tree = parse_source(source, lang)?;
    extract_with_cancel(file_path, source, &tree, lang, options, cancel)
}

/// Read, parse and extract a file from disk
pub fn extract_file(
    file_path: &Path,
    lang: Lang,
    options: &ExtractOptions,
    cancel: &CancelToken,
) -> Result<Document> {
    if !file_path.exists() {
        return Err(ExtractError::FileNotFound {
            path: file_path.display().to_string(),
        });
    }
    let source = std::fs::read_to_string(file_path)?;
    extract_source(file_path, &source, lang, options, cancel)
}

// ============================================================================
// Whole-file pass
// ============================================================================

/// Namespaces, imports, enums and delegates, in document order
fn collect_file_level(root: &Node, source: &str, document: &mut Document) {
    visit_all(root, |node| match SyntaxKind::of(node) {
        SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration => {
            if let Some(name) = namespace_name(node, source) {
                if !document.namespaces.contains(&name) {
                    document.namespaces.push(name);
                }
            }
        }
        SyntaxKind::UsingDirective => {
            if let Some(import) = import(node, source) {
                document.imports.push(import);
            }
        }
        SyntaxKind::EnumDeclaration => {
            if let Some(decl) = enum_declaration(node, source) {
                document.enums.push(decl);
            }
        }
        SyntaxKind::DelegateDeclaration => {
            if let Some(decl) = delegate_signature(node, source) {
                document.delegates.push(decl);
            }
        }
        _ => {}
    });
}

fn namespace_name(node: &Node, source: &str) -> Option<String> {
    if let Some(name) = field_text(node, "name", source) {
        return Some(name);
    }
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "identifier" | "qualified_name"))
        .map(|c| get_node_text(&c, source));
    name
}

/// `using A.B;`, `using static A.B;` and `using X = A.B;`.
/// Directives whose target name is missing are dropped.
fn import(node: &Node, source: &str) -> Option<Import> {
    let mut is_static = false;
    let mut seen_equals = false;
    let mut alias = None;
    let mut before = Vec::new();
    let mut after = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "static" => is_static = true,
            "=" => seen_equals = true,
            "name_equals" => {
                alias = child.named_child(0).map(|n| get_node_text(&n, source));
                seen_equals = true;
            }
            "comment" => {}
            _ if child.is_named() && !child.is_missing() => {
                if seen_equals {
                    after.push(get_node_text(&child, source));
                } else {
                    before.push(get_node_text(&child, source));
                }
            }
            _ => {}
        }
    }

    let name = if seen_equals {
        alias = alias.or_else(|| before.pop());
        after.into_iter().next()
    } else {
        before.pop()
    };
    let name = name.filter(|n| !n.is_empty())?;

    Some(Import {
        name,
        alias,
        is_static,
    })
}

fn enum_declaration(node: &Node, source: &str) -> Option<EnumDeclaration> {
    let name = declared_name(node, source)?;
    let body = node
        .child_by_field_name("body")
        .or_else(|| first_child_of_kind(node, "enum_member_declaration_list"));

    let members = body
        .map(|list| {
            named_children_of_kind(&list, "enum_member_declaration")
                .iter()
                .filter_map(|member| declared_name(member, source))
                .collect()
        })
        .unwrap_or_default();

    Some(EnumDeclaration {
        name,
        base_type: inheritance_list(node, source).into_iter().next(),
        members,
    })
}

fn delegate_signature(node: &Node, source: &str) -> Option<DelegateSignature> {
    Some(DelegateSignature {
        name: declared_name(node, source)?,
        return_type: return_type(node, source),
        parameters: parameters(node, source),
    })
}

// ============================================================================
// Top-level types
// ============================================================================

/// Types whose nearest enclosing scope is the file or a namespace.
///
/// Walks scope containers with an explicit worklist and never enters a
/// type body; nested types are reached through their parent instead.
fn top_level_types(
    root: &Node,
    source: &str,
    max_depth: usize,
    cancel: &CancelToken,
) -> Result<Vec<TypeDeclaration>> {
    let mut types = Vec::new();
    let mut pending = vec![*root];

    while let Some(node) = pending.pop() {
        let syntax = SyntaxKind::of(&node);

        if syntax.is_scope_container() {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            pending.extend(children.into_iter().rev());
            continue;
        }

        if syntax.type_kind(&node).is_some() {
            cancel.check()?;
            if let Some(decl) = extract_type(&node, source, max_depth) {
                types.push(decl);
            }
        }
    }

    Ok(types)
}
