//! Type declaration extraction
//!
//! Turns one class/struct/interface/record node into a `TypeDeclaration`,
//! members included, recursing into nested types up to a depth cap.

use tree_sitter::Node;

use crate::detectors::common::{
    declared_name, first_child_of_kind, get_node_text, modifiers, named_children_of_kind,
};
use crate::detectors::docs::documentation_for;
use crate::detectors::grammar::SyntaxKind;
use crate::detectors::members::{self, MemberKind};
use crate::schema::TypeDeclaration;

/// Nesting depth beyond which nested types are dropped.
///
/// Each level adds two JSON levels to the output, and serde_json refuses
/// to parse input nested deeper than 128; at 48 a document stays readable
/// by a default `serde_json::from_str`.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 48;

/// Extract a type declaration node.
///
/// Returns `None` for nodes that are not type declarations and for
/// declarations whose identifier is empty (partial trees from invalid
/// source). Nothing is logged for the latter.
pub fn extract_type(node: &Node, source: &str, max_depth: usize) -> Option<TypeDeclaration> {
    extract_at_depth(node, source, 0, max_depth)
}

fn extract_at_depth(
    node: &Node,
    source: &str,
    depth: usize,
    max_depth: usize,
) -> Option<TypeDeclaration> {
    let kind = SyntaxKind::of(node).type_kind(node)?;
    let name = declared_name(node, source)?;
    let (base_type, interfaces) = split_inheritance(inheritance_list(node, source));

    let body = node
        .child_by_field_name("body")
        .or_else(|| first_child_of_kind(node, "declaration_list"));
    let member_list = body.map(|b| members::member_list(&b)).unwrap_or_default();

    let mut nested_types = Vec::new();
    for member in &member_list {
        if let MemberKind::NestedType(_) = member.kind {
            if depth + 1 > max_depth {
                tracing::warn!(
                    "dropping type nested deeper than {} levels in '{}' at line {}",
                    max_depth,
                    name,
                    member.node.start_position().row + 1
                );
                continue;
            }
            if let Some(nested) = extract_at_depth(&member.node, source, depth + 1, max_depth) {
                nested_types.push(nested);
            }
        }
    }

    Some(TypeDeclaration {
        kind,
        modifiers: modifiers(node, source),
        base_type,
        interfaces,
        generic_parameters: generic_parameters(node, source),
        documentation: documentation_for(node, source),
        properties: members::extract_properties(&member_list, source),
        fields: members::extract_fields(&member_list, source),
        methods: members::extract_methods(&member_list, source),
        events: members::extract_events(&member_list, source),
        indexers: members::extract_indexers(&member_list, source),
        nested_types,
        name,
    })
}

/// Split an inheritance list positionally: the first entry is reported as
/// the base type, the rest as interfaces.
///
/// Whether the first entry is really a class cannot be known without
/// resolving symbols, so `class C : IDisposable` reports `IDisposable` as
/// the base type.
pub fn split_inheritance(mut list: Vec<String>) -> (Option<String>, Vec<String>) {
    if list.is_empty() {
        return (None, Vec::new());
    }
    let rest = list.split_off(1);
    (list.pop(), rest)
}

/// Entries of the `: A, B, C` list as written. For a record's primary
/// constructor base (`: Base(x)`) only the type name is kept.
pub fn inheritance_list(node: &Node, source: &str) -> Vec<String> {
    let Some(base_list) = first_child_of_kind(node, "base_list")
        .or_else(|| first_child_of_kind(node, "record_base"))
    else {
        return Vec::new();
    };

    let mut cursor = base_list.walk();
    let entries: Vec<String> = base_list
        .named_children(&mut cursor)
        .filter_map(|entry| match entry.kind() {
            "argument_list" | "comment" => None,
            "primary_constructor_base_type" => entry
                .child_by_field_name("type")
                .or_else(|| entry.named_child(0))
                .map(|t| get_node_text(&t, source)),
            _ => Some(get_node_text(&entry, source)),
        })
        .filter(|text| !text.is_empty())
        .collect();
    entries
}

/// Type parameter names in declared order (`<in TKey, TValue>` gives
/// `TKey`, `TValue`)
fn generic_parameters(node: &Node, source: &str) -> Vec<String> {
    let Some(list) = first_child_of_kind(node, "type_parameter_list") else {
        return Vec::new();
    };

    named_children_of_kind(&list, "type_parameter")
        .iter()
        .filter_map(|param| declared_name(param, source))
        .collect()
}
