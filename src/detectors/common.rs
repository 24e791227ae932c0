//! Common utilities shared across the C# detectors
//!
//! Helpers for AST traversal and text extraction. Everything here is
//! read-only over the tree and the source.

use tree_sitter::Node;

// ============================================================================
// Text Extraction
// ============================================================================

/// Get text content of a node, verbatim
pub fn get_node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

/// Text of a named field, if the field is present and non-empty
pub fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| get_node_text(&n, source))
        .filter(|t| !t.is_empty())
}

/// Name of a declaration node, or `None` if the identifier is empty or was
/// inserted by error recovery.
pub fn declared_name(node: &Node, source: &str) -> Option<String> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| first_child_of_kind(node, "identifier"))?;
    if name_node.is_missing() {
        return None;
    }
    let name = get_node_text(&name_node, source);
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

// ============================================================================
// Child Lookup
// ============================================================================

/// First direct child (named or anonymous) with the given kind
pub fn first_child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Whether any direct child has one of the given kinds
pub fn has_child_of_kind(node: &Node, kinds: &[&str]) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| kinds.contains(&c.kind()));
    found
}

/// Named direct children with the given kind, in source order
pub fn named_children_of_kind<'t>(node: &Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let found: Vec<Node<'t>> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == kind)
        .collect();
    found
}

/// Modifier keywords as written (`public`, `static`, `async`, ...), in order.
/// Attributes are not modifiers and are not included.
pub fn modifiers(node: &Node, source: &str) -> Vec<String> {
    named_children_of_kind(node, "modifier")
        .iter()
        .map(|m| get_node_text(m, source))
        .collect()
}

// ============================================================================
// AST Traversal
// ============================================================================

/// Visit all nodes in pre-order (parent before children, siblings left to
/// right). Iterative, so arbitrarily deep trees cannot overflow the stack.
pub fn visit_all<'t, F>(node: &Node<'t>, mut visitor: F)
where
    F: FnMut(&Node<'t>),
{
    let mut cursor = node.walk();
    let mut did_visit_children = false;

    loop {
        if !did_visit_children {
            visitor(&cursor.node());

            if cursor.goto_first_child() {
                did_visit_children = false;
                continue;
            }
        }

        if cursor.goto_next_sibling() {
            did_visit_children = false;
            continue;
        }

        if !cursor.goto_parent() {
            break;
        }
        did_visit_children = true;
    }
}
