//! Member extraction for type bodies
//!
//! A type body is first classified into an ordered `Member` list. Each of
//! the five extractors then filters that list by `MemberKind` and converts
//! the matching nodes, preserving source order. The extractors are pure:
//! no shared state, no lookups across members.
//!
//! Members that cannot be classified (constructors, operators, destructors)
//! are logged at debug level and left out. Members missing required
//! structure, such as a name, are dropped silently.

use tree_sitter::Node;

use crate::detectors::common::{
    declared_name, field_text, first_child_of_kind, get_node_text, has_child_of_kind, modifiers,
    named_children_of_kind,
};
use crate::detectors::docs::documentation_for;
use crate::detectors::grammar::SyntaxKind;
use crate::schema::{
    EventDeclaration, FieldDeclaration, IndexerDeclaration, MethodDeclaration,
    ParameterDeclaration, PropertyDeclaration, TypeKind,
};

/// Classification of a direct child of a type body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Field,
    Method,
    /// `event EventHandler Changed;`
    EventField,
    /// `event EventHandler Changed { add { } remove { } }`
    EventAccessors,
    Indexer,
    NestedType(TypeKind),
}

/// A classified member node
#[derive(Debug, Clone, Copy)]
pub struct Member<'t> {
    pub node: Node<'t>,
    pub kind: MemberKind,
}

/// Classify the direct children of a type body, in source order.
///
/// Preprocessor blocks and error-recovery nodes are looked through so that
/// members wrapped by them are still attributed to this type. Nested type
/// bodies are never entered.
pub fn member_list<'t>(body: &Node<'t>) -> Vec<Member<'t>> {
    let mut members = Vec::new();
    let mut pending: Vec<Node<'t>> = {
        let mut cursor = body.walk();
        let children: Vec<Node<'t>> = body.named_children(&mut cursor).collect();
        children
    };
    pending.reverse();

    while let Some(node) = pending.pop() {
        let syntax = SyntaxKind::of(&node);
        let kind = match syntax {
            SyntaxKind::PropertyDeclaration => MemberKind::Property,
            SyntaxKind::FieldDeclaration => MemberKind::Field,
            SyntaxKind::MethodDeclaration => MemberKind::Method,
            SyntaxKind::EventFieldDeclaration => MemberKind::EventField,
            SyntaxKind::EventDeclaration => MemberKind::EventAccessors,
            SyntaxKind::IndexerDeclaration => MemberKind::Indexer,
            SyntaxKind::ClassDeclaration
            | SyntaxKind::StructDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::RecordDeclaration
            | SyntaxKind::RecordStructDeclaration => match syntax.type_kind(&node) {
                Some(type_kind) => MemberKind::NestedType(type_kind),
                None => continue,
            },
            SyntaxKind::PreprocessorBlock | SyntaxKind::Error => {
                let mut cursor = node.walk();
                let inner: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
                pending.extend(inner.into_iter().rev());
                continue;
            }
            // Reported on their own, or not declarations at all
            SyntaxKind::EnumDeclaration
            | SyntaxKind::DelegateDeclaration
            | SyntaxKind::Comment
            | SyntaxKind::Attribute => continue,
            SyntaxKind::ConstructorDeclaration
            | SyntaxKind::DestructorDeclaration
            | SyntaxKind::OperatorDeclaration
            | SyntaxKind::ConversionOperatorDeclaration
            | SyntaxKind::CompilationUnit
            | SyntaxKind::NamespaceDeclaration
            | SyntaxKind::FileScopedNamespaceDeclaration
            | SyntaxKind::DeclarationList
            | SyntaxKind::UsingDirective
            | SyntaxKind::QueryExpression
            | SyntaxKind::InvocationExpression
            | SyntaxKind::LambdaExpression
            | SyntaxKind::TypeParameterConstraintsClause
            | SyntaxKind::LocalFunctionStatement
            | SyntaxKind::Other => {
                tracing::debug!(
                    "skipping unsupported member '{}' at line {}",
                    node.kind(),
                    node.start_position().row + 1
                );
                continue;
            }
        };
        members.push(Member { node, kind });
    }

    members
}

// ============================================================================
// Extractors
// ============================================================================

pub fn extract_properties(members: &[Member], source: &str) -> Vec<PropertyDeclaration> {
    members
        .iter()
        .filter(|m| m.kind == MemberKind::Property)
        .filter_map(|m| property(&m.node, source))
        .collect()
}

pub fn extract_fields(members: &[Member], source: &str) -> Vec<FieldDeclaration> {
    members
        .iter()
        .filter(|m| m.kind == MemberKind::Field)
        .flat_map(|m| fields(&m.node, source))
        .collect()
}

pub fn extract_methods(members: &[Member], source: &str) -> Vec<MethodDeclaration> {
    members
        .iter()
        .filter(|m| m.kind == MemberKind::Method)
        .filter_map(|m| method(&m.node, source))
        .collect()
}

pub fn extract_events(members: &[Member], source: &str) -> Vec<EventDeclaration> {
    members
        .iter()
        .flat_map(|m| match m.kind {
            MemberKind::EventField => event_fields(&m.node, source),
            MemberKind::EventAccessors => event_with_accessors(&m.node, source)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

pub fn extract_indexers(members: &[Member], source: &str) -> Vec<IndexerDeclaration> {
    members
        .iter()
        .filter(|m| m.kind == MemberKind::Indexer)
        .map(|m| indexer(&m.node, source))
        .collect()
}

// ============================================================================
// Per-node conversion
// ============================================================================

fn property(node: &Node, source: &str) -> Option<PropertyDeclaration> {
    let name = declared_name(node, source)?;
    let accessors = accessor_flags(node);

    Some(PropertyDeclaration {
        name,
        type_name: field_text(node, "type", source).unwrap_or_default(),
        modifiers: modifiers(node, source),
        has_get: accessors.has_get,
        has_set: accessors.has_set,
        is_expression_bodied: accessors.is_expression_bodied,
        documentation: documentation_for(node, source),
    })
}

/// One record per declarator: `int a, b = 1;` yields `a` and `b`
fn fields(node: &Node, source: &str) -> Vec<FieldDeclaration> {
    let Some(declaration) = first_child_of_kind(node, "variable_declaration") else {
        return Vec::new();
    };
    let type_name = field_text(&declaration, "type", source).unwrap_or_default();
    let modifiers = modifiers(node, source);
    let documentation = documentation_for(node, source);

    named_children_of_kind(&declaration, "variable_declarator")
        .iter()
        .filter_map(|declarator| {
            let name = declared_name(declarator, source)?;
            Some(FieldDeclaration {
                name,
                type_name: type_name.clone(),
                modifiers: modifiers.clone(),
                has_initializer: has_child_of_kind(declarator, &["=", "equals_value_clause"]),
                documentation: documentation.clone(),
            })
        })
        .collect()
}

fn method(node: &Node, source: &str) -> Option<MethodDeclaration> {
    let name = declared_name(node, source)?;
    let modifiers = modifiers(node, source);

    Some(MethodDeclaration {
        name,
        return_type: return_type(node, source),
        is_async: modifiers.iter().any(|m| m == "async"),
        modifiers,
        parameters: parameters(node, source),
        is_expression_bodied: has_child_of_kind(node, &["arrow_expression_clause"]),
        is_generic: has_child_of_kind(node, &["type_parameter_list"]),
        documentation: documentation_for(node, source),
    })
}

fn event_fields(node: &Node, source: &str) -> Vec<EventDeclaration> {
    let Some(declaration) = first_child_of_kind(node, "variable_declaration") else {
        return Vec::new();
    };
    let type_name = field_text(&declaration, "type", source).unwrap_or_default();
    let modifiers = modifiers(node, source);
    let documentation = documentation_for(node, source);

    named_children_of_kind(&declaration, "variable_declarator")
        .iter()
        .filter_map(|declarator| {
            Some(EventDeclaration {
                name: declared_name(declarator, source)?,
                type_name: type_name.clone(),
                modifiers: modifiers.clone(),
                documentation: documentation.clone(),
            })
        })
        .collect()
}

fn event_with_accessors(node: &Node, source: &str) -> Option<EventDeclaration> {
    Some(EventDeclaration {
        name: declared_name(node, source)?,
        type_name: field_text(node, "type", source).unwrap_or_default(),
        modifiers: modifiers(node, source),
        documentation: documentation_for(node, source),
    })
}

fn indexer(node: &Node, source: &str) -> IndexerDeclaration {
    let accessors = accessor_flags(node);

    IndexerDeclaration {
        type_name: field_text(node, "type", source).unwrap_or_default(),
        modifiers: modifiers(node, source),
        parameters: parameters(node, source),
        has_get: accessors.has_get,
        has_set: accessors.has_set,
        is_expression_bodied: accessors.is_expression_bodied,
        documentation: documentation_for(node, source),
    }
}

// ============================================================================
// Shared pieces (also used for delegates)
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AccessorFlags {
    has_get: bool,
    has_set: bool,
    is_expression_bodied: bool,
}

/// Accessor presence for properties and indexers.
///
/// With an accessor list, `get` sets `has_get` and `set`/`init` set
/// `has_set`. Without one, an arrow body (`int X => 1;`) is a getter-only
/// expression body. Anything else has neither.
fn accessor_flags(node: &Node) -> AccessorFlags {
    if let Some(list) = first_child_of_kind(node, "accessor_list") {
        let mut flags = AccessorFlags::default();
        for accessor in named_children_of_kind(&list, "accessor_declaration") {
            let mut cursor = accessor.walk();
            for token in accessor.children(&mut cursor) {
                match token.kind() {
                    "get" => flags.has_get = true,
                    "set" | "init" => flags.has_set = true,
                    _ => {}
                }
            }
        }
        return flags;
    }

    if has_child_of_kind(node, &["arrow_expression_clause"]) {
        return AccessorFlags {
            has_get: true,
            has_set: false,
            is_expression_bodied: true,
        };
    }

    AccessorFlags::default()
}

/// Return type as written. Grammar releases disagree on the field name, so
/// fall back to the type node written directly before the name.
pub(crate) fn return_type(node: &Node, source: &str) -> String {
    if let Some(text) =
        field_text(node, "returns", source).or_else(|| field_text(node, "type", source))
    {
        return text;
    }

    let Some(name) = node.child_by_field_name("name") else {
        return String::new();
    };
    let mut previous = name.prev_named_sibling();
    while let Some(candidate) = previous {
        match candidate.kind() {
            "explicit_interface_specifier" | "comment" => {
                previous = candidate.prev_named_sibling();
            }
            "modifier" | "attribute_list" => break,
            _ => return get_node_text(&candidate, source),
        }
    }
    String::new()
}

/// Parameters of a method, delegate or indexer, in declared order
pub(crate) fn parameters(node: &Node, source: &str) -> Vec<ParameterDeclaration> {
    let list = node
        .child_by_field_name("parameters")
        .or_else(|| first_child_of_kind(node, "parameter_list"))
        .or_else(|| first_child_of_kind(node, "bracketed_parameter_list"));
    let Some(list) = list else {
        return Vec::new();
    };

    named_children_of_kind(&list, "parameter")
        .iter()
        .filter_map(|parameter| {
            Some(ParameterDeclaration {
                name: declared_name(parameter, source)?,
                type_name: field_text(parameter, "type", source).unwrap_or_default(),
                has_default_value: has_child_of_kind(parameter, &["=", "equals_value_clause"]),
            })
        })
        .collect()
}
