//! Idiom detection
//!
//! A single pre-order pass over the whole tree, independent of type
//! extraction, that collects the cross-cutting constructs reported under
//! `dotNetFeatures`. Matching is purely syntactic: node kind, plus the
//! invoked member name for fluent query calls. Entries keep visit order and
//! are never deduplicated.

use tree_sitter::Node;

use crate::detectors::common::{declared_name, get_node_text, modifiers, visit_all};
use crate::detectors::grammar::SyntaxKind;
use crate::schema::IdiomCatalog;

/// Version of `DEFAULT_FLUENT_METHODS`; bump when the list changes
pub const FLUENT_CATALOG_VERSION: u32 = 1;

/// Fluent query methods recognized by default
pub const DEFAULT_FLUENT_METHODS: &[&str] = &[
    "Where",
    "Select",
    "OrderBy",
    "GroupBy",
    "Join",
    "SelectMany",
    "FirstOrDefault",
    "ToList",
    "ToArray",
];

/// Case-sensitive allowlist of method names whose calls are reported as
/// fluent query calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluentCatalog {
    version: u32,
    methods: Vec<String>,
}

impl Default for FluentCatalog {
    fn default() -> Self {
        Self {
            version: FLUENT_CATALOG_VERSION,
            methods: DEFAULT_FLUENT_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl FluentCatalog {
    /// A catalog with exactly these methods
    pub fn new<I, S>(version: u32, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version,
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// This catalog plus `extra` (names already present are not repeated)
    pub fn extended<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for method in extra {
            let method = method.into();
            if !self.methods.contains(&method) {
                self.methods.push(method);
            }
        }
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }
}

/// Collect every idiom in the tree rooted at `root`
pub fn detect_idioms(root: &Node, source: &str, catalog: &FluentCatalog) -> IdiomCatalog {
    let mut idioms = IdiomCatalog::default();

    visit_all(root, |node| match SyntaxKind::of(node) {
        SyntaxKind::Attribute => idioms.attributes.push(get_node_text(node, source)),
        SyntaxKind::QueryExpression => idioms.linq_queries.push(get_node_text(node, source)),
        SyntaxKind::InvocationExpression => {
            if invoked_member_name(node, source).is_some_and(|name| catalog.contains(&name)) {
                idioms.linq_method_calls.push(get_node_text(node, source));
            }
        }
        SyntaxKind::MethodDeclaration => {
            if modifiers(node, source).iter().any(|m| m == "async") {
                if let Some(name) = declared_name(node, source) {
                    idioms.async_methods.push(name);
                }
            }
        }
        SyntaxKind::LambdaExpression => {
            idioms.lambda_expressions.push(get_node_text(node, source));
        }
        SyntaxKind::TypeParameterConstraintsClause => {
            idioms.generic_constraints.push(get_node_text(node, source));
        }
        SyntaxKind::LocalFunctionStatement => {
            if let Some(name) = declared_name(node, source) {
                idioms.local_functions.push(name);
            }
        }
        SyntaxKind::CompilationUnit
        | SyntaxKind::NamespaceDeclaration
        | SyntaxKind::FileScopedNamespaceDeclaration
        | SyntaxKind::DeclarationList
        | SyntaxKind::PreprocessorBlock
        | SyntaxKind::UsingDirective
        | SyntaxKind::ClassDeclaration
        | SyntaxKind::StructDeclaration
        | SyntaxKind::InterfaceDeclaration
        | SyntaxKind::RecordDeclaration
        | SyntaxKind::RecordStructDeclaration
        | SyntaxKind::EnumDeclaration
        | SyntaxKind::DelegateDeclaration
        | SyntaxKind::PropertyDeclaration
        | SyntaxKind::FieldDeclaration
        | SyntaxKind::EventFieldDeclaration
        | SyntaxKind::EventDeclaration
        | SyntaxKind::IndexerDeclaration
        | SyntaxKind::ConstructorDeclaration
        | SyntaxKind::DestructorDeclaration
        | SyntaxKind::OperatorDeclaration
        | SyntaxKind::ConversionOperatorDeclaration
        | SyntaxKind::Comment
        | SyntaxKind::Error
        | SyntaxKind::Other => {}
    });

    idioms
}

/// Rightmost simple name of the call target: `Where` for `xs.Where(...)`,
/// `xs?.Where(...)`, `Where(...)` and `xs.Where<int>(...)`.
fn invoked_member_name(invocation: &Node, source: &str) -> Option<String> {
    let mut target = invocation
        .child_by_field_name("function")
        .or_else(|| invocation.named_child(0))?;

    loop {
        match target.kind() {
            "identifier" => return Some(get_node_text(&target, source)),
            "generic_name" => {
                target = target
                    .child_by_field_name("name")
                    .or_else(|| target.named_child(0))?;
            }
            "member_access_expression" | "member_binding_expression" => {
                target = target.child_by_field_name("name")?;
            }
            // `xs?.Where` keeps the called member in a trailing member binding
            "conditional_access_expression" => {
                let count = target.named_child_count();
                target = target.named_child(count.checked_sub(1)?)?;
            }
            _ => return None,
        }
    }
}
