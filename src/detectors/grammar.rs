//! C# grammar node mappings
//!
//! Maps tree-sitter-c-sharp node kind strings onto a closed `SyntaxKind`
//! enum so the extractors classify nodes with exhaustive `match`es instead
//! of string comparisons scattered through the code. Node kinds with no
//! handler map to `SyntaxKind::Other`.

use tree_sitter::Node;

use crate::schema::TypeKind;

/// Node kinds the extractors care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // =========================================================================
    // Scopes
    // =========================================================================
    CompilationUnit,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    DeclarationList,
    /// `#if` / `#elif` / `#else` blocks wrapping declarations
    PreprocessorBlock,
    UsingDirective,

    // =========================================================================
    // Type Declarations
    // =========================================================================
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    RecordDeclaration,
    RecordStructDeclaration,
    EnumDeclaration,
    DelegateDeclaration,

    // =========================================================================
    // Members
    // =========================================================================
    PropertyDeclaration,
    FieldDeclaration,
    MethodDeclaration,
    EventFieldDeclaration,
    EventDeclaration,
    IndexerDeclaration,
    ConstructorDeclaration,
    DestructorDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,

    // =========================================================================
    // Idioms
    // =========================================================================
    Attribute,
    QueryExpression,
    InvocationExpression,
    LambdaExpression,
    TypeParameterConstraintsClause,
    LocalFunctionStatement,

    // =========================================================================
    // Other
    // =========================================================================
    Comment,
    /// Error-recovery node produced for invalid source
    Error,
    Other,
}

impl SyntaxKind {
    /// Classify a tree-sitter node
    pub fn of(node: &Node) -> Self {
        if node.is_error() {
            return Self::Error;
        }
        Self::from_kind(node.kind())
    }

    /// Classify a tree-sitter node kind string
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "compilation_unit" => Self::CompilationUnit,
            "namespace_declaration" => Self::NamespaceDeclaration,
            "file_scoped_namespace_declaration" => Self::FileScopedNamespaceDeclaration,
            "declaration_list" => Self::DeclarationList,
            "preproc_if" | "preproc_elif" | "preproc_else" => Self::PreprocessorBlock,
            "using_directive" => Self::UsingDirective,

            "class_declaration" => Self::ClassDeclaration,
            "struct_declaration" => Self::StructDeclaration,
            "interface_declaration" => Self::InterfaceDeclaration,
            "record_declaration" => Self::RecordDeclaration,
            // Older grammar releases had a separate node for `record struct`
            "record_struct_declaration" => Self::RecordStructDeclaration,
            "enum_declaration" => Self::EnumDeclaration,
            "delegate_declaration" => Self::DelegateDeclaration,

            "property_declaration" => Self::PropertyDeclaration,
            "field_declaration" => Self::FieldDeclaration,
            "method_declaration" => Self::MethodDeclaration,
            "event_field_declaration" => Self::EventFieldDeclaration,
            "event_declaration" => Self::EventDeclaration,
            "indexer_declaration" => Self::IndexerDeclaration,
            "constructor_declaration" => Self::ConstructorDeclaration,
            "destructor_declaration" => Self::DestructorDeclaration,
            "operator_declaration" => Self::OperatorDeclaration,
            "conversion_operator_declaration" => Self::ConversionOperatorDeclaration,

            "attribute" => Self::Attribute,
            "query_expression" => Self::QueryExpression,
            "invocation_expression" => Self::InvocationExpression,
            "lambda_expression" => Self::LambdaExpression,
            "type_parameter_constraints_clause" => Self::TypeParameterConstraintsClause,
            "local_function_statement" => Self::LocalFunctionStatement,

            "comment" => Self::Comment,
            "ERROR" => Self::Error,
            _ => Self::Other,
        }
    }

    /// Scope containers whose children are at namespace level. Error nodes
    /// count as containers so recovery does not hide well-formed siblings.
    pub fn is_scope_container(&self) -> bool {
        matches!(
            self,
            Self::CompilationUnit
                | Self::NamespaceDeclaration
                | Self::FileScopedNamespaceDeclaration
                | Self::DeclarationList
                | Self::PreprocessorBlock
                | Self::Error
        )
    }

    /// Declaration kind for nodes that become a `TypeDeclaration`.
    /// Enums and delegates are reported separately and return `None`.
    pub fn type_kind(&self, node: &Node) -> Option<TypeKind> {
        match self {
            Self::ClassDeclaration => Some(TypeKind::Class),
            Self::StructDeclaration => Some(TypeKind::Struct),
            Self::InterfaceDeclaration => Some(TypeKind::Interface),
            Self::RecordStructDeclaration => Some(TypeKind::RecordStruct),
            Self::RecordDeclaration => {
                let mut cursor = node.walk();
                let is_struct = node.children(&mut cursor).any(|c| c.kind() == "struct");
                if is_struct {
                    Some(TypeKind::RecordStruct)
                } else {
                    Some(TypeKind::Record)
                }
            }
            _ => None,
        }
    }
}
