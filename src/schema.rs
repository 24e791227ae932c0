//! Declaration model emitted for the documentation pipeline
//!
//! Field names are a compatibility surface: downstream consumers key off the
//! exact camelCase names below. Optional values are omitted when absent,
//! never written as `null`; list fields are always present.

use serde::{Deserialize, Serialize};

/// Extracted description of one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub file_path: String,

    /// Extraction time, RFC 3339 in UTC
    pub analyzed_at: String,

    pub language: String,

    pub language_version: String,

    /// Namespace names, unique, in order of first appearance
    pub namespaces: Vec<String>,

    pub imports: Vec<Import>,

    /// Top-level type declarations; nested types live under their parent
    pub classes: Vec<TypeDeclaration>,

    pub delegates: Vec<DelegateSignature>,

    pub enums: Vec<EnumDeclaration>,

    #[serde(rename = "dotNetFeatures")]
    pub dot_net_features: IdiomCatalog,
}

/// A using directive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Import {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    pub is_static: bool,
}

/// Declaration kind of a type, named the way Roslyn names the syntax kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    #[default]
    #[serde(rename = "ClassDeclaration")]
    Class,
    #[serde(rename = "StructDeclaration")]
    Struct,
    #[serde(rename = "InterfaceDeclaration")]
    Interface,
    #[serde(rename = "RecordDeclaration")]
    Record,
    #[serde(rename = "RecordStructDeclaration")]
    RecordStruct,
}

/// Class, struct, interface or record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub name: String,

    pub kind: TypeKind,

    /// Modifiers as written, in source order
    pub modifiers: Vec<String>,

    /// First entry of the inheritance list. Without symbol resolution a base
    /// class cannot be told apart from an interface, so this is positional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    /// Inheritance list entries after the first
    pub interfaces: Vec<String>,

    pub generic_parameters: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    pub properties: Vec<PropertyDeclaration>,

    pub fields: Vec<FieldDeclaration>,

    pub methods: Vec<MethodDeclaration>,

    pub events: Vec<EventDeclaration>,

    pub indexers: Vec<IndexerDeclaration>,

    pub nested_types: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub modifiers: Vec<String>,

    pub has_get: bool,

    pub has_set: bool,

    pub is_expression_bodied: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub modifiers: Vec<String>,

    pub has_initializer: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub modifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Indexers have no name; they are accessed positionally through `this[...]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerDeclaration {
    #[serde(rename = "type")]
    pub type_name: String,

    pub modifiers: Vec<String>,

    pub parameters: Vec<ParameterDeclaration>,

    pub has_get: bool,

    pub has_set: bool,

    pub is_expression_bodied: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDeclaration {
    pub name: String,

    pub return_type: String,

    pub modifiers: Vec<String>,

    pub parameters: Vec<ParameterDeclaration>,

    pub is_async: bool,

    pub is_expression_bodied: bool,

    pub is_generic: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Only the presence of a default value is recorded, never its expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub has_default_value: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateSignature {
    pub name: String,

    pub return_type: String,

    pub parameters: Vec<ParameterDeclaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDeclaration {
    pub name: String,

    /// Underlying type text (`enum Flags : byte`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    /// Member names in declared order
    pub members: Vec<String>,
}

/// Cross-cutting constructs found anywhere in the file.
///
/// Buckets keep every occurrence in visit order; repeats are expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdiomCatalog {
    pub attributes: Vec<String>,

    pub linq_queries: Vec<String>,

    pub linq_method_calls: Vec<String>,

    pub async_methods: Vec<String>,

    pub lambda_expressions: Vec<String>,

    pub generic_constraints: Vec<String>,

    pub local_functions: Vec<String>,
}
