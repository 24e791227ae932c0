//! Language detection and tree-sitter grammar loading

use std::path::Path;
use tree_sitter::{Language, Parser};

use crate::error::{ExtractError, Result};

/// Source dialects the extractor accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    /// C# source file (.cs)
    CSharp,
    /// C# script (.csx); same grammar, top-level statements allowed
    CSharpScript,
}

impl Lang {
    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExtractError::UnsupportedLanguage {
                extension: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "cs" => Ok(Self::CSharp),
            "csx" => Ok(Self::CSharpScript),
            _ => Err(ExtractError::UnsupportedLanguage {
                extension: ext.to_string(),
            }),
        }
    }

    /// Language tag written into the document's `language` field
    pub fn name(&self) -> &'static str {
        "C#"
    }

    /// Get the tree-sitter Language for parsing
    pub fn tree_sitter_language(&self) -> Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }

    /// Build a parser configured for this language
    pub fn parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.tree_sitter_language())
            .map_err(|e| ExtractError::UnparseableFile {
                message: format!("grammar rejected by tree-sitter runtime: {}", e),
            })?;
        Ok(parser)
    }
}
