//! Error types and exit codes for dotnet-extract

use std::process::ExitCode;
use thiserror::Error;

/// File-level failures of an extraction run.
///
/// Node-level problems (a type with an empty name, a member kind without a
/// handler) never show up here: they are dropped where they occur so that
/// the rest of the file still extracts.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported language for extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Failed to parse file: {message}")]
    UnparseableFile { message: String },

    #[error("Failed to serialize document: {message}")]
    Serialization { message: String },

    #[error("Extraction cancelled")]
    Cancelled,

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Unsupported language
    /// - 3: Parse failure
    /// - 4: Serialization failure
    /// - 5: Cancelled or timed out
    /// - 6: Config error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Numeric exit code, shared by `exit_code` and batch reporting
    pub fn code(&self) -> u8 {
        match self {
            Self::FileNotFound { .. } => 1,
            Self::Io(_) => 1,
            Self::UnsupportedLanguage { .. } => 2,
            Self::UnparseableFile { .. } => 3,
            Self::Serialization { .. } => 4,
            Self::Cancelled => 5,
            Self::Config { .. } => 6,
        }
    }

    /// Short failure kind used in per-file diagnostic lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file-not-found",
            Self::Io(_) => "io",
            Self::UnsupportedLanguage { .. } => "unsupported-language",
            Self::UnparseableFile { .. } => "unparseable-file",
            Self::Serialization { .. } => "serialization",
            Self::Cancelled => "cancelled",
            Self::Config { .. } => "config",
        }
    }
}

/// Result type alias for dotnet-extract operations
pub type Result<T> = std::result::Result<T, ExtractError>;
