//! CLI argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::lang::Lang;

/// Structural extractor for C# sources
#[derive(Parser, Debug)]
#[command(name = "dotnet-extract")]
#[command(about = "Extract types, members, documentation and idioms from C# files as JSON")]
#[command(version)]
pub struct Cli {
    /// C# files to extract
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Write output to PATH (one input) or into directory PATH as <stem>.json
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Override the languageVersion written into each document
    #[arg(long, value_name = "VERSION", env = "DOTNET_EXTRACT_LANGUAGE_VERSION")]
    pub language_version: Option<String>,

    /// Config file (default: <config dir>/dotnet-extract/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Give up on a file after N seconds
    #[arg(long, value_name = "N")]
    pub timeout_secs: Option<u64>,

    /// Treat files without a .cs/.csx extension as C#
    #[arg(long)]
    pub force: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default tracing directive for this invocation
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "dotnet_extract=debug"
        } else {
            "dotnet_extract=warn"
        }
    }

    /// Language for `path`. With `--force`, unknown extensions are read as C#.
    pub fn language_for(&self, path: &Path) -> Result<Lang> {
        match Lang::from_path(path) {
            Ok(lang) => Ok(lang),
            Err(e) if self.force => {
                tracing::warn!("{}: {}; reading as C#", path.display(), e);
                Ok(Lang::CSharp)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether output is a single document rather than a batch
    pub fn is_single(&self) -> bool {
        self.files.len() == 1
    }
}
