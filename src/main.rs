//! dotnet-extract CLI entry point

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use dotnet_extract::output::{encode_json, encode_json_batch, output_paths_in};
use dotnet_extract::{
    extract_file, CancelToken, Cli, Document, ExtractError, ExtractOptions, ExtractorConfig,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

/// Logs go to stderr; stdout carries only JSON
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::from_default_env();
    let filter = match cli.log_directive().parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> dotnet_extract::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => ExtractorConfig::load_from(path)?,
        None => ExtractorConfig::load()?,
    };
    let mut options = config.into_options();
    if let Some(version) = &cli.language_version {
        options.language_version = version.clone();
    }

    tracing::info!(
        "extracting {} file(s), fluent catalog v{}",
        cli.files.len(),
        options.fluent.version()
    );

    let results: Vec<(&PathBuf, dotnet_extract::Result<Document>)> = cli
        .files
        .par_iter()
        .map(|path| (path, extract_one(cli, path, &options)))
        .collect();

    let mut exit_code = None;
    let mut documents = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(document) => documents.push((path, document)),
            Err(e) => {
                eprintln!("error: {}: {}: {}", path.display(), e.kind(), e);
                exit_code.get_or_insert(e.exit_code());
            }
        }
    }

    write_output(cli, &documents)?;

    Ok(exit_code.unwrap_or(ExitCode::SUCCESS))
}

fn extract_one(
    cli: &Cli,
    path: &Path,
    options: &ExtractOptions,
) -> dotnet_extract::Result<Document> {
    let lang = cli.language_for(path)?;
    let cancel = cli
        .timeout_secs
        .map(|secs| CancelToken::with_deadline(Duration::from_secs(secs)))
        .unwrap_or_default();

    let document = extract_file(path, lang, options, &cancel)?;
    tracing::debug!(
        "{}: {} namespaces, {} imports",
        path.display(),
        document.namespaces.len(),
        document.imports.len()
    );
    Ok(document)
}

fn write_output(cli: &Cli, documents: &[(&PathBuf, Document)]) -> dotnet_extract::Result<()> {
    let pretty = !cli.compact;

    match (&cli.output, cli.is_single()) {
        (None, true) => {
            if let Some((_, document)) = documents.first() {
                println!("{}", encode_json(document, pretty)?);
            }
        }
        (None, false) => {
            let batch: Vec<Document> = documents.iter().map(|(_, d)| d.clone()).collect();
            println!("{}", encode_json_batch(&batch, pretty)?);
        }
        (Some(target), true) => {
            if let Some((_, document)) = documents.first() {
                write_file(target, &encode_json(document, pretty)?)?;
            }
        }
        (Some(dir), false) => {
            fs::create_dir_all(dir)?;
            let inputs: Vec<&Path> = documents.iter().map(|(p, _)| p.as_path()).collect();
            let targets = output_paths_in(dir, &inputs);
            for ((input, document), target) in documents.iter().zip(targets) {
                if target.file_stem() != input.file_stem() {
                    tracing::warn!(
                        "{}: output name taken, writing {}",
                        input.display(),
                        target.display()
                    );
                }
                write_file(&target, &encode_json(document, pretty)?)?;
            }
        }
    }

    Ok(())
}

fn write_file(path: &Path, json: &str) -> dotnet_extract::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", json)).map_err(|e| {
        tracing::error!("failed to write {}: {}", path.display(), e);
        ExtractError::Io(e)
    })?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}
