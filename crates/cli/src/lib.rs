//! # Entigen CLI
//!
//! Command-line interface for the Entigen schema compiler.
//!
//! ## Commands
//!
//! - `compile` — compile entity schemas and write base + extension files
//! - `check` — parse and resolve schemas without writing anything
//!
//! Schema arguments may be individual `.json` files or directories, which
//! are scanned recursively.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use entigen_compiler::{CompileReport, Compiler, CompilerConfig, DescriptorRenderer};
use std::path::PathBuf;
use walkdir::WalkDir;

// ============================================================================
// Argument parsing
// ============================================================================

/// Entigen — entity schema compiler.
#[derive(Debug, Parser)]
#[command(name = "entigen", version, about = "Compile declarative entity schemas into render-ready descriptors")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile schemas and write output files
    Compile {
        /// Schema files or directories to compile
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory
        #[arg(long, short, default_value = "./generated")]
        out: PathBuf,

        /// Overwrite existing user-extension files
        #[arg(long)]
        force: bool,

        /// Fail entities on field-strategy errors instead of degrading
        #[arg(long)]
        strict: bool,
    },

    /// Parse and resolve schemas without writing anything
    Check {
        /// Schema files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Fail entities on field-strategy errors instead of degrading
        #[arg(long)]
        strict: bool,
    },
}

// ============================================================================
// Entry point
// ============================================================================

/// Parse arguments from the environment and run.
pub fn run() -> anyhow::Result<()> {
    execute(Cli::parse())
}

/// Run a parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compile {
            paths,
            out,
            force,
            strict,
        } => {
            let sources = load_sources(&paths)?;
            let mut config = CompilerConfig::new().with_out_dir(out);
            if force {
                config = config.with_force();
            }
            if strict {
                config = config.strict();
            }

            let compiler = Compiler::new(config);
            let (report, summary) = compiler.compile_and_write(
                sources.iter().map(|(_, text)| text.as_str()),
                &DescriptorRenderer,
            )?;

            print_report(&report);
            println!(
                "{} {} written, {} preserved",
                "files:".bold(),
                summary.written.len(),
                summary.skipped.len(),
            );

            finish(&report)
        }

        Command::Check { paths, strict } => {
            let sources = load_sources(&paths)?;
            let mut config = CompilerConfig::new();
            if strict {
                config = config.strict();
            }

            let compiler = Compiler::new(config);
            let report = compiler.compile_all(sources.iter().map(|(_, text)| text.as_str()));

            print_report(&report);
            finish(&report)
        }
    }
}

fn finish(report: &CompileReport) -> anyhow::Result<()> {
    if !report.is_success() {
        bail!("{} of {} entities failed", report.failure_count(), report.failure_count() + report.success_count());
    }
    Ok(())
}

// ============================================================================
// Schema discovery
// ============================================================================

/// Collect schema files from file and directory arguments.
///
/// Directories are scanned recursively for `.json` files; results are
/// sorted for deterministic compile order.
pub fn collect_schema_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
                let entry_path = entry.path();
                if entry_path.is_file()
                    && entry_path.extension().is_some_and(|ext| ext == "json")
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("schema path does not exist: {}", path.display());
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        bail!("no schema files found");
    }

    Ok(files)
}

fn load_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<(PathBuf, String)>> {
    let files = collect_schema_files(paths)?;
    tracing::debug!(count = files.len(), "schema files discovered");

    files
        .into_iter()
        .map(|path| {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read schema file {}", path.display()))?;
            Ok((path, text))
        })
        .collect()
}

// ============================================================================
// Reporting
// ============================================================================

fn print_report(report: &CompileReport) {
    for artifacts in &report.artifacts {
        println!(
            "{} {} ({} columns, {} relations, {} enums)",
            "ok".green().bold(),
            artifacts.entity,
            artifacts.columns.len(),
            artifacts.relations.len(),
            artifacts.enums.len(),
        );
    }

    for failure in &report.failures {
        let name = failure.entity.as_deref().unwrap_or("<unknown entity>");
        println!("{} {}: {}", "failed".red().bold(), name, failure.error);
    }
}

// ============================================================================
// Tests
// ============================================================================
