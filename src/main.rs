//! Entigen
//!
//! Entity Schema Compiler
//!
//! This is the main entry point for the `entigen` command-line tool.

use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = entigen_cli::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
