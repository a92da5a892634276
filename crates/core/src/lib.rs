//! # Entigen Core
//!
//! Core types, traits, and error handling for the Entigen schema compiler.
//!
//! This crate provides the foundational building blocks used throughout
//! the compiler pipeline, including:
//!
//! - **Types**: field kinds, relation kinds, referential actions, API
//!   artifacts, entity operations
//! - **Traits**: common behaviors like `Validatable`
//! - **Errors**: unified error handling with `CompileError` and `CompileResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{CompileError, CompileResult};
pub use traits::Validatable;
pub use types::{ApiArtifact, EntityOp, FieldKind, ReferentialAction, RelationKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
