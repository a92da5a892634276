//! Error types for Entigen
//!
//! This module provides unified error handling across the compiler pipeline:
//! schema errors, strategy-registry errors, rendering errors, and IO errors.
//!
//! Programmer errors (e.g. relationship-only resolution invoked on a
//! non-relationship field) are deliberately *not* represented here — they are
//! panics and are never caught.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the Entigen compiler.
#[derive(Debug, Error)]
pub enum CompileError {
    // ========================================================================
    // Schema Errors (fatal per entity)
    // ========================================================================
    /// General schema error
    #[error("Schema error: {0}")]
    Schema(String),

    /// Schema error scoped to an entity
    #[error("Schema error in entity '{entity}': {message}")]
    EntitySchema { entity: String, message: String },

    /// Schema error scoped to a field
    #[error("Schema error in field '{entity}.{field}': {message}")]
    FieldSchema {
        entity: String,
        field: String,
        message: String,
    },

    /// The relation kind is not one of the four known kinds
    #[error("Unknown relation kind '{kind}' on field '{entity}.{field}'")]
    UnknownRelationKind {
        entity: String,
        field: String,
        kind: String,
    },

    /// Duplicate column name after field expansion
    #[error("Duplicate column name '{column}' in entity '{entity}'")]
    DuplicateColumn { entity: String, column: String },

    // ========================================================================
    // Strategy Errors
    // ========================================================================
    /// No type strategy registered for a field kind (always fatal)
    #[error("No type strategy registered for kind '{kind}' (field '{entity}.{field}')")]
    NoTypeStrategy {
        entity: String,
        field: String,
        kind: String,
    },

    /// No column strategy registered for a field kind (fatal only in strict
    /// mode; the lenient default degrades to a generic scalar column)
    #[error("No column strategy registered for kind '{kind}' (field '{entity}.{field}')")]
    NoColumnStrategy {
        entity: String,
        field: String,
        kind: String,
    },

    // ========================================================================
    // Rendering Errors
    // ========================================================================
    /// Template rendering failed
    #[error("Template rendering failed for '{template}': {message}")]
    TemplateRender { template: String, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON parse/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    /// Create a general schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        CompileError::Schema(msg.into())
    }

    /// Create an entity-scoped schema error.
    pub fn entity_schema(entity: impl Into<String>, msg: impl Into<String>) -> Self {
        CompileError::EntitySchema {
            entity: entity.into(),
            message: msg.into(),
        }
    }

    /// Create a field-scoped schema error.
    pub fn field_schema(
        entity: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        CompileError::FieldSchema {
            entity: entity.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Check if this is a schema error (malformed or inconsistent input).
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            CompileError::Schema(_)
                | CompileError::EntitySchema { .. }
                | CompileError::FieldSchema { .. }
                | CompileError::UnknownRelationKind { .. }
                | CompileError::DuplicateColumn { .. }
                | CompileError::Json(_)
        )
    }

    /// Check if this is a strategy-registry error.
    pub fn is_strategy(&self) -> bool {
        matches!(
            self,
            CompileError::NoTypeStrategy { .. } | CompileError::NoColumnStrategy { .. }
        )
    }

    /// Check if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            CompileError::Io(_)
                | CompileError::FileRead { .. }
                | CompileError::FileWrite { .. }
                | CompileError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using CompileError
pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Tests
// ============================================================================
