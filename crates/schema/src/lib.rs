//! # Entigen Schema
//!
//! The normalized entity schema model and parser for the Entigen compiler.
//!
//! ## Core Concepts
//!
//! - **ParsedEntity**: the normalized in-memory form of one JSON entity schema
//! - **EntityField**: one field definition within an entity
//! - **RelationshipSpec**: association metadata attached to a field
//! - **ItemSchema**: recursive structural description of JSON array elements
//! - **parser**: `parse(json_text) -> ParsedEntity`
//!
//! Entities are constructed once per compiler invocation from schema text,
//! flow immutably through resolve and render, and are discarded after
//! artifact generation.

// Module declarations
pub mod entity;
pub mod field;
pub mod item_schema;
pub mod parser;
pub mod relationship;

// Re-export commonly used types at crate root
pub use entity::{GraphqlEntityPolicy, ParsedEntity};
pub use field::{EntityField, GraphqlFieldPolicy};
pub use item_schema::{ItemKind, ItemSchema};
pub use parser::{parse, parse_all};
pub use relationship::RelationshipSpec;

// Re-export core types that are commonly used with the schema model
pub use entigen_core::{
    ApiArtifact, CompileError, CompileResult, EntityOp, FieldKind, ReferentialAction,
    RelationKind, Validatable,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        ApiArtifact, CompileError, CompileResult, EntityField, EntityOp, FieldKind,
        GraphqlEntityPolicy, GraphqlFieldPolicy, ItemKind, ItemSchema, ParsedEntity,
        ReferentialAction, RelationKind, RelationshipSpec, Validatable, parse, parse_all,
    };
}
