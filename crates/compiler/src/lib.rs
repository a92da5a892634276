//! # Entigen Compiler
//!
//! The resolve + render pipeline of the Entigen schema compiler.
//!
//! This crate turns parsed entity schemas into render-ready descriptor
//! trees:
//!
//! - **Type Strategy Registry**: field kind → storage / host / API types
//! - **Exposure Resolver**: per-field API artifact sets, entity operations
//! - **Field Preparator Registry**: field → zero, one, or two columns
//! - **Relationship Preparator**: relation metadata → relation descriptors
//! - **Validation & Nested Schemas**: constraints, structural validators,
//!   element-interface definitions
//! - **Template Assembly**: black-box rendering and base/extension writes
//!

// ============================================================================
// Modules
// ============================================================================

pub mod assembly;
pub mod compiler;
pub mod descriptors;
pub mod exposure;
pub mod naming;
pub mod preparators;
pub mod relations;
pub mod types;
pub mod validation;

// ============================================================================
// Re-exports
// ============================================================================

pub use assembly::{
    BASE_TEMPLATE, DescriptorRenderer, EXTENSION_TEMPLATE, FileRole, OutputFile, TemplateRenderer,
    WriteSummary, plan_entity_files, write_files,
};
pub use compiler::{CompileReport, Compiler, CompilerConfig, EntityFailure, compile};
pub use descriptors::{
    ColumnDescriptor, EntityArtifacts, EnumDescriptor, HostReturn, NestedInterface,
    RelationDescriptor, RelationOptions,
};
pub use exposure::{ExposureResolver, ExposureSet, field_exposure};
pub use preparators::{ColumnStrategy, PreparatorRegistry};
pub use relations::prepare_relationship;
pub use types::{ResolvedTypes, TypeRegistry, TypeStrategy};
pub use validation::{
    Constraint, NestedSchema, PropertySchema, SchemaNode, constraints_for, nested_schema_for,
    scalar_array_schema,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
