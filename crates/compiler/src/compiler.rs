//! # Compiler Orchestrator
//!
//! The `Compiler` is the top-level entry point of the resolve phase. It takes
//! parsed entities (or raw schema text) and produces render-ready
//! [`EntityArtifacts`] per entity, then optionally assembles and writes
//! output files.
//!
//! ## Pipeline
//!
//! ```text
//! schema text ──parse──► ParsedEntity
//!                            │
//!                            ▼
//!                  Compiler::compile_entity()
//!                    ├── exposure resolution (operations + per-field sets)
//!                    ├── field preparation (columns, 0..2 per field)
//!                    ├── relationship preparation (relation descriptors)
//!                    ├── enum + nested-interface collection
//!                    ▼
//!                  EntityArtifacts ──assembly──► base + extension files
//! ```
//!
//! Entities compile independently: in a multi-entity run one entity's
//! failure never stops its siblings, and no per-field output is emitted for
//! an entity that aborted its resolve phase.

use crate::assembly::{self, TemplateRenderer, WriteSummary};
use crate::descriptors::{EntityArtifacts, EnumDescriptor, NestedInterface};
use crate::exposure::ExposureResolver;
use crate::naming;
use crate::preparators::PreparatorRegistry;
use crate::relations::prepare_relationship;
use crate::validation::nested_schema_for;
use entigen_core::{CompileError, CompileResult, FieldKind, Validatable};
use entigen_schema::ParsedEntity;
use std::collections::BTreeSet;
use std::path::PathBuf;

// ============================================================================
// CompilerConfig
// ============================================================================

/// Configuration for the compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Output directory for generated files
    pub out_dir: PathBuf,

    /// Overwrite existing user-extension files
    pub force: bool,

    /// Surface field-strategy failures instead of degrading to a generic
    /// scalar column
    pub strict_fields: bool,

    /// Extension of generated files
    pub file_extension: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("./generated"),
            force: false,
            strict_fields: false,
            file_extension: "json".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Allow overwriting user-extension files.
    pub fn with_force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Fail entities on field-strategy errors instead of degrading.
    pub fn strict(mut self) -> Self {
        self.strict_fields = true;
        self
    }

    /// Set the generated-file extension.
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }
}

// ============================================================================
// CompileReport
// ============================================================================

/// A failed entity in a multi-entity run.
#[derive(Debug)]
pub struct EntityFailure {
    /// Entity name, when parsing got far enough to know it
    pub entity: Option<String>,

    /// The failure
    pub error: CompileError,
}

/// The outcome of a multi-entity compile run.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Successfully compiled entities
    pub artifacts: Vec<EntityArtifacts>,

    /// Failed entities, in input order
    pub failures: Vec<EntityFailure>,
}

impl CompileReport {
    /// Number of successfully compiled entities.
    pub fn success_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Number of failed entities.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether every entity compiled.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================================
// Compiler
// ============================================================================

/// Top-level compiler orchestrating the resolve phase.
///
/// Stateless aside from its configuration and strategy registries;
/// compiling the same schema text twice yields byte-identical descriptor
/// trees.
#[derive(Debug)]
pub struct Compiler {
    config: CompilerConfig,
    registry: PreparatorRegistry,
}

impl Compiler {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        let registry = PreparatorRegistry::new(config.strict_fields);
        Self { config, registry }
    }

    /// Create a compiler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CompilerConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    // ====================================================================
    // Entity compilation
    // ====================================================================

    /// Compile one parsed entity into its render-ready artifact tree.
    ///
    /// Fields are walked in alphabetical order so descriptor emission is
    /// deterministic regardless of schema document key order.
    ///
    /// # Errors
    ///
    /// Fails on schema inconsistencies (entity validation), duplicate
    /// column names after expansion, and — in strict mode — field-strategy
    /// failures.
    pub fn compile_entity(&self, entity: &ParsedEntity) -> CompileResult<EntityArtifacts> {
        entity.validate()?;

        let resolver = ExposureResolver::new(entity.graphql.clone());

        let mut artifacts = EntityArtifacts::new(&entity.name);
        artifacts.operations = resolver.operations();

        for field in entity.sorted_fields() {
            let columns = self.registry.prepare_field(entity, field)?;
            artifacts.columns.extend(columns);

            if field.is_relationship() {
                artifacts.relations.push(prepare_relationship(field));
            }

            if field.kind == Some(FieldKind::Enum) {
                if let Some(values) = &field.enum_values {
                    artifacts.enums.push(EnumDescriptor {
                        name: naming::enum_type_name(&entity.name, &field.name),
                        values: values.clone(),
                        array: field.array,
                    });
                }
            }

            if field.is_structured_json() {
                let item = field.item_schema.as_ref().unwrap();
                let nested = nested_schema_for(&entity.name, &field.name, item);
                artifacts.nested_interfaces.push(NestedInterface {
                    name: nested.interface_name,
                    definition_text: nested.definition_text,
                });
            }
        }

        // Column names must be unique after multi-column expansion.
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for column in &artifacts.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(CompileError::DuplicateColumn {
                    entity: entity.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        tracing::debug!(
            entity = %entity.name,
            columns = artifacts.columns.len(),
            relations = artifacts.relations.len(),
            enums = artifacts.enums.len(),
            "entity compiled",
        );

        Ok(artifacts)
    }

    /// Parse and compile one schema document.
    pub fn compile_source(&self, json_text: &str) -> CompileResult<EntityArtifacts> {
        let entity = entigen_schema::parse(json_text)?;
        self.compile_entity(&entity)
    }

    /// Compile several schema documents, isolating failures per entity.
    pub fn compile_all<'a>(
        &self,
        sources: impl IntoIterator<Item = &'a str>,
    ) -> CompileReport {
        let mut report = CompileReport::default();

        for source in sources {
            match entigen_schema::parse(source) {
                Err(error) => {
                    tracing::warn!(%error, "schema parse failed");
                    report.failures.push(EntityFailure {
                        entity: None,
                        error,
                    });
                }
                Ok(entity) => match self.compile_entity(&entity) {
                    Ok(artifacts) => report.artifacts.push(artifacts),
                    Err(error) => {
                        tracing::warn!(entity = %entity.name, %error, "entity compile failed");
                        report.failures.push(EntityFailure {
                            entity: Some(entity.name),
                            error,
                        });
                    }
                },
            }
        }

        tracing::info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "compile run complete",
        );

        report
    }

    // ====================================================================
    // Convenience: compile and write to disk
    // ====================================================================

    /// Compile schema documents and write base + extension files to the
    /// configured output directory.
    ///
    /// Returns the compile report together with the write summary. Only
    /// successfully compiled entities produce files.
    pub fn compile_and_write<'a>(
        &self,
        sources: impl IntoIterator<Item = &'a str>,
        renderer: &dyn TemplateRenderer,
    ) -> CompileResult<(CompileReport, WriteSummary)> {
        let report = self.compile_all(sources);

        let mut files = Vec::new();
        for artifacts in &report.artifacts {
            files.extend(assembly::plan_entity_files(
                artifacts,
                renderer,
                &self.config.file_extension,
            )?);
        }

        let summary = assembly::write_files(&files, &self.config.out_dir, self.config.force)?;

        tracing::info!(
            out_dir = %self.config.out_dir.display(),
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            "files written to disk",
        );

        Ok((report, summary))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// Standalone convenience function
// ============================================================================

/// Compile one schema document using default configuration.
///
/// Shorthand for `Compiler::with_defaults().compile_source(json_text)`.
pub fn compile(json_text: &str) -> CompileResult<EntityArtifacts> {
    Compiler::with_defaults().compile_source(json_text)
}

// ============================================================================
// Tests
// ============================================================================
