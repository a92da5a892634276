//! Field preparator registry
//!
//! Decides, for each field, how many and what kind of storage columns to
//! emit. Dispatch precedence:
//!
//! 1. polymorphic field → two columns (`<field>Id` + `<field>Type`)
//! 2. ManyToOne/OneToOne relation with foreign-key exposure → one FK column
//! 3. any other relation → no column (materialized only as a relation)
//! 4. declared scalar/enum/json kind → one column via the per-kind strategy
//! 5. neither kind nor relation → dropped (schema noise, not an error)
//!
//! A strategy failure on a known kind degrades to a generic scalar column
//! with a logged warning unless strict mode is on, so one malformed field
//! does not block generation of the rest of the entity.

use crate::descriptors::ColumnDescriptor;
use crate::exposure::{ExposureSet, field_exposure};
use crate::types::{ResolvedTypes, TypeRegistry};
use crate::validation::{constraints_for, nested_schema_for, scalar_array_schema};
use entigen_core::{ApiArtifact, CompileError, CompileResult, FieldKind};
use entigen_schema::{EntityField, ParsedEntity, RelationshipSpec};
use std::collections::HashMap;

// ============================================================================
// ColumnStrategy
// ============================================================================

/// A registered strategy building the column descriptor for one declared
/// field kind.
pub trait ColumnStrategy: Send + Sync {
    /// Build the descriptor for `field` of `entity`.
    fn prepare(
        &self,
        entity: &ParsedEntity,
        field: &EntityField,
        types: &TypeRegistry,
    ) -> CompileResult<ColumnDescriptor>;
}

/// Shared descriptor assembly used by the kind strategies.
fn descriptor(
    field: &EntityField,
    types: ResolvedTypes,
    schema: Option<crate::validation::SchemaNode>,
) -> ColumnDescriptor {
    ColumnDescriptor {
        name: field.name.clone(),
        column_type: types.column_type,
        host_type: types.host_type,
        api_type: types.api_type,
        required: field.required,
        unique: field.unique,
        default_value: field.default_value.clone(),
        description: field.description.clone(),
        constraints: constraints_for(field),
        exposure: field_exposure(field),
        schema,
    }
}

/// Strategy for plain scalar kinds. Scalar arrays attach the validated
/// array schema so collections never serialize raw into storage.
struct ScalarColumn;

impl ColumnStrategy for ScalarColumn {
    fn prepare(
        &self,
        entity: &ParsedEntity,
        field: &EntityField,
        types: &TypeRegistry,
    ) -> CompileResult<ColumnDescriptor> {
        let resolved = types.resolve(field, &entity.name)?;
        Ok(descriptor(field, resolved, scalar_array_schema(field)))
    }
}

/// Strategy for enum fields: a discriminated constant set stored as a
/// varchar column (or validated JSON for arrays).
struct EnumColumn;

impl ColumnStrategy for EnumColumn {
    fn prepare(
        &self,
        entity: &ParsedEntity,
        field: &EntityField,
        types: &TypeRegistry,
    ) -> CompileResult<ColumnDescriptor> {
        if field.enum_values.as_ref().is_none_or(|v| v.is_empty()) {
            return Err(CompileError::field_schema(
                &entity.name,
                &field.name,
                "enum field requires a non-empty value set",
            ));
        }
        let resolved = types.resolve(field, &entity.name)?;
        Ok(descriptor(field, resolved, None))
    }
}

/// Strategy for JSON fields: a validated nested blob. Structured arrays
/// attach the recursively generated array schema.
struct JsonColumn;

impl ColumnStrategy for JsonColumn {
    fn prepare(
        &self,
        entity: &ParsedEntity,
        field: &EntityField,
        types: &TypeRegistry,
    ) -> CompileResult<ColumnDescriptor> {
        let resolved = types.resolve(field, &entity.name)?;
        let schema = field
            .item_schema
            .as_ref()
            .filter(|_| field.array)
            .map(|item| nested_schema_for(&entity.name, &field.name, item).array_schema);
        Ok(descriptor(field, resolved, schema))
    }
}

// ============================================================================
// PreparatorRegistry
// ============================================================================

/// Registry of field preparators with the documented dispatch precedence.
pub struct PreparatorRegistry {
    types: TypeRegistry,
    strategies: HashMap<FieldKind, Box<dyn ColumnStrategy>>,
    strict: bool,
}

impl PreparatorRegistry {
    /// Create a registry with every built-in kind registered.
    ///
    /// `strict` controls the degradation policy: when off (the default
    /// behavior), a strategy failure on a known kind degrades to a generic
    /// scalar column with a warning; when on, it fails the entity.
    pub fn new(strict: bool) -> Self {
        let mut strategies: HashMap<FieldKind, Box<dyn ColumnStrategy>> = HashMap::new();
        for kind in FieldKind::all() {
            if kind.is_scalar() {
                strategies.insert(*kind, Box::new(ScalarColumn));
            }
        }
        strategies.insert(FieldKind::Enum, Box::new(EnumColumn));
        strategies.insert(FieldKind::Json, Box::new(JsonColumn));

        Self {
            types: TypeRegistry::with_defaults(),
            strategies,
            strict,
        }
    }

    /// Register (or replace) the column strategy for a kind.
    pub fn register(&mut self, kind: FieldKind, strategy: Box<dyn ColumnStrategy>) {
        self.strategies.insert(kind, strategy);
    }

    /// Access the underlying type registry.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Prepare the storage columns for one field: zero, one, or two
    /// descriptors depending on the field's shape.
    pub fn prepare_field(
        &self,
        entity: &ParsedEntity,
        field: &EntityField,
    ) -> CompileResult<Vec<ColumnDescriptor>> {
        // 1. Polymorphic fields always expand to an (id, type) column pair.
        if field.is_polymorphic() {
            return Ok(self.polymorphic_columns(field));
        }

        // 2–3. Relationship fields synthesize at most one FK column.
        if let Some(rel) = &field.relationship {
            let exposure = field_exposure(field);
            if rel.owns_join_column() && exposure.contains(ApiArtifact::ForeignKey) {
                return Ok(vec![self.foreign_key_column(field, rel, exposure)]);
            }
            // OneToMany/ManyToMany, or FK generation disabled: the
            // relationship is materialized only as a relation descriptor.
            return Ok(vec![]);
        }

        // 5. Neither a kind nor a relationship: schema noise, dropped.
        let Some(kind) = field.kind else {
            return Ok(vec![]);
        };

        // 4. Declared kind via the registered strategy.
        match self.strategies.get(&kind) {
            Some(strategy) => match strategy.prepare(entity, field, &self.types) {
                Ok(column) => Ok(vec![column]),
                Err(error) => self.degrade_or_fail(entity, field, error),
            },
            None => self.degrade_or_fail(
                entity,
                field,
                CompileError::NoColumnStrategy {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                    kind: kind.as_str().to_string(),
                },
            ),
        }
    }

    // ====================================================================
    // Multi-column expansions
    // ====================================================================

    /// The (id, type) column pair for a polymorphic field. Both columns
    /// carry the field's `required` flag; exposure is computed
    /// independently per sub-column.
    fn polymorphic_columns(&self, field: &EntityField) -> Vec<ColumnDescriptor> {
        let id_types = ResolvedTypes::identifier();
        let id_column = ColumnDescriptor {
            name: format!("{}Id", field.name),
            column_type: id_types.column_type,
            host_type: id_types.host_type,
            api_type: id_types.api_type,
            required: field.required,
            unique: field.unique,
            default_value: None,
            description: field.description.clone(),
            constraints: constraints_for(field),
            exposure: field_exposure(field),
            schema: None,
        };

        let type_column = ColumnDescriptor {
            name: format!("{}Type", field.name),
            column_type: "varchar".to_string(),
            host_type: "string".to_string(),
            api_type: "String".to_string(),
            required: field.required,
            unique: false,
            default_value: None,
            description: field.description.clone(),
            constraints: constraints_for(field),
            exposure: field_exposure(field),
            schema: None,
        };

        vec![id_column, type_column]
    }

    /// The synthesized foreign-key column for a ManyToOne/OneToOne relation.
    fn foreign_key_column(
        &self,
        field: &EntityField,
        rel: &RelationshipSpec,
        exposure: ExposureSet,
    ) -> ColumnDescriptor {
        let types = ResolvedTypes::identifier();
        ColumnDescriptor {
            name: rel.foreign_key_name(&field.name),
            column_type: types.column_type,
            host_type: types.host_type,
            api_type: types.api_type,
            required: field.required,
            unique: field.unique,
            default_value: field.default_value.clone(),
            description: field.description.clone(),
            constraints: constraints_for(field),
            exposure,
            schema: None,
        }
    }

    // ====================================================================
    // Degradation policy
    // ====================================================================

    /// Best-effort handling of a failed known kind: warn and fall back to a
    /// generic scalar column, or surface the error in strict mode.
    fn degrade_or_fail(
        &self,
        entity: &ParsedEntity,
        field: &EntityField,
        error: CompileError,
    ) -> CompileResult<Vec<ColumnDescriptor>> {
        if self.strict {
            return Err(error);
        }

        tracing::warn!(
            entity = %entity.name,
            field = %field.name,
            error = %error,
            "field preparation failed; degrading to a generic scalar column",
        );

        let types = ResolvedTypes {
            column_type: "varchar".to_string(),
            host_type: "string".to_string(),
            api_type: "String".to_string(),
        };
        Ok(vec![descriptor(field, types, None)])
    }
}

impl std::fmt::Debug for PreparatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparatorRegistry")
            .field("types", &self.types)
            .field("strict", &self.strict)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
