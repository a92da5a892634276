//! Entity definitions
//!
//! This module contains `ParsedEntity` — the normalized in-memory form of one
//! JSON entity schema — and the entity-level GraphQL operation policy.

use crate::field::EntityField;
use entigen_core::{CompileError, CompileResult, EntityOp, FieldKind, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// GraphqlEntityPolicy
// ============================================================================

/// Entity-level GraphQL policy.
///
/// Gates whole generated operations (CRUD mutations and queries); orthogonal
/// to per-field exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphqlEntityPolicy {
    /// No policy declared; all operations are generated
    #[default]
    Default,
    /// Explicitly enabled (`graphql: true`); all operations are generated
    Enabled,
    /// Explicitly disabled (`graphql: false`); no operations are generated
    Disabled,
    /// Explicit operation list
    Ops(Vec<EntityOp>),
}

impl GraphqlEntityPolicy {
    /// Resolve the policy into a concrete operation set.
    pub fn operations(&self) -> BTreeSet<EntityOp> {
        match self {
            GraphqlEntityPolicy::Default | GraphqlEntityPolicy::Enabled => {
                EntityOp::all().iter().copied().collect()
            }
            GraphqlEntityPolicy::Disabled => BTreeSet::new(),
            GraphqlEntityPolicy::Ops(ops) => ops.iter().copied().collect(),
        }
    }
}

// ============================================================================
// ParsedEntity
// ============================================================================

/// The normalized in-memory form of one JSON entity schema.
///
/// Field order in `fields` is insignificant; consumers call
/// [`sorted_fields`](ParsedEntity::sorted_fields) to get the deterministic
/// (alphabetical) order used for descriptor emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntity {
    /// Entity name (PascalCase identifier)
    pub name: String,

    /// Declared fields
    pub fields: Vec<EntityField>,

    /// Entity-level GraphQL operation policy
    pub graphql: GraphqlEntityPolicy,
}

impl ParsedEntity {
    /// Create a new entity with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            graphql: GraphqlEntityPolicy::Default,
        }
    }

    /// Add a field (builder style).
    pub fn with_field(mut self, field: EntityField) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the entity-level GraphQL policy (builder style).
    pub fn with_graphql(mut self, policy: GraphqlEntityPolicy) -> Self {
        self.graphql = policy;
        self
    }

    /// Add a field.
    pub fn add_field(&mut self, field: EntityField) {
        self.fields.push(field);
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&EntityField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Fields sorted alphabetically by name.
    ///
    /// Descriptor emission always walks fields in this order so that
    /// compiling the same schema text twice yields byte-identical output.
    pub fn sorted_fields(&self) -> Vec<&EntityField> {
        let mut fields: Vec<&EntityField> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }
}

impl Validatable for ParsedEntity {
    fn validate(&self) -> CompileResult<()> {
        // Entity name must be a PascalCase identifier
        if self.name.is_empty() {
            return Err(CompileError::schema("entity name cannot be empty"));
        }
        let mut chars = self.name.chars();
        let first = chars.next().unwrap();
        if !first.is_ascii_uppercase() || !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(CompileError::entity_schema(
                &self.name,
                "entity name must be a PascalCase identifier",
            ));
        }

        // Field names must be unique
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CompileError::entity_schema(
                    &self.name,
                    format!("duplicate field '{}'", field.name),
                ));
            }
        }

        // Per-field payload consistency
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(CompileError::entity_schema(
                    &self.name,
                    "field name cannot be empty",
                ));
            }

            // An enum field with a missing value set is deliberately NOT
            // rejected here: that is a known-but-malformed kind the field
            // preparators handle best-effort, so one bad field cannot abort
            // the whole entity.
            match field.kind {
                Some(FieldKind::Relation) => {
                    if field.relationship.is_none() {
                        return Err(CompileError::field_schema(
                            &self.name,
                            &field.name,
                            "relation field requires a relation block",
                        ));
                    }
                }
                Some(FieldKind::Polymorphic) => {
                    // Polymorphic and relationship expansion are mutually
                    // exclusive; exactly one drives the multi-column split.
                    if field.relationship.is_some() {
                        return Err(CompileError::field_schema(
                            &self.name,
                            &field.name,
                            "polymorphic field cannot also carry a relation block",
                        ));
                    }
                }
                _ => {}
            }

            if field.enum_values.is_some() && field.kind != Some(FieldKind::Enum) {
                return Err(CompileError::field_schema(
                    &self.name,
                    &field.name,
                    "enum values are only valid on enum fields",
                ));
            }

            if field.item_schema.is_some()
                && !(field.kind == Some(FieldKind::Json) && field.array)
            {
                return Err(CompileError::field_schema(
                    &self.name,
                    &field.name,
                    "item schemas are only valid on json array fields",
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
