//! Field definitions for entity schemas
//!
//! This module contains the `EntityField` struct — the normalized form of one
//! declared field — and the per-field GraphQL exposure policy.

use crate::item_schema::ItemSchema;
use crate::relationship::RelationshipSpec;
use entigen_core::{ApiArtifact, FieldKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// GraphqlFieldPolicy
// ============================================================================

/// Per-field GraphQL exposure override.
///
/// - `Default` — no override present; the default exposure policy applies.
/// - `Enabled` — explicit `graphql: true`; same as the default policy.
/// - `Disabled` — explicit `graphql: false`; the field never appears in any
///   generated API artifact.
/// - `Only(…)` — explicit artifact list; exactly that set is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphqlFieldPolicy {
    /// No override declared
    #[default]
    Default,
    /// Explicitly enabled (`graphql: true`)
    Enabled,
    /// Explicitly disabled (`graphql: false`)
    Disabled,
    /// Explicit artifact list
    Only(Vec<ApiArtifact>),
}

impl GraphqlFieldPolicy {
    /// Whether the field is fully hidden from the API layer.
    pub fn is_disabled(&self) -> bool {
        matches!(self, GraphqlFieldPolicy::Disabled)
    }
}

// ============================================================================
// EntityField
// ============================================================================

/// One declared field of an entity schema.
///
/// `kind` is `None` when the schema document declared no (or an unknown)
/// type; such a field is schema noise unless it carries a relationship, and
/// is silently dropped by the field preparators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityField {
    /// Field name (unique within the entity; names derived artifacts)
    pub name: String,

    /// Declared field kind
    pub kind: Option<FieldKind>,

    /// Whether the field holds an array of values
    pub array: bool,

    /// Whether the field is required (NOT NULL)
    pub required: bool,

    /// Whether the field value must be unique
    pub unique: bool,

    /// Human-readable description
    pub description: Option<String>,

    /// Default value, carried verbatim into the column descriptor
    pub default_value: Option<serde_json::Value>,

    /// Minimum string length, or array length for array fields
    pub min_length: Option<u32>,

    /// Maximum string length, or array length for array fields
    pub max_length: Option<u32>,

    /// Regex pattern constraint
    pub pattern: Option<String>,

    /// Per-item minimum value (scalar number arrays)
    pub item_min: Option<f64>,

    /// Per-item maximum value (scalar number arrays)
    pub item_max: Option<f64>,

    /// Per-item minimum string length (scalar string arrays)
    pub item_min_length: Option<u32>,

    /// Per-item maximum string length (scalar string arrays)
    pub item_max_length: Option<u32>,

    /// Enum values (kind = enum only)
    pub enum_values: Option<Vec<String>>,

    /// Structural element schema (kind = json, array = true only)
    pub item_schema: Option<ItemSchema>,

    /// Relationship metadata, present iff the field models an association
    pub relationship: Option<RelationshipSpec>,

    /// GraphQL exposure override
    pub graphql: GraphqlFieldPolicy,
}

impl EntityField {
    /// Create a new field with the given name and kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            array: false,
            required: false,
            unique: false,
            description: None,
            default_value: None,
            min_length: None,
            max_length: None,
            pattern: None,
            item_min: None,
            item_max: None,
            item_min_length: None,
            item_max_length: None,
            enum_values: None,
            item_schema: None,
            relationship: None,
            graphql: GraphqlFieldPolicy::Default,
        }
    }

    /// Create a field with no declared kind (schema noise unless it carries
    /// a relationship).
    pub fn untyped(name: impl Into<String>) -> Self {
        let mut field = Self::new(name, FieldKind::String);
        field.kind = None;
        field
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Mark the field as an array.
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a default value.
    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set string (or array) length bounds.
    pub fn with_length(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Set a regex pattern constraint.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the enum value set.
    pub fn with_enum_values(
        mut self,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the structural element schema.
    pub fn with_item_schema(mut self, schema: ItemSchema) -> Self {
        self.item_schema = Some(schema);
        self
    }

    /// Attach relationship metadata.
    pub fn with_relationship(mut self, relationship: RelationshipSpec) -> Self {
        self.relationship = Some(relationship);
        self
    }

    /// Set the GraphQL exposure override.
    pub fn with_graphql(mut self, policy: GraphqlFieldPolicy) -> Self {
        self.graphql = policy;
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Whether this field models an association.
    pub fn is_relationship(&self) -> bool {
        self.relationship.is_some()
    }

    /// Whether this field is polymorphic (id + type column pair).
    pub fn is_polymorphic(&self) -> bool {
        self.kind == Some(FieldKind::Polymorphic)
    }

    /// Whether the field declared a usable kind.
    pub fn has_declared_kind(&self) -> bool {
        self.kind.is_some()
    }

    /// Whether this field is a structured JSON array (json kind, array,
    /// with an element schema).
    pub fn is_structured_json(&self) -> bool {
        self.kind == Some(FieldKind::Json) && self.array && self.item_schema.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
