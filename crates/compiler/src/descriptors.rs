//! Render-ready descriptors
//!
//! The resolved, render-ready representations handed to the template layer:
//! columns, relations, enums, nested interfaces, and the per-entity bundle
//! that groups them. Nothing here is mutated after the resolve phase.

use crate::exposure::ExposureSet;
use crate::validation::{Constraint, SchemaNode};
use entigen_core::{EntityOp, ReferentialAction, RelationKind};
use serde::Serialize;
use std::collections::BTreeSet;

// ============================================================================
// ColumnDescriptor
// ============================================================================

/// The resolved representation of one storage column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name (unique within the entity)
    pub name: String,

    /// Storage column type
    pub column_type: String,

    /// Host-language type in the generated object model
    pub host_type: String,

    /// API (GraphQL) type
    pub api_type: String,

    /// Whether the column is NOT NULL
    pub required: bool,

    /// Whether the column value must be unique
    pub unique: bool,

    /// Default value, carried verbatim from the schema document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Validation constraints
    pub constraints: Vec<Constraint>,

    /// API artifacts generated for this column
    pub exposure: ExposureSet,

    /// Validated structural representation (scalar arrays and structured
    /// JSON fields only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

// ============================================================================
// HostReturn
// ============================================================================

/// The host-language return type of a relation field.
///
/// Eager relations resolve directly to the target type; lazy relations wrap
/// the same shape in a deferred handle resolved on demand by the runtime
/// loading proxy. The proxy must honor exactly this partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "load", content = "target", rename_all = "lowercase")]
pub enum HostReturn {
    /// Loaded synchronously with the owning row
    Direct(String),
    /// Resolved on demand through a deferred handle
    Deferred(String),
}

impl HostReturn {
    /// Whether resolution is deferred to the runtime loader.
    pub fn is_deferred(&self) -> bool {
        matches!(self, HostReturn::Deferred(_))
    }

    /// The target type shape (e.g. `"Post"` or `"Post[]"`).
    pub fn target(&self) -> &str {
        match self {
            HostReturn::Direct(t) | HostReturn::Deferred(t) => t,
        }
    }

    /// Render the host-language type text.
    pub fn render(&self) -> String {
        match self {
            HostReturn::Direct(t) => t.clone(),
            HostReturn::Deferred(t) => format!("Deferred<{t}>"),
        }
    }
}

// ============================================================================
// RelationOptions
// ============================================================================

/// The relation-options bag. Only present options are emitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelationOptions {
    /// Present (and `true`) only for eagerly loaded relations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eager: Option<bool>,

    /// Cascade operations, order preserved from input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade: Option<Vec<String>>,

    /// Referential action on delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,

    /// Referential action on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
}

impl RelationOptions {
    /// Whether no options are present.
    pub fn is_empty(&self) -> bool {
        self.eager.is_none()
            && self.cascade.is_none()
            && self.on_delete.is_none()
            && self.on_update.is_none()
    }
}

// ============================================================================
// RelationDescriptor
// ============================================================================

/// The resolved representation of one relation field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationDescriptor {
    /// Owning field name
    pub field_name: String,

    /// Target entity name
    pub target_entity: String,

    /// Relation kind
    pub kind: RelationKind,

    /// Whether a relation field is emitted on the API object type
    pub api_field: bool,

    /// Relation options (only present options are emitted)
    pub options: RelationOptions,

    /// Join-column name (ManyToOne / OneToOne only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_column: Option<String>,

    /// Host-language return type
    pub host_return: HostReturn,

    /// Whether the relation value may be absent
    pub optional: bool,

    /// Structural validation recurses into the related shape when loaded
    pub validate_nested: bool,
}

// ============================================================================
// EnumDescriptor
// ============================================================================

/// The resolved representation of one enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDescriptor {
    /// Derived type name (`EntityName + PascalCase(singular field name)`)
    pub name: String,

    /// Member values, in declaration order
    pub values: Vec<String>,

    /// Whether the owning field holds an array of members
    pub array: bool,
}

// ============================================================================
// NestedInterface
// ============================================================================

/// A rendered element-interface definition for a structured JSON field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedInterface {
    /// Interface name
    pub name: String,

    /// Rendered definition text
    pub definition_text: String,
}

// ============================================================================
// EntityArtifacts
// ============================================================================

/// The full render-ready tree for one compiled entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityArtifacts {
    /// Entity name
    pub entity: String,

    /// Generated API operations
    pub operations: BTreeSet<EntityOp>,

    /// Column descriptors, ordered by owning field name
    pub columns: Vec<ColumnDescriptor>,

    /// Relation descriptors, ordered by owning field name
    pub relations: Vec<RelationDescriptor>,

    /// Enum descriptors
    pub enums: Vec<EnumDescriptor>,

    /// Nested element interfaces
    pub nested_interfaces: Vec<NestedInterface>,
}

impl EntityArtifacts {
    /// Create an empty artifact bundle for an entity.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            operations: BTreeSet::new(),
            columns: Vec::new(),
            relations: Vec::new(),
            enums: Vec::new(),
            nested_interfaces: Vec::new(),
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a relation by owning field name.
    pub fn relation(&self, field_name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.field_name == field_name)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_host_return_render() {
        let direct = HostReturn::Direct("Post".to_string());
        assert_eq!(direct.render(), "Post");
        assert!(!direct.is_deferred());

        let deferred = HostReturn::Deferred("Post[]".to_string());
        assert_eq!(deferred.render(), "Deferred<Post[]>");
        assert!(deferred.is_deferred());
        assert_eq!(deferred.target(), "Post[]");
    }

    #[test]
    fn test_relation_options_empty() {
        assert!(RelationOptions::default().is_empty());

        let options = RelationOptions {
            eager: Some(true),
            ..Default::default()
        };
        assert!(!options.is_empty());
    }

    #[test]
    fn test_relation_options_serializes_only_present() {
        let options = RelationOptions {
            cascade: Some(vec!["insert".to_string()]),
            on_delete: Some(ReferentialAction::Cascade),
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("cascade"));
        assert!(object.contains_key("on_delete"));
        assert!(!object.contains_key("eager"));
    }

    #[test]
    fn test_entity_artifacts_lookup() {
        let mut artifacts = EntityArtifacts::new("Post");
        artifacts.columns.push(ColumnDescriptor {
            name: "title".to_string(),
            column_type: "varchar".to_string(),
            host_type: "string".to_string(),
            api_type: "String".to_string(),
            required: true,
            unique: false,
            default_value: None,
            description: None,
            constraints: vec![],
            exposure: ExposureSet::object_inputs(),
            schema: None,
        });

        assert!(artifacts.column("title").is_some());
        assert!(artifacts.column("missing").is_none());
        assert_eq!(artifacts.column_count(), 1);
    }
}
