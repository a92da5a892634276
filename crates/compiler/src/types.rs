//! Type strategy registry
//!
//! Maps a field's declared kind (plus array-ness, relationship-ness, and
//! polymorphism) to three parallel representations: the storage-column type,
//! the host-language type used by the generated object model, and the API
//! (GraphQL) type.
//!
//! Dispatch goes through a registry of named strategies keyed by
//! [`FieldKind`] — adding a new scalar kind means registering one strategy,
//! not editing every call site.

use crate::naming;
use entigen_core::{CompileError, CompileResult, FieldKind};
use entigen_schema::EntityField;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// ResolvedTypes
// ============================================================================

/// The three parallel type representations of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTypes {
    /// Storage column type (diffed against the live database schema by the
    /// external migration tooling)
    pub column_type: String,

    /// Host-language type of the generated object model
    pub host_type: String,

    /// API (GraphQL) type
    pub api_type: String,
}

impl ResolvedTypes {
    /// The representation shared by every identifier column: foreign keys,
    /// polymorphic id columns, and explicit key fields store a surrogate-key
    /// string, never the target entity type.
    pub fn identifier() -> Self {
        Self {
            column_type: "varchar".to_string(),
            host_type: "string".to_string(),
            api_type: "ID".to_string(),
        }
    }
}

// ============================================================================
// TypeStrategy
// ============================================================================

/// A registered strategy resolving the type trio for one field kind.
pub trait TypeStrategy: Send + Sync {
    /// Resolve the type representations for `field` of entity `entity_name`.
    fn resolve(&self, field: &EntityField, entity_name: &str) -> ResolvedTypes;
}

// ============================================================================
// Scalar strategy
// ============================================================================

/// Strategy for plain scalar kinds: one fixed type trio, with arrays
/// wrapping the host type in `T[]` and the API type in `[T]`.
///
/// Scalar arrays never serialize raw into the column — they always route
/// through the validated JSON representation, so the column type for any
/// scalar array is `simple-json`.
struct ScalarStrategy {
    column: &'static str,
    host: &'static str,
    api: &'static str,
}

impl TypeStrategy for ScalarStrategy {
    fn resolve(&self, field: &EntityField, _entity_name: &str) -> ResolvedTypes {
        if field.array {
            ResolvedTypes {
                column_type: "simple-json".to_string(),
                host_type: format!("{}[]", self.host),
                api_type: format!("[{}]", self.api),
            }
        } else {
            ResolvedTypes {
                column_type: self.column.to_string(),
                host_type: self.host.to_string(),
                api_type: self.api.to_string(),
            }
        }
    }
}

// ============================================================================
// Enum strategy
// ============================================================================

/// Strategy for enum fields: the host and API types are the derived enum
/// type name (`EntityName + PascalCase(singularized field name)`).
struct EnumStrategy;

impl TypeStrategy for EnumStrategy {
    fn resolve(&self, field: &EntityField, entity_name: &str) -> ResolvedTypes {
        let name = naming::enum_type_name(entity_name, &field.name);
        if field.array {
            ResolvedTypes {
                column_type: "simple-json".to_string(),
                host_type: format!("{name}[]"),
                api_type: format!("[{name}]"),
            }
        } else {
            ResolvedTypes {
                column_type: "varchar".to_string(),
                host_type: name.clone(),
                api_type: name,
            }
        }
    }
}

// ============================================================================
// Json strategy
// ============================================================================

/// Strategy for JSON-valued fields.
///
/// The API type distinguishes two JSON scalar kinds: `JSON` (any value) for
/// arrays, `JSONObject` (object only) for non-arrays — object-shaped JSON
/// must reject top-level arrays and primitives at the API boundary. Arrays
/// with a structural item schema resolve the host type to a named
/// element-interface array instead of `any[]`.
struct JsonStrategy;

impl TypeStrategy for JsonStrategy {
    fn resolve(&self, field: &EntityField, entity_name: &str) -> ResolvedTypes {
        if field.array {
            let host = if field.item_schema.is_some() {
                format!("{}[]", naming::interface_name(entity_name, &field.name))
            } else {
                "any[]".to_string()
            };
            ResolvedTypes {
                column_type: "simple-json".to_string(),
                host_type: host,
                api_type: "JSON".to_string(),
            }
        } else {
            ResolvedTypes {
                column_type: "simple-json".to_string(),
                host_type: "any".to_string(),
                api_type: "JSONObject".to_string(),
            }
        }
    }
}

// ============================================================================
// Identifier strategy
// ============================================================================

/// Strategy for kinds that always store a surrogate-key string: explicit
/// key columns, relation fields, and polymorphic id columns.
struct IdentifierStrategy;

impl TypeStrategy for IdentifierStrategy {
    fn resolve(&self, _field: &EntityField, _entity_name: &str) -> ResolvedTypes {
        ResolvedTypes::identifier()
    }
}

// ============================================================================
// TypeRegistry
// ============================================================================

/// Registry of type strategies, one per field kind.
pub struct TypeRegistry {
    strategies: HashMap<FieldKind, Box<dyn TypeStrategy>>,
}

impl TypeRegistry {
    /// Create an empty registry (no kinds resolvable).
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Create a registry with every built-in kind registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        registry.register(
            FieldKind::String,
            Box::new(ScalarStrategy {
                column: "varchar",
                host: "string",
                api: "String",
            }),
        );
        registry.register(
            FieldKind::Text,
            Box::new(ScalarStrategy {
                column: "text",
                host: "string",
                api: "String",
            }),
        );
        registry.register(
            FieldKind::Number,
            Box::new(ScalarStrategy {
                column: "numeric",
                host: "number",
                api: "Float",
            }),
        );
        registry.register(
            FieldKind::Boolean,
            Box::new(ScalarStrategy {
                column: "boolean",
                host: "boolean",
                api: "Boolean",
            }),
        );
        registry.register(
            FieldKind::Date,
            Box::new(ScalarStrategy {
                column: "datetime",
                host: "Date",
                api: "DateTime",
            }),
        );
        registry.register(
            FieldKind::Uuid,
            Box::new(ScalarStrategy {
                column: "uuid",
                host: "string",
                api: "ID",
            }),
        );
        registry.register(FieldKind::Enum, Box::new(EnumStrategy));
        registry.register(FieldKind::Json, Box::new(JsonStrategy));
        registry.register(FieldKind::Key, Box::new(IdentifierStrategy));
        registry.register(FieldKind::Relation, Box::new(IdentifierStrategy));
        registry.register(FieldKind::Polymorphic, Box::new(IdentifierStrategy));

        registry
    }

    /// Register (or replace) the strategy for a kind.
    pub fn register(&mut self, kind: FieldKind, strategy: Box<dyn TypeStrategy>) {
        self.strategies.insert(kind, strategy);
    }

    /// Whether a strategy is registered for the kind.
    pub fn has(&self, kind: FieldKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Resolve the type trio for a field.
    ///
    /// Relationship-bearing and polymorphic fields short-circuit to the
    /// identifier representation: their storage and host types are always a
    /// surrogate-key string, never the target entity type.
    ///
    /// # Errors
    ///
    /// Fails when the field has no declared kind or no strategy is
    /// registered for its kind. This is always fatal — no type, no output.
    pub fn resolve(&self, field: &EntityField, entity_name: &str) -> CompileResult<ResolvedTypes> {
        if field.is_relationship() || field.is_polymorphic() {
            return Ok(ResolvedTypes::identifier());
        }

        let kind = field.kind.ok_or_else(|| CompileError::NoTypeStrategy {
            entity: entity_name.to_string(),
            field: field.name.clone(),
            kind: "<undeclared>".to_string(),
        })?;

        let strategy = self
            .strategies
            .get(&kind)
            .ok_or_else(|| CompileError::NoTypeStrategy {
                entity: entity_name.to_string(),
                field: field.name.clone(),
                kind: kind.as_str().to_string(),
            })?;

        Ok(strategy.resolve(field, entity_name))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&FieldKind> = self.strategies.keys().collect();
        kinds.sort_by_key(|k| k.as_str());
        f.debug_struct("TypeRegistry").field("kinds", &kinds).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use entigen_core::RelationKind;
    use entigen_schema::{ItemSchema, RelationshipSpec};
    use pretty_assertions::assert_eq;

    fn resolve(field: &EntityField) -> ResolvedTypes {
        TypeRegistry::with_defaults().resolve(field, "Post").unwrap()
    }

    #[test]
    fn test_scalar_types() {
        let types = resolve(&EntityField::new("title", FieldKind::String));
        assert_eq!(types.column_type, "varchar");
        assert_eq!(types.host_type, "string");
        assert_eq!(types.api_type, "String");

        let types = resolve(&EntityField::new("body", FieldKind::Text));
        assert_eq!(types.column_type, "text");
        assert_eq!(types.host_type, "string");

        let types = resolve(&EntityField::new("score", FieldKind::Number));
        assert_eq!(types.column_type, "numeric");
        assert_eq!(types.host_type, "number");
        assert_eq!(types.api_type, "Float");

        let types = resolve(&EntityField::new("publishedAt", FieldKind::Date));
        assert_eq!(types.host_type, "Date");
        assert_eq!(types.api_type, "DateTime");
    }

    #[test]
    fn test_scalar_array_types() {
        // Array host types always end in [] and api types are list wrappers.
        let types = resolve(&EntityField::new("tags", FieldKind::String).array());
        assert_eq!(types.column_type, "simple-json");
        assert_eq!(types.host_type, "string[]");
        assert_eq!(types.api_type, "[String]");

        let types = resolve(&EntityField::new("scores", FieldKind::Number).array());
        assert_eq!(types.host_type, "number[]");
        assert_eq!(types.api_type, "[Float]");
    }

    #[test]
    fn test_enum_types() {
        let field = EntityField::new("status", FieldKind::Enum).with_enum_values(["a", "b"]);
        let types = TypeRegistry::with_defaults().resolve(&field, "Task").unwrap();
        assert_eq!(types.column_type, "varchar");
        assert_eq!(types.host_type, "TaskStatus");
        assert_eq!(types.api_type, "TaskStatus");
    }

    #[test]
    fn test_enum_array_types() {
        let field = EntityField::new("categories", FieldKind::Enum)
            .array()
            .with_enum_values(["a", "b"]);
        let types = TypeRegistry::with_defaults().resolve(&field, "Post").unwrap();
        assert_eq!(types.column_type, "simple-json");
        assert_eq!(types.host_type, "PostCategory[]");
        assert_eq!(types.api_type, "[PostCategory]");
    }

    #[test]
    fn test_json_object_types() {
        // Object-shaped JSON rejects top-level arrays/primitives at the API
        // boundary, hence the JSONObject scalar.
        let types = resolve(&EntityField::new("settings", FieldKind::Json));
        assert_eq!(types.column_type, "simple-json");
        assert_eq!(types.host_type, "any");
        assert_eq!(types.api_type, "JSONObject");
    }

    #[test]
    fn test_json_array_types() {
        let plain = resolve(&EntityField::new("blobs", FieldKind::Json).array());
        assert_eq!(plain.host_type, "any[]");
        assert_eq!(plain.api_type, "JSON");

        let structured = resolve(
            &EntityField::new("attachments", FieldKind::Json)
                .array()
                .with_item_schema(ItemSchema::object().with_property("url", ItemSchema::string())),
        );
        assert_eq!(structured.host_type, "PostAttachmentItem[]");
        assert_eq!(structured.api_type, "JSON");
    }

    #[test]
    fn test_relationship_resolves_to_identifier() {
        let field = EntityField::new("postId", FieldKind::String)
            .with_relationship(RelationshipSpec::new("Post", RelationKind::ManyToOne));
        let types = TypeRegistry::with_defaults()
            .resolve(&field, "Comment")
            .unwrap();

        // Never the target entity type — always a surrogate-key string.
        assert_eq!(types.column_type, "varchar");
        assert_eq!(types.host_type, "string");
        assert_eq!(types.api_type, "ID");
    }

    #[test]
    fn test_polymorphic_resolves_to_identifier() {
        let field = EntityField::new("subject", FieldKind::Polymorphic);
        let types = resolve(&field);
        assert_eq!(types, ResolvedTypes::identifier());
    }

    #[test]
    fn test_missing_strategy_is_fatal() {
        let registry = TypeRegistry::empty();
        let field = EntityField::new("title", FieldKind::String);
        let err = registry.resolve(&field, "Post").unwrap_err();
        assert!(err.is_strategy());
    }

    #[test]
    fn test_undeclared_kind_is_fatal() {
        let registry = TypeRegistry::with_defaults();
        let field = EntityField::untyped("mystery");
        assert!(registry.resolve(&field, "Post").is_err());
    }

    #[test]
    fn test_custom_strategy_registration() {
        struct BytesStrategy;
        impl TypeStrategy for BytesStrategy {
            fn resolve(&self, _field: &EntityField, _entity: &str) -> ResolvedTypes {
                ResolvedTypes {
                    column_type: "blob".to_string(),
                    host_type: "Uint8Array".to_string(),
                    api_type: "String".to_string(),
                }
            }
        }

        // Replacing a strategy never touches the other handlers.
        let mut registry = TypeRegistry::with_defaults();
        registry.register(FieldKind::Text, Box::new(BytesStrategy));

        let field = EntityField::new("raw", FieldKind::Text);
        let types = registry.resolve(&field, "Post").unwrap();
        assert_eq!(types.column_type, "blob");

        let other = EntityField::new("title", FieldKind::String);
        assert_eq!(registry.resolve(&other, "Post").unwrap().column_type, "varchar");
    }
}
