//! Schema parser
//!
//! Turns a raw JSON entity schema document into a normalized [`ParsedEntity`].
//!
//! The raw document shape is:
//!
//! ```json
//! {
//!   "name": "Comment",
//!   "graphql": ["create", "list", "single"],
//!   "fields": {
//!     "body":   { "type": "text", "required": true },
//!     "postId": {
//!       "type": "string", "required": true,
//!       "relation": { "entity": "Post", "type": "many-to-one" }
//!     }
//!   }
//! }
//! ```
//!
//! Parsing normalizes relation-kind aliases (`"many-to-one"` → `ManyToOne`),
//! referential-action spellings, and the `graphql` flag shapes. Unknown
//! exposure flags and unknown field kinds are warned about and dropped;
//! malformed JSON, a missing `name`, and unknown relation kinds are errors.

use crate::entity::{GraphqlEntityPolicy, ParsedEntity};
use crate::field::{EntityField, GraphqlFieldPolicy};
use crate::item_schema::ItemSchema;
use crate::relationship::RelationshipSpec;
use entigen_core::{
    ApiArtifact, CompileError, CompileResult, EntityOp, FieldKind, ReferentialAction, RelationKind,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Raw document shapes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntity {
    name: Option<String>,
    #[serde(default)]
    fields: BTreeMap<String, RawField>,
    #[serde(default)]
    graphql: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawField {
    #[serde(rename = "type")]
    kind: Option<String>,
    array: bool,
    required: bool,
    unique: bool,
    description: Option<String>,
    #[serde(rename = "default")]
    default_value: Option<Value>,
    min_length: Option<u32>,
    max_length: Option<u32>,
    pattern: Option<String>,
    item_min: Option<f64>,
    item_max: Option<f64>,
    item_min_length: Option<u32>,
    item_max_length: Option<u32>,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<String>>,
    item_schema: Option<ItemSchema>,
    #[serde(alias = "relationship")]
    relation: Option<RawRelation>,
    graphql: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawRelation {
    #[serde(alias = "targetEntity")]
    entity: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    cascade: Vec<String>,
    on_delete: Option<String>,
    on_update: Option<String>,
    eager: bool,
    join_column: Option<String>,
    key: Option<String>,
}

// ============================================================================
// Parse entry point
// ============================================================================

/// Parse one JSON entity schema document into a [`ParsedEntity`].
///
/// # Errors
///
/// Fails with a schema error on malformed JSON, a missing `name`, a relation
/// block without a target entity, or a relation kind that is not one of the
/// four known kinds.
pub fn parse(json_text: &str) -> CompileResult<ParsedEntity> {
    let raw: RawEntity = serde_json::from_str(json_text)?;

    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CompileError::schema("schema is missing required key 'name'"))?;

    let mut entity = ParsedEntity::new(&name);
    entity.graphql = parse_entity_policy(&name, raw.graphql.as_ref());

    for (field_name, raw_field) in &raw.fields {
        entity.add_field(parse_field(&name, field_name, raw_field)?);
    }

    Ok(entity)
}

/// Parse several schema documents, one entity each.
///
/// A failing document does not stop its siblings; each result is returned
/// independently in input order.
pub fn parse_all<'a>(
    documents: impl IntoIterator<Item = &'a str>,
) -> Vec<CompileResult<ParsedEntity>> {
    documents.into_iter().map(parse).collect()
}

// ============================================================================
// Field parsing
// ============================================================================

fn parse_field(entity: &str, name: &str, raw: &RawField) -> CompileResult<EntityField> {
    let kind = match raw.kind.as_deref() {
        None => None,
        Some(spelling) => match FieldKind::parse(spelling) {
            Some(kind) => Some(kind),
            None => {
                tracing::warn!(
                    entity,
                    field = name,
                    kind = spelling,
                    "unknown field kind; field will be dropped unless it carries a relation",
                );
                None
            }
        },
    };

    let mut field = EntityField::untyped(name);
    field.kind = kind;
    field.array = raw.array;
    field.required = raw.required;
    field.unique = raw.unique;
    field.description = raw.description.clone();
    field.default_value = raw.default_value.clone();
    field.min_length = raw.min_length;
    field.max_length = raw.max_length;
    field.pattern = raw.pattern.clone();
    field.item_min = raw.item_min;
    field.item_max = raw.item_max;
    field.item_min_length = raw.item_min_length;
    field.item_max_length = raw.item_max_length;
    field.enum_values = raw.enum_values.clone();
    field.item_schema = raw.item_schema.clone();
    field.graphql = parse_field_policy(entity, name, raw.graphql.as_ref());

    if let Some(raw_rel) = &raw.relation {
        field.relationship = Some(parse_relation(entity, name, raw_rel)?);
    }

    Ok(field)
}

fn parse_relation(
    entity: &str,
    field: &str,
    raw: &RawRelation,
) -> CompileResult<RelationshipSpec> {
    let target = raw
        .entity
        .clone()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CompileError::field_schema(entity, field, "relation block is missing 'entity'")
        })?;

    let kind_spelling = raw.kind.as_deref().ok_or_else(|| {
        CompileError::field_schema(entity, field, "relation block is missing 'type'")
    })?;
    let kind =
        RelationKind::from_alias(kind_spelling).ok_or_else(|| CompileError::UnknownRelationKind {
            entity: entity.to_string(),
            field: field.to_string(),
            kind: kind_spelling.to_string(),
        })?;

    let mut spec = RelationshipSpec::new(target, kind);
    spec.cascade = raw.cascade.clone();
    spec.on_delete = parse_action(entity, field, "onDelete", raw.on_delete.as_deref());
    spec.on_update = parse_action(entity, field, "onUpdate", raw.on_update.as_deref());
    spec.eager = raw.eager;
    spec.join_column = raw.join_column.clone();
    spec.key = raw.key.clone();

    Ok(spec)
}

fn parse_action(
    entity: &str,
    field: &str,
    attribute: &str,
    spelling: Option<&str>,
) -> Option<ReferentialAction> {
    let spelling = spelling?;
    let action = ReferentialAction::parse(spelling);
    if action.is_none() {
        tracing::warn!(
            entity,
            field,
            attribute,
            value = spelling,
            "unknown referential action; dropping",
        );
    }
    action
}

// ============================================================================
// GraphQL policy parsing
// ============================================================================

fn parse_field_policy(entity: &str, field: &str, value: Option<&Value>) -> GraphqlFieldPolicy {
    match value {
        None => GraphqlFieldPolicy::Default,
        Some(Value::Bool(true)) => GraphqlFieldPolicy::Enabled,
        Some(Value::Bool(false)) => GraphqlFieldPolicy::Disabled,
        Some(Value::Array(items)) => {
            let mut artifacts = Vec::new();
            for item in items {
                match item.as_str().and_then(ApiArtifact::parse) {
                    Some(artifact) => artifacts.push(artifact),
                    None => tracing::warn!(
                        entity,
                        field,
                        flag = %item,
                        "unknown graphql exposure flag; dropping",
                    ),
                }
            }
            GraphqlFieldPolicy::Only(artifacts)
        }
        Some(other) => {
            tracing::warn!(
                entity,
                field,
                value = %other,
                "unsupported graphql flag shape; using default exposure",
            );
            GraphqlFieldPolicy::Default
        }
    }
}

fn parse_entity_policy(entity: &str, value: Option<&Value>) -> GraphqlEntityPolicy {
    match value {
        None => GraphqlEntityPolicy::Default,
        Some(Value::Bool(true)) => GraphqlEntityPolicy::Enabled,
        Some(Value::Bool(false)) => GraphqlEntityPolicy::Disabled,
        Some(Value::Array(items)) => {
            let mut ops = Vec::new();
            for item in items {
                match item.as_str().and_then(EntityOp::parse) {
                    Some(op) => ops.push(op),
                    None => tracing::warn!(
                        entity,
                        flag = %item,
                        "unknown graphql operation flag; dropping",
                    ),
                }
            }
            GraphqlEntityPolicy::Ops(ops)
        }
        Some(other) => {
            tracing::warn!(
                entity,
                value = %other,
                "unsupported graphql flag shape; using default operations",
            );
            GraphqlEntityPolicy::Default
        }
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
    fn test_parse_minimal() {
        let entity = parse(r#"{ "name": "User", "fields": {} }"#).unwrap();
        assert_eq!(entity.name, "User");
        assert_eq!(entity.field_count(), 0);
        assert_eq!(entity.graphql, GraphqlEntityPolicy::Default);
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse("{ not json").unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_parse_missing_name() {
        let err = parse(r#"{ "fields": {} }"#).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_parse_scalar_field() {
        let entity = parse(
            r#"{
                "name": "Post",
                "fields": {
                    "title": {
                        "type": "string", "required": true, "unique": true,
                        "minLength": 1, "maxLength": 200, "pattern": "^.+$",
                        "description": "Post title"
                    }
                }
            }"#,
        )
        .unwrap();

        let title = entity.field("title").unwrap();
        assert_eq!(title.kind, Some(FieldKind::String));
        assert!(title.required);
        assert!(title.unique);
        assert_eq!(title.min_length, Some(1));
        assert_eq!(title.max_length, Some(200));
        assert_eq!(title.pattern.as_deref(), Some("^.+$"));
        assert_eq!(title.description.as_deref(), Some("Post title"));
    }

    #[test]
    fn test_parse_relation_field() {
        // The scenario from the compiler's reference fixtures.
        let entity = parse(
            r#"{
                "name": "Comment",
                "fields": {
                    "postId": {
                        "type": "string", "required": true,
                        "relation": {
                            "entity": "Post", "type": "many-to-one",
                            "cascade": ["insert", "update"], "onDelete": "CASCADE"
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let field = entity.field("postId").unwrap();
        let rel = field.relationship.as_ref().unwrap();
        assert_eq!(rel.target_entity, "Post");
        assert_eq!(rel.kind, RelationKind::ManyToOne);
        assert_eq!(rel.cascade, vec!["insert", "update"]);
        assert_eq!(rel.on_delete, Some(ReferentialAction::Cascade));
        assert_eq!(rel.on_update, None);
        assert_eq!(rel.foreign_key_name(&field.name), "postId");
    }

    #[test]
    fn test_parse_relation_unknown_kind() {
        let err = parse(
            r#"{
                "name": "Comment",
                "fields": {
                    "postId": {
                        "type": "string",
                        "relation": { "entity": "Post", "type": "tree" }
                    }
                }
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, CompileError::UnknownRelationKind { .. }));
    }

    #[test]
    fn test_parse_relation_missing_entity() {
        let err = parse(
            r#"{
                "name": "Comment",
                "fields": {
                    "postId": { "type": "string", "relation": { "type": "many-to-one" } }
                }
            }"#,
        )
        .unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_parse_relation_target_entity_alias() {
        let entity = parse(
            r#"{
                "name": "Comment",
                "fields": {
                    "author": {
                        "type": "relation",
                        "relation": { "targetEntity": "User", "type": "manyToOne" }
                    }
                }
            }"#,
        )
        .unwrap();
        let rel = entity.field("author").unwrap().relationship.as_ref().unwrap();
        assert_eq!(rel.target_entity, "User");
    }

    #[test]
    fn test_parse_field_graphql_flags() {
        let entity = parse(
            r#"{
                "name": "Post",
                "fields": {
                    "secret":   { "type": "string", "graphql": false },
                    "title":    { "type": "string", "graphql": true },
                    "authorId": {
                        "type": "string",
                        "relation": { "entity": "User", "type": "many-to-one" },
                        "graphql": ["relation", "bogus"]
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            entity.field("secret").unwrap().graphql,
            GraphqlFieldPolicy::Disabled
        );
        assert_eq!(
            entity.field("title").unwrap().graphql,
            GraphqlFieldPolicy::Enabled
        );
        // Unknown flags are dropped, known flags survive verbatim.
        assert_eq!(
            entity.field("authorId").unwrap().graphql,
            GraphqlFieldPolicy::Only(vec![ApiArtifact::Relation])
        );
    }

    #[test]
    fn test_parse_entity_graphql_ops() {
        let entity = parse(
            r#"{ "name": "Post", "graphql": ["create", "list", "nonsense"], "fields": {} }"#,
        )
        .unwrap();
        assert_eq!(
            entity.graphql,
            GraphqlEntityPolicy::Ops(vec![EntityOp::Create, EntityOp::List])
        );

        let disabled = parse(r#"{ "name": "Post", "graphql": false, "fields": {} }"#).unwrap();
        assert_eq!(disabled.graphql, GraphqlEntityPolicy::Disabled);
    }

    #[test]
    fn test_parse_unknown_field_kind_is_kept_untyped() {
        let entity = parse(
            r#"{ "name": "Post", "fields": { "mystery": { "type": "blob" } } }"#,
        )
        .unwrap();
        assert!(!entity.field("mystery").unwrap().has_declared_kind());
    }

    #[test]
    fn test_parse_item_schema() {
        let entity = parse(
            r#"{
                "name": "Message",
                "fields": {
                    "attachments": {
                        "type": "json", "array": true,
                        "itemSchema": {
                            "type": "object",
                            "properties": {
                                "a": { "type": "string" },
                                "b": { "type": "number" }
                            },
                            "required": ["a"]
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let field = entity.field("attachments").unwrap();
        assert!(field.is_structured_json());
        let schema = field.item_schema.as_ref().unwrap();
        assert!(schema.property_required("a"));
        assert!(!schema.property_required("b"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = r#"{
            "name": "Post",
            "fields": {
                "zulu":  { "type": "string" },
                "alpha": { "type": "number" }
            }
        }"#;

        let first = parse(text).unwrap();
        let second = parse(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_all_isolates_failures() {
        let results = parse_all([
            r#"{ "name": "Good", "fields": {} }"#,
            r#"{ "fields": {} }"#,
        ]);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
