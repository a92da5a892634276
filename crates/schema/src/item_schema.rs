//! Structural item schemas for JSON-valued fields
//!
//! A `json` field with `array: true` carries an `itemSchema` describing the
//! shape of each array element. The shape is JSON-Schema-in-spirit: a `type`,
//! `properties`, and a `required` list, with optional length/range bounds on
//! leaves. Properties are kept in a `BTreeMap` so schema walks are
//! deterministic regardless of document key order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// ItemKind
// ============================================================================

/// The type of a structural schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// String leaf
    String,
    /// Numeric leaf
    Number,
    /// Boolean leaf
    Boolean,
    /// Nested object with named properties
    #[default]
    Object,
    /// Array of items
    Array,
}

impl ItemKind {
    /// The schema spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::String => "string",
            ItemKind::Number => "number",
            ItemKind::Boolean => "boolean",
            ItemKind::Object => "object",
            ItemKind::Array => "array",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ItemSchema
// ============================================================================

/// A recursive structural description of a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSchema {
    /// Node type
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Named properties (object nodes only)
    pub properties: BTreeMap<String, ItemSchema>,

    /// Names of required properties. Requiredness of a property comes from
    /// this list alone, independent of the parent field's `required` flag.
    pub required: Vec<String>,

    /// Element schema (array nodes only)
    pub items: Option<Box<ItemSchema>>,

    /// Minimum string length (string leaves)
    pub min_length: Option<u32>,

    /// Maximum string length (string leaves)
    pub max_length: Option<u32>,

    /// Regex pattern (string leaves)
    pub pattern: Option<String>,

    /// Minimum value (number leaves)
    pub min: Option<f64>,

    /// Maximum value (number leaves)
    pub max: Option<f64>,

    /// Human-readable description
    pub description: Option<String>,
}

impl ItemSchema {
    /// Create an object schema with no properties.
    pub fn object() -> Self {
        Self {
            kind: ItemKind::Object,
            ..Default::default()
        }
    }

    /// Create a string leaf schema.
    pub fn string() -> Self {
        Self {
            kind: ItemKind::String,
            ..Default::default()
        }
    }

    /// Create a number leaf schema.
    pub fn number() -> Self {
        Self {
            kind: ItemKind::Number,
            ..Default::default()
        }
    }

    /// Create a boolean leaf schema.
    pub fn boolean() -> Self {
        Self {
            kind: ItemKind::Boolean,
            ..Default::default()
        }
    }

    /// Create an array schema over the given element schema.
    pub fn array_of(items: ItemSchema) -> Self {
        Self {
            kind: ItemKind::Array,
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add a named property (object schemas).
    pub fn with_property(mut self, name: impl Into<String>, schema: ItemSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Set the required-property list.
    pub fn with_required(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set string length bounds.
    pub fn with_length(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Set numeric bounds.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Whether this node is an object with properties.
    pub fn is_object(&self) -> bool {
        self.kind == ItemKind::Object
    }

    /// Whether the named property is in the `required` list.
    pub fn property_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
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
    fn test_item_schema_builders() {
        let schema = ItemSchema::object()
            .with_property("a", ItemSchema::string())
            .with_property("b", ItemSchema::number())
            .with_required(["a"]);

        assert!(schema.is_object());
        assert_eq!(schema.properties.len(), 2);
        assert!(schema.property_required("a"));
        assert!(!schema.property_required("b"));
    }

    #[test]
    fn test_item_schema_deserialize() {
        let json = r#"{
            "type": "object",
            "properties": {
                "a": { "type": "string", "minLength": 1 },
                "b": { "type": "number" }
            },
            "required": ["a"]
        }"#;

        let schema: ItemSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.kind, ItemKind::Object);
        assert_eq!(schema.properties["a"].kind, ItemKind::String);
        assert_eq!(schema.properties["a"].min_length, Some(1));
        assert_eq!(schema.properties["b"].kind, ItemKind::Number);
        assert_eq!(schema.required, vec!["a"]);
    }

    #[test]
    fn test_item_schema_nested_object() {
        let json = r#"{
            "type": "object",
            "properties": {
                "meta": {
                    "type": "object",
                    "properties": { "source": { "type": "string" } },
                    "required": ["source"]
                }
            }
        }"#;

        let schema: ItemSchema = serde_json::from_str(json).unwrap();
        let meta = &schema.properties["meta"];
        assert!(meta.is_object());
        assert!(meta.property_required("source"));
    }

    #[test]
    fn test_properties_are_ordered() {
        // BTreeMap keys iterate alphabetically regardless of insert order.
        let schema = ItemSchema::object()
            .with_property("zebra", ItemSchema::string())
            .with_property("alpha", ItemSchema::string());

        let keys: Vec<&String> = schema.properties.keys().collect();
        assert_eq!(keys, vec!["alpha", "zebra"]);
    }
}
