//! Validation constraints and nested structural schemas
//!
//! Scalar constraints are derived one-to-one from a field's declared
//! attributes. Structured JSON fields get a recursively generated schema
//! tree plus a rendered element-interface definition; scalar arrays get a
//! dedicated array schema so collections never serialize raw into storage.

use crate::naming;
use entigen_core::FieldKind;
use entigen_schema::{EntityField, ItemKind, ItemSchema};
use serde::Serialize;

// ============================================================================
// Constraint
// ============================================================================

/// A single validation constraint on a column.
///
/// One constraint kind per declared attribute — no field-kind-specific
/// surprises.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Constraint {
    /// Runtime type check against the declared kind
    TypeCheck(FieldKind),
    /// Minimum string (or array) length
    MinLength(u32),
    /// Maximum string (or array) length
    MaxLength(u32),
    /// Regex pattern
    Pattern(String),
    /// The value may be absent
    Optional,
}

/// Derive the constraint list for a field, purely from its scalar
/// attributes.
pub fn constraints_for(field: &EntityField) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    if let Some(kind) = field.kind {
        constraints.push(Constraint::TypeCheck(kind));
    }
    if let Some(min) = field.min_length {
        constraints.push(Constraint::MinLength(min));
    }
    if let Some(max) = field.max_length {
        constraints.push(Constraint::MaxLength(max));
    }
    if let Some(pattern) = &field.pattern {
        constraints.push(Constraint::Pattern(pattern.clone()));
    }
    if !field.required {
        constraints.push(Constraint::Optional);
    }

    constraints
}

// ============================================================================
// SchemaNode
// ============================================================================

/// A node in a structural validator tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaNode {
    /// String leaf with optional bounds
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// Numeric leaf with optional bounds
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Boolean leaf
    Boolean,
    /// Object with named properties
    Object { properties: Vec<PropertySchema> },
    /// Array with optional length bounds
    Array {
        items: Box<SchemaNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
}

impl SchemaNode {
    /// An unbounded string leaf.
    pub fn string() -> Self {
        SchemaNode::String {
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// An unbounded number leaf.
    pub fn number() -> Self {
        SchemaNode::Number {
            min: None,
            max: None,
        }
    }
}

/// One named property of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySchema {
    /// Property name
    pub name: String,
    /// Requiredness, taken from the item schema's own `required` list
    pub required: bool,
    /// Property value schema
    pub schema: SchemaNode,
}

// ============================================================================
// NestedSchema
// ============================================================================

/// The generated structural artifacts for one structured JSON array field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedSchema {
    /// Name of the element interface
    pub interface_name: String,
    /// Validator for one element object
    pub object_schema: SchemaNode,
    /// Validator for the whole array
    pub array_schema: SchemaNode,
    /// Rendered element-interface definition
    pub definition_text: String,
}

/// Generate the nested structural schema for a `json` array field.
///
/// Walks `item.properties` recursively, mapping each leaf kind to a
/// primitive validator and each nested object to an inline structural
/// validator. Per-property requiredness comes from the item schema's own
/// `required` list, independent of the parent field's required flag.
pub fn nested_schema_for(entity: &str, field_name: &str, item: &ItemSchema) -> NestedSchema {
    let interface_name = naming::interface_name(entity, field_name);
    let object_schema = schema_node(item);
    let array_schema = SchemaNode::Array {
        items: Box::new(object_schema.clone()),
        min_length: None,
        max_length: None,
    };
    let definition_text = render_interface(&interface_name, item);

    NestedSchema {
        interface_name,
        object_schema,
        array_schema,
        definition_text,
    }
}

fn schema_node(item: &ItemSchema) -> SchemaNode {
    match item.kind {
        ItemKind::String => SchemaNode::String {
            min_length: item.min_length,
            max_length: item.max_length,
            pattern: item.pattern.clone(),
        },
        ItemKind::Number => SchemaNode::Number {
            min: item.min,
            max: item.max,
        },
        ItemKind::Boolean => SchemaNode::Boolean,
        ItemKind::Object => SchemaNode::Object {
            properties: item
                .properties
                .iter()
                .map(|(name, prop)| PropertySchema {
                    name: name.clone(),
                    required: item.property_required(name),
                    schema: schema_node(prop),
                })
                .collect(),
        },
        ItemKind::Array => SchemaNode::Array {
            items: Box::new(
                item.items
                    .as_deref()
                    .map(schema_node)
                    .unwrap_or_else(SchemaNode::string),
            ),
            min_length: item.min_length,
            max_length: item.max_length,
        },
    }
}

// ============================================================================
// Scalar array schemas
// ============================================================================

/// Generate the validated array schema for a scalar array field.
///
/// Supports array-level bounds (`minLength`/`maxLength`) and per-item bounds
/// (`itemMin`/`itemMax`/`itemMinLength`/`itemMaxLength`). Returns `None` for
/// non-array or non-scalar fields.
pub fn scalar_array_schema(field: &EntityField) -> Option<SchemaNode> {
    if !field.array {
        return None;
    }
    let kind = field.kind?;
    if !kind.is_scalar() {
        return None;
    }

    let items = match kind {
        FieldKind::Number => SchemaNode::Number {
            min: field.item_min,
            max: field.item_max,
        },
        FieldKind::Boolean => SchemaNode::Boolean,
        // String-backed scalars (string, text, date, uuid, key) validate as
        // strings with the per-item length bounds.
        _ => SchemaNode::String {
            min_length: field.item_min_length,
            max_length: field.item_max_length,
            pattern: field.pattern.clone(),
        },
    };

    Some(SchemaNode::Array {
        items: Box::new(items),
        min_length: field.min_length,
        max_length: field.max_length,
    })
}

// ============================================================================
// Interface rendering
// ============================================================================

/// Render the element-interface definition text for an item schema.
fn render_interface(name: &str, item: &ItemSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!("export interface {name} "));
    out.push_str(&render_object_type(item, 0));
    out.push('\n');
    out
}

fn render_object_type(item: &ItemSchema, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let inner = "  ".repeat(depth + 1);

    let mut out = String::from("{\n");
    for (prop_name, prop) in &item.properties {
        let marker = if item.property_required(prop_name) {
            ""
        } else {
            "?"
        };
        out.push_str(&format!(
            "{inner}{prop_name}{marker}: {};\n",
            render_type(prop, depth + 1)
        ));
    }
    out.push_str(&format!("{indent}}}"));
    out
}

fn render_type(item: &ItemSchema, depth: usize) -> String {
    match item.kind {
        ItemKind::String => "string".to_string(),
        ItemKind::Number => "number".to_string(),
        ItemKind::Boolean => "boolean".to_string(),
        ItemKind::Object => render_object_type(item, depth),
        ItemKind::Array => {
            let element = item
                .items
                .as_deref()
                .map(|i| render_type(i, depth))
                .unwrap_or_else(|| "any".to_string());
            format!("{element}[]")
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
