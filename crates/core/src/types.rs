//! Core types used throughout Entigen
//!
//! This module contains the fundamental vocabulary of the schema compiler:
//! field kinds, relation kinds, referential actions, API exposure artifacts,
//! and entity-level operations.

use serde::{Deserialize, Serialize};

// ============================================================================
// Field Kinds
// ============================================================================

/// The declared kind of an entity field.
///
/// A field's kind drives every downstream decision: which storage column type
/// it maps to, which host-language type the generated object model uses, and
/// which API scalar it is exposed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Short string (VARCHAR-class storage)
    String,
    /// Long-form text content
    Text,
    /// Numeric value (the schema language has a single number kind)
    Number,
    /// Boolean true/false
    Boolean,
    /// Date and time
    Date,
    /// UUID identifier
    Uuid,
    /// Enumeration with a fixed value set
    Enum,
    /// JSON-valued field (object, or array of structured items)
    Json,
    /// Explicitly declared foreign-key column
    Key,
    /// Association to another entity
    Relation,
    /// Association that may target more than one entity (stored as id + type)
    Polymorphic,
}

impl FieldKind {
    /// Parse a kind from its schema spelling (`"string"`, `"json"`, …).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(FieldKind::String),
            "text" => Some(FieldKind::Text),
            "number" => Some(FieldKind::Number),
            "boolean" => Some(FieldKind::Boolean),
            "date" => Some(FieldKind::Date),
            "uuid" => Some(FieldKind::Uuid),
            "enum" => Some(FieldKind::Enum),
            "json" => Some(FieldKind::Json),
            "key" => Some(FieldKind::Key),
            "relation" => Some(FieldKind::Relation),
            "polymorphic" => Some(FieldKind::Polymorphic),
            _ => None,
        }
    }

    /// The schema spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Uuid => "uuid",
            FieldKind::Enum => "enum",
            FieldKind::Json => "json",
            FieldKind::Key => "key",
            FieldKind::Relation => "relation",
            FieldKind::Polymorphic => "polymorphic",
        }
    }

    /// Whether this kind is a plain scalar (expands to exactly one column
    /// with no enum/nested-schema/relation payload).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldKind::String
                | FieldKind::Text
                | FieldKind::Number
                | FieldKind::Boolean
                | FieldKind::Date
                | FieldKind::Uuid
                | FieldKind::Key
        )
    }

    /// All field kinds.
    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::String,
            FieldKind::Text,
            FieldKind::Number,
            FieldKind::Boolean,
            FieldKind::Date,
            FieldKind::Uuid,
            FieldKind::Enum,
            FieldKind::Json,
            FieldKind::Key,
            FieldKind::Relation,
            FieldKind::Polymorphic,
        ]
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Relation Kinds
// ============================================================================

/// Entity relationship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// One record relates to exactly one other record
    OneToOne,
    /// One record relates to many others (e.g., User has many Posts)
    OneToMany,
    /// Many records relate to one (the FK-carrying side)
    ManyToOne,
    /// Many-to-many through a junction table
    ManyToMany,
}

impl RelationKind {
    /// Parse a relation kind from any of its schema spellings.
    ///
    /// Schema documents use kebab or lowercase spellings (`"many-to-one"`,
    /// `"manyToOne"`, `"ManyToOne"`); all are normalized here.
    pub fn from_alias(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "onetoone" => Some(RelationKind::OneToOne),
            "onetomany" => Some(RelationKind::OneToMany),
            "manytoone" => Some(RelationKind::ManyToOne),
            "manytomany" => Some(RelationKind::ManyToMany),
            _ => None,
        }
    }

    /// The canonical PascalCase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "OneToOne",
            RelationKind::OneToMany => "OneToMany",
            RelationKind::ManyToOne => "ManyToOne",
            RelationKind::ManyToMany => "ManyToMany",
        }
    }

    /// Whether the owning side holds a collection of targets.
    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }

    /// Whether the owning side carries the join column (and hence the
    /// synthesized foreign-key column).
    pub fn owns_join_column(&self) -> bool {
        matches!(self, RelationKind::ManyToOne | RelationKind::OneToOne)
    }

    /// Get the inverse relation kind.
    pub fn inverse(&self) -> Self {
        match self {
            RelationKind::OneToOne => RelationKind::OneToOne,
            RelationKind::OneToMany => RelationKind::ManyToOne,
            RelationKind::ManyToOne => RelationKind::OneToMany,
            RelationKind::ManyToMany => RelationKind::ManyToMany,
        }
    }

    /// All relation kinds.
    pub fn all() -> &'static [RelationKind] {
        &[
            RelationKind::OneToOne,
            RelationKind::OneToMany,
            RelationKind::ManyToOne,
            RelationKind::ManyToMany,
        ]
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Actions for foreign key constraints (ON DELETE / ON UPDATE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    /// Propagate the operation to related records
    Cascade,
    /// Set foreign key to NULL
    SetNull,
    /// Prevent the operation if related records exist
    Restrict,
    /// Do nothing (database default)
    NoAction,
    /// Set to the column default
    SetDefault,
}

impl ReferentialAction {
    /// Parse from the schema spelling (`"CASCADE"`, `"SET NULL"`, `"set_null"`).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "CASCADE" => Some(ReferentialAction::Cascade),
            "SETNULL" => Some(ReferentialAction::SetNull),
            "RESTRICT" => Some(ReferentialAction::Restrict),
            "NOACTION" => Some(ReferentialAction::NoAction),
            "SETDEFAULT" => Some(ReferentialAction::SetDefault),
            _ => None,
        }
    }

    /// Get the SQL keyword.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }

    /// All referential actions.
    pub fn all() -> &'static [ReferentialAction] {
        &[
            ReferentialAction::Cascade,
            ReferentialAction::SetNull,
            ReferentialAction::Restrict,
            ReferentialAction::NoAction,
            ReferentialAction::SetDefault,
        ]
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

// ============================================================================
// API Artifacts
// ============================================================================

/// The per-field API artifacts a field may generate.
///
/// Every field resolves to a subset of these four independent artifacts:
/// an object-type field, input-type fields, a raw foreign-key scalar, and a
/// relation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiArtifact {
    /// Field on the API object type
    Object,
    /// Field on the create/update input types
    Inputs,
    /// Raw foreign-key scalar on the object type
    ForeignKey,
    /// Resolved relation field on the object type
    Relation,
}

impl ApiArtifact {
    /// Parse from the schema spelling (`"object"`, `"foreignKey"`, …).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "object" => Some(ApiArtifact::Object),
            "inputs" => Some(ApiArtifact::Inputs),
            "foreignKey" => Some(ApiArtifact::ForeignKey),
            "relation" => Some(ApiArtifact::Relation),
            _ => None,
        }
    }

    /// The schema spelling of this artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiArtifact::Object => "object",
            ApiArtifact::Inputs => "inputs",
            ApiArtifact::ForeignKey => "foreignKey",
            ApiArtifact::Relation => "relation",
        }
    }

    /// All artifacts.
    pub fn all() -> &'static [ApiArtifact] {
        &[
            ApiArtifact::Object,
            ApiArtifact::Inputs,
            ApiArtifact::ForeignKey,
            ApiArtifact::Relation,
        ]
    }
}

impl std::fmt::Display for ApiArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Entity Operations
// ============================================================================

/// Entity-level API operations gated by the entity `graphql` policy.
///
/// These gate whole generated operations (CRUD mutations and queries), and
/// are orthogonal to per-field [`ApiArtifact`] visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityOp {
    /// Create mutation
    Create,
    /// Update mutation
    Update,
    /// Combined create-or-update mutation
    CreateUpdate,
    /// Delete mutation
    Delete,
    /// Hard-destroy mutation
    Destroy,
    /// Paginated list query
    List,
    /// Unpaginated array query
    Array,
    /// Single-record query
    Single,
}

impl EntityOp {
    /// Parse from the schema spelling (`"create"`, `"createUpdate"`, …).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(EntityOp::Create),
            "update" => Some(EntityOp::Update),
            "createUpdate" => Some(EntityOp::CreateUpdate),
            "delete" => Some(EntityOp::Delete),
            "destroy" => Some(EntityOp::Destroy),
            "list" => Some(EntityOp::List),
            "array" => Some(EntityOp::Array),
            "single" => Some(EntityOp::Single),
            _ => None,
        }
    }

    /// The schema spelling of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityOp::Create => "create",
            EntityOp::Update => "update",
            EntityOp::CreateUpdate => "createUpdate",
            EntityOp::Delete => "delete",
            EntityOp::Destroy => "destroy",
            EntityOp::List => "list",
            EntityOp::Array => "array",
            EntityOp::Single => "single",
        }
    }

    /// All operations.
    pub fn all() -> &'static [EntityOp] {
        &[
            EntityOp::Create,
            EntityOp::Update,
            EntityOp::CreateUpdate,
            EntityOp::Delete,
            EntityOp::Destroy,
            EntityOp::List,
            EntityOp::Array,
            EntityOp::Single,
        ]
    }
}

impl std::fmt::Display for EntityOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
