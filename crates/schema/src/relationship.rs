//! Relationship specifications
//!
//! This module contains the `RelationshipSpec` struct describing an
//! association from one entity field to a target entity, together with the
//! foreign-key naming rule shared by the parser and the preparators.

use entigen_core::{ReferentialAction, RelationKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// RelationshipSpec
// ============================================================================

/// The normalized relationship metadata attached to an entity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSpec {
    /// Name of the target entity (PascalCase)
    pub target_entity: String,

    /// Kind of relationship (OneToOne, OneToMany, etc.)
    pub kind: RelationKind,

    /// Write operations that propagate to related rows. Order is preserved
    /// verbatim from the schema document.
    pub cascade: Vec<String>,

    /// Referential action on delete
    pub on_delete: Option<ReferentialAction>,

    /// Referential action on update
    pub on_update: Option<ReferentialAction>,

    /// Whether the relation is loaded synchronously with the owning row
    pub eager: bool,

    /// Explicit join-column name override
    pub join_column: Option<String>,

    /// Explicit foreign-key property name override
    pub key: Option<String>,
}

impl RelationshipSpec {
    /// Create a new relationship spec with the given target and kind.
    pub fn new(target_entity: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            target_entity: target_entity.into(),
            kind,
            cascade: Vec::new(),
            on_delete: None,
            on_update: None,
            eager: false,
            join_column: None,
            key: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the cascade operations (order preserved).
    pub fn with_cascade(mut self, cascade: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cascade = cascade.into_iter().map(Into::into).collect();
        self
    }

    /// Set the on delete action.
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Set the on update action.
    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Mark the relation as eagerly loaded.
    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    /// Set an explicit join-column name.
    pub fn with_join_column(mut self, name: impl Into<String>) -> Self {
        self.join_column = Some(name.into());
        self
    }

    /// Set an explicit foreign-key property name.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Whether the owning side holds a collection of targets.
    pub fn is_to_many(&self) -> bool {
        self.kind.is_to_many()
    }

    /// Whether this relation synthesizes a foreign-key column on the owning
    /// side (ManyToOne / OneToOne).
    pub fn owns_join_column(&self) -> bool {
        self.kind.owns_join_column()
    }

    /// The foreign-key property name for the given owning field.
    ///
    /// Resolution order: the explicit `key` override, else the field name
    /// itself when it already ends in `Id`, else `<fieldName>Id`.
    pub fn foreign_key_name(&self, field_name: &str) -> String {
        if let Some(key) = &self.key {
            key.clone()
        } else if field_name.ends_with("Id") {
            field_name.to_string()
        } else {
            format!("{field_name}Id")
        }
    }

    /// The join-column name: the explicit `join_column` override, else the
    /// foreign-key naming rule. Only meaningful for relations that own a
    /// join column.
    pub fn join_column_name(&self, field_name: &str) -> String {
        self.join_column
            .clone()
            .unwrap_or_else(|| self.foreign_key_name(field_name))
    }
}

// ============================================================================
// Tests
// ============================================================================
