//! GraphQL exposure resolution
//!
//! Per field, decides which of the four independent API artifacts to emit
//! (`object`, `inputs`, `foreignKey`, `relation`); per entity, resolves the
//! operation set gated by the entity-level policy.
//!
//! The resolver has no failure mode. Entity-level defaults are pure
//! configuration threaded in as a value, never read from ambient context.

use entigen_core::{ApiArtifact, EntityOp};
use entigen_schema::{EntityField, GraphqlEntityPolicy, GraphqlFieldPolicy};
use serde::Serialize;
use std::collections::BTreeSet;

// ============================================================================
// ExposureSet
// ============================================================================

/// The subset of API artifacts generated for one field.
///
/// Backed by a `BTreeSet` so iteration (and serialized form) is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ExposureSet(BTreeSet<ApiArtifact>);

impl ExposureSet {
    /// The empty set (field hidden from every API artifact).
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// The default exposure for a non-relationship field.
    pub fn object_inputs() -> Self {
        Self::from_artifacts([ApiArtifact::Object, ApiArtifact::Inputs])
    }

    /// The default exposure for a relationship field.
    pub fn full() -> Self {
        Self::from_artifacts([
            ApiArtifact::Object,
            ApiArtifact::Inputs,
            ApiArtifact::ForeignKey,
            ApiArtifact::Relation,
        ])
    }

    /// Build from an artifact list.
    pub fn from_artifacts(artifacts: impl IntoIterator<Item = ApiArtifact>) -> Self {
        Self(artifacts.into_iter().collect())
    }

    /// Whether the artifact is in the set.
    pub fn contains(&self, artifact: ApiArtifact) -> bool {
        self.0.contains(&artifact)
    }

    /// Whether no artifacts are generated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate artifacts in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = ApiArtifact> + '_ {
        self.0.iter().copied()
    }
}

// ============================================================================
// ExposureResolver
// ============================================================================

/// Resolves field exposure sets and the entity operation set.
///
/// Field and entity policies are orthogonal: the entity policy gates whole
/// operations (CRUD mutations and queries), the field policy gates per-field
/// visibility.
#[derive(Debug, Clone)]
pub struct ExposureResolver {
    entity_policy: GraphqlEntityPolicy,
}

impl ExposureResolver {
    /// Create a resolver carrying the entity-level policy.
    pub fn new(entity_policy: GraphqlEntityPolicy) -> Self {
        Self { entity_policy }
    }

    /// The operations generated for the entity.
    pub fn operations(&self) -> BTreeSet<EntityOp> {
        self.entity_policy.operations()
    }

    /// The exposure set for one field.
    ///
    /// - `Disabled` → empty set, regardless of relationship presence.
    /// - `Default`/`Enabled` → `{object, inputs}`, plus
    ///   `{foreignKey, relation}` iff the field carries a relationship.
    /// - `Only(…)` → exactly that set, verbatim. Callers intending partial
    ///   exposure (e.g. relation visible, raw FK hidden) list only what they
    ///   want. `foreignKey`/`relation` are inert on non-relationship fields.
    pub fn field_exposure(&self, field: &EntityField) -> ExposureSet {
        field_exposure(field)
    }
}

/// Standalone form of [`ExposureResolver::field_exposure`] for callers that
/// have no entity policy in hand.
pub fn field_exposure(field: &EntityField) -> ExposureSet {
    match &field.graphql {
        GraphqlFieldPolicy::Disabled => ExposureSet::empty(),
        GraphqlFieldPolicy::Default | GraphqlFieldPolicy::Enabled => {
            if field.is_relationship() {
                ExposureSet::full()
            } else {
                ExposureSet::object_inputs()
            }
        }
        GraphqlFieldPolicy::Only(artifacts) => ExposureSet::from_artifacts(artifacts.iter().copied()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use entigen_core::{FieldKind, RelationKind};
    use entigen_schema::RelationshipSpec;
    use pretty_assertions::assert_eq;

    fn relation_field() -> EntityField {
        EntityField::new("postId", FieldKind::String)
            .with_relationship(RelationshipSpec::new("Post", RelationKind::ManyToOne))
    }

    #[test]
    fn test_default_plain_field() {
        let field = EntityField::new("title", FieldKind::String);
        let exposure = field_exposure(&field);
        assert_eq!(exposure, ExposureSet::object_inputs());
        assert!(!exposure.contains(ApiArtifact::ForeignKey));
    }

    #[test]
    fn test_default_relation_field() {
        let exposure = field_exposure(&relation_field());
        assert_eq!(exposure, ExposureSet::full());
        assert_eq!(exposure.len(), 4);
    }

    #[test]
    fn test_disabled_overrides_relationship() {
        // graphql: false empties the set regardless of relationship presence.
        let field = relation_field().with_graphql(GraphqlFieldPolicy::Disabled);
        assert!(field_exposure(&field).is_empty());
    }

    #[test]
    fn test_enabled_same_as_default() {
        let field = EntityField::new("title", FieldKind::String)
            .with_graphql(GraphqlFieldPolicy::Enabled);
        assert_eq!(field_exposure(&field), ExposureSet::object_inputs());
    }

    #[test]
    fn test_explicit_list_verbatim() {
        let field = relation_field()
            .with_graphql(GraphqlFieldPolicy::Only(vec![ApiArtifact::Relation]));
        let exposure = field_exposure(&field);
        assert!(exposure.contains(ApiArtifact::Relation));
        assert!(!exposure.contains(ApiArtifact::ForeignKey));
        assert!(!exposure.contains(ApiArtifact::Object));
        assert_eq!(exposure.len(), 1);
    }

    #[test]
    fn test_resolver_operations() {
        let resolver = ExposureResolver::new(GraphqlEntityPolicy::Disabled);
        assert!(resolver.operations().is_empty());

        let resolver = ExposureResolver::new(GraphqlEntityPolicy::Ops(vec![
            EntityOp::List,
            EntityOp::Single,
        ]));
        let ops = resolver.operations();
        assert!(ops.contains(&EntityOp::List));
        assert!(!ops.contains(&EntityOp::Delete));
    }

    #[test]
    fn test_resolver_field_exposure_matches_standalone() {
        let resolver = ExposureResolver::new(GraphqlEntityPolicy::Default);
        let field = relation_field();
        assert_eq!(resolver.field_exposure(&field), field_exposure(&field));
    }
}
