//! Relationship preparator
//!
//! Turns relationship metadata into the render-ready relation descriptor:
//! cascade/on-delete/on-update/eager decisions, the join-column name, the
//! host-language return type (direct vs. deferred), and the nested-validation
//! markers consumed by the structural validation layer.

use crate::descriptors::{HostReturn, RelationDescriptor, RelationOptions};
use crate::exposure::field_exposure;
use entigen_core::ApiArtifact;
use entigen_schema::EntityField;

// ============================================================================
// prepare_relationship
// ============================================================================

/// Build the relation descriptor for a relationship field.
///
/// # Panics
///
/// Panics when called on a field without relationship metadata. This is a
/// programmer-error guard, not user-facing validation — the field preparator
/// routes only relationship fields here, so normal schema input can never
/// reach the panic.
pub fn prepare_relationship(field: &EntityField) -> RelationDescriptor {
    let rel = field.relationship.as_ref().unwrap_or_else(|| {
        panic!(
            "prepare_relationship called on non-relationship field '{}'",
            field.name
        )
    });

    let exposure = field_exposure(field);

    let shape = if rel.is_to_many() {
        format!("{}[]", rel.target_entity)
    } else {
        rel.target_entity.clone()
    };
    let host_return = if rel.eager {
        HostReturn::Direct(shape)
    } else {
        // Non-eager relations are resolved on demand by the runtime loading
        // proxy; the deferred wrapper is the contract between it and us.
        HostReturn::Deferred(shape)
    };

    let join_column = rel
        .owns_join_column()
        .then(|| rel.join_column_name(&field.name));

    RelationDescriptor {
        field_name: field.name.clone(),
        target_entity: rel.target_entity.clone(),
        kind: rel.kind,
        api_field: exposure.contains(ApiArtifact::Relation),
        options: RelationOptions {
            eager: rel.eager.then_some(true),
            cascade: (!rel.cascade.is_empty()).then(|| rel.cascade.clone()),
            on_delete: rel.on_delete,
            on_update: rel.on_update,
        },
        join_column,
        host_return,
        optional: !field.required,
        validate_nested: true,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use entigen_core::{FieldKind, ReferentialAction, RelationKind};
    use entigen_schema::{GraphqlFieldPolicy, RelationshipSpec};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_many_to_one_descriptor() {
        let field = EntityField::new("postId", FieldKind::String)
            .required()
            .with_relationship(
                RelationshipSpec::new("Post", RelationKind::ManyToOne)
                    .with_cascade(["insert", "update"])
                    .on_delete(ReferentialAction::Cascade),
            );

        let descriptor = prepare_relationship(&field);
        assert_eq!(descriptor.field_name, "postId");
        assert_eq!(descriptor.target_entity, "Post");
        assert_eq!(descriptor.kind, RelationKind::ManyToOne);
        assert!(descriptor.api_field);
        assert_eq!(
            descriptor.options.cascade,
            Some(vec!["insert".to_string(), "update".to_string()])
        );
        assert_eq!(descriptor.options.on_delete, Some(ReferentialAction::Cascade));
        assert_eq!(descriptor.options.on_update, None);
        assert_eq!(descriptor.options.eager, None);
        assert_eq!(descriptor.join_column.as_deref(), Some("postId"));
        assert!(!descriptor.optional);
        assert!(descriptor.validate_nested);
    }

    #[test]
    fn test_lazy_relation_is_deferred() {
        let field = EntityField::new("author", FieldKind::Relation)
            .with_relationship(RelationshipSpec::new("User", RelationKind::ManyToOne));
        let descriptor = prepare_relationship(&field);
        assert_eq!(
            descriptor.host_return,
            HostReturn::Deferred("User".to_string())
        );
        assert_eq!(descriptor.host_return.render(), "Deferred<User>");
    }

    #[test]
    fn test_eager_relation_is_direct() {
        let field = EntityField::new("author", FieldKind::Relation)
            .with_relationship(RelationshipSpec::new("User", RelationKind::ManyToOne).eager());
        let descriptor = prepare_relationship(&field);
        assert_eq!(descriptor.host_return, HostReturn::Direct("User".to_string()));
        assert_eq!(descriptor.options.eager, Some(true));
    }

    #[test]
    fn test_to_many_shape() {
        let field = EntityField::new("comments", FieldKind::Relation)
            .with_relationship(RelationshipSpec::new("Comment", RelationKind::OneToMany).eager());
        let descriptor = prepare_relationship(&field);
        assert_eq!(
            descriptor.host_return,
            HostReturn::Direct("Comment[]".to_string())
        );
        // OneToMany never owns a join column.
        assert_eq!(descriptor.join_column, None);
    }

    #[test]
    fn test_join_column_override() {
        let field = EntityField::new("parent", FieldKind::Relation).with_relationship(
            RelationshipSpec::new("Post", RelationKind::OneToOne).with_join_column("parent_ref"),
        );
        let descriptor = prepare_relationship(&field);
        assert_eq!(descriptor.join_column.as_deref(), Some("parent_ref"));
    }

    #[test]
    fn test_api_field_gated_by_relation_bit() {
        let field = EntityField::new("post", FieldKind::Relation)
            .with_relationship(RelationshipSpec::new("Post", RelationKind::ManyToOne))
            .with_graphql(GraphqlFieldPolicy::Only(vec![ApiArtifact::ForeignKey]));
        let descriptor = prepare_relationship(&field);
        assert!(!descriptor.api_field);
    }

    #[test]
    fn test_optional_marker() {
        let field = EntityField::new("post", FieldKind::Relation)
            .with_relationship(RelationshipSpec::new("Post", RelationKind::ManyToOne));
        assert!(prepare_relationship(&field).optional);

        let required = field.required();
        assert!(!prepare_relationship(&required).optional);
    }

    #[test]
    #[should_panic(expected = "non-relationship field")]
    fn test_panics_on_non_relationship_field() {
        prepare_relationship(&EntityField::new("title", FieldKind::String));
    }

    #[test]
    fn test_empty_options_bag() {
        let field = EntityField::new("post", FieldKind::Relation)
            .with_relationship(RelationshipSpec::new("Post", RelationKind::ManyToOne));
        let descriptor = prepare_relationship(&field);
        assert!(descriptor.options.is_empty());
    }
}
