//! Naming helpers
//!
//! Case conversion and the singularization rule used to derive enum type
//! names and nested-interface names from entity and field names.

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

// ============================================================================
// Case conversion
// ============================================================================

/// Convert a name to `PascalCase` (e.g. "lineItems" → "LineItems").
pub fn pascal(name: &str) -> String {
    name.to_pascal_case()
}

/// Convert a name to `camelCase` (e.g. "LineItem" → "lineItem").
pub fn camel(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Convert a name to `snake_case` (e.g. "BlogPost" → "blog_post").
pub fn snake(name: &str) -> String {
    name.to_snake_case()
}

// ============================================================================
// Singularization
// ============================================================================

/// Words that end in "s" but are already singular. Names ending in one of
/// these must not be singularized ("status" stays "status", never "statu").
const SINGULAR_S_WORDS: &[&str] = &[
    "status", "class", "process", "address", "witness", "success", "progress",
];

/// Singularize a field name with simple English heuristics.
///
/// # Examples
///
/// - "comments" → "comment"
/// - "categories" → "category"
/// - "addresses" → "address"
/// - "status" → "status" (whitelisted)
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();

    if SINGULAR_S_WORDS.iter().any(|w| lower.ends_with(w)) {
        return word.to_string();
    }

    if lower.ends_with("ies") && word.len() > 3 {
        return format!("{}y", &word[..word.len() - 3]);
    }

    if lower.ends_with("sses")
        || lower.ends_with("xes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
        || lower.ends_with("ses")
    {
        return word[..word.len() - 2].to_string();
    }

    if lower.ends_with('s') && !lower.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

// ============================================================================
// Derived type names
// ============================================================================

/// The host/API type name for an enum field:
/// `EntityName + PascalCase(singularized field name)`.
///
/// # Examples
///
/// - ("Task", "status") → "TaskStatus"
/// - ("Post", "categories") → "PostCategory"
pub fn enum_type_name(entity: &str, field: &str) -> String {
    format!("{}{}", entity, pascal(&singularize(field)))
}

/// The element-interface name for a structured JSON array field:
/// `EntityName + PascalCase(singularized field name) + "Item"`.
///
/// # Examples
///
/// - ("Message", "attachments") → "MessageAttachmentItem"
pub fn interface_name(entity: &str, field: &str) -> String {
    format!("{}{}Item", entity, pascal(&singularize(field)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_conversion() {
        assert_eq!(pascal("lineItems"), "LineItems");
        assert_eq!(camel("BlogPost"), "blogPost");
        assert_eq!(snake("BlogPost"), "blog_post");
    }

    #[test]
    fn test_singularize_plurals() {
        assert_eq!(singularize("comments"), "comment");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("tags"), "tag");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("branches"), "branch");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("witnesses"), "witness");
    }

    #[test]
    fn test_singularize_whitelist() {
        // Already-singular s-words survive untouched.
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("process"), "process");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("witness"), "witness");
        assert_eq!(singularize("success"), "success");
        assert_eq!(singularize("progress"), "progress");
    }

    #[test]
    fn test_singularize_compound_whitelist() {
        // The whitelist also protects compound field names.
        assert_eq!(singularize("orderStatus"), "orderStatus");
        assert_eq!(singularize("deliveryAddress"), "deliveryAddress");
    }

    #[test]
    fn test_singularize_non_plural() {
        assert_eq!(singularize("body"), "body");
        assert_eq!(singularize("title"), "title");
    }

    #[test]
    fn test_enum_type_name() {
        assert_eq!(enum_type_name("Task", "status"), "TaskStatus");
        assert_eq!(enum_type_name("Post", "categories"), "PostCategory");
        assert_eq!(enum_type_name("User", "roles"), "UserRole");
    }

    #[test]
    fn test_interface_name() {
        assert_eq!(
            interface_name("Message", "attachments"),
            "MessageAttachmentItem"
        );
        assert_eq!(interface_name("Order", "lineItems"), "OrderLineItemItem");
    }
}
