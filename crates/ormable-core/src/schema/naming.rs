//! Default names for foreign keys, join tables and join-table columns.
//!
//! Every function here is pure: the result depends only on the type, field
//! and key names passed in, never on declaration order.

use std_util::str;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(src);
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn upper_camel_case(&self) -> String {
        str::upper_camel_case(&self.snake_case())
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }
}

/// Folds a declared field name or key override to the form fields are
/// registered under.
pub fn field_name(src: &str) -> String {
    Name::new(src).upper_camel_case()
}

/// Default foreign key for a has-one / has-many relation.
///
/// With a single relation from `parent` into the child type the field name is
/// left out; otherwise it disambiguates sibling relations.
pub fn has_foreign_key(parent: &str, field: &str, association_key: &str, dimension: usize) -> String {
    if dimension == 1 {
        format!("{parent}{association_key}")
    } else {
        format!("{field}{parent}{association_key}")
    }
}

/// Default foreign key for a belongs-to relation. `target` is the referenced
/// (owner) type.
pub fn belongs_to_foreign_key(
    target: &str,
    field: &str,
    association_key: &str,
    dimension: usize,
) -> String {
    if dimension == 1 {
        format!("{target}{association_key}")
    } else {
        format!("{field}{association_key}")
    }
}

/// Default join table for a many-to-many relation.
pub fn join_table(owner: &str, child: &str, field: &str, dimension: usize) -> String {
    if dimension == 1 && owner != child {
        str::snake_case(&format!("{owner}{}", str::pluralize(child)))
    } else {
        str::snake_case(&format!("{owner}{}", str::pluralize(field)))
    }
}

/// Default join-table column referencing the owning side.
pub fn join_table_foreign_key(owner: &str, own_key: &str) -> String {
    str::snake_case(&format!("{owner}{own_key}"))
}

/// Default join-table column referencing the associated side.
///
/// A self-referential relation cannot use the type name twice, so the
/// singular field name takes its place.
pub fn join_table_association_foreign_key(
    owner: &str,
    child: &str,
    field: &str,
    association_key: &str,
) -> String {
    if owner == child {
        str::snake_case(&format!("{}{association_key}", str::singularize(field)))
    } else {
        str::snake_case(&format!("{child}{association_key}"))
    }
}

/// Folds an explicit join-table name.
pub fn db_name(src: &str) -> String {
    str::snake_case(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_fold_to_upper_camel() {
        assert_eq!(field_name("id"), "Id");
        assert_eq!(field_name("shipping_address"), "ShippingAddress");
        assert_eq!(field_name("ShippingAddress"), "ShippingAddress");
    }

    #[test]
    fn has_foreign_key_dimension() {
        assert_eq!(has_foreign_key("Order", "Items", "Id", 1), "OrderId");
        assert_eq!(
            has_foreign_key("Order", "ShippingAddress", "Id", 2),
            "ShippingAddressOrderId"
        );
    }

    #[test]
    fn belongs_to_foreign_key_dimension() {
        assert_eq!(belongs_to_foreign_key("User", "Owner", "Id", 1), "UserId");
        assert_eq!(belongs_to_foreign_key("User", "Owner", "Id", 2), "OwnerId");
    }

    #[test]
    fn join_names() {
        assert_eq!(join_table("User", "Group", "Groups", 1), "user_groups");
        assert_eq!(join_table("User", "Group", "Managers", 2), "user_managers");
        assert_eq!(join_table("Tag", "Tag", "Tags", 1), "tag_tags");
        assert_eq!(join_table_foreign_key("User", "Id"), "user_id");
        assert_eq!(
            join_table_association_foreign_key("User", "Group", "Groups", "Id"),
            "group_id"
        );
        assert_eq!(
            join_table_association_foreign_key("Tag", "Tag", "Related", "Id"),
            "related_id"
        );
    }
}
