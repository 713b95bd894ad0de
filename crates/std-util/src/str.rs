use heck::{ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

/// Returns the plural form of `src`, preserving its casing.
pub fn pluralize(src: &str) -> String {
    pluralizer::pluralize(src, 2, false)
}

/// Returns the singular form of `src`, preserving its casing.
pub fn singularize(src: &str) -> String {
    pluralizer::pluralize(src, 1, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_folding() {
        assert_eq!(snake_case("ShippingAddressOrderId"), "shipping_address_order_id");
        assert_eq!(upper_camel_case("shipping_address"), "ShippingAddress");
        assert_eq!(upper_camel_case("id"), "Id");
    }

    #[test]
    fn inflection() {
        assert_eq!(pluralize("tag"), "tags");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(singularize("tags"), "tag");
        assert_eq!(singularize("related"), "related");
    }
}
