use ormable_core::schema::*;
use ormable_core::{Registry, Settings};
use pretty_assertions::assert_eq;
use std_util::{assert_err, assert_err_is, assert_none, assert_ok, assert_some};

fn order() -> Message {
    Message::new("Order", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64))
        .field(FieldDecl::new("customer_name", Scalar::String))
        .field(FieldDecl::new("receipt", TypeRef::nullable(TypeRef::message("Receipt"))))
        .field(FieldDecl::new("internal", Scalar::String).dropped())
        .field(FieldDecl::new("status", TypeRef::Enum("OrderStatus".to_string())))
}

#[test]
fn only_ormable_messages_are_registered() {
    let receipt = Message::new("Receipt", "shop").field(FieldDecl::new("body", Scalar::Bytes));
    let registry = assert_ok!(Registry::from_messages(
        &Settings::default(),
        &[order(), receipt]
    ));

    let names: Vec<&str> = registry.types().map(|ty| ty.origin_name.as_str()).collect();
    assert_eq!(names, ["Order"]);

    assert!(registry.is_ormable("Order"));
    assert!(registry.is_ormable("OrderORM"));
    assert!(!registry.is_ormable("Receipt"));
    assert_err_is!(registry.record("Receipt"), is_unknown_type);
}

#[test]
fn literal_fields_are_registered_folded() {
    let registry = assert_ok!(Registry::from_messages(&Settings::default(), &[order()]));
    let order = registry.record("OrderORM").unwrap();

    assert_eq!(order.name, "OrderORM");
    assert_eq!(order.origin_name, "Order");
    assert_eq!(order.package, "shop");

    let names: Vec<&str> = order.fields.keys().map(String::as_str).collect();
    assert_eq!(names, ["CustomerName", "Id", "Receipt", "Status"]);

    // References to non-ormable messages stay plain fields.
    let receipt = order.field("Receipt").unwrap();
    assert_none!(receipt.relation);
    assert_eq!(receipt.ty, TypeRef::nullable(TypeRef::message("Receipt")));

    // Declared fields keep their original names, dropped ones included.
    let declared: Vec<&str> = order.declared.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        declared,
        ["id", "customer_name", "receipt", "internal", "status"]
    );
}

#[test]
fn folded_names_must_not_collide() {
    let order = Message::new("Order", "shop")
        .ormable()
        .field(FieldDecl::new("customer_id", Scalar::I64))
        .field(FieldDecl::new("CustomerId", Scalar::String));

    let err = assert_err_is!(
        Registry::from_messages(&Settings::default(), &[order]),
        is_schema_conflict
    );
    assert!(err.to_string().contains("`CustomerId`"), "{err}");
}

#[test]
fn relation_field_must_not_replace_a_literal_field() {
    let order = Message::new("Order", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64))
        .field(FieldDecl::new("address", Scalar::String))
        .field(FieldDecl::new("Address", TypeRef::nullable(TypeRef::message("Address"))));
    let address = Message::new("Address", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64));

    let err = assert_err_is!(
        Registry::from_messages(&Settings::default(), &[order, address]),
        is_schema_conflict
    );
    assert!(err.to_string().contains("`Address` into `OrderORM`"), "{err}");
}

#[test]
fn relation_field_may_fill_an_untyped_placeholder() {
    let order = Message::new("Order", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64))
        .field(FieldDecl::new("address", TypeRef::Unknown))
        .field(FieldDecl::new("Address", TypeRef::nullable(TypeRef::message("Address"))));
    let address = Message::new("Address", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64));

    let registry = assert_ok!(Registry::from_messages(
        &Settings::default(),
        &[order, address]
    ));

    let field = registry.record("Order").unwrap().field("Address").unwrap();
    assert_eq!(field.ty, TypeRef::nullable(TypeRef::message("AddressORM")));
    assert!(field.is_relation());
}

#[test]
fn type_names_must_be_unique_across_packages() {
    let first = Message::new("User", "a")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64));
    let second = Message::new("User", "b")
        .ormable()
        .field(FieldDecl::new("uuid", Scalar::Uuid).tag(ColumnTag::primary_key()));

    let err = assert_err_is!(
        Registry::from_messages(&Settings::default(), &[first, second]),
        is_schema_conflict
    );
    assert_eq!(
        err.to_string(),
        "schema conflict: type `User` is declared in package `a` and again in package `b`"
    );
}

#[test]
fn non_ormable_messages_may_share_a_name() {
    let ormable = Message::new("User", "a")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64));
    let plain = Message::new("User", "b").field(FieldDecl::new("name", Scalar::String));

    let registry = assert_ok!(Registry::from_messages(
        &Settings::default(),
        &[ormable, plain]
    ));
    assert_eq!(registry.record("User").unwrap().package, "a");
}

#[test]
fn forward_references_resolve() {
    let order = Message::new("Order", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64))
        .field(FieldDecl::new("lines", TypeRef::list(TypeRef::message("Line"))));
    let line = Message::new("Line", "shop")
        .ormable()
        .field(FieldDecl::new("id", Scalar::I64));

    let registry = assert_ok!(Registry::from_messages(&Settings::default(), &[order, line]));

    let lines = registry.record("Order").unwrap().field("Lines").unwrap();
    assert_some!(lines.relation.as_ref().and_then(Relation::as_has_many));
    assert_some!(registry.record("Line").unwrap().field("OrderId"));
}

#[test]
fn multi_account_flag_is_carried() {
    let registry = assert_ok!(Registry::from_messages(
        &Settings::default(),
        &[order().multi_account()]
    ));
    assert!(registry.record("Order").unwrap().multi_account);
}

#[test]
fn custom_suffix() {
    let mut settings = Settings::new();
    settings.orm_suffix("Row");

    let registry = assert_ok!(Registry::from_messages(&settings, &[order()]));

    assert_eq!(registry.record("OrderRow").unwrap().name, "OrderRow");
    assert!(!registry.is_ormable("OrderORM"));
    assert_eq!(registry.settings().get_orm_suffix(), "Row");
}

#[test]
fn load_from_json() {
    let src = r#"[
        {
            "name": "Order",
            "package": "shop",
            "options": { "ormable": true },
            "fields": [
                { "name": "id", "ty": { "scalar": "i64" } },
                {
                    "name": "items",
                    "ty": { "list": { "message": "Item" } },
                    "options": {
                        "association": { "has_many": { "position_field": "position" } }
                    }
                }
            ]
        },
        {
            "name": "Item",
            "package": "shop",
            "options": { "ormable": true },
            "fields": [
                { "name": "id", "ty": { "scalar": "i64" } },
                { "name": "order_id", "ty": "unknown" }
            ]
        }
    ]"#;

    let registry = assert_ok!(Registry::from_json(&Settings::default(), src));
    let item = registry.record("Item").unwrap();

    assert_eq!(item.field("OrderId").unwrap().ty, TypeRef::nullable(Scalar::I64));
    assert_eq!(item.field("Position").unwrap().ty, TypeRef::from(Scalar::I64));
}

#[test]
fn malformed_json_is_an_error() {
    let err = assert_err!(Registry::from_json(&Settings::default(), "{ not json"));
    assert!(!err.to_string().is_empty());
}
