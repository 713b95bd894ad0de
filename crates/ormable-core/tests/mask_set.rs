use ormable_core::schema::*;
use ormable_core::{apply_mask_set, Record, Registry, Settings};
use pretty_assertions::assert_eq;
use std_util::{assert_err_is, assert_ok};

fn registry() -> Registry {
    let person = Message::new("Person", "people")
        .ormable()
        .multi_account()
        .field(FieldDecl::new("id", Scalar::I64))
        .field(FieldDecl::new("name", Scalar::String))
        .field(FieldDecl::new("geo", TypeRef::nullable(TypeRef::message("Point"))));

    let invoice = Message::new("Invoice", "billing")
        .ormable()
        .multi_account()
        .field(FieldDecl::new("number", Scalar::String).tag(ColumnTag::primary_key()))
        .field(FieldDecl::new("total", Scalar::F64));

    let note = Message::new("Note", "people")
        .ormable()
        .field(FieldDecl::new("body", Scalar::String));

    let point = Message::new("Point", "geo").field(FieldDecl::new("lat", Scalar::F64));

    let mut settings = Settings::new();
    settings.quiet(true);

    Registry::from_messages(&settings, &[person, invoice, note, point]).unwrap()
}

fn person(name: &str) -> Record {
    Record::new().with("name", name)
}

#[test]
fn each_object_gets_its_own_mask() {
    let registry = registry();
    let mut patchees = vec![
        person("Ann").with("id", 1),
        person("Bob").with("id", 2),
    ];
    let patchers = vec![person("Anna"), person("Robert")];
    let masks = vec![vec!["name"], vec![]];

    let patched = assert_ok!(apply_mask_set(
        &registry,
        "Person",
        &mut patchees,
        &patchers,
        &masks
    ));
    assert_eq!(patched.len(), 2);

    assert_eq!(
        patchees,
        vec![person("Anna").with("id", 1), person("Bob").with("id", 2)]
    );
}

#[test]
fn mask_count_must_match_object_count() {
    let registry = registry();
    let mut patchees = vec![person("Ann"), person("Bob")];
    let patchers = vec![person("Anna"), person("Robert")];

    let err = assert_err_is!(
        apply_mask_set(&registry, "Person", &mut patchees, &patchers, &[vec!["name"]]),
        is_bad_repeated_field_mask
    );
    assert_eq!(
        err.to_string(),
        "bad repeated field mask: 1 masks supplied for 2 objects"
    );
}

#[test]
fn patchee_count_must_match_patcher_count() {
    let registry = registry();
    let mut patchees = vec![person("Ann")];
    let patchers = vec![person("Anna"), person("Robert")];

    assert_err_is!(
        apply_mask_set(
            &registry,
            "Person",
            &mut patchees,
            &patchers,
            &[vec!["name"], vec!["name"]]
        ),
        is_invalid_argument
    );
}

#[test]
fn multi_account_type_without_id_is_unsupported() {
    let registry = registry();
    let mut patchees = vec![Record::new()];

    assert_err_is!(
        apply_mask_set(
            &registry,
            "Invoice",
            &mut patchees,
            &[Record::new()],
            &[vec!["total"]]
        ),
        is_unsupported
    );
}

#[test]
fn type_without_primary_key_is_rejected() {
    let registry = registry();
    let mut patchees = vec![Record::new()];

    assert_err_is!(
        apply_mask_set(
            &registry,
            "Note",
            &mut patchees,
            &[Record::new().with("body", "x")],
            &[vec!["body"]]
        ),
        is_missing_primary_key
    );
}

#[test]
fn nested_errors_carry_the_object_index() {
    let registry = registry();
    let mut patchees = vec![person("Ann"), person("Bob")];
    let patchers = vec![
        person("Anna"),
        person("Robert").with("geo", Record::new().with("lat", 1.5)),
    ];

    let err = apply_mask_set(
        &registry,
        "Person",
        &mut patchees,
        &patchers,
        &[vec!["name"], vec!["geo.lat.deg"]],
    )
    .unwrap_err();

    assert!(err.root().is_invalid_argument(), "{err}");
    assert!(
        err.to_string().starts_with("patching object 1 of `PersonORM`: "),
        "{err}"
    );
}
