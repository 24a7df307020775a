use serde_json::json;

use colspec_core::{
    ColumnError, ColumnSpec, GenericType, ResolveOptions, Resolved, Schema, resolve,
};
use colspec_types::{to_generic, to_native};

fn schemas() -> Vec<Schema> {
    vec![
        Schema::from_pairs(Vec::<(String, String)>::new()).unwrap(),
        Schema::from_pairs([("only", "string")]).unwrap(),
        Schema::from_pairs([("x", "int"), ("y", "string"), ("z", "array<int>")]).unwrap(),
        Schema::from_pairs([
            ("ts", "timestamp"),
            ("amount", "decimal(18,4)"),
            ("flags", "array<boolean>"),
            ("meta", "map<string,string>"),
            ("user", "struct<id:bigint,name:string>"),
        ])
        .unwrap(),
    ]
}

#[test]
fn test_subset_of_names_round_trips_in_order() {
    for schema in schemas() {
        let mut names = schema.column_names();
        names.reverse();
        for len in 0..=names.len() {
            let requested = &names[..len];
            let spec = ColumnSpec::names(requested.iter().cloned());
            let resolved = resolve(&schema, &spec, &ResolveOptions::default()).unwrap();
            assert_eq!(resolved.names(), requested);
        }
    }
}

#[test]
fn test_star_returns_schema_order() {
    for schema in schemas() {
        let spec = ColumnSpec::from_json(&json!("*")).unwrap();
        let resolved = resolve(&schema, &spec, &ResolveOptions::default()).unwrap();
        assert_eq!(resolved.names().len(), schema.len());
        assert_eq!(resolved.into_names(), schema.column_names());
    }
}

#[test]
fn test_unknown_name_is_missing() {
    for schema in schemas() {
        let spec = ColumnSpec::names(["__absent__"]);
        match resolve(&schema, &spec, &ResolveOptions::default()) {
            Err(ColumnError::MissingColumns { missing, available }) => {
                assert_eq!(missing, vec!["__absent__"]);
                assert_eq!(available, schema.column_names());
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }
}

#[test]
fn test_generic_native_round_trip() {
    for name in GenericType::names() {
        let generic = GenericType::from_name(name).unwrap();
        let back = to_generic(to_native(name).unwrap().as_str()).unwrap();
        assert!(back.same_category(&generic), "{name}");
    }
}

#[test]
fn test_tuple_spec_returns_params() {
    let schema = Schema::from_pairs([("a", "int"), ("b", "int")]).unwrap();
    let spec = ColumnSpec::from_json(&json!([["a", 1, 2], ["b", 3, 4]])).unwrap();
    let resolved = resolve(&schema, &spec, &ResolveOptions::default().with_params()).unwrap();
    assert_eq!(
        resolved,
        Resolved::WithParams {
            names: vec!["a".into(), "b".into()],
            params: vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]],
        }
    );
}

#[test]
fn test_type_filter() {
    let schema = Schema::from_pairs([("x", "int"), ("y", "string"), ("z", "array<int>")]).unwrap();
    let spec = ColumnSpec::names(["x", "y", "z"]);

    let strings = ResolveOptions::default().filter_by([GenericType::from_name("string").unwrap()]);
    assert_eq!(resolve(&schema, &spec, &strings).unwrap().into_names(), vec!["y"]);

    let arrays = ResolveOptions::default().filter_by([GenericType::from_name("array").unwrap()]);
    assert_eq!(resolve(&schema, &spec, &arrays).unwrap().into_names(), vec!["z"]);

    let none = ResolveOptions::default();
    assert_eq!(resolve(&schema, &spec, &none).unwrap().into_names(), vec!["x", "y", "z"]);
}

#[test]
fn test_regex_prefix_match() {
    let schema = Schema::from_pairs([("id", "int"), ("id_2", "int"), ("name", "string")]).unwrap();
    let resolved = resolve(
        &schema,
        &ColumnSpec::single("id"),
        &ResolveOptions::default().regex(),
    )
    .unwrap();
    assert_eq!(resolved.into_names(), vec!["id", "id_2"]);
}

#[test]
fn test_resolve_is_idempotent() {
    let schema = &schemas()[3];
    let spec = ColumnSpec::from_json(&json!([["flags", "x"], [0], ["amount", 1.5]])).unwrap();
    let options = ResolveOptions::default()
        .with_params()
        .filter_by([GenericType::Array(None), GenericType::Decimal]);
    let first = resolve(schema, &spec, &options).unwrap();
    let second = resolve(schema, &spec, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.into_names(), vec!["flags", "amount"]);
}

#[test]
fn test_index_past_end_never_wraps() {
    for schema in schemas() {
        let spec = ColumnSpec::names([schema.len()]);
        assert!(matches!(
            resolve(&schema, &spec, &ResolveOptions::default()),
            Err(ColumnError::IndexOutOfRange { index, len }) if index == len
        ));
    }
}
