//! Tests for class hierarchies across the registry, assignability and
//! member-type resolution

use mira_model::{AssignContext, ClassDef, FieldDef, MethodDef, TypeRegistry, TypeResolver};

#[test]
fn test_diamond_interface_hierarchy() {
    let mut registry = TypeRegistry::new();
    let readable = registry.define_class(ClassDef::interface("Readable")).unwrap();
    let readable_ty = registry.class_type(readable);
    let writable = registry.define_class(ClassDef::interface("Writable")).unwrap();
    let writable_ty = registry.class_type(writable);
    let stream = registry
        .define_class(
            ClassDef::new("Stream")
                .implement(readable_ty)
                .implement(writable_ty),
        )
        .unwrap();
    let stream_ty = registry.class_type(stream);

    let ctx = AssignContext::new(&registry);
    assert!(ctx.is_assignable(readable_ty, stream_ty));
    assert!(ctx.is_assignable(writable_ty, stream_ty));
    assert!(!ctx.is_assignable(readable_ty, writable_ty));
}

#[test]
fn test_deep_chain_assignability() {
    let mut registry = TypeRegistry::new();
    let mut prev = None;
    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D", "E"] {
        let mut def = ClassDef::new(name);
        if let Some(parent) = prev {
            def = def.with_extends(parent);
        }
        let id = registry.define_class(def).unwrap();
        let ty = registry.class_type(id);
        ids.push(ty);
        prev = Some(ty);
    }

    let ctx = AssignContext::new(&registry);
    let root = ids[0];
    let leaf = *ids.last().unwrap();
    assert!(ctx.is_assignable(root, leaf));
    for window in ids.windows(2) {
        assert!(ctx.is_assignable(window[0], window[1]));
        assert!(!ctx.is_assignable(window[1], window[0]));
    }
}

#[test]
fn test_member_resolution_across_two_generic_levels() {
    let mut registry = TypeRegistry::new();
    let k = registry.var_type("K");
    let v = registry.var_type("V");

    // Entry<K, V> declares fields of both variable types
    let entry = registry
        .define_class(
            ClassDef::new("Entry")
                .with_type_params(["K", "V"])
                .with_field(FieldDef::new("key", k))
                .with_field(FieldDef::new("value", v)),
        )
        .unwrap();

    // StringEntry<V> extends Entry<string, V>
    let entry_string_v = registry.generic_type(entry, vec![registry.string_type(), v]);
    let string_entry = registry
        .define_class(
            ClassDef::new("StringEntry")
                .with_type_params(["V"])
                .with_extends(entry_string_v),
        )
        .unwrap();

    let owner = registry.generic_type(string_entry, vec![registry.int_type()]);
    let resolver = TypeResolver::new(&registry);

    assert_eq!(
        resolver.resolve_member_type(k, owner, entry),
        registry.string_type()
    );
    assert_eq!(
        resolver.resolve_member_type(v, owner, entry),
        registry.int_type()
    );
}

#[test]
fn test_registered_members_survive_lookup() {
    let mut registry = TypeRegistry::new();
    let int = registry.int_type();
    let id = registry
        .define_class(
            ClassDef::new("Counter")
                .with_field(FieldDef::new("count", int))
                .with_method(MethodDef::new("getCount", int)),
        )
        .unwrap();

    let def = registry.class(id).unwrap();
    assert_eq!(def.fields.len(), 1);
    assert_eq!(def.methods.len(), 1);
    assert_eq!(def.fields[0].ty, int);
    assert_eq!(registry.class_by_name("Counter").unwrap().id(), id);
}
