//! Same-type property copy
//!
//! Bulk-copies field slots between two instances of one class, walking the
//! superclass chain. Slots never written on the source are skipped, as are
//! class-level fields.

use mira_model::{ClassId, Instance, TypeRegistry};

/// Copy every instance field slot of `class` (and its superclasses) from
/// `source` to `dest`
pub fn copy_properties(
    registry: &TypeRegistry,
    class: ClassId,
    source: &Instance,
    dest: &mut Instance,
) {
    let mut current = Some(class);
    while let Some(id) = current {
        let Some(def) = registry.class(id) else {
            break;
        };
        for field in &def.fields {
            if field.is_static {
                continue;
            }
            if source.has(&field.name) {
                dest.set(field.name.clone(), source.get(&field.name));
            }
        }
        current = registry.superclass_of(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mira_model::{ClassDef, FieldDef, Value};

    #[test]
    fn test_copy_walks_superclasses() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let string = registry.string_type();
        let base = registry
            .define_class(ClassDef::new("Base").with_field(FieldDef::new("id", int)))
            .unwrap();
        let base_ty = registry.class_type(base);
        let sub = registry
            .define_class(
                ClassDef::new("Sub")
                    .with_extends(base_ty)
                    .with_field(FieldDef::new("name", string))
                    .with_field(FieldDef::new("MAX", int).as_static().as_readonly()),
            )
            .unwrap();

        let mut source = Instance::new(sub);
        source.set("id", Value::Int(7));
        source.set("name", Value::Str("a".to_string()));
        source.set("MAX", Value::Int(99));

        let mut dest = Instance::new(sub);
        copy_properties(&registry, sub, &source, &mut dest);

        assert_eq!(dest.get("id"), Value::Int(7));
        assert_eq!(dest.get("name"), Value::Str("a".to_string()));
        // Static fields are not copied
        assert!(!dest.has("MAX"));
    }

    #[test]
    fn test_unset_source_slots_skipped() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let class = registry
            .define_class(ClassDef::new("Point").with_field(FieldDef::new("x", int)))
            .unwrap();

        let source = Instance::new(class);
        let mut dest = Instance::new(class);
        dest.set("x", Value::Int(5));

        copy_properties(&registry, class, &source, &mut dest);
        // Nothing to copy; the destination keeps its value
        assert_eq!(dest.get("x"), Value::Int(5));
    }
}
