//! Per-type property metadata
//!
//! A [`TypeIntrospector`] is built once for a class-shaped type and caches
//! everything reflective property access needs: the readable and writable
//! name sets, a get/set [`Invoker`] per property, the declared property types
//! as seen through each side, a case-insensitive name index and the default
//! constructor. Construction resolves competing accessor candidates —
//! covariant overrides keep the most specific getter, overloaded setters are
//! matched against the resolved getter type — and falls back to raw fields
//! for names no accessor claims. The result is immutable and safe to share
//! across threads.

use rustc_hash::{FxHashMap, FxHashSet};

use mira_model::{
    AssignContext, ClassId, ConstructorDef, FieldDef, MethodDef, ModelError, TypeId, TypeRegistry,
    TypeResolver,
};

use crate::error::ReflectError;
use crate::invoker::Invoker;
use crate::naming;
use crate::policy::ReflectionPolicy;

/// Prefix of compiler-generated temporaries
const SYNTHETIC_PREFIX: char = '$';
/// Serialization identity field, maintained by the snapshot machinery
const SERIAL_FIELD: &str = "__serial";
/// Pseudo-property through which every object exposes its class
const CLASS_PSEUDO_PROPERTY: &str = "class";

fn is_valid_property_name(name: &str) -> bool {
    !(name.starts_with(SYNTHETIC_PREFIX) || name == SERIAL_FIELD || name == CLASS_PSEUDO_PROPERTY)
}

/// Cached property metadata for one introspected type
///
/// Built entirely at construction and never mutated afterwards; queries are
/// read-only and need no synchronization.
#[derive(Debug, Clone)]
pub struct TypeIntrospector {
    owner: TypeId,
    owner_class: ClassId,
    class_name: String,
    readable: Vec<String>,
    writable: Vec<String>,
    get_invokers: FxHashMap<String, Invoker>,
    set_invokers: FxHashMap<String, Invoker>,
    get_types: FxHashMap<String, TypeId>,
    set_types: FxHashMap<String, TypeId>,
    default_constructor: Option<ConstructorDef>,
    case_insensitive: FxHashMap<String, String>,
}

impl TypeIntrospector {
    /// Introspect a class-shaped type
    ///
    /// Fails with [`ReflectError::NotAClass`] for non-class types and with
    /// [`ReflectError::AmbiguousAccessor`] when competing accessors cannot
    /// be ordered; on failure no partial metadata is published.
    pub fn new(
        registry: &TypeRegistry,
        owner: TypeId,
        policy: ReflectionPolicy,
    ) -> Result<Self, ReflectError> {
        let owner_class = registry
            .get(owner)
            .and_then(|t| t.class_id())
            .ok_or_else(|| ReflectError::NotAClass {
                ty: registry.display(owner),
            })?;
        let class_name = registry
            .class(owner_class)
            .ok_or(ReflectError::Model(ModelError::UnknownClass {
                id: owner_class,
            }))?
            .name
            .clone();

        let mut builder = Builder {
            registry,
            resolver: TypeResolver::new(registry),
            policy,
            owner,
            owner_class,
            class_name,
            get_invokers: FxHashMap::default(),
            set_invokers: FxHashMap::default(),
            get_types: FxHashMap::default(),
            set_types: FxHashMap::default(),
            default_constructor: None,
        };

        builder.find_default_constructor();
        let methods = builder.collect_class_methods();
        builder.add_get_methods(&methods)?;
        builder.add_set_methods(&methods)?;
        builder.add_fields(owner_class);
        Ok(builder.build())
    }

    /// The introspected type
    pub fn owner(&self) -> TypeId {
        self.owner
    }

    /// The class behind the introspected type
    pub fn owner_class(&self) -> ClassId {
        self.owner_class
    }

    /// Name of the class behind the introspected type
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Read capability for a property
    pub fn get_invoker(&self, property: &str) -> Result<&Invoker, ReflectError> {
        self.get_invokers
            .get(property)
            .ok_or_else(|| self.no_such_property(property))
    }

    /// Write capability for a property
    pub fn set_invoker(&self, property: &str) -> Result<&Invoker, ReflectError> {
        self.set_invokers
            .get(property)
            .ok_or_else(|| self.no_such_property(property))
    }

    /// Declared type of a property as seen through its getter
    pub fn getter_type(&self, property: &str) -> Result<TypeId, ReflectError> {
        self.get_types
            .get(property)
            .copied()
            .ok_or_else(|| self.no_such_property(property))
    }

    /// Declared type of a property as seen through its setter
    pub fn setter_type(&self, property: &str) -> Result<TypeId, ReflectError> {
        self.set_types
            .get(property)
            .copied()
            .ok_or_else(|| self.no_such_property(property))
    }

    /// Readable property names, sorted
    pub fn readable_names(&self) -> &[String] {
        &self.readable
    }

    /// Writable property names, sorted
    pub fn writable_names(&self) -> &[String] {
        &self.writable
    }

    /// Check whether a property is readable
    pub fn has_getter(&self, property: &str) -> bool {
        self.get_invokers.contains_key(property)
    }

    /// Check whether a property is writable
    pub fn has_setter(&self, property: &str) -> bool {
        self.set_invokers.contains_key(property)
    }

    /// Resolve arbitrary-case input to the canonical property name
    pub fn find_property(&self, name: &str) -> Option<&str> {
        self.case_insensitive
            .get(&name.to_uppercase())
            .map(String::as_str)
    }

    /// The zero-argument constructor, if the type has a reachable one
    pub fn default_constructor(&self) -> Result<&ConstructorDef, ReflectError> {
        self.default_constructor
            .as_ref()
            .ok_or_else(|| ReflectError::NoDefaultConstructor {
                class: self.class_name.clone(),
            })
    }

    /// Check whether the type has a reachable zero-argument constructor
    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }

    fn no_such_property(&self, property: &str) -> ReflectError {
        ReflectError::NoSuchProperty {
            property: property.to_string(),
            class: self.class_name.clone(),
        }
    }
}

/// In-progress metadata; only [`Builder::build`] hands out a finished value
struct Builder<'a> {
    registry: &'a TypeRegistry,
    resolver: TypeResolver<'a>,
    policy: ReflectionPolicy,
    owner: TypeId,
    owner_class: ClassId,
    class_name: String,
    get_invokers: FxHashMap<String, Invoker>,
    set_invokers: FxHashMap<String, Invoker>,
    get_types: FxHashMap<String, TypeId>,
    set_types: FxHashMap<String, TypeId>,
    default_constructor: Option<ConstructorDef>,
}

impl<'a> Builder<'a> {
    fn find_default_constructor(&mut self) {
        let Some(def) = self.registry.class(self.owner_class) else {
            return;
        };
        for ctor in &def.constructors {
            if ctor.params.is_empty() && self.policy.member_accessible(ctor.visibility) {
                self.default_constructor = Some(ctor.clone());
            }
        }
    }

    /// Every method on the class, its superclass chain and all interfaces,
    /// deduplicated by signature so the most-derived declaration wins
    fn collect_class_methods(&self) -> Vec<(ClassId, MethodDef)> {
        let mut unique: FxHashMap<String, (ClassId, MethodDef)> = FxHashMap::default();
        let mut seen_interfaces = FxHashSet::default();

        let mut current = Some(self.owner_class);
        while let Some(class_id) = current {
            let Some(def) = self.registry.class(class_id) else {
                break;
            };
            self.add_unique_methods(&mut unique, class_id, &def.methods);
            for &iface in &def.implements {
                self.add_interface_methods(&mut unique, iface, &mut seen_interfaces);
            }
            current = self.registry.superclass_of(class_id);
        }

        unique.into_values().collect()
    }

    fn add_interface_methods(
        &self,
        unique: &mut FxHashMap<String, (ClassId, MethodDef)>,
        iface_ty: TypeId,
        seen: &mut FxHashSet<ClassId>,
    ) {
        let Some(class_id) = self.registry.get(iface_ty).and_then(|t| t.class_id()) else {
            return;
        };
        if !seen.insert(class_id) {
            return;
        }
        let Some(def) = self.registry.class(class_id) else {
            return;
        };
        self.add_unique_methods(unique, class_id, &def.methods);
        if let Some(extends) = def.extends {
            self.add_interface_methods(unique, extends, seen);
        }
        for &sup in &def.implements {
            self.add_interface_methods(unique, sup, seen);
        }
    }

    fn add_unique_methods(
        &self,
        unique: &mut FxHashMap<String, (ClassId, MethodDef)>,
        declaring: ClassId,
        methods: &[MethodDef],
    ) {
        for method in methods {
            if method.is_synthetic {
                continue;
            }
            if !self.policy.member_accessible(method.visibility) {
                continue;
            }
            let signature = Self::signature(method);
            // The walk goes most-derived first, so an identical signature
            // lower in the hierarchy is shadowed
            unique
                .entry(signature)
                .or_insert_with(|| (declaring, method.clone()));
        }
    }

    /// Signature from return type, name and ordered parameter types; two
    /// methods collide only if all three agree
    fn signature(method: &MethodDef) -> String {
        let params: Vec<String> = method.params.iter().map(|p| p.to_string()).collect();
        format!("{}#{}:{}", method.return_type, method.name, params.join(","))
    }

    fn add_get_methods(&mut self, methods: &[(ClassId, MethodDef)]) -> Result<(), ReflectError> {
        let mut conflicts: FxHashMap<String, Vec<&(ClassId, MethodDef)>> = FxHashMap::default();
        for entry in methods {
            let method = &entry.1;
            if !method.params.is_empty() || !naming::is_getter_name(&method.name) {
                continue;
            }
            if let Some(property) = naming::method_to_property(&method.name) {
                conflicts.entry(property).or_default().push(entry);
            }
        }
        for (property, candidates) in conflicts {
            self.resolve_getter_conflict(&property, &candidates)?;
        }
        Ok(())
    }

    fn resolve_getter_conflict(
        &mut self,
        property: &str,
        candidates: &[&(ClassId, MethodDef)],
    ) -> Result<(), ReflectError> {
        let assign = AssignContext::new(self.registry);
        let mut best = candidates[0];
        for &candidate in &candidates[1..] {
            let best_ty = best.1.return_type;
            let candidate_ty = candidate.1.return_type;
            if candidate_ty == best_ty {
                // Same property, same return type, different signatures:
                // there is no rule that orders them
                return Err(self.ambiguous(property));
            } else if assign.is_assignable(candidate_ty, best_ty) {
                // Candidate returns a supertype; current best stays
            } else if assign.is_assignable(best_ty, candidate_ty) {
                best = candidate;
            } else {
                return Err(self.ambiguous(property));
            }
        }
        let (declaring, method) = best;
        self.add_get_method(property, *declaring, method);
        Ok(())
    }

    fn add_get_method(&mut self, property: &str, declaring: ClassId, method: &MethodDef) {
        if !is_valid_property_name(property) {
            return;
        }
        let resolved = self
            .resolver
            .resolve_member_type(method.return_type, self.owner, declaring);
        self.get_types.insert(property.to_string(), resolved);
        self.get_invokers.insert(
            property.to_string(),
            Invoker::Method {
                method: method.clone(),
            },
        );
    }

    fn add_set_methods(&mut self, methods: &[(ClassId, MethodDef)]) -> Result<(), ReflectError> {
        let mut conflicts: FxHashMap<String, Vec<&(ClassId, MethodDef)>> = FxHashMap::default();
        for entry in methods {
            let method = &entry.1;
            if method.params.len() != 1 || !naming::is_setter_name(&method.name) {
                continue;
            }
            if let Some(property) = naming::method_to_property(&method.name) {
                conflicts.entry(property).or_default().push(entry);
            }
        }
        for (property, candidates) in conflicts {
            self.resolve_setter_conflict(&property, &candidates)?;
        }
        Ok(())
    }

    fn resolve_setter_conflict(
        &mut self,
        property: &str,
        candidates: &[&(ClassId, MethodDef)],
    ) -> Result<(), ReflectError> {
        if let [single] = candidates {
            let (declaring, method) = single;
            self.add_set_method(property, *declaring, method);
            return Ok(());
        }

        // Overloaded setters are ordered by the getter's resolved type: the
        // one whose parameter matches it exactly wins
        let expected = match self.get_types.get(property) {
            Some(&ty) => ty,
            None => return Err(self.ambiguous(property)),
        };
        for candidate in candidates.iter().copied() {
            let (declaring, method) = candidate;
            let resolved = self
                .resolver
                .resolve_member_type(method.params[0], self.owner, *declaring);
            if resolved == expected {
                self.add_set_method(property, *declaring, method);
                return Ok(());
            }
        }
        Err(self.ambiguous(property))
    }

    fn add_set_method(&mut self, property: &str, declaring: ClassId, method: &MethodDef) {
        if !is_valid_property_name(property) {
            return;
        }
        let resolved = self
            .resolver
            .resolve_member_type(method.params[0], self.owner, declaring);
        self.set_types.insert(property.to_string(), resolved);
        self.set_invokers.insert(
            property.to_string(),
            Invoker::Method {
                method: method.clone(),
            },
        );
    }

    /// Raw-field fallback for names no accessor claims, own class first,
    /// then each superclass in turn
    fn add_fields(&mut self, class_id: ClassId) {
        let Some(def) = self.registry.class(class_id) else {
            return;
        };
        for field in &def.fields {
            if !self.policy.member_accessible(field.visibility) {
                continue;
            }
            if !self.set_invokers.contains_key(&field.name) {
                // Class constants can only be set by the loader; plain
                // readonly instance fields keep their write capability
                if !(field.is_readonly && field.is_static) {
                    self.add_set_field(class_id, field);
                }
            }
            if !self.get_invokers.contains_key(&field.name) {
                self.add_get_field(class_id, field);
            }
        }
        if let Some(superclass) = self.registry.superclass_of(class_id) {
            self.add_fields(superclass);
        }
    }

    fn add_get_field(&mut self, declaring: ClassId, field: &FieldDef) {
        if !is_valid_property_name(&field.name) {
            return;
        }
        let resolved = self
            .resolver
            .resolve_member_type(field.ty, self.owner, declaring);
        self.get_types.insert(field.name.clone(), resolved);
        self.get_invokers.insert(
            field.name.clone(),
            Invoker::GetField {
                field: field.clone(),
            },
        );
    }

    fn add_set_field(&mut self, declaring: ClassId, field: &FieldDef) {
        if !is_valid_property_name(&field.name) {
            return;
        }
        let resolved = self
            .resolver
            .resolve_member_type(field.ty, self.owner, declaring);
        self.set_types.insert(field.name.clone(), resolved);
        self.set_invokers.insert(
            field.name.clone(),
            Invoker::SetField {
                field: field.clone(),
            },
        );
    }

    fn ambiguous(&self, property: &str) -> ReflectError {
        ReflectError::AmbiguousAccessor {
            property: property.to_string(),
            class: self.class_name.clone(),
        }
    }

    fn build(self) -> TypeIntrospector {
        let mut readable: Vec<String> = self.get_invokers.keys().cloned().collect();
        readable.sort();
        let mut writable: Vec<String> = self.set_invokers.keys().cloned().collect();
        writable.sort();

        let mut case_insensitive = FxHashMap::default();
        for name in readable.iter().chain(writable.iter()) {
            case_insensitive.insert(name.to_uppercase(), name.clone());
        }

        TypeIntrospector {
            owner: self.owner,
            owner_class: self.owner_class,
            class_name: self.class_name,
            readable,
            writable,
            get_invokers: self.get_invokers,
            set_invokers: self.set_invokers,
            get_types: self.get_types,
            set_types: self.set_types,
            default_constructor: self.default_constructor,
            case_insensitive,
        }
    }
}
