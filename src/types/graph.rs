//! Type graph construction
//!
//! Builders that turn parsed declarations into registered types: object and
//! enum entry collection with name/tag uniqueness, dictionary key checks,
//! and dependency sets.

use indexmap::IndexSet;

use crate::types::registry::Registry;
use crate::types::type_system::*;
use crate::utils::{Error, Location, Result};

/// Wrap a type reference in `(ARRAY T)`
pub fn array_of(inner: DefinedType) -> DefinedType {
    DefinedType::ArrayOf(Box::new(inner))
}

/// Build `(DICT key_field T)`.
///
/// `value` must be an object or polymorph exposing `key_field`, and that
/// field must resolve to a primitive or an enum.
pub fn dict_of(
    registry: &Registry,
    key_field: &str,
    value: DefinedType,
    location: &Location,
) -> Result<DefinedType> {
    let not_keyable = || Error::NotKeyable {
        field: key_field.to_string(),
        type_name: registry.display(&value),
        location: location.clone(),
    };

    let value_id = value.as_named().ok_or_else(not_keyable)?;
    let value_def = registry.get(value_id);

    let field = match &value_def.kind {
        TypeKind::Object(o) => o
            .entry(key_field)
            .or_else(|| o.entry_by_tag(key_field))
            .map(|e| &e.ty),
        TypeKind::Polymorph(_) => registry.field_of(value_id, key_field).map(|f| f.ty),
        TypeKind::Primitive(_) | TypeKind::Enum(_) => return Err(not_keyable()),
    };

    let field_ty = field.ok_or_else(|| Error::UnknownField {
        field: key_field.to_string(),
        type_name: value_def.name.clone(),
        location: location.clone(),
    })?;

    match field_ty.as_named() {
        Some(key_type) if registry.is_keyable(key_type) => Ok(DefinedType::DictOf(Box::new(DictOf {
            key_field: key_field.to_string(),
            key_type,
            value,
        }))),
        _ => Err(Error::InvalidKeyType {
            field: key_field.to_string(),
            type_name: value_def.name.clone(),
            key_type: registry.display(field_ty),
            location: location.clone(),
        }),
    }
}

/// Add lowercase markers to a marker set
pub fn add_markers(markers: &mut IndexSet<String>, names: impl IntoIterator<Item = String>) {
    markers.extend(names.into_iter().map(|m| m.to_ascii_lowercase()));
}

// ==================== Objects ====================

/// Collects the entries of an `(OBJECT ...)` declaration
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    object: ObjectType,
    markers: IndexSet<String>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Without a tag, `"f"` followed by the entry's zero-based
    /// ordinal is used.
    pub fn add_entry(
        &mut self,
        name: String,
        tag: Option<String>,
        ty: DefinedType,
        location: Location,
    ) -> Result<()> {
        let tag = tag.unwrap_or_else(|| format!("f{}", self.object.len()));

        if self.object.contains_name(&name) {
            return Err(Error::DuplicateEntryName { name, location });
        }
        if self.object.contains_tag(&tag) {
            return Err(Error::DuplicateTag { tag, location });
        }

        self.object.push(ObjectEntry { name, tag, ty, location });
        Ok(())
    }

    pub fn add_markers(&mut self, names: Vec<String>) {
        add_markers(&mut self.markers, names);
    }

    /// Compute dependencies and produce the definition to register
    pub fn finish(mut self, registry: &Registry, name: String, location: Location) -> TypeDef {
        let dependencies: IndexSet<TypeId> = self
            .object
            .entries()
            .flat_map(|e| registry.user_dependencies(&e.ty))
            .collect();
        self.object.dependencies = dependencies;

        TypeDef {
            name,
            location: Some(location),
            markers: self.markers,
            kind: TypeKind::Object(self.object),
        }
    }
}

// ==================== Enums ====================

/// Collects the entries of an `(ENUM ...)` declaration
#[derive(Debug)]
pub struct EnumBuilder {
    enumeration: EnumType,
    markers: IndexSet<String>,
}

impl EnumBuilder {
    /// Start an enum over `base`, which must be a primitive
    pub fn new(registry: &Registry, name: &str, base: &DefinedType, location: &Location) -> Result<Self> {
        match base.as_named() {
            Some(id) if matches!(registry.get(id).kind, TypeKind::Primitive(_)) => Ok(Self {
                enumeration: EnumType::new(id),
                markers: IndexSet::new(),
            }),
            _ => Err(Error::InvalidEnumBase {
                name: name.to_string(),
                base: registry.display(base),
                location: location.clone(),
            }),
        }
    }

    pub fn add_entry(&mut self, name: String, tag: String, location: Location) -> Result<()> {
        if self.enumeration.contains_name(&name) {
            return Err(Error::DuplicateEntryName { name, location });
        }
        if self.enumeration.contains_tag(&tag) {
            return Err(Error::DuplicateTag { tag, location });
        }

        self.enumeration.push(EnumEntry { name, tag, location });
        Ok(())
    }

    pub fn add_markers(&mut self, names: Vec<String>) {
        add_markers(&mut self.markers, names);
    }

    pub fn finish(self, name: String, location: Location) -> TypeDef {
        TypeDef {
            name,
            location: Some(location),
            markers: self.markers,
            kind: TypeKind::Enum(self.enumeration),
        }
    }
}
