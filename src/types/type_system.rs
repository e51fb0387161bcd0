//! Type model for Dragoman schemas
//!
//! Every named type lives in the [`Registry`](crate::types::Registry) as a
//! [`TypeDef`]. References to types (entry types, case types, dictionary
//! keys) are [`DefinedType`] values, which either name a registered type or
//! wrap another reference in an array or dictionary.

use indexmap::{IndexMap, IndexSet};

use crate::utils::Location;

/// Index of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

/// Built-in types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Boolean,
    Float,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 4] = [
        PrimitiveType::String,
        PrimitiveType::Integer,
        PrimitiveType::Boolean,
        PrimitiveType::Float,
    ];

    /// Name the type is registered under
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
        }
    }
}

/// A type reference, as written wherever a type is expected
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefinedType {
    /// A registered type (primitive, object, enum or polymorph)
    Named(TypeId),
    /// `(ARRAY T)`
    ArrayOf(Box<DefinedType>),
    /// `(DICT key T)`
    DictOf(Box<DictOf>),
}

/// A dictionary of `value`, keyed by one of the value's fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictOf {
    /// Field of the value type used as key
    pub key_field: String,
    /// Resolved type of the key field (a primitive or an enum)
    pub key_type: TypeId,
    pub value: DefinedType,
}

impl DefinedType {
    /// Count nested array wrappers and return the innermost non-array type
    pub fn array_depth(&self) -> (usize, &DefinedType) {
        let mut depth = 0;
        let mut current = self;

        while let DefinedType::ArrayOf(inner) = current {
            depth += 1;
            current = inner;
        }

        (depth, current)
    }

    /// The registered type this reference names, if it is not a wrapper
    pub fn as_named(&self) -> Option<TypeId> {
        match self {
            DefinedType::Named(id) => Some(*id),
            DefinedType::ArrayOf(_) | DefinedType::DictOf(_) => None,
        }
    }

    /// Registered types reached by unwrapping arrays and dictionaries
    pub fn leaves(&self) -> Vec<TypeId> {
        match self {
            DefinedType::Named(id) => vec![*id],
            DefinedType::ArrayOf(inner) => inner.leaves(),
            DefinedType::DictOf(dict) => {
                let mut result = vec![dict.key_type];
                result.extend(dict.value.leaves());
                result
            }
        }
    }
}

/// A registered type
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    /// Declaration site; `None` for built-ins
    pub location: Option<Location>,
    /// Free-form annotations for emitters
    pub markers: IndexSet<String>,
    pub kind: TypeKind,
}

impl TypeDef {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            name: primitive.name().to_string(),
            location: None,
            markers: IndexSet::new(),
            kind: TypeKind::Primitive(primitive),
        }
    }

    pub fn is_user_defined(&self) -> bool {
        !matches!(self.kind, TypeKind::Primitive(_))
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match &self.kind {
            TypeKind::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match &self.kind {
            TypeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_polymorph(&self) -> Option<&PolymorphType> {
        match &self.kind {
            TypeKind::Polymorph(p) => Some(p),
            _ => None,
        }
    }

    /// Types this definition needs declared before it
    pub fn dependencies(&self) -> Option<&IndexSet<TypeId>> {
        match &self.kind {
            TypeKind::Primitive(_) | TypeKind::Enum(_) => None,
            TypeKind::Object(o) => Some(&o.dependencies),
            TypeKind::Polymorph(p) => Some(&p.dependencies),
        }
    }
}

/// What a registered type is
#[derive(Debug, Clone)]
pub enum TypeKind {
    Primitive(PrimitiveType),
    Object(ObjectType),
    Enum(EnumType),
    Polymorph(PolymorphType),
}

impl TypeKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TypeKind::Primitive(_) => "primitive",
            TypeKind::Object(_) => "object",
            TypeKind::Enum(_) => "enum",
            TypeKind::Polymorph(_) => "polymorph",
        }
    }
}

// ==================== Objects ====================

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    pub name: String,
    pub tag: String,
    pub ty: DefinedType,
    pub location: Location,
}

/// A record type. Entries keep their declaration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectType {
    entries: IndexMap<String, ObjectEntry>,
    /// Tag -> entry name
    tags: IndexMap<String, String>,
    /// User-defined types reached through entry types
    pub dependencies: IndexSet<TypeId>,
}

impl ObjectType {
    pub fn entries(&self) -> impl Iterator<Item = &ObjectEntry> {
        self.entries.values()
    }

    pub fn entry(&self, name: &str) -> Option<&ObjectEntry> {
        self.entries.get(name)
    }

    pub fn entry_by_tag(&self, tag: &str) -> Option<&ObjectEntry> {
        self.tags.get(tag).and_then(|name| self.entries.get(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Append an entry; name and tag uniqueness is checked by the caller
    pub(crate) fn push(&mut self, entry: ObjectEntry) {
        self.tags.insert(entry.tag.clone(), entry.name.clone());
        self.entries.insert(entry.name.clone(), entry);
    }
}

// ==================== Enums ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    pub name: String,
    pub tag: String,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct EnumType {
    /// Primitive the enum is written as on the wire
    pub base: TypeId,
    entries: IndexMap<String, EnumEntry>,
    tags: IndexMap<String, String>,
}

impl EnumType {
    pub fn new(base: TypeId) -> Self {
        Self {
            base,
            entries: IndexMap::new(),
            tags: IndexMap::new(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &EnumEntry> {
        self.entries.values()
    }

    pub fn entry(&self, name: &str) -> Option<&EnumEntry> {
        self.entries.get(name)
    }

    pub fn entry_by_tag(&self, tag: &str) -> Option<&EnumEntry> {
        self.tags.get(tag).and_then(|name| self.entries.get(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub(crate) fn push(&mut self, entry: EnumEntry) {
        self.tags.insert(entry.tag.clone(), entry.name.clone());
        self.entries.insert(entry.name.clone(), entry);
    }
}

// ==================== Polymorphs ====================

/// One case of a tagged union
#[derive(Debug, Clone, PartialEq)]
pub struct PolymorphCase {
    pub name: String,
    /// An object, or a nested polymorph
    pub ty: TypeId,
    /// Name of the enum entry this case is bound to
    pub enum_entry: String,
    pub location: Location,
}

/// A field proven identical across every case
#[derive(Debug, Clone, PartialEq)]
pub struct SharedField {
    pub name: String,
    pub tag: String,
    pub ty: DefinedType,
}

/// A tagged union
#[derive(Debug, Clone)]
pub struct PolymorphType {
    /// Name of the discriminant field
    pub discriminant: String,
    /// Tag the discriminant field uses in every case
    pub discriminant_tag: String,
    /// Enum the discriminant field is typed with
    pub enum_type: TypeId,
    /// `DefinedType::Named(enum_type)`, the discriminant as a field type
    pub discriminant_type: DefinedType,
    pub cases: IndexMap<String, PolymorphCase>,
    pub shared: IndexMap<String, SharedField>,
    pub dependencies: IndexSet<TypeId>,
}

impl PolymorphType {
    pub fn case(&self, name: &str) -> Option<&PolymorphCase> {
        self.cases.get(name)
    }

    pub fn shared_field(&self, name: &str) -> Option<&SharedField> {
        self.shared.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_array_depth() {
        let leaf = DefinedType::Named(TypeId(0));
        let nested = DefinedType::ArrayOf(Box::new(DefinedType::ArrayOf(Box::new(leaf.clone()))));

        assert_eq!(nested.array_depth(), (2, &leaf));
        assert_eq!(leaf.array_depth(), (0, &leaf));
    }

    #[test]
    fn test_leaves_unwrap_dictionaries() {
        let dict = DefinedType::DictOf(Box::new(DictOf {
            key_field: "kind".into(),
            key_type: TypeId(4),
            value: DefinedType::ArrayOf(Box::new(DefinedType::Named(TypeId(5)))),
        }));

        assert_eq!(dict.leaves(), vec![TypeId(4), TypeId(5)]);
        assert_eq!(dict.as_named(), None);
    }
}
