//! Type registry
//!
//! Global catalog of every named type in a compilation run. Types are
//! appended once and never removed or changed afterwards; the finished
//! registry is the query surface handed to emitters.

use std::collections::HashMap;

use crate::types::type_system::*;
use crate::utils::{Error, Result};

/// A field as seen from outside a type: its resolved type and wire tag
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef<'a> {
    pub ty: &'a DefinedType,
    pub tag: &'a str,
}

/// All registered types, in registration order
#[derive(Debug, Clone)]
pub struct Registry {
    types: Vec<TypeDef>,
    by_name: HashMap<String, TypeId>,
}

impl Registry {
    /// Create a registry holding only the built-in primitives
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        };

        for primitive in PrimitiveType::ALL {
            let id = TypeId(registry.types.len());
            registry.by_name.insert(primitive.name().to_string(), id);
            registry.types.push(TypeDef::primitive(primitive));
        }

        registry
    }

    /// Register a user-defined type. Fails if the name is already taken.
    pub fn register(&mut self, def: TypeDef) -> Result<TypeId> {
        let location = def.location.clone().unwrap_or_default();

        if let Some(existing) = self.lookup(&def.name) {
            let existing = self.get(existing);
            return Err(match &existing.location {
                Some(previous) => Error::DuplicateType {
                    name: def.name,
                    previous: previous.clone(),
                    location,
                },
                None => Error::BuiltinCollision { name: def.name, location },
            });
        }

        let id = TypeId(self.types.len());
        self.by_name.insert(def.name.clone(), id);
        self.types.push(def);

        Ok(id)
    }

    /// Find a type by name
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Get a type definition
    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }

    /// Get a type definition by name
    pub fn get_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.lookup(name).map(|id| self.get(id))
    }

    pub fn name_of(&self, id: TypeId) -> &str {
        &self.get(id).name
    }

    /// Names of all registered types, in registration order
    pub fn names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.name.clone()).collect()
    }

    /// All types, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types.iter().enumerate().map(|(i, t)| (TypeId(i), t))
    }

    pub fn objects(&self) -> impl Iterator<Item = (&TypeDef, &ObjectType)> {
        self.types.iter().filter_map(|t| t.as_object().map(|o| (t, o)))
    }

    pub fn enums(&self) -> impl Iterator<Item = (&TypeDef, &EnumType)> {
        self.types.iter().filter_map(|t| t.as_enum().map(|e| (t, e)))
    }

    pub fn polymorphs(&self) -> impl Iterator<Item = (&TypeDef, &PolymorphType)> {
        self.types.iter().filter_map(|t| t.as_polymorph().map(|p| (t, p)))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// True for primitives and enums, the types a dictionary can be keyed by
    pub fn is_keyable(&self, id: TypeId) -> bool {
        match self.get(id).kind {
            TypeKind::Primitive(_) | TypeKind::Enum(_) => true,
            TypeKind::Object(_) | TypeKind::Polymorph(_) => false,
        }
    }

    /// Look up a field of an object, or the discriminant/shared field of a
    /// polymorph
    pub fn field_of(&self, id: TypeId, name: &str) -> Option<FieldRef<'_>> {
        match &self.get(id).kind {
            TypeKind::Object(o) => o.entry(name).map(|e| FieldRef { ty: &e.ty, tag: &e.tag }),
            TypeKind::Polymorph(p) => {
                if p.discriminant == name {
                    Some(FieldRef { ty: &p.discriminant_type, tag: &p.discriminant_tag })
                } else {
                    p.shared_field(name).map(|f| FieldRef { ty: &f.ty, tag: &f.tag })
                }
            }
            TypeKind::Primitive(_) | TypeKind::Enum(_) => None,
        }
    }

    /// Render a type reference for diagnostics and listings
    pub fn display(&self, ty: &DefinedType) -> String {
        match ty {
            DefinedType::Named(id) => self.name_of(*id).to_string(),
            DefinedType::ArrayOf(inner) => format!("(Array of {})", self.display(inner)),
            DefinedType::DictOf(dict) => format!(
                "(Dict of {} by {}: {})",
                self.display(&dict.value),
                dict.key_field,
                self.name_of(dict.key_type)
            ),
        }
    }

    /// User-defined types reached by unwrapping `ty`
    pub fn user_dependencies(&self, ty: &DefinedType) -> Vec<TypeId> {
        ty.leaves()
            .into_iter()
            .filter(|id| self.get(*id).is_user_defined())
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
