//! Polymorph resolution
//!
//! Checks that every case of a tagged union carries the discriminant field
//! under one tag and one enum type, binds each case to the enum entry of the
//! same name, and proves declared shared fields identical across cases.

use indexmap::{IndexMap, IndexSet};

use crate::types::registry::{FieldRef, Registry};
use crate::types::type_system::*;
use crate::utils::{Error, Location, Result};

/// A `(CASE name type)` clause before resolution
#[derive(Debug, Clone)]
struct CaseDecl {
    name: String,
    ty: DefinedType,
    location: Location,
}

/// Collects the clauses of a `(POLYMORPH ...)` declaration
#[derive(Debug)]
pub struct PolymorphBuilder {
    discriminant: String,
    cases: Vec<CaseDecl>,
    shared: IndexMap<String, Location>,
    markers: IndexSet<String>,
}

impl PolymorphBuilder {
    pub fn new(discriminant: String) -> Self {
        Self {
            discriminant,
            cases: Vec::new(),
            shared: IndexMap::new(),
            markers: IndexSet::new(),
        }
    }

    pub fn add_case(&mut self, name: String, ty: DefinedType, location: Location) -> Result<()> {
        if self.cases.iter().any(|c| c.name == name) {
            return Err(Error::DuplicateCase { name, location });
        }

        self.cases.push(CaseDecl { name, ty, location });
        Ok(())
    }

    pub fn add_shared(&mut self, name: String, location: Location) -> Result<()> {
        if self.shared.contains_key(&name) {
            return Err(Error::DuplicateShared { name, location });
        }

        self.shared.insert(name, location);
        Ok(())
    }

    pub fn add_markers(&mut self, names: Vec<String>) {
        crate::types::graph::add_markers(&mut self.markers, names);
    }

    /// Validate every case and produce the definition to register
    pub fn resolve(self, registry: &Registry, name: String, location: Location) -> Result<TypeDef> {
        let case_types = self.case_types(registry)?;

        let discriminant = self.fields_in_cases(registry, &case_types, &self.discriminant, None)?;
        let Some(((first_case, first), rest)) = discriminant.split_first() else {
            return Err(Error::NoCases { name, location });
        };

        let not_enum = |case: &CaseDecl, ty: &DefinedType| Error::DiscriminantNotEnum {
            field: self.discriminant.clone(),
            case: case.name.clone(),
            type_name: registry.display(ty),
            location: case.location.clone(),
        };
        let (enum_type, enumeration) = first
            .ty
            .as_named()
            .and_then(|id| registry.get(id).as_enum().map(|e| (id, e)))
            .ok_or_else(|| not_enum(first_case, first.ty))?;

        for (case, found) in rest {
            if found.tag != first.tag {
                return Err(Error::DiscriminantTagMismatch {
                    field: self.discriminant.clone(),
                    case: case.name.clone(),
                    tag: found.tag.to_string(),
                    first_case: first_case.name.clone(),
                    first_tag: first.tag.to_string(),
                    location: case.location.clone(),
                });
            }
            if found.ty != first.ty {
                let is_enum = found.ty.as_named().map_or(false, |id| registry.get(id).as_enum().is_some());
                if !is_enum {
                    return Err(not_enum(case, found.ty));
                }
                return Err(Error::DiscriminantEnumMismatch {
                    field: self.discriminant.clone(),
                    case: case.name.clone(),
                    expected: registry.display(first.ty),
                    got: registry.display(found.ty),
                    location: case.location.clone(),
                });
            }
        }
        let discriminant_tag = first.tag.to_string();

        let mut cases = IndexMap::new();
        for (case, &ty) in self.cases.iter().zip(&case_types) {
            let entry = enumeration.entry(&case.name).ok_or_else(|| Error::UnknownEnumEntry {
                enum_name: registry.name_of(enum_type).to_string(),
                entry: case.name.clone(),
                location: case.location.clone(),
            })?;

            cases.insert(
                case.name.clone(),
                PolymorphCase {
                    name: case.name.clone(),
                    ty,
                    enum_entry: entry.name.clone(),
                    location: case.location.clone(),
                },
            );
        }

        let mut shared = IndexMap::new();
        for (field, field_location) in &self.shared {
            let found = self.fields_in_cases(registry, &case_types, field, Some(field_location))?;
            let shared_field = unify(registry, field, &found)?;
            shared.insert(field.clone(), shared_field);
        }

        let mut dependencies = IndexSet::new();
        dependencies.insert(enum_type);
        dependencies.extend(case_types.iter().copied());
        for field in shared.values() {
            dependencies.extend(registry.user_dependencies(&field.ty));
        }

        Ok(TypeDef {
            name,
            location: Some(location),
            markers: self.markers,
            kind: TypeKind::Polymorph(PolymorphType {
                discriminant: self.discriminant,
                discriminant_tag,
                enum_type,
                discriminant_type: DefinedType::Named(enum_type),
                cases,
                shared,
                dependencies,
            }),
        })
    }

    /// Each case must name an object or a nested polymorph
    fn case_types(&self, registry: &Registry) -> Result<Vec<TypeId>> {
        self.cases
            .iter()
            .map(|case| {
                let invalid = || Error::InvalidCaseType {
                    case: case.name.clone(),
                    type_name: registry.display(&case.ty),
                    location: case.location.clone(),
                };

                let id = case.ty.as_named().ok_or_else(invalid)?;
                match registry.get(id).kind {
                    TypeKind::Object(_) | TypeKind::Polymorph(_) => Ok(id),
                    TypeKind::Primitive(_) | TypeKind::Enum(_) => Err(invalid()),
                }
            })
            .collect()
    }

    /// Look up `field` in every case, in declaration order. A missing field
    /// is reported at `location`, or at the case when none is given.
    fn fields_in_cases<'a>(
        &'a self,
        registry: &'a Registry,
        case_types: &[TypeId],
        field: &str,
        location: Option<&Location>,
    ) -> Result<Vec<(&'a CaseDecl, FieldRef<'a>)>> {
        self.cases
            .iter()
            .zip(case_types)
            .map(|(case, &ty)| {
                registry
                    .field_of(ty, field)
                    .map(|found| (case, found))
                    .ok_or_else(|| Error::UnknownField {
                        field: field.to_string(),
                        type_name: registry.name_of(ty).to_string(),
                        location: location.unwrap_or(&case.location).clone(),
                    })
            })
            .collect()
    }
}

/// Prove a shared field has one type and tag across every case
fn unify(registry: &Registry, field: &str, found: &[(&CaseDecl, FieldRef<'_>)]) -> Result<SharedField> {
    let Some(((first_case, first), rest)) = found.split_first() else {
        return Err(Error::UnknownField {
            field: field.to_string(),
            type_name: String::new(),
            location: Location::default(),
        });
    };

    for (case, seen) in rest {
        if seen.ty != first.ty {
            return Err(Error::SharedTypeMismatch {
                field: field.to_string(),
                case: case.name.clone(),
                first_case: first_case.name.clone(),
                expected: registry.display(first.ty),
                got: registry.display(seen.ty),
                location: case.location.clone(),
            });
        }
        if seen.tag != first.tag {
            return Err(Error::SharedTagMismatch {
                field: field.to_string(),
                case: case.name.clone(),
                tag: seen.tag.to_string(),
                first_case: first_case.name.clone(),
                first_tag: first.tag.to_string(),
                location: case.location.clone(),
            });
        }
    }

    Ok(SharedField {
        name: field.to_string(),
        tag: first.tag.to_string(),
        ty: first.ty.clone(),
    })
}
