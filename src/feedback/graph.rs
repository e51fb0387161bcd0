//! Serializable snapshot of a finished type graph
//!
//! Type references are rendered by name so the snapshot can be read without
//! the registry.

use serde::Serialize;

use crate::types::{Registry, TypeDef, TypeKind};
use crate::utils::naming::split_name;
use crate::utils::Location;

#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub types: Vec<TypeSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub name: String,
    /// `name` as lowercase words, for emitters that re-case it
    pub words: Vec<String>,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntrySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminant: Option<EntrySummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cases: Vec<CaseSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shared: Vec<EntrySummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySummary {
    pub name: String,
    pub tag: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub enum_entry: String,
}

impl GraphSnapshot {
    /// Summarize every user-defined type, in registration order
    pub fn from_registry(registry: &Registry) -> Self {
        let types = registry
            .iter()
            .map(|(_, def)| def)
            .filter(|def| def.is_user_defined())
            .map(|def| summarize(registry, def))
            .collect();

        Self { types }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn summarize(registry: &Registry, def: &TypeDef) -> TypeSummary {
    let mut summary = TypeSummary {
        name: def.name.clone(),
        words: split_name(&def.name),
        kind: def.kind.describe(),
        location: def.location.clone(),
        markers: def.markers.iter().cloned().collect(),
        base: None,
        entries: Vec::new(),
        discriminant: None,
        cases: Vec::new(),
        shared: Vec::new(),
        dependencies: def
            .dependencies()
            .map(|deps| deps.iter().map(|id| registry.name_of(*id).to_string()).collect())
            .unwrap_or_default(),
    };

    match &def.kind {
        TypeKind::Primitive(_) => {}
        TypeKind::Object(object) => {
            summary.entries = object
                .entries()
                .map(|e| EntrySummary {
                    name: e.name.clone(),
                    tag: e.tag.clone(),
                    ty: Some(registry.display(&e.ty)),
                })
                .collect();
        }
        TypeKind::Enum(enumeration) => {
            summary.base = Some(registry.name_of(enumeration.base).to_string());
            summary.entries = enumeration
                .entries()
                .map(|e| EntrySummary {
                    name: e.name.clone(),
                    tag: e.tag.clone(),
                    ty: None,
                })
                .collect();
        }
        TypeKind::Polymorph(poly) => {
            summary.discriminant = Some(EntrySummary {
                name: poly.discriminant.clone(),
                tag: poly.discriminant_tag.clone(),
                ty: Some(registry.name_of(poly.enum_type).to_string()),
            });
            summary.cases = poly
                .cases
                .values()
                .map(|c| CaseSummary {
                    name: c.name.clone(),
                    ty: registry.name_of(c.ty).to_string(),
                    enum_entry: c.enum_entry.clone(),
                })
                .collect();
            summary.shared = poly
                .shared
                .values()
                .map(|f| EntrySummary {
                    name: f.name.clone(),
                    tag: f.tag.clone(),
                    ty: Some(registry.display(&f.ty)),
                })
                .collect();
        }
    }

    summary
}
