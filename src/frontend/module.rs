//! Module System for Dragoman
//!
//! Locates required schema files and remembers which modules were already
//! parsed. Modules are identified by file stem: requiring a stem that was
//! already loaded is a no-op, even when the second request would have found
//! a different file with the same name.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::utils::{Error, Location, Result};

/// Default schema file extension
pub const DEFAULT_EXTENSION: &str = "dgl";

/// Result of searching for a module file
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLookup {
    /// Every matching file, in search order; the first one is used
    pub matches: Vec<PathBuf>,
    /// Every path that was tried
    pub searched: Vec<PathBuf>,
}

impl ModuleLookup {
    pub fn chosen(&self) -> Option<&PathBuf> {
        self.matches.first()
    }

    /// More than one search location holds a file with this name
    pub fn is_ambiguous(&self) -> bool {
        self.matches.len() > 1
    }
}

/// Module loader state for one compilation session
#[derive(Debug)]
pub struct ModuleLoader {
    /// Include directories, searched after the requiring file's directory
    search_paths: Vec<PathBuf>,
    extension: String,
    /// Stems of fully parsed modules
    loaded: IndexSet<String>,
    /// Modules currently being parsed (for circular dependency detection)
    parsing_stack: Vec<String>,
}

impl ModuleLoader {
    pub fn new(search_paths: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            search_paths,
            extension: extension.into(),
            loaded: IndexSet::new(),
            parsing_stack: Vec::new(),
        }
    }

    /// Module name a file is recorded under
    pub fn stem_of(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }

    /// Look for `module_name` in `current_dir`, then in every include
    /// directory
    pub fn find_module_file(&self, module_name: &str, current_dir: &Path) -> ModuleLookup {
        let file_name = format!("{}.{}", module_name, self.extension);
        let mut lookup = ModuleLookup {
            matches: Vec::new(),
            searched: Vec::new(),
        };

        for dir in std::iter::once(current_dir).chain(self.search_paths.iter().map(PathBuf::as_path)) {
            let candidate = dir.join(&file_name);
            if lookup.searched.contains(&candidate) {
                continue;
            }
            if candidate.is_file() {
                lookup.matches.push(candidate.clone());
            }
            lookup.searched.push(candidate);
        }

        lookup
    }

    pub fn is_loaded(&self, stem: &str) -> bool {
        self.loaded.contains(stem)
    }

    /// Stems of loaded modules, in load completion order
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.loaded.iter().map(String::as_str)
    }

    /// Mark `stem` as being parsed. Fails if it is already on the stack.
    pub fn enter(&mut self, stem: &str, location: &Location) -> Result<()> {
        if self.parsing_stack.iter().any(|s| s == stem) {
            return Err(Error::CircularRequire {
                chain: format!("{} -> {}", self.parsing_stack.join(" -> "), stem),
                location: location.clone(),
            });
        }

        self.parsing_stack.push(stem.to_string());
        Ok(())
    }

    /// Leave the module on top of the stack, recording it as loaded on
    /// success
    pub fn exit(&mut self, success: bool) {
        if let Some(stem) = self.parsing_stack.pop() {
            if success {
                self.loaded.insert(stem);
            }
        }
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_EXTENSION)
    }
}
