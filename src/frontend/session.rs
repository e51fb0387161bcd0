//! Compilation session
//!
//! Everything one compile run mutates lives here: the type registry, the
//! module loader, the typo corrector and its memo, the source texts used for
//! cursors, and the diagnostics stream. A fresh `Session` is a fresh run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::feedback::{render_cursor, Diagnostics};
use crate::frontend::lexer::Lexer;
use crate::frontend::module::{ModuleLoader, DEFAULT_EXTENSION};
use crate::frontend::parser::{FileEntry, Parser};
use crate::frontend::typo::{self, ConsolePrompt, CorrectionResolver, Decline, TypoCorrector};
use crate::types::Registry;
use crate::utils::{Error, Location, Result};

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directories searched for required modules
    pub include_dirs: Vec<PathBuf>,
    /// Schema file extension, without the dot
    pub extension: String,
    /// Ask on the terminal before fixing typos; otherwise every fix is
    /// declined
    pub interactive: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            include_dirs: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            interactive: true,
        }
    }
}

/// Where diagnostics without their own location should point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    /// File being parsed
    pub file: Option<String>,
    /// Last token consumed by the parser
    pub last_token: Option<Location>,
}

#[derive(Debug, Clone)]
struct SourceFile {
    /// On-disk path; `None` for in-memory sources
    path: Option<PathBuf>,
    text: String,
}

pub struct Session {
    pub registry: Registry,
    pub diagnostics: Diagnostics,
    pub(crate) cursor: Cursor,
    loader: ModuleLoader,
    corrector: TypoCorrector,
    sources: HashMap<String, SourceFile>,
}

impl Session {
    /// Create a session with the resolver implied by `config.interactive`
    pub fn new(config: SessionConfig) -> Self {
        let resolver: Box<dyn CorrectionResolver> = if config.interactive {
            Box::new(ConsolePrompt::stdio())
        } else {
            Box::new(Decline)
        };
        Self::with_resolver(config, resolver)
    }

    /// Create a session with an explicit typo resolution strategy
    pub fn with_resolver(config: SessionConfig, resolver: Box<dyn CorrectionResolver>) -> Self {
        Self {
            registry: Registry::new(),
            diagnostics: Diagnostics::new(),
            cursor: Cursor::default(),
            loader: ModuleLoader::new(config.include_dirs, config.extension),
            corrector: TypoCorrector::new(resolver),
            sources: HashMap::new(),
        }
    }

    /// Replace the diagnostics sink (e.g. with `Diagnostics::quiet()`)
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    // ==================== Entry points ====================

    /// Compile a root schema file. Errors are reported to the diagnostics
    /// stream and returned.
    pub fn compile(&mut self, path: &Path) -> Result<Vec<FileEntry>> {
        let stem = ModuleLoader::stem_of(path);
        let result = self.load_module(path, &stem, &Location::new(path.display().to_string(), 1, 0));
        self.finish_run(result)
    }

    /// Compile in-memory schema text under a virtual file name
    pub fn compile_source(&mut self, name: &str, text: &str) -> Result<Vec<FileEntry>> {
        let stem = ModuleLoader::stem_of(Path::new(name));
        let result = self
            .loader
            .enter(&stem, &Location::new(name, 1, 0))
            .and_then(|()| {
                let parsed = self.parse_text(name, None, text.to_string());
                self.loader.exit(parsed.is_ok());
                parsed
            });
        self.finish_run(result)
    }

    /// Hand the finished registry to consumers
    pub fn finish(self) -> Registry {
        self.registry
    }

    fn finish_run(&mut self, result: Result<Vec<FileEntry>>) -> Result<Vec<FileEntry>> {
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    // ==================== Module loading ====================

    /// Handle `(REQUIRE name)`
    pub(crate) fn require(&mut self, name: &str, location: &Location) -> Result<()> {
        let stem = ModuleLoader::stem_of(Path::new(name));
        if self.loader.is_loaded(&stem) {
            log::debug!("Module {} already parsed, skipping.", stem);
            return Ok(());
        }

        let current_dir = self.current_dir();
        let lookup = self.loader.find_module_file(name, &current_dir);
        let Some(path) = lookup.chosen().cloned() else {
            return Err(Error::MissingModule {
                name: name.to_string(),
                searched: lookup.searched,
                location: location.clone(),
            });
        };

        if lookup.is_ambiguous() {
            let others: Vec<String> = lookup.matches[1..].iter().map(|p| p.display().to_string()).collect();
            self.warn_at(
                &format!(
                    "Module \"{}\" found in several locations; using {} over {}.",
                    name,
                    path.display(),
                    others.join(", ")
                ),
                location,
            );
        }

        let saved = self.cursor.clone();
        let result = self.load_module(&path, &stem, location);
        self.cursor = saved;

        result.map(|_| ())
    }

    fn load_module(&mut self, path: &Path, stem: &str, location: &Location) -> Result<Vec<FileEntry>> {
        self.loader.enter(stem, location)?;
        let result = self.parse_file(path);
        self.loader.exit(result.is_ok());

        if result.is_ok() {
            log::debug!("Loaded module {}.", stem);
        }
        result
    }

    fn parse_file(&mut self, path: &Path) -> Result<Vec<FileEntry>> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.parse_text(&path.display().to_string(), Some(path.to_path_buf()), text)
    }

    fn parse_text(&mut self, file: &str, path: Option<PathBuf>, text: String) -> Result<Vec<FileEntry>> {
        log::debug!("Parsing {}...", file);

        let tokens = Lexer::new(&text, file).tokenize();
        self.sources.insert(file.to_string(), SourceFile { path, text });
        self.cursor = Cursor {
            file: Some(file.to_string()),
            last_token: None,
        };

        Parser::new(tokens?, self).parse_file()
    }

    /// Directory of the file being parsed
    fn current_dir(&self) -> PathBuf {
        self.cursor
            .file
            .as_ref()
            .and_then(|f| self.sources.get(f))
            .and_then(|s| s.path.as_ref())
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    // ==================== Typo correction ====================

    /// Try to correct an unresolved type name. An accepted fix is written
    /// back to the source line of `location`.
    ///
    /// The stored source text is left as lexed, so cursors rendered later
    /// still line up with token columns.
    pub(crate) fn correct_type(&mut self, target: &str, location: &Location) -> Option<String> {
        let pool = self.registry.names();
        let cursor = self.cursor_for(location, true);
        let fixed = self.corrector.propose("type", target, &pool, &cursor)?;

        self.warn_at(&format!("Replacing \"{}\" with \"{}\".", target, fixed), location);

        let path = self.sources.get(&location.file).and_then(|s| s.path.clone());
        match path {
            Some(path) => {
                if let Err(err) = typo::apply_fix(&path, location.line, target, &fixed) {
                    self.warn_at(&format!("Could not rewrite source: {}", err), location);
                }
            }
            None => self.warn_at("Source is not on disk; the fix was not written back.", location),
        }

        Some(fixed)
    }

    // ==================== Diagnostics ====================

    fn source_line(&self, file: &str, line: usize) -> Option<&str> {
        let source = self.sources.get(file)?;
        source.text.lines().nth(line.checked_sub(1)?)
    }

    /// Render the cursor block for a location
    pub fn cursor_for(&self, location: &Location, use_column: bool) -> String {
        render_cursor(location, self.source_line(&location.file, location.line), use_column)
    }

    /// Report an error to the diagnostics stream
    pub fn report(&mut self, err: &Error) {
        let location = err.location().cloned().or_else(|| self.cursor.last_token.clone());
        let cursor = location.map(|l| self.cursor_for(&l, err.location().is_some()));
        self.diagnostics.error(err.to_string(), cursor);
    }

    /// Emit a warning pointing at the whole line of `location`
    pub fn warn_at(&mut self, message: &str, location: &Location) {
        let cursor = self.cursor_for(location, false);
        self.diagnostics.warning(message, Some(cursor));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
