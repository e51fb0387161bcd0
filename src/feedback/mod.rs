//! Diagnostics stream
//!
//! Errors and warnings are written to stderr as they happen, each followed
//! by a cursor block pointing into the source:
//! - `<file>:<line>,<column>` (or `<file>:<line>` for whole-line notes)
//! - the source line, tabs expanded to spaces
//! - a caret line
//!
//! Every diagnostic is also recorded, so a run can be inspected afterwards.

pub mod graph;

use serde::Serialize;

use crate::utils::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn prefix(&self) -> &'static str {
        match self {
            Severity::Error => "[E]",
            Severity::Warning => "[W]",
        }
    }
}

/// One emitted diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Rendered cursor block, if the diagnostic points into a file
    pub cursor: Option<String>,
}

impl Diagnostic {
    pub fn render(&self) -> String {
        match &self.cursor {
            Some(cursor) => format!("{} {}\n{}", self.severity.prefix(), self.message, cursor),
            None => format!("{} {}", self.severity.prefix(), self.message),
        }
    }
}

/// Error/warning counters plus the record of everything emitted
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
    /// Suppress stderr output (records are still kept)
    quiet: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics that are recorded but not printed
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    pub fn error(&mut self, message: impl Into<String>, cursor: Option<String>) {
        self.errors += 1;
        self.emit(Severity::Error, message.into(), cursor);
    }

    pub fn warning(&mut self, message: impl Into<String>, cursor: Option<String>) {
        self.warnings += 1;
        self.emit(Severity::Warning, message.into(), cursor);
    }

    fn emit(&mut self, severity: Severity, message: String, cursor: Option<String>) {
        let diagnostic = Diagnostic { severity, message, cursor };
        if !self.quiet {
            eprintln!("{}", diagnostic.render());
        }
        self.records.push(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Final run summary
    pub fn summary(&self) -> String {
        format!(
            "Completed with {} error(s) and {} warning(s).",
            self.errors, self.warnings
        )
    }
}

/// Render the cursor block for `location`.
///
/// With `use_column`, a single caret sits under the column; otherwise the
/// whole line is underlined.
pub fn render_cursor(location: &Location, line_text: Option<&str>, use_column: bool) -> String {
    let mut result = format!("{}:{}", location.file, location.line);
    if use_column {
        result.push_str(&format!(",{}", location.column));
    }

    let line = line_text.unwrap_or("").trim_end_matches(['\r', '\n']).replace('\t', " ");
    result.push('\n');
    result.push_str(&line);
    result.push('\n');

    if use_column {
        result.push_str(&" ".repeat(location.column));
        result.push('^');
    } else {
        result.push_str(&"^".repeat(line.chars().count()));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_cursor_with_column() {
        let location = Location::new("shapes.dgl", 3, 5);
        let cursor = render_cursor(&location, Some("\t(ENTRY x intger)\n"), true);

        assert_eq!(cursor, "shapes.dgl:3,5\n (ENTRY x intger)\n     ^");
    }

    #[test]
    fn test_render_cursor_whole_line() {
        let location = Location::new("shapes.dgl", 1, 0);
        let cursor = render_cursor(&location, Some("(ENUM Kind"), false);

        assert_eq!(cursor, "shapes.dgl:1\n(ENUM Kind\n^^^^^^^^^^");
    }

    #[test]
    fn test_counts_and_summary() {
        let mut diagnostics = Diagnostics::quiet();
        diagnostics.warning("Replacing \"intger\" with \"integer\".", None);
        diagnostics.error("Unknown type \"Shap\".", None);
        diagnostics.warning("second", None);

        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warnings().count(), 2);
        assert_eq!(diagnostics.records()[1].render(), "[E] Unknown type \"Shap\".");
        assert_eq!(diagnostics.summary(), "Completed with 1 error(s) and 2 warning(s).");
    }
}
