//! Parser for Dragoman schemas
//!
//! Recursive descent over the token stream. Type references are resolved
//! against the session registry as they are parsed, and each declaration is
//! registered once it has been fully built, so a failing declaration never
//! leaves a partial type behind.

use crate::frontend::session::Session;
use crate::frontend::token::{Keyword, Token, TokenKind};
use crate::types::graph::{self, EnumBuilder, ObjectBuilder};
use crate::types::polymorph::PolymorphBuilder;
use crate::types::{DefinedType, TypeId};
use crate::utils::{Error, Location, Result};

/// A top-level construct of a schema file
#[derive(Debug, Clone, PartialEq)]
pub enum FileEntry {
    Require { module: String, location: Location },
    Object(TypeId),
    Enum(TypeId),
    Polymorph(TypeId),
}

/// The parser
pub struct Parser<'s> {
    tokens: Vec<Token>,
    pos: usize,
    session: &'s mut Session,
}

impl<'s> Parser<'s> {
    /// Create a parser over a token stream ending in `Eof`
    pub fn new(tokens: Vec<Token>, session: &'s mut Session) -> Self {
        Self { tokens, pos: 0, session }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).or_else(|| self.tokens.last())
    }

    fn current_kind(&self) -> &TokenKind {
        self.current().map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    fn current_location(&self) -> Location {
        self.current().map(|t| t.location.clone()).unwrap_or_default()
    }

    fn peek_kind(&self) -> &TokenKind {
        self.tokens.get(self.pos + 1).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.current().cloned();
        if let Some(token) = &token {
            self.session.cursor.last_token = Some(token.location.clone());
        }
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, expected: &str) -> Error {
        Error::UnexpectedToken {
            expected: expected.to_string(),
            got: self.current_kind().to_string(),
            location: self.current_location(),
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(String, Location)> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let location = self.current_location();
                self.advance();
                Ok((name, location))
            }
            _ => Err(self.error(expected)),
        }
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.current_kind() {
            TokenKind::Close => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error("')'")),
        }
    }

    fn is_close(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Close)
    }

    /// Consume `(KEYWORD` if it opens the current token
    fn eat_open(&mut self, keyword: Keyword) -> Option<Location> {
        match self.current_kind() {
            TokenKind::Open(kw) if *kw == keyword => {
                let location = self.current_location();
                self.advance();
                Some(location)
            }
            _ => None,
        }
    }

    // ==================== File ====================

    /// Parse every construct of the file
    pub fn parse_file(&mut self) -> Result<Vec<FileEntry>> {
        let mut entries = Vec::new();

        loop {
            let location = self.current_location();
            let entry = match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::Open(Keyword::Require) => {
                    self.advance();
                    self.parse_require(location)?
                }
                TokenKind::Open(Keyword::Object) => {
                    self.advance();
                    FileEntry::Object(self.parse_object(location)?)
                }
                TokenKind::Open(Keyword::Enum) => {
                    self.advance();
                    FileEntry::Enum(self.parse_enum(location)?)
                }
                TokenKind::Open(Keyword::Polymorph) => {
                    self.advance();
                    FileEntry::Polymorph(self.parse_polymorph(location)?)
                }
                _ => return Err(self.error("(REQUIRE, (OBJECT, (ENUM or (POLYMORPH")),
            };
            entries.push(entry);
        }

        Ok(entries)
    }

    /// `(REQUIRE name)`
    fn parse_require(&mut self, location: Location) -> Result<FileEntry> {
        let (module, _) = self.expect_ident("module name")?;
        self.expect_close()?;

        self.session.require(&module, &location)?;
        Ok(FileEntry::Require { module, location })
    }

    /// `(OBJECT Name entry*)`
    fn parse_object(&mut self, location: Location) -> Result<TypeId> {
        let (name, _) = self.expect_ident("object name")?;
        let mut builder = ObjectBuilder::new();

        while !self.is_close() {
            if let Some(at) = self.eat_open(Keyword::Entry) {
                let (entry, _) = self.expect_ident("entry name")?;

                // `(ENTRY name type)` when a lone identifier is left
                let has_tag = matches!(self.current_kind(), TokenKind::Ident(_))
                    && !matches!(self.peek_kind(), TokenKind::Close);
                let tag = if has_tag {
                    Some(self.expect_ident("entry tag")?.0)
                } else {
                    None
                };
                let ty = self.parse_type()?;
                self.expect_close()?;

                builder.add_entry(entry, tag, ty, at)?;
            } else if self.eat_open(Keyword::Markers).is_some() {
                builder.add_markers(self.parse_names()?);
            } else {
                return Err(self.error("(ENTRY or (MARKERS"));
            }
        }
        self.expect_close()?;

        let def = builder.finish(&self.session.registry, name, location);
        self.session.registry.register(def)
    }

    /// `(ENUM Name base entry*)`
    fn parse_enum(&mut self, location: Location) -> Result<TypeId> {
        let (name, _) = self.expect_ident("enum name")?;
        let base = self.parse_type()?;
        let mut builder = EnumBuilder::new(&self.session.registry, &name, &base, &location)?;

        while !self.is_close() {
            if let Some(at) = self.eat_open(Keyword::Entry) {
                let (entry, _) = self.expect_ident("entry name")?;
                let (tag, _) = self.expect_ident("entry tag")?;
                self.expect_close()?;

                builder.add_entry(entry, tag, at)?;
            } else if self.eat_open(Keyword::Markers).is_some() {
                builder.add_markers(self.parse_names()?);
            } else {
                return Err(self.error("(ENTRY or (MARKERS"));
            }
        }
        self.expect_close()?;

        let def = builder.finish(name, location);
        self.session.registry.register(def)
    }

    /// `(POLYMORPH Name discriminant clause*)`
    fn parse_polymorph(&mut self, location: Location) -> Result<TypeId> {
        let (name, _) = self.expect_ident("polymorph name")?;
        let (discriminant, _) = self.expect_ident("discriminant entry name")?;
        let mut builder = PolymorphBuilder::new(discriminant);

        while !self.is_close() {
            if let Some(at) = self.eat_open(Keyword::Case) {
                let (case, _) = self.expect_ident("case name")?;
                let ty = self.parse_type()?;
                self.expect_close()?;

                builder.add_case(case, ty, at)?;
            } else if let Some(at) = self.eat_open(Keyword::Shared) {
                for shared in self.parse_names()? {
                    builder.add_shared(shared, at.clone())?;
                }
            } else if self.eat_open(Keyword::Markers).is_some() {
                builder.add_markers(self.parse_names()?);
            } else {
                return Err(self.error("(CASE, (SHARED or (MARKERS"));
            }
        }
        self.expect_close()?;

        let def = builder.resolve(&self.session.registry, name, location)?;
        self.session.registry.register(def)
    }

    /// Identifiers up to the closing `)`, which is consumed
    fn parse_names(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        while !self.is_close() {
            names.push(self.expect_ident("name")?.0);
        }
        self.expect_close()?;
        Ok(names)
    }

    // ==================== Types ====================

    /// `Name`, `(ARRAY type)` or `(DICT key type)`
    fn parse_type(&mut self) -> Result<DefinedType> {
        match self.current_kind() {
            TokenKind::Ident(_) => {
                let (name, location) = self.expect_ident("type")?;
                self.resolve_named(name, location)
            }
            TokenKind::Open(Keyword::Array) => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect_close()?;
                Ok(graph::array_of(inner))
            }
            TokenKind::Open(Keyword::Dict) => {
                let location = self.current_location();
                self.advance();
                let (key_field, _) = self.expect_ident("dictionary key entry")?;
                let value = self.parse_type()?;
                self.expect_close()?;
                graph::dict_of(&self.session.registry, &key_field, value, &location)
            }
            _ => Err(self.error("type")),
        }
    }

    fn resolve_named(&mut self, name: String, location: Location) -> Result<DefinedType> {
        if let Some(id) = self.session.registry.lookup(&name) {
            return Ok(DefinedType::Named(id));
        }

        self.session
            .correct_type(&name, &location)
            .and_then(|fixed| self.session.registry.lookup(&fixed))
            .map(DefinedType::Named)
            .ok_or(Error::UnresolvedType { name, location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Diagnostics;
    use crate::frontend::session::SessionConfig;
    use crate::frontend::typo::{AcceptBest, CorrectionRequest, CorrectionResolver, Decline};
    use crate::types::TypeKind;
    use crate::utils::ErrorKind;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn config(include_dirs: Vec<PathBuf>) -> SessionConfig {
        SessionConfig {
            include_dirs,
            interactive: false,
            ..SessionConfig::default()
        }
    }

    fn session_with(resolver: Box<dyn CorrectionResolver>, include_dirs: Vec<PathBuf>) -> Session {
        Session::with_resolver(config(include_dirs), resolver).with_diagnostics(Diagnostics::quiet())
    }

    fn session() -> Session {
        session_with(Box::new(Decline), Vec::new())
    }

    struct Counting(Rc<Cell<usize>>);

    impl CorrectionResolver for Counting {
        fn resolve(&mut self, request: &CorrectionRequest<'_>) -> Option<String> {
            self.0.set(self.0.get() + 1);
            request.candidates.first().cloned()
        }
    }

    #[test]
    fn test_parse_schema() {
        let mut session = session();
        let entries = session
            .compile_source(
                "shapes.dgl",
                indoc! {"
                    ;; shapes
                    (ENUMERATE Color string
                        (ENTRY Red r)
                        (ENTRY Green g)
                        (MARKERS Erlang)
                    )
                    (object Point
                        (ENTRY x integer)
                        (ENTRY y yy integer)
                        (ENTRY tint Color)
                    )
                "},
            )
            .unwrap();

        assert_eq!(entries.len(), 2);
        let color = session.registry.get_by_name("Color").unwrap();
        assert!(color.has_marker("erlang"));

        let point = session.registry.get_by_name("Point").unwrap().as_object().unwrap();
        let tags: Vec<&str> = point.entries().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["f0", "yy", "f2"]);
        assert_eq!(session.diagnostics.error_count(), 0);
    }

    #[test]
    fn test_duplicate_entry_not_registered() {
        let mut session = session();
        let err = session
            .compile_source(
                "dup.dgl",
                indoc! {"
                    (OBJECT Pair
                        (ENTRY a integer)
                        (ENTRY a string)
                    )
                "},
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert!(session.registry.lookup("Pair").is_none());

        let mut session = self::session();
        let err = session
            .compile_source("dup.dgl", "(OBJECT Pair (ENTRY a f1 integer) (ENTRY b integer))")
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate tag 'f1'");
        assert!(session.registry.lookup("Pair").is_none());
        assert_eq!(session.diagnostics.error_count(), 1);
    }

    #[test]
    fn test_nested_array() {
        let mut session = session();
        session
            .compile_source("grid.dgl", "(OBJECT Grid (ENTRY cells (ARRAY (ARRAY string))))")
            .unwrap();

        let string = session.registry.lookup("string").unwrap();
        let grid = session.registry.get_by_name("Grid").unwrap().as_object().unwrap();
        let cells = grid.entry("cells").unwrap();
        assert_eq!(cells.ty.array_depth(), (2, &DefinedType::Named(string)));
    }

    #[test]
    fn test_dict_key() {
        let mut session = session();
        session
            .compile_source(
                "index.dgl",
                indoc! {"
                    (OBJECT MyObject (ENTRY ident id integer) (ENTRY label string))
                    (OBJECT Index (ENTRY items (DICT id MyObject)))
                "},
            )
            .unwrap();

        let integer = session.registry.lookup("integer").unwrap();
        let index = session.registry.get_by_name("Index").unwrap().as_object().unwrap();
        match &index.entry("items").unwrap().ty {
            DefinedType::DictOf(dict) => assert_eq!(dict.key_type, integer),
            other => panic!("expected a dictionary, got {:?}", other),
        }

        let mut session = self::session();
        let err = session
            .compile_source(
                "index.dgl",
                indoc! {"
                    (OBJECT Inner (ENTRY v integer))
                    (OBJECT MyObject (ENTRY ident id Inner))
                    (OBJECT Index (ENTRY items (DICT id MyObject)))
                "},
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidKeyType { .. }));
    }

    const SHAPES: &str = indoc! {"
        (ENUM ShapeKind string (ENTRY Circle c) (ENTRY Square s))
        (OBJECT Circle (ENTRY kind k ShapeKind) (ENTRY radius r float))
        (OBJECT Square (ENTRY kind KIND_TAG ShapeKind) (ENTRY side s float))
        (POLYMORPH Shape kind (CASE Circle Circle) (CASE Square Square))
    "};

    #[test]
    fn test_polymorph_binding() {
        let mut session = session();
        let source = SHAPES.replace("KIND_TAG", "k");
        session.compile_source("shapes.dgl", &source).unwrap();

        let shape = session.registry.get_by_name("Shape").unwrap();
        let poly = match &shape.kind {
            TypeKind::Polymorph(p) => p,
            other => panic!("expected a polymorph, got {}", other.describe()),
        };
        assert_eq!(poly.discriminant_tag, "k");
        assert_eq!(session.registry.name_of(poly.enum_type), "ShapeKind");
        assert_eq!(poly.case("Square").unwrap().enum_entry, "Square");
    }

    #[test]
    fn test_polymorph_tag_mismatch() {
        let mut session = session();
        let source = SHAPES.replace("KIND_TAG", "kk");
        let err = session.compile_source("shapes.dgl", &source).unwrap_err();

        assert!(matches!(err, Error::DiscriminantTagMismatch { .. }));
        assert!(session.registry.lookup("Shape").is_none());
    }

    const SHARED_SHAPES: &str = indoc! {"
        (ENUM ShapeKind string (ENTRY Circle c) (ENTRY Square s))
        (OBJECT Circle (ENTRY kind k ShapeKind) (ENTRY id i integer) (ENTRY radius r float))
        (OBJECT Square (ENTRY kind k ShapeKind) (ENTRY id ID_TAG integer) (ENTRY side s float))
        (POLYMORPH Shape kind
            (CASE Circle Circle)
            (CASE Square Square)
            (SHARED id)
            (MARKERS Json Erlang)
        )
        (OBJECT Canvas (ENTRY by_id (DICT id Shape)) (ENTRY by_kind (DICT kind Shape)))
    "};

    #[test]
    fn test_polymorph_shared_and_markers() {
        let mut session = session();
        let source = SHARED_SHAPES.replace("ID_TAG", "i");
        session.compile_source("shapes.dgl", &source).unwrap();

        let integer = session.registry.lookup("integer").unwrap();
        let kind = session.registry.lookup("ShapeKind").unwrap();
        let shape = session.registry.get_by_name("Shape").unwrap();
        let poly = shape.as_polymorph().unwrap();

        let id = poly.shared_field("id").unwrap();
        assert_eq!((id.tag.as_str(), &id.ty), ("i", &DefinedType::Named(integer)));
        assert_eq!(shape.markers.iter().collect::<Vec<_>>(), vec!["json", "erlang"]);

        let canvas = session.registry.get_by_name("Canvas").unwrap().as_object().unwrap();
        let by_id = &canvas.entry("by_id").unwrap().ty;
        match by_id {
            DefinedType::DictOf(dict) => assert_eq!(dict.key_type, integer),
            other => panic!("expected a dictionary, got {:?}", other),
        }
        assert_eq!(session.registry.display(by_id), "(Dict of Shape by id: integer)");
        match &canvas.entry("by_kind").unwrap().ty {
            DefinedType::DictOf(dict) => assert_eq!(dict.key_type, kind),
            other => panic!("expected a dictionary, got {:?}", other),
        }
    }

    #[test]
    fn test_polymorph_shared_tag_mismatch() {
        let mut session = session();
        let source = SHARED_SHAPES.replace("ID_TAG", "j");
        let err = session.compile_source("shapes.dgl", &source).unwrap_err();

        assert!(matches!(err, Error::SharedTagMismatch { .. }));
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert_eq!(
            err.to_string(),
            "Shared entry 'id' of case 'Square' uses tag 'j', but case 'Circle' uses tag 'i'."
        );
        assert!(session.registry.lookup("Shape").is_none());
        assert!(session.registry.lookup("Canvas").is_none());
    }

    #[test]
    fn test_syntax_error() {
        let mut session = session();
        let err = session.compile_source("bad.dgl", "(OBJECT A (CASE x integer))").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);

        let err = session.compile_source("bad2.dgl", "Point").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_unresolved_type() {
        let mut session = session();
        let err = session
            .compile_source("a.dgl", "(OBJECT A\n  (ENTRY x intger))")
            .unwrap_err();

        assert_eq!(err.to_string(), "Unknown type \"intger\".");
        assert_eq!(err.location(), Some(&Location::new("a.dgl", 2, 11)));
    }

    #[test]
    fn test_lexical_error_report() {
        let mut session = session();
        let err = session
            .compile_source("bad.dgl", "(OBJECT A\n\t(ENTRY x $)\n)")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(
            session.diagnostics.records()[0].render(),
            "[E] Syntax error. Unexpected \"$\".\nbad.dgl:2,10\n (ENTRY x $)\n          ^"
        );
    }

    #[test]
    fn test_require_diamond() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.dgl"), "(ENUM Color string (ENTRY Red r))").unwrap();
        fs::write(dir.path().join("left.dgl"), "(REQUIRE base)\n(OBJECT Left (ENTRY c Color))").unwrap();
        fs::write(dir.path().join("right.dgl"), "(REQUIRE base)\n(OBJECT Right (ENTRY c Color))").unwrap();
        let main = dir.path().join("main.dgl");
        fs::write(&main, "(REQUIRE left)\n(REQUIRE right)\n(REQUIRE base)\n").unwrap();

        let mut session = session();
        let entries = session.compile(&main).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(session.registry.enums().count(), 1);
        assert_eq!(session.registry.objects().count(), 2);
        assert_eq!(
            session.loader().loaded().collect::<Vec<_>>(),
            vec!["base", "left", "right", "main"]
        );
    }

    #[test]
    fn test_missing_module() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main.dgl");
        fs::write(&main, "(REQUIRE nowhere)").unwrap();

        let mut session = session();
        let err = session.compile(&main).unwrap_err();
        match err {
            Error::MissingModule { name, searched, .. } => {
                assert_eq!(name, "nowhere");
                assert_eq!(searched, vec![dir.path().join("nowhere.dgl")]);
            }
            other => panic!("expected a missing module, got {:?}", other),
        }
    }

    #[test]
    fn test_circular_require() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.dgl"), "(REQUIRE b)").unwrap();
        fs::write(dir.path().join("b.dgl"), "(REQUIRE a)").unwrap();

        let mut session = session();
        let err = session.compile(&dir.path().join("a.dgl")).unwrap_err();
        assert_eq!(err.to_string(), "Circular module dependency detected: a -> b -> a");
    }

    #[test]
    fn test_same_stem_collapses_to_one_module() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir(&first).unwrap();
        fs::create_dir(&second).unwrap();

        fs::write(first.join("common.dgl"), "(OBJECT A (ENTRY x integer))").unwrap();
        fs::write(second.join("common.dgl"), "(OBJECT B (ENTRY x integer))").unwrap();
        fs::write(second.join("lib.dgl"), "(REQUIRE common)\n(OBJECT L (ENTRY a A))").unwrap();
        let main = dir.path().join("main.dgl");
        fs::write(&main, "(REQUIRE common)\n(REQUIRE lib)\n").unwrap();

        let mut session = session_with(Box::new(Decline), vec![first, second]);
        session.compile(&main).unwrap();

        assert!(session.registry.lookup("A").is_some());
        assert!(session.registry.lookup("L").is_some());
        assert!(session.registry.lookup("B").is_none());
        assert_eq!(session.diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_cursor_restored_after_require() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.dgl"), "(OBJECT Base (ENTRY x integer))").unwrap();
        let main = dir.path().join("main.dgl");
        fs::write(&main, "(REQUIRE base)\n(OBJECT Broken (ENTRY x Missing))\n").unwrap();

        let mut session = session();
        let err = session.compile(&main).unwrap_err();

        let main_name = main.display().to_string();
        assert_eq!(session.cursor().file.as_deref(), Some(main_name.as_str()));
        assert_eq!(err.location().map(|l| (l.file.as_str(), l.line)), Some((main_name.as_str(), 2)));
    }

    #[test]
    fn test_typo_fix_rewrites_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fix.dgl");
        fs::write(&path, "(OBJECT A (ENTRY x intger))\n(OBJECT B (ENTRY y intger))\n").unwrap();

        let prompts = Rc::new(Cell::new(0));
        let mut session = session_with(Box::new(Counting(prompts.clone())), Vec::new());
        session.compile(&path).unwrap();

        assert_eq!(prompts.get(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "(OBJECT A (ENTRY x integer))\n(OBJECT B (ENTRY y integer))\n"
        );
        assert_eq!(session.diagnostics.warning_count(), 2);
        assert!(session.diagnostics.records()[0]
            .message
            .contains("Replacing \"intger\" with \"integer\"."));
    }

    #[test]
    fn test_cursor_after_typo_fix_matches_lexed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fix.dgl");
        fs::write(&path, "(OBJECT A (ENTRY x intger) (ENTRY y Missing))\n").unwrap();

        let mut session = session_with(Box::new(AcceptBest), Vec::new());
        let err = session.compile(&path).unwrap_err();
        assert_eq!(err.location().map(|l| l.column), Some(36));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "(OBJECT A (ENTRY x integer) (ENTRY y Missing))\n"
        );

        let rendered = session.diagnostics.records().last().unwrap().render();
        let lines: Vec<&str> = rendered.lines().collect();
        let caret = lines[3].len() - 1;
        assert_eq!(&lines[2][caret..caret + 7], "Missing");
    }

    #[test]
    fn test_typo_fix_in_memory_source() {
        let mut session = session_with(Box::new(AcceptBest), Vec::new());
        session.compile_source("virtual.dgl", "(OBJECT A (ENTRY x flaot))").unwrap();

        let float = session.registry.lookup("float").unwrap();
        let a = session.registry.get_by_name("A").unwrap().as_object().unwrap();
        assert_eq!(a.entry("x").unwrap().ty, DefinedType::Named(float));
        assert_eq!(session.diagnostics.warning_count(), 2);
    }
}
