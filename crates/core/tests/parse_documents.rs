//! End-to-end parses of the documents under `fixtures/`, plus the
//! behavioural properties every document must satisfy.

use std::path::{Path, PathBuf};

use webcontent_core::{
    parse, parse_with_diagnostics, ErrorCategory, Keyword, ParseError, Position, Warning,
    MAX_NESTING_DEPTH,
};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
}

fn read_fixture(rel: &str) -> String {
    let path = fixtures_root().join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

fn collect_fixtures(dir: &str) -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(fixtures_root().join(dir))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "webcontent"))
        .collect();
    paths.sort();
    paths
}

// ──────────────────────────────────────────────
// Fixture sweeps
// ──────────────────────────────────────────────

#[test]
fn every_positive_fixture_parses() {
    let paths = collect_fixtures("positive");
    assert!(!paths.is_empty(), "no positive fixtures found");
    for path in paths {
        let src = std::fs::read_to_string(&path).unwrap();
        if let Err(e) = parse(&src) {
            panic!("{} should parse: {}", path.display(), e);
        }
    }
}

#[test]
fn every_negative_fixture_fails() {
    let paths = collect_fixtures("negative");
    assert!(!paths.is_empty(), "no negative fixtures found");
    for path in paths {
        let src = std::fs::read_to_string(&path).unwrap();
        assert!(parse(&src).is_err(), "{} should fail", path.display());
    }
}

// ──────────────────────────────────────────────
// Positive documents
// ──────────────────────────────────────────────

#[test]
fn sample_document_parses_to_expected_shape() {
    let doc = parse(&read_fixture("positive/basic.webcontent")).unwrap();
    assert_eq!(doc.script_file, "main.js");
    assert_eq!(doc.languages.len(), 1);
    let lang = &doc.languages["lang1"];
    assert_eq!(lang.name, "lang1");
    assert_eq!(lang.title, "Hello");
    assert_eq!(lang.route, "/hello");
    assert!(lang.metadata.is_empty());
    assert!(lang.content.is_empty());
}

#[test]
fn multilingual_document_keeps_nested_keywords() {
    let doc = parse(&read_fixture("positive/multilingual.webcontent")).unwrap();
    assert_eq!(doc.script_file, "~/scripts/home.js");
    assert_eq!(
        doc.languages.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["en", "fr"]
    );

    let en = &doc.languages["en"];
    assert_eq!(en.route, "/");
    assert_eq!(
        en.metadata.children["description"],
        Keyword::leaf("description", "Landing page")
    );
    let author = &en.metadata.children["author"];
    assert!(author.value.is_none());
    assert_eq!(author.children["name"], Keyword::leaf("name", "Ada"));
    assert_eq!(
        author.children["site"],
        Keyword::leaf("site", "https://ada.example")
    );
    assert_eq!(en.content.value.as_deref(), Some("Welcome"));
    assert_eq!(en.content.children["hero"].value.as_deref(), Some("Hello there"));

    let fr = &doc.languages["fr"];
    assert_eq!(fr.title, "Accueil");
    assert!(fr.metadata.is_empty());
    assert_eq!(fr.content.children["hero"].value.as_deref(), Some("Bonjour"));
}

#[test]
fn crlf_document_with_escapes_parses() {
    let doc = parse(&read_fixture("positive/escapes.webcontent")).unwrap();
    let content = &doc.languages["en"].content;
    assert_eq!(content.children["path"].value.as_deref(), Some(r"C:\temp\new"));
    assert_eq!(content.children["regex"].value.as_deref(), Some(r"\d+\.txt"));
}

#[test]
fn colon_on_reserved_keyword_is_reported_as_warning() {
    let parsed = parse_with_diagnostics(&read_fixture("positive/colon_on_reserved.webcontent"))
        .unwrap();
    assert_eq!(parsed.document.languages["en"].title, "Hello");
    assert_eq!(
        parsed.warnings,
        vec![Warning::ReservedKeywordWithColon {
            keyword: "title".to_string(),
            position: Position::new(2, 4),
        }]
    );
}

#[test]
fn clean_document_has_no_warnings() {
    let parsed = parse_with_diagnostics(&read_fixture("positive/basic.webcontent")).unwrap();
    assert!(parsed.warnings.is_empty());
}

#[test]
fn parsing_is_idempotent() {
    let src = read_fixture("positive/multilingual.webcontent");
    assert_eq!(parse(&src).unwrap(), parse(&src).unwrap());
}

#[test]
fn two_level_nesting_produces_nested_groups() {
    let src = "scriptfile \"`s.js`\";en{title \"`t`\", route \"`/`\", \
               metadata{outer:{inner:{leaf: \"`v`\"}}}};";
    let doc = parse(src).unwrap();
    let outer = &doc.languages["en"].metadata.children["outer"];
    assert!(outer.is_group());
    let inner = &outer.children["inner"];
    assert!(inner.is_group());
    assert_eq!(inner.children["leaf"], Keyword::leaf("leaf", "v"));
}

/// A language whose metadata holds `groups` nested custom groups around
/// a single leaf.
fn deeply_nested(groups: usize) -> String {
    let mut src = String::from("scriptfile \"`s.js`\";en{title \"`t`\", route \"`/`\", metadata{");
    src.push_str(&"a:{".repeat(groups));
    src.push_str("leaf: \"`v`\"");
    src.push_str(&"}".repeat(groups + 2));
    src.push(';');
    src
}

#[test]
fn nesting_at_the_limit_parses() {
    // `en{` and `metadata{` use two of the allowed levels.
    let doc = parse(&deeply_nested(MAX_NESTING_DEPTH - 2)).unwrap();
    let mut keyword = &doc.languages["en"].metadata.children["a"];
    let mut depth = 1;
    while let Some(inner) = keyword.child("a") {
        keyword = inner;
        depth += 1;
    }
    assert_eq!(depth, MAX_NESTING_DEPTH - 2);
    assert_eq!(keyword.children["leaf"], Keyword::leaf("leaf", "v"));
}

#[test]
fn extremely_deep_nesting_fails_cleanly() {
    let err = parse(&deeply_nested(100_000)).unwrap_err();
    assert!(
        matches!(err, ParseError::NestingTooDeep { limit, .. } if limit == MAX_NESTING_DEPTH),
        "{:?}",
        err
    );
    assert_eq!(err.category(), ErrorCategory::Structural);
}

// ──────────────────────────────────────────────
// Negative documents
// ──────────────────────────────────────────────

#[test]
fn duplicate_scriptfile_is_rejected() {
    let err = parse(&read_fixture("negative/duplicate_scriptfile.webcontent")).unwrap_err();
    assert_eq!(
        err,
        ParseError::DuplicateReservedKeyword {
            keyword: "scriptfile".to_string()
        }
    );
}

#[test]
fn duplicate_language_is_rejected() {
    let err = parse(&read_fixture("negative/duplicate_language.webcontent")).unwrap_err();
    assert_eq!(
        err,
        ParseError::DuplicateLanguage {
            language: "en".to_string()
        }
    );
}

#[test]
fn duplicate_custom_keyword_is_rejected() {
    let err = parse(&read_fixture("negative/duplicate_custom_keyword.webcontent")).unwrap_err();
    assert_eq!(
        err,
        ParseError::DuplicateCustomKeyword {
            keyword: "author".to_string()
        }
    );
}

#[test]
fn missing_route_is_rejected() {
    let err = parse(&read_fixture("negative/missing_route.webcontent")).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingKeyword {
            keyword: "route".to_string()
        }
    );
    assert_eq!(err.category(), ErrorCategory::Semantic);
}

#[test]
fn document_without_language_is_rejected() {
    let err = parse(&read_fixture("negative/no_language.webcontent")).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingKeyword {
            keyword: "language".to_string()
        }
    );
}

#[test]
fn invalid_character_is_located() {
    let err = parse(&read_fixture("negative/invalid_character.webcontent")).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidCharacter {
            character: '-',
            position: Position::new(2, 52),
        }
    );
    assert_eq!(err.category(), ErrorCategory::Syntax);
}

#[test]
fn semicolon_inside_language_is_rejected() {
    let err = parse(&read_fixture("negative/improper_semicolon.webcontent")).unwrap_err();
    assert!(matches!(err, ParseError::ImproperSemicolon { .. }), "{:?}", err);
}

#[test]
fn first_error_wins() {
    // Both the duplicate language and the missing scriptfile are wrong;
    // the duplicate is found during the pass, before the final checks.
    let src = "en{title \"`a`\", route \"`/`\"};en{title \"`b`\", route \"`/b`\"};";
    assert!(matches!(
        parse(src).unwrap_err(),
        ParseError::DuplicateLanguage { .. }
    ));
}
