//! In-memory lookup tables over successfully parsed documents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use webcontent_core::{Document, Language};

use crate::error::IndexError;
use crate::paths::resolve_path;

/// Languages keyed by language name.
pub type Languages = BTreeMap<String, Language>;

/// Languages indexed three ways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    by_file: BTreeMap<PathBuf, Languages>,
    by_route: BTreeMap<String, Languages>,
    by_script_file: BTreeMap<PathBuf, Languages>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one parsed document found at `path`.
    ///
    /// The script file is resolved against `base_route`. The document is
    /// rejected, and the index left untouched, if its script file is already
    /// claimed or if one of its languages is already indexed under the same
    /// route.
    pub fn insert(
        &mut self,
        path: &Path,
        document: &Document,
        base_route: &Path,
    ) -> Result<(), IndexError> {
        let script_file = resolve_path(&document.script_file, base_route);
        if self.by_script_file.contains_key(&script_file) {
            return Err(IndexError::DuplicateScriptFile { script_file });
        }

        for (name, language) in &document.languages {
            let taken = self
                .by_route
                .get(&language.route)
                .is_some_and(|existing| existing.contains_key(name));
            if taken {
                return Err(IndexError::DuplicateLanguage {
                    language: name.clone(),
                    route: language.route.clone(),
                });
            }
        }

        for (name, language) in &document.languages {
            self.by_route
                .entry(language.route.clone())
                .or_default()
                .insert(name.clone(), language.clone());
        }
        self.by_file
            .insert(path.to_path_buf(), document.languages.clone());
        self.by_script_file
            .insert(script_file, document.languages.clone());
        Ok(())
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, Languages> {
        &self.by_file
    }

    pub fn routes(&self) -> &BTreeMap<String, Languages> {
        &self.by_route
    }

    pub fn script_files(&self) -> &BTreeMap<PathBuf, Languages> {
        &self.by_script_file
    }

    pub fn languages_by_file(&self, path: &Path) -> Languages {
        self.by_file.get(path).cloned().unwrap_or_default()
    }

    pub fn languages_by_route(&self, route: &str) -> Languages {
        self.by_route.get(route).cloned().unwrap_or_default()
    }

    pub fn languages_by_script_file(&self, script_file: &Path) -> Languages {
        self.by_script_file
            .get(script_file)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webcontent_core::parse;

    fn doc(script: &str, langs: &[(&str, &str)]) -> Document {
        let mut src = format!("scriptfile \"`{}`\";", script);
        for (name, route) in langs {
            src.push_str(&format!(
                "{}{{title \"`{} page`\", route \"`{}`\"}};",
                name, name, route
            ));
        }
        parse(&src).unwrap()
    }

    const BASE: &str = "/srv/site";

    #[test]
    fn insert_indexes_by_all_three_keys() {
        let mut index = ContentIndex::new();
        let d = doc("~/js/home.js", &[("en", "/"), ("fr", "/fr")]);
        index
            .insert(Path::new("/c/home.webcontent"), &d, Path::new(BASE))
            .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(
            index
                .languages_by_file(Path::new("/c/home.webcontent"))
                .len(),
            2
        );
        assert_eq!(index.languages_by_route("/fr")["fr"].title, "fr page");
        assert_eq!(
            index
                .languages_by_script_file(Path::new("/srv/site/js/home.js"))
                .len(),
            2
        );
    }

    #[test]
    fn unknown_keys_return_empty_maps() {
        let index = ContentIndex::new();
        assert!(index.is_empty());
        assert!(index.languages_by_route("/nope").is_empty());
        assert!(index.languages_by_file(Path::new("/nope")).is_empty());
        assert!(index
            .languages_by_script_file(Path::new("/nope.js"))
            .is_empty());
    }

    #[test]
    fn same_route_with_different_language_names_is_allowed() {
        let mut index = ContentIndex::new();
        index
            .insert(Path::new("/c/a"), &doc("a.js", &[("en", "/")]), Path::new(BASE))
            .unwrap();
        index
            .insert(Path::new("/c/b"), &doc("b.js", &[("fr", "/")]), Path::new(BASE))
            .unwrap();
        assert_eq!(index.languages_by_route("/").len(), 2);
    }

    #[test]
    fn duplicate_script_file_is_rejected_after_resolution() {
        let mut index = ContentIndex::new();
        index
            .insert(Path::new("/c/a"), &doc("~/js/app.js", &[("en", "/")]), Path::new(BASE))
            .unwrap();
        let err = index
            .insert(
                Path::new("/c/b"),
                &doc("/srv/site/js/../js/app.js", &[("en", "/b")]),
                Path::new(BASE),
            )
            .unwrap_err();
        assert!(
            matches!(err, IndexError::DuplicateScriptFile { ref script_file }
                if script_file == Path::new("/srv/site/js/app.js")),
            "{:?}",
            err
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn duplicate_language_route_leaves_index_untouched() {
        let mut index = ContentIndex::new();
        index
            .insert(Path::new("/c/a"), &doc("a.js", &[("en", "/")]), Path::new(BASE))
            .unwrap();
        let before = index.clone();
        let err = index
            .insert(
                Path::new("/c/b"),
                &doc("b.js", &[("de", "/de"), ("en", "/")]),
                Path::new(BASE),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IndexError::DuplicateLanguage { ref language, ref route }
                if language == "en" && route == "/"
        ));
        assert_eq!(index, before);
    }
}
