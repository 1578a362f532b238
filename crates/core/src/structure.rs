//! Stage 3: turn the linked root nodes into a typed [`Document`].
//!
//! Reserved keywords are matched case-insensitively here. Custom keys are
//! compared by exact text, and only against siblings under the same parent.

use std::collections::BTreeMap;

use crate::document::{Document, Keyword, Language, Section};
use crate::error::ParseError;
use crate::hierarchy::{Hierarchy, RawKeyword};

/// Build the document from the root level of a linked hierarchy.
pub fn structure(hierarchy: &Hierarchy) -> Result<Document, ParseError> {
    let mut script_file: Option<String> = None;
    let mut languages: BTreeMap<String, Language> = BTreeMap::new();

    for node in hierarchy.roots().iter().filter(|n| !n.text.is_empty()) {
        if node.text.eq_ignore_ascii_case("scriptfile") {
            let value = required_value(node)?;
            if script_file.is_some() {
                return Err(ParseError::DuplicateReservedKeyword {
                    keyword: "scriptfile".to_string(),
                });
            }
            script_file = Some(value.to_string());
            continue;
        }

        if languages.contains_key(&node.text) {
            return Err(ParseError::DuplicateLanguage {
                language: node.text.clone(),
            });
        }
        let language = build_language(hierarchy, node)?;
        languages.insert(node.text.clone(), language);
    }

    let script_file = script_file.ok_or_else(|| missing("scriptfile"))?;
    if languages.is_empty() {
        return Err(missing("language"));
    }

    Ok(Document {
        script_file,
        languages,
    })
}

fn missing(keyword: &str) -> ParseError {
    ParseError::MissingKeyword {
        keyword: keyword.to_string(),
    }
}

fn required_value(node: &RawKeyword) -> Result<&str, ParseError> {
    node.non_empty_value()
        .ok_or_else(|| ParseError::ValueExpected {
            keyword: node.text.clone(),
        })
}

/// Set a reserved single-valued field, rejecting a second occurrence.
fn assign_once(
    slot: &mut Option<String>,
    field: &str,
    node: &RawKeyword,
) -> Result<(), ParseError> {
    let value = required_value(node)?;
    if slot.is_some() {
        return Err(ParseError::DuplicateReservedKeyword {
            keyword: field.to_string(),
        });
    }
    *slot = Some(value.to_string());
    Ok(())
}

fn build_language(hierarchy: &Hierarchy, node: &RawKeyword) -> Result<Language, ParseError> {
    if !node.has_children() {
        return Err(missing("title, route"));
    }

    let mut title = None;
    let mut route = None;
    let mut metadata = Section::default();
    let mut content = Section::default();

    for child in hierarchy.children_of(node) {
        match child.text.to_ascii_lowercase().as_str() {
            "title" => assign_once(&mut title, "title", child)?,
            "route" => assign_once(&mut route, "route", child)?,
            "metadata" => merge_section(hierarchy, &mut metadata, child)?,
            "content" => merge_section(hierarchy, &mut content, child)?,
            // Custom keywords belong inside metadata/content.
            _ => {}
        }
    }

    let (title, route) = match (title, route) {
        (Some(title), Some(route)) => (title, route),
        (None, None) => return Err(missing("title, route")),
        (None, Some(_)) => return Err(missing("title")),
        (Some(_), None) => return Err(missing("route")),
    };

    Ok(Language {
        name: node.text.clone(),
        title,
        route,
        metadata,
        content,
    })
}

/// Fold one `metadata`/`content` block into its section. A block with
/// neither value nor children is ignored; repeated blocks accumulate.
fn merge_section(
    hierarchy: &Hierarchy,
    section: &mut Section,
    node: &RawKeyword,
) -> Result<(), ParseError> {
    if node.has_children() {
        for (name, keyword) in simplify_children(hierarchy, node)? {
            if section.children.contains_key(&name) {
                return Err(ParseError::DuplicateCustomKeyword { keyword: name });
            }
            section.children.insert(name, keyword);
        }
    }
    if let Some(value) = node.non_empty_value() {
        section.value = Some(value.to_string());
    }
    Ok(())
}

/// Recursively convert a node's children into keyed custom keywords.
fn simplify_children(
    hierarchy: &Hierarchy,
    node: &RawKeyword,
) -> Result<BTreeMap<String, Keyword>, ParseError> {
    let mut out = BTreeMap::new();

    for child in hierarchy.children_of(node) {
        // A leaf's missing value is reported before a repeated key.
        let leaf_value = if child.has_children() {
            None
        } else {
            Some(required_value(child)?)
        };

        if out.contains_key(&child.text) {
            return Err(ParseError::DuplicateCustomKeyword {
                keyword: child.text.clone(),
            });
        }

        let keyword = match leaf_value {
            Some(value) => Keyword::leaf(&child.text, value),
            None => {
                let children = simplify_children(hierarchy, child)?;
                match child.non_empty_value() {
                    Some(value) => Keyword::with_children(&child.text, value, children),
                    None => Keyword::group(&child.text, children),
                }
            }
        };
        out.insert(child.text.clone(), keyword);
    }

    Ok(out)
}
