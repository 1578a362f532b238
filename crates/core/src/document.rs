//! Typed parse result.
//!
//! These values own all of their data; nothing here points back into the
//! lexer's hierarchy.

use std::collections::BTreeMap;

use serde::Serialize;

/// A complete parsed `.webcontent` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub script_file: String,
    pub languages: BTreeMap<String, Language>,
}

/// One named language block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: String,
    pub title: String,
    pub route: String,
    pub metadata: Section,
    pub content: Section,
}

/// The shape shared by `metadata` and `content`: an optional scalar value
/// plus any number of custom keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Keyword>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

/// A custom keyword: a value, nested keywords, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Keyword>,
}

impl Keyword {
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Keyword {
            name: name.into(),
            value: Some(value.into()),
            children: BTreeMap::new(),
        }
    }

    pub fn group(name: impl Into<String>, children: BTreeMap<String, Keyword>) -> Self {
        Keyword {
            name: name.into(),
            value: None,
            children,
        }
    }

    pub fn with_children(
        name: impl Into<String>,
        value: impl Into<String>,
        children: BTreeMap<String, Keyword>,
    ) -> Self {
        Keyword {
            name: name.into(),
            value: Some(value.into()),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&Keyword> {
        self.children.get(name)
    }
}
