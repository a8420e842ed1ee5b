//! Lexicon - the read-only, index-addressable word tables phrases are built from.
//!
//! A lexicon holds the template list, the conjunction list and one word list
//! per [`Category`]. Share links address entries by index, so list order must
//! stay stable across sessions for old links to keep resolving.
//!
//! ## Example
//!
//! ```
//! use message_composer::{Category, Lexicon};
//!
//! let lexicon = Lexicon::from_sources(
//!     "你好*****\n加油\n",
//!     "但是\n，\n",
//!     [(Category::Items, "武器\n盔甲")],
//! )
//! .unwrap();
//!
//! assert_eq!(lexicon.template_index("加油"), Some(1));
//! assert_eq!(lexicon.word_at(Category::Items, 1), Some("盔甲"));
//! ```

mod category;
mod loader;

use std::collections::BTreeMap;

use crate::error::LexiconError;

pub use category::Category;
#[cfg(feature = "loader")]
pub use loader::DirectorySource;
pub use loader::{load_lexicon, LexiconSource, CONJUNCTIONS_FILE, TEMPLATES_FILE};

/// Split newline-delimited lexicon text into trimmed, non-empty lines.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    templates: Vec<String>,
    conjunctions: Vec<String>,
    words: BTreeMap<Category, Vec<String>>,
}

impl Lexicon {
    /// Build a lexicon from already parsed lists.
    ///
    /// Only the template list must be non-empty. An empty conjunction list
    /// means random lines never carry a second segment; an empty or missing
    /// category is never drawn for a fill.
    pub fn new(
        templates: Vec<String>,
        conjunctions: Vec<String>,
        words: impl IntoIterator<Item = (Category, Vec<String>)>,
    ) -> Result<Self, LexiconError> {
        if templates.is_empty() {
            return Err(LexiconError::EmptyList("templates".into()));
        }
        Ok(Self {
            templates,
            conjunctions,
            words: words.into_iter().collect(),
        })
    }

    /// Build a lexicon from raw file contents.
    pub fn from_sources<'a>(
        templates: &str,
        conjunctions: &str,
        words: impl IntoIterator<Item = (Category, &'a str)>,
    ) -> Result<Self, LexiconError> {
        Self::new(
            parse_lines(templates),
            parse_lines(conjunctions),
            words
                .into_iter()
                .map(|(category, text)| (category, parse_lines(text))),
        )
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn conjunctions(&self) -> &[String] {
        &self.conjunctions
    }

    /// Categories present in this lexicon, in declaration order.
    pub fn categories(&self) -> Vec<Category> {
        self.words.keys().copied().collect()
    }

    /// Categories with at least one word, in declaration order.
    pub fn fillable_categories(&self) -> Vec<Category> {
        self.words
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(category, _)| *category)
            .collect()
    }

    pub fn words(&self, category: Category) -> &[String] {
        self.words
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn template_index(&self, template: &str) -> Option<usize> {
        self.templates.iter().position(|t| t == template)
    }

    pub fn conjunction_index(&self, conjunction: &str) -> Option<usize> {
        self.conjunctions.iter().position(|c| c == conjunction)
    }

    pub fn word_index(&self, category: Category, word: &str) -> Option<usize> {
        self.words(category).iter().position(|w| w == word)
    }

    pub fn template_at(&self, index: usize) -> Option<&str> {
        self.templates.get(index).map(String::as_str)
    }

    pub fn conjunction_at(&self, index: usize) -> Option<&str> {
        self.conjunctions.get(index).map(String::as_str)
    }

    pub fn word_at(&self, category: Category, index: usize) -> Option<&str> {
        self.words(category).get(index).map(String::as_str)
    }
}
