//! Message model - segments, lines and the composition state they form.
//!
//! JSON field names are camelCase (`wordCategory`, `startConjunction`) to stay
//! readable by state blobs and legacy share links written by earlier clients.

mod format;

use serde::{Deserialize, Serialize};

use crate::lexicon::Category;

pub use format::{
    compose_line, compose_message, format_segment, FILL_MARKER, FULL_WIDTH_COMMA, PLACEHOLDER,
    TERMINAL_PUNCTUATION,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Double,
}

/// One fillable unit of a line.
///
/// When `template` carries the fill marker, `word_category` names the list the
/// `word` was drawn from. Otherwise both are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Segment {
    pub template: String,
    #[serde(with = "category_serde")]
    pub word_category: Option<Category>,
    pub word: String,
}

impl Segment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A segment whose template is used verbatim.
    pub fn plain(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            word_category: None,
            word: String::new(),
        }
    }

    pub fn filled(template: impl Into<String>, category: Category, word: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            word_category: Some(category),
            word: word.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty() && self.word_category.is_none() && self.word.is_empty()
    }

    pub fn has_fill_marker(&self) -> bool {
        self.template.contains(FILL_MARKER)
    }
}

/// One or two segments joined by an optional conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Line {
    pub segment1: Segment,
    pub conjunction: String,
    pub segment2: Segment,
}

impl Line {
    pub fn single(segment: Segment) -> Self {
        Self {
            segment1: segment,
            ..Self::default()
        }
    }

    pub fn joined(segment1: Segment, conjunction: impl Into<String>, segment2: Segment) -> Self {
        Self {
            segment1,
            conjunction: conjunction.into(),
            segment2,
        }
    }

    pub fn has_conjunction(&self) -> bool {
        !self.conjunction.is_empty()
    }

    /// Drop the conjunction together with the second segment.
    pub fn clear_tail(&mut self) {
        self.conjunction.clear();
        self.segment2 = Segment::empty();
    }

    /// Independent deep copy.
    pub fn snapshot(&self) -> Line {
        Line {
            segment1: self.segment1.clone(),
            conjunction: self.conjunction.clone(),
            segment2: self.segment2.clone(),
        }
    }
}

/// The second line: a [`Line`] with a leading conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Line2 {
    pub start_conjunction: String,
    #[serde(flatten)]
    pub line: Line,
}

impl Line2 {
    pub fn new(start_conjunction: impl Into<String>, line: Line) -> Self {
        Self {
            start_conjunction: start_conjunction.into(),
            line,
        }
    }

    pub fn snapshot(&self) -> Line2 {
        Line2 {
            start_conjunction: self.start_conjunction.clone(),
            line: self.line.snapshot(),
        }
    }
}

/// Live composition: the mode plus both lines. Line 2 is kept in single mode
/// but left out of the rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Composition {
    pub mode: Mode,
    pub line1: Line,
    pub line2: Line2,
}

impl Composition {
    pub fn new(mode: Mode, line1: Line, line2: Line2) -> Self {
        Self { mode, line1, line2 }
    }

    pub fn text(&self) -> String {
        compose_message(self.mode, &self.line1, &self.line2)
    }

    pub fn snapshot(&self) -> Composition {
        Composition {
            mode: self.mode,
            line1: self.line1.snapshot(),
            line2: self.line2.snapshot(),
        }
    }
}

/// `Option<Category>` as the bare key, with `""` standing for none. Keys this
/// build does not know also read as none.
mod category_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::lexicon::Category;

    pub fn serialize<S>(category: &Option<Category>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(category.as_ref().map(Category::key).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        if key.is_empty() {
            return Ok(None);
        }
        let category = Category::parse(&key);
        if category.is_none() {
            tracing::debug!(key = %key, "ignoring unknown word category");
        }
        Ok(category)
    }
}
