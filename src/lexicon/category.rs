use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Word list partition. The string key is the lowercase variant name and is
/// what appears in share links (`c:<key>`) and in persisted state.
///
/// Declaration order is the category order used for random picks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Enemies,
    Characters,
    Items,
    Bodyparts,
    Attributes,
    Concepts,
    Situations,
    Locations,
    Directions,
    Tactics,
    Sentences,
}

impl Category {
    pub fn key(&self) -> &str {
        self.as_ref()
    }

    /// Display label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Enemies => "敌人",
            Category::Characters => "人物",
            Category::Items => "道具",
            Category::Bodyparts => "身体部位",
            Category::Attributes => "属性",
            Category::Concepts => "概念",
            Category::Situations => "情况",
            Category::Locations => "场所",
            Category::Directions => "方位",
            Category::Tactics => "战术",
            Category::Sentences => "成句",
        }
    }

    /// Lexicon file holding this category's words.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.key())
    }

    pub fn parse(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}
