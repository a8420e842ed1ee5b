use std::collections::HashMap;

use futures::future::try_join_all;
use strum::IntoEnumIterator;

use super::{parse_lines, Category, Lexicon};
use crate::error::LexiconError;

pub const TEMPLATES_FILE: &str = "templates.txt";
pub const CONJUNCTIONS_FILE: &str = "conjunctions.txt";

/// Something that can hand out the raw text of a lexicon file by name.
#[allow(async_fn_in_trait)]
pub trait LexiconSource {
    async fn fetch(&self, file: &str) -> Result<String, LexiconError>;
}

/// Reads lexicon files from a directory on disk.
#[cfg(feature = "loader")]
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: std::path::PathBuf,
}

#[cfg(feature = "loader")]
impl DirectorySource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(feature = "loader")]
impl LexiconSource for DirectorySource {
    async fn fetch(&self, file: &str) -> Result<String, LexiconError> {
        let path = self.root.join(file);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LexiconError::Io {
                path: path.clone(),
                source,
            })
    }
}

/// File name to contents, mostly useful for embedding and tests.
impl LexiconSource for HashMap<String, String> {
    async fn fetch(&self, file: &str) -> Result<String, LexiconError> {
        self.get(file).cloned().ok_or_else(|| LexiconError::Source {
            file: file.to_string(),
            message: "not found".into(),
        })
    }
}

/// Fetch every lexicon file concurrently and assemble the lexicon.
///
/// All-or-nothing: the first failing fetch fails the whole load.
pub async fn load_lexicon<S: LexiconSource>(source: &S) -> Result<Lexicon, LexiconError> {
    let categories: Vec<Category> = Category::iter().collect();

    let mut files = vec![TEMPLATES_FILE.to_string(), CONJUNCTIONS_FILE.to_string()];
    files.extend(categories.iter().map(Category::file_name));

    let texts = try_join_all(files.iter().map(|file| source.fetch(file))).await?;
    tracing::debug!(files = texts.len(), "lexicon files fetched");

    let mut texts = texts.into_iter();
    let templates = parse_lines(&texts.next().unwrap_or_default());
    let conjunctions = parse_lines(&texts.next().unwrap_or_default());
    let words = categories
        .into_iter()
        .zip(texts)
        .map(|(category, text)| (category, parse_lines(&text)));

    Lexicon::new(templates, conjunctions, words)
}
