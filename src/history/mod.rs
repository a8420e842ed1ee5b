//! History - bounded, newest-first log of generated messages.
//!
//! Entries are unique by rendered text: recording a text that is already
//! present moves it to the front with a fresh id and timestamp. Items are
//! owned snapshots and never change after they are recorded.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::message::{Composition, Line, Line2, Mode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    id: String,
    mode: Mode,
    line1: Line,
    line2: Line2,
    text: String,
    timestamp: i64,
}

impl HistoryItem {
    fn capture(id: String, composition: &Composition, text: String, timestamp: i64) -> Self {
        Self {
            id,
            mode: composition.mode,
            line1: composition.line1.snapshot(),
            line2: composition.line2.snapshot(),
            text,
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn line1(&self) -> &Line {
        &self.line1
    }

    pub fn line2(&self) -> &Line2 {
        &self.line2
    }

    /// Message text as rendered when the item was recorded.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Deep copy of the recorded composition.
    pub fn composition(&self) -> Composition {
        Composition::new(self.mode, self.line1.snapshot(), self.line2.snapshot())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
    limit: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Rebuild a log from persisted items, newest first. Items past the limit
    /// are dropped.
    pub fn from_items(mut items: Vec<HistoryItem>, limit: usize) -> Self {
        let limit = limit.max(1);
        if items.len() > limit {
            tracing::debug!(dropped = items.len() - limit, "truncating loaded history");
            items.truncate(limit);
        }
        Self { items, limit }
    }

    /// Snapshot `composition` as the newest entry.
    pub fn record(&mut self, composition: &Composition, now_millis: i64) -> &HistoryItem {
        let text = composition.text();

        if let Some(index) = self.items.iter().position(|item| item.text == text) {
            self.items.remove(index);
        }

        let id = self.unique_id(now_millis);
        self.items
            .insert(0, HistoryItem::capture(id, composition, text, now_millis));

        if self.items.len() > self.limit {
            let evicted = self.items.len() - self.limit;
            self.items.truncate(self.limit);
            tracing::debug!(evicted, "history limit reached");
        }
        &self.items[0]
    }

    /// Remove the item with `id`. Returns false when no such item exists.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    // Ids come from the creation time; two records in the same millisecond
    // take the next free integer.
    fn unique_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        loop {
            let id = candidate.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryItem;
    type IntoIter = std::slice::Iter<'a, HistoryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
