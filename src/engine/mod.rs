//! MessageEngine - owns the live composition and the history log.
//!
//! Every mutating operation finishes by comparing the full state against the
//! last state observers saw; listeners registered with
//! [`MessageEngine::on_change`] run only when something actually changed.
//!
//! ## Example
//!
//! ```
//! use message_composer::{Category, InMemoryStore, Lexicon, MessageEngine, StatePersistence};
//! use rand::SeedableRng;
//!
//! let lexicon = Lexicon::from_sources(
//!     "你好*****\n加油",
//!     "但是\n，",
//!     [(Category::Items, "武器\n盔甲")],
//! )
//! .unwrap();
//!
//! let persistence = StatePersistence::new(InMemoryStore::new(), "state");
//! let mut engine = MessageEngine::new();
//! engine.restore(persistence.load());
//! engine.persist_to(persistence.clone());
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! engine.randomize(&lexicon, &mut rng);
//! engine.generate();
//!
//! assert_eq!(persistence.load().history.len(), 1);
//! ```

mod clock;

use rand::seq::SliceRandom;
use rand::Rng;
use url::Url;

use crate::config::ComposerConfig;
use crate::history::{HistoryItem, HistoryLog};
use crate::lexicon::Lexicon;
use crate::message::{Composition, Line, Line2, Mode, Segment, FILL_MARKER};
use crate::share::{self, Location, ShareFormat};
use crate::store::{KeyValueStore, SavedState, StatePersistence};

pub use clock::{Clock, ManualClock, SystemClock};

/// Observer called with the full state after a change.
pub type ChangeListener = Box<dyn FnMut(&SavedState) + Send>;

/// Outcome of [`MessageEngine::load_from_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlImport {
    /// No share parameters on the URL.
    Absent,
    Imported(ShareFormat),
    /// Share parameters were present but could not be decoded; state unchanged.
    Rejected,
}

pub struct MessageEngine {
    composition: Composition,
    history: HistoryLog,
    clock: Box<dyn Clock>,
    listeners: Vec<ChangeListener>,
    observed: SavedState,
}

impl Default for MessageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageEngine {
    pub fn new() -> Self {
        Self::with_config(&ComposerConfig::default())
    }

    pub fn with_config(config: &ComposerConfig) -> Self {
        Self {
            composition: Composition::default(),
            history: HistoryLog::with_limit(config.history_limit),
            clock: Box::new(SystemClock),
            listeners: Vec::new(),
            observed: SavedState::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.composition.mode
    }

    pub fn line1(&self) -> &Line {
        &self.composition.line1
    }

    pub fn line2(&self) -> &Line2 {
        &self.composition.line2
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Rendered message for the live composition.
    pub fn current_message_text(&self) -> String {
        self.composition.text()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Apply an arbitrary edit to the live composition.
    pub fn edit<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Composition),
    {
        edit(&mut self.composition);
        self.notify();
    }

    /// Replace the live composition with a random one drawn from `lexicon`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, lexicon: &Lexicon, rng: &mut R) {
        let mode = if rng.gen_bool(0.5) {
            Mode::Single
        } else {
            Mode::Double
        };
        let line1 = random_line(lexicon, rng);

        let start_conjunction = if rng.gen_bool(0.5) {
            lexicon.conjunctions().choose(rng).cloned().unwrap_or_default()
        } else {
            String::new()
        };
        let line2 = Line2::new(start_conjunction, random_line(lexicon, rng));

        self.composition = Composition::new(mode, line1, line2);
        self.notify();
    }

    /// Snapshot the current message into the history log.
    pub fn generate(&mut self) -> HistoryItem {
        let now = self.clock.now_millis();
        let item = self.history.record(&self.composition, now).clone();
        tracing::debug!(id = item.id(), entries = self.history.len(), "message generated");
        self.notify();
        item
    }

    /// Make `item`'s composition the live one. History is left alone.
    pub fn load_from_history(&mut self, item: &HistoryItem) {
        self.composition = item.composition();
        self.notify();
    }

    /// Remove a history entry. Unknown ids are ignored.
    pub fn delete_history_item(&mut self, id: &str) -> bool {
        let removed = self.history.remove(id);
        if removed {
            self.notify();
        }
        removed
    }

    // ------------------------------------------------------------------------
    // Share links
    // ------------------------------------------------------------------------

    /// Compact share link for `item`, or for the live composition when `None`.
    pub fn share_url(&self, lexicon: &Lexicon, base: &Url, item: Option<&HistoryItem>) -> Url {
        match item {
            Some(item) => share::share_url(lexicon, base, &item.composition()),
            None => share::share_url(lexicon, base, &self.composition),
        }
    }

    /// Import a shared message from the current location.
    ///
    /// On success the message is recorded in history and the share
    /// parameters are removed from the location. A malformed link is logged
    /// and leaves every piece of state untouched.
    pub fn load_from_url<L>(&mut self, lexicon: &Lexicon, location: &mut L) -> UrlImport
    where
        L: Location + ?Sized,
    {
        let href = location.href();
        let mut next = self.composition.snapshot();

        match share::import(lexicon, &href, &mut next) {
            Ok(Some(format)) => {
                self.composition = next;
                self.generate();
                location.replace(share::strip_query(&href));
                tracing::debug!(?format, "shared message imported");
                UrlImport::Imported(format)
            }
            Ok(None) => UrlImport::Absent,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed share link");
                UrlImport::Rejected
            }
        }
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            mode: self.composition.mode,
            line1: self.composition.line1.snapshot(),
            line2: self.composition.line2.snapshot(),
            history: self.history.items().to_vec(),
        }
    }

    /// Replace all state with a previously saved blob. Observers are not
    /// called; the restored state is what they are assumed to have seen.
    pub fn restore(&mut self, saved: SavedState) {
        self.composition = Composition::new(saved.mode, saved.line1, saved.line2);
        self.history = HistoryLog::from_items(saved.history, self.history.limit());
        self.observed = self.saved_state();
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&SavedState) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Save to `persistence` after every change. Save failures are logged.
    pub fn persist_to<S>(&mut self, persistence: StatePersistence<S>)
    where
        S: KeyValueStore + 'static,
    {
        self.on_change(move |state| {
            if let Err(err) = persistence.save(state) {
                tracing::warn!(key = persistence.key(), error = %err, "failed to save state");
            }
        });
    }

    fn notify(&mut self) {
        let current = self.saved_state();
        if current == self.observed {
            return;
        }
        for listener in &mut self.listeners {
            listener(&current);
        }
        self.observed = current;
    }
}

fn random_segment<R: Rng + ?Sized>(lexicon: &Lexicon, rng: &mut R) -> Segment {
    let template = lexicon.templates().choose(rng).cloned().unwrap_or_default();
    if !template.contains(FILL_MARKER) {
        return Segment::plain(template);
    }
    match lexicon.fillable_categories().choose(rng).copied() {
        Some(category) => {
            let word = lexicon.words(category).choose(rng).cloned().unwrap_or_default();
            Segment::filled(template, category, word)
        }
        None => Segment::plain(template),
    }
}

fn random_line<R: Rng + ?Sized>(lexicon: &Lexicon, rng: &mut R) -> Line {
    let segment1 = random_segment(lexicon, rng);
    if rng.gen_bool(0.5) {
        if let Some(conjunction) = lexicon.conjunctions().choose(rng) {
            let segment2 = random_segment(lexicon, rng);
            return Line::joined(segment1, conjunction.clone(), segment2);
        }
    }
    Line::single(segment1)
}
