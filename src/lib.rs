pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod lexicon;
pub mod message;
pub mod share;
pub mod store;

#[cfg(feature = "emitter")]
mod emitter;

pub use config::ComposerConfig;
pub use engine::{ChangeListener, Clock, ManualClock, MessageEngine, SystemClock, UrlImport};
pub use error::{ConfigError, DecodeError, LexiconError, StoreError};
pub use history::{HistoryItem, HistoryLog};
#[cfg(feature = "loader")]
pub use lexicon::DirectorySource;
pub use lexicon::{load_lexicon, parse_lines, Category, Lexicon, LexiconSource};
pub use message::{
    compose_line, compose_message, format_segment, Composition, Line, Line2, Mode, Segment,
};
pub use share::{Location, MemoryLocation, ShareFormat};
pub use store::{FileStore, InMemoryStore, KeyValueStore, SavedState, StatePersistence};

#[cfg(feature = "emitter")]
pub use emitter::{StateEmitter, STATE_CHANGED};

// Re-export the url type share links are built on
pub use url::Url;
