#![allow(dead_code)]

pub mod lexicon;

use message_composer::{ManualClock, MessageEngine};

/// Engine with a clock pinned at `start`.
pub fn engine_at(start: i64) -> (MessageEngine, ManualClock) {
    let clock = ManualClock::new(start);
    (MessageEngine::new().with_clock(clock.clone()), clock)
}
