//! Index-based share encoding.
//!
//! Segments encode as `t:<template>` optionally followed by
//! `|c:<category>|w:<word>`, every value an index into the lexicon. Line
//! parameters:
//!
//! | key   | value                                   |
//! |-------|-----------------------------------------|
//! | `m`   | `2` in double mode, absent otherwise    |
//! | `l1`  | segment 1 of line 1                     |
//! | `l1x` | `j:<conjunction>|<segment 2>`           |
//! | `l2`  | `[sj:<start conjunction>|]<segment 1>`  |
//! | `l2x` | as `l1x`, for line 2                    |

use std::collections::HashMap;

use crate::lexicon::{Category, Lexicon};
use crate::message::{Composition, Mode, Segment};

pub const MODE_PARAM: &str = "m";
pub const LINE1_PARAM: &str = "l1";
pub const LINE1_TAIL_PARAM: &str = "l1x";
pub const LINE2_PARAM: &str = "l2";
pub const LINE2_TAIL_PARAM: &str = "l2x";

const DOUBLE_MODE: &str = "2";

/// Encode a segment, or `None` when its template is not in the lexicon.
pub fn encode_segment(lexicon: &Lexicon, segment: &Segment) -> Option<String> {
    let template = lexicon.template_index(&segment.template)?;
    let mut encoded = format!("t:{template}");
    if let Some(category) = segment.word_category {
        if !segment.word.is_empty() {
            if let Some(word) = lexicon.word_index(category, &segment.word) {
                encoded.push_str(&format!("|c:{}|w:{word}", category.key()));
            }
        }
    }
    Some(encoded)
}

/// Query parameters for `state`. Entries the lexicon cannot resolve are left out.
pub fn encode_compact(lexicon: &Lexicon, state: &Composition) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if state.mode == Mode::Double {
        params.push((MODE_PARAM, DOUBLE_MODE.to_string()));
    }

    if let Some(segment) = encode_segment(lexicon, &state.line1.segment1) {
        params.push((LINE1_PARAM, segment));
    }
    if let Some(tail) = encode_tail(lexicon, &state.line1.conjunction, &state.line1.segment2) {
        params.push((LINE1_TAIL_PARAM, tail));
    }

    // Line 2 is not rendered in single mode, so it is not shared either.
    if state.mode == Mode::Double {
        let line2 = &state.line2;
        let mut head = String::new();
        if !line2.start_conjunction.is_empty() {
            if let Some(index) = lexicon.conjunction_index(&line2.start_conjunction) {
                head.push_str(&format!("sj:{index}|"));
            }
        }
        if let Some(segment) = encode_segment(lexicon, &line2.line.segment1) {
            head.push_str(&segment);
        }
        if !head.is_empty() {
            params.push((LINE2_PARAM, head));
        }
        if let Some(tail) = encode_tail(lexicon, &line2.line.conjunction, &line2.line.segment2) {
            params.push((LINE2_TAIL_PARAM, tail));
        }
    }

    params
}

fn encode_tail(lexicon: &Lexicon, conjunction: &str, segment: &Segment) -> Option<String> {
    if conjunction.is_empty() {
        return None;
    }
    let index = lexicon.conjunction_index(conjunction)?;
    let segment = encode_segment(lexicon, segment).unwrap_or_default();
    Some(format!("j:{index}|{segment}"))
}

/// One decoded parameter value.
#[derive(Debug, Default, PartialEq, Eq)]
struct Part {
    conjunction: String,
    start_conjunction: String,
    segment: Segment,
}

fn parse_index(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

fn parse_part(lexicon: &Lexicon, value: &str) -> Part {
    let mut part = Part::default();
    let mut word_index = None;

    for piece in value.split('|') {
        let (key, val) = piece.split_once(':').unwrap_or((piece, ""));
        match key {
            "j" => {
                part.conjunction = resolve(parse_index(val).and_then(|i| lexicon.conjunction_at(i)))
            }
            "sj" => {
                part.start_conjunction =
                    resolve(parse_index(val).and_then(|i| lexicon.conjunction_at(i)))
            }
            "t" => {
                part.segment.template = resolve(parse_index(val).and_then(|i| lexicon.template_at(i)))
            }
            "c" => part.segment.word_category = Category::parse(val),
            "w" if word_index.is_none() => word_index = Some(parse_index(val)),
            _ => {}
        }
    }

    if let (Some(category), Some(index)) = (part.segment.word_category, word_index) {
        part.segment.word = resolve(index.and_then(|i| lexicon.word_at(category, i)));
    }
    part
}

fn resolve(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_default()
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a String> {
    params.get(key).filter(|value| !value.is_empty())
}

/// Whether `params` carries a compact-format link.
pub fn is_compact(params: &HashMap<String, String>) -> bool {
    params.contains_key(LINE1_PARAM) || params.contains_key(LINE2_PARAM)
}

/// Apply compact parameters onto `state`.
///
/// A missing or empty tail parameter clears that line's conjunction and
/// segment 2; a missing or empty head parameter keeps the existing segment 1. Returns false, leaving
/// `state` untouched, when the parameters do not hold a compact link.
pub fn decode_compact(
    lexicon: &Lexicon,
    params: &HashMap<String, String>,
    state: &mut Composition,
) -> bool {
    if !is_compact(params) {
        return false;
    }

    state.mode = match params.get(MODE_PARAM).map(String::as_str) {
        Some(DOUBLE_MODE) => Mode::Double,
        _ => Mode::Single,
    };

    if let Some(value) = non_empty(params, LINE1_PARAM) {
        state.line1.segment1 = parse_part(lexicon, value).segment;
    }
    match non_empty(params, LINE1_TAIL_PARAM) {
        Some(value) => {
            let part = parse_part(lexicon, value);
            state.line1.conjunction = part.conjunction;
            state.line1.segment2 = part.segment;
        }
        None => state.line1.clear_tail(),
    }

    if let Some(value) = non_empty(params, LINE2_PARAM) {
        let part = parse_part(lexicon, value);
        state.line2.start_conjunction = part.start_conjunction;
        state.line2.line.segment1 = part.segment;
    }
    match non_empty(params, LINE2_TAIL_PARAM) {
        Some(value) => {
            let part = parse_part(lexicon, value);
            state.line2.line.conjunction = part.conjunction;
            state.line2.line.segment2 = part.segment;
        }
        None => state.line2.line.clear_tail(),
    }

    true
}
