//! Value-based share encoding kept for links created before the compact format.
//!
//! The single `s` parameter holds standard base64 over the
//! `encodeURIComponent` form of a JSON object `{ m, l1, l2 }` carrying full
//! values rather than lexicon indices.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::message::{Composition, Line, Line2, Mode};

pub const LEGACY_PARAM: &str = "s";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Accepts payloads with or without trailing `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1: Option<Line>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2: Option<Line2>,
}

impl LegacyPayload {
    pub fn from_state(state: &Composition) -> Self {
        Self {
            m: Some(state.mode),
            l1: Some(state.line1.snapshot()),
            l2: Some(state.line2.snapshot()),
        }
    }

    /// Overwrite the fields present in the payload.
    pub fn apply(self, state: &mut Composition) {
        if let Some(mode) = self.m {
            state.mode = mode;
        }
        if let Some(line1) = self.l1 {
            state.line1 = line1;
        }
        if let Some(line2) = self.l2 {
            state.line2 = line2;
        }
    }
}

pub fn encode_legacy(state: &Composition) -> Result<String, DecodeError> {
    let json = serde_json::to_string(&LegacyPayload::from_state(state))?;
    let escaped = utf8_percent_encode(&json, URI_COMPONENT).to_string();
    Ok(STANDARD.encode(escaped))
}

pub fn decode_legacy(value: &str) -> Result<LegacyPayload, DecodeError> {
    if value.is_empty() {
        return Err(DecodeError::MissingPayload);
    }
    // Unescaped `+` reads back from a query string as a space.
    let normalized = value.replace(' ', "+");
    let bytes = LENIENT.decode(normalized)?;
    let escaped = std::str::from_utf8(&bytes)?;
    let json = percent_decode_str(escaped).decode_utf8()?;
    Ok(serde_json::from_str(&json)?)
}
