//! Share links - composition state carried in URL query parameters.
//!
//! Two formats are understood: the compact index-based format written by
//! [`share_url`], and the legacy base64/JSON `s` parameter, which is only read
//! when no compact parameters are present.

mod compact;
mod legacy;

use std::collections::HashMap;

use url::Url;

use crate::error::DecodeError;
use crate::lexicon::Lexicon;
use crate::message::Composition;

pub use compact::{
    decode_compact, encode_compact, encode_segment, is_compact, LINE1_PARAM, LINE1_TAIL_PARAM,
    LINE2_PARAM, LINE2_TAIL_PARAM, MODE_PARAM,
};
pub use legacy::{decode_legacy, encode_legacy, LegacyPayload, LEGACY_PARAM};

/// Every parameter either format may write.
pub const SHARE_PARAMS: [&str; 6] = [
    LEGACY_PARAM,
    MODE_PARAM,
    LINE1_PARAM,
    LINE1_TAIL_PARAM,
    LINE2_PARAM,
    LINE2_TAIL_PARAM,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareFormat {
    Compact,
    Legacy,
}

/// Where the current page address is read from and rewritten to.
pub trait Location {
    fn href(&self) -> Url;

    /// Replace the current address in place, without a new navigation entry.
    fn replace(&mut self, url: Url);
}

/// In-process [`Location`] for hosts without a browser address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    current: Url,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self { current: url }
    }

    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?))
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> Url {
        self.current.clone()
    }

    fn replace(&mut self, url: Url) {
        self.current = url;
    }
}

/// Query parameters by name; the first occurrence of a repeated name wins.
pub fn query_params(url: &Url) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// `url` with query string and fragment removed.
pub fn strip_query(url: &Url) -> Url {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.set_fragment(None);
    clean
}

/// Build a compact share link for `state` on top of `base`.
///
/// Share parameters already on `base` are replaced; unrelated parameters stay.
pub fn share_url(lexicon: &Lexicon, base: &Url, state: &Composition) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| {
            let name: &str = key;
            !SHARE_PARAMS.contains(&name)
        })
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let params = encode_compact(lexicon, state);

    let mut url = base.clone();
    if kept.is_empty() && params.is_empty() {
        url.set_query(None);
        return url;
    }
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept);
        query.extend_pairs(params);
    }
    url
}

/// Decode whichever share format `url` carries into `state`.
///
/// `Ok(None)` means the URL holds no share parameters. On error `state` is
/// left exactly as it was.
pub fn import(
    lexicon: &Lexicon,
    url: &Url,
    state: &mut Composition,
) -> Result<Option<ShareFormat>, DecodeError> {
    let params = query_params(url);

    if decode_compact(lexicon, &params, state) {
        return Ok(Some(ShareFormat::Compact));
    }

    match params.get(LEGACY_PARAM) {
        Some(value) => {
            decode_legacy(value)?.apply(state);
            Ok(Some(ShareFormat::Legacy))
        }
        None => Ok(None),
    }
}
