use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use message_composer::share::encode_legacy;
use message_composer::{
    Category, Composition, Line, Line2, Location, MemoryLocation, Mode, Segment, ShareFormat,
    UrlImport, Url,
};

use crate::support::{engine_at, lexicon};

fn legacy_state() -> Composition {
    Composition::new(
        Mode::Double,
        Line::single(Segment::filled("前有*****", Category::Items, "宝箱")),
        Line2::new("", Line::single(Segment::plain("不在词库里的句子"))),
    )
}

fn legacy_link(payload: &str) -> MemoryLocation {
    let mut url = Url::parse("https://advice.example/").unwrap();
    url.query_pairs_mut().append_pair("s", payload);
    MemoryLocation::new(url)
}

#[test]
fn legacy_link_carries_values_not_indices() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    let mut location = legacy_link(&encode_legacy(&legacy_state()).unwrap());

    let outcome = engine.load_from_url(&lexicon, &mut location);
    assert_eq!(outcome, UrlImport::Imported(ShareFormat::Legacy));
    assert_eq!(engine.composition(), &legacy_state());
    assert_eq!(engine.current_message_text(), "前有宝箱\n不在词库里的句子");
    assert_eq!(engine.history().len(), 1);
    assert_eq!(location.href().query(), None);
}

#[test]
fn partial_legacy_payload_keeps_other_lines() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    engine.edit(|c| c.line1 = Line::single(Segment::plain("加油")));

    let json = r#"{"m":"double","l2":{"startConjunction":"但是","segment1":{"template":"小心","wordCategory":"","word":""},"conjunction":"","segment2":{"template":"","wordCategory":"","word":""}}}"#;
    let escaped: String = percent_encoding::utf8_percent_encode(json, percent_encoding::NON_ALPHANUMERIC)
        .to_string();
    let payload = STANDARD.encode(escaped);

    let outcome = engine.load_from_url(&lexicon, &mut legacy_link(&payload));
    assert_eq!(outcome, UrlImport::Imported(ShareFormat::Legacy));
    assert_eq!(engine.current_message_text(), "加油\n但是小心");
}

#[test]
fn unpadded_payload_with_spaces_is_accepted() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    let encoded = encode_legacy(&legacy_state()).unwrap();
    let mangled = encoded.trim_end_matches('=').replace('+', " ");

    let raw = format!("https://advice.example/?s={mangled}");
    let mut location = MemoryLocation::parse(&raw).unwrap();
    assert_eq!(
        engine.load_from_url(&lexicon, &mut location),
        UrlImport::Imported(ShareFormat::Legacy)
    );
    assert_eq!(engine.composition(), &legacy_state());
}

#[test]
fn corrupt_legacy_link_is_ignored() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    engine.edit(|c| c.line1 = Line::single(Segment::plain("加油")));
    let before = engine.saved_state();

    let not_json = STANDARD.encode("hello");
    for payload in ["%%%", not_json.as_str()] {
        let mut location = legacy_link(payload);
        assert_eq!(engine.load_from_url(&lexicon, &mut location), UrlImport::Rejected);
        assert_eq!(engine.saved_state(), before);
    }
}
