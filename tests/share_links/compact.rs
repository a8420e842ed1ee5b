use message_composer::{
    Category, Line, Line2, Location, MemoryLocation, Mode, Segment, ShareFormat, UrlImport, Url,
};

use crate::support::{engine_at, lexicon};

fn base() -> Url {
    Url::parse("https://advice.example/compose?lang=zh-CN").unwrap()
}

fn double_message(engine: &mut message_composer::MessageEngine) {
    engine.edit(|c| {
        c.mode = Mode::Double;
        c.line1 = Line::joined(
            Segment::filled("小心*****", Category::Enemies, "巨人"),
            "所以",
            Segment::plain("加油"),
        );
        c.line2 = Line2::new(
            "但是",
            Line::single(Segment::filled("你好*****", Category::Tactics, "翻滚")),
        );
    });
}

#[test]
fn link_opens_the_same_message_elsewhere() {
    let lexicon = lexicon::sample();
    let (mut sender, _) = engine_at(10);
    double_message(&mut sender);
    let link = sender.share_url(&lexicon, &base(), None);

    let (mut receiver, _) = engine_at(20);
    let mut location = MemoryLocation::new(link);
    let outcome = receiver.load_from_url(&lexicon, &mut location);

    assert_eq!(outcome, UrlImport::Imported(ShareFormat::Compact));
    assert_eq!(receiver.current_message_text(), sender.current_message_text());
    assert_eq!(receiver.current_message_text(), "小心巨人，所以加油\n但是你好翻滚");
    assert_eq!(receiver.history().len(), 1);
    assert_eq!(receiver.history().items()[0].timestamp(), 20);
    assert_eq!(
        location.href().as_str(),
        "https://advice.example/compose",
        "share parameters are removed after import"
    );
}

#[test]
fn link_keeps_unrelated_parameters() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    double_message(&mut engine);
    let link = engine.share_url(&lexicon, &base(), None);

    let pairs: Vec<(String, String)> = link.query_pairs().into_owned().collect();
    assert_eq!(pairs[0], ("lang".to_string(), "zh-CN".to_string()));
    assert!(pairs.iter().any(|(k, v)| k == "m" && v == "2"));
    assert!(pairs.iter().any(|(k, v)| k == "l2" && v == "sj:0|t:0|c:tactics|w:0"));
}

#[test]
fn single_mode_link_omits_line_two() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    double_message(&mut engine);
    engine.edit(|c| c.mode = Mode::Single);

    let link = engine.share_url(&lexicon, &base(), None);
    let keys: Vec<String> = link.query_pairs().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(keys, ["lang", "l1", "l1x"]);
}

#[test]
fn links_resolve_against_current_lexicon_order() {
    let (mut engine, _) = engine_at(0);
    engine.edit(|c| c.line1 = Line::single(Segment::plain("加油")));
    let link = engine.share_url(&lexicon::sample(), &base(), None);

    let (mut receiver, _) = engine_at(0);
    let mut location = MemoryLocation::new(link);
    receiver.load_from_url(&lexicon::reordered(), &mut location);

    assert_eq!(receiver.current_message_text(), "你好...");
}

#[test]
fn out_of_range_indices_decode_to_empty() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    let mut location =
        MemoryLocation::parse("https://advice.example/?l1=t:99&l1x=j:1|t:1").unwrap();

    let outcome = engine.load_from_url(&lexicon, &mut location);
    assert_eq!(outcome, UrlImport::Imported(ShareFormat::Compact));
    assert_eq!(engine.line1().segment1.template, "");
    assert_eq!(engine.current_message_text(), "...，加油");
}

#[test]
fn shared_history_entry() {
    let lexicon = lexicon::sample();
    let (mut engine, clock) = engine_at(0);
    engine.edit(|c| c.line1 = Line::single(Segment::plain("加油")));
    let first = engine.generate();
    clock.advance(1);
    double_message(&mut engine);
    engine.generate();

    let link = engine.share_url(&lexicon, &base(), Some(&first));
    let (mut receiver, _) = engine_at(0);
    receiver.load_from_url(&lexicon, &mut MemoryLocation::new(link));
    assert_eq!(receiver.current_message_text(), "加油");
}

#[test]
fn empty_line_parameter_keeps_current_segment() {
    let lexicon = lexicon::sample();
    let (mut engine, _) = engine_at(0);
    engine.edit(|c| c.line1 = Line::single(Segment::plain("小心")));
    let mut location = MemoryLocation::parse("https://advice.example/?l1=&l2=t:1&m=2").unwrap();

    let outcome = engine.load_from_url(&lexicon, &mut location);
    assert_eq!(outcome, UrlImport::Imported(ShareFormat::Compact));
    assert_eq!(engine.current_message_text(), "小心\n加油");
}
