use message_composer::{
    ComposerConfig, FileStore, InMemoryStore, KeyValueStore, Line, Line2, ManualClock,
    MessageEngine, Mode, SavedState, Segment, StatePersistence,
};

use crate::support::engine_at;

fn boot<S>(persistence: &StatePersistence<S>, start: i64) -> (MessageEngine, ManualClock)
where
    S: KeyValueStore + Clone + 'static,
{
    let (mut engine, clock) = engine_at(start);
    engine.restore(persistence.load());
    engine.persist_to(persistence.clone());
    (engine, clock)
}

#[test]
fn state_survives_restart_in_memory() {
    let persistence = StatePersistence::new(InMemoryStore::new(), "composer");

    let (mut engine, clock) = boot(&persistence, 1_000);
    engine.edit(|c| {
        c.mode = Mode::Double;
        c.line1 = Line::single(Segment::plain("加油"));
        c.line2 = Line2::new("但是", Line::single(Segment::plain("小心")));
    });
    engine.generate();
    clock.advance(5);
    engine.edit(|c| c.mode = Mode::Single);
    let before = engine.saved_state();
    drop(engine);

    let (engine, _) = boot(&persistence, 2_000);
    assert_eq!(engine.saved_state(), before);
    assert_eq!(engine.mode(), Mode::Single);
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history().items()[0].text(), "加油\n但是小心");
}

#[test]
fn state_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = ComposerConfig::default();
    let persistence = StatePersistence::from_config(FileStore::new(dir.path()), &config);

    let (mut engine, clock) = boot(&persistence, 0);
    for text in ["第一", "第二"] {
        engine.edit(|c| c.line1 = Line::single(Segment::plain(text)));
        engine.generate();
        clock.advance(1);
    }
    let id = engine.history().items()[1].id().to_string();
    assert!(engine.delete_history_item(&id));

    let path = dir.path().join(format!("{}.json", config.storage_key));
    assert!(path.exists());

    let (engine, _) = boot(&persistence, 0);
    let texts: Vec<_> = engine.history().iter().map(|item| item.text()).collect();
    assert_eq!(texts, ["第二"]);
    assert_eq!(engine.current_message_text(), "第二");
}

#[test]
fn malformed_blob_boots_with_defaults() {
    let store = InMemoryStore::new();
    store
        .set("composer", "{\"mode\": \"triple\"".to_string())
        .unwrap();
    let persistence = StatePersistence::new(store, "composer");

    let (engine, _) = boot(&persistence, 0);
    assert_eq!(engine.saved_state(), SavedState::default());
    assert_eq!(engine.current_message_text(), "...");
}

#[test]
fn partial_blob_fills_missing_fields() {
    let store = InMemoryStore::new();
    store
        .set(
            "composer",
            r#"{"line1":{"segment1":{"template":"加油"}}}"#.to_string(),
        )
        .unwrap();
    let persistence = StatePersistence::new(store, "composer");

    let (engine, _) = boot(&persistence, 0);
    assert_eq!(engine.mode(), Mode::Single);
    assert_eq!(engine.current_message_text(), "加油");
    assert!(engine.history().is_empty());
}

#[test]
fn restoring_does_not_rewrite_the_blob() {
    let store = InMemoryStore::new();
    let raw = r#"{"mode":"single"}"#.to_string();
    store.set("composer", raw.clone()).unwrap();
    let persistence = StatePersistence::new(store.clone(), "composer");

    let (_engine, _) = boot(&persistence, 0);
    assert_eq!(store.get("composer").unwrap(), Some(raw));
}

#[test]
fn unknown_category_in_blob_keeps_history() {
    let store = InMemoryStore::new();
    let blob = r#"{
        "mode": "single",
        "line1": {"segment1": {"template": "你好*****", "wordCategory": "weapons", "word": "剑"}},
        "history": [{
            "id": "7",
            "mode": "single",
            "line1": {"segment1": {"template": "你好*****", "wordCategory": "weapons", "word": "剑"}},
            "line2": {},
            "text": "你好剑",
            "timestamp": 7
        }]
    }"#;
    store.set("composer", blob.to_string()).unwrap();
    let persistence = StatePersistence::new(store, "composer");

    let (engine, _) = boot(&persistence, 0);
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history().items()[0].text(), "你好剑");
    assert_eq!(engine.line1().segment1.word_category, None);
    assert_eq!(engine.current_message_text(), "你好剑");
}
