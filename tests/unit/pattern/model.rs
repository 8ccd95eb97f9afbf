use super::*;

#[test]
fn structured_document_keeps_event_order_and_durations() {
    let doc = PatternDocument::from_json_str(
        r#"{"name": "_test_", "pattern": [
            {"key": "w", "duration": 50},
            {"key": "w+a", "duration": 200, "delay": 12}
        ]}"#,
    )
    .unwrap();

    assert_eq!(doc.form(), SourceForm::Structured);
    let patterns = doc.into_patterns();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].name, "_test_");
    assert_eq!(patterns[0].display_name(), "test");
    assert_eq!(
        patterns[0].events,
        vec![
            PatternEvent::new("w", Some(HoldDuration::Integer(50))),
            PatternEvent::new("w+a", Some(HoldDuration::Integer(200))),
        ]
    );
}

#[test]
fn structured_document_without_name_uses_default() {
    let doc = PatternDocument::from_json_str(r#"{"pattern": []}"#).unwrap();
    let patterns = doc.into_patterns();
    assert_eq!(patterns[0].name, DEFAULT_PATTERN_NAME);
    assert!(patterns[0].events.is_empty());
}

#[test]
fn structured_events_are_lenient() {
    let doc = PatternDocument::from_json_str(
        r#"{"name": "n", "pattern": [
            {"duration": 10},
            {"key": 5},
            "w",
            {"key": "d", "duration": null},
            {"key": "s", "duration": "120"},
            {"key": "a", "duration": 33.9}
        ]}"#,
    )
    .unwrap();

    let events = doc.into_patterns().remove(0).events;
    assert_eq!(
        events,
        vec![
            PatternEvent::new("", Some(HoldDuration::Integer(10))),
            PatternEvent::new("d", None),
            PatternEvent::new("s", Some(HoldDuration::Text("120".to_string()))),
            PatternEvent::new("a", Some(HoldDuration::Fractional(33.9))),
        ]
    );
}

#[test]
fn legacy_document_preserves_file_order() {
    let doc = PatternDocument::from_json_str(
        r#"{"_zig_": ["w", "d", "w"], "alpha": ["s"], "mid": []}"#,
    )
    .unwrap();

    assert_eq!(doc.form(), SourceForm::Legacy);
    let patterns = doc.into_patterns();
    let names: Vec<_> = patterns.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["_zig_", "alpha", "mid"]);
    assert_eq!(
        patterns[0].events,
        vec![
            PatternEvent::key_only("w"),
            PatternEvent::key_only("d"),
            PatternEvent::key_only("w"),
        ]
    );
    assert!(patterns.iter().all(|p| p.events.iter().all(|e| e.duration.is_none())));
}

#[test]
fn legacy_pattern_named_pattern_stays_legacy() {
    let doc =
        PatternDocument::from_json_str(r#"{"pattern": ["w", "d"], "zig": ["s", "a"]}"#).unwrap();

    assert_eq!(doc.form(), SourceForm::Legacy);
    let patterns = doc.into_patterns();
    let names: Vec<_> = patterns.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["pattern", "zig"]);
    assert_eq!(
        patterns[0].events,
        vec![PatternEvent::key_only("w"), PatternEvent::key_only("d")]
    );
}

#[test]
fn named_pattern_array_is_structured_even_without_records() {
    let doc = PatternDocument::from_json_str(r#"{"name": "n", "pattern": ["w"]}"#).unwrap();
    assert_eq!(doc.form(), SourceForm::Structured);
    assert!(doc.into_patterns()[0].events.is_empty());
}

#[test]
fn legacy_document_drops_malformed_entries_and_codes() {
    let doc =
        PatternDocument::from_json_str(r#"{"bad": "wasd", "ok": ["w", 3, null, "a"]}"#).unwrap();
    let patterns = doc.into_patterns();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].name, "ok");
    assert_eq!(
        patterns[0].events,
        vec![PatternEvent::key_only("w"), PatternEvent::key_only("a")]
    );
}

#[test]
fn non_object_sources_are_parse_errors() {
    for src in ["[1, 2]", "\"w\"", "{not json"] {
        let err = PatternDocument::from_json_str(src).unwrap_err();
        assert!(matches!(err, PathVizError::Parse(_)), "{src}: {err}");
    }
}

#[test]
fn display_name_falls_back_when_only_underscores() {
    let p = Pattern {
        name: "___".to_string(),
        events: vec![],
    };
    assert_eq!(p.display_name(), DEFAULT_PATTERN_NAME);
}
