use democracy_score::error::DemocracyError;
use democracy_score::history::{DirectorySource, HistorySource, Leaning};
use democracy_score::scorer::loader::{load_history_csv, load_history_from_file, load_history_json};
use std::fs;
use std::io::Cursor;

const HEADER: &str = "article_id,source_id,category,leaning,topics,read_at,dwell_seconds,completed";

// --- CSV ---

#[test]
fn test_csv_parses_full_rows() {
    let data = format!(
        "{}\n\
         a1,guardian,elections,center_left,ballot;Voting Rights,2024-05-30T10:00:00Z,95.5,yes\n\
         a2,reuters,,Center,courts,2024-05-29T08:30:00+02:00,,\n",
        HEADER
    );
    let loaded = load_history_csv(Cursor::new(data)).unwrap();
    assert_eq!(loaded.skipped_rows, 0);
    assert_eq!(loaded.events.len(), 2);

    let a1 = &loaded.events[0];
    assert_eq!(a1.article_id, "a1");
    assert_eq!(a1.source_id, "guardian");
    assert_eq!(a1.category, "elections");
    assert_eq!(a1.leaning, Leaning::CenterLeft);
    assert_eq!(a1.topics, vec!["ballot", "Voting Rights"]);
    let eng = a1.engagement.as_ref().unwrap();
    assert_eq!(eng.dwell_seconds, Some(95.5));
    assert_eq!(eng.completed, Some(true));

    let a2 = &loaded.events[1];
    assert_eq!(a2.category, "");
    assert_eq!(a2.leaning, Leaning::Center);
    assert!(a2.engagement.is_none());
    // Offsets are normalized to UTC
    assert_eq!(a2.read_at.to_rfc3339(), "2024-05-29T06:30:00+00:00");
}

#[test]
fn test_csv_column_order_is_free() {
    let data = "read_at,source_id,article_id\n2024-05-30T10:00:00Z,ap,x\n";
    let loaded = load_history_csv(Cursor::new(data)).unwrap();
    assert_eq!(loaded.events.len(), 1);
    assert_eq!(loaded.events[0].article_id, "x");
    assert_eq!(loaded.events[0].source_id, "ap");
    assert_eq!(loaded.events[0].leaning, Leaning::Unknown);
}

#[test]
fn test_csv_skips_bad_rows() {
    let data = format!(
        "{}\n\
         ok,src,law,,,2024-05-30T10:00:00Z,,\n\
         ,src,law,,,2024-05-30T10:00:00Z,,\n\
         no-date,src,law,,,yesterday,,\n\
         bad-dwell,src,law,,,2024-05-30T10:00:00Z,lots,\n\
         bad-flag,src,law,,,2024-05-30T10:00:00Z,,maybe\n\
         odd-leaning,src,law,far_out,,2024-05-30T10:00:00Z,,\n",
        HEADER
    );
    let loaded = load_history_csv(Cursor::new(data)).unwrap();

    let ids: Vec<&str> = loaded.events.iter().map(|e| e.article_id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "odd-leaning"]);
    assert_eq!(loaded.skipped_rows, 4);
    // Unrecognized leanings are tolerated, not rejected
    assert_eq!(loaded.events[1].leaning, Leaning::Unknown);
}

#[test]
fn test_csv_leaning_spellings() {
    let data = format!(
        "{}\n\
         a,s,law,center-left,,2024-05-30T10:00:00Z,,\n\
         b,s,law,Center Right,,2024-05-30T10:00:00Z,,\n\
         c,s,law,RIGHT,,2024-05-30T10:00:00Z,,\n",
        HEADER
    );
    let loaded = load_history_csv(Cursor::new(data)).unwrap();
    let leanings: Vec<Leaning> = loaded.events.iter().map(|e| e.leaning).collect();
    assert_eq!(
        leanings,
        vec![Leaning::CenterLeft, Leaning::CenterRight, Leaning::Right]
    );
}

#[test]
fn test_csv_missing_required_column() {
    let data = "article_id,category,read_at\na,law,2024-05-30T10:00:00Z\n";
    let err = load_history_csv(Cursor::new(data)).err().unwrap();
    assert!(matches!(err, DemocracyError::Config(_)));
    assert!(err.to_string().contains("'source_id'"), "{}", err);
}

#[test]
fn test_csv_header_only() {
    let loaded = load_history_csv(Cursor::new(format!("{}\n", HEADER))).unwrap();
    assert!(loaded.events.is_empty());
    assert_eq!(loaded.skipped_rows, 0);
}

// --- JSON ---

#[test]
fn test_json_camel_case_events() {
    let data = r#"[
        {
            "articleId": "a1",
            "sourceId": "bbc",
            "category": "press",
            "leaning": "center",
            "topics": ["censorship"],
            "readAt": "2024-05-30T10:00:00Z",
            "engagement": { "dwellSeconds": 40.0, "completed": false }
        },
        { "articleId": "a2", "sourceId": "npr", "readAt": "2024-05-31T10:00:00Z" }
    ]"#;
    let events = load_history_json(Cursor::new(data)).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].leaning, Leaning::Center);
    assert_eq!(events[0].topics, vec!["censorship"]);
    assert_eq!(
        events[0].engagement.as_ref().and_then(|e| e.completed),
        Some(false)
    );
    assert_eq!(events[1].category, "");
    assert_eq!(events[1].leaning, Leaning::Unknown);
    assert!(events[1].topics.is_empty());
}

#[test]
fn test_json_tolerates_odd_leanings() {
    let data = r#"[
        { "articleId": "a", "sourceId": "s", "readAt": "2024-05-30T10:00:00Z", "leaning": "far_left" },
        { "articleId": "b", "sourceId": "s", "readAt": "2024-05-30T10:00:00Z", "leaning": "Center-Left" },
        { "articleId": "c", "sourceId": "s", "readAt": "2024-05-30T10:00:00Z", "leaning": null },
        { "articleId": "d", "sourceId": "s", "readAt": "2024-05-30T10:00:00Z", "leaning": "right" }
    ]"#;
    let events = load_history_json(Cursor::new(data)).unwrap();
    let leanings: Vec<Leaning> = events.iter().map(|e| e.leaning).collect();
    assert_eq!(
        leanings,
        vec![
            Leaning::Unknown,
            Leaning::CenterLeft,
            Leaning::Unknown,
            Leaning::Right
        ]
    );
    // Written back in the canonical spelling
    let json = serde_json::to_value(&events[1]).unwrap();
    assert_eq!(json["leaning"], "center_left");
}

#[test]
fn test_json_rejects_malformed() {
    let res = load_history_json(Cursor::new(r#"[{ "articleId": "a1" }]"#));
    assert!(matches!(res, Err(DemocracyError::Json(_))));
}

// --- FILE DISPATCH ---

#[test]
fn test_file_dispatch_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("h.CSV");
    fs::write(
        &csv_path,
        format!("{}\na,s,law,,,2024-05-30T10:00:00Z,,\n", HEADER),
    )
    .unwrap();
    assert_eq!(load_history_from_file(&csv_path).unwrap().len(), 1);

    let json_path = dir.path().join("h.json");
    fs::write(
        &json_path,
        r#"[{"articleId":"a","sourceId":"s","readAt":"2024-05-30T10:00:00Z"}]"#,
    )
    .unwrap();
    assert_eq!(load_history_from_file(&json_path).unwrap().len(), 1);

    let txt_path = dir.path().join("h.txt");
    fs::write(&txt_path, "whatever").unwrap();
    let err = load_history_from_file(&txt_path).unwrap_err();
    assert!(err.to_string().contains("Unsupported history format"), "{}", err);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let res = load_history_from_file(dir.path().join("nope.json"));
    assert!(matches!(res, Err(DemocracyError::Io(_))));
}

// --- DIRECTORY SOURCE ---

fn json_event(id: &str, read_at: &str) -> String {
    format!(
        r#"{{"articleId":"{}","sourceId":"s","category":"law","readAt":"{}"}}"#,
        id, read_at
    )
}

#[test]
fn test_directory_source_lists_users() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bob.json"), "[]").unwrap();
    fs::write(dir.path().join("alice.csv"), HEADER).unwrap();
    fs::write(dir.path().join("alice.json"), "[]").unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    fs::create_dir(dir.path().join("carol.json")).unwrap();

    let source = DirectorySource::new(dir.path());
    assert_eq!(source.users().unwrap(), vec!["alice", "bob"]);
}

#[test]
fn test_directory_source_pages_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let events = [
        json_event("old", "2024-05-01T00:00:00Z"),
        json_event("new", "2024-05-30T00:00:00Z"),
        json_event("mid", "2024-05-15T00:00:00Z"),
    ];
    fs::write(
        dir.path().join("alice.json"),
        format!("[{}]", events.join(",")),
    )
    .unwrap();

    let source = DirectorySource::new(dir.path());
    let page = source.fetch_history("alice", 2, 0).unwrap();
    let ids: Vec<&str> = page.iter().map(|e| e.article_id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid"]);

    let page = source.fetch_history("alice", 2, 2).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].article_id, "old");
}

#[test]
fn test_directory_source_keeps_history_with_odd_leaning() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("dana.json"),
        r#"[{"articleId":"a","sourceId":"s","category":"law","leaning":"far_left","readAt":"2024-05-30T10:00:00Z"}]"#,
    )
    .unwrap();

    let source = DirectorySource::new(dir.path());
    let events = source.fetch_history("dana", 50, 0).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].leaning, Leaning::Unknown);
}

#[test]
fn test_directory_source_unknown_user_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path());
    assert!(source.fetch_history("ghost", 50, 0).unwrap().is_empty());
}

#[test]
fn test_directory_source_failures() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
    let source = DirectorySource::new(dir.path());

    for user in ["broken", "../etc", "", ".hidden", "a\\b"] {
        let res = source.fetch_history(user, 50, 0);
        assert!(
            matches!(res, Err(DemocracyError::SourceUnavailable(_))),
            "user '{}' gave {:?}",
            user,
            res.map(|v| v.len())
        );
    }

    let gone = DirectorySource::new(dir.path().join("missing"));
    assert!(matches!(
        gone.users(),
        Err(DemocracyError::SourceUnavailable(_))
    ));
}
