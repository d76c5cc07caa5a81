//! Editor session lifecycle

mod common;

use std::sync::Arc;

use common::{catalog, child_ids, document};
use route_tree::{
    ChangeKind, EditorConfig, EditorSession, NestSlotRule, RouteTreeError, SequentialIds,
    VecEventSink,
};

fn session_with(config: EditorConfig) -> (EditorSession, Arc<VecEventSink>) {
    let sink = Arc::new(VecEventSink::new());
    let session = EditorSession::new(
        document(),
        Arc::new(catalog()),
        Arc::new(SequentialIds::new("s")),
        sink.clone(),
        config,
    )
    .unwrap();
    (session, sink)
}

#[test]
fn test_drag_delete_then_stale_confirm() {
    let (mut session, _sink) = session_with(EditorConfig::default());

    let pending = session.begin_drag("log-a", "when-b").unwrap();
    assert!(pending.is_some());

    // The dragged node disappears before the user answers
    session.delete("log-a").unwrap();
    assert!(matches!(
        session.confirm_drag(true),
        Err(RouteTreeError::NotFound(_))
    ));
    assert!(session.pending_move().is_some());
    assert!(session.cancel_drag().is_some());
}

#[test]
fn test_paste_as_new_flow_and_undo_everything() {
    let (mut session, sink) = session_with(EditorConfig::default());
    let original = session.document().clone();

    session.click("from-b");
    session.copy_selection();
    let pasted = session.paste().unwrap();
    assert_eq!(pasted.len(), 1);
    assert_eq!(session.document().flows().len(), 3);

    session.click("to-a");
    session.delete_selected().unwrap();
    assert!(session.selection().is_empty());

    while session.undo().unwrap() {}
    assert_eq!(session.document(), &original);

    let kinds: Vec<ChangeKind> = sink.events().iter().map(|e| e.change).collect();
    assert_eq!(
        kinds,
        vec![
            ChangeKind::Added,
            ChangeKind::Removed,
            ChangeKind::Added,
            ChangeKind::Removed
        ]
    );
}

#[test]
fn test_undo_depth_bounds_history() {
    let config = EditorConfig {
        undo_depth: 2,
        ..EditorConfig::default()
    };
    let (mut session, _sink) = session_with(config);

    session.add_step("from-a", "steps", "log", serde_json::Value::Null).unwrap();
    session.add_step("from-a", "steps", "log", serde_json::Value::Null).unwrap();
    session.add_step("from-a", "steps", "log", serde_json::Value::Null).unwrap();

    assert!(session.undo().unwrap());
    assert!(!session.undo().unwrap());
    assert_eq!(child_ids(session.document(), "from-a", "steps").len(), 5);
}

#[test]
fn test_configured_nest_slot() {
    let config = EditorConfig::from_json_str(
        r#"{"nest_slot": {"type": "named", "slot": "steps"}}"#,
    )
    .unwrap();
    assert_eq!(config.nest_slot, NestSlotRule::Named("steps".to_string()));
    let (mut session, _sink) = session_with(config);

    session.add_flow("from").unwrap();
    assert_eq!(session.document().flows().len(), 3);
    assert!(session.validate().is_empty());

    session.begin_drag("to-c", "when-b").unwrap();
    session.confirm_drag(true).unwrap();
    assert_eq!(child_ids(session.document(), "when-b", "steps"), vec!["log-b", "to-c"]);
}

#[test]
fn test_config_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    std::fs::write(&path, r#"{"flow_kind": "route", "undo_depth": 3}"#).unwrap();

    let config = EditorConfig::load(&path).unwrap();
    let (session, _sink) = session_with(config);
    assert_eq!(session.config().undo_depth, 3);
}
