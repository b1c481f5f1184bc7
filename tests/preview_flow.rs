//! Preview flow integration tests
//!
//! Exercises the update loop end to end: panel registry uniqueness,
//! reveal-vs-create, readiness queueing, and error handling for invalid
//! targets.

use std::path::PathBuf;

use lottie_preview::commands::Cmd;
use lottie_preview::messages::{Msg, PreviewMsg, RendererMsg};
use lottie_preview::model::AppModel;
use lottie_preview::panel::{FileId, PanelRestoreState};
use lottie_preview::store::PreviewTheme;
use lottie_preview::update::update;

/// Create a real file on disk and return (tempdir guard, path, identity)
fn lottie_file(name: &str) -> (tempfile::TempDir, PathBuf, FileId) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, r#"{"v":"5.7.0","layers":[]}"#).unwrap();
    let id = FileId::from_path(&path);
    (dir, path, id)
}

fn request(path: PathBuf) -> Msg {
    Msg::preview_request(path)
}

// ========================================================================
// Panel creation and reveal
// ========================================================================

#[test]
fn first_request_creates_and_registers_panel() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let cmds = update(&mut model, request(path)).unwrap().flatten();

    assert!(model.registry.contains(&id));
    assert_eq!(model.registry.len(), 1);
    assert!(cmds.contains(&Cmd::CreatePanel { file: id.clone() }));
    assert!(cmds.contains(&Cmd::WatchSource { file: id }));
}

#[test]
fn second_request_reveals_without_creating() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path.clone()));
    let cmds = update(&mut model, request(path)).unwrap().flatten();

    // Exactly one panel, and the second call is reveal-only.
    assert_eq!(model.registry.len(), 1);
    assert_eq!(cmds, vec![Cmd::RevealPanel { file: id }]);
}

#[test]
fn distinct_files_get_distinct_panels() {
    let (_dir_a, path_a, id_a) = lottie_file("a.json");
    let (_dir_b, path_b, id_b) = lottie_file("b.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path_a));
    let _ = update(&mut model, request(path_b));

    assert_eq!(model.registry.len(), 2);
    assert!(model.registry.contains(&id_a));
    assert!(model.registry.contains(&id_b));
}

// ========================================================================
// Invalid targets
// ========================================================================

#[test]
fn missing_focus_shows_error_and_mutates_nothing() {
    let mut model = AppModel::default();

    let cmds = update(
        &mut model,
        Msg::Preview(PreviewMsg::Requested {
            focus: None,
            selected: vec![],
        }),
    )
    .unwrap()
    .flatten();

    assert!(matches!(cmds.as_slice(), [Cmd::ShowError(_)]));
    assert!(model.registry.is_empty());
    assert!(model.pending.is_empty());
}

#[test]
fn directory_target_shows_error_and_mutates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = AppModel::default();

    let cmds = update(&mut model, request(dir.path().to_path_buf()))
        .unwrap()
        .flatten();

    assert!(matches!(cmds.as_slice(), [Cmd::ShowError(_)]));
    assert!(model.registry.is_empty());
    assert!(model.pending.is_empty());
}

#[test]
fn nonexistent_target_shows_error() {
    let mut model = AppModel::default();

    let cmds = update(&mut model, request(PathBuf::from("/no/such/file.json")))
        .unwrap()
        .flatten();

    assert!(matches!(cmds.as_slice(), [Cmd::ShowError(_)]));
    assert!(model.registry.is_empty());
}

#[test]
fn co_selected_files_are_not_acted_upon() {
    let (_dir_a, path_a, id_a) = lottie_file("a.json");
    let (_dir_b, path_b, id_b) = lottie_file("b.json");
    let mut model = AppModel::default();

    let _ = update(
        &mut model,
        Msg::Preview(PreviewMsg::Requested {
            focus: Some(path_a),
            selected: vec![path_b],
        }),
    );

    assert!(model.registry.contains(&id_a));
    assert!(!model.registry.contains(&id_b));
}

// ========================================================================
// Readiness signal and deferred delivery
// ========================================================================

#[test]
fn pre_readiness_request_is_queued_not_delivered() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let cmds = update(&mut model, request(path)).unwrap().flatten();

    assert!(!cmds.contains(&Cmd::DeliverPreview { file: id.clone() }));
    assert!(model.pending.contains(&id));
}

#[test]
fn readiness_drains_queue_in_order_exactly_once() {
    let (_dir_a, path_a, id_a) = lottie_file("a.json");
    let (_dir_b, path_b, id_b) = lottie_file("b.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path_a));
    let _ = update(&mut model, request(path_b));
    assert_eq!(model.pending.len(), 2);

    let cmds = update(&mut model, Msg::renderer_ready(id_a.clone()))
        .unwrap()
        .flatten();

    assert_eq!(
        cmds,
        vec![
            Cmd::DeliverPreview { file: id_a.clone() },
            Cmd::DeliverPreview { file: id_b },
        ]
    );
    assert!(model.pending.is_empty());
    assert!(model.renderer_ready);

    // A repeated signal does not re-drain the queue; it only answers the
    // signaling panel itself.
    let cmds = update(&mut model, Msg::renderer_ready(id_a.clone()))
        .unwrap()
        .flatten();
    assert_eq!(cmds, vec![Cmd::DeliverPreview { file: id_a }]);
    assert!(model.pending.is_empty());
}

#[test]
fn rebuilt_panel_signal_gets_its_payload_back() {
    // A hibernated panel rebuilt from shell HTML boots a fresh renderer,
    // which signals ready again after the process-wide drain already ran.
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();
    model.renderer_ready = true;

    let _ = update(&mut model, request(path));
    assert!(model.registry.contains(&id));

    let cmds = update(&mut model, Msg::renderer_ready(id.clone()))
        .unwrap()
        .flatten();
    assert_eq!(cmds, vec![Cmd::DeliverPreview { file: id }]);
}

#[test]
fn late_signal_from_untracked_panel_delivers_nothing() {
    let mut model = AppModel::default();
    model.renderer_ready = true;

    let result = update(
        &mut model,
        Msg::renderer_ready(FileId::from_raw("/gone.json")),
    );
    assert!(result.is_none());
}

#[test]
fn post_readiness_request_is_delivered_immediately() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();
    model.renderer_ready = true;

    let cmds = update(&mut model, request(path)).unwrap().flatten();

    assert!(cmds.contains(&Cmd::DeliverPreview { file: id }));
    assert!(model.pending.is_empty());
}

#[test]
fn duplicate_pre_readiness_requests_deliver_once() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path.clone()));
    // Second request reveals the existing panel; it must not queue again.
    let _ = update(&mut model, request(path));
    assert_eq!(model.pending.len(), 1);

    let cmds = update(&mut model, Msg::renderer_ready(id.clone()))
        .unwrap()
        .flatten();
    assert_eq!(cmds, vec![Cmd::DeliverPreview { file: id }]);
}

#[test]
fn readiness_flag_is_monotonic() {
    let (_dir, _path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, Msg::renderer_ready(id.clone()));
    assert!(model.renderer_ready);

    let _ = update(&mut model, Msg::renderer_ready(id));
    assert!(model.renderer_ready);
}

#[test]
fn unknown_renderer_message_is_ignored() {
    let mut model = AppModel::default();

    let result = update(
        &mut model,
        Msg::Renderer(RendererMsg::Unknown {
            origin: FileId::from_raw("/a.json"),
            kind: "scroll".to_string(),
        }),
    );

    assert!(result.is_none());
    assert!(!model.renderer_ready);
}

// ========================================================================
// Panel lifecycle
// ========================================================================

#[test]
fn closed_panel_is_deregistered_and_recreatable() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path.clone()));
    assert!(model.registry.contains(&id));

    let _ = update(&mut model, Msg::panel_closed(id.clone()));
    assert!(!model.registry.contains(&id));

    // A fresh request constructs a new panel rather than revealing.
    let cmds = update(&mut model, request(path)).unwrap().flatten();
    assert!(cmds.contains(&Cmd::CreatePanel { file: id }));
}

#[test]
fn closing_live_panel_releases_host_resources() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path));
    assert!(model.registry.contains(&id));

    // The runtime must get a command to drop the webview and stop the
    // file watch, not just the registry bookkeeping.
    let cmds = update(&mut model, Msg::panel_closed(id.clone()))
        .unwrap()
        .flatten();
    assert_eq!(cmds, vec![Cmd::ClosePanel { file: id }]);
}

#[test]
fn close_for_untracked_panel_is_a_noop() {
    let mut model = AppModel::default();
    let result = update(&mut model, Msg::panel_closed(FileId::from_raw("/a.json")));
    assert!(result.is_none());
}

#[test]
fn restore_rebuilds_registry_entry() {
    let mut model = AppModel::default();
    let state = PanelRestoreState {
        uri: "/anims/loader.json".to_string(),
    };

    let cmds = update(&mut model, Msg::Preview(PreviewMsg::RestorePanel(state)))
        .unwrap()
        .flatten();

    let id = FileId::from_raw("/anims/loader.json");
    assert!(model.registry.contains(&id));
    assert!(model.registry.get(&id).unwrap().restored);
    assert_eq!(cmds, vec![Cmd::WatchSource { file: id }]);
}

#[test]
fn restore_never_duplicates_a_live_panel() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    let _ = update(&mut model, request(path));
    let state = PanelRestoreState::new(&id);

    let result = update(&mut model, Msg::Preview(PreviewMsg::RestorePanel(state)));
    assert!(result.is_none());
    assert_eq!(model.registry.len(), 1);
}

// ========================================================================
// Source change refresh
// ========================================================================

#[test]
fn source_change_redelivers_when_panel_live_and_ready() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();
    model.renderer_ready = true;

    let _ = update(&mut model, request(path));

    let cmds = update(&mut model, Msg::Preview(PreviewMsg::SourceChanged(id.clone())))
        .unwrap()
        .flatten();
    assert_eq!(cmds, vec![Cmd::DeliverPreview { file: id }]);
}

#[test]
fn source_change_is_ignored_without_panel_or_readiness() {
    let (_dir, path, id) = lottie_file("a.json");
    let mut model = AppModel::default();

    // Panel exists but renderer not ready.
    let _ = update(&mut model, request(path));
    assert!(update(
        &mut model,
        Msg::Preview(PreviewMsg::SourceChanged(id))
    )
    .is_none());

    // Ready but no panel.
    model.renderer_ready = true;
    assert!(update(
        &mut model,
        Msg::Preview(PreviewMsg::SourceChanged(FileId::from_raw("/other.json")))
    )
    .is_none());
}

// ========================================================================
// Theme preference messages
// ========================================================================

#[test]
fn set_theme_upserts_and_persists() {
    let mut model = AppModel::default();
    let id = FileId::from_raw("/a.json");

    let cmd = update(
        &mut model,
        Msg::Preview(PreviewMsg::SetTheme {
            file: id.clone(),
            theme: PreviewTheme::Dark,
        }),
    );

    assert_eq!(cmd, Some(Cmd::PersistThemes));
    assert_eq!(model.themes.get(id.as_str()), Some(PreviewTheme::Dark));
}

#[test]
fn clear_theme_of_absent_file_skips_persistence() {
    let mut model = AppModel::default();

    let cmd = update(
        &mut model,
        Msg::Preview(PreviewMsg::ClearTheme {
            file: FileId::from_raw("/a.json"),
        }),
    );

    assert!(cmd.is_none());
    assert!(model.themes.is_empty());
}
