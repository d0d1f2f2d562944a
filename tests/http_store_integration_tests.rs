use std::sync::Arc;
use std::time::Duration;

use navmenu::core::action::{Action, Effect, update};
use navmenu::core::drag::DropTarget;
use navmenu::core::drop::ReorderEvent;
use navmenu::core::scope::ScopeKey;
use navmenu::core::state::{App, Mode};
use navmenu::core::tree::{NavNode, Tree};
use navmenu::persistence::{HttpStore, NavigationStore, StoreError};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// The menu the mock service hands out
fn served_menu() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "jobs",
            "title": "Jobs",
            "children": [
                {"id": "jobs-open", "title": "Open"},
                {"id": "jobs-closed", "title": "Closed", "visible": false}
            ]
        },
        {"id": "people", "title": "People", "visible": true},
        {"id": "settings", "title": "Settings"}
    ])
}

fn store_for(server: &MockServer) -> HttpStore {
    HttpStore::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

async fn mount_menu(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/nav"))
        .respond_with(ResponseTemplate::new(200).set_body_json(served_menu()))
        .mount(server)
        .await;
}

// ============================================================================
// Store Tests
// ============================================================================

#[tokio::test]
async fn test_load_tree_parses_menu_with_defaults() {
    let server = MockServer::start().await;
    mount_menu(&server).await;

    let tree = store_for(&server).load_tree().await.unwrap();

    assert_eq!(tree.roots.len(), 3);
    assert_eq!(tree.len(), 5);
    let jobs = &tree.roots[0];
    assert!(jobs.visible); // absent → visible
    assert_eq!(jobs.children[0].title, "Open");
    assert!(!jobs.children[1].visible);
    assert!(tree.roots[2].children.is_empty());
}

#[tokio::test]
async fn test_load_tree_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nav"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = store_for(&server).load_tree().await.unwrap_err();
    match err {
        StoreError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_load_tree_bad_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nav"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
        .mount(&server)
        .await;

    let err = store_for(&server).load_tree().await.unwrap_err();
    assert!(matches!(err, StoreError::Parse(_)));
}

#[tokio::test]
async fn test_load_tree_rejects_duplicate_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nav"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "x", "title": "One"},
            {"id": "y", "title": "Two", "children": [{"id": "x", "title": "Three"}]}
        ])))
        .mount(&server)
        .await;

    let err = store_for(&server).load_tree().await.unwrap_err();
    assert!(matches!(err, StoreError::Invalid(_)));
}

#[tokio::test]
async fn test_save_tree_posts_json_array() {
    let server = MockServer::start().await;
    let tree = Tree::new(vec![NavNode::leaf("b", "B"), NavNode::leaf("a", "A")]);

    Mock::given(method("POST"))
        .and(path("/nav"))
        .and(body_json(serde_json::json!([
            {"id": "b", "title": "B", "visible": true},
            {"id": "a", "title": "A", "visible": true}
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).save_tree(&tree).await.unwrap();
}

#[tokio::test]
async fn test_save_tree_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nav"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .save_tree(&Tree::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_record_reorder_posts_camel_case_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/track"))
        .and(body_json(serde_json::json!({
            "id": "jobs-closed", "from": 1, "to": 0, "level": 1, "parentId": "jobs"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let event = ReorderEvent {
        id: "jobs-closed".into(),
        from: 1,
        to: 0,
        level: 1,
        parent_id: Some("jobs".into()),
    };
    store_for(&server).record_reorder(&event).await.unwrap();
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on the discard port
    let store = HttpStore::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = store.load_tree().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)));
}

// ============================================================================
// Edit Session Against The Service
// ============================================================================

#[tokio::test]
async fn test_edit_session_commits_reordered_menu() {
    let server = MockServer::start().await;
    mount_menu(&server).await;
    Mock::given(method("POST"))
        .and(path("/nav"))
        .and(body_json(serde_json::json!([
            {
                "id": "jobs",
                "title": "Jobs",
                "visible": true,
                "children": [
                    {"id": "jobs-closed", "title": "Closed", "visible": false},
                    {"id": "jobs-open", "title": "Open", "visible": true}
                ]
            },
            {"id": "people", "title": "Team", "visible": true},
            {"id": "settings", "title": "Settings", "visible": true}
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store: Arc<dyn NavigationStore> = Arc::new(store_for(&server));
    let mut app = App::new(store.clone());

    assert_eq!(update(&mut app, Action::Reload), Effect::LoadTree);
    let loaded = store.load_tree().await;
    update(&mut app, Action::TreeLoaded(loaded));
    update(&mut app, Action::EnterEditMode);

    update(
        &mut app,
        Action::Rename {
            id: "people".into(),
            title: "Team".into(),
        },
    );
    update(&mut app, Action::BeginDrag("jobs-closed".into()));
    let scope = ScopeKey::new(1, Some("jobs".into()));
    update(
        &mut app,
        Action::HoverDrag {
            target: DropTarget {
                index: 0,
                scope: scope.clone(),
            },
            fraction: 0.4,
        },
    );
    let effect = update(
        &mut app,
        Action::Drop(Some(DropTarget { index: 0, scope })),
    );
    assert!(matches!(effect, Effect::RecordReorder(_)));

    let Effect::SaveTree(tree) = update(&mut app, Action::Save) else {
        panic!("save should request a commit");
    };
    let result = store.save_tree(&tree).await;
    update(&mut app, Action::SaveFinished(result));

    assert_eq!(app.mode, Mode::Viewing);
    assert!(!app.has_unsaved_changes());
}

#[tokio::test]
async fn test_failed_commit_keeps_session_open() {
    let server = MockServer::start().await;
    mount_menu(&server).await;
    Mock::given(method("POST"))
        .and(path("/nav"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let store: Arc<dyn NavigationStore> = Arc::new(store_for(&server));
    let mut app = App::new(store.clone());
    update(&mut app, Action::TreeLoaded(store.load_tree().await));
    update(&mut app, Action::EnterEditMode);
    update(&mut app, Action::ToggleVisibility("settings".into()));

    let Effect::SaveTree(tree) = update(&mut app, Action::Save) else {
        panic!("save should request a commit");
    };
    update(&mut app, Action::SaveFinished(store.save_tree(&tree).await));

    assert_eq!(app.mode, Mode::Editing);
    assert!(app.error.is_some());
    assert!(app.has_unsaved_changes());
}
