use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use stageboard_core::item::WorkItem;
use stageboard_core::store::MemoryStore;
use stageboard_core::types::Niche;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bootstrap a project whose default niche is `coach`.
fn init_project(dir: &TempDir) {
    let config = stageboard_core::config::Config::new(stageboard_core::types::Niche::Coach);
    config.save(dir.path()).unwrap();
}

/// Send a request via `oneshot` and return (status, parsed JSON body).
async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Create an item through the CRUD route and return its id.
async fn create(dir: &TempDir, body: serde_json::Value) -> String {
    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = post_json(app, "/items", body).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn niches_lists_all_four() {
    let dir = TempDir::new().unwrap();
    let app = stageboard_server::build_router(dir.path().to_path_buf());

    let (status, json) = get(app, "/api/niches").await;
    assert_eq!(status, StatusCode::OK);
    let niches = json.as_array().unwrap();
    assert_eq!(niches.len(), 4);
    assert_eq!(niches[1]["niche"], "coach");
    assert_eq!(niches[1]["stageCount"], 9);
    assert_eq!(niches[2]["earliest"], "pitch");
}

#[tokio::test]
async fn stages_for_unknown_niche_fall_back_to_creator() {
    let dir = TempDir::new().unwrap();
    let app = stageboard_server::build_router(dir.path().to_path_buf());

    let (status, json) = get(app, "/api/stages/chef").await;
    assert_eq!(status, StatusCode::OK);
    let stages = json.as_array().unwrap();
    assert_eq!(stages.len(), 6);
    assert_eq!(stages[0]["id"], "idea");
    assert_eq!(stages[0]["displayName"], "Idea");
    assert!(stages[0].get("display_name").is_none());
}

// ---------------------------------------------------------------------------
// CRUD contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_maps_status_and_lists_by_niche() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = post_json(
        app,
        "/items",
        json!({ "niche": "coach", "title": "Acme", "status": "won", "value": 1200 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["stage"], "paid");
    assert_eq!(json["value"], 1200.0);
    assert!(json.get("created_at").is_some());

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = get(app, "/items?niche=coach").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (_, json) = get(app, "/items?niche=creator").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_creates_are_all_kept() {
    let dir = TempDir::new().unwrap();
    let app = stageboard_server::build_router(dir.path().to_path_buf());

    let tasks: Vec<_> = (0..16)
        .map(|n| {
            let app = app.clone();
            tokio::spawn(async move {
                post_json(app, "/items", json!({ "niche": "coach", "title": format!("Client {n}") }))
                    .await
                    .0
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    let (_, json) = get(app, "/items?niche=coach").await;
    assert_eq!(json.as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn list_requires_a_supported_niche() {
    let dir = TempDir::new().unwrap();

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = get(app, "/items").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("niche"));

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) = get(app, "/items?niche=chef").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_rejects_stage_outside_vocabulary() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, json!({ "niche": "creator", "title": "Video" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) = send(app, "PUT", &format!("/items/{id}"), Some(json!({ "stage": "paid" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = send(
        app,
        "PUT",
        &format!("/items/{id}"),
        Some(json!({ "stage": "editing", "platform": "youtube" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stage"], "editing");
    assert_eq!(json["platform"], "youtube");
}

#[tokio::test]
async fn update_rejects_niche_change() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, json!({ "niche": "creator", "title": "Video" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) = send(app, "PUT", &format!("/items/{id}"), Some(json!({ "niche": "coach" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_then_delete_again_is_404() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, json!({ "niche": "freelancer", "title": "Site" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = send(app, "DELETE", &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted"], true);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) = send(app, "DELETE", &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[tokio::test]
async fn board_defaults_to_creator_without_config() {
    let dir = TempDir::new().unwrap();
    let app = stageboard_server::build_router(dir.path().to_path_buf());

    let (status, json) = get(app, "/api/board").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["niche"], "creator");
    assert_eq!(json["columns"].as_array().unwrap().len(), 6);
    assert_eq!(json["totalItems"], 0);
}

#[tokio::test]
async fn board_uses_configured_niche_and_buckets_items() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create(&dir, json!({ "niche": "coach", "title": "A", "stage": "paid", "value": 500 })).await;
    create(&dir, json!({ "niche": "coach", "title": "B", "stage": "paid", "value": 250 })).await;
    create(&dir, json!({ "niche": "coach", "title": "C" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = get(app, "/api/board").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["niche"], "coach");
    assert_eq!(json["totalItems"], 3);

    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 9);
    let paid = columns
        .iter()
        .find(|c| c["stage"]["id"] == "paid")
        .unwrap();
    assert_eq!(paid["items"].as_array().unwrap().len(), 2);
    assert_eq!(paid["totalValue"], 750.0);
    assert_eq!(paid["stage"]["displayName"], "Paid/Won");
    assert_eq!(columns[0]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn move_commits_and_persists() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, json!({ "niche": "coach", "title": "Lead" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = post_json(
        app,
        &format!("/api/board/{id}/move"),
        json!({ "stage": "proposal_sent" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "committed");
    assert_eq!(json["itemId"], id);
    assert_eq!(json["from"], "lead");
    assert_eq!(json["to"], "proposal_sent");

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (_, json) = get(app, "/items?niche=coach").await;
    assert_eq!(json[0]["stage"], "proposal_sent");
}

#[tokio::test]
async fn move_onto_current_stage_is_noop() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, json!({ "niche": "podcaster", "title": "Guest" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) =
        post_json(app, &format!("/api/board/{id}/move"), json!({ "stage": "pitch" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "no_op");
}

#[tokio::test]
async fn move_write_failure_rolls_back_with_500() {
    let dir = TempDir::new().unwrap();
    let mut lead = WorkItem::new(Niche::Freelancer, "Site rebuild");
    lead.stage = "proposal".into();
    let id = lead.id.clone();
    let store = Arc::new(MemoryStore::with_items(vec![lead]));
    store.set_fail_writes(true);

    let app = stageboard_server::build_router_with_store(dir.path().to_path_buf(), store.clone());
    let (status, json) =
        post_json(app, &format!("/api/board/{id}/move"), json!({ "stage": "won" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["outcome"], "rolled_back");
    assert_eq!(json["phase"], "rolled_back");
    assert_eq!(json["from"], "proposal");
    assert_eq!(json["to"], "won");
    assert!(json["error"].as_str().unwrap().contains("simulated write failure"));

    assert_eq!(store.write_count(), 1);
    assert_eq!(store.get(&id).unwrap().stage, "proposal");
}

#[tokio::test]
async fn move_rejects_unknown_stage_and_missing_item() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, json!({ "niche": "podcaster", "title": "Guest" })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) =
        post_json(app, &format!("/api/board/{id}/move"), json!({ "stage": "published" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) =
        post_json(app, "/api/board/missing/move", json!({ "stage": "live" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Revenue
// ---------------------------------------------------------------------------

#[tokio::test]
async fn revenue_reports_won_items_only() {
    let dir = TempDir::new().unwrap();
    create(&dir, json!({ "niche": "coach", "title": "Won", "status": "won", "value": 1000 })).await;
    create(&dir, json!({ "niche": "coach", "title": "Lead", "value": 300 })).await;

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = get(app, "/api/revenue?niche=coach").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalItems"], 2);
    assert_eq!(json["revenue"]["gross"], 1000.0);
    assert_eq!(json["revenue"]["wonCount"], 1);
    assert_eq!(json["window"]["kind"], "month");
    assert_eq!(json["series"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn revenue_windows_slice_the_series() {
    let dir = TempDir::new().unwrap();

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (_, json) = get(app, "/api/revenue?niche=creator&window=quarter").await;
    let labels: Vec<_> = json["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["Jan", "Apr", "Jul", "Oct"]);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = get(
        app,
        "/api/revenue?niche=creator&window=custom&from=2026-03-31&to=2026-01-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["series"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn revenue_rejects_bad_window_and_dates() {
    let dir = TempDir::new().unwrap();

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, _) = get(app, "/api/revenue?window=decade").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let app = stageboard_server::build_router(dir.path().to_path_buf());
    let (status, json) = get(app, "/api/revenue?window=custom&from=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("from"));
}
