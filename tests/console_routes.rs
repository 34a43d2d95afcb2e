use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use league_console::{
    config::SubmitPolicy,
    pending::WriteKey,
    resources::ResourceKind,
    routes::router,
    test_helpers::{FakeRest, seed_league},
};

async fn seeded() -> FakeRest {
    let fake = FakeRest::start().await;
    seed_league(&fake);
    fake
}

async fn page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn index_redirects_to_players() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/player?view=table");
}

#[tokio::test]
async fn players_tab_lists_records_with_actions() {
    let fake = seeded().await;
    let (status, html) = page(fake.console(), "/player").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Ana"));
    assert!(html.contains("Smithers"));
    assert!(html.contains("Add Player"));
    assert!(html.contains("/player/7/edit?view=table"));
    assert!(html.contains("/player/7/delete?view=table"));
    assert!(html.contains("Are you sure you want to delete this player?"));
}

#[tokio::test]
async fn search_narrows_players_tab() {
    let fake = seeded().await;
    let (status, html) = page(fake.console(), "/player?q=sa").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Smithers"));
    assert!(!html.contains("Okafor"));
    assert!(html.contains("Show all"));

    let (_, html) = page(fake.console(), "/player?q=zzz").await;
    assert!(html.contains("No players found"));
}

#[tokio::test]
async fn card_view_renders_team_cards() {
    let fake = seeded().await;
    let (status, html) = page(fake.console(), "/team?view=cards").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("class=\"card\""));
    assert!(html.contains("Hornets"));
    assert!(html.contains("red, blue"));
    assert!(!html.contains("<table"));
}

#[tokio::test]
async fn read_only_tabs_have_no_write_controls() {
    let fake = seeded().await;

    let (status, html) = page(fake.console(), "/coach").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Park"));
    assert!(html.contains("555-0101"));
    assert!(!html.contains("Delete"));
    assert!(!html.contains("Add Coach"));

    let (_, html) = page(fake.console(), "/parent").await;
    assert!(html.contains("12 Elm St, Salem, OR, 97301"));

    let (_, html) = page(fake.console(), "/player_parent").await;
    assert!(html.contains("Mother"));
}

#[tokio::test]
async fn empty_table_shows_placeholder() {
    let fake = FakeRest::start().await;
    let (status, html) = page(fake.console(), "/team").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No teams found"));
}

#[tokio::test]
async fn forms_open_for_create_and_edit() {
    let fake = seeded().await;

    let (status, html) = page(fake.console(), "/player/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Add New Player"));
    assert!(html.contains("action=\"/player?view=table\""));

    let (status, html) = page(fake.console(), "/team/5/edit?view=cards").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Edit Team"));
    assert!(html.contains("value=\"Hornets\""));
    assert!(html.contains("action=\"/team/5?view=cards\""));
}

#[tokio::test]
async fn create_redirects_back_to_tab() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(form_post(
            "/player?view=cards",
            "first_name=Cleo&last_name=Diaz&age=9&team_id=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/player?view=cards");

    let rows = fake.rows("player");
    let cleo = rows.last().unwrap();
    assert_eq!(cleo["first_name"], "Cleo");
    assert_eq!(cleo["age"], 9);
    assert!(cleo["team_id"].is_null());
}

#[tokio::test]
async fn update_sends_split_colors() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(form_post(
            "/team/5",
            "team_name=Hornets&team_colors=green%2C+gold%2C",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let team = fake
        .rows("team")
        .into_iter()
        .find(|row| row["team_id"] == 5)
        .unwrap();
    assert_eq!(team["team_colors"], serde_json::json!(["green", "gold"]));
}

#[tokio::test]
async fn delete_removes_player() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(form_post("/player/7/delete", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(fake.rows("player").iter().all(|row| row["player_id"] != 7));
}

#[tokio::test]
async fn failed_write_rerenders_with_error() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(form_post("/player/404/delete", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("status-error"));
    assert!(html.contains("Error: API Error (404)"));
    assert!(html.contains("Ana"));
    assert_eq!(fake.rows("player").len(), 3);
}

#[tokio::test]
async fn failed_update_keeps_submitted_values() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(form_post("/team/99", "team_name=Ghosts&team_colors=grey"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Edit Team"));
    assert!(html.contains("value=\"Ghosts\""));
}

#[tokio::test]
async fn read_only_resources_reject_writes() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(form_post("/coach", "first_name=X"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("POST is not supported on /coach"));

    for uri in ["/coach/1", "/coach/1/delete", "/player_parent/3/delete"] {
        let response = fake.console().oneshot(form_post(uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
    assert_eq!(fake.rows("coach").len(), 1);

    let (status, _) = page(fake.console(), "/coach/1/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, html) = page(fake.console(), "/referee").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No console page at /referee"));
}

#[tokio::test]
async fn non_numeric_key_renders_error_page() {
    let fake = seeded().await;

    let (status, html) = page(fake.console(), "/player/abc/edit").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Invalid record key"));
    assert!(html.contains("400 Bad Request"));

    let response = fake
        .console()
        .oneshot(form_post("/team/blue/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fake.rows("team").len(), 2);
}

#[tokio::test]
async fn search_term_is_sent_untrimmed() {
    let fake = seeded().await;

    let (_, html) = page(fake.console(), "/player?q=Sam").await;
    assert!(html.contains("Smithers"));

    let (status, html) = page(fake.console(), "/player?q=%20Sam").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No players found"));
    assert!(html.contains("value=\" Sam\""));
}

#[tokio::test]
async fn odd_team_colors_keep_other_teams_visible() {
    let fake = FakeRest::start().await;
    fake.seed(
        "team",
        vec![
            serde_json::json!({ "team_id": 1, "team_name": "Hornets", "team_colors": ["red", "blue"] }),
            serde_json::json!({ "team_id": 2, "team_name": "Otters", "team_colors": ["green", null] }),
        ],
    );

    let (status, html) = page(fake.console(), "/team").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Hornets"));
    assert!(html.contains("Otters"));
    assert!(!html.contains("No teams found"));
}

#[tokio::test]
async fn status_events_stream_is_sse() {
    let fake = seeded().await;
    let response = fake
        .console()
        .oneshot(Request::get("/status/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/event-stream"));
}

#[tokio::test]
async fn status_endpoint_reports_latest_event() {
    let fake = seeded().await;
    let state = fake.console_state(SubmitPolicy::AllowDuplicates);

    let (_, json) = page(router(state.clone()), "/status").await;
    let idle: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(idle["kind"], "idle");

    page(router(state.clone()), "/team").await;
    let (status, json) = page(router(state), "/status").await;
    let loaded: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded["kind"], "success");
    assert_eq!(loaded["message"], "Data loaded successfully!");
}

#[tokio::test]
async fn duplicate_submission_is_rejected_when_pending() {
    let fake = seeded().await;
    let state = fake.console_state(SubmitPolicy::DisableWhilePending);

    let guard = state
        .pending
        .begin(WriteKey::delete(ResourceKind::Player, 7))
        .expect("first submission");
    let response = router(state.clone())
        .oneshot(form_post("/player/7/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(fake.rows("player").len(), 3);

    drop(guard);
    let response = router(state)
        .oneshot(form_post("/player/7/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
