mod common;

use axum::http::StatusCode;
use common::{TestApp, body_string, location};

#[tokio::test]
async fn new_user_sees_tips_modal() {
    let app = TestApp::spawn("tips-new-user").await;
    let session = app.signin("new_user@example.com").await;

    let resp = app.get("/habit-tracker", Some(&session)).await;
    let html = body_string(resp).await;
    assert!(html.contains("id=\"tipsModal\""));
    assert!(html.contains("Welcome to Habit Tracker!"));
}

#[tokio::test]
async fn disable_tips_persists() {
    let app = TestApp::spawn("tips-disable").await;
    let session = app.signin("test@example.com").await;

    let resp = app.post_form("/tips/disable", &[], Some(&session)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/habit-tracker");

    let prefs = app
        .storage
        .get_preferences("test@example.com")
        .await
        .unwrap()
        .expect("no preferences row written");
    assert!(prefs.has_seen_tutorial);

    let resp = app.get("/habit-tracker", Some(&session)).await;
    let html = body_string(resp).await;
    assert!(!html.contains("id=\"tipsModal\""));
}

#[tokio::test]
async fn disable_tips_requires_auth() {
    let app = TestApp::spawn("tips-auth").await;
    let resp = app.post_form("/tips/disable", &[], None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/signin");
}

#[tokio::test]
async fn tips_stay_disabled_across_sessions() {
    let app = TestApp::spawn("tips-resignin").await;
    let session = app.signin("returning@example.com").await;
    app.post_form("/tips/disable", &[], Some(&session)).await;

    // Sign out and back in; the preference lives in the DB, not the
    // session.
    app.get("/logout", Some(&session)).await;
    let session = app.signin("returning@example.com").await;

    let resp = app.get("/habit-tracker", Some(&session)).await;
    let html = body_string(resp).await;
    assert!(!html.contains("id=\"tipsModal\""));
}
