use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use axum_extra::extract::cookie::Key;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use trackle::db::TrackerStorage;
use trackle::router::{TrackleState, trackle_router};

/// Full router plus direct storage access, backed by a throwaway
/// SQLite file in the temp dir. The file is removed on drop.
pub struct TestApp {
    pub app: Router,
    pub storage: TrackerStorage,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "trackle-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let database_url = format!("sqlite:{}", db_path.display());
        let storage = trackle::db::connect(&database_url)
            .await
            .expect("failed to open test database");
        let state = TrackleState::new(storage.clone(), Key::generate());
        Self {
            app: trackle_router(state),
            storage,
            db_path,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let req = builder.body(Body::empty()).expect("failed to build request");
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let req = builder
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let req = builder
            .body(Body::from(encode_form(fields)))
            .expect("failed to build request");
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    /// Run the full OTP dance and return the session cookie pair.
    pub async fn signin(&self, email: &str) -> String {
        let resp = self
            .post_json("/signin", serde_json::json!({"email": email}), None)
            .await;
        let body = body_json(resp).await;
        let otp = body["otp"].as_str().expect("no otp in response").to_string();

        let resp = self
            .post_json(
                "/signin",
                serde_json::json!({"email": email, "otp": otp, "action": "verify"}),
                None,
            )
            .await;
        set_cookies(&resp)
            .into_iter()
            .find(|c| c.starts_with("trackle_session="))
            .expect("no session cookie set")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let text = body_string(resp).await;
    serde_json::from_str(&text).expect("response body was not JSON")
}

/// `name=value` pairs from every Set-Cookie header, attributes dropped.
pub fn set_cookies(resp: &Response<Body>) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).to_string())
        .collect()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("no Location header")
}

/// Joins cookie pairs into a single Cookie header value.
pub fn merge_cookies(cookies: &[&str]) -> String {
    cookies.join("; ")
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

// Percent-encode enough for test inputs: spaces, separators, percent.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' ' => out.push('+'),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '+' => out.push_str("%2B"),
            '%' => out.push_str("%25"),
            ',' => out.push_str("%2C"),
            _ => out.push(c),
        }
    }
    out
}
