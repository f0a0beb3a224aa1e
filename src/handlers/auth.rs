use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::handlers::pages::layout;
use crate::middleware::session::{clear_session_cookie, session_cookie};
use crate::router::TrackleState;

/// Body for both phases of the sign-in flow: an OTP request carries
/// only `email`; verification adds `otp` and `action: "verify"`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    pub otp: Option<String>,
    pub action: Option<String>,
}

pub async fn signin_page() -> Html<String> {
    let body = r#"<h1>Sign in</h1>
<form id="signin-form">
<label>Email <input type="email" name="email" required></label>
<label>Code <input type="text" name="otp" inputmode="numeric" maxlength="6"></label>
<button type="submit">Continue</button>
</form>"#;
    Html(layout("Sign in", body))
}

/// POST /signin — two-phase email + OTP flow.
///
/// There is no mail delivery; the generated code is echoed back in the
/// JSON response for the client to display.
pub async fn signin(
    State(state): State<TrackleState>,
    jar: PrivateCookieJar,
    Json(req): Json<SigninRequest>,
) -> Response {
    let email = req.email.trim().to_owned();
    if email.is_empty() {
        return Json(json!({"success": false, "message": "Email is required"})).into_response();
    }

    if req.action.as_deref() == Some("verify") {
        let Some(otp) = req.otp.as_deref() else {
            return Json(json!({"success": false, "message": "OTP is required"})).into_response();
        };
        if state.otp.verify_and_consume(&email, otp) {
            info!(email = %email, "sign-in verified");
            let jar = jar.add(session_cookie(email));
            return (jar, Json(json!({"success": true}))).into_response();
        }
        return Json(json!({"success": false, "message": "Invalid OTP"})).into_response();
    }

    let otp = state.otp.issue(&email);
    Json(json!({"success": true, "otp": otp})).into_response()
}

/// GET /logout — drop the session cookie and go home.
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    (jar.remove(clear_session_cookie()), Redirect::to("/"))
}
