use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::Deserialize;
use serde_json::{Value, json};
use time::Duration;

use crate::error::TrackleError;
use crate::middleware::session::MaybeSessionUser;
use crate::router::TrackleState;

const THEME_COOKIE: &str = "trackle_theme";
const THEME_TTL: Duration = Duration::days(365);

fn theme_cookie(theme: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(THEME_COOKIE.to_string(), theme.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(THEME_TTL)
        .build()
}

/// GET /theme/settings — session value wins, then the signed-in
/// user's stored preference, then "light". The value is kept in both
/// places so anonymous visitors still get a sticky theme.
pub async fn settings(
    State(state): State<TrackleState>,
    MaybeSessionUser(email): MaybeSessionUser,
    jar: PrivateCookieJar,
) -> Result<Json<Value>, TrackleError> {
    if let Some(cookie) = jar.get(THEME_COOKIE) {
        return Ok(Json(json!({"theme": cookie.value()})));
    }
    if let Some(email) = email
        && let Some(prefs) = state.storage.get_preferences(&email).await?
        && let Some(theme) = prefs.theme
    {
        return Ok(Json(json!({"theme": theme})));
    }
    Ok(Json(json!({"theme": "light"})))
}

#[derive(Debug, Deserialize)]
pub struct ThemeToggleRequest {
    pub theme: Option<String>,
}

/// POST /theme/toggle — accept only "light"/"dark"; always store to
/// the session cookie, and also to the DB when signed in.
pub async fn toggle(
    State(state): State<TrackleState>,
    MaybeSessionUser(email): MaybeSessionUser,
    jar: PrivateCookieJar,
    Json(req): Json<ThemeToggleRequest>,
) -> Result<Response, TrackleError> {
    let theme = match req.theme.as_deref() {
        Some(theme @ ("light" | "dark")) => theme.to_string(),
        _ => {
            return Err(TrackleError::Validation {
                field: "theme",
                reason: "expected \"light\" or \"dark\"".to_string(),
            });
        }
    };

    if let Some(email) = &email {
        state.storage.upsert_theme(email, &theme).await?;
    }

    let jar = jar.add(theme_cookie(&theme));
    Ok((jar, Json(json!({"success": true, "theme": theme}))).into_response())
}
