use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;

pub const SESSION_COOKIE: &str = "trackle_session";
const SESSION_TTL: Duration = Duration::days(7);

/// Session cookie carrying the signed-in email, encrypted by the
/// private jar.
pub fn session_cookie(email: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), email))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL)
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), String::new()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn session_email(jar: &PrivateCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|email| !email.is_empty())
}

/// Extractor for routes gated behind sign-in. Anonymous requests are
/// redirected to `/signin` instead of receiving an error page.
#[derive(Debug, Clone)]
pub struct SessionUser(pub String);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        match session_email(&jar) {
            Some(email) => Ok(SessionUser(email)),
            None => Err(Redirect::to("/signin").into_response()),
        }
    }
}

/// Same lookup without the redirect; anonymous visitors get `None`.
#[derive(Debug, Clone)]
pub struct MaybeSessionUser(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeSessionUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        Ok(MaybeSessionUser(session_email(&jar)))
    }
}
