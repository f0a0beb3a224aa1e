use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;

use crate::db::TrackerStorage;
use crate::handlers::{auth, expenses, habits, moods, pages, recipes, theme, tips};
use crate::service::OtpStore;

/// Shared application state: the SQLite-backed storage, the in-memory
/// OTP store, and the private cookie key.
#[derive(Clone)]
pub struct TrackleState {
    pub storage: TrackerStorage,
    pub otp: OtpStore,
    key: Key,
}

impl TrackleState {
    pub fn new(storage: TrackerStorage, key: Key) -> Self {
        Self {
            storage,
            otp: OtpStore::new(),
            key,
        }
    }
}

// Required by PrivateCookieJar extraction.
impl FromRef<TrackleState> for Key {
    fn from_ref(state: &TrackleState) -> Key {
        state.key.clone()
    }
}

pub fn trackle_router(state: TrackleState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/signin", get(auth::signin_page).post(auth::signin))
        .route("/logout", get(auth::logout))
        .route("/habit-tracker", get(habits::dashboard).post(habits::create))
        .route("/habit-tracker/archived", get(habits::archived_page))
        .route("/habit-tracker/update/{id}", post(habits::update))
        .route("/habit-tracker/delete/{id}", post(habits::delete))
        .route("/habit-tracker/toggle/{id}", post(habits::toggle))
        .route("/habit-tracker/archive/{id}", post(habits::archive))
        .route("/habit-tracker/unarchive/{id}", post(habits::unarchive))
        .route("/habit-tracker/pause/{id}", post(habits::pause))
        .route("/habit-tracker/resume/{id}", post(habits::resume))
        .route("/theme/settings", get(theme::settings))
        .route("/theme/toggle", post(theme::toggle))
        .route("/tips/disable", post(tips::disable))
        .route("/mood-journal", get(moods::page).post(moods::create))
        .route("/mood-journal/delete/{id}", post(moods::delete))
        .route("/expense-splitter", get(expenses::page).post(expenses::create))
        .route("/expense-splitter/delete/{id}", post(expenses::delete))
        .route("/recipe-assistant", get(recipes::page).post(recipes::create))
        .route("/recipe-assistant/delete/{id}", post(recipes::delete))
        .with_state(state)
}
