use axum::{extract::State, response::Redirect};
use tracing::info;

use crate::error::TrackleError;
use crate::middleware::session::SessionUser;
use crate::router::TrackleState;

/// POST /tips/disable — stop showing the onboarding modal for this
/// user. Persisted so it sticks across sessions.
pub async fn disable(
    State(state): State<TrackleState>,
    SessionUser(email): SessionUser,
) -> Result<Redirect, TrackleError> {
    state.storage.mark_tutorial_seen(&email).await?;
    info!(email = %email, "onboarding tips disabled");
    Ok(Redirect::to("/habit-tracker"))
}
