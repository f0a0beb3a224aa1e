use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::db::models::{Habit, NewHabit};
use crate::error::TrackleError;
use crate::handlers::pages::{escape, layout};
use crate::middleware::session::SessionUser;
use crate::router::TrackleState;

#[derive(Debug, Deserialize)]
pub struct HabitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_custom: String,
}

impl HabitForm {
    /// `category == "other"` means the free-text field carries the
    /// real value.
    fn resolved_category(&self) -> Option<String> {
        let category = if self.category == "other" {
            self.category_custom.trim()
        } else {
            self.category.trim()
        };
        (!category.is_empty()).then(|| category.to_string())
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// GET /habit-tracker — active and paused habits, plus the onboarding
/// tips modal until the user dismisses it.
pub async fn dashboard(
    State(state): State<TrackleState>,
    SessionUser(email): SessionUser,
) -> Result<Html<String>, TrackleError> {
    let habits = state.storage.list_dashboard_habits().await?;
    let prefs = state.storage.get_preferences(&email).await?;
    let show_tips = !prefs.map(|p| p.has_seen_tutorial).unwrap_or(false);
    Ok(Html(render_dashboard(&habits, show_tips)))
}

/// POST /habit-tracker — create a habit; blank names are silently
/// discarded and the request redirects either way.
pub async fn create(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Form(form): Form<HabitForm>,
) -> Result<Redirect, TrackleError> {
    if let Some(name) = non_empty(&form.name) {
        let habit = NewHabit {
            name: name.clone(),
            description: non_empty(&form.description),
            category: form.resolved_category(),
        };
        let id = state.storage.insert_habit(habit).await?;
        info!(id, name = %name, "habit created");
    }
    Ok(Redirect::to("/habit-tracker"))
}

/// POST /habit-tracker/update/{id} — rename; a whitespace-only name
/// leaves the row untouched. Unknown ids are 404 before validation.
pub async fn update(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Path(id): Path<i64>,
    Form(form): Form<HabitForm>,
) -> Result<Redirect, TrackleError> {
    state.storage.get_habit(id).await?;
    if let Some(name) = non_empty(&form.name) {
        state
            .storage
            .update_habit(
                id,
                &name,
                non_empty(&form.description).as_deref(),
                form.resolved_category().as_deref(),
            )
            .await?;
    }
    Ok(Redirect::to("/habit-tracker"))
}

/// POST /habit-tracker/delete/{id}. Deletion is deliberately not gated
/// behind a session; the archived page exposes it too.
pub async fn delete(
    State(state): State<TrackleState>,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.delete_habit(id).await?;
    info!(id, "habit deleted");
    Ok(Redirect::to("/habit-tracker"))
}

/// POST /habit-tracker/toggle/{id} — flip today's completion mark.
pub async fn toggle(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    let habit = state.storage.get_habit(id).await?;
    let today = Utc::now().date_naive();
    let dates = habit.toggled_dates(today);
    state.storage.set_completed_dates(id, &dates).await?;
    Ok(Redirect::to("/habit-tracker"))
}

pub async fn archive(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.set_archived(id, true).await?;
    info!(id, "habit archived");
    Ok(Redirect::to("/habit-tracker"))
}

pub async fn unarchive(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.set_archived(id, false).await?;
    Ok(Redirect::to("/habit-tracker"))
}

pub async fn pause(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.set_paused(id, true).await?;
    Ok(Redirect::to("/habit-tracker"))
}

pub async fn resume(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.set_paused(id, false).await?;
    Ok(Redirect::to("/habit-tracker"))
}

/// GET /habit-tracker/archived — archived habits only.
pub async fn archived_page(
    State(state): State<TrackleState>,
    SessionUser(_email): SessionUser,
) -> Result<Html<String>, TrackleError> {
    let habits = state.storage.list_archived_habits().await?;
    Ok(Html(render_archived(&habits)))
}

// === rendering ===

fn render_dashboard(habits: &[Habit], show_tips: bool) -> String {
    let today = Utc::now().date_naive();
    let active: Vec<&Habit> = habits.iter().filter(|h| h.is_active()).collect();
    let paused: Vec<&Habit> = habits.iter().filter(|h| h.is_paused).collect();

    let mut body = String::from("<h1>Habit Tracker</h1>\n");

    if show_tips {
        body.push_str(TIPS_MODAL);
    }

    body.push_str(
        r#"<form method="post" action="/habit-tracker">
<input name="name" placeholder="New habit" required>
<input name="description" placeholder="Description">
<select name="category">
<option value="">No category</option>
<option>Fitness</option>
<option>Mindfulness</option>
<option>Learning</option>
<option value="other">Other...</option>
</select>
<input name="category_custom" placeholder="Custom category">
<button type="submit">Add habit</button>
</form>
"#,
    );

    if habits.is_empty() {
        body.push_str("<p>No habits yet</p>\n");
    } else {
        body.push_str("<section id=\"active-habits\">\n<h2>Active Habits</h2>\n<ul>\n");
        for habit in &active {
            body.push_str(&habit_item(habit, habit.is_completed_on(today)));
        }
        body.push_str("</ul>\n</section>\n");

        if !paused.is_empty() {
            body.push_str("<section id=\"paused-habits\">\n<h2>Paused Habits</h2>\n<ul>\n");
            for habit in &paused {
                body.push_str(&habit_item(habit, habit.is_completed_on(today)));
            }
            body.push_str("</ul>\n</section>\n");
        }

        body.push_str(SHARE_MODAL);
    }

    body.push_str("<p><a href=\"/habit-tracker/archived\">Archived habits</a></p>\n");
    layout("Habit Tracker", &body)
}

fn render_archived(habits: &[Habit]) -> String {
    let mut body = String::from("<h1>Archived Habits</h1>\n");
    if habits.is_empty() {
        body.push_str("<p>Nothing archived.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for habit in habits {
            body.push_str(&format!(
                r#"<li>{name}
<form method="post" action="/habit-tracker/unarchive/{id}"><button>Restore</button></form>
<form method="post" action="/habit-tracker/delete/{id}"><button>Delete</button></form>
</li>
"#,
                name = escape(&habit.name),
                id = habit.id,
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("<p><a href=\"/habit-tracker\">Back to tracker</a></p>\n");
    layout("Archived Habits", &body)
}

fn habit_item(habit: &Habit, done_today: bool) -> String {
    let mut item = format!("<li><strong>{}</strong>", escape(&habit.name));
    if let Some(category) = &habit.category {
        item.push_str(&format!(" <em class=\"category\">{}</em>", escape(category)));
    }
    if let Some(description) = &habit.description {
        item.push_str(&format!(" <span>{}</span>", escape(description)));
    }
    let toggle_label = if done_today { "Done today" } else { "Mark done" };
    let pause_action = if habit.is_paused { "resume" } else { "pause" };
    let pause_label = if habit.is_paused { "Resume" } else { "Pause" };
    item.push_str(&format!(
        r#"
<form method="post" action="/habit-tracker/toggle/{id}"><button>{toggle_label}</button></form>
<form method="post" action="/habit-tracker/{pause_action}/{id}"><button>{pause_label}</button></form>
<form method="post" action="/habit-tracker/archive/{id}"><button>Archive</button></form>
<form method="post" action="/habit-tracker/delete/{id}"><button>Delete</button></form>
</li>
"#,
        id = habit.id,
    ));
    item
}

const TIPS_MODAL: &str = r#"<div id="tipsModal" role="dialog" aria-modal="true" aria-labelledby="tipsTitle" tabindex="0">
<h2 id="tipsTitle">Welcome to Habit Tracker!</h2>
<p>Add a habit below, check it off each day, and pause or archive the ones you are not working on.</p>
<form method="post" action="/tips/disable">
<button type="submit">Don't show again</button>
</form>
</div>
"#;

const SHARE_MODAL: &str = r#"<button type="button" onclick="openShareModal()">Share Progress</button>
<div id="shareModal" role="dialog" aria-modal="true" hidden>
<h2>Share Your Progress</h2>
<textarea id="shareText" readonly></textarea>
<button type="button" onclick="copyToClipboard()">Copy to Clipboard</button>
<button type="button" onclick="closeShareModal()">Close</button>
</div>
<script>
function openShareModal() {
  generateShareText();
  document.getElementById('shareModal').hidden = false;
}
function closeShareModal() {
  document.getElementById('shareModal').hidden = true;
}
function generateShareText() {
  var names = Array.from(document.querySelectorAll('#active-habits li strong'))
    .map(function (el) { return el.textContent; });
  document.getElementById('shareText').value =
    'Active Habits: ' + names.length + '\n' + names.join('\n');
}
function copyToClipboard() {
  navigator.clipboard.writeText(document.getElementById('shareText').value);
}
</script>
"#;
