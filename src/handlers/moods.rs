use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::db::models::MoodEntry;
use crate::error::TrackleError;
use crate::handlers::pages::{escape, layout};
use crate::router::TrackleState;

#[derive(Debug, Deserialize)]
pub struct MoodForm {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub notes: String,
}

pub async fn page(State(state): State<TrackleState>) -> Result<Html<String>, TrackleError> {
    let entries = state.storage.list_moods().await?;
    Ok(Html(render(&entries)))
}

pub async fn create(
    State(state): State<TrackleState>,
    Form(form): Form<MoodForm>,
) -> Result<Redirect, TrackleError> {
    let mood = form.mood.trim();
    if !mood.is_empty() {
        let notes = form.notes.trim();
        state
            .storage
            .insert_mood(mood, (!notes.is_empty()).then_some(notes))
            .await?;
    }
    Ok(Redirect::to("/mood-journal"))
}

pub async fn delete(
    State(state): State<TrackleState>,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.delete_mood(id).await?;
    Ok(Redirect::to("/mood-journal"))
}

fn render(entries: &[MoodEntry]) -> String {
    let mut body = String::from(
        r#"<h1>Mood Journal</h1>
<form method="post" action="/mood-journal">
<select name="mood">
<option>Great</option>
<option>Good</option>
<option>Okay</option>
<option>Low</option>
<option>Rough</option>
</select>
<input name="notes" placeholder="Notes">
<button type="submit">Log mood</button>
</form>
"#,
    );
    if entries.is_empty() {
        body.push_str("<p>No entries yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for entry in entries {
            body.push_str(&format!(
                "<li><strong>{}</strong> <time>{}</time>",
                escape(&entry.mood),
                entry.created_at.format("%Y-%m-%d %H:%M"),
            ));
            if let Some(notes) = &entry.notes {
                body.push_str(&format!(" <span>{}</span>", escape(notes)));
            }
            body.push_str(&format!(
                r#" <form method="post" action="/mood-journal/delete/{}"><button>Delete</button></form></li>
"#,
                entry.id
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Mood Journal", &body)
}
