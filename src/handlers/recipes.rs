use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::db::models::Recipe;
use crate::error::TrackleError;
use crate::handlers::pages::{escape, layout};
use crate::router::TrackleState;

#[derive(Debug, Deserialize)]
pub struct RecipeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub prep_time: String,
}

pub async fn page(State(state): State<TrackleState>) -> Result<Html<String>, TrackleError> {
    let recipes = state.storage.list_recipes().await?;
    Ok(Html(render(&recipes)))
}

pub async fn create(
    State(state): State<TrackleState>,
    Form(form): Form<RecipeForm>,
) -> Result<Redirect, TrackleError> {
    let name = form.name.trim();
    if !name.is_empty() {
        let ingredients = form.ingredients.trim();
        let instructions = form.instructions.trim();
        // An unparseable prep time is dropped, not a rejection.
        let prep_time: Option<i64> = form.prep_time.trim().parse().ok().filter(|m| *m >= 0);
        state
            .storage
            .insert_recipe(
                name,
                (!ingredients.is_empty()).then_some(ingredients),
                (!instructions.is_empty()).then_some(instructions),
                prep_time,
            )
            .await?;
    }
    Ok(Redirect::to("/recipe-assistant"))
}

pub async fn delete(
    State(state): State<TrackleState>,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.delete_recipe(id).await?;
    Ok(Redirect::to("/recipe-assistant"))
}

fn render(recipes: &[Recipe]) -> String {
    let mut body = String::from(
        r#"<h1>Recipe Assistant</h1>
<form method="post" action="/recipe-assistant">
<input name="name" placeholder="Recipe name" required>
<input name="prep_time" inputmode="numeric" placeholder="Prep time (minutes)">
<textarea name="ingredients" placeholder="Ingredients"></textarea>
<textarea name="instructions" placeholder="Instructions"></textarea>
<button type="submit">Save recipe</button>
</form>
"#,
    );
    if recipes.is_empty() {
        body.push_str("<p>No recipes yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for recipe in recipes {
            body.push_str(&format!("<li><strong>{}</strong>", escape(&recipe.name)));
            if let Some(minutes) = recipe.prep_time {
                body.push_str(&format!(" <em>{minutes} min prep</em>"));
            }
            if let Some(ingredients) = &recipe.ingredients {
                body.push_str(&format!(" <span>{}</span>", escape(ingredients)));
            }
            body.push_str(&format!(
                r#" <form method="post" action="/recipe-assistant/delete/{}"><button>Delete</button></form></li>
"#,
                recipe.id
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Recipe Assistant", &body)
}
