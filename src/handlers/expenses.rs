use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::db::models::Expense;
use crate::error::TrackleError;
use crate::handlers::pages::{escape, layout};
use crate::router::TrackleState;

#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub payer: String,
    /// Comma-separated names.
    #[serde(default)]
    pub participants: String,
}

impl ExpenseForm {
    /// None when any required piece is missing or the amount is not a
    /// positive number; such submissions are discarded.
    fn validated(&self) -> Option<(String, f64, String, Vec<String>)> {
        let description = self.description.trim();
        let payer = self.payer.trim();
        let amount: f64 = self.amount.trim().parse().ok()?;
        let participants: Vec<String> = self
            .participants
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if description.is_empty() || payer.is_empty() || amount <= 0.0 || participants.is_empty() {
            return None;
        }
        Some((description.to_string(), amount, payer.to_string(), participants))
    }
}

pub async fn page(State(state): State<TrackleState>) -> Result<Html<String>, TrackleError> {
    let expenses = state.storage.list_expenses().await?;
    Ok(Html(render(&expenses)))
}

pub async fn create(
    State(state): State<TrackleState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Redirect, TrackleError> {
    if let Some((description, amount, payer, participants)) = form.validated() {
        state
            .storage
            .insert_expense(&description, amount, &payer, &participants)
            .await?;
    }
    Ok(Redirect::to("/expense-splitter"))
}

pub async fn delete(
    State(state): State<TrackleState>,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackleError> {
    state.storage.delete_expense(id).await?;
    Ok(Redirect::to("/expense-splitter"))
}

fn render(expenses: &[Expense]) -> String {
    let mut body = String::from(
        r#"<h1>Expense Splitter</h1>
<form method="post" action="/expense-splitter">
<input name="description" placeholder="What was it for?" required>
<input name="amount" inputmode="decimal" placeholder="Amount" required>
<input name="payer" placeholder="Who paid?" required>
<input name="participants" placeholder="Split between (comma-separated)" required>
<button type="submit">Add expense</button>
</form>
"#,
    );
    if expenses.is_empty() {
        body.push_str("<p>No expenses yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for expense in expenses {
            body.push_str(&format!(
                r#"<li><strong>{description}</strong> {amount:.2} paid by {payer},
split between {count} ({share:.2} each)
<form method="post" action="/expense-splitter/delete/{id}"><button>Delete</button></form></li>
"#,
                description = escape(&expense.description),
                amount = expense.amount,
                payer = escape(&expense.payer),
                count = expense.participants.len(),
                share = expense.share_per_person(),
                id = expense.id,
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Expense Splitter", &body)
}
