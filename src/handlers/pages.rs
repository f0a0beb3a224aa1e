use axum::response::Html;

/// Minimal shared page chrome. The pack carries no templating crate;
/// pages are assembled as strings and served as `Html`, with dynamic
/// sections built by the individual handlers.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Trackle</title>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/habit-tracker">Habit Tracker</a>
<a href="/mood-journal">Mood Journal</a>
<a href="/expense-splitter">Expense Splitter</a>
<a href="/recipe-assistant">Recipe Assistant</a>
<a href="/logout">Sign out</a>
</nav>
{body}
</body>
</html>"#
    )
}

/// Escape user-provided text before splicing it into markup.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub async fn home() -> Html<String> {
    let body = r#"<h1>Trackle</h1>
<p>Small tools for keeping a day on track.</p>
<ul>
<li><a href="/habit-tracker">Habit Tracker</a></li>
<li><a href="/mood-journal">Mood Journal</a></li>
<li><a href="/expense-splitter">Expense Splitter</a></li>
<li><a href="/recipe-assistant">Recipe Assistant</a></li>
</ul>"#;
    Html(layout("Home", body))
}
