use crate::frontend::client::LookupOutcome;
use crate::models::NameRecord;

pub const PAGE_TITLE: &str = "Baby Names Rank Finder";
pub const RANKING_YEAR: i32 = 2024;

/// Everything the search page needs to render one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub query: String,
    pub result: Option<NameRecord>,
    pub error: Option<String>,
}

impl SearchPage {
    /// The blank form shown when no name was submitted
    pub fn empty() -> Self {
        SearchPage::default()
    }

    pub fn from_outcome(query: &str, outcome: LookupOutcome) -> Self {
        let (result, error) = match outcome {
            LookupOutcome::Found(record) => (Some(record), None),
            LookupOutcome::NotFound => (
                None,
                Some(format!(
                    "Name \"{}\" not found in the {} rankings",
                    query, RANKING_YEAR
                )),
            ),
            LookupOutcome::Failed(_) | LookupOutcome::InvalidResponse(_) => {
                (None, Some("Error searching for name".to_string()))
            }
            LookupOutcome::Unreachable(detail) => (
                None,
                Some(format!("Unable to connect to backend service: {}", detail)),
            ),
        };

        SearchPage {
            query: query.to_string(),
            result,
            error,
        }
    }

    pub fn render(&self) -> String {
        let result = self
            .result
            .as_ref()
            .map(render_result)
            .unwrap_or_default();
        let error = self
            .error
            .as_ref()
            .map(|message| format!("<p class=\"error\">{}</p>\n", escape_html(message)))
            .unwrap_or_default();

        format!(
            "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>{title}</title>
{style}</head>
<body>
<main>
<h1>{title}</h1>
<p class=\"subtitle\">Look up a name in the {year} popularity rankings</p>
<form method=\"get\" action=\"/\">
<input type=\"text\" name=\"name\" placeholder=\"Enter a name\" value=\"{query}\" autofocus>
<button type=\"submit\">Search</button>
</form>
{result}{error}</main>
</body>
</html>
",
            title = PAGE_TITLE,
            style = STYLE,
            year = RANKING_YEAR,
            query = escape_html(&self.query),
            result = result,
            error = error,
        )
    }
}

fn render_result(record: &NameRecord) -> String {
    let name = escape_html(&record.name);
    format!(
        "<section class=\"result\">
<h2>{name}</h2>
<p class=\"rank\">#{rank}</p>
<p>{count} babies named {name} in {year}</p>
</section>
",
        name = name,
        rank = record.rank,
        count = record.count,
        year = record.year,
    )
}

const STYLE: &str = "<style>
body { font-family: sans-serif; background: #f6f7fb; margin: 0; }
main { max-width: 32rem; margin: 4rem auto; padding: 2rem; background: #fff; border-radius: 8px; }
form { display: flex; gap: 0.5rem; }
input { flex: 1; padding: 0.5rem; }
.rank { font-size: 2.5rem; font-weight: bold; margin: 0.5rem 0; }
.error { color: #b00020; }
.subtitle { color: #555; }
</style>
";

/// Escapes text for use in element content and double-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
