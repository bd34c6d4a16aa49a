//! Server-side HTML for the dashboard page.

use crate::dashboard::{DashboardView, MetricCard};
use std::fmt::Write;

const NOT_FOUND_WARNING: &str = "Cannot find user. Please check your username or ID.";
const LOADING_MESSAGE: &str = "Retrieving data...";

/// What the page shows below the input field.
#[derive(Debug)]
pub enum PageState {
    /// No handle submitted yet.
    Empty,
    Found(Box<DashboardView>),
    NotFound,
    /// Invalid input or a failed lookup; carries a message safe to display.
    Failed(String),
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Renders the full page for the submitted handle (if any).
pub fn render_page(handle: Option<&str>, state: &PageState) -> String {
    let mut body = String::new();

    match state {
        PageState::Empty => {}
        PageState::NotFound => {
            let _ = write!(body, r#"<div class="warning">{}</div>"#, NOT_FOUND_WARNING);
        }
        PageState::Failed(message) => {
            let _ = write!(body, r#"<div class="error">{}</div>"#, escape_html(message));
        }
        PageState::Found(view) => render_view(&mut body, view),
    }

    let value = handle.map(escape_html).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Misinformation exposure</title>
    <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
    <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
    <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
    <style>
        body {{ font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }}
        .metrics {{ display: flex; gap: 1rem; }}
        .metric {{ flex: 1; border: 1px solid #ddd; border-radius: 6px; padding: 0.75rem; }}
        .metric .value {{ font-size: 1.8rem; }}
        .delta.up {{ color: #09ab3b; }}
        .delta.down {{ color: #ff4141; }}
        .warning {{ background: #fff6d6; padding: 0.75rem; border-radius: 6px; }}
        .error {{ background: #ffe0e0; padding: 0.75rem; border-radius: 6px; }}
        .chart {{ width: 100%; margin: 1.5rem 0; }}
        #loading {{ color: #666; margin: 1rem 0; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td, th {{ border-bottom: 1px solid #eee; padding: 0.3rem; text-align: left; }}
    </style>
</head>
<body>
    <h3>How much misinformation are you exposed to?</h3>
    <form method="get" action="/" onsubmit="document.getElementById('loading').hidden = false; document.getElementById('results').hidden = true;">
        <label for="handle">Enter your Twitter username or ID to find out.</label>
        <input id="handle" name="handle" type="text" value="{value}" autofocus>
        <button type="submit">Look up</button>
    </form>
    <div id="loading" role="status" hidden>{LOADING_MESSAGE}</div>
    <div id="results">
    {body}
    </div>
</body>
</html>
"#
    )
}

fn render_view(out: &mut String, view: &DashboardView) {
    let name = view.screen_name.as_deref().unwrap_or("unknown");
    let id = view.user_id.as_deref().unwrap_or("unknown");
    let _ = write!(
        out,
        "<p>You entered <strong>{}</strong> (ID: {}).</p>",
        escape_html(name),
        escape_html(id)
    );

    out.push_str(r#"<div class="metrics">"#);
    for card in [&view.exposure, &view.weighted_exposure, &view.partisanship] {
        render_metric(out, card);
    }
    out.push_str("</div>");

    let charts = [
        ("partisanship-chart", &view.charts.partisanship),
        ("exposure-chart", &view.charts.exposure_density),
    ];
    for (id, spec) in charts {
        if let Some(spec) = spec {
            // Inside <script>, only "</" needs breaking up
            let json = spec.to_string().replace("</", "<\\/");
            let _ = write!(
                out,
                r##"<div id="{id}" class="chart"></div><script>vegaEmbed("#{id}", {json}, {{actions: false}});</script>"##
            );
        }
    }

    match &view.following.placeholder {
        Some(placeholder) => {
            let _ = write!(out, "<p>{}</p>", escape_html(placeholder));
        }
        None => {
            if let Some(caption) = &view.following.caption {
                let _ = write!(out, "<p>{}</p>", escape_html(caption));
            }
            out.push_str("<table><thead><tr><th>#</th><th>Account</th><th>Falsity score</th></tr></thead><tbody>");
            for row in &view.following.rows {
                let score = row
                    .falsity_score
                    .map(|s| format!("{:.3}", s))
                    .unwrap_or_else(|| "–".to_string());
                let _ = write!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    row.ordinal,
                    escape_html(&row.handle),
                    score
                );
            }
            out.push_str("</tbody></table>");
        }
    }
}

fn render_metric(out: &mut String, card: &MetricCard) {
    let _ = write!(out, r#"<div class="metric"><div>{}</div>"#, escape_html(&card.label));
    match (card.value, &card.placeholder) {
        (Some(value), _) => {
            let _ = write!(out, r#"<div class="value">{:.3}</div>"#, value);
            if let (Some(delta), Some(label)) = (card.delta, &card.delta_label) {
                let class = if delta < 0.0 { "down" } else { "up" };
                let _ = write!(out, r#"<div class="delta {}">{}</div>"#, class, escape_html(label));
            }
        }
        (None, Some(placeholder)) => {
            let _ = write!(out, "<div>{}</div>", escape_html(placeholder));
        }
        (None, None) => {}
    }
    out.push_str("</div>");
}
