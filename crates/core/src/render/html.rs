//! HTML surface: fills the `regime` / `score` / `date` slots and the
//! `#table tbody` of the dashboard skeleton.

use super::theme::Theme;
use super::{SignalRow, Surface};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSurface {
    regime: Option<(String, String)>,
    score: Option<String>,
    date: Option<String>,
    rows: Vec<String>,
    values: Vec<(String, String)>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regime_text(&self) -> Option<&str> {
        self.regime.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn score_text(&self) -> Option<&str> {
        self.score.as_deref()
    }

    pub fn date_text(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows only, as they go inside `<tbody>`.
    pub fn tbody_html(&self) -> String {
        self.rows.concat()
    }

    pub fn to_page(&self, title: &str, theme: &Theme) -> String {
        let (regime_text, regime_class) = self
            .regime
            .as_ref()
            .map(|(t, c)| (t.as_str(), c.as_str()))
            .unwrap_or(("", ""));

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
{head}
</head>
<body>
<div class="container">
<header>
<h1 id="regime"{regime_class}>{regime_text}</h1>
<span class="meta">Score <span id="score">{score}</span></span>
<span class="meta">As of <span id="date">{date}</span></span>
</header>
<table id="table">
<thead><tr><th>Signal</th><th>Status</th></tr></thead>
<tbody>{rows}</tbody>
</table>
{values}</div>
</body>
</html>
"#,
            title = html_escape(title),
            head = theme.head,
            regime_class = class_attr(regime_class),
            regime_text = html_escape(regime_text),
            score = html_escape(self.score.as_deref().unwrap_or("")),
            date = html_escape(self.date.as_deref().unwrap_or("")),
            rows = self.tbody_html(),
            values = self.values_html(),
        )
    }

    fn values_html(&self) -> String {
        if self.values.is_empty() {
            return String::new();
        }
        let items: String = self
            .values
            .iter()
            .map(|(name, text)| {
                format!(
                    "<li><span class=\"value-name\">{}</span> {}</li>",
                    html_escape(name),
                    html_escape(text)
                )
            })
            .collect();
        format!("<section class=\"values\"><h2>Indicator levels</h2><ul>{items}</ul></section>\n")
    }
}

impl Surface for HtmlSurface {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_regime(&mut self, text: &str, class: &str) {
        self.regime = Some((text.to_string(), class.to_string()));
    }

    fn set_score(&mut self, text: &str) {
        self.score = Some(text.to_string());
    }

    fn set_date(&mut self, text: &str) {
        self.date = Some(text.to_string());
    }

    fn append_row(&mut self, row: &SignalRow) {
        let style = row
            .delay_ms
            .map(|ms| format!(" style=\"animation-delay: {ms}ms\""))
            .unwrap_or_default();

        self.rows.push(format!(
            "<tr{class}{style}><td title=\"{tooltip}\">{label}</td><td><span{status_class}>{status}</span></td></tr>",
            class = class_attr(&row.row_class),
            tooltip = html_escape(&row.tooltip),
            label = html_escape(&row.label),
            status_class = class_attr(&row.status_class),
            status = html_escape(&row.status_text),
        ));
    }

    fn append_value(&mut self, name: &str, text: &str) {
        self.values.push((name.to_string(), text.to_string()));
    }
}

fn class_attr(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", html_escape(class))
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
