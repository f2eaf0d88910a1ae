use super::{SignalRow, Surface};
use crate::domain::descriptor::Category;

/// Terminal rendition of the dashboard. Classes are ignored; the category is
/// shown as a marker next to the status.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    regime: String,
    score: String,
    date: String,
    rows: Vec<(String, String, Category)>,
    values: Vec<(String, String)>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Regime: {}  Score: {}  Date: {}\n",
            self.regime, self.score, self.date
        );

        let width = self
            .rows
            .iter()
            .map(|(label, _, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            .max("Signal".len());

        out.push('\n');
        out.push_str(&format!("{:<width$}  Status\n", "Signal"));
        out.push_str(&format!("{}  {}\n", "-".repeat(width), "-".repeat(6)));
        for (label, status, category) in &self.rows {
            out.push_str(&format!(
                "{label:<width$}  {} {status}\n",
                marker(*category)
            ));
        }

        if !self.values.is_empty() {
            out.push('\n');
            for (name, text) in &self.values {
                out.push_str(&format!("{name}: {text}\n"));
            }
        }
        out
    }
}

fn marker(category: Category) -> char {
    match category {
        Category::Positive => '+',
        Category::Negative => '-',
        Category::Neutral => '~',
    }
}

impl Surface for TextSurface {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_regime(&mut self, text: &str, _class: &str) {
        self.regime = text.to_string();
    }

    fn set_score(&mut self, text: &str) {
        self.score = text.to_string();
    }

    fn set_date(&mut self, text: &str) {
        self.date = text.to_string();
    }

    fn append_row(&mut self, row: &SignalRow) {
        self.rows
            .push((row.label.clone(), row.status_text.clone(), row.category));
    }

    fn append_value(&mut self, name: &str, text: &str) {
        self.values.push((name.to_string(), text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::Snapshot;
    use crate::render::render;
    use serde_json::json;

    #[test]
    fn aligned_table_with_markers() {
        let s: Snapshot = serde_json::from_value(json!({
            "regime": "risk-on", "score": 4, "date": "2024-01-01",
            "signals": {"nhnl": "bullish", "yield_curve": "inverted", "x": "sideways"}
        }))
        .unwrap();
        let mut surface = TextSurface::new();
        render(&s, &mut surface).unwrap();

        let expected = "\
Regime: Risk On  Score: 4  Date: 2024-01-01

Signal           Status
---------------  ------
Breadth (NH/NL)  + Bullish
Yield Curve      - Inverted
x                ~ Sideways
";
        assert_eq!(surface.to_text(), expected);
    }

    #[test]
    fn empty_table_still_has_header() {
        let s: Snapshot = serde_json::from_value(json!({
            "regime": "neutral", "score": 2, "date": "d", "signals": {}
        }))
        .unwrap();
        let mut surface = TextSurface::new();
        render(&s, &mut surface).unwrap();
        assert!(surface.to_text().contains("Signal  Status"));
    }
}
