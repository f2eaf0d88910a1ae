//! Projection of a [`Snapshot`] onto a display surface.
//!
//! The pass validates the snapshot before touching the surface, so a failed
//! render never leaves a partial table behind.

pub mod html;
pub mod text;
pub mod theme;

use crate::domain::descriptor::{
    known_status, prettify, resolve_label, resolve_status_category, resolve_tooltip,
    signal_descriptor, Category,
};
use crate::domain::snapshot::Snapshot;
pub use crate::domain::error::RenderError;
use theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRow {
    pub index: usize,
    pub key: String,
    pub label: String,
    pub tooltip: String,
    pub status: String,
    pub status_text: String,
    pub category: Category,
    pub status_class: String,
    pub row_class: String,
    pub delay_ms: Option<u32>,
}

/// Somewhere to show a regime badge, a score, a date and a table body.
pub trait Surface {
    fn clear(&mut self);

    fn set_regime(&mut self, text: &str, class: &str);

    fn set_score(&mut self, text: &str);

    fn set_date(&mut self, text: &str);

    fn append_row(&mut self, row: &SignalRow);

    fn append_value(&mut self, _name: &str, _text: &str) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rows: usize,
    pub unknown_signals: usize,
    pub unknown_statuses: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn rows(&self, snapshot: &Snapshot) -> Result<Vec<SignalRow>, RenderError> {
        let entries = snapshot.signal_entries()?;
        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(index, (key, status))| self.row(index, key, status))
            .collect())
    }

    fn row(&self, index: usize, key: &str, status: &str) -> SignalRow {
        let category = resolve_status_category(status);
        SignalRow {
            index,
            key: key.to_string(),
            label: resolve_label(key).to_string(),
            tooltip: resolve_tooltip(key).to_string(),
            status: status.to_string(),
            status_text: prettify(status),
            category,
            status_class: self.theme.status_class(category),
            row_class: self.theme.row.clone(),
            delay_ms: self.theme.row_delay_ms(index),
        }
    }

    pub fn render<S: Surface + ?Sized>(
        &self,
        snapshot: &Snapshot,
        surface: &mut S,
    ) -> Result<RenderSummary, RenderError> {
        let rows = self.rows(snapshot)?;

        let regime_category = resolve_status_category(&snapshot.regime);
        surface.set_regime(
            &prettify(&snapshot.regime),
            &self.theme.regime_class(regime_category),
        );
        surface.set_score(&snapshot.score_text());
        surface.set_date(&snapshot.date);

        let mut summary = RenderSummary::default();
        for row in &rows {
            if signal_descriptor(&row.key).is_none() {
                summary.unknown_signals += 1;
                tracing::debug!(key = %row.key, "unknown signal key; using raw key as label");
            }
            if known_status(&row.status).is_none() {
                summary.unknown_statuses += 1;
                tracing::debug!(key = %row.key, status = %row.status, "unknown status; styling as neutral");
            }
            surface.append_row(row);
            summary.rows += 1;
        }

        for (name, text) in snapshot.value_entries() {
            surface.append_value(name, &text);
        }

        Ok(summary)
    }
}

/// Renders with the default (plain) theme.
pub fn render<S: Surface + ?Sized>(
    snapshot: &Snapshot,
    surface: &mut S,
) -> Result<RenderSummary, RenderError> {
    Renderer::default().render(snapshot, surface)
}
