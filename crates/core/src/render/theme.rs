use crate::config::Settings;
use crate::domain::descriptor::Category;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;

pub const BUILTIN_THEMES: [&str; 3] = ["plain", "utility", "bare"];

const PLAIN_HEAD: &str = r#"<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f172a; color: #e2e8f0; margin: 0; padding: 32px; }
.container { max-width: 760px; margin: 0 auto; }
header { display: flex; align-items: baseline; gap: 16px; margin-bottom: 24px; }
.regime { font-size: 1.6em; font-weight: 700; padding: 4px 14px; border-radius: 999px; }
.meta { color: #94a3b8; }
table { width: 100%; border-collapse: collapse; }
td { padding: 10px 12px; border-bottom: 1px solid #1e293b; }
td[title] { cursor: help; }
.status { padding: 2px 10px; border-radius: 6px; font-size: 0.9em; }
.regime--positive, .status--positive { background: rgba(16, 185, 129, 0.15); color: #34d399; }
.regime--negative, .status--negative { background: rgba(244, 63, 94, 0.15); color: #fb7185; }
.regime--neutral, .status--neutral { background: rgba(148, 163, 184, 0.15); color: #cbd5e1; }
.row { opacity: 0; animation: fade-in 0.4s ease forwards; }
@keyframes fade-in { from { opacity: 0; transform: translateY(4px); } to { opacity: 1; transform: none; } }
.values { margin-top: 24px; color: #94a3b8; }
</style>"#;

const UTILITY_HEAD: &str = r#"<script src="https://cdn.tailwindcss.com"></script>
<style>
.row { opacity: 0; animation: fade-in 0.4s ease forwards; }
@keyframes fade-in { from { opacity: 0; } to { opacity: 1; } }
</style>"#;

/// Maps status categories to visual classes, plus the row-level styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub positive: String,
    pub negative: String,
    pub neutral: String,
    /// Base class of the regime badge; the category class is appended.
    pub regime: String,
    /// Base class of each status pill; the category class is appended.
    pub status: String,
    pub row: String,
    /// Adds a `{base}--{category}` modifier next to the regime and status base classes.
    pub modifiers: bool,
    /// Per-row animation delay step. Zero disables the delay attribute.
    pub stagger_ms: u32,
    /// Markup injected into `<head>` of a standalone page.
    pub head: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeOverrides {
    pub positive: Option<String>,
    pub negative: Option<String>,
    pub neutral: Option<String>,
    pub regime: Option<String>,
    pub status: Option<String>,
    pub row: Option<String>,
    pub modifiers: Option<bool>,
    pub stagger_ms: Option<u32>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            positive: String::new(),
            negative: String::new(),
            neutral: String::new(),
            regime: "regime".to_string(),
            status: "status".to_string(),
            row: "row".to_string(),
            modifiers: true,
            stagger_ms: 60,
            head: PLAIN_HEAD.to_string(),
        }
    }

    pub fn utility() -> Self {
        Self {
            name: "utility".to_string(),
            positive: "bg-emerald-500/15 text-emerald-400".to_string(),
            negative: "bg-rose-500/15 text-rose-400".to_string(),
            neutral: "bg-slate-500/15 text-slate-300".to_string(),
            regime: "inline-flex rounded-full px-4 py-1 text-2xl font-bold".to_string(),
            status: "inline-flex rounded-md px-2 py-0.5 text-sm font-medium".to_string(),
            row: "row border-b border-slate-800 hover:bg-slate-900/60".to_string(),
            modifiers: false,
            stagger_ms: 60,
            head: UTILITY_HEAD.to_string(),
        }
    }

    pub fn bare() -> Self {
        Self {
            name: "bare".to_string(),
            positive: String::new(),
            negative: String::new(),
            neutral: String::new(),
            regime: String::new(),
            status: String::new(),
            row: String::new(),
            modifiers: false,
            stagger_ms: 0,
            head: String::new(),
        }
    }

    pub fn builtin(name: &str) -> anyhow::Result<Self> {
        match name.trim() {
            "plain" => Ok(Self::plain()),
            "utility" => Ok(Self::utility()),
            "bare" => Ok(Self::bare()),
            other => bail!(
                "unknown theme `{other}` (expected one of: {})",
                BUILTIN_THEMES.join(", ")
            ),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let theme = Self::builtin(&settings.theme)?;
        match settings.theme_file.as_deref() {
            Some(path) => theme.with_overrides_file(Path::new(path)),
            None => Ok(theme),
        }
    }

    pub fn with_overrides_file(self, path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        let overrides = serde_json::from_str::<ThemeOverrides>(&text)
            .with_context(|| format!("theme file {} is not a valid theme", path.display()))?;
        Ok(self.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ThemeOverrides) -> Self {
        let ThemeOverrides {
            positive,
            negative,
            neutral,
            regime,
            status,
            row,
            modifiers,
            stagger_ms,
        } = overrides;

        if let Some(v) = positive {
            self.positive = v;
        }
        if let Some(v) = negative {
            self.negative = v;
        }
        if let Some(v) = neutral {
            self.neutral = v;
        }
        if let Some(v) = regime {
            self.regime = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = row {
            self.row = v;
        }
        if let Some(v) = modifiers {
            self.modifiers = v;
        }
        if let Some(v) = stagger_ms {
            self.stagger_ms = v;
        }
        self
    }

    pub fn class_for(&self, category: Category) -> &str {
        match category {
            Category::Positive => &self.positive,
            Category::Negative => &self.negative,
            Category::Neutral => &self.neutral,
        }
    }

    pub fn regime_class(&self, category: Category) -> String {
        self.styled(&self.regime, category)
    }

    pub fn status_class(&self, category: Category) -> String {
        self.styled(&self.status, category)
    }

    fn styled(&self, base: &str, category: Category) -> String {
        let base = base.trim();
        if self.modifiers && !base.is_empty() {
            let with_modifier = format!("{base} {base}--{category}");
            return join_classes(&with_modifier, self.class_for(category));
        }
        join_classes(base, self.class_for(category))
    }

    pub fn row_delay_ms(&self, index: usize) -> Option<u32> {
        if self.stagger_ms == 0 {
            return None;
        }
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Some(index.saturating_mul(self.stagger_ms))
    }
}

fn join_classes(base: &str, extra: &str) -> String {
    let base = base.trim();
    let extra = extra.trim();
    match (base.is_empty(), extra.is_empty()) {
        (true, _) => extra.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base} {extra}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_names_resolve() {
        for name in BUILTIN_THEMES {
            assert_eq!(Theme::builtin(name).unwrap().name, name);
        }
        assert!(Theme::builtin("neon").is_err());
    }

    #[test]
    fn plain_theme_classes() {
        let theme = Theme::plain();
        assert_eq!(theme.status_class(Category::Positive), "status status--positive");
        assert_eq!(theme.regime_class(Category::Negative), "regime regime--negative");
        assert_eq!(theme.status_class(Category::Neutral), "status status--neutral");
        assert_eq!(theme.row_delay_ms(0), Some(0));
        assert_eq!(theme.row_delay_ms(3), Some(180));
    }

    #[test]
    fn utility_theme_uses_category_classes_without_modifiers() {
        let theme = Theme::utility();
        let class = theme.status_class(Category::Negative);
        assert!(class.ends_with("bg-rose-500/15 text-rose-400"));
        assert!(!class.contains("--negative"));
    }

    #[test]
    fn modifiers_can_be_switched_off_by_overrides() {
        let overrides: ThemeOverrides =
            serde_json::from_str(r#"{"modifiers": false, "positive": "up"}"#).unwrap();
        let theme = Theme::plain().with_overrides(overrides);
        assert_eq!(theme.status_class(Category::Positive), "status up");
    }

    #[test]
    fn bare_theme_has_no_classes_or_delay() {
        let theme = Theme::bare();
        assert_eq!(theme.status_class(Category::Neutral), "");
        assert_eq!(theme.row_delay_ms(5), None);
    }

    #[test]
    fn partial_overrides_keep_the_base_theme() {
        let overrides: ThemeOverrides =
            serde_json::from_str(r#"{"positive": "text-green-600"}"#).unwrap();
        let theme = Theme::plain().with_overrides(overrides);
        assert_eq!(theme.positive, "text-green-600");
        assert_eq!(theme.negative, "");
        assert_eq!(theme.stagger_ms, 60);
        assert_eq!(
            theme.status_class(Category::Positive),
            "status status--positive text-green-600"
        );
        assert_eq!(theme.status_class(Category::Negative), "status status--negative");
    }

    #[test]
    fn unknown_override_keys_are_rejected() {
        let res = serde_json::from_str::<ThemeOverrides>(r#"{"bullish": "x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn settings_apply_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"neutral": "muted", "stagger_ms": 0}}"#).unwrap();

        let settings = Settings {
            theme: "utility".to_string(),
            theme_file: Some(file.path().display().to_string()),
            ..Settings::default()
        };
        let theme = Theme::from_settings(&settings).unwrap();
        assert_eq!(theme.name, "utility");
        assert_eq!(theme.neutral, "muted");
        assert_eq!(theme.row_delay_ms(2), None);
        assert_eq!(theme.positive, Theme::utility().positive);
    }

    #[test]
    fn missing_theme_file_is_an_error() {
        let settings = Settings {
            theme_file: Some("/definitely/not/here.json".to_string()),
            ..Settings::default()
        };
        assert!(Theme::from_settings(&settings).is_err());
    }
}
