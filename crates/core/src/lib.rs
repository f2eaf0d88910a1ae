pub mod domain;
pub mod render;
pub mod source;

pub mod config {
    use anyhow::Context;
    use std::str::FromStr;

    pub const DEFAULT_SNAPSHOT_PATH: &str = "data/latest.json";
    pub const DEFAULT_SNAPSHOT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_SNAPSHOT_MAX_AGE_DAYS: i64 = 3;
    pub const DEFAULT_THEME: &str = "plain";
    pub const DEFAULT_TITLE: &str = "Market Regime";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub snapshot_path: String,
        pub snapshot_url: Option<String>,
        pub snapshot_timeout_secs: u64,
        pub snapshot_max_age_days: i64,
        pub theme: String,
        pub theme_file: Option<String>,
        pub title: String,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
                snapshot_url: None,
                snapshot_timeout_secs: DEFAULT_SNAPSHOT_TIMEOUT_SECS,
                snapshot_max_age_days: DEFAULT_SNAPSHOT_MAX_AGE_DAYS,
                theme: DEFAULT_THEME.to_string(),
                theme_file: None,
                title: DEFAULT_TITLE.to_string(),
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let defaults = Self::default();
            Ok(Self {
                snapshot_path: non_empty_var("SNAPSHOT_PATH").unwrap_or(defaults.snapshot_path),
                snapshot_url: non_empty_var("SNAPSHOT_URL"),
                snapshot_timeout_secs: parse_or_default(
                    "SNAPSHOT_TIMEOUT_SECS",
                    non_empty_var("SNAPSHOT_TIMEOUT_SECS"),
                    defaults.snapshot_timeout_secs,
                ),
                snapshot_max_age_days: parse_or_default(
                    "SNAPSHOT_MAX_AGE_DAYS",
                    non_empty_var("SNAPSHOT_MAX_AGE_DAYS"),
                    defaults.snapshot_max_age_days,
                ),
                theme: non_empty_var("DASHBOARD_THEME").unwrap_or(defaults.theme),
                theme_file: non_empty_var("DASHBOARD_THEME_FILE"),
                title: non_empty_var("DASHBOARD_TITLE").unwrap_or(defaults.title),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_snapshot_url(&self) -> anyhow::Result<&str> {
            self.snapshot_url
                .as_deref()
                .context("SNAPSHOT_URL is required")
        }
    }

    fn non_empty_var(name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn parse_or_default<T>(name: &str, raw: Option<String>, default: T) -> T
    where
        T: FromStr + std::fmt::Display,
    {
        let Some(raw) = raw else {
            return default;
        };
        match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(var = name, value = %raw, %default, "unparseable config value; using default");
                default
            }
        }
    }

}
