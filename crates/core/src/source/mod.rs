pub mod file;
pub mod http;

use crate::config::Settings;
use crate::domain::snapshot::Snapshot;
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

pub use file::FileSnapshotSource;
pub use http::HttpSnapshotSource;

#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_snapshot(&self) -> Result<Snapshot>;
}

/// HTTP when `SNAPSHOT_URL` is set, otherwise the file at `SNAPSHOT_PATH`.
pub fn from_settings(settings: &Settings) -> Result<Arc<dyn SnapshotSource>> {
    if settings.snapshot_url.is_some() {
        return Ok(Arc::new(HttpSnapshotSource::from_settings(settings)?));
    }
    Ok(Arc::new(FileSnapshotSource::from_settings(settings)))
}

/// Logs a warning when the snapshot date is older than `max_age_days`.
/// Returns the age when the date could be parsed.
pub fn check_staleness(snapshot: &Snapshot, today: NaiveDate, max_age_days: i64) -> Option<i64> {
    let age = snapshot.staleness_days(today);
    match age {
        Some(days) if days > max_age_days => {
            tracing::warn!(
                date = %snapshot.date,
                age_days = days,
                max_age_days,
                "snapshot is stale"
            );
        }
        Some(_) => {}
        None => {
            tracing::debug!(date = %snapshot.date, "snapshot date is not YYYY-MM-DD; skipping staleness check");
        }
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_selects_http_source() {
        let settings = Settings {
            snapshot_url: Some("http://localhost:9/data/latest.json".to_string()),
            ..Settings::default()
        };
        assert_eq!(from_settings(&settings).unwrap().source_name(), "http");
        assert_eq!(
            from_settings(&Settings::default()).unwrap().source_name(),
            "file"
        );
    }

    #[test]
    fn staleness_is_reported_but_never_fatal() {
        let s: Snapshot = serde_json::from_value(json!({
            "regime": "neutral", "score": 0, "date": "2024-01-01", "signals": {}
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(check_staleness(&s, today, 3), Some(9));
    }
}
