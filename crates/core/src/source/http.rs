use super::SnapshotSource;
use crate::config::Settings;
use crate::domain::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::time::Duration;

/// Single GET per fetch; timeouts come from the client, retries are not attempted.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    http: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.require_snapshot_url()?.to_string();
        Self::new(url, Duration::from_secs(settings.snapshot_timeout_secs))
    }

    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build snapshot http client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HttpSnapshotSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("snapshot request failed: {}", self.url))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read snapshot response")?;

        if !status.is_success() {
            anyhow::bail!("snapshot HTTP {status} from {}: {text}", self.url);
        }

        Snapshot::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const FIXTURE: &str = r#"{"regime":"risk-off","score":-1,"date":"2024-01-01","signals":{"yield_curve":"inverted","credit":"bearish","nhnl":"neutral"}}"#;

    /// Serves `status_line` + `body` to every connection and counts connections.
    async fn canned_server(status_line: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);

                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{addr}/data/latest.json"), hits)
    }

    #[test]
    fn requires_a_url() {
        assert!(HttpSnapshotSource::from_settings(&Settings::default()).is_err());
    }

    #[tokio::test]
    async fn parses_a_successful_response_in_document_order() {
        let (url, hits) = canned_server("200 OK", FIXTURE).await;
        let source = HttpSnapshotSource::new(url, Duration::from_secs(5)).unwrap();

        let snapshot = source.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.regime, "risk-off");
        assert_eq!(snapshot.score_text(), "-1");
        assert_eq!(
            snapshot.signal_entries().unwrap(),
            vec![("yield_curve", "inverted"), ("credit", "bearish"), ("nhnl", "neutral")]
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn server_error_fails_after_a_single_attempt() {
        let (url, hits) = canned_server("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let source = HttpSnapshotSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch_snapshot().await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("500"), "{msg}");
        assert!(msg.contains("boom"), "{msg}");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_is_an_error() {
        let (url, hits) = canned_server("404 Not Found", "{}").await;
        let source = HttpSnapshotSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(err.to_string().contains("404"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unparseable_body_is_an_error() {
        let (url, _) = canned_server("200 OK", "<html>not json</html>").await;
        let source = HttpSnapshotSource::new(url, Duration::from_secs(5)).unwrap();
        assert!(source.fetch_snapshot().await.is_err());
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        // Bind then drop so the port is known to be closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpSnapshotSource::new(format!("http://{addr}/data/latest.json"), Duration::from_secs(2))
                .unwrap();
        assert!(source.fetch_snapshot().await.is_err());
    }
}
