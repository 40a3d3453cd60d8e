//! One-shot startup fetch of sample entries.

use crate::config::SeedConfig;
use crate::diary_entry::{DiaryEntry, Emotion};
use crate::id_allocator::IdAllocator;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("seed request timed out")]
    Timeout,

    #[error("seed request failed: {0}")]
    Request(reqwest::Error),

    #[error("seed endpoint answered {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode seed payload: {0}")]
    Decode(reqwest::Error),

    #[error("seed task ended without a result")]
    Abandoned,
}

/// One record of the remote sample feed. Only the fields mapped onto an entry
/// are read; anything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedRecord {
    pub email: String,
    pub body: String,
}

pub struct SeedClient {
    client: Client,
    url: String,
    limit: usize,
}

impl SeedClient {
    pub fn new(config: &SeedConfig) -> Result<Self, SeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SeedError::Client)?;

        Ok(SeedClient {
            client,
            url: config.url.clone(),
            limit: config.limit,
        })
    }

    /// Fetches the feed and keeps the first `limit` records.
    pub async fn fetch(&self) -> Result<Vec<SeedRecord>, SeedError> {
        tracing::info!(url = %self.url, "fetching seed entries");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SeedError::Timeout
            } else {
                SeedError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status));
        }

        let mut records: Vec<SeedRecord> = response.json().await.map_err(SeedError::Decode)?;
        records.truncate(self.limit);
        Ok(records)
    }

    /// Runs [`SeedClient::fetch`] on the runtime and hands back the single
    /// result through the returned receiver.
    pub fn spawn(self) -> oneshot::Receiver<Result<Vec<SeedRecord>, SeedError>> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = self.fetch().await;
            if tx.send(result).is_err() {
                tracing::debug!("seed result arrived after the journal closed");
            }
        });
        rx
    }
}

/// Maps feed records onto entries: author from `email`, content from `body`,
/// a random mood, and ids from the shared allocator.
pub fn into_entries<R: Rng>(
    records: Vec<SeedRecord>,
    ids: &mut IdAllocator,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<DiaryEntry> {
    records
        .into_iter()
        .map(|record| {
            let mood = Emotion::try_from(rng.gen_range(Emotion::MIN.value()..=Emotion::MAX.value()))
                .unwrap_or_default();
            DiaryEntry::new(ids.next(), record.email, record.body, mood, now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn records(n: usize) -> Vec<SeedRecord> {
        (0..n)
            .map(|i| SeedRecord {
                email: format!("user{i}@example.com"),
                body: format!("comment body number {i}"),
            })
            .collect()
    }

    fn config(url: String, limit: usize) -> SeedConfig {
        SeedConfig {
            enabled: true,
            url,
            limit,
            timeout_secs: 5,
        }
    }

    /// Answers exactly one HTTP request with the given status line and body.
    async fn serve_once(status: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut seen = Vec::new();
            while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/comments")
    }

    #[test]
    fn test_record_ignores_extra_fields() {
        let json = r#"[{"postId":1,"id":1,"name":"id labore","email":"Eliseo@gardner.biz","body":"laudantium enim"}]"#;
        let parsed: Vec<SeedRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].email, "Eliseo@gardner.biz");
        assert_eq!(parsed[0].body, "laudantium enim");
    }

    #[test]
    fn test_into_entries_maps_fields_and_shares_ids() {
        let mut ids = IdAllocator::new();
        ids.next();
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let entries = into_entries(records(30), &mut ids, &mut rng, now);

        assert_eq!(entries.len(), 30);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[29].id, 30);
        assert_eq!(ids.peek(), 31);
        assert_eq!(entries[3].author, "user3@example.com");
        assert_eq!(entries[3].content, "comment body number 3");
        assert!(entries.iter().all(|e| e.created_date == now));
        assert!(entries
            .iter()
            .all(|e| (1..=5).contains(&e.emotion.value())));
    }

    #[tokio::test]
    async fn test_fetch_truncates_to_limit() {
        let body = serde_json::to_string(
            &(0..25)
                .map(|i| serde_json::json!({ "id": i, "email": format!("e{i}@x.io"), "body": "some body text" }))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let url = serve_once("200 OK", body).await;

        let client = SeedClient::new(&config(url, 20)).unwrap();
        let fetched = client.fetch().await.unwrap();
        assert_eq!(fetched.len(), 20);
        assert_eq!(fetched[0].email, "e0@x.io");
        assert_eq!(fetched[19].email, "e19@x.io");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let url = serve_once("500 Internal Server Error", "oops".to_string()).await;
        let client = SeedClient::new(&config(url, 20)).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, SeedError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_bad_payload_is_a_decode_error() {
        let url = serve_once("200 OK", r#"{"not":"an array"}"#.to_string()).await;
        let client = SeedClient::new(&config(url, 20)).unwrap();
        assert!(matches!(client.fetch().await, Err(SeedError::Decode(_))));
    }

    #[tokio::test]
    async fn test_spawned_fetch_reports_unreachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SeedClient::new(&config(format!("http://{addr}/comments"), 20)).unwrap();
        let result = client.spawn().await.unwrap();
        assert!(matches!(result, Err(SeedError::Request(_))));
    }
}
