use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::model::Record;
use crate::parser;
use crate::settings::Settings;

/// Rows kept when the full table is not requested.
pub const TOP_N: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(
        "{} {}: {} for url: {url}",
        .status.as_u16(),
        status_kind(*.status),
        .status.canonical_reason().unwrap_or("Unknown")
    )]
    Status { status: StatusCode, url: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn status_kind(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "Server Error"
    } else {
        "Client Error"
    }
}

pub type RequestResult = Result<Vec<Record>, FetchError>;

/// Fetch → extract → truncate. Built once at startup and shared by handlers.
pub struct LeagueService {
    client: Client,
    league_url: String,
}

impl LeagueService {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &settings.league_url))
    }

    pub fn with_client(client: Client, league_url: &str) -> Self {
        Self {
            client,
            league_url: league_url.to_string(),
        }
    }

    pub fn league_url(&self) -> &str {
        &self.league_url
    }

    /// Run against the configured league page.
    pub async fn league(&self, full: bool) -> RequestResult {
        self.fetch_and_extract(&self.league_url, full).await
    }

    pub async fn fetch_and_extract(&self, url: &str, full: bool) -> RequestResult {
        let html = self.fetch_page(url).await?;
        let mut records = parser::extract(&html);
        if !full {
            records.truncate(TOP_N);
        }
        Ok(records)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching league page: {}", url);
        let start = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        // Redirects are followed by the client; only 4xx/5xx are failures
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        let body = response.text().await?;

        debug!(
            "Fetched {} bytes in {}ms",
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, league_page, spawn_upstream};
    use axum::http::{header, HeaderMap};
    use axum::routing::get;
    use axum::Router;

    fn service(timeout: Duration) -> LeagueService {
        let client = Client::builder().timeout(timeout).build().unwrap();
        LeagueService::with_client(client, "http://unused.invalid/")
    }

    async fn page_upstream(html: String) -> String {
        let app = Router::new().route("/league", get(move || async move { html }));
        format!("{}/league", spawn_upstream(app).await)
    }

    #[tokio::test]
    async fn top_ten_is_prefix_in_order() {
        let url = page_upstream(league_page(15)).await;
        let records = service(Duration::from_secs(5))
            .fetch_and_extract(&url, false)
            .await
            .unwrap();
        assert_eq!(records.len(), TOP_N);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.name, format!("Team {}(Manager {})", i + 1, i + 1));
        }
    }

    #[tokio::test]
    async fn full_table_keeps_everything() {
        let url = page_upstream(fixture("league.html")).await;
        let records = service(Duration::from_secs(5))
            .fetch_and_extract(&url, true)
            .await
            .unwrap();
        assert_eq!(records.len(), 15);
    }

    #[tokio::test]
    async fn short_table_not_padded() {
        let url = page_upstream(league_page(4)).await;
        let records = service(Duration::from_secs(5))
            .fetch_and_extract(&url, false)
            .await
            .unwrap();
        assert_eq!(records.len(), 4);
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let app = Router::new().route(
            "/league",
            get(|| async { (axum::http::StatusCode::NOT_FOUND, "gone") }),
        );
        let url = format!("{}/league", spawn_upstream(app).await);
        let err = service(Duration::from_secs(5))
            .fetch_and_extract(&url, true)
            .await
            .unwrap_err();
        assert!(matches!(&err, FetchError::Status { status, .. } if *status == StatusCode::NOT_FOUND));
        assert_eq!(
            err.to_string(),
            format!("404 Client Error: Not Found for url: {}", url)
        );
    }

    #[tokio::test]
    async fn server_error_message_names_category() {
        let app = Router::new().route(
            "/league",
            get(|| async { (axum::http::StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let url = format!("{}/league", spawn_upstream(app).await);
        let err = service(Duration::from_secs(5))
            .fetch_and_extract(&url, true)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("502 Server Error: Bad Gateway for url: {}", url)
        );
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let app = Router::new().route(
            "/league",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                league_page(1)
            }),
        );
        let url = format!("{}/league", spawn_upstream(app).await);
        let err = service(Duration::from_millis(200))
            .fetch_and_extract(&url, true)
            .await
            .unwrap_err();
        assert!(matches!(&err, FetchError::Http(e) if e.is_timeout()));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_error() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(Duration::from_secs(5))
            .fetch_and_extract(&format!("http://{}/league", addr), true)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }

    #[tokio::test]
    async fn sends_browser_user_agent() {
        let app = Router::new().route(
            "/league",
            get(|headers: HeaderMap| async move {
                let ua = headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                format!(
                    r#"<details class="row"><div class="captain">{}</div></details>"#,
                    ua
                )
            }),
        );
        let base = spawn_upstream(app).await;
        let settings = Settings {
            league_url: format!("{}/league", base),
            host: "127.0.0.1".into(),
            port: 0,
            timeout_secs: 5,
            user_agent: crate::settings::DEFAULT_USER_AGENT.into(),
        };
        let svc = LeagueService::new(&settings).unwrap();
        assert_eq!(svc.league_url(), settings.league_url);
        let records = svc.league(true).await.unwrap();
        assert_eq!(records[0].captain, crate::settings::DEFAULT_USER_AGENT);
    }
}
