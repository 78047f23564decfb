use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

pub const DEFAULT_URL: &str =
    "https://www.marketscreener.com/quote/stock/UOL-GROUP-LIMITED-6491133/company-governance/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; scraping-example/1.0)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const BASE_BACKOFF_MS: u64 = 2000;

/// Request settings for a single page fetch. Defaults make exactly one attempt.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Extra attempts after the first, only for 429/5xx and transport errors.
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: 0,
            backoff: Duration::from_millis(BASE_BACKOFF_MS),
        }
    }
}

/// GET `url` and return the body text. Non-2xx responses are errors.
pub async fn fetch_page(url: &str, config: FetchConfig) -> Result<String> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    info!("Fetching {}", url);
    for attempt in 0..config.retries {
        match fetch_once(&client, url).await {
            Ok(body) => return Ok(body),
            Err(e) if is_retryable(&e) => {
                let backoff = config.backoff * 2u32.pow(attempt);
                warn!(
                    "Fetch of {} failed (attempt {}/{}): {}, backing off {:.1}s",
                    url,
                    attempt + 1,
                    config.retries + 1,
                    e,
                    backoff.as_secs_f64()
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to fetch {}", url)),
        }
    }

    fetch_once(&client, url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))
}

async fn fetch_once(client: &Client, url: &str) -> reqwest::Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    info!("Fetched {} ({} bytes)", url, body.len());
    Ok(body)
}

fn is_retryable(e: &reqwest::Error) -> bool {
    match e.status() {
        Some(status) => status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error(),
        None => e.is_timeout() || e.is_connect() || e.is_request(),
    }
}

/// Read a saved page from disk instead of fetching it.
pub fn read_page(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quick(retries: u32) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(2),
            retries,
            backoff: Duration::from_millis(10),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retries, 0);
    }

    #[tokio::test]
    async fn returns_body_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/governance"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h2>Board</h2>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/governance", server.uri());
        let body = fetch_page(&url, quick(0)).await.unwrap();
        assert_eq!(body, "<h2>Board</h2>");
    }

    #[tokio::test]
    async fn custom_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "board-bot/2.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let config = FetchConfig {
            user_agent: "board-bot/2.0".to_string(),
            ..quick(0)
        };
        assert_eq!(fetch_page(&server.uri(), config).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn not_found_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetch_page(&server.uri(), quick(3)).await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Failed to fetch"), "{}", msg);
        assert!(msg.contains("404"), "{}", msg);
    }

    #[tokio::test]
    async fn server_error_without_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        assert!(fetch_page(&server.uri(), quick(0)).await.is_err());
    }

    #[tokio::test]
    async fn server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetch_page(&server.uri(), quick(2)).await.unwrap();
        assert_eq!(body, "recovered");
    }

    #[tokio::test]
    async fn retries_run_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(3)
            .mount(&server)
            .await;

        let err = fetch_page(&server.uri(), quick(2)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("429"));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = FetchConfig {
            timeout: Duration::from_millis(50),
            ..quick(0)
        };
        assert!(fetch_page(&server.uri(), config).await.is_err());
    }

    #[test]
    fn read_missing_file() {
        let err = read_page(std::path::Path::new("tests/fixtures/missing.html")).unwrap_err();
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn read_fixture() {
        let html = read_page(std::path::Path::new("tests/fixtures/governance.html")).unwrap();
        assert!(html.contains("Composition of the Board"));
    }
}
