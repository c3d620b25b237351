use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::models::NameRecord;

/// What a single lookup against the Backend API produced
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(NameRecord),
    NotFound,
    /// Backend answered with a status other than 200 or 404
    Failed(StatusCode),
    /// Backend answered 200 with a body that is not a name record
    InvalidResponse(String),
    /// Connection refused, DNS failure, timeout and the like
    Unreachable(String),
}

/// Thin HTTP client for `GET /api/v1/names/{name}` on the Backend API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: Url, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(BackendClient { http, base_url })
    }

    /// Uses a caller-built `reqwest::Client`, e.g. one with proxies disabled
    pub fn with_http_client(http: Client, base_url: Url) -> Self {
        BackendClient { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/v1/names/{name}` with `name` percent-encoded as one path segment.
    pub fn name_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Base URLs are validated as http(s) at startup, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "v1", "names", name]);
        }
        url
    }

    /// One request, no retry. Transport failures become `Unreachable`.
    pub async fn lookup(&self, name: &str) -> LookupOutcome {
        let url = self.name_url(name);
        debug!("Querying backend at {}", url);

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Backend request failed: {}", e);
                return LookupOutcome::Unreachable(e.to_string());
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<NameRecord>().await {
                Ok(record) => LookupOutcome::Found(record),
                Err(e) => {
                    warn!("Backend returned an unreadable name record: {}", e);
                    LookupOutcome::InvalidResponse(e.to_string())
                }
            },
            StatusCode::NOT_FOUND => LookupOutcome::NotFound,
            status => {
                warn!("Backend returned unexpected status {}", status);
                LookupOutcome::Failed(status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> BackendClient {
        BackendClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_name_url_plain_base() {
        let client = client_for("http://localhost:5000");
        assert_eq!(
            client.name_url("Noah").as_str(),
            "http://localhost:5000/api/v1/names/Noah"
        );
    }

    #[test]
    fn test_name_url_trailing_slash_and_prefix() {
        let client = client_for("http://backend:5000/");
        assert_eq!(
            client.name_url("Emma").as_str(),
            "http://backend:5000/api/v1/names/Emma"
        );

        let client = client_for("https://example.com/names-api/");
        assert_eq!(
            client.name_url("Liam").as_str(),
            "https://example.com/names-api/api/v1/names/Liam"
        );
    }

    #[test]
    fn test_name_url_encodes_segment() {
        let client = client_for("http://localhost:5000");
        let url = client.name_url("Mary Ann/Jo?");

        assert_eq!(url.path(), "/api/v1/names/Mary%20Ann%2FJo%3F");
        assert_eq!(url.query(), None);
    }
}
