//! Fetching raw day payloads from the Wikimedia "onthisday" feed.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::date_nav::DayKey;
use crate::error::{HistoryError, HistoryResult};
use crate::normalize::RawDay;

const USER_AGENT: &str = concat!(
    "history-today/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/history-today/history-today)"
);

/// Anything that can produce the raw payload for a calendar day.
pub trait DaySource {
    fn fetch_day(&self, key: DayKey) -> impl Future<Output = HistoryResult<RawDay>> + Send;
}

/// HTTP client for `{base}/{language}/onthisday/all/{MM}/{DD}`.
#[derive(Debug, Clone)]
pub struct WikimediaClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl WikimediaClient {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> HistoryResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| HistoryError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(WikimediaClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn day_url(&self, key: DayKey) -> String {
        format!(
            "{}/{}/onthisday/all/{}",
            self.base_url,
            self.language,
            key.path()
        )
    }
}

impl DaySource for WikimediaClient {
    async fn fetch_day(&self, key: DayKey) -> HistoryResult<RawDay> {
        let url = self.day_url(key);
        debug!(%url, "fetching day");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(HistoryError::unavailable)?;

        if !response.status().is_success() {
            return Err(HistoryError::unavailable(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(HistoryError::unavailable)?;
        serde_json::from_slice(&body)
            .map_err(|e| HistoryError::unavailable(format!("Malformed payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_url_is_zero_padded_and_year_free() {
        let client =
            WikimediaClient::new("https://api.example.org/feed/", "en", Duration::from_secs(5))
                .unwrap();
        let key = DayKey::new(3, 1).unwrap();
        assert_eq!(
            client.day_url(key),
            "https://api.example.org/feed/en/onthisday/all/03/01"
        );
    }
}
