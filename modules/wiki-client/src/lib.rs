pub mod error;
pub mod types;

pub use error::{Result, WikiError};
pub use types::{ContentUrls, PageSummary, PageUrl, Thumbnail};

use std::time::Duration;

const BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1";
const USER_AGENT: &str = "FutbolAI/0.1 (knowledge lookup)";

/// Timeout for the primary summary fetch.
const SUMMARY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shorter timeout for slug probing, where several candidates may be tried
/// in sequence.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct WikiClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch the summary for an article slug.
    pub async fn summary(&self, slug: &str) -> Result<PageSummary> {
        self.fetch(slug, SUMMARY_TIMEOUT).await
    }

    /// Probe a candidate slug: `Ok(Some)` only for a populated summary,
    /// `Ok(None)` when the article is missing or empty.
    pub async fn probe(&self, slug: &str) -> Result<Option<PageSummary>> {
        match self.fetch_with_status(slug, PROBE_TIMEOUT).await? {
            Some(summary) if summary.is_populated() => Ok(Some(summary)),
            _ => Ok(None),
        }
    }

    async fn fetch(&self, slug: &str, timeout: Duration) -> Result<PageSummary> {
        let url = format!("{}/page/summary/{}", self.base_url, slug);
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .timeout(timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let summary: PageSummary = resp.json().await?;
        tracing::debug!(slug, title = %summary.title, "Fetched article summary");
        Ok(summary)
    }

    /// Like `fetch`, but maps 404 to `Ok(None)` so probing loops do not
    /// treat a missing candidate as a hard failure.
    async fn fetch_with_status(
        &self,
        slug: &str,
        timeout: Duration,
    ) -> Result<Option<PageSummary>> {
        let url = format!("{}/page/summary/{}", self.base_url, slug);
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .timeout(timeout)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(Some(resp.json().await?))
    }
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_requires_extract() {
        let summary: PageSummary = serde_json::from_str(
            r#"{"title": "Real Madrid CF", "extract": "Spanish club."}"#,
        )
        .unwrap();
        assert!(summary.is_populated());

        let empty: PageSummary =
            serde_json::from_str(r#"{"title": "Nothing", "extract": "  "}"#).unwrap();
        assert!(!empty.is_populated());
    }

    #[test]
    fn test_optional_fields_deserialize() {
        let summary: PageSummary = serde_json::from_str(
            r#"{
                "title": "Lionel Messi",
                "extract": "Argentine footballer.",
                "type": "standard",
                "thumbnail": {"source": "https://upload.wikimedia.org/messi.jpg"},
                "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Lionel_Messi"}}
            }"#,
        )
        .unwrap();
        assert_eq!(
            summary.thumbnail_url(),
            Some("https://upload.wikimedia.org/messi.jpg")
        );
        assert_eq!(
            summary.canonical_url(),
            Some("https://en.wikipedia.org/wiki/Lionel_Messi")
        );
        assert_eq!(summary.page_type.as_deref(), Some("standard"));
    }
}
