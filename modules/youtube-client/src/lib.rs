pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{SearchItem, SearchResponse, Snippet, VideoHit, VideoId};

use std::time::Duration;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Build an inline-playable embed URL from a video id.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Search for embeddable videos, ordered by relevance.
    pub async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("videoEmbeddable", "true"),
                ("order", "relevance"),
                ("maxResults", &max_results.to_string()),
                ("q", query),
                ("key", &self.api_key),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = resp.json().await?;
        let hits: Vec<VideoHit> = search
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let title = item.snippet.map(|s| s.title).unwrap_or_default();
                Some(VideoHit { video_id, title })
            })
            .collect();

        tracing::debug!(query, count = hits.len(), "YouTube search results");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_search_response_skips_idless_items() {
        let raw = r#"{
            "items": [
                {"id": {"videoId": "abc123"}, "snippet": {"title": "Goals", "channelTitle": "c"}},
                {"id": {}, "snippet": {"title": "Channel hit", "channelTitle": "c"}}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let ids: Vec<_> = parsed
            .items
            .into_iter()
            .filter_map(|i| i.id.video_id)
            .collect();
        assert_eq!(ids, vec!["abc123"]);
    }
}
