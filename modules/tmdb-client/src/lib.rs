pub mod error;
pub mod types;

pub use error::{Result, TmdbError};
pub use types::{Genre, MovieDetail, MovieSummary, SearchPage, Video, VideoList};

use std::time::Duration;

const BASE_URL: &str = "https://api.themoviedb.org/3";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
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

    /// Title search, first page.
    pub async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let url = format!("{}/search/movie", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TmdbError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: SearchPage = resp.json().await?;
        tracing::debug!(query, count = page.results.len(), "TMDB search results");
        Ok(page.results)
    }

    /// Full detail for one movie, with trailers appended.
    pub async fn movie_detail(&self, id: i64) -> Result<MovieDetail> {
        let url = format!("{}/movie/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", "videos"),
            ])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TmdbError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url_derivation() {
        let summary: MovieSummary = serde_json::from_str(
            r#"{"id": 1, "title": "Goal!", "poster_path": "/abc.jpg"}"#,
        )
        .unwrap();
        assert_eq!(
            summary.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_trailer_key_prefers_trailers() {
        let detail: MovieDetail = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Goal!",
                "videos": {"results": [
                    {"key": "clip1", "site": "YouTube", "type": "Clip"},
                    {"key": "tr1", "site": "YouTube", "type": "Trailer"}
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(detail.trailer_key(), Some("tr1"));
    }

    #[test]
    fn test_trailer_key_absent() {
        let detail: MovieDetail =
            serde_json::from_str(r#"{"id": 1, "title": "Goal!"}"#).unwrap();
        assert_eq!(detail.trailer_key(), None);
    }
}
