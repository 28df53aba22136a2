use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use ai_client::ChatModel;
use futbolai_common::cache::Clock;
use futbolai_common::{AggregatedResponse, Config, KnowledgeRecord, TtlCache, DEFAULT_TTL};
use tmdb_client::{MovieDetail, MovieSummary, TmdbClient};
use wiki_client::{PageSummary, WikiClient};
use youtube_client::{VideoHit, YouTubeClient};

/// Dyn-compatible encyclopedia seam (wraps `wiki_client::WikiClient`).
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn summary(&self, slug: &str) -> Result<PageSummary>;
    async fn probe(&self, slug: &str) -> Result<Option<PageSummary>>;
}

#[async_trait]
impl KnowledgeSource for WikiClient {
    async fn summary(&self, slug: &str) -> Result<PageSummary> {
        Ok(WikiClient::summary(self, slug).await?)
    }

    async fn probe(&self, slug: &str) -> Result<Option<PageSummary>> {
        Ok(WikiClient::probe(self, slug).await?)
    }
}

/// Dyn-compatible video-search seam (wraps `youtube_client::YouTubeClient`).
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>>;
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>> {
        Ok(self.search_videos(query, max_results).await?)
    }
}

/// Dyn-compatible movie-metadata seam (wraps `tmdb_client::TmdbClient`).
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>>;
    async fn movie_detail(&self, id: i64) -> Result<MovieDetail>;
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        Ok(TmdbClient::search_movies(self, query).await?)
    }

    async fn movie_detail(&self, id: i64) -> Result<MovieDetail> {
        Ok(TmdbClient::movie_detail(self, id).await?)
    }
}

/// Central dependency container passed to all handlers.
///
/// The AI and video seams are `None` when their keys are not configured;
/// each pipeline stage degrades to its fallback path instead of failing.
pub struct AppState {
    pub chat: Option<Arc<dyn ChatModel>>,
    pub knowledge: Arc<dyn KnowledgeSource>,
    pub video: Option<Arc<dyn VideoSearch>>,
    pub movies: Option<Arc<dyn MovieSource>>,

    pub response_cache: TtlCache<AggregatedResponse>,
    pub knowledge_cache: TtlCache<KnowledgeRecord>,
    pub video_cache: TtlCache<String>,
    pub movie_cache: TtlCache<serde_json::Value>,
}

impl AppState {
    /// Wire up the real clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let chat: Option<Arc<dyn ChatModel>> = config
            .groq_api_key
            .as_ref()
            .map(|key| {
                Arc::new(ai_client::Groq::new(key.clone(), config.groq_model.clone()))
                    as Arc<dyn ChatModel>
            });
        let video: Option<Arc<dyn VideoSearch>> = config
            .youtube_api_key
            .as_ref()
            .map(|key| Arc::new(YouTubeClient::new(key.clone())) as Arc<dyn VideoSearch>);
        let movies: Option<Arc<dyn MovieSource>> = config
            .tmdb_api_key
            .as_ref()
            .map(|key| Arc::new(TmdbClient::new(key.clone())) as Arc<dyn MovieSource>);

        Self::new(chat, Arc::new(WikiClient::new()), video, movies)
    }

    pub fn new(
        chat: Option<Arc<dyn ChatModel>>,
        knowledge: Arc<dyn KnowledgeSource>,
        video: Option<Arc<dyn VideoSearch>>,
        movies: Option<Arc<dyn MovieSource>>,
    ) -> Self {
        Self {
            chat,
            knowledge,
            video,
            movies,
            response_cache: TtlCache::new(DEFAULT_TTL),
            knowledge_cache: TtlCache::new(DEFAULT_TTL),
            video_cache: TtlCache::new(DEFAULT_TTL),
            movie_cache: TtlCache::new(DEFAULT_TTL),
        }
    }

    /// Same as `new`, with every cache driven by the given clock. Used by
    /// expiry tests.
    pub fn with_clock(
        chat: Option<Arc<dyn ChatModel>>,
        knowledge: Arc<dyn KnowledgeSource>,
        video: Option<Arc<dyn VideoSearch>>,
        movies: Option<Arc<dyn MovieSource>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chat,
            knowledge,
            video,
            movies,
            response_cache: TtlCache::with_clock(DEFAULT_TTL, clock.clone()),
            knowledge_cache: TtlCache::with_clock(DEFAULT_TTL, clock.clone()),
            video_cache: TtlCache::with_clock(DEFAULT_TTL, clock.clone()),
            movie_cache: TtlCache::with_clock(DEFAULT_TTL, clock),
        }
    }
}
