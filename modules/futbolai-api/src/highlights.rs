use rand::Rng;
use tracing::debug;

use futbolai_common::TtlCache;
use youtube_client::embed_url;

use crate::deps::VideoSearch;

/// Generic football videos served when no video-API key is configured.
const FALLBACK_POOL: &[&str] = &[
    "wvPaQpCxY2k",
    "8F9jXYOH2c0",
    "c0qKxqDkNsQ",
    "1mJ8DqQfent",
    "sGFqMvNss7A",
];

/// Keyword-routed fallbacks used when the search API errors out or returns
/// nothing. Checked in order by substring containment.
struct VideoKeyword {
    keywords: &'static [&'static str],
    video_id: &'static str,
}

const VIDEO_KEYWORDS: &[VideoKeyword] = &[
    VideoKeyword {
        keywords: &["messi"],
        video_id: "2BYXBC8WQ5k",
    },
    VideoKeyword {
        keywords: &["ronaldo", "cr7"],
        video_id: "45MEIdEQfjU",
    },
    VideoKeyword {
        keywords: &["real madrid"],
        video_id: "besVd1VMxvQ",
    },
    VideoKeyword {
        keywords: &["barcelona", "barca"],
        video_id: "F6qScl9t8P0",
    },
    VideoKeyword {
        keywords: &["world cup"],
        video_id: "U5yd9overlI",
    },
    VideoKeyword {
        keywords: &["premier league", "manchester", "liverpool", "arsenal", "chelsea"],
        video_id: "pVG_e6cEJ9w",
    },
    VideoKeyword {
        keywords: &["champions league"],
        video_id: "qDgFkjQ0pGs",
    },
];

const DEFAULT_VIDEO: &str = "wvPaQpCxY2k";

/// Keyword-table lookup, first matching rule wins.
pub fn keyword_video(term: &str) -> Option<&'static str> {
    let t = term.to_lowercase();
    VIDEO_KEYWORDS
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| t.contains(kw)))
        .map(|rule| rule.video_id)
}

fn pool_pick() -> &'static str {
    FALLBACK_POOL[rand::rng().random_range(0..FALLBACK_POOL.len())]
}

/// Fallback embed URL when the search API cannot be used at all.
pub fn fallback_embed(term: &str) -> String {
    embed_url(keyword_video(term).unwrap_or(DEFAULT_VIDEO))
}

/// Resolve a search term to a playable embed URL. Always returns a
/// well-formed URL; every outcome (hit, quota failure, fallback) is cached
/// for the TTL window.
pub async fn resolve(
    video: Option<&dyn VideoSearch>,
    cache: &TtlCache<String>,
    term: &str,
) -> String {
    let cache_key = term.to_lowercase();
    if let Some(hit) = cache.get(&cache_key).await {
        return hit;
    }

    let url = match video {
        None => {
            debug!(term, "No video API key, serving pool video");
            embed_url(pool_pick())
        }
        Some(video) => match video.search(term, 5).await {
            Ok(hits) if !hits.is_empty() => embed_url(&hits[0].video_id),
            Ok(_) => {
                debug!(term, "Video search returned nothing, using keyword fallback");
                fallback_embed(term)
            }
            Err(e) => {
                debug!(term, error = %e, "Video search failed, using keyword fallback");
                fallback_embed(term)
            }
        },
    };

    cache.insert(cache_key, url.clone()).await;
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use futbolai_common::DEFAULT_TTL;
    use youtube_client::VideoHit;

    struct FailingSearch;

    #[async_trait]
    impl VideoSearch for FailingSearch {
        async fn search(&self, _query: &str, _max_results: u32) -> Result<Vec<VideoHit>> {
            Err(anyhow!("quota exceeded"))
        }
    }

    struct EmptySearch;

    #[async_trait]
    impl VideoSearch for EmptySearch {
        async fn search(&self, _query: &str, _max_results: u32) -> Result<Vec<VideoHit>> {
            Ok(vec![])
        }
    }

    struct HitSearch;

    #[async_trait]
    impl VideoSearch for HitSearch {
        async fn search(&self, _query: &str, _max_results: u32) -> Result<Vec<VideoHit>> {
            Ok(vec![VideoHit {
                video_id: "hit123".into(),
                title: "Found".into(),
            }])
        }
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(keyword_video("Messi skills 2024"), Some("2BYXBC8WQ5k"));
        assert_eq!(keyword_video("real madrid highlights"), Some("besVd1VMxvQ"));
        assert_eq!(keyword_video("obscure sunday league"), None);
    }

    #[tokio::test]
    async fn test_no_key_returns_pool_url() {
        let cache = TtlCache::new(DEFAULT_TTL);
        let url = resolve(None, &cache, "anything at all").await;
        assert!(url.starts_with("https://www.youtube.com/embed/"));
        assert!(FALLBACK_POOL.iter().any(|id| url.ends_with(id)));
    }

    #[tokio::test]
    async fn test_search_hit_becomes_embed_url() {
        let cache = TtlCache::new(DEFAULT_TTL);
        let url = resolve(Some(&HitSearch), &cache, "liverpool goals").await;
        assert_eq!(url, "https://www.youtube.com/embed/hit123");
    }

    #[tokio::test]
    async fn test_api_error_uses_keyword_fallback() {
        let cache = TtlCache::new(DEFAULT_TTL);
        let url = resolve(Some(&FailingSearch), &cache, "messi magic").await;
        assert_eq!(url, "https://www.youtube.com/embed/2BYXBC8WQ5k");
    }

    #[tokio::test]
    async fn test_zero_results_unknown_term_uses_default() {
        let cache = TtlCache::new(DEFAULT_TTL);
        let url = resolve(Some(&EmptySearch), &cache, "qzx nonsense").await;
        assert_eq!(url, format!("https://www.youtube.com/embed/{DEFAULT_VIDEO}"));
    }

    #[tokio::test]
    async fn test_failure_outcome_is_cached() {
        let cache = TtlCache::new(DEFAULT_TTL);
        let first = resolve(Some(&FailingSearch), &cache, "messi magic").await;
        // A later success for the same term within the window is not
        // consulted; the fallback is locked in.
        let second = resolve(Some(&HitSearch), &cache, "messi magic").await;
        assert_eq!(first, second);
    }
}
