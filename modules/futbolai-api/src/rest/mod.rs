use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use futbolai_common::{
    AggregatedResponse, AnalysisResult, KnowledgeRecord, QueryType, ServiceError, TeamAnalysis,
};

use crate::deps::AppState;
use crate::{analysis, classifier, highlights, knowledge};

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Query structs ---

#[derive(Deserialize)]
pub struct AiQuery {
    action: Option<String>,
    query: Option<String>,
}

#[derive(Deserialize)]
pub struct MoviesQuery {
    action: Option<String>,
    query: Option<String>,
    id: Option<i64>,
}

// --- /api/ai ---

fn ai_banner() -> serde_json::Value {
    json!({
        "message": "FutbolAI API. Pass ?action=search&query=<player, club, national team or world cup>",
        "version": API_VERSION,
        "features": ["classification", "ai analysis", "knowledge grounding", "highlight videos"],
    })
}

pub async fn api_ai(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AiQuery>,
) -> impl IntoResponse {
    let query = params.query.unwrap_or_default();
    let is_search = params.action.as_deref() == Some("search") && !query.trim().is_empty();
    if !is_search {
        // Missing action or empty query falls through to the capability
        // banner, never to the search path.
        return Json(ai_banner()).into_response();
    }

    let response = run_search(state, query.trim().to_string()).await;
    Json(response).into_response()
}

/// Run the aggregation pipeline. Each stage degrades internally; a panic
/// escaping all of them still produces a well-formed `success:false` body
/// rather than a 5xx.
pub async fn run_search(state: Arc<AppState>, query: String) -> AggregatedResponse {
    let task_state = state.clone();
    let task_query = query.clone();
    match tokio::spawn(async move { search_pipeline(&task_state, &task_query).await }).await {
        Ok(response) => response,
        Err(e) => {
            warn!(query, error = %e, "Search pipeline aborted");
            error_response(&query)
        }
    }
}

async fn search_pipeline(state: &AppState, query: &str) -> AggregatedResponse {
    let cache_key = query.to_lowercase();
    if let Some(hit) = state.response_cache.get(&cache_key).await {
        return hit;
    }

    let chat = state.chat.as_deref();
    let query_type = classifier::classify(chat, query).await;
    let record =
        knowledge::lookup(state.knowledge.as_ref(), &state.knowledge_cache, query, query_type)
            .await;
    let result = analysis::generate(chat, query, query_type, &record).await;
    let youtube_url = highlights::resolve(
        state.video.as_deref(),
        &state.video_cache,
        result.video_search_term(),
    )
    .await;

    let response = shape_response(query, query_type, record, result, youtube_url);
    state.response_cache.insert(cache_key, response.clone()).await;
    response
}

fn shape_response(
    query: &str,
    query_type: QueryType,
    record: KnowledgeRecord,
    result: AnalysisResult,
    youtube_url: String,
) -> AggregatedResponse {
    let grounded = !record.is_empty();
    let analysis_text = result.analysis().to_string();

    let (player_info, team_info, world_cup_info, degraded) = match result {
        AnalysisResult::Player(a) => (Some(a), None, None, false),
        AnalysisResult::Club(a) => (None, Some(TeamAnalysis::Club(a)), None, false),
        AnalysisResult::National(a) => (None, Some(TeamAnalysis::National(a)), None, false),
        AnalysisResult::WorldCup(a) => (None, None, Some(a), false),
        AnalysisResult::Minimal(_) => (None, None, None, true),
    };

    let (confidence, source) = match (degraded, grounded) {
        (true, _) => (0.4, "fallback"),
        (false, true) => (0.9, "groq+wikipedia"),
        (false, false) => (0.7, "groq"),
    };

    AggregatedResponse {
        success: true,
        query: query.to_string(),
        timestamp: Utc::now(),
        query_type,
        data: Some(record),
        player_info,
        team_info,
        world_cup_info,
        youtube_url,
        analysis: analysis_text,
        confidence,
        source: source.to_string(),
        error: None,
    }
}

fn error_response(query: &str) -> AggregatedResponse {
    AggregatedResponse {
        success: false,
        query: query.to_string(),
        timestamp: Utc::now(),
        query_type: QueryType::Player,
        data: None,
        player_info: None,
        team_info: None,
        world_cup_info: None,
        youtube_url: highlights::fallback_embed(query),
        analysis: "Something went wrong. Please try again in a moment.".to_string(),
        confidence: 0.0,
        source: "error".to_string(),
        error: Some("internal error".to_string()),
    }
}

// --- /api/movies ---

fn movies_banner() -> serde_json::Value {
    json!({
        "message": "Movie explorer API. Pass ?action=search&query=<title> or ?action=detail&id=<tmdb id>",
        "version": API_VERSION,
        "features": ["title search", "movie detail", "trailers"],
    })
}

pub async fn api_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQuery>,
) -> impl IntoResponse {
    let result = match params.action.as_deref() {
        Some("search") => match params.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => movie_search(&state, query).await,
            _ => return Json(movies_banner()).into_response(),
        },
        Some("detail") => match params.id {
            Some(id) => movie_detail(&state, id).await,
            None => return Json(movies_banner()).into_response(),
        },
        _ => return Json(movies_banner()).into_response(),
    };

    // Upstream failures stay 200 with success:false, mirroring /api/ai.
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            warn!(error = %e, "Movie request failed");
            Json(json!({ "success": false, "error": e.to_string() })).into_response()
        }
    }
}

async fn movie_search(state: &AppState, query: &str) -> Result<serde_json::Value, ServiceError> {
    let cache_key = format!("movies_search_{}", query.to_lowercase());
    if let Some(hit) = state.movie_cache.get(&cache_key).await {
        return Ok(hit);
    }

    let movies = state
        .movies
        .as_ref()
        .ok_or_else(|| ServiceError::Config("TMDB_API_KEY not configured".into()))?;
    let results = movies
        .search_movies(query)
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    let body = json!({
        "success": true,
        "query": query,
        "results": results.iter().map(|m| json!({
            "id": m.id,
            "title": m.title,
            "overview": m.overview,
            "releaseDate": m.release_date,
            "posterUrl": m.poster_url(),
            "voteAverage": m.vote_average,
        })).collect::<Vec<_>>(),
    });
    state.movie_cache.insert(cache_key, body.clone()).await;
    Ok(body)
}

async fn movie_detail(state: &AppState, id: i64) -> Result<serde_json::Value, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!("id must be a positive TMDB id, got {id}")));
    }

    let cache_key = format!("movies_detail_{id}");
    if let Some(hit) = state.movie_cache.get(&cache_key).await {
        return Ok(hit);
    }

    let movies = state
        .movies
        .as_ref()
        .ok_or_else(|| ServiceError::Config("TMDB_API_KEY not configured".into()))?;
    let movie = movies
        .movie_detail(id)
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    let body = json!({
        "success": true,
        "movie": {
            "id": movie.id,
            "title": movie.title,
            "overview": movie.overview,
            "releaseDate": movie.release_date,
            "posterUrl": movie.poster_url(),
            "runtime": movie.runtime,
            "genres": movie.genres.iter().map(|g| g.name.clone()).collect::<Vec<_>>(),
            "voteAverage": movie.vote_average,
            "trailerUrl": movie.trailer_key().map(youtube_client::embed_url),
        },
    });
    state.movie_cache.insert(cache_key, body.clone()).await;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use futbolai_common::{ClubAnalysis, MinimalAnalysis};

    fn record(extract: &str) -> KnowledgeRecord {
        KnowledgeRecord {
            title: "Real Madrid CF".into(),
            extract: extract.into(),
            thumbnail_url: None,
            canonical_url: None,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_shape_club_response() {
        let result = AnalysisResult::Club(ClubAnalysis {
            name: Some("Real Madrid".into()),
            stadium: None,
            trophies: None,
            current_manager: None,
            analysis: "Dominant.".into(),
            video_search_term: "real madrid highlights".into(),
        });
        let response = shape_response(
            "Real Madrid",
            QueryType::Club,
            record("Spanish professional football club."),
            result,
            "https://www.youtube.com/embed/abc".into(),
        );

        assert!(response.success);
        assert!(matches!(response.team_info, Some(TeamAnalysis::Club(_))));
        assert!(response.player_info.is_none());
        assert_eq!(response.confidence, 0.9);
        assert_eq!(response.source, "groq+wikipedia");
    }

    #[test]
    fn test_shape_degraded_response_still_succeeds() {
        let result = AnalysisResult::Minimal(MinimalAnalysis {
            analysis: "Analysis available".into(),
            video_search_term: "x highlights".into(),
        });
        let response = shape_response(
            "x",
            QueryType::Player,
            record(""),
            result,
            "https://www.youtube.com/embed/abc".into(),
        );

        assert!(response.success, "degraded output is not an error");
        assert_eq!(response.source, "fallback");
        assert!(response.player_info.is_none());
    }

    #[test]
    fn test_error_response_keeps_playable_video() {
        let response = error_response("messi");
        assert!(!response.success);
        assert!(response.youtube_url.starts_with("https://www.youtube.com/embed/"));
        assert!(response.error.is_some());
    }
}
