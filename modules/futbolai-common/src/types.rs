use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Query classification
// =============================================================================

/// The inferred category of a query, driving prompt selection and response
/// shaping. Misclassification routes a query down the wrong template; it is
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Player,
    Club,
    National,
    WorldCup,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Player => "player",
            QueryType::Club => "club",
            QueryType::National => "national",
            QueryType::WorldCup => "worldcup",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Knowledge lookup
// =============================================================================

/// Factual grounding resolved from the encyclopedia. `empty` stands in for
/// a failed or missing lookup so later stages never see an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRecord {
    pub title: String,
    pub extract: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl KnowledgeRecord {
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extract: String::new(),
            thumbnail_url: None,
            canonical_url: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extract.trim().is_empty()
    }
}

// =============================================================================
// Analysis results (one shape per QueryType)
// =============================================================================

/// Player analysis as requested from the model. Everything except the two
/// guaranteed fields is optional: the source is an LLM's best-effort JSON,
/// validated here at the boundary rather than trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_club: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_stats: Option<Value>,
    pub analysis: String,
    pub video_search_term: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trophies: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_manager: Option<String>,
    pub analysis: String,
    pub video_search_term: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifa_ranking: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_coach: Option<String>,
    pub analysis: String,
    pub video_search_term: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldCupAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_cup_info: Option<Value>,
    pub analysis: String,
    pub video_search_term: String,
}

/// The degraded shape produced when the model reply cannot be parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalAnalysis {
    pub analysis: String,
    pub video_search_term: String,
}

/// Sum over the category-specific shapes.
#[derive(Debug, Clone)]
pub enum AnalysisResult {
    Player(PlayerAnalysis),
    Club(ClubAnalysis),
    National(NationalAnalysis),
    WorldCup(WorldCupAnalysis),
    Minimal(MinimalAnalysis),
}

impl AnalysisResult {
    pub fn analysis(&self) -> &str {
        match self {
            AnalysisResult::Player(a) => &a.analysis,
            AnalysisResult::Club(a) => &a.analysis,
            AnalysisResult::National(a) => &a.analysis,
            AnalysisResult::WorldCup(a) => &a.analysis,
            AnalysisResult::Minimal(a) => &a.analysis,
        }
    }

    pub fn video_search_term(&self) -> &str {
        match self {
            AnalysisResult::Player(a) => &a.video_search_term,
            AnalysisResult::Club(a) => &a.video_search_term,
            AnalysisResult::National(a) => &a.video_search_term,
            AnalysisResult::WorldCup(a) => &a.video_search_term,
            AnalysisResult::Minimal(a) => &a.video_search_term,
        }
    }

    /// Minimal valid object substituted for an unparseable model reply.
    pub fn fallback(query: &str) -> Self {
        let year = Utc::now().format("%Y");
        AnalysisResult::Minimal(MinimalAnalysis {
            analysis: "Analysis available".to_string(),
            video_search_term: format!("{query} highlights {year}"),
        })
    }
}

/// Clubs and national teams share the `teamInfo` slot on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamAnalysis {
    Club(ClubAnalysis),
    National(NationalAnalysis),
}

// =============================================================================
// Aggregated response
// =============================================================================

/// The final wire object, cached under the lower-cased raw query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResponse {
    pub success: bool,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub query_type: QueryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<KnowledgeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_info: Option<PlayerAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_info: Option<TeamAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_cup_info: Option<WorldCupAnalysis>,
    pub youtube_url: String,
    pub analysis: String,
    pub confidence: f64,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&QueryType::WorldCup).unwrap(), "\"worldcup\"");
        let parsed: QueryType = serde_json::from_str("\"club\"").unwrap();
        assert_eq!(parsed, QueryType::Club);
    }

    #[test]
    fn test_player_analysis_accepts_partial_reply() {
        let raw = r#"{
            "name": "Lionel Messi",
            "careerStats": {"goals": 800},
            "analysis": "Generational.",
            "videoSearchTerm": "Messi highlights"
        }"#;
        let parsed: PlayerAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Lionel Messi"));
        assert!(parsed.position.is_none());
        assert_eq!(parsed.video_search_term, "Messi highlights");
    }

    #[test]
    fn test_player_analysis_requires_guaranteed_fields() {
        // Missing videoSearchTerm must fail so the caller substitutes the
        // fallback object instead of propagating a half-empty one.
        let raw = r#"{"name": "x", "analysis": "y"}"#;
        assert!(serde_json::from_str::<PlayerAnalysis>(raw).is_err());
    }

    #[test]
    fn test_fallback_shape() {
        let fallback = AnalysisResult::fallback("Real Madrid");
        assert_eq!(fallback.analysis(), "Analysis available");
        assert!(fallback.video_search_term().starts_with("Real Madrid highlights"));
    }

    #[test]
    fn test_response_wire_field_names() {
        let response = AggregatedResponse {
            success: true,
            query: "real madrid".into(),
            timestamp: Utc::now(),
            query_type: QueryType::Club,
            data: Some(KnowledgeRecord::empty("Real Madrid CF")),
            player_info: None,
            team_info: Some(TeamAnalysis::Club(ClubAnalysis {
                name: Some("Real Madrid".into()),
                stadium: Some("Santiago Bernabéu".into()),
                trophies: None,
                current_manager: None,
                analysis: "ok".into(),
                video_search_term: "real madrid highlights".into(),
            })),
            world_cup_info: None,
            youtube_url: "https://www.youtube.com/embed/abc".into(),
            analysis: "ok".into(),
            confidence: 0.9,
            source: "groq+wikipedia".into(),
            error: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "club");
        assert_eq!(json["teamInfo"]["name"], "Real Madrid");
        assert!(json["youtubeUrl"].as_str().unwrap().starts_with("https://www.youtube.com/embed/"));
        assert!(json.get("playerInfo").is_none());
        assert!(json.get("error").is_none());
    }
}
