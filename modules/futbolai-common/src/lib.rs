pub mod cache;
pub mod config;
pub mod error;
pub mod types;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache, DEFAULT_TTL};
pub use config::Config;
pub use error::ServiceError;
pub use types::{
    AggregatedResponse, AnalysisResult, ClubAnalysis, KnowledgeRecord, MinimalAnalysis,
    NationalAnalysis, PlayerAnalysis, QueryType, TeamAnalysis, WorldCupAnalysis,
};
