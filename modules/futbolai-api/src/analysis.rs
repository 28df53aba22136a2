use tracing::debug;

use ai_client::{extract_json_object, strip_code_blocks, truncate_chars, ChatModel};
use futbolai_common::{
    AnalysisResult, ClubAnalysis, KnowledgeRecord, NationalAnalysis, PlayerAnalysis, QueryType,
    WorldCupAnalysis,
};

/// How much encyclopedia extract is embedded as grounding context.
const MAX_CONTEXT_CHARS: usize = 500;

const TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str = "You are a football analyst. Answer with a single JSON object \
using exactly the field names requested. Never invent statistics: when you are not sure \
of a number, write \"information not available\" instead.";

fn context_block(knowledge: &KnowledgeRecord) -> String {
    if knowledge.is_empty() {
        String::new()
    } else {
        format!(
            "Verified context about the subject:\n{}\n\n",
            truncate_chars(&knowledge.extract, MAX_CONTEXT_CHARS)
        )
    }
}

/// Category-specific user prompt plus the token budget sized to it.
fn build_prompt(query: &str, query_type: QueryType, knowledge: &KnowledgeRecord) -> (String, u32) {
    let context = context_block(knowledge);
    match query_type {
        QueryType::Player => (
            format!(
                "{context}Write an analysis of the footballer \"{query}\". Reply with JSON fields: \
name, position, nationality, currentClub, age, achievementsSummary, \
careerStats (object), analysis (2-3 sentences), videoSearchTerm."
            ),
            900,
        ),
        QueryType::Club => (
            format!(
                "{context}Write an analysis of the football club \"{query}\". Reply with JSON fields: \
name, stadium, trophies (object or list), currentManager, \
analysis (2-3 sentences), videoSearchTerm."
            ),
            800,
        ),
        QueryType::National => (
            format!(
                "{context}Write an analysis of the national football team \"{query}\". Reply with JSON \
fields: name, fifaRanking, currentCoach, analysis (2-3 sentences), videoSearchTerm."
            ),
            700,
        ),
        QueryType::WorldCup => (
            format!(
                "{context}Write an overview of the FIFA World Cup topic \"{query}\". Reply with JSON \
fields: worldCupInfo (object), analysis (2-3 sentences), videoSearchTerm."
            ),
            600,
        ),
    }
}

/// Lenient reply parsing: fences stripped, first balanced object extracted,
/// then deserialized against the category's shape. Anything else becomes
/// the minimal fallback object. Never errors.
pub fn parse_reply(query: &str, query_type: QueryType, reply: &str) -> AnalysisResult {
    let text = strip_code_blocks(reply);
    let Some(json) = extract_json_object(text) else {
        debug!(query, "No JSON object in model reply, using fallback");
        return AnalysisResult::fallback(query);
    };

    let parsed = match query_type {
        QueryType::Player => {
            serde_json::from_str::<PlayerAnalysis>(json).map(AnalysisResult::Player)
        }
        QueryType::Club => serde_json::from_str::<ClubAnalysis>(json).map(AnalysisResult::Club),
        QueryType::National => {
            serde_json::from_str::<NationalAnalysis>(json).map(AnalysisResult::National)
        }
        QueryType::WorldCup => {
            serde_json::from_str::<WorldCupAnalysis>(json).map(AnalysisResult::WorldCup)
        }
    };

    match parsed {
        Ok(result) => result,
        Err(e) => {
            debug!(query, error = %e, "Model reply failed validation, using fallback");
            AnalysisResult::fallback(query)
        }
    }
}

/// Generate the category-specific analysis. Degrades to the fallback object
/// when the model is unconfigured, unreachable, or off-script.
pub async fn generate(
    chat: Option<&dyn ChatModel>,
    query: &str,
    query_type: QueryType,
    knowledge: &KnowledgeRecord,
) -> AnalysisResult {
    let Some(chat) = chat else {
        return AnalysisResult::fallback(query);
    };

    let (prompt, max_tokens) = build_prompt(query, query_type, knowledge);
    match chat.chat(SYSTEM_PROMPT, &prompt, TEMPERATURE, max_tokens).await {
        Ok(reply) => parse_reply(query, query_type, &reply),
        Err(e) => {
            debug!(query, error = %e, "Analysis call failed, using fallback");
            AnalysisResult::fallback(query)
        }
    }
}
