use ai_client::ChatModel;
use futbolai_common::QueryType;
use tracing::debug;

const CLASSIFY_SYSTEM: &str = "You classify football search queries. \
Reply with exactly one word: player, club, national, or worldcup. \
No punctuation, no explanation.";

/// Ordered keyword rules for the no-LLM fallback path. First match wins;
/// anything unmatched is a player query. Coverage is deliberately limited
/// to well-known names.
struct KeywordRule {
    keywords: &'static [&'static str],
    query_type: QueryType,
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["world cup", "worldcup", "mundial"],
        query_type: QueryType::WorldCup,
    },
    KeywordRule {
        keywords: &[
            "national team",
            "selección",
            "spain",
            "argentina",
            "brazil",
            "france",
            "germany",
            "england",
            "portugal",
            "italy",
            "netherlands",
            "croatia",
            "uruguay",
            "belgium",
            "morocco",
            "japan",
        ],
        query_type: QueryType::National,
    },
    KeywordRule {
        keywords: &[
            "fc", "cf", "club", "united", "city", "madrid", "barcelona", "juventus", "bayern",
            "milan", "liverpool", "chelsea", "arsenal", "tottenham", "dortmund", "ajax", "porto",
            "benfica", "boca", "river plate",
        ],
        query_type: QueryType::Club,
    },
];

/// Pure keyword classification, used when the model is unreachable or
/// ignores the constrained-output instruction.
pub fn classify_keywords(query: &str) -> QueryType {
    let q = query.to_lowercase();
    for rule in KEYWORD_RULES {
        if rule.keywords.iter().any(|kw| q.contains(kw)) {
            return rule.query_type;
        }
    }
    QueryType::Player
}

fn parse_reply(reply: &str) -> Option<QueryType> {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '`')
        .to_lowercase();
    match cleaned.as_str() {
        "player" => Some(QueryType::Player),
        "club" => Some(QueryType::Club),
        "national" => Some(QueryType::National),
        "worldcup" => Some(QueryType::WorldCup),
        _ => None,
    }
}

/// Best-effort classification: ask the model for one of four literals,
/// fall back to keywords on any failure or unrecognized reply.
pub async fn classify(chat: Option<&dyn ChatModel>, query: &str) -> QueryType {
    if let Some(chat) = chat {
        match chat.chat(CLASSIFY_SYSTEM, query, 0.0, 8).await {
            Ok(reply) => {
                if let Some(query_type) = parse_reply(&reply) {
                    debug!(query, %query_type, "Model classified query");
                    return query_type;
                }
                debug!(query, reply, "Unrecognized classification reply, using keywords");
            }
            Err(e) => {
                debug!(query, error = %e, "Classification call failed, using keywords");
            }
        }
    }
    classify_keywords(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_cup_substring_wins() {
        assert_eq!(classify_keywords("World Cup 2026"), QueryType::WorldCup);
        assert_eq!(classify_keywords("history of the WORLD CUP"), QueryType::WorldCup);
    }

    #[test]
    fn test_country_names_are_national() {
        assert_eq!(classify_keywords("Spain"), QueryType::National);
        assert_eq!(classify_keywords("argentina squad"), QueryType::National);
    }

    #[test]
    fn test_club_fragments() {
        assert_eq!(classify_keywords("Real Madrid"), QueryType::Club);
        assert_eq!(classify_keywords("Manchester United"), QueryType::Club);
        assert_eq!(classify_keywords("ajax"), QueryType::Club);
    }

    #[test]
    fn test_default_is_player() {
        assert_eq!(classify_keywords("Lamine Yamal"), QueryType::Player);
        assert_eq!(classify_keywords("some unknown name"), QueryType::Player);
    }

    #[test]
    fn test_parse_reply_tolerates_quotes_and_case() {
        assert_eq!(parse_reply("\"Club\""), Some(QueryType::Club));
        assert_eq!(parse_reply("  worldcup.\n"), Some(QueryType::WorldCup));
        assert_eq!(parse_reply("definitely a player"), None);
    }

    #[tokio::test]
    async fn test_classify_without_model_uses_keywords() {
        assert_eq!(classify(None, "world cup final").await, QueryType::WorldCup);
        assert_eq!(classify(None, "unknown striker").await, QueryType::Player);
    }
}
