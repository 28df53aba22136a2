use chrono::Utc;
use tracing::{debug, warn};

use futbolai_common::{KnowledgeRecord, QueryType, TtlCache};
use wiki_client::PageSummary;

use crate::deps::KnowledgeSource;

/// Curated queries that map straight to a canonical article slug, skipping
/// the suffix-probing round trips. Keys are compared lower-cased.
const ALIASES: &[(&str, &str)] = &[
    // Clubs
    ("real madrid", "Real_Madrid_CF"),
    ("barcelona", "FC_Barcelona"),
    ("fc barcelona", "FC_Barcelona"),
    ("atletico madrid", "Atlético_Madrid"),
    ("manchester united", "Manchester_United_F.C."),
    ("manchester city", "Manchester_City_F.C."),
    ("liverpool", "Liverpool_F.C."),
    ("chelsea", "Chelsea_F.C."),
    ("arsenal", "Arsenal_F.C."),
    ("tottenham", "Tottenham_Hotspur_F.C."),
    ("bayern munich", "FC_Bayern_Munich"),
    ("borussia dortmund", "Borussia_Dortmund"),
    ("juventus", "Juventus_FC"),
    ("ac milan", "AC_Milan"),
    ("inter milan", "Inter_Milan"),
    ("psg", "Paris_Saint-Germain_F.C."),
    ("paris saint-germain", "Paris_Saint-Germain_F.C."),
    ("ajax", "AFC_Ajax"),
    ("porto", "FC_Porto"),
    ("benfica", "S.L._Benfica"),
    ("boca juniors", "Boca_Juniors"),
    ("river plate", "Club_Atlético_River_Plate"),
    // Players
    ("messi", "Lionel_Messi"),
    ("lionel messi", "Lionel_Messi"),
    ("ronaldo", "Cristiano_Ronaldo"),
    ("cristiano ronaldo", "Cristiano_Ronaldo"),
    ("neymar", "Neymar"),
    ("mbappe", "Kylian_Mbappé"),
    ("kylian mbappe", "Kylian_Mbappé"),
    ("haaland", "Erling_Haaland"),
    ("vinicius", "Vinícius_Júnior"),
    ("bellingham", "Jude_Bellingham"),
    ("modric", "Luka_Modrić"),
    ("lewandowski", "Robert_Lewandowski"),
    ("salah", "Mohamed_Salah"),
    ("de bruyne", "Kevin_De_Bruyne"),
    ("pele", "Pelé"),
    ("maradona", "Diego_Maradona"),
    ("zidane", "Zinedine_Zidane"),
    // National teams
    ("spain", "Spain_national_football_team"),
    ("argentina", "Argentina_national_football_team"),
    ("brazil", "Brazil_national_football_team"),
    ("france", "France_national_football_team"),
    ("germany", "Germany_national_football_team"),
    ("england", "England_national_football_team"),
    ("portugal", "Portugal_national_football_team"),
    ("italy", "Italy_national_football_team"),
    ("netherlands", "Netherlands_national_football_team"),
    ("croatia", "Croatia_national_football_team"),
    ("uruguay", "Uruguay_national_football_team"),
    // Tournaments
    ("world cup", "FIFA_World_Cup"),
    ("fifa world cup", "FIFA_World_Cup"),
];

/// Club-article suffixes probed in order when the alias table misses.
const CLUB_SUFFIXES: &[&str] = &["_CF", "_FC", "_(football_club)", "_F.C."];

const NATIONAL_SUFFIX: &str = "_national_football_team";

/// Exact alias-table hit for the lower-cased query.
pub fn alias_slug(query: &str) -> Option<&'static str> {
    let q = query.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == q)
        .map(|(_, slug)| *slug)
}

/// Collapse a free-text query into slug form: drop trailing
/// `fc`/`club`/`team` words, squeeze whitespace, underscore-join.
pub fn normalize(query: &str) -> String {
    let mut words: Vec<&str> = query.split_whitespace().collect();
    while let Some(last) = words.last() {
        match last.to_lowercase().as_str() {
            "fc" | "club" | "team" => {
                words.pop();
            }
            _ => break,
        }
    }
    words.join("_")
}

fn to_record(summary: PageSummary) -> KnowledgeRecord {
    KnowledgeRecord {
        thumbnail_url: summary.thumbnail_url().map(str::to_string),
        canonical_url: summary.canonical_url().map(str::to_string),
        title: summary.title,
        extract: summary.extract,
        fetched_at: Utc::now(),
    }
}

/// Resolve a query to factual grounding. Never fails: every upstream
/// problem collapses into an empty record, which is cached like any other
/// result so a dead upstream is not hammered for the next five minutes.
pub async fn lookup(
    source: &dyn KnowledgeSource,
    cache: &TtlCache<KnowledgeRecord>,
    query: &str,
    query_type: QueryType,
) -> KnowledgeRecord {
    let cache_key = format!("knowledge_{}_{}", query.to_lowercase(), query_type);
    if let Some(hit) = cache.get(&cache_key).await {
        return hit;
    }

    let record = resolve(source, query, query_type).await;
    cache.insert(cache_key, record.clone()).await;
    record
}

async fn resolve(
    source: &dyn KnowledgeSource,
    query: &str,
    query_type: QueryType,
) -> KnowledgeRecord {
    let normalized = normalize(query);

    let slug = match alias_slug(query) {
        Some(slug) => slug.to_string(),
        None => match query_type {
            QueryType::Club => {
                // Probe common club-article suffixes; a populated probe
                // already carries the summary, so use it directly.
                for suffix in CLUB_SUFFIXES {
                    let candidate = format!("{normalized}{suffix}");
                    match source.probe(&candidate).await {
                        Ok(Some(summary)) => {
                            debug!(query, slug = %candidate, "Suffix probe hit");
                            return to_record(summary);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            debug!(slug = %candidate, error = %e, "Suffix probe failed");
                        }
                    }
                }
                normalized
            }
            QueryType::National => format!("{normalized}{NATIONAL_SUFFIX}"),
            _ => normalized,
        },
    };

    match source.summary(&slug).await {
        Ok(summary) => to_record(summary),
        Err(e) => {
            warn!(query, slug, error = %e, "Knowledge lookup failed, returning empty record");
            KnowledgeRecord::empty(query)
        }
    }
}
