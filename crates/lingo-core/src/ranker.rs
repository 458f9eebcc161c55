use serde::{Deserialize, Serialize};

/// Upper bound on candidates retrieved per lookup.
pub const MAX_CANDIDATES: usize = 10;

/// Minimum shared prefix required of fuzzy-tier matches.
pub const FUZZY_PREFIX_LEN: usize = 2;

pub const NO_DEFINITION: &str = "No definition found.";

/// Which retrieval tier produced a candidate. Tier order is a strict
/// priority: exact over phrase, phrase over fuzzy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    ExactKeyword,
    CaseInsensitivePhrase,
    Fuzzy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub translation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub glosses: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

/// One candidate entry as delivered by the lexical search backend,
/// in retrieval order (tier priority already encoded in the score).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalHit {
    pub word: String,
    pub score: f32,
    pub tier: MatchTier,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

pub fn normalize_query(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Pick the single best entry for `query` out of `hits`.
///
/// A candidate whose word equals the normalized query (compared
/// case-insensitively, nothing deeper) wins outright, wherever the
/// retrieval engine ranked it: relevance scoring can place a fuzzy
/// near-miss above a true exact match, and the exact match is
/// definitionally the correct entry. Otherwise the retrieval order
/// stands and the first hit wins.
pub fn pick_best<'a>(query: &str, hits: &'a [LexicalHit]) -> Option<&'a LexicalHit> {
    if hits.is_empty() {
        return None;
    }
    let normalized = normalize_query(query);
    if let Some(exact) = hits.iter().find(|h| h.word.to_lowercase() == normalized) {
        return Some(exact);
    }
    hits.first()
}

/// Render a hit's senses to display text. Sense order and gloss order
/// are preserved exactly as received.
pub fn format_senses(hit: &LexicalHit) -> String {
    let mut out = String::new();
    for sense in &hit.senses {
        if let Some(pos) = &sense.pos {
            out.push_str(pos);
            out.push('\n');
        }
        for (i, gloss) in sense.glosses.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, gloss));
        }
        if !sense.examples.is_empty() {
            out.push_str("  Usage examples:\n");
            for example in &sense.examples {
                out.push_str(&format!("    '{}'\n", example.text));
                if let Some(translation) = &example.translation {
                    out.push_str(&format!("      {}\n", translation));
                }
            }
        }
    }
    if out.is_empty() {
        NO_DEFINITION.to_string()
    } else {
        out
    }
}

pub fn format_definition(best: Option<&LexicalHit>) -> String {
    match best {
        Some(hit) => format_senses(hit),
        None => NO_DEFINITION.to_string(),
    }
}
