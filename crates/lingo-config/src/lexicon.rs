use serde::{Deserialize, Serialize};

fn default_max_results() -> usize {
    10
}

fn default_fuzzy_prefix() -> usize {
    2
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LexiconConfig {
    /// Candidate cap per lookup (K).
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Shared-prefix length required of fuzzy matches.
    #[serde(default = "default_fuzzy_prefix")]
    pub fuzzy_prefix: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            fuzzy_prefix: default_fuzzy_prefix(),
        }
    }
}
