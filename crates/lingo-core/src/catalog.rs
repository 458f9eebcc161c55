use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Sentinel source code meaning "detect the language per request".
/// Never a valid translation target.
pub const AUTO: &str = "auto";

const AUTO_LABEL: &str = "Auto-detect";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    /// Codes this language can translate into. Directed: `a.targets`
    /// containing `b` says nothing about `b.targets`.
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Immutable set of known languages, populated once at startup.
#[derive(Debug, Default)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn first(&self) -> Option<&Language> {
        self.languages.first()
    }

    /// True iff `source` is in the catalog and lists `target`.
    pub fn is_valid_target(&self, source: &str, target: &str) -> bool {
        if target == AUTO {
            return false;
        }
        self.get(source)
            .is_some_and(|lang| lang.targets.iter().any(|t| t == target))
    }

    /// Languages selectable as targets for `source`. An `auto` or
    /// unknown source places no restriction (the real source is
    /// unknown, so fail open rather than offer nothing).
    pub fn targets_for(&self, source: &str) -> Vec<&Language> {
        if source == AUTO {
            return self.languages.iter().collect();
        }
        match self.get(source) {
            Some(lang) => self
                .languages
                .iter()
                .filter(|l| lang.targets.contains(&l.code))
                .collect(),
            None => self.languages.iter().collect(),
        }
    }

    /// Label for a code. Unknown codes are echoed back unchanged.
    pub fn display_name(&self, code: &str) -> String {
        if code == AUTO {
            return AUTO_LABEL.to_string();
        }
        self.get(code)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// Replacement target when `source` does not support `target`:
    /// `preferred` if listed, else the source's first listed target.
    ///
    /// Returns `Ok(None)` when no correction is needed (target already
    /// supported, or source unknown). A source with no targets at all
    /// is a configuration error.
    pub fn corrected_target(
        &self,
        source: &str,
        target: &str,
        preferred: &str,
    ) -> Result<Option<String>, SessionError> {
        let Some(lang) = self.get(source) else {
            return Ok(None);
        };
        if lang.targets.iter().any(|t| t == target) {
            return Ok(None);
        }
        if lang.targets.iter().any(|t| t == preferred) {
            return Ok(Some(preferred.to_string()));
        }
        match lang.targets.first() {
            Some(first) => Ok(Some(first.clone())),
            None => Err(SessionError::NoValidTarget {
                source: lang.name.clone(),
            }),
        }
    }
}

/// Case-insensitive name substring filter for language pickers.
pub fn filter_by_name<'a>(languages: &'a [Language], term: &str) -> Vec<&'a Language> {
    if term.is_empty() {
        return languages.iter().collect();
    }
    let term = term.to_lowercase();
    languages
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&term))
        .collect()
}
