use async_trait::async_trait;
use serde::Deserialize;

use lingo_core::catalog::Language;
use lingo_core::error::SessionError;
use lingo_core::ranker::LexicalHit;

pub mod client;

pub use client::HttpBackend;

/// One language guess, caller-supplied ordering is best-first.
#[derive(Debug, Clone, Deserialize)]
pub struct Detection {
    pub language: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

fn unlimited() -> i64 {
    -1
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FrontendSettings {
    /// Input length cap; absent on the wire means unlimited (-1).
    #[serde(rename = "charLimit", default = "unlimited")]
    pub char_limit: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with an explicit error payload.
    #[error("{0}")]
    Backend(String),

    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Backend(msg) => SessionError::translation_failure(Some(msg)),
            ApiError::Network(_) => {
                SessionError::Network("Network error. Please check your connection.".to_string())
            }
        }
    }
}

/// Startup catalog + settings fetch, also used as the reachability probe.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Whole list or failure, never a partial set.
    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError>;

    async fn fetch_settings(&self) -> Result<FrontendSettings, ApiError>;
}

#[async_trait]
pub trait Detector: Send + Sync {
    /// Ordered best-first; an empty list is permissible.
    async fn detect(&self, text: &str) -> Result<Vec<Detection>, ApiError>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, ApiError>;
}

#[async_trait]
pub trait LexicalSearch: Send + Sync {
    /// Up to K candidates in retrieval order, tier-tagged.
    async fn search(&self, word: &str) -> Result<Vec<LexicalHit>, ApiError>;
}
