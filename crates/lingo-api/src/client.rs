use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use lingo_core::catalog::Language;
use lingo_core::ranker::{LexicalHit, MAX_CANDIDATES, MatchTier, Sense, normalize_query};

use crate::{
    ApiError, CatalogSource, Detection, Detector, FrontendSettings, LexicalSearch, Translation,
    Translator,
};

/// HTTP client against the translation/lexical backend.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    max_results: usize,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self::with_max_results(base_url, MAX_CANDIDATES)
    }

    pub fn with_max_results(base_url: String, max_results: usize) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            max_results,
        }
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_form<T>(&self, path: &str, form: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!(status = status.as_u16(), %message, "backend request failed");
            return Err(ApiError::Backend(message));
        }
        Ok(response.json::<T>().await?)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Error payloads carry `{ "error": msg }`; anything else falls back
/// to the HTTP status.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()))
}

/// Wire shape of one search hit. The producing tier is not sent
/// explicitly; it is implied by how the hit's word relates to the
/// query.
#[derive(Deserialize)]
struct SearchHit {
    word: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    senses: Vec<Sense>,
}

fn imply_tier(normalized_query: &str, word: &str) -> MatchTier {
    if word == normalized_query {
        MatchTier::ExactKeyword
    } else if word.to_lowercase() == normalized_query {
        MatchTier::CaseInsensitivePhrase
    } else {
        MatchTier::Fuzzy
    }
}

#[async_trait]
impl CatalogSource for HttpBackend {
    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError> {
        self.get_json("/languages").await
    }

    async fn fetch_settings(&self) -> Result<FrontendSettings, ApiError> {
        self.get_json("/frontend/settings").await
    }
}

#[async_trait]
impl Detector for HttpBackend {
    async fn detect(&self, text: &str) -> Result<Vec<Detection>, ApiError> {
        self.post_form("/detect", &[("q", text)]).await
    }
}

#[async_trait]
impl Translator for HttpBackend {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, ApiError> {
        self.post_form(
            "/translate",
            &[
                ("q", text),
                ("source", source),
                ("target", target),
                ("format", "text"),
            ],
        )
        .await
    }
}

#[async_trait]
impl LexicalSearch for HttpBackend {
    async fn search(&self, word: &str) -> Result<Vec<LexicalHit>, ApiError> {
        let normalized = normalize_query(word);
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("word", word)])
            .send()
            .await?;
        let hits: Vec<SearchHit> = Self::decode(response).await?;
        Ok(hits
            .into_iter()
            .take(self.max_results)
            .map(|hit| {
                let tier = imply_tier(&normalized, &hit.word);
                LexicalHit {
                    word: hit.word,
                    score: hit.score,
                    tier,
                    senses: hit.senses,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_implied_by_query_relation() {
        assert_eq!(imply_tier("run", "run"), MatchTier::ExactKeyword);
        assert_eq!(imply_tier("run", "Run"), MatchTier::CaseInsensitivePhrase);
        assert_eq!(imply_tier("run", "rung"), MatchTier::Fuzzy);
    }

    #[test]
    fn error_message_prefers_payload() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error": "unsupported language"}"#),
            "unsupported language"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP error! status: 500"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, r#"{"detail": "x"}"#),
            "HTTP error! status: 502"
        );
    }
}
