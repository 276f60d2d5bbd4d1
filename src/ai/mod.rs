//! AI adapter: provider abstraction + typed capability layer.
//!
//! Handlers depend on [`AiService`], which turns articles and questions
//! into prompts, calls the low-level [`TextProvider`], and parses the
//! response into typed values. Every capability degrades to a safe
//! fallback when the provider is disabled or a call fails; nothing in
//! here ever panics into handler code.

pub mod cache;
pub mod provider;

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::article::{AnalysisTopic, Article, DesignProposal, SourceRef};
use crate::config::ai::AiConfig;

pub use cache::CachingProvider;
pub use provider::{DisabledProvider, GeminiProvider, MockProvider};

/// One prior turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ChatTurn {
    /// "user" or "model".
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            text: text.to_string(),
        }
    }

    pub fn model(text: &str) -> Self {
        Self {
            role: "model".to_string(),
            text: text.to_string(),
        }
    }
}

/// A single text-generation request. Everything the provider needs is in
/// here, which also makes it the cache key for [`CachingProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct GenRequest {
    #[serde(default)]
    pub system: Option<String>,
    pub prompt: String,
    /// Ask the provider for a strict JSON body.
    #[serde(default)]
    pub json_mode: bool,
    /// Ground the answer in web search and return citations.
    #[serde(default)]
    pub web_search: bool,
    /// Prior conversation turns (chat only).
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl GenRequest {
    pub fn plain(prompt: String) -> Self {
        Self {
            prompt,
            ..Self::default()
        }
    }
}

/// Provider output: the generated text plus any web citations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenResponse {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

/// Low-level provider: performs one remote call. Separated from the
/// capability layer so the same caching wrapper serves production and
/// tests.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// `None` signals any failure: no credential, network error, quota,
    /// malformed body. Callers fall back; they never see the cause.
    async fn generate(&self, req: &GenRequest) -> Option<GenResponse>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

pub type DynProvider = Arc<dyn TextProvider>;

/// Factory: build a provider according to config and environment.
///
/// * `AI_TEST_MODE=mock` → deterministic mock (wrapped in caching).
/// * disabled config or missing API key → disabled provider.
/// * else → Gemini wrapped with file cache + daily limit.
pub fn build_provider(config: &AiConfig) -> DynProvider {
    if std::env::var("AI_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        let mock = MockProvider::fixed("Concrete Dreams: A Curated Tour");
        return Arc::new(CachingProvider::new(
            mock,
            cache::default_cache_dir(),
            config.daily_limit,
        ));
    }

    if !config.enabled || config.api_key.is_empty() {
        return Arc::new(DisabledProvider);
    }

    let gemini = GeminiProvider::new(config.api_key.clone(), None);
    Arc::new(CachingProvider::new(
        gemini,
        cache::default_cache_dir(),
        config.daily_limit,
    ))
}

/// Typed capability layer used by handlers and the curation job.
#[derive(Clone)]
pub struct AiService {
    provider: DynProvider,
}

impl AiService {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.name() != "disabled"
    }

    /// Four short analysis questions derived from headline + summary.
    pub async fn generate_analysis_prompts(&self, article: &Article) -> Option<Vec<String>> {
        let req = GenRequest {
            prompt: format!(
                "Based on the article headline \"{}\" and summary \"{}\", generate 4 insightful \
                 and distinct questions to deeply analyze the topic. Respond as JSON: \
                 {{\"questions\": [\"...\"]}}",
                article.headline, article.summary
            ),
            json_mode: true,
            ..GenRequest::default()
        };
        let resp = self.provider.generate(&req).await?;

        #[derive(Deserialize)]
        struct Questions {
            #[serde(default)]
            questions: Vec<String>,
        }
        let parsed: Questions = parse_json_body(&resp.text)?;
        if parsed.questions.is_empty() {
            None
        } else {
            Some(parsed.questions)
        }
    }

    /// Web-grounded answer with citations. Infallible by contract: a
    /// provider failure becomes a fixed error answer with no sources.
    pub async fn analyze_topic(&self, question: &str) -> AnalysisTopic {
        if !self.is_enabled() {
            return AnalysisTopic {
                question: question.to_string(),
                answer: "AI service not available.".to_string(),
                sources: Vec::new(),
            };
        }
        let req = GenRequest {
            prompt: question.to_string(),
            web_search: true,
            ..GenRequest::default()
        };
        match self.provider.generate(&req).await {
            Some(resp) => AnalysisTopic {
                question: question.to_string(),
                answer: resp.text,
                sources: resp.sources,
            },
            None => AnalysisTopic {
                question: question.to_string(),
                answer: "An error occurred during analysis.".to_string(),
                sources: Vec::new(),
            },
        }
    }

    /// Conceptual design proposal inspired by the article.
    pub async fn generate_proposal(&self, article: &Article) -> Option<DesignProposal> {
        let req = GenRequest {
            prompt: format!(
                "Inspired by the article with headline \"{}\", generate a conceptual \
                 architectural proposal. Respond as JSON: {{\"title\": \"...\", \
                 \"description\": \"...\", \"key_features\": [\"...\"], \"materials\": [\"...\"]}}",
                article.headline
            ),
            json_mode: true,
            ..GenRequest::default()
        };
        let resp = self.provider.generate(&req).await?;
        parse_json_body(&resp.text)
    }

    /// Short collection title for the daily curation.
    pub async fn generate_collection_title(&self, headlines: &[String]) -> Option<String> {
        let req = GenRequest {
            prompt: format!(
                "Generate a short, catchy title (at most 6 words) for a curated collection of \
                 these articles: {}. Output only the title.",
                headlines.join(", ")
            ),
            ..GenRequest::default()
        };
        let resp = self.provider.generate(&req).await?;
        let title = resp.text.trim().trim_matches('"').trim().to_string();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    /// One completed conversational turn given the prior history.
    pub async fn chat_reply(
        &self,
        article_headline: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Option<String> {
        let req = GenRequest {
            system: Some(format!(
                "You are an expert chatbot specializing in architecture, design, and technology. \
                 Your current context is an article titled \"{article_headline}\". Answer \
                 questions related to this topic."
            )),
            prompt: message.to_string(),
            history: history.to_vec(),
            ..GenRequest::default()
        };
        let resp = self.provider.generate(&req).await?;
        let text = resp.text.trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// One-paragraph summary (backs the read-aloud tool).
    pub async fn summarize(&self, article: &Article) -> Option<String> {
        let req = GenRequest {
            prompt: format!(
                "Summarize the following article in one short paragraph, plain prose, no lists. \
                 Headline: \"{}\". Summary: \"{}\".",
                article.headline, article.summary
            ),
            ..GenRequest::default()
        };
        let resp = self.provider.generate(&req).await?;
        let text = resp.text.trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Web-grounded article search. Failures yield an empty list.
    pub async fn search_articles(&self, query: &str) -> Vec<Article> {
        let req = GenRequest {
            prompt: format!(
                "Find recent news articles about: \"{query}\". For each article, provide a \
                 headline, a one-sentence summary, the source, and the country. Also provide \
                 relevant influences (e.g., Sustainability, Technology) and keywords. Format \
                 each article as lines 'Headline:', 'Summary:', 'Source:', 'Country:', \
                 'Influences:', 'Keywords:' separated by '---'."
            ),
            web_search: true,
            ..GenRequest::default()
        };
        match self.provider.generate(&req).await {
            Some(resp) => crate::search::parse_search_articles(&resp.text),
            None => {
                warn!(provider = self.provider.name(), "search call failed");
                Vec::new()
            }
        }
    }
}

/// Parse a JSON body that may arrive wrapped in a Markdown code fence.
pub(crate) fn parse_json_body<T: serde::de::DeserializeOwned>(text: &str) -> Option<T> {
    static FENCE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence regex"));
    let stripped = FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();
    match serde_json::from_str(stripped) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "malformed JSON from provider");
            None
        }
    }
}
