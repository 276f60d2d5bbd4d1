//! Concrete text providers: the Gemini REST endpoint, a disabled
//! stand-in, and a deterministic mock for tests and local runs.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{GenRequest, GenResponse, TextProvider};
use crate::article::SourceRef;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini provider (generateContent API). Requires an API key.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// `model_override`: pass `Some("gemini-2.5-pro")` to override.
    pub fn new(api_key: String, model_override: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("vizzey-feed-engine/0.1 (+github.com/vizzey/vizzey-feed-engine)")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(20))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key,
            model: model_override.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    async fn generate(&self, req: &GenRequest) -> Option<GenResponse> {
        if self.api_key.is_empty() {
            return None;
        }

        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }
        #[derive(Serialize)]
        struct Content<'a> {
            role: &'a str,
            parts: Vec<Part<'a>>,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SystemInstruction<'a> {
            parts: Vec<Part<'a>>,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerationConfig<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            response_mime_type: Option<&'a str>,
            temperature: f32,
        }
        #[derive(Serialize, Default)]
        struct Tool {
            #[serde(rename = "googleSearch", skip_serializing_if = "Option::is_none")]
            google_search: Option<serde_json::Value>,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            contents: Vec<Content<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            system_instruction: Option<SystemInstruction<'a>>,
            generation_config: GenerationConfig<'a>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            tools: Vec<Tool>,
        }

        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Candidate {
            content: Option<RespContent>,
            grounding_metadata: Option<GroundingMetadata>,
        }
        #[derive(Deserialize)]
        struct RespContent {
            #[serde(default)]
            parts: Vec<RespPart>,
        }
        #[derive(Deserialize)]
        struct RespPart {
            #[serde(default)]
            text: String,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct GroundingMetadata {
            #[serde(default)]
            grounding_chunks: Vec<GroundingChunk>,
        }
        #[derive(Deserialize)]
        struct GroundingChunk {
            web: Option<WebChunk>,
        }
        #[derive(Deserialize)]
        struct WebChunk {
            uri: Option<String>,
            title: Option<String>,
        }

        let mut contents: Vec<Content> = req
            .history
            .iter()
            .map(|turn| Content {
                role: if turn.role == "model" { "model" } else { "user" },
                parts: vec![Part { text: &turn.text }],
            })
            .collect();
        contents.push(Content {
            role: "user",
            parts: vec![Part { text: &req.prompt }],
        });

        let body = Req {
            contents,
            system_instruction: req.system.as_deref().map(|s| SystemInstruction {
                parts: vec![Part { text: s }],
            }),
            generation_config: GenerationConfig {
                response_mime_type: req.json_mode.then_some("application/json"),
                temperature: 0.2,
            },
            tools: if req.web_search {
                vec![Tool {
                    google_search: Some(serde_json::json!({})),
                }]
            } else {
                Vec::new()
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .ok()?;

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "gemini call failed");
            return None;
        }
        let parsed: Resp = resp.json().await.ok()?;
        let candidate = parsed.candidates.into_iter().next()?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return None;
        }

        let sources = candidate
            .grounding_metadata
            .map(|g| {
                g.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| match (web.title, web.uri) {
                        (Some(title), Some(uri)) => Some(SourceRef { title, uri }),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(GenResponse { text, sources })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Returns `None` always; used when AI is disabled or unconfigured.
pub struct DisabledProvider;

#[async_trait]
impl TextProvider for DisabledProvider {
    async fn generate(&self, _req: &GenRequest) -> Option<GenResponse> {
        None
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic mock for tests and local runs. Counts calls so tests
/// can assert cache behavior.
pub struct MockProvider {
    fixed: GenResponse,
    calls: AtomicU32,
}

impl MockProvider {
    pub fn fixed(text: &str) -> Self {
        Self {
            fixed: GenResponse {
                text: text.to_string(),
                sources: Vec::new(),
            },
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_response(resp: GenResponse) -> Self {
        Self {
            fixed: resp,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    async fn generate(&self, _req: &GenRequest) -> Option<GenResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(self.fixed.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
