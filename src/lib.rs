// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod ai;
pub mod api;
pub mod article;
pub mod catalog;
pub mod config;
pub mod curation;
pub mod feed;
pub mod profile;
pub mod ranking;
pub mod search;
pub mod store;
pub mod view;

// ---- Re-exports for stable public API ----
pub use crate::api::{build_state, create_router, AppState};
pub use crate::article::{AnalysisTopic, Article, DesignProposal, SourceRef};
pub use crate::profile::{PreferenceSnapshot, ToggleKind, UserProfile};
pub use crate::ranking::{available_countries, compute_view, personalize, ScoringWeights};

use crate::ai::{build_provider, AiService};
use crate::config::{ai::AiConfig, feed::FeedConfig};
use crate::store::{JsonFileStore, SharedStore};
use std::sync::Arc;

/// Default directory for the file-backed key/value store.
pub const DEFAULT_DATA_DIR: &str = "data";
pub const ENV_DATA_DIR: &str = "VIZZEY_DATA_DIR";

/// Build the full application router with production wiring: file store,
/// configured AI provider, seed catalog. Integration tests call this
/// with `AI_TEST_MODE=mock` to avoid network traffic.
pub fn app() -> axum::Router {
    let data_dir = std::env::var(ENV_DATA_DIR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let store: SharedStore = Arc::new(JsonFileStore::new(data_dir));
    app_with_store(store)
}

/// Same wiring, caller-supplied store (tests use the in-memory one).
pub fn app_with_store(store: SharedStore) -> axum::Router {
    let feed_config = FeedConfig::load();
    let ai_config = AiConfig::load();
    let ai = AiService::new(build_provider(&ai_config));
    let state = build_state(store, ai, &feed_config);
    create_router(state)
}
