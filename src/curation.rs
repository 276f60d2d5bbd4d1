//! Daily curation job: once per calendar date, pick the top 4 articles
//! of the fully personalized catalog (no country/influence filters) and
//! ask the AI for a collection title.
//!
//! Cached by date key in the store: a second call on the same date
//! returns the stored record untouched and makes no AI call. Title
//! generation failures degrade to a fixed default; the job always
//! succeeds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::AiService;
use crate::article::Article;
use crate::profile::PreferenceSnapshot;
use crate::ranking::{personalize, ScoringWeights};
use crate::store::SharedStore;

pub const DAILY_CURATION_KEY: &str = "vizzey_daily";
pub const CURATION_SIZE: usize = 4;

const SPARSE_CATALOG_TITLE: &str = "Today's Top Picks";
const DEFAULT_TITLE: &str = "Today's Curated Feed";

/// The derived daily artifact. Stable for the remainder of its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCuration {
    pub title: String,
    pub articles: Vec<Article>,
    /// YYYY-MM-DD.
    pub date: String,
}

/// Today's date key in the local timezone.
pub fn today_key() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Compute (or fetch) the curation for `today`.
pub async fn daily_curation(
    catalog: &[Article],
    prefs: &PreferenceSnapshot,
    today: &str,
    store: &SharedStore,
    ai: &AiService,
    weights: &ScoringWeights,
) -> DailyCuration {
    // Cache hit: same date, return unchanged.
    if let Some(cached) = load_cached(store) {
        if cached.date == today {
            debug!(date = today, "daily curation served from cache");
            return cached;
        }
    }

    let personalized = personalize(catalog, prefs, weights);
    let curated: Vec<Article> = personalized.into_iter().take(CURATION_SIZE).collect();

    // Too little material for a titled collection; don't bother the
    // provider and don't cache a stub.
    if curated.len() < CURATION_SIZE {
        return DailyCuration {
            title: SPARSE_CATALOG_TITLE.to_string(),
            articles: curated,
            date: today.to_string(),
        };
    }

    let headlines: Vec<String> = curated.iter().map(|a| a.headline.clone()).collect();
    let title = ai
        .generate_collection_title(&headlines)
        .await
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let curation = DailyCuration {
        title,
        articles: curated,
        date: today.to_string(),
    };
    persist(store, &curation);
    info!(date = today, title = %curation.title, "daily curation generated");
    curation
}

fn load_cached(store: &SharedStore) -> Option<DailyCuration> {
    let value = store.get(DAILY_CURATION_KEY)?;
    serde_json::from_value(value).ok()
}

fn persist(store: &SharedStore, curation: &DailyCuration) {
    match serde_json::to_value(curation) {
        Ok(v) => store.set(DAILY_CURATION_KEY, &v),
        Err(e) => tracing::warn!(error = %e, "could not serialize daily curation"),
    }
}
