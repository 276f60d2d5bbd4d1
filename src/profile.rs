//! User preference store: liked/bookmarked article IDs, preferred
//! influences and countries, onboarding flag.
//!
//! Mutations go through [`UserProfile::toggle`] (flip set membership) and
//! persist the full snapshot as a side effect. Persistence is best-effort
//! and non-transactional: a failed write never rolls back memory. Loading
//! tolerates absent or malformed keys per collection, so a damaged store
//! can never fail startup.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::store::SharedStore;

pub const LIKED_ARTICLES_KEY: &str = "vizzey_liked_articles";
pub const BOOKMARKED_ARTICLES_KEY: &str = "vizzey_bookmarked_articles";
pub const PREFERRED_INFLUENCES_KEY: &str = "vizzey_preferred_influences";
pub const PREFERRED_COUNTRIES_KEY: &str = "vizzey_preferred_countries";
pub const ONBOARDING_KEY: &str = "vizzey_onboarding_completed";

/// Which preference set a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleKind {
    Like,
    Bookmark,
    Influence,
    Country,
}

/// Immutable read of the preference state, taken per recomputation.
/// Ranking and curation only ever see this, never the live store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSnapshot {
    pub liked_article_ids: BTreeSet<String>,
    pub bookmarked_article_ids: BTreeSet<String>,
    pub preferred_influences: BTreeSet<String>,
    pub preferred_countries: BTreeSet<String>,
    pub onboarding_completed: bool,
}

/// Owner of the mutable preference state.
pub struct UserProfile {
    snapshot: PreferenceSnapshot,
    store: SharedStore,
    /// Bumped on every mutation; the feed service keys its memoized view
    /// on this.
    revision: u64,
}

impl UserProfile {
    /// Load the persisted profile. Each collection falls back to empty
    /// (and the flag to false) independently when its key is absent or
    /// malformed.
    pub fn load(store: SharedStore) -> Self {
        let snapshot = PreferenceSnapshot {
            liked_article_ids: read_string_set(&store, LIKED_ARTICLES_KEY),
            bookmarked_article_ids: read_string_set(&store, BOOKMARKED_ARTICLES_KEY),
            preferred_influences: read_string_set(&store, PREFERRED_INFLUENCES_KEY),
            preferred_countries: read_string_set(&store, PREFERRED_COUNTRIES_KEY),
            onboarding_completed: store
                .get(ONBOARDING_KEY)
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        };
        Self {
            snapshot,
            store,
            revision: 0,
        }
    }

    /// Flip membership of `value` in the set selected by `kind`.
    /// Idempotent under double-toggle; always succeeds.
    pub fn toggle(&mut self, kind: ToggleKind, value: &str) {
        let set = match kind {
            ToggleKind::Like => &mut self.snapshot.liked_article_ids,
            ToggleKind::Bookmark => &mut self.snapshot.bookmarked_article_ids,
            ToggleKind::Influence => &mut self.snapshot.preferred_influences,
            ToggleKind::Country => &mut self.snapshot.preferred_countries,
        };
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        self.mutated();
    }

    pub fn complete_onboarding(&mut self) {
        self.snapshot.onboarding_completed = true;
        self.mutated();
    }

    /// Current snapshot; cheap clone of small sets.
    pub fn snapshot(&self) -> PreferenceSnapshot {
        self.snapshot.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn mutated(&mut self) {
        self.revision += 1;
        self.persist();
    }

    /// Write the full snapshot. Errors are absorbed (and logged) inside
    /// the store.
    fn persist(&self) {
        let s = &self.snapshot;
        self.store
            .set(LIKED_ARTICLES_KEY, &set_to_json(&s.liked_article_ids));
        self.store.set(
            BOOKMARKED_ARTICLES_KEY,
            &set_to_json(&s.bookmarked_article_ids),
        );
        self.store.set(
            PREFERRED_INFLUENCES_KEY,
            &set_to_json(&s.preferred_influences),
        );
        self.store.set(
            PREFERRED_COUNTRIES_KEY,
            &set_to_json(&s.preferred_countries),
        );
        self.store
            .set(ONBOARDING_KEY, &json!(s.onboarding_completed));
    }
}

fn set_to_json(set: &BTreeSet<String>) -> Value {
    json!(set.iter().collect::<Vec<_>>())
}

/// Read a persisted string array as a set; anything malformed (wrong
/// type, non-string elements) degrades to empty.
fn read_string_set(store: &SharedStore, key: &str) -> BTreeSet<String> {
    match store.get(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => BTreeSet::new(),
    }
}
