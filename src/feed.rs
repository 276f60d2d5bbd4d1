//! Feed service: ties the catalog, the preference snapshot, and the
//! pagination cursor into the visible article list.
//!
//! The original reactive dependency graph is expressed here as pull-based
//! memoization: the computed view is cached under a key of
//! (profile revision, master-list revision, page count) and recomputed
//! only when one of those inputs moved. Mutations are synchronous, so the
//! next read always sees the latest state.

use crate::article::Article;
use crate::profile::{PreferenceSnapshot, UserProfile};
use crate::ranking::{self, ScoringWeights};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Cache key for the memoized view. Strictly derived from the inputs of
/// `compute_view`, so equal keys imply equal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewKey {
    profile_revision: u64,
    master_revision: u64,
    pages: usize,
}

pub struct FeedService {
    /// The full local catalog; curation and the liked/bookmarked shelves
    /// always read this, regardless of search state.
    local_articles: Vec<Article>,
    /// The master list the view is computed from: local catalog or
    /// search results.
    master: Vec<Article>,
    master_revision: u64,
    pages: usize,
    page_size: usize,
    weights: ScoringWeights,
    cached: Option<(ViewKey, Vec<Article>)>,
}

impl FeedService {
    pub fn new(local_articles: Vec<Article>, page_size: usize, weights: ScoringWeights) -> Self {
        let master = local_articles.clone();
        Self {
            local_articles,
            master,
            master_revision: 0,
            pages: 1,
            page_size: page_size.max(1),
            weights,
            cached: None,
        }
    }

    pub fn local_articles(&self) -> &[Article] {
        &self.local_articles
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// The visible, personalized, paginated list. Memoized; recomputed
    /// only when the profile, the master list, or the cursor changed.
    pub fn articles(&mut self, profile: &UserProfile) -> Vec<Article> {
        let key = ViewKey {
            profile_revision: profile.revision(),
            master_revision: self.master_revision,
            pages: self.pages,
        };
        if let Some((cached_key, view)) = &self.cached {
            if *cached_key == key {
                return view.clone();
            }
        }
        let view = ranking::compute_view(
            &self.master,
            &profile.snapshot(),
            self.pages,
            self.page_size,
            &self.weights,
        );
        self.cached = Some((key, view.clone()));
        view
    }

    /// One page per trigger. Debouncing repeated triggers while content
    /// is still loading is the caller's job.
    pub fn load_more(&mut self) {
        self.pages += 1;
    }

    /// Swap in search results as the master list and rewind pagination.
    pub fn replace_master(&mut self, articles: Vec<Article>) {
        self.master = articles;
        self.master_revision += 1;
        self.pages = 1;
    }

    /// Back to the local catalog (search cleared).
    pub fn restore_local(&mut self) {
        self.master = self.local_articles.clone();
        self.master_revision += 1;
        self.pages = 1;
    }

    /// Liked shelf: full local catalog filtered by liked IDs, catalog
    /// order.
    pub fn liked_articles(&self, prefs: &PreferenceSnapshot) -> Vec<Article> {
        self.local_articles
            .iter()
            .filter(|a| prefs.liked_article_ids.contains(&a.id))
            .cloned()
            .collect()
    }

    pub fn bookmarked_articles(&self, prefs: &PreferenceSnapshot) -> Vec<Article> {
        self.local_articles
            .iter()
            .filter(|a| prefs.bookmarked_article_ids.contains(&a.id))
            .cloned()
            .collect()
    }

    /// Look up an article by ID across the master list (which may be
    /// search results) and the local catalog.
    pub fn find_article(&self, id: &str) -> Option<Article> {
        self.master
            .iter()
            .chain(self.local_articles.iter())
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn available_countries(&self) -> Vec<String> {
        ranking::available_countries(&self.local_articles)
    }
}
