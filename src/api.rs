use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::ai::{AiService, ChatTurn};
use crate::article::{AnalysisTopic, Article, DesignProposal};
use crate::config::feed::FeedConfig;
use crate::curation::{self, DailyCuration};
use crate::feed::FeedService;
use crate::profile::{PreferenceSnapshot, ToggleKind, UserProfile};
use crate::store::SharedStore;
use crate::view::ViewState;

/// The mutable heart of the app: profile + feed + ephemeral view state.
/// Handlers serialize access through one lock and never hold it across
/// an await.
pub struct AppCore {
    pub profile: UserProfile,
    pub feed: FeedService,
    pub view: ViewState,
}

#[derive(Clone)]
pub struct AppState {
    core: Arc<Mutex<AppCore>>,
    ai: Arc<AiService>,
    store: SharedStore,
}

impl AppState {
    pub fn new(core: AppCore, ai: AiService, store: SharedStore) -> Self {
        Self {
            core: Arc::new(Mutex::new(core)),
            ai: Arc::new(ai),
            store,
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppCore> {
        self.core.lock().expect("app core mutex poisoned")
    }
}

/// Build the app state from loaded config and a store.
pub fn build_state(store: SharedStore, ai: AiService, config: &FeedConfig) -> AppState {
    let profile = UserProfile::load(store.clone());
    let feed = FeedService::new(
        crate::catalog::seed_articles(),
        config.feed.page_size,
        config.weights,
    );
    AppState::new(
        AppCore {
            profile,
            feed,
            view: ViewState::new(),
        },
        ai,
        store,
    )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/feed", get(get_feed))
        .route("/feed/more", post(load_more))
        .route("/toggle", post(toggle))
        .route("/countries", get(countries))
        .route("/profile", get(get_profile))
        .route("/onboarding/complete", post(complete_onboarding))
        .route("/article/active", post(set_active_article))
        .route("/daily", get(daily))
        .route("/search", post(search))
        .route("/search/clear", post(clear_search))
        .route("/ai/prompts", post(ai_prompts))
        .route("/ai/analyze", post(ai_analyze))
        .route("/ai/proposal", post(ai_proposal))
        .route("/ai/summarize", post(ai_summarize))
        .route("/ai/chat", post(ai_chat))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// ------------------------------------------------------------
// Feed & profile
// ------------------------------------------------------------

#[derive(Serialize)]
struct FeedResp {
    articles: Vec<Article>,
    pages: usize,
    liked: Vec<Article>,
    bookmarked: Vec<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_article_id: Option<String>,
}

fn feed_response(core: &mut AppCore) -> FeedResp {
    let AppCore {
        profile,
        feed,
        view,
    } = core;
    let articles = feed.articles(profile);
    let snap = profile.snapshot();
    FeedResp {
        articles,
        pages: feed.pages(),
        liked: feed.liked_articles(&snap),
        bookmarked: feed.bookmarked_articles(&snap),
        active_article_id: view.active_article_id.clone(),
    }
}

async fn get_feed(State(state): State<AppState>) -> Json<FeedResp> {
    let mut core = state.lock();
    Json(feed_response(&mut core))
}

async fn load_more(State(state): State<AppState>) -> Json<FeedResp> {
    let mut core = state.lock();
    core.feed.load_more();
    Json(feed_response(&mut core))
}

#[derive(Deserialize)]
struct ToggleReq {
    kind: ToggleKind,
    value: String,
}

#[derive(Serialize)]
struct ProfileResp {
    liked_article_ids: Vec<String>,
    bookmarked_article_ids: Vec<String>,
    preferred_influences: Vec<String>,
    preferred_countries: Vec<String>,
    onboarding_completed: bool,
}

impl From<PreferenceSnapshot> for ProfileResp {
    fn from(s: PreferenceSnapshot) -> Self {
        Self {
            liked_article_ids: s.liked_article_ids.into_iter().collect(),
            bookmarked_article_ids: s.bookmarked_article_ids.into_iter().collect(),
            preferred_influences: s.preferred_influences.into_iter().collect(),
            preferred_countries: s.preferred_countries.into_iter().collect(),
            onboarding_completed: s.onboarding_completed,
        }
    }
}

async fn toggle(State(state): State<AppState>, Json(body): Json<ToggleReq>) -> Json<ProfileResp> {
    let mut core = state.lock();
    core.profile.toggle(body.kind, &body.value);
    Json(core.profile.snapshot().into())
}

async fn get_profile(State(state): State<AppState>) -> Json<ProfileResp> {
    let core = state.lock();
    Json(core.profile.snapshot().into())
}

async fn complete_onboarding(State(state): State<AppState>) -> Json<ProfileResp> {
    let mut core = state.lock();
    core.profile.complete_onboarding();
    Json(core.profile.snapshot().into())
}

#[derive(Deserialize)]
struct ActiveArticleReq {
    /// `null` clears the active article.
    article_id: Option<String>,
}

async fn set_active_article(
    State(state): State<AppState>,
    Json(body): Json<ActiveArticleReq>,
) -> Result<Json<FeedResp>, (StatusCode, String)> {
    if let Some(id) = &body.article_id {
        // Accept any article currently known: local catalog or search
        // results may both be on screen.
        find_article(&state, id)?;
    }
    let mut core = state.lock();
    core.view.set_active_article(body.article_id);
    Ok(Json(feed_response(&mut core)))
}

async fn countries(State(state): State<AppState>) -> Json<Vec<String>> {
    let core = state.lock();
    Json(core.feed.available_countries())
}

// ------------------------------------------------------------
// Daily curation
// ------------------------------------------------------------

async fn daily(State(state): State<AppState>) -> Json<DailyCuration> {
    // Snapshot everything under the lock, then run the (possibly latent)
    // curation without it.
    let (catalog, prefs, weights) = {
        let core = state.lock();
        (
            core.feed.local_articles().to_vec(),
            core.profile.snapshot(),
            *core.feed.weights(),
        )
    };
    let today = curation::today_key();
    let curation =
        curation::daily_curation(&catalog, &prefs, &today, &state.store, &state.ai, &weights)
            .await;
    Json(curation)
}

// ------------------------------------------------------------
// Search
// ------------------------------------------------------------

#[derive(Deserialize)]
struct SearchReq {
    query: String,
}

#[derive(Serialize)]
struct SearchResp {
    replaced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    articles: Vec<Article>,
}

async fn search(State(state): State<AppState>, Json(body): Json<SearchReq>) -> Json<SearchResp> {
    let results = state.ai.search_articles(&body.query).await;
    if results.is_empty() {
        // Keep the current feed; the panel shows the error inline.
        return Json(SearchResp {
            replaced: false,
            error: Some("Failed to fetch news articles.".to_string()),
            articles: Vec::new(),
        });
    }
    let mut core = state.lock();
    core.feed.replace_master(results.clone());
    Json(SearchResp {
        replaced: true,
        error: None,
        articles: results,
    })
}

async fn clear_search(State(state): State<AppState>) -> Json<FeedResp> {
    let mut core = state.lock();
    core.feed.restore_local();
    Json(feed_response(&mut core))
}

// ------------------------------------------------------------
// AI tools
// ------------------------------------------------------------

#[derive(Deserialize)]
struct ArticleReq {
    article_id: String,
}

fn find_article(state: &AppState, id: &str) -> Result<Article, (StatusCode, String)> {
    let core = state.lock();
    core.feed
        .find_article(id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown article: {id}")))
}

#[derive(Serialize)]
struct PromptsResp {
    questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn ai_prompts(
    State(state): State<AppState>,
    Json(body): Json<ArticleReq>,
) -> Result<Json<PromptsResp>, (StatusCode, String)> {
    let article = find_article(&state, &body.article_id)?;
    Ok(Json(
        match state.ai.generate_analysis_prompts(&article).await {
            Some(questions) => PromptsResp {
                questions,
                error: None,
            },
            None => PromptsResp {
                questions: Vec::new(),
                error: Some("Could not generate analysis prompts.".to_string()),
            },
        },
    ))
}

#[derive(Deserialize)]
struct AnalyzeReq {
    question: String,
}

async fn ai_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Json<AnalysisTopic> {
    Json(state.ai.analyze_topic(&body.question).await)
}

#[derive(Serialize)]
struct ProposalResp {
    #[serde(skip_serializing_if = "Option::is_none")]
    proposal: Option<DesignProposal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn ai_proposal(
    State(state): State<AppState>,
    Json(body): Json<ArticleReq>,
) -> Result<Json<ProposalResp>, (StatusCode, String)> {
    let article = find_article(&state, &body.article_id)?;
    Ok(Json(match state.ai.generate_proposal(&article).await {
        Some(proposal) => ProposalResp {
            proposal: Some(proposal),
            error: None,
        },
        None => ProposalResp {
            proposal: None,
            error: Some("Failed to generate proposal.".to_string()),
        },
    }))
}

#[derive(Serialize)]
struct SummaryResp {
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn ai_summarize(
    State(state): State<AppState>,
    Json(body): Json<ArticleReq>,
) -> Result<Json<SummaryResp>, (StatusCode, String)> {
    let article = find_article(&state, &body.article_id)?;
    Ok(Json(match state.ai.summarize(&article).await {
        Some(summary) => SummaryResp {
            summary,
            error: None,
        },
        // The article's own summary is a serviceable fallback for the
        // read-aloud tool.
        None => SummaryResp {
            summary: article.summary.clone(),
            error: Some("AI summary unavailable, using article summary.".to_string()),
        },
    }))
}

#[derive(Deserialize)]
struct ChatReq {
    article_id: String,
    #[serde(default)]
    history: Vec<ChatTurn>,
    message: String,
}

#[derive(Serialize)]
struct ChatResp {
    reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn ai_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatReq>,
) -> Result<Json<ChatResp>, (StatusCode, String)> {
    let article = find_article(&state, &body.article_id)?;
    Ok(Json(
        match state
            .ai
            .chat_reply(&article.headline, &body.history, &body.message)
            .await
        {
            Some(reply) => ChatResp { reply, error: None },
            None => ChatResp {
                reply: String::new(),
                error: Some("Chat is unavailable right now.".to_string()),
            },
        },
    ))
}
