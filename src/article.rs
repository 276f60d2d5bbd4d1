//! Core article value type shared by the catalog, ranking, curation, and
//! search modules. Articles are immutable once created: the catalog
//! provider or the search parser builds them, everything downstream only
//! reads them.

use serde::{Deserialize, Serialize};

/// A single image reference: full-size URL plus a tiny placeholder used
/// while the full image loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub placeholder: String,
}

/// An immutable news article.
///
/// `influences` and `keywords` carry set semantics (no duplicates by
/// construction) but keep their authored order, which matters for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub country: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub influences: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Article {
    /// Builder-style constructor used by the seed catalog and tests.
    pub fn new(id: &str, headline: &str, summary: &str, source: &str, country: &str) -> Self {
        Self {
            id: id.to_string(),
            headline: headline.to_string(),
            summary: summary.to_string(),
            source: source.to_string(),
            country: country.to_string(),
            images: Vec::new(),
            influences: Vec::new(),
            keywords: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: &[(&str, &str)]) -> Self {
        self.images = images
            .iter()
            .map(|(url, placeholder)| ImageRef {
                url: url.to_string(),
                placeholder: placeholder.to_string(),
            })
            .collect();
        self
    }

    pub fn with_influences(mut self, influences: &[&str]) -> Self {
        self.influences = influences.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// A conceptual design proposal generated by the AI adapter from an
/// article headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignProposal {
    pub title: String,
    pub description: String,
    #[serde(default, alias = "keyFeatures")]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
}

/// A web-grounded answer to an analysis question, with citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTopic {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

/// A citation returned by the grounded-answer capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub uri: String,
}
