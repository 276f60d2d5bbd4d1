//! Feed tuning config (TOML).
//!
//! ```toml
//! [feed]
//! page_size = 5
//!
//! [weights]
//! preferred_influence = 5
//! liked_influence = 3
//! liked_keyword = 2
//! liked_source = 1
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::ranking::ScoringWeights;

pub const DEFAULT_FEED_CONFIG_PATH: &str = "config/feed.toml";
pub const ENV_FEED_CONFIG_PATH: &str = "FEED_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub feed: FeedSection,
    #[serde(default)]
    pub weights: ScoringWeights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSection {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    5
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed: FeedSection::default(),
            weights: ScoringWeights::default(),
        }
    }
}

impl FeedConfig {
    /// Load from `FEED_CONFIG_PATH` (or the default path). Missing file
    /// or parse error → defaults, with a warning for the latter.
    pub fn load() -> Self {
        let path = std::env::var(ENV_FEED_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_FEED_CONFIG_PATH.to_string());
        Self::load_from_file(path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(s) => match toml::from_str::<FeedConfig>(&s) {
                Ok(cfg) => cfg.sanitized(),
                Err(e) => {
                    warn!(path = %path.as_ref().display(), error = %e, "bad feed config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Keep values in sane ranges: a zero page size would make every
    /// view empty, negative weights would invert the ranking.
    fn sanitized(mut self) -> Self {
        if self.feed.page_size == 0 {
            self.feed.page_size = default_page_size();
        }
        let d = ScoringWeights::default();
        if self.weights.preferred_influence < 0 {
            self.weights.preferred_influence = d.preferred_influence;
        }
        if self.weights.liked_influence < 0 {
            self.weights.liked_influence = d.liked_influence;
        }
        if self.weights.liked_keyword < 0 {
            self.weights.liked_keyword = d.liked_keyword;
        }
        if self.weights.liked_source < 0 {
            self.weights.liked_source = d.liked_source;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = FeedConfig::load_from_file("definitely/not/here.toml");
        assert_eq!(cfg.feed.page_size, 5);
        assert_eq!(cfg.weights, ScoringWeights::default());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(f, "[weights]\npreferred_influence = 10").expect("write");
        let cfg = FeedConfig::load_from_file(f.path());
        assert_eq!(cfg.weights.preferred_influence, 10);
        assert_eq!(cfg.weights.liked_keyword, 2);
        assert_eq!(cfg.feed.page_size, 5);
    }

    #[test]
    fn invalid_values_are_clamped() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(f, "[feed]\npage_size = 0\n[weights]\nliked_source = -4").expect("write");
        let cfg = FeedConfig::load_from_file(f.path());
        assert_eq!(cfg.feed.page_size, 5);
        assert_eq!(cfg.weights.liked_source, 1);
    }
}
