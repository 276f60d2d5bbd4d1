// src/config/ai.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use tracing::warn;

pub const DEFAULT_AI_CONFIG_PATH: &str = "config/ai.json";

fn default_daily_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    /// "gemini" (case-insensitive); anything else is treated as disabled.
    #[serde(default)]
    pub provider: String,
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    /// "ENV" means: read from GEMINI_API_KEY.
    #[serde(default)]
    pub api_key: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: String::new(),
            daily_limit: default_daily_limit(),
            api_key: String::new(),
        }
    }
}

impl AiConfig {
    /// Load from `config/ai.json`; a missing or malformed file disables
    /// AI rather than failing startup (core ranking must never block on
    /// provider configuration).
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_AI_CONFIG_PATH)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let mut cfg: AiConfig = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!(path = %path.as_ref().display(), error = %e, "bad ai config, AI disabled");
                AiConfig::default()
            }),
            Err(_) => AiConfig::default(),
        };

        // Normalize provider.
        cfg.provider = cfg.provider.to_lowercase();

        // Resolve api key if "ENV". A missing env var disables AI
        // instead of erroring: the feed works without it.
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            match env::var("GEMINI_API_KEY") {
                Ok(key) => cfg.api_key = key,
                Err(_) => {
                    warn!("GEMINI_API_KEY not set, AI features disabled");
                    cfg.api_key = String::new();
                    cfg.enabled = false;
                }
            }
        }

        if cfg.enabled && cfg.provider != "gemini" {
            warn!(provider = %cfg.provider, "unsupported provider, AI disabled");
            cfg.enabled = false;
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn missing_file_disables_ai() {
        let cfg = AiConfig::load_from_file("no/such/ai.json");
        assert!(!cfg.enabled);
        assert_eq!(cfg.daily_limit, 20);
    }

    #[test]
    #[serial]
    fn env_key_indirection_resolves() {
        std::env::set_var("GEMINI_API_KEY", "test-key-123");
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        write!(
            f,
            r#"{{"enabled": true, "provider": "Gemini", "daily_limit": 5, "api_key": "ENV"}}"#
        )
        .expect("write");
        let cfg = AiConfig::load_from_file(f.path());
        assert!(cfg.enabled);
        assert_eq!(cfg.provider, "gemini");
        assert_eq!(cfg.api_key, "test-key-123");
        assert_eq!(cfg.daily_limit, 5);
        std::env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    #[serial]
    fn missing_env_key_disables_instead_of_failing() {
        std::env::remove_var("GEMINI_API_KEY");
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        write!(
            f,
            r#"{{"enabled": true, "provider": "gemini", "api_key": "ENV"}}"#
        )
        .expect("write");
        let cfg = AiConfig::load_from_file(f.path());
        assert!(!cfg.enabled);
        assert!(cfg.api_key.is_empty());
    }

    #[test]
    fn unknown_provider_is_disabled() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        write!(
            f,
            r#"{{"enabled": true, "provider": "openai", "api_key": "sk-x"}}"#
        )
        .expect("write");
        let cfg = AiConfig::load_from_file(f.path());
        assert!(!cfg.enabled);
    }
}
