//! Parser for the AI provider's line-oriented search answer.
//!
//! The search prompt asks for `Headline:` / `Summary:` / `Source:` /
//! `Country:` / `Influences:` / `Keywords:` lines per article, articles
//! separated by `---`. The model does not always comply perfectly, so
//! every field has a default and articles without a headline are
//! dropped.

use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::article::{Article, ImageRef};

static FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(Headline|Summary|Source|Country|Influences|Keywords)\s*:\s*(.+?)\s*$").expect("field regex"));

/// Parse a provider answer into articles. IDs are synthesized as
/// `search-<nonce>-<index>` so they can never collide with catalog IDs.
pub fn parse_search_articles(text: &str) -> Vec<Article> {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    parse_with_nonce(text, nonce)
}

fn parse_with_nonce(text: &str, nonce: u128) -> Vec<Article> {
    text.split("---")
        .enumerate()
        .filter_map(|(index, block)| parse_block(block, nonce, index))
        .collect()
}

fn parse_block(block: &str, nonce: u128, index: usize) -> Option<Article> {
    let mut headline = None;
    let mut summary = None;
    let mut source = None;
    let mut country = None;
    let mut influences = Vec::new();
    let mut keywords = Vec::new();

    for caps in FIELD.captures_iter(block) {
        let value = caps[2].trim().to_string();
        match &caps[1] {
            "Headline" => headline = Some(value),
            "Summary" => summary = Some(value),
            "Source" => source = Some(value),
            "Country" => country = Some(value),
            "Influences" => influences = split_tags(&value),
            "Keywords" => keywords = split_tags(&value),
            _ => {}
        }
    }

    // Untitled blocks are noise (preamble, trailing commentary).
    let headline = headline?;
    let seed = nonce.wrapping_add(index as u128);
    Some(Article {
        id: format!("search-{nonce}-{index}"),
        headline,
        summary: summary.unwrap_or_else(|| "No summary available.".to_string()),
        source: source.unwrap_or_else(|| "Unknown".to_string()),
        country: country.unwrap_or_else(|| "Global".to_string()),
        images: vec![ImageRef {
            url: format!("https://picsum.photos/seed/{seed}/1080/1920"),
            placeholder: format!("https://picsum.photos/seed/{seed}/20/35"),
        }],
        influences,
        keywords,
    })
}

fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
