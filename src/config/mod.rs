//! Configuration loading: feed tuning from TOML, AI provider settings
//! from JSON. Both loaders are tolerant: a missing or malformed file
//! yields documented defaults rather than failing startup.

pub mod ai;
pub mod feed;
