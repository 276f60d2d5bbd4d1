//! Key/value persistence boundary.
//!
//! Everything the engine persists (preference snapshot, daily curation)
//! goes through [`KvStore`] as JSON values. Writes are best-effort: a
//! failed write is logged and the in-memory state stays authoritative
//! for the session. Malformed stored data reads back as absent.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::warn;

/// JSON-valued key/value store. Implementations must never panic; all
/// failure modes collapse to `None` on read and a logged no-op on write.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: &Value);
    fn remove(&self, key: &str);
}

/// Shared handle used across the app.
pub type SharedStore = Arc<dyn KvStore>;

/// File-backed store: one `<key>.json` file per key under a base
/// directory. Writes go through a tmp file + rename so readers never see
/// a half-written value.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(error = %e, dir = %dir.display(), "could not create store dir");
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal identifiers (e.g. "vizzey_daily"); sanitize
        // anyway so a stray separator cannot escape the base dir.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(%key, error = %e, "malformed stored value, treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &Value) {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
        let result = fs::File::create(&tmp)
            .and_then(|mut f| f.write_all(json.as_bytes()))
            .and_then(|_| fs::rename(&tmp, &path));
        if let Err(e) = result {
            warn!(%key, error = %e, "persist failed, in-memory state stands");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(%key, error = %e, "remove failed");
            }
        }
    }
}

/// In-memory store for tests and headless runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    /// Number of stored keys; handy in assertions.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &Value) {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.clone());
    }

    fn remove(&self, key: &str) {
        self.inner.lock().expect("store mutex poisoned").remove(key);
    }
}
