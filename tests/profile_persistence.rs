//! End-to-end persistence checks: a profile written through the
//! file-backed store must survive a reload, and damaged files must not
//! break startup.

use std::sync::Arc;

use serde_json::json;

use vizzey_feed_engine::profile::{
    ToggleKind, UserProfile, LIKED_ARTICLES_KEY, PREFERRED_COUNTRIES_KEY,
};
use vizzey_feed_engine::store::{JsonFileStore, KvStore, SharedStore};

fn file_store(dir: &tempfile::TempDir) -> SharedStore {
    Arc::new(JsonFileStore::new(dir.path()))
}

#[test]
fn profile_survives_a_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut profile = UserProfile::load(file_store(&dir));
        profile.toggle(ToggleKind::Like, "3");
        profile.toggle(ToggleKind::Like, "16");
        profile.toggle(ToggleKind::Bookmark, "8");
        profile.toggle(ToggleKind::Influence, "Minimalism");
        profile.toggle(ToggleKind::Country, "Japan");
        profile.complete_onboarding();
    }

    // Fresh store handle over the same directory = new session.
    let reloaded = UserProfile::load(file_store(&dir));
    let snap = reloaded.snapshot();
    assert_eq!(snap.liked_article_ids.len(), 2);
    assert!(snap.liked_article_ids.contains("3"));
    assert!(snap.bookmarked_article_ids.contains("8"));
    assert!(snap.preferred_influences.contains("Minimalism"));
    assert!(snap.preferred_countries.contains("Japan"));
    assert!(snap.onboarding_completed);
}

#[test]
fn untoggling_is_persisted_too() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut profile = UserProfile::load(file_store(&dir));
        profile.toggle(ToggleKind::Like, "3");
        profile.toggle(ToggleKind::Like, "3");
    }
    let reloaded = UserProfile::load(file_store(&dir));
    assert!(reloaded.snapshot().liked_article_ids.is_empty());
}

#[test]
fn corrupt_file_for_one_key_leaves_the_others_intact() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut profile = UserProfile::load(file_store(&dir));
        profile.toggle(ToggleKind::Country, "Italy");
        profile.toggle(ToggleKind::Like, "15");
    }

    // Corrupt the liked-articles file on disk.
    std::fs::write(
        dir.path().join(format!("{LIKED_ARTICLES_KEY}.json")),
        b"{{{{ definitely not json",
    )
    .expect("corrupt file");

    let reloaded = UserProfile::load(file_store(&dir));
    let snap = reloaded.snapshot();
    assert!(snap.liked_article_ids.is_empty(), "corrupt key reads empty");
    assert!(
        snap.preferred_countries.contains("Italy"),
        "healthy keys still load"
    );
}

#[test]
fn wrong_typed_value_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = file_store(&dir);
    store.set(PREFERRED_COUNTRIES_KEY, &json!({"not": "an array"}));
    let profile = UserProfile::load(store);
    assert!(profile.snapshot().preferred_countries.is_empty());
}
