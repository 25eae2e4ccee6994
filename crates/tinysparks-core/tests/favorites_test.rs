//! Integration tests for the favorites store over the file backend.

use tinysparks_core::{
    Activity, Category, FAVORITES_KEY, FavoritesStore, FileStore, KeyValueStore, Toggled,
};
use tinysparks_test_utils::{sample_activity, temp_file_store};

fn ids(store: &FavoritesStore<FileStore>) -> Vec<String> {
    store.activities().iter().map(|a| a.id.clone()).collect()
}

#[test]
fn favorites_survive_reload() {
    let (_tmp, storage) = temp_file_store();
    let mut store = FavoritesStore::load(storage.clone());
    store
        .toggle(&sample_activity("a", Category::FineMotor))
        .unwrap();
    store
        .toggle(&sample_activity("b", Category::SensoryPlay))
        .unwrap();

    let reloaded = FavoritesStore::load(storage);
    assert_eq!(ids(&reloaded), ["a", "b"]);
    assert_eq!(reloaded.activities(), store.activities());
}

#[test]
fn toggle_twice_restores_membership_and_content() {
    let (_tmp, storage) = temp_file_store();
    let mut store = FavoritesStore::load(storage.clone());
    store
        .toggle(&sample_activity("keep", Category::Language))
        .unwrap();
    let before: Vec<Activity> = store.activities().to_vec();

    let extra = sample_activity("extra", Category::Cognitive);
    assert_eq!(store.toggle(&extra).unwrap(), Toggled::Added);
    assert!(store.is_favorite("extra"));
    assert_eq!(store.len(), before.len() + 1);

    assert_eq!(store.toggle(&extra).unwrap(), Toggled::Removed);
    assert!(!store.is_favorite("extra"));
    assert_eq!(store.activities(), before.as_slice());

    // Storage matches memory after every toggle.
    let reloaded = FavoritesStore::load(storage);
    assert_eq!(reloaded.activities(), before.as_slice());
}

#[test]
fn corrupted_file_loads_as_empty_and_is_overwritten_on_toggle() {
    let (_tmp, mut storage) = temp_file_store();
    storage.set(FAVORITES_KEY, "[{\"id\": 1,").unwrap();

    let mut store = FavoritesStore::load(storage.clone());
    assert!(store.is_empty());

    store
        .toggle(&sample_activity("fresh", Category::GrossMotor))
        .unwrap();
    let reloaded = FavoritesStore::load(storage);
    assert_eq!(ids(&reloaded), ["fresh"]);
}

#[test]
fn stored_shape_matches_legacy_local_storage_format() {
    let (_tmp, mut storage) = temp_file_store();
    let legacy = r#"[{
        "id": "1700000000000-3-k2j4h5g6f",
        "title": "Pasta Threading",
        "description": "Thread dry pasta onto a pipe cleaner.",
        "materials": ["dry pasta", "pipe cleaner"],
        "duration": "10-15 mins",
        "safetyTip": "Watch for choking hazards.",
        "tags": ["Quiet", "Focus"],
        "category": "Fine Motor"
    }]"#;
    storage.set(FAVORITES_KEY, legacy).unwrap();

    let store = FavoritesStore::load(storage);
    let fav = store.get("1700000000000-3-k2j4h5g6f").unwrap();
    assert_eq!(fav.title, "Pasta Threading");
    assert_eq!(fav.category, Category::FineMotor);
    assert_eq!(fav.safety_tip, "Watch for choking hazards.");
}
