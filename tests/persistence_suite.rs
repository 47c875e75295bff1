mod common;

use std::fs;
use std::path::{Path, PathBuf};

use stanfood_core::{
    config::{Config, ConfigManager},
    core::services::PresenceService,
    domain::{Hunger, OnlineStatus},
    storage::{JsonFileStore, KeyValueStore, SelectionStore},
    FilterCategory, FilterError, PersistPolicy,
};

use common::{file_store, setup_hub, temp_base};

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (store, _) = file_store();
    store
        .set("@allergens_filter_state", r#"{"Peanuts":true}"#)
        .expect("initial save");
    let path = store.value_path("@allergens_filter_state");
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory at the temp file name makes the write fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let result = store.set("@allergens_filter_state", r#"{"Gluten":true}"#);
    assert!(
        result.is_err(),
        "expected set to fail when temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original, "original file should remain untouched");
}

#[test]
fn corrupt_map_loads_as_all_unchecked() {
    let (hub, store) = setup_hub(PersistPolicy::Deferred);
    store.set("@allergens_filter_state", "[1, 2").unwrap();

    let list = hub.open(FilterCategory::Allergens);
    assert!(list.is_loaded());
    assert!(!list.has_selection());
    assert!(!list.items().is_empty());
}

#[test]
fn corrupt_map_is_reported_by_the_typed_store() {
    let (store, _) = file_store();
    store.set("@dishes_filter_state", "nope").unwrap();

    let selections = SelectionStore::new(store);
    let err = selections.load(FilterCategory::Dishes).unwrap_err();
    assert!(matches!(err, FilterError::Serialization(_)));
}

#[test]
fn selections_survive_a_new_store_instance() {
    let (store, base) = file_store();
    let selections = SelectionStore::new(store);
    let mut map = std::collections::BTreeMap::new();
    map.insert("Stern Dining".to_string(), true);
    selections.save(FilterCategory::Locations, &map).unwrap();

    let reopened = JsonFileStore::new(Some(base.join("state"))).unwrap();
    let raw = reopened.get("@locations_filter_state").unwrap().unwrap();
    assert_eq!(raw, r#"{"Stern Dining":true}"#);
    assert!(base.join("state").join("locations_filter_state.json").exists());
}

#[test]
fn presence_round_trips_through_the_file_store() {
    let (store, base) = file_store();
    let mut presence = PresenceService::load(store);
    presence.set_hunger(Hunger::Full).unwrap();
    presence.set_status(OnlineStatus::AppearOffline).unwrap();

    let reopened = JsonFileStore::new(Some(base.join("state"))).unwrap();
    let presence = PresenceService::load(std::sync::Arc::new(reopened));
    assert_eq!(presence.header_line(), "Offline · Full");
    assert!(presence.current().updated_at.is_some());
}

#[test]
fn config_round_trip_and_malformed_file() {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    assert_eq!(manager.load().unwrap(), Config::default());

    let config = Config {
        persist_policy: PersistPolicy::Immediate,
        confirm_destructive: false,
        ..Config::default()
    };
    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);

    fs::write(manager.path(), "{ broken").unwrap();
    assert!(matches!(manager.load(), Err(FilterError::Config(_))));
}
