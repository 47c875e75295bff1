#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use once_cell::sync::Lazy;
use stanfood_core::{
    catalog::CatalogSet,
    storage::{JsonFileStore, KeyValueStore},
    FilterHub, PersistPolicy,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// File store in its own directory, plus that directory.
pub fn file_store() -> (Arc<JsonFileStore>, PathBuf) {
    let base = temp_base();
    let store = JsonFileStore::new(Some(base.join("state"))).expect("create json file store");
    (Arc::new(store), base)
}

/// Hub over the bundled catalogs and an isolated file store.
pub fn setup_hub(policy: PersistPolicy) -> (FilterHub, Arc<JsonFileStore>) {
    let (store, _) = file_store();
    let shared: Arc<dyn KeyValueStore> = store.clone();
    (FilterHub::new(shared, CatalogSet::bundled(), policy), store)
}
