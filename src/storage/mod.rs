pub mod json_backend;
pub mod memory;
pub mod selection_store;

pub use crate::errors::Result;

/// Durable local key-value storage of string values.
///
/// Mirrors the async storage API the mobile client persists to: every value
/// is an opaque string (JSON in practice) addressed by a string key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Attempts every key and returns the first failure, if any.
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut first_err = None;
        for key in keys {
            if let Err(err) = self.remove(key) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use selection_store::SelectionStore;
