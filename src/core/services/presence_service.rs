use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::{Hunger, OnlineStatus, Presence};
use crate::errors::Result;
use crate::storage::KeyValueStore;

pub const PRESENCE_KEY: &str = "@presence_state";

/// Hunger toggle and online status shown in the header.
pub struct PresenceService {
    store: Arc<dyn KeyValueStore>,
    current: Presence,
}

impl PresenceService {
    /// Reads the saved presence, defaulting to `Online · Hungry` when it is
    /// missing or unreadable.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(PRESENCE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(%err, "saved presence is malformed; using default");
                Presence::default()
            }),
            Ok(None) => Presence::default(),
            Err(err) => {
                warn!(%err, "could not read presence; using default");
                Presence::default()
            }
        };
        Self { store, current }
    }

    pub fn current(&self) -> &Presence {
        &self.current
    }

    pub fn header_line(&self) -> String {
        self.current.to_string()
    }

    pub fn set_hunger(&mut self, hunger: Hunger) -> Result<()> {
        self.current.hunger = hunger;
        self.persist()
    }

    pub fn set_status(&mut self, status: OnlineStatus) -> Result<()> {
        self.current.status = status;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        self.current.updated_at = Some(Utc::now());
        let json = serde_json::to_string(&self.current)?;
        self.store.set(PRESENCE_KEY, &json)
    }
}
