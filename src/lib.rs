#![doc(test(attr(deny(warnings))))]

//! StanFood Core holds the filter-selection logic behind the campus dining
//! screens: normalized search over static catalogs, per-category checked
//! state persisted in a local key-value store, and the cross-category
//! active-filter summary.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod navigation;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::services::{FilterAggregator, PersistPolicy, SelectionListController};
pub use crate::core::FilterHub;
pub use crate::domain::FilterCategory;
pub use crate::errors::{FilterError, Result};
pub use crate::utils::text::normalize;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("StanFood core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
