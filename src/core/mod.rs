pub mod filter_hub;
pub mod services;
pub mod utils;

pub use filter_hub::FilterHub;
