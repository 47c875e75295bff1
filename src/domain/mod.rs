pub mod category;
pub mod location;
pub mod presence;
pub mod selection;

pub use category::FilterCategory;
pub use location::SharedLocation;
pub use presence::{Hunger, OnlineStatus, Presence};
pub use selection::{ActiveFilter, ActiveFilterSection, CatalogItem, SelectionEntry, SelectionMap};
