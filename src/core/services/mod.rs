pub mod aggregator;
pub mod location_service;
pub mod presence_service;
pub mod selection_list;

pub use aggregator::FilterAggregator;
pub use location_service::{LocationResolver, NoPlaces, PlacesLookup};
pub use presence_service::PresenceService;
pub use selection_list::{PersistPolicy, SelectionListController};
