use tracing::warn;

use crate::domain::location::{coordinate_description, SharedLocation};
use crate::errors::Result;

/// External nearby-place search.
pub trait PlacesLookup {
    /// Name of the nearest place to the coordinates, if any.
    fn nearest_place(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

/// Lookup that never finds anything; descriptions fall back to coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlaces;

impl PlacesLookup for NoPlaces {
    fn nearest_place(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Turns a `(lat, lng, description)` triple from the map search into a
/// [`SharedLocation`].
pub struct LocationResolver<L: PlacesLookup> {
    lookup: L,
}

impl<L: PlacesLookup> LocationResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Uses the search description when present; otherwise names the nearest
    /// place, or the coordinates when the lookup has nothing or fails.
    pub fn resolve(&self, latitude: f64, longitude: f64, description: Option<&str>) -> SharedLocation {
        if let Some(text) = description.map(str::trim).filter(|text| !text.is_empty()) {
            return SharedLocation::new(latitude, longitude, text);
        }
        let text = match self.lookup.nearest_place(latitude, longitude) {
            Ok(Some(place)) => format!("Near {place}"),
            Ok(None) => coordinate_description(latitude, longitude),
            Err(err) => {
                warn!(%err, latitude, longitude, "nearest place lookup failed");
                coordinate_description(latitude, longitude)
            }
        };
        SharedLocation::new(latitude, longitude, text)
    }
}
