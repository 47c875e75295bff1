use serde::{Deserialize, Serialize};

/// Initial map region: the Stanford campus.
pub const CAMPUS_LATITUDE: f64 = 37.4277;
pub const CAMPUS_LONGITUDE: f64 = -122.1701;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

impl SharedLocation {
    pub fn new(latitude: f64, longitude: f64, description: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            description: description.into(),
        }
    }
}

/// Coordinate-only description used when no place name is available.
pub fn coordinate_description(latitude: f64, longitude: f64) -> String {
    format!("Latitude: {latitude:.4}, Longitude: {longitude:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_description_uses_four_decimals() {
        assert_eq!(
            coordinate_description(CAMPUS_LATITUDE, CAMPUS_LONGITUDE),
            "Latitude: 37.4277, Longitude: -122.1701"
        );
        assert_eq!(coordinate_description(1.0, 2.5), "Latitude: 1.0000, Longitude: 2.5000");
    }
}
