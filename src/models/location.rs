//! Address context: the user's resolved location shared across the dashboard

use serde::{Deserialize, Serialize};

/// Geographic coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLong {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl LatLong {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Round coordinates to `precision` decimal places
    #[must_use]
    pub fn rounded(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Human-readable part of a resolved address
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Address {
    pub city_name: Option<String>,
    pub urban_area_slug: Option<String>,
    pub urban_area_name: Option<String>,
}

/// Current resolved address and coordinates.
///
/// Both halves are optional: on startup nothing has been resolved yet and
/// the dashboard treats that as "not ready" rather than as an error.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AddressContext {
    pub address: Option<Address>,
    pub latlong: Option<LatLong>,
}

impl AddressContext {
    #[must_use]
    pub fn new(city_name: impl Into<String>, latlong: LatLong) -> Self {
        Self {
            address: Some(Address {
                city_name: Some(city_name.into()),
                ..Address::default()
            }),
            latlong: Some(latlong),
        }
    }

    #[must_use]
    pub fn with_urban_area(mut self, slug: impl Into<String>, name: impl Into<String>) -> Self {
        let address = self.address.get_or_insert_with(Address::default);
        address.urban_area_slug = Some(slug.into());
        address.urban_area_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn city_name(&self) -> Option<&str> {
        self.address.as_ref()?.city_name.as_deref()
    }

    /// A city name is plausible when present, non-empty and free of the
    /// `undefined`/`null` placeholders an unfinished lookup leaves behind.
    #[must_use]
    pub fn valid_city_name(&self) -> Option<&str> {
        self.city_name().filter(|name| {
            !name.is_empty() && !name.contains("undefined") && !name.contains("null")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_rounded_coordinates() {
        let latlong = LatLong::new(46.818_234, 8.227_456);
        assert_eq!(latlong.rounded(2), (46.82, 8.23));
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(LatLong::new(46.8182, 8.2275).format_coordinates(), "46.8182, 8.2275");
    }

    #[rstest]
    #[case(Some("Berlin"), Some("Berlin"))]
    #[case(Some(""), None)]
    #[case(Some("   "), Some("   "))]
    #[case(Some("undefined, DE"), None)]
    #[case(Some("null"), None)]
    #[case(None, None)]
    fn test_valid_city_name(#[case] city: Option<&str>, #[case] expected: Option<&str>) {
        let ctx = AddressContext {
            address: Some(Address {
                city_name: city.map(str::to_string),
                ..Address::default()
            }),
            latlong: None,
        };
        assert_eq!(ctx.valid_city_name(), expected);
    }

    #[test]
    fn test_empty_context_has_no_city() {
        assert_eq!(AddressContext::default().valid_city_name(), None);
    }

    #[test]
    fn test_with_urban_area() {
        let ctx = AddressContext::new("Oakland", LatLong::new(37.8, -122.27))
            .with_urban_area("san-francisco-bay-area", "San Francisco Bay Area");
        let address = ctx.address.unwrap();
        assert_eq!(address.urban_area_slug.as_deref(), Some("san-francisco-bay-area"));
        assert_eq!(address.city_name.as_deref(), Some("Oakland"));
    }
}
