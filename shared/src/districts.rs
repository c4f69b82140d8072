//! District lookup table for Rwanda
//!
//! Every district is mapped to one representative center coordinate, the
//! unit of spatial resolution for yield prediction. The table is fixed at
//! compile time; lookups are pure.

use crate::types::GeoPoint;

/// All 30 districts of Rwanda with their representative centers.
pub const DISTRICT_CENTERS: &[(&str, GeoPoint)] = &[
    // Kigali City
    ("Gasabo", GeoPoint::new(-1.92, 30.115)),
    ("Kicukiro", GeoPoint::new(-2.0, 30.115)),
    ("Nyarugenge", GeoPoint::new(-1.98, 30.03)),
    // Northern Province
    ("Burera", GeoPoint::new(-1.47, 29.87)),
    ("Gakenke", GeoPoint::new(-1.70, 29.78)),
    ("Gicumbi", GeoPoint::new(-1.58, 30.07)),
    ("Musanze", GeoPoint::new(-1.50, 29.63)),
    ("Rulindo", GeoPoint::new(-1.77, 30.06)),
    // Eastern Province
    ("Bugesera", GeoPoint::new(-2.22, 30.24)),
    ("Gatsibo", GeoPoint::new(-1.58, 30.42)),
    ("Kayonza", GeoPoint::new(-1.88, 30.62)),
    ("Kirehe", GeoPoint::new(-2.22, 30.70)),
    ("Ngoma", GeoPoint::new(-2.15, 30.50)),
    ("Nyagatare", GeoPoint::new(-1.30, 30.33)),
    ("Rwamagana", GeoPoint::new(-1.95, 30.43)),
    // Southern Province
    ("Gisagara", GeoPoint::new(-2.62, 29.84)),
    ("Huye", GeoPoint::new(-2.60, 29.74)),
    ("Kamonyi", GeoPoint::new(-2.00, 29.90)),
    ("Muhanga", GeoPoint::new(-2.08, 29.75)),
    ("Nyamagabe", GeoPoint::new(-2.47, 29.46)),
    ("Nyanza", GeoPoint::new(-2.35, 29.74)),
    ("Nyaruguru", GeoPoint::new(-2.72, 29.52)),
    ("Ruhango", GeoPoint::new(-2.23, 29.78)),
    // Western Province
    ("Karongi", GeoPoint::new(-2.00, 29.39)),
    ("Ngororero", GeoPoint::new(-1.87, 29.63)),
    ("Nyabihu", GeoPoint::new(-1.65, 29.51)),
    ("Nyamasheke", GeoPoint::new(-2.33, 29.15)),
    ("Rubavu", GeoPoint::new(-1.68, 29.32)),
    ("Rusizi", GeoPoint::new(-2.48, 28.91)),
    ("Rutsiro", GeoPoint::new(-1.9, 29.35)),
];

/// Look up the representative center for a district name (case-sensitive).
pub fn district_center(name: &str) -> Option<GeoPoint> {
    DISTRICT_CENTERS
        .iter()
        .find(|(district, _)| *district == name)
        .map(|(_, center)| *center)
}

/// District names in table order, for dashboard selectors.
pub fn district_names() -> impl Iterator<Item = &'static str> {
    DISTRICT_CENTERS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_district_lookup() {
        let gasabo = district_center("Gasabo").unwrap();
        assert_eq!(gasabo.latitude, -1.92);
        assert_eq!(gasabo.longitude, 30.115);
    }

    #[test]
    fn test_unknown_district_lookup() {
        assert!(district_center("Atlantis").is_none());
        assert!(district_center("gasabo").is_none());
    }

    #[test]
    fn test_lookup_is_stable() {
        // Pure mapping: repeated lookups return the identical pair.
        let first = district_center("Huye").unwrap();
        for _ in 0..10 {
            assert_eq!(district_center("Huye").unwrap(), first);
        }
    }

    #[test]
    fn test_all_thirty_districts_present() {
        assert_eq!(DISTRICT_CENTERS.len(), 30);
        // All centers fall inside Rwanda's bounding box.
        for (name, center) in DISTRICT_CENTERS {
            assert!(
                center.latitude > -3.0 && center.latitude < -1.0,
                "{name} latitude out of range"
            );
            assert!(
                center.longitude > 28.5 && center.longitude < 31.0,
                "{name} longitude out of range"
            );
        }
    }
}
