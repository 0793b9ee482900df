//! Measurement records and timestamp handling

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use super::{OPEN_TERRAIN, TIMESTAMP_FORMAT};

/// Formats accepted by [`parse_timestamp`] after RFC 3339 has been tried.
const ACCEPTED_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp string.
///
/// Accepts `yyyy-MM-ddTHH:mm[:ss[.fff]]` with an optional UTC offset, a space
/// instead of `T`, or a bare date (midnight). Fractional seconds are dropped
/// since measurements have second resolution. Returns `None` for anything
/// else; callers store that as an invalid timestamp rather than rejecting
/// the measurement.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    let parsed = DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            ACCEPTED_TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    parsed.with_nanosecond(0)
}

/// Format a timestamp as `yyyy-MM-dd HH:mm:ss`; invalid timestamps format as
/// an empty string.
pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// A single immutable reading from a satellite pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Measurement time with second resolution (`None` when the source string was malformed)
    pub timestamp: Option<NaiveDateTime>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Signal strength in dBm
    pub radiation: f64,
    /// Nearest city, empty or [`OPEN_TERRAIN`] when there is none
    pub city: String,
    /// Altitude in km
    pub altitude_km: f64,
    /// Distance to the nearest city in meters
    pub distance_to_city_m: f64,
    /// Dimensionless multiplier applied to displayed noise elsewhere
    pub influence: f64,
}

impl Measurement {
    /// Create a measurement with no city, zero altitude and distance, and an
    /// influence factor of 1.0.
    pub fn new(
        timestamp: Option<NaiveDateTime>,
        latitude: f64,
        longitude: f64,
        radiation: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.and_then(|ts| ts.with_nanosecond(0)),
            latitude,
            longitude,
            radiation,
            city: String::new(),
            altitude_km: 0.0,
            distance_to_city_m: 0.0,
            influence: 1.0,
        }
    }

    /// Create a measurement from an ISO-8601 timestamp string.
    ///
    /// Unparsable strings are kept as an invalid timestamp.
    pub fn from_iso(timestamp: &str, latitude: f64, longitude: f64, radiation: f64) -> Self {
        Self::new(parse_timestamp(timestamp), latitude, longitude, radiation)
    }

    /// Set the nearest city name
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Set the altitude in km
    pub fn with_altitude(mut self, altitude_km: f64) -> Self {
        self.altitude_km = altitude_km;
        self
    }

    /// Set the distance to the nearest city in meters
    pub fn with_distance(mut self, distance_to_city_m: f64) -> Self {
        self.distance_to_city_m = distance_to_city_m;
        self
    }

    /// Set the influence factor
    pub fn with_influence(mut self, influence: f64) -> Self {
        self.influence = influence;
        self
    }

    /// Whether the timestamp parsed successfully
    pub fn has_valid_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Whether this measurement names a real city (not empty, not open terrain)
    pub fn has_city(&self) -> bool {
        !self.city.is_empty() && self.city != OPEN_TERRAIN
    }

    /// Timestamp formatted as `yyyy-MM-dd HH:mm:ss`, empty when invalid
    pub fn formatted_time(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// Flattened measurement as exposed to UI consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub satellite: String,
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radiation: f64,
    pub city: String,
    pub altitude: f64,
    pub distance: f64,
    pub influence: f64,
}

impl MeasurementRecord {
    /// Flatten a measurement belonging to `satellite`
    pub fn from_measurement(satellite: &str, measurement: &Measurement) -> Self {
        Self {
            satellite: satellite.to_string(),
            time: measurement.formatted_time(),
            latitude: measurement.latitude,
            longitude: measurement.longitude,
            radiation: measurement.radiation,
            city: measurement.city.clone(),
            altitude: measurement.altitude_km,
            distance: measurement.distance_to_city_m,
            influence: measurement.influence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_iso_variants() {
        let expected = ts("2025-01-01 06:30:15");
        assert_eq!(parse_timestamp("2025-01-01T06:30:15"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-01T06:30:15.750"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-01T06:30:15Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-01T06:30:15+03:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-01 06:30:15"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-01-01T06:30"),
            Some(ts("2025-01-01 06:30:00"))
        );
        assert_eq!(
            parse_timestamp("2025-01-01"),
            Some(ts("2025-01-01 00:00:00"))
        );
    }

    #[test]
    fn test_malformed_timestamp_is_invalid_not_rejected() {
        let m = Measurement::from_iso("not a date", 55.75, 37.61, -90.0);
        assert!(!m.has_valid_timestamp());
        assert_eq!(m.formatted_time(), "");
        assert_eq!(m.radiation, -90.0);
    }

    #[test]
    fn test_defaults_and_builders() {
        let m = Measurement::from_iso("2025-03-04T10:00:00", 1.0, 2.0, -85.5);
        assert_eq!(m.influence, 1.0);
        assert_eq!(m.altitude_km, 0.0);
        assert_eq!(m.distance_to_city_m, 0.0);
        assert!(!m.has_city());

        let m = m
            .with_city("Москва")
            .with_altitude(550.0)
            .with_distance(1200.0)
            .with_influence(-3.0);
        assert!(m.has_city());
        assert_eq!(m.altitude_km, 550.0);
        assert_eq!(m.distance_to_city_m, 1200.0);
        assert_eq!(m.influence, -3.0);
    }

    #[test]
    fn test_open_terrain_is_not_a_city() {
        let m = Measurement::from_iso("2025-03-04T10:00:00", 1.0, 2.0, -85.5)
            .with_city(OPEN_TERRAIN);
        assert!(!m.has_city());
    }

    #[test]
    fn test_record_flattening() {
        let m = Measurement::from_iso("2025-03-04T10:00:00", 1.5, 2.5, -85.5)
            .with_city("Казань")
            .with_altitude(400.0)
            .with_distance(10.0)
            .with_influence(1.2);
        let record = MeasurementRecord::from_measurement("NOAA-19", &m);

        assert_eq!(record.satellite, "NOAA-19");
        assert_eq!(record.time, "2025-03-04 10:00:00");
        assert_eq!(record.latitude, 1.5);
        assert_eq!(record.longitude, 2.5);
        assert_eq!(record.radiation, -85.5);
        assert_eq!(record.city, "Казань");
        assert_eq!(record.altitude, 400.0);
        assert_eq!(record.distance, 10.0);
        assert_eq!(record.influence, 1.2);
    }
}
