//! Chart data points

use chrono::NaiveDateTime;

use crate::storage::Measurement;

/// A single data point in time/value space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Measurement time
    pub time: NaiveDateTime,
    /// Signal value in dBm
    pub value: f64,
}

impl ChartPoint {
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }

    /// Time as milliseconds since the Unix epoch
    pub fn time_ms(&self) -> i64 {
        self.time.and_utc().timestamp_millis()
    }

    /// Build a chart series from stored measurements.
    ///
    /// Measurements with invalid timestamps are skipped. The result is sorted
    /// by time; points with equal times keep their insertion order.
    pub fn series_from(data: &[Measurement]) -> Vec<Self> {
        let mut points: Vec<Self> = data
            .iter()
            .filter_map(|m| m.timestamp.map(|time| Self::new(time, m.radiation)))
            .collect();

        points.sort_by_key(|p| p.time);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_from_skips_invalid_and_sorts() {
        let data = vec![
            Measurement::from_iso("2025-01-02T00:00:00", 0.0, 0.0, -2.0),
            Measurement::from_iso("broken", 0.0, 0.0, -99.0),
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -1.0),
            Measurement::from_iso("2025-01-02T00:00:00", 0.0, 0.0, -3.0),
        ];

        let values: Vec<f64> = ChartPoint::series_from(&data)
            .iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_time_ms() {
        let point = ChartPoint::new(
            NaiveDateTime::parse_from_str("1970-01-01 00:00:01", "%Y-%m-%d %H:%M:%S").unwrap(),
            0.0,
        );
        assert_eq!(point.time_ms(), 1000);
    }
}
