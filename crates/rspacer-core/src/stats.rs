//! Statistics derived from stored measurements
//!
//! Everything here is computed on demand from a borrowed snapshot and never
//! cached; recomputing is always safe.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::storage::{Measurement, TIMESTAMP_FORMAT};

/// Time format used by the per-satellite summary table (`dd.MM.yyyy HH:mm`)
const SUMMARY_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Aggregate statistics over the whole store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStatistics {
    /// Number of measurements
    pub total_measurements: usize,
    /// Number of satellites, including satellites with an empty series
    pub unique_satellites: usize,
    /// Distinct city names, excluding empty names and open terrain
    pub unique_cities: usize,
    /// Lowest signal value in dBm (0 when there are no measurements)
    pub min_radiation: f64,
    /// Highest signal value in dBm (0 when there are no measurements)
    pub max_radiation: f64,
    /// Mean signal value in dBm (0 when there are no measurements)
    pub avg_radiation: f64,
    /// Computation time as `yyyy-MM-dd HH:mm:ss`
    pub last_update: String,
}

impl StoreStatistics {
    /// Compute statistics over `(satellite, measurements)` pairs
    pub fn compute<'a, I>(series: I, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [Measurement])>,
    {
        let mut unique_satellites = 0;
        let mut total_measurements = 0;
        let mut sum = 0.0;
        let mut extrema: Option<(f64, f64)> = None;
        let mut cities: HashSet<&str> = HashSet::new();

        for (_, data) in series {
            unique_satellites += 1;
            total_measurements += data.len();

            for measurement in data {
                let value = measurement.radiation;
                sum += value;
                extrema = Some(match extrema {
                    Some((min, max)) => (min.min(value), max.max(value)),
                    None => (value, value),
                });

                if measurement.has_city() {
                    cities.insert(measurement.city.as_str());
                }
            }
        }

        let (min_radiation, max_radiation) = extrema.unwrap_or((0.0, 0.0));
        let avg_radiation = if total_measurements > 0 {
            sum / total_measurements as f64
        } else {
            0.0
        };

        Self {
            total_measurements,
            unique_satellites,
            unique_cities: cities.len(),
            min_radiation,
            max_radiation,
            avg_radiation,
            last_update: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Statistics for a single satellite series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Earliest valid timestamp in the series
    pub first_measurement: Option<NaiveDateTime>,
    /// Latest valid timestamp in the series
    pub last_measurement: Option<NaiveDateTime>,
}

impl SatelliteStatistics {
    /// Compute statistics for one series; `None` when it is empty.
    ///
    /// Measurements with invalid timestamps still contribute values but are
    /// ignored for the time span.
    pub fn compute(data: &[Measurement]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let mut values: Vec<f64> = data.iter().map(|m| m.radiation).collect();
        let count = values.len();
        let sum: f64 = values.iter().sum();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let median = median(&mut values)?;

        let timestamps = data.iter().filter_map(|m| m.timestamp);
        let first_measurement = timestamps.clone().min();
        let last_measurement = timestamps.max();

        Some(Self {
            count,
            min,
            max,
            mean: sum / count as f64,
            median,
            first_measurement,
            last_measurement,
        })
    }

    /// Spread between the highest and lowest value
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Whole calendar days between the first and last measurement
    pub fn days_span(&self) -> Option<i64> {
        let first = self.first_measurement?;
        let last = self.last_measurement?;
        Some(last.date().signed_duration_since(first.date()).num_days())
    }

    /// Labelled rows for the analytics table
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let format_time = |ts: Option<NaiveDateTime>| {
            ts.map(|t| t.format(SUMMARY_TIME_FORMAT).to_string())
                .unwrap_or_default()
        };

        vec![
            ("Количество измерений", self.count.to_string()),
            (
                "Временной диапазон",
                format!(
                    "{} - {}",
                    format_time(self.first_measurement),
                    format_time(self.last_measurement)
                ),
            ),
            ("Минимальное значение", format!("{:.1} дБм", self.min)),
            ("Максимальное значение", format!("{:.1} дБм", self.max)),
            ("Среднее значение", format!("{:.1} дБм", self.mean)),
            ("Медиана", format!("{:.1} дБм", self.median)),
            ("Размах значений", format!("{:.1} дБм", self.range())),
            (
                "Всего дней измерений",
                self.days_span().unwrap_or(0).to_string(),
            ),
        ]
    }
}

/// Median of `values`, sorting them in place; `None` when empty
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;

    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::OPEN_TERRAIN;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-06-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn series(values: &[f64]) -> Vec<Measurement> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Measurement::from_iso(&format!("2025-01-01T00:00:{:02}", i), 0.0, 0.0, *v)
            })
            .collect()
    }

    #[test]
    fn test_empty_store_statistics() {
        let stats = StoreStatistics::compute(core::iter::empty(), now());

        assert_eq!(stats.total_measurements, 0);
        assert_eq!(stats.unique_satellites, 0);
        assert_eq!(stats.unique_cities, 0);
        assert_eq!(stats.min_radiation, 0.0);
        assert_eq!(stats.max_radiation, 0.0);
        assert_eq!(stats.avg_radiation, 0.0);
        assert_eq!(stats.last_update, "2025-06-01 12:00:00");
    }

    #[test]
    fn test_store_statistics_values() {
        let data = series(&[-90.0, -85.0, -80.0]);
        let stats = StoreStatistics::compute([("X", data.as_slice())], now());

        assert_eq!(stats.total_measurements, 3);
        assert_eq!(stats.unique_satellites, 1);
        assert_eq!(stats.min_radiation, -90.0);
        assert_eq!(stats.max_radiation, -80.0);
        assert!((stats.avg_radiation - -85.0).abs() < 1e-9);
    }

    #[test]
    fn test_positive_values_have_true_minimum() {
        let data = series(&[3.0, 5.0]);
        let stats = StoreStatistics::compute([("X", data.as_slice())], now());

        assert_eq!(stats.min_radiation, 3.0);
        assert_eq!(stats.max_radiation, 5.0);
    }

    #[test]
    fn test_unique_cities_and_empty_satellites() {
        let a = vec![
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -90.0).with_city("Москва"),
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -90.0).with_city(OPEN_TERRAIN),
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -90.0),
        ];
        let b = vec![
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -90.0).with_city("Москва"),
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -90.0).with_city("Тула"),
        ];
        let empty: Vec<Measurement> = Vec::new();

        let stats = StoreStatistics::compute(
            [("A", a.as_slice()), ("B", b.as_slice()), ("C", empty.as_slice())],
            now(),
        );

        assert_eq!(stats.unique_satellites, 3);
        assert_eq!(stats.unique_cities, 2);
        assert_eq!(stats.total_measurements, 5);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&mut [-90.0, -88.0, -86.0, -84.0]), Some(-87.0));
        assert_eq!(median(&mut [-86.0, -90.0, -88.0]), Some(-88.0));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn test_satellite_statistics() {
        let mut data = series(&[-84.0, -90.0, -86.0, -88.0]);
        data[0] = Measurement::from_iso("2025-01-03T10:00:00", 0.0, 0.0, -84.0);
        data[3] = Measurement::from_iso("bad", 0.0, 0.0, -88.0);

        let stats = SatelliteStatistics::compute(&data).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, -90.0);
        assert_eq!(stats.max, -84.0);
        assert_eq!(stats.median, -87.0);
        assert!((stats.mean - -87.0).abs() < 1e-9);
        assert_eq!(stats.range(), 6.0);
        assert_eq!(
            stats.first_measurement.map(|t| t.to_string()),
            Some("2025-01-01 00:00:01".to_string())
        );
        assert_eq!(
            stats.last_measurement.map(|t| t.to_string()),
            Some("2025-01-03 10:00:00".to_string())
        );
        assert_eq!(stats.days_span(), Some(2));
    }

    #[test]
    fn test_satellite_statistics_empty() {
        assert!(SatelliteStatistics::compute(&[]).is_none());
    }

    #[test]
    fn test_summary_rows() {
        let data = vec![
            Measurement::from_iso("2025-01-01T23:30:00", 0.0, 0.0, -90.0),
            Measurement::from_iso("2025-01-02T00:10:00", 0.0, 0.0, -80.0),
        ];
        let rows = SatelliteStatistics::compute(&data).unwrap().summary_rows();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ("Количество измерений", "2".to_string()));
        assert_eq!(
            rows[1].1,
            "01.01.2025 23:30 - 02.01.2025 00:10".to_string()
        );
        assert_eq!(rows[5], ("Медиана", "-85.0 дБм".to_string()));
        assert_eq!(rows[6], ("Размах значений", "10.0 дБм".to_string()));
        assert_eq!(rows[7], ("Всего дней измерений", "1".to_string()));
    }
}
