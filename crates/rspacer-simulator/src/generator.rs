//! Synthetic satellite measurements
//!
//! Produces deterministic, smoothly varying readings so the store, statistics
//! and chart can be exercised without a receiver. Noise follows the
//! `-85 - (0..20)` dBm band and is scaled by a slowly cycling celestial
//! influence.

use std::f64::consts::TAU;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::{debug, warn};

use rspacer_core::influence::CelestialInfluence;
use rspacer_core::storage::{Measurement, MeasurementStore, OPEN_TERRAIN};

/// Solar influence period in hours
const SOLAR_PERIOD_HOURS: f64 = 24.0;

/// Lunar influence period in hours (synodic month)
const LUNAR_PERIOD_HOURS: f64 = 29.53 * 24.0;

/// Planetary influence period in hours (Jupiter synodic period)
const PLANETARY_PERIOD_HOURS: f64 = 398.88 * 24.0;

/// Base noise level in dBm
const BASE_NOISE_DBM: f64 = -85.0;

/// Width of the noise band below the base level in dBm
const NOISE_SPAN_DBM: f64 = 20.0;

/// Ground positions visited by the synthetic ground track
///
/// `(city, latitude, longitude, distance to city in m)`
const GROUND_TRACK: [(&str, f64, f64, f64); 8] = [
    ("Москва", 55.7558, 37.6173, 1250.0),
    (OPEN_TERRAIN, 56.8000, 40.1000, 0.0),
    ("Санкт-Петербург", 59.9343, 30.3351, 3400.0),
    ("Казань", 55.7963, 49.1088, 860.0),
    (OPEN_TERRAIN, 58.3000, 45.6000, 0.0),
    ("Новосибирск", 55.0084, 82.9357, 2100.0),
    ("Екатеринбург", 56.8389, 60.6057, 540.0),
    (OPEN_TERRAIN, 61.2000, 73.4000, 0.0),
];

/// Generates synthetic measurements that vary over time.
pub struct MockMeasurementGenerator {
    /// Time of the first sample
    epoch: NaiveDateTime,
    /// Spacing between consecutive samples of one satellite
    interval: Duration,
    /// Next sample index for live generation
    next_step: u64,
}

impl MockMeasurementGenerator {
    pub fn new(epoch: NaiveDateTime, interval: Duration) -> Self {
        Self {
            epoch,
            interval,
            next_step: 0,
        }
    }

    /// Default epoch: 2025-01-01 06:00
    pub fn default_epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(6, 0, 0))
            .unwrap_or_default()
    }

    /// Influence factors at `time`, cycling around 1.0
    pub fn influence_at(&self, time: NaiveDateTime) -> CelestialInfluence {
        let hours = (time - self.epoch).num_seconds() as f64 / 3600.0;

        CelestialInfluence::new(
            1.0 + 0.25 * (TAU * hours / SOLAR_PERIOD_HOURS).sin(),
            1.0 + 0.15 * (TAU * hours / LUNAR_PERIOD_HOURS).sin(),
            1.0 + 0.05 * (TAU * hours / PLANETARY_PERIOD_HOURS).sin(),
        )
        .clamped()
    }

    /// Time of sample `step`, `None` if it is not representable
    pub fn sample_time(&self, step: u64) -> Option<NaiveDateTime> {
        let offset = self.interval.checked_mul(i32::try_from(step).ok()?)?;
        self.epoch.checked_add_signed(offset)
    }

    /// Measurement number `step` of the satellite at `satellite_index`
    ///
    /// `None` once the sample time overflows the calendar.
    pub fn measurement(&self, satellite_index: usize, step: u64) -> Option<Measurement> {
        let time = self.sample_time(step)?;
        let t = step as f64 + satellite_index as f64 * 7.0;

        // Unscaled noise in -104..=-85 dBm
        let band = ((t / 3.0).sin() * 0.6 + (t / 11.0).cos() * 0.4 + 1.0) / 2.0;
        let base_noise = BASE_NOISE_DBM - (band * NOISE_SPAN_DBM).floor().min(NOISE_SPAN_DBM - 1.0);
        let influence = self.influence_at(time);

        let (city, latitude, longitude, distance) =
            GROUND_TRACK[(step as usize + satellite_index) % GROUND_TRACK.len()];
        let altitude = 450.0 + 150.0 * satellite_index as f64 + 5.0 * (t / 5.0).sin();

        let measurement = Measurement::new(Some(time), latitude, longitude, influence.apply(base_noise))
            .with_city(city)
            .with_altitude(altitude)
            .with_distance(distance)
            .with_influence(influence.total());
        Some(measurement)
    }

    /// Fill `store` with `samples` measurements for each satellite
    ///
    /// Live generation continues after the last generated sample.
    pub fn populate(&mut self, store: &mut MeasurementStore, satellites: &[String], samples: usize) {
        for (index, satellite) in satellites.iter().enumerate() {
            let mut generated = 0;
            for step in 0..samples as u64 {
                let Some(measurement) = self.measurement(index, step) else {
                    warn!("Sample time overflow after {} measurements for {}", generated, satellite);
                    break;
                };
                store.add_measurement(satellite, measurement);
                generated += 1;
            }
            debug!("Generated {} measurements for {}", generated, satellite);
        }
        self.next_step = self.next_step.max(samples as u64);
    }

    /// Next live measurement for the satellite at `satellite_index`
    pub fn next_measurement(&mut self, satellite_index: usize) -> Option<Measurement> {
        let measurement = self.measurement(satellite_index, self.next_step)?;
        self.next_step += 1;
        Some(measurement)
    }
}
