//! Measurement store keyed by satellite name

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Local;
use log::{debug, info, warn};

use crate::export::{self, ExportResult, ExportSummary};
use crate::stats::StoreStatistics;

use super::events::{ListenerId, ListenerRegistry, StoreEvent, StoreListener};
use super::measurement::{Measurement, MeasurementRecord};

/// In-memory store of satellite measurements
///
/// Satellites are kept in name order; each series keeps its measurements in
/// the order they were added. Lookups of unknown satellites return empty
/// results rather than errors.
///
/// ## Usage
///
/// ```rust
/// use rspacer_core::storage::{Measurement, MeasurementStore, StoreEvent};
///
/// let mut store = MeasurementStore::new();
/// store.subscribe(|event: &StoreEvent| println!("{event:?}"));
///
/// store.add_measurement(
///     "NOAA-19",
///     Measurement::from_iso("2025-01-01T06:00:00", 55.7558, 37.6173, -92.5).with_city("Москва"),
/// );
/// assert_eq!(store.measurement_count("NOAA-19"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MeasurementStore {
    /// Measurement series per satellite
    series: BTreeMap<String, Vec<Measurement>>,
    /// Registered change observers
    listeners: ListenerRegistry,
}

impl MeasurementStore {
    /// Create an empty store with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it is called after every mutation
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: StoreListener + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Create an empty series for `name`.
    ///
    /// Empty names are ignored; existing satellites are left untouched.
    pub fn add_satellite(&mut self, name: &str) {
        if name.is_empty() {
            warn!("Ignoring satellite with an empty name");
            return;
        }

        if self.series.contains_key(name) {
            debug!("Satellite {} already exists", name);
            return;
        }

        self.insert_satellite(name);
        self.publish_statistics();
    }

    /// Append a measurement to a satellite series, creating the satellite
    /// first if needed.
    ///
    /// Measurements with an empty satellite name are ignored. There is no
    /// deduplication and no ordering by timestamp.
    pub fn add_measurement(&mut self, satellite: &str, measurement: Measurement) {
        if satellite.is_empty() {
            warn!("Ignoring measurement with an empty satellite name");
            return;
        }

        if !self.series.contains_key(satellite) {
            self.insert_satellite(satellite);
        }

        if !measurement.has_valid_timestamp() {
            warn!(
                "Storing measurement for {} with an invalid timestamp",
                satellite
            );
        }

        debug!(
            "Adding measurement for {}: time {} at ({}, {}) value {}",
            satellite,
            measurement.formatted_time(),
            measurement.latitude,
            measurement.longitude,
            measurement.radiation
        );

        let count = match self.series.get_mut(satellite) {
            Some(series) => {
                series.push(measurement);
                series.len()
            }
            None => return,
        };

        self.listeners.publish(&StoreEvent::DataAdded {
            satellite: satellite.to_string(),
            count,
        });
        self.publish_statistics();
    }

    /// Flattened measurements of one satellite in insertion order
    pub fn measurements_by_satellite(&self, satellite: &str) -> Vec<MeasurementRecord> {
        let data = self.satellite_data(satellite);
        debug!("Reading {} measurements for {}", data.len(), satellite);

        data.iter()
            .map(|m| MeasurementRecord::from_measurement(satellite, m))
            .collect()
    }

    /// Raw measurements of one satellite in insertion order (empty if unknown)
    pub fn satellite_data(&self, satellite: &str) -> &[Measurement] {
        self.series
            .get(satellite)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every measurement, grouped by satellite name, then in insertion order
    pub fn all_measurements(&self) -> Vec<MeasurementRecord> {
        self.iter()
            .flat_map(|(satellite, data)| {
                data.iter()
                    .map(move |m| MeasurementRecord::from_measurement(satellite, m))
            })
            .collect()
    }

    /// Iterate over `(satellite, measurements)` pairs in satellite order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Measurement])> {
        self.series
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// Remove a satellite and its whole series
    pub fn clear_satellite(&mut self, satellite: &str) {
        let Some(data) = self.series.remove(satellite) else {
            return;
        };

        info!(
            "Cleared satellite {} ({} measurements removed)",
            satellite,
            data.len()
        );

        self.listeners.publish(&StoreEvent::SatelliteRemoved {
            satellite: satellite.to_string(),
            removed: data.len(),
        });
    }

    /// Remove every satellite
    pub fn clear_all(&mut self) {
        let removed = self.total_measurement_count();
        self.series.clear();

        info!("Cleared all measurements ({} removed)", removed);
        self.listeners.publish(&StoreEvent::DataCleared { removed });
    }

    /// Aggregate statistics over the whole store, stamped with the current
    /// local time
    pub fn statistics(&self) -> StoreStatistics {
        StoreStatistics::compute(self.iter(), Local::now().naive_local())
    }

    /// Write the whole store as CSV.
    ///
    /// An empty path selects a timestamped file in the home directory.
    pub fn export_to_csv(&self, path: impl AsRef<Path>) -> ExportResult<ExportSummary> {
        export::export_store(self, path.as_ref())
    }

    /// Number of measurements held for `satellite` (0 if unknown)
    pub fn measurement_count(&self, satellite: &str) -> usize {
        self.series.get(satellite).map_or(0, Vec::len)
    }

    /// All satellite names in satellite order
    pub fn satellite_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    /// Number of satellites, including those without measurements
    pub fn satellite_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of measurements across all satellites
    pub fn total_measurement_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Whether `satellite` is present
    pub fn satellite_exists(&self, satellite: &str) -> bool {
        self.series.contains_key(satellite)
    }

    /// Whether the store holds no satellites at all
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn insert_satellite(&mut self, name: &str) {
        self.series.insert(name.to_string(), Vec::new());
        info!("Added satellite {}", name);

        self.listeners.publish(&StoreEvent::SatelliteAdded {
            satellite: name.to_string(),
        });
    }

    fn publish_statistics(&mut self) {
        let stats = self.statistics();
        self.listeners.publish(&StoreEvent::StatisticsUpdated(stats));
    }
}
