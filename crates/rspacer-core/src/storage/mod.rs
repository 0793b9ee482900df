//! In-memory satellite measurement storage
//!
//! Measurements are grouped per satellite and kept in insertion order. The
//! store is process-lifetime only: nothing is persisted, and measurements are
//! never edited after insertion.

pub mod events;
pub mod measurement;
pub mod store;

pub use events::{ListenerId, StoreEvent, StoreListener};
pub use measurement::{Measurement, MeasurementRecord, format_timestamp, parse_timestamp};
pub use store::MeasurementStore;

/// City value meaning "no nearby city"
pub const OPEN_TERRAIN: &str = "Открытая местность";

/// Display/export format for measurement timestamps (`yyyy-MM-dd HH:mm:ss`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
