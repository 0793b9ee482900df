//! CSV export of the measurement store
//!
//! The file layout is fixed: a UTF-8 byte-order mark, a `;`-separated header
//! row and one row per measurement, each line terminated by `\n`. Numbers
//! always use `.` as the decimal separator. Fields are quoted only when a
//! name contains the delimiter, a quote or a line break, so every
//! measurement stays one nine-column record.
//!
//! The whole file is rendered into memory before the destination is opened,
//! so a failed open leaves nothing behind and a successful export is a single
//! write.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use csv::{Terminator, WriterBuilder};
use log::{error, info};
use thiserror::Error;

use crate::storage::{Measurement, MeasurementStore};

/// UTF-8 byte-order mark written before the header
pub const BOM: &str = "\u{FEFF}";

/// Field separator
pub const DELIMITER: u8 = b';';

/// Header fields, in column order
pub const CSV_HEADER: [&str; 9] = [
    "Спутник",
    "Время",
    "Широта",
    "Долгота",
    "Уровень излучения (дБм)",
    "Город",
    "Высота (км)",
    "Расстояние до города (м)",
    "Фактор влияния",
];

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    /// A record could not be encoded
    #[error("Failed to encode CSV")]
    Encode(#[from] csv::Error),

    /// Writing to a caller-supplied writer failed
    #[error("Failed to write CSV output")]
    Io(#[from] io::Error),

    /// The destination could not be opened for writing
    #[error("Failed to open {} for writing", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to an opened destination failed
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No path was given and the home directory could not be determined
    #[error("No export path given and no home directory available")]
    NoHomeDirectory,
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File that was written
    pub path: PathBuf,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

/// Render `(satellite, measurements)` pairs as a complete CSV document.
///
/// Rows follow the iteration order of `series`, then the order of each slice.
pub fn render_csv<'a, I>(series: I) -> ExportResult<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a [Measurement])>,
{
    let mut buffer = Vec::with_capacity(1024);
    buffer.extend_from_slice(BOM.as_bytes());

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    writer.write_record(CSV_HEADER)?;
    for (satellite, data) in series {
        for measurement in data {
            writer.write_record(record(satellite, measurement))?;
        }
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// One row with fixed precisions
fn record(satellite: &str, m: &Measurement) -> [String; 9] {
    [
        satellite.to_string(),
        m.formatted_time(),
        format!("{:.6}", m.latitude),
        format!("{:.6}", m.longitude),
        format!("{:.1}", m.radiation),
        m.city.clone(),
        format!("{:.1}", m.altitude_km),
        format!("{:.1}", m.distance_to_city_m),
        format!("{:.3}", m.influence),
    ]
}

/// Render the store and write it to `writer` in one call
pub fn write_csv<W: Write>(writer: &mut W, store: &MeasurementStore) -> ExportResult<usize> {
    let rendered = render_csv(store.iter())?;
    writer.write_all(&rendered)?;
    writer.flush()?;
    Ok(store.total_measurement_count())
}

/// Default destination: `~/satellite_measurements_yyyyMMdd_HHmmss.csv`
pub fn default_export_path(now: NaiveDateTime) -> ExportResult<PathBuf> {
    let home = home::home_dir().ok_or(ExportError::NoHomeDirectory)?;
    Ok(home.join(default_file_name(now)))
}

/// File name used by [`default_export_path`]
pub fn default_file_name(now: NaiveDateTime) -> String {
    format!("satellite_measurements_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write an already rendered document to `path`
pub fn export_to_path(contents: &[u8], path: &Path) -> ExportResult<()> {
    let mut file = File::create(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Export every measurement in `store` to `path`.
///
/// An empty `path` selects [`default_export_path`].
pub fn export_store(store: &MeasurementStore, path: &Path) -> ExportResult<ExportSummary> {
    let path = if path.as_os_str().is_empty() {
        default_export_path(Local::now().naive_local())?
    } else {
        path.to_path_buf()
    };

    let rows = store.total_measurement_count();
    let result = render_csv(store.iter()).and_then(|contents| export_to_path(&contents, &path));

    if let Err(e) = result {
        error!("CSV export failed: {}", e);
        return Err(e);
    }

    info!("Exported {} measurements to {}", rows, path.display());
    Ok(ExportSummary { path, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MeasurementStore {
        let mut store = MeasurementStore::new();
        store.add_measurement(
            "NOAA-19",
            Measurement::from_iso("2025-01-01T06:00:00", 55.7558, 37.6173, -92.54)
                .with_city("Москва")
                .with_altitude(870.0)
                .with_distance(1523.46)
                .with_influence(1.2346),
        );
        store.add_measurement(
            "METEOR-M2",
            Measurement::from_iso("2025-01-01T07:00:00", 59.9343, 30.3351, -88.0)
                .with_city("Открытая местность"),
        );
        store.add_measurement(
            "NOAA-19",
            Measurement::from_iso("broken", 1.0, 2.0, -80.04),
        );
        store
    }

    fn rendered(store: &MeasurementStore) -> String {
        String::from_utf8(render_csv(store.iter()).unwrap()).unwrap()
    }

    #[test]
    fn test_render_rows_and_order() {
        let store = sample_store();
        let csv = rendered(&store);

        assert!(csv.starts_with(BOM));
        let lines: Vec<&str> = csv.trim_start_matches(BOM).lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], CSV_HEADER.join(";"));
        assert_eq!(
            lines[1],
            "METEOR-M2;2025-01-01 07:00:00;59.934300;30.335100;-88.0;Открытая местность;0.0;0.0;1.000"
        );
        assert_eq!(
            lines[2],
            "NOAA-19;2025-01-01 06:00:00;55.755800;37.617300;-92.5;Москва;870.0;1523.5;1.235"
        );
        assert_eq!(lines[3], "NOAA-19;;1.000000;2.000000;-80.0;;0.0;0.0;1.000");
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_empty_store_is_header_only() {
        let store = MeasurementStore::new();
        assert_eq!(rendered(&store), format!("{BOM}{}\n", CSV_HEADER.join(";")));
    }

    #[test]
    fn test_names_with_separators_stay_one_record() {
        let mut store = MeasurementStore::new();
        store.add_measurement(
            "SAT;A",
            Measurement::from_iso("2025-01-01T06:00:00", 1.0, 2.0, -90.0)
                .with_city("Ростов;на;Дону\n\"X\""),
        );

        let csv = rendered(&store);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .from_reader(csv.trim_start_matches(BOM).as_bytes());

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 9);
        assert_eq!(&records[0][0], "SAT;A");
        assert_eq!(&records[0][5], "Ростов;на;Дону\n\"X\"");
        assert_eq!(&records[0][4], "-90.0");
    }

    #[test]
    fn test_write_csv_to_buffer() {
        let store = sample_store();
        let mut buffer = Vec::new();

        let rows = write_csv(&mut buffer, &store).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(&buffer[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(String::from_utf8(buffer).unwrap(), rendered(&store));
    }

    #[test]
    fn test_export_to_temp_file() {
        let store = sample_store();
        let path = std::env::temp_dir().join(format!(
            "rspacer_export_test_{}.csv",
            std::process::id()
        ));

        let summary = store.export_to_csv(&path).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.path, path);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, rendered(&store));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_open_failure() {
        let store = sample_store();
        let path = std::env::temp_dir()
            .join("rspacer_missing_dir_for_export_test")
            .join("out.csv");

        let result = store.export_to_csv(&path);
        assert!(matches!(result, Err(ExportError::Open { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_default_file_name() {
        let now = NaiveDateTime::parse_from_str("2025-02-03 04:05:06", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(
            default_file_name(now),
            "satellite_measurements_20250203_040506.csv"
        );
    }
}
