//! Chart images and CSV files written by the simulator

use std::error::Error;
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{info, warn};

use rspacer_core::config::{ChartConfig, Config};
use rspacer_core::export::{ExportResult, ExportSummary};
use rspacer_core::storage::MeasurementStore;
use rspacer_core::ui::{Drawable, SeriesChart};

/// Directory for generated files: the configured one, else the home
/// directory, else the working directory
pub fn output_directory(config: &Config) -> PathBuf {
    if let Some(dir) = &config.export.directory {
        return dir.clone();
    }

    home::home_dir().unwrap_or_else(|| {
        warn!("No home directory, writing output to the working directory");
        PathBuf::from(".")
    })
}

/// File-system friendly form of a satellite name
pub fn file_stem(satellite: &str) -> String {
    satellite
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Chart for one satellite sized to the configured canvas
pub fn satellite_chart(store: &MeasurementStore, satellite: &str, chart: &ChartConfig) -> SeriesChart {
    let bounds = Rectangle::new(Point::zero(), Size::new(chart.width, chart.height));
    let mut series_chart = SeriesChart::new(bounds).with_title(satellite);
    series_chart.set_measurements(store.satellite_data(satellite));
    series_chart
}

/// Render a chart off-screen and save it as PNG
pub fn save_chart_png(chart: &SeriesChart, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut display = SimulatorDisplay::<Rgb565>::new(chart.bounds().size);
    let Ok(()) = chart.draw(&mut display);

    display
        .to_rgb_output_image(&OutputSettingsBuilder::new().scale(1).build())
        .save_png(path)?;

    info!("Saved chart to {}", path.display());
    Ok(())
}

/// Export the whole store as CSV into `dir`
pub fn export_csv(store: &MeasurementStore, dir: &Path) -> ExportResult<ExportSummary> {
    let now = chrono::Local::now().naive_local();
    let path = dir.join(rspacer_core::export::default_file_name(now));
    store.export_to_csv(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("NOAA-19"), "NOAA-19");
        assert_eq!(file_stem("METEOR M2/b"), "METEOR_M2_b");
        assert_eq!(file_stem("Спутник 1"), "Спутник_1");
    }

    #[test]
    fn test_configured_output_directory() {
        let mut config = Config::default();
        config.export.directory = Some(PathBuf::from("/tmp/rspacer-out"));
        assert_eq!(output_directory(&config), PathBuf::from("/tmp/rspacer-out"));
    }
}
