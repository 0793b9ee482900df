//! Desktop simulator for the RSPACER measurement store and analytics chart.
//!
//! Fills the store with synthetic satellite measurements, logs global and
//! per-satellite statistics, then either writes one chart PNG per satellite
//! plus a CSV export (default), or opens an interactive SDL2 chart window
//! (`--features window`).
//!
//! Configuration is read from the TOML file named by `RSPACER_CONFIG`
//! (environment or `.env`); without it, defaults apply. `RUST_LOG` controls
//! log output.
//!
//! # Key bindings (window mode)
//!
//! | Key   | Action                          |
//! |-------|---------------------------------|
//! | 1-9   | Select satellite                |
//! | A     | Add a live measurement          |
//! | E     | Export CSV                      |
//! | P     | Save the chart as PNG           |
//! | C     | Clear the selected satellite    |
//! | X     | Clear all satellites            |
//! | Q/Esc | Quit                            |

mod generator;
mod output;
#[cfg(feature = "window")]
mod window;

use chrono::Duration;
use log::{info, warn};

use rspacer_core::config::Config;
use rspacer_core::stats::SatelliteStatistics;
use rspacer_core::storage::{MeasurementStore, StoreEvent};

use generator::MockMeasurementGenerator;

/// Environment variable naming the TOML config file
const CONFIG_ENV_VAR: &str = "RSPACER_CONFIG";

/// Sample spacing used when the configured one cannot be represented
const DEFAULT_INTERVAL_MINUTES: i64 = 30;

/// Load configuration from `RSPACER_CONFIG`, falling back to defaults
fn load_config() -> Config {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        info!("{} not set, using default configuration", CONFIG_ENV_VAR);
        return Config::default();
    };

    match Config::load(&path) {
        Ok(config) => {
            info!("Loaded configuration from {}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring configuration from {}: {}", path, e);
            Config::default()
        }
    }
}

/// Store listener that mirrors every change into the log
fn log_event(event: &StoreEvent) {
    match event {
        StoreEvent::SatelliteAdded { satellite } => info!("Satellite added: {}", satellite),
        StoreEvent::DataAdded { satellite, count } => {
            log::debug!("{} now holds {} measurements", satellite, count)
        }
        StoreEvent::SatelliteRemoved { satellite, removed } => {
            info!("Satellite {} removed ({} measurements)", satellite, removed)
        }
        StoreEvent::DataCleared { removed } => info!("Store cleared ({} measurements)", removed),
        StoreEvent::StatisticsUpdated(_) => {}
    }
}

/// Log global statistics and the summary table of every satellite
fn log_statistics(store: &MeasurementStore) {
    let stats = store.statistics();
    info!(
        "Total: {} measurements, {} satellites, {} cities",
        stats.total_measurements, stats.unique_satellites, stats.unique_cities
    );
    info!(
        "Signal: min {:.1} dBm, max {:.1} dBm, avg {:.1} dBm (at {})",
        stats.min_radiation, stats.max_radiation, stats.avg_radiation, stats.last_update
    );

    for (satellite, data) in store.iter() {
        let Some(sat_stats) = SatelliteStatistics::compute(data) else {
            info!("{}: no measurements", satellite);
            continue;
        };

        info!("{}:", satellite);
        for (label, value) in sat_stats.summary_rows() {
            info!("  {}: {}", label, value);
        }
    }
}

/// Write a chart PNG per satellite and a CSV export
#[cfg(not(feature = "window"))]
fn run_headless(store: &MeasurementStore, config: &Config) {
    let dir = output::output_directory(config);

    for satellite in store.satellite_names() {
        let chart = output::satellite_chart(store, &satellite, &config.chart);
        let path = dir.join(format!("{}_chart.png", output::file_stem(&satellite)));

        if let Err(e) = output::save_chart_png(&chart, &path) {
            log::error!("Failed to save chart for {}: {}", satellite, e);
        }
    }

    match output::export_csv(store, &dir) {
        Ok(summary) => info!(
            "CSV export: {} rows in {}",
            summary.rows,
            summary.path.display()
        ),
        Err(e) => log::error!("CSV export failed: {}", e),
    }
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    env_logger::init();
    info!("Starting RSPACER simulator");

    let config = load_config();

    let mut store = MeasurementStore::new();
    store.subscribe(log_event);

    let interval = Duration::try_minutes(config.simulation.interval_minutes).unwrap_or_else(|| {
        warn!(
            "interval_minutes = {} is not representable, using {}",
            config.simulation.interval_minutes,
            DEFAULT_INTERVAL_MINUTES
        );
        Duration::minutes(DEFAULT_INTERVAL_MINUTES)
    });
    let mut generator =
        MockMeasurementGenerator::new(MockMeasurementGenerator::default_epoch(), interval);
    generator.populate(
        &mut store,
        &config.simulation.satellites,
        config.simulation.samples,
    );

    log_statistics(&store);

    #[cfg(feature = "window")]
    window::run(&mut store, &mut generator, &config);

    #[cfg(not(feature = "window"))]
    run_headless(&store, &config);

    info!("Simulator exiting");
}
