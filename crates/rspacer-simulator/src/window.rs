//! Interactive chart window
//!
//! Renders the selected satellite's chart in an SDL2 window and redraws
//! whenever the store reports a change.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use rspacer_core::config::Config;
use rspacer_core::storage::{MeasurementStore, StoreEvent};
use rspacer_core::ui::Drawable;

use crate::generator::MockMeasurementGenerator;
use crate::output;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Satellite slot selected by a number key
fn keycode_to_slot(keycode: Keycode) -> Option<usize> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(0),
        Keycode::Num2 | Keycode::Kp2 => Some(1),
        Keycode::Num3 | Keycode::Kp3 => Some(2),
        Keycode::Num4 | Keycode::Kp4 => Some(3),
        Keycode::Num5 | Keycode::Kp5 => Some(4),
        Keycode::Num6 | Keycode::Kp6 => Some(5),
        Keycode::Num7 | Keycode::Kp7 => Some(6),
        Keycode::Num8 | Keycode::Kp8 => Some(7),
        Keycode::Num9 | Keycode::Kp9 => Some(8),
        _ => None,
    }
}

/// Index of the selected satellite in the configured list
fn satellite_index(config: &Config, satellite: &str) -> usize {
    config
        .simulation
        .satellites
        .iter()
        .position(|name| name == satellite)
        .unwrap_or(0)
}

pub fn run(store: &mut MeasurementStore, generator: &mut MockMeasurementGenerator, config: &Config) {
    let size = Size::new(config.chart.width, config.chart.height);
    let mut display = SimulatorDisplay::<Rgb565>::new(size);
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Аналитика измерений спутников", &output_settings);

    let changed = Rc::new(Cell::new(true));
    let flag = Rc::clone(&changed);
    let listener = store.subscribe(move |event: &StoreEvent| {
        if !matches!(event, StoreEvent::StatisticsUpdated(_)) {
            flag.set(true);
        }
    });

    let dir = output::output_directory(config);
    let mut selected = store.satellite_names().into_iter().next().unwrap_or_default();
    info!("Keys: 1-9=Satellite  A=Add  E=CSV  P=PNG  C=Clear  X=ClearAll  Q=Quit");

    let mut chart = output::satellite_chart(store, &selected, &config.chart);

    // The SDL window is lazily initialized on the first `update()` call.
    let Ok(()) = chart.draw(&mut display);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            let keycode = match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => keycode,
                _ => continue,
            };

            match keycode {
                Keycode::Q | Keycode::Escape => break 'running,
                Keycode::A if !selected.is_empty() => {
                    let index = satellite_index(config, &selected);
                    match generator.next_measurement(index) {
                        Some(measurement) => store.add_measurement(&selected, measurement),
                        None => warn!("No further sample times can be generated"),
                    }
                }
                Keycode::E => {
                    if let Err(e) = output::export_csv(store, &dir) {
                        error!("CSV export failed: {}", e);
                    }
                }
                Keycode::P => {
                    let path = dir.join(format!("{}_chart.png", output::file_stem(&selected)));
                    if let Err(e) = output::save_chart_png(&chart, &path) {
                        error!("Failed to save chart: {}", e);
                    }
                }
                Keycode::C => store.clear_satellite(&selected),
                Keycode::X => store.clear_all(),
                other => {
                    let names = store.satellite_names();
                    if let Some(name) = keycode_to_slot(other).and_then(|slot| names.get(slot)) {
                        info!("Showing {}", name);
                        selected = name.clone();
                        changed.set(true);
                    }
                }
            }
        }

        if changed.replace(false) {
            chart = output::satellite_chart(store, &selected, &config.chart);
            let Ok(()) = display.clear(Rgb565::WHITE);
            let Ok(()) = chart.draw(&mut display);
            chart.mark_clean();
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    store.unsubscribe(listener);
}
