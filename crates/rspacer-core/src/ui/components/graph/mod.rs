//! Time-series chart rendering
//!
//! Projects a caller-sorted series of `(time, value)` points onto a
//! rectangular plot area and renders it onto any [`DrawTarget`] with an
//! [`Rgb565`] color space:
//!
//! - Background, title and a 10 × 8 grid
//! - Straight line segments between consecutive points
//! - A circular marker at every point, value labels at every fifth point
//! - Axis lines with five tick divisions each and axis titles
//!
//! The projection is defined for any non-empty series: when all points share
//! one time or one value, a unit range is substituted so every point still
//! maps to a finite pixel.
//!
//! # Examples
//!
//! ```ignore
//! use rspacer_core::ui::components::graph::*;
//! use rspacer_core::ui::Drawable;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//!
//! let bounds = Rectangle::new(Point::zero(), Size::new(800, 600));
//! let mut chart = SeriesChart::new(bounds).with_title("NOAA-19");
//! chart.set_measurements(store.satellite_data("NOAA-19"));
//! chart.draw(&mut display)?;
//! ```
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget
//! [`Rgb565`]: embedded_graphics::pixelcolor::Rgb565

mod axis;
mod component;
pub mod constants;
mod grid;
pub mod series;
pub mod viewport;

pub use axis::{AxisConfig, LabelFormatter, format_time, format_value, tick_index, value_at_tick};
pub use component::SeriesChart;
pub use grid::GridConfig;
pub use series::ChartPoint;
pub use viewport::{DataBounds, Viewport, ViewportPadding};
