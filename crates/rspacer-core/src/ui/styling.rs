//! Chart colors and text styles
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::iso_8859_5::{FONT_6X10, FONT_7X13, FONT_7X13_BOLD, FONT_9X15_BOLD};
use embedded_graphics::pixelcolor::Rgb565;

/// Chart background (white)
pub const CHART_BACKGROUND: Rgb565 = Rgb565::new(255 >> 3, 255 >> 2, 255 >> 3);

/// Grid lines (very light gray)
pub const GRID_COLOR: Rgb565 = Rgb565::new(230 >> 3, 230 >> 2, 230 >> 3);

/// Series line (blue)
pub const SERIES_LINE_COLOR: Rgb565 = Rgb565::new(0, 120 >> 2, 215 >> 3);

/// Point marker fill (red)
pub const MARKER_FILL_COLOR: Rgb565 = Rgb565::new(255 >> 3, 50 >> 2, 50 >> 3);

/// Point marker outline (dark red)
pub const MARKER_STROKE_COLOR: Rgb565 = Rgb565::new(200 >> 3, 0, 0);

/// Axis lines, tick marks and titles
pub const AXIS_COLOR: Rgb565 = Rgb565::new(0, 0, 0);

/// Tick labels and the empty-chart message (medium gray)
pub const LABEL_COLOR: Rgb565 = Rgb565::new(100 >> 3, 100 >> 2, 100 >> 3);

/// Chart title
pub fn title_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_9X15_BOLD, AXIS_COLOR)
}

/// Axis titles
pub fn axis_title_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_7X13_BOLD, AXIS_COLOR)
}

/// Tick labels
pub fn tick_label_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_6X10, LABEL_COLOR)
}

/// Value labels next to data points
pub fn value_label_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_6X10, AXIS_COLOR)
}

/// "No data" message
pub fn message_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_7X13, LABEL_COLOR)
}
