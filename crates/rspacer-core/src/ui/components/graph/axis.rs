//! Axis configuration and label rendering
//!
//! Both axes get the same number of tick divisions. Value ticks are spread
//! evenly over the value range; time ticks follow the sample positions, so
//! irregularly spaced measurements produce irregularly spaced time labels.

use core::fmt::Write;

use chrono::NaiveDateTime;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;

use crate::ui::styling::{AXIS_COLOR, axis_title_style, tick_label_style};

use super::constants::{
    AXIS_LINE_WIDTH_PX, AXIS_TICK_DIVISIONS, AXIS_TICK_LENGTH_PX, MAX_AXIS_LABEL_LENGTH,
    TICK_DATE_FORMAT, TICK_TIME_FORMAT, TIME_LABEL_LINE_HEIGHT_PX, TIME_LABEL_OFFSET_PX,
    VALUE_LABEL_GAP_PX, X_AXIS_TITLE, X_TITLE_OFFSET_PX, Y_AXIS_TITLE,
};
use super::grid::division_offset;
use super::series::ChartPoint;
use super::viewport::Viewport;

/// Label formatter for axis values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelFormatter {
    /// Format as numeric value with optional unit
    Numeric {
        /// Number of decimal places
        precision: usize,
        /// Unit suffix
        unit: &'static str,
    },
    /// Format as a calendar time using a chrono format string
    DateTime {
        /// First line (e.g. the date)
        first_line: &'static str,
        /// Second line (e.g. the time of day)
        second_line: &'static str,
    },
}

/// Axis configuration shared by both axes
#[derive(Clone, Copy)]
pub struct AxisConfig {
    /// Number of tick divisions per axis
    pub tick_divisions: u32,
    /// Tick mark length in pixels
    pub tick_length: i32,
    /// Axis line and tick color
    pub line_color: Rgb565,
    /// Axis line width in pixels
    pub line_width: u32,
    /// Value (Y) tick label format
    pub value_formatter: LabelFormatter,
    /// Time (X) tick label format
    pub time_formatter: LabelFormatter,
    /// Text style for tick labels
    pub label_style: MonoTextStyle<'static, Rgb565>,
    /// Text style for axis titles
    pub title_style: MonoTextStyle<'static, Rgb565>,
    /// Whether to draw the axis titles
    pub show_titles: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_divisions: AXIS_TICK_DIVISIONS,
            tick_length: AXIS_TICK_LENGTH_PX,
            line_color: AXIS_COLOR,
            line_width: AXIS_LINE_WIDTH_PX,
            value_formatter: LabelFormatter::Numeric {
                precision: 1,
                unit: "",
            },
            time_formatter: LabelFormatter::DateTime {
                first_line: TICK_DATE_FORMAT,
                second_line: TICK_TIME_FORMAT,
            },
            label_style: tick_label_style(),
            title_style: axis_title_style(),
            show_titles: true,
        }
    }
}

/// Draw the X and Y axis lines along the bottom and left plot edges
pub(super) fn draw_axis_lines<D: DrawTarget<Color = Rgb565>>(
    config: &AxisConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(config.line_color, config.line_width);
    let bottom_left = Point::new(viewport.left(), viewport.bottom());

    Line::new(bottom_left, Point::new(viewport.right(), viewport.bottom()))
        .into_styled(style)
        .draw(display)?;
    Line::new(Point::new(viewport.left(), viewport.top()), bottom_left)
        .into_styled(style)
        .draw(display)?;

    Ok(())
}

/// Draw value ticks and labels to the left of the plot area
pub(super) fn draw_value_axis<D: DrawTarget<Color = Rgb565>>(
    config: &AxisConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    if config.tick_divisions == 0 {
        return Ok(());
    }

    let bounds = viewport.data_bounds();
    let tick_style = PrimitiveStyle::with_stroke(config.line_color, 1);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Middle)
        .build();
    let left = viewport.left();

    for i in 0..=config.tick_divisions {
        let value = value_at_tick(bounds.value_min, bounds.value_max, i, config.tick_divisions);
        let y = viewport.bottom()
            - division_offset(viewport.bottom() - viewport.top(), i, config.tick_divisions);

        Line::new(Point::new(left - config.tick_length, y), Point::new(left, y))
            .into_styled(tick_style)
            .draw(display)?;

        let label = format_value(value, &config.value_formatter);
        Text::with_text_style(
            label.as_str(),
            Point::new(left - VALUE_LABEL_GAP_PX, y),
            config.label_style,
            text_style,
        )
        .draw(display)?;
    }

    Ok(())
}

/// Draw time ticks and two-line labels below the plot area
pub(super) fn draw_time_axis<D: DrawTarget<Color = Rgb565>>(
    config: &AxisConfig,
    viewport: &Viewport,
    points: &[ChartPoint],
    display: &mut D,
) -> Result<(), D::Error> {
    if config.tick_divisions == 0 || points.is_empty() {
        return Ok(());
    }

    let tick_style = PrimitiveStyle::with_stroke(config.line_color, 1);
    let bottom = viewport.bottom();

    for i in 0..=config.tick_divisions {
        let point = &points[tick_index(points.len(), i, config.tick_divisions)];
        let x = viewport.time_to_x(point.time_ms());

        Line::new(Point::new(x, bottom), Point::new(x, bottom + config.tick_length))
            .into_styled(tick_style)
            .draw(display)?;

        let (first, second) = format_time(&point.time, &config.time_formatter);
        let label_y = bottom + TIME_LABEL_OFFSET_PX;
        Text::with_alignment(
            first.as_str(),
            Point::new(x, label_y),
            config.label_style,
            Alignment::Center,
        )
        .draw(display)?;
        Text::with_alignment(
            second.as_str(),
            Point::new(x, label_y + TIME_LABEL_LINE_HEIGHT_PX),
            config.label_style,
            Alignment::Center,
        )
        .draw(display)?;
    }

    Ok(())
}

/// Draw the axis titles
///
/// The Y title sits above the value axis since mono fonts cannot be rotated.
pub(super) fn draw_axis_titles<D: DrawTarget<Color = Rgb565>>(
    config: &AxisConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    if !config.show_titles {
        return Ok(());
    }

    let screen = viewport.screen_bounds();
    let y_title_style = TextStyleBuilder::new()
        .alignment(Alignment::Left)
        .baseline(Baseline::Bottom)
        .build();

    Text::with_text_style(
        Y_AXIS_TITLE,
        Point::new(screen.top_left.x + 5, viewport.top() - 4),
        config.title_style,
        y_title_style,
    )
    .draw(display)?;

    Text::with_alignment(
        X_AXIS_TITLE,
        Point::new(
            (viewport.left() + viewport.right()) / 2,
            viewport.bottom() + X_TITLE_OFFSET_PX,
        ),
        config.title_style,
        Alignment::Center,
    )
    .draw(display)?;

    Ok(())
}

/// Value shown at tick `i` of `divisions`, from `min` (tick 0) to `max`
pub fn value_at_tick(min: f64, max: f64, i: u32, divisions: u32) -> f64 {
    if divisions == 0 {
        return min;
    }
    min + (max - min) * i as f64 / divisions as f64
}

/// Index of the sample labelled at time tick `i` of `divisions`
pub fn tick_index(len: usize, i: u32, divisions: u32) -> usize {
    if len == 0 || divisions == 0 {
        return 0;
    }
    (len * i as usize / divisions as usize).min(len - 1)
}

/// Format a value label
///
/// Uses a fixed-capacity heapless String; labels that do not fit are
/// truncated.
pub fn format_value(value: f64, formatter: &LabelFormatter) -> String<MAX_AXIS_LABEL_LENGTH> {
    let mut s = String::new();
    match formatter {
        LabelFormatter::Numeric { precision, unit } => {
            let _ = write!(s, "{:.*}{}", *precision, value, unit);
        }
        LabelFormatter::DateTime { .. } => {
            let _ = write!(s, "{:.1}", value);
        }
    }
    s
}

/// Format a two-line time label
pub fn format_time(
    time: &NaiveDateTime,
    formatter: &LabelFormatter,
) -> (String<MAX_AXIS_LABEL_LENGTH>, String<MAX_AXIS_LABEL_LENGTH>) {
    let mut first = String::new();
    let mut second = String::new();
    match formatter {
        LabelFormatter::DateTime {
            first_line,
            second_line,
        } => {
            let _ = write!(first, "{}", time.format(first_line));
            let _ = write!(second, "{}", time.format(second_line));
        }
        LabelFormatter::Numeric { .. } => {
            let _ = write!(first, "{}", time.format(TICK_DATE_FORMAT));
            let _ = write!(second, "{}", time.format(TICK_TIME_FORMAT));
        }
    }
    (first, second)
}
