//! Constants for chart rendering
//!
//! All magic numbers are defined here with descriptive names and units.

/// Number of vertical grid divisions (lines are drawn on both edges too)
pub const VERTICAL_GRID_DIVISIONS: u32 = 10;

/// Number of horizontal grid divisions
pub const HORIZONTAL_GRID_DIVISIONS: u32 = 8;

/// Number of tick divisions per axis (one more label than divisions)
pub const AXIS_TICK_DIVISIONS: u32 = 5;

/// Length of axis tick marks in pixels
pub const AXIS_TICK_LENGTH_PX: i32 = 5;

/// Every n-th point gets a value label
pub const VALUE_LABEL_STRIDE: usize = 5;

/// Vertical offset of a value label above its point in pixels
pub const VALUE_LABEL_OFFSET_PX: i32 = 15;

/// Radius of point markers in pixels
pub const MARKER_RADIUS_PX: u32 = 5;

/// Outline width of point markers in pixels
pub const MARKER_STROKE_WIDTH_PX: u32 = 1;

/// Series line width in pixels
pub const SERIES_LINE_WIDTH_PX: u32 = 2;

/// Axis line width in pixels
pub const AXIS_LINE_WIDTH_PX: u32 = 2;

/// Grid line width in pixels
pub const GRID_LINE_WIDTH_PX: u32 = 1;

/// Maximum length of formatted tick labels (bytes)
pub const MAX_AXIS_LABEL_LENGTH: usize = 16;

/// Default viewport padding for top edge in pixels
pub const DEFAULT_VIEWPORT_PADDING_TOP_PX: u32 = 50;

/// Default viewport padding for right edge in pixels
pub const DEFAULT_VIEWPORT_PADDING_RIGHT_PX: u32 = 40;

/// Default viewport padding for bottom edge in pixels
pub const DEFAULT_VIEWPORT_PADDING_BOTTOM_PX: u32 = 80;

/// Default viewport padding for left edge in pixels
pub const DEFAULT_VIEWPORT_PADDING_LEFT_PX: u32 = 80;

/// Time range substituted for a zero-width series (milliseconds)
pub const MIN_TIME_RANGE_MS: i64 = 1;

/// Value range substituted for a flat series (dBm)
pub const MIN_VALUE_RANGE: f64 = 1.0;

/// Vertical position of the chart title below the top edge in pixels
pub const TITLE_OFFSET_Y_PX: i32 = 25;

/// Distance of the X axis title below the plot area in pixels
pub const X_TITLE_OFFSET_PX: i32 = 70;

/// Distance of time tick labels below the plot area in pixels
pub const TIME_LABEL_OFFSET_PX: i32 = 18;

/// Line height of two-line time tick labels in pixels
pub const TIME_LABEL_LINE_HEIGHT_PX: i32 = 12;

/// Gap between value tick labels and the Y axis in pixels
pub const VALUE_LABEL_GAP_PX: i32 = 8;

/// Message shown when the chart has no points
pub const NO_DATA_TEXT: &str = "Нет данных для отображения";

/// Y axis title
pub const Y_AXIS_TITLE: &str = "Уровень излучения (дБм)";

/// X axis title
pub const X_AXIS_TITLE: &str = "Время";

/// Date line of a time tick label (`dd.MM.yy`)
pub const TICK_DATE_FORMAT: &str = "%d.%m.%y";

/// Time line of a time tick label (`HH:mm`)
pub const TICK_TIME_FORMAT: &str = "%H:%M";
