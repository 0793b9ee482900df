//! Viewport and coordinate transformation utilities
//!
//! Handles transformation between data space (timestamps, dBm values) and
//! screen space (pixel coordinates).

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::constants::{
    DEFAULT_VIEWPORT_PADDING_BOTTOM_PX, DEFAULT_VIEWPORT_PADDING_LEFT_PX,
    DEFAULT_VIEWPORT_PADDING_RIGHT_PX, DEFAULT_VIEWPORT_PADDING_TOP_PX, MIN_TIME_RANGE_MS,
    MIN_VALUE_RANGE,
};
use super::series::ChartPoint;

/// Data space bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    /// Earliest time in milliseconds since the epoch
    pub time_min: i64,
    /// Latest time in milliseconds since the epoch
    pub time_max: i64,
    /// Lowest value
    pub value_min: f64,
    /// Highest value
    pub value_max: f64,
}

impl DataBounds {
    pub const fn new(time_min: i64, time_max: i64, value_min: f64, value_max: f64) -> Self {
        Self {
            time_min,
            time_max,
            value_min,
            value_max,
        }
    }

    /// Calculate bounds from a slice of points
    pub fn from_points(points: &[ChartPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.time_ms(), first.time_ms(), first.value, first.value);

        for point in points.iter().skip(1) {
            let time = point.time_ms();
            bounds.time_min = bounds.time_min.min(time);
            bounds.time_max = bounds.time_max.max(time);
            bounds.value_min = bounds.value_min.min(point.value);
            bounds.value_max = bounds.value_max.max(point.value);
        }

        Some(bounds)
    }

    /// Time span in milliseconds, never zero
    pub fn time_range(&self) -> i64 {
        let range = self.time_max.saturating_sub(self.time_min);
        if range == 0 { MIN_TIME_RANGE_MS } else { range }
    }

    /// Value span, never zero
    pub fn value_range(&self) -> f64 {
        let range = self.value_max - self.value_min;
        if range == 0.0 || !range.is_finite() {
            MIN_VALUE_RANGE
        } else {
            range
        }
    }
}

/// Padding around the plot area for labels and margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPadding {
    /// Top padding in pixels
    pub top: u32,
    /// Right padding in pixels
    pub right: u32,
    /// Bottom padding in pixels
    pub bottom: u32,
    /// Left padding in pixels
    pub left: u32,
}

impl Default for ViewportPadding {
    fn default() -> Self {
        Self {
            top: DEFAULT_VIEWPORT_PADDING_TOP_PX,
            right: DEFAULT_VIEWPORT_PADDING_RIGHT_PX,
            bottom: DEFAULT_VIEWPORT_PADDING_BOTTOM_PX,
            left: DEFAULT_VIEWPORT_PADDING_LEFT_PX,
        }
    }
}

impl ViewportPadding {
    /// Create uniform padding on all sides
    pub const fn uniform(padding: u32) -> Self {
        Self {
            top: padding,
            right: padding,
            bottom: padding,
            left: padding,
        }
    }

    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Viewport for transforming data coordinates to screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Data space bounds
    data_bounds: DataBounds,
    /// Screen space bounds (full area including padding)
    screen_bounds: Rectangle,
    /// Padding around the plotting area
    padding: ViewportPadding,
}

impl Viewport {
    pub fn new(data_bounds: DataBounds, screen_bounds: Rectangle) -> Self {
        Self {
            data_bounds,
            screen_bounds,
            padding: ViewportPadding::default(),
        }
    }

    /// Create viewport with custom padding
    pub fn with_padding(mut self, padding: ViewportPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Get the plot area (screen bounds minus padding)
    pub fn plot_area(&self) -> Rectangle {
        let top_left = Point::new(
            self.screen_bounds.top_left.x + self.padding.left as i32,
            self.screen_bounds.top_left.y + self.padding.top as i32,
        );

        let width = self
            .screen_bounds
            .size
            .width
            .saturating_sub(self.padding.left + self.padding.right);
        let height = self
            .screen_bounds
            .size
            .height
            .saturating_sub(self.padding.top + self.padding.bottom);

        Rectangle::new(top_left, Size::new(width, height))
    }

    /// Leftmost column of the plot area
    pub fn left(&self) -> i32 {
        self.plot_area().top_left.x
    }

    /// Rightmost column of the plot area
    pub fn right(&self) -> i32 {
        let area = self.plot_area();
        area.top_left.x + area.size.width.saturating_sub(1) as i32
    }

    /// Topmost row of the plot area
    pub fn top(&self) -> i32 {
        self.plot_area().top_left.y
    }

    /// Bottom row of the plot area
    pub fn bottom(&self) -> i32 {
        let area = self.plot_area();
        area.top_left.y + area.size.height.saturating_sub(1) as i32
    }

    /// Screen column for a time in milliseconds since the epoch
    pub fn time_to_x(&self, time_ms: i64) -> i32 {
        let offset = time_ms.saturating_sub(self.data_bounds.time_min) as f64;
        let norm = offset / self.data_bounds.time_range() as f64;
        let span = (self.right() - self.left()) as f64;
        self.left() + (span * norm) as i32
    }

    /// Screen row for a value
    ///
    /// Note: screen Y increases downward, so the lowest value maps to the
    /// bottom edge.
    pub fn value_to_y(&self, value: f64) -> i32 {
        let norm = (value - self.data_bounds.value_min) / self.data_bounds.value_range();
        let span = (self.bottom() - self.top()) as f64;
        self.bottom() - (span * norm) as i32
    }

    /// Transform a data point to screen coordinates
    ///
    /// The result is always a valid pixel position; points inside the data
    /// bounds land inside the plot area.
    pub fn data_to_screen(&self, point: &ChartPoint) -> Point {
        Point::new(self.time_to_x(point.time_ms()), self.value_to_y(point.value))
    }

    /// Get the data bounds
    pub fn data_bounds(&self) -> &DataBounds {
        &self.data_bounds
    }

    /// Get the screen bounds
    pub fn screen_bounds(&self) -> Rectangle {
        self.screen_bounds
    }

    /// Get the padding
    pub fn padding(&self) -> &ViewportPadding {
        &self.padding
    }

    /// Update data bounds
    pub fn set_data_bounds(&mut self, bounds: DataBounds) {
        self.data_bounds = bounds;
    }

    /// Update screen bounds
    pub fn set_screen_bounds(&mut self, bounds: Rectangle) {
        self.screen_bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};
    use embedded_graphics::primitives::ContainsPoint;

    fn at(minutes: i64, value: f64) -> ChartPoint {
        let base =
            NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        ChartPoint::new(base + Duration::minutes(minutes), value)
    }

    fn viewport(points: &[ChartPoint]) -> Viewport {
        let bounds = DataBounds::from_points(points).unwrap();
        Viewport::new(bounds, Rectangle::new(Point::zero(), Size::new(800, 600)))
    }

    #[test]
    fn test_plot_area_uses_default_padding() {
        let vp = viewport(&[at(0, 0.0)]);
        let area = vp.plot_area();

        assert_eq!(area.top_left, Point::new(80, 50));
        assert_eq!(area.size, Size::new(680, 470));
        assert_eq!(vp.right(), 759);
        assert_eq!(vp.bottom(), 519);
    }

    #[test]
    fn test_extremes_map_to_edges() {
        let points = [at(0, -90.0), at(30, -80.0), at(60, -85.0)];
        let vp = viewport(&points);

        let first = vp.data_to_screen(&points[0]);
        assert_eq!(first, Point::new(vp.left(), vp.bottom()));

        let highest = vp.data_to_screen(&points[1]);
        assert_eq!(highest.y, vp.top());

        let last = vp.data_to_screen(&points[2]);
        assert_eq!(last.x, vp.right());
    }

    #[test]
    fn test_single_point_is_finite_and_deterministic() {
        let points = [at(0, -90.0)];
        let vp = viewport(&points);

        assert_eq!(vp.data_bounds().time_range(), 1);
        assert_eq!(vp.data_bounds().value_range(), 1.0);

        let a = vp.data_to_screen(&points[0]);
        let b = vp.data_to_screen(&points[0]);
        assert_eq!(a, b);
        assert_eq!(a, Point::new(vp.left(), vp.bottom()));
    }

    #[test]
    fn test_flat_series() {
        let points = [at(0, -85.0), at(10, -85.0), at(20, -85.0)];
        let vp = viewport(&points);

        for point in &points {
            let screen = vp.data_to_screen(point);
            assert_eq!(screen.y, vp.bottom());
            assert!(vp.plot_area().contains(screen));
        }
    }

    #[test]
    fn test_bounds_scan_unsorted_input() {
        let points = [at(20, -70.0), at(0, -95.0), at(10, -80.0)];
        let bounds = DataBounds::from_points(&points).unwrap();

        assert_eq!(bounds.time_min, points[1].time_ms());
        assert_eq!(bounds.time_max, points[0].time_ms());
        assert_eq!(bounds.value_min, -95.0);
        assert_eq!(bounds.value_max, -70.0);
        assert!(DataBounds::from_points(&[]).is_none());
    }
}
