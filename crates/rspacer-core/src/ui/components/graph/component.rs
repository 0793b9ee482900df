//! Main chart component with Drawable trait implementation
//!
//! The chart orchestrates all rendering and owns one time/value series.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::storage::Measurement;
use crate::ui::core::Drawable;
use crate::ui::styling::{
    CHART_BACKGROUND, MARKER_FILL_COLOR, MARKER_STROKE_COLOR, SERIES_LINE_COLOR, message_style,
    title_style, value_label_style,
};

use super::axis::{AxisConfig, draw_axis_lines, draw_axis_titles, draw_time_axis, draw_value_axis};
use super::constants::{
    MARKER_RADIUS_PX, MARKER_STROKE_WIDTH_PX, NO_DATA_TEXT, SERIES_LINE_WIDTH_PX,
    TITLE_OFFSET_Y_PX, VALUE_LABEL_OFFSET_PX, VALUE_LABEL_STRIDE,
};
use super::grid::{GridConfig, draw_grid};
use super::series::ChartPoint;
use super::viewport::{DataBounds, Viewport, ViewportPadding};

/// Line chart of one satellite's signal over time
///
/// Points must be supplied in time order; the chart never reorders them.
/// [`ChartPoint::series_from`] builds a suitable series from stored
/// measurements.
pub struct SeriesChart {
    /// Bounding rectangle for the entire chart
    bounds: Rectangle,
    /// Title drawn above the plot area (empty = no title)
    title: String,
    /// Points in time order
    points: Vec<ChartPoint>,
    /// Grid configuration
    grid_config: GridConfig,
    /// Axis configuration
    axis_config: AxisConfig,
    /// Viewport for coordinate transformation
    viewport: Viewport,
    /// Background color
    background_color: Rgb565,
    /// Dirty flag for rendering optimization
    dirty: bool,
}

impl SeriesChart {
    /// Create an empty chart with default configuration
    pub fn new(bounds: Rectangle) -> Self {
        // Placeholder bounds until data arrives
        let data_bounds = DataBounds::new(0, 1, 0.0, 1.0);

        Self {
            bounds,
            title: String::new(),
            points: Vec::new(),
            grid_config: GridConfig::default(),
            axis_config: AxisConfig::default(),
            viewport: Viewport::new(data_bounds, bounds),
            background_color: CHART_BACKGROUND,
            dirty: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_grid(mut self, config: GridConfig) -> Self {
        self.grid_config = config;
        self
    }

    pub fn with_axes(mut self, config: AxisConfig) -> Self {
        self.axis_config = config;
        self
    }

    /// Set viewport padding
    pub fn with_padding(mut self, padding: ViewportPadding) -> Self {
        self.viewport = self.viewport.with_padding(padding);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.dirty = true;
    }

    /// Replace the series and rescale to fit it
    pub fn set_data(&mut self, points: Vec<ChartPoint>) {
        if let Some(bounds) = DataBounds::from_points(&points) {
            self.viewport.set_data_bounds(bounds);
        }
        self.points = points;
        self.dirty = true;
    }

    /// Replace the series with the valid measurements of one satellite
    pub fn set_measurements(&mut self, data: &[Measurement]) {
        self.set_data(ChartPoint::series_from(data));
    }

    /// Remove all points
    pub fn clear_data(&mut self) {
        self.points.clear();
        self.dirty = true;
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Move or resize the chart
    pub fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.viewport.set_screen_bounds(bounds);
        self.dirty = true;
    }

    /// Screen positions of all points
    pub fn screen_points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| self.viewport.data_to_screen(p))
            .collect()
    }

    /// Draw background
    fn draw_background<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background_color))
            .draw(display)
    }

    /// Centered message for an empty chart
    fn draw_no_data<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(NO_DATA_TEXT, self.bounds.center(), message_style(), style)
            .draw(display)?;
        Ok(())
    }

    fn draw_title<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.title.is_empty() {
            return Ok(());
        }

        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let position = Point::new(
            self.bounds.center().x,
            self.bounds.top_left.y + TITLE_OFFSET_Y_PX,
        );

        Text::with_text_style(&self.title, position, title_style(), style).draw(display)?;
        Ok(())
    }

    /// Connect consecutive points with straight segments
    fn draw_series<D: DrawTarget<Color = Rgb565>>(
        &self,
        screen: &[Point],
        display: &mut D,
    ) -> Result<(), D::Error> {
        if screen.len() < 2 {
            return Ok(());
        }

        let line_style = PrimitiveStyle::with_stroke(SERIES_LINE_COLOR, SERIES_LINE_WIDTH_PX);
        for pair in screen.windows(2) {
            Line::new(pair[0], pair[1])
                .into_styled(line_style)
                .draw(display)?;
        }

        Ok(())
    }

    /// Marker at every point, value label at every n-th point
    fn draw_markers<D: DrawTarget<Color = Rgb565>>(
        &self,
        screen: &[Point],
        display: &mut D,
    ) -> Result<(), D::Error> {
        let marker_style = PrimitiveStyleBuilder::new()
            .fill_color(MARKER_FILL_COLOR)
            .stroke_color(MARKER_STROKE_COLOR)
            .stroke_width(MARKER_STROKE_WIDTH_PX)
            .build();
        let label_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        for (i, (point, position)) in self.points.iter().zip(screen).enumerate() {
            Circle::with_center(*position, MARKER_RADIUS_PX * 2 + 1)
                .into_styled(marker_style)
                .draw(display)?;

            if i % VALUE_LABEL_STRIDE == 0 {
                let text = format!("{:.1}", point.value);
                Text::with_text_style(
                    &text,
                    *position - Point::new(0, VALUE_LABEL_OFFSET_PX),
                    value_label_style(),
                    label_style,
                )
                .draw(display)?;
            }
        }

        Ok(())
    }
}

impl Drawable for SeriesChart {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        // Layered rendering: background → title → grid → series → markers → axes
        self.draw_background(display)?;

        if self.points.is_empty() {
            return self.draw_no_data(display);
        }

        let screen = self.screen_points();

        self.draw_title(display)?;
        draw_grid(&self.grid_config, &self.viewport, display)?;
        self.draw_series(&screen, display)?;
        self.draw_markers(&screen, display)?;
        draw_axis_lines(&self.axis_config, &self.viewport, display)?;
        draw_value_axis(&self.axis_config, &self.viewport, display)?;
        draw_time_axis(&self.axis_config, &self.viewport, &self.points, display)?;
        draw_axis_titles(&self.axis_config, &self.viewport, display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::AXIS_COLOR;
    use chrono::{Duration, NaiveDateTime};
    use embedded_graphics::mock_display::MockDisplay;

    fn at(minutes: i64, value: f64) -> ChartPoint {
        let base =
            NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        ChartPoint::new(base + Duration::minutes(minutes), value)
    }

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    fn small_chart() -> SeriesChart {
        SeriesChart::new(Rectangle::new(Point::zero(), Size::new(64, 64)))
            .with_padding(ViewportPadding::uniform(10))
    }

    #[test]
    fn test_empty_chart_draws_background_only() {
        let chart = small_chart();
        let mut display = display();

        chart.draw(&mut display).unwrap();

        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(CHART_BACKGROUND));
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(CHART_BACKGROUND));
    }

    #[test]
    fn test_markers_and_axes() {
        let mut chart = small_chart();
        chart.set_data(vec![at(0, -90.0), at(1, -80.0), at(2, -85.0)]);
        let mut display = display();

        chart.draw(&mut display).unwrap();

        let screen = chart.screen_points();
        let vp = chart.viewport();
        assert_eq!(screen[0], Point::new(vp.left(), vp.bottom()));
        assert_eq!(screen[1].y, vp.top());
        assert_eq!(screen[2].x, vp.right());

        // Highest point sits on the top edge, clear of axes and labels
        assert_eq!(display.get_pixel(screen[1]), Some(MARKER_FILL_COLOR));
        // X axis line along the bottom edge, between markers
        let axis_probe = Point::new((vp.left() + screen[1].x) / 2, vp.bottom());
        assert_eq!(display.get_pixel(axis_probe), Some(AXIS_COLOR));
    }

    #[test]
    fn test_single_point_and_flat_series_render() {
        let mut display = display();

        let mut chart = small_chart();
        chart.set_data(vec![at(0, -85.0)]);
        chart.draw(&mut display).unwrap();
        assert_eq!(chart.screen_points(), chart.screen_points());

        let mut flat = small_chart();
        flat.set_data(vec![at(0, -85.0), at(5, -85.0), at(10, -85.0)]);
        flat.draw(&mut display).unwrap();

        let vp = flat.viewport();
        for point in flat.screen_points() {
            assert_eq!(point.y, vp.bottom());
            assert!(point.x >= vp.left() && point.x <= vp.right());
        }
    }

    #[test]
    fn test_clear_data_and_dirty_tracking() {
        let mut chart = small_chart().with_title("NOAA-19");
        assert!(chart.is_dirty());
        chart.mark_clean();

        chart.set_data(vec![at(0, -85.0)]);
        assert!(chart.is_dirty());
        assert_eq!(chart.points().len(), 1);
        assert_eq!(chart.title(), "NOAA-19");

        chart.mark_clean();
        chart.clear_data();
        assert!(chart.is_dirty());
        assert!(chart.points().is_empty());
    }

    #[test]
    fn test_set_measurements_skips_invalid() {
        let mut chart = small_chart();
        chart.set_measurements(&[
            Measurement::from_iso("2025-01-01T00:10:00", 0.0, 0.0, -84.0),
            Measurement::from_iso("nonsense", 0.0, 0.0, -99.0),
            Measurement::from_iso("2025-01-01T00:00:00", 0.0, 0.0, -88.0),
        ]);

        let values: Vec<f64> = chart.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![-88.0, -84.0]);
    }
}
