//! Grid line rendering for chart backgrounds
//!
//! Grid lines divide the plot area evenly and include both edges.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::ui::styling::GRID_COLOR;

use super::constants::{GRID_LINE_WIDTH_PX, HORIZONTAL_GRID_DIVISIONS, VERTICAL_GRID_DIVISIONS};
use super::viewport::Viewport;

/// Grid configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Number of column divisions (0 = no vertical lines)
    pub vertical_divisions: u32,
    /// Number of row divisions (0 = no horizontal lines)
    pub horizontal_divisions: u32,
    /// Line color
    pub color: Rgb565,
    /// Line width in pixels
    pub width: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            vertical_divisions: VERTICAL_GRID_DIVISIONS,
            horizontal_divisions: HORIZONTAL_GRID_DIVISIONS,
            color: GRID_COLOR,
            width: GRID_LINE_WIDTH_PX,
        }
    }
}

/// Offset of division `i` out of `divisions` across `span` pixels
pub(super) fn division_offset(span: i32, i: u32, divisions: u32) -> i32 {
    if divisions == 0 {
        return 0;
    }
    (span as i64 * i as i64 / divisions as i64) as i32
}

/// Draw grid lines over the plot area
pub(super) fn draw_grid<D: DrawTarget<Color = Rgb565>>(
    config: &GridConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(config.color, config.width);
    let (left, right, top, bottom) = (
        viewport.left(),
        viewport.right(),
        viewport.top(),
        viewport.bottom(),
    );

    if config.vertical_divisions > 0 {
        for i in 0..=config.vertical_divisions {
            let x = left + division_offset(right - left, i, config.vertical_divisions);
            Line::new(Point::new(x, top), Point::new(x, bottom))
                .into_styled(style)
                .draw(display)?;
        }
    }

    if config.horizontal_divisions > 0 {
        for i in 0..=config.horizontal_divisions {
            let y = top + division_offset(bottom - top, i, config.horizontal_divisions);
            Line::new(Point::new(left, y), Point::new(right, y))
                .into_styled(style)
                .draw(display)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_offsets_cover_both_edges() {
        assert_eq!(division_offset(100, 0, 10), 0);
        assert_eq!(division_offset(100, 5, 10), 50);
        assert_eq!(division_offset(100, 10, 10), 100);
        assert_eq!(division_offset(100, 3, 0), 0);
    }
}
