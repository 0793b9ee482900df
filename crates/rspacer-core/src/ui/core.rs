//! Core UI traits shared by chart components

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Trait for any UI element that can be drawn
///
/// Implementors render onto any [`DrawTarget`] with an [`Rgb565`] color
/// space: the simulator window, an off-screen framebuffer, or a mock display
/// in tests.
pub trait Drawable {
    /// Draw the element within its bounds
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);
}
