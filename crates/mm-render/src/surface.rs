//! The drawing target painters write to.
//!
//! Implemented by the browser canvas bridge, the Vello scene backend, and a
//! recording surface for headless use. Every surface also measures text, so
//! layout and painting agree on line widths.

use crate::style::Color;
use kurbo::{BezPath, Circle, Point, RoundedRect, Size, Vec2};
use mm_core::TextMeasure;

pub trait Surface: TextMeasure {
    /// Fill the whole visible area, ignoring the current translation.
    fn clear(&mut self, size: Size, color: Color);

    /// Offset applied to everything drawn after this call.
    fn set_translation(&mut self, offset: Vec2);

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f64);

    fn fill_circle(&mut self, circle: Circle, color: Color);

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64);

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draw one line of text with its top-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color);
}
