//! Canvas2D surface.
//!
//! Draws to an HTML `<canvas>` via `CanvasRenderingContext2d` and measures
//! text with the context's own `measureText`, so wrapping matches what the
//! browser actually paints.

use mm_core::kurbo::{BezPath, Circle, PathEl, Point, RoundedRect, Size, Vec2};
use mm_core::{EstimatedTextMeasure, TextMeasure};
use mm_render::{Color, Surface};
use web_sys::CanvasRenderingContext2d;

pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    font_family: &'a str,
    offset: Vec2,
    fallback: EstimatedTextMeasure,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, font_family: &'a str) -> Self {
        Self {
            ctx,
            font_family,
            offset: Vec2::ZERO,
            fallback: EstimatedTextMeasure::default(),
        }
    }

    fn set_font(&self, font_size: f64) {
        self.ctx
            .set_font(&format!("{font_size}px {}", self.font_family));
    }

    fn apply_transform(&self, offset: Vec2) {
        let _ = self
            .ctx
            .set_transform(1.0, 0.0, 0.0, 1.0, offset.x, offset.y);
    }

    fn trace_path(&self, path: &BezPath) {
        self.ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => self.ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => self.ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => {
                    self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathEl::ClosePath => self.ctx.close_path(),
            }
        }
    }

    fn circle_path(&self, circle: Circle) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            circle.center.x,
            circle.center.y,
            circle.radius,
            0.0,
            std::f64::consts::TAU,
        );
    }
}

impl TextMeasure for CanvasSurface<'_> {
    fn measure_width(&self, text: &str, font_size: f64) -> f64 {
        self.set_font(font_size);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(_) => self.fallback.measure_width(text, font_size),
        }
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, size: Size, color: Color) {
        self.apply_transform(Vec2::ZERO);
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
        self.apply_transform(self.offset);
    }

    fn set_translation(&mut self, offset: Vec2) {
        self.offset = offset;
        self.apply_transform(offset);
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        rounded_rect_path(self.ctx, rect);
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill();
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f64) {
        rounded_rect_path(self.ctx, rect);
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.circle_path(circle);
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        self.circle_path(circle);
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.trace_path(path);
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        self.set_font(font_size);
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.to_hex());
        let _ = self.ctx.fill_text(text, origin.x, origin.y);
    }
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, shape: RoundedRect) {
    let rect = shape.rect();
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let r = shape.radii().top_left.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.arc_to(x + w, y, x + w, y + r, r).unwrap_or(());
    ctx.line_to(x + w, y + h - r);
    ctx.arc_to(x + w, y + h, x + w - r, y + h, r).unwrap_or(());
    ctx.line_to(x + r, y + h);
    ctx.arc_to(x, y + h, x, y + h - r, r).unwrap_or(());
    ctx.line_to(x, y + r);
    ctx.arc_to(x, y, x + r, y, r).unwrap_or(());
    ctx.close_path();
}
