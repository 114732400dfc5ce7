//! Headless surface that records draw calls instead of rasterizing them.

use crate::style::Color;
use crate::surface::Surface;
use kurbo::{BezPath, Circle, Point, RoundedRect, Size, Vec2};
use mm_core::{EstimatedTextMeasure, TextMeasure};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { size: Size, color: Color },
    SetTranslation(Vec2),
    FillRoundedRect { rect: RoundedRect, color: Color },
    StrokeRoundedRect { rect: RoundedRect, color: Color, width: f64 },
    FillCircle { circle: Circle, color: Color },
    StrokeCircle { circle: Circle, color: Color, width: f64 },
    StrokePath { path: BezPath, color: Color, width: f64 },
    Text { text: String, origin: Point, font_size: f64, color: Color },
}

/// Holds the calls of the current frame only; `clear` starts a new frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    translation: Vec2,
    measure: EstimatedTextMeasure,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text line drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The translation currently in effect.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_width(&self, text: &str, font_size: f64) -> f64 {
        self.measure.measure_width(text, font_size)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Size, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size, color });
    }

    fn set_translation(&mut self, offset: Vec2) {
        self.translation = offset;
        self.commands.push(DrawCommand::SetTranslation(offset));
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect { rect, color });
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f64) {
        self.commands
            .push(DrawCommand::StrokeRoundedRect { rect, color, width });
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.commands.push(DrawCommand::FillCircle { circle, color });
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        self.commands
            .push(DrawCommand::StrokeCircle { circle, color, width });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size,
            color,
        });
    }
}
