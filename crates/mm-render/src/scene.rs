//! Vello scene backend.
//!
//! Shapes go straight into a `vello::Scene`; the caller presents it via
//! wgpu. Text is logged only, since shaping needs a font context the scene
//! backend doesn't carry yet.

use crate::style::Color;
use crate::surface::Surface;
use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Size, Stroke as KurboStroke, Vec2};
use mm_core::{EstimatedTextMeasure, TextMeasure};
use peniko::Fill;
use vello::Scene;

pub struct SceneSurface {
    scene: Scene,
    transform: Affine,
    measure: EstimatedTextMeasure,
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSurface {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            transform: Affine::IDENTITY,
            measure: EstimatedTextMeasure::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

impl TextMeasure for SceneSurface {
    fn measure_width(&self, text: &str, font_size: f64) -> f64 {
        self.measure.measure_width(text, font_size)
    }
}

impl Surface for SceneSurface {
    fn clear(&mut self, size: Size, color: Color) {
        self.scene.reset();
        let rect = Rect::from_origin_size(Point::ZERO, size);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, color.to_peniko(), None, &rect);
    }

    fn set_translation(&mut self, offset: Vec2) {
        self.transform = Affine::translate(offset);
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.transform, color.to_peniko(), None, &rect);
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f64) {
        let stroke = KurboStroke::new(width);
        self.scene
            .stroke(&stroke, self.transform, color.to_peniko(), None, &rect);
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.transform, color.to_peniko(), None, &circle);
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        let stroke = KurboStroke::new(width);
        self.scene
            .stroke(&stroke, self.transform, color.to_peniko(), None, &circle);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let stroke = KurboStroke::new(width);
        self.scene
            .stroke(&stroke, self.transform, color.to_peniko(), None, path);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, _color: Color) {
        log::trace!(
            "TEXT {:?} at ({}, {}) size {}",
            text,
            origin.x,
            origin.y,
            font_size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderRequest, Theme, render_document};
    use mm_core::{LayoutConfig, MindMap, Viewport};

    #[test]
    fn renders_document_into_scene() {
        let mut map = MindMap::new("root");
        let root = map.root_node_id();
        map.add_child(root, "leaf").unwrap();

        let config = LayoutConfig::default();
        let theme = Theme::dark();
        let viewport = Viewport::default();
        let request = RenderRequest {
            font_size: 14.0,
            root_anchor: viewport.default_root_anchor(),
            viewport,
            translation: Vec2::new(10.0, 0.0),
            config: &config,
            theme: &theme,
        };
        let mut surface = SceneSurface::new();
        let output = render_document(&mut surface, &map, &request);
        assert_eq!(output.layout.nodes.len(), 2);
        assert_eq!(output.regions.node_regions().len(), 2);
        assert!(!surface.scene().encoding().is_empty());
        let _scene = surface.into_scene();
    }
}
