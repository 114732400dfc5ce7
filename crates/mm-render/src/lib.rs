pub mod hit;
pub mod paint;
pub mod recording;
pub mod scene;
pub mod style;
pub mod surface;

pub use hit::{ClickTarget, ClickableRegions};
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::SceneSurface;
pub use style::{Color, Theme};
pub use surface::Surface;

use kurbo::{Point, Size, Vec2};
use mm_core::{LayoutConfig, MindMap, MindMapLayout, TextMeasure, Viewport, resolve_layout};

/// Inputs for one full render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub font_size: f64,
    /// Center-left point of the root box, in document coordinates.
    pub root_anchor: Point,
    pub viewport: Viewport,
    /// Document translation applied after clearing.
    pub translation: Vec2,
    pub config: &'a LayoutConfig,
    pub theme: &'a Theme,
}

/// What a render pass produced: the layout it drew and the regions to hit-test.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub layout: MindMapLayout,
    pub regions: ClickableRegions,
}

/// Clear `surface`, lay out `map` and paint it.
///
/// The surface's own text measurement drives wrapping, so the lines painted
/// are exactly the lines that were sized.
pub fn render_document<S: Surface>(
    surface: &mut S,
    map: &MindMap,
    request: &RenderRequest<'_>,
) -> RenderOutput {
    let viewport = request.viewport;
    surface.set_translation(Vec2::ZERO);
    surface.clear(
        Size::new(viewport.width, viewport.height),
        request.theme.background,
    );
    surface.set_translation(request.translation);

    let measure: &dyn TextMeasure = &*surface;
    let layout = resolve_layout(
        map,
        request.root_anchor,
        request.font_size,
        viewport,
        request.config,
        measure,
    );
    paint::paint_layout(surface, &layout, request.config, request.theme);

    let regions = ClickableRegions::from_layout(&layout);
    log::debug!(
        "render: {} nodes painted at translation ({}, {})",
        layout.nodes.len(),
        request.translation.x,
        request.translation.y
    );
    RenderOutput { layout, regions }
}
