//! Layout → surface drawing commands.
//!
//! Paint order is connectors, then node boxes, then folding icons, so icons
//! stay visible where they touch a box edge.

use crate::style::Theme;
use crate::surface::Surface;
use kurbo::{BezPath, Circle, Point, Rect};
use mm_core::{Connector, FoldingIcon, LayoutConfig, MindMapLayout, PlacedNode};

/// Paint every connector, box and icon of `layout`.
pub fn paint_layout<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &MindMapLayout,
    config: &LayoutConfig,
    theme: &Theme,
) {
    for connector in &layout.connectors {
        paint_connector(surface, connector, theme);
    }
    for placed in &layout.nodes {
        paint_node_box(surface, placed, config, theme);
    }
    for icon in &layout.folding_icons {
        paint_folding_icon(surface, icon, theme);
    }
}

// ─── Node box ────────────────────────────────────────────────────────────

/// Draw a node's rounded box and its wrapped lines. Returns the box rect.
pub fn paint_node_box<S: Surface + ?Sized>(
    surface: &mut S,
    placed: &PlacedNode,
    config: &LayoutConfig,
    theme: &Theme,
) -> Rect {
    let node = &placed.node;
    let rect = placed.rect;
    let shape = rect.to_rounded_rect(config.corner_radius);

    surface.fill_rounded_rect(shape, theme.node_fill);
    if node.is_selected {
        surface.stroke_rounded_rect(shape, theme.selected_stroke, theme.selected_stroke_width);
    } else {
        surface.stroke_rounded_rect(shape, theme.node_stroke, theme.node_stroke_width);
    }

    for (i, line) in node.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let origin = config.line_origin(rect.origin(), i, node.font_size);
        surface.fill_text(line, origin, node.font_size, theme.text);
    }

    if node.is_bookmarked {
        paint_bookmark_marker(surface, rect, theme);
    }
    rect
}

/// Small dot on the top-left corner of a bookmarked box.
fn paint_bookmark_marker<S: Surface + ?Sized>(surface: &mut S, rect: Rect, theme: &Theme) {
    let dot = Circle::new(Point::new(rect.x0, rect.y0), theme.bookmark_radius);
    surface.fill_circle(dot, theme.bookmark);
}

// ─── Folding icon ────────────────────────────────────────────────────────

/// Filled when the children are hidden, outlined when they are shown.
/// Returns the circle so callers can register it for hit testing.
pub fn paint_folding_icon<S: Surface + ?Sized>(
    surface: &mut S,
    icon: &FoldingIcon,
    theme: &Theme,
) -> Circle {
    if icon.children_visible {
        surface.fill_circle(icon.circle, theme.background);
        surface.stroke_circle(icon.circle, theme.folding_icon, theme.folding_icon_stroke_width);
    } else {
        surface.fill_circle(icon.circle, theme.folding_icon);
    }
    icon.circle
}

// ─── Connector ───────────────────────────────────────────────────────────

/// Cubic curve that leaves `from` and enters `to` horizontally.
pub fn connector_path(from: Point, to: Point) -> BezPath {
    let mid_x = (from.x + to.x) / 2.0;
    let mut path = BezPath::new();
    path.move_to(from);
    path.curve_to(Point::new(mid_x, from.y), Point::new(mid_x, to.y), to);
    path
}

pub fn paint_connector<S: Surface + ?Sized>(surface: &mut S, connector: &Connector, theme: &Theme) {
    let path = connector_path(connector.from, connector.to);
    surface.stroke_path(&path, theme.connector, theme.connector_width);
}
