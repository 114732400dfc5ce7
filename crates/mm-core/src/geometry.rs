//! Node box sizing.
//!
//! Painting reuses the same [`LayoutConfig`] that sizing used; if the two ever
//! disagreed on paddings the text would overflow its box.

use crate::id::NodeId;
use crate::text::{TextMeasure, wrap_text};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Spacing and size constants shared by layout and painting.
///
/// Deserializes with per-field defaults so a host can override any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Space between the box edge and the text, left and right.
    pub node_padding_x: f64,
    /// Space between the box edge and the text, top and bottom.
    pub node_padding_y: f64,
    /// Extra space between two wrapped lines.
    pub line_spacing: f64,
    pub corner_radius: f64,
    pub folding_icon_radius: f64,
    /// Gap between a folding icon and the left edge of the children column.
    pub child_padding_x: f64,
    /// Gap between two stacked sibling subtrees.
    pub child_padding_y: f64,
    /// Text wraps at this fraction of the canvas width.
    pub max_width_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_padding_x: 10.0,
            node_padding_y: 6.0,
            line_spacing: 4.0,
            corner_radius: 5.0,
            folding_icon_radius: 6.0,
            child_padding_x: 30.0,
            child_padding_y: 12.0,
            max_width_ratio: 0.75,
        }
    }
}

impl LayoutConfig {
    /// Box size for already-wrapped lines.
    ///
    /// width = widest line + 2 × horizontal padding;
    /// height = font_size × n + line_spacing × (n − 1) + 2 × vertical padding.
    pub fn box_size(&self, lines: &[String], font_size: f64, measure: &dyn TextMeasure) -> Size {
        let widest = lines
            .iter()
            .map(|line| measure.measure_width(line, font_size))
            .fold(0.0, f64::max);
        let n = lines.len().max(1) as f64;
        Size::new(
            widest + 2.0 * self.node_padding_x,
            font_size * n + self.line_spacing * (n - 1.0) + 2.0 * self.node_padding_y,
        )
    }

    /// Top-left origin of line `index` inside a box whose top-left is `origin`.
    pub fn line_origin(&self, origin: Point, index: usize, font_size: f64) -> Point {
        Point::new(
            origin.x + self.node_padding_x,
            origin.y + self.node_padding_y + index as f64 * (font_size + self.line_spacing),
        )
    }
}

// ─── Renderable node ─────────────────────────────────────────────────────

/// Everything needed to draw one node box, built fresh every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableNode {
    pub id: NodeId,
    pub lines: Vec<String>,
    pub size: Size,
    pub font_size: f64,
    pub is_selected: bool,
    pub is_bookmarked: bool,
}

impl RenderableNode {
    /// Wrap `contents` to `max_width` and size the box around it.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        id: NodeId,
        contents: &str,
        font_size: f64,
        max_width: f64,
        is_selected: bool,
        is_bookmarked: bool,
        config: &LayoutConfig,
        measure: &dyn TextMeasure,
    ) -> Self {
        let text_width = (max_width - 2.0 * config.node_padding_x).max(0.0);
        let lines = wrap_text(contents, text_width, font_size, measure);
        let size = config.box_size(&lines, font_size, measure);
        Self {
            id,
            lines,
            size,
            font_size,
            is_selected,
            is_bookmarked,
        }
    }

    /// The rectangle this box occupies when anchored at its center-left point.
    pub fn rect_at(&self, anchor: Point) -> Rect {
        Rect::from_origin_size(
            Point::new(anchor.x, anchor.y - self.size.height / 2.0),
            self.size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EstimatedTextMeasure;

    const MEASURE: EstimatedTextMeasure = EstimatedTextMeasure { em_ratio: 0.6 };

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_line_box() {
        let config = LayoutConfig::default();
        let size = config.box_size(&lines(&["abcde"]), 10.0, &MEASURE);
        // 5 chars × 6px + 2 × 10
        assert!((size.width - 50.0).abs() < 1e-9, "width = {}", size.width);
        // 10 + 2 × 6
        assert!((size.height - 22.0).abs() < 1e-9, "height = {}", size.height);
    }

    #[test]
    fn multi_line_box_uses_widest_line_and_spacing() {
        let config = LayoutConfig::default();
        let size = config.box_size(&lines(&["ab", "abcdef", "abc"]), 10.0, &MEASURE);
        assert!((size.width - (36.0 + 20.0)).abs() < 1e-9);
        // 3 × 10 + 2 × 4 + 2 × 6
        assert!((size.height - 50.0).abs() < 1e-9);
    }

    #[test]
    fn height_is_monotone_in_font_size_and_line_count() {
        let config = LayoutConfig::default();
        let text = lines(&["one", "two"]);
        let mut prev = 0.0;
        for font in [8.0, 10.0, 14.0, 20.0, 32.0] {
            let h = config.box_size(&text, font, &MEASURE).height;
            assert!(h >= prev, "height shrank at font {font}");
            prev = h;
        }
        let mut prev = 0.0;
        for n in 1..6 {
            let many: Vec<String> = (0..n).map(|i| format!("line {i}")).collect();
            let h = config.box_size(&many, 14.0, &MEASURE).height;
            assert!(h > prev, "height did not grow with {n} lines");
            prev = h;
        }
    }

    #[test]
    fn empty_contents_keep_one_line_height() {
        let config = LayoutConfig::default();
        let node = RenderableNode::build(
            NodeId::ROOT,
            "",
            14.0,
            600.0,
            false,
            false,
            &config,
            &MEASURE,
        );
        assert_eq!(node.lines, vec![String::new()]);
        assert!((node.size.height - (14.0 + 12.0)).abs() < 1e-9);
        assert!((node.size.width - 20.0).abs() < 1e-9);
    }

    #[test]
    fn line_origins_follow_padding() {
        let config = LayoutConfig::default();
        let p = config.line_origin(Point::new(100.0, 50.0), 2, 10.0);
        assert!((p.x - 110.0).abs() < 1e-9);
        assert!((p.y - (50.0 + 6.0 + 2.0 * 14.0)).abs() < 1e-9);
    }

    #[test]
    fn rect_is_vertically_centered_on_anchor() {
        let config = LayoutConfig::default();
        let node = RenderableNode::build(
            NodeId::ROOT,
            "hi",
            10.0,
            600.0,
            false,
            false,
            &config,
            &MEASURE,
        );
        let rect = node.rect_at(Point::new(20.0, 100.0));
        assert!((rect.x0 - 20.0).abs() < 1e-9);
        assert!(((rect.y0 + rect.y1) / 2.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn config_deserializes_partial_overrides() {
        let config: LayoutConfig = serde_json::from_str(r#"{"child_padding_y": 20.0}"#).unwrap();
        assert_eq!(config.child_padding_y, 20.0);
        assert_eq!(config.node_padding_x, LayoutConfig::default().node_padding_x);
    }
}
