//! Hit testing: canvas point → node or folding icon.
//!
//! The registry is rebuilt from scratch on every render pass, so it always
//! describes exactly what is on screen. Points are in document coordinates
//! (the translation already removed).

use kurbo::{Circle, Point, Rect};
use mm_core::{MindMapLayout, NodeId};

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    FoldingIcon(NodeId),
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRegion {
    pub id: NodeId,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldingIconRegion {
    pub id: NodeId,
    pub circle: Circle,
}

/// Clickable regions recorded during the last render, in paint order.
#[derive(Debug, Clone, Default)]
pub struct ClickableRegions {
    nodes: Vec<NodeRegion>,
    folding_icons: Vec<FoldingIconRegion>,
}

impl ClickableRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every box and icon of `layout`.
    pub fn from_layout(layout: &MindMapLayout) -> Self {
        let mut regions = Self::new();
        for placed in &layout.nodes {
            regions.register_node(placed.id(), placed.rect);
        }
        for icon in &layout.folding_icons {
            regions.register_folding_icon(icon.owner, icon.circle);
        }
        regions
    }

    pub fn register_node(&mut self, id: NodeId, rect: Rect) {
        self.nodes.push(NodeRegion { id, rect });
    }

    pub fn register_folding_icon(&mut self, id: NodeId, circle: Circle) {
        self.folding_icons.push(FoldingIconRegion { id, circle });
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.folding_icons.clear();
    }

    pub fn node_regions(&self) -> &[NodeRegion] {
        &self.nodes
    }

    pub fn folding_icon_regions(&self) -> &[FoldingIconRegion] {
        &self.folding_icons
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.folding_icons.is_empty()
    }

    /// Find what lies under `point`.
    ///
    /// Folding icons are painted on top of boxes, so they win. Among boxes
    /// the last registered (topmost) wins. Boundaries count as inside.
    pub fn hit_test(&self, point: Point) -> Option<ClickTarget> {
        if let Some(icon) = self
            .folding_icons
            .iter()
            .rev()
            .find(|icon| icon.circle.center.distance(point) <= icon.circle.radius)
        {
            return Some(ClickTarget::FoldingIcon(icon.id));
        }
        self.nodes
            .iter()
            .rev()
            .find(|region| rect_contains_inclusive(region.rect, point))
            .map(|region| ClickTarget::Node(region.id))
    }

    /// Box rect registered for `id`, if it was drawn.
    pub fn node_rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.iter().find(|r| r.id == id).map(|r| r.rect)
    }
}

fn rect_contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
