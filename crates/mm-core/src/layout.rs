//! Two-pass tree layout.
//!
//! Pass 1 walks the visible tree bottom-up and records, for every node, its
//! wrapped box and the vertical extent of its visible subtree. Pass 2 walks
//! top-down from the root anchor and assigns each node its center-left
//! anchor: a node's children are stacked in order, and the whole children
//! block is centered on the right edge of the parent's folding icon.
//!
//! Positions depend on the summed heights of earlier siblings, so every size
//! must be known before the first position is assigned.

use crate::geometry::{LayoutConfig, RenderableNode};
use crate::id::NodeId;
use crate::model::MindMap;
use crate::text::TextMeasure;
use kurbo::{Circle, Point, Rect, Shape};
use std::collections::HashMap;

/// Distance from the canvas's left edge to the default root anchor.
pub const ROOT_MARGIN: f64 = 20.0;

/// The canvas (viewport) dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    /// Where the root goes until the user moves it: left margin, vertical middle.
    pub fn default_root_anchor(&self) -> Point {
        Point::new(ROOT_MARGIN, self.height / 2.0)
    }
}

// ─── Layout output ───────────────────────────────────────────────────────

/// A node box with its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub node: RenderableNode,
    /// Center-left point of the box.
    pub anchor: Point,
    pub rect: Rect,
}

impl PlacedNode {
    pub fn id(&self) -> NodeId {
        self.node.id
    }
}

/// The fold toggle drawn to the right of a node that has children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldingIcon {
    pub owner: NodeId,
    pub circle: Circle,
    pub children_visible: bool,
}

impl FoldingIcon {
    /// Rightmost point of the icon; connectors to children start here.
    pub fn right(&self) -> Point {
        Point::new(self.circle.center.x + self.circle.radius, self.circle.center.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.circle.center.distance(p) <= self.circle.radius
    }
}

/// A line from a parent's folding icon to one child's anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub child: NodeId,
    pub from: Point,
    pub to: Point,
}

/// Result of one layout pass over a document.
#[derive(Debug, Clone, Default)]
pub struct MindMapLayout {
    /// Node boxes in paint order (parents before children).
    pub nodes: Vec<PlacedNode>,
    pub folding_icons: Vec<FoldingIcon>,
    pub connectors: Vec<Connector>,
    subtree_heights: HashMap<NodeId, f64>,
    anchors: HashMap<NodeId, Point>,
}

impl MindMapLayout {
    /// Vertical extent of the visible subtree rooted at `id`.
    pub fn subtree_height(&self, id: NodeId) -> Option<f64> {
        self.subtree_heights.get(&id).copied()
    }

    /// Center-left anchor `id` was drawn at, if it was visible.
    pub fn anchor_of(&self, id: NodeId) -> Option<Point> {
        self.anchors.get(&id).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn folding_icon(&self, id: NodeId) -> Option<&FoldingIcon> {
        self.folding_icons.iter().find(|icon| icon.owner == id)
    }

    /// Union of every box and icon, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Rect> {
        let boxes = self.nodes.iter().map(|n| n.rect);
        let icons = self.folding_icons.iter().map(|i| i.circle.bounding_box());
        boxes.chain(icons).reduce(|a, b| a.union(b))
    }
}

// ─── Layout context ──────────────────────────────────────────────────────

/// Working state for one `resolve_layout` call.
struct LayoutContext<'a> {
    map: &'a MindMap,
    config: &'a LayoutConfig,
    measure: &'a dyn TextMeasure,
    font_size: f64,
    max_width: f64,
    renderables: HashMap<NodeId, RenderableNode>,
    out: MindMapLayout,
}

impl<'a> LayoutContext<'a> {
    /// Pass 1: build the renderable for `id` and return its subtree height.
    fn measure_subtree(&mut self, id: NodeId) -> f64 {
        let map = self.map;
        let node = RenderableNode::build(
            id,
            map.contents(id),
            self.font_size,
            self.max_width,
            map.is_selected(id),
            map.is_bookmarked(id),
            self.config,
            self.measure,
        );
        let own_height = node.size.height;
        self.renderables.insert(id, node);

        let children = map.child_ids(id);
        let mut height = own_height;
        if map.children_visible(id) && !children.is_empty() {
            let mut total = 0.0;
            for &child in children {
                total += self.measure_subtree(child);
            }
            total += (children.len() - 1) as f64 * self.config.child_padding_y;
            height = own_height.max(total);
        }
        self.out.subtree_heights.insert(id, height);
        height
    }

    fn height_of(&self, id: NodeId) -> f64 {
        match self.out.subtree_heights.get(&id) {
            Some(h) => *h,
            None => panic!("layout: {id} was not measured before placement"),
        }
    }

    fn take_renderable(&mut self, id: NodeId) -> RenderableNode {
        match self.renderables.remove(&id) {
            Some(node) => node,
            None => panic!("layout: no renderable built for {id}"),
        }
    }

    /// Stacked height of sibling subtrees plus the gaps between them.
    fn children_block_height(&self, children: &[NodeId]) -> f64 {
        let total: f64 = children.iter().map(|&c| self.height_of(c)).sum();
        total + children.len().saturating_sub(1) as f64 * self.config.child_padding_y
    }

    /// Pass 2: place `id` at `anchor`, then its visible children.
    fn place(&mut self, id: NodeId, anchor: Point) {
        let map = self.map;
        let node = self.take_renderable(id);
        let rect = node.rect_at(anchor);
        self.out.anchors.insert(id, anchor);
        self.out.nodes.push(PlacedNode { node, anchor, rect });

        let children = map.child_ids(id);
        if children.is_empty() {
            return;
        }

        let radius = self.config.folding_icon_radius;
        let icon = FoldingIcon {
            owner: id,
            circle: Circle::new((rect.x1 + radius, anchor.y), radius),
            children_visible: map.children_visible(id),
        };
        let icon_right = icon.right();
        self.out.folding_icons.push(icon);
        if !icon.children_visible {
            return;
        }

        let children_x = icon_right.x + self.config.child_padding_x;
        let block_height = self.children_block_height(children);
        let mut cursor = icon_right.y - block_height / 2.0;
        for &child in children {
            let extent = self.height_of(child);
            let center = Point::new(children_x, cursor + extent / 2.0);
            self.out.connectors.push(Connector {
                child,
                from: icon_right,
                to: center,
            });
            self.place(child, center);
            cursor += extent + self.config.child_padding_y;
        }
    }
}

/// Lay out every visible node of `map`, with the root anchored at `root_anchor`.
///
/// Text wraps at `config.max_width_ratio × viewport.width`.
pub fn resolve_layout(
    map: &MindMap,
    root_anchor: Point,
    font_size: f64,
    viewport: Viewport,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> MindMapLayout {
    let mut ctx = LayoutContext {
        map,
        config,
        measure,
        font_size,
        max_width: (viewport.width * config.max_width_ratio).max(0.0),
        renderables: HashMap::new(),
        out: MindMapLayout::default(),
    };

    let root = map.root_node_id();
    ctx.measure_subtree(root);
    ctx.place(root, root_anchor);

    log::debug!(
        "layout: {} nodes, {} folding icons, {} connectors",
        ctx.out.nodes.len(),
        ctx.out.folding_icons.len(),
        ctx.out.connectors.len()
    );
    ctx.out
}
