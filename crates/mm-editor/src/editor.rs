//! The editor engine.
//!
//! `MindMapEditor` holds the authoritative document together with the view
//! state (font size, root anchor, viewport) and the canvas movement
//! controller. Canvas input comes in as canvas-local coordinates; clicks are
//! shifted into document space and resolved against the regions recorded by
//! the most recent render.

use crate::config::EditorConfig;
use crate::input::InputEvent;
use crate::movement::MovementController;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::store::DocumentStore;
use kurbo::{Point, Rect, Vec2};
use mm_core::{MindMap, Node, NodeId, Viewport};
use mm_render::{ClickTarget, RenderOutput, RenderRequest, Surface, Theme, render_document};

// ─── Edit actions ────────────────────────────────────────────────────────

/// A single change to the document, from a click, a shortcut or the host.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Append a child and select it.
    AddChild { parent: NodeId, contents: String },
    /// Insert a node right below `sibling` and select it.
    AddSibling { sibling: NodeId, contents: String },
    RemoveNode { id: NodeId },
    SetContents { id: NodeId, contents: String },
    ToggleFold { id: NodeId },
    /// Fold or unfold a whole subtree.
    SetSubtreeVisibility { id: NodeId, visible: bool },
    ToggleBookmark { id: NodeId },
    Select { id: NodeId },
    MoveUp { id: NodeId },
    MoveDown { id: NodeId },
}

// ─── View state ──────────────────────────────────────────────────────────

/// Where a node ended up in the last render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedNodeInfo {
    /// Center-left point of the box, in document coordinates.
    pub left_center: Point,
    pub rect: Rect,
}

/// Per-canvas presentation state that is not part of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    font_size: f64,
    viewport: Viewport,
    /// `None` until the host pins the root somewhere.
    root_anchor: Option<Point>,
}

impl ViewState {
    pub fn new(viewport: Viewport, font_size: f64) -> Self {
        Self {
            font_size,
            viewport,
            root_anchor: None,
        }
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Center-left point the root is drawn at. Follows the viewport's
    /// default until set explicitly.
    pub fn root_node_coords(&self) -> Point {
        self.root_anchor
            .unwrap_or_else(|| self.viewport.default_root_anchor())
    }

    pub fn set_root_node_coords(&mut self, anchor: Point) {
        self.root_anchor = Some(anchor);
    }

    pub fn reset_root_node_coords(&mut self) {
        self.root_anchor = None;
    }
}

// ─── Editor ──────────────────────────────────────────────────────────────

pub struct MindMapEditor {
    /// The current document (single source of truth).
    pub map: MindMap,
    pub view: ViewState,
    pub movement: MovementController,
    config: EditorConfig,
    /// Layout and click regions from the most recent render.
    last_render: RenderOutput,
}

impl MindMapEditor {
    pub fn new(map: MindMap, viewport: Viewport, config: EditorConfig) -> Self {
        let view = ViewState::new(viewport, config.clamp_font_size(config.font_size));
        let movement = MovementController::new(config.inertia);
        Self {
            map,
            view,
            movement,
            config,
            last_render: RenderOutput::default(),
        }
    }

    /// Open a saved document.
    pub fn from_json(json: &str, viewport: Viewport, config: EditorConfig) -> Result<Self, String> {
        let map = MindMap::from_json(json)?;
        Ok(Self::new(map, viewport, config))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    /// Apply a new configuration in place. The document, the translation and
    /// the current font size survive; the font size is re-clamped to the new
    /// range. An invalid inertia section leaves everything unchanged.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<(), String> {
        self.movement.set_config(config.inertia)?;
        self.view.font_size = config.clamp_font_size(self.view.font_size);
        self.config = config;
        Ok(())
    }

    /// Swap in another document. The view goes back to its defaults and the
    /// click regions of the old document are dropped until the next render.
    pub fn replace_document(&mut self, map: MindMap) {
        self.map = map;
        self.reset_view();
        self.last_render = RenderOutput::default();
    }

    pub fn last_render(&self) -> &RenderOutput {
        &self.last_render
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Redraw the whole document and refresh the click regions.
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> &RenderOutput {
        let request = RenderRequest {
            font_size: self.view.font_size,
            root_anchor: self.view.root_node_coords(),
            viewport: self.view.viewport,
            translation: self.movement.doc_translation(),
            config: &self.config.layout,
            theme: &self.config.theme,
        };
        self.last_render = render_document(surface, &self.map, &request);
        &self.last_render
    }

    pub fn rendered_node_info(&self, id: NodeId) -> Option<RenderedNodeInfo> {
        self.last_render.layout.node(id).map(|placed| RenderedNodeInfo {
            left_center: placed.anchor,
            rect: placed.rect,
        })
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.view.viewport = viewport;
    }

    /// Returns `true` if the size actually changed.
    pub fn set_font_size(&mut self, size: f64) -> bool {
        let size = self.config.clamp_font_size(size);
        if size == self.view.font_size {
            return false;
        }
        self.view.font_size = size;
        true
    }

    /// Root back to its default anchor and the translation back to zero.
    /// Returns the delta that undid the translation.
    pub fn reset_view(&mut self) -> Vec2 {
        self.view.reset_root_node_coords();
        self.movement.reset_doc_translation()
    }

    // ─── Clicks ──────────────────────────────────────────────────────────

    /// Handle a click at a canvas-local position.
    ///
    /// Ignored when it ends a drag. Returns `true` if the document changed.
    pub fn on_canvas_click(&mut self, x: f64, y: f64) -> bool {
        if !self.movement.accept_click() {
            log::debug!("click at ({x}, {y}) ends a drag; ignored");
            return false;
        }
        let doc_point = self.movement.to_document(Point::new(x, y));
        self.dispatch_click(doc_point)
    }

    /// Resolve a document-space point against the last render: a folding
    /// icon toggles its node, a box selects its node, background does nothing.
    pub fn dispatch_click(&mut self, doc_point: Point) -> bool {
        match self.last_render.regions.hit_test(doc_point) {
            Some(ClickTarget::FoldingIcon(id)) => self.apply(EditAction::ToggleFold { id }),
            Some(ClickTarget::Node(id)) => self.apply(EditAction::Select { id }),
            None => false,
        }
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Apply an edit. Returns `true` if the document changed.
    pub fn apply(&mut self, action: EditAction) -> bool {
        log::debug!("apply {action:?}");
        match action {
            EditAction::AddChild { parent, contents } => match self.map.add_child(parent, contents) {
                Some(id) => self.map.set_selected_node_id(id),
                None => false,
            },
            EditAction::AddSibling { sibling, contents } => {
                match self.map.add_sibling(sibling, contents) {
                    Some(id) => self.map.set_selected_node_id(id),
                    None => false,
                }
            }
            EditAction::RemoveNode { id } => self.map.remove_node(id),
            EditAction::SetContents { id, contents } => self.map.set_contents(id, contents),
            EditAction::ToggleFold { id } => {
                if !self.map.toggle_children_visibility(id) {
                    return false;
                }
                self.lift_hidden_selection(id);
                true
            }
            EditAction::SetSubtreeVisibility { id, visible } => {
                if !self.map.set_subtree_visibility(id, visible) {
                    return false;
                }
                self.lift_hidden_selection(id);
                true
            }
            EditAction::ToggleBookmark { id } => self.map.toggle_bookmark(id),
            EditAction::Select { id } => {
                if self.map.selected_node_id() == id {
                    return false;
                }
                self.map.set_selected_node_id(id)
            }
            EditAction::MoveUp { id } => self.map.move_up(id),
            EditAction::MoveDown { id } => self.map.move_down(id),
        }
    }

    /// After folding `id`, a selection that ended up hidden moves to `id`.
    fn lift_hidden_selection(&mut self, id: NodeId) {
        let selected = self.map.selected_node_id();
        if self.map.children_visible(id) || selected == id {
            return;
        }
        if self.map.subtree(id).contains(&selected) {
            self.map.set_selected_node_id(id);
        }
    }

    /// Run a keyboard shortcut against the current selection.
    /// Returns `true` if a redraw is needed.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        let selected = self.map.selected_node_id();
        match action {
            ShortcutAction::AddChild => self.apply(EditAction::AddChild {
                parent: selected,
                contents: String::new(),
            }),
            ShortcutAction::AddSibling => self.apply(EditAction::AddSibling {
                sibling: selected,
                contents: String::new(),
            }),
            ShortcutAction::DeleteNode => self.apply(EditAction::RemoveNode { id: selected }),
            ShortcutAction::MoveNodeUp => self.apply(EditAction::MoveUp { id: selected }),
            ShortcutAction::MoveNodeDown => self.apply(EditAction::MoveDown { id: selected }),
            ShortcutAction::ToggleFold => {
                if !self.map.node(selected).is_some_and(Node::has_children) {
                    return false;
                }
                self.apply(EditAction::ToggleFold { id: selected })
            }
            ShortcutAction::ToggleBookmark => self.apply(EditAction::ToggleBookmark { id: selected }),
            ShortcutAction::SelectParent => {
                let target = self.map.parent_of(selected);
                self.select_opt(target)
            }
            ShortcutAction::SelectFirstChild => {
                let target = self.map.first_visible_child(selected);
                self.select_opt(target)
            }
            ShortcutAction::SelectPreviousSibling => {
                let target = self.map.previous_sibling(selected);
                self.select_opt(target)
            }
            ShortcutAction::SelectNextSibling => {
                let target = self.map.next_sibling(selected);
                self.select_opt(target)
            }
            ShortcutAction::FontSizeUp => {
                self.set_font_size(self.view.font_size + self.config.font_size_step)
            }
            ShortcutAction::FontSizeDown => {
                self.set_font_size(self.view.font_size - self.config.font_size_step)
            }
            ShortcutAction::ResetView => {
                self.reset_view();
                true
            }
        }
    }

    fn select_opt(&mut self, id: Option<NodeId>) -> bool {
        match id {
            Some(id) => self.apply(EditAction::Select { id }),
            None => false,
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event. Returns `true` if a redraw is needed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y, time_ms } => {
                self.movement.pointer_down(Point::new(x, y), time_ms);
                false
            }
            InputEvent::PointerMove { x, y, time_ms } => {
                self.movement.pointer_move(Point::new(x, y), time_ms) != Vec2::ZERO
            }
            InputEvent::PointerUp { x, y, time_ms } => {
                self.movement.pointer_up(Point::new(x, y), time_ms) != Vec2::ZERO
            }
            InputEvent::PointerLeave { x, y, time_ms } => {
                self.movement.pointer_leave(Point::new(x, y), time_ms) != Vec2::ZERO
            }
            InputEvent::Click { x, y } => self.on_canvas_click(x, y),
            InputEvent::Frame { time_ms } => self.movement.frame(time_ms) != Vec2::ZERO,
            InputEvent::Key {
                ref key,
                ctrl,
                shift,
                alt,
                meta,
            } => match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
                Some(action) => self.apply_shortcut(action),
                None => false,
            },
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save_to(&self, store: &mut dyn DocumentStore, name: &str) -> Result<(), String> {
        let json = self.map.to_json()?;
        store.save(name, &json);
        log::info!("saved {name:?} ({} nodes)", self.map.len());
        Ok(())
    }

    /// Replace the document with the one stored under `name`.
    /// The current document is kept if loading fails.
    pub fn load_from(&mut self, store: &dyn DocumentStore, name: &str) -> Result<(), String> {
        let json = store
            .load(name)
            .ok_or_else(|| format!("no document named {name:?}"))?;
        self.replace_document(MindMap::from_json(&json)?);
        log::info!("loaded {name:?} ({} nodes)", self.map.len());
        Ok(())
    }
}
