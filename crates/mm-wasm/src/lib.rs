//! WASM bridge for MM: exposes the mind-map editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host owns the `<canvas>`,
//! forwards pointer, click, key and animation-frame events, and calls
//! `render` whenever a handler reports that the view changed.

mod canvas;

use canvas::CanvasSurface;
use mm_core::{MindMap, NodeId, Viewport};
use mm_editor::{EditAction, EditorConfig, InputEvent, MindMapEditor, ShortcutAction, ShortcutMap};
use mm_render::Theme;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
///
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct MindMapCanvas {
    editor: MindMapEditor,
}

#[wasm_bindgen]
impl MindMapCanvas {
    /// Create a controller for a canvas of the given size, holding a
    /// one-node document.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        // Set up panic hook for better error messages in console
        console_error_panic_hook_setup();

        let viewport = Viewport { width, height };
        Self {
            editor: MindMapEditor::new(MindMap::new(""), viewport, EditorConfig::default()),
        }
    }

    /// Replace the editor configuration, keeping the document and the view.
    /// Returns `false` on malformed or invalid JSON.
    pub fn set_config(&mut self, json: &str) -> bool {
        match EditorConfig::from_json(json).and_then(|config| self.editor.set_config(config)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Load a JSON document. Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn load_json(&mut self, json: &str) -> String {
        match MindMap::from_json(json) {
            Ok(map) => {
                self.editor.replace_document(map);
                serde_json::json!({ "ok": true }).to_string()
            }
            Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
        }
    }

    /// Serialize the current document.
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.editor.map.to_json().map_err(|e| JsValue::from_str(&e))
    }

    /// Redraw the whole document.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        let family = self.editor.config().theme.font_family.clone();
        let mut surface = CanvasSurface::new(ctx, &family);
        self.editor.render(&mut surface);
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.editor.set_theme(if is_dark { Theme::dark() } else { Theme::light() });
    }

    /// Resize the canvas.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.editor.resize(Viewport { width, height });
    }

    /// Click at canvas-local coordinates. Returns `true` if the document changed.
    pub fn on_canvas_click(&mut self, x: f64, y: f64) -> bool {
        self.editor.on_canvas_click(x, y)
    }

    // ─── Movement ────────────────────────────────────────────────────────

    pub fn handle_pointer_down(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        self.editor
            .handle_event(&InputEvent::PointerDown { x, y, time_ms })
    }

    /// Returns `true` if the canvas moved and needs a redraw.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        self.editor
            .handle_event(&InputEvent::PointerMove { x, y, time_ms })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        self.editor
            .handle_event(&InputEvent::PointerUp { x, y, time_ms })
    }

    pub fn handle_pointer_leave(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        self.editor
            .handle_event(&InputEvent::PointerLeave { x, y, time_ms })
    }

    /// Animation-frame callback. Returns `true` while inertia wants another
    /// frame; redraw after every call.
    pub fn tick(&mut self, time_ms: f64) -> bool {
        self.editor.handle_event(&InputEvent::Frame { time_ms });
        self.editor.movement.is_animating()
    }

    /// Zero the canvas translation. Returns the restoring delta as `[dx, dy]`.
    pub fn reset_doc_translation(&mut self) -> Vec<f64> {
        let delta = self.editor.movement.reset_doc_translation();
        vec![delta.x, delta.y]
    }

    /// DOM event names the host should currently listen for, as a JSON array.
    pub fn canvas_event_handlers(&self) -> String {
        let events: Vec<&str> = self
            .editor
            .movement
            .canvas_event_handlers()
            .iter()
            .map(|e| e.dom_name())
            .collect();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Keyboard & editing ──────────────────────────────────────────────

    /// Handle a key event. Returns `{"changed":bool,"action":"..."}`.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return r#"{"changed":false,"action":"none"}"#.to_string();
        };
        let changed = self.editor.apply_shortcut(action);
        serde_json::json!({ "changed": changed, "action": action_to_name(action) }).to_string()
    }

    pub fn set_font_size(&mut self, size: f64) -> bool {
        self.editor.set_font_size(size)
    }

    pub fn font_size(&self) -> f64 {
        self.editor.view.font_size()
    }

    pub fn selected_id(&self) -> u32 {
        self.editor.map.selected_node_id().get()
    }

    pub fn set_contents(&mut self, id: u32, contents: &str) -> bool {
        self.editor.apply(EditAction::SetContents {
            id: NodeId::new(id),
            contents: contents.to_string(),
        })
    }

    /// Text of node `id`, empty for unknown ids.
    pub fn contents(&self, id: u32) -> String {
        self.editor.map.contents(NodeId::new(id)).to_string()
    }

    /// Where node `id` was last drawn, as
    /// `{"left":x,"center":y,"x0":..,"y0":..,"x1":..,"y1":..}` in document
    /// coordinates, or `null` if it is not on screen.
    pub fn rendered_node_info(&self, id: u32) -> String {
        match self.editor.rendered_node_info(NodeId::new(id)) {
            Some(info) => serde_json::json!({
                "left": info.left_center.x,
                "center": info.left_center.y,
                "x0": info.rect.x0,
                "y0": info.rect.y0,
                "x1": info.rect.x1,
                "y1": info.rect.y1,
            })
            .to_string(),
            None => "null".to_string(),
        }
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::AddChild => "addChild",
        ShortcutAction::AddSibling => "addSibling",
        ShortcutAction::DeleteNode => "deleteNode",
        ShortcutAction::MoveNodeUp => "moveNodeUp",
        ShortcutAction::MoveNodeDown => "moveNodeDown",
        ShortcutAction::ToggleFold => "toggleFold",
        ShortcutAction::ToggleBookmark => "toggleBookmark",
        ShortcutAction::SelectParent => "selectParent",
        ShortcutAction::SelectFirstChild => "selectFirstChild",
        ShortcutAction::SelectPreviousSibling => "selectPreviousSibling",
        ShortcutAction::SelectNextSibling => "selectNextSibling",
        ShortcutAction::FontSizeUp => "fontSizeUp",
        ShortcutAction::FontSizeDown => "fontSizeDown",
        ShortcutAction::ResetView => "resetView",
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("MM WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
