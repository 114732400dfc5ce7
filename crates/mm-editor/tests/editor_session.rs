//! Integration tests: editor engine driving layout, rendering and hit testing
//! (mm-editor ↔ mm-render ↔ mm-core).

use mm_core::kurbo::{Point, Vec2};
use mm_core::{MindMap, NodeId, Viewport};
use mm_editor::{
    DocumentStore, EditorConfig, InputEvent, MemoryStore, MindMapEditor, MovementState,
};
use mm_render::RecordingSurface;
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/study_notes.json");

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn open() -> (MindMapEditor, RecordingSurface) {
    init_logging();
    let mut editor =
        MindMapEditor::from_json(FIXTURE, Viewport::default(), EditorConfig::default()).unwrap();
    let mut surface = RecordingSurface::new();
    editor.render(&mut surface);
    (editor, surface)
}

fn id(raw: u32) -> NodeId {
    NodeId::new(raw)
}

/// Canvas-local point currently showing document point `p`.
fn on_canvas(editor: &MindMapEditor, p: Point) -> Point {
    p + editor.movement.doc_translation()
}

fn key(editor: &mut MindMapEditor, surface: &mut RecordingSurface, k: &str, ctrl: bool) -> bool {
    let redraw = editor.handle_event(&InputEvent::key(k, ctrl, false, false, false));
    editor.render(surface);
    redraw
}

// ─── Hit-test round trip ────────────────────────────────────────────────

#[test]
fn clicking_box_center_selects_node() {
    let (mut editor, _) = open();
    for raw in [1, 4, 5, 2, 3] {
        let center = editor.rendered_node_info(id(raw)).unwrap().rect.center();
        assert!(editor.on_canvas_click(center.x, center.y), "click on {raw}");
        assert_eq!(editor.map.selected_node_id(), id(raw));
    }
}

#[test]
fn clicking_icon_center_toggles_fold() {
    let (mut editor, mut surface) = open();
    let icon = editor.last_render().layout.folding_icon(id(1)).unwrap().circle;
    assert!(editor.on_canvas_click(icon.center.x, icon.center.y));
    assert!(!editor.map.children_visible(id(1)));

    editor.render(&mut surface);
    assert!(editor.rendered_node_info(id(4)).is_none());
    assert!(!surface.texts().contains(&"Drop runs exactly once"));

    let icon = editor.last_render().layout.folding_icon(id(2)).unwrap().circle;
    assert!(editor.on_canvas_click(icon.center.x, icon.center.y));
    editor.render(&mut surface);
    assert!(editor.rendered_node_info(id(6)).is_some());
}

#[test]
fn background_click_changes_nothing() {
    let (mut editor, _) = open();
    assert!(!editor.on_canvas_click(790.0, 5.0));
    assert_eq!(editor.map.selected_node_id(), id(0));
}

// ─── Drag and translation ───────────────────────────────────────────────

fn drag(editor: &mut MindMapEditor, from: Point, to: Point, start_ms: f64, duration_ms: f64) {
    editor.handle_event(&InputEvent::PointerDown {
        x: from.x,
        y: from.y,
        time_ms: start_ms,
    });
    let mid = from.midpoint(to);
    editor.handle_event(&InputEvent::PointerMove {
        x: mid.x,
        y: mid.y,
        time_ms: start_ms + duration_ms / 2.0,
    });
    editor.handle_event(&InputEvent::PointerUp {
        x: to.x,
        y: to.y,
        time_ms: start_ms + duration_ms,
    });
}

#[test]
fn clicks_follow_the_dragged_document() {
    let (mut editor, mut surface) = open();
    // Slow drag: no inertia.
    drag(&mut editor, Point::new(400.0, 300.0), Point::new(460.0, 260.0), 0.0, 20_000.0);
    assert_eq!(editor.movement.state(), MovementState::Idle);
    assert_eq!(editor.movement.doc_translation(), Vec2::new(60.0, -40.0));
    editor.render(&mut surface);
    assert_eq!(surface.translation(), Vec2::new(60.0, -40.0));

    // The click that ends the drag is swallowed.
    assert!(!editor.on_canvas_click(460.0, 260.0));

    let target = editor.rendered_node_info(id(3)).unwrap().rect.center();
    let click = on_canvas(&editor, target);
    assert!(editor.on_canvas_click(click.x, click.y));
    assert_eq!(editor.map.selected_node_id(), id(3));
}

#[test]
fn drag_then_reset_nets_to_zero() {
    let (mut editor, mut surface) = open();
    drag(&mut editor, Point::new(100.0, 100.0), Point::new(25.0, 180.0), 0.0, 10_000.0);
    drag(&mut editor, Point::new(300.0, 300.0), Point::new(340.0, 290.0), 20_000.0, 10_000.0);
    assert_eq!(editor.movement.doc_translation(), Vec2::new(-35.0, 70.0));

    let restore = editor.movement.reset_doc_translation();
    assert_eq!(restore, Vec2::new(35.0, -70.0));
    assert_eq!(editor.movement.doc_translation(), Vec2::ZERO);
    editor.render(&mut surface);
    assert_eq!(surface.translation(), Vec2::ZERO);
}

#[test]
fn fling_coasts_then_stops() {
    let (mut editor, _) = open();
    drag(&mut editor, Point::new(100.0, 300.0), Point::new(160.0, 300.0), 0.0, 60.0);
    assert_eq!(editor.movement.state(), MovementState::InertiaScroll);
    let released = editor.movement.doc_translation().x;

    let mut time = 60.0;
    let mut frames = 0;
    while editor.movement.is_animating() {
        time += 16.0;
        editor.handle_event(&InputEvent::Frame { time_ms: time });
        frames += 1;
        assert!(frames < 1000, "inertia never stopped");
    }
    let coasted = editor.movement.doc_translation().x - released;
    assert!(coasted > 0.0, "no coasting after a fling");
    assert!(editor.movement.doc_translation().y.abs() < 1e-9);
    assert_eq!(editor.movement.canvas_event_handlers().len(), 2);
}

// ─── Keyboard ───────────────────────────────────────────────────────────

#[test]
fn tab_and_enter_grow_the_tree() {
    let (mut editor, mut surface) = open();
    editor.map.set_selected_node_id(id(3));

    assert!(key(&mut editor, &mut surface, "Tab", false));
    let child = editor.map.selected_node_id();
    assert_eq!(editor.map.parent_of(child), Some(id(3)));
    assert!(editor.rendered_node_info(child).is_some());

    assert!(key(&mut editor, &mut surface, "Enter", false));
    let sibling = editor.map.selected_node_id();
    assert_eq!(editor.map.child_ids(id(3)), &[child, sibling]);
}

#[test]
fn arrows_walk_the_tree() {
    let (mut editor, mut surface) = open();
    assert!(key(&mut editor, &mut surface, "ArrowRight", false));
    assert_eq!(editor.map.selected_node_id(), id(1));
    assert!(key(&mut editor, &mut surface, "ArrowDown", false));
    assert_eq!(editor.map.selected_node_id(), id(2));
    // "Borrowing" is folded, so there is no visible child to enter.
    assert!(!key(&mut editor, &mut surface, "ArrowRight", false));
    assert!(key(&mut editor, &mut surface, "ArrowUp", false));
    assert_eq!(editor.map.selected_node_id(), id(1));
    assert!(key(&mut editor, &mut surface, "ArrowLeft", false));
    assert_eq!(editor.map.selected_node_id(), id(0));
    assert!(!key(&mut editor, &mut surface, "ArrowLeft", false));
}

#[test]
fn delete_and_reorder() {
    let (mut editor, mut surface) = open();
    editor.map.set_selected_node_id(id(3));
    assert!(key(&mut editor, &mut surface, "ArrowUp", true));
    assert_eq!(editor.map.child_ids(id(0)), &[id(1), id(3), id(2)]);

    editor.map.set_selected_node_id(id(1));
    assert!(key(&mut editor, &mut surface, "Delete", false));
    assert_eq!(editor.map.selected_node_id(), id(0));
    assert!(!editor.map.contains(id(4)));
    assert!(editor.rendered_node_info(id(5)).is_none());

    // The root cannot be deleted.
    assert!(!key(&mut editor, &mut surface, "Backspace", false));
    assert!(editor.map.contains(id(0)));
}

#[test]
fn bookmark_and_fold_shortcuts() {
    let (mut editor, mut surface) = open();
    editor.map.set_selected_node_id(id(3));
    assert!(key(&mut editor, &mut surface, "b", true));
    assert!(!editor.map.is_bookmarked(id(3)));

    // Space on a leaf does nothing; on "Moves" it folds.
    assert!(!key(&mut editor, &mut surface, " ", false));
    editor.map.set_selected_node_id(id(1));
    assert!(key(&mut editor, &mut surface, " ", false));
    assert!(!editor.map.children_visible(id(1)));
}

#[test]
fn reset_view_shortcut_restores_root_and_translation() {
    let (mut editor, mut surface) = open();
    editor.view.set_root_node_coords(Point::new(200.0, 100.0));
    drag(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0), 0.0, 10_000.0);
    editor.render(&mut surface);
    assert_eq!(
        editor.rendered_node_info(id(0)).unwrap().left_center,
        Point::new(200.0, 100.0)
    );

    assert!(key(&mut editor, &mut surface, "0", true));
    assert_eq!(editor.movement.doc_translation(), Vec2::ZERO);
    assert_eq!(
        editor.rendered_node_info(id(0)).unwrap().left_center,
        Viewport::default().default_root_anchor()
    );
}

// ─── Persistence ────────────────────────────────────────────────────────

#[test]
fn save_and_reload_through_store() {
    let (mut editor, mut surface) = open();
    editor.map.set_selected_node_id(id(5));
    editor.map.set_contents(id(5), "Drop runs once per value");
    let mut store = MemoryStore::new();
    editor.save_to(&mut store, "notes").unwrap();
    assert_eq!(store.names(), vec!["notes".to_string()]);

    let mut other = MindMapEditor::new(
        MindMap::new("scratch"),
        Viewport::default(),
        EditorConfig::default(),
    );
    other.load_from(&store, "notes").unwrap();
    assert_eq!(other.map.selected_node_id(), id(5));
    assert_eq!(other.map.contents(id(5)), "Drop runs once per value");
    assert!(other.map.is_bookmarked(id(3)));
    assert!(!other.map.children_visible(id(2)));

    other.render(&mut surface);
    assert!(surface.texts().contains(&"Drop runs once per value"));
}

#[test]
fn failed_load_keeps_current_document() {
    let (mut editor, _) = open();
    let mut store = MemoryStore::new();
    store.save("broken", r#"{"root": 0, "nodes": [{"id": 0, "contents": "x", "child_ids": [9]}]}"#);

    assert!(editor.load_from(&store, "missing").is_err());
    let err = editor.load_from(&store, "broken").unwrap_err();
    assert!(err.contains("missing child"), "{err}");
    assert_eq!(editor.map.contents(id(0)), "Rust ownership");
}
