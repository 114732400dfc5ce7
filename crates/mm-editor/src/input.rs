//! Input abstraction layer.
//!
//! Normalizes mouse, touch and keyboard events from the host into one
//! `InputEvent` enum consumed by the editor. Positions are canvas-local;
//! timestamps are milliseconds from any monotonic clock.

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f64, y: f64, time_ms: f64 },

    /// Pointer moved (mouse move, touch move).
    PointerMove { x: f64, y: f64, time_ms: f64 },

    /// Pointer released (mouse up, touch end).
    PointerUp { x: f64, y: f64, time_ms: f64 },

    /// Pointer left the canvas mid-drag.
    PointerLeave { x: f64, y: f64, time_ms: f64 },

    /// Click, delivered by the host after a down/up pair.
    Click { x: f64, y: f64 },

    /// Animation frame callback.
    Frame { time_ms: f64 },

    /// Keyboard shortcut.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    /// Build a key event from `KeyboardEvent` fields.
    pub fn key(key: impl Into<String>, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        InputEvent::Key {
            key: key.into(),
            ctrl,
            shift,
            alt,
            meta,
        }
    }
}
