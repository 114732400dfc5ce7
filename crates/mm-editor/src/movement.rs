//! Canvas movement: drag to translate, then coast with inertia.
//!
//! ```text
//! Idle ──down──▶ UserDragging ──up/leave──▶ InertiaScroll ──slow──▶ Idle
//!                     ▲                          │
//!                     └──────────down────────────┘
//! ```
//!
//! The controller only tracks the cumulative document translation; the
//! caller redraws with it whenever a method reports a non-zero delta.
//! During inertia each axis follows `d(t) = v0 / b × (1 − e^(−b·t)) + d0`,
//! where `d0` is the translation at release and `v0` the release velocity.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Config ──────────────────────────────────────────────────────────────

/// Tuning constants for drag and inertia.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
    /// Exponential decay rate `b`, per millisecond.
    pub decay_rate: f64,
    /// Inertia stops once both axes are slower than this (px/ms).
    pub stop_velocity: f64,
    /// A press that travels further than this (px) is a drag, not a click.
    pub click_slop: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.005,
            stop_velocity: 0.01,
            click_slop: 3.0,
        }
    }
}

impl InertiaConfig {
    /// Check that inertia can settle: the decay rate and stop velocity must be
    /// positive and finite, and the click slop must not be negative.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.decay_rate.is_finite() && self.decay_rate > 0.0) {
            return Err(format!("decay_rate must be positive, got {}", self.decay_rate));
        }
        if !(self.stop_velocity.is_finite() && self.stop_velocity > 0.0) {
            return Err(format!(
                "stop_velocity must be positive, got {}",
                self.stop_velocity
            ));
        }
        if !(self.click_slop.is_finite() && self.click_slop >= 0.0) {
            return Err(format!("click_slop must not be negative, got {}", self.click_slop));
        }
        Ok(())
    }
}

// ─── State ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Idle,
    UserDragging,
    InertiaScroll,
}

/// Input events the host must listen for on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasEvent {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerOut,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl CanvasEvent {
    /// The DOM event name.
    pub fn dom_name(self) -> &'static str {
        match self {
            CanvasEvent::PointerDown => "pointerdown",
            CanvasEvent::PointerMove => "pointermove",
            CanvasEvent::PointerUp => "pointerup",
            CanvasEvent::PointerOut => "pointerout",
            CanvasEvent::TouchStart => "touchstart",
            CanvasEvent::TouchMove => "touchmove",
            CanvasEvent::TouchEnd => "touchend",
        }
    }
}

/// Initial conditions of one inertia run.
#[derive(Debug, Clone, Copy)]
struct InertiaRun {
    start_ms: f64,
    origin: Vec2,
    velocity: Vec2,
}

// ─── Controller ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MovementController {
    config: InertiaConfig,
    state: MovementState,
    translation: Vec2,
    /// Last pointer position and its timestamp while dragging.
    last: Option<(Point, f64)>,
    velocity: Vec2,
    press_origin: Point,
    /// Furthest the pointer got from `press_origin` during this press.
    travel: f64,
    inertia: Option<InertiaRun>,
    suppress_click: bool,
}

impl MovementController {
    pub fn new(config: InertiaConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }

    /// Swap the tuning constants, keeping the translation. A running
    /// inertia stops so the new decay never applies to an old run.
    pub fn set_config(&mut self, config: InertiaConfig) -> Result<(), String> {
        config.validate()?;
        self.config = config;
        if self.state == MovementState::InertiaScroll {
            self.stop();
        }
        Ok(())
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Whether the host should keep requesting animation frames.
    pub fn is_animating(&self) -> bool {
        self.state == MovementState::InertiaScroll
    }

    /// Cumulative translation of the document under the canvas.
    pub fn doc_translation(&self) -> Vec2 {
        self.translation
    }

    /// Convert a canvas-local point to document coordinates.
    pub fn to_document(&self, canvas_point: Point) -> Point {
        canvas_point - self.translation
    }

    /// Zero the translation and stop any inertia.
    ///
    /// Returns the delta that, applied to the surface, undoes every
    /// translation made so far.
    pub fn reset_doc_translation(&mut self) -> Vec2 {
        let restore = -self.translation;
        self.translation = Vec2::ZERO;
        if self.state == MovementState::InertiaScroll {
            self.stop();
        }
        restore
    }

    /// Events to bind right now: press events always, movement and release
    /// events only while a drag or inertia run is active.
    pub fn canvas_event_handlers(&self) -> SmallVec<[CanvasEvent; 7]> {
        let mut events: SmallVec<[CanvasEvent; 7]> =
            smallvec::smallvec![CanvasEvent::PointerDown, CanvasEvent::TouchStart];
        if self.state != MovementState::Idle {
            events.extend([
                CanvasEvent::PointerMove,
                CanvasEvent::PointerUp,
                CanvasEvent::PointerOut,
                CanvasEvent::TouchMove,
                CanvasEvent::TouchEnd,
            ]);
        }
        events
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Start a drag. Supersedes any running inertia.
    pub fn pointer_down(&mut self, position: Point, time_ms: f64) {
        if self.state == MovementState::InertiaScroll {
            log::debug!("movement: drag supersedes inertia");
        }
        self.state = MovementState::UserDragging;
        self.last = Some((position, time_ms));
        self.velocity = Vec2::ZERO;
        self.press_origin = position;
        self.travel = 0.0;
        self.inertia = None;
        self.suppress_click = false;
    }

    /// Follow the pointer. Returns the translation delta applied.
    pub fn pointer_move(&mut self, position: Point, time_ms: f64) -> Vec2 {
        if self.state != MovementState::UserDragging {
            return Vec2::ZERO;
        }
        let Some((last_pos, last_ms)) = self.last else {
            return Vec2::ZERO;
        };

        let delta = position - last_pos;
        self.translation += delta;

        let elapsed = time_ms - last_ms;
        if elapsed > 0.0 {
            self.velocity = delta / elapsed;
        }
        self.last = Some((position, time_ms));
        self.travel = self.travel.max(position.distance(self.press_origin));
        delta
    }

    /// Release the pointer (up, leave, touch end). Returns the final delta.
    ///
    /// Starts inertia from the last drag velocity unless it is already
    /// below `stop_velocity`.
    pub fn pointer_up(&mut self, position: Point, time_ms: f64) -> Vec2 {
        if self.state != MovementState::UserDragging {
            return Vec2::ZERO;
        }
        let delta = self.pointer_move(position, time_ms);
        self.last = None;

        if self.travel > self.config.click_slop {
            self.suppress_click = true;
        }

        if let Err(e) = self.config.validate() {
            log::warn!("movement: inertia disabled: {e}");
            self.stop();
        } else if self.is_slow(self.velocity) {
            self.stop();
        } else {
            self.state = MovementState::InertiaScroll;
            self.inertia = Some(InertiaRun {
                start_ms: time_ms,
                origin: self.translation,
                velocity: self.velocity,
            });
            log::debug!(
                "movement: inertia from ({:.3}, {:.3}) px/ms",
                self.velocity.x,
                self.velocity.y
            );
        }
        delta
    }

    pub fn pointer_leave(&mut self, position: Point, time_ms: f64) -> Vec2 {
        self.pointer_up(position, time_ms)
    }

    /// Whether a click arriving now should be dispatched.
    ///
    /// Returns `false` once after a press that travelled beyond
    /// `click_slop`, so releasing a drag never changes the selection.
    pub fn accept_click(&mut self) -> bool {
        !std::mem::take(&mut self.suppress_click)
    }

    // ─── Inertia ─────────────────────────────────────────────────────────

    /// Advance inertia to `time_ms`. Returns the translation delta applied.
    pub fn frame(&mut self, time_ms: f64) -> Vec2 {
        let Some(run) = self.inertia else {
            return Vec2::ZERO;
        };
        let b = self.config.decay_rate;
        if !(b.is_finite() && b > 0.0) {
            self.stop();
            return Vec2::ZERO;
        }
        let t = (time_ms - run.start_ms).max(0.0);
        let decay = (-b * t).exp();

        let target = run.origin + run.velocity * ((1.0 - decay) / b);
        let delta = target - self.translation;
        self.translation = target;

        if self.is_slow(run.velocity * decay) {
            self.stop();
        }
        delta
    }

    fn is_slow(&self, velocity: Vec2) -> bool {
        velocity.x.abs() < self.config.stop_velocity && velocity.y.abs() < self.config.stop_velocity
    }

    fn stop(&mut self) {
        if self.state != MovementState::Idle {
            log::debug!("movement: idle at ({}, {})", self.translation.x, self.translation.y);
        }
        self.state = MovementState::Idle;
        self.inertia = None;
    }
}
