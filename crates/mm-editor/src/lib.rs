pub mod config;
pub mod editor;
pub mod input;
pub mod movement;
pub mod shortcuts;
pub mod store;

pub use config::EditorConfig;
pub use editor::{EditAction, MindMapEditor, RenderedNodeInfo, ViewState};
pub use input::InputEvent;
pub use movement::{CanvasEvent, InertiaConfig, MovementController, MovementState};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::{DocumentStore, MemoryStore};
