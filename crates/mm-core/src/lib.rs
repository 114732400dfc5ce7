pub mod geometry;
pub mod id;
pub mod layout;
pub mod model;
pub mod text;

pub use geometry::{LayoutConfig, RenderableNode};
pub use id::NodeId;
pub use layout::{
    Connector, FoldingIcon, MindMapLayout, PlacedNode, Viewport, resolve_layout,
};
pub use model::{MindMap, Node};
pub use text::{EstimatedTextMeasure, TextMeasure, wrap_text};

// Re-export kurbo geometry so downstream crates share one version
pub use kurbo;
