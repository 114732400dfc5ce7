use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A lightweight identifier for nodes in a mind map.
/// Unique within one document; 4 bytes, Copy, Eq, Hash, Ord.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The id given to the root of a freshly created document.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// The raw integer value (what ends up in saved documents).
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id following this one, or `None` once the id space is used up.
    /// Used by documents to hand out fresh ids.
    pub(crate) fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(NodeId)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(NodeId)
    }
}
