//! Core document model for mind maps.
//!
//! A document is a rooted tree of text nodes. Each node owns the ordered list
//! of its children's ids; that order is the top-to-bottom stacking order on
//! the canvas. Selection and bookmarks are document-level state keyed by id.
//! Fold state (`children_visible`) lives on the node itself so it survives a
//! save/load round trip.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Format version written into saved documents.
pub const DOCUMENT_VERSION: u32 = 1;

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A single mind-map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// The text shown inside the node box.
    pub contents: String,

    /// Children in display order (top to bottom).
    #[serde(default)]
    pub child_ids: SmallVec<[NodeId; 4]>,

    /// `false` when the subtree is folded.
    #[serde(default = "default_children_visible")]
    pub children_visible: bool,
}

fn default_children_visible() -> bool {
    true
}

impl Node {
    pub fn new(id: NodeId, contents: impl Into<String>) -> Self {
        Self {
            id,
            contents: contents.into(),
            child_ids: SmallVec::new(),
            children_visible: true,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.child_ids.is_empty()
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete mind-map document.
///
/// Invariants (established by the constructors and kept by every mutator):
/// the root exists, every child id refers to an existing node, every node
/// except the root has exactly one parent, and every node is reachable from
/// the root.
#[derive(Debug, Clone)]
pub struct MindMap {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    selected: NodeId,
    bookmarks: BTreeSet<NodeId>,
    /// `None` once every id has been handed out.
    next_id: Option<NodeId>,
}

/// On-disk shape of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentFile {
    #[serde(default = "default_version")]
    version: u32,
    root: NodeId,
    #[serde(default)]
    selected: Option<NodeId>,
    #[serde(default)]
    bookmarks: Vec<NodeId>,
    nodes: Vec<Node>,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

impl MindMap {
    /// Create a document holding only a root node. The root starts selected.
    pub fn new(root_contents: impl Into<String>) -> Self {
        let root = NodeId::ROOT;
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, root_contents));
        Self {
            nodes,
            root,
            selected: root,
            bookmarks: BTreeSet::new(),
            next_id: root.checked_next(),
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn root_node_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id` in display order. Empty for unknown ids.
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.child_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the children of `id` take part in layout. `false` for unknown ids.
    pub fn children_visible(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.children_visible)
    }

    /// Text of `id`, or `""` for unknown ids.
    pub fn contents(&self, id: NodeId) -> &str {
        self.nodes.get(&id).map_or("", |n| n.contents.as_str())
    }

    pub fn selected_node_id(&self) -> NodeId {
        self.selected
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected == id
    }

    pub fn bookmarked_node_ids(&self) -> &BTreeSet<NodeId> {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: NodeId) -> bool {
        self.bookmarks.contains(&id)
    }

    /// Parent of `id`; `None` for the root and for unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if id == self.root {
            return None;
        }
        self.nodes
            .values()
            .find(|n| n.child_ids.contains(&id))
            .map(|n| n.id)
    }

    /// `id` and all its descendants in pre-order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get(&next) {
                out.push(next);
                stack.extend(node.child_ids.iter().rev().copied());
            }
        }
        out
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.child_ids(parent);
        let pos = siblings.iter().position(|&s| s == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.child_ids(parent);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// First child of `id`, only if the children are currently shown.
    pub fn first_visible_child(&self, id: NodeId) -> Option<NodeId> {
        if !self.children_visible(id) {
            return None;
        }
        self.child_ids(id).first().copied()
    }

    // ─── Selection, fold, bookmark ───────────────────────────────────────

    /// Select `id`. Returns `false` (and keeps the old selection) for unknown ids.
    pub fn set_selected_node_id(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            log::warn!("select: unknown node {id}");
            return false;
        }
        self.selected = id;
        true
    }

    /// Flip the fold state of `id`. Returns `false` for unknown ids.
    pub fn toggle_children_visibility(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.children_visible = !node.children_visible;
                log::debug!(
                    "{} {id}",
                    if node.children_visible { "unfold" } else { "fold" }
                );
                true
            }
            None => {
                log::warn!("toggle fold: unknown node {id}");
                false
            }
        }
    }

    /// Fold or unfold `id` and every descendant.
    pub fn set_subtree_visibility(&mut self, id: NodeId, visible: bool) -> bool {
        if !self.contains(id) {
            return false;
        }
        for member in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(&member) {
                node.children_visible = visible;
            }
        }
        true
    }

    pub fn toggle_bookmark(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            log::warn!("bookmark: unknown node {id}");
            return false;
        }
        if !self.bookmarks.remove(&id) {
            self.bookmarks.insert(id);
        }
        true
    }

    // ─── Structural edits ────────────────────────────────────────────────

    fn allocate_id(&mut self) -> Option<NodeId> {
        let Some(id) = self.next_id else {
            log::warn!("node id space exhausted");
            return None;
        };
        self.next_id = id.checked_next();
        Some(id)
    }

    /// Append a new child under `parent` and unfold the parent so it shows.
    pub fn add_child(&mut self, parent: NodeId, contents: impl Into<String>) -> Option<NodeId> {
        if !self.contains(parent) {
            log::warn!("add child: unknown parent {parent}");
            return None;
        }
        let id = self.allocate_id()?;
        self.nodes.insert(id, Node::new(id, contents));
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.child_ids.push(id);
            p.children_visible = true;
        }
        Some(id)
    }

    /// Insert a new node directly below `sibling` under the same parent.
    /// The root has no siblings, so this returns `None` for it.
    pub fn add_sibling(&mut self, sibling: NodeId, contents: impl Into<String>) -> Option<NodeId> {
        let parent = self.parent_of(sibling)?;
        let id = self.allocate_id()?;
        self.nodes.insert(id, Node::new(id, contents));
        if let Some(p) = self.nodes.get_mut(&parent) {
            let pos = p
                .child_ids
                .iter()
                .position(|&c| c == sibling)
                .map_or(p.child_ids.len(), |pos| pos + 1);
            p.child_ids.insert(pos, id);
        }
        Some(id)
    }

    /// Remove `id` and its whole subtree. The root cannot be removed.
    /// A selection inside the removed subtree moves to the parent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent_of(id) else {
            log::warn!("remove: {id} is the root or unknown");
            return false;
        };
        let doomed = self.subtree(id);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.child_ids.retain(|c| *c != id);
        }
        for member in &doomed {
            self.nodes.remove(member);
            self.bookmarks.remove(member);
        }
        if doomed.contains(&self.selected) {
            self.selected = parent;
        }
        log::debug!("removed {id} ({} nodes)", doomed.len());
        true
    }

    pub fn set_contents(&mut self, id: NodeId, contents: impl Into<String>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.contents = contents.into();
                true
            }
            None => {
                log::warn!("set contents: unknown node {id}");
                false
            }
        }
    }

    /// Swap `id` with its previous sibling. Returns `true` if the order changed.
    pub fn move_up(&mut self, id: NodeId) -> bool {
        self.shift_among_siblings(id, -1)
    }

    /// Swap `id` with its next sibling. Returns `true` if the order changed.
    pub fn move_down(&mut self, id: NodeId) -> bool {
        self.shift_among_siblings(id, 1)
    }

    fn shift_among_siblings(&mut self, id: NodeId, step: isize) -> bool {
        let Some(parent) = self.parent_of(id) else {
            return false;
        };
        let Some(p) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = p.child_ids.iter().position(|&c| c == id) else {
            return false;
        };
        let Some(target) = pos.checked_add_signed(step) else {
            return false;
        };
        if target >= p.child_ids.len() {
            return false;
        }
        p.child_ids.swap(pos, target);
        true
    }

    // ─── Serialization ───────────────────────────────────────────────────

    /// Serialize to the JSON document format (nodes sorted by id).
    pub fn to_json(&self) -> Result<String, String> {
        let mut nodes: Vec<Node> = self.nodes.values().cloned().collect();
        nodes.sort_by_key(|n| n.id);
        let file = DocumentFile {
            version: DOCUMENT_VERSION,
            root: self.root,
            selected: Some(self.selected),
            bookmarks: self.bookmarks.iter().copied().collect(),
            nodes,
        };
        serde_json::to_string_pretty(&file).map_err(|e| format!("serialize: {e}"))
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// Returns a description of the first problem found: invalid JSON, an
    /// unsupported version, a missing root, duplicate ids, dangling child
    /// ids, a node with several parents, a cycle, or an unreachable node.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: DocumentFile =
            serde_json::from_str(json).map_err(|e| format!("invalid document: {e}"))?;
        if file.version > DOCUMENT_VERSION {
            return Err(format!("unsupported document version {}", file.version));
        }

        let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(file.nodes.len());
        for node in file.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(format!("duplicate node id {id}"));
            }
        }
        if !nodes.contains_key(&file.root) {
            return Err(format!("root node {} is missing", file.root));
        }

        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        for node in nodes.values() {
            for &child in &node.child_ids {
                if !nodes.contains_key(&child) {
                    return Err(format!("node {} lists missing child {child}", node.id));
                }
                if child == file.root {
                    return Err(format!("root {child} cannot be a child of {}", node.id));
                }
                if let Some(prev) = parents.insert(child, node.id) {
                    return Err(format!("node {child} has two parents: {prev} and {}", node.id));
                }
            }
        }

        let mut seen = HashSet::with_capacity(nodes.len());
        let mut stack = vec![file.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(format!("cycle through node {id}"));
            }
            stack.extend(nodes[&id].child_ids.iter().copied());
        }
        if seen.len() != nodes.len() {
            let mut orphans: Vec<NodeId> =
                nodes.keys().filter(|id| !seen.contains(id)).copied().collect();
            orphans.sort();
            return Err(format!("nodes not reachable from root: {orphans:?}"));
        }

        let selected = match file.selected {
            Some(id) if nodes.contains_key(&id) => id,
            Some(id) => {
                log::warn!("load: selected node {id} missing, selecting root");
                file.root
            }
            None => file.root,
        };
        let bookmarks = file
            .bookmarks
            .into_iter()
            .filter(|id| nodes.contains_key(id))
            .collect();
        let next_id = nodes
            .keys()
            .max()
            .copied()
            .unwrap_or(file.root)
            .checked_next()
            .ok_or_else(|| "node id space exhausted".to_string())?;

        log::info!("loaded document with {} nodes", nodes.len());
        Ok(Self {
            nodes,
            root: file.root,
            selected,
            bookmarks,
            next_id: Some(next_id),
        })
    }
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new("")
    }
}
