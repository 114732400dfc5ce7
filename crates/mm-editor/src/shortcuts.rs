//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The shortcut map lives in Rust so it's shared across WASM and native.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Structure ──
    AddChild,
    AddSibling,
    DeleteNode,
    MoveNodeUp,
    MoveNodeDown,

    // ── Node state ──
    ToggleFold,
    ToggleBookmark,

    // ── Navigation ──
    SelectParent,
    SelectFirstChild,
    SelectPreviousSibling,
    SelectNextSibling,

    // ── View ──
    FontSizeUp,
    FontSizeDown,
    /// Root back to its default anchor, translation back to zero.
    ResetView,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"Tab"`, `"ArrowUp"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // ── Modifier combos first (most specific) ──
        if cmd {
            return match key {
                "b" | "B" => Some(ShortcutAction::ToggleBookmark),
                "ArrowUp" => Some(ShortcutAction::MoveNodeUp),
                "ArrowDown" => Some(ShortcutAction::MoveNodeDown),
                "=" | "+" => Some(ShortcutAction::FontSizeUp),
                "-" => Some(ShortcutAction::FontSizeDown),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        // ── Single keys (no modifiers) ──
        match key {
            "Tab" => Some(ShortcutAction::AddChild),
            "Enter" => Some(ShortcutAction::AddSibling),
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteNode),
            " " => Some(ShortcutAction::ToggleFold),
            "ArrowLeft" => Some(ShortcutAction::SelectParent),
            "ArrowRight" => Some(ShortcutAction::SelectFirstChild),
            "ArrowUp" => Some(ShortcutAction::SelectPreviousSibling),
            "ArrowDown" => Some(ShortcutAction::SelectNextSibling),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_structure_keys() {
        assert_eq!(
            ShortcutMap::resolve("Tab", false, false, false, false),
            Some(ShortcutAction::AddChild)
        );
        assert_eq!(
            ShortcutMap::resolve("Enter", false, false, false, false),
            Some(ShortcutAction::AddSibling)
        );
        assert_eq!(
            ShortcutMap::resolve("Delete", false, false, false, false),
            Some(ShortcutAction::DeleteNode)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, false),
            Some(ShortcutAction::DeleteNode)
        );
    }

    #[test]
    fn resolve_space_toggles_fold() {
        assert_eq!(
            ShortcutMap::resolve(" ", false, false, false, false),
            Some(ShortcutAction::ToggleFold)
        );
    }

    #[test]
    fn resolve_arrow_navigation() {
        assert_eq!(
            ShortcutMap::resolve("ArrowLeft", false, false, false, false),
            Some(ShortcutAction::SelectParent)
        );
        assert_eq!(
            ShortcutMap::resolve("ArrowRight", false, false, false, false),
            Some(ShortcutAction::SelectFirstChild)
        );
        assert_eq!(
            ShortcutMap::resolve("ArrowUp", false, false, false, false),
            Some(ShortcutAction::SelectPreviousSibling)
        );
        assert_eq!(
            ShortcutMap::resolve("ArrowDown", false, false, false, false),
            Some(ShortcutAction::SelectNextSibling)
        );
    }

    #[test]
    fn resolve_cmd_arrows_reorder() {
        // Cmd+ArrowUp → move up
        assert_eq!(
            ShortcutMap::resolve("ArrowUp", false, false, false, true),
            Some(ShortcutAction::MoveNodeUp)
        );
        // Ctrl+ArrowDown → move down
        assert_eq!(
            ShortcutMap::resolve("ArrowDown", true, false, false, false),
            Some(ShortcutAction::MoveNodeDown)
        );
    }

    #[test]
    fn resolve_bookmark() {
        assert_eq!(
            ShortcutMap::resolve("b", true, false, false, false),
            Some(ShortcutAction::ToggleBookmark)
        );
        assert_eq!(ShortcutMap::resolve("b", false, false, false, false), None);
    }

    #[test]
    fn resolve_view() {
        assert_eq!(
            ShortcutMap::resolve("=", false, false, false, true),
            Some(ShortcutAction::FontSizeUp)
        );
        assert_eq!(
            ShortcutMap::resolve("-", true, false, false, false),
            Some(ShortcutAction::FontSizeDown)
        );
        assert_eq!(
            ShortcutMap::resolve("0", false, false, false, true),
            Some(ShortcutAction::ResetView)
        );
    }

    #[test]
    fn resolve_unknown_key() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("Tab", false, true, false, false), None);
    }
}
