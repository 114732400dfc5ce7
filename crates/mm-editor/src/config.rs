//! Editor configuration.

use crate::movement::InertiaConfig;
use mm_core::LayoutConfig;
use mm_render::Theme;
use serde::{Deserialize, Serialize};

/// Everything a host can tune, grouped by concern.
///
/// Deserializes with per-field defaults, so `{}` is a valid config and a
/// host only spells out what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub layout: LayoutConfig,
    pub inertia: InertiaConfig,
    pub theme: Theme,
    /// Font size of a freshly opened document.
    pub font_size: f64,
    /// Change applied by one font-size shortcut.
    pub font_size_step: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            inertia: InertiaConfig::default(),
            theme: Theme::default(),
            font_size: 14.0,
            font_size_step: 2.0,
            min_font_size: 8.0,
            max_font_size: 48.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid editor config: {e}"))?;
        config
            .inertia
            .validate()
            .map_err(|e| format!("invalid editor config: inertia: {e}"))?;
        Ok(config)
    }

    /// `size` limited to the configured font size range.
    pub fn clamp_font_size(&self, size: f64) -> f64 {
        size.clamp(self.min_font_size, self.max_font_size.max(self.min_font_size))
    }
}
