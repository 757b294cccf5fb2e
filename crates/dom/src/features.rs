//! Runtime feature flags
//!
//! Describes which native capabilities the host exposes. Consumers detect
//! these once and pick a strategy; the arena itself always supports every
//! primitive so both paths can be exercised against the same tree.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeFeatures {
    /// `nextElementSibling` / `previousElementSibling` are available
    pub element_sibling: bool,
    /// Native `Element.matches` is available
    pub matches_selector: bool,
    /// `getComputedStyle` is available (otherwise legacy `currentStyle`)
    pub computed_style: bool,
    /// `textContent` is available (otherwise `innerText`)
    pub text_content: bool,
    /// Font size used to resolve `em`/`ex` when the element has none
    pub base_font_size_px: f64,
    /// Width used to resolve percentages when no ancestor width is known
    pub viewport_width_px: f64,
}

impl Default for RuntimeFeatures {
    fn default() -> Self {
        Self {
            element_sibling: true,
            matches_selector: true,
            computed_style: true,
            text_content: true,
            base_font_size_px: 16.0,
            viewport_width_px: 1280.0,
        }
    }
}

impl RuntimeFeatures {
    /// A runtime with none of the modern element APIs
    pub fn legacy() -> Self {
        Self {
            element_sibling: false,
            matches_selector: false,
            computed_style: false,
            text_content: false,
            ..Self::default()
        }
    }

    /// Load flags from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
