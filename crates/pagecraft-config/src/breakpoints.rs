//! Device breakpoint configuration
//!
//! Breakpoints are listed base-first. The base breakpoint covers the widest
//! viewports and has no `max_width`; every following breakpoint narrows the
//! range. Responsive values fall back from a breakpoint toward the base.

use serde::{Deserialize, Serialize};

/// A single device breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointConfig {
    /// Stable device identifier stored in responsive data (`deviceId`).
    pub id: String,

    /// Human readable label.
    pub label: String,

    /// Upper bound of the viewport width in pixels. `None` for the base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,

    /// Viewport width the editor previews this breakpoint at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_width: Option<u32>,
}

impl BreakpointConfig {
    /// Create a breakpoint with no preview width.
    pub fn new(id: impl Into<String>, label: impl Into<String>, max_width: Option<u32>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            max_width,
            viewport_width: None,
        }
    }

    /// Set the preview viewport width.
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = Some(width);
        self
    }
}

/// The default desktop / tablet / mobile breakpoints.
pub fn default_breakpoints() -> Vec<BreakpointConfig> {
    vec![
        BreakpointConfig::new("desktop", "Desktop", None),
        BreakpointConfig::new("tablet", "Tablet", Some(768)).with_viewport_width(760),
        BreakpointConfig::new("mobile", "Mobile", Some(575)).with_viewport_width(390),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_breakpoints_start_with_base() {
        let breakpoints = default_breakpoints();
        assert_eq!(breakpoints[0].id, "desktop");
        assert!(breakpoints[0].max_width.is_none());
        assert_eq!(breakpoints.len(), 3);
    }

    #[test]
    fn breakpoint_serializes_camel_case() {
        let json = serde_json::to_value(
            BreakpointConfig::new("tablet", "Tablet", Some(768)).with_viewport_width(760),
        )
        .unwrap();
        assert_eq!(json["max_width"], 768);
        assert_eq!(json["viewport_width"], 760);
    }
}
