//! Ordered device breakpoints and the responsive fallback rule

use pagecraft_config::{default_breakpoints, BreakpointConfig, PagecraftConfig};

use crate::responsive::ResponsiveValue;

/// Breakpoints ordered base first, each narrower than the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    items: Vec<BreakpointConfig>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            items: default_breakpoints(),
        }
    }
}

impl Breakpoints {
    /// Build from an explicit list. An empty list falls back to the defaults
    /// so that a base breakpoint always exists.
    pub fn new(items: Vec<BreakpointConfig>) -> Self {
        if items.is_empty() {
            return Self::default();
        }
        Self { items }
    }

    pub fn from_config(config: &PagecraftConfig) -> Self {
        Self::new(config.breakpoints.clone())
    }

    pub fn base(&self) -> &BreakpointConfig {
        &self.items[0]
    }

    pub fn get(&self, device_id: &str) -> Option<&BreakpointConfig> {
        self.items.iter().find(|b| b.id == device_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreakpointConfig> {
        self.items.iter()
    }

    pub fn position(&self, device_id: &str) -> Option<usize> {
        self.items.iter().position(|b| b.id == device_id)
    }

    /// The device itself followed by every wider breakpoint, ending at the
    /// base. Unknown devices resolve as the base.
    pub fn fallback_chain(&self, device_id: &str) -> impl Iterator<Item = &BreakpointConfig> {
        let start = self.position(device_id).unwrap_or(0);
        self.items[..=start].iter().rev()
    }

    /// Override for `device_id`, falling back toward the base breakpoint.
    pub fn find_override<'v, T>(
        &self,
        value: &'v ResponsiveValue<T>,
        device_id: &str,
    ) -> Option<&'v T> {
        self.fallback_chain(device_id)
            .find_map(|breakpoint| value.get(&breakpoint.id))
    }

    /// Reorder overrides in breakpoint order and make sure the base override
    /// exists whenever any override does. A missing base takes `base_default`,
    /// else the override of the widest device that has one. Overrides for
    /// devices this list does not know are kept after the known ones.
    pub fn normalize<T: Clone>(
        &self,
        value: &ResponsiveValue<T>,
        base_default: Option<&T>,
    ) -> ResponsiveValue<T> {
        let base_id = &self.base().id;
        let base = value
            .get(base_id)
            .or(base_default)
            .or_else(|| self.items.iter().find_map(|b| value.get(&b.id)))
            .or_else(|| value.iter().next().map(|o| &o.value));

        let mut normalized = ResponsiveValue::new();
        if let Some(base) = base {
            normalized.set(base_id.clone(), base.clone());
        }
        for breakpoint in &self.items[1..] {
            if let Some(v) = value.get(&breakpoint.id) {
                normalized.set(breakpoint.id.clone(), v.clone());
            }
        }
        for o in value.iter() {
            if self.get(&o.device_id).is_none() {
                normalized.set(o.device_id.clone(), o.value.clone());
            }
        }
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chain_walks_toward_base() {
        let breakpoints = Breakpoints::default();
        let chain: Vec<_> = breakpoints
            .fallback_chain("mobile")
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(chain, ["mobile", "tablet", "desktop"]);
    }

    #[test]
    fn unknown_device_uses_base() {
        let breakpoints = Breakpoints::default();
        let chain: Vec<_> = breakpoints
            .fallback_chain("watch")
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(chain, ["desktop"]);
    }

    #[test]
    fn find_override_prefers_exact_device() {
        let breakpoints = Breakpoints::default();
        let value = ResponsiveValue::single("desktop", 1).with("tablet", 2);
        assert_eq!(breakpoints.find_override(&value, "tablet"), Some(&2));
        assert_eq!(breakpoints.find_override(&value, "mobile"), Some(&2));
        assert_eq!(breakpoints.find_override(&value, "desktop"), Some(&1));
    }

    #[test]
    fn find_override_does_not_look_at_narrower_devices() {
        let breakpoints = Breakpoints::default();
        let value = ResponsiveValue::single("mobile", 3);
        assert_eq!(breakpoints.find_override(&value, "desktop"), None);
    }

    #[test]
    fn normalize_orders_and_fills_base() {
        let breakpoints = Breakpoints::default();
        let value = ResponsiveValue::single("mobile", 3).with("watch", 9);
        let normalized = breakpoints.normalize(&value, Some(&1));
        let devices: Vec<_> = normalized.iter().map(|o| o.device_id.as_str()).collect();
        assert_eq!(devices, ["desktop", "mobile", "watch"]);
        assert_eq!(normalized.get("desktop"), Some(&1));
    }

    #[test]
    fn normalize_fills_base_from_nearest_override() {
        let breakpoints = Breakpoints::default();
        let value = ResponsiveValue::single("mobile", 3).with("tablet", 2);
        let normalized = breakpoints.normalize(&value, None);
        let devices: Vec<_> = normalized.iter().map(|o| o.device_id.as_str()).collect();
        assert_eq!(devices, ["desktop", "tablet", "mobile"]);
        assert_eq!(normalized.get("desktop"), Some(&2));

        let only_unknown = breakpoints.normalize(&ResponsiveValue::single("watch", 9), None);
        assert_eq!(only_unknown.get("desktop"), Some(&9));
        assert!(breakpoints.normalize(&ResponsiveValue::<i32>::new(), None).is_empty());
    }

    #[test]
    fn empty_list_falls_back_to_defaults() {
        assert_eq!(Breakpoints::new(Vec::new()).base().id, "desktop");
    }
}
