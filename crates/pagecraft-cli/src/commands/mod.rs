pub mod apply_translations;
pub mod copy;
pub mod extract;
pub mod merge;
pub mod normalize;
pub mod resolve;
pub mod validate;

use pagecraft_config::PagecraftConfig;

/// The requested device, or the base breakpoint.
pub(crate) fn device_or_base(config: &PagecraftConfig, device: Option<String>) -> String {
    device.unwrap_or_else(|| config.base_breakpoint().id)
}
