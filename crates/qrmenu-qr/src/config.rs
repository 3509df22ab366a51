//! QR service configuration.

use crate::encoder::DEFAULT_MODULE_SIZE;

/// Largest accepted module size, in pixels per module.
pub const MAX_MODULE_SIZE: u32 = 100;

/// Configuration for [`QrService`](crate::QrService).
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Public base URL that encoded redirect URLs point at. May be empty,
    /// in which case codes encode `/{id}`.
    pub base_url: String,
    /// Module size used when a request does not pick one.
    pub default_module_size: u32,
    /// Upper bound for caller-supplied module sizes.
    pub max_module_size: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            default_module_size: DEFAULT_MODULE_SIZE,
            max_module_size: MAX_MODULE_SIZE,
        }
    }
}

impl QrConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
