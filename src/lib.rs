//! # SOCDRM - Vendor Buffer-Allocation Plugins for ARM SoC DRM Drivers
//!
//! A small Rust library modelling the plugin layer of a DDX display driver:
//! per-vendor capability descriptors and GEM allocation quirks for ARM SoC
//! DRM drivers, selected by driver name at bind time.
//!
//! ## Features
//!
//! - **Rockchip support**: overlay-plane cursor, always non-contiguous GEM
//! - **Samsung Exynos support**: legacy cursor API, contiguous scanout GEM
//! - **Name-keyed registry** for bind-time plugin selection
//! - **64-byte pitch alignment** shared across vendors
//! - **JSON export** of capability descriptors
//! - **No threads, no locks** – descriptors are immutable statics
//!
//! ## Quick Start
//!
//! ```rust
//! if let Some(vendor) = socdrm::find_vendor("rockchip") {
//!     let caps = vendor.caps();
//!     println!("cursor: {}x{}", caps.cursor.width, caps.cursor.height);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod gem;
pub mod vendor;
pub mod vendors;

// Re-export main API for easy access
pub use error::{PluginError, PluginResult};
pub use gem::{aligned_pitch, BufferUsage, GemBuffer, GemCreateRequest, PITCH_ALIGN};
pub use vendor::{CursorCaps, DrmModeVendor, HwCursorApi, VendorCaps};
pub use vendors::{export_caps_json, find_vendor, require_vendor, supported_vendors};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with custom configuration
///
/// # Example
///
/// ```no_run
/// use socdrm;
///
/// // Optional initialization for custom logging or configuration
/// socdrm::init();
/// ```
pub fn init() {
    // Placeholder for future initialization logic
    // Could setup logging, register out-of-tree vendors, etc.
}

/// Names of all vendor plugins compiled into this build
///
/// # Example
///
/// ```no_run
/// use socdrm;
///
/// for name in socdrm::vendor_names() {
///     println!("Supported vendor: {}", name);
/// }
/// ```
pub fn vendor_names() -> Vec<&'static str> {
    supported_vendors().iter().map(|v| v.caps().name).collect()
}

/// Run a quick compatibility check for a DRM driver name
///
/// Returns `true` if a plugin for this driver is compiled in.
///
/// # Example
///
/// ```no_run
/// use socdrm;
///
/// if socdrm::is_supported("rockchip") {
///     println!("Rockchip plugin available");
/// }
/// ```
pub fn is_supported(name: &str) -> bool {
    find_vendor(name).is_some()
}

/// Get library information
///
/// # Example
///
/// ```no_run
/// use socdrm;
///
/// println!("Using socdrm v{}", socdrm::version());
/// ```
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init() {
        // Just ensure it compiles and runs without panic
        init();
    }

    #[test]
    fn test_vendor_names_match_registry() {
        for name in vendor_names() {
            assert!(is_supported(name));
        }
        assert!(!is_supported("nouveau"));
    }
}

/// Prelude module for convenient imports
///
/// # Example
///
/// ```no_run
/// use socdrm::prelude::*;
///
/// let vendor = find_vendor("rockchip");
/// ```
pub mod prelude {
    pub use crate::error::{PluginError, PluginResult};
    pub use crate::gem::{BufferUsage, GemBuffer, GemCreateRequest};
    pub use crate::vendor::{CursorCaps, DrmModeVendor, HwCursorApi, VendorCaps};
    pub use crate::vendors::{find_vendor, require_vendor, supported_vendors};
    pub use crate::{init, is_supported, vendor_names, version};
}
