//! Vendor capability descriptors and the plugin trait
//!
//! The host driver binds one [`DrmModeVendor`] implementation at
//! initialization time (looked up by DRM driver name, see
//! [`crate::vendors::find_vendor`]) and queries it for the vendor's
//! buffer-allocation and cursor quirks. Descriptors are plain data,
//! constructed once and never mutated.

use std::os::unix::io::RawFd;
use serde::Serialize;

use crate::error::PluginResult;
use crate::gem::{GemBuffer, GemCreateRequest};

/// How the host driver should manage cursor images for this vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HwCursorApi {
    /// Cursor is composited through a dedicated hardware overlay plane
    Plane,
    /// Cursor uses the legacy DRM set-cursor/move-cursor ioctls
    Standard,
    /// No hardware cursor; the host falls back to software rendering
    None,
}

/// Cursor plane geometry for one vendor
///
/// The display server always allocates cursor images at the maximum size
/// regardless of the actual cursor, so width/height are fixed constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CursorCaps {
    /// Cursor image width in pixels
    pub width: u32,
    /// Cursor image height in pixels
    pub height: u32,
    /// Padding added down each side of the cursor image, in pixels
    pub padding: u32,
    /// Cursor control strategy
    pub api: HwCursorApi,
}

/// Read-only capability record for one vendor
///
/// Field set is fixed by the host driver plugin ABI; every vendor plugin
/// populates exactly these fields.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VendorCaps {
    /// DRM driver name used to select this vendor at bind time
    pub name: &'static str,
    /// Whether the kernel driver delivers page-flip completion events
    pub use_page_flip_events: bool,
    /// Whether the display can be lit up before the first client frame
    pub use_early_display: bool,
    /// Whether the kernel driver answers vblank counter queries
    pub vblank_query_supported: bool,
    /// Cursor plane geometry and control strategy
    pub cursor: CursorCaps,
}

/// One vendor's buffer-allocation and cursor behavior.
///
/// The two hook methods are optional: the default implementations return
/// `None`, which tells the host driver to use its generic path. A vendor
/// that overrides a hook returns `Some` with the hook's outcome.
pub trait DrmModeVendor: Send + Sync {
    /// This vendor's capability descriptor
    fn caps(&self) -> &'static VendorCaps;

    /// Prepare a hardware overlay plane for cursor use.
    ///
    /// `None` means the vendor has no plane setup of its own and the host
    /// driver's generic path applies.
    fn init_plane_for_cursor(&self, drm_fd: RawFd, plane_id: u32) -> Option<PluginResult<()>> {
        let _ = (drm_fd, plane_id);
        None
    }

    /// Allocate a GEM buffer object with vendor-specific pitch alignment
    /// and memory placement.
    ///
    /// `None` means the vendor has no custom allocator and the host driver
    /// should use dumb buffers. `Some(Err(..))` carries the kernel's
    /// failure verbatim; no result fields are populated on error.
    fn create_custom_gem(
        &self,
        drm_fd: RawFd,
        request: &GemCreateRequest,
    ) -> Option<PluginResult<GemBuffer>> {
        let _ = (drm_fd, request);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl DrmModeVendor for Bare {
        fn caps(&self) -> &'static VendorCaps {
            static CAPS: VendorCaps = VendorCaps {
                name: "bare",
                use_page_flip_events: false,
                use_early_display: false,
                vblank_query_supported: false,
                cursor: CursorCaps {
                    width: 0,
                    height: 0,
                    padding: 0,
                    api: HwCursorApi::None,
                },
            };
            &CAPS
        }
    }

    #[test]
    fn test_hooks_default_to_generic_path() {
        let vendor = Bare;
        assert!(vendor.init_plane_for_cursor(-1, 0).is_none());
        let req = GemCreateRequest::from_raw_usage(1, 1, 32, 0);
        assert!(vendor.create_custom_gem(-1, &req).is_none());
    }

    #[test]
    fn test_caps_serialize() {
        let json = serde_json::to_value(Bare.caps()).unwrap();
        assert_eq!(json["name"], "bare");
        assert_eq!(json["cursor"]["api"], "None");
    }
}
