//! Rockchip vendor plugin
//!
//! Allocation quirks for the Rockchip DRM driver, derived from the Exynos
//! behavior (the kernel implementations are near-identical).

use std::os::unix::io::RawFd;
use log::debug;

use crate::error::{PluginError, PluginResult};
use crate::gem::{aligned_pitch, drm_ioctl, drm_iowr, GemBuffer, GemCreateRequest};
use crate::vendor::{CursorCaps, DrmModeVendor, HwCursorApi, VendorCaps};

#[allow(dead_code)]
const ROCKCHIP_BO_CONTIG: u32 = 0;
const ROCKCHIP_BO_NONCONTIG: u32 = 1;

/// Buffer creation request for the Rockchip GEM module.
///
/// `size` is page-aligned by the kernel; `handle` is filled in by the
/// kernel on success.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct DrmRockchipGemCreate {
    size: u64,
    flags: u32,
    handle: u32,
}

const DRM_ROCKCHIP_GEM_CREATE: u32 = 0x00;

const DRM_IOCTL_ROCKCHIP_GEM_CREATE: u64 =
    drm_iowr(DRM_ROCKCHIP_GEM_CREATE, std::mem::size_of::<DrmRockchipGemCreate>());

// Cursor dimensions. There is no real hardware size limit since the cursor
// rides an overlay plane, but the display server always creates cursor
// images at the maximum size, so keep width/height modest.
const CURSOR_WIDTH: u32 = 64;
const CURSOR_HEIGHT: u32 = 64;

// Padding added down each side of the cursor image. Works around
// corruption when the cursor reaches the screen edges.
const CURSOR_PADDING: u32 = 16;

static ROCKCHIP_CAPS: VendorCaps = VendorCaps {
    name: "rockchip",
    use_page_flip_events: true,
    use_early_display: true,
    vblank_query_supported: false,
    cursor: CursorCaps {
        width: CURSOR_WIDTH,
        height: CURSOR_HEIGHT,
        padding: CURSOR_PADDING,
        api: HwCursorApi::Plane,
    },
};

/// The Rockchip plugin
#[derive(Debug, Default)]
pub struct Rockchip;

/// Compute the wire request for one allocation. Pitch is rounded up to a
/// multiple of 64 bytes for best performance; placement is always
/// non-contiguous regardless of usage.
///
/// Contiguous allocations are not supported in some rockchip drm versions.
/// When they are supported all allocations are effectively contiguous
/// anyway, so we always request non contiguous buffers.
fn build_gem_request(request: &GemCreateRequest) -> (DrmRockchipGemCreate, u32) {
    let pitch = aligned_pitch(request.width, request.bpp);
    let req = DrmRockchipGemCreate {
        size: request.height as u64 * pitch as u64,
        flags: ROCKCHIP_BO_NONCONTIG,
        ..Default::default()
    };
    (req, pitch)
}

impl Rockchip {
    fn create_gem(&self, drm_fd: RawFd, request: &GemCreateRequest) -> PluginResult<GemBuffer> {
        let (mut req, pitch) = build_gem_request(request);

        debug!(
            "rockchip GEM create: {}x{}@{}bpp usage={:?} pitch={} size={}",
            request.width, request.height, request.bpp, request.usage, pitch, req.size
        );

        drm_ioctl(drm_fd, DRM_IOCTL_ROCKCHIP_GEM_CREATE, &mut req)
            .map_err(PluginError::Ioctl)?;

        Ok(GemBuffer {
            handle: req.handle,
            pitch,
            size: req.size,
        })
    }
}

impl DrmModeVendor for Rockchip {
    fn caps(&self) -> &'static VendorCaps {
        &ROCKCHIP_CAPS
    }

    fn init_plane_for_cursor(&self, _drm_fd: RawFd, _plane_id: u32) -> Option<PluginResult<()>> {
        // Nothing to set up; the host driver's generic plane handling is
        // sufficient, but the hook must report success so the host keeps
        // using the overlay plane for the cursor.
        Some(Ok(()))
    }

    fn create_custom_gem(
        &self,
        drm_fd: RawFd,
        request: &GemCreateRequest,
    ) -> Option<PluginResult<GemBuffer>> {
        Some(self.create_gem(drm_fd, request))
    }
}
