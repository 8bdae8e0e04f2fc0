//! Samsung Exynos vendor plugin
//!
//! The Exynos display block (FIMD) scans physically contiguous memory, so
//! scanout buffers are placed differently from ordinary buffers.

use std::os::unix::io::RawFd;
use log::debug;

use crate::error::{PluginError, PluginResult};
use crate::gem::{aligned_pitch, drm_ioctl, drm_iowr, BufferUsage, GemBuffer, GemCreateRequest};
use crate::vendor::{CursorCaps, DrmModeVendor, HwCursorApi, VendorCaps};

const EXYNOS_BO_CONTIG: u32 = 0;
const EXYNOS_BO_NONCONTIG: u32 = 1;

/// Buffer creation request for the Exynos GEM module, same wire layout as
/// the Rockchip one.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct DrmExynosGemCreate {
    size: u64,
    flags: u32,
    handle: u32,
}

const DRM_EXYNOS_GEM_CREATE: u32 = 0x00;

const DRM_IOCTL_EXYNOS_GEM_CREATE: u64 =
    drm_iowr(DRM_EXYNOS_GEM_CREATE, std::mem::size_of::<DrmExynosGemCreate>());

const CURSOR_WIDTH: u32 = 64;
const CURSOR_HEIGHT: u32 = 64;

static EXYNOS_CAPS: VendorCaps = VendorCaps {
    name: "exynos",
    use_page_flip_events: true,
    use_early_display: false,
    vblank_query_supported: true,
    cursor: CursorCaps {
        width: CURSOR_WIDTH,
        height: CURSOR_HEIGHT,
        padding: 0,
        api: HwCursorApi::Standard,
    },
};

/// The Exynos plugin
#[derive(Debug, Default)]
pub struct Exynos;

/// Compute the wire request for one allocation. Scanout buffers must be
/// physically contiguous for the display block; everything else can be
/// scattered.
fn build_gem_request(request: &GemCreateRequest) -> (DrmExynosGemCreate, u32) {
    let pitch = aligned_pitch(request.width, request.bpp);
    let flags = match request.usage {
        BufferUsage::Scanout => EXYNOS_BO_CONTIG,
        BufferUsage::NonScanout => EXYNOS_BO_NONCONTIG,
    };
    let req = DrmExynosGemCreate {
        size: request.height as u64 * pitch as u64,
        flags,
        ..Default::default()
    };
    (req, pitch)
}

impl Exynos {
    fn create_gem(&self, drm_fd: RawFd, request: &GemCreateRequest) -> PluginResult<GemBuffer> {
        let (mut req, pitch) = build_gem_request(request);

        debug!(
            "exynos GEM create: {}x{}@{}bpp usage={:?} pitch={} size={} flags={}",
            request.width, request.height, request.bpp, request.usage, pitch, req.size, req.flags
        );

        drm_ioctl(drm_fd, DRM_IOCTL_EXYNOS_GEM_CREATE, &mut req)
            .map_err(PluginError::Ioctl)?;

        Ok(GemBuffer {
            handle: req.handle,
            pitch,
            size: req.size,
        })
    }
}

impl DrmModeVendor for Exynos {
    fn caps(&self) -> &'static VendorCaps {
        &EXYNOS_CAPS
    }

    // No init_plane_for_cursor override: the cursor uses the legacy API,
    // there is no plane to prepare.

    fn create_custom_gem(
        &self,
        drm_fd: RawFd,
        request: &GemCreateRequest,
    ) -> Option<PluginResult<GemBuffer>> {
        Some(self.create_gem(drm_fd, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_caps() {
        let caps = Exynos.caps();
        assert_eq!(caps.name, "exynos");
        assert!(caps.use_page_flip_events);
        assert!(!caps.use_early_display);
        assert!(caps.vblank_query_supported);
        assert_eq!(caps.cursor.api, HwCursorApi::Standard);
        assert_eq!(caps.cursor.padding, 0);
    }

    #[test]
    fn test_no_cursor_plane_hook() {
        assert!(Exynos.init_plane_for_cursor(-1, 0).is_none());
    }

    #[test]
    fn test_scanout_placement() {
        let scanout = GemCreateRequest::from_raw_usage(640, 480, 32, BufferUsage::RAW_SCANOUT);
        let (req, pitch) = build_gem_request(&scanout);
        assert_eq!(req.flags, EXYNOS_BO_CONTIG);
        assert_eq!(pitch, 2560);
        assert_eq!(req.size, 480 * 2560);

        let plain = GemCreateRequest::from_raw_usage(640, 480, 32, BufferUsage::RAW_NON_SCANOUT);
        let (req, _) = build_gem_request(&plain);
        assert_eq!(req.flags, EXYNOS_BO_NONCONTIG);
    }

    #[test]
    fn test_kernel_failure_propagates_verbatim() {
        let req = GemCreateRequest::from_raw_usage(64, 64, 32, BufferUsage::RAW_NON_SCANOUT);
        let result = Exynos.create_custom_gem(-1, &req).unwrap();
        match result {
            Err(PluginError::Ioctl(e)) => assert_eq!(e.raw_os_error(), Some(libc::EBADF)),
            other => panic!("expected ioctl failure, got {:?}", other.map(|b| b.handle)),
        }
    }
}
