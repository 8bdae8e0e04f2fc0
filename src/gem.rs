//! GEM buffer creation types and raw DRM ioctl plumbing
//!
//! Vendor plugins describe their allocation quirks in terms of these types:
//! the host driver fills in a [`GemCreateRequest`], the plugin computes an
//! aligned pitch, issues the vendor-specific GEM create ioctl and hands back
//! a [`GemBuffer`] with the kernel handle.

use std::io;
use std::os::unix::io::RawFd;
use serde::{Serialize, Deserialize};

/// Scanline alignment required by the SoC display blocks we support.
///
/// Buffers perform best when each row starts on a 64-byte boundary, so
/// every vendor plugin rounds its pitch up to this.
pub const PITCH_ALIGN: u32 = 64;

/// What the buffer will be used for
///
/// The host driver plugin ABI encodes this as a raw integer; values outside
/// the two known categories are a caller bug, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferUsage {
    /// Buffer is scanned out directly by the display hardware
    Scanout,
    /// Ordinary buffer, never handed to the display controller
    NonScanout,
}

impl BufferUsage {
    /// Raw ABI value for [`BufferUsage::Scanout`]
    pub const RAW_SCANOUT: u32 = 0;
    /// Raw ABI value for [`BufferUsage::NonScanout`]
    pub const RAW_NON_SCANOUT: u32 = 1;

    /// Decode the raw plugin-ABI value.
    ///
    /// # Panics
    ///
    /// Panics on any value outside the two known categories. Unknown usage
    /// is a contract violation by the caller and is asserted rather than
    /// reported as a recoverable error.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            Self::RAW_SCANOUT => BufferUsage::Scanout,
            Self::RAW_NON_SCANOUT => BufferUsage::NonScanout,
            other => panic!("invalid buffer usage {} (expected scanout=0 or non-scanout=1)", other),
        }
    }

    /// Raw plugin-ABI value of this usage
    pub fn as_raw(self) -> u32 {
        match self {
            BufferUsage::Scanout => Self::RAW_SCANOUT,
            BufferUsage::NonScanout => Self::RAW_NON_SCANOUT,
        }
    }
}

/// One buffer allocation request from the host driver
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GemCreateRequest {
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
    /// Bits per pixel
    pub bpp: u32,
    /// Intended use of the buffer
    pub usage: BufferUsage,
}

impl GemCreateRequest {
    /// Build a request from the raw plugin-ABI usage value.
    ///
    /// # Panics
    ///
    /// Panics if `raw_usage` is not a known category, see
    /// [`BufferUsage::from_raw`].
    pub fn from_raw_usage(width: u32, height: u32, bpp: u32, raw_usage: u32) -> Self {
        Self {
            width,
            height,
            bpp,
            usage: BufferUsage::from_raw(raw_usage),
        }
    }

    /// Unaligned bytes per row for this request
    pub fn raw_row_bytes(&self) -> u32 {
        self.width * ((self.bpp + 7) / 8)
    }
}

/// A successfully created GEM buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemBuffer {
    /// Kernel-assigned GEM handle
    pub handle: u32,
    /// Byte stride between the start of consecutive rows
    pub pitch: u32,
    /// Total allocated size in bytes
    pub size: u64,
}

/// Round `value` up to the next multiple of `alignment` (a power of two)
pub const fn align(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}

/// Pitch for a `width` x `bpp` buffer, rounded up to [`PITCH_ALIGN`] bytes
pub fn aligned_pitch(width: u32, bpp: u32) -> u32 {
    align(width * ((bpp + 7) / 8), PITCH_ALIGN)
}

// DRM ioctl command encoding, see <linux/drm.h>. Vendor commands live at
// DRM_COMMAND_BASE within the 'd' ioctl namespace.

/// DRM ioctl magic ('d')
pub const DRM_IOCTL_BASE: u32 = 0x64;
/// First command number reserved for driver-private ioctls
pub const DRM_COMMAND_BASE: u32 = 0x40;

const IOC_NRBITS: u32 = 8;
const IOC_TYPEBITS: u32 = 8;
const IOC_SIZEBITS: u32 = 14;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = IOC_NRSHIFT + IOC_NRBITS;
const IOC_SIZESHIFT: u32 = IOC_TYPESHIFT + IOC_TYPEBITS;
const IOC_DIRSHIFT: u32 = IOC_SIZESHIFT + IOC_SIZEBITS;

const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;

/// Encode a read/write DRM driver ioctl (`DRM_IOWR`) for vendor command
/// number `nr` with an argument structure of `size` bytes
pub const fn drm_iowr(nr: u32, size: usize) -> u64 {
    (((IOC_READ | IOC_WRITE) << IOC_DIRSHIFT)
        | (DRM_IOCTL_BASE << IOC_TYPESHIFT)
        | ((DRM_COMMAND_BASE + nr) << IOC_NRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)) as u64
}

/// Issue a DRM ioctl, restarting on EINTR/EAGAIN like libdrm's `drmIoctl`.
///
/// Any other failure is surfaced verbatim as the kernel's errno; there is
/// no retry and no fallback.
pub fn drm_ioctl<T>(fd: RawFd, request: u64, arg: &mut T) -> io::Result<()> {
    loop {
        // Request type differs between libc flavors (c_ulong vs c_int)
        let ret = unsafe { libc::ioctl(fd, request as _, arg as *mut T) };
        if ret == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::EINTR) | Some(libc::EAGAIN) => continue,
            _ => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(37, 32, 192)] // 148 raw bytes rounds up to 192
    #[case(64, 32, 256)] // already aligned
    #[case(1, 8, 64)]
    #[case(1, 1, 64)] // sub-byte bpp still occupies one byte per row
    #[case(720, 16, 1472)]
    #[case(1920, 32, 7680)]
    fn test_aligned_pitch(#[case] width: u32, #[case] bpp: u32, #[case] expected: u32) {
        assert_eq!(aligned_pitch(width, bpp), expected);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(37, 32)]
    #[case(1920, 24)]
    #[case(4096, 16)]
    fn test_pitch_alignment_invariant(#[case] width: u32, #[case] bpp: u32) {
        let pitch = aligned_pitch(width, bpp);
        assert_eq!(pitch % PITCH_ALIGN, 0);
        assert!(pitch >= width * ((bpp + 7) / 8));
    }

    #[test]
    fn test_align() {
        assert_eq!(align(0, 64), 0);
        assert_eq!(align(1, 64), 64);
        assert_eq!(align(64, 64), 64);
        assert_eq!(align(65, 64), 128);
        assert_eq!(align(148, 64), 192);
    }

    #[test]
    fn test_buffer_usage_raw_roundtrip() {
        assert_eq!(BufferUsage::from_raw(0), BufferUsage::Scanout);
        assert_eq!(BufferUsage::from_raw(1), BufferUsage::NonScanout);
        assert_eq!(BufferUsage::Scanout.as_raw(), 0);
        assert_eq!(BufferUsage::NonScanout.as_raw(), 1);
    }

    #[test]
    #[should_panic(expected = "invalid buffer usage")]
    fn test_buffer_usage_rejects_unknown() {
        let _ = BufferUsage::from_raw(2);
    }

    #[test]
    fn test_request_raw_row_bytes() {
        let req = GemCreateRequest::from_raw_usage(37, 10, 32, BufferUsage::RAW_SCANOUT);
        assert_eq!(req.raw_row_bytes(), 148);
        assert_eq!(req.usage, BufferUsage::Scanout);
    }

    #[test]
    fn test_drm_iowr_encoding() {
        // DRM_IOWR(0x40, 16 bytes) = dir 0xc0000000 | size << 16 | 'd' << 8 | nr
        let cmd = drm_iowr(0x00, 16);
        assert_eq!(cmd, 0xC010_6440);
    }
}
