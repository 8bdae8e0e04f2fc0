//! Built-in vendor plugins and the bind-time registry
//!
//! The host driver asks the kernel for the DRM driver name and selects the
//! matching plugin with [`find_vendor`] once at initialization. Vendors are
//! compiled in behind cargo features, mirroring how deployments only ship
//! the SoC families they target.

#[cfg(feature = "exynos")]
mod exynos;
#[cfg(feature = "rockchip")]
mod rockchip;

#[cfg(feature = "exynos")]
pub use exynos::Exynos;
#[cfg(feature = "rockchip")]
pub use rockchip::Rockchip;

use std::io;
use chrono::Utc;
use serde::Serialize;

use crate::error::{PluginError, PluginResult};
use crate::vendor::{DrmModeVendor, VendorCaps};

#[cfg(feature = "rockchip")]
static ROCKCHIP: Rockchip = Rockchip;
#[cfg(feature = "exynos")]
static EXYNOS: Exynos = Exynos;

static VENDORS: &[&(dyn DrmModeVendor)] = &[
    #[cfg(feature = "rockchip")]
    &ROCKCHIP,
    #[cfg(feature = "exynos")]
    &EXYNOS,
];

/// All vendor plugins compiled into this build
pub fn supported_vendors() -> &'static [&'static dyn DrmModeVendor] {
    VENDORS
}

/// Look up the plugin for a DRM driver name.
///
/// This is the bind-time selection step: the host driver queries the kernel
/// for the driver name and binds the returned plugin for its entire
/// lifetime. Returns `None` when no compiled-in vendor matches.
pub fn find_vendor(name: &str) -> Option<&'static dyn DrmModeVendor> {
    supported_vendors()
        .iter()
        .copied()
        .find(|v| v.caps().name == name)
}

/// Like [`find_vendor`], but fails with [`PluginError::UnknownVendor`] so
/// the miss can be propagated with `?`
pub fn require_vendor(name: &str) -> PluginResult<&'static dyn DrmModeVendor> {
    find_vendor(name).ok_or_else(|| PluginError::UnknownVendor(name.to_string()))
}

/// Export all compiled-in capability descriptors as JSON
pub fn export_caps_json(path: &str) -> io::Result<()> {
    use std::fs::File;

    #[derive(Serialize)]
    struct CapsExport {
        generated_at: chrono::DateTime<Utc>,
        version: &'static str,
        vendors: Vec<&'static VendorCaps>,
    }

    let export = CapsExport {
        generated_at: Utc::now(),
        version: crate::VERSION,
        vendors: supported_vendors().iter().map(|v| v.caps()).collect(),
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(())
}
