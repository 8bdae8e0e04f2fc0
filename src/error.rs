//! Error types for the socdrm library

use std::io;
use thiserror::Error;

/// Main error type for socdrm operations
#[derive(Error, Debug)]
pub enum PluginError {
    /// No vendor plugin registered under the requested name
    #[error("No vendor plugin named '{0}'")]
    UnknownVendor(String),

    /// Failed to open the DRM device node
    #[error("Failed to open DRM device: {0}")]
    DeviceOpen(io::Error),

    /// DRM device node does not exist
    #[error("No DRM device found")]
    NoDevice,

    /// Kernel GEM ioctl failed; carries the verbatim errno from the kernel
    #[error("GEM ioctl failed: {0}")]
    Ioctl(io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// System permission error
    #[error("Permission denied: {0}")]
    Permission(String),
}

impl From<io::Error> for PluginError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                PluginError::Permission(err.to_string())
            }
            io::ErrorKind::NotFound => {
                PluginError::NoDevice
            }
            _ => PluginError::DeviceOpen(err),
        }
    }
}

impl PluginError {
    /// Raw OS errno of the underlying failure, if there is one
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            PluginError::DeviceOpen(e) | PluginError::Ioctl(e) => e.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for socdrm operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;
