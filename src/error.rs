//! Crate error type.
//!
//! Malformed or foreign reports are not errors (they are skipped silently by the
//! decoder). Errors are reserved for failures of the surrounding plumbing: reading the
//! OS buffer, talking to hidapi, or loading configuration.

use crate::device::DeviceId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// `GetRawInputData` failed. Not retried.
    #[error("Error getting WM_INPUT data. (Error code: 0x{code:08X})")]
    RawInputRead { code: u32 },

    #[error("Failed to initialize HID API: {0}")]
    HidInit(#[source] hidapi::HidError),

    #[error("Failed to read HID report from device {device}: {source}")]
    HidRead {
        device: DeviceId,
        #[source]
        source: hidapi::HidError,
    },

    #[error("Failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML config: {0}")]
    ConfigToml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid JSON config: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
