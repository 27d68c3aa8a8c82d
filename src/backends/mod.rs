//! Input backends for `softmouse3d`.
//!
//! # Feature flags
//! - **`hid`** enables the `hidapi` backend (default).
//!
//! The Windows Raw Input helpers are always compiled on Windows since `WM_INPUT`
//! forwarding does not need `hidapi`.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_input;

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;

#[cfg(feature = "hid")]
pub use hid::{discover, probe_devices, HidSoftmouse};
pub use virtual_input::VirtualSoftmouse;
