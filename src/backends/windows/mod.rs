#![cfg(target_os = "windows")]

//! Windows backend.
//!
//! Host applications that own the Win32 message loop forward `WM_INPUT` to
//! [`Softmouse3D::process_wm_input`](crate::processor::Softmouse3D::process_wm_input);
//! the helpers here copy the OS buffer and identify devices so the host can route
//! messages with [`is_softmouse3d`](crate::device::is_softmouse3d).

pub mod raw_input;

pub use raw_input::{device_descriptor, device_id, device_name, read_wm_input};
