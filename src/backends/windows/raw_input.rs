//! Windows Raw Input helpers.
//!
//! This module only talks to the OS: it copies a `WM_INPUT` payload into an owned
//! buffer and looks up device descriptors. Decoding lives in [`crate::report`], routing
//! and click tracking in [`Softmouse3D`](crate::processor::Softmouse3D).
//!
//! Registering for `WM_INPUT` (`RegisterRawInputDevices`) and running the message loop
//! are left to the host application.

#![cfg(target_os = "windows")]

use crate::device::{DeviceDescriptor, DeviceId, DeviceKind};
use crate::error::{Error, Result};
use core::ffi::c_void;
use windows_sys::Win32::Foundation::{GetLastError, HANDLE};
use windows_sys::Win32::UI::Input::*;

/// Copy the `RAWINPUT` payload of a `WM_INPUT` message (its `lparam`).
///
/// # Errors
/// [`Error::RawInputRead`] with the `GetLastError` code if either `GetRawInputData`
/// call fails.
pub fn read_wm_input(lparam: isize) -> Result<Vec<u8>> {
    let header_size = core::mem::size_of::<RAWINPUTHEADER>() as u32;
    unsafe {
        // Query size
        let mut size: u32 = 0;
        let r0 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            core::ptr::null_mut(),
            &mut size,
            header_size,
        );
        if r0 == u32::MAX {
            return Err(Error::RawInputRead {
                code: GetLastError(),
            });
        }

        let mut buf = vec![0u8; size as usize];
        if size == 0 {
            return Ok(buf);
        }
        let r1 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            header_size,
        );
        if r1 == u32::MAX {
            return Err(Error::RawInputRead {
                code: GetLastError(),
            });
        }
        buf.truncate(r1 as usize);

        #[cfg(feature = "debug-log")]
        log::trace!("[WM_INPUT] {} bytes: {:02x?}", buf.len(), buf);

        Ok(buf)
    }
}

/// The [`DeviceId`] Raw Input uses for `handle`.
#[inline]
pub fn device_id(handle: HANDLE) -> DeviceId {
    DeviceId(handle as usize as u64)
}

/// Look up the identity of a Raw Input device (`RIDI_DEVICEINFO`).
///
/// Returns `None` if the OS call fails or reports an unknown device type.
pub fn device_descriptor(id: DeviceId) -> Option<DeviceDescriptor> {
    let handle = id.0 as usize as HANDLE;
    unsafe {
        let mut info: RID_DEVICE_INFO = core::mem::zeroed();
        info.cbSize = core::mem::size_of::<RID_DEVICE_INFO>() as u32;
        let mut size = info.cbSize;
        let r = GetRawInputDeviceInfoW(
            handle,
            RIDI_DEVICEINFO,
            &mut info as *mut RID_DEVICE_INFO as *mut c_void,
            &mut size,
        );
        if r == u32::MAX {
            log::debug!("GetRawInputDeviceInfoW failed for {id}: 0x{:08X}", GetLastError());
            return None;
        }

        let kind = DeviceKind::from_rim_type(info.dwType)?;
        let (usage_page, usage, vendor_id, product_id) = if kind == DeviceKind::Hid {
            let hid = info.Anonymous.hid;
            (
                hid.usUsagePage,
                hid.usUsage,
                hid.dwVendorId as u16,
                hid.dwProductId as u16,
            )
        } else {
            (0, 0, 0, 0)
        };

        Some(DeviceDescriptor {
            kind,
            usage_page,
            usage,
            vendor_id,
            product_id,
        })
    }
}

/// RawInput device interface path for a device (`RIDI_DEVICENAME`).
pub fn device_name(id: DeviceId) -> Option<String> {
    let handle = id.0 as usize as HANDLE;
    unsafe {
        // Query required size (in WCHARs, including NUL).
        let mut size: u32 = 0;
        let r0 = GetRawInputDeviceInfoW(handle, RIDI_DEVICENAME, core::ptr::null_mut(), &mut size);
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        let mut wide: Vec<u16> = vec![0u16; size as usize];
        let r1 = GetRawInputDeviceInfoW(
            handle,
            RIDI_DEVICENAME,
            wide.as_mut_ptr() as *mut c_void,
            &mut size,
        );
        if r1 == u32::MAX {
            return None;
        }

        while wide.last() == Some(&0) {
            wide.pop();
        }
        Some(String::from_utf16_lossy(&wide))
    }
}
