//! Device identity.
//!
//! [`DeviceId`] is the opaque key the processor tracks state under. On Windows it is the
//! Raw Input `hDevice` handle; the HID backend derives one from the device path.
//!
//! [`is_softmouse3d`] is the routing predicate: callers use it to decide which devices
//! (and therefore which `WM_INPUT` messages) belong to this crate. The processor itself
//! never checks identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor id of GGS (Global Geo Supplies, Inc).
pub const VENDOR_ID_GGS: u16 = 0x241f;
/// Product id of the softmouse 3D. Use with [`VENDOR_ID_GGS`].
pub const PRODUCT_ID_SOFTMOUSE3D: u16 = 0x0041;
/// HID usage page: Generic Desktop.
pub const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
/// HID usage on Generic Desktop: Joystick.
pub const USAGE_JOYSTICK: u16 = 0x04;

/// Opaque per-device key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Raw Input device class (`RIM_TYPE*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceKind {
    Mouse,
    Keyboard,
    Hid,
}

impl DeviceKind {
    /// Map a `RIM_TYPE*` value. Unknown values yield `None`.
    pub fn from_rim_type(v: u32) -> Option<Self> {
        match v {
            0 => Some(DeviceKind::Mouse),
            1 => Some(DeviceKind::Keyboard),
            2 => Some(DeviceKind::Hid),
            _ => None,
        }
    }
}

/// What the OS tells us about a device, as far as identity is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub kind: DeviceKind,
    pub usage_page: u16,
    pub usage: u16,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl From<&hidapi::DeviceInfo> for DeviceDescriptor {
    fn from(info: &hidapi::DeviceInfo) -> Self {
        DeviceDescriptor {
            kind: DeviceKind::Hid,
            usage_page: info.usage_page(),
            usage: info.usage(),
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
        }
    }
}

/// Returns whether a device is a softmouse 3D.
pub fn is_softmouse3d(desc: &DeviceDescriptor) -> bool {
    desc.kind == DeviceKind::Hid
        && desc.usage_page == USAGE_PAGE_GENERIC_DESKTOP
        && desc.usage == USAGE_JOYSTICK
        && desc.vendor_id == VENDOR_ID_GGS
        && desc.product_id == PRODUCT_ID_SOFTMOUSE3D
}
