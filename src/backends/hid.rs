//! hidapi backend.
//!
//! Opens every softmouse 3D visible to `hidapi` and drains its input reports into a
//! [`Softmouse3D`]. This is the portable path; on Windows, applications that already
//! own a message loop usually forward `WM_INPUT` instead (see
//! [`Softmouse3D::process_wm_input`]).

use crate::device::{is_softmouse3d, DeviceDescriptor, DeviceId};
use crate::error::{Error, Result};
use crate::processor::Softmouse3D;
use crate::report::{RawRecord, RECORD_SIZE};
use hidapi::{DeviceInfo, HidApi, HidDevice};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maximum number of reports drained per [`HidSoftmouse::poll`] call.
///
/// Prevents a single device from starving the rest of the loop.
const MAX_REPORTS_PER_TICK: usize = 32;

/// An open softmouse 3D.
pub struct HidSoftmouse {
    id: DeviceId,
    name: String,
    path: String,
    raw: HidDevice,
    // Room for a leading report id on platforms that prepend one.
    buf: [u8; RECORD_SIZE + 1],
}

impl HidSoftmouse {
    /// Open a device entry. Returns `None` if it is not a softmouse 3D or cannot be opened.
    pub fn open(info: &DeviceInfo, api: &HidApi) -> Option<Self> {
        if !is_softmouse3d(&DeviceDescriptor::from(info)) {
            return None;
        }
        let device = match info.open_device(api) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("failed to open {:?}: {e}", info.path());
                return None;
            }
        };
        // Non-blocking so `poll` can be called from a host loop.
        if let Err(e) = device.set_blocking_mode(false) {
            log::debug!("set_blocking_mode failed, continuing: {e}");
        }

        let path = info.path().to_string_lossy().to_string();
        let id = device_id_for_path(&path);
        let name = info.product_string().unwrap_or("softmouse 3D").to_string();
        log::debug!("opened {name} ({id}) at {path}");

        Some(Self {
            id,
            name,
            path,
            raw: device,
            buf: [0; RECORD_SIZE + 1],
        })
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Drain pending reports into `mouse`. Returns the number of reports processed.
    ///
    /// # Errors
    /// [`Error::HidRead`] if the read fails (typically the device was unplugged).
    pub fn poll(&mut self, mouse: &mut Softmouse3D) -> Result<usize> {
        let mut records = Vec::new();
        while records.len() < MAX_REPORTS_PER_TICK {
            let n = self.raw.read(&mut self.buf).map_err(|source| Error::HidRead {
                device: self.id,
                source,
            })?;
            if n == 0 {
                break;
            }
            #[cfg(feature = "debug-log")]
            log::trace!("{} read {n} bytes: {:02x?}", self.id, &self.buf[..n]);

            match parse_report(&self.buf[..n]) {
                Some(r) => records.push(r),
                None => log::trace!("{}: ignoring {n}-byte report", self.id),
            }
        }
        mouse.process_input(self.id, &records);
        Ok(records.len())
    }
}

/// Parse one read, dropping a leading report id if the platform prepended one.
fn parse_report(bytes: &[u8]) -> Option<RawRecord> {
    match bytes.len() {
        RECORD_SIZE => RawRecord::parse(bytes),
        n if n == RECORD_SIZE + 1 => RawRecord::parse(&bytes[1..]),
        _ => None,
    }
}

/// Stable id for a device path within this process.
fn device_id_for_path(path: &str) -> DeviceId {
    let mut h = DefaultHasher::new();
    path.hash(&mut h);
    DeviceId(h.finish())
}

/// Open every softmouse 3D currently attached.
pub fn probe_devices(api: &HidApi) -> Vec<HidSoftmouse> {
    api.device_list()
        .filter_map(|info| HidSoftmouse::open(info, api))
        .collect()
}

/// Create a `HidApi` and open every softmouse 3D.
pub fn discover() -> Result<(HidApi, Vec<HidSoftmouse>)> {
    let api = HidApi::new().map_err(Error::HidInit)?;
    let devices = probe_devices(&api);
    log::info!("discovered {} softmouse 3D device(s)", devices.len());
    Ok((api, devices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ids_are_stable_and_distinct() {
        assert_eq!(device_id_for_path("a"), device_id_for_path("a"));
        assert_ne!(device_id_for_path("a"), device_id_for_path("b"));
    }

    #[test]
    fn report_id_prefix_is_stripped() {
        let record = RawRecord::new(0x0001_2000, -1, 2, 0);
        let bytes = record.to_bytes();
        assert_eq!(parse_report(&bytes), Some(record));

        let mut prefixed = vec![0x01];
        prefixed.extend_from_slice(&bytes);
        assert_eq!(parse_report(&prefixed), Some(record));

        assert_eq!(parse_report(&bytes[..RECORD_SIZE - 1]), None);
        assert_eq!(parse_report(&[0; RECORD_SIZE + 2]), None);
    }
}
