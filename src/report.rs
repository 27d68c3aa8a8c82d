//! Report decoding.
//!
//! A softmouse 3D report is a fixed 7-byte record:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | button mask (`u32`, little endian) |
//! | 4 | 1 | x delta (`i8`) |
//! | 5 | 1 | y delta (`i8`) |
//! | 6 | 1 | z delta / wheel (`i8`) |
//!
//! `WM_INPUT` delivers these inside a `RAWINPUT` buffer: a `RAWINPUTHEADER`, the
//! `RAWHID` prefix (`dwSizeHid`, `dwCount`) and then `dwCount` records back to back.
//! [`decode_raw_input`] reads that buffer with explicit offsets. Anything that does not
//! look like a softmouse 3D message is skipped (`None`), never reported as an error:
//! foreign messages reaching a shared handler are expected.

use crate::device::DeviceId;

/// Size in bytes of one report.
pub const RECORD_SIZE: usize = 7;

/// Size of the `RAWHID` prefix (`dwSizeHid` + `dwCount`) preceding the reports.
pub const RAWHID_PREFIX_SIZE: usize = 8;

/// `RIM_TYPEHID`.
const RIM_TYPE_HID: u32 = 2;

/// One decoded report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawRecord {
    /// Raw button mask (not canonicalized).
    pub buttons: u32,
    pub dx: i8,
    pub dy: i8,
    pub dz: i8,
}

impl RawRecord {
    pub fn new(buttons: u32, dx: i8, dy: i8, dz: i8) -> Self {
        Self { buttons, dx, dy, dz }
    }

    /// Parse exactly one report. Returns `None` if `bytes` is not [`RECORD_SIZE`] long.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; RECORD_SIZE] = bytes.try_into().ok()?;
        Some(Self {
            buttons: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            dx: bytes[4] as i8,
            dy: bytes[5] as i8,
            dz: bytes[6] as i8,
        })
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let b = self.buttons.to_le_bytes();
        [b[0], b[1], b[2], b[3], self.dx as u8, self.dy as u8, self.dz as u8]
    }
}

/// Shape of the `RAWINPUTHEADER` in front of the HID payload.
///
/// `hDevice` and `wParam` are pointer sized, so the header is 16 bytes for 32-bit and
/// 24 bytes for 64-bit processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputLayout {
    /// Width of a handle in bytes (4 or 8).
    pub handle_size: usize,
}

impl RawInputLayout {
    pub const WIN32: RawInputLayout = RawInputLayout { handle_size: 4 };
    pub const WIN64: RawInputLayout = RawInputLayout { handle_size: 8 };

    /// Layout of the current process.
    pub const fn native() -> Self {
        RawInputLayout {
            handle_size: core::mem::size_of::<usize>(),
        }
    }

    /// `sizeof(RAWINPUTHEADER)`.
    pub const fn header_size(&self) -> usize {
        8 + 2 * self.handle_size
    }

    /// Offset of the first report.
    pub const fn records_offset(&self) -> usize {
        self.header_size() + RAWHID_PREFIX_SIZE
    }
}

impl Default for RawInputLayout {
    fn default() -> Self {
        Self::native()
    }
}

/// A decoded `WM_INPUT` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputMessage {
    pub device: DeviceId,
    pub records: Vec<RawRecord>,
}

fn read_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_handle(buf: &[u8], offset: usize, size: usize) -> Option<u64> {
    let bytes = buf.get(offset..offset + size)?;
    let mut wide = [0u8; 8];
    wide[..size].copy_from_slice(bytes);
    Some(u64::from_le_bytes(wide))
}

/// Decode a `RAWINPUT` buffer carrying softmouse 3D reports.
///
/// The whole message is discarded (`None`) if the header is not a HID header, if its
/// declared size cannot hold at least one report, if `dwSizeHid` is not
/// [`RECORD_SIZE`], or if the buffer is too short for `dwCount` reports.
pub fn decode_raw_input(buf: &[u8], layout: RawInputLayout) -> Option<RawInputMessage> {
    let header_size = layout.header_size();
    if !matches!(layout.handle_size, 4 | 8) || buf.len() < header_size + RAWHID_PREFIX_SIZE {
        log::trace!("raw input: buffer too short ({} bytes)", buf.len());
        return None;
    }

    let dw_type = read_u32(buf, 0)?;
    let dw_size = read_u32(buf, 4)? as usize;
    let device = DeviceId(read_handle(buf, 8, layout.handle_size)?);

    if dw_type != RIM_TYPE_HID {
        log::trace!("raw input: ignoring non-HID message (type {dw_type})");
        return None;
    }

    let size_hid = read_u32(buf, header_size)? as usize;
    let count = read_u32(buf, header_size + 4)? as usize;

    if dw_size < layout.records_offset() + RECORD_SIZE || size_hid != RECORD_SIZE {
        log::trace!(
            "raw input: ignoring {device}: dwSize={dw_size} dwSizeHid={size_hid}"
        );
        return None;
    }

    let start = layout.records_offset();
    let end = count
        .checked_mul(RECORD_SIZE)
        .and_then(|n| n.checked_add(start))?;
    let Some(payload) = buf.get(start..end) else {
        log::trace!(
            "raw input: ignoring {device}: {count} report(s) do not fit in {} bytes",
            buf.len()
        );
        return None;
    };

    #[cfg(feature = "debug-log")]
    log::trace!("raw input: {device} payload {:02x?}", payload);

    let records = payload
        .chunks_exact(RECORD_SIZE)
        .filter_map(RawRecord::parse)
        .collect();

    Some(RawInputMessage { device, records })
}

/// Build a `RAWINPUT` buffer for `records`. Inverse of [`decode_raw_input`].
pub fn encode_raw_input(device: DeviceId, records: &[RawRecord], layout: RawInputLayout) -> Vec<u8> {
    let total = layout.records_offset() + records.len() * RECORD_SIZE;
    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&RIM_TYPE_HID.to_le_bytes());
    buf.extend_from_slice(&(total as u32).to_le_bytes());
    buf.extend_from_slice(&device.0.to_le_bytes()[..layout.handle_size]);
    buf.extend(std::iter::repeat(0u8).take(layout.handle_size)); // wParam
    buf.extend_from_slice(&(RECORD_SIZE as u32).to_le_bytes());
    buf.extend_from_slice(&(records.len() as u32).to_le_bytes());
    for r in records {
        buf.extend_from_slice(&r.to_bytes());
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_little_endian_mask_and_signed_deltas() {
        let r = RawRecord::parse(&[0x00, 0x04, 0x01, 0x00, 0xFD, 0x02, 0xFF]).unwrap();
        assert_eq!(r.buttons, 0x0001_0400);
        assert_eq!((r.dx, r.dy, r.dz), (-3, 2, -1));
        assert!(RawRecord::parse(&[0; 6]).is_none());
        assert!(RawRecord::parse(&[0; 8]).is_none());
    }

    #[test]
    fn header_sizes_match_windows() {
        assert_eq!(RawInputLayout::WIN32.header_size(), 16);
        assert_eq!(RawInputLayout::WIN64.header_size(), 24);
        assert_eq!(RawInputLayout::WIN64.records_offset(), 32);
    }

    #[test]
    fn decodes_every_record_in_order() {
        let records = [
            RawRecord::new(0x0001_0000, 1, 0, 0),
            RawRecord::new(0, -2, 3, 1),
        ];
        for layout in [RawInputLayout::WIN32, RawInputLayout::WIN64] {
            let buf = encode_raw_input(DeviceId(0xABCD), &records, layout);
            let msg = decode_raw_input(&buf, layout).unwrap();
            assert_eq!(msg.device, DeviceId(0xABCD));
            assert_eq!(msg.records, records);
        }
    }

    #[test]
    fn wrong_report_size_is_skipped() {
        let layout = RawInputLayout::WIN64;
        let mut buf = encode_raw_input(DeviceId(1), &[RawRecord::default()], layout);
        buf[layout.header_size()] = 8;
        assert!(decode_raw_input(&buf, layout).is_none());
    }

    #[test]
    fn undersized_declared_total_is_skipped() {
        let layout = RawInputLayout::WIN64;
        let mut buf = encode_raw_input(DeviceId(1), &[RawRecord::default()], layout);
        let short = (layout.records_offset() + RECORD_SIZE - 1) as u32;
        buf[4..8].copy_from_slice(&short.to_le_bytes());
        assert!(decode_raw_input(&buf, layout).is_none());
    }

    #[test]
    fn truncated_buffer_is_skipped_entirely() {
        let layout = RawInputLayout::WIN64;
        let records = [RawRecord::default(), RawRecord::default()];
        let buf = encode_raw_input(DeviceId(1), &records, layout);
        assert!(decode_raw_input(&buf[..buf.len() - 1], layout).is_none());
        assert!(decode_raw_input(&buf[..10], layout).is_none());
    }

    #[test]
    fn non_hid_message_is_skipped() {
        let layout = RawInputLayout::WIN64;
        let mut buf = encode_raw_input(DeviceId(1), &[RawRecord::default()], layout);
        buf[0] = 0; // RIM_TYPEMOUSE
        assert!(decode_raw_input(&buf, layout).is_none());
    }
}
