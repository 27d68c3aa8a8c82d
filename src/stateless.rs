//! Stateless softmouse 3D processor.
//!
//! [`Softmouse3DStateless`] raises exactly one [`RawInput`] per report, carrying the
//! deltas and the **unmodified** button mask (no combination folding, no click
//! tracking). Use it when the application does its own button logic.

use crate::buttons::ButtonSet;
use crate::device::DeviceId;
use crate::report::{decode_raw_input, RawInputLayout, RawRecord};
use serde::{Deserialize, Serialize};

/// One report as delivered by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub device: DeviceId,
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
    /// Raw mask; may contain combination bits outside the canonical flags.
    pub buttons: ButtonSet,
}

type Handler = Box<dyn FnMut(&RawInput) + Send>;

#[derive(Default)]
pub struct Softmouse3DStateless {
    handlers: Vec<Handler>,
    layout: RawInputLayout,
}

impl Softmouse3DStateless {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: RawInputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn on_input(&mut self, f: impl FnMut(&RawInput) + Send + 'static) {
        self.handlers.push(Box::new(f));
    }

    pub fn process_input(&mut self, device: DeviceId, records: &[RawRecord]) {
        if self.handlers.is_empty() {
            return;
        }
        for r in records {
            let input = RawInput {
                device,
                dx: r.dx as i32,
                dy: r.dy as i32,
                dz: r.dz as i32,
                buttons: ButtonSet::from_bits_retain(r.buttons),
            };
            for h in self.handlers.iter_mut() {
                h(&input);
            }
        }
    }

    /// Decode a `RAWINPUT` buffer and raise one event per report.
    pub fn process_raw(&mut self, buf: &[u8]) -> usize {
        if self.handlers.is_empty() {
            return 0;
        }
        match decode_raw_input(buf, self.layout) {
            Some(msg) => {
                self.process_input(msg.device, &msg.records);
                msg.records.len()
            }
            None => 0,
        }
    }

    #[cfg(target_os = "windows")]
    pub fn process_wm_input(&mut self, lparam: isize) -> crate::error::Result<usize> {
        if self.handlers.is_empty() {
            return Ok(0);
        }
        let buf = crate::backends::windows::raw_input::read_wm_input(lparam)?;
        Ok(self.process_raw(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::encode_raw_input;
    use std::sync::{Arc, Mutex};

    #[test]
    fn one_event_per_record_with_raw_mask() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let mut p = Softmouse3DStateless::new().with_layout(RawInputLayout::WIN64);
        p.on_input(move |i| s.lock().unwrap().push(*i));

        let combo = 0x0000_2000 | (0x0001_0000 << 4);
        let buf = encode_raw_input(
            DeviceId(9),
            &[RawRecord::new(combo, 1, -1, 0), RawRecord::new(0, 0, 0, 2)],
            RawInputLayout::WIN64,
        );
        assert_eq!(p.process_raw(&buf), 2);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].buttons.bits(), combo);
        assert_eq!((seen[0].dx, seen[0].dy, seen[0].dz), (1, -1, 0));
        assert_eq!(seen[1].dz, 2);
        assert!(seen.iter().all(|i| i.device == DeviceId(9)));
    }

    #[test]
    fn skips_work_without_handlers() {
        let mut p = Softmouse3DStateless::new().with_layout(RawInputLayout::WIN64);
        let buf = encode_raw_input(DeviceId(1), &[RawRecord::default()], RawInputLayout::WIN64);
        assert_eq!(p.process_raw(&buf), 0);
    }
}
