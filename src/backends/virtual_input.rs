//! Synthetic softmouse 3D.
//!
//! [`VirtualSoftmouse`] keeps a raw button mask and produces the reports a real device
//! would send. It is meant for tests, demos and replaying recorded sessions.

use crate::buttons::{Button, ButtonSet, SL_ACTION_MASK, SL_SR_ACTION_MASK, SR_ACTION_MASK};
use crate::device::DeviceId;
use crate::report::{encode_raw_input, RawInputLayout, RawRecord};

#[derive(Debug, Clone, Default)]
pub struct VirtualSoftmouse {
    id: DeviceId,
    held: ButtonSet,
    pending: Vec<RawRecord>,
}

impl VirtualSoftmouse {
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Raw mask for the currently held buttons, encoded the way the device does it:
    /// actions pressed together with a shift button use the combination nibble.
    pub fn raw_buttons(&self) -> u32 {
        let actions = self.held.bits() & crate::buttons::ACTION_MASK;
        let sl = self.held.contains(ButtonSet::SL);
        let sr = self.held.contains(ButtonSet::SR);
        let (shift, mask) = match (sl, sr) {
            (false, false) => return self.held.bits(),
            (true, false) => (4, SL_ACTION_MASK),
            (false, true) => (8, SR_ACTION_MASK),
            (true, true) => (12, SL_SR_ACTION_MASK),
        };
        (self.held.bits() & !crate::buttons::ACTION_MASK) | ((actions << shift) & mask)
    }

    fn push(&mut self, dx: i8, dy: i8, dz: i8) -> &mut Self {
        let buttons = self.raw_buttons();
        self.pending.push(RawRecord::new(buttons, dx, dy, dz));
        self
    }

    pub fn press(&mut self, button: Button) -> &mut Self {
        self.held.insert(button.flag());
        self.push(0, 0, 0)
    }

    pub fn release(&mut self, button: Button) -> &mut Self {
        self.held.remove(button.flag());
        self.push(0, 0, 0)
    }

    /// Report x/y motion with the current buttons held.
    pub fn move_by(&mut self, dx: i8, dy: i8) -> &mut Self {
        self.push(dx, dy, 0)
    }

    pub fn wheel(&mut self, dz: i8) -> &mut Self {
        self.push(0, 0, dz)
    }

    /// Report arbitrary deltas with the current buttons held.
    pub fn report(&mut self, dx: i8, dy: i8, dz: i8) -> &mut Self {
        self.push(dx, dy, dz)
    }

    /// Drain the queued reports.
    pub fn take(&mut self) -> Vec<RawRecord> {
        std::mem::take(&mut self.pending)
    }

    /// Drain the queued reports as a single `RAWINPUT` buffer.
    pub fn take_raw(&mut self, layout: RawInputLayout) -> Vec<u8> {
        let records = self.take();
        encode_raw_input(self.id, &records, layout)
    }
}
