//! Per-device button and click-tracking state.

use crate::buttons::{Button, ButtonSet, BUTTON_COUNT};
use crate::device::DeviceId;
use std::collections::HashMap;
use std::time::Instant;

/// Click sequence of one button on one device.
///
/// `clicks` is 0 when idle, 1 after the first press (and its release), 2 once a second
/// press arrived within budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonClickState {
    /// Motion accumulated while waiting for the second press.
    pub move_x: i32,
    pub move_y: i32,
    pub clicks: u32,
    /// First press of the current sequence.
    pub down_at: Option<Instant>,
}

impl ButtonClickState {
    pub fn is_idle(&self) -> bool {
        self.clicks == 0
    }

    /// Start a fresh sequence at `now`.
    pub(crate) fn begin(&mut self, now: Instant) {
        self.down_at = Some(now);
        self.move_x = 0;
        self.move_y = 0;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything tracked for one device.
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    /// Canonical buttons of the last processed report.
    pub buttons: ButtonSet,
    click_states: [ButtonClickState; BUTTON_COUNT],
}

impl DeviceState {
    pub fn click_state(&self, button: Button) -> &ButtonClickState {
        &self.click_states[button.slot()]
    }

    pub fn click_state_mut(&mut self, button: Button) -> &mut ButtonClickState {
        &mut self.click_states[button.slot()]
    }
}

/// Owned map `DeviceId → DeviceState`.
///
/// Entries are created on first use and live until [`DeviceStore::forget`] or
/// [`DeviceStore::clear`]; nothing is evicted automatically.
#[derive(Debug, Default)]
pub struct DeviceStore {
    devices: HashMap<DeviceId, DeviceState>,
}

impl DeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, id: DeviceId) -> &mut DeviceState {
        self.devices.entry(id).or_insert_with(|| {
            log::debug!("tracking new device {id}");
            DeviceState::default()
        })
    }

    pub fn get(&self, id: DeviceId) -> Option<&DeviceState> {
        self.devices.get(&id)
    }

    /// Drop the state of a device (e.g. after it was unplugged).
    /// Returns whether the device was known.
    pub fn forget(&mut self, id: DeviceId) -> bool {
        let known = self.devices.remove(&id).is_some();
        if known {
            log::debug!("forgot device {id}");
        }
        known
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn clear(&mut self) {
        self.devices.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.devices.keys().copied()
    }
}
