//! Stateful softmouse 3D input processor.
//!
//! [`Softmouse3D`] owns the per-device state, the click classifier and the listener
//! registry. Feed it reports, either already decoded ([`Softmouse3D::process_input`])
//! or as a raw `WM_INPUT` buffer ([`Softmouse3D::process_raw`]), and it calls the
//! registered listeners.
//!
//! The processor is single-threaded by design: all calls must come from one thread
//! (typically the one pumping window messages). Wrap it in a lock if several threads
//! need to feed it.
//!
//! # Example
//! ```
//! use softmouse3d::{RawRecord, Softmouse3D, DeviceId};
//!
//! let mut mouse = Softmouse3D::new();
//! mouse.events_mut().on_button_click(|e| println!("click {:?}", e.kind.button()));
//!
//! let a1 = 0x0001_0000;
//! mouse.process_input(DeviceId(1), &[RawRecord::new(a1, 0, 0, 0)]);
//! mouse.process_input(DeviceId(1), &[RawRecord::new(0, 0, 0, 0)]);
//! ```

use crate::classifier::ClickClassifier;
use crate::config::ClickConfig;
use crate::device::DeviceId;
use crate::event::InputEvent;
use crate::eventbus::InputEventBus;
use crate::report::{decode_raw_input, RawInputLayout, RawRecord};
use crate::state::{DeviceState, DeviceStore};
use std::time::Instant;

#[derive(Default)]
pub struct Softmouse3D {
    store: DeviceStore,
    classifier: ClickClassifier,
    bus: InputEventBus,
    layout: RawInputLayout,
}

impl Softmouse3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClickConfig) -> Self {
        Self {
            classifier: ClickClassifier::new(config),
            ..Self::default()
        }
    }

    /// Override the `RAWINPUTHEADER` shape used by [`Self::process_raw`].
    pub fn with_layout(mut self, layout: RawInputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> &ClickConfig {
        self.classifier.config()
    }

    pub fn set_config(&mut self, config: ClickConfig) {
        self.classifier.set_config(config);
    }

    /// Listener registry (`on_motion`, `on_button_click`, ...).
    pub fn events_mut(&mut self) -> &mut InputEventBus {
        &mut self.bus
    }

    pub fn device_state(&self, device: DeviceId) -> Option<&DeviceState> {
        self.store.get(device)
    }

    pub fn device_count(&self) -> usize {
        self.store.len()
    }

    /// Forget everything known about `device`. The next report starts from scratch.
    pub fn forget_device(&mut self, device: DeviceId) -> bool {
        self.store.forget(device)
    }

    /// Forget every device.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Process reports from `device`, timestamped now.
    pub fn process_input(&mut self, device: DeviceId, records: &[RawRecord]) {
        self.process_input_at(device, records, Instant::now());
    }

    /// Process reports from `device` as if they arrived at `now`.
    ///
    /// Does nothing when no listener is enabled.
    pub fn process_input_at(&mut self, device: DeviceId, records: &[RawRecord], now: Instant) {
        if !self.bus.has_listeners() {
            return;
        }
        let events = self.classify(device, records, now);
        self.bus.emit_all(&events);
    }

    /// Like [`Self::process_input_at`] but returns the events instead of dispatching them.
    /// Always runs, with or without listeners.
    pub fn process_input_collect(
        &mut self,
        device: DeviceId,
        records: &[RawRecord],
        now: Instant,
    ) -> Vec<InputEvent> {
        self.classify(device, records, now)
    }

    /// Decode a `RAWINPUT` buffer and process its reports.
    ///
    /// Buffers that are not softmouse 3D messages are ignored. Returns the number of
    /// reports processed.
    pub fn process_raw(&mut self, buf: &[u8]) -> usize {
        self.process_raw_at(buf, Instant::now())
    }

    pub fn process_raw_at(&mut self, buf: &[u8], now: Instant) -> usize {
        if !self.bus.has_listeners() {
            return 0;
        }
        let Some(msg) = decode_raw_input(buf, self.layout) else {
            return 0;
        };
        self.process_input_at(msg.device, &msg.records, now);
        msg.records.len()
    }

    /// Read and process a `WM_INPUT` message.
    ///
    /// # Errors
    /// [`Error::RawInputRead`](crate::error::Error::RawInputRead) if the OS buffer could
    /// not be read.
    #[cfg(target_os = "windows")]
    pub fn process_wm_input(&mut self, lparam: isize) -> crate::error::Result<usize> {
        if !self.bus.has_listeners() {
            return Ok(0);
        }
        let now = Instant::now();
        let buf = crate::backends::windows::raw_input::read_wm_input(lparam)?;
        Ok(self.process_raw_at(&buf, now))
    }

    fn classify(
        &mut self,
        device: DeviceId,
        records: &[RawRecord],
        now: Instant,
    ) -> Vec<InputEvent> {
        let state = self.store.get_or_create(device);
        let mut events = Vec::new();
        for record in records {
            self.classifier
                .classify(device, state, record, now, &mut events);
        }
        events
    }
}
