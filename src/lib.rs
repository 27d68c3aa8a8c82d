//! softmouse3d: input processing for the GGS softmouse 3D.
//!
//! Turns the device's raw reports (a 32-bit button mask plus x/y/z deltas) into
//! application-facing events: motion, wheel, button down/up, click and double-click.
//!
//! - [`report`] decodes `WM_INPUT` / HID report bytes.
//! - [`buttons`] folds the device's shift+action codes into ten canonical buttons.
//! - [`classifier`] is the per-button click/double-click state machine.
//! - [`Softmouse3D`] ties it together with a per-device [`state`] store and the
//!   listener registry in [`eventbus`].
//! - [`Softmouse3DStateless`] forwards reports as they are, without click tracking.

pub mod backends;
pub mod buttons;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod processor;
pub mod report;
pub mod state;
pub mod stateless;

pub use buttons::{canonicalize, Button, ButtonSet};
pub use config::ClickConfig;
pub use device::{is_softmouse3d, DeviceDescriptor, DeviceId, DeviceKind};
pub use error::{Error, Result};
pub use event::{EventKind, InputEvent, InputKind};
pub use eventbus::{EventFilter, InputEventBus, InputListener, ListenerId};
pub use filtered_listener::FilteredListener;
pub use logger::Logger;
pub use processor::Softmouse3D;
pub use report::{decode_raw_input, RawInputLayout, RawInputMessage, RawRecord};
pub use stateless::{RawInput, Softmouse3DStateless};
