//! Events emitted by the processor.
//!
//! Every event carries the device it came from and a snapshot of the canonical button
//! set at the time of the report. Motion and wheel share a payload shape: a motion event
//! has `dz == 0`, a wheel event has `dx == dy == 0`.
//!
//! ## Click counts
//! - `ButtonDown`: the position of this press in the current click sequence (1 or 2).
//! - `ButtonUp`: always 1.
//! - `ButtonClick`: always 1.
//! - `ButtonDoubleClick`: always 2.

use crate::buttons::{Button, ButtonSet};
use crate::device::DeviceId;
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    /// The device moved in the x/y plane.
    Motion { dx: i32, dy: i32, dz: i32 },
    /// The device was pushed or pulled along z.
    Wheel { dx: i32, dy: i32, dz: i32 },
    ButtonDown { button: Button, clicks: u32 },
    ButtonUp { button: Button, clicks: u32 },
    ButtonClick { button: Button, clicks: u32 },
    ButtonDoubleClick { button: Button, clicks: u32 },
}

/// Discriminant of [`InputKind`], used for listener filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Motion,
    Wheel,
    ButtonDown,
    ButtonUp,
    ButtonClick,
    ButtonDoubleClick,
}

impl InputKind {
    pub fn kind(&self) -> EventKind {
        match self {
            InputKind::Motion { .. } => EventKind::Motion,
            InputKind::Wheel { .. } => EventKind::Wheel,
            InputKind::ButtonDown { .. } => EventKind::ButtonDown,
            InputKind::ButtonUp { .. } => EventKind::ButtonUp,
            InputKind::ButtonClick { .. } => EventKind::ButtonClick,
            InputKind::ButtonDoubleClick { .. } => EventKind::ButtonDoubleClick,
        }
    }

    /// The button for button events, `None` for motion/wheel.
    pub fn button(&self) -> Option<Button> {
        match *self {
            InputKind::ButtonDown { button, .. }
            | InputKind::ButtonUp { button, .. }
            | InputKind::ButtonClick { button, .. }
            | InputKind::ButtonDoubleClick { button, .. } => Some(button),
            InputKind::Motion { .. } | InputKind::Wheel { .. } => None,
        }
    }
}

/// An event together with its origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub device: DeviceId,
    /// Canonical buttons held when the report arrived.
    pub buttons: ButtonSet,
    pub kind: InputKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_device_and_buttons() {
        let ev = InputEvent {
            device: DeviceId(7),
            buttons: ButtonSet::A1,
            kind: InputKind::ButtonDown {
                button: Button::A1,
                clicks: 1,
            },
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["device"], 7);
        assert_eq!(json["kind"]["ButtonDown"]["button"], "A1");
        assert_eq!(json["kind"]["ButtonDown"]["clicks"], 1);
    }

    #[test]
    fn kind_and_button_accessors() {
        let wheel = InputKind::Wheel { dx: 0, dy: 0, dz: -1 };
        assert_eq!(wheel.kind(), EventKind::Wheel);
        assert_eq!(wheel.button(), None);
        let up = InputKind::ButtonUp {
            button: Button::SR,
            clicks: 1,
        };
        assert_eq!(up.kind(), EventKind::ButtonUp);
        assert_eq!(up.button(), Some(Button::SR));
    }
}
