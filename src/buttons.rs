//! Canonical buttons of a softmouse 3D device.
//!
//! ```text
//!           ____
//!       __D2    D3__
//!   ___/     A1     \___
//!  /       A2  A4       \
//! |     SL   A3   SR     |
//! +-------D1____D4-------+
//! ```
//!
//! The device reports a 32-bit mask. Besides the plain button bits it encodes
//! "shift + action" combinations in three higher nibbles. [`canonicalize`] folds
//! those back onto `A1..A4` so that every button can be tracked independently.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of canonical buttons (and, for raw masks, any extra bits the device sent).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ButtonSet: u32 {
        /// Bottom-left.
        const D1 = 0x0000_0400;
        /// Top-left.
        const D2 = 0x0000_0100;
        /// Top-right.
        const D3 = 0x0000_0200;
        /// Bottom-right.
        const D4 = 0x0000_0800;
        /// Shift-left.
        const SL = 0x0000_2000;
        /// Shift-right.
        const SR = 0x0000_1000;
        /// North.
        const A1 = 0x0001_0000;
        /// West.
        const A2 = 0x0002_0000;
        /// South.
        const A3 = 0x0008_0000;
        /// East.
        const A4 = 0x0004_0000;
    }
}

/// Bits occupied by the plain action buttons `A1..A4`.
pub const ACTION_MASK: u32 = 0x000F_0000;
/// Action nibble reported while `SL` is held.
pub const SL_ACTION_MASK: u32 = ACTION_MASK << SL_ACTION_SHIFT;
/// Action nibble reported while `SR` is held.
pub const SR_ACTION_MASK: u32 = ACTION_MASK << SR_ACTION_SHIFT;
/// Action nibble reported while both `SL` and `SR` are held.
pub const SL_SR_ACTION_MASK: u32 = ACTION_MASK << SL_SR_ACTION_SHIFT;

const SL_ACTION_SHIFT: u32 = 4;
const SR_ACTION_SHIFT: u32 = 8;
const SL_SR_ACTION_SHIFT: u32 = 12;

/// One of the ten canonical buttons.
///
/// The discriminant is the button's slot in per-device click tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Button {
    D1 = 0,
    D2 = 1,
    D3 = 2,
    D4 = 3,
    SL = 4,
    SR = 5,
    A1 = 6,
    A2 = 7,
    A3 = 8,
    A4 = 9,
}

/// Number of canonical buttons (and click-tracking slots per device).
pub const BUTTON_COUNT: usize = 10;

impl Button {
    /// All buttons in slot order.
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::D1,
        Button::D2,
        Button::D3,
        Button::D4,
        Button::SL,
        Button::SR,
        Button::A1,
        Button::A2,
        Button::A3,
        Button::A4,
    ];

    /// The shift buttons, in transition order.
    pub const MODIFIERS: [Button; 2] = [Button::SL, Button::SR];

    /// Every non-modifier button, in transition order.
    pub const ACTIONS: [Button; 8] = [
        Button::D1,
        Button::D2,
        Button::D3,
        Button::D4,
        Button::A1,
        Button::A2,
        Button::A3,
        Button::A4,
    ];

    /// Click-tracking slot index.
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// The flag this button occupies in a [`ButtonSet`].
    pub fn flag(self) -> ButtonSet {
        match self {
            Button::D1 => ButtonSet::D1,
            Button::D2 => ButtonSet::D2,
            Button::D3 => ButtonSet::D3,
            Button::D4 => ButtonSet::D4,
            Button::SL => ButtonSet::SL,
            Button::SR => ButtonSet::SR,
            Button::A1 => ButtonSet::A1,
            Button::A2 => ButtonSet::A2,
            Button::A3 => ButtonSet::A3,
            Button::A4 => ButtonSet::A4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::D1 => "D1",
            Button::D2 => "D2",
            Button::D3 => "D3",
            Button::D4 => "D4",
            Button::SL => "SL",
            Button::SR => "SR",
            Button::A1 => "A1",
            Button::A2 => "A2",
            Button::A3 => "A3",
            Button::A4 => "A4",
        }
    }
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ButtonSet {
    /// Canonical buttons contained in this set, in slot order.
    pub fn buttons(self) -> impl Iterator<Item = Button> {
        Button::ALL
            .into_iter()
            .filter(move |b| self.contains(b.flag()))
    }

    #[inline]
    pub fn is_pressed(self, button: Button) -> bool {
        self.contains(button.flag())
    }
}

/// Fold a raw device mask into the canonical button set.
///
/// Plain bits are taken as-is; the three combination nibbles are shifted down onto
/// `A1..A4`. A non-empty combination nibble also implies the shift button(s) it was
/// reported under. Unknown bits are dropped.
pub fn canonicalize(raw: u32) -> ButtonSet {
    let mut folded = raw
        | ((raw & SL_ACTION_MASK) >> SL_ACTION_SHIFT)
        | ((raw & SR_ACTION_MASK) >> SR_ACTION_SHIFT)
        | ((raw & SL_SR_ACTION_MASK) >> SL_SR_ACTION_SHIFT);
    if raw & (SL_ACTION_MASK | SL_SR_ACTION_MASK) != 0 {
        folded |= ButtonSet::SL.bits();
    }
    if raw & (SR_ACTION_MASK | SL_SR_ACTION_MASK) != 0 {
        folded |= ButtonSet::SR.bits();
    }
    ButtonSet::from_bits_truncate(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bits_pass_through() {
        let raw = ButtonSet::D1.bits() | ButtonSet::SR.bits() | ButtonSet::A3.bits();
        assert_eq!(
            canonicalize(raw),
            ButtonSet::D1 | ButtonSet::SR | ButtonSet::A3
        );
    }

    #[test]
    fn shift_left_combination_folds_onto_action() {
        let raw = ButtonSet::SL.bits() | (ButtonSet::A1.bits() << 4);
        assert_eq!(canonicalize(raw), ButtonSet::SL | ButtonSet::A1);

        let raw = ButtonSet::A1.bits() | ButtonSet::SL.bits() | (ButtonSet::A1.bits() << 4);
        assert_eq!(canonicalize(raw), ButtonSet::SL | ButtonSet::A1);
    }

    #[test]
    fn shift_right_combination_folds_onto_action() {
        let raw = ButtonSet::SR.bits() | (ButtonSet::A4.bits() << 8);
        assert_eq!(canonicalize(raw), ButtonSet::SR | ButtonSet::A4);
    }

    #[test]
    fn both_shifts_combination_folds_onto_action() {
        let raw = ButtonSet::SL.bits() | ButtonSet::SR.bits() | (ButtonSet::A2.bits() << 12);
        assert_eq!(
            canonicalize(raw),
            ButtonSet::SL | ButtonSet::SR | ButtonSet::A2
        );
    }

    #[test]
    fn combination_code_implies_its_modifier() {
        let a1 = ButtonSet::A1.bits();
        assert_eq!(canonicalize(a1 | (a1 << 4)), ButtonSet::A1 | ButtonSet::SL);
        assert_eq!(canonicalize(a1 | (a1 << 8)), ButtonSet::A1 | ButtonSet::SR);
        assert_eq!(
            canonicalize(a1 | (a1 << 12)),
            ButtonSet::A1 | ButtonSet::SL | ButtonSet::SR
        );
        assert_eq!(
            canonicalize(ButtonSet::A3.bits() << 4),
            ButtonSet::A3 | ButtonSet::SL
        );
    }

    #[test]
    fn unknown_bits_are_dropped() {
        assert_eq!(canonicalize(0x0000_00FF), ButtonSet::empty());
    }

    #[test]
    fn slots_follow_declaration_order() {
        for (i, b) in Button::ALL.iter().enumerate() {
            assert_eq!(b.slot(), i);
        }
        let set = ButtonSet::A4 | ButtonSet::D2;
        assert_eq!(set.buttons().collect::<Vec<_>>(), vec![Button::D2, Button::A4]);
    }
}
