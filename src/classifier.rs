//! Click classification.
//!
//! For every report the classifier:
//!
//! 1. feeds x/y motion into each released button that has an open first click, and
//!    aborts the sequence if it moved too far or waited too long,
//! 2. emits motion and wheel events,
//! 3. compares the canonical buttons with the previous report,
//! 4. handles `SL`/`SR` presses,
//! 5. handles presses and releases of the eight other buttons,
//! 6. handles `SL`/`SR` releases,
//! 7. remembers the new button set.
//!
//! Modifier presses come first and modifier releases last so that a chord such as
//! `SL + A1` always reads as "SL down, A1 down, A1 up, SL up" when both change in the
//! same report.
//!
//! A release with `clicks >= 2` is a double-click and ends the sequence. A release with
//! fewer clicks is a click and leaves the sequence open for a second press.

use crate::buttons::{canonicalize, Button};
use crate::config::ClickConfig;
use crate::device::DeviceId;
use crate::event::{InputEvent, InputKind};
use crate::report::RawRecord;
use crate::state::DeviceState;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct ClickClassifier {
    config: ClickConfig,
}

impl ClickClassifier {
    pub fn new(config: ClickConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ClickConfig) {
        self.config = config;
    }

    /// Run one report through `state`, appending the resulting events to `out`.
    pub fn classify(
        &self,
        device: DeviceId,
        state: &mut DeviceState,
        record: &RawRecord,
        now: Instant,
        out: &mut Vec<InputEvent>,
    ) {
        let buttons = canonicalize(record.buttons);
        let (dx, dy, dz) = (record.dx as i32, record.dy as i32, record.dz as i32);

        self.decay(device, state, dx, dy, now);

        let emit = |out: &mut Vec<InputEvent>, kind| {
            out.push(InputEvent {
                device,
                buttons,
                kind,
            })
        };

        if dx != 0 || dy != 0 {
            emit(out, InputKind::Motion { dx, dy, dz: 0 });
        }
        if dz != 0 {
            emit(out, InputKind::Wheel { dx: 0, dy: 0, dz });
        }

        let changed = buttons ^ state.buttons;
        if changed.is_empty() {
            return;
        }
        log::trace!("{device}: buttons {:?} -> {:?}", state.buttons, buttons);

        for button in Button::MODIFIERS {
            if changed.is_pressed(button) && buttons.is_pressed(button) {
                emit(out, press(state, button, now));
            }
        }

        for button in Button::ACTIONS {
            if !changed.is_pressed(button) {
                continue;
            }
            if buttons.is_pressed(button) {
                emit(out, press(state, button, now));
            } else {
                for kind in release(state, button) {
                    emit(out, kind);
                }
            }
        }

        for button in Button::MODIFIERS {
            if changed.is_pressed(button) && !buttons.is_pressed(button) {
                for kind in release(state, button) {
                    emit(out, kind);
                }
            }
        }

        state.buttons = buttons;
    }

    /// Accumulate motion into open, released sequences and abort those over budget.
    fn decay(&self, device: DeviceId, state: &mut DeviceState, dx: i32, dy: i32, now: Instant) {
        let held = state.buttons;
        let max_move = self.config.max_double_click_movement;
        let max_time = self.config.max_double_click_time();

        for button in Button::ALL {
            if held.is_pressed(button) {
                continue;
            }
            let cs = state.click_state_mut(button);
            if cs.clicks != 1 {
                continue;
            }
            cs.move_x = cs.move_x.saturating_add(dx);
            cs.move_y = cs.move_y.saturating_add(dy);

            let elapsed = cs
                .down_at
                .map(|at| now.saturating_duration_since(at))
                .unwrap_or_default();

            if cs.move_x.abs() > max_move || cs.move_y.abs() > max_move || elapsed > max_time {
                log::debug!(
                    "{device}: {button} double-click window closed (move={},{} after {:?})",
                    cs.move_x,
                    cs.move_y,
                    elapsed
                );
                cs.reset();
            }
        }
    }
}

fn press(state: &mut DeviceState, button: Button, now: Instant) -> InputKind {
    let cs = state.click_state_mut(button);
    if cs.is_idle() {
        cs.begin(now);
    }
    cs.clicks += 1;
    InputKind::ButtonDown {
        button,
        clicks: cs.clicks,
    }
}

fn release(state: &mut DeviceState, button: Button) -> [InputKind; 2] {
    let cs = state.click_state_mut(button);
    let completed = if cs.clicks < 2 {
        InputKind::ButtonClick { button, clicks: 1 }
    } else {
        // Third and later presses collapse into a double-click.
        cs.reset();
        InputKind::ButtonDoubleClick { button, clicks: 2 }
    };
    [completed, InputKind::ButtonUp { button, clicks: 1 }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::ButtonSet;
    use crate::state::ButtonClickState;
    use std::time::Duration;

    const DEV: DeviceId = DeviceId(1);

    fn run(
        c: &ClickClassifier,
        state: &mut DeviceState,
        records: &[(u32, i8, i8, i8, u64)],
        t0: Instant,
    ) -> Vec<InputKind> {
        let mut out = Vec::new();
        for &(buttons, dx, dy, dz, ms) in records {
            let r = RawRecord::new(buttons, dx, dy, dz);
            c.classify(DEV, state, &r, t0 + Duration::from_millis(ms), &mut out);
        }
        out.into_iter().map(|e| e.kind).collect()
    }

    const A1: u32 = 0x0001_0000;
    const SL: u32 = 0x0000_2000;

    #[test]
    fn press_starts_sequence_and_release_keeps_it_open() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        let t0 = Instant::now();
        run(&c, &mut state, &[(A1, 0, 0, 0, 0)], t0);
        let cs = *state.click_state(Button::A1);
        assert_eq!(cs.clicks, 1);
        assert_eq!(cs.down_at, Some(t0));

        run(&c, &mut state, &[(0, 0, 0, 0, 10)], t0);
        assert_eq!(state.click_state(Button::A1).clicks, 1);
        assert_eq!(state.buttons, ButtonSet::empty());
    }

    #[test]
    fn motion_is_only_accumulated_after_release() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        let t0 = Instant::now();
        run(&c, &mut state, &[(A1, 0, 0, 0, 0), (A1, 4, 4, 0, 5)], t0);
        assert_eq!(state.click_state(Button::A1).move_x, 0);

        run(&c, &mut state, &[(0, 0, 0, 0, 10), (0, 3, -2, 0, 20)], t0);
        let cs = state.click_state(Button::A1);
        assert_eq!((cs.move_x, cs.move_y), (3, -2));
    }

    #[test]
    fn exceeding_movement_aborts_the_open_sequence() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        let t0 = Instant::now();
        run(
            &c,
            &mut state,
            &[(A1, 0, 0, 0, 0), (0, 0, 0, 0, 10), (0, 0, 6, 0, 20)],
            t0,
        );
        assert_eq!(*state.click_state(Button::A1), ButtonClickState::default());
    }

    #[test]
    fn movement_equal_to_budget_is_tolerated() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        let t0 = Instant::now();
        run(
            &c,
            &mut state,
            &[(A1, 0, 0, 0, 0), (0, 0, 0, 0, 10), (0, -5, 5, 0, 20)],
            t0,
        );
        assert_eq!(state.click_state(Button::A1).clicks, 1);
    }

    #[test]
    fn modifier_chord_orders_modifier_outside_action() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        let t0 = Instant::now();
        let kinds = run(
            &c,
            &mut state,
            &[(SL | (A1 << 4), 0, 0, 0, 0), (0, 0, 0, 0, 50)],
            t0,
        );
        let sequence: Vec<_> = kinds.iter().map(|k| (k.kind(), k.button())).collect();
        use crate::event::EventKind::*;
        assert_eq!(
            sequence,
            vec![
                (ButtonDown, Some(Button::SL)),
                (ButtonDown, Some(Button::A1)),
                (ButtonClick, Some(Button::A1)),
                (ButtonUp, Some(Button::A1)),
                (ButtonClick, Some(Button::SL)),
                (ButtonUp, Some(Button::SL)),
            ]
        );
    }

    #[test]
    fn events_carry_current_canonical_set() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        let mut out = Vec::new();
        let r = RawRecord::new(SL | (A1 << 4), 1, 0, 0);
        c.classify(DEV, &mut state, &r, Instant::now(), &mut out);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|e| e.buttons == ButtonSet::SL | ButtonSet::A1));
    }

    #[test]
    fn third_press_collapses_into_double_click() {
        let c = ClickClassifier::default();
        let mut state = DeviceState::default();
        state.click_state_mut(Button::A1).clicks = 2;
        state.click_state_mut(Button::A1).down_at = Some(Instant::now());
        let t0 = Instant::now();
        let kinds = run(&c, &mut state, &[(A1, 0, 0, 0, 0), (0, 0, 0, 0, 10)], t0);
        assert_eq!(
            kinds,
            vec![
                InputKind::ButtonDown {
                    button: Button::A1,
                    clicks: 3
                },
                InputKind::ButtonDoubleClick {
                    button: Button::A1,
                    clicks: 2
                },
                InputKind::ButtonUp {
                    button: Button::A1,
                    clicks: 1
                },
            ]
        );
        assert!(state.click_state(Button::A1).is_idle());
    }
}
