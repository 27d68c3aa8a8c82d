use crate::event::{InputEvent, InputKind};
use crate::eventbus::InputListener;

/// A listener that writes every event to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl InputListener for Logger {
    fn on_input(&mut self, event: &InputEvent) {
        match event.kind {
            InputKind::Motion { dx, dy, dz } | InputKind::Wheel { dx, dy, dz } => log::info!(
                "[{}] {:?} dx={dx} dy={dy} dz={dz} buttons={:?}",
                event.device,
                event.kind.kind(),
                event.buttons
            ),
            InputKind::ButtonDown { button, clicks }
            | InputKind::ButtonUp { button, clicks }
            | InputKind::ButtonClick { button, clicks }
            | InputKind::ButtonDoubleClick { button, clicks } => log::info!(
                "[{}] {:?} {button} clicks={clicks} buttons={:?}",
                event.device,
                event.kind.kind(),
                event.buttons
            ),
        }
    }
}
