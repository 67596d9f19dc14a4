//! Global commands checked before the active dialog sees a message.

use crate::config::{is_command, CANCEL_COMMAND, HELP_COMMAND, WAIT_COMMAND};
use crate::dialogue::{DialogId, DialogState};

/// A command that pre-empts normal dialog continuation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// Show the help text. Always available.
    Help,
    /// Put the conversation on hold. Only when not already on hold, so that
    /// `wait` while held just repeats the hold reminder.
    Wait,
    /// Drop every dialog. Always available, including while on hold.
    Cancel,
}

/// Interrupts in the order they are checked
pub const INTERRUPTS: [Interrupt; 3] = [Interrupt::Help, Interrupt::Wait, Interrupt::Cancel];

impl Interrupt {
    pub fn command(self) -> &'static str {
        match self {
            Interrupt::Help => HELP_COMMAND,
            Interrupt::Wait => WAIT_COMMAND,
            Interrupt::Cancel => CANCEL_COMMAND,
        }
    }

    fn precondition(self, state: &DialogState) -> bool {
        match self {
            Interrupt::Wait => state.active_dialog() != Some(DialogId::Hold),
            Interrupt::Help | Interrupt::Cancel => true,
        }
    }

    pub fn matches(self, text: &str, state: &DialogState) -> bool {
        is_command(text, self.command()) && self.precondition(state)
    }
}

/// First interrupt that fires for this text and state
pub fn detect_interrupt(text: &str, state: &DialogState) -> Option<Interrupt> {
    INTERRUPTS
        .into_iter()
        .find(|interrupt| interrupt.matches(text, state))
}
