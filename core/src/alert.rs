//! The location alerting rule.
//!
//! Watches the simulated position and the arm state, and raises a
//! one-shot reminder when the user leaves home with the system
//! disarmed.

use crate::notify::Notification;
use crate::state::{ArmState, LocationStatus, SessionState};

pub const AWAY_UNARMED_TITLE: &str = "Security Alert";
pub const AWAY_UNARMED_MESSAGE: &str =
    "You are away from home. Remember to arm your security system!";

/// Edge-triggered away-while-disarmed rule.
///
/// Fires when the session *enters* the away+disarmed condition, then
/// stays silent until the condition clears (coming home or arming) and
/// is entered again. Camera changes are not part of the trigger set —
/// the session never calls this for them.
#[derive(Debug, Default)]
pub struct AlertRule {
    condition_held: bool,
}

impl AlertRule {
    pub fn new() -> Self {
        Self {
            condition_held: false,
        }
    }

    /// Re-evaluate after a location or arm-state change.
    ///
    /// Returns the notification to raise if this change entered the
    /// qualifying condition.
    pub fn on_state_change(&mut self, state: &SessionState) -> Option<Notification> {
        let qualifying = state.location.status == LocationStatus::Away
            && state.arm == ArmState::Disarmed;

        let entered = qualifying && !self.condition_held;
        self.condition_held = qualifying;

        if entered {
            Some(Notification::new(AWAY_UNARMED_TITLE, AWAY_UNARMED_MESSAGE))
        } else {
            None
        }
    }
}
