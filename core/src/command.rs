use serde::{Deserialize, Serialize};

/// All user-issued panel commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    // ── Toggles ───────────────────────────────────
    /// Flip between Armed and Disarmed.
    ToggleSystem,
    /// Flip the camera between Active and Inactive.
    ToggleCamera,

    // ── Location ──────────────────────────────────
    /// Location-provider entry point: move to an arbitrary position.
    /// Range is not validated here — see Coordinate::validated.
    SetLocation { latitude: f64, longitude: f64 },
    /// Jump to the home coordinate or the canned away position.
    SimulateLocation { position: SimulatedPosition },

    // ── Fixed-text notifications ──────────────────
    TriggerEmergency,
    SimulateBreakIn,
    SimulateSensorTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatedPosition {
    Home,
    Away,
}

impl SessionCommand {
    /// Stable snake_case name, recorded on the command_received entry.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleSystem => "toggle_system",
            Self::ToggleCamera => "toggle_camera",
            Self::SetLocation { .. } => "set_location",
            Self::SimulateLocation { .. } => "simulate_location",
            Self::TriggerEmergency => "trigger_emergency",
            Self::SimulateBreakIn => "simulate_break_in",
            Self::SimulateSensorTrigger => "simulate_sensor_trigger",
        }
    }
}
