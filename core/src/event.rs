//! Session events — the record of everything that happened.
//!
//! RULE: State changes are observable only through events. The panel,
//! the runner, and the tests all read the same log.

use crate::state::{ArmState, CameraState, LocationStatus};
use crate::types::{Seq, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every event recorded during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecurityEvent {
    // ── Session lifecycle ──────────────────────────
    SessionStarted {
        session_id: SessionId,
        home_latitude: f64,
        home_longitude: f64,
    },

    // ── User command events ────────────────────────
    CommandReceived {
        command_id: String,
        command_type: String,
    },

    // ── State transitions ──────────────────────────
    ArmStateChanged {
        state: ArmState,
    },
    CameraStateChanged {
        state: CameraState,
    },
    LocationChanged {
        latitude: f64,
        longitude: f64,
        status: LocationStatus,
        distance_km: f64,
    },

    // ── Notifications ──────────────────────────────
    NotificationRaised {
        kind: NotificationKind,
        title: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AwayUnarmed,
    Emergency,
    BreakIn,
    SensorTrigger,
}

/// One event as recorded in the in-memory session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub seq: Seq,
    pub session_id: SessionId,
    pub event_type: String,
    pub event: SecurityEvent,
    pub recorded_at: DateTime<Utc>,
}

/// Extract a stable string name from a SecurityEvent variant.
/// Used for the event_type column of the session log.
pub fn event_type_name(event: &SecurityEvent) -> &'static str {
    match event {
        SecurityEvent::SessionStarted { .. } => "session_started",
        SecurityEvent::CommandReceived { .. } => "command_received",
        SecurityEvent::ArmStateChanged { .. } => "arm_state_changed",
        SecurityEvent::CameraStateChanged { .. } => "camera_state_changed",
        SecurityEvent::LocationChanged { .. } => "location_changed",
        SecurityEvent::NotificationRaised { .. } => "notification_raised",
    }
}
