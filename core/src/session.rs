//! The session engine — owns all state and applies commands.
//!
//! RULES:
//!   - Commands are applied one at a time; no overlapping execution.
//!   - Location status is re-derived on every position change.
//!   - The alert rule re-evaluates after every location or arm-state
//!     change, never after camera changes.
//!   - Every state change is recorded in the session event log.

use crate::{
    alert::AlertRule,
    command::{SessionCommand, SimulatedPosition},
    config::SecurityConfig,
    error::SecurityResult,
    event::{event_type_name, NotificationKind, SecurityEvent, SessionLogEntry},
    geo::Coordinate,
    notify::{Notification, NotificationSink},
    state::{LocationState, SessionState},
    types::{Seq, SessionId},
};
use chrono::Utc;
use uuid::Uuid;

pub const EMERGENCY_TITLE: &str = "Emergency Alert";
pub const EMERGENCY_MESSAGE: &str =
    "Emergency services have been notified. Police, Fire, and Medical services are on their way.";

pub const BREAK_IN_TITLE: &str = "Break-In Detected!";
pub const BREAK_IN_MESSAGE: &str =
    "Security breach identified. Emergency services are being contacted automatically.";

pub const SENSOR_TITLE: &str = "Sensor Triggered";
pub const SENSOR_MESSAGE: &str = "Motion detected near the front door. Checking camera feed.";

pub struct SecuritySession {
    pub session_id: SessionId,
    pub config: SecurityConfig,
    pub state: SessionState,
    alert_rule: AlertRule,
    sink: Box<dyn NotificationSink>,
    log: Vec<SessionLogEntry>,
    next_seq: Seq,
}

impl SecuritySession {
    /// Start a session with defaults: disarmed, camera inactive, at home.
    pub fn start(
        session_id: SessionId,
        config: SecurityConfig,
        sink: Box<dyn NotificationSink>,
    ) -> Self {
        let state = SessionState::initial(&config);
        let mut session = Self {
            session_id: session_id.clone(),
            config,
            state,
            alert_rule: AlertRule::new(),
            sink,
            log: Vec::new(),
            next_seq: 0,
        };
        session.record(SecurityEvent::SessionStarted {
            session_id,
            home_latitude: session.config.home.latitude,
            home_longitude: session.config.home.longitude,
        });
        session
    }

    /// Apply one command. Returns the events recorded for it, in order.
    pub fn handle(&mut self, command: SessionCommand) -> SecurityResult<Vec<SecurityEvent>> {
        let command_id = Uuid::new_v4().to_string();
        let mut events = vec![self.record(SecurityEvent::CommandReceived {
            command_id,
            command_type: command.name().to_string(),
        })];

        match command {
            SessionCommand::ToggleSystem => {
                self.state.arm = self.state.arm.toggled();
                log::debug!("arm state -> {:?}", self.state.arm);
                events.push(self.record(SecurityEvent::ArmStateChanged {
                    state: self.state.arm,
                }));
                events.extend(self.evaluate_alert());
            }
            SessionCommand::ToggleCamera => {
                // Camera is not part of the alert rule's trigger set.
                self.state.camera = self.state.camera.toggled();
                log::debug!("camera state -> {:?}", self.state.camera);
                events.push(self.record(SecurityEvent::CameraStateChanged {
                    state: self.state.camera,
                }));
            }
            SessionCommand::SetLocation {
                latitude,
                longitude,
            } => {
                events.extend(self.move_to(Coordinate::new(latitude, longitude)));
            }
            SessionCommand::SimulateLocation { position } => {
                let target = match position {
                    SimulatedPosition::Home => self.config.home,
                    SimulatedPosition::Away => self.config.away_coordinate(),
                };
                events.extend(self.move_to(target));
            }
            SessionCommand::TriggerEmergency => {
                events.push(self.raise(
                    NotificationKind::Emergency,
                    EMERGENCY_TITLE,
                    EMERGENCY_MESSAGE,
                ));
            }
            SessionCommand::SimulateBreakIn => {
                events.push(self.raise(NotificationKind::BreakIn, BREAK_IN_TITLE, BREAK_IN_MESSAGE));
            }
            SessionCommand::SimulateSensorTrigger => {
                events.push(self.raise(
                    NotificationKind::SensorTrigger,
                    SENSOR_TITLE,
                    SENSOR_MESSAGE,
                ));
            }
        }

        Ok(events)
    }

    /// Move to a new position, re-deriving status, then re-run the rule.
    fn move_to(&mut self, position: Coordinate) -> Vec<SecurityEvent> {
        self.state.location = LocationState::classify(&self.config, position);
        let location = self.state.location;
        log::debug!(
            "location -> ({}, {}) status={:?} distance={:.3}km",
            position.latitude,
            position.longitude,
            location.status,
            location.distance_km
        );
        let mut events = vec![self.record(SecurityEvent::LocationChanged {
            latitude: position.latitude,
            longitude: position.longitude,
            status: location.status,
            distance_km: location.distance_km,
        })];
        events.extend(self.evaluate_alert());
        events
    }

    /// Run the alert rule against the current state; dispatch if it fires.
    fn evaluate_alert(&mut self) -> Option<SecurityEvent> {
        let notification = self.alert_rule.on_state_change(&self.state)?;
        Some(self.dispatch(NotificationKind::AwayUnarmed, notification))
    }

    fn raise(&mut self, kind: NotificationKind, title: &str, message: &str) -> SecurityEvent {
        self.dispatch(kind, Notification::new(title, message))
    }

    /// Send to the sink and record the log entry.
    fn dispatch(&mut self, kind: NotificationKind, notification: Notification) -> SecurityEvent {
        log::info!("notification [{kind:?}]: {}", notification.title);
        self.sink.notify(&notification);
        self.record(SecurityEvent::NotificationRaised {
            kind,
            title: notification.title,
            message: notification.message,
        })
    }

    /// Append to the event log; returns a clone of the recorded event.
    fn record(&mut self, event: SecurityEvent) -> SecurityEvent {
        let entry = SessionLogEntry {
            seq: self.next_seq,
            session_id: self.session_id.clone(),
            event_type: event_type_name(&event).to_string(),
            event: event.clone(),
            recorded_at: Utc::now(),
        };
        self.next_seq += 1;
        self.log.push(entry);
        event
    }

    // ── Accessors ──────────────────────────────────────────────

    /// The full ordered event log for this session.
    pub fn events(&self) -> &[SessionLogEntry] {
        &self.log
    }

    /// The attached sink. Downcast via as_any in tests and tooling.
    pub fn sink(&self) -> &dyn NotificationSink {
        self.sink.as_ref()
    }
}
