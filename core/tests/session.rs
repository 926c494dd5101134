//! Session engine tests — command handling, derived state, event log.

use homewatch_core::{
    command::{SessionCommand, SimulatedPosition},
    config::SecurityConfig,
    event::{NotificationKind, SecurityEvent},
    geo::Coordinate,
    notify::{MemorySink, Notification},
    session::{
        SecuritySession, BREAK_IN_MESSAGE, BREAK_IN_TITLE, EMERGENCY_MESSAGE, EMERGENCY_TITLE,
        SENSOR_MESSAGE, SENSOR_TITLE,
    },
    state::{ArmState, CameraState, LocationStatus},
};

fn start(session_id: &str) -> SecuritySession {
    start_with(session_id, SecurityConfig::default())
}

fn start_with(session_id: &str, config: SecurityConfig) -> SecuritySession {
    let _ = env_logger::builder().is_test(true).try_init();
    SecuritySession::start(
        session_id.to_string(),
        config,
        Box::new(MemorySink::default()),
    )
}

fn received(session: &SecuritySession) -> &[Notification] {
    &session
        .sink()
        .as_any()
        .downcast_ref::<MemorySink>()
        .expect("session was started with a MemorySink")
        .received
}

#[test]
fn initial_state_defaults() {
    let session = start("init-defaults");

    assert_eq!(session.state.arm, ArmState::Disarmed);
    assert_eq!(session.state.camera, CameraState::Inactive);
    assert_eq!(session.state.location.status, LocationStatus::Home);
    assert_eq!(session.state.location.distance_km, 0.0);
    assert_eq!(session.state.location.current, session.config.home);
}

#[test]
fn session_started_is_the_first_log_entry() {
    let session = start("init-log");

    let log = session.events();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].seq, 0);
    assert_eq!(log[0].event_type, "session_started");
    match &log[0].event {
        SecurityEvent::SessionStarted {
            session_id,
            home_latitude,
            home_longitude,
        } => {
            assert_eq!(session_id, "init-log");
            assert_eq!(*home_latitude, 37.7749);
            assert_eq!(*home_longitude, -122.4194);
        }
        other => panic!("expected session_started, got {other:?}"),
    }
}

#[test]
fn toggle_system_roundtrip() {
    let mut session = start("arm-roundtrip");

    session.handle(SessionCommand::ToggleSystem).unwrap();
    assert_eq!(session.state.arm, ArmState::Armed);

    session.handle(SessionCommand::ToggleSystem).unwrap();
    assert_eq!(session.state.arm, ArmState::Disarmed);
}

#[test]
fn toggle_camera_roundtrip() {
    let mut session = start("camera-roundtrip");

    session.handle(SessionCommand::ToggleCamera).unwrap();
    assert_eq!(session.state.camera, CameraState::Active);

    session.handle(SessionCommand::ToggleCamera).unwrap();
    assert_eq!(session.state.camera, CameraState::Inactive);
}

/// Location status is always re-derived from the coordinate — a session
/// configured with a different home classifies against that home.
#[test]
fn set_location_rederives_status() {
    let london = Coordinate::new(51.5074, -0.1278);
    let config = SecurityConfig {
        home: london,
        ..SecurityConfig::default()
    };
    let mut session = start_with("custom-home", config);

    session
        .handle(SessionCommand::SetLocation {
            latitude: london.latitude,
            longitude: london.longitude,
        })
        .unwrap();
    assert_eq!(session.state.location.status, LocationStatus::Home);

    // Paris is a few hundred kilometers from a London home.
    session
        .handle(SessionCommand::SetLocation {
            latitude: 48.8566,
            longitude: 2.3522,
        })
        .unwrap();
    assert_eq!(session.state.location.status, LocationStatus::Away);
    assert!(session.state.location.distance_km > 100.0);
}

/// The home radius is a tunable, not business law: widen it past the
/// canned away offset and the "away" position classifies as Home.
#[test]
fn wider_home_radius_reclassifies_the_away_position() {
    let config = SecurityConfig {
        home_radius_km: 10.0,
        ..SecurityConfig::default()
    };
    let mut session = start_with("wide-radius", config);

    session
        .handle(SessionCommand::SimulateLocation {
            position: SimulatedPosition::Away,
        })
        .unwrap();

    assert_eq!(session.state.location.status, LocationStatus::Home);
    assert!(received(&session).is_empty(), "no alert inside the radius");
}

/// Every handled command records command_received before its effects.
#[test]
fn command_received_precedes_effects() {
    let mut session = start("cmd-order");

    let events = session.handle(SessionCommand::ToggleCamera).unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        SecurityEvent::CommandReceived { ref command_type, .. } if command_type == "toggle_camera"
    ));
    assert!(matches!(
        events[1],
        SecurityEvent::CameraStateChanged {
            state: CameraState::Active
        }
    ));
}

/// A qualifying departure records location_changed, then the
/// notification, all under one command.
#[test]
fn qualifying_departure_event_order() {
    let mut session = start("departure-order");

    let events = session
        .handle(SessionCommand::SimulateLocation {
            position: SimulatedPosition::Away,
        })
        .unwrap();

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], SecurityEvent::CommandReceived { .. }));
    assert!(matches!(
        events[1],
        SecurityEvent::LocationChanged {
            status: LocationStatus::Away,
            ..
        }
    ));
    assert!(matches!(
        events[2],
        SecurityEvent::NotificationRaised {
            kind: NotificationKind::AwayUnarmed,
            ..
        }
    ));
}

#[test]
fn log_sequence_is_monotonic_and_names_are_stable() {
    let mut session = start("log-seq");

    session.handle(SessionCommand::ToggleSystem).unwrap();
    session.handle(SessionCommand::ToggleCamera).unwrap();
    session
        .handle(SessionCommand::SimulateLocation {
            position: SimulatedPosition::Away,
        })
        .unwrap();

    let log = session.events();
    for (i, entry) in log.iter().enumerate() {
        assert_eq!(entry.seq, i as u64);
        assert_eq!(entry.session_id, "log-seq");
    }

    let names: Vec<&str> = log.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "session_started",
            "command_received",
            "arm_state_changed",
            "command_received",
            "camera_state_changed",
            "command_received",
            "location_changed",
        ]
    );
}

/// Emergency, break-in, and sensor actions are fixed-text notifications
/// with no decision logic attached.
#[test]
fn fixed_text_notifications() {
    let mut session = start("fixed-text");

    session.handle(SessionCommand::TriggerEmergency).unwrap();
    session.handle(SessionCommand::SimulateBreakIn).unwrap();
    session
        .handle(SessionCommand::SimulateSensorTrigger)
        .unwrap();

    let notifications = received(&session);
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[0].title, EMERGENCY_TITLE);
    assert_eq!(notifications[0].message, EMERGENCY_MESSAGE);
    assert_eq!(notifications[1].title, BREAK_IN_TITLE);
    assert_eq!(notifications[1].message, BREAK_IN_MESSAGE);
    assert_eq!(notifications[2].title, SENSOR_TITLE);
    assert_eq!(notifications[2].message, SENSOR_MESSAGE);

    let kinds: Vec<NotificationKind> = session
        .events()
        .iter()
        .filter_map(|e| match e.event {
            SecurityEvent::NotificationRaised { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::Emergency,
            NotificationKind::BreakIn,
            NotificationKind::SensorTrigger,
        ]
    );

    // None of these touched location or arm state, so the alert rule
    // never ran.
    assert_eq!(session.state.location.status, LocationStatus::Home);
    assert_eq!(session.state.arm, ArmState::Disarmed);
}

/// Commands arrive from the panel as tagged JSON.
#[test]
fn commands_parse_from_panel_json() {
    let cmd: SessionCommand = serde_json::from_str(r#"{"cmd":"toggle_system"}"#).unwrap();
    assert_eq!(cmd.name(), "toggle_system");

    let cmd: SessionCommand =
        serde_json::from_str(r#"{"cmd":"set_location","latitude":37.8,"longitude":-122.4}"#)
            .unwrap();
    assert!(matches!(cmd, SessionCommand::SetLocation { .. }));

    let cmd: SessionCommand =
        serde_json::from_str(r#"{"cmd":"simulate_location","position":"away"}"#).unwrap();
    assert!(matches!(
        cmd,
        SessionCommand::SimulateLocation {
            position: SimulatedPosition::Away
        }
    ));
}

#[test]
fn config_parses_from_json_and_derives_the_away_position() {
    let config: SecurityConfig = serde_json::from_str(
        r#"{
            "home": { "latitude": 40.7128, "longitude": -74.0060 },
            "home_radius_km": 0.25,
            "away_offset_deg": 0.1
        }"#,
    )
    .unwrap();

    assert_eq!(config.home.latitude, 40.7128);
    assert_eq!(config.home_radius_km, 0.25);

    let away = config.away_coordinate();
    assert!((away.latitude - 40.8128).abs() < 1e-9);
    assert!((away.longitude - -73.906).abs() < 1e-9);
}
