//! session-runner: headless driver for a homewatch security session.
//!
//! Usage:
//!   session-runner                        # scripted demo scenario
//!   session-runner --config panel.json
//!   session-runner --ipc-mode             # JSON commands on stdin

use anyhow::Result;
use homewatch_core::{
    command::{SessionCommand, SimulatedPosition},
    config::SecurityConfig,
    geo::Coordinate,
    notify::{MemorySink, Notification},
    session::SecuritySession,
    state::{ArmState, CameraState, LocationStatus},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { cmd: SessionCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct PanelState {
    session_id: String,
    armed: bool,
    camera_active: bool,
    location_status: LocationStatus,
    latitude: f64,
    longitude: f64,
    distance_km: f64,
    location_debug: String,
    notifications: Vec<Notification>,
    event_count: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => SecurityConfig::load(&w[1])?,
        None => SecurityConfig::default(),
    };

    let session_id = format!("session-{}", epoch_secs());

    if !ipc_mode {
        println!("homewatch — session-runner");
        println!("  session:     {session_id}");
        println!(
            "  home:        ({}, {})",
            config.home.latitude, config.home.longitude
        );
        println!("  home radius: {} km", config.home_radius_km);
        println!();
    }

    let mut session =
        SecuritySession::start(session_id, config, Box::new(MemorySink::default()));

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        run_demo(&mut session)?;
        print_summary(&session);
    }

    Ok(())
}

fn run_ipc_loop(session: &mut SecuritySession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&panel_state(session))?)?;
            }
            IpcCommand::Command { cmd } => {
                // IPC input is untrusted: range-check coordinates before
                // they reach the session.
                if let SessionCommand::SetLocation {
                    latitude,
                    longitude,
                } = &cmd
                {
                    if let Err(e) = Coordinate::validated(*latitude, *longitude) {
                        let err_json = serde_json::json!({ "error": e.to_string() });
                        writeln!(stdout, "{}", err_json)?;
                        stdout.flush()?;
                        continue;
                    }
                }
                match session.handle(cmd) {
                    Ok(_) => {
                        writeln!(stdout, "{}", serde_json::to_string(&panel_state(session))?)?;
                    }
                    Err(e) => {
                        log::warn!("command failed: {e}");
                        let err_json = serde_json::json!({ "error": e.to_string() });
                        writeln!(stdout, "{}", err_json)?;
                    }
                }
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

/// A fixed walk through the panel: camera on, leave disarmed (alert),
/// arm, come home, then the three fixed-text simulations.
fn run_demo(session: &mut SecuritySession) -> Result<()> {
    let script = [
        SessionCommand::ToggleCamera,
        SessionCommand::SimulateLocation {
            position: SimulatedPosition::Away,
        },
        SessionCommand::ToggleSystem,
        SessionCommand::SimulateLocation {
            position: SimulatedPosition::Home,
        },
        SessionCommand::SimulateSensorTrigger,
        SessionCommand::SimulateBreakIn,
        SessionCommand::TriggerEmergency,
        SessionCommand::ToggleSystem,
    ];

    for command in script {
        println!("> {}", command.name());
        for event in session.handle(command)? {
            println!("    {}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

fn panel_state(session: &SecuritySession) -> PanelState {
    let location = session.state.location;
    PanelState {
        session_id: session.session_id.clone(),
        armed: session.state.arm == ArmState::Armed,
        camera_active: session.state.camera == CameraState::Active,
        location_status: location.status,
        latitude: location.current.latitude,
        longitude: location.current.longitude,
        distance_km: location.distance_km,
        location_debug: session.state.location_debug(),
        notifications: raised(session).to_vec(),
        event_count: session.events().len(),
    }
}

fn raised(session: &SecuritySession) -> &[Notification] {
    session
        .sink()
        .as_any()
        .downcast_ref::<MemorySink>()
        .map(|sink| sink.received.as_slice())
        .unwrap_or(&[])
}

fn print_summary(session: &SecuritySession) {
    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  session_id:   {}", session.session_id);
    println!(
        "  arm state:    {:?}",
        session.state.arm
    );
    println!("  camera:       {:?}", session.state.camera);
    println!("  location:     {}", session.state.location_debug());
    println!(
        "  distance:     {:.3} km from home",
        session.state.location.distance_km
    );
    println!("  events:       {}", session.events().len());

    println!();
    println!("=== NOTIFICATIONS ===");
    let notifications = raised(session);
    if notifications.is_empty() {
        println!("  (none raised)");
    } else {
        for n in notifications {
            println!("  {} — {}", n.title, n.message);
        }
    }
}

fn epoch_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
