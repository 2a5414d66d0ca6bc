//! Terminal host: runs a game session and draws the overlay as text.
//!
//! Keyboard lines drive the controls; engine callbacks and the camera state
//! trigger redraws.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, warn};

use arshooter_app::camera::{CameraFeed, DeviceProbe};
use arshooter_app::cli::Args;
use arshooter_app::config;
use arshooter_app::input::{self, HostInput};
use arshooter_app::logging;
use arshooter_app::overlay::Overlay;
use arshooter_app::session;
use arshooter_app::state::AppState;
use arshooter_core::commands::PlayerCommand;
use arshooter_sim::engine::SimConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let game = config::load_game_config(args.config.as_deref());
    let mut overlay = Overlay::new(game.max_health);
    let state = AppState::new();
    let (events_tx, events_rx) = mpsc::channel();

    let sim_config = SimConfig {
        seed: args.seed,
        game,
        ..Default::default()
    };
    if let Err(err) = session::start_game(&state, sim_config, events_tx) {
        error!("{err}");
        std::process::exit(1);
    }

    let mut camera = CameraFeed::new();
    camera.mount(Arc::new(DeviceProbe::default()));

    let lines = spawn_stdin_reader();
    println!("{}", input::HELP);
    println!("{}", overlay.render());

    loop {
        let mut redraw = false;

        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match input::parse(&line) {
                Some(HostInput::Quit) => break,
                Some(action) => redraw |= handle(&state, &overlay, action),
                None => println!("unrecognised input, 'h' for help"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // stdin closed
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        for event in events_rx.try_iter() {
            overlay.apply(&event);
            redraw = true;
        }

        let backdrop = camera.poll();
        if &backdrop != overlay.backdrop() {
            overlay.set_backdrop(backdrop);
            redraw = true;
        }

        if redraw {
            println!("{}", overlay.render());
        }
    }

    camera.unmount();
    if let Err(err) = session::stop_game(&state) {
        error!("{err}");
    }
}

/// Perform one parsed action. Returns whether the overlay should redraw.
fn handle(state: &AppState, overlay: &Overlay, action: HostInput) -> bool {
    let result = match action {
        HostInput::Control(control) => match overlay.control(control) {
            Some(command) => session::send_command(state, command),
            None => return false,
        },
        HostInput::Aim { yaw_deg, pitch_deg } => session::send_command(
            state,
            PlayerCommand::Aim {
                yaw: yaw_deg.to_radians(),
                pitch: pitch_deg.to_radians(),
            },
        ),
        HostInput::Resize { width, height } => session::resize(state, width, height),
        HostInput::Status => {
            print_status(state);
            return false;
        }
        HostInput::Help => {
            println!("{}", input::HELP);
            return false;
        }
        HostInput::Quit => return false,
    };
    if let Err(err) = result {
        warn!("{err}");
    }
    true
}

fn print_status(state: &AppState) {
    match session::get_snapshot(state) {
        Ok(Some(snapshot)) => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => warn!("cannot serialize snapshot: {err}"),
        },
        Ok(None) => println!("no frame yet"),
        Err(err) => warn!("{err}"),
    }
}

/// Forward stdin lines over a channel so the host loop can keep polling.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("arshooter-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(err) = spawned {
        warn!("cannot read input: {err}");
    }
    rx
}
