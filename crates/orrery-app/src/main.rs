//! Headless orrery runner.
//!
//! Loads `config.ron`, applies command-line overrides, optionally scripts a
//! navigation command, then drives the session on a fixed 60 Hz virtual
//! clock and prints telemetry.

use clap::Parser;
use orrery_app::{FIXED_DT, FrameTelemetry, GameLoop, HeadlessScene, Orrery};
use orrery_config::{CliArgs, Config, default_config_dir};
use orrery_log::init_logging;
use orrery_nav::FlightIntent;
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    let mut session = match Orrery::from_config(&config, HeadlessScene::new()) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Cannot start session");
            std::process::exit(1);
        }
    };

    // Settle bodies and publish the start date before any command.
    print_frame(&session.tick(0.0, &FlightIntent::IDLE), args.json, true);
    apply_startup_commands(&mut session, &args);

    let interval = u64::from(config.debug.telemetry_interval_ticks);
    let mut game_loop = GameLoop::new();
    while game_loop.total_time() < args.seconds {
        game_loop.tick_with(
            FIXED_DT,
            |_, loop_time| {
                let frame = session.tick(loop_time * 1000.0, &FlightIntent::IDLE);
                let periodic = interval > 0 && frame.tick % interval == 0;
                print_frame(&frame, args.json, periodic);
            },
            |_| {},
        );
    }

    let nav = session.nav();
    info!(
        ticks = game_loop.update_count(),
        mode = %nav.mode(),
        date = %session.clock().formatted_date(),
        "Run finished"
    );
}

fn apply_startup_commands(session: &mut Orrery, args: &CliArgs) {
    if let Some(name) = &args.target
        && !session.set_target(name)
    {
        warn!(body = %name, "Startup target not found");
    }
    if let Some(name) = &args.warp {
        if !session.warp_to_planet(name) {
            warn!(body = %name, "Cannot warp");
        }
    } else if let Some(name) = &args.autopilot {
        if !(session.set_target(name) && session.start_autopilot()) {
            warn!(body = %name, "Cannot engage autopilot");
        }
    } else if let Some(name) = &args.follow
        && !session.follow_planet(name)
    {
        warn!(body = %name, "Cannot follow");
    }
}

/// Print a frame when it is due or carries something new.
fn print_frame(frame: &FrameTelemetry, json: bool, periodic: bool) {
    if !(periodic || frame.date.is_some() || !frame.events.is_empty()) {
        return;
    }
    if json {
        match serde_json::to_string(frame) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "Cannot serialize telemetry"),
        }
        return;
    }
    if let Some(date) = &frame.date {
        println!("[{date}]");
    }
    for event in &frame.events {
        println!("  event: {event:?}");
    }
    if periodic {
        println!("{}", frame.summary());
    }
}
