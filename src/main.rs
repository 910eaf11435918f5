//! Tidewater headless driver
//!
//! Runs the world at a fixed step with a scripted player, logs what happens
//! and prints the final snapshot as JSON.
//!
//! Usage: `tidewater [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use tidewater::{
    Settings,
    audio::CueSheet,
    consts::SIM_DT,
    renderer::{SceneInstances, WaterUniforms},
    sim::{BoatControls, MoveAxes, TickInput, World, tick},
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SECONDS: f32 = 20.0;

/// Scripted player: throw, cast, drift, then take the boat out
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(frame: u64) -> TickInput {
    let t = frame as f32 * SIM_DT;
    let edge = |at: f32| frame == (at / SIM_DT).round() as u64;
    let mut input = TickInput {
        throw_held: (0.2..0.9).contains(&t) || (12.0..12.4).contains(&t),
        rod_held: (1.5..2.3).contains(&t),
        cube_push_held: (4.0..4.8).contains(&t),
        toggle_cube: edge(5.0),
        toggle_boat: edge(6.0) || edge(16.0),
        ..Default::default()
    };

    if (2.5..4.0).contains(&t) {
        input.movement = MoveAxes {
            forward: 1.0,
            ..Default::default()
        };
        input.look_yaw = 20.0 * SIM_DT;
    }
    if (6.0..16.0).contains(&t) {
        input.boat = BoatControls {
            forward: t < 14.0,
            left: (9.0..10.0).contains(&t),
            right: (11.0..11.5).contains(&t),
            ..Default::default()
        };
    }
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tidewater (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seconds = match args.next().map(|s| s.parse::<f32>()) {
        Some(Ok(s)) if s > 0.0 => s,
        Some(_) => {
            log::warn!("Invalid duration; running {DEFAULT_SECONDS}s");
            DEFAULT_SECONDS
        }
        None => DEFAULT_SECONDS,
    };

    let mut world = World::new(&settings);
    let mut cues = CueSheet::new();
    let frames = (seconds / SIM_DT).ceil() as u64;

    for frame in 0..frames {
        tick(&mut world, &scripted_input(frame), SIM_DT);

        let events = world.events.drain();
        for event in &events {
            log::debug!("[{:7.3}] {event:?}", world.time);
        }
        for cue in cues.cues(&events) {
            log::debug!(
                "[{:7.3}] play {} (gain {:.2})",
                world.time,
                cue.clip_name(),
                cue.gain()
            );
        }
    }

    let scene = SceneInstances::from_world(&world);
    let water = WaterUniforms::from_world(&world);
    log::info!(
        "Finished {frames} frames: {} instances, {} ripples ({} uniform bytes)",
        scene.total(),
        water.globals.ripple_count,
        water.as_bytes().len()
    );

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; the host drives `tick` directly
}
