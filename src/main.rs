//! Dig Scroller entry point
//!
//! Runs the simulation headless with a scripted input track and logs what
//! happens. Pass a settings JSON path as the first argument to override the
//! defaults. Set `RUST_LOG=debug` to watch zone changes and tile streaming.

use dig_scroller::consts::SIM_HZ;
use dig_scroller::sim::{GameEvent, GameState, LevelMap, TickInput, tick};
use dig_scroller::{DigTally, Settings};

/// Length of the scripted run
const RUN_SECONDS: u32 = 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dig Scroller (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let map = LevelMap::standard(&settings);
    let mut tally = DigTally::from_settings(&settings);
    let mut state = match GameState::new(settings, map) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start simulation: {e}");
            std::process::exit(1);
        }
    };

    let mut borders = 0u32;
    let mut landings = 0u32;
    for n in 0..RUN_SECONDS * SIM_HZ {
        let events = tick(&mut state, &scripted_input(n));
        for event in &events {
            match event {
                GameEvent::Landed { .. } => landings += 1,
                GameEvent::BorderContact { .. } => borders += 1,
                _ => {}
            }
        }
        if tally.apply(&mut state, &events) {
            break;
        }
    }

    log::info!(
        "After {} ticks: hero at {:?} ({:?}), {} ground dug, {} landings, {} border scrapes, {} live tiles",
        state.time_ticks,
        state.player.absolute(),
        state.player.phase,
        tally.dug,
        landings,
        borders,
        state.platforms.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page on the web
}

/// Walk right digging a tunnel, climbing in bursts, then head back left
fn scripted_input(n: u32) -> TickInput {
    let second = n / SIM_HZ;
    let climbing = n % (SIM_HZ * 2) < SIM_HZ / 4;
    TickInput {
        left: second >= 40,
        right: second < 40,
        up: climbing && second >= 2,
    }
}
