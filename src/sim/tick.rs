//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Controllers always run in the same order:
//! locomotion, then vertical motion, then camera and streaming. Ground probes
//! must see the post-move position and streaming must see the post-fall hero.

use serde::{Deserialize, Serialize};

use super::camera::{stream_tiles, update_camera_window};
use super::locomotion::{HorizontalIntent, advance_horizontal};
use super::state::{GameEvent, GameState};
use super::vertical::{VerticalStep, advance_vertical, apply_climb, resolve_contacts};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Climb; combines with either direction
    pub up: bool,
}

impl TickInput {
    /// Left wins when both directions are held
    pub fn horizontal(&self) -> HorizontalIntent {
        if self.left {
            HorizontalIntent::Left
        } else if self.right {
            HorizontalIntent::Right
        } else {
            HorizontalIntent::None
        }
    }
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if state.is_game_over() {
        return Vec::new();
    }

    state.time_ticks += 1;
    let mut events = Vec::new();

    if let Some(mv) = advance_horizontal(state, input.horizontal()) {
        if let Some(from) = mv.previous.filter(|&prev| prev != mv.zone) {
            events.push(GameEvent::ZoneChanged { from, to: mv.zone });
        }
    }
    if input.up {
        apply_climb(state);
    }

    if let VerticalStep::Grounded { landed: true, .. } = advance_vertical(state) {
        events.push(GameEvent::Landed {
            y: state.player.screen.y,
        });
    }
    events.extend(resolve_contacts(state));

    update_camera_window(state);
    let hero_speed = state.settings.hero_speed;
    let report = stream_tiles(state, hero_speed);
    if report.spawned > 0 || report.evicted > 0 {
        events.push(GameEvent::TilesStreamed {
            spawned: report.spawned,
            evicted: report.evicted,
        });
    }

    log::trace!(
        "Tick {}: hero {:?} {:?}, {} live",
        state.time_ticks,
        state.player.absolute(),
        state.player.phase,
        state.platforms.len()
    );

    events
}
