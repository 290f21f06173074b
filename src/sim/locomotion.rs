//! Horizontal locomotion and camera-zone routing
//!
//! Near either end of the level the hero walks across the screen. Everywhere
//! else the hero stays put on screen and the platforms slide the other way.
//! In both cases `world_x` advances, so it stays the ground truth.

use serde::{Deserialize, Serialize};

use super::state::{Facing, GameState};
use crate::settings::Settings;

/// Horizontal input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalIntent {
    #[default]
    None,
    Left,
    Right,
}

impl HorizontalIntent {
    pub fn facing(self) -> Option<Facing> {
        match self {
            HorizontalIntent::None => None,
            HorizontalIntent::Left => Some(Facing::Left),
            HorizontalIntent::Right => Some(Facing::Right),
        }
    }
}

/// Region of the level deciding whether the hero or the world moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraZone {
    /// Within half a viewport of the level start; hero moves on screen
    Left,
    /// World scrolls under a stationary hero
    Middle,
    /// Within half a viewport (plus overshoot) of the level end; hero moves on screen
    Right,
}

impl CameraZone {
    /// Route a move of `step` toward `facing` starting from absolute `world_x`.
    ///
    /// The decision is made before the move, on the lower end of the step:
    /// the current position for right-moves, the prospective one for
    /// left-moves. A step between the same two positions is therefore routed
    /// the same way in both directions and the hero never flickers across a
    /// boundary. The right zone is entered two steps early so the last
    /// scrolled step cannot overshoot it.
    pub fn classify(world_x: f32, facing: Facing, step: f32, settings: &Settings) -> Self {
        let half = settings.half_visible_width();
        let base = match facing {
            Facing::Left => world_x - step,
            Facing::Right => world_x,
        };
        if base < half {
            CameraZone::Left
        } else if base + step * 2.0 > settings.scrollable_width - half {
            CameraZone::Right
        } else {
            CameraZone::Middle
        }
    }
}

/// What a horizontal step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalMove {
    pub zone: CameraZone,
    /// Zone of the previous move, if any
    pub previous: Option<CameraZone>,
    /// Change in absolute x (zero when clamped at an edge)
    pub delta: f32,
}

impl HorizontalMove {
    pub fn zone_changed(&self) -> bool {
        self.previous.is_some_and(|prev| prev != self.zone)
    }
}

/// Apply one tick of horizontal intent. Returns `None` when idle.
pub fn advance_horizontal(state: &mut GameState, intent: HorizontalIntent) -> Option<HorizontalMove> {
    let facing = intent.facing()?;
    let step = state.settings.hero_speed;
    let player = &mut state.player;
    player.facing = facing;

    let zone = CameraZone::classify(player.world_x, facing, step, &state.settings);
    let delta = match zone {
        CameraZone::Left | CameraZone::Right => {
            if zone == CameraZone::Left && state.scroll_offset != 0.0 {
                // A spawn or clamp off the step grid can leave residual scroll;
                // the left zone always shows the level start
                state.platforms.translate_all(state.scroll_offset);
                player.screen.x += state.scroll_offset;
                state.scroll_offset = 0.0;
            }
            // Keep the hero's right edge inside the world and its center at or past 0
            let max_x = (state.settings.scrollable_width - player.half.x).max(0.0);
            let target = (player.world_x + facing.sign() * step).clamp(0.0, max_x);
            let delta = target - player.world_x;
            player.world_x = target;
            player.screen.x += delta;
            delta
        }
        CameraZone::Middle => {
            let delta = facing.sign() * step;
            player.world_x += delta;
            state.scroll_offset += delta;
            state.platforms.translate_all(-delta);
            delta
        }
    };

    let previous = state.zone.replace(zone);
    let mv = HorizontalMove {
        zone,
        previous,
        delta,
    };
    if mv.zone_changed() {
        log::debug!(
            "Camera zone {:?} -> {:?} at x={}",
            previous,
            zone,
            state.player.world_x
        );
    }
    Some(mv)
}
