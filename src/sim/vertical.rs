//! Vertical motion: falling, landing, climbing and tile contact
//!
//! Ground contact is decided by three probes just under the hero's feet.
//! Any hit grounds the hero and snaps it flush onto the platform it hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{TileId, TileKind};
use super::state::{GameEvent, GameState, VerticalPhase};

/// Sample points along the hero's lower edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Probe {
    Center,
    /// One third of the hero's width toward +x
    Front,
    /// One third of the hero's width toward -x
    Rear,
}

impl Probe {
    /// Evaluation order. Snaps are applied in this order, so the rear probe
    /// has the final say when several probes hit.
    pub const ORDER: [Probe; 3] = [Probe::Center, Probe::Front, Probe::Rear];

    #[inline]
    pub fn offset(self, width: f32) -> f32 {
        match self {
            Probe::Center => 0.0,
            Probe::Front => width / 3.0,
            Probe::Rear => -width / 3.0,
        }
    }
}

/// A probe that found a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub probe: Probe,
    pub tile: TileId,
    /// Hero y that puts its feet on the platform's upper edge
    pub resting_y: f32,
}

/// Outcome of a vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalStep {
    Grounded {
        /// How many probes hit (more than one is resolved by probe order)
        contacts: usize,
        /// True if the hero was airborne before this tick
        landed: bool,
    },
    Airborne,
}

/// Run the three ground probes against the live platforms
pub fn probe_ground(state: &GameState) -> Vec<GroundContact> {
    let player = &state.player;
    let width = player.half.x * 2.0;
    let feet = player.screen.y + player.half.y;

    Probe::ORDER
        .iter()
        .filter_map(|&probe| {
            let point = Vec2::new(player.screen.x + probe.offset(width), feet);
            state.platforms.probe(point).map(|platform| GroundContact {
                probe,
                tile: platform.tile,
                resting_y: platform.bounds.resting_y(player.half.y),
            })
        })
        .collect()
}

/// Apply gravity or land, once per tick after horizontal movement
pub fn advance_vertical(state: &mut GameState) -> VerticalStep {
    let contacts = probe_ground(state);
    let player = &mut state.player;

    if contacts.is_empty() {
        player.phase = if player.vertical_speed > 0.0 {
            VerticalPhase::Falling
        } else {
            VerticalPhase::Rising
        };
        player.screen.y += player.vertical_speed;
        player.vertical_speed += state.settings.fall_acceleration;
        return VerticalStep::Airborne;
    }

    let landed = player.phase != VerticalPhase::Grounded;
    player.vertical_speed = 0.0;
    player.phase = VerticalPhase::Grounded;
    for contact in &contacts {
        player.screen.y = contact.resting_y;
    }

    if landed {
        log::debug!(
            "Landed at {:?} ({} probe hits)",
            player.absolute(),
            contacts.len()
        );
    }

    VerticalStep::Grounded {
        contacts: contacts.len(),
        landed,
    }
}

/// Up-intent nudge: lift the hero a little and cancel any fall speed.
/// Applied every tick the intent is held; there is no jump arc.
pub fn apply_climb(state: &mut GameState) {
    let player = &mut state.player;
    player.screen.y -= state.settings.climb_step;
    player.vertical_speed = 0.0;
}

/// React to tiles the hero's box is pushing into.
///
/// Ground: one tile per tick is dug out and recorded in the consumed ledger;
/// the camera controller drops it from the live set. Metal border: the hero
/// is shoved down a little for every tick of contact.
pub fn resolve_contacts(state: &mut GameState) -> Vec<GameEvent> {
    let bounds = state.player.bounds();
    let mut dug = None;
    let mut scraped = None;

    for platform in state.platforms.iter().filter(|p| p.bounds.overlaps(&bounds)) {
        match platform.kind {
            TileKind::Ground => {
                if dug.is_none() && !state.consumed.contains(&platform.tile) {
                    dug = Some((platform.tile, platform.world_x, platform.pos().y));
                }
            }
            TileKind::MetalBorder => {
                if scraped.is_none() {
                    scraped = Some(platform.tile);
                }
            }
        }
    }

    let mut events = Vec::new();
    if let Some((tile, x, y)) = dug {
        state.consumed.insert(tile);
        state.player.ground_dug += 1;
        events.push(GameEvent::GroundConsumed {
            tile,
            at: Vec2::new(x, y),
        });
    }
    if let Some(tile) = scraped {
        state.player.screen.y += state.settings.border_push;
        events.push(GameEvent::BorderContact { tile });
    }
    events
}
