//! Gameplay rules
//!
//! The simulation only reports what happened. Win/lose policy lives here and
//! is driven by the events `tick` returns.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// Counts dug ground tiles and ends the run once the level is cleared
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigTally {
    pub dug: u32,
    pub target: u32,
}

impl DigTally {
    pub fn new(target: u32) -> Self {
        Self { dug: 0, target }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.ground_to_clear)
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.dug >= self.target
    }

    /// Fold one tick's events; returns true once the target is reached
    pub fn observe(&mut self, events: &[GameEvent]) -> bool {
        let dug = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GroundConsumed { .. }))
            .count() as u32;
        self.dug += dug;
        self.is_cleared()
    }

    /// Fold events and raise the game-over signal when the level is cleared
    pub fn apply(&mut self, state: &mut GameState, events: &[GameEvent]) -> bool {
        let cleared = self.observe(events);
        if cleared && !state.is_game_over() {
            log::info!("Level cleared: {} ground tiles dug", self.dug);
            state.set_game_over();
        }
        cleared
    }
}
