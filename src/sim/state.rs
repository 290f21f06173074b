//! Game state and core simulation types
//!
//! All state mutated by the per-tick controllers lives here.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::camera::{self, CameraWindow};
use super::collision::Aabb;
use super::level::{LevelError, LevelMap, TileId};
use super::locomotion::CameraZone;
use super::platform::PlatformSet;
use crate::settings::{Settings, SettingsError};

/// Errors raised while assembling a simulation
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Which way the hero is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Unit sign along x
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Vertical motion state; exactly one holds at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalPhase {
    Rising,
    Falling,
    Grounded,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Everything is frozen
    GameOver,
}

/// Things that happened during a tick, for rules and presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ZoneChanged { from: CameraZone, to: CameraZone },
    /// Hero came to rest on a platform after being airborne
    Landed { y: f32 },
    /// A ground tile was dug out
    GroundConsumed { tile: TileId, at: Vec2 },
    /// Hero is scraping a metal border
    BorderContact { tile: TileId },
    TilesStreamed { spawned: usize, evicted: usize },
}

/// The player-controlled hero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Viewport-space center (derived from world_x and the scroll offset)
    pub screen: Vec2,
    /// Absolute-world x, the ground truth for horizontal position
    pub world_x: f32,
    /// Positive is downward
    pub vertical_speed: f32,
    pub facing: Facing,
    pub phase: VerticalPhase,
    /// Ground tiles this hero has dug out
    pub ground_dug: u32,
    pub half: Vec2,
}

impl PlayerState {
    pub fn new(settings: &Settings, scroll_offset: f32) -> Self {
        let (x, y) = settings.hero_start;
        Self {
            screen: Vec2::new(x - scroll_offset, y),
            world_x: x,
            vertical_speed: settings.initial_fall_speed,
            facing: Facing::Right,
            // Spawns airborne
            phase: VerticalPhase::Falling,
            ground_dug: 0,
            half: Vec2::new(settings.hero_width, settings.hero_height) / 2.0,
        }
    }

    /// Absolute-world position (no vertical scrolling, so y is shared)
    #[inline]
    pub fn absolute(&self) -> Vec2 {
        Vec2::new(self.world_x, self.screen.y)
    }

    /// Viewport-space collision box
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.screen, self.half)
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub map: LevelMap,
    pub player: PlayerState,
    /// Live tiles in viewport space
    pub platforms: PlatformSet,
    pub camera: CameraWindow,
    /// How far the world has been scrolled left; viewport x = world x - offset
    pub scroll_offset: f32,
    /// Tiles dug out of the level; never materialized again
    pub consumed: BTreeSet<TileId>,
    /// Zone the last horizontal move was routed through
    pub zone: Option<CameraZone>,
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl GameState {
    /// Assemble a simulation and materialize the tiles around the spawn point
    pub fn new(settings: Settings, map: LevelMap) -> Result<Self, SetupError> {
        settings.validate()?;
        map.validate(settings.scrollable_width)?;

        let (start_x, _) = settings.hero_start;
        let scroll_offset = (start_x - settings.half_visible_width())
            .clamp(0.0, settings.scrollable_width - settings.visible_width);
        let player = PlayerState::new(&settings, scroll_offset);

        let mut state = Self {
            camera: CameraWindow::centered_on(start_x, settings.half_visible_width()),
            settings,
            map,
            player,
            platforms: PlatformSet::new(),
            scroll_offset,
            consumed: BTreeSet::new(),
            zone: None,
            time_ticks: 0,
            phase: GamePhase::Playing,
        };

        let spawned = camera::prime(&mut state);
        log::info!(
            "World ready: {} tiles mapped, {} live, hero at {:?}",
            state.map.len(),
            spawned,
            state.player.absolute()
        );

        Ok(state)
    }

    /// External game-over signal; freezes every controller
    pub fn set_game_over(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::info!("Game over at tick {}", self.time_ticks);
            self.phase = GamePhase::GameOver;
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{TileKind, TileSpec};

    #[test]
    fn test_spawn_state() {
        let state = GameState::new(Settings::default(), LevelMap::default()).expect("valid");
        assert_eq!(state.player.phase, VerticalPhase::Falling);
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.player.absolute(), Vec2::new(96.0, 480.0));
        assert_eq!(state.player.screen, Vec2::new(96.0, 480.0));
        assert_eq!(state.scroll_offset, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spawn_mid_level_scrolls_world() {
        let settings = Settings {
            hero_start: (700.0, 100.0),
            ..Default::default()
        };
        let state = GameState::new(settings, LevelMap::default()).expect("valid");
        assert_eq!(state.scroll_offset, 460.0);
        assert_eq!(state.player.screen.x, 240.0);
        assert_eq!(state.player.world_x, 700.0);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings {
            visible_width: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings, LevelMap::default()),
            Err(SetupError::Settings(_))
        ));
    }

    #[test]
    fn test_rejects_map_wider_than_world() {
        let map = LevelMap::new(vec![TileSpec::new(5000.0, 16.0, TileKind::Ground)]);
        assert!(matches!(
            GameState::new(Settings::default(), map),
            Err(SetupError::Level(_))
        ));
    }

    #[test]
    fn test_game_over_is_sticky() {
        let mut state = GameState::new(Settings::default(), LevelMap::default()).expect("valid");
        state.set_game_over();
        state.set_game_over();
        assert!(state.is_game_over());
    }
}
