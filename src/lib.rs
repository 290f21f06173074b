//! Dig Scroller - a side-scrolling digging platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (locomotion, falling, tile streaming)
//! - `settings`: World configuration
//! - `rules`: Gameplay rules layered on top of simulation events

pub mod rules;
pub mod settings;
pub mod sim;

pub use rules::DigTally;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per rendered frame)
    pub const SIM_HZ: u32 = 60;

    /// Tile size for world geometry (borders, ground)
    pub const TILE_SIZE: f32 = 32.0;

    /// Visible viewport dimensions
    pub const VISIBLE_WIDTH: f32 = 480.0;
    pub const VISIBLE_HEIGHT: f32 = 640.0;

    /// Width of the whole scrollable level
    pub const SCROLLABLE_WIDTH: f32 = VISIBLE_WIDTH * 3.0;

    /// Hero collision box
    pub const HERO_WIDTH: f32 = 32.0;
    pub const HERO_HEIGHT: f32 = 32.0;

    /// Hero spawn point (three tiles in, three quarters down the screen)
    pub const HERO_START_X: f32 = TILE_SIZE * 3.0;
    pub const HERO_START_Y: f32 = VISIBLE_HEIGHT / 4.0 * 3.0;

    /// Horizontal speed (pixels per tick)
    pub const HERO_SPEED: f32 = 4.0;
    /// Fall acceleration (pixels per tick²)
    pub const FALL_ACCELERATION: f32 = 1.0;
    /// Vertical speed the hero spawns with
    pub const INITIAL_FALL_SPEED: f32 = 4.0;
    /// Upward nudge per tick while climbing
    pub const CLIMB_STEP: f32 = 3.0;
    /// Downward push per tick while touching a metal border
    pub const BORDER_PUSH: f32 = 3.0;

    /// Ground block layout
    pub const GROUND_COLUMNS: u32 = 39;
    pub const GROUND_ROWS: u32 = 18;
    pub const GROUND_START_COLUMN: u32 = 5;

    /// Ground tiles that must be dug to finish the level
    pub const GROUND_TO_CLEAR: u32 = GROUND_COLUMNS * GROUND_ROWS;
}
