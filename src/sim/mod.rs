//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick, integer-valued tuning
//! - No randomness
//! - Stable iteration order (by tile ID)
//! - No rendering, audio or input-device dependencies

pub mod camera;
pub mod collision;
pub mod level;
pub mod locomotion;
pub mod platform;
pub mod state;
pub mod tick;
pub mod vertical;

pub use camera::{CameraWindow, StreamReport, stream_band, stream_tiles, update_camera_window};
pub use collision::Aabb;
pub use level::{LevelError, LevelMap, TileId, TileKind, TileSpec};
pub use locomotion::{CameraZone, HorizontalIntent, HorizontalMove, advance_horizontal};
pub use platform::{PlatformInstance, PlatformSet};
pub use state::{
    Facing, GameEvent, GamePhase, GameState, PlayerState, SetupError, VerticalPhase,
};
pub use tick::{TickInput, tick};
pub use vertical::{GroundContact, Probe, VerticalStep, advance_vertical, apply_climb};
