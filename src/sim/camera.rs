//! Camera window and tile streaming
//!
//! The camera window is recomputed every tick around the hero's absolute x.
//! Tiles are pulled out of the level map as the window advances; with
//! eviction enabled, tiles that fall well outside the view are dropped again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::platform::PlatformInstance;
use super::state::GameState;

/// Visible window in absolute-world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraWindow {
    pub left: f32,
    pub right: f32,
}

impl CameraWindow {
    pub fn centered_on(x: f32, half_width: f32) -> Self {
        Self {
            left: x - half_width,
            right: x + half_width,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Membership changes made by one streaming pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub spawned: usize,
    /// Tiles dropped for leaving the residency range
    pub evicted: usize,
    /// Dug-out tiles dropped from the live set
    pub retired: usize,
}

/// Recenter the camera window on the hero
pub fn update_camera_window(state: &mut GameState) {
    state.camera = CameraWindow::centered_on(
        state.player.world_x,
        state.settings.half_visible_width(),
    );
}

/// Absolute-x range that must be live: the camera window joined with the
/// actual viewport, padded by one tick of travel plus half a tile so partly
/// visible tiles are never missing.
pub fn residency_range(state: &GameState) -> (f32, f32) {
    let settings = &state.settings;
    let margin = settings.lookahead() + settings.tile_size / 2.0;
    let viewport_left = state.scroll_offset;
    let viewport_right = state.scroll_offset + settings.visible_width;
    (
        state.camera.left.min(viewport_left) - margin,
        state.camera.right.max(viewport_right) + margin,
    )
}

/// Materialize every tile with absolute x in `[lo, hi)` that is not already
/// live or dug out. Returns how many were created.
pub fn stream_band(state: &mut GameState, lo: f32, hi: f32) -> usize {
    let half = Vec2::splat(state.settings.tile_size / 2.0);
    let mut spawned = 0;
    for (id, spec) in state.map.tiles_in_band(lo, hi) {
        if state.consumed.contains(&id) || state.platforms.contains(id) {
            continue;
        }
        state
            .platforms
            .insert(PlatformInstance::from_spec(id, spec, half, state.scroll_offset));
        spawned += 1;
    }
    spawned
}

/// Per-tick streaming pass, run after the camera window is updated.
///
/// Always streams the forward band `[right, right + hero_speed)`. Without
/// eviction the live set only grows (apart from dug tiles).
pub fn stream_tiles(state: &mut GameState, hero_speed: f32) -> StreamReport {
    let consumed = &state.consumed;
    let retired = state.platforms.retain(|p| !consumed.contains(&p.tile));

    let edge = state.camera.right;
    let mut spawned = stream_band(state, edge, edge + hero_speed);

    let mut evicted = 0;
    if state.settings.evict_offscreen {
        let (lo, hi) = residency_range(state);
        spawned += stream_band(state, lo, hi);
        evicted = state
            .platforms
            .retain(|p| p.world_x >= lo && p.world_x < hi);
    }

    if spawned > 0 || evicted > 0 {
        log::debug!(
            "Streamed {} in, {} out ({} live)",
            spawned,
            evicted,
            state.platforms.len()
        );
    }

    StreamReport {
        spawned,
        evicted,
        retired,
    }
}

/// Initial materialization around the spawn point
pub fn prime(state: &mut GameState) -> usize {
    update_camera_window(state);
    let (lo, hi) = residency_range(state);
    stream_band(state, lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::level::{LevelMap, TileKind, TileSpec};

    fn three_tiles() -> LevelMap {
        LevelMap::new(vec![
            TileSpec::new(100.0, 16.0, TileKind::Ground),
            TileSpec::new(200.0, 16.0, TileKind::Ground),
            TileSpec::new(300.0, 16.0, TileKind::Ground),
        ])
    }

    fn live_xs(state: &GameState) -> Vec<f32> {
        state.platforms.iter().map(|p| p.world_x).collect()
    }

    #[test]
    fn test_window_tracks_hero() {
        let w = CameraWindow::centered_on(500.0, 240.0);
        assert_eq!(w, CameraWindow { left: 260.0, right: 740.0 });
        assert_eq!(w.width(), 480.0);
    }

    #[test]
    fn test_band_streams_only_tiles_inside() {
        let settings = Settings {
            visible_width: 640.0,
            scrollable_width: 1920.0,
            hero_start: (1800.0, 16.0),
            ..Default::default()
        };
        let mut state = GameState::new(settings, three_tiles()).expect("valid");
        assert!(state.platforms.is_empty());

        assert_eq!(stream_band(&mut state, 90.0, 250.0), 2);
        assert_eq!(live_xs(&state), vec![100.0, 200.0]);
        // Already live: nothing new
        assert_eq!(stream_band(&mut state, 90.0, 250.0), 0);
    }

    #[test]
    fn test_stream_tiles_fills_band_past_camera_edge() {
        let settings = Settings {
            visible_width: 640.0,
            scrollable_width: 1920.0,
            hero_start: (1800.0, 16.0),
            evict_offscreen: false,
            ..Default::default()
        };
        let mut state = GameState::new(settings, three_tiles()).expect("valid");
        assert!(state.platforms.is_empty());

        state.camera = CameraWindow { left: -550.0, right: 90.0 };
        let report = stream_tiles(&mut state, 160.0);
        assert_eq!(report.spawned, 2);
        assert_eq!(live_xs(&state), vec![100.0, 200.0]);

        // A second pass over the same band is a no-op
        assert_eq!(stream_tiles(&mut state, 160.0), StreamReport::default());
    }

    #[test]
    fn test_forward_band() {
        let settings = Settings {
            visible_width: 100.0,
            scrollable_width: 400.0,
            hero_start: (40.0, 16.0),
            evict_offscreen: false,
            ..Default::default()
        };
        let mut state = GameState::new(settings, three_tiles()).expect("valid");
        // Camera [-10, 90); the tile at 100 is inside the padded spawn range
        assert_eq!(live_xs(&state), vec![100.0]);

        let report = stream_tiles(&mut state, 160.0);
        assert_eq!(report.spawned, 1);
        assert_eq!(live_xs(&state), vec![100.0, 200.0]);
    }

    #[test]
    fn test_streamed_tile_lands_at_scrolled_position() {
        let settings = Settings {
            visible_width: 640.0,
            scrollable_width: 1920.0,
            hero_start: (1800.0, 16.0),
            ..Default::default()
        };
        let mut state = GameState::new(settings, three_tiles()).expect("valid");
        stream_band(&mut state, 0.0, 150.0);
        let p = state.platforms.get(0).expect("live");
        assert_eq!(p.pos().x, 100.0 - state.scroll_offset);
    }

    #[test]
    fn test_dug_tiles_are_retired_and_never_return() {
        let settings = Settings {
            hero_start: (40.0, 16.0),
            ..Default::default()
        };
        let mut state = GameState::new(settings, three_tiles()).expect("valid");
        assert_eq!(state.platforms.len(), 3);

        state.consumed.insert(1);
        let report = stream_tiles(&mut state, 4.0);
        assert_eq!(report.retired, 1);
        assert_eq!(report.spawned, 0);
        assert_eq!(live_xs(&state), vec![100.0, 300.0]);
    }

    #[test]
    fn test_eviction_drops_far_tiles() {
        let settings = Settings {
            visible_width: 640.0,
            scrollable_width: 1920.0,
            hero_start: (100.0, 16.0),
            ..Default::default()
        };
        let mut state = GameState::new(settings, three_tiles()).expect("valid");
        assert_eq!(state.platforms.len(), 3);

        // Teleport far right: everything behind the window goes
        state.player.world_x = 1800.0;
        state.scroll_offset = 1280.0;
        update_camera_window(&mut state);
        let report = stream_tiles(&mut state, 4.0);
        assert_eq!(report.evicted, 3);
        assert!(state.platforms.is_empty());
    }
}
