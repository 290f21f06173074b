//! World settings
//!
//! Everything the controllers need to know about the world is passed in
//! through `Settings` at construction; nothing reaches back into a container.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// World configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub visible_width: f32,
    pub visible_height: f32,
    /// Width of the entire scrollable world (W)
    pub scrollable_width: f32,
    pub tile_size: f32,

    // === Hero ===
    pub hero_width: f32,
    pub hero_height: f32,
    /// Spawn point in absolute-world coordinates
    pub hero_start: (f32, f32),
    /// Horizontal step per tick (deltaX)
    pub hero_speed: f32,
    pub fall_acceleration: f32,
    pub initial_fall_speed: f32,
    pub climb_step: f32,
    pub border_push: f32,

    // === Streaming ===
    /// Evict tiles that leave the residency range
    pub evict_offscreen: bool,

    // === Rules ===
    pub ground_to_clear: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visible_width: VISIBLE_WIDTH,
            visible_height: VISIBLE_HEIGHT,
            scrollable_width: SCROLLABLE_WIDTH,
            tile_size: TILE_SIZE,

            hero_width: HERO_WIDTH,
            hero_height: HERO_HEIGHT,
            hero_start: (HERO_START_X, HERO_START_Y),
            hero_speed: HERO_SPEED,
            fall_acceleration: FALL_ACCELERATION,
            initial_fall_speed: INITIAL_FALL_SPEED,
            climb_step: CLIMB_STEP,
            border_push: BORDER_PUSH,

            evict_offscreen: true,

            ground_to_clear: GROUND_TO_CLEAR,
        }
    }
}

impl Settings {
    /// Camera window half-width (H)
    #[inline]
    pub fn half_visible_width(&self) -> f32 {
        self.visible_width / 2.0
    }

    /// Lookahead margin for tile residency: one tick of worst-case travel
    #[inline]
    pub fn lookahead(&self) -> f32 {
        self.hero_speed
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject configurations the controllers cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("visible_width", self.visible_width),
            ("visible_height", self.visible_height),
            ("scrollable_width", self.scrollable_width),
            ("tile_size", self.tile_size),
            ("hero_width", self.hero_width),
            ("hero_height", self.hero_height),
            ("hero_speed", self.hero_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("fall_acceleration", self.fall_acceleration),
            ("climb_step", self.climb_step),
            ("border_push", self.border_push),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }
        let (start_x, start_y) = self.hero_start;
        for (name, value) in [
            ("initial_fall_speed", self.initial_fall_speed),
            ("hero_start.y", start_y),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.scrollable_width < self.visible_width {
            return Err(SettingsError::Invalid(format!(
                "scrollable_width {} is narrower than the viewport {}",
                self.scrollable_width, self.visible_width
            )));
        }
        if self.hero_width > self.visible_width {
            return Err(SettingsError::Invalid("hero is wider than the viewport".into()));
        }
        // Same bounds horizontal movement clamps to
        let max_x = self.scrollable_width - self.hero_width / 2.0;
        if !(0.0..=max_x).contains(&start_x) {
            return Err(SettingsError::Invalid(format!(
                "hero start x {start_x} is outside [0, {max_x}]"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_world() {
        let settings = Settings::default();
        assert_eq!(settings.half_visible_width(), 240.0);
        assert_eq!(settings.scrollable_width, 1440.0);
        assert_eq!(settings.ground_to_clear, 702);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "visible_width": 640.0, "scrollable_width": 1920.0 }"#)
            .expect("valid settings");
        assert_eq!(settings.half_visible_width(), 320.0);
        assert_eq!(settings.hero_speed, HERO_SPEED);
    }

    #[test]
    fn test_rejects_world_narrower_than_viewport() {
        let result = Settings::from_json(r#"{ "scrollable_width": 100.0 }"#);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_speed() {
        let settings = Settings {
            hero_speed: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let cases = [
            Settings {
                fall_acceleration: f32::NAN,
                ..Default::default()
            },
            Settings {
                climb_step: f32::INFINITY,
                ..Default::default()
            },
            Settings {
                border_push: f32::NAN,
                ..Default::default()
            },
            Settings {
                initial_fall_speed: f32::NEG_INFINITY,
                ..Default::default()
            },
            Settings {
                hero_start: (96.0, f32::INFINITY),
                ..Default::default()
            },
            Settings {
                hero_start: (f32::NAN, 480.0),
                ..Default::default()
            },
        ];
        for settings in cases {
            assert!(
                matches!(settings.validate(), Err(SettingsError::Invalid(_))),
                "{settings:?}"
            );
        }
    }

    #[test]
    fn test_spawn_must_fit_inside_world() {
        // Hero half-width is 16: the rightmost reachable center is 1424
        let at = |x: f32| Settings {
            hero_start: (x, 480.0),
            ..Default::default()
        };
        assert!(at(1424.0).validate().is_ok());
        assert!(at(0.0).validate().is_ok());
        assert!(at(1424.5).validate().is_err());
        assert!(at(1440.0).validate().is_err());
        assert!(at(-1.0).validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }
}
