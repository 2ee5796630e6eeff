use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{DEFAULT_HIT_TEST_RADIUS, DEFAULT_SNAP_TOLERANCE_DEG};
use crate::input::gestures::CommitGesture;

/// Tunable settings of an editing session.
///
/// Missing fields take their defaults when deserializing, so older settings files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum pixel distance for a click to select a line.
    pub hit_test_radius: f32,
    /// Angular tolerance of the compass snapping, in degrees.
    pub snap_tolerance_deg: f32,
    /// A line longer than this (pixels) is always committed on the second click.
    pub min_commit_length: f32,
    /// Seconds after the first click during which a short line is treated as a double click.
    pub double_click_window: f64,
    pub snap_to_angle: bool,
    pub show_deltas: bool,
    /// Label every line with its angle.
    pub show_angles: bool,
    /// Magnified inset of the pixels under the pointer.
    pub show_loupe: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let gesture = CommitGesture::default();
        Self {
            hit_test_radius: DEFAULT_HIT_TEST_RADIUS,
            snap_tolerance_deg: DEFAULT_SNAP_TOLERANCE_DEG,
            min_commit_length: gesture.min_commit_length,
            double_click_window: gesture.double_click_window,
            snap_to_angle: false,
            show_deltas: false,
            show_angles: false,
            show_loupe: true,
        }
    }
}

impl SessionConfig {
    /// Parses settings from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("hit_test_radius", self.hit_test_radius as f64),
            ("snap_tolerance_deg", self.snap_tolerance_deg as f64),
            ("min_commit_length", self.min_commit_length as f64),
            ("double_click_window", self.double_click_window),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.snap_tolerance_deg >= 22.5 {
            // Compass directions are 45 degrees apart.
            return Err(ConfigError::Invalid(format!(
                "snap_tolerance_deg must be below 22.5, got {}",
                self.snap_tolerance_deg
            )));
        }
        Ok(())
    }

    pub fn commit_gesture(&self) -> CommitGesture {
        CommitGesture {
            min_commit_length: self.min_commit_length,
            double_click_window: self.double_click_window,
        }
    }
}
