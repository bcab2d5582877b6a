//! Steering input mapping
//!
//! Event capture (keyboard listeners, device orientation, touch) belongs to
//! the platform shell. This module only turns the captured state into the
//! single steering scalar the integrator consumes.

use serde::{Deserialize, Serialize};

/// Device tilt response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltConfig {
    /// Degrees of tilt ignored around level
    pub dead_zone: f32,
    /// Degrees of tilt for full steer
    pub max_angle: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            dead_zone: 3.0,
            max_angle: 25.0,
        }
    }
}

impl TiltConfig {
    /// Map a tilt angle (degrees, gamma) to [-1, 1]
    pub fn steer_from_tilt(&self, gamma: f32) -> f32 {
        if gamma.is_nan() || gamma.abs() < self.dead_zone {
            return 0.0;
        }
        let range = (self.max_angle - self.dead_zone).max(f32::EPSILON);
        let adjusted = gamma.abs() - self.dead_zone;
        gamma.signum() * (adjusted / range).min(1.0)
    }
}

/// Captured control state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    /// Mapped tilt value, when a gyroscope is reporting
    pub tilt: Option<f32>,
}

impl Controls {
    /// Combined steering scalar in [-1, 1]
    pub fn steer(&self) -> f32 {
        let mut s = 0.0;
        if self.left {
            s += 1.0;
        }
        if self.right {
            s -= 1.0;
        }
        // Tilt is inverted to match the on-screen direction
        if let Some(tilt) = self.tilt.filter(|t| t.is_finite()) {
            s -= tilt;
        }
        s.clamp(-1.0, 1.0)
    }
}
