//! Data-driven game balance
//!
//! Shipped values are the `Default` impls. Overrides load from JSON; any field
//! left out keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_DT, SMOOTHING_RADIUS, TRACK_STEP};

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tuning field `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Sled physics constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downhill acceleration (m/s²)
    pub gravity: f32,
    /// Quadratic drag coefficient
    pub air_drag: f32,
    /// Base linear friction
    pub ice_friction: f32,
    /// Fraction of speed lost on a fresh wall hit
    pub wall_speed_penalty: f32,
    /// Lateral velocity kept (and reversed) on a wall hit
    pub wall_bounce: f32,
    /// Lateral acceleration at full steer (m/s²)
    pub steer_force: f32,
    /// Damping rate on lateral velocity (1/s)
    pub lateral_damping: f32,
    /// Centerline to wall (m)
    pub track_half_width: f32,
    /// How hard curvature pushes the sled outward
    pub centripetal_scale: f32,
    /// Extra friction per unit of racing-line error
    pub optimal_line_factor: f32,
    /// Seconds after a hit during which contact counts as grinding
    pub wall_hit_cooldown: f32,
    /// Integrator timestep ceiling (s)
    pub max_dt: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 3.2,
            air_drag: 0.0008,
            ice_friction: 0.015,
            wall_speed_penalty: 0.09,
            wall_bounce: 0.4,
            steer_force: 14.0,
            lateral_damping: 5.5,
            track_half_width: 2.9,
            centripetal_scale: 0.85,
            optimal_line_factor: 0.04,
            wall_hit_cooldown: 0.15,
            max_dt: MAX_DT,
        }
    }
}

impl PhysicsTuning {
    /// Parse and validate tuning overrides
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("track_half_width", self.track_half_width),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [
            ("air_drag", self.air_drag),
            ("ice_friction", self.ice_friction),
            ("steer_force", self.steer_force),
            ("lateral_damping", self.lateral_damping),
            ("centripetal_scale", self.centripetal_scale),
            ("optimal_line_factor", self.optimal_line_factor),
            ("wall_hit_cooldown", self.wall_hit_cooldown),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        let fractions = [
            ("wall_speed_penalty", self.wall_speed_penalty),
            ("wall_bounce", self.wall_bounce),
        ];
        for (field, value) in fractions {
            if !(0.0..1.0).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be in [0, 1)",
                });
            }
        }

        Ok(())
    }

    /// Speed where gravity balances friction and drag on the racing line
    pub fn terminal_velocity(&self) -> f32 {
        if self.air_drag <= 0.0 {
            return if self.ice_friction > 0.0 {
                self.gravity / self.ice_friction
            } else {
                f32::INFINITY
            };
        }
        let b = self.ice_friction;
        (-b + (b * b + 4.0 * self.air_drag * self.gravity).sqrt()) / (2.0 * self.air_drag)
    }
}

/// Track generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target spacing between track points (m)
    pub step: f32,
    /// Curvature smoothing window radius (points)
    pub smoothing_radius: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            step: TRACK_STEP,
            smoothing_radius: SMOOTHING_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhysicsTuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = PhysicsTuning::from_json(r#"{ "gravity": 4.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 4.0);
        assert_eq!(tuning.track_half_width, 2.9);
        assert_eq!(tuning.max_dt, MAX_DT);
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let err = PhysicsTuning::from_json(r#"{ "wall_bounce": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "wall_bounce",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = PhysicsTuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_terminal_velocity_balances_forces() {
        let t = PhysicsTuning::default();
        let v = t.terminal_velocity();
        let residual = t.gravity - t.ice_friction * v - t.air_drag * v * v;
        assert!(residual.abs() < 1e-3);
        assert!((v - 54.57).abs() < 0.05);
    }
}
