//! Bobsled - top-down sled racing down a winding ice track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track geometry, sled physics, sparks, sector timing)
//! - `tracks`: Built-in track definitions
//! - `tuning`: Data-driven physics constants
//! - `input`: Steering input mapping (keys + tilt → steer scalar)
//! - `leaderboard`: Local best times and best sector records
//! - `platform`: Browser/native platform abstraction

pub mod input;
pub mod leaderboard;
pub mod platform;
pub mod sim;
pub mod tracks;
pub mod tuning;

pub use leaderboard::{BestSectors, Leaderboard, LeaderboardEntry, ScoreError};
pub use tracks::{TRACKS, TrackDef};
pub use tuning::{GeneratorConfig, PhysicsTuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest timestep the integrator accepts (tab-away / frame hitch cap)
    pub const MAX_DT: f32 = 0.05;

    /// Track point spacing along arc length (meters)
    pub const TRACK_STEP: f32 = 0.5;
    /// Curvature smoothing window (points each side)
    pub const SMOOTHING_RADIUS: usize = 12;
    /// Heading at the track start (pointing +y)
    pub const START_HEADING: f32 = std::f32::consts::FRAC_PI_2;

    /// Number of equal arc-length timing sectors per track
    pub const NUM_SECTORS: usize = 3;
    /// Split within this factor of the best counts as "close"
    pub const SECTOR_TOLERANCE: f32 = 1.1;

    /// Sparks per fresh wall hit
    pub const SPARK_BURST: usize = 5;

    /// m/s → mph
    pub const MPS_TO_MPH: f32 = 2.23694;
}

/// Sign with `sign(0) == 0` (unlike `f32::signum`)
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Shortest signed angular distance from `a` to `b`
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_angle(b - a)
}

/// Format a race time as `m:ss.mmm`
pub fn format_time(t: f32) -> String {
    let t = t.max(0.0);
    let mins = (t / 60.0).floor() as u32;
    let secs = (t % 60.0).floor() as u32;
    let ms = ((t % 1.0) * 1000.0).floor() as u32;
    format!("{}:{:02}.{:03}", mins, secs, ms)
}

/// Format a sector split as `s.cc`
pub fn format_sector_time(t: f32) -> String {
    let t = t.max(0.0);
    let secs = t.floor() as u32;
    let cs = ((t % 1.0) * 100.0).floor() as u32;
    format!("{}.{:02}", secs, cs)
}

/// Speed in mph for display
#[inline]
pub fn to_mph(v: f32) -> f32 {
    v * consts::MPS_TO_MPH
}
