//! Sled and race session state
//!
//! `RaceSession` is the context for one race attempt: the track, the sled,
//! the seeded RNG and the timers. Restarting means building a new session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::sample::sample_at;
use super::sectors::SectorTimer;
use super::sparks::Sparks;
use super::track::Track;
use crate::consts::NUM_SECTORS;
use crate::tracks::TrackDef;
use crate::tuning::PhysicsTuning;

/// Which wall the sled last touched (sign of the lateral offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Negative,
    Positive,
}

impl WallSide {
    /// Side of the wall an offset is pressing against
    pub fn of_offset(d: f32) -> Self {
        if d < 0.0 {
            WallSide::Negative
        } else {
            WallSide::Positive
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            WallSide::Negative => -1.0,
            WallSide::Positive => 1.0,
        }
    }
}

/// The player's sled
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sled {
    /// Arc-length position along the track
    pub s: f32,
    /// Lateral offset from the centerline
    pub d: f32,
    /// Forward speed (m/s)
    pub v: f32,
    /// Lateral velocity (m/s)
    pub omega: f32,
    /// Cooldown since the last wall contact (s)
    pub wall_hit_timer: f32,
    /// Wall touched most recently
    pub wall_side: Option<WallSide>,
    /// Wall-impact sparks (visual only)
    #[serde(skip)]
    pub sparks: Sparks,
}

impl Sled {
    pub fn new() -> Self {
        Self::default()
    }

    /// Still inside the post-hit cooldown (renderer flashes the sled)
    pub fn is_hitting_wall(&self) -> bool {
        self.wall_hit_timer > 0.0
    }

    /// World position on the track
    pub fn world_pos(&self, track: &Track) -> Vec2 {
        sample_at(track, self.s).offset_point(self.d)
    }

    /// Direction of travel
    pub fn heading(&self, track: &Track) -> f32 {
        sample_at(track, self.s).heading
    }
}

/// Context for one race attempt
#[derive(Debug, Clone)]
pub struct RaceSession {
    /// Read-only for the whole attempt
    pub track: Track,
    pub sled: Sled,
    pub tuning: PhysicsTuning,
    /// Accumulated race clock (s)
    pub race_time: f32,
    /// Running max of sled speed
    pub top_speed: f32,
    /// Race time snapshot at the finish line
    pub finish_time: Option<f32>,
    pub sectors: SectorTimer,
    pub(crate) rng: Pcg32,
}

impl RaceSession {
    /// Start a race on an already generated track
    pub fn new(
        track: Track,
        tuning: PhysicsTuning,
        best_sectors: Option<Vec<f32>>,
        seed: u64,
    ) -> Self {
        Self {
            track,
            sled: Sled::new(),
            tuning,
            race_time: 0.0,
            top_speed: 0.0,
            finish_time: None,
            sectors: SectorTimer::new(NUM_SECTORS, best_sectors),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generate a built-in track and start a race on it
    pub fn for_track(def: &TrackDef, best_sectors: Option<Vec<f32>>, seed: u64) -> Self {
        log::info!("Starting race on {} (seed {})", def.name, seed);
        Self::new(def.generate(), PhysicsTuning::default(), best_sectors, seed)
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Fraction of the track covered
    pub fn progress(&self) -> f32 {
        self.track.progress(self.sled.s)
    }

    /// Sector times for the persistence layer once the race covered them all
    pub fn completed_sector_times(&self) -> Option<Vec<f32>> {
        self.sectors.completed_times()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::track::TrackSegment;

    #[test]
    fn test_new_session_at_rest() {
        let track = Track::from_segments(&[TrackSegment::new(50.0, 0.0)]);
        let session = RaceSession::new(track, PhysicsTuning::default(), None, 1);
        assert_eq!(session.sled.s, 0.0);
        assert_eq!(session.sled.v, 0.0);
        assert!(session.sled.wall_side.is_none());
        assert!(session.sled.sparks.is_empty());
        assert!(!session.is_finished());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_world_pos_applies_offset() {
        let track = Track::from_segments(&[TrackSegment::new(50.0, 0.0)]);
        let sled = Sled {
            s: 10.0,
            d: 1.5,
            ..Default::default()
        };
        // Heading +y, lateral direction is -x
        let pos = sled.world_pos(&track);
        assert!((pos.x + 1.5).abs() < 1e-4);
        assert!((pos.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_side_sign() {
        assert_eq!(WallSide::of_offset(-2.9), WallSide::Negative);
        assert_eq!(WallSide::of_offset(2.9).sign(), 1.0);
    }
}
