//! Built-in track definitions

use crate::sim::track::{Track, TrackSegment, generate};
use crate::tuning::GeneratorConfig;

/// A selectable track
#[derive(Debug, Clone, Copy)]
pub struct TrackDef {
    /// Stable key used for records and leaderboards
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Accent color (CSS hex)
    pub color: &'static str,
    pub segments: &'static [TrackSegment],
}

impl TrackDef {
    pub fn generate(&self) -> Track {
        generate(self.segments, &GeneratorConfig::default())
    }

    /// Authored length (m)
    pub fn length(&self) -> f32 {
        self.segments.iter().map(|s| s.length).sum()
    }
}

const fn seg(length: f32, curvature: f32) -> TrackSegment {
    TrackSegment::new(length, curvature)
}

pub static TRACKS: [TrackDef; 3] = [
    TrackDef {
        id: "alpine",
        name: "ALPINE PASS",
        description: "Gentle curves — perfect for beginners",
        color: "#4fc3f7",
        segments: &[
            seg(50.0, 0.0),
            seg(35.0, 0.03),
            seg(25.0, 0.0),
            seg(40.0, -0.04),
            seg(20.0, 0.0),
            seg(30.0, 0.05),
            seg(20.0, -0.03),
            seg(25.0, 0.0),
            seg(35.0, -0.05),
            seg(20.0, 0.0),
            seg(30.0, 0.04),
            seg(20.0, 0.0),
            seg(35.0, -0.04),
            seg(25.0, 0.03),
            seg(15.0, 0.0),
            seg(30.0, -0.03),
            seg(60.0, 0.0),
        ],
    },
    TrackDef {
        id: "glacier",
        name: "GLACIER RUN",
        description: "Technical turns and S-curves",
        color: "#ffcc80",
        segments: &[
            seg(40.0, 0.0),
            seg(30.0, 0.04),
            seg(20.0, 0.0),
            seg(40.0, -0.06),
            seg(15.0, 0.0),
            seg(35.0, 0.07),
            seg(25.0, -0.03),
            seg(20.0, 0.0),
            seg(50.0, -0.08),
            seg(15.0, 0.0),
            seg(30.0, 0.05),
            seg(20.0, 0.09),
            seg(25.0, -0.04),
            seg(10.0, 0.0),
            seg(35.0, -0.07),
            seg(30.0, 0.06),
            seg(18.0, 0.0),
            seg(45.0, -0.05),
            seg(20.0, 0.04),
            seg(12.0, 0.0),
            seg(35.0, 0.08),
            seg(25.0, -0.06),
            seg(20.0, 0.0),
            seg(40.0, -0.09),
            seg(15.0, 0.0),
            seg(30.0, 0.03),
            seg(50.0, 0.0),
        ],
    },
    TrackDef {
        id: "inferno",
        name: "INFERNO",
        description: "Hairpins and high speed — experts only",
        color: "#ef5350",
        segments: &[
            seg(30.0, 0.0),
            seg(25.0, 0.06),
            seg(10.0, 0.0),
            seg(35.0, -0.10),
            seg(30.0, 0.08),
            seg(12.0, 0.0),
            seg(20.0, -0.12),
            seg(15.0, 0.05),
            seg(40.0, -0.07),
            seg(8.0, 0.0),
            seg(25.0, 0.11),
            seg(20.0, -0.09),
            seg(15.0, 0.10),
            seg(10.0, 0.0),
            seg(30.0, -0.13),
            seg(18.0, 0.0),
            seg(25.0, 0.09),
            seg(35.0, -0.08),
            seg(20.0, 0.12),
            seg(8.0, 0.0),
            seg(30.0, -0.11),
            seg(15.0, 0.06),
            seg(10.0, 0.0),
            seg(25.0, -0.10),
            seg(20.0, 0.07),
            seg(35.0, -0.14),
            seg(15.0, 0.0),
            seg(20.0, 0.05),
            seg(40.0, 0.0),
        ],
    },
];

/// Look up a track by id
pub fn find(id: &str) -> Option<&'static TrackDef> {
    TRACKS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find("glacier").map(|t| t.name), Some("GLACIER RUN"));
        assert!(find("moon").is_none());
    }

    #[test]
    fn test_generated_length_matches_authored() {
        for def in &TRACKS {
            let track = def.generate();
            assert!((track.total_length - def.length()).abs() < 1e-3, "{}", def.id);
            assert!(track.points.len() > 1);
        }
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in TRACKS.iter().enumerate() {
            for b in &TRACKS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
