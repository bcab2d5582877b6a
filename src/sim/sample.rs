//! Arc-length lookup into a generated track

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::track::Track;
use crate::angle_diff;

/// Interpolated centerline state at an arc length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSample {
    pub pos: Vec2,
    pub heading: f32,
    pub curvature: f32,
}

impl TrackSample {
    /// Unit vector perpendicular to the heading (positive lateral offset side)
    #[inline]
    pub fn lateral_dir(&self) -> Vec2 {
        let perp = self.heading + std::f32::consts::FRAC_PI_2;
        Vec2::new(perp.cos(), perp.sin())
    }

    /// World position at lateral offset `d` from the centerline
    #[inline]
    pub fn offset_point(&self, d: f32) -> Vec2 {
        self.pos + self.lateral_dir() * d
    }
}

/// Last point with `arc_length <= s`
fn last_at_or_before(track: &Track, s: f32) -> usize {
    track
        .points
        .partition_point(|p| p.arc_length <= s)
        .saturating_sub(1)
}

/// Bracketing indices for `s` (already clamped). When `s` lands exactly on a
/// run of points sharing one arc length, the bracket starts at the first of
/// them so the sample resolves to that point.
fn bracket(track: &Track, s: f32) -> (usize, usize) {
    let mut lo = last_at_or_before(track, s);
    let arc = track.points.get(lo).map(|p| p.arc_length);
    if arc == Some(s) {
        lo = track.points[..lo].partition_point(|p| p.arc_length < s);
    }
    let hi = (lo + 1).min(track.points.len().saturating_sub(1));
    (lo, hi)
}

/// Sample position/heading/curvature at arc length `s` (clamped to the track)
pub fn sample_at(track: &Track, s: f32) -> TrackSample {
    let s = s.clamp(0.0, track.total_length.max(0.0));
    let Some(first) = track.points.first() else {
        return TrackSample {
            pos: Vec2::ZERO,
            heading: crate::consts::START_HEADING,
            curvature: 0.0,
        };
    };
    if track.points.len() == 1 {
        return TrackSample {
            pos: first.pos,
            heading: first.heading,
            curvature: first.curvature,
        };
    }

    let (lo, hi) = bracket(track, s);
    let p0 = &track.points[lo];
    let p1 = &track.points[hi];

    let seg_len = p1.arc_length - p0.arc_length;
    let t = if seg_len > 0.0 {
        ((s - p0.arc_length) / seg_len).clamp(0.0, 1.0)
    } else {
        0.0
    };

    TrackSample {
        pos: p0.pos + (p1.pos - p0.pos) * t,
        heading: p0.heading + angle_diff(p0.heading, p1.heading) * t,
        curvature: p0.curvature + (p1.curvature - p0.curvature) * t,
    }
}

/// Index of the last point with `arc_length <= s` (s clamped to the track)
pub fn index_at_or_before(track: &Track, s: f32) -> usize {
    let s = s.clamp(0.0, track.total_length.max(0.0));
    last_at_or_before(track, s)
}
