//! Track geometry generation
//!
//! A track is authored as a list of constant-curvature segments and expanded
//! into a dense polyline parameterized by arc length:
//! - each segment is cut into equal steps no longer than `step`
//! - position/heading are Euler-integrated along each constant-curvature arc
//! - curvature is then Gaussian-smoothed for a softer feel through transitions
//!
//! The smoothing pass only rewrites curvature. Positions and headings keep the
//! raw segment shape, so the sampled curvature and the drawn path differ
//! slightly around segment joins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::START_HEADING;
use crate::tuning::GeneratorConfig;

/// One authored piece of track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    /// Arc length (m)
    pub length: f32,
    /// Signed curvature (1/m, positive = right turn)
    pub curvature: f32,
}

impl TrackSegment {
    pub const fn new(length: f32, curvature: f32) -> Self {
        Self { length, curvature }
    }
}

/// A sampled centerline point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub pos: Vec2,
    pub heading: f32,
    pub curvature: f32,
    /// Distance from the start line along the centerline
    pub arc_length: f32,
}

/// Generated track: dense points sorted by arc length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub points: Vec<TrackPoint>,
    pub total_length: f32,
}

impl Track {
    /// Build a track with the default generator settings
    pub fn from_segments(segments: &[TrackSegment]) -> Self {
        generate(segments, &GeneratorConfig::default())
    }

    /// Fraction of the track covered at arc length `s`, in [0, 1]
    pub fn progress(&self, s: f32) -> f32 {
        if self.total_length <= 0.0 {
            return 1.0;
        }
        (s / self.total_length).clamp(0.0, 1.0)
    }
}

/// Expand segments into a dense, curvature-smoothed polyline
pub fn generate(segments: &[TrackSegment], config: &GeneratorConfig) -> Track {
    let step = config.step.max(f32::EPSILON);
    let capacity = segments
        .iter()
        .map(|seg| steps_for(seg.length, step))
        .sum::<usize>()
        + 1;
    let mut points = Vec::with_capacity(capacity);

    let mut pos = Vec2::ZERO;
    let mut heading = START_HEADING;
    let mut dist = 0.0_f32;

    for seg in segments {
        let n = steps_for(seg.length, step);
        let actual_step = seg.length.max(0.0) / n as f32;
        let seg_start = dist;

        for i in 0..n {
            points.push(TrackPoint {
                pos,
                heading,
                curvature: seg.curvature,
                arc_length: dist,
            });
            heading += seg.curvature * actual_step;
            pos += Vec2::new(heading.cos(), heading.sin()) * actual_step;
            dist = seg_start + (i + 1) as f32 * actual_step;
        }
        // Land exactly on the authored length
        dist = seg_start + seg.length.max(0.0);
    }

    points.push(TrackPoint {
        pos,
        heading,
        curvature: 0.0,
        arc_length: dist,
    });

    smooth_curvatures(&mut points, config.smoothing_radius);

    log::info!(
        "Generated track: {} segments, {} points, {:.1} m",
        segments.len(),
        points.len(),
        dist
    );

    Track {
        points,
        total_length: dist,
    }
}

/// Steps for a segment: enough that none exceeds `step`, never zero
fn steps_for(length: f32, step: f32) -> usize {
    ((length.max(0.0) / step).ceil() as usize).max(1)
}

/// Gaussian-weighted curvature smoothing, edges clamped (no wraparound)
fn smooth_curvatures(points: &mut [TrackPoint], radius: usize) {
    if radius == 0 || points.len() < 2 {
        return;
    }

    let sigma = radius as f32 * 0.4;
    let weights: Vec<f32> = (-(radius as i64)..=radius as i64)
        .map(|j| (-0.5 * (j as f32 / sigma).powi(2)).exp())
        .collect();
    let total_weight: f32 = weights.iter().sum();

    let raw: Vec<f32> = points.iter().map(|p| p.curvature).collect();
    let last = raw.len() as i64 - 1;

    for (i, point) in points.iter_mut().enumerate() {
        let sum: f32 = weights
            .iter()
            .enumerate()
            .map(|(k, w)| {
                let idx = (i as i64 + k as i64 - radius as i64).clamp(0, last) as usize;
                raw[idx] * w
            })
            .sum();
        point.curvature = sum / total_weight;
    }
}
