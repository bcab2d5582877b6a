//! Per-frame sled integrator
//!
//! One call advances the session by one (clamped) timestep. The stages run in
//! a fixed order and each reads what the previous one wrote:
//! lateral forces → damping → offset → walls → racing line → speed →
//! progress → sparks → clocks → sectors → finish.

use super::sample::sample_at;
use super::state::{RaceSession, Sled, WallSide};
use crate::sign;
use crate::tuning::PhysicsTuning;

/// Outcome of the wall check for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Sled stayed inside the walls
    Clear,
    /// First contact after the cooldown expired (speed penalty applied)
    Fresh(WallSide),
    /// Still in contact within the cooldown (no penalty)
    Grinding(WallSide),
}

/// Advance the race by one frame. Returns true once the sled has finished.
///
/// `steer` is the normalized steering scalar in [-1, 1]. `dt` is clamped to
/// `tuning.max_dt`.
pub fn step(session: &mut RaceSession, steer: f32, dt: f32) -> bool {
    if session.is_finished() {
        return true;
    }
    let dt = dt.min(session.tuning.max_dt).max(0.0);

    let RaceSession {
        track,
        sled,
        tuning,
        rng,
        ..
    } = session;
    let half_width = tuning.track_half_width;

    let here = sample_at(track, sled.s);
    let curvature = here.curvature;

    apply_lateral_forces(sled, curvature, steer, tuning, dt);

    sled.omega *= (1.0 - tuning.lateral_damping * dt).max(0.0);
    sled.d += sled.omega * dt;

    if let WallContact::Fresh(side) = resolve_wall_contact(sled, tuning, dt) {
        log::debug!("Wall hit at s={:.1}, v={:.2}", sled.s, sled.v);
        sled.sparks.spawn(rng, &here, sled.d, side.sign());
    }

    let penalty = line_penalty(sled.d, curvature, half_width, tuning.optimal_line_factor);
    sled.v = (sled.v + longitudinal_accel(sled.v, penalty, tuning) * dt).max(0.0);

    sled.s += sled.v * dt;

    sled.sparks.advance(dt);

    session.race_time += dt;
    session.top_speed = session.top_speed.max(session.sled.v);

    session.sectors.record_crossings(session.sled.s, session.track.total_length, session.race_time);

    if session.sled.s >= session.track.total_length {
        session.sled.s = session.track.total_length;
        session.finish_time = Some(session.race_time);
        log::info!(
            "Finished in {:.3}s (top speed {:.1} m/s)",
            session.race_time,
            session.top_speed
        );
        return true;
    }
    false
}

/// Centripetal push and steering, both integrated into `omega`
fn apply_lateral_forces(
    sled: &mut Sled,
    curvature: f32,
    steer: f32,
    tuning: &PhysicsTuning,
    dt: f32,
) {
    let proximity = sled.d.abs() / tuning.track_half_width;

    // Curve pushing the sled further into the wall it already leans on
    let pushing_into_wall = sign(curvature) == sign(sled.d);
    let mut cent_scale = tuning.centripetal_scale;
    if pushing_into_wall && proximity > 0.7 {
        cent_scale *= 1.0 - (proximity - 0.7) / 0.3 * 0.7;
    }
    sled.omega += curvature * sled.v * sled.v * cent_scale * dt;

    sled.omega += steer * tuning.steer_force * steer_multiplier(steer, sled.d, proximity) * dt;
}

/// Recovery assist: steering away from a nearby wall gets up to 1.8x
fn steer_multiplier(steer: f32, d: f32, proximity: f32) -> f32 {
    if proximity > 0.6 && sign(steer) != sign(d) {
        1.0 + (proximity - 0.6) / 0.4 * 0.8
    } else {
        1.0
    }
}

/// Clamp the sled to the walls and bounce it back.
///
/// The cooldown counts down every tick and restarts on every contact; only
/// contact after it has run out costs speed.
pub fn resolve_wall_contact(sled: &mut Sled, tuning: &PhysicsTuning, dt: f32) -> WallContact {
    let half_width = tuning.track_half_width;
    sled.wall_hit_timer = (sled.wall_hit_timer - dt).max(0.0);

    if sled.d.abs() <= half_width {
        return WallContact::Clear;
    }

    let side = WallSide::of_offset(sled.d);
    sled.d = side.sign() * half_width;
    sled.omega = -sled.omega * tuning.wall_bounce;

    let fresh = sled.wall_hit_timer <= 0.0;
    if fresh {
        sled.v *= 1.0 - tuning.wall_speed_penalty;
    }
    sled.wall_hit_timer = tuning.wall_hit_cooldown;
    sled.wall_side = Some(side);

    if fresh {
        WallContact::Fresh(side)
    } else {
        WallContact::Grinding(side)
    }
}

/// Lateral offset of the ideal line: toward the inside of the turn, further
/// for sharper turns (capped at 60% of the half width)
pub fn optimal_offset(curvature: f32, half_width: f32) -> f32 {
    -sign(curvature) * half_width * 0.6 * (curvature.abs() * 20.0).min(1.0)
}

/// Extra friction for being off the racing line
pub fn line_penalty(d: f32, curvature: f32, half_width: f32, factor: f32) -> f32 {
    let line_error = (d - optimal_offset(curvature, half_width)).abs() / (half_width * 2.0);
    line_error * factor
}

/// Downhill acceleration net of friction and drag
pub fn longitudinal_accel(v: f32, line_penalty: f32, tuning: &PhysicsTuning) -> f32 {
    tuning.gravity - (tuning.ice_friction + line_penalty) * v - tuning.air_drag * v * v
}
