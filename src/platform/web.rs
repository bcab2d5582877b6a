//! JS-facing race wrapper
//!
//! The browser shell owns the frame loop, input listeners and canvas. It
//! drives a `WebRace` once per animation frame and reads plain numbers back.

use wasm_bindgen::prelude::*;

use crate::input::{Controls, TiltConfig};
use crate::leaderboard::{BestSectors, Leaderboard, ScoreSubmission};
use crate::sim::{RaceSession, index_at_or_before, step};
use crate::tracks;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Bobsled core loaded");
}

#[wasm_bindgen]
pub struct WebRace {
    track_id: String,
    session: RaceSession,
    controls: Controls,
    tilt: TiltConfig,
}

#[wasm_bindgen]
impl WebRace {
    /// Start a race on a built-in track (falls back to the first track)
    #[wasm_bindgen(constructor)]
    pub fn new(track_id: &str) -> WebRace {
        let def = tracks::find(track_id).unwrap_or(&tracks::TRACKS[0]);
        let best = BestSectors::load(def.id).as_reference();
        let seed = js_sys::Date::now() as u64;
        WebRace {
            track_id: def.id.to_string(),
            session: RaceSession::for_track(def, best, seed),
            controls: Controls::default(),
            tilt: TiltConfig::default(),
        }
    }

    pub fn set_keys(&mut self, left: bool, right: bool) {
        self.controls.left = left;
        self.controls.right = right;
    }

    /// Raw device gamma in degrees
    pub fn set_tilt(&mut self, gamma: f32) {
        self.controls.tilt = Some(self.tilt.steer_from_tilt(gamma));
    }

    /// Advance one frame; true once the sled crosses the line
    pub fn step(&mut self, dt: f32) -> bool {
        let was_finished = self.session.is_finished();
        let finished = step(&mut self.session, self.controls.steer(), dt);
        if finished && !was_finished {
            if let Some(times) = self.session.completed_sector_times() {
                let mut best = BestSectors::load(&self.track_id);
                best.record(&times);
                best.save(&self.track_id);
            }
        }
        finished
    }

    /// Submit the finished run; returns the rank, or 0 if it did not place
    pub fn submit(&self, name: &str) -> Result<u32, JsError> {
        let Some(time) = self.session.finish_time else {
            return Err(JsError::new("race not finished"));
        };
        let entry = ScoreSubmission {
            track_id: &self.track_id,
            name,
            time,
            top_speed: self.session.top_speed,
        }
        .validate()?;

        let mut board = Leaderboard::load(&self.track_id);
        let rank = board.add(entry);
        board.save(&self.track_id);
        Ok(rank.map(|r| r as u32).unwrap_or(0))
    }

    /// Sled world position and heading: [x, y, heading]
    pub fn sled_pose(&self) -> Vec<f32> {
        let track = &self.session.track;
        let sled = &self.session.sled;
        let pos = sled.world_pos(track);
        vec![pos.x, pos.y, sled.heading(track)]
    }

    /// Spark positions, flattened [x0, y0, life0, x1, ...]
    pub fn sparks(&self) -> Vec<f32> {
        self.session
            .sled
            .sparks
            .iter()
            .flat_map(|s| [s.pos.x, s.pos.y, s.life])
            .collect()
    }

    /// First track point index visible from `s - behind`
    pub fn window_start(&self, behind: f32) -> u32 {
        index_at_or_before(&self.session.track, self.session.sled.s - behind) as u32
    }

    pub fn speed(&self) -> f32 {
        self.session.sled.v
    }

    pub fn offset(&self) -> f32 {
        self.session.sled.d
    }

    pub fn wall_hit(&self) -> bool {
        self.session.sled.is_hitting_wall()
    }

    pub fn progress(&self) -> f32 {
        self.session.progress()
    }

    pub fn race_time(&self) -> f32 {
        self.session.race_time
    }

    pub fn top_speed(&self) -> f32 {
        self.session.top_speed
    }

    /// Completed sector splits, flattened [time0, rating0, ...]
    /// (rating: 0 none, 1 improved, 2 close, 3 worse)
    pub fn sector_splits(&self) -> Vec<f32> {
        use crate::sim::SectorRating;
        self.session
            .sectors
            .splits()
            .iter()
            .flat_map(|s| {
                let rating = match s.rating {
                    SectorRating::NoReference => 0.0,
                    SectorRating::Improved => 1.0,
                    SectorRating::WithinTolerance => 2.0,
                    SectorRating::Worse => 3.0,
                };
                [s.time, rating]
            })
            .collect()
    }
}
