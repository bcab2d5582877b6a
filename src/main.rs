//! Bobsled entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively this
//! runs a headless time trial: an autopilot follows the racing line on each
//! built-in track (or the ones named on the command line) and prints the
//! results.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bobsled::sim::{RaceSession, optimal_offset, sample_at, step};
    use bobsled::{PhysicsTuning, TRACKS, TrackDef, format_sector_time, format_time, to_mph};

    /// Frame rate of the simulated display
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on runs that never reach the line
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Steer toward the racing line a short distance ahead
    fn autopilot(session: &RaceSession) -> f32 {
        let sled = &session.sled;
        let look_ahead = sled.v * 0.3;
        let ahead = sample_at(&session.track, sled.s + look_ahead);
        let target = optimal_offset(ahead.curvature, session.tuning.track_half_width);
        ((target - sled.d) * 1.5 - sled.omega * 0.4).clamp(-1.0, 1.0)
    }

    fn load_tuning() -> PhysicsTuning {
        let Ok(path) = std::env::var("BOBSLED_TUNING") else {
            return PhysicsTuning::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| PhysicsTuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                PhysicsTuning::default()
            }
        }
    }

    fn run(def: &TrackDef, tuning: &PhysicsTuning, seed: u64) {
        let mut session = RaceSession::new(def.generate(), tuning.clone(), None, seed);

        let mut frames = 0;
        loop {
            let steer = autopilot(&session);
            if step(&mut session, steer, FRAME_DT) {
                break;
            }
            frames += 1;
            if frames >= MAX_FRAMES {
                log::warn!("{}: no finish after {} frames", def.id, frames);
                return;
            }
        }

        let Some(time) = session.finish_time else {
            return;
        };
        let splits: Vec<String> = session
            .sectors
            .splits()
            .iter()
            .map(|s| format_sector_time(s.time))
            .collect();
        println!(
            "{:<12} {:>9}  top {:>5.1} mph  sectors [{}]",
            def.name,
            format_time(time),
            to_mph(session.top_speed),
            splits.join(", ")
        );
    }

    pub fn main() {
        env_logger::init();
        log::info!("Bobsled (native) headless time trial");

        let tuning = load_tuning();
        let wanted: Vec<String> = std::env::args().skip(1).collect();
        let seed = rand::random::<u64>();

        for def in TRACKS.iter() {
            if wanted.is_empty() || wanted.iter().any(|id| id == def.id) {
                run(def, &tuning, seed);
            }
        }
        for id in &wanted {
            if bobsled::tracks::find(id).is_none() {
                log::warn!("Unknown track `{}`", id);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
