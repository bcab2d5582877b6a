//! Deterministic simulation module
//!
//! All race logic lives here. This module must be pure and deterministic:
//! - Timestep clamped by the integrator
//! - Seeded RNG only (sparks)
//! - No rendering, input capture or storage

pub mod sample;
pub mod sectors;
pub mod sparks;
pub mod state;
pub mod tick;
pub mod track;

pub use sample::{TrackSample, index_at_or_before, sample_at};
pub use sectors::{SectorRating, SectorSplit, SectorTimer, merge_best};
pub use sparks::{Spark, Sparks};
pub use state::{RaceSession, Sled, WallSide};
pub use tick::{WallContact, line_penalty, optimal_offset, step};
pub use track::{Track, TrackPoint, TrackSegment, generate};
