//! Split timing over equal arc-length sectors

use serde::{Deserialize, Serialize};

use crate::consts::{NUM_SECTORS, SECTOR_TOLERANCE};

/// How a split compares with the stored best for its sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorRating {
    /// No stored best for this sector
    NoReference,
    /// Faster than the best
    Improved,
    /// Slower, but within tolerance of the best
    WithinTolerance,
    /// Slower than tolerance allows
    Worse,
}

impl SectorRating {
    /// Classify a split against an optional best time
    pub fn rate(time: f32, best: Option<f32>, tolerance: f32) -> Self {
        match best {
            Some(best) if best > 0.0 => {
                if time < best {
                    SectorRating::Improved
                } else if time <= best * tolerance {
                    SectorRating::WithinTolerance
                } else {
                    SectorRating::Worse
                }
            }
            _ => SectorRating::NoReference,
        }
    }

    /// HUD color (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            SectorRating::NoReference => "#4fc3f7",
            SectorRating::Improved => "#ab47bc",
            SectorRating::WithinTolerance => "#66bb6a",
            SectorRating::Worse => "#ef5350",
        }
    }
}

/// A completed sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorSplit {
    pub index: usize,
    pub time: f32,
    pub rating: SectorRating,
}

/// Per-race sector bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorTimer {
    count: usize,
    tolerance: f32,
    /// Race time when the current sector started
    start_time: f32,
    splits: Vec<SectorSplit>,
    /// Previous best per sector, handed in by the persistence layer
    best: Option<Vec<f32>>,
}

impl Default for SectorTimer {
    fn default() -> Self {
        Self::new(NUM_SECTORS, None)
    }
}

impl SectorTimer {
    pub fn new(count: usize, best: Option<Vec<f32>>) -> Self {
        Self {
            count: count.max(1),
            tolerance: SECTOR_TOLERANCE,
            start_time: 0.0,
            splits: Vec::with_capacity(count),
            best,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the sector currently being timed (== count once all are done)
    pub fn current(&self) -> usize {
        self.splits.len()
    }

    pub fn splits(&self) -> &[SectorSplit] {
        &self.splits
    }

    pub fn is_complete(&self) -> bool {
        self.splits.len() >= self.count
    }

    /// Elapsed time in the current sector
    pub fn current_elapsed(&self, race_time: f32) -> f32 {
        race_time - self.start_time
    }

    /// Record every boundary `s` has reached. Returns the splits added.
    pub fn record_crossings(
        &mut self,
        s: f32,
        total_length: f32,
        race_time: f32,
    ) -> &[SectorSplit] {
        let first_new = self.splits.len();
        while !self.is_complete() {
            let index = self.splits.len();
            let boundary = total_length * ((index + 1) as f32 / self.count as f32);
            if s < boundary {
                break;
            }

            let time = race_time - self.start_time;
            let best = self.best.as_ref().and_then(|b| b.get(index).copied());
            let rating = SectorRating::rate(time, best, self.tolerance);
            log::debug!("Sector {} split {:.3}s ({:?})", index + 1, time, rating);

            self.splits.push(SectorSplit { index, time, rating });
            self.start_time = race_time;
        }
        &self.splits[first_new..]
    }

    /// All sector times, once every sector has been crossed
    pub fn completed_times(&self) -> Option<Vec<f32>> {
        self.is_complete()
            .then(|| self.splits.iter().map(|s| s.time).collect())
    }
}

/// Element-wise best of a previous record and a new full set of times
pub fn merge_best(previous: Option<&[f32]>, times: &[f32]) -> Vec<f32> {
    match previous {
        Some(prev) if prev.len() == times.len() => prev
            .iter()
            .zip(times)
            .map(|(&b, &t)| if b > 0.0 { b.min(t) } else { t })
            .collect(),
        _ => times.to_vec(),
    }
}
