//! Best times per track
//!
//! Persisted to LocalStorage, tracks the 10 fastest runs per track plus the
//! best split for each timing sector. The JSON shape matches what the remote
//! leaderboard service stores, so entries can be handed to it unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::storage;
use crate::sim::sectors::merge_best;
use crate::tracks;

/// Maximum number of entries kept per track
pub const MAX_ENTRIES: usize = 10;
/// Longest accepted name
pub const MAX_NAME_LEN: usize = 3;
/// Slowest accepted race time (s)
pub const MAX_TIME: f32 = 600.0;
/// Fastest accepted top speed (m/s)
pub const MAX_TOP_SPEED: f32 = 200.0;

const LEADERBOARD_KEY_PREFIX: &str = "bobsled_lb_";
const SECTORS_KEY_PREFIX: &str = "bobsled_sectors_";

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("unknown track `{0}`")]
    UnknownTrack(String),
    #[error("name must be 1-3 characters")]
    NameLength,
    #[error("name must be uppercase alphanumeric")]
    NameCharacters,
    #[error("time must be a positive number under 600 seconds")]
    TimeOutOfRange,
    #[error("top speed must be between 0 and 200 m/s")]
    SpeedOutOfRange,
}

/// A finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    /// Race time (s)
    pub time: f32,
    /// Top speed (m/s)
    pub top_speed: f32,
    /// ISO-8601 timestamp, when the platform has a clock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A run offered for the leaderboard, not yet validated
#[derive(Debug, Clone)]
pub struct ScoreSubmission<'a> {
    pub track_id: &'a str,
    pub name: &'a str,
    pub time: f32,
    pub top_speed: f32,
}

impl ScoreSubmission<'_> {
    /// Check the submission and normalize it into an entry
    /// (uppercase name, time to ms, speed to cm/s)
    pub fn validate(&self) -> Result<LeaderboardEntry, ScoreError> {
        if tracks::find(self.track_id).is_none() {
            return Err(ScoreError::UnknownTrack(self.track_id.to_string()));
        }

        let name = self.name.to_uppercase();
        let len = name.chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(ScoreError::NameLength);
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ')
        {
            return Err(ScoreError::NameCharacters);
        }
        if !(self.time > 0.0 && self.time <= MAX_TIME) {
            return Err(ScoreError::TimeOutOfRange);
        }
        if !(0.0..=MAX_TOP_SPEED).contains(&self.top_speed) {
            return Err(ScoreError::SpeedOutOfRange);
        }

        Ok(LeaderboardEntry {
            name,
            time: (self.time * 1000.0).round() / 1000.0,
            top_speed: (self.top_speed * 100.0).round() / 100.0,
            date: now_iso(),
        })
    }
}

/// One track's leaderboard, fastest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a time would make the board
    pub fn qualifies(&self, time: f32) -> bool {
        if !(time > 0.0) {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| time < e.time).unwrap_or(true)
    }

    /// Rank a time would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, time: f32) -> Option<usize> {
        if !self.qualifies(time) {
            return None;
        }
        let rank = self.entries.iter().position(|e| time < e.time);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry, keeping the board sorted and trimmed.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn add(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.time) {
            return None;
        }

        // Ties go after existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| entry.time < e.time)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fastest time on the board
    pub fn best_time(&self) -> Option<f32> {
        self.entries.first().map(|e| e.time)
    }

    fn storage_key(track_id: &str) -> String {
        format!("{}{}", LEADERBOARD_KEY_PREFIX, track_id)
    }

    /// Load a track's board (empty if none stored)
    pub fn load(track_id: &str) -> Self {
        match storage::load_json::<Self>(&Self::storage_key(track_id)) {
            Some(mut board) => {
                board.entries.retain(|e| e.time > 0.0);
                board.entries.sort_by(|a, b| a.time.total_cmp(&b.time));
                board.entries.truncate(MAX_ENTRIES);
                log::info!("Loaded {} times for {}", board.entries.len(), track_id);
                board
            }
            None => Self::new(),
        }
    }

    pub fn save(&self, track_id: &str) {
        storage::save_json(&Self::storage_key(track_id), self);
        log::info!("Leaderboard for {} saved ({} entries)", track_id, self.entries.len());
    }
}

/// Best split per sector for one track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestSectors {
    pub times: Vec<f32>,
}

impl BestSectors {
    fn storage_key(track_id: &str) -> String {
        format!("{}{}", SECTORS_KEY_PREFIX, track_id)
    }

    /// Times to hand to a new race session (None when nothing is stored)
    pub fn as_reference(&self) -> Option<Vec<f32>> {
        (!self.times.is_empty()).then(|| self.times.clone())
    }

    /// Fold a complete set of sector times into the record
    pub fn record(&mut self, times: &[f32]) {
        let previous = (!self.times.is_empty()).then_some(self.times.as_slice());
        self.times = merge_best(previous, times);
    }

    pub fn load(track_id: &str) -> Self {
        storage::load_json::<Self>(&Self::storage_key(track_id)).unwrap_or_default()
    }

    pub fn save(&self, track_id: &str) {
        storage::save_json(&Self::storage_key(track_id), self);
    }
}

#[cfg(target_arch = "wasm32")]
fn now_iso() -> Option<String> {
    Some(js_sys::Date::new_0().to_iso_string().into())
}

#[cfg(not(target_arch = "wasm32"))]
fn now_iso() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, time: f32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            time,
            top_speed: 30.0,
            date: None,
        }
    }

    fn submission(name: &str, time: f32, top_speed: f32) -> ScoreSubmission<'_> {
        ScoreSubmission {
            track_id: "alpine",
            name,
            time,
            top_speed,
        }
    }

    #[test]
    fn test_add_keeps_sorted_and_ranks() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(entry("AAA", 50.0)), Some(1));
        assert_eq!(board.add(entry("BBB", 40.0)), Some(1));
        assert_eq!(board.add(entry("CCC", 45.0)), Some(2));
        // Tie goes after the existing time
        assert_eq!(board.add(entry("DDD", 45.0)), Some(3));

        let names: Vec<_> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["BBB", "CCC", "DDD", "AAA"]);
        assert_eq!(board.best_time(), Some(40.0));
    }

    #[test]
    fn test_full_board_trims() {
        let mut board = Leaderboard::new();
        for i in 0..MAX_ENTRIES {
            board.add(entry("AAA", 30.0 + i as f32));
        }
        assert!(!board.qualifies(60.0));
        assert_eq!(board.add(entry("ZZZ", 60.0)), None);
        assert_eq!(board.potential_rank(30.5), Some(2));
        assert_eq!(board.add(entry("NEW", 29.0)), Some(1));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.entries.last().map(|e| e.time), Some(38.0));
    }

    #[test]
    fn test_validate_normalizes() {
        let e = submission("ab1", 61.23456, 41.987).validate().unwrap();
        assert_eq!(e.name, "AB1");
        assert!((e.time - 61.235).abs() < 1e-4);
        assert!((e.top_speed - 41.99).abs() < 1e-4);
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(submission("", 10.0, 10.0).validate(), Err(ScoreError::NameLength));
        assert_eq!(submission("ABCD", 10.0, 10.0).validate(), Err(ScoreError::NameLength));
        assert_eq!(submission("A!", 10.0, 10.0).validate(), Err(ScoreError::NameCharacters));
        assert_eq!(submission("ABC", 0.0, 10.0).validate(), Err(ScoreError::TimeOutOfRange));
        assert_eq!(submission("ABC", 601.0, 10.0).validate(), Err(ScoreError::TimeOutOfRange));
        assert_eq!(submission("ABC", f32::NAN, 10.0).validate(), Err(ScoreError::TimeOutOfRange));
        assert_eq!(submission("ABC", 10.0, -1.0).validate(), Err(ScoreError::SpeedOutOfRange));
        assert_eq!(submission("ABC", 10.0, 250.0).validate(), Err(ScoreError::SpeedOutOfRange));

        let unknown = ScoreSubmission {
            track_id: "moon",
            ..submission("ABC", 10.0, 10.0)
        };
        assert_eq!(unknown.validate(), Err(ScoreError::UnknownTrack("moon".into())));
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_string(&Leaderboard {
            entries: vec![entry("QK", 75.5)],
        })
        .unwrap();
        assert_eq!(json, r#"[{"name":"QK","time":75.5,"topSpeed":30.0}]"#);

        let board: Leaderboard =
            serde_json::from_str(r#"[{"name":"A","time":12.0,"topSpeed":9.5,"date":"2024-01-01"}]"#)
                .unwrap();
        assert_eq!(board.entries[0].date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_best_sectors_record() {
        let mut best = BestSectors::default();
        assert!(best.as_reference().is_none());
        best.record(&[10.0, 12.0, 9.0]);
        best.record(&[11.0, 11.5, 9.5]);
        assert_eq!(best.times, vec![10.0, 11.5, 9.0]);
        assert_eq!(best.as_reference(), Some(vec![10.0, 11.5, 9.0]));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_storage_is_empty() {
        assert!(Leaderboard::load("alpine").is_empty());
        assert_eq!(BestSectors::load("alpine"), BestSectors::default());
    }
}
