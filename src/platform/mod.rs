//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, no-op natively)
//! - The JS-facing race wrapper (web only)

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;
