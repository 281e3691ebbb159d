//! Points ledger for recorded match results
//!
//! This module applies win/loss point deltas to a season's players and
//! reverses them exactly when a result is edited.

pub mod points;

// Re-export commonly used types
pub use points::{apply_result, reverse_result, PointsLedger, PointsTable};
