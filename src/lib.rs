//! Padel League - Match scoring and seasonal ranking engine for a social padel club
//!
//! This crate validates set scores, resolves match outcomes, balances pairs,
//! keeps the points ledger consistent across result edits, and computes
//! standings and awards per season. Every operation is a pure transform over
//! a club document snapshot; persistence lives behind [`store::SnapshotStore`].

pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod pairing;
pub mod ranking;
pub mod scoring;
pub mod season;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LeagueError, Result};
pub use types::*;

// Re-export key components
pub use engine::LeagueEngine;
pub use ledger::{PointsLedger, PointsTable};
pub use ranking::{rank, AwardCalculator, SeasonAwards, Standing};
pub use scoring::{build_result, resolve_outcome, validate_set, SetScoreError};
pub use store::{InMemoryStore, JsonFileStore, SnapshotStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
