//! Standings and awards for the current season
//!
//! Everything here is recomputed from the season snapshot on each call; there
//! is no cached index to keep in sync.

pub mod awards;
pub mod standings;

// Re-export commonly used types
pub use awards::{AwardCalculator, AwardWinner, ManualAward, SeasonAwards};
pub use standings::{position_of, rank, ranking_order, unranked_players, Standing};
