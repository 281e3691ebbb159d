//! Season management and season-scoped league operations
//!
//! `manager` moves the club document between seasons; `dataset` holds the
//! roster, match and result operations that run inside the current season.

pub mod announcement;
pub mod dataset;
pub mod manager;

// Re-export commonly used types
pub use announcement::announcement;
pub use dataset::{
    add_player, cancel_match, count_discrepancies, edit_result, history, join_match,
    leave_match, matches_played_by, open_matches, pending_results, record_result, remove_player,
    schedule_match, set_special_winner, update_player, CountDiscrepancy, PlayerUpdate, Requester,
};
pub use manager::{
    create_season, delete_season, list_seasons, set_club_name, switch_season,
    update_current_season, LevelPolicy, SeasonSummary,
};
