//! Error types for the league engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Typed failures are raised as `LeagueError` and can be
//! recovered with `downcast_ref`.

use crate::scoring::validator::SetScoreError;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific league scenarios
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Invalid set score: {0}")]
    InvalidSetScore(SetScoreError),

    #[error("Incomplete result: {reason}")]
    IncompleteResult { reason: String },

    #[error("Ambiguous result: sets are tied {sets_a}-{sets_b}, a deciding set is required")]
    AmbiguousResult { sets_a: usize, sets_b: usize },

    #[error("Result does not match its sets: {reason}")]
    InconsistentResult { reason: String },

    #[error("Player {player_id} is not signed up for match {match_id}")]
    PairNotInRoster { match_id: String, player_id: String },

    #[error("Invalid pairs: {reason}")]
    InvalidPairs { reason: String },

    #[error("Cannot delete season {season}: it is the only remaining season")]
    LastSeason { season: u32 },

    #[error("Season not found: {season}")]
    SeasonNotFound { season: u32 },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Match is full: {match_id}")]
    MatchFull { match_id: String },

    #[error("Player {player_id} is already signed up for match {match_id}")]
    AlreadySignedUp { match_id: String, player_id: String },

    #[error("Player {player_id} is not signed up for match {match_id}")]
    NotSignedUp { match_id: String, player_id: String },

    #[error("Fixed player {player_id} can only be removed by an administrator")]
    FixedPlayerRemoval { player_id: String },

    #[error("Match is not open: {match_id}")]
    MatchNotOpen { match_id: String },

    #[error("Match has no recorded result: {match_id}")]
    MatchNotCompleted { match_id: String },

    #[error("Match {match_id} needs 4 players, has {signed_up}")]
    NotEnoughPlayers { match_id: String, signed_up: usize },

    #[error("Cannot schedule a match in the past: {date}")]
    DateInPast { date: String },

    #[error("Invalid date (expected YYYY-MM-DD): {date}")]
    InvalidDate { date: String },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },
}

impl From<SetScoreError> for LeagueError {
    fn from(err: SetScoreError) -> Self {
        LeagueError::InvalidSetScore(err)
    }
}

/// Downcast an engine error to its typed kind, if it has one
pub fn league_error(err: &anyhow::Error) -> Option<&LeagueError> {
    err.downcast_ref::<LeagueError>()
}
