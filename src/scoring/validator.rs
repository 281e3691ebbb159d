//! Set score validation
//!
//! Sets 1 and 2 are standard advantage sets played to 6 (7-5 and a 7-6 tiebreak
//! allowed, two clear games once both sides reach 6). Set 3 is a super-tiebreak
//! to 10 with a margin of 2. Messages are user-facing and shown next to the set.

use crate::types::SetEntry;

/// Highest zero-based set index a match can have
pub const MAX_SET_INDEX: usize = 2;

/// Games needed to win a standard set
const STANDARD_SET_GAMES: u32 = 6;

/// Points needed to win the super-tiebreak
const SUPER_TIEBREAK_POINTS: u32 = 10;

/// Scoring variant that applies to a set position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    Standard,
    SuperTiebreak,
}

impl SetKind {
    pub fn for_index(index: usize) -> Option<SetKind> {
        match index {
            0 | 1 => Some(SetKind::Standard),
            MAX_SET_INDEX => Some(SetKind::SuperTiebreak),
            _ => None,
        }
    }
}

/// Reason a set score is not legal. `set` is the 1-based set number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetScoreError {
    #[error("Empate no permitido")]
    Draw,

    #[error("Set {set}: ganador debe llegar al menos a 6")]
    WinnerBelowSix { set: usize },

    #[error("Set {set}: si perdedor<5, ganador debe tener 6")]
    MustEndAtSix { set: usize },

    #[error("Set {set}: con 5 juegos, ganador debe tener 7")]
    MustEndAtSeven { set: usize },

    #[error("Set {set}: desde 6-6 diferencia de 2")]
    ExtendedMargin { set: usize },

    #[error("3er set: hasta 10 con diferencia de 2")]
    SuperTiebreak,

    #[error("Set {set}: un partido tiene como máximo 3 sets")]
    TooManySets { set: usize },
}

/// Validate one fully-entered set. `index` is zero-based.
pub fn validate_set(index: usize, games_a: u32, games_b: u32) -> Option<SetScoreError> {
    let set = index + 1;
    let Some(kind) = SetKind::for_index(index) else {
        return Some(SetScoreError::TooManySets { set });
    };

    if games_a == games_b {
        return Some(SetScoreError::Draw);
    }

    let hi = games_a.max(games_b);
    let lo = games_a.min(games_b);

    match kind {
        SetKind::Standard => {
            if hi < STANDARD_SET_GAMES {
                Some(SetScoreError::WinnerBelowSix { set })
            } else if lo < 5 && hi != STANDARD_SET_GAMES {
                Some(SetScoreError::MustEndAtSix { set })
            } else if lo == 5 && hi != 7 {
                Some(SetScoreError::MustEndAtSeven { set })
            } else if lo == 6 && hi == 7 {
                // tiebreak
                None
            } else if lo >= 6 && hi - lo != 2 {
                Some(SetScoreError::ExtendedMargin { set })
            } else {
                None
            }
        }
        SetKind::SuperTiebreak => {
            if hi >= SUPER_TIEBREAK_POINTS && hi - lo >= 2 {
                None
            } else {
                Some(SetScoreError::SuperTiebreak)
            }
        }
    }
}

/// Message form of [`validate_set`]
pub fn validate_set_message(index: usize, games_a: u32, games_b: u32) -> Option<String> {
    validate_set(index, games_a, games_b).map(|err| err.to_string())
}

/// Validate a set while it is being typed in. Half-entered sets never report.
pub fn validate_entry(index: usize, entry: &SetEntry) -> Option<SetScoreError> {
    let score = entry.score()?;
    validate_set(index, score.a, score.b)
}

/// Errors for every fully-entered set, in set order
pub fn set_errors(entries: &[SetEntry]) -> Vec<SetScoreError> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| validate_entry(index, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sets_accepted() {
        for (a, b) in [(6, 0), (6, 4), (4, 6), (7, 5), (5, 7), (7, 6), (6, 7), (8, 6), (10, 12)] {
            assert_eq!(validate_set(0, a, b), None, "{a}-{b} should be valid");
            assert_eq!(validate_set(1, a, b), None, "{a}-{b} should be valid");
        }
    }

    #[test]
    fn test_standard_sets_rejected() {
        assert_eq!(validate_set(0, 6, 6), Some(SetScoreError::Draw));
        assert_eq!(
            validate_set(0, 5, 3),
            Some(SetScoreError::WinnerBelowSix { set: 1 })
        );
        assert_eq!(
            validate_set(1, 7, 4),
            Some(SetScoreError::MustEndAtSix { set: 2 })
        );
        assert_eq!(
            validate_set(0, 6, 5),
            Some(SetScoreError::MustEndAtSeven { set: 1 })
        );
        assert_eq!(
            validate_set(0, 8, 5),
            Some(SetScoreError::MustEndAtSeven { set: 1 })
        );
        assert_eq!(
            validate_set(0, 9, 6),
            Some(SetScoreError::ExtendedMargin { set: 1 })
        );
        assert_eq!(
            validate_set(1, 8, 7),
            Some(SetScoreError::ExtendedMargin { set: 2 })
        );
    }

    #[test]
    fn test_super_tiebreak() {
        assert_eq!(validate_set(2, 10, 8), None);
        assert_eq!(validate_set(2, 11, 9), None);
        assert_eq!(validate_set(2, 3, 10), None);
        assert_eq!(validate_set(2, 10, 9), Some(SetScoreError::SuperTiebreak));
        assert_eq!(validate_set(2, 6, 4), Some(SetScoreError::SuperTiebreak));
        assert_eq!(validate_set(2, 10, 10), Some(SetScoreError::Draw));
    }

    #[test]
    fn test_fourth_set_rejected() {
        assert_eq!(
            validate_set(3, 6, 0),
            Some(SetScoreError::TooManySets { set: 4 })
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(validate_set_message(0, 7, 5), None);
        assert_eq!(
            validate_set_message(0, 9, 6).as_deref(),
            Some("Set 1: desde 6-6 diferencia de 2")
        );
        assert_eq!(
            validate_set_message(2, 10, 9).as_deref(),
            Some("3er set: hasta 10 con diferencia de 2")
        );
    }

    #[test]
    fn test_half_entered_sets_are_silent() {
        let entries = [
            SetEntry {
                a: Some(3),
                b: None,
            },
            SetEntry::new(6, 6),
            SetEntry::blank(),
        ];
        assert_eq!(validate_entry(0, &entries[0]), None);
        assert_eq!(set_errors(&entries), vec![SetScoreError::Draw]);
    }
}
