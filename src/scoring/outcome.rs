//! Match outcome resolution and result save gating
//!
//! Turns the sets typed in for a match into a [`MatchResult`]: who won,
//! whether the winners earned the straight-sets bonus, and whether the input
//! is complete enough to be saved at all.

use crate::error::{LeagueError, Result};
use crate::scoring::validator::{validate_entry, MAX_SET_INDEX};
use crate::types::{MatchResult, Pair, SetEntry, SetScore, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sets a pair must win to take the match
pub const SETS_TO_WIN: usize = 2;

/// Winner and bonus derived from a list of sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub bonus: bool,
    pub sets_won_a: usize,
    pub sets_won_b: usize,
}

/// Resolve the winner of a list of fully-entered sets.
///
/// A pair with two set wins takes the match; with fewer decided sets the pair
/// ahead wins. Returns `None` when no side is ahead (no sets, or a 1-1 split).
pub fn resolve_outcome(sets: &[SetScore]) -> Option<Outcome> {
    let sets_won_a = sets.iter().filter(|s| s.winner() == Some(Side::A)).count();
    let sets_won_b = sets.iter().filter(|s| s.winner() == Some(Side::B)).count();

    let winner = if sets_won_a >= SETS_TO_WIN {
        Side::A
    } else if sets_won_b >= SETS_TO_WIN {
        Side::B
    } else if sets_won_a > sets_won_b {
        Side::A
    } else if sets_won_b > sets_won_a {
        Side::B
    } else {
        return None;
    };

    let bonus = match sets {
        [first, second, ..] => {
            first.winner() == Some(winner) && second.winner() == Some(winner)
        }
        _ => false,
    };

    Some(Outcome {
        winner,
        bonus,
        sets_won_a,
        sets_won_b,
    })
}

/// Check that two pairs are made of four distinct players
pub fn validate_pairs(pair_a: &Pair, pair_b: &Pair) -> Result<()> {
    let ids = [&pair_a[0], &pair_a[1], &pair_b[0], &pair_b[1]];
    for (i, id) in ids.iter().enumerate() {
        if ids[i + 1..].contains(id) {
            return Err(LeagueError::InvalidPairs {
                reason: format!("player {} appears more than once", id),
            }
            .into());
        }
    }
    Ok(())
}

/// Build a saveable result from entered sets.
///
/// The first two sets must be fully entered and every entered set must be
/// legal. A half-entered set blocks saving. A 1-1 split with no deciding set is
/// ambiguous and blocks saving too. Blank trailing sets are dropped.
pub fn build_result(entries: &[SetEntry], pair_a: Pair, pair_b: Pair) -> Result<MatchResult> {
    validate_pairs(&pair_a, &pair_b)?;

    if entries.len() > MAX_SET_INDEX + 1 {
        return Err(LeagueError::IncompleteResult {
            reason: format!("a match has at most {} sets", MAX_SET_INDEX + 1),
        }
        .into());
    }

    let mut sets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if entry.is_blank() && index >= SETS_TO_WIN {
            continue;
        }
        let Some(score) = entry.score() else {
            return Err(LeagueError::IncompleteResult {
                reason: format!("set {} is not fully entered", index + 1),
            }
            .into());
        };
        if let Some(err) = validate_entry(index, entry) {
            return Err(LeagueError::from(err).into());
        }
        sets.push(score);
    }

    if sets.len() < SETS_TO_WIN {
        return Err(LeagueError::IncompleteResult {
            reason: "the first two sets are required".to_string(),
        }
        .into());
    }

    let outcome = resolve_outcome(&sets).ok_or_else(|| {
        let sets_won_a = sets.iter().filter(|s| s.winner() == Some(Side::A)).count();
        LeagueError::AmbiguousResult {
            sets_a: sets_won_a,
            sets_b: sets.len() - sets_won_a,
        }
    })?;

    debug!(
        "Resolved result: winner {} ({}-{}), bonus {}",
        outcome.winner, outcome.sets_won_a, outcome.sets_won_b, outcome.bonus
    );

    Ok(MatchResult {
        sets,
        pair_a,
        pair_b,
        winner: outcome.winner,
        bonus: outcome.bonus,
    })
}

/// Check a ready-made result before it is stored: its sets must pass the same
/// gating as entered sets, and its winner and bonus must follow from them.
pub fn check_result(result: &MatchResult) -> Result<()> {
    let entries: Vec<SetEntry> = result.sets.iter().copied().map(SetEntry::from).collect();
    let expected = build_result(&entries, result.pair_a.clone(), result.pair_b.clone())?;

    if expected.winner != result.winner || expected.bonus != result.bonus {
        return Err(LeagueError::InconsistentResult {
            reason: format!(
                "sets give pair {} the win{}, result says pair {}{}",
                expected.winner,
                if expected.bonus { " with bonus" } else { "" },
                result.winner,
                if result.bonus { " with bonus" } else { "" }
            ),
        }
        .into());
    }
    Ok(())
}
