//! Skill-balanced pairing of four signed-up players
//!
//! Players are ordered by level (highest first, sign-up order on ties) and
//! paired snake-style: 1st with 4th, 2nd with 3rd. For four sorted levels this
//! always gives the smallest level-sum gap of the three possible pairings.

use crate::error::{LeagueError, Result};
use crate::types::{Pair, Player, MATCH_CAPACITY};
use tracing::debug;

/// Split exactly four players into two balanced pairs
pub fn balance_pairs(players: &[Player]) -> Result<[Pair; 2]> {
    if players.len() != MATCH_CAPACITY {
        return Err(LeagueError::InvalidPairs {
            reason: format!(
                "pair balancing needs {} players, got {}",
                MATCH_CAPACITY,
                players.len()
            ),
        }
        .into());
    }

    let mut sorted: Vec<&Player> = players.iter().collect();
    // sort_by is stable, so equal levels keep sign-up order
    sorted.sort_by(|a, b| {
        b.level
            .partial_cmp(&a.level)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let pairs = [
        [sorted[0].id.clone(), sorted[3].id.clone()],
        [sorted[1].id.clone(), sorted[2].id.clone()],
    ];

    debug!(
        "Balanced pairs {:?} vs {:?} (level gap {:.2})",
        pairs[0],
        pairs[1],
        (sorted[0].level + sorted[3].level - sorted[1].level - sorted[2].level).abs()
    );

    Ok(pairs)
}

/// Sum of the levels of a pair; unknown players count as the default level
pub fn pair_level(pair: &Pair, players: &[Player]) -> f64 {
    pair.iter()
        .map(|id| {
            players
                .iter()
                .find(|p| &p.id == id)
                .map(|p| p.level)
                .unwrap_or(crate::types::DEFAULT_LEVEL)
        })
        .sum()
}

/// Absolute difference between the level sums of two pairs
pub fn level_gap(pairs: &[Pair; 2], players: &[Player]) -> f64 {
    (pair_level(&pairs[0], players) - pair_level(&pairs[1], players)).abs()
}
