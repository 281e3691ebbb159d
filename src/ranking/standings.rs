//! Season standings
//!
//! Fixed players are scheduling conveniences and never ranked. Everyone else
//! is ordered by points, then level, then roster order.

use crate::types::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A ranked player with its 1-based position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub position: usize,
    pub player: Player,
}

/// Ranking order: points descending, then level descending
pub fn ranking_order(a: &Player, b: &Player) -> Ordering {
    b.points.cmp(&a.points).then_with(|| {
        b.level
            .partial_cmp(&a.level)
            .unwrap_or(Ordering::Equal)
    })
}

/// Rank the non-fixed players of a roster
pub fn rank(players: &[Player]) -> Vec<Standing> {
    let mut ranked: Vec<&Player> = players.iter().filter(|p| !p.fixed).collect();
    // Stable sort keeps roster order for full ties
    ranked.sort_by(|a, b| ranking_order(a, b));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, player)| Standing {
            position: index + 1,
            player: player.clone(),
        })
        .collect()
}

/// Position of a player in the standings, `None` for fixed or unknown players
pub fn position_of(standings: &[Standing], player_id: &PlayerId) -> Option<usize> {
    standings
        .iter()
        .find(|s| &s.player.id == player_id)
        .map(|s| s.position)
}

/// Fixed players in roster order, listed after the standings
pub fn unranked_players(players: &[Player]) -> Vec<Player> {
    players.iter().filter(|p| p.fixed).cloned().collect()
}
