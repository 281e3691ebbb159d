//! Points ledger: win/loss point mutations and their exact reversal
//!
//! Every operation takes the full player snapshot and returns a new one; the
//! input is never touched, so a failed operation leaves nothing half-applied.
//! Editing a recorded result is always `reverse(old)` followed by `apply(new)`
//! against the current snapshot.

use crate::error::Result;
use crate::scoring::validate_pairs;
use crate::types::{MatchResult, Pair, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Points awarded per match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    pub win: u32,
    /// Extra points for winning the first two sets
    pub bonus: u32,
    pub loss: u32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            win: 3,
            bonus: 1,
            loss: 1,
        }
    }
}

impl PointsTable {
    pub fn winner_points(&self, bonus: bool) -> u32 {
        if bonus {
            self.win + self.bonus
        } else {
            self.win
        }
    }
}

/// Applies and reverses match results over a player snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsLedger {
    table: PointsTable,
}

impl PointsLedger {
    pub fn new(table: PointsTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PointsTable {
        &self.table
    }

    /// Credit the winners and losers of a result.
    ///
    /// Ids in the result that are not in `players` (deleted players) are skipped.
    pub fn apply(&self, players: &[Player], result: &MatchResult) -> Result<Vec<Player>> {
        validate_pairs(&result.pair_a, &result.pair_b)?;

        let winners = result.winning_pair();
        let losers = result.losing_pair();
        let win_points = self.table.winner_points(result.bonus);

        let updated = players
            .iter()
            .map(|player| {
                let mut player = player.clone();
                if in_pair(winners, &player.id) {
                    player.points = player.points.saturating_add(win_points);
                    player.wins = player.wins.saturating_add(1);
                } else if in_pair(losers, &player.id) {
                    player.points = player.points.saturating_add(self.table.loss);
                    player.losses = player.losses.saturating_add(1);
                }
                player
            })
            .collect();

        debug!(
            "Applied result: {:?} +{} pts, {:?} +{} pts",
            winners, win_points, losers, self.table.loss
        );

        Ok(updated)
    }

    /// Undo a previously applied result. Counters never go below zero.
    pub fn reverse(&self, players: &[Player], result: &MatchResult) -> Result<Vec<Player>> {
        validate_pairs(&result.pair_a, &result.pair_b)?;

        let winners = result.winning_pair();
        let losers = result.losing_pair();
        let win_points = self.table.winner_points(result.bonus);

        let updated = players
            .iter()
            .map(|player| {
                let mut player = player.clone();
                if in_pair(winners, &player.id) {
                    if player.wins == 0 || player.points < win_points {
                        warn!(
                            "Reversing a win for {} below zero (points {}, wins {}), clamping",
                            player.id, player.points, player.wins
                        );
                    }
                    player.points = player.points.saturating_sub(win_points);
                    player.wins = player.wins.saturating_sub(1);
                } else if in_pair(losers, &player.id) {
                    if player.losses == 0 || player.points < self.table.loss {
                        warn!(
                            "Reversing a loss for {} below zero (points {}, losses {}), clamping",
                            player.id, player.points, player.losses
                        );
                    }
                    player.points = player.points.saturating_sub(self.table.loss);
                    player.losses = player.losses.saturating_sub(1);
                }
                player
            })
            .collect();

        debug!("Reversed result: winners {:?}, losers {:?}", winners, losers);

        Ok(updated)
    }

    /// Replace a recorded result: reverse the old one, then apply the new one.
    pub fn edit(
        &self,
        players: &[Player],
        old: &MatchResult,
        new: &MatchResult,
    ) -> Result<Vec<Player>> {
        // Check both before touching anything
        validate_pairs(&new.pair_a, &new.pair_b)?;
        let reversed = self.reverse(players, old)?;
        self.apply(&reversed, new)
    }
}

fn in_pair(pair: &Pair, player_id: &str) -> bool {
    pair.iter().any(|id| id == player_id)
}

/// Apply a result with the standard points table
pub fn apply_result(players: &[Player], result: &MatchResult) -> Result<Vec<Player>> {
    PointsLedger::default().apply(players, result)
}

/// Reverse a result with the standard points table
pub fn reverse_result(players: &[Player], result: &MatchResult) -> Result<Vec<Player>> {
    PointsLedger::default().reverse(players, result)
}
