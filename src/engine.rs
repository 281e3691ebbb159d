//! League engine facade
//!
//! Bundles the configured points table and award threshold and exposes the
//! whole-document operations a host application runs: one snapshot in, one
//! snapshot out.

use crate::config::LeagueSettings;
use crate::error::{LeagueError, Result};
use crate::ledger::PointsLedger;
use crate::ranking::{rank, AwardCalculator, SeasonAwards, Standing};
use crate::scoring::build_result;
use crate::season::{self, LevelPolicy};
use crate::types::{MatchResult, Pair, Player, SeasonId, SetEntry, Store};
use tracing::debug;

/// Pure engine over club document snapshots
#[derive(Debug, Clone, Copy)]
pub struct LeagueEngine {
    ledger: PointsLedger,
    awards: AwardCalculator,
    default_level: f64,
}

impl Default for LeagueEngine {
    fn default() -> Self {
        Self::from_settings(&LeagueSettings::default())
    }
}

impl LeagueEngine {
    pub fn from_settings(settings: &LeagueSettings) -> Self {
        Self {
            ledger: PointsLedger::new(settings.points),
            awards: AwardCalculator::new(settings.award_min_matches),
            default_level: settings.default_level,
        }
    }

    pub fn ledger(&self) -> &PointsLedger {
        &self.ledger
    }

    /// A new player with the configured starting level
    pub fn new_player(&self, id: impl Into<String>, name: impl Into<String>) -> Player {
        Player::new(id, name).with_level(self.default_level)
    }

    /// Pairs for a result: explicit override, else the match's default pairs
    fn result_pairs(
        store: &Store,
        match_id: &str,
        pairs: Option<(Pair, Pair)>,
    ) -> Result<(Pair, Pair)> {
        if let Some(pairs) = pairs {
            return Ok(pairs);
        }
        let m = store
            .current()
            .and_then(|s| s.find_match(match_id))
            .ok_or_else(|| LeagueError::MatchNotFound {
                match_id: match_id.to_string(),
            })?;
        m.default_pairs().ok_or_else(|| {
            LeagueError::NotEnoughPlayers {
                match_id: match_id.to_string(),
                signed_up: m.signed_up.len(),
            }
            .into()
        })
    }

    /// Turn entered sets into a result for a match of the current season
    pub fn prepare_result(
        &self,
        store: &Store,
        match_id: &str,
        sets: &[SetEntry],
        pairs: Option<(Pair, Pair)>,
    ) -> Result<MatchResult> {
        let (pair_a, pair_b) = Self::result_pairs(store, match_id, pairs)?;
        build_result(sets, pair_a, pair_b)
    }

    /// Save the first result of an open match in the current season
    pub fn record_result(
        &self,
        store: &Store,
        match_id: &str,
        sets: &[SetEntry],
        pairs: Option<(Pair, Pair)>,
    ) -> Result<Store> {
        let result = self.prepare_result(store, match_id, sets, pairs)?;
        season::update_current_season(store, |s| {
            season::record_result(s, match_id, result, &self.ledger)
        })
    }

    /// Replace the result of a completed match in the current season.
    ///
    /// Pairs default to the ones in the stored result.
    pub fn edit_result(
        &self,
        store: &Store,
        match_id: &str,
        sets: &[SetEntry],
        pairs: Option<(Pair, Pair)>,
    ) -> Result<Store> {
        let pairs = match pairs {
            Some(pairs) => Some(pairs),
            None => store
                .current()
                .and_then(|s| s.find_match(match_id))
                .and_then(|m| m.result.as_ref())
                .map(|r| (r.pair_a.clone(), r.pair_b.clone())),
        };
        let result = self.prepare_result(store, match_id, sets, pairs)?;
        debug!("Editing match {} with {} sets", match_id, result.sets.len());
        season::update_current_season(store, |s| {
            season::edit_result(s, match_id, result, &self.ledger)
        })
    }

    /// Standings of the current season
    pub fn standings(&self, store: &Store) -> Vec<Standing> {
        store.current().map(|s| rank(&s.players)).unwrap_or_default()
    }

    /// Awards of the current season
    pub fn awards(&self, store: &Store) -> SeasonAwards {
        self.awards
            .season_awards(&store.current().cloned().unwrap_or_default())
    }

    pub fn create_season(&self, store: &Store, policy: LevelPolicy) -> Result<Store> {
        season::create_season(store, policy)
    }

    pub fn switch_season(&self, store: &Store, id: SeasonId) -> Result<Store> {
        season::switch_season(store, id)
    }

    pub fn delete_season(&self, store: &Store, id: SeasonId) -> Result<Store> {
        season::delete_season(store, id)
    }
}
