//! Season-scoped operations: roster, match sign-ups and results
//!
//! Each operation takes the current season snapshot and returns a new one.
//! Checks run before any mutation, and mutations are made on a clone, so an
//! error always leaves the caller's snapshot as it was.

use crate::error::{LeagueError, Result};
use crate::ledger::PointsLedger;
use crate::pairing::balance_pairs;
use crate::ranking::ManualAward;
use crate::scoring::check_result;
use crate::types::{
    Match, MatchId, MatchResult, MatchStatus, Player, PlayerId, Season, MATCH_CAPACITY,
};
use crate::utils::parse_iso_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Editable player fields; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub level: Option<f64>,
    pub points: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub fixed: Option<bool>,
}

/// Who is asking to take a player off a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// Self-service sign-up page
    Member,
    Admin,
}

/// A player whose win/loss counters disagree with the completed matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDiscrepancy {
    pub player_id: PlayerId,
    pub recorded: u32,
    pub completed_matches: u32,
}

fn match_index(season: &Season, match_id: &str) -> Result<usize> {
    season
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or_else(|| {
            LeagueError::MatchNotFound {
                match_id: match_id.to_string(),
            }
            .into()
        })
}

fn player_index(season: &Season, player_id: &str) -> Result<usize> {
    season
        .players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or_else(|| {
            LeagueError::PlayerNotFound {
                player_id: player_id.to_string(),
            }
            .into()
        })
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::InvalidPlayer {
            reason: "name cannot be empty".to_string(),
        }
        .into());
    }
    Ok(trimmed.to_string())
}

fn validate_level(level: f64) -> Result<()> {
    if !level.is_finite() || level <= 0.0 {
        return Err(LeagueError::InvalidPlayer {
            reason: format!("level must be positive, got {}", level),
        }
        .into());
    }
    Ok(())
}

/// Recompute the balanced pairs of a full match, or clear them.
///
/// Pairs stay empty if a signed-up id no longer resolves to a player.
fn refresh_pairs(m: &mut Match, players: &[Player]) {
    m.pairs.clear();
    if m.signed_up.len() != MATCH_CAPACITY {
        return;
    }

    let roster: Vec<Player> = m
        .signed_up
        .iter()
        .filter_map(|id| players.iter().find(|p| &p.id == id).cloned())
        .collect();

    match balance_pairs(&roster) {
        Ok(pairs) => m.pairs = pairs.to_vec(),
        Err(e) => warn!("Could not balance pairs for match {}: {}", m.id, e),
    }
}

/// Every id of a result must be one of the four players signed up for the match,
/// and the result must agree with its own sets
fn check_stored_result(m: &Match, result: &MatchResult) -> Result<()> {
    check_result(result)?;
    for player_id in result.pair_a.iter().chain(result.pair_b.iter()) {
        if !m.is_signed_up(player_id) {
            return Err(LeagueError::PairNotInRoster {
                match_id: m.id.clone(),
                player_id: player_id.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Add a new player to the season roster
pub fn add_player(season: &Season, player: Player) -> Result<Season> {
    let name = validate_name(&player.name)?;
    validate_level(player.level)?;
    if season.player(&player.id).is_some() {
        return Err(LeagueError::InvalidPlayer {
            reason: format!("duplicate player id {}", player.id),
        }
        .into());
    }

    let mut next = season.clone();
    info!("Adding player {} ({})", name, player.id);
    next.players.push(Player { name, ..player });
    Ok(next)
}

/// Administrator edit of any player field
pub fn update_player(season: &Season, player_id: &str, update: PlayerUpdate) -> Result<Season> {
    let index = player_index(season, player_id)?;
    let name = update.name.as_deref().map(validate_name).transpose()?;
    if let Some(level) = update.level {
        validate_level(level)?;
    }

    let mut next = season.clone();
    let player = &mut next.players[index];
    if let Some(name) = name {
        player.name = name;
    }
    if let Some(level) = update.level {
        player.level = level;
    }
    if let Some(points) = update.points {
        player.points = points;
    }
    if let Some(wins) = update.wins {
        player.wins = wins;
    }
    if let Some(losses) = update.losses {
        player.losses = losses;
    }
    if let Some(fixed) = update.fixed {
        player.fixed = fixed;
    }
    debug!("Updated player {}", player_id);
    Ok(next)
}

/// Delete a player. Matches keep the id and resolve it as unknown from now on.
pub fn remove_player(season: &Season, player_id: &str) -> Result<Season> {
    let index = player_index(season, player_id)?;
    let mut next = season.clone();
    let removed = next.players.remove(index);
    info!("Removed player {} ({})", removed.name, removed.id);
    Ok(next)
}

/// Schedule an open match. Fixed players are signed up straight away.
pub fn schedule_match(season: &Season, new_match: Match, today: NaiveDate) -> Result<Season> {
    let date = parse_iso_date(&new_match.date).ok_or_else(|| LeagueError::InvalidDate {
        date: new_match.date.clone(),
    })?;
    if date < today {
        return Err(LeagueError::DateInPast {
            date: new_match.date.clone(),
        }
        .into());
    }
    let mut m = Match {
        status: MatchStatus::Open,
        signed_up: season
            .fixed_player_ids()
            .into_iter()
            .take(MATCH_CAPACITY)
            .collect(),
        pairs: Vec::new(),
        result: None,
        ..new_match
    };
    refresh_pairs(&mut m, &season.players);

    info!(
        "Scheduled match {} on {} {} at {} ({} fixed players)",
        m.id,
        m.date,
        m.time,
        m.location,
        m.signed_up.len()
    );

    let mut next = season.clone();
    next.matches.push(m);
    Ok(next)
}

/// Remove an open match from the calendar
pub fn cancel_match(season: &Season, match_id: &str) -> Result<Season> {
    let index = match_index(season, match_id)?;
    if !season.matches[index].is_open() {
        return Err(LeagueError::MatchNotOpen {
            match_id: match_id.to_string(),
        }
        .into());
    }

    let mut next = season.clone();
    next.matches.remove(index);
    info!("Cancelled match {}", match_id);
    Ok(next)
}

/// Sign a player up. The fourth sign-up triggers pair balancing.
pub fn join_match(season: &Season, match_id: &str, player_id: &str) -> Result<Season> {
    let index = match_index(season, match_id)?;
    player_index(season, player_id)?;

    let m = &season.matches[index];
    if !m.is_open() {
        return Err(LeagueError::MatchNotOpen {
            match_id: match_id.to_string(),
        }
        .into());
    }
    if m.is_signed_up(player_id) {
        return Err(LeagueError::AlreadySignedUp {
            match_id: match_id.to_string(),
            player_id: player_id.to_string(),
        }
        .into());
    }
    if m.is_full() {
        return Err(LeagueError::MatchFull {
            match_id: match_id.to_string(),
        }
        .into());
    }

    let mut next = season.clone();
    let m = &mut next.matches[index];
    m.signed_up.push(player_id.to_string());
    refresh_pairs(m, &season.players);
    debug!(
        "Player {} joined match {} ({}/{})",
        player_id,
        match_id,
        m.signed_up.len(),
        MATCH_CAPACITY
    );
    Ok(next)
}

/// Take a player off a match; any computed pairs are discarded.
pub fn leave_match(
    season: &Season,
    match_id: &str,
    player_id: &str,
    requester: Requester,
) -> Result<Season> {
    let index = match_index(season, match_id)?;
    let m = &season.matches[index];
    if !m.is_open() {
        return Err(LeagueError::MatchNotOpen {
            match_id: match_id.to_string(),
        }
        .into());
    }
    if !m.is_signed_up(player_id) {
        return Err(LeagueError::NotSignedUp {
            match_id: match_id.to_string(),
            player_id: player_id.to_string(),
        }
        .into());
    }
    let is_fixed = season.player(player_id).map(|p| p.fixed).unwrap_or(false);
    if is_fixed && requester != Requester::Admin {
        return Err(LeagueError::FixedPlayerRemoval {
            player_id: player_id.to_string(),
        }
        .into());
    }

    let mut next = season.clone();
    let m = &mut next.matches[index];
    m.signed_up.retain(|id| id != player_id);
    m.pairs.clear();
    debug!("Player {} left match {}", player_id, match_id);
    Ok(next)
}

/// Save the first result of a full, open match and credit the ledger
pub fn record_result(
    season: &Season,
    match_id: &str,
    result: MatchResult,
    ledger: &PointsLedger,
) -> Result<Season> {
    let index = match_index(season, match_id)?;
    let m = &season.matches[index];
    if !m.is_open() {
        return Err(LeagueError::MatchNotOpen {
            match_id: match_id.to_string(),
        }
        .into());
    }
    if m.signed_up.len() != MATCH_CAPACITY {
        return Err(LeagueError::NotEnoughPlayers {
            match_id: match_id.to_string(),
            signed_up: m.signed_up.len(),
        }
        .into());
    }
    check_stored_result(m, &result)?;

    let players = ledger.apply(&season.players, &result)?;

    info!(
        "Recorded result for match {}: pair {} won{}",
        match_id,
        result.winner,
        if result.bonus { " with bonus" } else { "" }
    );

    let mut next = season.clone();
    next.players = players;
    let m = &mut next.matches[index];
    m.status = MatchStatus::Completed;
    m.result = Some(result);
    Ok(next)
}

/// Replace the result of a completed match.
///
/// The old result is reversed and the new one applied against the current
/// players in one step; the match stays completed.
pub fn edit_result(
    season: &Season,
    match_id: &str,
    result: MatchResult,
    ledger: &PointsLedger,
) -> Result<Season> {
    let index = match_index(season, match_id)?;
    let m = &season.matches[index];
    let old = match (&m.status, &m.result) {
        (MatchStatus::Completed, Some(old)) => old,
        _ => {
            return Err(LeagueError::MatchNotCompleted {
                match_id: match_id.to_string(),
            }
            .into())
        }
    };
    check_stored_result(m, &result)?;

    let players = ledger.edit(&season.players, old, &result)?;

    info!(
        "Edited result for match {}: pair {} won{} (was pair {})",
        match_id,
        result.winner,
        if result.bonus { " with bonus" } else { "" },
        old.winner
    );

    let mut next = season.clone();
    next.players = players;
    next.matches[index].result = Some(result);
    Ok(next)
}

/// Assign a manual award by display name; an empty name clears it
pub fn set_special_winner(season: &Season, award: ManualAward, name: &str) -> Season {
    let mut next = season.clone();
    let name = name.trim();
    if name.is_empty() {
        next.special_winners.remove(award.key());
        debug!("Cleared manual award {}", award);
    } else {
        next.special_winners
            .insert(award.key().to_string(), name.to_string());
        debug!("Assigned manual award {} to {}", award, name);
    }
    next
}

/// Open matches, in calendar order of creation
pub fn open_matches(season: &Season) -> Vec<&Match> {
    season.matches.iter().filter(|m| m.is_open()).collect()
}

/// Open matches with a full roster, waiting for a result
pub fn pending_results(season: &Season) -> Vec<&Match> {
    season
        .matches
        .iter()
        .filter(|m| m.is_open() && m.signed_up.len() == MATCH_CAPACITY)
        .collect()
}

/// Completed matches, most recent date first
pub fn history(season: &Season) -> Vec<&Match> {
    let mut completed: Vec<&Match> = season
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed)
        .collect();
    completed.sort_by(|a, b| b.date.cmp(&a.date));
    completed
}

/// Match ids where the player appears in a recorded result
pub fn matches_played_by<'a>(season: &'a Season, player_id: &str) -> Vec<&'a MatchId> {
    season
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed)
        .filter(|m| {
            m.result.as_ref().is_some_and(|r| {
                r.pair_a.iter().chain(r.pair_b.iter()).any(|id| id == player_id)
            })
        })
        .map(|m| &m.id)
        .collect()
}

/// Players whose `wins + losses` differs from their completed matches
pub fn count_discrepancies(season: &Season) -> Vec<CountDiscrepancy> {
    season
        .players
        .iter()
        .filter_map(|p| {
            let completed_matches = matches_played_by(season, &p.id).len() as u32;
            (p.matches_played() != completed_matches).then(|| CountDiscrepancy {
                player_id: p.id.clone(),
                recorded: p.matches_played(),
                completed_matches,
            })
        })
        .collect()
}
