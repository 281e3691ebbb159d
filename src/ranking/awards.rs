//! Season awards
//!
//! Computed awards are derived from the standings on demand. Manual awards are
//! assigned by an administrator and store a player's display name, not an id,
//! so they survive player deletion but do not follow renames.

use crate::ranking::standings::{rank, Standing};
use crate::types::{Player, Season};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum completed matches to qualify for the level awards
pub const DEFAULT_MIN_MATCHES: u32 = 3;

/// Awards assigned by hand, keyed in the season's `specialWinners` map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManualAward {
    /// Most unpunctual player
    LateArrival,
    /// Brought the most new players to the club
    Recruiter,
}

impl ManualAward {
    pub const ALL: [ManualAward; 2] = [ManualAward::LateArrival, ManualAward::Recruiter];

    pub fn key(&self) -> &'static str {
        match self {
            ManualAward::LateArrival => "impuntual",
            ManualAward::Recruiter => "colega",
        }
    }

    pub fn from_key(key: &str) -> Option<ManualAward> {
        Self::ALL.into_iter().find(|award| award.key() == key)
    }
}

impl std::fmt::Display for ManualAward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A computed award winner with the stat that earned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardWinner {
    pub player: Player,
    pub matches_played: u32,
}

impl From<&Player> for AwardWinner {
    fn from(player: &Player) -> Self {
        Self {
            player: player.clone(),
            matches_played: player.matches_played(),
        }
    }
}

/// All awards for one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAwards {
    pub top_three: Vec<Standing>,
    pub highest_level: Option<AwardWinner>,
    pub most_active: Option<AwardWinner>,
    pub lowest_level: Option<AwardWinner>,
    /// Manual award key -> assigned display name
    pub manual: BTreeMap<String, String>,
}

/// Computes awards with a configurable qualifying threshold
#[derive(Debug, Clone, Copy)]
pub struct AwardCalculator {
    min_matches: u32,
}

impl Default for AwardCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MATCHES)
    }
}

impl AwardCalculator {
    pub fn new(min_matches: u32) -> Self {
        Self { min_matches }
    }

    fn competitors<'a>(&self, players: &'a [Player]) -> impl Iterator<Item = &'a Player> {
        players.iter().filter(|p| !p.fixed)
    }

    fn qualified<'a>(&self, players: &'a [Player]) -> impl Iterator<Item = &'a Player> {
        let min_matches = self.min_matches;
        self.competitors(players)
            .filter(move |p| p.matches_played() >= min_matches)
    }

    /// First three of the standings, no qualifying threshold
    pub fn top_three(&self, players: &[Player]) -> Vec<Standing> {
        rank(players).into_iter().take(3).collect()
    }

    /// Qualified player with the highest level; first one wins ties
    pub fn highest_level(&self, players: &[Player]) -> Option<AwardWinner> {
        self.qualified(players)
            .fold(None, |best: Option<&Player>, p| match best {
                Some(b) if b.level >= p.level => Some(b),
                _ => Some(p),
            })
            .map(AwardWinner::from)
    }

    /// Qualified player with the lowest level; first one wins ties
    pub fn lowest_level(&self, players: &[Player]) -> Option<AwardWinner> {
        self.qualified(players)
            .fold(None, |best: Option<&Player>, p| match best {
                Some(b) if b.level <= p.level => Some(b),
                _ => Some(p),
            })
            .map(AwardWinner::from)
    }

    /// Player with the most completed matches, if anyone has played
    pub fn most_active(&self, players: &[Player]) -> Option<AwardWinner> {
        self.competitors(players)
            .filter(|p| p.matches_played() > 0)
            .fold(None, |best: Option<&Player>, p| match best {
                Some(b) if b.matches_played() >= p.matches_played() => Some(b),
                _ => Some(p),
            })
            .map(AwardWinner::from)
    }

    pub fn season_awards(&self, season: &Season) -> SeasonAwards {
        SeasonAwards {
            top_three: self.top_three(&season.players),
            highest_level: self.highest_level(&season.players),
            most_active: self.most_active(&season.players),
            lowest_level: self.lowest_level(&season.players),
            manual: season.special_winners.clone(),
        }
    }
}
