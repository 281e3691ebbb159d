//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use padel_league::error::Result;
use padel_league::season::{self, join_match, schedule_match};
use padel_league::store::SnapshotStore;
use padel_league::types::{Match, MatchResult, Player, Season, SetEntry, Store};
use padel_league::utils::parse_iso_date;
use padel_league::{LeagueEngine, Pair};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

/// Snapshot store that keeps every saved document for inspection
#[derive(Debug, Default)]
pub struct RecordingStore {
    saved: Arc<Mutex<Vec<Store>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves so far
    pub fn save_count(&self) -> usize {
        self.saved.lock().map(|saved| saved.len()).unwrap_or_default()
    }

    pub fn last_saved(&self) -> Option<Store> {
        self.saved
            .lock()
            .ok()
            .and_then(|saved| saved.last().cloned())
    }
}

#[async_trait]
impl SnapshotStore for RecordingStore {
    async fn load(&self) -> Result<Option<Store>> {
        Ok(self.last_saved())
    }

    async fn save(&self, store: &Store) -> Result<()> {
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(store.clone());
        }
        Ok(())
    }
}

/// The date matches are scheduled against
pub fn fixed_today() -> NaiveDate {
    parse_iso_date("2026-03-01").unwrap()
}

pub fn pair(a: &str, b: &str) -> Pair {
    [a.to_string(), b.to_string()]
}

pub fn sets(scores: &[(u32, u32)]) -> Vec<SetEntry> {
    scores.iter().map(|&(a, b)| SetEntry::new(a, b)).collect()
}

/// Eight players with levels 4.0 down to 0.5
pub fn roster() -> Vec<Player> {
    let names = ["Ana", "Bea", "Carla", "Dani", "Edu", "Fran", "Gema", "Hugo"];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Player::new(format!("p{}", i + 1), *name).with_level(4.0 - i as f64 * 0.5)
        })
        .collect()
}

/// Club document whose current season holds `roster()`
pub fn store_with_roster() -> Store {
    let mut store = Store::new("Padel Norte");
    if let Some(season) = store.seasons.get_mut(&1) {
        season.players = roster();
    }
    store
}

/// Schedule a match on the current season and sign the given players up
pub fn full_match(store: &Store, match_id: &str, date: &str, players: [&str; 4]) -> Store {
    season::update_current_season(store, |s| {
        let s = schedule_match(
            s,
            Match::new(match_id, date, "20:00", "Gaitanes"),
            fixed_today(),
        )?;
        players
            .iter()
            .try_fold(s, |s, id| join_match(&s, match_id, id))
    })
    .unwrap()
}

/// Schedule, fill and record a match in one go
pub fn played_match(
    engine: &LeagueEngine,
    store: &Store,
    match_id: &str,
    date: &str,
    players: [&str; 4],
    scores: &[(u32, u32)],
) -> Store {
    let store = full_match(store, match_id, date, players);
    engine
        .record_result(&store, match_id, &sets(scores), None)
        .unwrap()
}

pub fn current(store: &Store) -> &Season {
    store.current().unwrap()
}

pub fn stored_result<'a>(store: &'a Store, match_id: &str) -> &'a MatchResult {
    current(store)
        .find_match(match_id)
        .and_then(|m| m.result.as_ref())
        .unwrap()
}

/// Points, wins and losses of one player in the current season
pub fn stats(store: &Store, player_id: &str) -> (u32, u32, u32) {
    let p = current(store).player(player_id).unwrap();
    (p.points, p.wins, p.losses)
}
