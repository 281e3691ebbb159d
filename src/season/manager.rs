//! Season lifecycle over the club document
//!
//! The store always holds at least one season and exactly one of them is
//! current. New seasons copy the current roster with cleared stats.

use crate::error::{LeagueError, Result};
use crate::types::{Player, Season, SeasonId, Store, DEFAULT_LEVEL};
use serde::{Deserialize, Serialize};
use tracing::info;

/// What happens to skill levels when a new season starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPolicy {
    /// Keep each player's level from the current season
    Carry,
    /// Start everyone again at the default level
    Reset,
}

/// One line of the season list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: SeasonId,
    pub current: bool,
    pub players: usize,
    pub matches: usize,
}

/// Start a new season from the current one and make it current.
///
/// The id is one more than the highest id present; an id freed by deleting
/// the newest season can be handed out again.
pub fn create_season(store: &Store, policy: LevelPolicy) -> Result<Store> {
    let next_id = store.seasons.keys().max().copied().unwrap_or(0) + 1;
    let source = store.current().cloned().unwrap_or_default();

    let players: Vec<Player> = source
        .players
        .into_iter()
        .map(|p| Player {
            points: 0,
            wins: 0,
            losses: 0,
            level: match policy {
                LevelPolicy::Carry => p.level,
                LevelPolicy::Reset => DEFAULT_LEVEL,
            },
            ..p
        })
        .collect();

    info!(
        "Creating season {} from season {} ({} players, levels {:?})",
        next_id,
        store.current_season,
        players.len(),
        policy
    );

    let mut next = store.clone();
    next.seasons.insert(
        next_id,
        Season {
            players,
            ..Season::default()
        },
    );
    next.current_season = next_id;
    Ok(next)
}

/// Make an existing season current. No data changes.
pub fn switch_season(store: &Store, id: SeasonId) -> Result<Store> {
    if !store.seasons.contains_key(&id) {
        return Err(LeagueError::SeasonNotFound { season: id }.into());
    }

    info!("Switching current season {} -> {}", store.current_season, id);
    let mut next = store.clone();
    next.current_season = id;
    Ok(next)
}

/// Delete a season. The last remaining season can never be deleted; if the
/// current season goes, the highest remaining id becomes current.
pub fn delete_season(store: &Store, id: SeasonId) -> Result<Store> {
    if !store.seasons.contains_key(&id) {
        return Err(LeagueError::SeasonNotFound { season: id }.into());
    }
    if store.seasons.len() <= 1 {
        return Err(LeagueError::LastSeason { season: id }.into());
    }

    let mut next = store.clone();
    next.seasons.remove(&id);
    if next.current_season == id {
        // Non-empty: at least one other season existed
        if let Some(&highest) = next.seasons.keys().max() {
            next.current_season = highest;
        }
    }

    info!(
        "Deleted season {} (current season is now {})",
        id, next.current_season
    );
    Ok(next)
}

/// Seasons from newest to oldest
pub fn list_seasons(store: &Store) -> Vec<SeasonSummary> {
    store
        .seasons
        .iter()
        .rev()
        .map(|(&id, season)| SeasonSummary {
            id,
            current: id == store.current_season,
            players: season.players.len(),
            matches: season.matches.len(),
        })
        .collect()
}

/// Apply a season-scoped operation to the current season
pub fn update_current_season<F>(store: &Store, op: F) -> Result<Store>
where
    F: FnOnce(&Season) -> Result<Season>,
{
    let current = store.current().cloned().unwrap_or_default();
    let updated = op(&current)?;

    let mut next = store.clone();
    next.seasons.insert(store.current_season, updated);
    Ok(next)
}

/// Rename the club
pub fn set_club_name(store: &Store, name: &str) -> Result<Store> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::ConfigurationError {
            message: "Club name cannot be empty".to_string(),
        }
        .into());
    }

    let mut next = store.clone();
    next.club_name = trimmed.to_string();
    info!("Club renamed to {}", next.club_name);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::league_error;

    fn store_with_stats() -> Store {
        let mut store = Store::default();
        let season = store.seasons.get_mut(&1).unwrap();
        let mut ana = Player::new("p1", "Ana").with_level(3.5);
        ana.points = 12;
        ana.wins = 3;
        ana.losses = 1;
        season.players.push(ana);
        season
            .players
            .push(Player::new("p2", "Bea").with_level(2.0).with_fixed(true));
        season.special_winners.insert("colega".into(), "Ana".into());
        store
    }

    #[test]
    fn test_create_season_resets_levels() {
        let store = create_season(&store_with_stats(), LevelPolicy::Reset).unwrap();
        assert_eq!(store.current_season, 2);
        let season = store.current().unwrap();
        assert!(season.matches.is_empty());
        assert!(season.special_winners.is_empty());
        for p in &season.players {
            assert_eq!((p.points, p.wins, p.losses, p.level), (0, 0, 0, 1.0));
        }
        assert!(season.player("p2").unwrap().fixed);
        // Source season untouched
        assert_eq!(store.season(1).unwrap().players[0].points, 12);
    }

    #[test]
    fn test_create_season_carries_levels() {
        let store = create_season(&store_with_stats(), LevelPolicy::Carry).unwrap();
        let ana = store.current().unwrap().player("p1").unwrap();
        assert_eq!(ana.level, 3.5);
        assert_eq!((ana.points, ana.wins, ana.losses), (0, 0, 0));
    }

    #[test]
    fn test_create_season_copies_current_not_latest() {
        let store = create_season(&store_with_stats(), LevelPolicy::Carry).unwrap();
        let store = switch_season(&store, 1).unwrap();
        let store = create_season(&store, LevelPolicy::Carry).unwrap();
        assert_eq!(store.current_season, 3);
        assert_eq!(store.current().unwrap().players.len(), 2);
    }

    #[test]
    fn test_switch_season() {
        let store = create_season(&Store::default(), LevelPolicy::Reset).unwrap();
        let store = switch_season(&store, 1).unwrap();
        assert_eq!(store.current_season, 1);

        let err = switch_season(&store, 9).unwrap_err();
        assert!(matches!(
            league_error(&err),
            Some(LeagueError::SeasonNotFound { season: 9 })
        ));
    }

    #[test]
    fn test_cannot_delete_last_season() {
        let store = Store::default();
        let err = delete_season(&store, 1).unwrap_err();
        assert!(matches!(
            league_error(&err),
            Some(LeagueError::LastSeason { season: 1 })
        ));
        assert_eq!(store.seasons.len(), 1);
    }

    #[test]
    fn test_delete_current_falls_back_to_highest() {
        let store = Store::default();
        let store = create_season(&store, LevelPolicy::Reset).unwrap();
        let store = create_season(&store, LevelPolicy::Reset).unwrap();
        let store = switch_season(&store, 2).unwrap();

        let store = delete_season(&store, 2).unwrap();
        assert_eq!(store.current_season, 3);

        let store = delete_season(&store, 1).unwrap();
        assert_eq!(store.current_season, 3);
        assert_eq!(store.seasons.len(), 1);
    }

    #[test]
    fn test_deleted_top_id_is_reused() {
        let store = create_season(&Store::default(), LevelPolicy::Reset).unwrap();
        let store = delete_season(&store, 2).unwrap();
        let store = create_season(&store, LevelPolicy::Reset).unwrap();
        assert_eq!(store.current_season, 2);
    }

    #[test]
    fn test_list_seasons_newest_first() {
        let store = create_season(&Store::default(), LevelPolicy::Reset).unwrap();
        let list = list_seasons(&store);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 2);
        assert!(list[0].current);
        assert!(!list[1].current);
    }

    #[test]
    fn test_update_current_season_is_all_or_nothing() {
        let store = store_with_stats();
        let result = update_current_season(&store, |_| {
            Err(LeagueError::PlayerNotFound {
                player_id: "x".into(),
            }
            .into())
        });
        assert!(result.is_err());

        let store = update_current_season(&store, |season| {
            let mut next = season.clone();
            next.players.clear();
            Ok(next)
        })
        .unwrap();
        assert!(store.current().unwrap().players.is_empty());
    }

    #[test]
    fn test_set_club_name() {
        let store = set_club_name(&Store::default(), "  Padel Norte ").unwrap();
        assert_eq!(store.club_name, "Padel Norte");
        assert!(set_club_name(&store, "   ").is_err());
    }
}
