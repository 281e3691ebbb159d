//! Common types used throughout the league engine
//!
//! Field names follow the shared club document (`clubName`, `signedUp`,
//! `pairA`, ...) so a snapshot round-trips through the external store unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Opaque, stable identifier for players
pub type PlayerId = String;

/// Opaque, stable identifier for matches
pub type MatchId = String;

/// Season number (positive, monotonically increasing)
pub type SeasonId = u32;

/// Two players playing together on one side of a match
pub type Pair = [PlayerId; 2];

/// Skill level assigned to new players and to every player on a level reset
pub const DEFAULT_LEVEL: f64 = 1.0;

/// Club name used when the document does not carry one
pub const DEFAULT_CLUB_NAME: &str = "Club Pádel";

fn default_level() -> f64 {
    DEFAULT_LEVEL
}

fn default_club_name() -> String {
    DEFAULT_CLUB_NAME.to_string()
}

/// A league member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: f64,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    /// Standing member, auto-enrolled in every new match and left out of the ranking
    #[serde(default)]
    pub fixed: bool,
}

impl Player {
    /// Create a player with default level and empty stats
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: DEFAULT_LEVEL,
            points: 0,
            wins: 0,
            losses: 0,
            fixed: false,
        }
    }

    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Completed matches this player took part in
    pub fn matches_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }
}

/// A player id resolved against a season roster.
///
/// Matches hold ids weakly: a player may have been deleted since signing up.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerRef<'a> {
    Known(&'a Player),
    Unknown(PlayerId),
}

impl PlayerRef<'_> {
    pub fn is_known(&self) -> bool {
        matches!(self, PlayerRef::Known(_))
    }

    pub fn display_name(&self) -> &str {
        match self {
            PlayerRef::Known(player) => &player.name,
            PlayerRef::Unknown(_) => "?",
        }
    }
}

/// Side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Games won by each side in one fully-entered set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

impl SetScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Side that won the set, `None` for an (invalid) draw
    pub fn winner(&self) -> Option<Side> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A set as typed in during result entry; either side may still be blank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetEntry {
    pub a: Option<u32>,
    pub b: Option<u32>,
}

impl SetEntry {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.a.is_none() && self.b.is_none()
    }

    /// The score if both sides were entered
    pub fn score(&self) -> Option<SetScore> {
        match (self.a, self.b) {
            (Some(a), Some(b)) => Some(SetScore::new(a, b)),
            _ => None,
        }
    }
}

impl From<SetScore> for SetEntry {
    fn from(score: SetScore) -> Self {
        SetEntry::new(score.a, score.b)
    }
}

/// Parses `6-4`; either side may be left empty (`6-`, `-`)
impl std::str::FromStr for SetEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| format!("expected games as A-B, got '{}'", s))?;
        let side = |raw: &str| -> Result<Option<u32>, String> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|_| format!("invalid game count '{}'", raw))
        };
        Ok(SetEntry {
            a: side(a)?,
            b: side(b)?,
        })
    }
}

/// Lifecycle of a match: open until a result is saved, then completed for good
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Open,
    Completed,
}

/// Recorded outcome of a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub sets: Vec<SetScore>,
    pub pair_a: Pair,
    pub pair_b: Pair,
    pub winner: Side,
    pub bonus: bool,
}

impl MatchResult {
    pub fn pair(&self, side: Side) -> &Pair {
        match side {
            Side::A => &self.pair_a,
            Side::B => &self.pair_b,
        }
    }

    pub fn winning_pair(&self) -> &Pair {
        self.pair(self.winner)
    }

    pub fn losing_pair(&self) -> &Pair {
        self.pair(self.winner.opposite())
    }
}

/// A scheduled 2v2 match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub location: String,
    pub status: MatchStatus,
    /// Sign-up order, at most 4 distinct ids
    #[serde(default)]
    pub signed_up: Vec<PlayerId>,
    /// Empty, or the two balanced pairs once four players are in
    #[serde(default, deserialize_with = "deserialize_pairs")]
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub result: Option<MatchResult>,
}

/// Players per match
pub const MATCH_CAPACITY: usize = 4;

/// A pair slot as stored by older clients: a bare id or a whole player object
#[derive(Deserialize)]
#[serde(untagged)]
enum PairMember {
    Id(PlayerId),
    Player { id: PlayerId },
}

impl PairMember {
    fn into_id(self) -> PlayerId {
        match self {
            PairMember::Id(id) | PairMember::Player { id } => id,
        }
    }
}

/// Read `pairs` in either shape. Pairs are derived data, so anything that is
/// not two complete pairs of two reads as no pairs.
fn deserialize_pairs<'de, D>(deserializer: D) -> Result<Vec<Pair>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Vec<Option<PairMember>>> = Vec::deserialize(deserializer)?;
    if raw.len() != 2 {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::with_capacity(2);
    for members in raw {
        let ids: Option<Vec<PlayerId>> = members
            .into_iter()
            .map(|member| member.map(PairMember::into_id))
            .collect();
        match ids.as_deref() {
            Some([first, second]) => pairs.push([first.clone(), second.clone()]),
            _ => return Ok(Vec::new()),
        }
    }
    Ok(pairs)
}

impl Match {
    pub fn new(
        id: impl Into<MatchId>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            time: time.into(),
            location: location.into(),
            status: MatchStatus::Open,
            signed_up: Vec::new(),
            pairs: Vec::new(),
            result: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == MatchStatus::Open
    }

    pub fn is_full(&self) -> bool {
        self.signed_up.len() >= MATCH_CAPACITY
    }

    pub fn is_signed_up(&self, player_id: &str) -> bool {
        self.signed_up.iter().any(|id| id == player_id)
    }

    /// Pairs offered when entering a result: the balanced pairs if present,
    /// otherwise the sign-up order split in two.
    pub fn default_pairs(&self) -> Option<(Pair, Pair)> {
        if let [first, second] = self.pairs.as_slice() {
            return Some((first.clone(), second.clone()));
        }
        match self.signed_up.as_slice() {
            [a, b, c, d] => Some((
                [a.clone(), b.clone()],
                [c.clone(), d.clone()],
            )),
            _ => None,
        }
    }
}

/// Independent players/matches dataset for one season
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
    /// Manually assigned awards: award id -> player display name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub special_winners: BTreeMap<String, String>,
}

impl Season {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Resolve a weak player reference held by a match
    pub fn lookup_player(&self, player_id: &str) -> PlayerRef<'_> {
        match self.player(player_id) {
            Some(player) => PlayerRef::Known(player),
            None => PlayerRef::Unknown(player_id.to_string()),
        }
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn fixed_player_ids(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.fixed)
            .map(|p| p.id.clone())
            .collect()
    }
}

/// The whole club document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default = "default_club_name")]
    pub club_name: String,
    pub current_season: SeasonId,
    pub seasons: BTreeMap<SeasonId, Season>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_CLUB_NAME)
    }
}

impl Store {
    /// Initial document: a single empty season 1
    pub fn new(club_name: impl Into<String>) -> Self {
        let mut seasons = BTreeMap::new();
        seasons.insert(1, Season::default());
        Self {
            club_name: club_name.into(),
            current_season: 1,
            seasons,
        }
    }

    /// Dataset of the current season
    pub fn current(&self) -> Option<&Season> {
        self.seasons.get(&self.current_season)
    }

    pub fn season(&self, id: SeasonId) -> Option<&Season> {
        self.seasons.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_deserializes_missing_stats() {
        let player: Player = serde_json::from_str(r#"{"id":"p1","name":"Ana"}"#).unwrap();
        assert_eq!(player.level, 1.0);
        assert_eq!(player.points, 0);
        assert_eq!(player.matches_played(), 0);
        assert!(!player.fixed);
    }

    #[test]
    fn test_store_document_shape() {
        let mut store = Store::default();
        let season = store.seasons.get_mut(&1).unwrap();
        season.players.push(Player::new("p1", "Ana"));
        let mut m = Match::new("m1", "2026-03-01", "10:00", "Gaitanes");
        m.signed_up.push("p1".to_string());
        season.matches.push(m);

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["clubName"], "Club Pádel");
        assert_eq!(json["currentSeason"], 1);
        assert_eq!(json["seasons"]["1"]["matches"][0]["signedUp"][0], "p1");
        assert_eq!(json["seasons"]["1"]["matches"][0]["status"], "open");
        assert!(json["seasons"]["1"].get("specialWinners").is_none());

        let back: Store = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn test_matches_played_saturates() {
        let mut player = Player::new("p1", "Ana");
        player.wins = u32::MAX;
        player.losses = 1;
        assert_eq!(player.matches_played(), u32::MAX);
    }

    #[test]
    fn test_pairs_as_player_objects() {
        let m: Match = serde_json::from_str(
            r#"{
                "id": "m1", "date": "2026-03-01", "time": "10:00", "location": "Gaitanes",
                "status": "open", "signedUp": ["a", "b", "c", "d"],
                "pairs": [
                    [{"id": "a", "name": "Ana", "level": 4}, {"id": "d", "name": "Dani", "level": 1}],
                    [{"id": "b", "name": "Bea", "level": 3}, {"id": "c", "name": "Carla", "level": 2}]
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            m.pairs,
            vec![
                ["a".to_string(), "d".to_string()],
                ["b".to_string(), "c".to_string()]
            ]
        );
        let (pair_a, _) = m.default_pairs().unwrap();
        assert_eq!(pair_a, ["a".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_incomplete_pairs_read_as_empty() {
        let m: Match = serde_json::from_str(
            r#"{
                "id": "m1", "date": "2026-03-01", "time": "10:00", "location": "Gaitanes",
                "status": "open", "signedUp": ["a", "b", "c", "d"],
                "pairs": [[{"id": "a"}, null], [{"id": "b"}, {"id": "c"}]]
            }"#,
        )
        .unwrap();
        assert!(m.pairs.is_empty());
    }

    #[test]
    fn test_result_field_names() {
        let result = MatchResult {
            sets: vec![SetScore::new(6, 2), SetScore::new(6, 3)],
            pair_a: ["p1".to_string(), "p2".to_string()],
            pair_b: ["p3".to_string(), "p4".to_string()],
            winner: Side::A,
            bonus: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pairA"][1], "p2");
        assert_eq!(json["winner"], "A");
        assert_eq!(json["sets"][1]["b"], 3);
        assert_eq!(result.losing_pair(), &result.pair_b);
    }

    #[test]
    fn test_lookup_unknown_player() {
        let season = Season::default();
        let player = season.lookup_player("ghost");
        assert!(!player.is_known());
        assert_eq!(player.display_name(), "?");
    }

    #[test]
    fn test_default_pairs_fall_back_to_signup_order() {
        let mut m = Match::new("m1", "2026-03-01", "10:00", "Gaitanes");
        assert!(m.default_pairs().is_none());
        m.signed_up = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let (pair_a, pair_b) = m.default_pairs().unwrap();
        assert_eq!(pair_a, ["a".to_string(), "b".to_string()]);
        assert_eq!(pair_b, ["c".to_string(), "d".to_string()]);

        m.pairs = vec![
            ["a".to_string(), "d".to_string()],
            ["b".to_string(), "c".to_string()],
        ];
        let (pair_a, _) = m.default_pairs().unwrap();
        assert_eq!(pair_a, ["a".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_set_entry_score() {
        assert_eq!(SetEntry::new(6, 4).score(), Some(SetScore::new(6, 4)));
        let half = SetEntry {
            a: Some(6),
            b: None,
        };
        assert!(half.score().is_none());
        assert!(!half.is_blank());
        assert!(SetEntry::blank().is_blank());
    }

    #[test]
    fn test_set_entry_parse() {
        assert_eq!("7-6".parse::<SetEntry>().unwrap(), SetEntry::new(7, 6));
        assert_eq!(" 10 - 8 ".parse::<SetEntry>().unwrap(), SetEntry::new(10, 8));
        assert!("-".parse::<SetEntry>().unwrap().is_blank());
        assert_eq!(
            "6-".parse::<SetEntry>().unwrap(),
            SetEntry {
                a: Some(6),
                b: None
            }
        );
        assert!("64".parse::<SetEntry>().is_err());
        assert!("x-4".parse::<SetEntry>().is_err());
    }
}
