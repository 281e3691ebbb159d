//! Command-line host for the padel league engine
//!
//! Each invocation loads the club document, runs one engine operation and
//! saves the document again if the operation changed it.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use padel_league::config::AppConfig;
use padel_league::ranking::{position_of, unranked_players, ManualAward};
use padel_league::scoring::validate_entry;
use padel_league::season::{self, LevelPolicy, PlayerUpdate, Requester};
use padel_league::store::{JsonFileStore, SnapshotStore};
use padel_league::utils::{
    format_display_date, format_level, generate_match_id, generate_player_id, today,
};
use padel_league::{LeagueEngine, Match, Pair, SeasonId, SetEntry, Store};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Padel League - scoring, points and seasonal ranking for a social padel club
#[derive(Parser)]
#[command(
    name = "padel-league",
    version,
    about = "Match scoring, points ledger and seasonal ranking for a social padel league"
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Club document override
    #[arg(long, value_name = "PATH", help = "Override the club document path")]
    store: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Admin or super admin password
    #[arg(long, value_name = "PASSWORD")]
    password: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a single set score without touching the document
    ValidateSet {
        /// Zero-based set index (2 is the super tiebreak)
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Games as A-B, e.g. 7-6
        score: SetEntry,
    },
    /// Standings of the current season
    Standings {
        /// Only print this player's position
        #[arg(long, value_name = "ID")]
        player: Option<String>,
    },
    /// Awards of the current season
    Awards,
    /// Completed matches of the current season, most recent first
    History,
    /// Open matches of the current season
    Matches,
    #[command(subcommand)]
    Season(SeasonCommand),
    #[command(subcommand)]
    Player(PlayerCommand),
    #[command(subcommand)]
    Match(MatchCommand),
    #[command(subcommand)]
    Award(AwardCommand),
    #[command(subcommand)]
    Club(ClubCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum SeasonCommand {
    /// List seasons, newest first
    List,
    /// Start a new season from the current roster
    New {
        /// Reset every level to the default instead of carrying it over
        #[arg(long)]
        reset_levels: bool,
    },
    /// Make another season current
    Switch { id: SeasonId },
    /// Delete a season
    Delete { id: SeasonId },
}

#[derive(Subcommand)]
enum PlayerCommand {
    /// Add a player to the current season
    Add {
        name: String,
        #[arg(long)]
        level: Option<f64>,
        #[arg(long)]
        fixed: bool,
    },
    /// Edit player fields
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        level: Option<f64>,
        #[arg(long)]
        points: Option<u32>,
        #[arg(long)]
        wins: Option<u32>,
        #[arg(long)]
        losses: Option<u32>,
        #[arg(long)]
        fixed: Option<bool>,
    },
    /// Remove a player from the roster
    Delete { id: String },
}

#[derive(Subcommand)]
enum MatchCommand {
    /// Schedule a match (date as YYYY-MM-DD)
    Schedule {
        date: String,
        time: String,
        location: String,
    },
    /// Cancel an open match
    Cancel { id: String },
    /// Sign a player up
    Join { id: String, player: String },
    /// Take a player off a match
    Leave { id: String, player: String },
    /// Record the result of a full match
    Result(ResultArgs),
    /// Replace the result of a completed match
    Edit(ResultArgs),
    /// Print the shareable match text
    Announce { id: String },
}

#[derive(clap::Args)]
struct ResultArgs {
    id: String,
    /// Sets as A-B, two or three of them
    #[arg(required = true, num_args = 2..=3)]
    sets: Vec<SetEntry>,
    /// Override pair A
    #[arg(long, num_args = 2, value_names = ["PLAYER", "PLAYER"], requires = "pair_b")]
    pair_a: Option<Vec<String>>,
    /// Override pair B
    #[arg(long, num_args = 2, value_names = ["PLAYER", "PLAYER"], requires = "pair_a")]
    pair_b: Option<Vec<String>>,
}

impl ResultArgs {
    fn pairs(&self) -> Result<Option<(Pair, Pair)>> {
        match (&self.pair_a, &self.pair_b) {
            (Some(a), Some(b)) => Ok(Some((to_pair(a)?, to_pair(b)?))),
            _ => Ok(None),
        }
    }
}

fn to_pair(ids: &[String]) -> Result<Pair> {
    match ids {
        [first, second] => Ok([first.clone(), second.clone()]),
        _ => Err(anyhow!("a pair needs exactly two player ids")),
    }
}

#[derive(Subcommand)]
enum AwardCommand {
    /// Assign a manual award (impuntual, colega); an empty name clears it
    Set {
        award: String,
        #[arg(default_value = "")]
        name: String,
    },
}

#[derive(Subcommand)]
enum ClubCommand {
    /// Rename the club
    Rename { name: String },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Change the admin password (current one via --password) in the --config file
    Password { new_password: String },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(store) = &args.store {
        config.storage.store_path = store.clone();
    }

    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run a read-only command
fn query(args: &Args, config: &AppConfig, engine: &LeagueEngine, store: &Store) -> Result<()> {
    let current = store.current().cloned().unwrap_or_default();
    match &args.command {
        Command::Standings { player } => {
            let standings = engine.standings(store);
            if let Some(player_id) = player {
                match position_of(&standings, player_id) {
                    Some(position) => println!("{}", position),
                    None => println!("{}: sin clasificar", player_id),
                }
                return Ok(());
            }
            if args.json {
                return print_json(&standings);
            }
            println!("{} - Temporada {}", store.club_name, store.current_season);
            for s in standings {
                println!(
                    "{:>2}. {:<20} {:>3} pts  {}V/{}D  nivel {}",
                    s.position,
                    s.player.name,
                    s.player.points,
                    s.player.wins,
                    s.player.losses,
                    format_level(s.player.level)
                );
            }
            let fixed = unranked_players(&current.players);
            if !fixed.is_empty() {
                let names: Vec<&str> = fixed.iter().map(|p| p.name.as_str()).collect();
                println!("Fijos (sin clasificar): {}", names.join(", "));
            }
        }
        Command::Awards => {
            let awards = engine.awards(store);
            if args.json {
                return print_json(&awards);
            }
            for s in &awards.top_three {
                println!("{}º {} ({} pts)", s.position, s.player.name, s.player.points);
            }
            let lines = [
                ("Nivel más alto", &awards.highest_level),
                ("Más partidos", &awards.most_active),
                ("Nivel más bajo", &awards.lowest_level),
            ];
            for (title, winner) in lines {
                match winner {
                    Some(w) => println!(
                        "{}: {} (nivel {}, {} partidos)",
                        title,
                        w.player.name,
                        format_level(w.player.level),
                        w.matches_played
                    ),
                    None => println!("{}: -", title),
                }
            }
            for award in ManualAward::ALL {
                let name = awards.manual.get(award.key()).map(String::as_str);
                println!("{}: {}", award, name.unwrap_or("-"));
            }
        }
        Command::History => {
            let history = season::history(&current);
            if args.json {
                return print_json(&history);
            }
            for m in history {
                let Some(result) = &m.result else { continue };
                let sets: Vec<String> = result
                    .sets
                    .iter()
                    .map(|s| format!("{}-{}", s.a, s.b))
                    .collect();
                let names = |pair: &Pair| {
                    pair.iter()
                        .map(|id| current.lookup_player(id).display_name().to_string())
                        .collect::<Vec<_>>()
                        .join(" / ")
                };
                println!(
                    "{} {}  {} vs {}  {}  (gana {})",
                    format_display_date(&m.date),
                    m.location,
                    names(&result.pair_a),
                    names(&result.pair_b),
                    sets.join(" "),
                    result.winner
                );
            }
        }
        Command::Matches => {
            let open = season::open_matches(&current);
            if args.json {
                return print_json(&open);
            }
            for m in open {
                println!(
                    "{}  {} {} {}  {}/4",
                    m.id,
                    format_display_date(&m.date),
                    m.time,
                    m.location,
                    m.signed_up.len()
                );
            }
        }
        Command::Season(SeasonCommand::List) => {
            let seasons = season::list_seasons(store);
            if args.json {
                return print_json(&seasons);
            }
            for s in seasons {
                println!(
                    "{}Temporada {} ({} jugadores, {} partidos)",
                    if s.current { "* " } else { "  " },
                    s.id,
                    s.players,
                    s.matches
                );
            }
        }
        Command::Match(MatchCommand::Announce { id }) => {
            let m = current
                .find_match(id)
                .ok_or_else(|| anyhow!("Match {} not found", id))?;
            let url = config.league.signup_url.as_deref();
            println!("{}", season::announcement(m, &current, url));
        }
        _ => {}
    }
    Ok(())
}

/// Add a player under a fresh id; the id is only handed back once stored
fn add_new_player(
    engine: &LeagueEngine,
    store: &Store,
    name: &str,
    level: Option<f64>,
    fixed: bool,
) -> Result<(String, Store)> {
    let mut player = engine.new_player(generate_player_id(), name).with_fixed(fixed);
    if let Some(level) = level {
        player = player.with_level(level);
    }
    let id = player.id.clone();
    let next = season::update_current_season(store, |s| season::add_player(s, player))?;
    Ok((id, next))
}

fn schedule_new_match(
    store: &Store,
    date: &str,
    time: &str,
    location: &str,
) -> Result<(String, Store)> {
    let new_match = Match::new(generate_match_id(), date, time, location);
    let id = new_match.id.clone();
    let next = season::update_current_season(store, |s| {
        season::schedule_match(s, new_match, today())
    })?;
    Ok((id, next))
}

/// Run a mutating command, returning the new document
fn mutate(args: &Args, config: &AppConfig, engine: &LeagueEngine, store: &Store) -> Result<Store> {
    let requester = match args.password.as_deref() {
        Some(pw) if config.admin.authenticate(pw).is_some() => Requester::Admin,
        _ => Requester::Member,
    };
    let require_admin = || config.admin.require_admin(args.password.as_deref());

    match &args.command {
        Command::Season(cmd) => {
            require_admin()?;
            match cmd {
                SeasonCommand::New { reset_levels } => {
                    let policy = if *reset_levels {
                        LevelPolicy::Reset
                    } else {
                        LevelPolicy::Carry
                    };
                    engine.create_season(store, policy)
                }
                SeasonCommand::Switch { id } => engine.switch_season(store, *id),
                SeasonCommand::Delete { id } => engine.delete_season(store, *id),
                SeasonCommand::List => Ok(store.clone()),
            }
        }
        Command::Player(cmd) => {
            require_admin()?;
            match cmd {
                PlayerCommand::Add { name, level, fixed } => {
                    let (id, next) = add_new_player(engine, store, name, *level, *fixed)?;
                    println!("{}", id);
                    Ok(next)
                }
                PlayerCommand::Update {
                    id,
                    name,
                    level,
                    points,
                    wins,
                    losses,
                    fixed,
                } => {
                    let update = PlayerUpdate {
                        name: name.clone(),
                        level: *level,
                        points: *points,
                        wins: *wins,
                        losses: *losses,
                        fixed: *fixed,
                    };
                    season::update_current_season(store, |s| season::update_player(s, id, update))
                }
                PlayerCommand::Delete { id } => {
                    season::update_current_season(store, |s| season::remove_player(s, id))
                }
            }
        }
        Command::Match(cmd) => match cmd {
            MatchCommand::Schedule {
                date,
                time,
                location,
            } => {
                require_admin()?;
                let (id, next) = schedule_new_match(store, date, time, location)?;
                println!("{}", id);
                Ok(next)
            }
            MatchCommand::Cancel { id } => {
                require_admin()?;
                season::update_current_season(store, |s| season::cancel_match(s, id))
            }
            MatchCommand::Join { id, player } => {
                season::update_current_season(store, |s| season::join_match(s, id, player))
            }
            MatchCommand::Leave { id, player } => season::update_current_season(store, |s| {
                season::leave_match(s, id, player, requester)
            }),
            MatchCommand::Result(result) => {
                require_admin()?;
                engine.record_result(store, &result.id, &result.sets, result.pairs()?)
            }
            MatchCommand::Edit(result) => {
                require_admin()?;
                engine.edit_result(store, &result.id, &result.sets, result.pairs()?)
            }
            MatchCommand::Announce { .. } => Ok(store.clone()),
        },
        Command::Award(AwardCommand::Set { award, name }) => {
            require_admin()?;
            let award = ManualAward::from_key(award)
                .ok_or_else(|| anyhow!("Unknown award {}", award))?;
            season::update_current_season(store, |s| {
                Ok(season::set_special_winner(s, award, name))
            })
        }
        Command::Club(ClubCommand::Rename { name }) => {
            require_admin()?;
            season::set_club_name(store, name)
        }
        _ => Ok(store.clone()),
    }
}

/// Rotate the admin password and write it back to the configuration file
fn change_password(args: &Args, config: &AppConfig, new_password: &str) -> Result<()> {
    let path = args
        .config
        .as_ref()
        .ok_or_else(|| anyhow!("--config is required to store the new password"))?;
    let current = args
        .password
        .as_deref()
        .ok_or_else(|| anyhow!("--password with the current admin password is required"))?;

    let mut updated = config.clone();
    updated.admin = config.admin.change_admin_password(current, new_password)?;
    std::fs::write(path, toml::to_string_pretty(&updated)?)?;
    info!("Admin password updated in {}", path.display());
    Ok(())
}

fn is_query(command: &Command) -> bool {
    matches!(
        command,
        Command::Standings { .. }
            | Command::Awards
            | Command::History
            | Command::Matches
            | Command::Season(SeasonCommand::List)
            | Command::Match(MatchCommand::Announce { .. })
    )
}

async fn run(args: Args, config: AppConfig) -> Result<()> {
    if let Command::ValidateSet { index, score } = &args.command {
        match (score.score(), validate_entry(*index, score)) {
            (None, _) => println!("Set incompleto"),
            (_, Some(err)) => println!("{}", err),
            (_, None) => println!("OK"),
        }
        return Ok(());
    }

    if let Command::Admin(AdminCommand::Password { new_password }) = &args.command {
        return change_password(&args, &config, new_password);
    }

    let engine = LeagueEngine::from_settings(&config.league);
    let snapshots = JsonFileStore::new(&config.storage.store_path);
    let store = snapshots.load_or_init(&config.league.club_name).await?;
    debug!(
        "Club {} on season {}",
        store.club_name, store.current_season
    );

    if is_query(&args.command) {
        return query(&args, &config, &engine, &store);
    }

    if !config.admin.is_configured() {
        warn!("No admin password configured, admin commands will be refused");
    }
    let next = mutate(&args, &config, &engine, &store)?;
    if next != store {
        snapshots.save(&next).await?;
    } else {
        info!("Nothing changed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args, config).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
