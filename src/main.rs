use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use prode::config::Config;
use prode::scoring;
use prode::store;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_NETWORK: i32 = 3;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the leaderboard (default if no subcommand)
    Table,
    /// List games with status, results and kickoff times
    Games {
        /// Only show games of one week (e.g. "Fecha 3")
        #[arg(long)]
        week: Option<String>,
    },
    /// Show one week's standings and winner(s)
    Week {
        /// Week label as stored on the games (e.g. "Fecha 3")
        label: String,
    },
    /// Show one player's predictions and per-game points
    Player {
        /// User id or display name
        query: String,
    },
    /// Submit your prediction for a game (resubmitting replaces the old one)
    Predict {
        game_id: String,
        home: u32,
        away: u32,
    },
    /// Record the final result of a game manually
    Result {
        game_id: String,
        home: u32,
        away: u32,
    },
    /// Pull fixtures and results from the data provider
    Sync,
    /// Create a starter config file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "prode")]
#[command(about = "Community football prediction pool", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/prode/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Table);
    let start_time = Instant::now();

    if let Commands::Init = command {
        match prode::config::write_starter_config(cli.config.clone().map(PathBuf::from)) {
            Ok(path) => {
                println!("Config written to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Init error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match prode::config::load_config(cli.config.clone().map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let data_dir = store::get_data_dir(config.data_dir.as_deref());
    if cli.verbose {
        eprintln!("League data in {}", data_dir.display());
    }

    let result = match command {
        Commands::Table => run_table(&data_dir, cli.verbose),
        Commands::Games { week } => run_games(&data_dir, week.as_deref()),
        Commands::Week { label } => run_week(&data_dir, &label),
        Commands::Player { query } => run_player(&data_dir, &query),
        Commands::Predict {
            game_id,
            home,
            away,
        } => run_predict(&data_dir, &config, &game_id, home, away),
        Commands::Result {
            game_id,
            home,
            away,
        } => run_result(&data_dir, &game_id, home, away),
        Commands::Sync => {
            let outcome = run_sync(&data_dir, &config, cli.verbose).await;
            if let Err(e) = outcome {
                eprintln!("Sync error: {:#}", e);
                std::process::exit(EXIT_NETWORK);
            }
            Ok(())
        }
        Commands::Init => unreachable!("handled before config load"),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_DATA);
    }

    if cli.verbose {
        eprintln!();
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_league(data_dir: &Path) -> Result<(Vec<store::Game>, Vec<store::Prediction>)> {
    let games = store::load_games(data_dir)?;
    let predictions = store::load_predictions(data_dir)?;
    Ok((games, predictions))
}

fn run_table(data_dir: &Path, verbose: bool) -> Result<()> {
    let (games, predictions) = load_league(data_dir)?;
    if verbose {
        eprintln!("Loaded {} games, {} predictions", games.len(), predictions.len());
    }

    let stats = scoring::compute_stats(&games, &predictions);
    let ranked = scoring::rank_players(stats, &predictions);

    let use_colors = prode::output::should_use_colors();
    println!("{}", prode::output::format_leaderboard(&ranked, use_colors));
    Ok(())
}

fn run_games(data_dir: &Path, week: Option<&str>) -> Result<()> {
    let mut games = store::load_games(data_dir)?;
    if let Some(week) = week {
        games.retain(|g| g.week.as_deref() == Some(week));
    }
    games.sort_by(|a, b| (a.kick_off_time, &a.id).cmp(&(b.kick_off_time, &b.id)));

    let use_colors = prode::output::should_use_colors();
    println!("{}", prode::output::format_games_list(&games, use_colors));
    Ok(())
}

fn run_week(data_dir: &Path, label: &str) -> Result<()> {
    let (games, predictions) = load_league(data_dir)?;
    let standings = scoring::week_standings(&games, &predictions, label);
    let names = scoring::display_names(&predictions);

    let use_colors = prode::output::should_use_colors();
    println!(
        "{}",
        prode::output::format_week_table(label, &standings, &names, use_colors)
    );
    Ok(())
}

fn run_player(data_dir: &Path, query: &str) -> Result<()> {
    let (games, predictions) = load_league(data_dir)?;
    let names = scoring::display_names(&predictions);

    // Exact user id wins; otherwise match the display name case-insensitively.
    let user_id = if predictions.iter().any(|p| p.user_id == query) {
        query.to_string()
    } else {
        let query_folded = query.to_lowercase();
        let mut matches: Vec<&str> = names
            .iter()
            .filter(|(_, name)| name.to_lowercase() == query_folded)
            .map(|(user_id, _)| *user_id)
            .collect();
        matches.sort_unstable();
        matches.dedup();
        match matches.as_slice() {
            [] => anyhow::bail!("No player matching '{}'", query),
            [only] => only.to_string(),
            many => anyhow::bail!(
                "'{}' is ambiguous, use a user id: {}",
                query,
                many.join(", ")
            ),
        }
    };

    let scored: Vec<_> = scoring::score_predictions(&games, &predictions)
        .into_iter()
        .filter(|s| s.prediction.user_id == user_id)
        .collect();
    let display_name = names.get(user_id.as_str()).copied().unwrap_or(user_id.as_str());

    let use_colors = prode::output::should_use_colors();
    println!(
        "{}",
        prode::output::format_player_detail(display_name, &scored, use_colors)
    );
    Ok(())
}

fn run_predict(
    data_dir: &Path,
    config: &Config,
    game_id: &str,
    home: u32,
    away: u32,
) -> Result<()> {
    let profile = config.profile.as_ref().context(
        "No profile configured. Run `prode init` to set your user id and display name",
    )?;

    let games = store::load_games(data_dir)?;
    let game = games
        .iter()
        .find(|g| g.id == game_id)
        .with_context(|| format!("No game with id '{}'", game_id))?;
    if game.status != store::GameStatus::Upcoming {
        anyhow::bail!(
            "{} is {} - predictions are locked at kickoff",
            game.short_ref(),
            game.status
        );
    }

    store::append_prediction(
        data_dir,
        store::Prediction {
            user_id: profile.user_id.clone(),
            game_id: game_id.to_string(),
            predicted_home_score: Some(home),
            predicted_away_score: Some(away),
            player_name: profile.name.clone(),
            timestamp: Utc::now(),
        },
    )?;

    println!(
        "Prediction saved: {} {}-{} {}",
        game.home_team, home, away, game.away_team
    );
    Ok(())
}

fn run_result(data_dir: &Path, game_id: &str, home: u32, away: u32) -> Result<()> {
    let updated = store::record_result(data_dir, game_id, home, away)?;
    println!("Result recorded: {}", updated.short_ref());
    Ok(())
}

async fn run_sync(data_dir: &Path, config: &Config, verbose: bool) -> Result<()> {
    let fixtures = config.fixtures.as_ref().context(
        "No fixtures section configured. Add one to config.yaml (see `prode init` template)",
    )?;
    if fixtures.competitions.is_empty() {
        anyhow::bail!("fixtures.competitions is empty - nothing to sync");
    }

    let token = prode::credentials::setup_token_if_missing()?;

    let base_url = fixtures
        .url
        .as_deref()
        .unwrap_or(prode::config::DEFAULT_FIXTURES_URL);
    let week_label = fixtures
        .week_label
        .as_deref()
        .unwrap_or(prode::config::DEFAULT_WEEK_LABEL);
    let timeout_str = fixtures
        .timeout
        .as_deref()
        .unwrap_or(prode::config::DEFAULT_TIMEOUT);
    let timeout = humantime::parse_duration(timeout_str)
        .with_context(|| format!("Invalid fixtures.timeout '{}'", timeout_str))?;

    let client = prode::fixtures::FixtureClient::new(base_url, &token, timeout)?;

    if verbose {
        eprintln!("Syncing {} competition(s) from {}", fixtures.competitions.len(), base_url);
    }
    let fetched =
        prode::fixtures::fetch_games(&client, &fixtures.competitions, week_label, verbose).await?;

    let existing = store::load_games(data_dir)?;
    let (merged, added, updated) = prode::fixtures::merge_games(existing, fetched);
    store::save_games(data_dir, &merged)?;

    println!(
        "Synced: {} added, {} updated ({} games total)",
        added,
        updated,
        merged.len()
    );
    Ok(())
}
