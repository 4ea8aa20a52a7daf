use super::types::{Game, GameStatus, Prediction};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Resolve the league data directory. An explicit configuration override
/// wins; otherwise the platform data dir is used.
pub fn get_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    dirs::data_dir()
        .map(|p| p.join("prode"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.local/share/prode",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

pub fn games_path(data_dir: &Path) -> PathBuf {
    data_dir.join("games.json")
}

pub fn predictions_path(data_dir: &Path) -> PathBuf {
    data_dir.join("predictions.json")
}

/// Load a JSON document collection. A missing file reads as an empty
/// collection so a fresh league needs no setup step.
fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Save a JSON document collection atomically so a crash mid-write never
/// leaves a corrupted file behind.
fn save_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory at {}", parent.display()))?;
    }
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, records)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

pub fn load_games(data_dir: &Path) -> Result<Vec<Game>> {
    load_collection(&games_path(data_dir))
}

pub fn load_predictions(data_dir: &Path) -> Result<Vec<Prediction>> {
    load_collection(&predictions_path(data_dir))
}

pub fn save_games(data_dir: &Path, games: &[Game]) -> Result<()> {
    save_collection(&games_path(data_dir), games)
}

pub fn save_predictions(data_dir: &Path, predictions: &[Prediction]) -> Result<()> {
    save_collection(&predictions_path(data_dir), predictions)
}

/// Append a prediction submission. Submissions are append-only: a resubmit
/// adds a newer record and the aggregation keeps the latest one per
/// (user, game), so history survives in the document.
pub fn append_prediction(data_dir: &Path, prediction: Prediction) -> Result<()> {
    let mut predictions = load_predictions(data_dir)?;
    predictions.push(prediction);
    save_predictions(data_dir, &predictions)
}

/// Record the final result of a game. Returns the updated game for display.
pub fn record_result(data_dir: &Path, game_id: &str, home: u32, away: u32) -> Result<Game> {
    let mut games = load_games(data_dir)?;
    let game = games
        .iter_mut()
        .find(|g| g.id == game_id)
        .with_context(|| format!("No game with id '{}'", game_id))?;
    game.status = GameStatus::Finished;
    game.home_score = Some(home);
    game.away_score = Some(away);
    let updated = game.clone();
    save_games(data_dir, &games)?;
    Ok(updated)
}
