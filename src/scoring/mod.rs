pub mod aggregate;
pub mod points;
pub mod ranking;

pub use aggregate::{
    compute_stats, dedupe_predictions, score_predictions, week_standings, PlayerStats,
    ScoredPrediction,
};
pub use points::{outcome, score_prediction, Outcome, MAX_POINTS};
pub use ranking::{display_names, rank_players, RankedPlayer};
