pub mod storage;
pub mod types;

pub use storage::{
    append_prediction, get_data_dir, load_games, load_predictions, record_result, save_games,
    save_predictions,
};
pub use types::{Game, GameStatus, Prediction, UNKNOWN_PLAYER};
