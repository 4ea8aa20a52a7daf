pub mod formatter;

pub use formatter::{
    format_games_list, format_kickoff, format_leaderboard, format_player_detail,
    format_week_table, should_use_colors,
};
