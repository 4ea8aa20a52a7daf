pub mod client;
pub mod sync;
pub mod types;

pub use client::FixtureClient;
pub use sync::{fetch_games, merge_games, to_game};
pub use types::{ApiMatch, MatchesResponse};
