use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bucket for prediction records that carry no user id.
pub const UNKNOWN_PLAYER: &str = "unknown";

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Upcoming,
    Live,
    Finished,
}

impl GameStatus {
    /// Parse a status label. Documents written by older app versions used
    /// mixed casing ("Finished", "FINISHED"), so matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Some(GameStatus::Upcoming),
            "live" => Some(GameStatus::Live),
            "finished" => Some(GameStatus::Finished),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Upcoming => "upcoming",
            GameStatus::Live => "live",
            GameStatus::Finished => "finished",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GameStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GameStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        GameStatus::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid game status '{}' (expected upcoming, live or finished)",
                raw
            ))
        })
    }
}

/// A scheduled or completed match.
///
/// Games are externally owned records: the fixture sync and the result
/// command write them, the scoring engine only reads them. Field aliases
/// accept the PascalCase spelling found in documents written by older app
/// versions; everything downstream of deserialization sees one canonical
/// shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    #[serde(alias = "HomeTeam")]
    pub home_team: String,
    #[serde(alias = "AwayTeam")]
    pub away_team: String,
    #[serde(alias = "Status")]
    pub status: GameStatus,
    #[serde(default, alias = "HomeScore")]
    pub home_score: Option<u32>,
    #[serde(default, alias = "AwayScore")]
    pub away_score: Option<u32>,
    #[serde(alias = "KickOffTime")]
    pub kick_off_time: DateTime<Utc>,
    /// Week label grouping games into a scoring period (a "Fecha").
    #[serde(default, alias = "Week", alias = "fecha", alias = "Fecha")]
    pub week: Option<String>,
    #[serde(default, alias = "League")]
    pub league: Option<String>,
}

impl Game {
    /// Final score, present only when the game is finished and both goals
    /// were recorded. This is the single gate for "scoreable".
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if self.status != GameStatus::Finished {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    /// Short "River 2-1 Boca" style reference for display and errors.
    pub fn short_ref(&self) -> String {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => format!("{} {}-{} {}", self.home_team, h, a, self.away_team),
            _ => format!("{} vs {}", self.home_team, self.away_team),
        }
    }
}

fn unknown_player() -> String {
    UNKNOWN_PLAYER.to_string()
}

/// One user's score guess for one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Stable permanent identifier. Records missing it are bucketed under
    /// the "unknown" player rather than rejected.
    #[serde(default = "unknown_player", alias = "UserId")]
    pub user_id: String,
    #[serde(alias = "GameId")]
    pub game_id: String,
    #[serde(default, alias = "PredictedHomeScore")]
    pub predicted_home_score: Option<u32>,
    #[serde(default, alias = "PredictedAwayScore")]
    pub predicted_away_score: Option<u32>,
    /// Display name snapshot at submission time. Names change; user ids don't.
    #[serde(default, alias = "PlayerName")]
    pub player_name: Option<String>,
    #[serde(alias = "Timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Prediction {
    /// The entered guess, or None when the user left the prediction blank.
    /// A half-entered guess counts as blank.
    pub fn entered(&self) -> Option<(u32, u32)> {
        match (self.predicted_home_score, self.predicted_away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}
