use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
///
/// Everything is optional: `table` and friends work against the local store
/// with no config at all. A profile is needed to submit predictions and a
/// fixtures section to sync from the data provider.
///
/// Example YAML:
/// ```yaml
/// profile:
///   user_id: "u-7f3a"
///   name: "Lea"
/// fixtures:
///   competitions: ["PD"]
///   week_label: "Fecha"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Identity used when submitting predictions.
    #[serde(default)]
    pub profile: Option<ProfileConfig>,

    /// Override for the league data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Fixture/result provider settings; absent disables `sync`.
    #[serde(default)]
    pub fixtures: Option<FixturesConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Stable identifier, never displayed. Display names may change freely.
    pub user_id: String,

    /// Display name attached to submitted predictions.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FixturesConfig {
    /// Provider base URL (default: the football-data v4 API).
    #[serde(default)]
    pub url: Option<String>,

    /// Competition codes to pull, e.g. ["PD", "CL"]. Fetched concurrently.
    pub competitions: Vec<String>,

    /// Prefix for week labels built from the provider's matchday number
    /// (default "Fecha": matchday 3 becomes "Fecha 3").
    #[serde(default)]
    pub week_label: Option<String>,

    /// Request timeout as a duration string, e.g. "10s" or "1min".
    #[serde(default)]
    pub timeout: Option<String>,
}

pub const DEFAULT_FIXTURES_URL: &str = "https://api.football-data.org/v4";
pub const DEFAULT_WEEK_LABEL: &str = "Fecha";
pub const DEFAULT_TIMEOUT: &str = "10s";
