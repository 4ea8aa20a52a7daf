use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response envelope of the provider's competition matches endpoint.
#[derive(Debug, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<ApiMatch>,
}

/// One match as the provider reports it. Only the fields the store needs
/// are modeled; the engine never sees these shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    pub id: u64,
    pub utc_date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub matchday: Option<u32>,
    pub home_team: ApiTeam,
    pub away_team: ApiTeam,
    #[serde(default)]
    pub score: ApiScore,
    #[serde(default)]
    pub competition: Option<ApiCompetition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
}

impl ApiTeam {
    /// Prefer the short name ("River") over the registered one
    /// ("CA River Plate"); fall back to a placeholder for TBD slots in
    /// knockout brackets.
    pub fn display_name(&self) -> String {
        self.short_name
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "TBD".to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScore {
    #[serde(default)]
    pub full_time: ApiScorePair,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScorePair {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCompetition {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_match() {
        let json = r#"{
            "id": 327117,
            "utcDate": "2024-03-10T18:00:00Z",
            "status": "FINISHED",
            "matchday": 3,
            "homeTeam": { "name": "CA River Plate", "shortName": "River" },
            "awayTeam": { "name": "CA Boca Juniors", "shortName": "Boca" },
            "score": { "fullTime": { "home": 2, "away": 1 } },
            "competition": { "name": "Primera División" }
        }"#;
        let m: ApiMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 327117);
        assert_eq!(m.status, "FINISHED");
        assert_eq!(m.matchday, Some(3));
        assert_eq!(m.home_team.display_name(), "River");
        assert_eq!(m.score.full_time.home, Some(2));
    }

    #[test]
    fn test_parse_scheduled_match_without_score() {
        let json = r#"{
            "id": 1,
            "utcDate": "2024-03-17T18:00:00Z",
            "status": "SCHEDULED",
            "homeTeam": { "name": "Racing" },
            "awayTeam": {},
            "score": { "fullTime": { "home": null, "away": null } }
        }"#;
        let m: ApiMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.matchday, None);
        assert_eq!(m.home_team.display_name(), "Racing");
        assert_eq!(m.away_team.display_name(), "TBD");
        assert_eq!(m.score.full_time.home, None);
    }
}
