use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::types::{ApiMatch, MatchesResponse};

/// HTTP client for the fixture/result provider (football-data.org v4 API
/// shape: token in an X-Auth-Token header, matches listed per competition).
pub struct FixtureClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl FixtureClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Fetch all matches of a competition for the current season.
    /// Transient failures retry with exponential backoff.
    pub async fn competition_matches(&self, competition: &str) -> Result<Vec<ApiMatch>> {
        let url = format!("{}/competitions/{}/matches", self.base_url, competition);

        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(3);

        let response = Retry::spawn(retry_strategy, || async {
            self.http
                .get(&url)
                .header("X-Auth-Token", &self.token)
                .send()
                .await
                .map_err(|e| anyhow!("Provider request failed: {}", e))
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status, competition));
        }

        let parsed: MatchesResponse = response
            .json()
            .await
            .context("Failed to parse provider response")?;
        Ok(parsed.matches)
    }
}

fn map_status_error(status: reqwest::StatusCode, competition: &str) -> anyhow::Error {
    match status.as_u16() {
        400 | 401 => anyhow!(
            "Provider rejected the API token. Check PRODE_API_TOKEN or re-enter it \
             (delete the stored token file to be prompted again)."
        ),
        403 => anyhow!(
            "Competition '{}' is not available on your provider plan.",
            competition
        ),
        404 => anyhow!(
            "Unknown competition code '{}'. See the provider docs for valid codes.",
            competition
        ),
        429 => anyhow!("Provider rate limit exceeded. Wait a minute and try again."),
        _ => anyhow!("Provider error for '{}': HTTP {}", competition, status),
    }
}
