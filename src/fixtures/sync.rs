use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;

use super::client::FixtureClient;
use super::types::ApiMatch;
use crate::store::{Game, GameStatus};

/// Map the provider's match lifecycle onto the store's three states.
/// Returns None for matches that will never be played.
fn map_status(provider_status: &str) -> Option<GameStatus> {
    match provider_status {
        "FINISHED" | "AWARDED" => Some(GameStatus::Finished),
        "IN_PLAY" | "PAUSED" | "SUSPENDED" => Some(GameStatus::Live),
        "CANCELLED" => None,
        // SCHEDULED, TIMED, POSTPONED and anything the provider adds later
        _ => Some(GameStatus::Upcoming),
    }
}

/// Convert a provider match into a store Game. The provider id becomes an
/// opaque stable game id so locally-created games can never collide.
pub fn to_game(m: &ApiMatch, week_label: &str) -> Option<Game> {
    let status = map_status(&m.status)?;

    // Half-reported scores are dropped: the store invariant is both or neither.
    let (home_score, away_score) = match (m.score.full_time.home, m.score.full_time.away) {
        (Some(home), Some(away)) => (Some(home), Some(away)),
        _ => (None, None),
    };

    Some(Game {
        id: format!("fd-{}", m.id),
        home_team: m.home_team.display_name(),
        away_team: m.away_team.display_name(),
        status,
        home_score,
        away_score,
        kick_off_time: m.utc_date,
        week: m.matchday.map(|day| format!("{} {}", week_label, day)),
        league: m
            .competition
            .as_ref()
            .and_then(|c| c.name.clone()),
    })
}

/// Merge freshly fetched games into the stored set. The provider wins for
/// games it knows about; locally-created games (manual results, friendlies)
/// pass through untouched. Returns (merged, added, updated).
pub fn merge_games(existing: Vec<Game>, fetched: Vec<Game>) -> (Vec<Game>, usize, usize) {
    let mut by_id: HashMap<String, Game> = existing
        .into_iter()
        .map(|game| (game.id.clone(), game))
        .collect();

    let mut added = 0;
    let mut updated = 0;
    for game in fetched {
        if by_id.insert(game.id.clone(), game).is_some() {
            updated += 1;
        } else {
            added += 1;
        }
    }

    let mut merged: Vec<Game> = by_id.into_values().collect();
    merged.sort_by(|a, b| (a.kick_off_time, &a.id).cmp(&(b.kick_off_time, &b.id)));
    (merged, added, updated)
}

/// Fetch every configured competition concurrently and flatten the result.
/// One failing competition is reported and skipped; only all of them
/// failing aborts the sync.
pub async fn fetch_games(
    client: &FixtureClient,
    competitions: &[String],
    week_label: &str,
    verbose: bool,
) -> Result<Vec<Game>> {
    let mut futures = FuturesUnordered::new();
    for competition in competitions {
        futures.push(async move {
            let result = client.competition_matches(competition).await;
            (competition.as_str(), result)
        });
    }

    let mut games = Vec::new();
    let mut any_succeeded = false;

    while let Some((competition, result)) = futures.next().await {
        match result {
            Ok(matches) => {
                if verbose {
                    eprintln!("  {}: {} matches", competition, matches.len());
                }
                games.extend(matches.iter().filter_map(|m| to_game(m, week_label)));
                any_succeeded = true;
            }
            Err(e) => {
                eprintln!("Sync failed for {}: {}", competition, e);
            }
        }
    }

    if !any_succeeded && !competitions.is_empty() {
        anyhow::bail!("Every competition failed to sync. Check your network and token.");
    }

    Ok(games)
}
