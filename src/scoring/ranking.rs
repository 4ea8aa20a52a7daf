use super::aggregate::PlayerStats;
use crate::store::Prediction;
use std::collections::HashMap;

/// A leaderboard row: stats plus the name the row is displayed under.
#[derive(Debug, Clone)]
pub struct RankedPlayer {
    pub user_id: String,
    pub display_name: String,
    pub stats: PlayerStats,
}

/// Latest display name per user, taken from the most recent prediction that
/// carries one. Timestamp ties fall back to the greater name so the result
/// does not depend on input order.
pub fn display_names(predictions: &[Prediction]) -> HashMap<&str, &str> {
    let mut latest: HashMap<&str, (&Prediction, &str)> = HashMap::new();
    for prediction in predictions {
        let Some(name) = prediction.player_name.as_deref() else {
            continue;
        };
        match latest.get(prediction.user_id.as_str()) {
            Some((kept, kept_name))
                if (kept.timestamp, *kept_name) >= (prediction.timestamp, name) => {}
            _ => {
                latest.insert(prediction.user_id.as_str(), (prediction, name));
            }
        }
    }
    latest
        .into_iter()
        .map(|(user_id, (_, name))| (user_id, name))
        .collect()
}

/// Produce the leaderboard order: total points, then weeks won, then
/// perfect scores (all descending), then display name ascending with
/// case folded. Identical names fall back to user id, so the full chain
/// is a total order and two runs always agree.
pub fn rank_players(
    stats: HashMap<String, PlayerStats>,
    predictions: &[Prediction],
) -> Vec<RankedPlayer> {
    let names = display_names(predictions);

    let mut players: Vec<RankedPlayer> = stats
        .into_iter()
        .map(|(user_id, stats)| {
            let display_name = names
                .get(user_id.as_str())
                .map(|name| name.to_string())
                .unwrap_or_else(|| user_id.clone());
            RankedPlayer {
                user_id,
                display_name,
                stats,
            }
        })
        .collect();

    players.sort_by(|a, b| {
        b.stats
            .total_points
            .cmp(&a.stats.total_points)
            .then_with(|| b.stats.weeks_won.cmp(&a.stats.weeks_won))
            .then_with(|| b.stats.perfect_scores.cmp(&a.stats.perfect_scores))
            .then_with(|| {
                a.display_name
                    .to_lowercase()
                    .cmp(&b.display_name.to_lowercase())
            })
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    players
}
