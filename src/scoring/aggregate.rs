use super::points::{score_prediction, MAX_POINTS};
use crate::store::{Game, Prediction};
use std::collections::HashMap;

/// Per-player aggregate over the whole league, recomputed on demand.
/// Never persisted: it is a deterministic projection of games + predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub total_points: u32,
    /// Predictions that received a score (including zero).
    pub games_participated: u32,
    /// Predictions awarded the maximum 10 points.
    pub perfect_scores: u32,
    /// Weeks in which the player reached the week's best total (ties count).
    pub weeks_won: u32,
}

/// One prediction resolved against its game, with its computed points.
/// `points` is None while the game has no final result.
#[derive(Debug, Clone, Copy)]
pub struct ScoredPrediction<'a> {
    pub prediction: &'a Prediction,
    pub game: &'a Game,
    pub points: Option<u32>,
}

/// Keep one prediction per (user, game): the latest by timestamp. A user
/// resubmitting a guess must not double-count. An exact timestamp tie is
/// broken by the larger predicted score pair so the winner does not depend
/// on input order.
pub fn dedupe_predictions(predictions: &[Prediction]) -> Vec<&Prediction> {
    let mut latest: HashMap<(&str, &str), &Prediction> = HashMap::new();
    for prediction in predictions {
        let key = (prediction.user_id.as_str(), prediction.game_id.as_str());
        match latest.get(&key) {
            Some(kept)
                if (
                    kept.timestamp,
                    kept.predicted_home_score,
                    kept.predicted_away_score,
                ) >= (
                    prediction.timestamp,
                    prediction.predicted_home_score,
                    prediction.predicted_away_score,
                ) => {}
            _ => {
                latest.insert(key, prediction);
            }
        }
    }
    latest.into_values().collect()
}

/// The scored projection every view is built from: predictions deduplicated,
/// resolved against their game, and scored. Predictions referencing an
/// unknown game are dropped silently (stale records, not an error). Output
/// order is fixed (kickoff, game id, user id) so views render stably.
pub fn score_predictions<'a>(
    games: &'a [Game],
    predictions: &'a [Prediction],
) -> Vec<ScoredPrediction<'a>> {
    let games_by_id: HashMap<&str, &Game> = games.iter().map(|g| (g.id.as_str(), g)).collect();

    let mut scored: Vec<ScoredPrediction<'a>> = dedupe_predictions(predictions)
        .into_iter()
        .filter_map(|prediction| {
            let game = games_by_id.get(prediction.game_id.as_str())?;
            Some(ScoredPrediction {
                prediction,
                game,
                points: score_prediction(prediction, game),
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        (a.game.kick_off_time, &a.game.id, &a.prediction.user_id)
            .cmp(&(b.game.kick_off_time, &b.game.id, &b.prediction.user_id))
    });
    scored
}

/// Aggregate the full corpus into per-player statistics.
///
/// Every user id appearing in the prediction set gets an entry, so a player
/// with nothing scoreable yet still shows up with all-zero stats. Weekly
/// wins go to every player whose week total equals the week's maximum.
pub fn compute_stats(games: &[Game], predictions: &[Prediction]) -> HashMap<String, PlayerStats> {
    let mut stats: HashMap<String, PlayerStats> = HashMap::new();
    for prediction in predictions {
        stats.entry(prediction.user_id.clone()).or_default();
    }

    // week label -> user id -> accumulated points
    let mut week_totals: HashMap<&str, HashMap<&str, u32>> = HashMap::new();

    for scored in score_predictions(games, predictions) {
        let Some(points) = scored.points else {
            continue;
        };
        let entry = stats.entry(scored.prediction.user_id.clone()).or_default();
        entry.total_points += points;
        entry.games_participated += 1;
        if points == MAX_POINTS {
            entry.perfect_scores += 1;
        }
        if let Some(week) = scored.game.week.as_deref() {
            *week_totals
                .entry(week)
                .or_default()
                .entry(scored.prediction.user_id.as_str())
                .or_insert(0) += points;
        }
    }

    for totals in week_totals.values() {
        let Some(&best) = totals.values().max() else {
            continue;
        };
        for (user_id, &points) in totals {
            if points == best {
                if let Some(entry) = stats.get_mut(*user_id) {
                    entry.weeks_won += 1;
                }
            }
        }
    }

    stats
}

/// Per-user totals for one week, sorted by points descending (user id
/// breaks ties). Only players with a scored prediction in the week appear.
pub fn week_standings(
    games: &[Game],
    predictions: &[Prediction],
    week: &str,
) -> Vec<(String, u32)> {
    let mut totals: HashMap<&str, u32> = HashMap::new();
    for scored in score_predictions(games, predictions) {
        if scored.game.week.as_deref() != Some(week) {
            continue;
        }
        let Some(points) = scored.points else {
            continue;
        };
        *totals.entry(scored.prediction.user_id.as_str()).or_insert(0) += points;
    }

    let mut standings: Vec<(String, u32)> = totals
        .into_iter()
        .map(|(user_id, points)| (user_id.to_string(), points))
        .collect();
    standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{GameStatus, UNKNOWN_PLAYER};
    use chrono::{Duration, Utc};

    fn game(id: &str, status: GameStatus, score: Option<(u32, u32)>, week: Option<&str>) -> Game {
        Game {
            id: id.to_string(),
            home_team: "River".to_string(),
            away_team: "Boca".to_string(),
            status,
            home_score: score.map(|(h, _)| h),
            away_score: score.map(|(_, a)| a),
            kick_off_time: Utc::now(),
            week: week.map(str::to_string),
            league: None,
        }
    }

    fn prediction(user: &str, game: &str, home: u32, away: u32) -> Prediction {
        Prediction {
            user_id: user.to_string(),
            game_id: game.to_string(),
            predicted_home_score: Some(home),
            predicted_away_score: Some(away),
            player_name: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_week_winner_scenario() {
        // G1 finished 2-1 in W1. A predicts 2-1 (10 points), B predicts
        // 3-1 (7 points). Only A takes the week.
        let games = vec![game("g1", GameStatus::Finished, Some((2, 1)), Some("W1"))];
        let predictions = vec![
            prediction("a", "g1", 2, 1),
            prediction("b", "g1", 3, 1),
        ];

        let stats = compute_stats(&games, &predictions);
        let a = &stats["a"];
        let b = &stats["b"];

        assert_eq!(a.total_points, 10);
        assert_eq!(a.perfect_scores, 1);
        assert_eq!(a.weeks_won, 1);
        assert_eq!(b.total_points, 7);
        assert_eq!(b.perfect_scores, 0);
        assert_eq!(b.weeks_won, 0);
        assert_eq!(a.games_participated, 1);
        assert_eq!(b.games_participated, 1);
    }

    #[test]
    fn test_week_tie_credits_every_leader() {
        let games = vec![game("g1", GameStatus::Finished, Some((2, 1)), Some("W1"))];
        let predictions = vec![
            prediction("a", "g1", 2, 1),
            prediction("b", "g1", 2, 1),
            prediction("c", "g1", 0, 0),
        ];

        let stats = compute_stats(&games, &predictions);
        assert_eq!(stats["a"].weeks_won, 1);
        assert_eq!(stats["b"].weeks_won, 1);
        assert_eq!(stats["c"].weeks_won, 0);
    }

    #[test]
    fn test_unscoreable_games_do_not_count() {
        let games = vec![game("g2", GameStatus::Upcoming, None, Some("W1"))];
        let predictions = vec![prediction("a", "g2", 2, 1)];

        let stats = compute_stats(&games, &predictions);
        let a = &stats["a"];
        assert_eq!(a.total_points, 0);
        assert_eq!(a.games_participated, 0);
        assert_eq!(a.weeks_won, 0);
    }

    #[test]
    fn test_player_with_nothing_scoreable_still_appears() {
        let games = vec![
            game("g1", GameStatus::Finished, Some((2, 1)), Some("W1")),
            game("g2", GameStatus::Upcoming, None, Some("W2")),
        ];
        let predictions = vec![
            prediction("a", "g1", 2, 1),
            prediction("idle", "g2", 1, 1),
        ];

        let stats = compute_stats(&games, &predictions);
        assert_eq!(stats["idle"], PlayerStats::default());
        // And the empty week contributes no win to anyone.
        assert_eq!(stats["a"].weeks_won, 1);
    }

    #[test]
    fn test_dangling_game_reference_is_skipped() {
        let games = vec![game("g1", GameStatus::Finished, Some((2, 1)), None)];
        let predictions = vec![
            prediction("a", "g1", 2, 1),
            prediction("a", "ghost", 2, 1),
        ];

        let stats = compute_stats(&games, &predictions);
        assert_eq!(stats["a"].total_points, 10);
        assert_eq!(stats["a"].games_participated, 1);
    }

    #[test]
    fn test_blank_prediction_participates_with_zero() {
        let games = vec![game("g1", GameStatus::Finished, Some((2, 1)), Some("W1"))];
        let mut blank = prediction("a", "g1", 0, 0);
        blank.predicted_home_score = None;
        blank.predicted_away_score = None;

        let stats = compute_stats(&games, &[blank]);
        let a = &stats["a"];
        assert_eq!(a.total_points, 0);
        assert_eq!(a.games_participated, 1);
        // Sole scorer of the week at zero points still leads the week.
        assert_eq!(a.weeks_won, 1);
    }

    #[test]
    fn test_resubmission_counts_once_latest_wins() {
        let games = vec![game("g1", GameStatus::Finished, Some((2, 1)), None)];
        let mut first = prediction("a", "g1", 0, 3);
        first.timestamp = Utc::now() - Duration::hours(2);
        let second = prediction("a", "g1", 2, 1);

        let stats = compute_stats(&games, &[first, second]);
        let a = &stats["a"];
        assert_eq!(a.games_participated, 1);
        assert_eq!(a.total_points, 10);
    }

    #[test]
    fn test_aggregation_is_idempotent_and_order_independent() {
        let games = vec![
            game("g1", GameStatus::Finished, Some((2, 1)), Some("W1")),
            game("g2", GameStatus::Finished, Some((0, 0)), Some("W1")),
            game("g3", GameStatus::Live, Some((1, 0)), Some("W2")),
        ];
        let predictions = vec![
            prediction("a", "g1", 2, 1),
            prediction("b", "g1", 1, 0),
            prediction("a", "g2", 1, 1),
            prediction("b", "g2", 0, 0),
            prediction("a", "g3", 2, 0),
        ];

        let stats = compute_stats(&games, &predictions);
        assert_eq!(stats, compute_stats(&games, &predictions));

        let mut shuffled = predictions.clone();
        shuffled.reverse();
        assert_eq!(stats, compute_stats(&games, &shuffled));
    }

    #[test]
    fn test_unknown_player_bucket_aggregates() {
        let games = vec![game("g1", GameStatus::Finished, Some((2, 1)), None)];
        let predictions = vec![prediction(UNKNOWN_PLAYER, "g1", 2, 1)];

        let stats = compute_stats(&games, &predictions);
        assert_eq!(stats[UNKNOWN_PLAYER].total_points, 10);
    }

    #[test]
    fn test_week_standings_sorted_and_scoped() {
        let games = vec![
            game("g1", GameStatus::Finished, Some((2, 1)), Some("W1")),
            game("g2", GameStatus::Finished, Some((1, 1)), Some("W2")),
        ];
        let predictions = vec![
            prediction("a", "g1", 2, 1),
            prediction("b", "g1", 1, 0),
            prediction("a", "g2", 1, 1),
        ];

        let standings = week_standings(&games, &predictions, "W1");
        assert_eq!(standings, vec![("a".to_string(), 10), ("b".to_string(), 6)]);

        // W2 points never leak into W1.
        let w2 = week_standings(&games, &predictions, "W2");
        assert_eq!(w2, vec![("a".to_string(), 10)]);
    }

    #[test]
    fn test_score_predictions_keeps_pending_entries() {
        let games = vec![game("g1", GameStatus::Upcoming, None, None)];
        let predictions = vec![prediction("a", "g1", 2, 1)];

        let scored = score_predictions(&games, &predictions);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].points, None);
    }

    #[test]
    fn test_dedupe_tie_on_timestamp_is_order_independent() {
        let ts = Utc::now();
        let mut first = prediction("a", "g1", 0, 0);
        first.timestamp = ts;
        let mut second = prediction("a", "g1", 2, 1);
        second.timestamp = ts;

        let forward_input = [first.clone(), second.clone()];
        let forward = dedupe_predictions(&forward_input);
        let backward_input = [second, first];
        let backward = dedupe_predictions(&backward_input);
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert_eq!(forward[0].entered(), backward[0].entered());
        assert_eq!(forward[0].entered(), Some((2, 1)));
    }
}
