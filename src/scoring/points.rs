use crate::store::{Game, Prediction};

/// Points for calling the right result (home win / away win / draw).
pub const OUTCOME_POINTS: u32 = 5;
/// Points for nailing one side's exact goal count.
pub const EXACT_SCORE_POINTS: u32 = 2;
/// Points for matching the absolute goal difference.
pub const GOAL_DIFF_POINTS: u32 = 1;
/// A perfect prediction: outcome + both exact scores + goal difference.
pub const MAX_POINTS: u32 = 10;

/// The win/draw/loss category of a scoreline, independent of magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

pub fn outcome(home: u32, away: u32) -> Outcome {
    if home > away {
        Outcome::HomeWin
    } else if home < away {
        Outcome::AwayWin
    } else {
        Outcome::Draw
    }
}

/// Score one prediction against its game.
///
/// Returns None while the game has no final result (not yet scoreable —
/// deliberately distinct from zero points). A blank prediction against a
/// finished game scores exactly 0.
///
/// Each component is evaluated independently and summed:
/// +5 outcome, +2 exact home score, +2 exact away score, +1 goal difference.
pub fn score_prediction(prediction: &Prediction, game: &Game) -> Option<u32> {
    let (actual_home, actual_away) = game.final_score()?;

    let (predicted_home, predicted_away) = match prediction.entered() {
        Some(scores) => scores,
        None => return Some(0),
    };

    let mut points = 0;
    if outcome(predicted_home, predicted_away) == outcome(actual_home, actual_away) {
        points += OUTCOME_POINTS;
    }
    if predicted_home == actual_home {
        points += EXACT_SCORE_POINTS;
    }
    if predicted_away == actual_away {
        points += EXACT_SCORE_POINTS;
    }
    if predicted_home.abs_diff(predicted_away) == actual_home.abs_diff(actual_away) {
        points += GOAL_DIFF_POINTS;
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GameStatus;
    use chrono::Utc;

    fn finished_game(home: u32, away: u32) -> Game {
        Game {
            id: "g1".to_string(),
            home_team: "River".to_string(),
            away_team: "Boca".to_string(),
            status: GameStatus::Finished,
            home_score: Some(home),
            away_score: Some(away),
            kick_off_time: Utc::now(),
            week: Some("Fecha 1".to_string()),
            league: None,
        }
    }

    fn prediction(home: u32, away: u32) -> Prediction {
        Prediction {
            user_id: "u1".to_string(),
            game_id: "g1".to_string(),
            predicted_home_score: Some(home),
            predicted_away_score: Some(away),
            player_name: None,
            timestamp: Utc::now(),
        }
    }

    fn blank_prediction() -> Prediction {
        Prediction {
            user_id: "u1".to_string(),
            game_id: "g1".to_string(),
            predicted_home_score: None,
            predicted_away_score: None,
            player_name: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_exact_prediction_scores_maximum() {
        let result = score_prediction(&prediction(2, 1), &finished_game(2, 1));
        assert_eq!(result, Some(MAX_POINTS));
    }

    #[test]
    fn test_outcome_plus_away_score() {
        // 3-1 against an actual 2-1: outcome (5) + exact away (2),
        // goal difference 2 vs 1 doesn't match.
        let result = score_prediction(&prediction(3, 1), &finished_game(2, 1));
        assert_eq!(result, Some(7));
    }

    #[test]
    fn test_outcome_and_goal_difference_only() {
        // 1-0 against 2-1: right outcome, right difference, no exact score.
        let result = score_prediction(&prediction(1, 0), &finished_game(2, 1));
        assert_eq!(result, Some(6));
    }

    #[test]
    fn test_wrong_outcome_can_still_take_partial_points() {
        // 1-1 against 2-1: wrong outcome, exact away score only.
        let result = score_prediction(&prediction(1, 1), &finished_game(2, 1));
        assert_eq!(result, Some(2));
    }

    #[test]
    fn test_draw_prediction_against_draw() {
        // 0-0 against 1-1: outcome (5) + difference (1).
        let result = score_prediction(&prediction(0, 0), &finished_game(1, 1));
        assert_eq!(result, Some(6));
    }

    #[test]
    fn test_completely_wrong_prediction_scores_zero() {
        let result = score_prediction(&prediction(3, 0), &finished_game(0, 1));
        assert_eq!(result, Some(0));
    }

    #[test]
    fn test_upcoming_game_is_not_scoreable() {
        let mut game = finished_game(0, 0);
        game.status = GameStatus::Upcoming;
        game.home_score = None;
        game.away_score = None;
        assert_eq!(score_prediction(&prediction(2, 1), &game), None);
    }

    #[test]
    fn test_live_game_is_not_scoreable_even_with_scores() {
        let mut game = finished_game(1, 0);
        game.status = GameStatus::Live;
        assert_eq!(score_prediction(&prediction(1, 0), &game), None);
    }

    #[test]
    fn test_finished_game_without_scores_is_not_scoreable() {
        let mut game = finished_game(0, 0);
        game.home_score = None;
        game.away_score = None;
        assert_eq!(score_prediction(&prediction(2, 1), &game), None);
    }

    #[test]
    fn test_blank_prediction_against_finished_game_scores_zero() {
        // Zero, not the not-yet-scoreable sentinel: the player skipped
        // this game and it counts against their participation.
        let result = score_prediction(&blank_prediction(), &finished_game(2, 1));
        assert_eq!(result, Some(0));
    }

    #[test]
    fn test_half_entered_prediction_scores_zero() {
        let mut p = prediction(2, 1);
        p.predicted_away_score = None;
        assert_eq!(score_prediction(&p, &finished_game(2, 1)), Some(0));
    }

    #[test]
    fn test_points_bounded_and_max_only_for_exact() {
        let game = finished_game(2, 1);
        for home in 0..=4 {
            for away in 0..=4 {
                let points = score_prediction(&prediction(home, away), &game).unwrap();
                assert!(points <= MAX_POINTS);
                assert_eq!(points == MAX_POINTS, home == 2 && away == 1);
            }
        }
    }

    #[test]
    fn test_outcome_component_depends_only_on_sign() {
        // Any home-win scoreline takes the outcome points against a home win.
        let game = finished_game(2, 1);
        for (home, away) in [(1, 0), (4, 2), (5, 0)] {
            let points = score_prediction(&prediction(home, away), &game).unwrap();
            assert!(points >= OUTCOME_POINTS, "{}-{} should carry the outcome", home, away);
        }
        // And any draw or away-win scoreline does not.
        for (home, away) in [(0, 0), (1, 1), (0, 2)] {
            let points = score_prediction(&prediction(home, away), &game).unwrap();
            assert!(points < OUTCOME_POINTS, "{}-{} should miss the outcome", home, away);
        }
    }

    #[test]
    fn test_outcome_derivation() {
        assert_eq!(outcome(2, 1), Outcome::HomeWin);
        assert_eq!(outcome(0, 3), Outcome::AwayWin);
        assert_eq!(outcome(1, 1), Outcome::Draw);
    }
}
