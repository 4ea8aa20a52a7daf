use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{RankedPlayer, ScoredPrediction, MAX_POINTS};
use crate::store::{Game, GameStatus};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a player or team name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width of the leaderboard name column: generous on wide terminals,
/// squeezed but readable on narrow ones.
fn name_column_width() -> usize {
    match get_terminal_width() {
        Some(width) if width < 60 => 14,
        _ => 24,
    }
}

/// Format the leaderboard.
/// Columns: position, player, total points, weeks won, perfect scores, played.
pub fn format_leaderboard(players: &[RankedPlayer], use_colors: bool) -> String {
    if players.is_empty() {
        return "No predictions yet.".to_string();
    }

    let name_width = name_column_width();
    let mut lines = Vec::with_capacity(players.len() + 1);

    let header = format!(
        "{:>3} {:<name_width$} {:>5} {:>6} {:>8} {:>7}",
        "#", "Player", "Pts", "Weeks", "Perfect", "Played",
    );
    if use_colors {
        lines.push(header.dimmed().to_string());
    } else {
        lines.push(header);
    }

    for (idx, player) in players.iter().enumerate() {
        let name = truncate_name(&player.display_name, name_width);
        let row = format!(
            "{:>2}. {:<name_width$} {:>5} {:>6} {:>8} {:>7}",
            idx + 1,
            name,
            player.stats.total_points,
            player.stats.weeks_won,
            player.stats.perfect_scores,
            player.stats.games_participated,
        );
        if use_colors && idx == 0 {
            lines.push(row.bold().to_string());
        } else {
            lines.push(row);
        }
    }

    lines.join("\n")
}

/// Format one week's standings. Every player tied at the top score is a
/// winner and gets marked.
pub fn format_week_table(
    week: &str,
    standings: &[(String, u32)],
    names: &std::collections::HashMap<&str, &str>,
    use_colors: bool,
) -> String {
    if standings.is_empty() {
        return format!("No scored predictions for {} yet.", week);
    }

    let best = standings.iter().map(|(_, points)| *points).max().unwrap_or(0);
    let name_width = name_column_width();

    let mut lines = vec![week.to_string()];
    for (user_id, points) in standings {
        let display = names.get(user_id.as_str()).copied().unwrap_or(user_id.as_str());
        let marker = if *points == best { " *" } else { "" };
        let row = format!(
            "  {:<name_width$} {:>5}{}",
            truncate_name(display, name_width),
            points,
            marker,
        );
        if use_colors && *points == best {
            lines.push(row.bold().to_string());
        } else {
            lines.push(row);
        }
    }
    lines.push(format!("  (* won the {})", week));

    lines.join("\n")
}

/// Format one player's predictions with their per-game points.
/// Pending games show a dot instead of a number: no result, no points yet.
pub fn format_player_detail(
    display_name: &str,
    scored: &[ScoredPrediction<'_>],
    use_colors: bool,
) -> String {
    if scored.is_empty() {
        return format!("{} has no predictions.", display_name);
    }

    let mut lines = vec![display_name.to_string()];
    let mut total = 0;
    for entry in scored {
        let guess = match entry.prediction.entered() {
            Some((home, away)) => format!("{}-{}", home, away),
            None => "(blank)".to_string(),
        };
        let points_str = match entry.points {
            Some(points) => {
                total += points;
                format!("{:>2}", points)
            }
            None => " ·".to_string(),
        };
        let week = entry.game.week.as_deref().unwrap_or("-");
        let row = format!(
            "  {:<10} {:<32} guessed {:<7} {}",
            week,
            entry.game.short_ref(),
            guess,
            points_str,
        );
        if use_colors && entry.points == Some(MAX_POINTS) {
            lines.push(row.green().to_string());
        } else {
            lines.push(row);
        }
    }
    lines.push(format!("  Total: {}", total));

    lines.join("\n")
}

/// Format the fixture list, one game per line.
pub fn format_games_list(games: &[Game], use_colors: bool) -> String {
    if games.is_empty() {
        return "No games in the store. Run sync or add results manually.".to_string();
    }

    games
        .iter()
        .map(|game| format_game_line(game, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_game_line(game: &Game, use_colors: bool) -> String {
    let week = game.week.as_deref().unwrap_or("-");
    let when = match game.status {
        GameStatus::Finished => "finished".to_string(),
        GameStatus::Live => "LIVE".to_string(),
        GameStatus::Upcoming => format_kickoff(game.kick_off_time),
    };

    if use_colors {
        format!(
            "{:<12} {:<10} {:<32} {}",
            game.id.dimmed(),
            week,
            game.short_ref(),
            if game.status == GameStatus::Live {
                when.red().to_string()
            } else {
                when
            },
        )
    } else {
        format!("{:<12} {:<10} {:<32} {}", game.id, week, game.short_ref(), when)
    }
}

/// Format a kickoff time relative to now: "in 2h" before, "3d ago" after.
pub fn format_kickoff(kick_off: DateTime<Utc>) -> String {
    let offset = kick_off - Utc::now();
    if offset > Duration::zero() {
        format!("in {}", format_span(offset))
    } else {
        let elapsed = -offset;
        if elapsed < Duration::minutes(1) {
            "now".to_string()
        } else {
            format!("{} ago", format_span(elapsed))
        }
    }
}

/// Format a duration into a compact span: "2h", "3d", "1w".
fn format_span(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "<1m".to_string()
        }
    }
}
