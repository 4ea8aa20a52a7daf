use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{ensure_config_dir, get_config_path, DEFAULT_WEEK_LABEL};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Derive a stable user id from a display name: "Léa M." -> "u-lea-m".
/// The id is permanent; the display name can change later without losing
/// history, so it should not be the name itself.
fn suggest_user_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').replace("--", "-");
    if slug.is_empty() {
        "u-player".to_string()
    } else {
        format!("u-{}", slug)
    }
}

fn render_template(user_id: &str, name: &str) -> String {
    format!(
        r#"# prode configuration
#
# Only the profile is needed to play. Add the fixtures section to pull
# games and results from football-data.org (free tier works; prode asks
# for the API token on first sync).

profile:
  user_id: "{user_id}"
  name: "{name}"

# data_dir: /path/to/shared/league   # defaults to the platform data dir

# fixtures:
#   competitions: ["PD"]             # competition codes to pull
#   week_label: "{week_label}"              # matchday 3 -> "{week_label} 3"
#   timeout: "10s"
"#,
        user_id = user_id,
        name = name,
        week_label = DEFAULT_WEEK_LABEL,
    )
}

/// Create a starter config, prompting for the player identity.
///
/// Refuses to overwrite an existing file so a fat-fingered `init` can't
/// wipe a tuned config.
pub fn write_starter_config(path: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = path.unwrap_or_else(get_config_path);
    if config_path.exists() {
        anyhow::bail!(
            "Config already exists at {} (remove it first to start over)",
            config_path.display()
        );
    }

    let name = prompt_with_default("Display name", "Player")?;
    let user_id = prompt_with_default("User id", &suggest_user_id(&name))?;

    if config_path == get_config_path() {
        ensure_config_dir()?;
    } else if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&config_path, render_template(&user_id, &name))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(config_path)
}
