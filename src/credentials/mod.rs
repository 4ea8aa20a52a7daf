use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable name for providing the provider token non-interactively
pub const ENV_TOKEN_VAR: &str = "PRODE_API_TOKEN";

const TOKEN_FILE: &str = "token";

/// Path of the token file (~/.config/prode/token)
pub fn get_token_path() -> PathBuf {
    crate::config::get_config_dir().join(TOKEN_FILE)
}

/// Check for a token in the PRODE_API_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    match std::env::var(ENV_TOKEN_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Read the stored token file. Returns None when no token was stored yet.
pub fn load_stored_token() -> Result<Option<String>> {
    let path = get_token_path();
    if !path.exists() {
        return Ok(None);
    }
    let token = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read token file at {}", path.display()))?;
    let token = token.trim().to_string();
    if token.is_empty() {
        Ok(None)
    } else {
        Ok(Some(token))
    }
}

/// Store the token in the config dir, owner-readable only on unix.
pub fn store_token(token: &str) -> Result<()> {
    crate::config::ensure_config_dir()?;
    let path = get_token_path();
    std::fs::write(&path, format!("{}\n", token))
        .with_context(|| format!("Failed to write token file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to restrict permissions on {}", path.display()))?;
    }

    Ok(())
}

/// Prompts user to enter the data provider API token
pub fn prompt_for_token() -> Result<String> {
    println!("football-data.org API token required for fixture sync.");
    println!("Register (free) at: https://www.football-data.org/client/register");
    println!();

    let token =
        rpassword::prompt_password("Enter token: ").context("Failed to read token from stdin")?;

    let token = token.trim();

    if token.is_empty() {
        anyhow::bail!("Token cannot be empty");
    }

    Ok(token.to_string())
}

/// Resolve the provider token: env var, then the stored file, then an
/// interactive prompt whose answer is stored for next time.
pub fn setup_token_if_missing() -> Result<String> {
    if let Some(token) = get_token_from_env() {
        return Ok(token);
    }
    if let Some(token) = load_stored_token()? {
        return Ok(token);
    }

    let token = prompt_for_token()?;
    store_token(&token).context("Failed to store token")?;
    println!("Token stored in {}", get_token_path().display());

    Ok(token)
}
