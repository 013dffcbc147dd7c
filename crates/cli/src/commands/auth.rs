use anyhow::Result;
use clap::Subcommand;
use keyring::Entry;
use tracing::{debug, info};

use crate::config::{get_config_path, AppConfig};
use crate::errors::CliError;

pub const KEY_RING_SERVICE_NAME: &str = "star_tracker_cli";
pub const KEY_RING_USER_TOKEN: &str = "github_token";

/// Environment variable checked before the keyring
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Subcommands for the auth command
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store a GitHub personal access token in the system keyring
    #[command(name = "github")]
    GitHub,
}

/// Execute the auth command
pub async fn execute(cmd: AuthCommands) -> Result<(), CliError> {
    match cmd {
        AuthCommands::GitHub => auth_github().await,
    }
}

/// Find the GitHub token for a tracking run.
///
/// `GITHUB_TOKEN` wins over the keyring so scheduled jobs can inject a token
/// without touching the machine's credential store.
pub fn resolve_token() -> Result<String, CliError> {
    if let Some(token) = token_from_env(std::env::var(TOKEN_ENV_VAR).ok()) {
        debug!("Using the GitHub token from {}", TOKEN_ENV_VAR);
        return Ok(token);
    }

    let keyring = Entry::new(KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN).map_err(|e| {
        CliError::AuthError(format!("Failed to open the keyring entry: {}", e))
    })?;

    let token = keyring.get_password().map_err(|e| {
        CliError::AuthError(format!(
            "No GitHub token found. Set {} or run `star-tracker auth github`. Keyring said: {}",
            TOKEN_ENV_VAR, e
        ))
    })?;

    debug!("Using the GitHub token from the keyring");
    Ok(token)
}

fn token_from_env(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Authenticate with GitHub
async fn auth_github() -> Result<(), CliError> {
    let config_path = get_config_path(None);
    let mut config = AppConfig::load_or_default(&config_path)?;

    println!("GitHub Personal Access Token Authentication");
    println!("------------------------------------------");
    println!("Please provide your GitHub Personal Access Token:");

    let mut token = String::new();
    std::io::stdin()
        .read_line(&mut token)
        .map_err(|e| CliError::AuthError(format!("Failed to read input: {}", e)))?;
    let token = token.trim();

    if token.is_empty() {
        return Err(CliError::AuthError("Token cannot be empty".to_string()));
    }

    let keyring = Entry::new(KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN).map_err(|e| {
        CliError::AuthError(format!("Failed to create an entry in the keyring: {}", e))
    })?;
    keyring
        .set_password(token)
        .map_err(|e| CliError::AuthError(format!("Failed to save token to keyring: {}", e)))?;

    config.authentication.auth_method = "token".to_string();
    config.save(&config_path)?;

    info!("Stored the GitHub token in the keyring");
    println!("GitHub token authentication configured successfully!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_env_trims() {
        assert_eq!(
            token_from_env(Some("  ghp_abc \n".to_string())),
            Some("ghp_abc".to_string())
        );
    }

    #[test]
    fn test_token_from_env_ignores_blank() {
        assert_eq!(token_from_env(Some("   ".to_string())), None);
        assert_eq!(token_from_env(None), None);
    }
}
