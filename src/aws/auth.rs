//! # AWS Credential Resolution
//!
//! Credentials are resolved once at start-up and handed to the clients that
//! need them. Two sources are consulted, in order:
//! 1. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (and optionally
//!    `AWS_SESSION_TOKEN`) in the environment.
//! 2. The named profile in the shared credentials file, located by
//!    `AWS_SHARED_CREDENTIALS_FILE` or `~/.aws/credentials`.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

use crate::aws::types::Credentials;

/// Profile used when none is given on the command line.
pub const DEFAULT_PROFILE: &str = "default";

/// Resolves credentials for `profile`.
pub fn load_credentials(profile: &str) -> Result<Credentials> {
    if let Some(creds) = from_env(|key| std::env::var(key).ok()) {
        tracing::debug!("using credentials from environment");
        return Ok(creds);
    }

    let path = credentials_path()?;
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read credentials file {}", path.display()))?;
    tracing::debug!("using profile '{}' from {}", profile, path.display());
    parse_credentials_file(&contents, profile)
        .with_context(|| format!("Invalid credentials file {}", path.display()))
}

/// Reads credentials through `lookup`; `None` unless both key parts are set.
fn from_env<F>(lookup: F) -> Option<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let access_key_id = non_empty("AWS_ACCESS_KEY_ID")?;
    let secret_access_key = non_empty("AWS_SECRET_ACCESS_KEY")?;
    Some(Credentials {
        access_key_id,
        secret_access_key,
        session_token: non_empty("AWS_SESSION_TOKEN"),
    })
}

fn credentials_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().context("Cannot locate home directory for ~/.aws/credentials")?;
    Ok(home.join(".aws").join("credentials"))
}

/// Parses the INI-style shared credentials file and returns `profile`.
pub fn parse_credentials_file(contents: &str, profile: &str) -> Result<Credentials> {
    let mut current: Option<&str> = None;
    let mut access_key_id = None;
    let mut secret_access_key = None;
    let mut session_token = None;
    let mut found = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = Some(section.trim());
            found |= current == Some(profile);
            continue;
        }
        if current != Some(profile) {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            bail!("Malformed line in profile '{}': {}", profile, line);
        };
        let value = value.trim().to_string();
        match key.trim() {
            "aws_access_key_id" => access_key_id = Some(value),
            "aws_secret_access_key" => secret_access_key = Some(value),
            "aws_session_token" => session_token = Some(value),
            _ => {}
        }
    }

    if !found {
        bail!("Profile '{}' not found", profile);
    }
    Ok(Credentials {
        access_key_id: access_key_id
            .ok_or_else(|| anyhow!("Profile '{}' has no aws_access_key_id", profile))?,
        secret_access_key: secret_access_key
            .ok_or_else(|| anyhow!("Profile '{}' has no aws_secret_access_key", profile))?,
        session_token,
    })
}
