/*!
 * Local token storage for registry authentication
 *
 * The token is read from a fixed on-disk location once at process start
 * and is never implicitly reloaded mid-process; it is cleared only on
 * explicit logout. Expired tokens are treated as absent and removed on
 * read.
 */

use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Authentication token and user identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Whether the token has passed its expiry timestamp.
    pub fn is_expired(&self) -> bool {
        matches!(self.expires_at, Some(expires) if Utc::now() > expires)
    }

    /// Username derived from the email local part.
    pub fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Token persistence bound to a config directory.
pub struct TokenStore {
    token_path: PathBuf,
    config_dir: PathBuf,
}

impl TokenStore {
    pub fn new(config: &Config) -> Self {
        Self {
            token_path: config.token_path(),
            config_dir: config.config_dir.clone(),
        }
    }

    /// Load the stored token, if any. Expired tokens are cleared and
    /// reported as absent.
    pub fn load(&self) -> Result<Option<Token>> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.token_path)
            .with_context(|| format!("failed to read token file {}", self.token_path.display()))?;
        let token: Token =
            serde_json::from_slice(&data).context("failed to decode stored token")?;

        if token.is_expired() {
            debug!("stored token expired, clearing");
            self.clear()?;
            return Ok(None);
        }

        Ok(Some(token))
    }

    /// Persist a token, creating the config directory if needed.
    pub fn save(&self, token: &Token) -> Result<()> {
        fs::create_dir_all(&self.config_dir).with_context(|| {
            format!("failed to create config directory {}", self.config_dir.display())
        })?;

        let data = serde_json::to_vec_pretty(token).context("failed to encode token")?;
        fs::write(&self.token_path, data)
            .with_context(|| format!("failed to write token file {}", self.token_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.token_path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the stored token. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path).with_context(|| {
                format!("failed to remove token file {}", self.token_path.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> TokenStore {
        let config = Config {
            base_url: "https://registry.example.com".to_string(),
            api_version: "v1".to_string(),
            config_dir: dir.to_path_buf(),
            token_file: "token.json".to_string(),
        };
        TokenStore::new(&config)
    }

    fn token() -> Token {
        Token {
            access_token: "tok-123".to_string(),
            user_id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            name: None,
            avatar_url: None,
            provider: Some("github".to_string()),
            expires_at: None,
        }
    }

    #[test]
    fn test_load_absent_token() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir.path().join("nested"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.save(&token()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, token());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_expired_token_cleared_on_load() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let mut expired = token();
        expired.expires_at = Some(Utc::now() - Duration::hours(1));
        store.save(&expired).unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.token_path.exists());
    }

    #[test]
    fn test_username_from_email() {
        assert_eq!(token().username(), "ada");
        let mut t = token();
        t.email = "no-at-sign".to_string();
        assert_eq!(t.username(), "no-at-sign");
    }
}
