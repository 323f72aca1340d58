/*!
 * Registry endpoint and local configuration
 */

use std::env;
use std::path::PathBuf;

/// Default registry base URL
const DEFAULT_BASE_URL: &str = "https://harbor.promptbucket.co";

/// Default API version segment
const DEFAULT_API_VERSION: &str = "v1";

/// Registry and local-state configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry base URL (override: `PROMPTBUCKET_BASE_URL`)
    pub base_url: String,

    /// API version path segment (override: `PROMPTBUCKET_API_VERSION`)
    pub api_version: String,

    /// Local configuration directory (`~/.promptbucket`)
    pub config_dir: PathBuf,

    /// Token filename within the config directory
    pub token_file: String,
}

impl Config {
    /// Build configuration from environment with defaults.
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".promptbucket");

        Self {
            base_url: env_or_default("PROMPTBUCKET_BASE_URL", DEFAULT_BASE_URL),
            api_version: env_or_default("PROMPTBUCKET_API_VERSION", DEFAULT_API_VERSION),
            config_dir,
            token_file: "token.json".to_string(),
        }
    }

    /// Full API URL for an endpoint path.
    pub fn api_url(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = if endpoint.is_empty() || endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{}", endpoint)
        };
        format!("{}/{}{}", base, self.api_version, endpoint)
    }

    /// Full path of the token file.
    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join(&self.token_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
