/*!
 * Registry HTTP client
 *
 * Thin blocking client over the PromptBucket registry API. Requests are
 * attempted exactly once; there is no retry or backoff. List responses are
 * decoded into typed structures with a documented fallback: an envelope
 * with a `results` sequence first, then a bare sequence, and a decode
 * error only if both fail.
 */

use crate::config::Config;
use crate::session::{Token, TokenStore};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = "promptbucket-cli";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Registry client errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("package not found: {0}")]
    NotFound(String),

    #[error("authentication failed - please run 'pbt login' to re-authenticate")]
    Unauthorized,

    #[error("failed to decode registry response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Summary of a registry package, as returned by list/search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageSummary {
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub stars: u64,
}

/// Search response: the envelope plus the echoed query.
#[derive(Debug)]
pub struct SearchResults {
    pub total: usize,
    pub packages: Vec<PackageSummary>,
}

/// Payload for publishing a package manifest.
#[derive(Debug, serde::Serialize)]
pub struct PublishRequest {
    pub org: String,
    pub name: String,
    pub version: String,
    pub digest: String,
    pub content: String,
}

/// Identity as reported by the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl UserInfo {
    /// Username derived from the email local part.
    pub fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }

    fn from_token(token: &Token) -> Self {
        Self {
            user_id: token.user_id.clone(),
            email: token.email.clone(),
            name: token.name.clone(),
            provider: token.provider.clone(),
        }
    }
}

/// Blocking client for the PromptBucket registry.
pub struct RegistryClient {
    config: Config,
    token: Option<Token>,
    store: TokenStore,
    http: reqwest::blocking::Client,
}

impl RegistryClient {
    /// Create a client; `token` enables authenticated requests.
    pub fn new(config: Config, token: Option<Token>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let store = TokenStore::new(&config);
        Ok(Self {
            config,
            token,
            store,
            http,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn get(&self, endpoint: &str) -> Result<reqwest::blocking::Response> {
        let url = self.config.api_url(endpoint);
        debug!(%url, "GET");
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(&token.access_token);
        }
        let response = request.send()?;
        self.check_status(response)
    }

    fn post_json<B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::blocking::Response> {
        let url = self.config.api_url(endpoint);
        debug!(%url, "POST");
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(&token.access_token);
        }
        let response = request.send()?;
        self.check_status(response)
    }

    fn post(&self, endpoint: &str) -> Result<reqwest::blocking::Response> {
        let url = self.config.api_url(endpoint);
        debug!(%url, "POST");
        let mut request = self.http.post(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(&token.access_token);
        }
        let response = request.send()?;
        self.check_status(response)
    }

    fn delete(&self, endpoint: &str) -> Result<reqwest::blocking::Response> {
        let url = self.config.api_url(endpoint);
        debug!(%url, "DELETE");
        let mut request = self.http.delete(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(&token.access_token);
        }
        let response = request.send()?;
        self.check_status(response)
    }

    fn check_status(
        &self,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 401 {
            return Err(self.unauthorized());
        }

        let body = response.text().unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or(body);
        Err(RegistryError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Search packages by query string.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<SearchResults> {
        let mut endpoint = format!("/packages/search?q={}", query);
        if let Some(limit) = limit {
            endpoint.push_str(&format!("&limit={}", limit));
        }

        let body = self.get(&endpoint)?.text()?;
        let packages = decode_package_list(&body)?;
        let total = decode_total(&body).unwrap_or(packages.len());
        Ok(SearchResults { total, packages })
    }

    /// List popular packages.
    pub fn popular(&self) -> Result<Vec<PackageSummary>> {
        let body = self.get("/packages/popular")?.text()?;
        decode_package_list(&body)
    }

    /// List trending packages.
    pub fn trending(&self) -> Result<Vec<PackageSummary>> {
        let body = self.get("/packages/trending")?.text()?;
        decode_package_list(&body)
    }

    /// Fetch the raw manifest bytes for a published package version.
    pub fn fetch_manifest(&self, org: &str, name: &str, version: &str) -> Result<Vec<u8>> {
        let endpoint = format!("/manifests/{}/{}/{}", org, name, version);
        match self.get(&endpoint) {
            Ok(response) => Ok(response.bytes()?.to_vec()),
            Err(RegistryError::Api { status: 404, .. }) => Err(RegistryError::NotFound(format!(
                "{}/{}:{}",
                org, name, version
            ))),
            Err(e) => Err(e),
        }
    }

    /// Publish a manifest to the registry. Requires authentication.
    pub fn publish(&self, request: &PublishRequest) -> Result<()> {
        if !self.is_authenticated() {
            return Err(RegistryError::Unauthorized);
        }
        self.post_json("/manifests", request)?;
        Ok(())
    }

    /// Star a package. Requires authentication.
    pub fn star(&self, org: &str, name: &str) -> Result<()> {
        if !self.is_authenticated() {
            return Err(RegistryError::Unauthorized);
        }
        let endpoint = format!("/packages/{}/{}/star", org, name);
        match self.post(&endpoint) {
            Ok(_) => Ok(()),
            Err(RegistryError::Api { status: 404, .. }) => {
                Err(RegistryError::NotFound(format!("{}/{}", org, name)))
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a star from a package. Requires authentication.
    pub fn unstar(&self, org: &str, name: &str) -> Result<()> {
        if !self.is_authenticated() {
            return Err(RegistryError::Unauthorized);
        }
        let endpoint = format!("/packages/{}/{}/star", org, name);
        match self.delete(&endpoint) {
            Ok(_) => Ok(()),
            Err(RegistryError::Api { status: 404, .. }) => {
                Err(RegistryError::NotFound(format!("{}/{}", org, name)))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the authenticated identity from the registry, falling back
    /// to the stored token when the registry cannot be reached.
    pub fn current_user(&self) -> Result<UserInfo> {
        let Some(token) = &self.token else {
            return Err(RegistryError::Unauthorized);
        };
        match self.get("/auth/me") {
            Ok(response) => decode_user(&response.text()?),
            Err(RegistryError::Http(e)) => {
                debug!(error = %e, "registry unreachable, using stored identity");
                Ok(UserInfo::from_token(token))
            }
            Err(e) => Err(e),
        }
    }

    /// Map a 401 to an error, dropping the stored token so the next
    /// invocation starts unauthenticated.
    fn unauthorized(&self) -> RegistryError {
        if self.token.is_some() {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear stored token");
            }
        }
        RegistryError::Unauthorized
    }
}

/// Decode a package list, trying the `{ results: [...] }` envelope first
/// and a bare array second.
fn decode_package_list(body: &str) -> Result<Vec<PackageSummary>> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| RegistryError::Decode(e.to_string()))?;

    let results = match &value {
        serde_json::Value::Object(object) => object
            .get("results")
            .cloned()
            .ok_or_else(|| RegistryError::Decode("object has no 'results' sequence".to_string()))?,
        serde_json::Value::Array(_) => value,
        _ => {
            return Err(RegistryError::Decode(
                "expected an object with results or a bare sequence".to_string(),
            ))
        }
    };

    serde_json::from_value(results).map_err(|e| RegistryError::Decode(e.to_string()))
}

/// Decode a user payload, unwrapping a `{ user: {...} }` envelope when
/// present.
fn decode_user(body: &str) -> Result<UserInfo> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| RegistryError::Decode(e.to_string()))?;

    let user = match &value {
        serde_json::Value::Object(object) if object.contains_key("user") => {
            object["user"].clone()
        }
        _ => value,
    };

    serde_json::from_value(user).map_err(|e| RegistryError::Decode(e.to_string()))
}

fn decode_total(body: &str) -> Option<usize> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("total")?
        .as_u64()
        .map(|t| t as usize)
}

fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }
    let decoded: ErrorBody = serde_json::from_str(body).ok()?;
    decoded.message.or(decoded.error)
}
