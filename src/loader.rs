/*!
 * Manifest loading from disk or URL
 *
 * Implements the core crate's ManifestSource seam: references starting
 * with http:// or https:// are fetched over the network, everything else
 * is read from the local filesystem. One attempt per reference, no retry.
 */

use promptbucket_core_manifest::{Error, Manifest, ManifestSource, Result};
use std::fs;
use std::time::Duration;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads manifest bytes from a local path or an HTTP(S) URL.
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    /// Read the raw bytes a reference points at.
    pub fn fetch_bytes(&self, reference: &str) -> Result<Vec<u8>> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            debug!(%reference, "fetching manifest over HTTP");
            let client = reqwest::blocking::Client::builder()
                .user_agent("promptbucket-cli")
                .timeout(FETCH_TIMEOUT)
                .build()
                .map_err(|e| Error::fetch(reference, e.to_string()))?;
            let response = client
                .get(reference)
                .send()
                .map_err(|e| Error::fetch(reference, e.to_string()))?;
            if !response.status().is_success() {
                return Err(Error::fetch(
                    reference,
                    format!("status {}", response.status()),
                ));
            }
            response
                .bytes()
                .map(|b| b.to_vec())
                .map_err(|e| Error::fetch(reference, e.to_string()))
        } else {
            debug!(%reference, "reading manifest from disk");
            fs::read(reference).map_err(|e| Error::fetch(reference, e.to_string()))
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestSource for Loader {
    fn fetch(&self, reference: &str) -> Result<Manifest> {
        let bytes = self.fetch_bytes(reference)?;
        Manifest::parse(&bytes)
    }
}
