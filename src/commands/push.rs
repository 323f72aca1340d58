/*!
 * `pbt push` - publish the local package to the registry
 */

use crate::commands::registry_client;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use promptbucket_core_manifest::{Manifest, MANIFEST_FILE};
use sha2::{Digest, Sha256};
use std::fs;

/// Publish the working directory's manifest. Requires authentication.
pub fn run(config: &Config) -> Result<()> {
    let client = registry_client(config)?;
    if !client.is_authenticated() {
        bail!("not authenticated. Run 'pbt login' first");
    }
    let user = client.current_user()?;
    println!("Pushing as {}", user.email);

    let raw = fs::read(MANIFEST_FILE)
        .with_context(|| format!("failed to read {}", MANIFEST_FILE))?;
    let manifest = Manifest::parse(&raw)?;

    let missing = manifest.missing_required();
    if !missing.is_empty() {
        bail!("manifest missing required fields: {}", missing.join(", "));
    }

    let digest = format!("sha256:{}", hex::encode(Sha256::digest(&raw)));
    let org = user.username().to_string();

    println!("Pushing {}/{}:{}", org, manifest.name, manifest.version);
    println!("   Digest: {}", digest);

    let request = crate::registry::PublishRequest {
        org,
        name: manifest.name.clone(),
        version: manifest.version.clone(),
        digest,
        content: String::from_utf8_lossy(&raw).into_owned(),
    };
    client.publish(&request)?;

    println!("Published {}:{}", manifest.name, manifest.version);
    Ok(())
}
