/*!
 * CLI subcommand implementations
 */

pub mod build;
pub mod info;
pub mod init;
pub mod login;
pub mod logout;
pub mod pull;
pub mod push;
pub mod render;
pub mod search;
pub mod star;
pub mod validate;
pub mod whoami;

use crate::config::Config;
use crate::registry::RegistryClient;
use crate::session::TokenStore;
use anyhow::Result;

/// Build a registry client using the token stored on disk, if any.
///
/// The token is loaded here, once per invocation, and handed to the
/// client; nothing reloads it mid-process.
pub fn registry_client(config: &Config) -> Result<RegistryClient> {
    let token = TokenStore::new(config).load()?;
    Ok(RegistryClient::new(config.clone(), token)?)
}
