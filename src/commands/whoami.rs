/*!
 * `pbt whoami` - show the authenticated identity
 */

use crate::commands::registry_client;
use crate::config::Config;
use anyhow::Result;

/// Print the authenticated identity, as reported by the registry when it
/// is reachable and from the stored token otherwise.
pub fn run(config: &Config) -> Result<()> {
    let client = registry_client(config)?;
    if !client.is_authenticated() {
        println!("Not logged in. Run 'pbt login' to authenticate.");
        return Ok(());
    }

    let user = client.current_user()?;
    println!("{}", user.email);
    if let Some(name) = &user.name {
        println!("Name: {}", name);
    }
    if let Some(provider) = &user.provider {
        println!("Provider: {}", provider);
    }
    Ok(())
}
