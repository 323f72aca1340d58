/*!
 * `pbt logout` - clear the stored registry token
 */

use crate::config::Config;
use crate::session::TokenStore;
use anyhow::Result;

/// Remove the stored token. The only place session state is cleared.
pub fn run(config: &Config) -> Result<()> {
    let store = TokenStore::new(config);
    match store.load()? {
        Some(token) => {
            store.clear()?;
            println!("Logged out {}", token.email);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
