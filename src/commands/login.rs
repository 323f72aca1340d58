/*!
 * `pbt login` - store a registry access token
 */

use crate::config::Config;
use crate::session::{Token, TokenStore};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};

/// Store an access token for registry authentication.
///
/// The token can be passed via `--token`; otherwise it is prompted for
/// without echo. Tokens are issued from the registry's account page.
pub fn run(config: &Config, token_flag: Option<&str>) -> Result<()> {
    let access_token = match token_flag {
        Some(token) => token.to_string(),
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Access token")
            .interact()?,
    };

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Account email")
        .interact_text()?;

    let token = Token {
        access_token,
        user_id: String::new(),
        email,
        name: None,
        avatar_url: None,
        provider: Some("token".to_string()),
        expires_at: None,
    };

    TokenStore::new(config).save(&token)?;
    println!("Logged in as {}", token.email);
    Ok(())
}
