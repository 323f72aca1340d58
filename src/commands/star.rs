/*!
 * `pbt star` / `pbt unstar` - star or unstar a registry package
 */

use crate::commands::registry_client;
use crate::config::Config;
use anyhow::{bail, Result};

/// Star or unstar `org/name` on the registry. Requires authentication.
pub fn run(config: &Config, package: &str, starred: bool) -> Result<()> {
    let (org, name) = parse_org_name(package)?;

    let client = registry_client(config)?;
    if !client.is_authenticated() {
        bail!("not authenticated. Run 'pbt login' first");
    }

    if starred {
        client.star(org, name)?;
        println!("Starred {}/{}", org, name);
    } else {
        client.unstar(org, name)?;
        println!("Unstarred {}/{}", org, name);
    }
    Ok(())
}

fn parse_org_name(package: &str) -> Result<(&str, &str)> {
    match package.split_once('/') {
        Some((org, name)) if !org.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((org, name))
        }
        _ => bail!("invalid package format: {} (expected org/name)", package),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_org_name() {
        assert_eq!(
            parse_org_name("acme/reviewer").unwrap(),
            ("acme", "reviewer")
        );
    }

    #[test]
    fn test_parse_org_name_rejects_malformed_specs() {
        assert!(parse_org_name("reviewer").is_err());
        assert!(parse_org_name("acme/reviewer/extra").is_err());
        assert!(parse_org_name("/reviewer").is_err());
        assert!(parse_org_name("acme/").is_err());
    }
}
