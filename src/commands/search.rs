/*!
 * `pbt search` - query the registry for packages
 */

use crate::commands::registry_client;
use crate::config::Config;
use crate::registry::PackageSummary;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

/// Search the registry, or list popular/trending packages.
pub fn run(
    config: &Config,
    query: Option<&str>,
    trending: bool,
    limit: Option<usize>,
) -> Result<()> {
    let client = registry_client(config)?;

    let packages = match query {
        Some(query) => {
            let results = client.search(query, limit)?;
            if results.packages.is_empty() {
                println!("No packages found matching \"{}\".", query);
                return Ok(());
            }
            println!("Found {} package(s) matching \"{}\":\n", results.total, query);
            results.packages
        }
        None if trending => client.trending()?,
        None => client.popular()?,
    };

    display_packages(&packages);
    Ok(())
}

fn display_packages(packages: &[PackageSummary]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Package", "Version", "Description", "Downloads"]);
    for package in packages {
        let full_name = if package.org.is_empty() {
            package.name.clone()
        } else {
            format!("{}/{}", package.org, package.name)
        };
        table.add_row(vec![
            full_name,
            package.version.clone(),
            package.description.clone(),
            package.downloads.to_string(),
        ]);
    }
    println!("{table}");
}
